//! 实体定义
//!
//! 实体 = 几何数据 + 视觉属性。实体本身不知道自己是否已被
//! 添加到图形数据库；游离/驻留的生命周期状态由数据库管理。

use crate::geometry::{Geometry, GeometryError};
use crate::math::{BoundingBox3, Matrix4};
use crate::properties::Properties;
use serde::{Deserialize, Serialize};

/// 几何实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub geometry: Geometry,
    pub properties: Properties,
}

impl Entity {
    /// 以默认属性创建实体
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            properties: Properties::default(),
        }
    }

    pub fn with_properties(geometry: Geometry, properties: Properties) -> Self {
        Self {
            geometry,
            properties,
        }
    }

    /// 对实体施加仿射变换
    pub fn transform_by(&mut self, m: &Matrix4) {
        self.geometry.transform_by(m);
    }

    /// 获取实体的变换副本，属性原样保留
    pub fn transformed_copy(&self, m: &Matrix4) -> Entity {
        let mut copy = self.clone();
        copy.transform_by(m);
        copy
    }

    /// 计算偏移副本的几何（属性由调用方决定如何继承）
    pub fn offset_geometry(&self, distance: f64) -> Result<Vec<Geometry>, GeometryError> {
        self.geometry.offset(distance)
    }

    pub fn bounding_box(&self) -> BoundingBox3 {
        self.geometry.bounding_box()
    }
}
