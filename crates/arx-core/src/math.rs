//! 数学基础类型
//!
//! 基于 nalgebra，统一使用 f64 精度：
//! - `Point3` / `Vector3`: 三维点与向量
//! - `Matrix4`: 齐次仿射变换矩阵
//! - `BoundingBox3`: 轴对齐包围盒

/// 几何容差
pub const EPSILON: f64 = 1e-10;

pub type Point3 = nalgebra::Point3<f64>;
pub type Vector3 = nalgebra::Vector3<f64>;
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// 计算从 `from` 指向 `to` 的向量
pub fn vector_between(from: &Point3, to: &Point3) -> Vector3 {
    to - from
}

/// 三维轴对齐包围盒
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox3 {
    pub min: Point3,
    pub max: Point3,
}

impl BoundingBox3 {
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// 空包围盒（min为正无穷，max为负无穷）
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// 是否为空（从未包含任何点）
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    /// 从点集构造包围盒
    pub fn from_points(points: impl IntoIterator<Item = Point3>) -> Self {
        let mut bbox = Self::empty();
        for p in points {
            bbox.expand_to_include(&p);
        }
        bbox
    }

    /// 扩展包围盒以包含指定点
    pub fn expand_to_include(&mut self, p: &Point3) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// 合并另一个包围盒
    pub fn union(&mut self, other: &BoundingBox3) {
        if other.is_empty() {
            return;
        }
        self.expand_to_include(&other.min);
        self.expand_to_include(&other.max);
    }

    /// 检查点是否在包围盒内
    pub fn contains(&self, p: &Point3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// 包围盒中心
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }
}
