//! ARX 核心几何引擎
//!
//! 提供3D几何图元、仿射变换矩阵的构造与应用。
//!
//! # 架构设计
//!
//! - `math`: 点、向量、矩阵等数学基础类型
//! - `geometry`: 几何图元（点、线、圆、圆弧、多段线）
//! - `transform`: 四种变换矩阵原语（平移、旋转、缩放、镜像）
//! - `entity`: 实体 = 几何 + 视觉属性
//!
//! # 示例
//!
//! ```rust
//! use arx_core::prelude::*;
//!
//! // 创建一条线段并绕Z轴旋转90度
//! let mut line = Geometry::Line(Line::new(Point3::origin(), Point3::new(100.0, 0.0, 0.0)));
//! let m = transform::rotation(std::f64::consts::FRAC_PI_2, Vector3::z(), Point3::origin());
//! line.transform_by(&m);
//! ```

pub mod entity;
pub mod geometry;
pub mod math;
pub mod properties;
pub mod transform;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::entity::Entity;
    pub use crate::geometry::{Arc, Circle, Geometry, GeometryError, Line, Point, Polyline};
    pub use crate::math::{vector_between, BoundingBox3, Matrix4, Point3, Vector3, EPSILON};
    pub use crate::properties::{Color, Properties};
    pub use crate::transform;
}
