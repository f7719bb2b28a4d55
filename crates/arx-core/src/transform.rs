//! 仿射变换矩阵构造
//!
//! 四种变换原语，均为无状态纯函数：
//! - `displacement`: 平移（源点到目标点）
//! - `rotation`: 绕过基点的轴旋转（右手定则）
//! - `scaling`: 以基点为中心的均匀缩放
//! - `mirroring`: 以两点确定的无限直线为轴的镜像
//!
//! 所有更高层的移动/复制/旋转/缩放/镜像操作都由这四个矩阵组合而成。

use crate::math::{Matrix4, Point3, Vector3, EPSILON};
use nalgebra::{Matrix3, Rotation3, Unit};

/// 构造从 `source` 平移到 `target` 的矩阵
///
/// `displacement(a, b) * displacement(b, a)` 恒为单位矩阵。
pub fn displacement(source: Point3, target: Point3) -> Matrix4 {
    Matrix4::new_translation(&(target - source))
}

/// 构造绕过 `pivot` 的 `axis` 轴旋转 `angle` 弧度的矩阵
///
/// 正角度为右手定则方向；`angle = 0` 精确返回单位矩阵。
/// `axis` 不能为零向量（前置条件）。
pub fn rotation(angle: f64, axis: Vector3, pivot: Point3) -> Matrix4 {
    assert!(axis.norm() > EPSILON, "rotation axis must be non-zero");
    let linear = Rotation3::from_axis_angle(&Unit::new_normalize(axis), angle).to_homogeneous();
    about_pivot(linear, pivot)
}

/// 构造以 `pivot` 为中心、比例为 `factor` 的均匀缩放矩阵
///
/// `factor = 1` 返回单位矩阵；负比例等价于点反演复合 `|factor|` 倍缩放。
/// `factor` 不能为零（前置条件）。
pub fn scaling(factor: f64, pivot: Point3) -> Matrix4 {
    assert!(factor.abs() > EPSILON, "scale factor must be non-zero");
    about_pivot(Matrix4::new_scaling(factor), pivot)
}

/// 构造以过 `p1`、`p2` 的无限直线为轴的镜像矩阵
///
/// 等价于绕该直线旋转180度；对任意点施加两次恒等于原点（对合性）。
/// 两点不能重合（前置条件）。
pub fn mirroring(p1: Point3, p2: Point3) -> Matrix4 {
    let dir = p2 - p1;
    assert!(dir.norm() > EPSILON, "mirror line points must be distinct");
    let d = dir.normalize();

    // 直线方向的反射：L = 2*d*d^T - I
    let linear = (d * d.transpose() * 2.0 - Matrix3::identity()).to_homogeneous();
    about_pivot(linear, p1)
}

/// 将线性变换移到以 `pivot` 为基点：T(p) * L * T(-p)
fn about_pivot(linear: Matrix4, pivot: Point3) -> Matrix4 {
    Matrix4::new_translation(&pivot.coords) * linear * Matrix4::new_translation(&-pivot.coords)
}
