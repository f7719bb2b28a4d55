//! 几何图元定义
//!
//! 支持的基本图元：
//! - 点 (Point)
//! - 线段 (Line)
//! - 圆 (Circle)
//! - 圆弧 (Arc)
//! - 多段线 (Polyline)
//!
//! 所有图元都支持仿射变换（`transform_by`），曲线类图元支持偏移。

use crate::math::{BoundingBox3, Matrix4, Point3, Vector3, EPSILON};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 几何计算错误
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeometryError {
    #[error("offset produces a degenerate curve: {0}")]
    DegenerateOffset(String),

    #[error("geometry is not a curve and cannot be offset")]
    NotACurve,
}

/// 几何类型枚举
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Geometry {
    Point(Point),
    Line(Line),
    Circle(Circle),
    Arc(Arc),
    Polyline(Polyline),
}

impl Geometry {
    /// 获取几何的类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::Line(_) => "Line",
            Geometry::Circle(_) => "Circle",
            Geometry::Arc(_) => "Arc",
            Geometry::Polyline(_) => "Polyline",
        }
    }

    /// 获取几何的包围盒
    pub fn bounding_box(&self) -> BoundingBox3 {
        match self {
            Geometry::Point(p) => BoundingBox3::new(p.position, p.position),
            Geometry::Line(l) => BoundingBox3::from_points([l.start, l.end]),
            Geometry::Circle(c) => c.bounding_box(),
            Geometry::Arc(a) => a.bounding_box(),
            Geometry::Polyline(pl) => BoundingBox3::from_points(pl.vertices.iter().copied()),
        }
    }

    /// 对几何施加仿射变换
    pub fn transform_by(&mut self, m: &Matrix4) {
        match self {
            Geometry::Point(p) => p.position = m.transform_point(&p.position),
            Geometry::Line(l) => {
                l.start = m.transform_point(&l.start);
                l.end = m.transform_point(&l.end);
            }
            Geometry::Circle(c) => c.transform_by(m),
            Geometry::Arc(a) => a.transform_by(m),
            Geometry::Polyline(pl) => {
                for v in &mut pl.vertices {
                    *v = m.transform_point(v);
                }
            }
        }
    }

    /// 计算偏移曲线
    ///
    /// 正的偏移距离向各图元约定的外侧偏移；结果可能包含多个图元。
    /// 非曲线或退化结果返回错误，且不产生任何部分结果。
    pub fn offset(&self, distance: f64) -> Result<Vec<Geometry>, GeometryError> {
        match self {
            Geometry::Point(_) => Err(GeometryError::NotACurve),
            Geometry::Line(l) => Ok(vec![Geometry::Line(l.offset(distance)?)]),
            Geometry::Circle(c) => Ok(vec![Geometry::Circle(c.offset(distance)?)]),
            Geometry::Arc(a) => Ok(vec![Geometry::Arc(a.offset(distance)?)]),
            Geometry::Polyline(pl) => Ok(vec![Geometry::Polyline(pl.offset(distance)?)]),
        }
    }
}

/// 点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Point {
    pub position: Point3,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
        }
    }

    pub fn from_point3(position: Point3) -> Self {
        Self { position }
    }
}

/// 线段
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub start: Point3,
    pub end: Point3,
}

impl Line {
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// 计算线段长度
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// 计算线段方向向量（单位向量）
    pub fn direction(&self) -> Vector3 {
        (self.end - self.start).normalize()
    }

    /// 计算线段中点
    pub fn midpoint(&self) -> Point3 {
        nalgebra::center(&self.start, &self.end)
    }

    /// 在XY平面内平行偏移
    ///
    /// 偏移方向为方向向量左侧的垂线（Z轴叉乘方向），距离可为负。
    /// 零长线段或垂直于XY平面的线段无法偏移。
    pub fn offset(&self, distance: f64) -> Result<Line, GeometryError> {
        let dir = self.end - self.start;
        if dir.norm() < EPSILON {
            return Err(GeometryError::DegenerateOffset(
                "zero-length line".to_string(),
            ));
        }
        let perp = Vector3::z().cross(&dir);
        if perp.norm() < EPSILON {
            return Err(GeometryError::DegenerateOffset(
                "line is parallel to the Z axis".to_string(),
            ));
        }
        let shift = perp.normalize() * distance;
        Ok(Line::new(self.start + shift, self.end + shift))
    }
}

/// 圆
///
/// `normal` 为圆所在平面的法向，缺省为Z轴。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point3,
    pub normal: Vector3,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point3, radius: f64) -> Self {
        Self {
            center,
            normal: Vector3::z(),
            radius,
        }
    }

    /// 计算周长
    pub fn circumference(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.radius
    }

    /// 计算面积
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }

    pub fn bounding_box(&self) -> BoundingBox3 {
        // 简化处理：按球体包围盒估算，对任意法向都保守
        let r = Vector3::new(self.radius, self.radius, self.radius);
        BoundingBox3::new(self.center - r, self.center + r)
    }

    fn transform_by(&mut self, m: &Matrix4) {
        self.center = m.transform_point(&self.center);
        // 均匀缩放比例取单位向量变换后的长度（旋转与镜像下为1）
        let scale = m.transform_vector(&Vector3::x()).norm();
        self.radius *= scale;
        let n = m.transform_vector(&self.normal);
        if n.norm() > EPSILON {
            self.normal = n.normalize();
        }
    }

    /// 偏移：半径增减 `distance`
    ///
    /// 结果半径不为正时偏移退化。
    pub fn offset(&self, distance: f64) -> Result<Circle, GeometryError> {
        let radius = self.radius + distance;
        if radius < EPSILON {
            return Err(GeometryError::DegenerateOffset(format!(
                "resulting radius {} is not positive",
                radius
            )));
        }
        Ok(Circle {
            center: self.center,
            normal: self.normal,
            radius,
        })
    }
}

/// 圆弧（XY平面内，角度按逆时针计）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arc {
    pub center: Point3,
    pub radius: f64,
    /// 起始角度（弧度）
    pub start_angle: f64,
    /// 终止角度（弧度）
    pub end_angle: f64,
}

impl Arc {
    pub fn new(center: Point3, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            center,
            radius,
            start_angle,
            end_angle,
        }
    }

    /// 从三点创建圆弧（起点、弧上一点、终点）
    ///
    /// 三点共线时无法确定圆心，返回 `None`。
    pub fn from_three_points(p1: Point3, p2: Point3, p3: Point3) -> Option<Self> {
        let d = 2.0 * (p1.x * (p2.y - p3.y) + p2.x * (p3.y - p1.y) + p3.x * (p1.y - p2.y));
        if d.abs() < EPSILON {
            return None; // 三点共线
        }

        let ux = ((p1.x * p1.x + p1.y * p1.y) * (p2.y - p3.y)
            + (p2.x * p2.x + p2.y * p2.y) * (p3.y - p1.y)
            + (p3.x * p3.x + p3.y * p3.y) * (p1.y - p2.y))
            / d;
        let uy = ((p1.x * p1.x + p1.y * p1.y) * (p3.x - p2.x)
            + (p2.x * p2.x + p2.y * p2.y) * (p1.x - p3.x)
            + (p3.x * p3.x + p3.y * p3.y) * (p2.x - p1.x))
            / d;

        let center = Point3::new(ux, uy, p1.z);
        let radius = (p1 - center).norm();
        let start_angle = (p1.y - center.y).atan2(p1.x - center.x);
        let end_angle = (p3.y - center.y).atan2(p3.x - center.x);
        Some(Self::new(center, radius, start_angle, end_angle))
    }

    /// 计算扫过的角度（归一到 [0, 2π)）
    pub fn sweep_angle(&self) -> f64 {
        let tau = std::f64::consts::TAU;
        (self.end_angle - self.start_angle).rem_euclid(tau)
    }

    /// 计算弧长
    pub fn length(&self) -> f64 {
        self.sweep_angle() * self.radius
    }

    /// 起点
    pub fn start_point(&self) -> Point3 {
        self.point_at(self.start_angle)
    }

    /// 终点
    pub fn end_point(&self) -> Point3 {
        self.point_at(self.end_angle)
    }

    fn point_at(&self, angle: f64) -> Point3 {
        Point3::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
            self.center.z,
        )
    }

    pub fn bounding_box(&self) -> BoundingBox3 {
        // 简化处理：按整圆包围盒估算
        let r = Vector3::new(self.radius, self.radius, 0.0);
        BoundingBox3::new(self.center - r, self.center + r)
    }

    fn transform_by(&mut self, m: &Matrix4) {
        let start = m.transform_point(&self.start_point());
        let end = m.transform_point(&self.end_point());
        let center = m.transform_point(&self.center);

        self.radius *= m.transform_vector(&Vector3::x()).norm();
        let start_angle = (start.y - center.y).atan2(start.x - center.x);
        let end_angle = (end.y - center.y).atan2(end.x - center.x);

        // 镜像翻转绕向时交换端点，保持逆时针约定
        let vx = m.transform_vector(&Vector3::x());
        let vy = m.transform_vector(&Vector3::y());
        let flipped = vx.x * vy.y - vx.y * vy.x < 0.0;
        if flipped {
            self.start_angle = end_angle;
            self.end_angle = start_angle;
        } else {
            self.start_angle = start_angle;
            self.end_angle = end_angle;
        }
        self.center = center;
    }

    /// 偏移：半径增减 `distance`，角度不变
    pub fn offset(&self, distance: f64) -> Result<Arc, GeometryError> {
        let radius = self.radius + distance;
        if radius < EPSILON {
            return Err(GeometryError::DegenerateOffset(format!(
                "resulting radius {} is not positive",
                radius
            )));
        }
        Ok(Arc {
            radius,
            ..self.clone()
        })
    }
}

/// 多段线（直线段序列）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polyline {
    pub vertices: Vec<Point3>,
    /// 是否闭合
    pub closed: bool,
}

impl Polyline {
    pub fn new(vertices: Vec<Point3>, closed: bool) -> Self {
        Self { vertices, closed }
    }

    /// 顶点数量
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 线段数量
    pub fn segment_count(&self) -> usize {
        if self.vertices.len() < 2 {
            return 0;
        }
        if self.closed {
            self.vertices.len()
        } else {
            self.vertices.len() - 1
        }
    }

    /// 计算总长度
    pub fn length(&self) -> f64 {
        let mut total = 0.0;
        for i in 0..self.segment_count() {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % self.vertices.len()];
            total += (b - a).norm();
        }
        total
    }

    /// 在XY平面内偏移
    ///
    /// 每条边按左垂线偏移后在角点处求交（斜接连接）。
    /// 顶点不足、重合顶点或近平行角点会导致偏移退化。
    pub fn offset(&self, distance: f64) -> Result<Polyline, GeometryError> {
        if self.vertices.len() < 2 {
            return Err(GeometryError::DegenerateOffset(
                "polyline has fewer than two vertices".to_string(),
            ));
        }

        // 先偏移每条边
        let mut segments = Vec::with_capacity(self.segment_count());
        for i in 0..self.segment_count() {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % self.vertices.len()];
            segments.push(Line::new(a, b).offset(distance)?);
        }

        // 相邻边求交得到新顶点
        let mut vertices = Vec::with_capacity(self.vertices.len());
        let n = segments.len();
        if self.closed {
            for i in 0..n {
                let prev = &segments[(i + n - 1) % n];
                vertices.push(intersect_xy(prev, &segments[i])?);
            }
        } else {
            vertices.push(segments[0].start);
            for i in 1..n {
                vertices.push(intersect_xy(&segments[i - 1], &segments[i])?);
            }
            vertices.push(segments[n - 1].end);
        }

        Ok(Polyline {
            vertices,
            closed: self.closed,
        })
    }
}

/// 求两条直线（按无限直线处理）在XY平面内的交点
fn intersect_xy(a: &Line, b: &Line) -> Result<Point3, GeometryError> {
    let d1 = a.end - a.start;
    let d2 = b.end - b.start;
    let denom = d1.x * d2.y - d1.y * d2.x;
    if denom.abs() < EPSILON {
        // 共线边：直接用公共端点
        if (a.end - b.start).norm() < EPSILON {
            return Ok(a.end);
        }
        return Err(GeometryError::DegenerateOffset(
            "adjacent segments are parallel".to_string(),
        ));
    }
    let w = b.start - a.start;
    let t = (w.x * d2.y - w.y * d2.x) / denom;
    Ok(a.start + d1 * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform;

    #[test]
    fn test_line_length() {
        let line = Line::new(Point3::origin(), Point3::new(3.0, 4.0, 0.0));
        assert!((line.length() - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_circle_area() {
        let circle = Circle::new(Point3::origin(), 1.0);
        assert!((circle.area() - std::f64::consts::PI).abs() < EPSILON);
    }

    #[test]
    fn test_circle_scaling_scales_radius() {
        let mut geo = Geometry::Circle(Circle::new(Point3::new(1.0, 0.0, 0.0), 2.0));
        geo.transform_by(&transform::scaling(3.0, Point3::origin()));
        match geo {
            Geometry::Circle(c) => {
                assert!((c.radius - 6.0).abs() < EPSILON);
                assert!((c.center.x - 3.0).abs() < EPSILON);
            }
            _ => panic!("expected circle"),
        }
    }

    #[test]
    fn test_circle_mirror_keeps_radius() {
        let mut geo = Geometry::Circle(Circle::new(Point3::new(0.0, 2.0, 0.0), 1.5));
        geo.transform_by(&transform::mirroring(
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
        ));
        match geo {
            Geometry::Circle(c) => {
                assert!((c.radius - 1.5).abs() < EPSILON);
                assert!((c.center.y + 2.0).abs() < EPSILON);
            }
            _ => panic!("expected circle"),
        }
    }

    #[test]
    fn test_arc_from_three_points() {
        // 上半单位圆
        let arc = Arc::from_three_points(
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(-1.0, 0.0, 0.0),
        )
        .unwrap();
        assert!(arc.center.coords.norm() < EPSILON);
        assert!((arc.radius - 1.0).abs() < EPSILON);
        assert!((arc.sweep_angle() - std::f64::consts::PI).abs() < 1e-9);
        assert!((arc.length() - std::f64::consts::PI).abs() < 1e-9);

        // 共线三点
        assert!(Arc::from_three_points(
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        )
        .is_none());
    }

    #[test]
    fn test_arc_rotation_shifts_angles() {
        let mut geo = Geometry::Arc(Arc::new(Point3::origin(), 2.0, 0.0, 1.0));
        geo.transform_by(&transform::rotation(
            std::f64::consts::FRAC_PI_2,
            Vector3::z(),
            Point3::origin(),
        ));
        match geo {
            Geometry::Arc(a) => {
                assert!((a.radius - 2.0).abs() < EPSILON);
                assert!((a.sweep_angle() - 1.0).abs() < 1e-9);
                let s = a.start_point();
                // 起点从 (2,0) 转到 (0,2)
                assert!(s.x.abs() < 1e-9);
                assert!((s.y - 2.0).abs() < 1e-9);
            }
            _ => panic!("expected arc"),
        }
    }

    #[test]
    fn test_arc_mirror_keeps_sweep() {
        let mut geo = Geometry::Arc(Arc::new(Point3::new(5.0, 0.0, 0.0), 1.0, 0.0, 1.5));
        geo.transform_by(&transform::mirroring(
            Point3::origin(),
            Point3::new(0.0, 1.0, 0.0),
        ));
        match geo {
            Geometry::Arc(a) => {
                assert!((a.center.x + 5.0).abs() < EPSILON);
                assert!((a.radius - 1.0).abs() < EPSILON);
                // 端点交换后扫角保持不变
                assert!((a.sweep_angle() - 1.5).abs() < 1e-9);
            }
            _ => panic!("expected arc"),
        }
    }

    #[test]
    fn test_arc_offset() {
        let arc = Arc::new(Point3::origin(), 2.0, 0.0, 1.0);
        let off = arc.offset(1.0).unwrap();
        assert!((off.radius - 3.0).abs() < EPSILON);
        assert!(arc.offset(-2.0).is_err());
    }

    #[test]
    fn test_line_offset() {
        let line = Line::new(Point3::origin(), Point3::new(10.0, 0.0, 0.0));
        let off = line.offset(2.0).unwrap();
        // Z x X = Y，向 +Y 偏移
        assert!((off.start.y - 2.0).abs() < EPSILON);
        assert!((off.end.y - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_circle_offset_degenerate() {
        let circle = Circle::new(Point3::origin(), 1.0);
        assert!(circle.offset(-1.0).is_err());
        assert!(circle.offset(1.0).is_ok());
    }

    #[test]
    fn test_point_offset_not_a_curve() {
        let geo = Geometry::Point(Point::new(0.0, 0.0, 0.0));
        assert!(matches!(geo.offset(1.0), Err(GeometryError::NotACurve)));
    }

    #[test]
    fn test_polyline_offset_rectangle() {
        // 逆时针单位正方形向内偏移
        let pl = Polyline::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(10.0, 0.0, 0.0),
                Point3::new(10.0, 10.0, 0.0),
                Point3::new(0.0, 10.0, 0.0),
            ],
            true,
        );
        let off = pl.offset(1.0).unwrap();
        assert_eq!(off.vertex_count(), 4);
        // 逆时针走向时左侧为内侧
        assert!(off.vertices.iter().all(|v| v.x > 0.5 && v.x < 9.5));
    }

    #[test]
    fn test_polyline_transform() {
        let mut geo = Geometry::Polyline(Polyline::new(
            vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)],
            false,
        ));
        geo.transform_by(&transform::displacement(
            Point3::origin(),
            Point3::new(0.0, 5.0, 0.0),
        ));
        match geo {
            Geometry::Polyline(pl) => assert!((pl.vertices[0].y - 5.0).abs() < EPSILON),
            _ => panic!("expected polyline"),
        }
    }
}
