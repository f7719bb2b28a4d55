//! 阵列操作
//!
//! 矩形阵列与环形阵列。整组副本在同一事务内创建，
//! 任一副本失败则整体回滚，文档不产生任何变更。
//!
//! 两种阵列对源实体的处理不同：矩形阵列用副本完全替换源
//! （源被删除，(0,0) 位置由副本占据），环形阵列保留源作为
//! 第一个元素。

use crate::document::Document;
use crate::error::DbResult;
use crate::handle::Handle;
use arx_core::math::{Point3, Vector3};
use arx_core::transform;

impl Document {
    /// 矩形阵列
    ///
    /// 以源实体为 (0,0) 元素生成 `rows`×`cols` 网格：第 `r` 行第
    /// `c` 列的副本相对源平移 (c·col_spacing, r·row_spacing, 0)。
    /// 源实体在成功后被删除，其位置由 (0,0) 副本占据；返回的
    /// 句柄按行优先排列。
    ///
    /// # Panics
    ///
    /// `rows` 或 `cols` 为零时 panic。
    pub fn array_rectangular(
        &mut self,
        h: Handle,
        rows: u32,
        cols: u32,
        row_spacing: f64,
        col_spacing: f64,
    ) -> DbResult<Vec<Handle>> {
        assert!(rows > 0 && cols > 0, "array dimensions must be positive");

        let mut tx = self.transaction();
        let mut handles = Vec::with_capacity((rows * cols) as usize);
        for r in 0..rows {
            for c in 0..cols {
                let offset = Vector3::new(c as f64 * col_spacing, r as f64 * row_spacing, 0.0);
                let m = transform::displacement(Point3::origin(), Point3::origin() + offset);
                handles.push(tx.copy_with_transform(h, &m)?);
            }
        }
        tx.erase(h)?;
        tx.commit();
        tracing::debug!(source = %h, rows, cols, "rectangular array created");
        Ok(handles)
    }

    /// 环形阵列
    ///
    /// 绕过 `center` 的Z轴把 `fill_angle` 均分为 `count` 份，源实体
    /// 保留为第一个元素，另生成 `count - 1` 个旋转副本；返回源句柄
    /// 加副本句柄，按角度递增排列。
    ///
    /// # Panics
    ///
    /// `count` 为零或 `fill_angle` 为零时 panic。
    pub fn array_polar(
        &mut self,
        h: Handle,
        center: Point3,
        count: u32,
        fill_angle: f64,
    ) -> DbResult<Vec<Handle>> {
        assert!(count >= 1, "polar array needs at least one element");
        assert!(fill_angle != 0.0, "fill angle must be non-zero");

        let mut tx = self.transaction();
        let mut handles = Vec::with_capacity(count as usize);
        handles.push(h);
        for i in 1..count {
            let angle = fill_angle * i as f64 / count as f64;
            let m = transform::rotation(angle, Vector3::z(), center);
            handles.push(tx.copy_with_transform(h, &m)?);
        }
        tx.commit();
        tracing::debug!(source = %h, count, fill_angle, "polar array created");
        Ok(handles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arx_core::entity::Entity;
    use arx_core::geometry::{Geometry, Point};
    use arx_core::math::EPSILON;

    fn point_at(x: f64, y: f64) -> Entity {
        Entity::new(Geometry::Point(Point::new(x, y, 0.0)))
    }

    fn position(doc: &Document, h: Handle) -> Point3 {
        match &doc.open_for_read(h).unwrap().geometry {
            Geometry::Point(p) => p.position,
            _ => panic!("expected point"),
        }
    }

    #[test]
    fn test_rectangular_array_replaces_source() {
        let mut doc = Document::new();
        let h = doc.append_to_model_space(point_at(0.0, 0.0));

        let handles = doc.array_rectangular(h, 2, 3, 10.0, 5.0).unwrap();
        assert_eq!(handles.len(), 6);
        // 源被副本取代
        assert!(doc.is_erased(h).unwrap());
        assert_eq!(doc.model_space().len(), 6);

        // 行优先：第二行第三列
        let p = position(&doc, handles[5]);
        assert!((p.x - 10.0).abs() < EPSILON);
        assert!((p.y - 10.0).abs() < EPSILON);
        // (0,0) 副本落在源位置
        let origin = position(&doc, handles[0]);
        assert!(origin.coords.norm() < EPSILON);
    }

    #[test]
    fn test_polar_array_keeps_source() {
        let mut doc = Document::new();
        let h = doc.append_to_model_space(point_at(10.0, 0.0));

        let handles = doc
            .array_polar(h, Point3::origin(), 3, std::f64::consts::TAU)
            .unwrap();
        assert_eq!(handles.len(), 3);
        assert_eq!(handles[0], h);
        assert!(!doc.is_erased(h).unwrap());
        assert_eq!(doc.model_space().len(), 3);

        // 整圆三等分：第二个元素在120°方向
        let p = position(&doc, handles[1]);
        let third = std::f64::consts::TAU / 3.0;
        assert!((p.x - 10.0 * third.cos()).abs() < 1e-9);
        assert!((p.y - 10.0 * third.sin()).abs() < 1e-9);
    }

    #[test]
    fn test_half_circle_polar_array() {
        let mut doc = Document::new();
        let h = doc.append_to_model_space(point_at(10.0, 0.0));

        let handles = doc
            .array_polar(h, Point3::origin(), 2, std::f64::consts::PI)
            .unwrap();
        // 半圆两份，副本在90°方向
        let p = position(&doc, handles[1]);
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_array_failure_rolls_back() {
        let mut doc = Document::new();
        let h = doc.append_to_model_space(point_at(0.0, 0.0));
        doc.erase(h).unwrap();

        // 源已删除，阵列整体失败且无副本残留
        assert!(doc.array_rectangular(h, 2, 2, 1.0, 1.0).is_err());
        assert!(doc.model_space().is_empty());
        assert!(doc.array_polar(h, Point3::origin(), 4, 1.0).is_err());
        assert!(doc.model_space().is_empty());
    }

    #[test]
    fn test_aborted_outer_scope_restores_source() {
        let mut doc = Document::new();
        let h = doc.append_to_model_space(point_at(0.0, 0.0));
        {
            let mut tx = doc.transaction();
            let handles = tx.array_rectangular(h, 2, 2, 1.0, 1.0).unwrap();
            assert_eq!(handles.len(), 4);
            // 外层未提交
        }
        // 副本连同源的删除一并回滚
        assert!(!doc.is_erased(h).unwrap());
        assert_eq!(doc.model_space().handles(), &[h]);
    }

    #[test]
    #[should_panic(expected = "array dimensions must be positive")]
    fn test_zero_rows_panics() {
        let mut doc = Document::new();
        let h = doc.append_to_model_space(point_at(0.0, 0.0));
        let _ = doc.array_rectangular(h, 0, 2, 1.0, 1.0);
    }

    #[test]
    #[should_panic(expected = "fill angle must be non-zero")]
    fn test_zero_fill_angle_panics() {
        let mut doc = Document::new();
        let h = doc.append_to_model_space(point_at(0.0, 0.0));
        let _ = doc.array_polar(h, Point3::origin(), 4, 0.0);
    }
}
