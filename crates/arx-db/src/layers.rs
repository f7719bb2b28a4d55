//! 图层操作
//!
//! 创建（查找即建）、设色、设为当前层、删除与枚举。
//! "0"层与"Defpoints"层受保护，当前层与仍被实体引用的层不可删除。

use crate::catalog::LayerRecord;
use crate::document::Document;
use crate::handle::Handle;
use arx_core::properties::Color;

impl Document {
    /// 创建新图层
    ///
    /// 已存在同名图层时直接返回其句柄，不产生变更。
    pub fn add_layer(&mut self, name: &str) -> Handle {
        self.layers
            .get_or_create(name, &mut self.allocator, |n| LayerRecord::new(n))
    }

    /// 只读查找图层句柄
    pub fn try_get_layer(&self, name: &str) -> Option<Handle> {
        self.layers.try_get_handle(name)
    }

    /// 设置图层颜色
    ///
    /// 图层不存在时返回 false。
    pub fn set_layer_color(&mut self, name: &str, color: Color) -> bool {
        let Some(h) = self.layers.try_get_handle(name) else {
            return false;
        };
        if let Some(record) = self.layers.record_mut(h) {
            record.color = color;
            return true;
        }
        false
    }

    /// 将指定图层设置为当前层
    ///
    /// 图层不存在或已经是当前层时返回 false。
    pub fn set_current_layer(&mut self, name: &str) -> bool {
        let Some(h) = self.layers.try_get_handle(name) else {
            return false;
        };
        if h == self.current_layer {
            return false; // 已是当前层
        }
        self.current_layer = h;
        true
    }

    /// 当前层句柄
    pub fn current_layer(&self) -> Handle {
        self.current_layer
    }

    /// 所有图层记录的快照（创建顺序）
    pub fn layers(&self) -> Vec<LayerRecord> {
        self.layers.list_all()
    }

    /// 所有图层的句柄（创建顺序）
    pub fn layer_handles(&self) -> Vec<Handle> {
        self.layers.handles()
    }

    /// 按句柄取图层记录
    pub fn layer_record(&self, h: Handle) -> Option<&LayerRecord> {
        self.layers.record(h)
    }

    /// 删除指定名称的图层
    ///
    /// 受保护层、不存在的层、当前层或仍被存活实体引用的层
    /// 无法删除，返回 false 且不产生任何变更。
    pub fn delete_layer(&mut self, name: &str) -> bool {
        let referenced = self
            .objects
            .values()
            .any(|s| !s.erased && s.entity.properties.layer == name);
        let active = self.current_layer;
        self.layers.delete(name, active, |_| referenced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arx_core::entity::Entity;
    use arx_core::geometry::{Geometry, Point};
    use arx_core::properties::Properties;

    #[test]
    fn test_add_layer_is_idempotent() {
        let mut doc = Document::new();
        let a = doc.add_layer("walls");
        let b = doc.add_layer("walls");
        assert_eq!(a, b);
        // "0" + "walls"
        assert_eq!(doc.layers().len(), 2);
    }

    #[test]
    fn test_set_layer_color() {
        let mut doc = Document::new();
        doc.add_layer("walls");
        assert!(doc.set_layer_color("walls", Color::Index(1)));
        assert!(!doc.set_layer_color("missing", Color::Index(1)));

        let h = doc.try_get_layer("walls").unwrap();
        assert_eq!(doc.layer_record(h).unwrap().color, Color::Index(1));
    }

    #[test]
    fn test_set_current_layer() {
        let mut doc = Document::new();
        doc.add_layer("walls");
        assert!(doc.set_current_layer("walls"));
        // 再次设置同一层返回 false
        assert!(!doc.set_current_layer("walls"));
        assert!(!doc.set_current_layer("missing"));
        assert_eq!(doc.current_layer(), doc.try_get_layer("walls").unwrap());
    }

    #[test]
    fn test_delete_layer_rules() {
        let mut doc = Document::new();
        doc.add_layer("walls");
        doc.add_layer("doors");

        // 受保护的0层
        assert!(!doc.delete_layer("0"));
        // 当前层
        doc.set_current_layer("walls");
        assert!(!doc.delete_layer("walls"));

        // 被实体引用的层
        let entity = Entity::with_properties(
            Geometry::Point(Point::new(0.0, 0.0, 0.0)),
            Properties::on_layer("doors"),
        );
        let h = doc.append_to_model_space(entity);
        assert!(!doc.delete_layer("doors"));

        // 实体删除后层可删，目录缩小一条
        doc.erase(h).unwrap();
        let before = doc.layers().len();
        assert!(doc.delete_layer("doors"));
        assert_eq!(doc.layers().len(), before - 1);
    }
}
