//! 线型操作
//!
//! 除查找即建外，还支持从内置线型库按名装载标准线型
//! （对应原生从线型定义文件装载的能力）。

use crate::catalog::LineTypeRecord;
use crate::document::Document;
use crate::error::{DbError, DbResult};
use crate::handle::Handle;

/// 内置线型库（名称与划线/间隔序列）
const STANDARD_LINE_TYPES: &[(&str, &[f64])] = &[
    ("Continuous", &[]),
    ("Dashed", &[0.5, -0.25]),
    ("Hidden", &[0.25, -0.125]),
    ("Center", &[1.25, -0.25, 0.25, -0.25]),
    ("Dot", &[0.0, -0.25]),
    ("DashDot", &[0.5, -0.25, 0.0, -0.25]),
];

impl Document {
    /// 创建新线型（无图案的实线）
    ///
    /// 已存在同名线型时直接返回其句柄。
    pub fn add_line_type(&mut self, name: &str) -> Handle {
        self.line_types
            .get_or_create(name, &mut self.allocator, |n| LineTypeRecord::new(n))
    }

    /// 从内置线型库装载指定线型
    ///
    /// 线型已存在时直接返回其句柄；库中没有的名称报错。
    pub fn load_line_type(&mut self, name: &str) -> DbResult<Handle> {
        if let Some(h) = self.line_types.try_get_handle(name) {
            return Ok(h);
        }
        let pattern = STANDARD_LINE_TYPES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, p)| p.to_vec())
            .ok_or_else(|| DbError::InvalidState(format!("unknown standard line type '{name}'")))?;

        Ok(self.line_types.get_or_create(name, &mut self.allocator, |n| {
            LineTypeRecord::with_pattern(n, pattern)
        }))
    }

    /// 只读查找线型句柄
    pub fn try_get_line_type(&self, name: &str) -> Option<Handle> {
        self.line_types.try_get_handle(name)
    }

    /// 设置当前线型
    ///
    /// 线型不存在时返回 false。
    pub fn set_current_line_type(&mut self, name: &str) -> bool {
        let Some(h) = self.line_types.try_get_handle(name) else {
            return false;
        };
        self.current_line_type = h;
        true
    }

    /// 当前线型句柄
    pub fn current_line_type(&self) -> Handle {
        self.current_line_type
    }

    /// 所有线型记录的快照（创建顺序）
    pub fn line_types(&self) -> Vec<LineTypeRecord> {
        self.line_types.list_all()
    }

    /// 按句柄取线型记录
    pub fn line_type_record(&self, h: Handle) -> Option<&LineTypeRecord> {
        self.line_types.record(h)
    }

    /// 删除指定名称的线型
    ///
    /// 受保护线型、不存在的线型、当前线型或仍被存活实体引用的
    /// 线型无法删除。
    pub fn delete_line_type(&mut self, name: &str) -> bool {
        let referenced = self
            .objects
            .values()
            .any(|s| !s.erased && s.entity.properties.line_type == name);
        let active = self.current_line_type;
        self.line_types.delete(name, active, |_| referenced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_seeds_default_line_types() {
        let doc = Document::new();
        let names: Vec<_> = doc.line_types().into_iter().map(|r| r.name).collect();
        assert_eq!(names, ["ByLayer", "ByBlock", "Continuous"]);
    }

    #[test]
    fn test_load_standard_line_type() {
        let mut doc = Document::new();
        let h = doc.load_line_type("Dashed").unwrap();
        assert_eq!(doc.line_type_record(h).unwrap().pattern, vec![0.5, -0.25]);
        // 再次装载返回同一句柄
        assert_eq!(doc.load_line_type("Dashed").unwrap(), h);
        // 未知线型
        assert!(doc.load_line_type("NoSuch").is_err());
    }

    #[test]
    fn test_set_current_line_type() {
        let mut doc = Document::new();
        doc.add_line_type("Phantom");
        assert!(doc.set_current_line_type("Phantom"));
        assert!(!doc.set_current_line_type("missing"));
        assert_eq!(
            doc.current_line_type(),
            doc.try_get_line_type("Phantom").unwrap()
        );
    }

    #[test]
    fn test_delete_line_type_rules() {
        let mut doc = Document::new();
        doc.add_line_type("Phantom");
        // 受保护线型
        assert!(!doc.delete_line_type("Continuous"));
        // 普通线型可删
        assert!(doc.delete_line_type("Phantom"));
        assert!(doc.try_get_line_type("Phantom").is_none());
    }
}
