//! 标注样式操作
//!
//! "Standard"样式受保护且默认即为当前样式。

use crate::catalog::DimStyleRecord;
use crate::document::Document;
use crate::handle::Handle;

impl Document {
    /// 创建新标注样式
    ///
    /// 已存在同名样式时直接返回其句柄。
    pub fn add_dim_style(&mut self, name: &str) -> Handle {
        self.dim_styles
            .get_or_create(name, &mut self.allocator, |n| DimStyleRecord::new(n))
    }

    /// 只读查找标注样式句柄
    pub fn try_get_dim_style(&self, name: &str) -> Option<Handle> {
        self.dim_styles.try_get_handle(name)
    }

    /// 设置当前标注样式
    ///
    /// 样式不存在时返回 false。
    pub fn set_current_dim_style(&mut self, name: &str) -> bool {
        let Some(h) = self.dim_styles.try_get_handle(name) else {
            return false;
        };
        self.current_dim_style = h;
        true
    }

    /// 当前标注样式句柄
    pub fn current_dim_style(&self) -> Handle {
        self.current_dim_style
    }

    /// 所有标注样式记录的快照（创建顺序）
    pub fn dim_styles(&self) -> Vec<DimStyleRecord> {
        self.dim_styles.list_all()
    }

    /// 按句柄取标注样式记录
    pub fn dim_style_record(&self, h: Handle) -> Option<&DimStyleRecord> {
        self.dim_styles.record(h)
    }

    /// 删除指定名称的标注样式
    ///
    /// 受保护样式、不存在的样式或当前样式无法删除。
    pub fn delete_dim_style(&mut self, name: &str) -> bool {
        let active = self.current_dim_style;
        self.dim_styles.delete(name, active, |_| false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_is_seeded_and_current() {
        let doc = Document::new();
        let h = doc.try_get_dim_style("Standard").unwrap();
        assert_eq!(doc.current_dim_style(), h);
        assert_eq!(doc.dim_style_record(h).unwrap().text_height, 2.5);
    }

    #[test]
    fn test_add_and_switch_dim_style() {
        let mut doc = Document::new();
        let h = doc.add_dim_style("Arch");
        assert_eq!(doc.add_dim_style("Arch"), h);
        assert!(doc.set_current_dim_style("Arch"));
        assert!(!doc.set_current_dim_style("missing"));
        assert_eq!(doc.current_dim_style(), h);
    }

    #[test]
    fn test_delete_dim_style_rules() {
        let mut doc = Document::new();
        doc.add_dim_style("Arch");

        // 受保护样式
        assert!(!doc.delete_dim_style("Standard"));
        // 当前样式
        doc.set_current_dim_style("Arch");
        assert!(!doc.delete_dim_style("Arch"));

        doc.set_current_dim_style("Standard");
        assert!(doc.delete_dim_style("Arch"));
        assert!(doc.try_get_dim_style("Arch").is_none());
    }
}
