//! 事务
//!
//! 作用域化的变更边界：守卫存续期间的创建与删除记入日志，
//! `commit` 时整体生效，未提交即析构则逆序整体回滚。
//! 在已开启事务内再开事务会被折叠进外层（同一提交点），
//! 嵌套不可观测。

use crate::document::Document;

/// 事务守卫
///
/// 通过解引用直接使用文档的全部操作：
///
/// ```rust
/// use arx_core::prelude::*;
/// use arx_db::prelude::*;
///
/// let mut doc = Document::new();
/// let mut tx = doc.transaction();
/// tx.append_to_model_space(Entity::new(Geometry::Point(Point::new(0.0, 0.0, 0.0))));
/// tx.commit();
/// assert_eq!(doc.model_space().len(), 1);
/// ```
pub struct Transaction<'a> {
    doc: &'a mut Document,
    /// 是否为最外层事务（只有最外层拥有提交点）
    outer: bool,
    committed: bool,
}

impl Document {
    /// 开启事务
    pub fn transaction(&mut self) -> Transaction<'_> {
        let outer = self.tx_depth == 0;
        self.tx_depth += 1;
        Transaction {
            doc: self,
            outer,
            committed: false,
        }
    }
}

impl Transaction<'_> {
    /// 提交事务
    ///
    /// 内层事务的提交只是把决定权交还外层；
    /// 最外层提交时日志内的创建全部生效。
    pub fn commit(mut self) {
        self.committed = true;
        // 实际生效在 Drop 中完成
    }
}

impl std::ops::Deref for Transaction<'_> {
    type Target = Document;

    fn deref(&self) -> &Document {
        self.doc
    }
}

impl std::ops::DerefMut for Transaction<'_> {
    fn deref_mut(&mut self) -> &mut Document {
        self.doc
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        self.doc.tx_depth -= 1;
        if !self.outer {
            // 折叠进外层，由外层决定提交点
            return;
        }
        if self.committed {
            let count = self.doc.journal.len();
            self.doc.journal.clear();
            if count > 0 {
                tracing::debug!(count, "transaction committed");
            }
        } else {
            self.doc.rollback_journal();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arx_core::entity::Entity;
    use arx_core::geometry::{Geometry, Point};

    fn point_entity() -> Entity {
        Entity::new(Geometry::Point(Point::new(0.0, 0.0, 0.0)))
    }

    #[test]
    fn test_commit_keeps_creations() {
        let mut doc = Document::new();
        let h = {
            let mut tx = doc.transaction();
            let h = tx.append_to_model_space(point_entity());
            tx.commit();
            h
        };
        assert!(doc.open_for_read(h).is_ok());
        assert_eq!(doc.model_space().len(), 1);
    }

    #[test]
    fn test_drop_without_commit_rolls_back() {
        let mut doc = Document::new();
        let h = {
            let mut tx = doc.transaction();
            tx.append_to_model_space(point_entity())
            // 未提交
        };
        assert!(!doc.contains(h));
        assert!(doc.model_space().is_empty());
    }

    #[test]
    fn test_drop_without_commit_undoes_erase() {
        let mut doc = Document::new();
        let a = doc.append_to_model_space(point_entity());
        let b = doc.append_to_model_space(point_entity());
        {
            let mut tx = doc.transaction();
            tx.erase(a).unwrap();
            // 未提交
        }
        assert!(!doc.is_erased(a).unwrap());
        // 回滚后实体回到原位置
        assert_eq!(doc.model_space().handles(), &[a, b]);
        assert!(doc.open_for_read(a).is_ok());
    }

    #[test]
    fn test_commit_keeps_erase() {
        let mut doc = Document::new();
        let h = doc.append_to_model_space(point_entity());
        {
            let mut tx = doc.transaction();
            tx.erase(h).unwrap();
            tx.commit();
        }
        assert!(doc.is_erased(h).unwrap());
        assert!(doc.model_space().is_empty());
    }

    #[test]
    fn test_nested_transactions_fold_into_outer() {
        let mut doc = Document::new();
        let (a, b) = {
            let mut tx = doc.transaction();
            let a = tx.append_to_model_space(point_entity());
            let b = {
                let mut inner = tx.transaction();
                let b = inner.append_to_model_space(point_entity());
                inner.commit(); // 内层提交不是提交点
                b
            };
            tx.commit();
            (a, b)
        };
        assert!(doc.contains(a));
        assert!(doc.contains(b));
    }

    #[test]
    fn test_outer_abort_discards_inner_commits() {
        let mut doc = Document::new();
        let b = {
            let mut tx = doc.transaction();
            tx.append_to_model_space(point_entity());
            let mut inner = tx.transaction();
            let b = inner.append_to_model_space(point_entity());
            inner.commit();
            b
            // 外层未提交
        };
        assert!(!doc.contains(b));
        assert!(doc.model_space().is_empty());
    }

    #[test]
    fn test_implicit_single_op_commit() {
        let mut doc = Document::new();
        // 无显式事务时追加自带单操作事务
        let h = doc.append_to_model_space(point_entity());
        assert!(doc.open_for_read(h).is_ok());
    }
}
