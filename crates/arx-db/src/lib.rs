//! ARX 图形数据库
//!
//! 单文档、单线程的事务型对象存储：
//! - `Document`: 图形文档根，拥有全部驻留实体与符号表
//! - `Handle`: 对象的稳定不透明引用
//! - 符号表: 图层、线型、标注样式、用户坐标系（UCS）
//! - 空间: 模型空间、图纸空间与当前空间
//! - 事务: 作用域化的变更提交与回滚
//!
//! # 打开模式约定
//!
//! 对驻留对象的每次写入都必须经过 `open_for_write` 返回的守卫，
//! 守卫在任何退出路径（包括 panic 展开）上都会把对象归还为
//! 未打开状态，不存在悬挂的写锁。
//!
//! # 示例
//!
//! ```rust
//! use arx_core::prelude::*;
//! use arx_db::prelude::*;
//!
//! let mut doc = Document::new();
//! let line = Entity::new(Geometry::Line(Line::new(
//!     Point3::origin(),
//!     Point3::new(100.0, 0.0, 0.0),
//! )));
//! let id = doc.append_to_model_space(line);
//! doc.rotate_entity(Target::Attached(id), Point3::origin(), 0.5).unwrap();
//! ```

pub mod array;
pub mod catalog;
pub mod dim_styles;
pub mod document;
pub mod entity_ops;
pub mod error;
pub mod handle;
pub mod layers;
pub mod line_types;
pub mod space;
pub mod transaction;
pub mod ucs;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::catalog::{
        DimStyleRecord, LayerRecord, LineTypeRecord, SymbolRecord, SymbolTable, UcsRecord,
    };
    pub use crate::document::{Document, WriteGuard};
    pub use crate::entity_ops::Target;
    pub use crate::error::{DbError, DbResult};
    pub use crate::handle::Handle;
    pub use crate::space::{Space, SpaceKind};
    pub use crate::transaction::Transaction;
}
