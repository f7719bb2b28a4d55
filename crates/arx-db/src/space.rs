//! 实体空间
//!
//! 每个文档有两个实体容器：模型空间与图纸空间；
//! "当前空间"是指向两者之一的运行时别名。

use crate::handle::Handle;
use serde::{Deserialize, Serialize};

/// 空间类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SpaceKind {
    /// 模型空间（默认激活）
    #[default]
    Model,
    /// 图纸空间
    Paper,
}

/// 实体容器
///
/// 按追加顺序持有实体句柄；从所属空间移除是实体唯一的销毁途径。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Space {
    kind: SpaceKind,
    entities: Vec<Handle>,
}

impl Space {
    pub(crate) fn new(kind: SpaceKind) -> Self {
        Self {
            kind,
            entities: Vec::new(),
        }
    }

    pub fn kind(&self) -> SpaceKind {
        self.kind
    }

    /// 空间内存活实体的句柄（追加顺序）
    pub fn handles(&self) -> &[Handle] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub(crate) fn append(&mut self, h: Handle) {
        self.entities.push(h);
    }

    pub(crate) fn remove(&mut self, h: Handle) {
        self.entities.retain(|&e| e != h);
    }

    /// 把句柄放回原位置（用于回滚已删除的实体）
    pub(crate) fn insert(&mut self, index: usize, h: Handle) {
        self.entities.insert(index.min(self.entities.len()), h);
    }
}
