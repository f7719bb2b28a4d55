//! 图形文档
//!
//! `Document` 是对象存储的根：独占持有全部驻留实体、四张符号表、
//! 模型/图纸空间以及各类"当前"选择。原生设计里的全局当前文档
//! 在这里被显式的 `&mut Document` 上下文取代。
//!
//! # 实体生命周期
//!
//! 游离实体是普通的 Rust 值，由调用方独占；通过一次追加操作
//! 入库后转为驻留状态并获得句柄，此后只能经句柄访问，
//! 删除（erase）是唯一的销毁途径。

use crate::catalog::{DimStyleRecord, LayerRecord, LineTypeRecord, SymbolTable, UcsRecord};
use crate::error::{DbError, DbResult};
use crate::handle::{Handle, HandleAllocator};
use crate::space::{Space, SpaceKind};
use arx_core::entity::Entity;
use arx_core::math::{BoundingBox3, Matrix4};

/// 驻留实体及其存储元数据
#[derive(Debug, Clone)]
pub(crate) struct StoredEntity {
    pub entity: Entity,
    pub space: SpaceKind,
    pub erased: bool,
    /// 写打开标记：同一对象同一时刻至多一个写打开
    pub write_open: bool,
}

/// 事务日志条目
#[derive(Debug, Clone, Copy)]
pub(crate) enum JournalOp {
    /// 实体被创建
    Created(Handle),
    /// 实体被删除；`index` 为其在所属空间中的原位置
    Erased { handle: Handle, index: usize },
}

/// 图形文档
#[derive(Debug)]
pub struct Document {
    pub(crate) allocator: HandleAllocator,
    pub(crate) objects: std::collections::HashMap<Handle, StoredEntity>,
    model: Space,
    paper: Space,
    active_space: SpaceKind,

    pub(crate) layers: SymbolTable<LayerRecord>,
    pub(crate) line_types: SymbolTable<LineTypeRecord>,
    pub(crate) dim_styles: SymbolTable<DimStyleRecord>,
    pub(crate) ucs_table: SymbolTable<UcsRecord>,

    pub(crate) current_layer: Handle,
    pub(crate) current_line_type: Handle,
    pub(crate) current_dim_style: Handle,
    /// 当前UCS；`Handle::NULL` 表示世界坐标系
    pub(crate) current_ucs: Handle,

    /// 事务嵌套深度（内层事务折叠进外层）
    pub(crate) tx_depth: u32,
    /// 未提交变更（创建与删除）的日志，用于回滚
    pub(crate) journal: Vec<JournalOp>,
}

impl Document {
    /// 创建空文档
    ///
    /// 两个根空间以及默认的图层、线型、标注样式记录总是存在，
    /// 因此不会出现"文档缺少根容器"的异常状态。
    pub fn new() -> Self {
        let mut allocator = HandleAllocator::new();

        let mut layers = SymbolTable::new();
        let layer_zero = layers.get_or_create("0", &mut allocator, |n| LayerRecord::new(n));

        let mut line_types = SymbolTable::new();
        line_types.get_or_create("ByLayer", &mut allocator, |n| LineTypeRecord::new(n));
        line_types.get_or_create("ByBlock", &mut allocator, |n| LineTypeRecord::new(n));
        let continuous = line_types.get_or_create("Continuous", &mut allocator, |n| LineTypeRecord::new(n));

        let mut dim_styles = SymbolTable::new();
        let standard = dim_styles.get_or_create("Standard", &mut allocator, |n| DimStyleRecord::new(n));

        Self {
            allocator,
            objects: std::collections::HashMap::new(),
            model: Space::new(SpaceKind::Model),
            paper: Space::new(SpaceKind::Paper),
            active_space: SpaceKind::Model,
            layers,
            line_types,
            dim_styles,
            ucs_table: SymbolTable::new(),
            current_layer: layer_zero,
            current_line_type: continuous,
            current_dim_style: standard,
            current_ucs: Handle::NULL,
            tx_depth: 0,
            journal: Vec::new(),
        }
    }

    // === 空间解析 ===

    /// 模型空间
    pub fn model_space(&self) -> &Space {
        &self.model
    }

    /// 图纸空间
    pub fn paper_space(&self) -> &Space {
        &self.paper
    }

    /// 当前空间（模型或图纸中激活的那个）
    pub fn current_space(&self) -> &Space {
        self.space(self.active_space)
    }

    pub fn active_space(&self) -> SpaceKind {
        self.active_space
    }

    /// 切换当前空间
    pub fn set_active_space(&mut self, kind: SpaceKind) {
        self.active_space = kind;
    }

    pub fn space(&self, kind: SpaceKind) -> &Space {
        match kind {
            SpaceKind::Model => &self.model,
            SpaceKind::Paper => &self.paper,
        }
    }

    fn space_mut(&mut self, kind: SpaceKind) -> &mut Space {
        match kind {
            SpaceKind::Model => &mut self.model,
            SpaceKind::Paper => &mut self.paper,
        }
    }

    // === 实体追加 ===

    /// 将游离实体追加到指定空间
    ///
    /// 实体入库并获得新句柄；未显式开启事务时，
    /// 本操作自带一个单操作事务并立即提交。
    pub fn append_to_space(&mut self, kind: SpaceKind, entity: Entity) -> Handle {
        let implicit = self.tx_depth == 0;

        let h = self.allocator.alloc();
        self.objects.insert(
            h,
            StoredEntity {
                entity,
                space: kind,
                erased: false,
                write_open: false,
            },
        );
        self.space_mut(kind).append(h);
        tracing::debug!(handle = %h, space = ?kind, "entity appended");

        if implicit {
            // 单操作事务立即提交
            debug_assert!(self.journal.is_empty());
        } else {
            self.journal.push(JournalOp::Created(h));
        }
        h
    }

    /// 将实体追加到模型空间
    pub fn append_to_model_space(&mut self, entity: Entity) -> Handle {
        self.append_to_space(SpaceKind::Model, entity)
    }

    /// 将实体追加到图纸空间
    pub fn append_to_paper_space(&mut self, entity: Entity) -> Handle {
        self.append_to_space(SpaceKind::Paper, entity)
    }

    /// 将实体追加到当前空间
    pub fn append_to_current_space(&mut self, entity: Entity) -> Handle {
        self.append_to_space(self.active_space, entity)
    }

    /// 批量追加到指定空间，返回各实体的句柄（与输入同序）
    pub fn append_all_to_space(
        &mut self,
        kind: SpaceKind,
        entities: impl IntoIterator<Item = Entity>,
    ) -> Vec<Handle> {
        entities
            .into_iter()
            .map(|e| self.append_to_space(kind, e))
            .collect()
    }

    // === 打开模式 ===

    /// 以读方式打开实体
    ///
    /// 读打开互不排斥；对象不存在返回 `NotFound`，
    /// 已删除返回 `Erased`。
    pub fn open_for_read(&self, h: Handle) -> DbResult<&Entity> {
        let stored = self.objects.get(&h).ok_or(DbError::NotFound(h))?;
        if stored.erased {
            return Err(DbError::Erased(h));
        }
        if stored.write_open {
            return Err(DbError::InvalidState(format!(
                "object {} is open for write",
                h
            )));
        }
        Ok(&stored.entity)
    }

    /// 以写方式打开实体，返回作用域守卫
    ///
    /// 守卫解引用为实体；无论正常返回、提前返回还是 panic 展开，
    /// 守卫析构时都会把对象归还为未打开状态。对已有写打开的对象
    /// 再次写打开返回 `InvalidState`。
    pub fn open_for_write(&mut self, h: Handle) -> DbResult<WriteGuard<'_>> {
        let stored = self.objects.get_mut(&h).ok_or(DbError::NotFound(h))?;
        if stored.erased {
            return Err(DbError::Erased(h));
        }
        if stored.write_open {
            return Err(DbError::InvalidState(format!(
                "object {} is already open for write",
                h
            )));
        }
        stored.write_open = true;
        Ok(WriteGuard { doc: self, handle: h })
    }

    /// 删除实体
    ///
    /// 唯一的销毁途径：从所属空间移除并标记为已删除，
    /// 此后的打开操作返回 `Erased`。重复删除是无操作而非错误。
    pub fn erase(&mut self, h: Handle) -> DbResult<()> {
        let stored = self.objects.get_mut(&h).ok_or(DbError::NotFound(h))?;
        if stored.erased {
            return Ok(()); // 幂等
        }
        if stored.write_open {
            return Err(DbError::InvalidState(format!(
                "object {} is open for write",
                h
            )));
        }
        stored.erased = true;
        let kind = stored.space;
        let index = self
            .space(kind)
            .handles()
            .iter()
            .position(|&e| e == h)
            .unwrap_or(0);
        self.space_mut(kind).remove(h);
        if self.tx_depth > 0 {
            self.journal.push(JournalOp::Erased { handle: h, index });
        }
        tracing::debug!(handle = %h, "entity erased");
        Ok(())
    }

    /// 实体是否已被删除
    pub fn is_erased(&self, h: Handle) -> DbResult<bool> {
        self.objects
            .get(&h)
            .map(|s| s.erased)
            .ok_or(DbError::NotFound(h))
    }

    /// 文档内是否存在该句柄（含已删除对象）
    pub fn contains(&self, h: Handle) -> bool {
        self.objects.contains_key(&h)
    }

    /// 读取源实体，生成变换副本并追加到源实体所在空间
    ///
    /// 源实体保持不变；返回副本的句柄。
    pub fn copy_with_transform(&mut self, h: Handle, m: &Matrix4) -> DbResult<Handle> {
        let stored = self.objects.get(&h).ok_or(DbError::NotFound(h))?;
        if stored.erased {
            return Err(DbError::Erased(h));
        }
        let copy = stored.entity.transformed_copy(m);
        let kind = stored.space;
        Ok(self.append_to_space(kind, copy))
    }

    // === 查询 ===

    /// 将十六进制句柄字符串解析为文档内的句柄
    pub fn handle_from_hex(&self, s: &str) -> DbResult<Handle> {
        let h = Handle::from_hex(s).ok_or_else(|| DbError::InvalidHandle(s.to_string()))?;
        if !self.contains(h) {
            return Err(DbError::NotFound(h));
        }
        Ok(h)
    }

    /// 计算模型空间中所有存活实体的总包围盒
    pub fn all_entities_extent(&self) -> BoundingBox3 {
        let mut total = BoundingBox3::empty();
        for &h in self.model.handles() {
            if let Some(stored) = self.objects.get(&h) {
                if !stored.erased {
                    total.union(&stored.entity.bounding_box());
                }
            }
        }
        total
    }

    /// 回滚日志中记录的未提交变更（逆序撤销）
    pub(crate) fn rollback_journal(&mut self) {
        let rolled = self.journal.len();
        let ops: Vec<JournalOp> = self.journal.drain(..).collect();
        for op in ops.into_iter().rev() {
            match op {
                JournalOp::Created(h) => {
                    if let Some(stored) = self.objects.remove(&h) {
                        let kind = stored.space;
                        self.space_mut(kind).remove(h);
                    }
                }
                JournalOp::Erased { handle, index } => {
                    if let Some(stored) = self.objects.get_mut(&handle) {
                        stored.erased = false;
                        let kind = stored.space;
                        self.space_mut(kind).insert(index, handle);
                    }
                }
            }
        }
        if rolled > 0 {
            tracing::debug!(count = rolled, "transaction rolled back");
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// 写打开守卫
///
/// 持有期间独占文档；`Drop` 时把对象切回未打开状态，
/// 对应原生协议里"完成后切换回读状态"的纪律。
pub struct WriteGuard<'a> {
    doc: &'a mut Document,
    handle: Handle,
}

impl WriteGuard<'_> {
    pub fn handle(&self) -> Handle {
        self.handle
    }
}

impl std::ops::Deref for WriteGuard<'_> {
    type Target = Entity;

    fn deref(&self) -> &Entity {
        &self
            .doc
            .objects
            .get(&self.handle)
            .expect("write-open object must exist")
            .entity
    }
}

impl std::ops::DerefMut for WriteGuard<'_> {
    fn deref_mut(&mut self) -> &mut Entity {
        &mut self
            .doc
            .objects
            .get_mut(&self.handle)
            .expect("write-open object must exist")
            .entity
    }
}

impl Drop for WriteGuard<'_> {
    fn drop(&mut self) {
        if let Some(stored) = self.doc.objects.get_mut(&self.handle) {
            stored.write_open = false;
        }
    }
}
