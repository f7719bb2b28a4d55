//! 符号表
//!
//! 命名记录的通用注册表，用于图层、线型、标注样式与UCS。
//! 保证同一张表内名称大小写敏感且唯一；查找即建
//! （get-or-create）按名称幂等。
//!
//! 创建与删除都要先把表切换为写状态，完成后切回读状态，
//! 模拟原生符号表的独占窗口；同一时刻最多一个写打开。

use crate::error::{DbError, DbResult};
use crate::handle::{Handle, HandleAllocator};
use arx_core::math::{Point3, Vector3};
use nalgebra::{Rotation3, Unit};
use serde::{Deserialize, Serialize};

/// 符号表记录的公共接口
pub trait SymbolRecord {
    /// 记录名（创建后不可变）
    fn name(&self) -> &str;

    /// 受保护的默认记录名（不可删除）
    fn protected_names() -> &'static [&'static str];
}

/// 表的打开状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
enum TableState {
    #[default]
    ForRead,
    ForWrite,
}

/// 通用符号表
///
/// 记录按创建顺序保存。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolTable<R: SymbolRecord> {
    records: Vec<(Handle, R)>,
    state: TableState,
}

impl<R: SymbolRecord + Clone> SymbolTable<R> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            state: TableState::ForRead,
        }
    }

    /// 是否存在指定名称的记录
    pub fn has(&self, name: &str) -> bool {
        self.try_get_handle(name).is_some()
    }

    /// 只读查找，不产生任何变更
    pub fn try_get_handle(&self, name: &str) -> Option<Handle> {
        self.records
            .iter()
            .find(|(_, r)| r.name() == name)
            .map(|(h, _)| *h)
    }

    /// 查找即建：存在则原样返回句柄，否则创建新记录
    ///
    /// 重复调用同名永远返回同一句柄，不会产生重名记录。
    pub fn get_or_create(
        &mut self,
        name: &str,
        alloc: &mut HandleAllocator,
        make: impl FnOnce(&str) -> R,
    ) -> Handle {
        if let Some(h) = self.try_get_handle(name) {
            return h;
        }

        self.upgrade_open(); // 切换为写以添加记录
        let h = alloc.alloc();
        self.records.push((h, make(name)));
        tracing::debug!(name, handle = %h, "symbol record created");
        self.downgrade_open(); // 为了安全，完成后切回读
        h
    }

    /// 仅创建：已存在同名记录时报错
    ///
    /// 与查找即建相对的严格创建路径。
    pub fn create(
        &mut self,
        name: &str,
        alloc: &mut HandleAllocator,
        make: impl FnOnce(&str) -> R,
    ) -> DbResult<Handle> {
        if self.has(name) {
            return Err(DbError::AlreadyExists(name.to_string()));
        }
        Ok(self.get_or_create(name, alloc, make))
    }

    /// 删除指定名称的记录
    ///
    /// 受保护记录、不存在的记录、当前激活记录（`active`）或被
    /// `in_use` 判定为仍被引用的记录都无法删除，返回 false 且
    /// 不产生任何变更。
    pub fn delete(
        &mut self,
        name: &str,
        active: Handle,
        in_use: impl FnOnce(&R) -> bool,
    ) -> bool {
        self.try_delete(name, active, in_use).is_ok()
    }

    /// 删除指定名称的记录，失败时返回具体原因
    ///
    /// 受保护记录与当前激活记录返回 `Protected`，
    /// 仍被引用的记录返回 `InUse`，失败时不产生任何变更。
    pub fn try_delete(
        &mut self,
        name: &str,
        active: Handle,
        in_use: impl FnOnce(&R) -> bool,
    ) -> DbResult<()> {
        if R::protected_names().contains(&name) {
            return Err(DbError::Protected(name.to_string()));
        }
        let Some(h) = self.try_get_handle(name) else {
            return Err(DbError::InvalidState(format!("no record named '{name}'")));
        };
        if h == active {
            return Err(DbError::Protected(name.to_string()));
        }
        let Some(record) = self.record(h) else {
            return Err(DbError::InvalidState(format!("no record named '{name}'")));
        };
        if in_use(record) {
            return Err(DbError::InUse(name.to_string()));
        }

        self.upgrade_open();
        self.records.retain(|(rh, _)| *rh != h);
        tracing::debug!(name, handle = %h, "symbol record deleted");
        self.downgrade_open();
        Ok(())
    }

    /// 按句柄取记录
    pub fn record(&self, h: Handle) -> Option<&R> {
        self.records
            .iter()
            .find(|(rh, _)| *rh == h)
            .map(|(_, r)| r)
    }

    pub(crate) fn record_mut(&mut self, h: Handle) -> Option<&mut R> {
        self.records
            .iter_mut()
            .find(|(rh, _)| *rh == h)
            .map(|(_, r)| r)
    }

    /// 所有记录的快照（创建顺序，非实时视图）
    pub fn list_all(&self) -> Vec<R> {
        self.records.iter().map(|(_, r)| r.clone()).collect()
    }

    /// 所有记录的句柄（创建顺序）
    pub fn handles(&self) -> Vec<Handle> {
        self.records.iter().map(|(h, _)| *h).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn upgrade_open(&mut self) {
        debug_assert_eq!(
            self.state,
            TableState::ForRead,
            "symbol table already open for write"
        );
        self.state = TableState::ForWrite;
    }

    fn downgrade_open(&mut self) {
        self.state = TableState::ForRead;
    }
}

impl<R: SymbolRecord + Clone> Default for SymbolTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// 图层记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerRecord {
    pub name: String,
    pub color: arx_core::properties::Color,
}

impl LayerRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: arx_core::properties::Color::Index(7), // 默认白色
        }
    }
}

impl SymbolRecord for LayerRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn protected_names() -> &'static [&'static str] {
        // 0层与Defpoints层不可删除
        &["0", "Defpoints"]
    }
}

/// 线型记录
///
/// `pattern` 为划线/间隔序列（正值为划线长，负值为间隔长），
/// 空序列表示实线。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineTypeRecord {
    pub name: String,
    pub pattern: Vec<f64>,
}

impl LineTypeRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: Vec::new(),
        }
    }

    pub fn with_pattern(name: impl Into<String>, pattern: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            pattern,
        }
    }
}

impl SymbolRecord for LineTypeRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn protected_names() -> &'static [&'static str] {
        &["ByLayer", "ByBlock", "Continuous"]
    }
}

/// 标注样式记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimStyleRecord {
    pub name: String,
    /// 标注文字高度
    pub text_height: f64,
}

impl DimStyleRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text_height: 2.5,
        }
    }
}

impl SymbolRecord for DimStyleRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn protected_names() -> &'static [&'static str] {
        &["Standard"]
    }
}

/// 用户坐标系（UCS）记录
///
/// 原点加一对正交单位轴；旋转时两根轴用同一旋转重新推导，
/// 保证正交性不被破坏。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UcsRecord {
    pub name: String,
    pub origin: Point3,
    pub x_axis: Vector3,
    pub y_axis: Vector3,
}

impl UcsRecord {
    /// 与世界坐标系对齐的新UCS
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            origin: Point3::origin(),
            x_axis: Vector3::x(),
            y_axis: Vector3::y(),
        }
    }

    /// UCS的Z轴（由X、Y轴叉乘得出）
    pub fn z_axis(&self) -> Vector3 {
        self.x_axis.cross(&self.y_axis)
    }

    /// 绕指定轴旋转UCS
    ///
    /// X、Y两轴施加同一旋转，保持正交。
    pub fn rotate(&mut self, angle: f64, axis: Vector3) {
        let rot = Rotation3::from_axis_angle(&Unit::new_normalize(axis), angle);
        self.x_axis = rot * self.x_axis;
        self.y_axis = rot * self.y_axis;
    }

    /// 将UCS局部坐标转换到世界坐标
    pub fn to_world(&self, p: Point3) -> Point3 {
        self.origin + self.x_axis * p.x + self.y_axis * p.y + self.z_axis() * p.z
    }

    /// 将世界坐标转换到UCS局部坐标
    pub fn from_world(&self, p: Point3) -> Point3 {
        let v = p - self.origin;
        Point3::new(
            v.dot(&self.x_axis),
            v.dot(&self.y_axis),
            v.dot(&self.z_axis()),
        )
    }
}

impl SymbolRecord for UcsRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn protected_names() -> &'static [&'static str] {
        &[]
    }
}
