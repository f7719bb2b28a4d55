//! 实体编辑操作
//!
//! 移动、旋转、缩放、镜像、复制与偏移。每个操作都同时接受
//! 游离实体（`&mut Entity`）与驻留实体（`Handle`）：前者直接
//! 就地变换，后者经写打开守卫在库内变换。

use crate::document::Document;
use crate::error::DbResult;
use crate::handle::Handle;
use arx_core::entity::Entity;
use arx_core::math::{Matrix4, Point3, Vector3};
use arx_core::transform;

/// 编辑操作的目标：游离实体或驻留实体
pub enum Target<'a> {
    /// 游离实体，调用方独占
    Detached(&'a mut Entity),
    /// 驻留实体，经句柄访问
    Attached(Handle),
}

impl<'a> From<&'a mut Entity> for Target<'a> {
    fn from(e: &'a mut Entity) -> Self {
        Target::Detached(e)
    }
}

impl From<Handle> for Target<'_> {
    fn from(h: Handle) -> Self {
        Target::Attached(h)
    }
}

impl Document {
    /// 对目标实体施加任意变换
    pub fn transform_entity(&mut self, target: Target<'_>, m: &Matrix4) -> DbResult<()> {
        match target {
            Target::Detached(e) => {
                e.transform_by(m);
                Ok(())
            }
            Target::Attached(h) => {
                let mut guard = self.open_for_write(h)?;
                guard.transform_by(m);
                Ok(())
            }
        }
    }

    /// 移动实体：从 `source` 平移到 `target`
    pub fn move_entity(
        &mut self,
        target: Target<'_>,
        source: Point3,
        dest: Point3,
    ) -> DbResult<()> {
        self.transform_entity(target, &transform::displacement(source, dest))
    }

    /// 绕过 `base` 的Z轴旋转实体
    pub fn rotate_entity(&mut self, target: Target<'_>, base: Point3, angle: f64) -> DbResult<()> {
        self.transform_entity(target, &transform::rotation(angle, Vector3::z(), base))
    }

    /// 以 `base` 为基点均匀缩放实体
    pub fn scale_entity(&mut self, target: Target<'_>, base: Point3, factor: f64) -> DbResult<()> {
        self.transform_entity(target, &transform::scaling(factor, base))
    }

    /// 复制实体：源保持不变，副本按 `source`→`dest` 平移后入库
    ///
    /// 驻留实体的副本落在源实体所在空间；
    /// 游离实体的副本追加到模型空间。
    pub fn copy_entity(
        &mut self,
        target: Target<'_>,
        source: Point3,
        dest: Point3,
    ) -> DbResult<Handle> {
        let m = transform::displacement(source, dest);
        match target {
            Target::Detached(e) => Ok(self.append_to_model_space(e.transformed_copy(&m))),
            Target::Attached(h) => self.copy_with_transform(h, &m),
        }
    }

    /// 以 `p1`—`p2` 连线为镜像轴镜像实体
    ///
    /// `keep_source` 为 false 时就地变换源实体，返回 `None`；
    /// 为 true 时源保持不变，返回入库镜像副本的句柄。
    pub fn mirror_entity(
        &mut self,
        target: Target<'_>,
        p1: Point3,
        p2: Point3,
        keep_source: bool,
    ) -> DbResult<Option<Handle>> {
        let m = transform::mirroring(p1, p2);
        if !keep_source {
            self.transform_entity(target, &m)?;
            return Ok(None);
        }
        match target {
            Target::Detached(e) => Ok(Some(self.append_to_model_space(e.transformed_copy(&m)))),
            Target::Attached(h) => Ok(Some(self.copy_with_transform(h, &m)?)),
        }
    }

    /// 偏移驻留实体，生成一条或多条新实体
    ///
    /// 新实体继承源实体的属性并追加到源实体所在空间，整组
    /// 创建在同一事务内完成；几何不可偏移时整体失败，
    /// 文档不产生任何变更。
    pub fn offset_entity(&mut self, h: Handle, distance: f64) -> DbResult<Vec<Handle>> {
        let source = self.open_for_read(h)?;
        let properties = source.properties.clone();
        let offsets = source.offset_geometry(distance)?;
        let kind = self
            .objects
            .get(&h)
            .map(|s| s.space)
            .unwrap_or_default();

        let mut tx = self.transaction();
        let handles: Vec<Handle> = offsets
            .into_iter()
            .map(|g| tx.append_to_space(kind, Entity::with_properties(g, properties.clone())))
            .collect();
        tx.commit();
        tracing::debug!(source = %h, count = handles.len(), distance, "entity offset");
        Ok(handles)
    }
}
