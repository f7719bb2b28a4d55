//! 用户坐标系（UCS）操作
//!
//! 当前UCS为空句柄时表示世界坐标系。

use crate::catalog::UcsRecord;
use crate::document::Document;
use crate::error::{DbError, DbResult};
use crate::handle::Handle;
use arx_core::math::{Point3, Vector3};

impl Document {
    /// 创建新UCS（初始与世界坐标系对齐）
    ///
    /// 已存在同名UCS时直接返回其句柄。
    pub fn add_ucs(&mut self, name: &str) -> Handle {
        self.ucs_table
            .get_or_create(name, &mut self.allocator, |n| UcsRecord::new(n))
    }

    /// 只读查找UCS句柄
    pub fn try_get_ucs(&self, name: &str) -> Option<Handle> {
        self.ucs_table.try_get_handle(name)
    }

    /// 设置当前UCS
    ///
    /// UCS不存在时返回 false。
    pub fn set_current_ucs(&mut self, name: &str) -> bool {
        let Some(h) = self.ucs_table.try_get_handle(name) else {
            return false;
        };
        self.current_ucs = h;
        true
    }

    /// 切回世界坐标系
    pub fn set_world_ucs(&mut self) {
        self.current_ucs = Handle::NULL;
    }

    /// 当前UCS句柄（空句柄表示世界坐标系）
    pub fn current_ucs(&self) -> Handle {
        self.current_ucs
    }

    /// 设置UCS原点
    pub fn set_ucs_origin(&mut self, h: Handle, origin: Point3) -> DbResult<()> {
        let record = self
            .ucs_table
            .record_mut(h)
            .ok_or(DbError::NotFound(h))?;
        record.origin = origin;
        Ok(())
    }

    /// 绕指定轴旋转UCS
    ///
    /// X、Y两轴施加同一旋转，正交性保持不变。
    pub fn rotate_ucs(&mut self, h: Handle, angle: f64, axis: Vector3) -> DbResult<()> {
        assert!(axis.norm() > arx_core::math::EPSILON, "rotation axis must be non-zero");
        let record = self
            .ucs_table
            .record_mut(h)
            .ok_or(DbError::NotFound(h))?;
        record.rotate(angle, axis);
        Ok(())
    }

    /// 按句柄取UCS记录
    pub fn ucs_record(&self, h: Handle) -> Option<&UcsRecord> {
        self.ucs_table.record(h)
    }

    /// 所有UCS记录的快照（创建顺序）
    pub fn ucs_list(&self) -> Vec<UcsRecord> {
        self.ucs_table.list_all()
    }

    /// 删除指定名称的UCS
    ///
    /// 不存在或为当前UCS时返回 false。
    pub fn delete_ucs(&mut self, name: &str) -> bool {
        let active = self.current_ucs;
        self.ucs_table.delete(name, active, |_| false)
    }
}
