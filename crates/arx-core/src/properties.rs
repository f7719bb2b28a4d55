//! 实体视觉属性
//!
//! 颜色、线型与图层均以名称引用符号表记录，
//! 解析由图形数据库负责。

use serde::{Deserialize, Serialize};

/// 颜色（ACI颜色索引）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Color {
    /// 随层（默认）
    #[default]
    ByLayer,
    /// 随块
    ByBlock,
    /// 颜色索引（1-255）
    Index(i16),
}

/// 实体属性
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    /// 所在图层名
    pub layer: String,
    /// 线型名
    pub line_type: String,
    /// 颜色
    pub color: Color,
}

impl Default for Properties {
    fn default() -> Self {
        Self {
            layer: "0".to_string(),
            line_type: "ByLayer".to_string(),
            color: Color::ByLayer,
        }
    }
}

impl Properties {
    /// 指定图层的属性
    pub fn on_layer(layer: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
            ..Self::default()
        }
    }
}
