//! 对象句柄
//!
//! 句柄是对象在文档内的稳定不透明引用，在首次入库时分配一次，
//! 文档打开期间永不复用。

use serde::{Deserialize, Serialize};

/// 对象句柄
///
/// `Handle::NULL` 表示"无对象"的哨兵值。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Handle(u64);

impl Handle {
    /// 空句柄
    pub const NULL: Handle = Handle(0);

    pub fn is_null(&self) -> bool {
        self.0 == 0
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// 解析十六进制句柄字符串
    pub fn from_hex(s: &str) -> Option<Handle> {
        u64::from_str_radix(s.trim(), 16).ok().map(Handle)
    }
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:X}", self.0)
    }
}

/// 句柄分配器（单调递增，从1开始）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandleAllocator {
    next: u64,
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn alloc(&mut self) -> Handle {
        let h = Handle(self.next);
        self.next += 1;
        h
    }
}

impl Default for HandleAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique_and_never_null() {
        let mut alloc = HandleAllocator::new();
        let a = alloc.alloc();
        let b = alloc.alloc();
        assert_ne!(a, b);
        assert!(!a.is_null());
        assert!(Handle::NULL.is_null());
    }

    #[test]
    fn test_hex_round_trip() {
        let mut alloc = HandleAllocator::new();
        for _ in 0..300 {
            alloc.alloc();
        }
        let h = alloc.alloc();
        let parsed = Handle::from_hex(&h.to_string()).unwrap();
        assert_eq!(h, parsed);
    }

    #[test]
    fn test_invalid_hex() {
        assert!(Handle::from_hex("not-hex").is_none());
    }
}
