//! 输入校验
//!
//! 命令行输入的数字判定与点坐标解析。

use arx_core::math::Point3;
use std::path::PathBuf;

/// 字符串是否为（可带符号的）十进制数
pub fn is_numeric(value: &str) -> bool {
    let s = value.strip_prefix(['+', '-']).unwrap_or(value);
    if s.is_empty() {
        return false;
    }
    let mut dot_seen = false;
    let mut digit_seen = false;
    for c in s.chars() {
        match c {
            '0'..='9' => digit_seen = true,
            '.' if !dot_seen => dot_seen = true,
            _ => return false,
        }
    }
    digit_seen
}

/// 字符串是否为（可带符号的）整数
pub fn is_int(value: &str) -> bool {
    let s = value.strip_prefix(['+', '-']).unwrap_or(value);
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// 解析 "(x,y,z)" 形式的点坐标字符串
///
/// 括号可省略；任一分量不是数字时返回 `None`。
pub fn parse_point(value: &str) -> Option<Point3> {
    let parts: Vec<&str> = value
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .split(',')
        .map(str::trim)
        .collect();
    if parts.len() != 3 {
        return None;
    }
    let x = parts[0].parse().ok()?;
    let y = parts[1].parse().ok()?;
    let z = parts[2].parse().ok()?;
    Some(Point3::new(x, y, z))
}

/// 当前可执行文件所在的目录
pub fn current_exe_dir() -> std::io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent().map(PathBuf::from).ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "executable has no parent dir")
    })
}
