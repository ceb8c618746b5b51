//! # 解析器模块
//!
//! 提供壳层剖面输入文件的解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: shells

pub mod shells;

use crate::error::{Result, SldError};
use crate::models::ShellProfile;
use std::path::Path;

/// 从文件路径推断格式并解析
pub fn parse_profile_file(path: &Path) -> Result<ShellProfile> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" | "txt" => shells::parse_shell_file(path),
        _ => Err(SldError::ParseError {
            format: "shell profile".to_string(),
            path: path.display().to_string(),
            reason: "expected a .csv shell table".to_string(),
        }),
    }
}
