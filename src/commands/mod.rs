//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `sas/`, `batch/`, `utils/`
//! - 子模块: intensity, profile

pub mod intensity;
pub mod profile;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Intensity(args) => intensity::execute(args),
        Commands::Profile(args) => profile::execute(args),
    }
}
