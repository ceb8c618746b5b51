//! # profile 子命令 CLI 定义
//!
//! 计算壳层剖面的径向 SLD 分布。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/profile.rs`

use super::common::{BatchArgs, ModelArgs, OutputFormat, PlotArgs};
use clap::Args;
use std::path::PathBuf;

/// profile 子命令参数
#[derive(Args, Debug)]
pub struct ProfileArgs {
    /// Input: shell profile CSV file or directory containing profile files
    pub input: PathBuf,

    /// Output: file path (single mode) or directory (batch mode)
    #[arg(short, long, default_value = "sld_profile.png")]
    pub output: PathBuf,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(flatten)]
    pub model: ModelArgs,

    #[command(flatten)]
    pub plot: PlotArgs,

    #[command(flatten)]
    pub batch: BatchArgs,
}
