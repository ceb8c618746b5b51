//! # intensity 子命令 CLI 定义
//!
//! 计算单个或一组壳层剖面的 I(q) 曲线。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/intensity.rs`

use super::common::{BatchArgs, ModelArgs, OutputFormat, PlotArgs};
use clap::Args;
use std::path::PathBuf;

/// intensity 子命令参数
#[derive(Args, Debug)]
pub struct IntensityArgs {
    /// Input: shell profile CSV file or directory containing profile files
    pub input: PathBuf,

    /// Output: file path (single mode) or directory (batch mode)
    #[arg(short, long, default_value = "intensity.png")]
    pub output: PathBuf,

    /// Output format (auto-detected from extension if not specified)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Explicit q values in 1/Å (repeatable); overrides --q-range
    #[arg(long)]
    pub q: Vec<f64>,

    /// q range in 1/Å as "min:max"
    #[arg(long, default_value = "0.001:0.5")]
    pub q_range: String,

    /// Number of q points in the range
    #[arg(long, default_value_t = 200)]
    pub points: usize,

    /// Space q points linearly instead of logarithmically
    #[arg(long, default_value_t = false)]
    pub linear: bool,

    /// Report scale * I(q) / V + background instead of the raw kernel value
    #[arg(long, default_value_t = false)]
    pub normalize: bool,

    /// Scale factor (used with --normalize)
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,

    /// Flat background (used with --normalize)
    #[arg(long, default_value_t = 0.0)]
    pub background: f64,

    #[command(flatten)]
    pub model: ModelArgs,

    #[command(flatten)]
    pub plot: PlotArgs,

    #[command(flatten)]
    pub batch: BatchArgs,
}
