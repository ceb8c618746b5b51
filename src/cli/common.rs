//! # 子命令共享参数
//!
//! 模型参数、图像参数和批量处理参数，由各子命令 `flatten` 引用。
//!
//! ## 依赖关系
//! - 被 `cli/intensity.rs`, `cli/profile.rs` 使用

use crate::sas::DEFAULT_STEPS;

use clap::{Args, ValueEnum};
use std::path::Path;

/// 输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// PNG image
    Png,
    /// SVG vector image
    Svg,
    /// CSV data file
    Csv,
    /// XY data file (tab separated, '#' header)
    Xy,
}

impl OutputFormat {
    /// 文件扩展名
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Csv => "csv",
            OutputFormat::Xy => "xy",
        }
    }

    /// 从文件扩展名推断输出格式
    pub fn from_extension(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .as_deref()
        {
            Some("svg") => OutputFormat::Svg,
            Some("csv") => OutputFormat::Csv,
            Some("xy") | Some("dat") | Some("txt") => OutputFormat::Xy,
            _ => OutputFormat::Png,
        }
    }
}

/// 模型标量参数
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Solvent scattering length density (1e-6/Å²)
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub sld_solvent: f64,

    /// Number of linear segments used to approximate each interface
    #[arg(long, env = "SPHERICAL_SLD_STEPS", default_value_t = DEFAULT_STEPS)]
    pub steps: usize,
}

/// 图像参数
#[derive(Args, Debug, Clone)]
pub struct PlotArgs {
    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Title for the plot (default: profile name)
    #[arg(long)]
    pub title: Option<String>,
}

/// 批量处理参数
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Glob pattern for input files (batch mode, e.g., "*.csv,*.txt")
    #[arg(long, default_value = "*.csv")]
    pub pattern: String,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Recurse into subdirectories (batch mode)
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_extension(Path::new("a.svg")), OutputFormat::Svg);
        assert_eq!(OutputFormat::from_extension(Path::new("a.CSV")), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_extension(Path::new("a.dat")), OutputFormat::Xy);
        assert_eq!(OutputFormat::from_extension(Path::new("a")), OutputFormat::Png);
    }
}
