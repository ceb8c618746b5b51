//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `intensity`: 计算 I(q) 曲线
//! - `profile`: 计算径向 SLD 剖面
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: common, intensity, profile

pub mod common;
pub mod intensity;
pub mod profile;

use clap::{Parser, Subcommand};

/// spherical-sld - 多壳层球形颗粒小角散射计算
#[derive(Parser)]
#[command(name = "spherical-sld")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Small-angle scattering from spherical multi-shell particles with graded SLD interfaces",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Calculate the scattering intensity I(q) of a shell profile
    Intensity(intensity::IntensityArgs),

    /// Calculate the radial SLD profile of a shell profile
    Profile(profile::ProfileArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_intensity_defaults() {
        let cli = Cli::try_parse_from(["spherical-sld", "intensity", "micelle.csv"]).unwrap();
        match cli.command {
            Commands::Intensity(args) => {
                assert_eq!(args.model.sld_solvent, 1.0);
                assert_eq!(args.points, 200);
                assert_eq!(args.q_range, "0.001:0.5");
                assert!(args.q.is_empty());
            }
            _ => panic!("expected intensity"),
        }
    }

    #[test]
    fn test_parse_explicit_q_values() {
        let cli = Cli::try_parse_from([
            "spherical-sld",
            "intensity",
            "micelle.csv",
            "--q",
            "0.01",
            "--q",
            "0.05",
            "--steps",
            "100",
        ])
        .unwrap();
        match cli.command {
            Commands::Intensity(args) => {
                assert_eq!(args.q, vec![0.01, 0.05]);
                assert_eq!(args.model.steps, 100);
            }
            _ => panic!("expected intensity"),
        }
    }
}
