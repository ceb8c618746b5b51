//! # spherical-sld - 多壳层球形颗粒小角散射计算工具
//!
//! 计算球对称多壳层颗粒的小角散射强度 I(q)。每个壳层由均匀部分和其后的
//! 渐变界面组成，界面 SLD 按五种解析混合形状之一过渡，并以分段线性方式
//! 离散后用解析 Fourier 变换求和。
//!
//! ## 子命令
//! - `intensity` - 计算 I(q) 曲线 (PNG/SVG/CSV/XY)
//! - `profile`   - 计算径向 SLD 剖面
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (壳层剖面解析)
//!   │     ├── sas/       (散射内核、导出、绘图)
//!   │     ├── batch/     (批量并行处理)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod sas;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
