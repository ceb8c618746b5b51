//! # 小角散射计算模块
//!
//! 球对称多壳层颗粒的散射强度内核，以及结果导出与绘图。
//!
//! ## 子模块
//! - `special`: 球 Bessel 项、线性段斜率核、误差函数
//! - `volume`: 颗粒体积与外半径
//! - `blend`: 界面混合函数
//! - `segment`: 线性 SLD 球壳段的解析 Fourier 变换
//! - `integrator`: I(q) 积分器
//! - `profile`: 径向 SLD 剖面
//! - `plot`: 图表生成
//! - `export`: 数据导出
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/shell.rs`, `models/curve.rs`

pub mod blend;
pub mod export;
pub mod integrator;
pub mod plot;
pub mod profile;
pub mod segment;
pub mod special;
pub mod volume;

pub use integrator::{IntensityIntegrator, DEFAULT_STEPS};
pub use volume::{form_volume, outer_radius};
