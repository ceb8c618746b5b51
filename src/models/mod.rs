//! # 数据模型模块
//!
//! 定义多壳层颗粒描述与计算结果数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `sas/` 和 `commands/` 使用
//! - 子模块: shell, curve

pub mod curve;
pub mod shell;

pub use curve::{IntensityCurve, IntensityRecord, SldProfile, SldRecord};
pub use shell::{BlendShape, Shell, ShellProfile, DEFAULT_NU};
