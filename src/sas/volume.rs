//! # 颗粒体积
//!
//! V = (4/3)π r³，r 为全部壳层厚度与界面宽度之和。
//!
//! ## 依赖关系
//! - 被 `sas/integrator.rs` (归一化强度) 和 `commands/` 调用
//! - 使用 `models/shell.rs`

use crate::models::Shell;

use std::f64::consts::PI;

/// 4π/3
pub const FOUR_PI_3: f64 = 4.0 * PI / 3.0;

/// 颗粒外半径（有效半径）
pub fn outer_radius(shells: &[Shell]) -> f64 {
    shells.iter().map(Shell::extent).sum()
}

/// 颗粒总体积，空序列为 0
pub fn form_volume(shells: &[Shell]) -> f64 {
    let r = outer_radius(shells);
    FOUR_PI_3 * r * r * r
}
