//! # 线性 SLD 球壳段的解析 Fourier 变换
//!
//! 对 sld(r') = contrast + slope·r' 的球壳段，边界 r 处的振幅项为
//!
//! ```text
//! F(q, r) = V(r) · [ contrast · j1c(qr) + slope · 3r · K(qr) ]
//! V(r)    = 4π r³ / 3
//! K(x)    = (2x sin x - (x²-2) cos x - 2) / x⁴
//! ```
//!
//! 只以 F(q, r_out) - F(q, r_in) 的形式使用。K 中去掉的常数使
//! qr → 0 极限有限：F(0, r) = contrast·V(r) + π r⁴·slope。
//!
//! ## 依赖关系
//! - 被 `sas/integrator.rs` 调用
//! - 使用 `sas/special.rs`

use crate::sas::special::{slope_kernel, sph_j1c};
use crate::sas::volume::FOUR_PI_3;

/// 均匀 SLD 球在半径 r 处的振幅项
pub fn uniform_amplitude(q: f64, r: f64, sld: f64) -> f64 {
    FOUR_PI_3 * r * r * r * sld * sph_j1c(q * r)
}

/// 线性 SLD 段在半径 r 处的边界振幅项
pub fn segment_amplitude(q: f64, r: f64, contrast: f64, slope: f64) -> f64 {
    let qr = q * r;
    let vol = FOUR_PI_3 * r * r * r;
    vol * (sph_j1c(qr) * contrast + 3.0 * r * slope_kernel(qr) * slope)
}
