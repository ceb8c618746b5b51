//! # 界面混合函数
//!
//! 将界面内归一化位置 z ∈ [0, 1] 映射为已完成的 SLD 对比度分数。
//! z = 0 为界面内边界，z = 1 为外边界。
//!
//! ## 形状
//! - erf:            erf(ν(2z-1)/√2) / (2 erf(ν/√2)) + 0.5
//! - power:          z^ν
//! - reverse-power:  1 - (1-z)^ν
//! - exp-decay:      expm1(-νz) / expm1(-ν)
//! - exp-growth:     expm1(νz) / expm1(ν)
//!
//! ν 必须由调用方截断到 `NU_FLOOR` 以上，ν = 0 时各式均为除零。
//! 合法形状在任意有限 ν 下都给出有限值。
//!
//! ## 依赖关系
//! - 被 `sas/integrator.rs`, `sas/profile.rs` 调用
//! - 使用 `sas/special.rs` 的误差函数

use crate::models::BlendShape;
use crate::sas::special;

use std::f64::consts::FRAC_1_SQRT_2;

impl BlendShape {
    /// 位置 z 处的混合分数
    pub fn fraction(self, nu: f64, z: f64) -> f64 {
        match self {
            BlendShape::Erf => {
                let num = special::erf(nu * FRAC_1_SQRT_2 * (2.0 * z - 1.0));
                let denom = 2.0 * special::erf(nu * FRAC_1_SQRT_2);
                num / denom + 0.5
            }
            BlendShape::Power => z.powf(nu),
            BlendShape::ReversePower => 1.0 - (1.0 - z).powf(nu),
            BlendShape::ExpDecay => (-nu * z).exp_m1() / (-nu).exp_m1(),
            BlendShape::ExpGrowth => {
                let denom = nu.exp_m1();
                if denom.is_finite() {
                    (nu * z).exp_m1() / denom
                } else {
                    // e^ν 溢出时改写为 e^{ν(z-1)} (1 - e^{-νz}) / (1 - e^{-ν})
                    (nu * (z - 1.0)).exp() * (-nu * z).exp_m1() / (-nu).exp_m1()
                }
            }
        }
    }
}

/// 混合分数；无法识别的形状返回 NaN
pub fn blend(shape: Option<BlendShape>, nu: f64, z: f64) -> f64 {
    match shape {
        Some(shape) => shape.fraction(nu, z),
        None => f64::NAN,
    }
}
