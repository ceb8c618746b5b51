//! # 散射强度积分器
//!
//! 由壳层序列计算单个 q 的散射振幅与强度。
//!
//! ## 算法概述
//! 1. 逐壳层推进半径 r：均匀部分以 `uniform_amplitude` 在内外边界相减计入
//! 2. 界面宽度非零时，将界面等分为 N 段，每段以混合函数给出外端 SLD，
//!    用线性段近似并以 `segment_amplitude` 在内外边界相减计入
//! 3. 最后减去溶剂在最终半径处的均匀项
//! 4. I(q) = F² × 1e-4
//!
//! 计算量为 O(壳层数 × N)；N 越大，分段线性近似越接近真实混合曲线。
//! 积分器无内部可变状态，可在多线程中按 q 并行调用。
//!
//! ## 依赖关系
//! - 被 `commands/intensity.rs` 调用
//! - 使用 `sas/blend.rs`, `sas/segment.rs`, `sas/volume.rs`
//! - 使用 `models/shell.rs` 的 Shell

use crate::models::Shell;
use crate::sas::blend::blend;
use crate::sas::segment::{segment_amplitude, uniform_amplitude};
use crate::sas::volume::form_volume;

/// SLD 单位 (1e-6/Å²) 与振幅归一化之间的换算常数
pub const INTENSITY_SCALE: f64 = 1.0e-4;

/// 界面默认分段数
pub const DEFAULT_STEPS: usize = 35;

/// 散射强度积分器
#[derive(Debug, Clone, Copy)]
pub struct IntensityIntegrator {
    /// 溶剂 SLD
    sld_solvent: f64,
    /// 每个界面的线性分段数 N (≥ 1)
    n_steps: usize,
}

impl IntensityIntegrator {
    /// 创建新的积分器，分段数至少为 1
    pub fn new(sld_solvent: f64, n_steps: usize) -> Self {
        Self {
            sld_solvent,
            n_steps: n_steps.max(1),
        }
    }

    pub fn sld_solvent(&self) -> f64 {
        self.sld_solvent
    }

    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// 计算散射振幅 F(q)
    pub fn amplitude(&self, q: f64, shells: &[Shell]) -> f64 {
        let n_steps = self.n_steps;
        let mut f = 0.0;
        let mut r = 0.0;

        for (index, shell) in shells.iter().enumerate() {
            let sld_l = shell.sld;

            // 均匀部分；r = 0 时体积为 0，内核同样适用
            f -= uniform_amplitude(q, r, sld_l);
            r += shell.thickness;
            f += uniform_amplitude(q, r, sld_l);

            let dr = shell.interface / n_steps as f64;
            if dr == 0.0 {
                continue;
            }

            let sld_r = shells
                .get(index + 1)
                .map_or(self.sld_solvent, |next| next.sld);
            let delta = sld_r - sld_l;
            let nu = shell.effective_nu();

            let mut sld_in = sld_l;
            for step in 1..=n_steps {
                let z = step as f64 / n_steps as f64;
                let sld_out = blend(shell.shape, nu, z) * delta + sld_l;

                let slope = (sld_out - sld_in) / dr;
                let contrast = sld_in - slope * r;

                f -= segment_amplitude(q, r, contrast, slope);
                r += dr;
                f += segment_amplitude(q, r, contrast, slope);

                sld_in = sld_out;
            }
        }

        // 溶剂延伸至无穷远
        f -= uniform_amplitude(q, r, self.sld_solvent);

        f
    }

    /// 计算散射强度 I(q) = F² × 1e-4
    pub fn intensity(&self, q: f64, shells: &[Shell]) -> f64 {
        let f = self.amplitude(q, shells);
        f * f * INTENSITY_SCALE
    }

    /// 模型强度 scale · I(q) / V + background；V 为 0 时只返回背景
    pub fn scaled_intensity(&self, q: f64, shells: &[Shell], scale: f64, background: f64) -> f64 {
        let volume = form_volume(shells);
        if volume == 0.0 {
            return background;
        }
        scale * self.intensity(q, shells) / volume + background
    }
}

impl Default for IntensityIntegrator {
    fn default() -> Self {
        Self::new(1.0, DEFAULT_STEPS)
    }
}
