//! # 径向 SLD 剖面
//!
//! 按与积分器相同的界面离散方式生成 (r, sld) 折线，用于检查和绘图。
//! 起点为 (0, sld₀)，末尾追加 (1.2 r_max, sld_solvent) 表示溶剂。
//!
//! ## 依赖关系
//! - 被 `commands/profile.rs` 调用
//! - 使用 `sas/blend.rs`

use crate::models::{Shell, SldProfile};
use crate::sas::blend::blend;

/// 溶剂段相对外半径的延伸比例
const SOLVENT_TAIL: f64 = 1.2;

/// 计算 SLD 剖面
pub fn sld_profile(name: &str, shells: &[Shell], sld_solvent: f64, n_steps: usize) -> SldProfile {
    let n_steps = n_steps.max(1);
    let mut points = Vec::with_capacity(2 + shells.len() * (n_steps + 1));

    let mut r = 0.0;
    points.push((r, shells.first().map_or(sld_solvent, |s| s.sld)));

    for (index, shell) in shells.iter().enumerate() {
        r += shell.thickness;
        points.push((r, shell.sld));

        if shell.interface == 0.0 {
            continue;
        }

        let dr = shell.interface / n_steps as f64;
        let sld_r = shells
            .get(index + 1)
            .map_or(sld_solvent, |next| next.sld);
        let delta = sld_r - shell.sld;
        let nu = shell.effective_nu();

        for step in 1..=n_steps {
            let z = step as f64 / n_steps as f64;
            r += dr;
            points.push((r, blend(shell.shape, nu, z) * delta + shell.sld));
        }
    }

    points.push((r * SOLVENT_TAIL, sld_solvent));

    SldProfile {
        name: name.to_string(),
        points,
    }
}
