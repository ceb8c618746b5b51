//! # 特殊函数
//!
//! 内核用到的 qr 的振荡函数。小宗量时改用 Taylor 级数，避免
//! 闭式中的相消误差以及 qr = 0 处的 0/0。
//!
//! ## 依赖关系
//! - 被 `sas/segment.rs`, `sas/integrator.rs` 调用
//! - 误差函数来自 `libm`

/// 小于该值时使用级数
const SERIES_CUTOFF: f64 = 0.5;

/// 线性斜率项改用级数的阈值
const SLOPE_SERIES_CUTOFF: f64 = 1.0;

/// 归一化一阶球 Bessel 函数 3 j₁(x)/x = 3(sin x - x cos x)/x³，j1c(0) = 1
pub fn sph_j1c(x: f64) -> f64 {
    if x.abs() < SERIES_CUTOFF {
        // 1 - x²/10 + x⁴/280 - x⁶/15120 + x⁸/1330560 - x¹⁰/172972800 + x¹²/31135104000
        let x2 = x * x;
        1.0 + x2
            * (-1.0 / 10.0
                + x2 * (1.0 / 280.0
                    + x2 * (-1.0 / 15_120.0
                        + x2 * (1.0 / 1_330_560.0
                            + x2 * (-1.0 / 172_972_800.0 + x2 / 31_135_104_000.0)))))
    } else {
        let (sin_x, cos_x) = x.sin_cos();
        3.0 * (sin_x - x * cos_x) / (x * x * x)
    }
}

/// 线性 SLD 段的斜率核 (2x sin x - (x²-2) cos x - 2) / x⁴
///
/// 去掉常数 2 后在 x = 0 处极限为 1/4。被去掉的部分只贡献与 r 无关的
/// 常数 8π/q⁴，在每对内外边界相减时严格抵消。
pub fn slope_kernel(x: f64) -> f64 {
    let x2 = x * x;
    if x.abs() < SLOPE_SERIES_CUTOFF {
        // Σ_{k≥2} (-1)^k 2(2k-1)(k-1)/(2k)! · x^(2k-4)
        let mut sum = 0.0;
        let mut factorial = 24.0; // (2k)! for k = 2
        let mut power = 1.0;
        for k in 2..=10u32 {
            let kf = k as f64;
            let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
            sum += sign * 2.0 * (2.0 * kf - 1.0) * (kf - 1.0) / factorial * power;
            factorial *= (2.0 * kf + 1.0) * (2.0 * kf + 2.0);
            power *= x2;
        }
        sum
    } else {
        let (sin_x, cos_x) = x.sin_cos();
        (2.0 * x * sin_x - (x2 - 2.0) * cos_x - 2.0) / (x2 * x2)
    }
}

/// 误差函数
pub fn erf(x: f64) -> f64 {
    libm::erf(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn j1c_closed(x: f64) -> f64 {
        3.0 * (x.sin() - x * x.cos()) / (x * x * x)
    }

    fn slope_closed(x: f64) -> f64 {
        (2.0 * x * x.sin() - (x * x - 2.0) * x.cos() - 2.0) / x.powi(4)
    }

    #[test]
    fn test_j1c_limit() {
        assert_eq!(sph_j1c(0.0), 1.0);
        assert!((sph_j1c(1e-8) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_j1c_series_matches_closed_form_at_cutoff() {
        for &x in &[0.3, 0.49, 0.51, 0.8] {
            let got = sph_j1c(x);
            let expected = j1c_closed(x);
            assert!(
                ((got - expected) / expected).abs() < 1e-13,
                "x = {}: {} vs {}",
                x,
                got,
                expected
            );
        }
    }

    #[test]
    fn test_j1c_large_argument() {
        let x = 12.345;
        assert!((sph_j1c(x) - j1c_closed(x)).abs() < 1e-15);
    }

    #[test]
    fn test_slope_kernel_limit() {
        assert!((slope_kernel(0.0) - 0.25).abs() < 1e-16);
        // 1/4 - x²/36 + x⁴/960
        let x: f64 = 1e-3;
        let expected = 0.25 - x * x / 36.0 + x.powi(4) / 960.0;
        assert!((slope_kernel(x) - expected).abs() < 1e-16);
    }

    #[test]
    fn test_slope_kernel_series_matches_closed_form() {
        for &x in &[0.6, 0.99, 1.01, 2.5] {
            let got = slope_kernel(x);
            let expected = slope_closed(x);
            assert!(
                ((got - expected) / expected).abs() < 1e-12,
                "x = {}: {} vs {}",
                x,
                got,
                expected
            );
        }
    }

    #[test]
    fn test_erf_values() {
        assert_eq!(erf(0.0), 0.0);
        assert!((erf(1.0) - 0.842_700_792_949_714_9).abs() < 1e-15);
        assert!((erf(-0.5) + 0.520_499_877_813_046_5).abs() < 1e-15);
    }
}
