//! # 计算结果数据模型
//!
//! 存储 I(q) 曲线和径向 SLD 剖面，供导出与绘图使用。
//!
//! ## 依赖关系
//! - 由 `commands/` 组装
//! - 被 `sas/export.rs`, `sas/plot.rs` 使用

use serde::Serialize;

/// 散射强度曲线
#[derive(Debug, Clone)]
pub struct IntensityCurve {
    /// 结构名称
    pub name: String,
    /// (q, I) 点列，q 单位 1/Å
    pub points: Vec<(f64, f64)>,
    /// 颗粒体积 (Å³)
    pub volume: f64,
    /// 溶剂 SLD
    pub sld_solvent: f64,
}

impl IntensityCurve {
    /// 含 NaN 的点数
    pub fn nan_count(&self) -> usize {
        self.points.iter().filter(|(_, i)| i.is_nan()).count()
    }

    /// 有限且为正的点，对数坐标绘图只能使用这些点
    pub fn positive_points(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .copied()
            .filter(|(q, i)| *q > 0.0 && i.is_finite() && *i > 0.0)
            .collect()
    }
}

/// CSV 输出行
#[derive(Debug, Serialize)]
pub struct IntensityRecord {
    pub q: f64,
    pub intensity: f64,
}

/// 径向 SLD 剖面
#[derive(Debug, Clone)]
pub struct SldProfile {
    /// 结构名称
    pub name: String,
    /// (r, sld) 点列，r 单位 Å
    pub points: Vec<(f64, f64)>,
}

/// CSV 输出行
#[derive(Debug, Serialize)]
pub struct SldRecord {
    pub r: f64,
    pub sld: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_points_drop_nan_and_zero() {
        let curve = IntensityCurve {
            name: "t".to_string(),
            points: vec![(0.0, 1.0), (0.01, f64::NAN), (0.02, 0.0), (0.03, 2.0)],
            volume: 1.0,
            sld_solvent: 0.0,
        };
        assert_eq!(curve.nan_count(), 1);
        assert_eq!(curve.positive_points(), vec![(0.03, 2.0)]);
    }
}
