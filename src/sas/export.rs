//! # 数据导出
//!
//! 导出 I(q) 曲线和 SLD 剖面到 CSV 与 XY 格式。
//!
//! ## 支持格式
//! - CSV: 带表头的 `q,intensity` 或 `r,sld`
//! - XY: `#` 注释头 + 制表符分隔两列，便于其他 SAS 软件读取
//!
//! ## 依赖关系
//! - 被 `commands/intensity.rs`, `commands/profile.rs` 调用
//! - 使用 `models/curve.rs` 的 IntensityCurve, SldProfile
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{Result, SldError};
use crate::models::{IntensityCurve, IntensityRecord, SldProfile, SldRecord};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

fn write_error(path: &Path) -> impl Fn(std::io::Error) -> SldError + '_ {
    move |e| SldError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    }
}

/// 导出 I(q) 曲线为 CSV 格式
pub fn curve_to_csv(curve: &IntensityCurve, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for &(q, intensity) in &curve.points {
        wtr.serialize(IntensityRecord { q, intensity })?;
    }

    wtr.flush().map_err(write_error(output_path))?;
    Ok(())
}

/// 导出 I(q) 曲线为 XY 格式
pub fn curve_to_xy(curve: &IntensityCurve, output_path: &Path) -> Result<()> {
    let file = File::create(output_path).map_err(write_error(output_path))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "# I(q): {}", curve.name).map_err(write_error(output_path))?;
    writeln!(out, "# Solvent SLD: {:.6} 1e-6/Angstrom^2", curve.sld_solvent)
        .map_err(write_error(output_path))?;
    writeln!(out, "# Volume: {:.6e} Angstrom^3", curve.volume).map_err(write_error(output_path))?;
    writeln!(out, "# Columns: q (1/Angstrom), I(q)").map_err(write_error(output_path))?;
    writeln!(out, "#").map_err(write_error(output_path))?;

    for (q, intensity) in &curve.points {
        writeln!(out, "{:.6e}\t{:.8e}", q, intensity).map_err(write_error(output_path))?;
    }

    out.flush().map_err(write_error(output_path))?;
    Ok(())
}

/// 导出 SLD 剖面为 CSV 格式
pub fn profile_to_csv(profile: &SldProfile, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for &(r, sld) in &profile.points {
        wtr.serialize(SldRecord { r, sld })?;
    }

    wtr.flush().map_err(write_error(output_path))?;
    Ok(())
}

/// 导出 SLD 剖面为 XY 格式
pub fn profile_to_xy(profile: &SldProfile, output_path: &Path) -> Result<()> {
    let file = File::create(output_path).map_err(write_error(output_path))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "# SLD profile: {}", profile.name).map_err(write_error(output_path))?;
    writeln!(out, "# Columns: r (Angstrom), SLD (1e-6/Angstrom^2)")
        .map_err(write_error(output_path))?;
    writeln!(out, "#").map_err(write_error(output_path))?;

    for (r, sld) in &profile.points {
        writeln!(out, "{:.6}\t{:.6}", r, sld).map_err(write_error(output_path))?;
    }

    out.flush().map_err(write_error(output_path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample_curve() -> IntensityCurve {
        IntensityCurve {
            name: "sphere".to_string(),
            points: vec![(0.01, 100.0), (0.02, 50.5), (0.03, f64::NAN)],
            volume: 4188.79,
            sld_solvent: 1.0,
        }
    }

    #[test]
    fn test_curve_csv() {
        let path = std::env::temp_dir().join("spherical_sld_curve_test.csv");
        curve_to_csv(&sample_curve(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "q,intensity");
        assert_eq!(lines[1], "0.01,100.0");
        assert_eq!(lines[2], "0.02,50.5");
        assert_eq!(lines[3], "0.03,NaN");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_curve_xy() {
        let path = std::env::temp_dir().join("spherical_sld_curve_test.xy");
        curve_to_xy(&sample_curve(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let data: Vec<&str> = content.lines().filter(|l| !l.starts_with('#')).collect();
        assert!(content.starts_with("# I(q): sphere"));
        assert_eq!(data.len(), 3);
        let first: Vec<f64> = data[0]
            .split('\t')
            .map(|v| v.parse().unwrap())
            .collect();
        assert!((first[0] - 0.01).abs() < 1e-12);
        assert!((first[1] - 100.0).abs() < 1e-9);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_profile_csv() {
        let profile = SldProfile {
            name: "p".to_string(),
            points: vec![(0.0, 2.0), (10.0, 2.0), (12.0, 0.5)],
        };
        let path = std::env::temp_dir().join("spherical_sld_profile_test.csv");
        profile_to_csv(&profile, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["r,sld", "0.0,2.0", "10.0,2.0", "12.0,0.5"]);
        fs::remove_file(&path).ok();
    }
}
