//! # 壳层剖面 CSV 解析器
//!
//! 读取由内向外逐行描述壳层的 CSV 文件：
//!
//! ```text
//! # core-shell micelle
//! sld,thickness,interface,shape,nu
//! 4.06,100,50,erf,2.5
//! 1.0,30,20,3,1.5
//! ```
//!
//! `interface`, `shape`, `nu` 三列可省略：无界面的壳层只需 `sld,thickness`，
//! 省略 `nu` 时取 2.5。
//!
//! `shape` 可为数值代码 (0-4，向零截断) 或名称。超出范围的数值代码保留为
//! 非法形状，计算结果为 NaN；无法识别的名称直接报错。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 调用
//! - 使用 `models/shell.rs`
//! - 使用 `csv` + `serde` 反序列化

use crate::error::{Result, SldError};
use crate::models::{BlendShape, Shell, ShellProfile, DEFAULT_NU};

use serde::Deserialize;
use std::fs;
use std::path::Path;

const FORMAT: &str = "shell CSV";

/// CSV 中的一行
#[derive(Debug, Deserialize)]
struct ShellRecord {
    sld: f64,
    thickness: f64,
    #[serde(default, alias = "interface_width")]
    interface: Option<f64>,
    #[serde(default)]
    shape: Option<String>,
    #[serde(default, alias = "sharpness")]
    nu: Option<f64>,
}

/// 解析形状字段
fn parse_shape(token: &str) -> Result<Option<BlendShape>> {
    if let Ok(code) = token.trim().parse::<f64>() {
        return Ok(BlendShape::from_code(code));
    }
    token.parse::<BlendShape>().map(Some)
}

/// 从文件读取壳层剖面，名称取自文件名
pub fn parse_shell_file(path: &Path) -> Result<ShellProfile> {
    let content = fs::read_to_string(path).map_err(|e| SldError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("profile");

    parse_shells(&content, name, &path.display().to_string())
}

/// 从 CSV 文本解析壳层剖面
pub fn parse_shells(content: &str, name: &str, source: &str) -> Result<ShellProfile> {
    let parse_error = |reason: String| SldError::ParseError {
        format: FORMAT.to_string(),
        path: source.to_string(),
        reason,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(content.as_bytes());

    let mut shells = Vec::new();

    for (index, record) in reader.deserialize::<ShellRecord>().enumerate() {
        let record = record.map_err(|e| parse_error(format!("shell {}: {}", index, e)))?;

        let interface = record.interface.unwrap_or(0.0);

        // NaN 不满足 x >= 0，一并拒绝
        let non_negative = |x: f64| x >= 0.0;
        if !non_negative(record.thickness) || !non_negative(interface) {
            return Err(parse_error(format!(
                "shell {}: thickness and interface must be non-negative (got {}, {})",
                index, record.thickness, interface
            )));
        }

        let token = match record.shape.as_deref() {
            Some(token) => token,
            None if interface == 0.0 => {
                shells.push(Shell::uniform(record.sld, record.thickness));
                continue;
            }
            None => {
                return Err(parse_error(format!(
                    "shell {}: shape is required when interface > 0",
                    index
                )))
            }
        };

        let shape = parse_shape(token).map_err(|e| {
            let names: Vec<String> = BlendShape::ALL.iter().map(|s| s.to_string()).collect();
            parse_error(format!(
                "shell {}: {} (expected 0-4 or one of: {})",
                index,
                e,
                names.join(", ")
            ))
        })?;

        shells.push(Shell {
            sld: record.sld,
            thickness: record.thickness,
            interface,
            shape,
            nu: record.nu.unwrap_or(DEFAULT_NU),
        });
    }

    if shells.is_empty() {
        return Err(parse_error("no shells defined".to_string()));
    }

    Ok(ShellProfile::new(name, shells))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MICELLE: &str = "\
# core-shell micelle
sld, thickness, interface, shape, nu
4.06, 100, 50, erf, 2.5
1.0, 30, 20, 3, 1.5
";

    #[test]
    fn test_parse_profile() {
        let profile = parse_shells(MICELLE, "micelle", "inline").unwrap();
        assert_eq!(profile.name, "micelle");
        assert_eq!(profile.len(), 2);
        assert_eq!(
            profile.shells[0],
            Shell::new(4.06, 100.0, 50.0, BlendShape::Erf, 2.5)
        );
        assert_eq!(profile.shells[1].shape, Some(BlendShape::ExpDecay));
        assert!(!profile.has_invalid_shape());
    }

    #[test]
    fn test_aliases_and_float_codes() {
        let content = "sld,thickness,interface_width,shape,sharpness\n2,10,5,1.0,2\n";
        let profile = parse_shells(content, "alias", "inline").unwrap();
        assert_eq!(profile.shells[0].interface, 5.0);
        assert_eq!(profile.shells[0].shape, Some(BlendShape::Power));
        assert_eq!(profile.shells[0].nu, 2.0);
    }

    #[test]
    fn test_sharp_shells_without_interface_columns() {
        let content = "sld,thickness\n6.0,40\n1.5,10\n";
        let profile = parse_shells(content, "sharp", "inline").unwrap();
        assert_eq!(profile.shells[0], Shell::uniform(6.0, 40.0));
        assert_eq!(profile.shells[1].thickness, 10.0);
    }

    #[test]
    fn test_empty_optional_cells() {
        let content = "sld,thickness,interface,shape,nu\n6,40,,,\n1.5,10,5,erf,\n";
        let profile = parse_shells(content, "sparse", "inline").unwrap();
        assert_eq!(profile.shells[0], Shell::uniform(6.0, 40.0));
        assert_eq!(
            profile.shells[1],
            Shell::new(1.5, 10.0, 5.0, BlendShape::Erf, DEFAULT_NU)
        );
    }

    #[test]
    fn test_nan_geometry_is_error() {
        let thickness = "sld,thickness,interface,shape,nu\n2,nan,5,erf,2\n";
        assert!(parse_shells(thickness, "bad", "inline").is_err());
        let interface = "sld,thickness,interface,shape,nu\n2,10,NaN,erf,2\n";
        assert!(parse_shells(interface, "bad", "inline").is_err());
    }

    #[test]
    fn test_missing_shape_with_interface_is_error() {
        let content = "sld,thickness,interface\n6.0,40,5\n";
        assert!(parse_shells(content, "bad", "inline").is_err());
    }

    #[test]
    fn test_out_of_range_code_is_kept_invalid() {
        let content = "sld,thickness,interface,shape,nu\n2,10,5,5,2\n";
        let profile = parse_shells(content, "bad", "inline").unwrap();
        assert_eq!(profile.shells[0].shape, None);
        assert!(profile.has_invalid_shape());
    }

    #[test]
    fn test_unknown_name_is_error() {
        let content = "sld,thickness,interface,shape,nu\n2,10,5,gaussian,2\n";
        let err = parse_shells(content, "bad", "inline").unwrap_err();
        assert!(err.to_string().contains("shell CSV"));
    }

    #[test]
    fn test_negative_thickness_is_error() {
        let content = "sld,thickness,interface,shape,nu\n2,-10,5,erf,2\n";
        assert!(parse_shells(content, "bad", "inline").is_err());
    }

    #[test]
    fn test_empty_is_error() {
        let content = "sld,thickness,interface,shape,nu\n";
        assert!(parse_shells(content, "empty", "inline").is_err());
    }

    #[test]
    fn test_parse_file() {
        let path = std::env::temp_dir().join("spherical_sld_parse_test.csv");
        fs::write(&path, MICELLE).unwrap();
        let profile = parse_shell_file(&path).unwrap();
        assert_eq!(profile.name, "spherical_sld_parse_test");
        assert_eq!(profile.len(), 2);
        fs::remove_file(&path).ok();
    }
}
