//! # 多壳层颗粒数据模型
//!
//! 球对称多壳层颗粒的逐壳层描述。壳层 0 为内核，索引顺序即径向顺序。
//!
//! ## 依赖关系
//! - 被 `parsers/shells.rs` 构造
//! - 被 `sas/` 内核只读借用
//! - 无外部模块依赖

use crate::error::{Result, SldError};

use std::fmt;
use std::str::FromStr;

/// 锐度下限，避免 ν → 0 时的除零
pub const NU_FLOOR: f64 = 1e-14;

/// 未给出时的默认锐度
pub const DEFAULT_NU: f64 = 2.5;

/// 界面混合形状
///
/// 描述相邻壳层之间 SLD 如何从内侧值过渡到外侧值。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendShape {
    /// 误差函数型对称 S 曲线
    Erf,
    /// z^ν
    Power,
    /// 1 - (1-z)^ν
    ReversePower,
    /// expm1(-νz) / expm1(-ν)
    ExpDecay,
    /// expm1(νz) / expm1(ν)
    ExpGrowth,
}

impl BlendShape {
    /// 全部形状，按数值代码排列
    pub const ALL: [BlendShape; 5] = [
        BlendShape::Erf,
        BlendShape::Power,
        BlendShape::ReversePower,
        BlendShape::ExpDecay,
        BlendShape::ExpGrowth,
    ];

    /// 由数值代码取形状（向零截断），超出 0..=4 返回 `None`
    pub fn from_code(code: f64) -> Option<Self> {
        if !code.is_finite() {
            return None;
        }
        match code.trunc() as i64 {
            0 => Some(BlendShape::Erf),
            1 => Some(BlendShape::Power),
            2 => Some(BlendShape::ReversePower),
            3 => Some(BlendShape::ExpDecay),
            4 => Some(BlendShape::ExpGrowth),
            _ => None,
        }
    }

    /// 数值代码
    pub fn code(self) -> u8 {
        match self {
            BlendShape::Erf => 0,
            BlendShape::Power => 1,
            BlendShape::ReversePower => 2,
            BlendShape::ExpDecay => 3,
            BlendShape::ExpGrowth => 4,
        }
    }
}

impl fmt::Display for BlendShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlendShape::Erf => write!(f, "erf"),
            BlendShape::Power => write!(f, "power"),
            BlendShape::ReversePower => write!(f, "reverse-power"),
            BlendShape::ExpDecay => write!(f, "exp-decay"),
            BlendShape::ExpGrowth => write!(f, "exp-growth"),
        }
    }
}

impl FromStr for BlendShape {
    type Err = SldError;

    /// 按名称解析，兼容旧版标签 (rpower / lpower / rexp / lexp，与代码 1..=4 对应)
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "erf" => Ok(BlendShape::Erf),
            "power" | "rpower" => Ok(BlendShape::Power),
            "reverse-power" | "lpower" => Ok(BlendShape::ReversePower),
            "exp-decay" | "rexp" => Ok(BlendShape::ExpDecay),
            "exp-growth" | "lexp" => Ok(BlendShape::ExpGrowth),
            other => Err(SldError::UnknownBlendShape(other.to_string())),
        }
    }
}

/// 单个壳层：均匀部分 + 其后的渐变界面
#[derive(Debug, Clone, PartialEq)]
pub struct Shell {
    /// 均匀部分的 SLD
    pub sld: f64,
    /// 均匀部分厚度 (Å)
    pub thickness: f64,
    /// 其后界面宽度 (Å)
    pub interface: f64,
    /// 界面混合形状，`None` 表示无法识别的代码
    pub shape: Option<BlendShape>,
    /// 混合锐度 ν
    pub nu: f64,
}

impl Shell {
    /// 创建新壳层
    pub fn new(sld: f64, thickness: f64, interface: f64, shape: BlendShape, nu: f64) -> Self {
        Shell {
            sld,
            thickness,
            interface,
            shape: Some(shape),
            nu,
        }
    }

    /// 没有界面的均匀壳层
    pub fn uniform(sld: f64, thickness: f64) -> Self {
        Shell::new(sld, thickness, 0.0, BlendShape::Erf, DEFAULT_NU)
    }

    /// 截断到下限后的锐度 max(|ν|, 1e-14)
    pub fn effective_nu(&self) -> f64 {
        self.nu.abs().max(NU_FLOOR)
    }

    /// 壳层总径向宽度
    pub fn extent(&self) -> f64 {
        self.thickness + self.interface
    }
}

/// 壳层序列
#[derive(Debug, Clone)]
pub struct ShellProfile {
    /// 名称（通常取自输入文件名）
    pub name: String,
    /// 由内向外排列的壳层
    pub shells: Vec<Shell>,
}

impl ShellProfile {
    pub fn new(name: impl Into<String>, shells: Vec<Shell>) -> Self {
        ShellProfile {
            name: name.into(),
            shells,
        }
    }

    /// 壳层数
    pub fn len(&self) -> usize {
        self.shells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shells.is_empty()
    }

    /// 是否存在无法识别的混合形状
    pub fn has_invalid_shape(&self) -> bool {
        self.shells.iter().any(|s| s.shape.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_truncates() {
        assert_eq!(BlendShape::from_code(0.0), Some(BlendShape::Erf));
        assert_eq!(BlendShape::from_code(1.9), Some(BlendShape::Power));
        assert_eq!(BlendShape::from_code(4.0), Some(BlendShape::ExpGrowth));
        assert_eq!(BlendShape::from_code(5.0), None);
        assert_eq!(BlendShape::from_code(-1.0), None);
        assert_eq!(BlendShape::from_code(f64::NAN), None);
    }

    #[test]
    fn test_code_roundtrip() {
        for shape in BlendShape::ALL {
            assert_eq!(BlendShape::from_code(shape.code() as f64), Some(shape));
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("erf".parse::<BlendShape>().unwrap(), BlendShape::Erf);
        assert_eq!("Power".parse::<BlendShape>().unwrap(), BlendShape::Power);
        assert_eq!("rpower".parse::<BlendShape>().unwrap(), BlendShape::Power);
        assert_eq!(
            "lpower".parse::<BlendShape>().unwrap(),
            BlendShape::ReversePower
        );
        assert_eq!("rexp".parse::<BlendShape>().unwrap(), BlendShape::ExpDecay);
        assert_eq!(
            "exp-growth".parse::<BlendShape>().unwrap(),
            BlendShape::ExpGrowth
        );
        assert!("gaussian".parse::<BlendShape>().is_err());
    }

    #[test]
    fn test_effective_nu_floor() {
        let mut shell = Shell::uniform(1.0, 10.0);
        shell.nu = 0.0;
        assert_eq!(shell.effective_nu(), NU_FLOOR);
        shell.nu = -3.0;
        assert_eq!(shell.effective_nu(), 3.0);
    }
}
