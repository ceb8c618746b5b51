//! # 图表生成
//!
//! 使用 `plotters` 库生成 I(q) 曲线与 SLD 剖面图。
//!
//! ## 功能
//! - I(q) 默认为双对数坐标，NaN 与非正值点不参与绘制
//! - SLD 剖面为线性坐标折线
//! - 支持 PNG 和 SVG 输出
//!
//! ## 依赖关系
//! - 被 `commands/intensity.rs`, `commands/profile.rs` 调用
//! - 使用 `models/curve.rs` 的 IntensityCurve, SldProfile
//! - 使用 `plotters` 渲染图表

use crate::error::{Result, SldError};
use crate::models::{IntensityCurve, SldProfile};

use plotters::prelude::*;
use std::path::Path;

/// 图像尺寸与标题
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub use_svg: bool,
}

fn plot_error<E: std::fmt::Debug>(e: E) -> SldError {
    SldError::PlotError(format!("{:?}", e))
}

/// 生成 I(q) 图表
pub fn generate_curve_plot(
    curve: &IntensityCurve,
    output_path: &Path,
    options: &PlotOptions,
) -> Result<()> {
    let points = curve.positive_points();
    if points.len() < 2 {
        return Err(SldError::PlotError(format!(
            "'{}' has fewer than two finite positive points to plot",
            curve.name
        )));
    }

    if options.use_svg {
        let root = SVGBackend::new(output_path, (options.width, options.height)).into_drawing_area();
        draw_curve_chart(&root, &points, &options.title)?;
        root.present().map_err(plot_error)?;
    } else {
        let root =
            BitMapBackend::new(output_path, (options.width, options.height)).into_drawing_area();
        draw_curve_chart(&root, &points, &options.title)?;
        root.present().map_err(plot_error)?;
    }
    Ok(())
}

/// 生成 SLD 剖面图表
pub fn generate_profile_plot(
    profile: &SldProfile,
    output_path: &Path,
    options: &PlotOptions,
) -> Result<()> {
    let points: Vec<(f64, f64)> = profile
        .points
        .iter()
        .copied()
        .filter(|(r, sld)| r.is_finite() && sld.is_finite())
        .collect();
    if points.len() < 2 {
        return Err(SldError::PlotError(format!(
            "'{}' has fewer than two finite points to plot",
            profile.name
        )));
    }

    if options.use_svg {
        let root = SVGBackend::new(output_path, (options.width, options.height)).into_drawing_area();
        draw_profile_chart(&root, &points, &options.title)?;
        root.present().map_err(plot_error)?;
    } else {
        let root =
            BitMapBackend::new(output_path, (options.width, options.height)).into_drawing_area();
        draw_profile_chart(&root, &points, &options.title)?;
        root.present().map_err(plot_error)?;
    }
    Ok(())
}

/// 绘制双对数 I(q) 曲线
fn draw_curve_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    points: &[(f64, f64)],
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_error)?;

    let (q_min, q_max) = bounds(points.iter().map(|(q, _)| *q));
    let (i_min, i_max) = bounds(points.iter().map(|(_, i)| *i));

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(
            (q_min..q_max).log_scale(),
            (i_min * 0.5..i_max * 2.0).log_scale(),
        )
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc("q (1/Å)")
        .y_desc("I(q)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .y_label_formatter(&|v| format!("{:.0e}", v))
        .draw()
        .map_err(plot_error)?;

    let line_color = RGBColor(0, 102, 204);
    chart
        .draw_series(LineSeries::new(
            points.iter().copied(),
            line_color.stroke_width(2),
        ))
        .map_err(plot_error)?;

    Ok(())
}

/// 绘制 SLD 剖面
fn draw_profile_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    points: &[(f64, f64)],
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(plot_error)?;

    let (r_min, r_max) = bounds(points.iter().map(|(r, _)| *r));
    let (sld_min, sld_max) = bounds(points.iter().map(|(_, sld)| *sld));
    let pad = ((sld_max - sld_min) * 0.1).max(0.1);

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(r_min..r_max.max(r_min + 1.0), sld_min - pad..sld_max + pad)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc("r (Å)")
        .y_desc("SLD (1e-6/Å²)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(plot_error)?;

    let line_color = RGBColor(204, 51, 0);
    chart
        .draw_series(LineSeries::new(
            points.iter().copied(),
            line_color.stroke_width(2),
        ))
        .map_err(plot_error)?;

    let fill_color = RGBColor(204, 51, 0).mix(0.15);
    chart
        .draw_series(AreaSeries::new(
            points.iter().copied(),
            sld_min - pad,
            fill_color,
        ))
        .map_err(plot_error)?;

    Ok(())
}

/// 取最小值与最大值
fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert_eq!(bounds([3.0, -1.0, 2.5].into_iter()), (-1.0, 3.0));
    }

    #[test]
    fn test_curve_plot_rejects_empty_curve() {
        let curve = IntensityCurve {
            name: "nan".to_string(),
            points: vec![(0.01, f64::NAN), (0.02, f64::NAN)],
            volume: 1.0,
            sld_solvent: 0.0,
        };
        let options = PlotOptions {
            title: "nan".to_string(),
            width: 400,
            height: 300,
            use_svg: true,
        };
        let path = std::env::temp_dir().join("spherical_sld_nan_plot.svg");
        assert!(generate_curve_plot(&curve, &path, &options).is_err());
    }
}
