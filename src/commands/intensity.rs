//! # intensity 子命令实现
//!
//! 由壳层剖面文件计算 I(q) 曲线。
//!
//! ## 功能
//! - 支持单文件和批量目录处理
//! - 按 q 并行计算（rayon），内核本身保持单 q、无状态
//! - 可选 scale · I / V + background 归一化
//! - 输出图像 (PNG/SVG) 或数据文件 (CSV/XY)
//!
//! ## 依赖关系
//! - 使用 `cli/intensity.rs` 定义的 IntensityArgs
//! - 使用 `batch/` 模块进行批量处理
//! - 使用 `sas/` 模块进行计算
//! - 使用 `parsers/` 读取壳层剖面

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::common::{OutputFormat, PlotArgs};
use crate::cli::intensity::IntensityArgs;
use crate::commands::profile::print_shell_table;
use crate::error::{Result, SldError};
use crate::models::{IntensityCurve, ShellProfile};
use crate::parsers;
use crate::sas::plot::PlotOptions;
use crate::sas::{self, IntensityIntegrator};
use crate::utils::output;

use rayon::prelude::*;
use std::fs;
use std::path::Path;

/// 曲线计算配置
struct CurveConfig {
    q_values: Vec<f64>,
    integrator: IntensityIntegrator,
    normalize: bool,
    scale: f64,
    background: f64,
}

/// 执行 intensity 命令
pub fn execute(args: IntensityArgs) -> Result<()> {
    output::print_header("Small-Angle Scattering Intensity");

    if args.input.is_file() {
        execute_single_file(&args)
    } else if args.input.is_dir() {
        execute_batch(&args)
    } else {
        Err(SldError::FileNotFound {
            path: args.input.display().to_string(),
        })
    }
}

fn curve_config(args: &IntensityArgs) -> Result<CurveConfig> {
    let q_values = if args.q.is_empty() {
        let (q_min, q_max) = parse_q_range(&args.q_range, !args.linear)?;
        build_q_grid(q_min, q_max, args.points, args.linear)?
    } else {
        validate_q_values(&args.q)?
    };

    Ok(CurveConfig {
        q_values,
        integrator: IntensityIntegrator::new(args.model.sld_solvent, args.model.steps),
        normalize: args.normalize,
        scale: args.scale,
        background: args.background,
    })
}

/// 单文件模式
fn execute_single_file(args: &IntensityArgs) -> Result<()> {
    output::print_info(&format!("Single file mode: '{}'", args.input.display()));

    let config = curve_config(args)?;
    let profile = parsers::parse_profile_file(&args.input)?;

    output::print_success(&format!(
        "Loaded profile: {} ({} shells)",
        profile.name,
        profile.len()
    ));
    print_shell_table(&profile);

    output::print_info(&format!(
        "{} q points, {} interface steps, solvent SLD {:.4}",
        config.q_values.len(),
        config.integrator.n_steps(),
        config.integrator.sld_solvent()
    ));

    let pool = BatchRunner::new(args.batch.jobs).thread_pool()?;
    let curve = pool.install(|| compute_curve(&profile, &config));

    report_nan(&curve);

    let format = args
        .format
        .unwrap_or_else(|| OutputFormat::from_extension(&args.output));
    write_curve(&curve, &args.output, format, &args.plot)?;

    print_curve_table(&curve, 10);
    output::print_saved(&format!("I(q), {} points", curve.points.len()), &args.output);
    Ok(())
}

/// 批量处理模式
fn execute_batch(args: &IntensityArgs) -> Result<()> {
    output::print_info(&format!("Batch mode: directory '{}'", args.input.display()));

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.batch.pattern)
        .recursive(args.batch.recursive)
        .collect();

    if files.is_empty() {
        output::print_warning(&format!(
            "No matching files found with pattern '{}'",
            args.batch.pattern
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} profile files", files.len()));

    fs::create_dir_all(&args.output).map_err(|e| SldError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    let config = curve_config(args)?;
    let format = args.format.unwrap_or(OutputFormat::Png);
    output::print_info(&format!("Output format: {:?}", format));

    let runner = BatchRunner::new(args.batch.jobs);
    let result = runner.run(files, |file| {
        let output_file = args
            .output
            .join(format!("{}_iq.{}", file_stem(file), format.extension()));

        if output_file.exists() && !args.batch.overwrite {
            return ProcessResult::Skipped(format!(
                "Output exists, skipping: {}",
                output_file.display()
            ));
        }

        match process_file(file, &output_file, &config, format, &args.plot) {
            Ok(curve) if curve.nan_count() > 0 => ProcessResult::Failed(
                file.display().to_string(),
                format!("{} NaN intensities (invalid blend shape)", curve.nan_count()),
            ),
            Ok(_) => {
                ProcessResult::Success(format!("{} -> {}", file.display(), output_file.display()))
            }
            Err(e) => ProcessResult::Failed(file.display().to_string(), e.to_string()),
        }
    })?;

    result.print_summary();
    Ok(())
}

/// 处理批量模式中的单个文件
fn process_file(
    input: &Path,
    output_file: &Path,
    config: &CurveConfig,
    format: OutputFormat,
    plot: &PlotArgs,
) -> Result<IntensityCurve> {
    let profile = parsers::parse_profile_file(input)?;
    let curve = compute_curve(&profile, config);
    write_curve(&curve, output_file, format, plot)?;
    Ok(curve)
}

/// 按 q 并行计算整条曲线
fn compute_curve(profile: &ShellProfile, config: &CurveConfig) -> IntensityCurve {
    let shells = profile.shells.as_slice();
    let integrator = &config.integrator;

    let points: Vec<(f64, f64)> = config
        .q_values
        .par_iter()
        .map(|&q| {
            let intensity = if config.normalize {
                integrator.scaled_intensity(q, shells, config.scale, config.background)
            } else {
                integrator.intensity(q, shells)
            };
            (q, intensity)
        })
        .collect();

    IntensityCurve {
        name: profile.name.clone(),
        points,
        volume: sas::form_volume(shells),
        sld_solvent: integrator.sld_solvent(),
    }
}

/// 按格式写出曲线
fn write_curve(
    curve: &IntensityCurve,
    output_file: &Path,
    format: OutputFormat,
    plot: &PlotArgs,
) -> Result<()> {
    match format {
        OutputFormat::Png | OutputFormat::Svg => {
            let options = PlotOptions {
                title: plot.title.clone().unwrap_or_else(|| curve.name.clone()),
                width: plot.width,
                height: plot.height,
                use_svg: format == OutputFormat::Svg,
            };
            sas::plot::generate_curve_plot(curve, output_file, &options)
        }
        OutputFormat::Csv => sas::export::curve_to_csv(curve, output_file),
        OutputFormat::Xy => sas::export::curve_to_xy(curve, output_file),
    }
}

fn report_nan(curve: &IntensityCurve) {
    let nan = curve.nan_count();
    if nan > 0 {
        output::print_warning(&format!(
            "{} of {} intensities are NaN: the profile contains an invalid blend shape",
            nan,
            curve.points.len()
        ));
    }
}

fn file_stem(path: &Path) -> &str {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
}

/// 解析 q 范围 "min:max"
fn parse_q_range(range: &str, logarithmic: bool) -> Result<(f64, f64)> {
    let (min, max) = range
        .split_once(':')
        .ok_or_else(|| SldError::InvalidRange(range.to_string()))?;

    let min: f64 = min
        .trim()
        .parse()
        .map_err(|_| SldError::InvalidRange(range.to_string()))?;
    let max: f64 = max
        .trim()
        .parse()
        .map_err(|_| SldError::InvalidRange(range.to_string()))?;

    if !min.is_finite() || !max.is_finite() || min < 0.0 || max <= min {
        return Err(SldError::InvalidRange(format!(
            "{} (must be 0 <= min < max)",
            range
        )));
    }

    if logarithmic && min == 0.0 {
        return Err(SldError::InvalidRange(format!(
            "{} (logarithmic spacing needs min > 0, or use --linear)",
            range
        )));
    }

    Ok((min, max))
}

/// 生成 q 网格
fn build_q_grid(q_min: f64, q_max: f64, points: usize, linear: bool) -> Result<Vec<f64>> {
    if points == 0 {
        return Err(SldError::InvalidArgument(
            "--points must be at least 1".to_string(),
        ));
    }
    if points == 1 {
        return Ok(vec![q_min]);
    }

    let last = (points - 1) as f64;
    let grid = if linear {
        (0..points)
            .map(|i| q_min + (q_max - q_min) * i as f64 / last)
            .collect()
    } else {
        let (log_min, log_max) = (q_min.ln(), q_max.ln());
        (0..points)
            .map(|i| (log_min + (log_max - log_min) * i as f64 / last).exp())
            .collect()
    };
    Ok(grid)
}

fn validate_q_values(values: &[f64]) -> Result<Vec<f64>> {
    if let Some(bad) = values.iter().find(|q| !q.is_finite() || **q < 0.0) {
        return Err(SldError::InvalidArgument(format!(
            "q must be a finite non-negative number, got {}",
            bad
        )));
    }
    Ok(values.to_vec())
}

/// 打印曲线摘要表格（均匀抽样）
fn print_curve_table(curve: &IntensityCurve, count: usize) {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct CurveRow {
        #[tabled(rename = "q (1/Å)")]
        q: String,
        #[tabled(rename = "I(q)")]
        intensity: String,
    }

    let stride = (curve.points.len() / count.max(1)).max(1);
    let rows: Vec<CurveRow> = curve
        .points
        .iter()
        .step_by(stride)
        .take(count)
        .map(|(q, i)| CurveRow {
            q: format!("{:.5}", q),
            intensity: format!("{:.6e}", i),
        })
        .collect();

    if !rows.is_empty() {
        output::print_header(&format!("I(q) sample ({} of {} points)", rows.len(), curve.points.len()));
        println!("{}", Table::new(&rows));
        output::print_info(&format!("Particle volume: {:.6e} Å³", curve.volume));
    }
}
