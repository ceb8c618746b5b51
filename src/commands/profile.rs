//! # profile 子命令实现
//!
//! 由壳层剖面文件计算径向 SLD 分布，并报告体积与外半径。
//!
//! ## 依赖关系
//! - 使用 `cli/profile.rs` 定义的 ProfileArgs
//! - 使用 `sas/profile.rs`, `sas/volume.rs`
//! - 使用 `batch/` 模块进行批量处理

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::common::{OutputFormat, PlotArgs};
use crate::cli::profile::ProfileArgs;
use crate::error::{Result, SldError};
use crate::models::{ShellProfile, SldProfile};
use crate::parsers;
use crate::sas::{self, plot::PlotOptions, profile::sld_profile};
use crate::utils::output;

use std::fs;
use std::path::Path;
use tabled::{Table, Tabled};

/// 执行 profile 命令
pub fn execute(args: ProfileArgs) -> Result<()> {
    output::print_header("Radial SLD Profile");

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

fn execute_single_file(args: &ProfileArgs) -> Result<()> {
    let shells = parsers::parse_profile_file(&args.input)?;
    output::print_success(&format!(
        "Loaded profile: {} ({} shells)",
        shells.name,
        shells.len()
    ));
    print_shell_table(&shells);

    let profile = sld_profile(
        &shells.name,
        &shells.shells,
        args.model.sld_solvent,
        args.model.steps,
    );

    if shells.has_invalid_shape() {
        output::print_warning("Profile contains an invalid blend shape; affected points are NaN");
    }

    let format = args
        .format
        .unwrap_or_else(|| OutputFormat::from_extension(&args.output));
    write_profile(&profile, &args.output, format, &args.plot)?;

    output::print_saved(
        &format!("SLD profile, {} points", profile.points.len()),
        &args.output,
    );
    Ok(())
}

fn execute_batch(args: &ProfileArgs) -> Result<()> {
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

    fs::create_dir_all(&args.output).map_err(|e| SldError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    let format = args.format.unwrap_or(OutputFormat::Png);
    let runner = BatchRunner::new(args.batch.jobs);
    let result = runner.run(files, |file| {
        let stem = file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        let output_file = args
            .output
            .join(format!("{}_sld.{}", stem, format.extension()));

        if output_file.exists() && !args.batch.overwrite {
            return ProcessResult::Skipped(format!(
                "Output exists, skipping: {}",
                output_file.display()
            ));
        }

        let processed = parsers::parse_profile_file(file).and_then(|shells| {
            let profile = sld_profile(
                &shells.name,
                &shells.shells,
                args.model.sld_solvent,
                args.model.steps,
            );
            write_profile(&profile, &output_file, format, &args.plot)
        });

        match processed {
            Ok(_) => {
                ProcessResult::Success(format!("{} -> {}", file.display(), output_file.display()))
            }
            Err(e) => ProcessResult::Failed(file.display().to_string(), e.to_string()),
        }
    })?;

    result.print_summary();
    Ok(())
}

fn write_profile(
    profile: &SldProfile,
    output_file: &Path,
    format: OutputFormat,
    plot: &PlotArgs,
) -> Result<()> {
    match format {
        OutputFormat::Png | OutputFormat::Svg => {
            let options = PlotOptions {
                title: plot
                    .title
                    .clone()
                    .unwrap_or_else(|| format!("{} SLD profile", profile.name)),
                width: plot.width,
                height: plot.height,
                use_svg: format == OutputFormat::Svg,
            };
            sas::plot::generate_profile_plot(profile, output_file, &options)
        }
        OutputFormat::Csv => sas::export::profile_to_csv(profile, output_file),
        OutputFormat::Xy => sas::export::profile_to_xy(profile, output_file),
    }
}

/// 壳层表格行
#[derive(Debug, Clone, Tabled)]
struct ShellRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "SLD")]
    sld: String,
    #[tabled(rename = "Thickness (Å)")]
    thickness: String,
    #[tabled(rename = "Interface (Å)")]
    interface: String,
    #[tabled(rename = "Shape")]
    shape: String,
    #[tabled(rename = "ν")]
    nu: String,
}

fn shell_rows(profile: &ShellProfile) -> Vec<ShellRow> {
    profile
        .shells
        .iter()
        .enumerate()
        .map(|(index, shell)| ShellRow {
            index,
            sld: format!("{:.4}", shell.sld),
            thickness: format!("{:.2}", shell.thickness),
            interface: format!("{:.2}", shell.interface),
            shape: shell
                .shape
                .map_or_else(|| "invalid".to_string(), |s| format!("{} ({})", s, s.code())),
            nu: format!("{:.3}", shell.nu),
        })
        .collect()
}

/// 打印壳层表格与几何摘要
pub fn print_shell_table(profile: &ShellProfile) {
    if profile.is_empty() {
        return;
    }
    let rows = shell_rows(profile);

    output::print_header(&format!("Shells of '{}'", profile.name));
    println!("{}", Table::new(&rows));
    output::print_info(&format!(
        "Outer radius: {:.3} Å, volume: {:.6e} Å³",
        sas::outer_radius(&profile.shells),
        sas::form_volume(&profile.shells)
    ));
}
