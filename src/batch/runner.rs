//! # 批量执行器
//!
//! 并行执行批量处理任务。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代
//! - 进度条显示
//! - 错误收集与汇总报告
//!
//! ## 依赖关系
//! - 被 `commands/intensity.rs`, `commands/profile.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::{Result, SldError};
use crate::utils::{output, progress};

use rayon::prelude::*;
use std::path::PathBuf;

/// 单个文件处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult {
    /// 处理成功
    Success(String),
    /// 跳过（如文件已存在）
    Skipped(String),
    /// 处理失败
    Failed(String, String), // (文件路径, 错误信息)
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 成功数量
    pub success: usize,
    /// 跳过数量
    pub skipped: usize,
    /// 失败数量
    pub failed: usize,
    /// 成功输出 (输入 -> 输出)
    pub outputs: Vec<String>,
    /// 跳过原因
    pub skips: Vec<String>,
    /// 失败详情
    pub failures: Vec<(String, String)>,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Success(msg) => {
                self.success += 1;
                self.outputs.push(msg);
            }
            ProcessResult::Skipped(msg) => {
                self.skipped += 1;
                self.skips.push(msg);
            }
            ProcessResult::Failed(path, err) => {
                self.failed += 1;
                self.failures.push((path, err));
            }
        }
    }
}

/// 汇总中每类消息最多列出的条数
const SUMMARY_LIMIT: usize = 10;

impl BatchResult {
    /// 打印批量处理汇总
    pub fn print_summary(&self) {
        output::print_separator();
        for msg in self.outputs.iter().take(SUMMARY_LIMIT) {
            output::print_info(msg);
        }
        for msg in self.skips.iter().take(SUMMARY_LIMIT) {
            output::print_warning(msg);
        }
        if !self.failures.is_empty() {
            output::print_warning("Failed files:");
            for (path, err) in self.failures.iter().take(SUMMARY_LIMIT) {
                output::print_error(&format!("  {}: {}", path, err));
            }
        }

        let hidden = self.outputs.len().saturating_sub(SUMMARY_LIMIT)
            + self.skips.len().saturating_sub(SUMMARY_LIMIT)
            + self.failures.len().saturating_sub(SUMMARY_LIMIT);
        if hidden > 0 {
            output::print_info(&format!("... and {} more", hidden));
        }

        output::print_success(&format!(
            "Batch complete: {} success, {} skipped, {} failed",
            self.success, self.skipped, self.failed
        ));
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器，0 表示使用全部 CPU
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    /// 构建限定线程数的 rayon 线程池
    pub fn thread_pool(&self) -> Result<rayon::ThreadPool> {
        rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| SldError::Other(format!("Failed to build thread pool: {}", e)))
    }

    /// 并行处理文件列表
    pub fn run<F>(&self, files: Vec<PathBuf>, processor: F) -> Result<BatchResult>
    where
        F: Fn(&PathBuf) -> ProcessResult + Sync + Send,
    {
        let pb = progress::create_progress_bar(files.len() as u64, "Processing");
        let pool = self.thread_pool()?;

        let results: Vec<ProcessResult> = pool.install(|| {
            files
                .par_iter()
                .map(|file| {
                    let result = processor(file);
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result);
        }

        Ok(batch_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_result_merge() {
        let mut result = BatchResult::default();
        result.merge(ProcessResult::Success("a".to_string()));
        result.merge(ProcessResult::Skipped("b".to_string()));
        result.merge(ProcessResult::Failed("c".to_string(), "boom".to_string()));
        assert_eq!((result.success, result.skipped, result.failed), (1, 1, 1));
        assert_eq!(result.outputs, vec!["a".to_string()]);
        assert_eq!(result.skips, vec!["b".to_string()]);
        assert_eq!(result.failures, vec![("c".to_string(), "boom".to_string())]);
    }

    #[test]
    fn test_run_counts_every_file() {
        let files: Vec<PathBuf> = (0..8).map(|i| PathBuf::from(format!("{}.csv", i))).collect();
        let runner = BatchRunner::new(2);
        let result = runner
            .run(files, |f| {
                if f.to_string_lossy().starts_with('3') {
                    ProcessResult::Failed(f.display().to_string(), "bad".to_string())
                } else {
                    ProcessResult::Success(f.display().to_string())
                }
            })
            .unwrap();
        assert_eq!(result.success, 7);
        assert_eq!(result.failed, 1);
        assert_eq!(result.outputs.len(), 7);
        assert!(!result.outputs.contains(&"3.csv".to_string()));
    }
}
