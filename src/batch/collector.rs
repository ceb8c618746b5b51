//! # 文件收集器
//!
//! 根据输入路径和模式收集待处理的壳层剖面文件。
//!
//! ## 功能
//! - 支持单文件和目录输入
//! - glob 模式匹配（逗号分隔多模式）
//! - 递归目录搜索
//!
//! ## 依赖关系
//! - 被 `commands/intensity.rs`, `commands/profile.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    /// 输入路径
    input: PathBuf,
    /// 匹配模式列表
    patterns: Vec<Pattern>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    /// 创建新的文件收集器
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            patterns: Vec::new(),
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式），非法模式被忽略
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.patterns = pattern
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| Pattern::new(s).ok())
            .collect();
        self
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件（按路径排序）
    pub fn collect(&self) -> Vec<PathBuf> {
        if self.input.is_file() {
            return vec![self.input.clone()];
        }

        if !self.input.is_dir() {
            return vec![];
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let mut files: Vec<PathBuf> = WalkDir::new(&self.input)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|entry| self.matches_patterns(entry.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        files
    }

    /// 检查文件是否匹配任一模式；未设置模式时全部匹配
    fn matches_patterns(&self, path: &Path) -> bool {
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };

        self.patterns.is_empty() || self.patterns.iter().any(|p| p.matches(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_pattern_match() {
        let collector = FileCollector::new(PathBuf::from(".")).with_pattern("*.csv, shell?.txt");
        assert!(collector.matches_patterns(Path::new("dir/micelle.csv")));
        assert!(collector.matches_patterns(Path::new("shell1.txt")));
        assert!(!collector.matches_patterns(Path::new("shell12.txt")));
        assert!(!collector.matches_patterns(Path::new("profile.xy")));
    }

    #[test]
    fn test_collect_directory() {
        let dir = std::env::temp_dir().join("spherical_sld_collector_test");
        let nested = dir.join("nested");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.join("a.csv"), "").unwrap();
        fs::write(dir.join("b.png"), "").unwrap();
        fs::write(nested.join("c.csv"), "").unwrap();

        let flat = FileCollector::new(dir.clone()).with_pattern("*.csv").collect();
        assert_eq!(flat, vec![dir.join("a.csv")]);

        let deep = FileCollector::new(dir.clone())
            .with_pattern("*.csv")
            .recursive(true)
            .collect();
        assert_eq!(deep.len(), 2);

        fs::remove_dir_all(&dir).ok();
    }
}
