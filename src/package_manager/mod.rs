//! 包管理器模块 — 对 apt 的封装

pub mod exec;
pub mod parser;
pub mod types;

// 重新导出常用类型和函数
pub use types::{CommandOutput, FormattedRecord, SearchFilter, StatusFilter};

use anyhow::{Context, Result};
use parser::filter_search;
use std::process::Command;

#[derive(Debug, Clone)]
pub struct PackageManager {
    pub command: String,
    /// 安装 / 卸载时用于提权的前缀命令
    pub elevate: String,
}

impl Default for PackageManager {
    fn default() -> Self {
        Self {
            command: "apt".to_string(),
            elevate: "sudo".to_string(),
        }
    }
}

impl PackageManager {
    /// 运行命令并捕获输出；无法启动时把底层错误原样带上
    fn capture(&self, args: &[&str]) -> Result<CommandOutput> {
        log::debug!("执行: {} {}", self.command, args.join(" "));
        let output = Command::new(&self.command)
            .args(args)
            .output()
            .with_context(|| format!("无法执行 {} {}", self.command, args.join(" ")))?;
        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }

    // ===== 查询 =====

    /// apt search 的原始输出
    pub fn search_raw(&self, term: &str) -> Result<String> {
        let output = self.capture(&["search", term])?;
        if !output.success {
            log::warn!(
                "{} search {} 退出码 {:?}: {}",
                self.command,
                term,
                output.code,
                output.stderr.trim()
            );
        }
        Ok(output.stdout)
    }

    /// 搜索并按条件过滤
    pub fn search(&self, term: &str, filter: &SearchFilter) -> Result<Vec<FormattedRecord>> {
        let raw = self.search_raw(term)?;
        Ok(filter_search(&raw, filter))
    }

    /// 当前已安装的包名 (apt list --installed)
    pub fn installed_packages(&self) -> Result<Vec<String>> {
        let output = self.capture(&["list", "--installed"])?;
        if !output.success {
            anyhow::bail!("{} list --installed 执行失败: {}", self.command, output.stderr.trim());
        }
        Ok(parse_package_list(&output.stdout))
    }
}

/// 解析 apt list 输出，每行取第一个 '/' 之前的包名
pub fn parse_package_list(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.starts_with("Listing..."))
        .filter_map(|line| line.split_once('/').map(|(name, _)| name.to_string()))
        .collect()
}
