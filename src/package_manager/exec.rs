//! 安装 / 卸载命令执行（默认 sudo apt ...）

use super::PackageManager;
use anyhow::{Context, Result};
use std::process::{Command, ExitStatus};

/// 包操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Install,
    Remove,
    Purge,
}

impl Operation {
    /// 由命令行开关决定；同时给出 remove 和 purge 时按 purge 处理
    pub fn from_flags(remove: bool, purge: bool) -> Self {
        if purge {
            Operation::Purge
        } else if remove {
            Operation::Remove
        } else {
            Operation::Install
        }
    }

    fn apt_args(self) -> &'static [&'static str] {
        match self {
            Operation::Install => &["install"],
            Operation::Remove => &["remove"],
            Operation::Purge => &["remove", "--purge"],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Operation::Install => "安装",
            Operation::Remove => "卸载",
            Operation::Purge => "彻底卸载",
        }
    }
}

impl PackageManager {
    /// 提权命令之后的完整参数列表
    pub fn operation_args(&self, op: Operation, packages: &[String]) -> Vec<String> {
        let mut args = vec![self.command.clone()];
        args.extend(op.apt_args().iter().map(|s| s.to_string()));
        args.extend(packages.iter().cloned());
        args
    }

    /// 经提权命令运行 apt，继承终端以便 apt 交互确认
    pub fn run_operation(&self, op: Operation, packages: &[String]) -> Result<ExitStatus> {
        let args = self.operation_args(op, packages);
        log::info!("{}: {} {}", op.label(), self.elevate, args.join(" "));
        let status = Command::new(&self.elevate)
            .args(&args)
            .status()
            .with_context(|| format!("无法执行 {} {}", self.elevate, args.join(" ")))?;
        log::debug!("{} 退出状态: {:?}", op.label(), status.code());
        Ok(status)
    }
}
