use clap::{Args, Parser, Subcommand};

use crate::package_manager::exec::Operation;
use crate::package_manager::StatusFilter;

#[derive(Debug, Parser)]
#[command(name = "adapt")]
#[command(about = "apt search / install / remove 的增强前端", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 搜索软件包，可按安装状态或包名过滤
    Search(SearchArgs),

    /// 安装或卸载软件包，并更新安装记录
    Install(InstallArgs),

    /// 查看安装记录
    Log(LogArgs),
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// 搜索词
    pub term: String,

    /// 只显示已安装的包
    #[arg(short, long, conflicts_with = "not_installed")]
    pub installed: bool,

    /// 只显示未安装的包
    #[arg(short, long = "not-installed")]
    pub not_installed: bool,

    /// 包名必须与搜索词完全一致
    #[arg(short, long)]
    pub exact: bool,
}

impl SearchArgs {
    pub fn status_filter(&self) -> StatusFilter {
        match (self.installed, self.not_installed) {
            (true, _) => StatusFilter::Installed,
            (false, true) => StatusFilter::NotInstalled,
            (false, false) => StatusFilter::Any,
        }
    }

    pub fn exact_target(&self) -> Option<String> {
        self.exact.then(|| self.term.clone())
    }
}

#[derive(Debug, Args)]
pub struct InstallArgs {
    /// 要安装（或卸载）的包
    #[arg(required = true)]
    pub packages: Vec<String>,

    /// 卸载
    #[arg(short, long)]
    pub remove: bool,

    /// 卸载并清除配置
    #[arg(short, long)]
    pub purge: bool,
}

impl InstallArgs {
    pub fn operation(&self) -> Operation {
        Operation::from_flags(self.remove, self.purge)
    }
}

#[derive(Debug, Args)]
pub struct LogArgs {
    /// 先删除已不再安装的包的记录
    #[arg(long)]
    pub sync: bool,
}
