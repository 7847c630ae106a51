//! 子命令分发

use anyhow::{Context, Result};
use std::io::{self, Write};

use crate::cli::{Cli, Command, InstallArgs, LogArgs, SearchArgs};
use crate::config::Config;
use crate::install_log::InstallLog;
use crate::output::{print_records, Styler};
use crate::package_manager::exec::Operation;
use crate::package_manager::{FormattedRecord, PackageManager, SearchFilter};

/// 执行子命令，返回进程退出码
pub fn dispatch(cli: Cli, config: &Config) -> Result<i32> {
    let pm = PackageManager::default();
    match cli.command {
        Command::Search(args) => search(&pm, &args, config),
        Command::Install(args) => install(&pm, &args, config),
        Command::Log(args) => show_log(&pm, &args, config),
    }
}

fn search(pm: &PackageManager, args: &SearchArgs, config: &Config) -> Result<i32> {
    // 先校验配置，再执行搜索
    let predicate = config.status_predicate()?;
    let filter =
        SearchFilter::new(args.status_filter(), args.exact_target()).with_predicate(predicate);

    let records = pm.search(&args.term, &filter)?;
    let styler = Styler::detect(config.color);
    write_results(&mut io::stdout().lock(), &records, styler)?;
    Ok(0)
}

/// 下游提前关闭管道（如 `| head`）视为正常结束
fn write_results(out: &mut impl Write, records: &[FormattedRecord], styler: Styler) -> Result<()> {
    match print_records(out, records, styler) {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
            log::debug!("输出管道已关闭");
            Ok(())
        }
        other => other.context("写出搜索结果失败"),
    }
}

fn install(pm: &PackageManager, args: &InstallArgs, config: &Config) -> Result<i32> {
    let op = args.operation();
    let status = pm.run_operation(op, &args.packages)?;
    if !status.success() {
        log::warn!("{}失败，安装记录未更新", op.label());
        return Ok(status.code().unwrap_or(1));
    }

    let log = InstallLog::new(config.install_log.clone());
    match op {
        Operation::Install => log.append(&args.packages)?,
        Operation::Remove | Operation::Purge => {
            log.prune(&args.packages)?;
        }
    }
    Ok(0)
}

fn show_log(pm: &PackageManager, args: &LogArgs, config: &Config) -> Result<i32> {
    let log = InstallLog::new(config.install_log.clone());
    if args.sync {
        let installed = pm.installed_packages()?;
        let removed = log.sync(&installed)?;
        println!("已清理 {} 条过期记录", removed);
    }

    let entries = log.entries()?;
    if entries.is_empty() {
        println!("安装记录为空: {}", log.path().display());
        return Ok(0);
    }
    for entry in entries {
        println!("{}  {}", entry.timestamp, entry.package);
    }
    Ok(0)
}
