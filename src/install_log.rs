use anyhow::{Context, Result};
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// 记录用户安装过的包，每行 `<时间>,<包名>`
pub struct InstallLog {
    path: PathBuf,
}

/// 日志中的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: String,
    pub package: String,
}

impl InstallLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 追加一批包，共用同一个时间戳
    pub fn append(&self, packages: &[String]) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let now = Local::now().to_rfc3339();
        let text: String = packages
            .iter()
            .map(|pkg| format!("{},{}\n", now, pkg))
            .collect();

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("无法打开安装记录 {}", self.path.display()))?;
        file.write_all(text.as_bytes())?;
        log::info!("已记录 {} 个包到 {}", packages.len(), self.path.display());
        Ok(())
    }

    /// 删除这些包的所有记录；文件不存在时什么也不做
    pub fn prune(&self, packages: &[String]) -> Result<usize> {
        self.retain(|pkg| !packages.iter().any(|p| p == pkg))
    }

    /// 只保留仍然处于安装状态的包
    pub fn sync(&self, installed: &[String]) -> Result<usize> {
        self.retain(|pkg| installed.iter().any(|p| p == pkg))
    }

    /// 读出所有记录，没有逗号的行跳过
    pub fn entries(&self) -> Result<Vec<LogEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(content
            .lines()
            .filter_map(|row| {
                row.split_once(',').map(|(ts, pkg)| LogEntry {
                    timestamp: ts.to_string(),
                    package: pkg.to_string(),
                })
            })
            .collect())
    }

    /// 按包名过滤行并写回，返回删除的行数。空行丢弃，无法解析的行保留
    fn retain(&self, keep: impl Fn(&str) -> bool) -> Result<usize> {
        if !self.path.exists() {
            return Ok(0);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("无法读取安装记录 {}", self.path.display()))?;

        let rows: Vec<&str> = content.lines().filter(|row| !row.is_empty()).collect();
        let kept: Vec<&str> = rows
            .iter()
            .copied()
            .filter(|row| match row.split_once(',') {
                Some((_, pkg)) => keep(pkg),
                None => true,
            })
            .collect();

        let text: String = kept.iter().map(|row| format!("{}\n", row)).collect();
        fs::write(&self.path, text)?;

        let removed = rows.len() - kept.len();
        log::info!("从 {} 删除 {} 条记录", self.path.display(), removed);
        Ok(removed)
    }
}
