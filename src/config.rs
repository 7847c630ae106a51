use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::package_manager::types::{StatusPredicate, DEFAULT_STATUS_KEYWORDS};

fn home_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
}

fn config_dir() -> PathBuf {
    home_dir().join(".config/adapt")
}

fn data_dir() -> PathBuf {
    home_dir().join(".local/share/adapt")
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub install_log: PathBuf,
    pub status_keywords: Vec<String>,
    pub match_mode: String,
    /// 强制开/关颜色，未设置时自动检测
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            install_log: data_dir().join("packages.csv"),
            status_keywords: DEFAULT_STATUS_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            match_mode: "any".to_string(),
            color: None,
        }
    }
}

impl Config {
    pub fn default_path() -> PathBuf {
        config_dir().join("config.toml")
    }

    pub fn load_or_default() -> Result<Self> {
        Self::load_or_init(&Self::default_path())
    }

    /// 读取配置；首次运行时写入默认配置。
    ///
    /// 默认配置写不进去（HOME 不可写等）只记警告，继续使用默认值。
    pub fn load_or_init(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = fs::read_to_string(config_path)
                .with_context(|| format!("无法读取配置文件 {}", config_path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("配置文件格式错误: {}", config_path.display()))?;
            Ok(config)
        } else {
            let config = Self::default();
            match config.save(config_path) {
                Ok(()) => log::info!("已创建默认配置 {}", config_path.display()),
                Err(err) => log::warn!("无法写入默认配置，使用内置默认值: {:#}", err),
            }
            Ok(config)
        }
    }

    pub fn save(&self, config_path: &Path) -> Result<()> {
        if let Some(dir) = config_path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("无法创建配置目录 {}", dir.display()))?;
        }
        fs::write(config_path, toml::to_string_pretty(self)?)
            .with_context(|| format!("无法写入配置文件 {}", config_path.display()))?;
        Ok(())
    }

    /// 状态关键字谓词，match_mode 非法时报错
    pub fn status_predicate(&self) -> Result<StatusPredicate> {
        let predicate = StatusPredicate::new(self.status_keywords.clone(), &self.match_mode)
            .with_context(|| format!("配置项 match_mode 无效: {}", self.match_mode))?;
        Ok(predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_run_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adapt/config.toml");
        let config = Config::load_or_init(&path).unwrap();
        assert!(path.exists());
        assert_eq!(Config::load_or_init(&path).unwrap(), config);
    }

    #[test]
    fn unwritable_config_dir_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let not_a_dir = dir.path().join("homefile");
        fs::write(&not_a_dir, "").unwrap();
        let path = not_a_dir.join(".config/adapt/config.toml");

        let config = Config::load_or_init(&path).unwrap();
        assert_eq!(config.match_mode, "any");
        assert!(!path.exists());

        let err = config.save(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("homefile"));
    }

    #[test]
    fn default_log_lives_in_data_dir() {
        let config = Config::default();
        assert!(config.install_log.ends_with(".local/share/adapt/packages.csv"));
        assert!(Config::default_path().ends_with(".config/adapt/config.toml"));
    }

    #[test]
    fn partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "install_log = \"/tmp/pkgs.csv\"\ncolor = false\n").unwrap();
        let config = Config::load_or_init(&path).unwrap();
        assert_eq!(config.install_log, PathBuf::from("/tmp/pkgs.csv"));
        assert_eq!(config.color, Some(false));
        assert_eq!(config.match_mode, "any");
        assert_eq!(config.status_keywords, vec!["installed", "upgradable"]);
    }

    #[test]
    fn invalid_match_mode_is_reported() {
        let config = Config {
            match_mode: "most".to_string(),
            ..Config::default()
        };
        let err = config.status_predicate().unwrap_err();
        assert!(format!("{:#}", err).contains("most"));
    }
}
