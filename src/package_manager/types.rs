//! PackageManager 相关数据类型定义

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// 默认的"已安装"关键字
pub const DEFAULT_STATUS_KEYWORDS: [&str; 2] = ["installed", "upgradable"];

/// 解析核心的配置错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("无效的匹配模式 '{0}'，只能是 'any' 或 'all'")]
    InvalidMatchMode(String),
}

/// 命令输出结果
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

/// 一条搜索结果：首行 + 缩进的描述行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    header: String,
    description_lines: Vec<String>,
}

impl ResultRecord {
    pub fn new(header: impl Into<String>, description_lines: Vec<String>) -> Self {
        Self {
            header: header.into(),
            description_lines,
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    /// 缩进的描述行（输出时不展示，供检查记录内容使用）
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn description_lines(&self) -> &[String] {
        &self.description_lines
    }

    /// 首行与描述行用换行拼接，作为状态关键字的搜索范围
    pub fn joined_text(&self) -> String {
        let mut text = self.header.clone();
        for line in &self.description_lines {
            text.push('\n');
            text.push_str(line);
        }
        text
    }
}

/// 用于展示的两段：包名（高亮）与其余部分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedRecord {
    pub name: String,
    pub remainder: String,
}

impl fmt::Display for FormattedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.remainder)
    }
}

/// 安装状态过滤（三态）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    Installed,
    NotInstalled,
    #[default]
    Any,
}

/// 多个关键字的组合方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    #[default]
    Any,
    All,
}

impl FromStr for MatchMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(MatchMode::Any),
            "all" => Ok(MatchMode::All),
            other => Err(ParseError::InvalidMatchMode(other.to_string())),
        }
    }
}

/// 判断一条记录是否"提到了安装状态"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPredicate {
    keywords: Vec<String>,
    mode: MatchMode,
}

impl Default for StatusPredicate {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_STATUS_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            mode: MatchMode::Any,
        }
    }
}

impl StatusPredicate {
    /// 由关键字与模式字符串构造，模式非法时立即返回错误
    pub fn new(keywords: Vec<String>, mode: &str) -> Result<Self, ParseError> {
        let mode = mode.parse()?;
        Ok(Self { keywords, mode })
    }

    /// 大小写敏感的子串匹配，不要求整词
    pub fn mentioned_in(&self, text: &str) -> bool {
        match self.mode {
            MatchMode::Any => self.keywords.iter().any(|k| text.contains(k.as_str())),
            MatchMode::All => self.keywords.iter().all(|k| text.contains(k.as_str())),
        }
    }
}

/// 过滤配置：精确包名 AND 安装状态
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub status: StatusFilter,
    pub exact: Option<String>,
    pub predicate: StatusPredicate,
}

impl SearchFilter {
    pub fn new(status: StatusFilter, exact: Option<String>) -> Self {
        Self {
            status,
            exact,
            predicate: StatusPredicate::default(),
        }
    }

    pub fn with_predicate(mut self, predicate: StatusPredicate) -> Self {
        self.predicate = predicate;
        self
    }

    pub fn accepts(&self, record: &ResultRecord) -> bool {
        if let Some(target) = &self.exact {
            let matches = record
                .header()
                .strip_prefix(target.as_str())
                .is_some_and(|rest| rest.starts_with('/'));
            if !matches {
                return false;
            }
        }

        match self.status {
            StatusFilter::Any => true,
            StatusFilter::Installed => self.predicate.mentioned_in(&record.joined_text()),
            StatusFilter::NotInstalled => !self.predicate.mentioned_in(&record.joined_text()),
        }
    }
}
