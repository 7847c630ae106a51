//! 搜索结果输出：包名绿色，其余原样

use crate::package_manager::FormattedRecord;
use crossterm::style::{style, Color as TermColor, Stylize};
use std::io::{self, IsTerminal, Write};

/// 样式能力：决定包名是否着色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Styler {
    Plain,
    Color,
}

impl Styler {
    /// 配置优先；否则 stdout 是终端且未设置 NO_COLOR 时着色
    pub fn detect(forced: Option<bool>) -> Self {
        let enabled = forced.unwrap_or_else(|| {
            std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal()
        });
        if enabled {
            Styler::Color
        } else {
            Styler::Plain
        }
    }

    pub fn render(self, record: &FormattedRecord) -> String {
        match self {
            Styler::Plain => record.to_string(),
            Styler::Color => {
                let name = style(&record.name).with(TermColor::DarkGreen);
                format!("{} {}", name, record.remainder)
            }
        }
    }
}

/// 每条记录后空一行
pub fn print_records(
    out: &mut impl Write,
    records: &[FormattedRecord],
    styler: Styler,
) -> io::Result<()> {
    for record in records {
        writeln!(out, "{}\n", styler.render(record))?;
    }
    Ok(())
}
