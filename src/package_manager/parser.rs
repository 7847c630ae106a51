//! apt search 输出解析：分类 → 合并 → 过滤 → 格式化

use super::types::{FormattedRecord, ResultRecord, SearchFilter};

/// apt search 开头打印的进度提示，按前缀匹配（后面会跟 " Done" 等）
const BANNER_PREFIXES: [&str; 2] = ["Sorting...", "Full Text Search..."];

/// 去掉空行和进度提示行，其余行原样保留
pub fn classify_lines(text: &str) -> Vec<&str> {
    text.split('\n').filter(|line| is_content_line(line)).collect()
}

fn is_content_line(line: &str) -> bool {
    if line.trim().is_empty() {
        return false;
    }
    !BANNER_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
}

/// 首字符非空白即为记录首行
fn is_header_line(line: &str) -> bool {
    line.chars().next().is_some_and(|c| !c.is_whitespace())
}

/// 把首行与其后的缩进描述行合并为一条记录。
///
/// 第一个首行之前的缩进行不属于任何记录，直接丢弃。
pub fn join_records(lines: &[&str]) -> Vec<ResultRecord> {
    let mut starts: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_header_line(line))
        .map(|(i, _)| i)
        .collect();
    starts.push(lines.len());

    starts
        .windows(2)
        .map(|span| {
            let (i, j) = (span[0], span[1]);
            let description = lines[i + 1..j].iter().map(|s| s.to_string()).collect();
            ResultRecord::new(lines[i], description)
        })
        .collect()
}

/// 按过滤条件筛选，保持原有顺序
pub fn filter_records(records: Vec<ResultRecord>, filter: &SearchFilter) -> Vec<ResultRecord> {
    records.into_iter().filter(|r| filter.accepts(r)).collect()
}

/// 以第一个 '/' 为界拆出包名，其余部分前面补回 '/'
pub fn format_record(record: &ResultRecord) -> FormattedRecord {
    let mut segments = record.header().split('/');
    let name = segments.next().unwrap_or_default().to_string();
    let rest: Vec<&str> = segments.collect();
    FormattedRecord {
        name,
        remainder: format!("/{}", rest.join("/")),
    }
}

/// 完整流水线：原始输出文本 → 待展示的记录
pub fn filter_search(text: &str, filter: &SearchFilter) -> Vec<FormattedRecord> {
    let lines = classify_lines(text);
    let records = join_records(&lines);
    let total = records.len();
    let kept = filter_records(records, filter);
    log::debug!("filter_search: {} 条记录，保留 {} 条", total, kept.len());
    kept.iter().map(format_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package_manager::types::{StatusFilter, StatusPredicate};

    const SAMPLE: &str = "Sorting... Done
Full Text Search... Done
vim/focal-updates 2:8.1.2269-1ubuntu5 amd64 [installed]
  Vi IMproved - enhanced vi editor

vim-tiny/focal 2:8.1.2269-1ubuntu5 amd64
  Vi IMproved - compact version of vi
";

    fn names(out: &[FormattedRecord]) -> Vec<&str> {
        out.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn classify_drops_blank_and_banner_lines() {
        let lines = classify_lines(SAMPLE);
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| !l.starts_with("Sorting")));
        assert!(lines.iter().all(|l| !l.starts_with("Full Text Search")));
        assert_eq!(lines[1], "  Vi IMproved - enhanced vi editor");
    }

    #[test]
    fn classify_matches_banner_by_prefix() {
        let lines = classify_lines("Sorting...\nFull Text Search... 50%\nfoo/bar\n");
        assert_eq!(lines, vec!["foo/bar"]);
    }

    #[test]
    fn classify_empty_input() {
        assert!(classify_lines("").is_empty());
        assert!(classify_lines("\n  \n\t\n").is_empty());
    }

    #[test]
    fn join_groups_description_with_header() {
        let lines = classify_lines(SAMPLE);
        let records = join_records(&lines);
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].header(),
            "vim/focal-updates 2:8.1.2269-1ubuntu5 amd64 [installed]"
        );
        assert_eq!(
            records[0].description_lines(),
            &["  Vi IMproved - enhanced vi editor".to_string()]
        );
    }

    #[test]
    fn join_drops_lines_before_first_header() {
        let records = join_records(&["  orphan", "\tanother", "foo/bar 1.0", "  desc"]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].header(), "foo/bar 1.0");
        assert_eq!(records[0].description_lines().len(), 1);
    }

    #[test]
    fn join_consecutive_headers_have_no_description() {
        let records = join_records(&["a/x", "b/y", "  about b"]);
        assert_eq!(records.len(), 2);
        assert!(records[0].description_lines().is_empty());
        assert_eq!(records[1].description_lines().len(), 1);
    }

    #[test]
    fn join_empty_input() {
        assert!(join_records(&[]).is_empty());
    }

    #[test]
    fn format_splits_on_first_slash() {
        let record = ResultRecord::new(
            "vim/focal-updates,focal-security 2:8.1.2269-1ubuntu5 amd64 [installed]",
            vec![],
        );
        let formatted = format_record(&record);
        assert_eq!(formatted.name, "vim");
        assert_eq!(
            formatted.remainder,
            "/focal-updates,focal-security 2:8.1.2269-1ubuntu5 amd64 [installed]"
        );
    }

    #[test]
    fn format_keeps_later_slashes() {
        let formatted = format_record(&ResultRecord::new("pkg/a/b c", vec![]));
        assert_eq!(formatted.name, "pkg");
        assert_eq!(formatted.remainder, "/a/b c");
    }

    #[test]
    fn format_header_without_slash() {
        let formatted = format_record(&ResultRecord::new("oddline", vec![]));
        assert_eq!(formatted.name, "oddline");
        assert_eq!(formatted.remainder, "/");
    }

    #[test]
    fn installed_filter_keeps_vim() {
        let out = filter_search(SAMPLE, &SearchFilter::new(StatusFilter::Installed, None));
        assert_eq!(names(&out), vec!["vim"]);
    }

    #[test]
    fn not_installed_filter_keeps_vim_tiny() {
        let out = filter_search(SAMPLE, &SearchFilter::new(StatusFilter::NotInstalled, None));
        assert_eq!(names(&out), vec!["vim-tiny"]);
    }

    #[test]
    fn no_filter_keeps_both_in_order() {
        let out = filter_search(SAMPLE, &SearchFilter::default());
        assert_eq!(names(&out), vec!["vim", "vim-tiny"]);
    }

    #[test]
    fn exact_filter_excludes_shared_prefix() {
        for status in [StatusFilter::Any, StatusFilter::Installed] {
            let out = filter_search(SAMPLE, &SearchFilter::new(status, Some("vim".into())));
            assert_eq!(names(&out), vec!["vim"]);
        }
        let out = filter_search(
            SAMPLE,
            &SearchFilter::new(StatusFilter::NotInstalled, Some("vim".into())),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn upgradable_counts_as_installed() {
        let text = "foo/jammy 1.2 amd64 [upgradable from: 1.1]\n  foo tool\nbar/jammy 1.0 amd64\n";
        let out = filter_search(text, &SearchFilter::new(StatusFilter::Installed, None));
        assert_eq!(names(&out), vec!["foo"]);
    }

    #[test]
    fn all_mode_predicate_is_applied() {
        let predicate =
            StatusPredicate::new(vec!["installed".into(), "upgradable".into()], "all").unwrap();
        let filter = SearchFilter::new(StatusFilter::Installed, None).with_predicate(predicate);
        let out = filter_search(SAMPLE, &filter);
        assert!(out.is_empty());
    }

    #[test]
    fn unmatched_exact_name_yields_nothing() {
        let out = filter_search(SAMPLE, &SearchFilter::new(StatusFilter::Any, Some("emacs".into())));
        assert!(out.is_empty());
    }
}

#[cfg(test)]
#[path = "parser_proptests.rs"]
mod proptests;
