use super::*;
use crate::package_manager::types::StatusFilter;
use proptest::prelude::*;

/// apt search 输出中可能出现的一行
fn line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9+.-]{0,8}/[a-z-]{1,8} [0-9.]{1,5} amd64( \\[installed\\]| \\[upgradable from: 1\\.0\\])?",
        "  [A-Za-z ]{1,20}",
        "\t[a-z]{1,10}",
        Just(String::new()),
        Just("   ".to_string()),
        Just("Sorting... Done".to_string()),
        Just("Full Text Search... Done".to_string()),
    ]
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(line_strategy(), 0..20).prop_map(|lines| lines.join("\n"))
}

fn status_strategy() -> impl Strategy<Value = StatusFilter> {
    prop_oneof![
        Just(StatusFilter::Any),
        Just(StatusFilter::Installed),
        Just(StatusFilter::NotInstalled),
    ]
}

proptest! {
    /// 输出记录数不会超过首行数
    #[test]
    fn prop_output_never_exceeds_headers(text in text_strategy(), status in status_strategy()) {
        let headers = classify_lines(&text).iter().filter(|l| is_header_line(l)).count();
        let out = filter_search(&text, &SearchFilter::new(status, None));
        prop_assert!(out.len() <= headers);
    }

    /// 对已分类的行再分类不会有变化
    #[test]
    fn prop_classify_is_idempotent(text in text_strategy()) {
        let once = classify_lines(&text);
        let joined = once.join("\n");
        let twice = classify_lines(&joined);
        prop_assert_eq!(once, twice);
    }

    /// 合并结果依次展开后等于分类结果（去掉首个首行之前的行）
    #[test]
    fn prop_join_is_partition(text in text_strategy()) {
        let lines = classify_lines(&text);
        let first = lines.iter().position(|l| is_header_line(l)).unwrap_or(lines.len());
        let mut rebuilt: Vec<String> = Vec::new();
        for record in join_records(&lines) {
            rebuilt.push(record.header().to_string());
            rebuilt.extend(record.description_lines().iter().cloned());
        }
        let expected: Vec<String> = lines[first..].iter().map(|s| s.to_string()).collect();
        prop_assert_eq!(rebuilt, expected);
    }

    /// 精确匹配的结果是无过滤结果的子集
    #[test]
    fn prop_exact_is_subset(text in text_strategy(), target in "[a-z]{1,3}") {
        let all = filter_search(&text, &SearchFilter::default());
        let exact = filter_search(&text, &SearchFilter::new(StatusFilter::Any, Some(target.clone())));
        for record in &exact {
            prop_assert!(all.contains(record));
            prop_assert_eq!(&record.name, &target);
        }
    }

    /// 进度提示行永远不会出现在结果中
    #[test]
    fn prop_banners_never_emitted(text in text_strategy(), status in status_strategy()) {
        for record in filter_search(&text, &SearchFilter::new(status, None)) {
            prop_assert!(!record.name.starts_with("Sorting..."));
            prop_assert!(!record.name.starts_with("Full Text Search..."));
        }
    }
}
