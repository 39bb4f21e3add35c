//! 分词流水线
//!
//! 顺序模式：按块顺序分派（汉字块走 DAG → 最优路径 →（可选）HMM，其余走字母数字分组），依序拼接。
//! 并行模式见 [`parallel`]。

pub mod parallel;

use crate::dict::PrefixDictionary;
use crate::segment::{best_path, build_dag, cut_non_cjk, cut_path, find_route, split_text, HmmModel, TextBlock};

pub use parallel::{cut_parallel, ParallelOptions};

/// worker 产出的结果块
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultBlock {
    pub seq: usize,
    pub tokens: Vec<String>,
}

/// 汉字串分词；`hmm` 为 `Some` 时，词典路径中连续的单字交给 HMM 重新切分
pub fn cut_cjk<'a>(dict: &PrefixDictionary, hmm: Option<&HmmModel>, text: &'a str) -> Vec<&'a str> {
    let dag = build_dag(dict, text);
    let route = find_route(dict, text, &dag);
    let pieces = cut_path(text, &best_path(&route));
    let Some(hmm) = hmm else {
        return pieces;
    };

    let mut words = Vec::with_capacity(pieces.len());
    // 连续单字在原文中是相邻的，只需记住起点字节位置
    let mut singles_start: Option<usize> = None;
    let mut cursor = 0;
    for piece in pieces {
        if piece.chars().nth(1).is_none() {
            singles_start.get_or_insert(cursor);
        } else {
            if let Some(start) = singles_start.take() {
                words.extend(hmm.cut(&text[start..cursor]));
            }
            words.push(piece);
        }
        cursor += piece.len();
    }
    if let Some(start) = singles_start {
        words.extend(hmm.cut(&text[start..]));
    }
    words
}

pub fn cut_block<'a>(dict: &PrefixDictionary, hmm: Option<&HmmModel>, block: &TextBlock<'a>) -> Vec<&'a str> {
    if block.is_cjk {
        cut_cjk(dict, hmm, block.text)
    } else {
        cut_non_cjk(block.text)
    }
}

/// 顺序模式整段分词
pub fn cut_text(dict: &PrefixDictionary, hmm: Option<&HmmModel>, text: &str) -> Vec<String> {
    split_text(text)
        .iter()
        .flat_map(|block| cut_block(dict, hmm, block))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fixture_dictionary, fixture_hmm};

    #[test]
    fn test_cut_cjk_without_hmm() {
        let dict = fixture_dictionary();
        assert_eq!(
            cut_cjk(&dict, None, "今天天氣很好"),
            vec!["今天", "天", "氣", "很", "好"]
        );
        assert_eq!(
            cut_cjk(&dict, None, "这一刹那的撙近"),
            vec!["这", "一刹那", "的", "撙", "近"]
        );
        assert_eq!(cut_cjk(&dict, None, "撙"), vec!["撙"]);
    }

    #[test]
    fn test_cut_cjk_with_hmm() {
        let dict = fixture_dictionary();
        let hmm = fixture_hmm();
        assert_eq!(
            cut_cjk(&dict, Some(&hmm), "今天天氣很好"),
            vec!["今天", "天氣", "很", "好"]
        );
        assert_eq!(
            cut_cjk(&dict, Some(&hmm), "我昨天去上海交通大學與老師討論量子力學"),
            vec!["我", "昨天", "去", "上海", "交通", "大學", "與", "老師", "討論", "量子", "力學"]
        );
        assert_eq!(
            cut_cjk(&dict, Some(&hmm), "这一刹那的撙近"),
            vec!["这", "一刹那", "的", "撙近"]
        );
        assert_eq!(cut_cjk(&dict, Some(&hmm), "撙"), vec!["撙"]);
    }

    #[test]
    fn test_cut_text_mixed_scripts() {
        let dict = fixture_dictionary();
        let hmm = fixture_hmm();
        let text = "english번역『하다』今天天氣很好，ステーションabc1231+1=2我昨天去上海*important*去";
        let want = vec![
            "english", "번", "역", "『", "하", "다", "』", "今天", "天氣", "很", "好", "，", "ス", "テ",
            "ー", "シ", "ョ", "ン", "abc1231", "+", "1", "=", "2", "我", "昨天", "去", "上海", "*",
            "important", "*", "去",
        ];
        assert_eq!(cut_text(&dict, Some(&hmm), text), want);
    }

    #[test]
    fn test_cut_text_degenerate_inputs() {
        let dict = fixture_dictionary();
        let hmm = fixture_hmm();
        assert!(cut_text(&dict, Some(&hmm), "").is_empty());
        assert!(cut_text(&dict, Some(&hmm), " \n\t ").is_empty());
        assert_eq!(cut_text(&dict, Some(&hmm), "很"), vec!["很"]);
        assert_eq!(cut_text(&dict, None, "！"), vec!["！"]);
    }

    #[test]
    fn test_cut_text_reconstructs_input_without_whitespace() {
        let dict = fixture_dictionary();
        let hmm = fixture_hmm();
        let text = "我昨天 去上海, some words 123 今天天氣很好。";
        for use_hmm in [false, true] {
            let tokens = cut_text(&dict, use_hmm.then_some(&hmm), text);
            let stripped: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            assert_eq!(tokens.concat(), stripped);
        }
    }
}
