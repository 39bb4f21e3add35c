//! 汉字 / 非汉字区段切分，以及非汉字区段的简单分词

use std::sync::OnceLock;

use regex::Regex;

static HAN_RE: OnceLock<Regex> = OnceLock::new();
static ALNUM_RE: OnceLock<Regex> = OnceLock::new();

fn han_re() -> &'static Regex {
    HAN_RE.get_or_init(|| Regex::new(r"\p{Han}+").unwrap())
}

fn alnum_re() -> &'static Regex {
    ALNUM_RE.get_or_init(|| Regex::new(r"[A-Za-z0-9]+").unwrap())
}

/// 按原文顺序编号的文本块；按 `seq` 排序即可还原原文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBlock<'a> {
    pub seq: usize,
    pub text: &'a str,
    pub is_cjk: bool,
}

impl<'a> TextBlock<'a> {
    pub fn new(seq: usize, text: &'a str, is_cjk: bool) -> Self {
        Self { seq, text, is_cjk }
    }
}

/// 把 `text` 切成交替的「匹配 / 非匹配」片段，完整覆盖原文且不重叠
fn split_matches<'a>(re: &Regex, text: &'a str) -> Vec<(&'a str, bool)> {
    let mut pieces = Vec::new();
    let mut prev_end = 0;
    for m in re.find_iter(text) {
        if m.start() > prev_end {
            pieces.push((&text[prev_end..m.start()], false));
        }
        pieces.push((m.as_str(), true));
        prev_end = m.end();
    }
    if prev_end < text.len() {
        pieces.push((&text[prev_end..], false));
    }
    pieces
}

/// 找出所有最长汉字串，与其间的非汉字片段交替排列
pub fn split_text(text: &str) -> Vec<TextBlock<'_>> {
    split_matches(han_re(), text)
        .into_iter()
        .enumerate()
        .map(|(seq, (piece, is_cjk))| TextBlock::new(seq, piece, is_cjk))
        .collect()
}

/// 非汉字区段：`[A-Za-z0-9]+` 整体成词，其余字符逐个成词，空白丢弃
pub fn cut_non_cjk(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    for (piece, is_alnum) in split_matches(alnum_re(), text) {
        if is_alnum {
            words.push(piece);
            continue;
        }
        for (offset, ch) in piece.char_indices() {
            if !ch.is_whitespace() {
                words.push(&piece[offset..offset + ch.len_utf8()]);
            }
        }
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_text() {
        let cases: Vec<(&str, Vec<TextBlock>)> = vec![
            (
                "xxx中文xxx",
                vec![
                    TextBlock::new(0, "xxx", false),
                    TextBlock::new(1, "中文", true),
                    TextBlock::new(2, "xxx", false),
                ],
            ),
            (
                "中文xxx",
                vec![TextBlock::new(0, "中文", true), TextBlock::new(1, "xxx", false)],
            ),
            (
                "xxx中文",
                vec![TextBlock::new(0, "xxx", false), TextBlock::new(1, "中文", true)],
            ),
            ("xxx", vec![TextBlock::new(0, "xxx", false)]),
            ("中文", vec![TextBlock::new(0, "中文", true)]),
            (
                "english번역『하다』今天天氣很好，ステーション1+1=2我昨天去上海*important*去",
                vec![
                    TextBlock::new(0, "english번역『하다』", false),
                    TextBlock::new(1, "今天天氣很好", true),
                    TextBlock::new(2, "，ステーション1+1=2", false),
                    TextBlock::new(3, "我昨天去上海", true),
                    TextBlock::new(4, "*important*", false),
                    TextBlock::new(5, "去", true),
                ],
            ),
        ];
        for (text, want) in cases {
            assert_eq!(split_text(text), want, "{}", text);
        }
    }

    #[test]
    fn test_split_text_empty() {
        assert!(split_text("").is_empty());
    }

    #[test]
    fn test_split_text_covers_input() {
        let text = "a中b文 c，d。";
        let blocks = split_text(text);
        let joined: String = blocks.iter().map(|b| b.text).collect();
        assert_eq!(joined, text);
        for pair in blocks.windows(2) {
            assert_ne!(pair[0].is_cjk, pair[1].is_cjk);
            assert_eq!(pair[0].seq + 1, pair[1].seq);
        }
    }

    #[test]
    fn test_cut_non_cjk() {
        let cases: Vec<(&str, Vec<&str>)> = vec![
            ("some english words", vec!["some", "english", "words"]),
            ("abc123", vec!["abc123"]),
            ("a1+1=2", vec!["a1", "+", "1", "=", "2"]),
            ("aaa\nbbb", vec!["aaa", "bbb"]),
            ("，。", vec!["，", "。"]),
            (" \t\n", vec![]),
            ("", vec![]),
        ];
        for (text, want) in cases {
            assert_eq!(cut_non_cjk(text), want, "{:?}", text);
        }
    }
}
