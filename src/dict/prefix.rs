//! 前缀词典
//!
//! 每个完整词条的所有真前缀都以词频 0 存在于表中，DAG 构建时据此做 O(长度) 的「还能否继续延伸」判断。
//! 例如 `AT&T 3` 会产生：
//!
//! ```text
//! A -> 0, AT -> 0, AT& -> 0, AT&T -> 3
//! ```

use std::collections::HashMap;

use crate::core::DictError;
use crate::pipeline::cut_text;

/// 词条 -> 词频，附带语料总量（全部完整词条词频之和）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixDictionary {
    terms: HashMap<String, u64>,
    size: u64,
}

impl PrefixDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 `词条 词频 [词性]` 格式的行构建词典
    ///
    /// - 空行跳过
    /// - 词频缺失或不是非负整数时返回 [`DictError::Parse`]，不产生任何部分结果
    /// - 同一词条出现多次时以最后一次为准，语料总量同步扣除被替换的旧值
    pub fn from_lines<I, S>(lines: I) -> Result<Self, DictError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dict = Self::new();
        for (idx, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            if let Some((term, freq)) = parse_line(idx + 1, line)? {
                dict.insert_entry(term, freq);
            }
        }
        Ok(dict)
    }

    /// 从整段词典文本构建（按行切分）
    pub fn parse(content: &str) -> Result<Self, DictError> {
        Self::from_lines(content.lines())
    }

    /// 查询词条；前缀占位词条返回 `Some(0)`
    pub fn lookup(&self, term: &str) -> Option<u64> {
        self.terms.get(term).copied()
    }

    /// 词条存在且词频 > 0
    pub fn is_word(&self, term: &str) -> bool {
        matches!(self.lookup(term), Some(freq) if freq > 0)
    }

    pub fn corpus_size(&self) -> u64 {
        self.size
    }

    /// 表中键的数量（含前缀占位）
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// 插入词条；`freq == 0` 时按现有词典估算词频。返回实际写入的词频。
    ///
    /// 与构建不同，这里是显式插入：覆盖已有词条，语料总量直接加上写入的词频。
    pub fn add_term(&mut self, term: &str, freq: u64) -> u64 {
        let freq = if freq < 1 { self.suggest_freq(term) } else { freq };
        self.insert_prefixes(term);
        self.terms.insert(term.to_string(), freq);
        self.size = self.size.saturating_add(freq);
        freq
    }

    /// 估算一个词条的词频
    ///
    /// 用不带 HMM 的分词把词条自身切开，各片段相对频率（缺省词频 1）连乘后乘回语料总量，
    /// 结果 +1 后与词条现有词频（缺省 1）取大。
    pub fn suggest_freq(&self, term: &str) -> u64 {
        let size = (self.size as f64).max(1.0);
        let mut freq = 1.0;
        for piece in cut_text(self, None, term) {
            let piece_freq = self.lookup(&piece).unwrap_or(1);
            freq *= piece_freq as f64 / size;
        }
        let estimate = (freq * size) as u64 + 1;
        let existing = self.lookup(term).unwrap_or(1);
        estimate.max(existing)
    }

    fn insert_entry(&mut self, term: &str, freq: u64) {
        self.insert_prefixes(term);
        let previous = self.terms.insert(term.to_string(), freq).unwrap_or(0);
        self.size = self.size.saturating_sub(previous).saturating_add(freq);
    }

    fn insert_prefixes(&mut self, term: &str) {
        for (end, _) in term.char_indices().skip(1) {
            if !self.terms.contains_key(&term[..end]) {
                self.terms.insert(term[..end].to_string(), 0);
            }
        }
    }
}

fn parse_line(line_no: usize, line: &str) -> Result<Option<(&str, u64)>, DictError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let parse_err = |reason: String| DictError::Parse {
        line_no,
        line: line.to_string(),
        reason,
    };

    let mut fields = trimmed.split_whitespace();
    let term = fields.next().unwrap_or_default();
    let count = fields
        .next()
        .ok_or_else(|| parse_err("missing count field".to_string()))?;
    let freq = count
        .parse::<u64>()
        .map_err(|e| parse_err(format!("invalid count {:?}: {}", count, e)))?;
    Ok(Some((term, freq)))
}
