//! 词图（DAG）构建与最大概率路径
//!
//! 偏移量一律以字（char）计，不是字节。`dag[i]` 是从第 i 个字出发、能构成词典词的所有终点 j（升序）；
//! 没有任何词从 i 开始时只有兜底边 `i -> i + 1`。

use crate::dict::PrefixDictionary;

use super::MIN_FLOAT;

/// `dag[i]`：从偏移 i 出发的所有合法终点，严格大于 i
pub type Dag = Vec<Vec<usize>>;

/// 候选延续：走边 `i -> end` 后，从 `end` 到文本末尾的最佳累计对数概率
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TailProba {
    pub end: usize,
    pub log_prob: f64,
}

/// `route[i]`：偏移 i 的全部候选延续；长度为字数 + 1，末项为空
pub type Route = Vec<Vec<TailProba>>;

/// 每个字的起始字节位置，末尾追加 `text.len()`
pub(crate) fn char_bounds(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(text.len()))
        .collect()
}

pub fn build_dag(dict: &PrefixDictionary, text: &str) -> Dag {
    let bounds = char_bounds(text);
    let n = bounds.len() - 1;
    let mut dag = Vec::with_capacity(n);

    for i in 0..n {
        let start = bounds[i];
        let mut ends = Vec::new();
        if dict.is_word(&text[start..bounds[i + 1]]) {
            for j in i + 1..=n {
                // 前缀剪枝：一旦不再是任何词的前缀就停止延伸
                match dict.lookup(&text[start..bounds[j]]) {
                    None => break,
                    Some(freq) if freq > 0 => ends.push(j),
                    Some(_) => {}
                }
            }
        }
        if ends.is_empty() {
            ends.push(i + 1);
        }
        dag.push(ends);
    }
    dag
}

/// 从后往前计算每条边的累计对数概率：`ln(freq or 1) - ln(total) + best(route[j])`
///
/// 每个偏移保留全部候选而不只是最优，前面的多个偏移可能回访同一个 j。
pub fn find_route(dict: &PrefixDictionary, text: &str, dag: &Dag) -> Route {
    let bounds = char_bounds(text);
    let n = bounds.len() - 1;
    let log_total = (dict.corpus_size().max(1) as f64).ln();
    let mut route: Route = vec![Vec::new(); n + 1];

    for i in (0..n).rev() {
        let mut tails = Vec::with_capacity(dag[i].len());
        for &j in &dag[i] {
            let piece = &text[bounds[i]..bounds[j]];
            let freq = dict.lookup(piece).filter(|&f| f > 0).unwrap_or(1);
            let piece_prob = (freq as f64).ln() - log_total;
            let next = if j == n {
                0.0
            } else {
                best_tail(&route[j]).map_or(MIN_FLOAT, |tail| tail.log_prob)
            };
            tails.push(TailProba {
                end: j,
                log_prob: piece_prob + next,
            });
        }
        route[i] = tails;
    }
    route
}

/// 概率最大的候选；平局取较后者（终点更远，即更长的词）
pub fn best_tail(tails: &[TailProba]) -> Option<TailProba> {
    tails.iter().copied().fold(None, |best, tail| match best {
        Some(b) if tail.log_prob < b.log_prob => Some(b),
        _ => Some(tail),
    })
}

/// 从 0 开始逐段选最优候选，得到恰好覆盖 `[0, n)` 的 `(start, end)` 序列
pub fn best_path(route: &Route) -> Vec<(usize, usize)> {
    let n = route.len().saturating_sub(1);
    let mut path = Vec::new();
    let mut i = 0;
    while i < n {
        let end = match best_tail(&route[i]) {
            Some(tail) if tail.end > i => tail.end,
            _ => i + 1,
        };
        path.push((i, end));
        i = end;
    }
    path
}

/// 按路径切出词片段
pub fn cut_path<'a>(text: &'a str, path: &[(usize, usize)]) -> Vec<&'a str> {
    let bounds = char_bounds(text);
    path.iter()
        .map(|&(start, end)| &text[bounds[start]..bounds[end]])
        .collect()
}
