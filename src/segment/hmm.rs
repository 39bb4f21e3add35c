//! HMM 未登录词识别（B/M/E/S 四状态 Viterbi）
//!
//! 词典切不开的连续单字交给这里：Viterbi 求最可能的状态序列，再在每个 E / S 处断词。
//! 每个位置每个状态只记一个回溯指针（前驱状态），最后从终态一次回溯得到完整路径。

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::MIN_FLOAT;

/// 字在词中的位置：词首 / 词中 / 词尾 / 单字词
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    B,
    M,
    E,
    S,
}

impl State {
    pub const ALL: [State; 4] = [State::B, State::M, State::E, State::S];

    /// 合法前驱（B←E,S；M←B,M；E←B,M；S←E,S），顺序即平局时的优先顺序
    pub fn predecessors(self) -> [State; 2] {
        match self {
            State::B => [State::E, State::S],
            State::M => [State::B, State::M],
            State::E => [State::B, State::M],
            State::S => [State::E, State::S],
        }
    }

    /// 该状态是否结束一个词
    pub fn ends_word(self) -> bool {
        matches!(self, State::E | State::S)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            State::B => "B",
            State::M => "M",
            State::E => "E",
            State::S => "S",
        };
        f.write_str(s)
    }
}

impl FromStr for State {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B" => Ok(State::B),
            "M" => Ok(State::M),
            "E" => Ok(State::E),
            "S" => Ok(State::S),
            other => Err(other.to_string()),
        }
    }
}

/// 发射概率表：state -> 字 -> 对数概率，未见过的字取下限
#[derive(Debug, Clone, Default)]
pub struct EmissionTable {
    rows: [HashMap<char, f64>; 4],
}

impl EmissionTable {
    pub fn insert(&mut self, state: State, row: HashMap<char, f64>) {
        self.rows[state.index()] = row;
    }

    pub fn set(&mut self, state: State, ch: char, log_prob: f64) {
        self.rows[state.index()].insert(ch, log_prob);
    }

    pub fn log_prob(&self, state: State, ch: char) -> f64 {
        self.rows[state.index()]
            .get(&ch)
            .copied()
            .unwrap_or(MIN_FLOAT)
    }

    pub fn len(&self) -> usize {
        self.rows.iter().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 四状态 HMM 参数（全部为自然对数概率）
#[derive(Debug, Clone)]
pub struct HmmModel {
    start: [f64; 4],
    /// trans[from][to]，非法转移为下限
    trans: [[f64; 4]; 4],
    emit: EmissionTable,
}

const START_PROB: [f64; 4] = [
    -0.26268660809250016, // B
    MIN_FLOAT,            // M
    MIN_FLOAT,            // E
    -1.4652633398537678,  // S
];

const TRANS_PROB: [[f64; 4]; 4] = [
    // B -> M, E
    [MIN_FLOAT, -0.916290731874155, -0.51082562376599, MIN_FLOAT],
    // M -> M, E
    [MIN_FLOAT, -1.2603623820268226, -0.33344856811948514, MIN_FLOAT],
    // E -> B, S
    [-0.5897149736854513, MIN_FLOAT, MIN_FLOAT, -0.8085250474669937],
    // S -> B, S
    [-0.7211965654669841, MIN_FLOAT, MIN_FLOAT, -0.6658631448798212],
];

impl HmmModel {
    pub fn new(start: [f64; 4], trans: [[f64; 4]; 4], emit: EmissionTable) -> Self {
        Self { start, trans, emit }
    }

    /// 使用标准起始 / 转移概率，只替换发射表
    pub fn with_emissions(emit: EmissionTable) -> Self {
        Self::new(START_PROB, TRANS_PROB, emit)
    }

    pub fn emissions(&self) -> &EmissionTable {
        &self.emit
    }

    /// 在合法前驱中选 `prev_prob + trans[prev][now]` 最大者；平局取先列出的前驱
    pub fn transition_route(&self, prev_prob: &[f64; 4], now: State) -> (State, f64) {
        let [first, second] = now.predecessors();
        let via_first = prev_prob[first.index()] + self.trans[first.index()][now.index()];
        let via_second = prev_prob[second.index()] + self.trans[second.index()][now.index()];
        if via_second > via_first {
            (second, via_second)
        } else {
            (first, via_first)
        }
    }

    /// 返回与输入等长的状态路径；单字恒为 `[S]`，空输入返回空路径
    pub fn viterbi(&self, chars: &[char]) -> Vec<State> {
        match chars.len() {
            0 => return Vec::new(),
            1 => return vec![State::S],
            _ => {}
        }

        let mut prob = [MIN_FLOAT; 4];
        for s in State::ALL {
            prob[s.index()] = self.start[s.index()] + self.emit.log_prob(s, chars[0]);
        }

        // back[i][s]: 位置 i 处于状态 s 时的最优前驱
        let mut back: Vec<[State; 4]> = Vec::with_capacity(chars.len());
        back.push(State::ALL);
        for &ch in &chars[1..] {
            let mut next = [MIN_FLOAT; 4];
            let mut from = State::ALL;
            for s in State::ALL {
                let (prev, route_prob) = self.transition_route(&prob, s);
                next[s.index()] = route_prob + self.emit.log_prob(s, ch);
                from[s.index()] = prev;
            }
            prob = next;
            back.push(from);
        }

        let last = if prob[State::E.index()] >= prob[State::S.index()] {
            State::E
        } else {
            State::S
        };

        let mut path = vec![last; chars.len()];
        let mut state = last;
        for i in (1..chars.len()).rev() {
            state = back[i][state.index()];
            path[i - 1] = state;
        }
        path
    }

    /// Viterbi + 按状态断词
    pub fn cut<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let chars: Vec<char> = text.chars().collect();
        let states = self.viterbi(&chars);
        cut_by_states(text, &states)
    }
}

/// 在每个 E / S 处闭合一个词；路径以 B/M 收尾时剩余部分作为最后一个词
pub fn cut_by_states<'a>(text: &'a str, states: &[State]) -> Vec<&'a str> {
    let mut words = Vec::new();
    let mut word_start = 0;
    for ((offset, ch), state) in text.char_indices().zip(states) {
        if state.ends_word() {
            let word_end = offset + ch.len_utf8();
            words.push(&text[word_start..word_end]);
            word_start = word_end;
        }
    }
    if word_start < text.len() {
        words.push(&text[word_start..]);
    }
    words
}
