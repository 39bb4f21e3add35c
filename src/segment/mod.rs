//! 分词算法：DAG + 最大概率路径、HMM Viterbi、汉字区段切分
//!
//! - **dag**: 词图构建、从后往前的动态规划、最优路径回溯
//! - **hmm**: B/M/E/S 四状态 Viterbi，识别未登录词
//! - **splitter**: 汉字 / 非汉字区段切分，非汉字区段的字母数字分组

pub mod dag;
pub mod hmm;
pub mod splitter;

pub use dag::{best_path, best_tail, build_dag, cut_path, find_route, Dag, Route, TailProba};
pub use hmm::{cut_by_states, EmissionTable, HmmModel, State};
pub use splitter::{cut_non_cjk, split_text, TextBlock};

/// 「概率近似为 0」的对数下限；不用负无穷，保证加法与比较始终有定义
pub const MIN_FLOAT: f64 = -3.14e100;
