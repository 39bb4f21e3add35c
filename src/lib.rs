//! Hancut - 中文分词引擎
//!
//! 模块划分：
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: 错误类型
//! - **dict**: 前缀词典、词典 / HMM 参数文件加载
//! - **segment**: DAG + 最大概率路径、HMM Viterbi、汉字区段切分
//! - **pipeline**: 顺序与并行（worker 池）分词流水线
//! - **tokenizer**: 分词器句柄（词典读写锁 + HMM 参数）
//! - **observability**: 日志初始化

pub mod config;
pub mod core;
pub mod dict;
pub mod observability;
pub mod pipeline;
pub mod segment;
pub mod tokenizer;

#[cfg(test)]
pub(crate) mod test_utils;

pub use crate::core::{DictError, LoadError, SegmentError};
pub use dict::PrefixDictionary;
pub use segment::{HmmModel, State};
pub use tokenizer::Tokenizer;
