//! 分词错误类型
//!
//! 词典构建失败是致命的（整次构建作废）；查询未命中、发射概率缺失都不是错误，
//! 分别走 DAG 兜底边与 HMM 下限概率。

use thiserror::Error;

/// 词典构建错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DictError {
    /// 第 `line_no` 行（从 1 开始）缺少词频或词频不是数字
    #[error("Dictionary parse error at line {line_no} ({line:?}): {reason}")]
    Parse {
        line_no: usize,
        line: String,
        reason: String,
    },
}

/// 并行分词过程中的错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SegmentError {
    #[error("Worker count must be at least 1")]
    NoWorkers,

    /// 停止信号在全部文本块处理完之前触发
    #[error("Segmentation cancelled after {completed}/{total} blocks")]
    Cancelled { completed: usize, total: usize },

    /// worker 任务 panic；分词是纯函数，重试没有意义
    #[error("Worker failed: {0}")]
    WorkerFailed(String),
}

/// 词典 / HMM 参数文件加载错误
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Dict(#[from] DictError),

    #[error("Unknown HMM state in emission table: {0}")]
    UnknownState(String),
}
