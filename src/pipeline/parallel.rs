//! 并行分词：固定大小的 worker 池消费预先填满的块队列
//!
//! - 文本先整体切块，全部块（带序号）放入有界队列后关闭队列
//! - 每个 worker 是一个 `spawn_blocking` 任务（分词是 CPU 密集型），循环取块、分词、发出 `ResultBlock`
//! - 编排者收完结果后等待全部 worker 结束（完成屏障），再按需按序号排序
//! - 停止信号是协作式的：worker 只在取下一块之前检查，正在处理的块总会完成

use std::sync::{Arc, Mutex};

use futures_util::future::join_all;
use tokio::sync::{mpsc, OwnedRwLockReadGuard};
use tokio_util::sync::CancellationToken;

use crate::core::SegmentError;
use crate::dict::PrefixDictionary;
use crate::segment::{split_text, HmmModel, TextBlock};

use super::{cut_block, ResultBlock};

/// 并行参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelOptions {
    /// worker 数量，至少 1
    pub workers: usize,
    /// 是否按原文顺序输出
    pub ordered: bool,
}

impl Default for ParallelOptions {
    fn default() -> Self {
        Self {
            workers: 4,
            ordered: true,
        }
    }
}

/// 队列中的工作项（持有文本副本，可跨线程移动）
#[derive(Debug)]
struct WorkItem {
    seq: usize,
    text: String,
    is_cjk: bool,
}

impl From<TextBlock<'_>> for WorkItem {
    fn from(block: TextBlock<'_>) -> Self {
        Self {
            seq: block.seq,
            text: block.text.to_string(),
            is_cjk: block.is_cjk,
        }
    }
}

/// 在 worker 池上分词
///
/// `dict` 是整次调用期间持有的词典读锁；`hmm` 为 `None` 时不做未登录词识别。
pub async fn cut_parallel(
    dict: Arc<OwnedRwLockReadGuard<PrefixDictionary>>,
    hmm: Option<Arc<HmmModel>>,
    text: &str,
    options: ParallelOptions,
    stop: CancellationToken,
) -> Result<Vec<String>, SegmentError> {
    cut_parallel_with_hook(dict, hmm, text, options, stop, None).await
}

/// 每个结果块发出前在 worker 线程上调用
pub(crate) type BlockHook = Arc<dyn Fn(&ResultBlock) + Send + Sync>;

pub(crate) async fn cut_parallel_with_hook(
    dict: Arc<OwnedRwLockReadGuard<PrefixDictionary>>,
    hmm: Option<Arc<HmmModel>>,
    text: &str,
    options: ParallelOptions,
    stop: CancellationToken,
    on_block: Option<BlockHook>,
) -> Result<Vec<String>, SegmentError> {
    if options.workers == 0 {
        return Err(SegmentError::NoWorkers);
    }

    let blocks: Vec<WorkItem> = split_text(text).into_iter().map(WorkItem::from).collect();
    let total = blocks.len();
    if total == 0 {
        return Ok(Vec::new());
    }

    let (block_tx, block_rx) = mpsc::channel::<WorkItem>(total);
    for item in blocks {
        block_tx
            .send(item)
            .await
            .map_err(|_| SegmentError::WorkerFailed("work queue closed".to_string()))?;
    }
    // 关闭队列：取空后 worker 自然退出
    drop(block_tx);
    let queue = Arc::new(Mutex::new(block_rx));

    tracing::debug!(
        blocks = total,
        workers = options.workers,
        ordered = options.ordered,
        "dispatching blocks to worker pool"
    );

    let (result_tx, mut result_rx) = mpsc::channel::<ResultBlock>(total);
    let mut handles = Vec::with_capacity(options.workers);
    for worker_id in 0..options.workers {
        let queue = Arc::clone(&queue);
        let result_tx = result_tx.clone();
        let dict = Arc::clone(&dict);
        let hmm = hmm.clone();
        let stop = stop.clone();
        let on_block = on_block.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            run_worker(
                worker_id,
                &queue,
                &result_tx,
                &dict,
                hmm.as_deref(),
                &stop,
                on_block.as_deref(),
            )
        }));
    }
    drop(result_tx);

    let mut results = Vec::with_capacity(total);
    while let Some(block) = result_rx.recv().await {
        results.push(block);
    }

    // 完成屏障
    for joined in join_all(handles).await {
        joined.map_err(|e| SegmentError::WorkerFailed(e.to_string()))?;
    }

    if results.len() < total {
        tracing::warn!(
            "Segmentation stopped early: {}/{} blocks processed",
            results.len(),
            total
        );
        return Err(SegmentError::Cancelled {
            completed: results.len(),
            total,
        });
    }

    if options.ordered {
        results.sort_by_key(|block| block.seq);
    }
    Ok(results.into_iter().flat_map(|block| block.tokens).collect())
}

/// worker 主循环，返回处理的块数
fn run_worker(
    worker_id: usize,
    queue: &Mutex<mpsc::Receiver<WorkItem>>,
    results: &mpsc::Sender<ResultBlock>,
    dict: &PrefixDictionary,
    hmm: Option<&HmmModel>,
    stop: &CancellationToken,
    on_block: Option<&(dyn Fn(&ResultBlock) + Send + Sync)>,
) -> usize {
    let mut processed = 0;
    loop {
        if stop.is_cancelled() {
            tracing::debug!(worker = worker_id, processed, "stop signal received, declining new work");
            break;
        }
        let next = match queue.lock() {
            Ok(mut rx) => rx.blocking_recv(),
            Err(_) => None,
        };
        let Some(item) = next else {
            break;
        };

        let block = TextBlock::new(item.seq, &item.text, item.is_cjk);
        let tokens = cut_block(dict, hmm, &block)
            .into_iter()
            .map(str::to_string)
            .collect();
        let result = ResultBlock {
            seq: item.seq,
            tokens,
        };
        if let Some(hook) = on_block {
            hook(&result);
        }
        if results.blocking_send(result).is_err() {
            break;
        }
        processed += 1;
    }
    processed
}
