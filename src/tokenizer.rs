//! 分词器句柄
//!
//! 词典与 HMM 参数通过显式句柄传入，而不是全局状态；同一进程可以同时持有多个独立词典。
//! 词典由读写锁保护，锁的粒度是整次分词调用：分词期间持有读锁，插入词条持有写锁。

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::core::{DictError, SegmentError};
use crate::dict::PrefixDictionary;
use crate::pipeline::{self, ParallelOptions};
use crate::segment::HmmModel;

/// 分词器；`Clone` 共享同一份词典
#[derive(Clone)]
pub struct Tokenizer {
    dict: Arc<RwLock<PrefixDictionary>>,
    hmm: Arc<HmmModel>,
}

impl Tokenizer {
    pub fn new(dict: PrefixDictionary, hmm: HmmModel) -> Self {
        Self {
            dict: Arc::new(RwLock::new(dict)),
            hmm: Arc::new(hmm),
        }
    }

    pub fn from_lines<I, S>(lines: I, hmm: HmmModel) -> Result<Self, DictError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::new(PrefixDictionary::from_lines(lines)?, hmm))
    }

    pub fn hmm(&self) -> &HmmModel {
        &self.hmm
    }

    /// 顺序分词；分词在阻塞线程池上执行，整个过程持有词典读锁
    pub async fn cut(&self, text: &str, use_hmm: bool) -> Result<Vec<String>, SegmentError> {
        let dict = Arc::clone(&self.dict).read_owned().await;
        let hmm = use_hmm.then(|| Arc::clone(&self.hmm));
        let text = text.to_string();
        tokio::task::spawn_blocking(move || pipeline::cut_text(&dict, hmm.as_deref(), &text))
            .await
            .map_err(|e| SegmentError::WorkerFailed(e.to_string()))
    }

    /// 在 `workers` 个 worker 上并行分词；`ordered` 为 false 时块按完成顺序拼接
    pub async fn cut_parallel(
        &self,
        text: &str,
        use_hmm: bool,
        workers: usize,
        ordered: bool,
    ) -> Result<Vec<String>, SegmentError> {
        self.cut_parallel_with_cancel(text, use_hmm, workers, ordered, CancellationToken::new())
            .await
    }

    /// 同 [`Tokenizer::cut_parallel`]，`stop` 触发后空闲 worker 不再领取新块
    pub async fn cut_parallel_with_cancel(
        &self,
        text: &str,
        use_hmm: bool,
        workers: usize,
        ordered: bool,
        stop: CancellationToken,
    ) -> Result<Vec<String>, SegmentError> {
        let dict = Arc::new(Arc::clone(&self.dict).read_owned().await);
        let hmm = use_hmm.then(|| Arc::clone(&self.hmm));
        pipeline::cut_parallel(dict, hmm, text, ParallelOptions { workers, ordered }, stop).await
    }

    /// 插入词条，`freq == 0` 时自动估算；返回实际写入的词频
    ///
    /// 估算与写入在同一把写锁内完成（估算要跑一次分词，同样放到阻塞线程池）。
    pub async fn add_word(&self, word: &str, freq: u64) -> Result<u64, SegmentError> {
        let mut dict = Arc::clone(&self.dict).write_owned().await;
        let owned = word.to_string();
        let (applied, corpus_size) = tokio::task::spawn_blocking(move || {
            let applied = dict.add_term(&owned, freq);
            (applied, dict.corpus_size())
        })
        .await
        .map_err(|e| SegmentError::WorkerFailed(e.to_string()))?;
        tracing::debug!(word, freq = applied, corpus_size, "word added");
        Ok(applied)
    }

    pub async fn lookup(&self, term: &str) -> Option<u64> {
        self.dict.read().await.lookup(term)
    }

    pub async fn corpus_size(&self) -> u64 {
        self.dict.read().await.corpus_size()
    }
}
