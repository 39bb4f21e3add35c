//! hancut - 中文分词命令行
//!
//! 入口：初始化日志、加载配置 / 词典 / HMM 参数，从 stdin 读入文本，输出以 " / " 分隔的分词结果。
//!
//! 用法：`hancut [config.toml] < input.txt`

use std::path::PathBuf;

use anyhow::Context;
use hancut::{config::load_config, dict, observability, Tokenizer};
use tokio::io::AsyncReadExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 日志：默认 info，可通过 RUST_LOG 覆盖
    observability::init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let cfg = load_config(config_path).context("Failed to load config")?;

    let dictionary = dict::load_dictionary(&cfg.dictionary.path)
        .await
        .with_context(|| format!("Failed to load dictionary {:?}", cfg.dictionary.path))?;
    let hmm = dict::load_hmm(cfg.hmm.emission_path.as_deref())
        .await
        .context("Failed to load HMM emission table")?;
    let tokenizer = Tokenizer::new(dictionary, hmm);

    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("Failed to read stdin")?;

    let tokens = if cfg.pipeline.parallel {
        let opts = cfg.pipeline.parallel_options();
        tokenizer
            .cut_parallel(&text, cfg.hmm.enabled, opts.workers, opts.ordered)
            .await
            .context("Parallel segmentation failed")?
    } else {
        tokenizer
            .cut(&text, cfg.hmm.enabled)
            .await
            .context("Segmentation failed")?
    };

    tracing::info!("Segmented {} chars into {} tokens", text.chars().count(), tokens.len());
    println!("{}", tokens.join(" / "));
    Ok(())
}
