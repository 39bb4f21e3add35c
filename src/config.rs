//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `HANCUT__*` 覆盖（双下划线表示嵌套，如 `HANCUT__PIPELINE__WORKERS=8`）。

use std::path::PathBuf;

use serde::Deserialize;

use crate::pipeline::ParallelOptions;

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub dictionary: DictionarySection,
    #[serde(default)]
    pub hmm: HmmSection,
    #[serde(default)]
    pub pipeline: PipelineSection,
}

/// [dictionary] 段：词典文件（`词条 词频 [词性]`）
#[derive(Debug, Clone, Deserialize)]
pub struct DictionarySection {
    #[serde(default = "default_dictionary_path")]
    pub path: PathBuf,
}

fn default_dictionary_path() -> PathBuf {
    PathBuf::from("dict.txt")
}

impl Default for DictionarySection {
    fn default() -> Self {
        Self {
            path: default_dictionary_path(),
        }
    }
}

/// [hmm] 段：是否启用未登录词识别、发射概率 JSON 路径
#[derive(Debug, Clone, Deserialize)]
pub struct HmmSection {
    #[serde(default = "default_hmm_enabled")]
    pub enabled: bool,
    pub emission_path: Option<PathBuf>,
}

fn default_hmm_enabled() -> bool {
    true
}

impl Default for HmmSection {
    fn default() -> Self {
        Self {
            enabled: default_hmm_enabled(),
            emission_path: None,
        }
    }
}

/// [pipeline] 段：顺序 / 并行、worker 数、是否保序
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineSection {
    #[serde(default)]
    pub parallel: bool,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default = "default_ordered")]
    pub ordered: bool,
}

fn default_workers() -> usize {
    4
}

fn default_ordered() -> bool {
    true
}

impl Default for PipelineSection {
    fn default() -> Self {
        Self {
            parallel: false,
            workers: default_workers(),
            ordered: default_ordered(),
        }
    }
}

impl PipelineSection {
    pub fn parallel_options(&self) -> ParallelOptions {
        ParallelOptions {
            workers: self.workers,
            ordered: self.ordered,
        }
    }
}

/// 从 config 目录加载配置，环境变量 HANCUT__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 HANCUT__*（双下划线表示嵌套键）
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("HANCUT")
            .separator("__")
            .try_parsing(true),
    );

    let c = builder.build()?;
    c.try_deserialize()
}
