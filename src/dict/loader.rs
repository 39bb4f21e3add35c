//! 词典与 HMM 发射表的文件加载
//!
//! - 词典：每行 `词条 词频 [词性]`，任何一行格式错误都使整次加载失败
//! - 发射表：JSON `{"B": {"一": -3.65, ...}, "E": {...}, "M": {...}, "S": {...}}`

use std::collections::HashMap;
use std::path::Path;

use tokio::fs;

use crate::core::LoadError;
use crate::segment::{EmissionTable, HmmModel, State};

use super::PrefixDictionary;

/// 异步读取并构建前缀词典
pub async fn load_dictionary(path: impl AsRef<Path>) -> Result<PrefixDictionary, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).await?;
    let dict = PrefixDictionary::parse(&content)?;
    tracing::info!(
        "Loaded dictionary {:?}: {} keys, corpus size {}",
        path,
        dict.len(),
        dict.corpus_size()
    );
    Ok(dict)
}

/// 异步读取发射概率表
pub async fn load_emissions(path: impl AsRef<Path>) -> Result<EmissionTable, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).await?;
    let table = parse_emissions(&content)?;
    tracing::info!("Loaded {} HMM emission entries from {:?}", table.len(), path);
    Ok(table)
}

/// 加载发射表并套用标准起始 / 转移概率；未给路径时发射表为空（全部取下限）
pub async fn load_hmm(emission_path: Option<&Path>) -> Result<HmmModel, LoadError> {
    let emit = match emission_path {
        Some(path) => load_emissions(path).await?,
        None => EmissionTable::default(),
    };
    Ok(HmmModel::with_emissions(emit))
}

pub fn parse_emissions(json: &str) -> Result<EmissionTable, LoadError> {
    let raw: HashMap<String, HashMap<String, f64>> = serde_json::from_str(json)?;
    let mut table = EmissionTable::default();
    for (state_name, row) in raw {
        let state: State = state_name.parse().map_err(LoadError::UnknownState)?;
        for (key, log_prob) in row {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => table.set(state, ch, log_prob),
                _ => tracing::warn!(
                    "Skipping emission key {:?} for state {}: not a single character",
                    key,
                    state
                ),
            }
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::core::DictError;
    use crate::segment::MIN_FLOAT;

    #[tokio::test]
    async fn test_load_dictionary() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all("今天 10 x\n天氣 3\n".as_bytes()).unwrap();

        let dict = load_dictionary(f.path()).await.unwrap();
        assert_eq!(dict.lookup("今"), Some(0));
        assert_eq!(dict.lookup("今天"), Some(10));
        assert_eq!(dict.lookup("天"), Some(0));
        assert_eq!(dict.lookup("天氣"), Some(3));
        assert_eq!(dict.corpus_size(), 13);
    }

    #[tokio::test]
    async fn test_load_dictionary_rejects_bad_line() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all("今天 10 x\n天氣 many\n".as_bytes()).unwrap();

        match load_dictionary(f.path()).await {
            Err(LoadError::Dict(DictError::Parse { line_no, .. })) => assert_eq!(line_no, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_dictionary_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_dictionary(dir.path().join("missing.txt")).await;
        assert!(matches!(result, Err(LoadError::Io(_))));
    }

    #[test]
    fn test_parse_emissions() {
        let table = parse_emissions(
            r#"{"B": {"一": -3.6544978750449433}, "M": {"一": -4.428158526435913},
                "E": {"一": -6.044987536255073}, "S": {"一": -4.92368982120877, "ab": -1.0}}"#,
        )
        .unwrap();
        assert_eq!(table.log_prob(State::B, '一'), -3.6544978750449433);
        assert_eq!(table.log_prob(State::M, '一'), -4.428158526435913);
        assert_eq!(table.log_prob(State::E, '一'), -6.044987536255073);
        assert_eq!(table.log_prob(State::S, '一'), -4.92368982120877);
        assert_eq!(table.log_prob(State::S, '二'), MIN_FLOAT);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_parse_emissions_errors() {
        assert!(matches!(
            parse_emissions(r#"{"X": {"一": -1.0}}"#),
            Err(LoadError::UnknownState(s)) if s == "X"
        ));
        assert!(matches!(parse_emissions("not json"), Err(LoadError::Json(_))));
    }

    #[tokio::test]
    async fn test_load_hmm_without_emissions() {
        let hmm = load_hmm(None).await.unwrap();
        assert!(hmm.emissions().is_empty());
    }
}
