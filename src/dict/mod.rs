//! 词典：前缀词典与文件加载

pub mod loader;
pub mod prefix;

pub use loader::{load_dictionary, load_emissions, load_hmm, parse_emissions};
pub use prefix::PrefixDictionary;
