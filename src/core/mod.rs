//! 核心公共类型：错误

pub mod error;

pub use error::{DictError, LoadError, SegmentError};
