//! Error types for olap_store
//! olap_store 错误类型

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
  #[error("io: {0}")]
  Io(#[from] std::io::Error),

  #[error("fs: {0}")]
  Fs(#[from] olap_fs::Error),

  #[error("bad key / 无效键: {0}")]
  BadKey(Box<str>),
}
