//! Error types for olap_fs
//! olap_fs 错误类型

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
  #[error("io: {0}")]
  Io(#[from] std::io::Error),

  #[error("locked / 已锁定")]
  Locked,

  #[error("corrupt file / 文件损坏: {0}")]
  Corrupt(CorruptKind),

  #[error("payload too large: {0}")]
  TooLarge(usize),
}

/// Which header check failed
/// 哪一项头部校验失败
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorruptKind {
  #[error("shorter than header")]
  Short,
  #[error("signature mismatch")]
  Signature,
  #[error("unknown format version")]
  Version,
  #[error("length mismatch")]
  Length,
  #[error("header checksum mismatch")]
  HeadChecksum,
  #[error("payload checksum mismatch")]
  Checksum,
}
