//! 错误定义 Error definitions

use olap_base::Version;
use olap_fs::CorruptKind;
use thiserror::Error;

/// 结果类型 Result type
pub type Result<T> = std::result::Result<T, Error>;

/// 错误类型 Error type
#[derive(Error, Debug)]
pub enum Error {
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  /// Length, signature or checksum mismatch
  /// 长度、签名或校验和不匹配
  #[error("corrupt file / 文件损坏: {0}")]
  Corrupt(CorruptKind),

  #[error("locked / 已锁定")]
  Locked,

  #[error("store: {0}")]
  Store(olap_store::Error),

  #[error("decode: {0}")]
  Decode(Box<str>),

  #[error("encode: {0}")]
  Encode(Box<str>),

  #[error("rowset already exist / rowset 已存在: version={version}, rowset_id={rowset_id}")]
  AlreadyExists { version: Version, rowset_id: i64 },

  #[error("version is not singleton / 版本非单点: {0}")]
  NotSingleton(Version),

  #[error("data dir dropped / 数据目录已释放")]
  DataDirGone,

  #[error("no data dir bound / 未绑定数据目录")]
  NoDataDir,

  #[error("tablet meta not found: tablet_id={tablet_id}, schema_hash={schema_hash}")]
  NotFound { tablet_id: i64, schema_hash: i64 },

  #[error("no unique id for column ordinal {0}")]
  UnknownColumn(u32),
}

impl From<olap_fs::Error> for Error {
  fn from(e: olap_fs::Error) -> Self {
    match e {
      olap_fs::Error::Io(e) => Self::Io(e),
      olap_fs::Error::Corrupt(kind) => Self::Corrupt(kind),
      olap_fs::Error::Locked => Self::Locked,
      olap_fs::Error::TooLarge(n) => Self::Encode(format!("payload too large: {n}").into()),
    }
  }
}

impl From<olap_store::Error> for Error {
  fn from(e: olap_store::Error) -> Self {
    match e {
      olap_store::Error::Fs(e) => e.into(),
      e => Self::Store(e),
    }
  }
}
