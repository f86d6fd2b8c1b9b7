//! Enumerated tags carried by schemas and tablet metas
//! schema 与 tablet 元数据中的枚举标签

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// Column logical type
/// 列逻辑类型
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Encode, Decode,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrimitiveType {
  Boolean,
  Tinyint,
  Smallint,
  #[default]
  Int,
  Bigint,
  Largeint,
  Float,
  Double,
  Date,
  Datetime,
  Decimal,
  Char,
  Varchar,
  Hll,
}

impl PrimitiveType {
  /// Stored with a length prefix
  /// 带长度前缀存储
  #[inline]
  pub const fn is_var_len(self) -> bool {
    matches!(self, Self::Varchar | Self::Hll)
  }
}

/// Value column aggregation
/// 值列聚合方式
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Encode, Decode,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AggregationType {
  #[default]
  None,
  Sum,
  Min,
  Max,
  Replace,
  HllUnion,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Encode, Decode,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeysType {
  #[default]
  DupKeys,
  UniqueKeys,
  AggKeys,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Encode, Decode,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum CompressKind {
  None,
  Lzo,
  #[default]
  Lz4,
}

/// Tablet lifecycle state
/// tablet 生命周期状态
///
/// Stored on the wire as a raw tag so that unknown tags survive decoding.
/// 线上以原始标签存储，未知标签不会导致解码失败。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TabletState {
  #[default]
  NotReady,
  Running,
  Tombstoned,
  Stopped,
  Shutdown,
}

impl TabletState {
  #[inline]
  pub const fn tag(self) -> i32 {
    match self {
      Self::NotReady => 0,
      Self::Running => 1,
      Self::Tombstoned => 2,
      Self::Stopped => 3,
      Self::Shutdown => 4,
    }
  }
}

impl TryFrom<i32> for TabletState {
  /// The unrecognised tag
  /// 无法识别的标签
  type Error = i32;

  fn try_from(tag: i32) -> Result<Self, i32> {
    Ok(match tag {
      0 => Self::NotReady,
      1 => Self::Running,
      2 => Self::Tombstoned,
      3 => Self::Stopped,
      4 => Self::Shutdown,
      _ => return Err(tag),
    })
  }
}

/// Alter task progress
/// 变更任务进度
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Encode, Decode,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlterTabletState {
  #[default]
  None,
  Running,
  Finished,
  Failed,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Encode, Decode,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlterTabletType {
  #[default]
  SchemaChange,
  Rollup,
}
