//! Closed version range
//! 闭区间版本

use std::fmt;

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// Closed version range [start, end]
/// 闭区间版本 [start, end]
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Default,
  Serialize,
  Deserialize,
  Encode,
  Decode,
)]
pub struct Version {
  pub start: i64,
  pub end: i64,
}

impl Version {
  #[inline]
  pub const fn new(start: i64, end: i64) -> Self {
    Self { start, end }
  }

  /// Singleton version [v, v]
  /// 单点版本 [v, v]
  #[inline]
  pub const fn single(v: i64) -> Self {
    Self { start: v, end: v }
  }

  #[inline]
  pub const fn is_singleton(&self) -> bool {
    self.start == self.end
  }
}

impl From<(i64, i64)> for Version {
  #[inline]
  fn from((start, end): (i64, i64)) -> Self {
    Self { start, end }
  }
}

impl fmt::Display for Version {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[{}-{}]", self.start, self.end)
  }
}
