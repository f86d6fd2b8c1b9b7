//! Delete predicate log keyed by version
//! 以版本为键的删除条件日志

use log::info;
use olap_base::{Version, pb::DeletePredicatePb};

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DelPredLog(Vec<DeletePredicatePb>);

impl DelPredLog {
  pub fn from_pb(li: &[DeletePredicatePb]) -> Self {
    Self(li.to_vec())
  }

  #[inline]
  pub fn as_slice(&self) -> &[DeletePredicatePb] {
    &self.0
  }

  /// Upsert: an existing entry for `version` gets its conditions replaced
  /// 插入或更新：已存在 `version` 的条目会替换其条件
  pub fn add(&mut self, pred: &DeletePredicatePb, version: i64) {
    let sub = pred.sub_predicates.clone();
    match self.0.iter_mut().find(|p| p.version == version) {
      Some(p) => p.sub_predicates = sub,
      None => self.0.push(DeletePredicatePb {
        version,
        sub_predicates: sub,
      }),
    }
  }

  /// Drop every entry at `version.start`; order of the rest is not kept
  /// 删除 `version.start` 处的所有条目；其余条目顺序不保证
  pub fn remove(&mut self, version: Version) -> Result<()> {
    if !version.is_singleton() {
      return Err(Error::NotSingleton(version));
    }
    let mut i = 0;
    while i < self.0.len() {
      if self.0[i].version == version.start {
        let p = self.0.swap_remove(i);
        info!(
          "remove delete predicate: version={}, condition={}",
          p.version,
          p.sub_predicates.join(";")
        );
      } else {
        i += 1;
      }
    }
    Ok(())
  }

  /// Whether a singleton `version` carries a delete predicate
  /// 单点 `version` 是否带有删除条件
  pub fn contains(&self, version: Version) -> bool {
    version.is_singleton() && self.0.iter().any(|p| p.version == version.start)
  }
}
