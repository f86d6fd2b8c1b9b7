//! Rowset metas keyed by version
//! 以版本为键的 rowset 元数据集合

use std::sync::Arc;

use log::warn;
use olap_base::{RowsetMeta, RowsetMetaRef, Version, pb::RowsetMetaPb};

use crate::{Error, Result};

/// Max version of an empty set
/// 空集合的最大版本
pub const EMPTY_MAX_VERSION: Version = Version { start: -1, end: 0 };

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowsetSet(Vec<RowsetMetaRef>);

impl RowsetSet {
  pub fn from_pb(li: &[RowsetMetaPb]) -> Self {
    Self(
      li.iter()
        .map(|pb| Arc::new(RowsetMeta::from_pb(pb.clone())))
        .collect(),
    )
  }

  pub fn to_pb(&self) -> Vec<RowsetMetaPb> {
    self.0.iter().map(|rs| rs.to_pb()).collect()
  }

  #[inline]
  pub fn as_slice(&self) -> &[RowsetMetaRef] {
    &self.0
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn find(&self, version: Version) -> Option<&RowsetMetaRef> {
    self.0.iter().find(|rs| rs.version() == version)
  }

  /// Append unless the version is already present, the error names the existing rowset
  /// 追加，版本已存在时拒绝，错误中为已存在的 rowset
  pub fn add(&mut self, rs: RowsetMetaRef) -> Result<()> {
    let version = rs.version();
    if let Some(exist) = self.find(version) {
      let rowset_id = exist.rowset_id();
      warn!("rowset already exist: version={version}, rowset_id={rowset_id}");
      return Err(Error::AlreadyExists { version, rowset_id });
    }
    self.0.push(rs);
    Ok(())
  }

  /// Remove every entry with `version`, returns how many were dropped
  /// 删除所有 `version` 条目，返回删除数量
  pub fn remove(&mut self, version: Version) -> usize {
    let len = self.0.len();
    self.0.retain(|rs| rs.version() != version);
    len - self.0.len()
  }

  /// Remove the versions of `to_delete`, then append `to_add` unchecked
  /// 删除 `to_delete` 的版本，再不做检查地追加 `to_add`
  pub fn modify(&mut self, to_add: &[RowsetMetaRef], to_delete: &[RowsetMetaRef]) {
    for rs in to_delete {
      self.remove(rs.version());
    }
    self.0.extend(to_add.iter().cloned());
  }

  pub fn replace(&mut self, li: &[RowsetMetaRef]) {
    self.0 = li.to_vec();
  }

  /// Greatest end, ties broken by greatest start
  /// 取最大结束版本，相同时取最大起始版本
  pub fn max_version(&self) -> Version {
    self
      .0
      .iter()
      .map(|rs| rs.version())
      .max_by_key(|v| (v.end, v.start))
      .unwrap_or(EMPTY_MAX_VERSION)
  }
}
