//! Rowset metadata
//! Rowset 元数据

use std::sync::Arc;

use crate::{Version, pb::RowsetMetaPb};

/// Shared immutable rowset meta handle
/// 共享的不可变 rowset 元数据句柄
pub type RowsetMetaRef = Arc<RowsetMeta>;

/// Rowset metadata, immutable once built
/// Rowset 元数据，构建后不可变
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowsetMeta {
  pb: RowsetMetaPb,
}

impl RowsetMeta {
  /// Empty rowset covering `version`
  /// 覆盖 `version` 的空 rowset
  pub fn new(rowset_id: i64, version: Version) -> Self {
    Self {
      pb: RowsetMetaPb {
        rowset_id,
        start_version: version.start,
        end_version: version.end,
        empty: true,
        ..Default::default()
      },
    }
  }

  #[inline]
  pub fn from_pb(pb: RowsetMetaPb) -> Self {
    Self { pb }
  }

  #[inline]
  pub fn to_pb(&self) -> RowsetMetaPb {
    self.pb.clone()
  }

  #[inline]
  pub fn as_pb(&self) -> &RowsetMetaPb {
    &self.pb
  }

  /// Set row count and size, clears the empty flag
  /// 设置行数与大小，清除空标记
  pub fn with_rows(mut self, num_rows: i64, total_disk_size: i64) -> Self {
    self.pb.num_rows = num_rows;
    self.pb.total_disk_size = total_disk_size;
    self.pb.empty = num_rows == 0;
    self
  }

  pub fn with_tablet(mut self, tablet_id: i64, schema_hash: i64) -> Self {
    self.pb.tablet_id = tablet_id;
    self.pb.tablet_schema_hash = schema_hash;
    self
  }

  #[inline]
  pub fn version(&self) -> Version {
    Version::new(self.pb.start_version, self.pb.end_version)
  }

  #[inline]
  pub fn start_version(&self) -> i64 {
    self.pb.start_version
  }

  #[inline]
  pub fn end_version(&self) -> i64 {
    self.pb.end_version
  }

  #[inline]
  pub fn rowset_id(&self) -> i64 {
    self.pb.rowset_id
  }

  #[inline]
  pub fn num_rows(&self) -> i64 {
    self.pb.num_rows
  }

  #[inline]
  pub fn total_disk_size(&self) -> i64 {
    self.pb.total_disk_size
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.pb.empty
  }
}
