//! Tablet schema
//! Tablet schema

use crate::{
  CompressKind, KeysType,
  pb::{ColumnPb, TabletSchemaPb},
};

/// Column layout of a tablet
/// tablet 列布局
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TabletSchema {
  keys_type: KeysType,
  columns: Vec<ColumnPb>,
  num_key_columns: usize,
  num_short_key_columns: u32,
  num_rows_per_row_block: u32,
  compress_kind: CompressKind,
  bf_fpp: Option<f64>,
  next_column_unique_id: u32,
}

impl TabletSchema {
  pub fn from_pb(pb: &TabletSchemaPb) -> Self {
    Self {
      keys_type: pb.keys_type,
      num_key_columns: pb.columns.iter().filter(|c| c.is_key).count(),
      columns: pb.columns.clone(),
      num_short_key_columns: pb.num_short_key_columns,
      num_rows_per_row_block: pb.num_rows_per_row_block,
      compress_kind: pb.compress_kind,
      bf_fpp: pb.bf_fpp,
      next_column_unique_id: pb.next_column_unique_id,
    }
  }

  pub fn to_pb(&self) -> TabletSchemaPb {
    TabletSchemaPb {
      keys_type: self.keys_type,
      columns: self.columns.clone(),
      num_short_key_columns: self.num_short_key_columns,
      num_rows_per_row_block: self.num_rows_per_row_block,
      compress_kind: self.compress_kind,
      bf_fpp: self.bf_fpp,
      next_column_unique_id: self.next_column_unique_id,
    }
  }

  #[inline]
  pub fn keys_type(&self) -> KeysType {
    self.keys_type
  }

  #[inline]
  pub fn columns(&self) -> &[ColumnPb] {
    &self.columns
  }

  #[inline]
  pub fn column(&self, ordinal: usize) -> Option<&ColumnPb> {
    self.columns.get(ordinal)
  }

  #[inline]
  pub fn num_columns(&self) -> usize {
    self.columns.len()
  }

  #[inline]
  pub fn num_key_columns(&self) -> usize {
    self.num_key_columns
  }

  #[inline]
  pub fn num_short_key_columns(&self) -> u32 {
    self.num_short_key_columns
  }

  #[inline]
  pub fn num_rows_per_row_block(&self) -> u32 {
    self.num_rows_per_row_block
  }

  #[inline]
  pub fn compress_kind(&self) -> CompressKind {
    self.compress_kind
  }

  #[inline]
  pub fn bf_fpp(&self) -> Option<f64> {
    self.bf_fpp
  }

  #[inline]
  pub fn next_column_unique_id(&self) -> u32 {
    self.next_column_unique_id
  }

  /// Ordinal of the column named `name`
  /// 名为 `name` 的列序号
  pub fn field_index(&self, name: &str) -> Option<usize> {
    self.columns.iter().position(|c| c.name == name)
  }

  pub fn has_bf_columns(&self) -> bool {
    self.columns.iter().any(|c| c.is_bf_column)
  }
}
