//! Wire messages for tablet metadata
//! tablet 元数据线上消息
//!
//! Binary form via bitcode, JSON form via serde.
//! 二进制形式使用 bitcode，JSON 形式使用 serde。

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::{
  AggregationType, AlterTabletState, AlterTabletType, CompressKind, KeysType, PrimitiveType,
};

/// Aggregate tablet meta message
/// tablet 元数据聚合消息
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Encode, Decode)]
pub struct TabletMetaPb {
  pub table_id: i64,
  pub partition_id: i64,
  pub tablet_id: i64,
  pub schema_hash: i64,
  pub shard_id: i64,
  pub creation_time: i64,
  pub cumulative_layer_point: i64,
  /// Raw `TabletState` tag / `TabletState` 原始标签
  pub tablet_state: i32,
  pub schema: TabletSchemaPb,
  pub rs_metas: Vec<RowsetMetaPb>,
  pub inc_rs_metas: Vec<RowsetMetaPb>,
  pub del_preds: Vec<DeletePredicatePb>,
  pub alter_task: Option<AlterTabletPb>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Encode, Decode)]
pub struct TabletSchemaPb {
  pub keys_type: KeysType,
  pub columns: Vec<ColumnPb>,
  pub num_short_key_columns: u32,
  pub num_rows_per_row_block: u32,
  pub compress_kind: CompressKind,
  /// Bloom filter false positive target / 布隆过滤器误判率
  pub bf_fpp: Option<f64>,
  pub next_column_unique_id: u32,
}

/// Column descriptor
/// 列描述
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Encode, Decode)]
pub struct ColumnPb {
  pub unique_id: u32,
  pub name: String,
  #[serde(rename = "type")]
  pub ty: PrimitiveType,
  pub is_key: bool,
  pub aggregation: AggregationType,
  pub is_nullable: bool,
  pub default_value: Option<String>,
  pub precision: Option<i32>,
  pub frac: Option<i32>,
  pub length: u32,
  pub index_length: u32,
  pub is_bf_column: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Encode, Decode)]
pub struct RowsetMetaPb {
  pub rowset_id: i64,
  pub tablet_id: i64,
  pub tablet_schema_hash: i64,
  pub start_version: i64,
  pub end_version: i64,
  pub version_hash: i64,
  pub num_rows: i64,
  pub total_disk_size: i64,
  pub data_disk_size: i64,
  pub index_disk_size: i64,
  pub empty: bool,
  pub creation_time: i64,
  pub delete_predicate: Option<DeletePredicatePb>,
}

/// Delete conditions taking effect at one version
/// 在某一版本生效的删除条件
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Encode, Decode)]
pub struct DeletePredicatePb {
  pub version: i64,
  pub sub_predicates: Vec<String>,
}

impl DeletePredicatePb {
  pub fn new<S: Into<String>>(version: i64, sub_predicates: impl IntoIterator<Item = S>) -> Self {
    Self {
      version,
      sub_predicates: sub_predicates.into_iter().map(Into::into).collect(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Encode, Decode)]
pub struct AlterTabletPb {
  pub alter_state: AlterTabletState,
  pub related_tablet_id: i64,
  pub related_schema_hash: i64,
  pub alter_type: AlterTabletType,
  pub rowsets_to_alter: Vec<RowsetMetaPb>,
}
