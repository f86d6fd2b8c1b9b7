//! Build a fresh tablet meta from a schema description
//! 由 schema 描述构建新的 tablet 元数据

use std::collections::HashMap;

use olap_base::{
  AggregationType, PrimitiveType,
  desc::{ColumnDesc, SchemaDesc},
  field_len, now_secs,
  pb::{ColumnPb, TabletMetaPb, TabletSchemaPb},
};

use crate::{Conf, Error, Result, State, TabletMeta, conf::CreateConf};

/// Identity of a new tablet
/// 新 tablet 的标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TabletIdent {
  pub table_id: i64,
  pub partition_id: i64,
  pub tablet_id: i64,
  pub schema_hash: i64,
  pub shard_id: i64,
}

fn column(desc: &ColumnDesc, unique_id: u32, conf: &CreateConf) -> ColumnPb {
  let ty = desc.ty;
  let length = field_len(ty.ty, ty.len.unwrap_or(0));
  let index_length = if ty.ty.is_var_len() {
    ty.index_len.unwrap_or(conf.index_len)
  } else {
    length
  };
  let (precision, frac) = if ty.ty == PrimitiveType::Decimal {
    (ty.precision, ty.scale)
  } else {
    (None, None)
  };
  ColumnPb {
    unique_id,
    name: desc.name.clone(),
    ty: ty.ty,
    is_key: desc.is_key,
    aggregation: if desc.is_key {
      AggregationType::None
    } else {
      desc.aggregation
    },
    is_nullable: desc.is_allow_null,
    default_value: desc.default_value.clone(),
    precision,
    frac,
    length,
    index_length,
    is_bf_column: desc.is_bloom_filter_column == Some(true),
  }
}

impl TabletMeta {
  /// `col_ordinal_to_unique_id` maps each column position in `desc` to its unique id.
  /// Creation time is now and the cumulative layer point starts at -1.
  /// The record is unbound, `bind` it before persisting.
  ///
  /// `col_ordinal_to_unique_id` 将 `desc` 中每列的位置映射为唯一 id。
  /// 创建时间为当前时间，累积层点初始为 -1。
  /// 记录未绑定数据目录，持久化前需 `bind`。
  pub fn create(
    ident: TabletIdent,
    desc: &SchemaDesc,
    next_unique_id: u32,
    col_ordinal_to_unique_id: &HashMap<u32, u32>,
    conf: &[Conf],
  ) -> Result<Self> {
    let conf = CreateConf::new(conf);

    let mut columns = Vec::with_capacity(desc.columns.len());
    for (ordinal, c) in (0u32..).zip(&desc.columns) {
      let unique_id = *col_ordinal_to_unique_id
        .get(&ordinal)
        .ok_or(Error::UnknownColumn(ordinal))?;
      columns.push(column(c, unique_id, &conf));
    }

    let has_bf_columns = columns.iter().any(|c| c.is_bf_column);
    let schema = TabletSchemaPb {
      keys_type: desc.keys_type,
      columns,
      num_short_key_columns: desc.short_key_column_count,
      num_rows_per_row_block: conf.rows_per_row_block,
      compress_kind: conf.compress,
      bf_fpp: desc.bloom_filter_fpp.filter(|_| has_bf_columns),
      next_column_unique_id: next_unique_id,
    };

    let pb = TabletMetaPb {
      table_id: ident.table_id,
      partition_id: ident.partition_id,
      tablet_id: ident.tablet_id,
      schema_hash: ident.schema_hash,
      shard_id: ident.shard_id,
      creation_time: now_secs(),
      cumulative_layer_point: -1,
      schema,
      ..Default::default()
    };
    Ok(Self::from_state(State::from_pb(&pb)))
  }
}
