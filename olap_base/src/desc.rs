//! Logical schema description sent by the frontend on tablet creation
//! 创建 tablet 时前端下发的逻辑 schema 描述

use crate::{AggregationType, KeysType, PrimitiveType};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaDesc {
  pub short_key_column_count: u32,
  pub keys_type: KeysType,
  pub columns: Vec<ColumnDesc>,
  pub bloom_filter_fpp: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnDesc {
  pub name: String,
  pub ty: TypeDesc,
  pub is_key: bool,
  /// Ignored for key columns / 键列忽略此项
  pub aggregation: AggregationType,
  pub is_allow_null: bool,
  pub default_value: Option<String>,
  pub is_bloom_filter_column: Option<bool>,
}

/// Declared column type
/// 声明的列类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypeDesc {
  pub ty: PrimitiveType,
  /// Declared length for CHAR / VARCHAR / HLL / CHAR、VARCHAR、HLL 的声明长度
  pub len: Option<u32>,
  pub index_len: Option<u32>,
  pub precision: Option<i32>,
  pub scale: Option<i32>,
}

impl TypeDesc {
  #[inline]
  pub const fn new(ty: PrimitiveType) -> Self {
    Self {
      ty,
      len: None,
      index_len: None,
      precision: None,
      scale: None,
    }
  }

  #[inline]
  pub const fn with_len(ty: PrimitiveType, len: u32) -> Self {
    Self {
      len: Some(len),
      ..Self::new(ty)
    }
  }

  #[inline]
  pub const fn decimal(precision: i32, scale: i32) -> Self {
    Self {
      precision: Some(precision),
      scale: Some(scale),
      ..Self::new(PrimitiveType::Decimal)
    }
  }
}

impl ColumnDesc {
  /// Non-null key column
  /// 非空键列
  pub fn key(name: impl Into<String>, ty: TypeDesc) -> Self {
    Self {
      name: name.into(),
      ty,
      is_key: true,
      ..Default::default()
    }
  }

  /// Nullable value column
  /// 可空值列
  pub fn value(name: impl Into<String>, ty: TypeDesc, aggregation: AggregationType) -> Self {
    Self {
      name: name.into(),
      ty,
      aggregation,
      is_allow_null: true,
      ..Default::default()
    }
  }
}
