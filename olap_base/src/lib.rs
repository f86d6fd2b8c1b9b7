#![cfg_attr(docsrs, feature(doc_cfg))]

//! olap_base - Shared types for tablet metadata
//! tablet 元数据共享类型
//!
//! Versions, rowset metas, tablet schemas and the wire messages they encode to.
//! 版本、rowset 元数据、tablet schema 及其编码后的线上消息。

pub mod desc;
mod field_len;
mod kind;
pub mod pb;
mod rowset_meta;
mod schema;
mod version;

pub use field_len::{DECIMAL_SIZE, STRING_LEN_PREFIX, field_len};
pub use kind::{
  AggregationType, AlterTabletState, AlterTabletType, CompressKind, KeysType, PrimitiveType,
  TabletState,
};
pub use rowset_meta::{RowsetMeta, RowsetMetaRef};
pub use schema::TabletSchema;
pub use version::Version;

/// Current unix time in seconds
/// 当前 unix 秒级时间戳
#[inline]
pub fn now_secs() -> i64 {
  coarsetime::Clock::now_since_epoch().as_secs() as i64
}
