#![cfg_attr(docsrs, feature(doc_cfg))]

//! olap_meta - Persistent tablet metadata record
//! 持久化 tablet 元数据记录
//!
//! Schema, cumulative and incremental rowset versions, delete predicates and the
//! pending alter task of one tablet, kept behind a single lock and persisted to a
//! `MetaStore` or a framed file.
//! 单个 tablet 的 schema、累积与增量 rowset 版本、删除条件及待执行 alter 任务，
//! 由单个锁保护，持久化到 `MetaStore` 或帧格式文件。

mod alter_task;
mod conf;
mod create;
mod del_pred;
pub mod error;
mod file;
mod json;
mod rs_set;
mod state;
mod tablet_meta;

pub use alter_task::AlterTask;
pub use conf::Conf;
pub use create::TabletIdent;
pub use del_pred::DelPredLog;
pub use error::{Error, Result};
pub use json::load_json_meta;
pub use rs_set::{EMPTY_MAX_VERSION, RowsetSet};
pub use state::State;
pub use tablet_meta::TabletMeta;
