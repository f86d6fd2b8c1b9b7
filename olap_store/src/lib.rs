#![cfg_attr(docsrs, feature(doc_cfg))]

//! olap_store - Metadata store for tablet metas
//! tablet 元数据存储

mod conf;
pub mod data_dir;
pub mod dir;
pub mod error;
mod mem;
pub mod meta;
mod store;

pub use conf::Conf;
pub use data_dir::DataDir;
pub use dir::DirStore;
pub use error::{Error, Result};
pub use mem::MemStore;
pub use store::MetaStore;
