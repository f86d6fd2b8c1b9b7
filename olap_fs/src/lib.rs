#![cfg_attr(docsrs, feature(doc_cfg))]

//! olap_fs - File operations for tablet metadata
//! tablet 元数据文件操作

pub mod atom_write;
pub mod error;
pub mod frame;
pub mod head;
pub mod lock;

pub use atom_write::{AtomWrite, tmp_path};
pub use error::{CorruptKind, Error, Result};
pub use frame::{load, save};
pub use lock::DirLock;
