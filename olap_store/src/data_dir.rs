//! Storage directory owning a metadata store
//! 持有元数据存储的存储目录

use std::path::{Path, PathBuf};

use crate::{Conf, DirStore, MetaStore, Result};

/// Sub directory holding the metadata store
/// 存放元数据存储的子目录
pub const META_DIR: &str = "meta";

pub struct DataDir {
  path: PathBuf,
  store: Box<dyn MetaStore>,
}

impl DataDir {
  /// Wrap an existing store
  /// 包装已有存储
  pub fn new(path: impl Into<PathBuf>, store: impl MetaStore + 'static) -> Self {
    Self {
      path: path.into(),
      store: Box::new(store),
    }
  }

  /// Open `path` with a `DirStore` under `path/meta`
  /// 打开 `path`，在 `path/meta` 下使用 `DirStore`
  pub fn open(path: impl Into<PathBuf>, conf: &[Conf]) -> Result<Self> {
    let path = path.into();
    let store = DirStore::open(path.join(META_DIR), conf)?;
    Ok(Self::new(path, store))
  }

  #[inline]
  pub fn path(&self) -> &Path {
    &self.path
  }

  #[inline]
  pub fn store(&self) -> &dyn MetaStore {
    self.store.as_ref()
  }
}
