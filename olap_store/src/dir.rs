//! Directory-backed store, one framed file per key
//! 目录存储，每个键一个帧文件
//!
//! File name: base32(key) + ".meta". Writes are atomic (tmp + rename).
//! 文件名：base32(key) + ".meta"。写入为原子操作（临时文件 + 重命名）。

use std::{
  fs, io,
  path::{Path, PathBuf},
};

use fast32::base32::CROCKFORD_LOWER;
use log::{error, warn};
use olap_fs::DirLock;

use crate::{Conf, MetaStore, Result, conf::DEFAULT_SYNC};

/// Extension of value files
/// 值文件扩展名
pub const EXT: &str = "meta";

const TMP_EXT: &str = "tmp";

pub struct DirStore {
  lock: DirLock,
  sync: bool,
}

impl DirStore {
  /// Open or create, holding an exclusive lock on `dir`
  /// 打开或创建，并持有 `dir` 的排他锁
  pub fn open(dir: impl Into<PathBuf>, conf: &[Conf]) -> Result<Self> {
    let mut sync = DEFAULT_SYNC;
    for c in conf {
      match c {
        Conf::Sync(b) => sync = *b,
      }
    }

    let lock = DirLock::try_new(dir)?;
    rm_tmp(lock.dir());
    Ok(Self { lock, sync })
  }

  #[inline]
  pub fn dir(&self) -> &Path {
    self.lock.dir()
  }

  #[inline]
  fn path(&self, key: &[u8]) -> PathBuf {
    self
      .dir()
      .join(format!("{}.{EXT}", CROCKFORD_LOWER.encode(key)))
  }

  /// Keys with `prefix` and their paths, sorted by key
  /// 带 `prefix` 的键及其路径，按键排序
  fn keys(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, PathBuf)>> {
    let mut li = Vec::new();
    for entry in fs::read_dir(self.dir())? {
      let path = entry?.path();
      if path.extension().is_none_or(|e| e != EXT) {
        continue;
      }
      let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        continue;
      };
      match CROCKFORD_LOWER.decode(stem.as_bytes()) {
        Ok(key) if key.starts_with(prefix) => li.push((key, path)),
        Ok(_) => {}
        Err(_) => warn!("skip unknown file in meta dir: {}", path.display()),
      }
    }
    li.sort_unstable_by(|a, b| a.0.cmp(&b.0));
    Ok(li)
  }
}

/// Remove tmp files left by interrupted writes
/// 删除中断写入遗留的临时文件
fn rm_tmp(dir: &Path) {
  let Ok(iter) = fs::read_dir(dir) else {
    return;
  };
  for path in iter.flatten().map(|e| e.path()) {
    if path.extension().is_some_and(|e| e == TMP_EXT)
      && let Err(e) = fs::remove_file(&path)
    {
      error!("remove tmp file failed: {}, err={e}", path.display());
    }
  }
}

impl MetaStore for DirStore {
  fn put(&self, key: &[u8], val: &[u8]) -> Result<()> {
    olap_fs::save(&self.path(key), val, self.sync)?;
    Ok(())
  }

  fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
    match olap_fs::load(&self.path(key)) {
      Ok(val) => Ok(Some(val)),
      Err(olap_fs::Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }

  fn rm(&self, key: &[u8]) -> Result<()> {
    match fs::remove_file(self.path(key)) {
      Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
      _ => Ok(()),
    }
  }

  fn scan(&self, prefix: &[u8], f: &mut dyn FnMut(&[u8], &[u8]) -> bool) -> Result<()> {
    for (key, path) in self.keys(prefix)? {
      let val = olap_fs::load(&path)?;
      if !f(&key, &val) {
        break;
      }
    }
    Ok(())
  }
}
