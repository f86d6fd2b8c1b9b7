//! Atomic write with rename
//! 原子写入并重命名
//!
//! Write to temp file, then rename to target on success
//! 写入临时文件，成功后重命名到目标

use std::{
  ffi::OsString,
  fs::{self, File, OpenOptions},
  io,
  ops::{Deref, DerefMut},
  os::unix::fs::{MetadataExt, OpenOptionsExt},
  path::{Path, PathBuf},
};

use fs4::fs_std::FileExt;
use log::error;

/// Owner read/write
/// 仅属主可读写
pub const FILE_MODE: u32 = 0o600;

/// `dst` + ".tmp"
#[inline]
pub fn tmp_path(dst: &Path) -> PathBuf {
  let mut name: OsString = dst.as_os_str().into();
  name.push(".tmp");
  name.into()
}

/// Whether `path` still names the inode of `file`
/// `path` 是否仍指向 `file` 的 inode
fn is_same(file: &File, path: &Path) -> io::Result<bool> {
  let a = file.metadata()?;
  match fs::metadata(path) {
    Ok(b) => Ok(a.dev() == b.dev() && a.ino() == b.ino()),
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
    Err(e) => Err(e),
  }
}

/// Write to temp file, rename on success, delete on failure
/// 写入临时文件，成功时重命名，失败时删除
pub struct AtomWrite {
  file: File,
  dst: PathBuf,
  renamed: bool,
}

impl AtomWrite {
  /// Create temp file (mode 0600) with exclusive lock, truncated only once locked.
  /// A busy tmp gives `WouldBlock` and is left untouched.
  /// 创建带排他锁的临时文件（权限 0600），加锁后才截断。
  /// 临时文件被占用时返回 `WouldBlock`，且不改动该文件。
  pub fn new(dst: impl Into<PathBuf>) -> io::Result<Self> {
    let dst = dst.into();
    let tmp = tmp_path(&dst);
    let file = OpenOptions::new()
      .read(true)
      .write(true)
      .create(true)
      .truncate(false)
      .mode(FILE_MODE)
      .open(&tmp)?;
    // The tmp may have been renamed away between open and lock
    // 在打开与加锁之间临时文件可能已被重命名
    if !file.try_lock_exclusive()? || !is_same(&file, &tmp)? {
      return Err(io::Error::new(
        io::ErrorKind::WouldBlock,
        format!("tmp file busy: {}", tmp.display()),
      ));
    }
    file.set_len(0)?;
    Ok(Self {
      file,
      dst,
      renamed: false,
    })
  }

  #[inline]
  pub fn path(&self) -> &Path {
    &self.dst
  }

  /// Optionally sync, then rename to destination
  /// 可选同步，然后重命名到目标
  pub fn rename(mut self, sync: bool) -> io::Result<()> {
    if sync {
      self.file.sync_all()?;
    }
    fs::rename(tmp_path(&self.dst), &self.dst)?;
    self.renamed = true;
    Ok(())
  }
}

impl Deref for AtomWrite {
  type Target = File;

  #[inline]
  fn deref(&self) -> &Self::Target {
    &self.file
  }
}

impl DerefMut for AtomWrite {
  #[inline]
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.file
  }
}

impl Drop for AtomWrite {
  fn drop(&mut self) {
    if !self.renamed {
      let tmp = tmp_path(&self.dst);
      if let Err(e) = fs::remove_file(&tmp) {
        error!("remove tmp file failed: {}, err={e}", tmp.display());
      }
    }
  }
}
