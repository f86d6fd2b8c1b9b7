//! Directory lock / 目录锁
//!
//! Exclusive lock on `LOCK` inside a directory, prevents two processes
//! from owning the same metadata directory.
//! 在目录内 `LOCK` 文件上加排他锁，防止两个进程同时持有同一元数据目录。

use std::{
  fs,
  path::{Path, PathBuf},
};

use fd_lock::RwLock;

use crate::{Error, Result};

/// Lock file name
/// 锁文件名
pub const LOCK_FILE: &str = "LOCK";

type Guard = fd_lock::RwLockWriteGuard<'static, fs::File>;

/// Write lock holder / 写锁持有者
struct FileLock {
  // SAFETY: _guard must be dropped before _lock. Rust drops fields in declaration order.
  // 安全：_guard 必须在 _lock 之前释放。Rust 按字段声明顺序 Drop。
  _guard: Guard,
  _lock: Box<RwLock<fs::File>>,
}

impl FileLock {
  fn try_new(file: fs::File) -> Result<Self> {
    let lock_ptr: *mut RwLock<fs::File> = Box::into_raw(Box::new(RwLock::new(file)));
    // SAFETY: Box provides stable address, guard lives shorter than lock
    // 安全：Box 提供稳定地址，guard 生命周期短于 lock
    let guard = match unsafe { (*lock_ptr).try_write() } {
      Ok(guard) => guard,
      Err(_) => {
        drop(unsafe { Box::from_raw(lock_ptr) });
        return Err(Error::Locked);
      }
    };
    let guard: Guard = unsafe { std::mem::transmute(guard) };
    let _lock = unsafe { Box::from_raw(lock_ptr) };
    Ok(Self {
      _guard: guard,
      _lock,
    })
  }
}

/// Exclusive lock on a directory, released on drop
/// 目录排他锁，Drop 时释放
pub struct DirLock {
  _lock: FileLock,
  dir: PathBuf,
}

impl DirLock {
  /// Create `dir` if missing, then try to lock it
  /// 如目录不存在则创建，然后尝试加锁
  pub fn try_new(dir: impl Into<PathBuf>) -> Result<Self> {
    let dir = dir.into();
    fs::create_dir_all(&dir)?;
    let file = fs::OpenOptions::new()
      .write(true)
      .create(true)
      .truncate(false)
      .open(dir.join(LOCK_FILE))?;
    Ok(Self {
      _lock: FileLock::try_new(file)?,
      dir,
    })
  }

  #[inline]
  pub fn dir(&self) -> &Path {
    &self.dir
  }
}
