//! Legacy single-file persistence in the framed format
//! 使用帧格式的旧版单文件持久化

use std::path::Path;

use log::warn;

use crate::{Result, State, TabletMeta};

impl TabletMeta {
  /// Write the current state to `path`, replaced atomically, under the lock
  /// 在锁内将当前状态写入 `path`，原子替换
  pub fn save(&self, path: &Path) -> Result<()> {
    let state = self.lock();
    if let Err(e) = olap_fs::save(path, &state.encode(), true) {
      warn!("fail to save tablet meta file {}: {e}", path.display());
      return Err(e.into());
    }
    Ok(())
  }

  /// Replace the state with the record stored in `path`
  /// 用 `path` 中存储的记录替换状态
  pub fn create_from_file(&self, path: &Path) -> Result<()> {
    let state = State::decode(&olap_fs::load(path)?)?;
    *self.lock() = state;
    Ok(())
  }

  pub fn from_file(path: &Path) -> Result<Self> {
    Ok(Self::from_state(State::decode(&olap_fs::load(path)?)?))
  }
}
