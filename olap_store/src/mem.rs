use std::{collections::BTreeMap, ops::Bound};

use parking_lot::RwLock;

use crate::{MetaStore, Result};

/// In-memory store
/// 内存存储
#[derive(Debug, Default)]
pub struct MemStore {
  map: RwLock<BTreeMap<Box<[u8]>, Box<[u8]>>>,
}

impl MemStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.map.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.map.read().is_empty()
  }
}

impl MetaStore for MemStore {
  fn put(&self, key: &[u8], val: &[u8]) -> Result<()> {
    self.map.write().insert(key.into(), val.into());
    Ok(())
  }

  fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
    Ok(self.map.read().get(key).map(|v| v.to_vec()))
  }

  fn rm(&self, key: &[u8]) -> Result<()> {
    self.map.write().remove(key);
    Ok(())
  }

  /// Snapshot under the read lock, `f` may write back to the store
  /// 在读锁内取快照，`f` 可回写存储
  fn scan(&self, prefix: &[u8], f: &mut dyn FnMut(&[u8], &[u8]) -> bool) -> Result<()> {
    let li: Vec<(Box<[u8]>, Box<[u8]>)> = self
      .map
      .read()
      .range::<[u8], _>((Bound::Included(prefix), Bound::Unbounded))
      .take_while(|(k, _)| k.starts_with(prefix))
      .map(|(k, v)| (k.clone(), v.clone()))
      .collect();
    for (k, v) in &li {
      if !f(k, v) {
        break;
      }
    }
    Ok(())
  }
}
