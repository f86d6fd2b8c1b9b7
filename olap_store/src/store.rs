//! Metadata store interface
//! 元数据存储接口

use crate::Result;

/// Ordered byte key-value store holding serialized metas
/// 保存序列化元数据的有序字节键值存储
pub trait MetaStore: Send + Sync {
  /// Insert or overwrite
  /// 插入或覆盖
  fn put(&self, key: &[u8], val: &[u8]) -> Result<()>;

  fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

  /// Remove, missing key is not an error
  /// 删除，键不存在不视为错误
  fn rm(&self, key: &[u8]) -> Result<()>;

  /// Visit entries with `prefix` in key order until `f` returns false
  /// 按键序访问带 `prefix` 的条目，直到 `f` 返回 false
  fn scan(&self, prefix: &[u8], f: &mut dyn FnMut(&[u8], &[u8]) -> bool) -> Result<()>;
}
