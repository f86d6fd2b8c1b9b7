/// Store configuration
/// 存储配置
#[derive(Clone, Copy, Debug)]
pub enum Conf {
  /// fsync every write before rename
  /// 每次写入在重命名前 fsync
  Sync(bool),
}

pub(crate) const DEFAULT_SYNC: bool = true;
