use olap_base::CompressKind;

/// Tablet creation configuration
/// tablet 创建配置
#[derive(Clone, Copy, Debug)]
pub enum Conf {
  /// Rows per row block in column files
  /// 列文件中每个行块的行数
  RowsPerRowBlock(u32),
  Compress(CompressKind),
  /// Index length of VARCHAR / HLL columns declaring none
  /// 未声明索引长度的 VARCHAR / HLL 列的索引长度
  IndexLen(u32),
}

const DEFAULT_ROWS_PER_ROW_BLOCK: u32 = 1024;
const DEFAULT_INDEX_LEN: u32 = 10;

pub(crate) struct CreateConf {
  pub rows_per_row_block: u32,
  pub compress: CompressKind,
  pub index_len: u32,
}

impl CreateConf {
  pub fn new(conf: &[Conf]) -> Self {
    let mut r = Self {
      rows_per_row_block: DEFAULT_ROWS_PER_ROW_BLOCK,
      compress: CompressKind::Lz4,
      index_len: DEFAULT_INDEX_LEN,
    };
    for c in conf {
      match *c {
        Conf::RowsPerRowBlock(n) => r.rows_per_row_block = n,
        Conf::Compress(kind) => r.compress = kind,
        Conf::IndexLen(n) => r.index_len = n,
      }
    }
    r
  }
}
