//! Physical column length by type
//! 按类型计算列物理长度

use crate::PrimitiveType;

/// Length prefix stored before variable-length values (u16)
/// 变长值前的长度前缀（u16）
pub const STRING_LEN_PREFIX: u32 = size_of::<u16>() as u32;

/// decimal12: int64 integer + int32 fraction
/// decimal12：int64 整数 + int32 小数
pub const DECIMAL_SIZE: u32 = 12;

/// Physical length of a column, `len` is the declared string length
/// 列物理长度，`len` 为声明的字符串长度
pub const fn field_len(ty: PrimitiveType, len: u32) -> u32 {
  match ty {
    PrimitiveType::Boolean | PrimitiveType::Tinyint => 1,
    PrimitiveType::Smallint => 2,
    PrimitiveType::Int | PrimitiveType::Float => 4,
    PrimitiveType::Bigint | PrimitiveType::Double | PrimitiveType::Datetime => 8,
    PrimitiveType::Largeint => 16,
    PrimitiveType::Date => 3,
    PrimitiveType::Decimal => DECIMAL_SIZE,
    PrimitiveType::Char => len,
    PrimitiveType::Varchar | PrimitiveType::Hll => len.saturating_add(STRING_LEN_PREFIX),
  }
}
