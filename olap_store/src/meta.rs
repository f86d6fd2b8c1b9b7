//! Tablet meta keys: `tabletmeta_{tablet_id}_{schema_hash}`
//! tablet 元数据键：`tabletmeta_{tablet_id}_{schema_hash}`

use log::debug;

use crate::{DataDir, Error, Result};

pub const META_PREFIX: &str = "tabletmeta_";

#[inline]
pub fn key(tablet_id: i64, schema_hash: i64) -> String {
  format!("{META_PREFIX}{tablet_id}_{schema_hash}")
}

/// Parse key back to (tablet_id, schema_hash)
/// 将键解析回 (tablet_id, schema_hash)
pub fn parse_key(key: &[u8]) -> Option<(i64, i64)> {
  let rest = std::str::from_utf8(key).ok()?.strip_prefix(META_PREFIX)?;
  // schema_hash may be negative, tablet_id never contains '_'
  let (tablet_id, schema_hash) = rest.split_once('_')?;
  Some((tablet_id.parse().ok()?, schema_hash.parse().ok()?))
}

pub fn save(dir: &DataDir, tablet_id: i64, schema_hash: i64, meta: &[u8]) -> Result<()> {
  dir.store().put(key(tablet_id, schema_hash).as_bytes(), meta)?;
  debug!("save tablet meta: tablet_id={tablet_id}, schema_hash={schema_hash}, len={}", meta.len());
  Ok(())
}

pub fn get(dir: &DataDir, tablet_id: i64, schema_hash: i64) -> Result<Option<Vec<u8>>> {
  dir.store().get(key(tablet_id, schema_hash).as_bytes())
}

pub fn remove(dir: &DataDir, tablet_id: i64, schema_hash: i64) -> Result<()> {
  dir.store().rm(key(tablet_id, schema_hash).as_bytes())
}

/// Visit every tablet meta in `dir` until `f` returns false
/// 遍历 `dir` 中所有 tablet 元数据，直到 `f` 返回 false
pub fn traverse(dir: &DataDir, mut f: impl FnMut(i64, i64, &[u8]) -> bool) -> Result<()> {
  let mut bad: Option<Box<str>> = None;
  dir.store().scan(META_PREFIX.as_bytes(), &mut |k, v| match parse_key(k) {
    Some((tablet_id, schema_hash)) => f(tablet_id, schema_hash, v),
    None => {
      bad = Some(String::from_utf8_lossy(k).into());
      false
    }
  })?;
  match bad {
    Some(k) => Err(Error::BadKey(k)),
    None => Ok(()),
  }
}
