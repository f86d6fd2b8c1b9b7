//! Framed single-file persistence
//! 帧格式单文件持久化
//!
//! `prepare` reserves the head, `serialize` writes payload then the real head,
//! `unserialize` validates signature, length and checksums before returning payload.
//! `prepare` 预留头部，`serialize` 写入 payload 后回填真实头部，
//! `unserialize` 校验签名、长度与校验和后返回 payload。

use std::{
  fs::File,
  io::{Read, Seek, SeekFrom, Write},
  path::Path,
};

use log::warn;
use zerocopy::{FromZeros, IntoBytes};

use crate::{
  AtomWrite, Result,
  head::{HEAD_SIZE, Head},
};

/// Write zeroed head placeholder at offset 0
/// 在偏移 0 写入全零头部占位
pub fn prepare<W: Write + Seek>(w: &mut W) -> Result<()> {
  w.seek(SeekFrom::Start(0))?;
  w.write_all(Head::new_zeroed().as_bytes())?;
  Ok(())
}

/// Write payload after head, then finalize head
/// 在头部之后写入 payload，再回填头部
pub fn serialize<W: Write + Seek>(w: &mut W, payload: &[u8]) -> Result<()> {
  let head = Head::new(payload)?;
  w.seek(SeekFrom::Start(HEAD_SIZE as u64))?;
  w.write_all(payload)?;
  w.seek(SeekFrom::Start(0))?;
  w.write_all(head.as_bytes())?;
  w.flush()?;
  Ok(())
}

/// Read whole file, validate, return payload
/// 读取整个文件并校验，返回 payload
pub fn unserialize<R: Read>(r: &mut R) -> Result<Vec<u8>> {
  let mut buf = Vec::new();
  r.read_to_end(&mut buf)?;
  let len = Head::check(&buf)?.len();
  buf.drain(..HEAD_SIZE);
  buf.truncate(len);
  Ok(buf)
}

/// Frame `payload` in memory
/// 在内存中为 `payload` 加帧
pub fn encode(payload: &[u8]) -> Result<Vec<u8>> {
  let head = Head::new(payload)?;
  let mut buf = Vec::with_capacity(HEAD_SIZE + payload.len());
  buf.extend_from_slice(head.as_bytes());
  buf.extend_from_slice(payload);
  Ok(buf)
}

/// Atomically write framed file, return bytes written
/// 原子写入帧文件，返回写入字节数
pub fn save(path: &Path, payload: &[u8], sync: bool) -> Result<u64> {
  let mut file = AtomWrite::new(path)?;
  prepare(&mut *file)?;
  serialize(&mut *file, payload)?;
  file.rename(sync)?;
  Ok((HEAD_SIZE + payload.len()) as u64)
}

/// Load and validate framed file
/// 加载并校验帧文件
pub fn load(path: &Path) -> Result<Vec<u8>> {
  let mut file = File::open(path)?;
  unserialize(&mut file)
    .inspect_err(|e| warn!("load framed file failed: {}, err={e}", path.display()))
}
