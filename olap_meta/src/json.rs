//! JSON dump of the aggregate message
//! 聚合消息的 JSON 导出

use std::{fs, path::Path, sync::Arc};

use log::info;
use olap_base::pb::TabletMetaPb;
use olap_store::DataDir;

use crate::{Error, Result, State, TabletMeta};

impl TabletMeta {
  pub fn to_json(&self) -> Result<String> {
    serde_json::to_string_pretty(&self.to_pb()).map_err(|e| Error::Encode(e.to_string().into()))
  }

  pub fn from_json(json: &str) -> Result<Self> {
    let pb: TabletMetaPb =
      serde_json::from_str(json).map_err(|e| Error::Decode(e.to_string().into()))?;
    Ok(Self::from_state(State::from_pb(&pb)))
  }
}

/// Read a JSON dump at `path` and save it into the store of `data_dir`
/// 读取 `path` 处的 JSON 导出并保存到 `data_dir` 的存储中
pub fn load_json_meta(data_dir: &Arc<DataDir>, path: &Path) -> Result<TabletMeta> {
  let json = fs::read_to_string(path)?;
  let mut meta = TabletMeta::from_json(&json)?;
  meta.bind(data_dir);
  meta.save_meta()?;
  info!(
    "load json meta: tablet_id={}, schema_hash={}, path={}",
    meta.tablet_id(),
    meta.schema_hash(),
    path.display()
  );
  Ok(meta)
}
