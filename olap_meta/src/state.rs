//! Unlocked tablet meta state
//! 未加锁的 tablet 元数据状态
//!
//! Every mutator rebuilds the cached aggregate message before returning,
//! so `pb()` always mirrors the fields.
//! 每个修改操作返回前都会重建缓存的聚合消息，`pb()` 始终与字段一致。

use log::warn;
use olap_base::{
  RowsetMetaRef, TabletSchema, TabletState, Version,
  pb::{DeletePredicatePb, TabletMetaPb},
};

use crate::{AlterTask, DelPredLog, Error, Result, RowsetSet};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct State {
  table_id: i64,
  partition_id: i64,
  tablet_id: i64,
  schema_hash: i64,
  shard_id: i64,
  creation_time: i64,
  cumulative_layer_point: i64,
  tablet_state: TabletState,
  schema: TabletSchema,
  rs_metas: RowsetSet,
  inc_rs_metas: RowsetSet,
  del_preds: DelPredLog,
  alter_task: Option<AlterTask>,
  pb: TabletMetaPb,
}

impl State {
  /// Unknown tablet state tags fall back to the default state
  /// 未知的 tablet 状态标签回退为默认状态
  pub fn from_pb(pb: &TabletMetaPb) -> Self {
    let tablet_state = TabletState::try_from(pb.tablet_state).unwrap_or_else(|tag| {
      warn!(
        "tablet has unknown state {tag}: tablet_id={}, schema_hash={}",
        pb.tablet_id, pb.schema_hash
      );
      TabletState::default()
    });
    let mut s = Self {
      table_id: pb.table_id,
      partition_id: pb.partition_id,
      tablet_id: pb.tablet_id,
      schema_hash: pb.schema_hash,
      shard_id: pb.shard_id,
      creation_time: pb.creation_time,
      cumulative_layer_point: pb.cumulative_layer_point,
      tablet_state,
      schema: TabletSchema::from_pb(&pb.schema),
      rs_metas: RowsetSet::from_pb(&pb.rs_metas),
      inc_rs_metas: RowsetSet::from_pb(&pb.inc_rs_metas),
      del_preds: DelPredLog::from_pb(&pb.del_preds),
      alter_task: pb.alter_task.as_ref().map(AlterTask::from_pb),
      pb: TabletMetaPb::default(),
    };
    s.rebuild();
    s
  }

  pub fn decode(bytes: &[u8]) -> Result<Self> {
    let pb: TabletMetaPb =
      bitcode::decode(bytes).map_err(|e| Error::Decode(e.to_string().into()))?;
    Ok(Self::from_pb(&pb))
  }

  /// Fresh aggregate message built from the fields
  /// 由字段重新构建的聚合消息
  pub fn to_pb(&self) -> TabletMetaPb {
    TabletMetaPb {
      table_id: self.table_id,
      partition_id: self.partition_id,
      tablet_id: self.tablet_id,
      schema_hash: self.schema_hash,
      shard_id: self.shard_id,
      creation_time: self.creation_time,
      cumulative_layer_point: self.cumulative_layer_point,
      tablet_state: self.tablet_state.tag(),
      schema: self.schema.to_pb(),
      rs_metas: self.rs_metas.to_pb(),
      inc_rs_metas: self.inc_rs_metas.to_pb(),
      del_preds: self.del_preds.as_slice().to_vec(),
      alter_task: self.alter_task.as_ref().map(AlterTask::to_pb),
    }
  }

  #[inline]
  pub fn pb(&self) -> &TabletMetaPb {
    &self.pb
  }

  /// Binary form of the cached message
  /// 缓存消息的二进制形式
  #[inline]
  pub fn encode(&self) -> Vec<u8> {
    bitcode::encode(&self.pb)
  }

  fn rebuild(&mut self) {
    self.pb = self.to_pb();
  }

  #[inline]
  pub fn table_id(&self) -> i64 {
    self.table_id
  }

  #[inline]
  pub fn partition_id(&self) -> i64 {
    self.partition_id
  }

  #[inline]
  pub fn tablet_id(&self) -> i64 {
    self.tablet_id
  }

  #[inline]
  pub fn schema_hash(&self) -> i64 {
    self.schema_hash
  }

  #[inline]
  pub fn shard_id(&self) -> i64 {
    self.shard_id
  }

  #[inline]
  pub fn creation_time(&self) -> i64 {
    self.creation_time
  }

  #[inline]
  pub fn cumulative_layer_point(&self) -> i64 {
    self.cumulative_layer_point
  }

  #[inline]
  pub fn tablet_state(&self) -> TabletState {
    self.tablet_state
  }

  #[inline]
  pub fn schema(&self) -> &TabletSchema {
    &self.schema
  }

  #[inline]
  pub fn rs_metas(&self) -> &[RowsetMetaRef] {
    self.rs_metas.as_slice()
  }

  #[inline]
  pub fn inc_rs_metas(&self) -> &[RowsetMetaRef] {
    self.inc_rs_metas.as_slice()
  }

  #[inline]
  pub fn delete_predicates(&self) -> &[DeletePredicatePb] {
    self.del_preds.as_slice()
  }

  #[inline]
  pub fn alter_task(&self) -> Option<&AlterTask> {
    self.alter_task.as_ref()
  }

  pub fn set_cumulative_layer_point(&mut self, point: i64) {
    self.cumulative_layer_point = point;
    self.rebuild();
  }

  pub fn set_shard_id(&mut self, shard_id: i64) {
    self.shard_id = shard_id;
    self.rebuild();
  }

  pub fn set_creation_time(&mut self, creation_time: i64) {
    self.creation_time = creation_time;
    self.rebuild();
  }

  pub fn set_tablet_state(&mut self, state: TabletState) {
    self.tablet_state = state;
    self.rebuild();
  }

  pub fn add_rs_meta(&mut self, rs: RowsetMetaRef) -> Result<()> {
    self.rs_metas.add(rs)?;
    self.rebuild();
    Ok(())
  }

  pub fn modify_rs_metas(&mut self, to_add: &[RowsetMetaRef], to_delete: &[RowsetMetaRef]) {
    self.rs_metas.modify(to_add, to_delete);
    self.rebuild();
  }

  /// Replace all cumulative rowsets, any alter task is dropped
  /// 替换全部累积 rowset，并丢弃 alter 任务
  pub fn revise_rs_metas(&mut self, li: &[RowsetMetaRef]) {
    self.rs_metas.replace(li);
    self.alter_task = None;
    self.rebuild();
  }

  pub fn delete_rs_meta_by_version(&mut self, version: Version) {
    self.rs_metas.remove(version);
    self.rebuild();
  }

  pub fn add_inc_rs_meta(&mut self, rs: RowsetMetaRef) -> Result<()> {
    self.inc_rs_metas.add(rs)?;
    self.rebuild();
    Ok(())
  }

  pub fn delete_inc_rs_meta_by_version(&mut self, version: Version) {
    self.inc_rs_metas.remove(version);
    self.rebuild();
  }

  pub fn acquire_inc_rs_meta(&self, version: Version) -> Option<RowsetMetaRef> {
    self.inc_rs_metas.find(version).cloned()
  }

  /// Max version over the cumulative rowsets
  /// 累积 rowset 的最大版本
  #[inline]
  pub fn max_version(&self) -> Version {
    self.rs_metas.max_version()
  }

  pub fn add_delete_predicate(&mut self, pred: &DeletePredicatePb, version: i64) {
    self.del_preds.add(pred, version);
    self.rebuild();
  }

  pub fn remove_delete_predicate_by_version(&mut self, version: Version) -> Result<()> {
    self.del_preds.remove(version)?;
    self.rebuild();
    Ok(())
  }

  #[inline]
  pub fn version_for_delete_predicate(&self, version: Version) -> bool {
    self.del_preds.contains(version)
  }

  pub fn add_alter_task(&mut self, task: &AlterTask) {
    self.alter_task = Some(task.clone());
    self.rebuild();
  }

  pub fn delete_alter_task(&mut self) {
    self.alter_task = None;
    self.rebuild();
  }
}
