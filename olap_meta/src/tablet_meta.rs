//! Tablet meta record guarded by a single mutex
//! 由单个互斥锁保护的 tablet 元数据记录
//!
//! Mutators run rebuild then persist inside one critical section, so at most
//! one store write per tablet is in flight. A failed persist leaves the
//! in-memory change in place and returns the error.
//! 修改操作在同一临界区内完成重建与持久化，每个 tablet 同时最多一个存储写入。
//! 持久化失败时内存中的修改保留，并返回错误。

use std::sync::{Arc, Weak};

use log::warn;
use olap_base::{
  RowsetMetaRef, TabletSchema, TabletState, Version,
  pb::{DeletePredicatePb, TabletMetaPb},
};
use olap_store::{DataDir, meta};
use parking_lot::{Mutex, MutexGuard};

use crate::{AlterTask, Error, Result, State};

#[derive(Debug, Default)]
pub struct TabletMeta {
  data_dir: Option<Weak<DataDir>>,
  state: Mutex<State>,
}

impl TabletMeta {
  /// Empty record bound to `data_dir`, filled later by `deserialize`
  /// 绑定 `data_dir` 的空记录，之后由 `deserialize` 填充
  pub fn new(data_dir: &Arc<DataDir>) -> Self {
    Self {
      data_dir: Some(Arc::downgrade(data_dir)),
      state: Mutex::default(),
    }
  }

  /// Empty record without a data dir
  /// 未绑定数据目录的空记录
  #[inline]
  pub fn empty() -> Self {
    Self::default()
  }

  #[inline]
  pub fn from_state(state: State) -> Self {
    Self {
      data_dir: None,
      state: Mutex::new(state),
    }
  }

  pub fn decode(bytes: &[u8]) -> Result<Self> {
    Ok(Self::from_state(State::decode(bytes)?))
  }

  /// Fetch `(tablet_id, schema_hash)` from the store of `data_dir`
  /// 从 `data_dir` 的存储中读取 `(tablet_id, schema_hash)`
  pub fn load(data_dir: &Arc<DataDir>, tablet_id: i64, schema_hash: i64) -> Result<Self> {
    let Some(bytes) = meta::get(data_dir, tablet_id, schema_hash)? else {
      return Err(Error::NotFound {
        tablet_id,
        schema_hash,
      });
    };
    let mut r = Self::decode(&bytes)?;
    r.bind(data_dir);
    Ok(r)
  }

  /// Set the owning data dir
  /// 设置所属数据目录
  pub fn bind(&mut self, data_dir: &Arc<DataDir>) {
    self.data_dir = Some(Arc::downgrade(data_dir));
  }

  pub fn data_dir(&self) -> Option<Arc<DataDir>> {
    self.data_dir.as_ref().and_then(Weak::upgrade)
  }

  /// Hold the lock to run several unlocked operations as one step,
  /// pair with `save_meta_locked` to persist
  /// 持有锁以将多个无锁操作作为一步执行，配合 `save_meta_locked` 持久化
  #[inline]
  pub fn lock(&self) -> MutexGuard<'_, State> {
    self.state.lock()
  }

  /// Persist `state`, the caller holds the lock
  /// 持久化 `state`，调用方已持有锁
  pub fn save_meta_locked(&self, state: &State) -> Result<()> {
    let tablet_id = state.tablet_id();
    let schema_hash = state.schema_hash();
    let r = self.put(state);
    if let Err(e) = &r {
      warn!("fail to save tablet meta: tablet_id={tablet_id}, schema_hash={schema_hash}, {e}");
    }
    r
  }

  fn put(&self, state: &State) -> Result<()> {
    let data_dir = self
      .data_dir
      .as_ref()
      .ok_or(Error::NoDataDir)?
      .upgrade()
      .ok_or(Error::DataDirGone)?;
    meta::save(
      &data_dir,
      state.tablet_id(),
      state.schema_hash(),
      &state.encode(),
    )?;
    Ok(())
  }

  pub fn save_meta(&self) -> Result<()> {
    let state = self.state.lock();
    self.save_meta_locked(&state)
  }

  /// Apply `f` then persist, both under the lock
  /// 在锁内执行 `f` 并持久化
  fn mutate<R>(&self, f: impl FnOnce(&mut State) -> Result<R>) -> Result<R> {
    let mut state = self.state.lock();
    let r = f(&mut state)?;
    self.save_meta_locked(&state)?;
    Ok(r)
  }

  /// Binary form of the current state
  /// 当前状态的二进制形式
  pub fn serialize(&self) -> Vec<u8> {
    self.state.lock().encode()
  }

  /// Replace the whole state from `bytes`, untouched on error
  /// 由 `bytes` 替换整个状态，出错时不变
  pub fn deserialize(&self, bytes: &[u8]) -> Result<()> {
    let state = State::decode(bytes)?;
    *self.state.lock() = state;
    Ok(())
  }

  pub fn to_pb(&self) -> TabletMetaPb {
    self.state.lock().to_pb()
  }

  #[inline]
  pub fn table_id(&self) -> i64 {
    self.state.lock().table_id()
  }

  #[inline]
  pub fn partition_id(&self) -> i64 {
    self.state.lock().partition_id()
  }

  #[inline]
  pub fn tablet_id(&self) -> i64 {
    self.state.lock().tablet_id()
  }

  #[inline]
  pub fn schema_hash(&self) -> i64 {
    self.state.lock().schema_hash()
  }

  #[inline]
  pub fn shard_id(&self) -> i64 {
    self.state.lock().shard_id()
  }

  #[inline]
  pub fn creation_time(&self) -> i64 {
    self.state.lock().creation_time()
  }

  #[inline]
  pub fn cumulative_layer_point(&self) -> i64 {
    self.state.lock().cumulative_layer_point()
  }

  #[inline]
  pub fn tablet_state(&self) -> TabletState {
    self.state.lock().tablet_state()
  }

  pub fn schema(&self) -> TabletSchema {
    self.state.lock().schema().clone()
  }

  pub fn all_rs_metas(&self) -> Vec<RowsetMetaRef> {
    self.state.lock().rs_metas().to_vec()
  }

  pub fn all_inc_rs_metas(&self) -> Vec<RowsetMetaRef> {
    self.state.lock().inc_rs_metas().to_vec()
  }

  pub fn alter_task(&self) -> Option<AlterTask> {
    self.state.lock().alter_task().cloned()
  }

  pub fn set_cumulative_layer_point(&self, point: i64) {
    self.state.lock().set_cumulative_layer_point(point);
  }

  pub fn set_shard_id(&self, shard_id: i64) {
    self.state.lock().set_shard_id(shard_id);
  }

  pub fn set_creation_time(&self, creation_time: i64) {
    self.state.lock().set_creation_time(creation_time);
  }

  pub fn set_tablet_state(&self, state: TabletState) {
    self.state.lock().set_tablet_state(state);
  }

  /// Append without persisting, used while building a record in bulk
  /// 追加但不持久化，用于批量构建记录
  pub fn add_rs_meta(&self, rs: RowsetMetaRef) -> Result<()> {
    self.state.lock().add_rs_meta(rs)
  }

  pub fn modify_rs_metas(&self, to_add: &[RowsetMetaRef], to_delete: &[RowsetMetaRef]) -> Result<()> {
    self.mutate(|s| {
      s.modify_rs_metas(to_add, to_delete);
      Ok(())
    })
  }

  /// Replace the version history and drop the alter task
  /// 替换版本历史并丢弃 alter 任务
  pub fn revise_rs_metas(&self, li: &[RowsetMetaRef]) -> Result<()> {
    self.mutate(|s| {
      s.revise_rs_metas(li);
      Ok(())
    })
  }

  pub fn add_inc_rs_meta(&self, rs: RowsetMetaRef) -> Result<()> {
    self.mutate(|s| s.add_inc_rs_meta(rs))
  }

  pub fn delete_rs_meta_by_version(&self, version: Version) -> Result<()> {
    self.mutate(|s| {
      s.delete_rs_meta_by_version(version);
      Ok(())
    })
  }

  pub fn delete_inc_rs_meta_by_version(&self, version: Version) -> Result<()> {
    self.mutate(|s| {
      s.delete_inc_rs_meta_by_version(version);
      Ok(())
    })
  }

  pub fn acquire_inc_rs_meta(&self, version: Version) -> Option<RowsetMetaRef> {
    self.state.lock().acquire_inc_rs_meta(version)
  }

  pub fn max_version(&self) -> Version {
    self.state.lock().max_version()
  }

  pub fn add_delete_predicate(&self, pred: &DeletePredicatePb, version: i64) {
    self.state.lock().add_delete_predicate(pred, version);
  }

  pub fn remove_delete_predicate_by_version(&self, version: Version) -> Result<()> {
    self.state.lock().remove_delete_predicate_by_version(version)
  }

  pub fn version_for_delete_predicate(&self, version: Version) -> bool {
    version.is_singleton() && self.state.lock().version_for_delete_predicate(version)
  }

  pub fn delete_predicates(&self) -> Vec<DeletePredicatePb> {
    self.state.lock().delete_predicates().to_vec()
  }

  pub fn add_alter_task(&self, task: &AlterTask) -> Result<()> {
    self.mutate(|s| {
      s.add_alter_task(task);
      Ok(())
    })
  }

  /// Cleared in memory even when the persist fails
  /// 即使持久化失败，内存中也已清除
  pub fn delete_alter_task(&self) -> Result<()> {
    self.mutate(|s| {
      s.delete_alter_task();
      Ok(())
    })
  }
}
