//! Tablet meta record operations
//! tablet 元数据记录操作

use std::{collections::HashMap, sync::Arc, thread};

use aok::{OK, Void};
use log::info;
use olap_base::{
  AggregationType, AlterTabletState, AlterTabletType, CompressKind, KeysType, PrimitiveType,
  RowsetMeta, RowsetMetaRef, TabletState, Version,
  desc::{ColumnDesc, SchemaDesc, TypeDesc},
  pb::{DeletePredicatePb, TabletMetaPb},
};
use olap_meta::{
  AlterTask, Conf, DelPredLog, EMPTY_MAX_VERSION, Error, RowsetSet, State, TabletIdent,
  TabletMeta,
};
use olap_store::{DataDir, MemStore, meta};

#[static_init::constructor(0)]
extern "C" fn _log_init() {
  log_init::init();
}

const TABLET_ID: i64 = 15007;
const SCHEMA_HASH: i64 = 368169781;

fn rs(start: i64, end: i64) -> RowsetMetaRef {
  Arc::new(
    RowsetMeta::new(start * 1000 + end, Version::new(start, end))
      .with_rows(end - start + 1, 4096)
      .with_tablet(TABLET_ID, SCHEMA_HASH),
  )
}

fn versions(li: &[RowsetMetaRef]) -> Vec<(i64, i64)> {
  li.iter().map(|r| (r.start_version(), r.end_version())).collect()
}

fn ident() -> TabletIdent {
  TabletIdent {
    table_id: 10001,
    partition_id: 10002,
    tablet_id: TABLET_ID,
    schema_hash: SCHEMA_HASH,
    shard_id: 7,
  }
}

fn desc() -> SchemaDesc {
  SchemaDesc {
    short_key_column_count: 1,
    keys_type: KeysType::AggKeys,
    columns: vec![
      ColumnDesc {
        aggregation: AggregationType::Sum,
        ..ColumnDesc::key("k1", TypeDesc::new(PrimitiveType::Int))
      },
      ColumnDesc::value(
        "v1",
        TypeDesc::with_len(PrimitiveType::Varchar, 20),
        AggregationType::Replace,
      ),
      ColumnDesc::value("v2", TypeDesc::decimal(27, 9), AggregationType::Sum),
    ],
    bloom_filter_fpp: Some(0.05),
  }
}

fn unique_ids(n: u32) -> HashMap<u32, u32> {
  (0..n).map(|i| (i, 100 + i)).collect()
}

/// Record bound to an in-memory store
/// 绑定内存存储的记录
fn bound() -> olap_meta::Result<(Arc<DataDir>, TabletMeta)> {
  let data_dir = Arc::new(DataDir::new("/mem", MemStore::new()));
  let mut meta = TabletMeta::create(ident(), &desc(), 3, &unique_ids(3), &[])?;
  meta.bind(&data_dir);
  Ok((data_dir, meta))
}

fn stored(data_dir: &DataDir) -> olap_meta::Result<TabletMeta> {
  let bytes = meta::get(data_dir, TABLET_ID, SCHEMA_HASH)?.expect("persisted meta");
  Ok(TabletMeta::decode(&bytes)?)
}

#[test]
fn test_create() -> Void {
  let meta = TabletMeta::create(ident(), &desc(), 3, &unique_ids(3), &[])?;
  assert_eq!(meta.table_id(), 10001);
  assert_eq!(meta.partition_id(), 10002);
  assert_eq!(meta.tablet_id(), TABLET_ID);
  assert_eq!(meta.schema_hash(), SCHEMA_HASH);
  assert_eq!(meta.shard_id(), 7);
  assert_eq!(meta.cumulative_layer_point(), -1);
  assert!(meta.creation_time() > 0);
  assert_eq!(meta.tablet_state(), TabletState::NotReady);
  assert!(meta.all_rs_metas().is_empty());
  assert!(meta.alter_task().is_none());

  let schema = meta.schema();
  assert_eq!(schema.keys_type(), KeysType::AggKeys);
  assert_eq!(schema.num_columns(), 3);
  assert_eq!(schema.num_key_columns(), 1);
  assert_eq!(schema.num_short_key_columns(), 1);
  assert_eq!(schema.num_rows_per_row_block(), 1024);
  assert_eq!(schema.compress_kind(), CompressKind::Lz4);
  assert_eq!(schema.next_column_unique_id(), 3);
  // no column opted into bloom filter
  assert_eq!(schema.bf_fpp(), None);

  let k1 = schema.column(0).expect("k1");
  assert_eq!(k1.unique_id, 100);
  assert_eq!(k1.aggregation, AggregationType::None);
  assert_eq!((k1.length, k1.index_length), (4, 4));
  assert!(!k1.is_nullable);

  let v1 = schema.column(1).expect("v1");
  assert_eq!(v1.aggregation, AggregationType::Replace);
  assert_eq!((v1.length, v1.index_length), (22, 10));
  assert!(v1.is_nullable);
  assert_eq!((v1.precision, v1.frac), (None, None));

  let v2 = schema.column(2).expect("v2");
  assert_eq!((v2.length, v2.index_length), (12, 12));
  assert_eq!((v2.precision, v2.frac), (Some(27), Some(9)));
  assert_eq!(schema.field_index("v2"), Some(2));
  OK
}

#[test]
fn test_create_conf_and_bloom_filter() -> Void {
  let mut desc = desc();
  desc.columns[2].is_bloom_filter_column = Some(true);
  desc.columns.push(ColumnDesc::value(
    "v3",
    TypeDesc::with_len(PrimitiveType::Hll, 8),
    AggregationType::HllUnion,
  ));
  let conf = [
    Conf::RowsPerRowBlock(2048),
    Conf::Compress(CompressKind::Lzo),
    Conf::IndexLen(5),
  ];
  let meta = TabletMeta::create(ident(), &desc, 4, &unique_ids(4), &conf)?;
  let schema = meta.schema();
  assert_eq!(schema.num_rows_per_row_block(), 2048);
  assert_eq!(schema.compress_kind(), CompressKind::Lzo);
  assert_eq!(schema.column(1).expect("v1").index_length, 5);
  assert_eq!(schema.column(3).expect("v3").length, 10);
  assert!(schema.column(2).expect("v2").is_bf_column);
  assert!(!schema.column(1).expect("v1").is_bf_column);
  assert!(schema.has_bf_columns());
  assert_eq!(schema.bf_fpp(), Some(0.05));
  OK
}

#[test]
fn test_create_unknown_column() -> Void {
  let mut ids = unique_ids(3);
  ids.remove(&1);
  assert!(matches!(
    TabletMeta::create(ident(), &desc(), 3, &ids, &[]),
    Err(Error::UnknownColumn(1))
  ));
  OK
}

#[test]
fn test_add_rs_meta_rejects_duplicate() -> Void {
  let meta = TabletMeta::empty();
  meta.add_rs_meta(rs(0, 5))?;
  // the error names the rowset already holding the version
  let r = meta.add_rs_meta(Arc::new(RowsetMeta::new(77, Version::new(0, 5))));
  assert!(matches!(
    r,
    Err(Error::AlreadyExists { version, rowset_id: 5 }) if version == Version::new(0, 5)
  ));
  assert_eq!(versions(&meta.all_rs_metas()), vec![(0, 5)]);
  assert_eq!(meta.all_rs_metas()[0].rowset_id(), 5);

  // the incremental set is independent
  meta.lock().add_inc_rs_meta(rs(0, 5))?;
  assert_eq!(versions(&meta.all_inc_rs_metas()), vec![(0, 5)]);
  OK
}

#[test]
fn test_add_rs_meta_does_not_persist() -> Void {
  let (data_dir, meta) = bound()?;
  meta.add_rs_meta(rs(0, 0))?;
  assert!(meta::get(&data_dir, TABLET_ID, SCHEMA_HASH)?.is_none());
  meta.save_meta()?;
  assert_eq!(versions(&stored(&data_dir)?.all_rs_metas()), vec![(0, 0)]);
  OK
}

#[test]
fn test_max_version() -> Void {
  let meta = TabletMeta::empty();
  assert_eq!(meta.max_version(), EMPTY_MAX_VERSION);
  assert_eq!(meta.max_version(), Version::new(-1, 0));

  for (s, e) in [(1, 5), (0, 0), (6, 10)] {
    meta.add_rs_meta(rs(s, e))?;
  }
  assert_eq!(meta.max_version(), Version::new(6, 10));

  // equal end, greater start wins
  let mut set = RowsetSet::default();
  set.add(rs(0, 5))?;
  set.add(rs(3, 5))?;
  assert_eq!(set.max_version(), Version::new(3, 5));

  // incremental rowsets do not count
  meta.lock().add_inc_rs_meta(rs(11, 11))?;
  assert_eq!(meta.max_version(), Version::new(6, 10));
  OK
}

#[test]
fn test_modify_rs_metas() -> Void {
  let (data_dir, meta) = bound()?;
  for v in 0..3 {
    meta.add_rs_meta(rs(v, v))?;
  }
  meta.modify_rs_metas(&[rs(1, 2)], &[rs(1, 1), rs(2, 2)])?;
  assert_eq!(versions(&meta.all_rs_metas()), vec![(0, 0), (1, 2)]);
  assert_eq!(
    versions(&stored(&data_dir)?.all_rs_metas()),
    vec![(0, 0), (1, 2)]
  );
  OK
}

#[test]
fn test_revise_rs_metas_clears_alter_task() -> Void {
  let (data_dir, meta) = bound()?;
  meta.add_rs_meta(rs(0, 4))?;
  meta.add_alter_task(&AlterTask::new(20001, 4242, AlterTabletType::Rollup))?;
  assert_eq!(stored(&data_dir)?.alter_task().map(|t| t.related_tablet_id), Some(20001));

  let new_set = [rs(0, 1), rs(2, 9)];
  meta.revise_rs_metas(&new_set)?;
  assert!(meta.alter_task().is_none());
  assert_eq!(meta.all_rs_metas(), new_set.to_vec());

  let back = stored(&data_dir)?;
  assert!(back.alter_task().is_none());
  assert_eq!(versions(&back.all_rs_metas()), vec![(0, 1), (2, 9)]);
  OK
}

#[test]
fn test_inc_rs_meta() -> Void {
  let (data_dir, meta) = bound()?;
  meta.add_inc_rs_meta(rs(3, 3))?;
  meta.add_inc_rs_meta(rs(4, 4))?;
  assert!(matches!(
    meta.add_inc_rs_meta(rs(3, 3)),
    Err(Error::AlreadyExists { .. })
  ));
  assert!(meta.all_rs_metas().is_empty());
  assert_eq!(versions(&stored(&data_dir)?.all_inc_rs_metas()), vec![(3, 3), (4, 4)]);

  let got = meta.acquire_inc_rs_meta(Version::single(4)).expect("inc rowset");
  assert_eq!(got.rowset_id(), 4004);
  assert!(meta.acquire_inc_rs_meta(Version::new(3, 4)).is_none());

  meta.delete_inc_rs_meta_by_version(Version::single(3))?;
  assert_eq!(versions(&meta.all_inc_rs_metas()), vec![(4, 4)]);
  assert_eq!(versions(&stored(&data_dir)?.all_inc_rs_metas()), vec![(4, 4)]);
  OK
}

#[test]
fn test_delete_rs_meta_by_version() -> Void {
  let (data_dir, meta) = bound()?;
  for (s, e) in [(0, 0), (1, 1), (2, 2)] {
    meta.add_rs_meta(rs(s, e))?;
  }
  // an unchecked add can leave duplicates, all of them go
  meta.modify_rs_metas(&[rs(1, 1)], &[])?;
  meta.delete_rs_meta_by_version(Version::single(1))?;
  assert_eq!(versions(&meta.all_rs_metas()), vec![(0, 0), (2, 2)]);

  // missing version is a no-op that still persists
  meta.delete_rs_meta_by_version(Version::new(7, 9))?;
  assert_eq!(versions(&stored(&data_dir)?.all_rs_metas()), vec![(0, 0), (2, 2)]);
  OK
}

#[test]
fn test_delete_predicate() -> Void {
  let meta = TabletMeta::empty();
  meta.add_delete_predicate(&DeletePredicatePb::new(0, ["k1=1"]), 3);
  meta.add_delete_predicate(&DeletePredicatePb::new(0, ["k1=2", "v1='x'"]), 3);
  meta.add_delete_predicate(&DeletePredicatePb::new(0, ["k1>9"]), 5);

  let li = meta.delete_predicates();
  assert_eq!(li.len(), 2);
  assert_eq!(li[0], DeletePredicatePb::new(3, ["k1=2", "v1='x'"]));
  assert_eq!(li[1].version, 5);

  assert!(meta.version_for_delete_predicate(Version::single(3)));
  assert!(!meta.version_for_delete_predicate(Version::new(3, 5)));
  assert!(!meta.version_for_delete_predicate(Version::single(4)));

  assert!(matches!(
    meta.remove_delete_predicate_by_version(Version::new(3, 4)),
    Err(Error::NotSingleton(_))
  ));
  assert_eq!(meta.delete_predicates().len(), 2);

  meta.remove_delete_predicate_by_version(Version::single(3))?;
  assert!(!meta.version_for_delete_predicate(Version::single(3)));
  assert_eq!(meta.delete_predicates(), vec![DeletePredicatePb::new(5, ["k1>9"])]);
  OK
}

#[test]
fn test_del_pred_log_removes_adjacent_matches() -> Void {
  let li = [
    DeletePredicatePb::new(2, ["a=1"]),
    DeletePredicatePb::new(2, ["a=2"]),
    DeletePredicatePb::new(1, ["b=1"]),
    DeletePredicatePb::new(2, ["a=3"]),
  ];
  let mut log = DelPredLog::from_pb(&li);
  log.remove(Version::single(2))?;
  assert_eq!(log.as_slice(), &[DeletePredicatePb::new(1, ["b=1"])]);
  OK
}

#[test]
fn test_alter_task() -> Void {
  let mut task = AlterTask::new(20001, 4242, AlterTabletType::SchemaChange);
  task.rowsets_to_alter = vec![rs(0, 3), rs(4, 4)];
  assert_eq!(AlterTask::from_pb(&task.to_pb()), task);

  task.clear();
  assert_eq!(task.state, AlterTabletState::None);
  assert_eq!((task.related_tablet_id, task.related_schema_hash), (-1, -1));
  assert!(task.rowsets_to_alter.is_empty());
  assert_eq!(task, AlterTask::default());

  let (data_dir, meta) = bound()?;
  let mut task = AlterTask::new(20001, 4242, AlterTabletType::Rollup);
  task.state = AlterTabletState::Finished;
  meta.add_alter_task(&task)?;
  assert_eq!(meta.alter_task(), Some(task.clone()));
  assert_eq!(stored(&data_dir)?.alter_task(), Some(task));

  meta.delete_alter_task()?;
  assert!(meta.alter_task().is_none());
  assert!(stored(&data_dir)?.alter_task().is_none());
  OK
}

#[test]
fn test_setters() -> Void {
  let meta = TabletMeta::empty();
  meta.set_cumulative_layer_point(8);
  meta.set_shard_id(3);
  meta.set_creation_time(1_600_000_000);
  meta.set_tablet_state(TabletState::Running);

  let pb = meta.to_pb();
  assert_eq!(pb.cumulative_layer_point, 8);
  assert_eq!(pb.shard_id, 3);
  assert_eq!(pb.creation_time, 1_600_000_000);
  assert_eq!(pb.tablet_state, TabletState::Running.tag());
  assert_eq!(meta.lock().pb(), &pb);
  OK
}

#[test]
fn test_unknown_tablet_state() -> Void {
  let pb = TabletMetaPb {
    tablet_id: TABLET_ID,
    tablet_state: 99,
    ..Default::default()
  };
  let meta = TabletMeta::from_state(State::from_pb(&pb));
  assert_eq!(meta.tablet_state(), TabletState::NotReady);
  assert_eq!(meta.tablet_id(), TABLET_ID);
  OK
}

#[test]
fn test_cached_pb_tracks_fields() -> Void {
  let (_data_dir, meta) = bound()?;
  meta.add_rs_meta(rs(0, 1))?;
  meta.add_inc_rs_meta(rs(2, 2))?;
  meta.add_delete_predicate(&DeletePredicatePb::new(0, ["k1=1"]), 2);
  meta.add_alter_task(&AlterTask::new(1, 2, AlterTabletType::Rollup))?;
  meta.set_tablet_state(TabletState::Running);

  let state = meta.lock();
  assert_eq!(state.pb(), &state.to_pb());
  assert_eq!(TabletMeta::decode(&state.encode())?.to_pb(), state.to_pb());
  OK
}

#[test]
fn test_concurrent_add_inc_rs_meta() -> Void {
  const THREADS: i64 = 8;
  const PER_THREAD: i64 = 50;

  let (data_dir, meta) = bound()?;
  thread::scope(|s| {
    for t in 0..THREADS {
      let meta = &meta;
      s.spawn(move || {
        for i in 0..PER_THREAD {
          let v = t * PER_THREAD + i;
          meta.add_inc_rs_meta(rs(v, v)).expect("add inc rowset");
        }
      });
    }
  });

  let n = (THREADS * PER_THREAD) as usize;
  assert_eq!(meta.all_inc_rs_metas().len(), n);
  let mut li = versions(&stored(&data_dir)?.all_inc_rs_metas());
  li.sort_unstable();
  assert_eq!(li, (0..THREADS * PER_THREAD).map(|v| (v, v)).collect::<Vec<_>>());
  info!("{n} concurrent inc rowsets persisted");
  OK
}
