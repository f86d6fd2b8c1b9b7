use aok::{OK, Void};
use log::info;
use olap_base::{
  PrimitiveType, RowsetMeta, TabletSchema, TabletState, Version, field_len,
  pb::{ColumnPb, TabletSchemaPb},
};

#[static_init::constructor(0)]
extern "C" fn _log_init() {
  log_init::init();
}

#[test]
fn test_version() -> Void {
  let v = Version::new(3, 7);
  assert!(!v.is_singleton());
  assert!(Version::single(5).is_singleton());
  assert_eq!(Version::from((3, 7)), v);
  assert_eq!(v.to_string(), "[3-7]");
  OK
}

#[test]
fn test_field_len() -> Void {
  assert_eq!(field_len(PrimitiveType::Tinyint, 0), 1);
  assert_eq!(field_len(PrimitiveType::Int, 0), 4);
  assert_eq!(field_len(PrimitiveType::Largeint, 0), 16);
  assert_eq!(field_len(PrimitiveType::Date, 0), 3);
  assert_eq!(field_len(PrimitiveType::Decimal, 0), 12);
  assert_eq!(field_len(PrimitiveType::Char, 20), 20);
  // u16 length prefix
  assert_eq!(field_len(PrimitiveType::Varchar, 20), 22);
  assert_eq!(field_len(PrimitiveType::Hll, 64), 66);
  // saturates instead of wrapping
  assert_eq!(field_len(PrimitiveType::Varchar, u32::MAX), u32::MAX);
  assert_eq!(field_len(PrimitiveType::Hll, u32::MAX - 1), u32::MAX);
  OK
}

#[test]
fn test_tablet_state_tag() -> Void {
  for state in [
    TabletState::NotReady,
    TabletState::Running,
    TabletState::Tombstoned,
    TabletState::Stopped,
    TabletState::Shutdown,
  ] {
    assert_eq!(TabletState::try_from(state.tag()), Ok(state));
  }
  assert_eq!(TabletState::try_from(42), Err(42));
  assert_eq!(TabletState::try_from(-1), Err(-1));
  OK
}

#[test]
fn test_rowset_meta() -> Void {
  let rs = RowsetMeta::new(9, Version::new(2, 4))
    .with_rows(100, 4096)
    .with_tablet(1, 2);
  assert_eq!(rs.version(), Version::new(2, 4));
  assert_eq!(rs.start_version(), 2);
  assert_eq!(rs.end_version(), 4);
  assert_eq!(rs.rowset_id(), 9);
  assert!(!rs.is_empty());
  assert_eq!(RowsetMeta::from_pb(rs.to_pb()), rs);
  assert!(RowsetMeta::new(1, Version::single(0)).is_empty());
  OK
}

#[test]
fn test_schema_pb() -> Void {
  let pb = TabletSchemaPb {
    columns: vec![
      ColumnPb {
        unique_id: 0,
        name: "k1".into(),
        is_key: true,
        ..Default::default()
      },
      ColumnPb {
        unique_id: 1,
        name: "v1".into(),
        is_bf_column: true,
        ..Default::default()
      },
    ],
    num_short_key_columns: 1,
    next_column_unique_id: 2,
    bf_fpp: Some(0.05),
    ..Default::default()
  };
  let schema = TabletSchema::from_pb(&pb);
  assert_eq!(schema.num_columns(), 2);
  assert_eq!(schema.num_key_columns(), 1);
  assert_eq!(schema.field_index("v1"), Some(1));
  assert_eq!(schema.field_index("nope"), None);
  assert!(schema.has_bf_columns());
  assert_eq!(schema.to_pb(), pb);
  info!("schema ok");
  OK
}
