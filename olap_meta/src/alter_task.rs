//! Pending schema change or rollup against a related tablet
//! 针对关联 tablet 的待执行 schema 变更或 rollup

use std::sync::Arc;

use olap_base::{AlterTabletState, AlterTabletType, RowsetMeta, RowsetMetaRef, pb::AlterTabletPb};

#[derive(Debug, Clone, PartialEq)]
pub struct AlterTask {
  pub state: AlterTabletState,
  pub related_tablet_id: i64,
  pub related_schema_hash: i64,
  pub alter_type: AlterTabletType,
  pub rowsets_to_alter: Vec<RowsetMetaRef>,
}

impl Default for AlterTask {
  fn default() -> Self {
    Self {
      state: AlterTabletState::None,
      related_tablet_id: -1,
      related_schema_hash: -1,
      alter_type: AlterTabletType::SchemaChange,
      rowsets_to_alter: Vec::new(),
    }
  }
}

impl AlterTask {
  /// Running task against the related tablet
  /// 针对关联 tablet 的运行中任务
  pub fn new(related_tablet_id: i64, related_schema_hash: i64, alter_type: AlterTabletType) -> Self {
    Self {
      state: AlterTabletState::Running,
      related_tablet_id,
      related_schema_hash,
      alter_type,
      rowsets_to_alter: Vec::new(),
    }
  }

  pub fn from_pb(pb: &AlterTabletPb) -> Self {
    Self {
      state: pb.alter_state,
      related_tablet_id: pb.related_tablet_id,
      related_schema_hash: pb.related_schema_hash,
      alter_type: pb.alter_type,
      rowsets_to_alter: pb
        .rowsets_to_alter
        .iter()
        .map(|rs| Arc::new(RowsetMeta::from_pb(rs.clone())))
        .collect(),
    }
  }

  pub fn to_pb(&self) -> AlterTabletPb {
    AlterTabletPb {
      alter_state: self.state,
      related_tablet_id: self.related_tablet_id,
      related_schema_hash: self.related_schema_hash,
      alter_type: self.alter_type,
      rowsets_to_alter: self.rowsets_to_alter.iter().map(|rs| rs.to_pb()).collect(),
    }
  }

  /// Reset to default, rowsets to alter included
  /// 重置为默认值，包括待变更的 rowset
  pub fn clear(&mut self) {
    *self = Self::default();
  }
}
