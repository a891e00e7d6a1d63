// ==========================================
// 编辑内容排期系统 - 领域层
// ==========================================
// 依据: Editorial_Master_Spec.md - PART C 数据与状态体系
// ==========================================

pub mod content;
pub mod schedule;
pub mod slot;
pub mod types;

// 重导出领域实体
pub use content::{ContentItem, ContentPackage, MediaAsset, PerformanceMetrics, RawContentRecord};
pub use schedule::{BufferStatus, ConflictReport, ItemUpdate, PlanningStats, ScheduleAssignment};
pub use slot::{EditorialDna, PublicationSlot, DEFAULT_PILLAR_COUNT};
pub use types::{
    Channel, ConflictKind, ContentStatus, MediaCategory, MediaKind, Objective, Weight,
};
