// ==========================================
// 编辑内容排期系统 - 核心库
// ==========================================
// 依据: Editorial_Master_Spec.md - 系统宪法
// 系统定位: 内容日历决策支持 (人工最终控制权)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 存储边界
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    Channel, ConflictKind, ContentStatus, MediaCategory, MediaKind, Objective, Weight,
};

// 领域实体
pub use domain::{
    BufferStatus, ConflictReport, ContentItem, ContentPackage, EditorialDna, ItemUpdate,
    MediaAsset, PerformanceMetrics, PlanningStats, PublicationSlot, RawContentRecord,
    ScheduleAssignment,
};

// 引擎
pub use engine::{
    AutoScheduler, BatchGenerator, BufferMonitor, CalendarValidator, ContentImporter,
    PlanningOrchestrator, PriorityScorer, StatsEngine, StatusMachine, WeightClassifier,
};

// 配置
pub use config::{
    ChannelPlan, PlanningConfigReader, SchedulingConstraints, StaticPlanningConfig, WeightRules,
};

// 仓储
pub use repository::{ContentStore, InMemoryContentStore, RepositoryError, RepositoryResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "编辑内容排期系统";

// ==========================================
// 预编译检查
// ==========================================
