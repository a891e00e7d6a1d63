// ==========================================
// 编辑内容排期系统 - 配置层
// ==========================================
// 依据: Content_Engine_Specs_v0.2.md - 9. 配置项全集
// ==========================================

pub mod planning_config;

pub use planning_config::{
    ChannelPlan, PlanningConfigReader, SchedulingConstraints, StaticPlanningConfig, WeightRules,
};
