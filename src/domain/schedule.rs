// ==========================================
// 编辑内容排期系统 - 排期输出领域模型
// ==========================================
// 依据: Content_Engine_Specs_v0.2.md - 6. 引擎输出口径
// 红线: 输出只是更新批次,不可反向污染内容集合
// ==========================================

use crate::domain::types::{ConflictKind, ContentStatus, Weight};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// ScheduleAssignment - 排期落位
// ==========================================
// 用途: Auto Scheduler 输出,调用方据此落库
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleAssignment {
    pub item_id: String,           // 内容ID
    pub scheduled_date: NaiveDate, // 落位日期
    pub status: ContentStatus,     // 新状态(恒为 SCHEDULED)
    pub slot_id: Option<String>,   // 匹配的发布槽位(可选,用于可解释性)
}

// ==========================================
// ItemUpdate - 内容更新批次(稀疏补丁)
// ==========================================
// 用途: 引擎所有变更的统一表达,由调用方在其事务纪律下应用
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemUpdate {
    pub item_id: String,

    // ===== 变更字段(None = 不变更) =====
    pub status: Option<ContentStatus>,
    pub scheduled_date: Option<NaiveDate>,
    pub priority_score: Option<i32>,
    pub weight: Option<Weight>,
    pub rejection_reason: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub measured_at: Option<DateTime<Utc>>,

    // ===== 清除标志(补丁无法用 None 表达清除) =====
    pub clear_scheduled_date: bool,
    pub clear_rejection_reason: bool,
}

impl ItemUpdate {
    /// 创建空补丁
    pub fn new(item_id: &str) -> Self {
        Self {
            item_id: item_id.to_string(),
            ..Default::default()
        }
    }
}

// ==========================================
// ConflictReport - 日历冲突记录
// ==========================================
// 用途: Calendar Validator 输出,数据质量信号而非故障
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictReport {
    pub date: NaiveDate,    // 冲突日期(周级冲突取该ISO周周一)
    pub kind: ConflictKind, // 冲突类型
    pub message: String,    // 人读说明
}

// ==========================================
// BufferStatus - 储备水位
// ==========================================
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BufferStatus {
    pub available: usize, // 当前储备数(buffer_flag 且 APPROVED)
    pub target: usize,    // 目标储备数
    pub sufficient: bool, // 是否充足
}

// ==========================================
// PlanningStats - 汇总统计
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningStats {
    pub by_status: HashMap<ContentStatus, usize>, // 各状态计数
    pub scheduled_heavy: usize,                   // 已落位重内容数
    pub scheduled_light: usize,                   // 已落位轻内容数
    pub core_items: usize,                        // 核心内容数
    pub buffer: BufferStatus,                     // 储备水位
}
