// ==========================================
// 编辑内容排期系统 - 内容摄入引擎
// ==========================================
// 依据: Editorial_Master_Spec.md - PART D2 摄入边界
// 红线: 松散记录必须经字段校验才能进入引擎;缺陷记录要么阻断要么归一
// ==========================================
// 职责: RawContentRecord → 字段校验/归一 → ContentItem + DQ报告
// ==========================================

use crate::domain::content::{ContentItem, RawContentRecord};
use crate::domain::types::{Channel, ContentStatus, Objective, Weight};
use chrono::Utc;
use tracing::{debug, warn};

// ==========================================
// DqLevel - 数据质量级别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DqLevel {
    Error,   // 错误(阻断该记录)
    Warning, // 警告(归一后放行)
    Info,    // 提示(仅记录)
}

// ==========================================
// DqViolation - 数据质量违规记录
// ==========================================
#[derive(Debug, Clone)]
pub struct DqViolation {
    pub row_number: usize,        // 原始记录行号
    pub item_id: Option<String>,  // 内容ID(如可解析)
    pub level: DqLevel,           // 违规级别
    pub field: String,            // 违规字段
    pub message: String,          // 违规描述
}

// ==========================================
// DqSummary - 数据质量汇总
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct DqSummary {
    pub total_rows: usize, // 总记录数
    pub accepted: usize,   // 放行数
    pub blocked: usize,    // 阻断数(ERROR)
    pub warning: usize,    // 警告数(归一放行)
}

// ==========================================
// IngestResult - 摄入结果
// ==========================================
#[derive(Debug, Clone)]
pub struct IngestResult {
    pub items: Vec<ContentItem>,      // 放行的内容条目
    pub summary: DqSummary,           // 汇总统计
    pub violations: Vec<DqViolation>, // 违规明细
}

// ==========================================
// ContentImporter - 内容摄入引擎
// ==========================================
pub struct ContentImporter {
    // 无状态引擎
}

impl ContentImporter {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 批量摄入松散记录
    ///
    /// 校验规则:
    /// - item_id/channel 缺失或非法 → ERROR 阻断
    /// - 排期族状态(SCHEDULED/PUBLISHED/MEASURED)缺落位日期 → ERROR 阻断
    /// - status 缺失 → 归一为 INBOX (WARNING)
    /// - 非发布族状态携带表现指标 → 剥离指标 (WARNING)
    /// - REJECTED 缺原因 → 归一占位原因 (WARNING)
    /// - 评分越界 → 钳制 [0,100] (WARNING)
    /// - 同时为核心又引用父条目 → 归一为派生 (WARNING)
    pub fn ingest(&self, records: Vec<RawContentRecord>) -> IngestResult {
        let total_rows = records.len();
        let mut items = Vec::new();
        let mut violations = Vec::new();
        let mut blocked = 0;
        let mut warned_rows = 0;

        for record in records {
            let before = violations.len();
            match self.validate_record(record, &mut violations) {
                Some(item) => {
                    if violations[before..]
                        .iter()
                        .any(|v| v.level == DqLevel::Warning)
                    {
                        warned_rows += 1;
                    }
                    items.push(item);
                }
                None => blocked += 1,
            }
        }

        debug!(
            total = total_rows,
            accepted = items.len(),
            blocked,
            "内容摄入完成"
        );

        IngestResult {
            summary: DqSummary {
                total_rows,
                accepted: items.len(),
                blocked,
                warning: warned_rows,
            },
            items,
            violations,
        }
    }

    // ==========================================
    // 单条校验
    // ==========================================

    /// 校验并归一单条记录;ERROR 级缺陷返回 None
    fn validate_record(
        &self,
        record: RawContentRecord,
        violations: &mut Vec<DqViolation>,
    ) -> Option<ContentItem> {
        let row = record.row_number;

        // === 必填: item_id ===
        let item_id = match record.item_id {
            Some(id) if !id.trim().is_empty() => id,
            _ => {
                violations.push(DqViolation {
                    row_number: row,
                    item_id: None,
                    level: DqLevel::Error,
                    field: "item_id".to_string(),
                    message: "item_id 缺失, 记录阻断".to_string(),
                });
                return None;
            }
        };

        // === 必填: channel ===
        let channel = match record.channel.as_deref().and_then(Channel::from_str) {
            Some(channel) => channel,
            None => {
                warn!(row, item_id = %item_id, "渠道缺失或非法, 记录阻断");
                violations.push(DqViolation {
                    row_number: row,
                    item_id: Some(item_id),
                    level: DqLevel::Error,
                    field: "channel".to_string(),
                    message: format!("渠道缺失或非法: {:?}", record.channel),
                });
                return None;
            }
        };

        // === status: 缺失归一为 INBOX ===
        let status = match record.status.as_deref() {
            Some(raw) => match ContentStatus::from_str(raw) {
                Some(status) => status,
                None => {
                    violations.push(DqViolation {
                        row_number: row,
                        item_id: Some(item_id.clone()),
                        level: DqLevel::Error,
                        field: "status".to_string(),
                        message: format!("状态非法: {}", raw),
                    });
                    return None;
                }
            },
            None => {
                violations.push(DqViolation {
                    row_number: row,
                    item_id: Some(item_id.clone()),
                    level: DqLevel::Warning,
                    field: "status".to_string(),
                    message: "状态缺失, 归一为 INBOX".to_string(),
                });
                ContentStatus::Inbox
            }
        };

        // === 排期族状态必须有落位日期 ===
        if status.is_on_calendar() && record.scheduled_date.is_none() {
            violations.push(DqViolation {
                row_number: row,
                item_id: Some(item_id),
                level: DqLevel::Error,
                field: "scheduled_date".to_string(),
                message: format!("状态 {} 缺少落位日期, 记录阻断", status),
            });
            return None;
        }

        // === 指标只在发布族状态存在 ===
        let metrics = if record.metrics.is_some() && !status.is_live() {
            violations.push(DqViolation {
                row_number: row,
                item_id: Some(item_id.clone()),
                level: DqLevel::Warning,
                field: "metrics".to_string(),
                message: format!("状态 {} 不应携带表现指标, 已剥离", status),
            });
            None
        } else {
            record.metrics
        };

        // === REJECTED 缺原因归一占位 ===
        let rejection_reason = if status == ContentStatus::Rejected {
            match record.rejection_reason {
                Some(reason) if !reason.trim().is_empty() => Some(reason),
                _ => {
                    violations.push(DqViolation {
                        row_number: row,
                        item_id: Some(item_id.clone()),
                        level: DqLevel::Warning,
                        field: "rejection_reason".to_string(),
                        message: "拒绝原因缺失, 归一为占位原因".to_string(),
                    });
                    Some("未注明原因".to_string())
                }
            }
        } else {
            record.rejection_reason
        };

        // === 评分钳制 ===
        let raw_score = record.priority_score.unwrap_or(50);
        let priority_score = raw_score.clamp(0, 100);
        if priority_score != raw_score {
            violations.push(DqViolation {
                row_number: row,
                item_id: Some(item_id.clone()),
                level: DqLevel::Warning,
                field: "priority_score".to_string(),
                message: format!("评分 {} 越界, 已钳制为 {}", raw_score, priority_score),
            });
        }

        // === 核心/派生互斥归一 ===
        let mut is_core = record.is_core.unwrap_or(false);
        if is_core && record.parent_id.is_some() {
            violations.push(DqViolation {
                row_number: row,
                item_id: Some(item_id.clone()),
                level: DqLevel::Warning,
                field: "is_core".to_string(),
                message: "核心标志与父条目引用冲突, 归一为派生".to_string(),
            });
            is_core = false;
        }

        Some(ContentItem {
            item_id,
            asset_id: record.asset_id,
            package_id: record.package_id,
            channel,
            format: record
                .format
                .unwrap_or_else(|| channel.default_format().to_string()),
            copy_text: record.copy_text.unwrap_or_default(),
            hashtags: record.hashtags.unwrap_or_default(),
            cta: record.cta,
            status,
            weight_override: record.weight_override.as_deref().and_then(Weight::from_str),
            weight: None,
            priority_score,
            is_core,
            pillar: record.pillar,
            project_id: record.project_id,
            objective: record.objective.as_deref().and_then(Objective::from_str),
            parent_id: record.parent_id,
            derivative_ids: record.derivative_ids.unwrap_or_default(),
            scheduled_date: record.scheduled_date,
            published_at: None,
            measured_at: None,
            metrics,
            rejection_reason,
            buffer_flag: record.buffer_flag.unwrap_or(false),
            created_at: record.created_at.unwrap_or_else(Utc::now),
        })
    }
}

impl Default for ContentImporter {
    fn default() -> Self {
        Self::new()
    }
}
