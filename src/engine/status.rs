// ==========================================
// 编辑内容排期系统 - 状态转换引擎
// ==========================================
// 依据: Content_Engine_Specs_v0.2.md - 7. Status Machine
// 红线: 转换表封闭;引擎只枚举合法转换并计算副作用,不抛错
// 红线: 已上线(发布/复盘)的派生内容不参与级联拒绝
// ==========================================
// 职责: 生命周期状态转换 + 级联副作用计算
// 输入: 全量内容集合 + 目标转换
// 输出: ItemUpdate 批次 + 告警(级联计数等)
// ==========================================

use crate::domain::content::ContentItem;
use crate::domain::schedule::ItemUpdate;
use crate::domain::types::ContentStatus;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

// ==========================================
// TransitionOutcome - 转换结果
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct TransitionOutcome {
    pub updates: Vec<ItemUpdate>, // 更新批次(主条目在前,级联在后)
    pub warnings: Vec<String>,    // 告警(信息性,非错误)
}

// ==========================================
// StatusMachine - 状态转换引擎
// ==========================================
pub struct StatusMachine {
    // 无状态引擎,转换表为编译期常量
}

impl StatusMachine {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 转换表
    // ==========================================

    /// 枚举合法的前向转换目标
    pub fn legal_targets(from: ContentStatus) -> &'static [ContentStatus] {
        match from {
            ContentStatus::Inbox => &[ContentStatus::Generated, ContentStatus::Rejected],
            ContentStatus::Generated => &[ContentStatus::Review, ContentStatus::Rejected],
            ContentStatus::Review => &[ContentStatus::Approved, ContentStatus::Rejected],
            ContentStatus::Approved => &[ContentStatus::Scheduled, ContentStatus::Review],
            ContentStatus::Scheduled => &[ContentStatus::Published, ContentStatus::Approved],
            ContentStatus::Published => &[ContentStatus::Measured],
            ContentStatus::Measured => &[],
            ContentStatus::Rejected => &[ContentStatus::Review], // 允许重开
        }
    }

    /// 转换是否合法
    pub fn is_legal(from: ContentStatus, to: ContentStatus) -> bool {
        Self::legal_targets(from).contains(&to)
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算一次状态转换的更新批次
    ///
    /// 约定: 转换合法性由调用方先行守卫(is_legal);
    /// 对非法输入本方法只告警并返回空批次,不中断处理。
    ///
    /// 副作用:
    /// - 转入 PUBLISHED 且已带表现指标 → 自动晋级 MEASURED 并盖复盘时间戳
    /// - 核心内容转入 REJECTED → 级联拒绝未上线派生内容,级联计数作为告警
    /// - 退出 SCHEDULED(回到 APPROVED/REVIEW)→ 清除落位日期
    /// - REJECTED 重开(回到 REVIEW)→ 清除拒绝原因
    ///
    /// # 参数
    /// - `collection`: 全量内容集合快照
    /// - `item_id`: 目标内容
    /// - `to`: 目标状态
    /// - `reason`: 拒绝原因(仅 REJECTED 转换使用)
    /// - `now`: 时间戳来源
    pub fn apply(
        &self,
        collection: &[ContentItem],
        item_id: &str,
        to: ContentStatus,
        reason: Option<&str>,
        now: DateTime<Utc>,
    ) -> TransitionOutcome {
        let mut outcome = TransitionOutcome::default();

        let Some(item) = collection.iter().find(|i| i.item_id == item_id) else {
            warn!(item_id = %item_id, "状态转换目标不存在");
            outcome
                .warnings
                .push(format!("内容不存在, 转换被忽略: {}", item_id));
            return outcome;
        };

        if !Self::is_legal(item.status, to) {
            warn!(
                item_id = %item_id,
                from = %item.status,
                to = %to,
                "非法状态转换被忽略"
            );
            outcome.warnings.push(format!(
                "非法状态转换被忽略: {} {} -> {}",
                item_id, item.status, to
            ));
            return outcome;
        }

        let mut update = ItemUpdate::new(item_id);
        update.status = Some(to);

        match to {
            ContentStatus::Published => {
                update.published_at = Some(now);
                // 指标已就位 → 自动晋级复盘态
                if item.metrics.is_some() {
                    update.status = Some(ContentStatus::Measured);
                    update.measured_at = Some(now);
                    debug!(item_id = %item_id, "发布时指标已就位, 自动晋级 MEASURED");
                }
            }
            ContentStatus::Measured => {
                update.measured_at = Some(now);
            }
            ContentStatus::Rejected => {
                let reason_text = reason.unwrap_or("未注明原因").to_string();
                update.rejection_reason = Some(reason_text.clone());

                if item.is_core {
                    let cascaded = self.cascade_reject(collection, item, &reason_text);
                    if !cascaded.is_empty() {
                        outcome.warnings.push(format!(
                            "核心内容拒绝级联影响 {} 条派生内容",
                            cascaded.len()
                        ));
                        outcome.updates.push(update);
                        outcome.updates.extend(cascaded);
                        return outcome;
                    }
                }
            }
            ContentStatus::Approved | ContentStatus::Review
                if item.status == ContentStatus::Scheduled =>
            {
                // 退出排期,落位日期随之失效
                update.clear_scheduled_date = true;
            }
            ContentStatus::Review if item.status == ContentStatus::Rejected => {
                // 重开, 拒绝原因随之失效
                update.clear_rejection_reason = true;
            }
            _ => {}
        }

        outcome.updates.push(update);
        outcome
    }

    // ==========================================
    // 级联副作用
    // ==========================================

    /// 级联拒绝核心内容的未上线派生内容
    fn cascade_reject(
        &self,
        collection: &[ContentItem],
        core: &ContentItem,
        parent_reason: &str,
    ) -> Vec<ItemUpdate> {
        let mut cascaded = Vec::new();

        for derivative_id in &core.derivative_ids {
            let Some(derivative) = collection.iter().find(|i| i.item_id == *derivative_id) else {
                warn!(
                    core_id = %core.item_id,
                    derivative_id = %derivative_id,
                    "派生内容引用悬空, 级联跳过"
                );
                continue;
            };

            // 已上线或已拒绝的派生内容不动
            if derivative.status.is_live() || derivative.status == ContentStatus::Rejected {
                continue;
            }

            let mut update = ItemUpdate::new(&derivative.item_id);
            update.status = Some(ContentStatus::Rejected);
            update.rejection_reason = Some(format!(
                "父核心内容 {} 被拒绝: {}",
                core.item_id, parent_reason
            ));
            cascaded.push(update);
        }

        cascaded
    }
}

impl Default for StatusMachine {
    fn default() -> Self {
        Self::new()
    }
}
