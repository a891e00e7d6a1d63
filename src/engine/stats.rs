// ==========================================
// 编辑内容排期系统 - 汇总统计引擎
// ==========================================
// 依据: Content_Engine_Specs_v0.2.md - 6. 引擎输出口径
// ==========================================
// 职责: 各状态计数、落位重/轻计数、核心计数、储备水位
// ==========================================

use crate::config::planning_config::WeightRules;
use crate::domain::content::ContentItem;
use crate::domain::schedule::PlanningStats;
use crate::domain::types::Weight;
use crate::engine::buffer::BufferMonitor;
use crate::engine::weight::WeightClassifier;
use std::collections::HashMap;

// ==========================================
// StatsEngine - 汇总统计引擎
// ==========================================
pub struct StatsEngine {
    classifier: WeightClassifier,
    buffer: BufferMonitor,
}

impl StatsEngine {
    /// 构造函数
    pub fn new() -> Self {
        Self {
            classifier: WeightClassifier::new(),
            buffer: BufferMonitor::new(),
        }
    }

    /// 汇总内容集合统计
    ///
    /// # 参数
    /// - `collection`: 全量内容集合
    /// - `rules`: 重量分类规则(未标注重量时按需分类)
    /// - `buffer_target`: 目标储备数
    pub fn summarize(
        &self,
        collection: &[ContentItem],
        rules: &WeightRules,
        buffer_target: u32,
    ) -> PlanningStats {
        let mut by_status = HashMap::new();
        let mut scheduled_heavy = 0;
        let mut scheduled_light = 0;
        let mut core_items = 0;

        for item in collection {
            *by_status.entry(item.status).or_insert(0) += 1;

            if item.is_core {
                core_items += 1;
            }

            if item.status.is_on_calendar() {
                match self.classifier.effective_weight(item, None, rules) {
                    Weight::Heavy => scheduled_heavy += 1,
                    Weight::Light => scheduled_light += 1,
                }
            }
        }

        PlanningStats {
            by_status,
            scheduled_heavy,
            scheduled_light,
            core_items,
            buffer: self.buffer.check(collection, buffer_target),
        }
    }
}

impl Default for StatsEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Channel, ContentStatus};
    use chrono::{NaiveDate, Utc};

    fn item_with(status: ContentStatus, weight: Weight, is_core: bool) -> ContentItem {
        ContentItem {
            item_id: uuid::Uuid::new_v4().to_string(),
            asset_id: None,
            package_id: None,
            channel: Channel::Feed,
            format: "feed_post".to_string(),
            copy_text: String::new(),
            hashtags: Vec::new(),
            cta: None,
            status,
            weight_override: None,
            weight: Some(weight),
            priority_score: 50,
            is_core,
            pillar: None,
            project_id: None,
            objective: None,
            parent_id: None,
            derivative_ids: Vec::new(),
            scheduled_date: if status.is_on_calendar() {
                NaiveDate::from_ymd_opt(2026, 8, 12)
            } else {
                None
            },
            published_at: None,
            measured_at: None,
            metrics: None,
            rejection_reason: None,
            buffer_flag: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_summarize_counts() {
        let stats_engine = StatsEngine::new();
        let collection = vec![
            item_with(ContentStatus::Review, Weight::Light, true),
            item_with(ContentStatus::Scheduled, Weight::Heavy, true),
            item_with(ContentStatus::Scheduled, Weight::Light, false),
            item_with(ContentStatus::Published, Weight::Heavy, true),
            item_with(ContentStatus::Rejected, Weight::Light, false),
        ];

        let stats = stats_engine.summarize(&collection, &WeightRules::default(), 3);

        assert_eq!(stats.by_status[&ContentStatus::Scheduled], 2);
        assert_eq!(stats.by_status[&ContentStatus::Review], 1);
        assert_eq!(stats.scheduled_heavy, 2);
        assert_eq!(stats.scheduled_light, 1);
        assert_eq!(stats.core_items, 3);
        assert!(!stats.buffer.sufficient);
    }
}
