// ==========================================
// 编辑内容排期系统 - 日历校验引擎
// ==========================================
// 依据: Content_Engine_Specs_v0.2.md - 5. Calendar Validator
// 红线: 只诊断不改动;冲突是数据质量信号,不是故障
// ==========================================
// 职责: 审计既有排期,输出规则冲突清单
// 输入: 全量内容集合 + 校验窗口 + 约束配置
// 输出: ConflictReport 列表(先逐日扫描,再逐周扫描)
// ==========================================

use crate::config::planning_config::{SchedulingConstraints, WeightRules};
use crate::domain::content::ContentItem;
use crate::domain::schedule::ConflictReport;
use crate::domain::types::{ConflictKind, Weight};
use crate::engine::scheduler::week_key;
use crate::engine::weight::WeightClassifier;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

// ==========================================
// CalendarValidator - 日历校验引擎
// ==========================================
pub struct CalendarValidator {
    classifier: WeightClassifier,
}

impl CalendarValidator {
    /// 构造函数
    pub fn new() -> Self {
        Self {
            classifier: WeightClassifier::new(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 校验日历窗口
    ///
    /// 逐日检查(day 0 = today,免除无核心检查):
    /// - no-core: 当日无落位核心内容
    /// - project-repeat: 核心与前一日核心同项目
    /// - format-repeat: 核心形式与前两日核心均相同(三连)
    ///
    /// 逐ISO周检查(窗口覆盖的周):
    /// - too-many-heavy: 周内落位重内容超过配额(冲突定位到该周周一)
    ///
    /// # 参数
    /// - `collection`: 全量内容集合
    /// - `today`: 参照日期(窗口起点)
    /// - `horizon_days`: 校验窗口长度
    /// - `constraints`: 约束配置
    /// - `rules`: 重量分类规则(未标注重量时按需分类)
    pub fn validate(
        &self,
        collection: &[ContentItem],
        today: NaiveDate,
        horizon_days: i64,
        constraints: &SchedulingConstraints,
        rules: &WeightRules,
    ) -> Vec<ConflictReport> {
        let mut conflicts: Vec<ConflictReport> = Vec::new();

        // 落位日历索引: 日期 -> 条目
        let mut by_date: HashMap<NaiveDate, Vec<&ContentItem>> = HashMap::new();
        for item in collection {
            if !item.status.is_on_calendar() {
                continue;
            }
            if let Some(date) = item.scheduled_date {
                by_date.entry(date).or_default().push(item);
            }
        }

        // === 逐日扫描 ===
        for offset in 0..horizon_days {
            let date = today + Duration::days(offset);
            let cores: Vec<&&ContentItem> = by_date
                .get(&date)
                .map(|items| items.iter().filter(|i| i.is_core).collect())
                .unwrap_or_default();

            // no-core (day 0 免除)
            if offset > 0 && cores.is_empty() {
                conflicts.push(ConflictReport {
                    date,
                    kind: ConflictKind::NoCore,
                    message: format!("{} 没有核心内容排期", date),
                });
            }

            let prev_cores = self.cores_on(&by_date, date - Duration::days(1));
            let prev2_cores = self.cores_on(&by_date, date - Duration::days(2));

            for core in &cores {
                // project-repeat: 与前一日核心同项目
                if let Some(project_id) = &core.project_id {
                    let repeated = prev_cores
                        .iter()
                        .any(|p| p.project_id.as_deref() == Some(project_id.as_str()));
                    if repeated {
                        conflicts.push(ConflictReport {
                            date,
                            kind: ConflictKind::ProjectRepeat,
                            message: format!(
                                "{} 的核心内容与前一日核心同属项目 {}",
                                date, project_id
                            ),
                        });
                    }
                }

                // format-repeat: 与前两日核心形式三连
                let in_prev = prev_cores
                    .iter()
                    .any(|p| p.format.eq_ignore_ascii_case(&core.format));
                let in_prev2 = prev2_cores
                    .iter()
                    .any(|p| p.format.eq_ignore_ascii_case(&core.format));
                if in_prev && in_prev2 {
                    conflicts.push(ConflictReport {
                        date,
                        kind: ConflictKind::FormatRepeat,
                        message: format!(
                            "形式 {} 已连续第三日出现(截至 {})",
                            core.format, date
                        ),
                    });
                }
            }
        }

        // === 逐周扫描 ===
        // 统计窗口覆盖的ISO周;周内重内容计数取整周(含窗口边缘外的落位)
        let mut weeks_in_window: BTreeMap<(i32, u32), NaiveDate> = BTreeMap::new();
        for offset in 0..horizon_days {
            let date = today + Duration::days(offset);
            weeks_in_window.entry(week_key(date)).or_insert_with(|| {
                // 定位到该ISO周周一
                let days_from_monday = date.weekday().num_days_from_monday() as i64;
                date - Duration::days(days_from_monday)
            });
        }

        let mut heavy_per_week: HashMap<(i32, u32), usize> = HashMap::new();
        for item in collection {
            if !item.status.is_on_calendar() {
                continue;
            }
            let Some(date) = item.scheduled_date else {
                continue;
            };
            if self.classifier.effective_weight(item, None, rules) == Weight::Heavy {
                *heavy_per_week.entry(week_key(date)).or_insert(0) += 1;
            }
        }

        for (week, monday) in &weeks_in_window {
            let heavy_count = heavy_per_week.get(week).copied().unwrap_or(0);
            if heavy_count > constraints.max_heavy_per_week as usize {
                conflicts.push(ConflictReport {
                    date: *monday,
                    kind: ConflictKind::TooManyHeavy,
                    message: format!(
                        "{} 起的ISO周内重内容 {} 条, 超过配额 {}",
                        monday, heavy_count, constraints.max_heavy_per_week
                    ),
                });
            }
        }

        debug!(conflicts = conflicts.len(), "日历校验完成");
        conflicts
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 指定日期的核心条目
    fn cores_on<'a>(
        &self,
        by_date: &HashMap<NaiveDate, Vec<&'a ContentItem>>,
        date: NaiveDate,
    ) -> Vec<&'a ContentItem> {
        by_date
            .get(&date)
            .map(|items| items.iter().copied().filter(|i| i.is_core).collect())
            .unwrap_or_default()
    }
}

impl Default for CalendarValidator {
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
    use chrono::{TimeZone, Utc};

    fn test_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 9).unwrap() // 周日
    }

    fn scheduled_core(item_id: &str, date: NaiveDate, format: &str, project: Option<&str>) -> ContentItem {
        ContentItem {
            item_id: item_id.to_string(),
            asset_id: None,
            package_id: None,
            channel: Channel::Feed,
            format: format.to_string(),
            copy_text: String::new(),
            hashtags: Vec::new(),
            cta: None,
            status: ContentStatus::Scheduled,
            weight_override: None,
            weight: Some(Weight::Light),
            priority_score: 60,
            is_core: true,
            pillar: None,
            project_id: project.map(|p| p.to_string()),
            objective: None,
            parent_id: None,
            derivative_ids: Vec::new(),
            scheduled_date: Some(date),
            published_at: None,
            measured_at: None,
            metrics: None,
            rejection_reason: None,
            buffer_flag: false,
            created_at: Utc.with_ymd_and_hms(2026, 8, 1, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_no_core_flagged_except_day_zero() {
        let validator = CalendarValidator::new();
        // 空日历: day 0 免除, 其余 6 天报 no-core
        let conflicts = validator.validate(
            &[],
            test_today(),
            7,
            &SchedulingConstraints::default(),
            &WeightRules::default(),
        );

        let no_core: Vec<&ConflictReport> = conflicts
            .iter()
            .filter(|c| c.kind == ConflictKind::NoCore)
            .collect();
        assert_eq!(no_core.len(), 6);
        assert!(no_core.iter().all(|c| c.date != test_today()));
    }

    #[test]
    fn test_project_repeat_on_consecutive_days() {
        let validator = CalendarValidator::new();
        let today = test_today();
        let collection = vec![
            scheduled_core("A", today + Duration::days(1), "f1", Some("casa-linda")),
            scheduled_core("B", today + Duration::days(2), "f2", Some("casa-linda")),
        ];

        let conflicts = validator.validate(
            &collection,
            today,
            4,
            &SchedulingConstraints::default(),
            &WeightRules::default(),
        );

        let repeats: Vec<&ConflictReport> = conflicts
            .iter()
            .filter(|c| c.kind == ConflictKind::ProjectRepeat)
            .collect();
        assert_eq!(repeats.len(), 1);
        assert_eq!(repeats[0].date, today + Duration::days(2));
    }

    #[test]
    fn test_format_repeat_requires_three_in_a_row() {
        let validator = CalendarValidator::new();
        let today = test_today();

        // 两连不报
        let collection = vec![
            scheduled_core("A", today + Duration::days(1), "carousel_multi", None),
            scheduled_core("B", today + Duration::days(2), "carousel_multi", None),
        ];
        let conflicts = validator.validate(
            &collection,
            today,
            4,
            &SchedulingConstraints::default(),
            &WeightRules::default(),
        );
        assert!(conflicts
            .iter()
            .all(|c| c.kind != ConflictKind::FormatRepeat));

        // 三连报一次
        let collection = vec![
            scheduled_core("A", today + Duration::days(1), "carousel_multi", None),
            scheduled_core("B", today + Duration::days(2), "carousel_multi", None),
            scheduled_core("C", today + Duration::days(3), "carousel_multi", None),
        ];
        let conflicts = validator.validate(
            &collection,
            today,
            4,
            &SchedulingConstraints::default(),
            &WeightRules::default(),
        );
        let repeats: Vec<&ConflictReport> = conflicts
            .iter()
            .filter(|c| c.kind == ConflictKind::FormatRepeat)
            .collect();
        assert_eq!(repeats.len(), 1);
        assert_eq!(repeats[0].date, today + Duration::days(3));
    }

    #[test]
    fn test_too_many_heavy_reported_at_week_monday() {
        let validator = CalendarValidator::new();
        let today = test_today();

        // 周一至周四 4 条重内容(配额 3)
        let collection: Vec<ContentItem> = (1..=4)
            .map(|i| {
                let mut item = scheduled_core(
                    &format!("H{}", i),
                    today + Duration::days(i),
                    &format!("f{}", i),
                    None,
                );
                item.weight = Some(Weight::Heavy);
                item
            })
            .collect();

        let conflicts = validator.validate(
            &collection,
            today,
            7,
            &SchedulingConstraints::default(),
            &WeightRules::default(),
        );

        let heavy: Vec<&ConflictReport> = conflicts
            .iter()
            .filter(|c| c.kind == ConflictKind::TooManyHeavy)
            .collect();
        assert_eq!(heavy.len(), 1);
        // 周级冲突定位到该ISO周周一
        assert_eq!(heavy[0].date, today + Duration::days(1));
    }

    #[test]
    fn test_day_scan_precedes_week_scan() {
        let validator = CalendarValidator::new();
        let today = test_today();
        let collection: Vec<ContentItem> = (1..=4)
            .map(|i| {
                let mut item = scheduled_core(
                    &format!("H{}", i),
                    today + Duration::days(i),
                    &format!("f{}", i),
                    None,
                );
                item.weight = Some(Weight::Heavy);
                item
            })
            .collect();

        let conflicts = validator.validate(
            &collection,
            today,
            7,
            &SchedulingConstraints::default(),
            &WeightRules::default(),
        );

        let first_week_index = conflicts
            .iter()
            .position(|c| c.kind == ConflictKind::TooManyHeavy)
            .unwrap();
        assert!(conflicts[first_week_index..]
            .iter()
            .all(|c| c.kind == ConflictKind::TooManyHeavy));
    }

    #[test]
    fn test_clean_week_has_no_heavy_conflict() {
        let validator = CalendarValidator::new();
        let today = test_today();
        let collection: Vec<ContentItem> = (1..=3)
            .map(|i| {
                let mut item = scheduled_core(
                    &format!("H{}", i),
                    today + Duration::days(i),
                    &format!("f{}", i),
                    None,
                );
                item.weight = Some(Weight::Heavy);
                item
            })
            .collect();

        let conflicts = validator.validate(
            &collection,
            today,
            7,
            &SchedulingConstraints::default(),
            &WeightRules::default(),
        );
        assert!(conflicts
            .iter()
            .all(|c| c.kind != ConflictKind::TooManyHeavy));
    }
}
