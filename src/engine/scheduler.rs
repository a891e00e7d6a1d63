// ==========================================
// 编辑内容排期系统 - 自动排期引擎
// ==========================================
// 依据: Content_Engine_Specs_v0.2.md - 4. Auto Scheduler
// 红线: 贪心单遍,不回溯;排不进的日期留空,由 Calendar Validator 事后提示
// 红线: 周重配额/项目防重/形式防重优先于评分
// ==========================================
// 职责: 为已批准核心内容分配日历日期
// 输入: 全量内容集合 + 约束配置 + 重量规则 + 槽位配置
// 输出: ScheduleAssignment 列表(按日历日期序)
// ==========================================

use crate::config::planning_config::{SchedulingConstraints, WeightRules};
use crate::domain::content::ContentItem;
use crate::domain::schedule::ScheduleAssignment;
use crate::domain::slot::PublicationSlot;
use crate::domain::types::{Channel, ContentStatus, Weight};
use crate::engine::weight::WeightClassifier;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::HashMap;
use tracing::{debug, instrument};

// ==========================================
// SchedulingOutcome - 排期结果
// ==========================================
#[derive(Debug, Clone)]
pub struct SchedulingOutcome {
    pub assignments: Vec<ScheduleAssignment>, // 落位列表(日期序)
    pub unfilled_dates: Vec<NaiveDate>,       // 无合格候选的空档日期
}

// ===== 日历工作视图条目 =====
#[derive(Debug, Clone)]
struct CalendarEntry {
    date: NaiveDate,
    is_core: bool,
    weight: Weight,
    project_id: Option<String>,
    format: String,
}

// ==========================================
// AutoScheduler - 自动排期引擎
// ==========================================
pub struct AutoScheduler {
    classifier: WeightClassifier,
}

impl AutoScheduler {
    /// 构造函数
    pub fn new() -> Self {
        Self {
            classifier: WeightClassifier::new(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 执行贪心排期
    ///
    /// 流程(依据 Content_Engine_Specs 4.2):
    /// 1) 候选 = 已批准且未落位的核心内容,按评分降序
    ///    (同分按 created_at 升序、item_id 升序,保证确定性)
    /// 2) 候选日期 = 明日起 horizon_days 天
    /// 3) 逐日取第一条通过周重配额/项目防重/形式防重的候选
    /// 4) 已落位核心的已批准派生内容跟随同日
    /// 5) 无合格候选的日期留空,不报错
    ///
    /// # 参数
    /// - `collection`: 全量内容集合快照(重量建议已标注)
    /// - `today`: 参照日期(排期从 today+1 开始)
    /// - `constraints`: 排期约束配置
    /// - `rules`: 重量分类规则(未标注重量时按需分类)
    /// - `slots`: 发布槽位配置(仅用于落位标注)
    #[instrument(skip_all, fields(collection = collection.len(), today = %today))]
    pub fn schedule(
        &self,
        collection: &[ContentItem],
        today: NaiveDate,
        constraints: &SchedulingConstraints,
        rules: &WeightRules,
        slots: &[PublicationSlot],
    ) -> SchedulingOutcome {
        // === 步骤 1: 构建候选池(评分降序 + 确定性 tie-break) ===
        let mut pool: Vec<&ContentItem> = collection
            .iter()
            .filter(|item| item.is_core_candidate())
            .collect();
        pool.sort_by(|a, b| {
            b.priority_score
                .cmp(&a.priority_score)
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.item_id.cmp(&b.item_id))
        });

        // === 步骤 2: 构建既有日历工作视图 ===
        let mut calendar: Vec<CalendarEntry> = collection
            .iter()
            .filter(|item| item.status.is_on_calendar())
            .filter_map(|item| {
                item.scheduled_date.map(|date| CalendarEntry {
                    date,
                    is_core: item.is_core,
                    weight: self.classifier.effective_weight(item, None, rules),
                    project_id: item.project_id.clone(),
                    format: item.format.clone(),
                })
            })
            .collect();

        let mut assignments: Vec<ScheduleAssignment> = Vec::new();
        let mut unfilled_dates: Vec<NaiveDate> = Vec::new();

        // === 步骤 3: 逐日贪心填充 ===
        for offset in 1..=constraints.horizon_days {
            let date = today + Duration::days(offset);

            let cores_on_date = calendar
                .iter()
                .filter(|entry| entry.is_core && entry.date == date)
                .count();
            if cores_on_date >= constraints.cores_per_day as usize {
                continue;
            }

            let pick = pool.iter().position(|item| {
                self.qualifies(item, date, &calendar, constraints, rules)
            });

            match pick {
                Some(index) => {
                    let item = pool.remove(index);
                    let weight = self.classifier.effective_weight(item, None, rules);
                    calendar.push(CalendarEntry {
                        date,
                        is_core: true,
                        weight,
                        project_id: item.project_id.clone(),
                        format: item.format.clone(),
                    });
                    assignments.push(ScheduleAssignment {
                        item_id: item.item_id.clone(),
                        scheduled_date: date,
                        status: ContentStatus::Scheduled,
                        slot_id: self.match_slot(date, item.channel, slots),
                    });
                }
                None => {
                    debug!(date = %date, pool = pool.len(), "当日无合格候选,留空");
                    unfilled_dates.push(date);
                }
            }
        }

        // === 步骤 4: 派生内容跟随核心同日落位 ===
        let by_id: HashMap<&str, &ContentItem> = collection
            .iter()
            .map(|item| (item.item_id.as_str(), item))
            .collect();

        let core_assignments: Vec<(String, NaiveDate)> = assignments
            .iter()
            .map(|a| (a.item_id.clone(), a.scheduled_date))
            .collect();

        for (core_id, date) in core_assignments {
            let Some(core) = by_id.get(core_id.as_str()) else {
                continue;
            };
            for derivative_id in &core.derivative_ids {
                let Some(derivative) = by_id.get(derivative_id.as_str()) else {
                    continue;
                };
                // 仅已批准且未落位的派生内容可跟随
                if derivative.status != ContentStatus::Approved
                    || derivative.scheduled_date.is_some()
                {
                    continue;
                }
                calendar.push(CalendarEntry {
                    date,
                    is_core: false,
                    weight: self.classifier.effective_weight(derivative, None, rules),
                    project_id: derivative.project_id.clone(),
                    format: derivative.format.clone(),
                });
                assignments.push(ScheduleAssignment {
                    item_id: derivative.item_id.clone(),
                    scheduled_date: date,
                    status: ContentStatus::Scheduled,
                    slot_id: self.match_slot(date, derivative.channel, slots),
                });
            }
        }

        // 输出按日历日期序;稳定排序保证同日核心在其派生之前
        assignments.sort_by_key(|a| a.scheduled_date);

        debug!(
            assigned = assignments.len(),
            unfilled = unfilled_dates.len(),
            "排期完成"
        );

        SchedulingOutcome {
            assignments,
            unfilled_dates,
        }
    }

    // ==========================================
    // 约束检查
    // ==========================================

    /// 候选是否可落位到指定日期
    fn qualifies(
        &self,
        item: &ContentItem,
        date: NaiveDate,
        calendar: &[CalendarEntry],
        constraints: &SchedulingConstraints,
        rules: &WeightRules,
    ) -> bool {
        // (a) 周重配额
        let weight = self.classifier.effective_weight(item, None, rules);
        if weight == Weight::Heavy {
            let week = week_key(date);
            let heavy_in_week = calendar
                .iter()
                .filter(|entry| entry.weight == Weight::Heavy && week_key(entry.date) == week)
                .count();
            if heavy_in_week >= constraints.max_heavy_per_week as usize {
                return false;
            }
        }

        // (b) 项目防重(回看窗口,不含当日)
        if let Some(project_id) = &item.project_id {
            let repeat = calendar.iter().any(|entry| {
                in_trailing_window(entry.date, date, constraints.no_repeat_project_days)
                    && entry.project_id.as_deref() == Some(project_id.as_str())
            });
            if repeat {
                return false;
            }
        }

        // (c) 形式防重(回看窗口,不含当日)
        let format_repeat = calendar.iter().any(|entry| {
            in_trailing_window(entry.date, date, constraints.no_repeat_format_days)
                && entry.format.eq_ignore_ascii_case(&item.format)
        });
        if format_repeat {
            return false;
        }

        true
    }

    /// 匹配发布槽位(星期几 + 渠道)
    fn match_slot(
        &self,
        date: NaiveDate,
        channel: Channel,
        slots: &[PublicationSlot],
    ) -> Option<String> {
        slots
            .iter()
            .find(|slot| slot.weekday == date.weekday() && slot.accepts(channel))
            .map(|slot| slot.slot_id.clone())
    }
}

impl Default for AutoScheduler {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 日历工具函数
// ==========================================

/// ISO 周键 (ISO年, 周序)
pub(crate) fn week_key(date: NaiveDate) -> (i32, u32) {
    let week = date.iso_week();
    (week.year(), week.week())
}

/// entry_date 是否落在 date 的回看窗口 [date-window, date-1] 内
fn in_trailing_window(entry_date: NaiveDate, date: NaiveDate, window_days: i64) -> bool {
    let delta = (date - entry_date).num_days();
    (1..=window_days).contains(&delta)
}
