// ==========================================
// 排期流程集成测试
// ==========================================
// 职责: 验证 Auto Scheduler 的约束行为与 Calendar Validator 的一致性
// 场景: 贪心落位 → 校验零冲突(按构造约束自洽)
// ==========================================


use chrono::{Datelike, Duration, NaiveDate};
use editorial_aps::config::planning_config::{SchedulingConstraints, WeightRules};
use editorial_aps::domain::content::ContentItem;
use editorial_aps::domain::types::{ConflictKind, ContentStatus, Weight};
use editorial_aps::engine::{AutoScheduler, CalendarValidator};
use std::collections::HashMap;
use test_helpers::{test_today, ContentItemBuilder};

/// ISO 周键
fn week_key(date: NaiveDate) -> (i32, u32) {
    let week = date.iso_week();
    (week.year(), week.week())
}

/// 工况: 10 条已批准核心候选, 评分 95..50, 前 4 条为重内容
fn ten_candidates() -> Vec<ContentItem> {
    let scores = [95, 90, 85, 80, 75, 70, 65, 60, 55, 50];
    scores
        .iter()
        .enumerate()
        .map(|(i, &score)| {
            let weight = if i < 4 { Weight::Heavy } else { Weight::Light };
            ContentItemBuilder::new(&format!("CAND{:02}", i))
                .status(ContentStatus::Approved)
                .core()
                .score(score)
                .weight(weight)
                .format(&format!("formato_{}", i))
                .build()
        })
        .collect()
}

#[test]
fn test_worked_example_ten_candidates_two_weeks() {
    let scheduler = AutoScheduler::new();
    let today = test_today(); // 周日,明日为周一

    let outcome = scheduler.schedule(
        &ten_candidates(),
        today,
        &SchedulingConstraints::default(),
        &WeightRules::default(),
        &[],
    );

    // 10 条候选全部落位, 其余 4 天留空
    assert_eq!(outcome.assignments.len(), 10);
    assert_eq!(outcome.unfilled_dates.len(), 4);

    // 每ISO周重内容不超过 3 条, 两周合计不超过 6 条
    let mut heavy_per_week: HashMap<(i32, u32), usize> = HashMap::new();
    for assignment in &outcome.assignments {
        let index: usize = assignment.item_id[4..].parse().unwrap();
        if index < 4 {
            *heavy_per_week
                .entry(week_key(assignment.scheduled_date))
                .or_insert(0) += 1;
        }
    }
    assert!(heavy_per_week.values().all(|&count| count <= 3));
    assert!(heavy_per_week.values().sum::<usize>() <= 6);

    // 最早日期由剩余可落位评分最高者占据:
    // 周一至周三为 95/90/85(重), 周四起 80(重)被周配额挡下, 由 75/70/65/60 顶上
    let date_of = |id: &str| {
        outcome
            .assignments
            .iter()
            .find(|a| a.item_id == id)
            .map(|a| a.scheduled_date)
            .unwrap()
    };
    assert_eq!(date_of("CAND00"), today + Duration::days(1));
    assert_eq!(date_of("CAND01"), today + Duration::days(2));
    assert_eq!(date_of("CAND02"), today + Duration::days(3));
    assert_eq!(date_of("CAND04"), today + Duration::days(4));
    assert_eq!(date_of("CAND05"), today + Duration::days(5));
    assert_eq!(date_of("CAND06"), today + Duration::days(6));
    assert_eq!(date_of("CAND07"), today + Duration::days(7));
    // 第 4 条重内容顺延到下一ISO周周一
    assert_eq!(date_of("CAND03"), today + Duration::days(8));

    // 输出按日历日期序
    let dates: Vec<NaiveDate> = outcome.assignments.iter().map(|a| a.scheduled_date).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
}

#[test]
fn test_no_two_cores_share_a_date() {
    let scheduler = AutoScheduler::new();
    let outcome = scheduler.schedule(
        &ten_candidates(),
        test_today(),
        &SchedulingConstraints::default(),
        &WeightRules::default(),
        &[],
    );

    let mut dates: Vec<NaiveDate> = outcome.assignments.iter().map(|a| a.scheduled_date).collect();
    let total = dates.len();
    dates.sort();
    dates.dedup();
    assert_eq!(dates.len(), total);
}

#[test]
fn test_same_project_cores_never_within_repeat_window() {
    let scheduler = AutoScheduler::new();

    // 3 个互异项目(= noRepeatProjectDays + 1), 每项目 2 条候选
    let mut collection = Vec::new();
    let projects = ["proyecto-a", "proyecto-b", "proyecto-c"];
    let mut score = 90;
    for round in 0..2 {
        for project in projects {
            collection.push(
                ContentItemBuilder::new(&format!("{}-{}", project, round))
                    .status(ContentStatus::Approved)
                    .core()
                    .score(score)
                    .weight(Weight::Light)
                    .format(&format!("formato_{}_{}", project, round))
                    .project(project)
                    .build(),
            );
            score -= 5;
        }
    }

    let constraints = SchedulingConstraints::default();
    let outcome = scheduler.schedule(
        &collection,
        test_today(),
        &constraints,
        &WeightRules::default(),
        &[],
    );

    assert_eq!(outcome.assignments.len(), 6);

    // 同项目两次落位的间隔必须大于防重窗口
    for a in &outcome.assignments {
        for b in &outcome.assignments {
            if a.item_id == b.item_id {
                continue;
            }
            let project_a = &a.item_id[..a.item_id.len() - 2];
            let project_b = &b.item_id[..b.item_id.len() - 2];
            if project_a == project_b {
                let gap = (a.scheduled_date - b.scheduled_date).num_days().abs();
                assert!(
                    gap > constraints.no_repeat_project_days,
                    "{} 与 {} 间隔 {} 天",
                    a.item_id,
                    b.item_id,
                    gap
                );
            }
        }
    }
}

#[test]
fn test_validator_agrees_with_scheduler_output() {
    let scheduler = AutoScheduler::new();
    let validator = CalendarValidator::new();
    let today = test_today();
    let constraints = SchedulingConstraints::default();
    let rules = WeightRules::default();

    let mut collection = ten_candidates();
    let outcome = scheduler.schedule(&collection, today, &constraints, &rules, &[]);

    // 把落位写回快照
    let assignment_dates: HashMap<String, NaiveDate> = outcome
        .assignments
        .iter()
        .map(|a| (a.item_id.clone(), a.scheduled_date))
        .collect();
    for item in &mut collection {
        if let Some(date) = assignment_dates.get(&item.item_id) {
            item.status = ContentStatus::Scheduled;
            item.scheduled_date = Some(*date);
        }
    }

    let conflicts = validator.validate(&collection, today, constraints.horizon_days, &constraints, &rules);

    // 约束按构造自洽: 排期结果不会出现周重超额与项目重复
    assert!(conflicts
        .iter()
        .all(|c| c.kind != ConflictKind::TooManyHeavy));
    assert!(conflicts
        .iter()
        .all(|c| c.kind != ConflictKind::ProjectRepeat));

    // 留空日期由校验器以 no-core 提示
    // (排期窗口为明日起 14 天, 校验窗口为今日起 14 天, 尾端相差一天)
    let no_core_dates: Vec<NaiveDate> = conflicts
        .iter()
        .filter(|c| c.kind == ConflictKind::NoCore)
        .map(|c| c.date)
        .collect();
    assert!(no_core_dates
        .iter()
        .all(|date| outcome.unfilled_dates.contains(date)));
    assert_eq!(no_core_dates.len(), 3);
}

#[test]
fn test_pre_existing_schedule_is_respected() {
    let scheduler = AutoScheduler::new();
    let today = test_today();

    // 既有日历: 明日已有一条核心; 周一至周三已占 2 条重内容
    let mut collection = vec![
        ContentItemBuilder::new("EXIST-CORE")
            .core()
            .weight(Weight::Heavy)
            .format("formato_x")
            .scheduled(today + Duration::days(1))
            .build(),
        ContentItemBuilder::new("EXIST-HEAVY")
            .weight(Weight::Heavy)
            .format("formato_y")
            .scheduled(today + Duration::days(2))
            .build(),
    ];
    // 2 条新重内容候选
    for i in 0..2 {
        collection.push(
            ContentItemBuilder::new(&format!("NEW{}", i))
                .status(ContentStatus::Approved)
                .core()
                .score(90 - i)
                .weight(Weight::Heavy)
                .format(&format!("formato_{}", i))
                .build(),
        );
    }

    let outcome = scheduler.schedule(
        &collection,
        today,
        &SchedulingConstraints::default(),
        &WeightRules::default(),
        &[],
    );

    // 明日已满(cores_per_day=1), 新核心不会与既有核心同日
    assert!(outcome
        .assignments
        .iter()
        .all(|a| a.scheduled_date != today + Duration::days(1)));

    // 第一ISO周既有 2 条重内容, 新重内容只能再进 1 条
    let week_one = week_key(today + Duration::days(1));
    let new_heavy_week_one = outcome
        .assignments
        .iter()
        .filter(|a| week_key(a.scheduled_date) == week_one)
        .count();
    assert_eq!(new_heavy_week_one, 1);
}
