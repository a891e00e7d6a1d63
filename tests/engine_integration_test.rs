// ==========================================
// 引擎间集成测试
// ==========================================
// 职责: 验证多个引擎之间的协作和数据流转
// 场景: BatchGenerator → 审批 → PlanningOrchestrator 全流程
// ==========================================


use editorial_aps::config::planning_config::{ChannelPlan, StaticPlanningConfig};
use editorial_aps::domain::content::RawContentRecord;
use editorial_aps::domain::types::{
    Channel, ContentStatus, MediaCategory, MediaKind, Objective, Weight,
};
use editorial_aps::engine::{BatchGenerator, ContentImporter, PlanningOrchestrator};
use editorial_aps::repository::content_store::InMemoryContentStore;
use std::sync::Arc;
use test_helpers::{create_test_asset, create_test_package, test_today};

#[tokio::test]
async fn test_full_pipeline_generate_approve_schedule() {
    editorial_aps::logging::init_test();

    // === 步骤 1: 批量生成 ===
    let generator = BatchGenerator::new();
    let asset = create_test_asset(
        "ASSET001",
        MediaKind::Image,
        MediaCategory::Detail,
        Some(85.0),
        1,
    );
    let package = create_test_package("PKG001", None);
    let batch = generator.generate(
        &asset,
        &package,
        Some("casa-linda"),
        Some("craft"),
        &ChannelPlan::default(),
    );

    let core_id = batch.core.item_id.clone();
    let derivative_ids: Vec<String> = batch
        .derivatives
        .iter()
        .map(|d| d.item_id.clone())
        .collect();

    // === 步骤 2: 落库 + 审批 ===
    let store = Arc::new(InMemoryContentStore::with_data(Vec::new(), vec![asset]));
    let config = Arc::new(StaticPlanningConfig::default());
    let orchestrator = PlanningOrchestrator::new(config, store.clone());

    orchestrator
        .persist_items(&batch.clone().into_items())
        .await
        .unwrap();

    orchestrator
        .transition(&core_id, ContentStatus::Approved, None)
        .await
        .unwrap();
    for derivative_id in &derivative_ids {
        orchestrator
            .transition(derivative_id, ContentStatus::Approved, None)
            .await
            .unwrap();
    }

    // === 步骤 3: 排期周期 + 落库 ===
    let result = orchestrator.run_planning_cycle(test_today()).await.unwrap();
    orchestrator.commit(&result).await.unwrap();

    // 核心落位明日, 派生内容跟随同日
    let core = store.get_item(&core_id).unwrap();
    assert_eq!(core.status, ContentStatus::Scheduled);
    let core_date = core.scheduled_date.unwrap();
    assert_eq!(core_date, test_today() + chrono::Duration::days(1));

    for derivative_id in &derivative_ids {
        let derivative = store.get_item(derivative_id).unwrap();
        assert_eq!(derivative.status, ContentStatus::Scheduled);
        assert_eq!(derivative.scheduled_date, Some(core_date));
    }

    // 标注已落库: 重量齐备, 核心评分高于派生(核心加分)
    assert!(core.weight.is_some());
    let derivative = store.get_item(&derivative_ids[0]).unwrap();
    assert!(core.priority_score > derivative.priority_score);
}

#[tokio::test]
async fn test_planning_cycle_reports_conflicts_and_stats() {
    let store = Arc::new(InMemoryContentStore::with_data(Vec::new(), Vec::new()));
    let config = Arc::new(StaticPlanningConfig::default());
    let orchestrator = PlanningOrchestrator::new(config, store);

    // 空集合: 全窗口留空, 校验器逐日提示 no-core
    let result = orchestrator.run_planning_cycle(test_today()).await.unwrap();

    assert!(result.assignments.is_empty());
    assert_eq!(result.unfilled_dates.len(), 14);
    assert!(!result.conflicts.is_empty());
    assert_eq!(result.stats.core_items, 0);
    assert!(!result.stats.buffer.sufficient);
}

#[tokio::test]
async fn test_video_batch_is_heavy_end_to_end() {
    // 视频素材 → 核心进短视频渠道 → 重量分类为重
    let generator = BatchGenerator::new();
    let asset = create_test_asset(
        "ASSET-VIDEO",
        MediaKind::Video,
        MediaCategory::SiteProgress,
        Some(70.0),
        0,
    );
    let package = create_test_package("PKG002", Some(Objective::TechnicalAuthority));
    let batch = generator.generate(&asset, &package, None, None, &ChannelPlan::default());

    assert_eq!(batch.core.channel, Channel::Reel);

    let store = Arc::new(InMemoryContentStore::with_data(
        batch.clone().into_items(),
        vec![asset],
    ));
    let config = Arc::new(StaticPlanningConfig::default());
    let orchestrator = PlanningOrchestrator::new(config, store.clone());

    let result = orchestrator.run_planning_cycle(test_today()).await.unwrap();
    orchestrator.commit(&result).await.unwrap();

    let core = store.get_item(&batch.core.item_id).unwrap();
    assert_eq!(core.weight, Some(Weight::Heavy));
}

#[tokio::test]
async fn test_ingest_then_schedule_round_trip() {
    // 摄入边界: 松散记录 → 校验归一 → 排期
    let importer = ContentImporter::new();
    let records: Vec<RawContentRecord> = (0..3)
        .map(|i| RawContentRecord {
            item_id: Some(format!("RAW{}", i)),
            channel: Some("FEED".to_string()),
            status: Some("APPROVED".to_string()),
            format: Some(format!("formato_{}", i)),
            is_core: Some(true),
            priority_score: Some(60 + i),
            row_number: i as usize + 1,
            ..Default::default()
        })
        .collect();

    let ingest = importer.ingest(records);
    assert_eq!(ingest.summary.accepted, 3);
    assert_eq!(ingest.summary.blocked, 0);

    let store = Arc::new(InMemoryContentStore::with_data(ingest.items, Vec::new()));
    let config = Arc::new(StaticPlanningConfig::default());
    let orchestrator = PlanningOrchestrator::new(config, store.clone());

    let result = orchestrator.run_planning_cycle(test_today()).await.unwrap();
    assert_eq!(result.assignments.len(), 3);
}
