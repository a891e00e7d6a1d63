// ==========================================
// 编辑内容排期系统 - 引擎编排器
// ==========================================
// 依据: Content_Engine_Specs_v0.2.md - 1.1 计算主流程
// 用途: 协调各引擎在一份快照上的执行顺序
// 红线: 引擎对快照只读;所有变更经更新批次由调用方落库
// ==========================================

use crate::config::planning_config::PlanningConfigReader;
use crate::domain::content::{ContentItem, MediaAsset};
use crate::domain::schedule::{
    ConflictReport, ItemUpdate, PlanningStats, ScheduleAssignment,
};
use crate::domain::types::ContentStatus;
use crate::engine::priority::PriorityScorer;
use crate::engine::scheduler::AutoScheduler;
use crate::engine::status::{StatusMachine, TransitionOutcome};
use crate::engine::stats::StatsEngine;
use crate::engine::validator::CalendarValidator;
use crate::engine::weight::WeightClassifier;
use crate::repository::content_store::ContentStore;
use crate::repository::error::RepositoryError;
use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, info, instrument};

// ==========================================
// PlanningResult - 排期周期结果
// ==========================================
#[derive(Debug, Clone)]
pub struct PlanningResult {
    // 标注输出(重量 + 评分)
    pub annotations: Vec<ItemUpdate>,

    // Auto Scheduler 输出
    pub assignments: Vec<ScheduleAssignment>,
    pub unfilled_dates: Vec<NaiveDate>,

    // Calendar Validator 输出
    pub conflicts: Vec<ConflictReport>,

    // 汇总统计(以排期后的快照口径)
    pub stats: PlanningStats,
}

// ==========================================
// PlanningOrchestrator - 引擎编排器
// ==========================================
pub struct PlanningOrchestrator<C>
where
    C: PlanningConfigReader,
{
    config: Arc<C>,
    store: Arc<dyn ContentStore>,
    classifier: WeightClassifier,
    scorer: PriorityScorer,
    scheduler: AutoScheduler,
    validator: CalendarValidator,
    status_machine: StatusMachine,
    stats: StatsEngine,
}

impl<C> PlanningOrchestrator<C>
where
    C: PlanningConfigReader,
{
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - `config`: 配置读取器
    /// - `store`: 内容存储边界
    pub fn new(config: Arc<C>, store: Arc<dyn ContentStore>) -> Self {
        Self {
            config,
            store,
            classifier: WeightClassifier::new(),
            scorer: PriorityScorer::new(),
            scheduler: AutoScheduler::new(),
            validator: CalendarValidator::new(),
            status_machine: StatusMachine::new(),
            stats: StatsEngine::new(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 执行完整排期周期
    ///
    /// 流程: 加载快照 → 标注(重量+评分) → 排期 → 校验 → 统计
    /// 全程不写存储;调用方经 commit 应用结果。
    ///
    /// # 参数
    /// - `today`: 参照日期
    #[instrument(skip(self), fields(today = %today))]
    pub async fn run_planning_cycle(
        &self,
        today: NaiveDate,
    ) -> Result<PlanningResult, Box<dyn Error>> {
        let constraints = self.config.get_constraints().await?;
        let rules = self.config.get_weight_rules().await?;
        let slots = self.config.get_slots().await?;
        let dna = self.config.get_editorial_dna().await?;

        // === 步骤 1: 加载快照 ===
        let collection = self.store.load_collection().await?;
        let assets = self.store.load_assets().await?;
        let asset_index: HashMap<&str, &MediaAsset> = assets
            .iter()
            .map(|asset| (asset.asset_id.as_str(), asset))
            .collect();

        info!(
            items = collection.len(),
            assets = assets.len(),
            "排期周期开始"
        );

        // === 步骤 2: 标注重量与评分 ===
        debug!("步骤2: 标注重量与评分");
        let mut annotated = collection.clone();
        let mut annotations = Vec::new();

        for item in &mut annotated {
            let asset = item
                .asset_id
                .as_deref()
                .and_then(|id| asset_index.get(id))
                .copied();

            let weight = self.classifier.classify(item, asset, &rules);
            let score = self
                .scorer
                .score(item, asset, &collection, dna.as_ref(), today);

            item.weight = Some(weight);
            item.priority_score = score;

            let mut update = ItemUpdate::new(&item.item_id);
            update.weight = Some(weight);
            update.priority_score = Some(score);
            annotations.push(update);
        }

        // === 步骤 3: 自动排期 ===
        debug!("步骤3: 自动排期");
        let outcome =
            self.scheduler
                .schedule(&annotated, today, &constraints, &rules, &slots);

        // 把落位写入工作快照,供校验与统计使用
        let assignment_index: HashMap<&str, &ScheduleAssignment> = outcome
            .assignments
            .iter()
            .map(|a| (a.item_id.as_str(), a))
            .collect();
        for item in &mut annotated {
            if let Some(assignment) = assignment_index.get(item.item_id.as_str()) {
                item.status = assignment.status;
                item.scheduled_date = Some(assignment.scheduled_date);
            }
        }

        // === 步骤 4: 日历校验 ===
        debug!("步骤4: 日历校验");
        let conflicts = self.validator.validate(
            &annotated,
            today,
            constraints.horizon_days,
            &constraints,
            &rules,
        );

        // === 步骤 5: 汇总统计 ===
        let stats = self
            .stats
            .summarize(&annotated, &rules, constraints.buffer_count);

        info!(
            assignments = outcome.assignments.len(),
            unfilled = outcome.unfilled_dates.len(),
            conflicts = conflicts.len(),
            "排期周期完成"
        );

        Ok(PlanningResult {
            annotations,
            assignments: outcome.assignments,
            unfilled_dates: outcome.unfilled_dates,
            conflicts,
            stats,
        })
    }

    /// 应用排期周期结果(标注 + 落位)
    ///
    /// # 返回
    /// 应用的更新条数
    pub async fn commit(&self, result: &PlanningResult) -> Result<usize, Box<dyn Error>> {
        let mut updates = result.annotations.clone();
        for assignment in &result.assignments {
            let mut update = ItemUpdate::new(&assignment.item_id);
            update.status = Some(assignment.status);
            update.scheduled_date = Some(assignment.scheduled_date);
            updates.push(update);
        }

        let applied = self.store.apply_updates(&updates).await?;
        info!(applied, "排期结果落库完成");
        Ok(applied)
    }

    /// 执行一次受守卫的状态转换并落库
    ///
    /// 转换表之外的请求以 InvalidStateTransition 拒绝;
    /// 级联副作用(派生内容拒绝)一并应用。
    pub async fn transition(
        &self,
        item_id: &str,
        to: ContentStatus,
        reason: Option<&str>,
    ) -> Result<TransitionOutcome, Box<dyn Error>> {
        let collection = self.store.load_collection().await?;

        let item = collection
            .iter()
            .find(|i| i.item_id == item_id)
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "ContentItem".to_string(),
                id: item_id.to_string(),
            })?;

        if !StatusMachine::is_legal(item.status, to) {
            return Err(Box::new(RepositoryError::InvalidStateTransition {
                from: item.status.to_string(),
                to: to.to_string(),
            }));
        }

        let outcome = self
            .status_machine
            .apply(&collection, item_id, to, reason, Utc::now());

        if !outcome.updates.is_empty() {
            self.store.apply_updates(&outcome.updates).await?;
        }
        for warning in &outcome.warnings {
            info!(item_id = %item_id, warning = %warning, "状态转换告警");
        }

        Ok(outcome)
    }

    /// 当前快照的储备水位与汇总统计
    pub async fn snapshot_stats(&self) -> Result<PlanningStats, Box<dyn Error>> {
        let constraints = self.config.get_constraints().await?;
        let rules = self.config.get_weight_rules().await?;
        let collection = self.store.load_collection().await?;
        Ok(self
            .stats
            .summarize(&collection, &rules, constraints.buffer_count))
    }

    /// 把批量生成结果写入存储
    pub async fn persist_items(&self, items: &[ContentItem]) -> Result<usize, Box<dyn Error>> {
        Ok(self.store.insert_items(items).await?)
    }
}
