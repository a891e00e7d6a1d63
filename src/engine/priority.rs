// ==========================================
// 编辑内容排期系统 - 优先级评分引擎
// ==========================================
// 依据: Content_Engine_Specs_v0.2.md - 2. Priority Scorer
// 红线: 评分是纯函数,越界值一律钳制不报错
// ==========================================
// 职责: 按质量/新鲜度/支柱均衡/项目密度计算 0-100 优先级评分
// 输入: content_item + 可选素材 + 全量内容集合 + 可选编辑基因
// 输出: 评分 [0,100] + 可解释性明细
// ==========================================

use crate::domain::content::{ContentItem, MediaAsset};
use crate::domain::slot::{EditorialDna, DEFAULT_PILLAR_COUNT};
use crate::domain::types::{ContentStatus, Objective};
use chrono::NaiveDate;

// ===== 评分参数 =====
const BASE_SCORE: f64 = 50.0;
const QUALITY_FACTOR: f64 = 0.3;
const QUALITY_CAP: f64 = 15.0;
const PILLAR_WINDOW_DAYS: i64 = 14;
const PILLAR_OVER_RATIO: f64 = 1.5;
const PROJECT_WINDOW_DAYS: i64 = 7;
const CORE_BONUS: f64 = 10.0;
const OBJECTIVE_BONUS: f64 = 5.0;

// ==========================================
// ScoreBreakdown - 评分明细
// ==========================================
// 用途: 可解释性输出,各分项与最终评分
#[derive(Debug, Clone)]
pub struct ScoreBreakdown {
    pub base: f64,            // 基准分
    pub quality: f64,         // 素材质量分项
    pub freshness: f64,       // 新鲜度分项
    pub pillar_balance: f64,  // 支柱均衡分项
    pub project_density: f64, // 项目密度分项
    pub core_bonus: f64,      // 核心内容加分
    pub objective_bonus: f64, // 技术权威目标加分
    pub total: i32,           // 最终评分(钳制并取整后)
}

// ==========================================
// PriorityScorer - 优先级评分引擎
// ==========================================
pub struct PriorityScorer {
    // 无状态引擎,不需要注入依赖
}

impl PriorityScorer {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算优先级评分
    ///
    /// # 参数
    /// - `item`: 待评分内容
    /// - `asset`: 源素材(可缺失,质量/新鲜度分项记 0)
    /// - `collection`: 全量内容集合(重复度上下文)
    /// - `dna`: 编辑基因(缺失时按缺省支柱数归一)
    /// - `today`: 参照日期
    ///
    /// # 返回
    /// 评分,恒在 [0,100]
    pub fn score(
        &self,
        item: &ContentItem,
        asset: Option<&MediaAsset>,
        collection: &[ContentItem],
        dna: Option<&EditorialDna>,
        today: NaiveDate,
    ) -> i32 {
        self.score_with_breakdown(item, asset, collection, dna, today)
            .total
    }

    /// 计算优先级评分并返回分项明细
    pub fn score_with_breakdown(
        &self,
        item: &ContentItem,
        asset: Option<&MediaAsset>,
        collection: &[ContentItem],
        dna: Option<&EditorialDna>,
        today: NaiveDate,
    ) -> ScoreBreakdown {
        let quality = self.quality_term(asset);
        let freshness = self.freshness_term(asset, today);
        let pillar_balance = self.pillar_balance_term(item, collection, dna, today);
        let project_density = self.project_density_term(item, collection, today);
        let core_bonus = if item.is_core { CORE_BONUS } else { 0.0 };
        let objective_bonus = if item.objective == Some(Objective::TechnicalAuthority) {
            OBJECTIVE_BONUS
        } else {
            0.0
        };

        let raw = BASE_SCORE
            + quality
            + freshness
            + pillar_balance
            + project_density
            + core_bonus
            + objective_bonus;
        let total = raw.round().clamp(0.0, 100.0) as i32;

        ScoreBreakdown {
            base: BASE_SCORE,
            quality,
            freshness,
            pillar_balance,
            project_density,
            core_bonus,
            objective_bonus,
            total,
        }
    }

    /// 生成评分原因 (可解释性)
    ///
    /// # 返回
    /// JSON 格式的评分明细字符串
    pub fn generate_score_reason(&self, breakdown: &ScoreBreakdown) -> String {
        format!(
            r#"{{"base":{},"quality":{},"freshness":{},"pillar_balance":{},"project_density":{},"core_bonus":{},"objective_bonus":{},"total":{}}}"#,
            breakdown.base,
            breakdown.quality,
            breakdown.freshness,
            breakdown.pillar_balance,
            breakdown.project_density,
            breakdown.core_bonus,
            breakdown.objective_bonus,
            breakdown.total
        )
    }

    // ==========================================
    // 分项计算
    // ==========================================

    /// 素材质量分项: (quality - 50) × 0.3,贡献钳制在 ±15
    fn quality_term(&self, asset: Option<&MediaAsset>) -> f64 {
        match asset.and_then(|a| a.quality_score) {
            Some(quality) if quality.is_finite() => {
                ((quality - 50.0) * QUALITY_FACTOR).clamp(-QUALITY_CAP, QUALITY_CAP)
            }
            _ => 0.0,
        }
    }

    /// 新鲜度分项: 按素材龄期阶梯计分
    fn freshness_term(&self, asset: Option<&MediaAsset>, today: NaiveDate) -> f64 {
        let age_days = match asset {
            Some(asset) => asset.age_days(today),
            None => return 0.0,
        };

        if age_days < 3 {
            15.0
        } else if age_days < 7 {
            10.0
        } else if age_days < 14 {
            5.0
        } else if age_days > 30 {
            -5.0
        } else {
            0.0
        }
    }

    /// 支柱均衡分项
    ///
    /// 统计回看窗口内(排期/发布/复盘)同支柱出现次数,
    /// 与支柱平均值比较: 低于平均 +10,超过 1.5 倍平均 -10
    fn pillar_balance_term(
        &self,
        item: &ContentItem,
        collection: &[ContentItem],
        dna: Option<&EditorialDna>,
        today: NaiveDate,
    ) -> f64 {
        let pillar = match &item.pillar {
            Some(pillar) => pillar,
            None => return 0.0,
        };

        let recent: Vec<&ContentItem> = collection
            .iter()
            .filter(|c| c.item_id != item.item_id)
            .filter(|c| c.on_calendar_within(today, PILLAR_WINDOW_DAYS))
            .filter(|c| c.pillar.is_some())
            .collect();

        let pillar_count = dna
            .map(|d| d.known_pillar_count())
            .unwrap_or(DEFAULT_PILLAR_COUNT);
        let average = recent.len() as f64 / pillar_count as f64;
        let occurrences = recent
            .iter()
            .filter(|c| c.pillar.as_deref() == Some(pillar.as_str()))
            .count() as f64;

        if occurrences < average {
            10.0
        } else if occurrences > average * PILLAR_OVER_RATIO {
            -10.0
        } else {
            0.0
        }
    }

    /// 项目密度分项
    ///
    /// 回看 7 天窗口内同项目(排期/发布)条数: >2 计 -15,1-2 计 -5
    fn project_density_term(
        &self,
        item: &ContentItem,
        collection: &[ContentItem],
        today: NaiveDate,
    ) -> f64 {
        let project_id = match &item.project_id {
            Some(project_id) => project_id,
            None => return 0.0,
        };

        let same_project = collection
            .iter()
            .filter(|c| c.item_id != item.item_id)
            .filter(|c| {
                matches!(c.status, ContentStatus::Scheduled | ContentStatus::Published)
            })
            .filter(|c| {
                c.scheduled_date
                    .map(|date| (0..=PROJECT_WINDOW_DAYS).contains(&(today - date).num_days()))
                    .unwrap_or(false)
            })
            .filter(|c| c.project_id.as_deref() == Some(project_id.as_str()))
            .count();

        if same_project > 2 {
            -15.0
        } else if same_project >= 1 {
            -5.0
        } else {
            0.0
        }
    }
}

impl Default for PriorityScorer {
    fn default() -> Self {
        Self::new()
    }
}
