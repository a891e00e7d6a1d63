// ==========================================
// 编辑内容排期系统 - 批量生成引擎
// ==========================================
// 依据: Content_Engine_Specs_v0.2.md - 3. Batch Generator
// 红线: 生成结果为"未落库"形态,由调用方决定是否写入
// ==========================================
// 职责: 素材 + 文案包 → 1 条核心内容 + 至多 4 条派生内容
// 输入: media_asset + content_package + 可选项目/支柱关联
// 输出: GeneratedBatch (核心 + 派生,双向链接)
// ==========================================

use crate::config::planning_config::ChannelPlan;
use crate::domain::content::{ContentItem, ContentPackage, MediaAsset};
use crate::domain::types::{Channel, ContentStatus, MediaCategory, MediaKind, Objective};
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

// ===== 初始评分(待重评) =====
const CORE_INITIAL_SCORE: i32 = 50;
const DERIVATIVE_INITIAL_SCORE: i32 = 40;

// ==========================================
// GeneratedBatch - 批量生成结果
// ==========================================
#[derive(Debug, Clone)]
pub struct GeneratedBatch {
    pub core: ContentItem,             // 核心内容
    pub derivatives: Vec<ContentItem>, // 派生内容(每渠道一条)
}

impl GeneratedBatch {
    /// 展开为全部条目(核心在前)
    pub fn into_items(self) -> Vec<ContentItem> {
        let mut items = vec![self.core];
        items.extend(self.derivatives);
        items
    }
}

// ==========================================
// BatchGenerator - 批量生成引擎
// ==========================================
pub struct BatchGenerator {
    // 无状态引擎,渠道计划通过参数传入
}

impl BatchGenerator {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 生成一批内容
    ///
    /// 核心渠道启发式(先命中先生效):
    /// 1) 视频素材 → 短视频渠道
    /// 2) 目标为技术权威 → 专业社交网络
    /// 3) 素材分类为细部/工地进度 → 主信息流
    /// 4) 文案包含轮播文案 → 多图轮播
    /// 5) 兜底 → 主信息流
    ///
    /// # 参数
    /// - `asset`: 源素材
    /// - `package`: 生成文案包
    /// - `project_id`: 关联项目(可选)
    /// - `pillar`: 支柱标签(可选)
    /// - `plan`: 渠道计划
    pub fn generate(
        &self,
        asset: &MediaAsset,
        package: &ContentPackage,
        project_id: Option<&str>,
        pillar: Option<&str>,
        plan: &ChannelPlan,
    ) -> GeneratedBatch {
        let core_channel = self.select_core_channel(asset, package);

        // 派生渠道 = 配置渠道全集 - 核心渠道,按偏好顺序截断
        let derivative_channels: Vec<Channel> = plan
            .channel_order
            .iter()
            .copied()
            .filter(|channel| *channel != core_channel)
            .take(plan.max_derivatives)
            .collect();

        let mut core = self.build_item(
            asset,
            package,
            project_id,
            pillar,
            core_channel,
            true,
            CORE_INITIAL_SCORE,
        );

        let derivatives: Vec<ContentItem> = derivative_channels
            .iter()
            .map(|channel| {
                let mut item = self.build_item(
                    asset,
                    package,
                    project_id,
                    pillar,
                    *channel,
                    false,
                    DERIVATIVE_INITIAL_SCORE,
                );
                item.parent_id = Some(core.item_id.clone());
                item
            })
            .collect();

        core.derivative_ids = derivatives.iter().map(|d| d.item_id.clone()).collect();

        debug!(
            asset_id = %asset.asset_id,
            core_channel = %core_channel,
            derivatives = derivatives.len(),
            "批量生成完成"
        );

        GeneratedBatch { core, derivatives }
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 选择核心渠道
    fn select_core_channel(&self, asset: &MediaAsset, package: &ContentPackage) -> Channel {
        if asset.kind == MediaKind::Video {
            return Channel::Reel;
        }
        if package.objective == Some(Objective::TechnicalAuthority) {
            return Channel::ProfessionalNetwork;
        }
        if matches!(
            asset.category,
            MediaCategory::Detail | MediaCategory::SiteProgress
        ) {
            return Channel::Feed;
        }
        if package.has_carousel_copy() {
            return Channel::Carousel;
        }
        Channel::Feed
    }

    /// 构建单条内容
    fn build_item(
        &self,
        asset: &MediaAsset,
        package: &ContentPackage,
        project_id: Option<&str>,
        pillar: Option<&str>,
        channel: Channel,
        is_core: bool,
        initial_score: i32,
    ) -> ContentItem {
        ContentItem {
            item_id: Uuid::new_v4().to_string(),
            asset_id: Some(asset.asset_id.clone()),
            package_id: Some(package.package_id.clone()),
            channel,
            format: channel.default_format().to_string(),
            copy_text: package.copy_for(channel),
            hashtags: package.hashtags.clone(),
            cta: package.cta.clone(),
            status: ContentStatus::Review,
            weight_override: None,
            weight: None,
            priority_score: initial_score,
            is_core,
            pillar: pillar.map(|p| p.to_string()),
            project_id: project_id.map(|p| p.to_string()),
            objective: package.objective,
            parent_id: None,
            derivative_ids: Vec::new(),
            scheduled_date: None,
            published_at: None,
            measured_at: None,
            metrics: None,
            rejection_reason: None,
            buffer_flag: false,
            created_at: Utc::now(),
        }
    }
}

impl Default for BatchGenerator {
    fn default() -> Self {
        Self::new()
    }
}
