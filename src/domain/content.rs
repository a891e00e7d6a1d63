// ==========================================
// 编辑内容排期系统 - 内容领域模型
// ==========================================
// 依据: Editorial_Master_Spec.md - PART C 数据与状态体系
// 依据: Content_Engine_Specs_v0.2.md - content_item/media_asset/content_package
// ==========================================

use crate::domain::types::{Channel, ContentStatus, MediaCategory, MediaKind, Objective, Weight};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// ContentItem - 内容条目(排期单元)
// ==========================================
// 红线: 引擎只读,所有变更以更新批次形式返回给调用方落库
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    // ===== 主键 =====
    pub item_id: String, // 内容唯一标识(UUID)

    // ===== 来源关联 =====
    pub asset_id: Option<String>,   // 源素材ID
    pub package_id: Option<String>, // 生成文案包ID

    // ===== 发布维度 =====
    pub channel: Channel,       // 目标渠道
    pub format: String,         // 内容形式标签(见 WeightRules 重形式词表)
    pub copy_text: String,      // 本地化文案(缺失渠道文案时为空串,非错误)
    pub hashtags: Vec<String>,  // 话题标签
    pub cta: Option<String>,    // 行动号召文案

    // ===== 生命周期 =====
    pub status: ContentStatus, // 生命周期状态(八态封闭集)

    // ===== 重量与优先级 =====
    pub weight_override: Option<Weight>, // 人工重量覆盖(最高优先)
    pub weight: Option<Weight>,          // 派生重量(未分类时按需计算)
    pub priority_score: i32,             // 优先级评分 [0,100]

    // ===== 内容结构 =====
    pub is_core: bool,               // 核心内容标志
    pub pillar: Option<String>,      // 内容支柱标签
    pub project_id: Option<String>,  // 关联项目
    pub objective: Option<Objective>, // 内容目标
    pub parent_id: Option<String>,   // 父核心内容(仅派生内容)
    pub derivative_ids: Vec<String>, // 派生内容集合(仅核心内容)

    // ===== 排期落位 =====
    pub scheduled_date: Option<NaiveDate>, // 已排日期(NULL=未排)

    // ===== 发布与复盘 =====
    pub published_at: Option<DateTime<Utc>>,  // 发布时间
    pub measured_at: Option<DateTime<Utc>>,   // 复盘时间
    pub metrics: Option<PerformanceMetrics>,  // 表现指标(发布后才存在)

    // ===== 异常终态 =====
    pub rejection_reason: Option<String>, // 拒绝原因

    // ===== 应急储备 =====
    pub buffer_flag: bool, // 储备内容标志

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>, // 创建时间
}

impl ContentItem {
    /// 是否为待排核心候选(已批准、未落位、核心)
    pub fn is_core_candidate(&self) -> bool {
        self.status == ContentStatus::Approved && self.scheduled_date.is_none() && self.is_core
    }

    /// 是否在指定日期的回看窗口内落位日历
    ///
    /// # 参数
    /// - `today`: 参照日期
    /// - `window_days`: 回看天数(闭区间 [today-window_days, today])
    pub fn on_calendar_within(&self, today: NaiveDate, window_days: i64) -> bool {
        if !self.status.is_on_calendar() {
            return false;
        }
        match self.scheduled_date {
            Some(date) => {
                let delta = (today - date).num_days();
                (0..=window_days).contains(&delta)
            }
            None => false,
        }
    }
}

// ==========================================
// PerformanceMetrics - 表现指标
// ==========================================
// 用途: 外部渠道统计子系统写入,引擎只在状态机中读取存在性
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub impressions: i64,  // 曝光量
    pub reach: i64,        // 触达人数
    pub interactions: i64, // 互动数(赞/评/转)
    pub saves: i64,        // 收藏数
    pub follows: i64,      // 带来关注数
}

// ==========================================
// MediaAsset - 源素材(外部只读输入)
// ==========================================
// 用途: 重量分类与优先级评分的只读输入,由上传/分类子系统产出
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaAsset {
    pub asset_id: String,             // 素材唯一标识
    pub kind: MediaKind,              // 素材类型(图片/视频)
    pub quality_score: Option<f64>,   // 质量评分 0-100(上游打分)
    pub uploaded_at: DateTime<Utc>,   // 上传时间(新鲜度口径)
    pub tags: Vec<String>,            // 素材标签
    pub category: MediaCategory,      // 素材分类
}

impl MediaAsset {
    /// 素材龄期(天)
    pub fn age_days(&self, today: NaiveDate) -> i64 {
        (today - self.uploaded_at.date_naive()).num_days()
    }
}

// ==========================================
// ContentPackage - 生成文案包(外部只读输入)
// ==========================================
// 用途: Batch Generator 的文案来源,由生成子系统产出
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentPackage {
    pub package_id: String,                    // 文案包唯一标识
    pub language: String,                      // 文案语言(如 "es"/"en")
    pub copy_by_channel: HashMap<Channel, String>, // 渠道 -> 本地化文案
    pub hashtags: Vec<String>,                 // 话题标签(派生内容原样继承)
    pub cta: Option<String>,                   // 行动号召
    pub objective: Option<Objective>,          // 内容目标
}

impl ContentPackage {
    /// 是否包含轮播形式文案
    pub fn has_carousel_copy(&self) -> bool {
        self.copy_by_channel.contains_key(&Channel::Carousel)
    }

    /// 取指定渠道的文案(缺失时为空串,非错误)
    pub fn copy_for(&self, channel: Channel) -> String {
        self.copy_by_channel.get(&channel).cloned().unwrap_or_default()
    }
}

// ==========================================
// RawContentRecord - 摄入中间结构体
// ==========================================
// 用途: 摄入边界中间产物(松散记录 → 字段校验 → ContentItem)
// 生命周期: 仅在摄入流程内
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawContentRecord {
    // 源字段(未经校验)
    pub item_id: Option<String>,
    pub asset_id: Option<String>,
    pub package_id: Option<String>,
    pub channel: Option<String>,
    pub format: Option<String>,
    pub copy_text: Option<String>,
    pub hashtags: Option<Vec<String>>,
    pub cta: Option<String>,
    pub status: Option<String>,
    pub weight_override: Option<String>,
    pub priority_score: Option<i32>,
    pub is_core: Option<bool>,
    pub pillar: Option<String>,
    pub project_id: Option<String>,
    pub objective: Option<String>,
    pub parent_id: Option<String>,
    pub derivative_ids: Option<Vec<String>>,
    pub scheduled_date: Option<NaiveDate>,
    pub metrics: Option<PerformanceMetrics>,
    pub rejection_reason: Option<String>,
    pub buffer_flag: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,

    // 元信息
    pub row_number: usize, // 原始记录行号(用于 DQ 报告)
}
