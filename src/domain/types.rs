// ==========================================
// 编辑内容排期系统 - 领域类型定义
// ==========================================
// 依据: Editorial_Master_Spec.md - PART A2 红线
// 依据: Content_Engine_Specs_v0.2.md - 0.1 生命周期状态体系
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 生命周期状态 (Content Status)
// ==========================================
// 红线: 封闭状态集,八态之外的值一律非法
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentStatus {
    Inbox,     // 收件箱(手工创建入口)
    Generated, // 已生成文案
    Review,    // 待审核
    Approved,  // 已批准
    Scheduled, // 已排期
    Published, // 已发布
    Measured,  // 已复盘(正常终态)
    Rejected,  // 已拒绝(异常终态,可重开)
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl ContentStatus {
    /// 从字符串解析状态
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "INBOX" => Some(ContentStatus::Inbox),
            "GENERATED" => Some(ContentStatus::Generated),
            "REVIEW" => Some(ContentStatus::Review),
            "APPROVED" => Some(ContentStatus::Approved),
            "SCHEDULED" => Some(ContentStatus::Scheduled),
            "PUBLISHED" => Some(ContentStatus::Published),
            "MEASURED" => Some(ContentStatus::Measured),
            "REJECTED" => Some(ContentStatus::Rejected),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ContentStatus::Inbox => "INBOX",
            ContentStatus::Generated => "GENERATED",
            ContentStatus::Review => "REVIEW",
            ContentStatus::Approved => "APPROVED",
            ContentStatus::Scheduled => "SCHEDULED",
            ContentStatus::Published => "PUBLISHED",
            ContentStatus::Measured => "MEASURED",
            ContentStatus::Rejected => "REJECTED",
        }
    }

    /// 是否已落位日历(排期/发布/复盘)
    ///
    /// 用途: Priority Scorer 的重复度窗口、Calendar Validator 的日扫描
    /// 均只统计落位日历的内容
    pub fn is_on_calendar(&self) -> bool {
        matches!(
            self,
            ContentStatus::Scheduled | ContentStatus::Published | ContentStatus::Measured
        )
    }

    /// 是否已上线(发布或复盘)
    ///
    /// 红线: 已上线的派生内容不参与级联拒绝
    pub fn is_live(&self) -> bool {
        matches!(self, ContentStatus::Published | ContentStatus::Measured)
    }
}

// ==========================================
// 内容重量 (Weight)
// ==========================================
// 红线: 非重即轻,分类函数必须全域有值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Weight {
    Heavy, // 重内容(高制作成本,受周配额约束)
    Light, // 轻内容
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weight::Heavy => write!(f, "HEAVY"),
            Weight::Light => write!(f, "LIGHT"),
        }
    }
}

impl Weight {
    /// 从字符串解析重量
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "HEAVY" => Some(Weight::Heavy),
            "LIGHT" => Some(Weight::Light),
            _ => None,
        }
    }
}

// ==========================================
// 发布渠道 (Channel)
// ==========================================
// 依据: Content_Engine_Specs_v0.2.md - 0.3 渠道全集
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Channel {
    Feed,                // 主信息流
    Carousel,            // 多图轮播
    Reel,                // 短视频
    ProfessionalNetwork, // 专业社交网络
    LongFormVideo,       // 长视频
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl Channel {
    /// 从字符串解析渠道
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "FEED" => Some(Channel::Feed),
            "CAROUSEL" => Some(Channel::Carousel),
            "REEL" => Some(Channel::Reel),
            "PROFESSIONAL_NETWORK" => Some(Channel::ProfessionalNetwork),
            "LONG_FORM_VIDEO" => Some(Channel::LongFormVideo),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Channel::Feed => "FEED",
            Channel::Carousel => "CAROUSEL",
            Channel::Reel => "REEL",
            Channel::ProfessionalNetwork => "PROFESSIONAL_NETWORK",
            Channel::LongFormVideo => "LONG_FORM_VIDEO",
        }
    }

    /// 渠道的默认内容形式标签
    ///
    /// 用途: Batch Generator 为派生内容赋默认 format
    pub fn default_format(&self) -> &'static str {
        match self {
            Channel::Feed => "feed_post",
            Channel::Carousel => "carousel_multi",
            Channel::Reel => "reel_edited",
            Channel::ProfessionalNetwork => "article_post",
            Channel::LongFormVideo => "video_edited",
        }
    }
}

// ==========================================
// 素材类型 (Media Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaKind {
    Image, // 图片
    Video, // 视频
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Image => write!(f, "IMAGE"),
            MediaKind::Video => write!(f, "VIDEO"),
        }
    }
}

// ==========================================
// 素材分类 (Media Category)
// ==========================================
// 依据: 上游素材分类子系统的口径(引擎只读)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaCategory {
    SiteProgress, // 工地进度
    Detail,       // 细部特写
    Team,         // 团队日常
    Finished,     // 完工成果
    Other,        // 其他
}

impl fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaCategory::SiteProgress => write!(f, "SITE_PROGRESS"),
            MediaCategory::Detail => write!(f, "DETAIL"),
            MediaCategory::Team => write!(f, "TEAM"),
            MediaCategory::Finished => write!(f, "FINISHED"),
            MediaCategory::Other => write!(f, "OTHER"),
        }
    }
}

// ==========================================
// 内容目标 (Objective)
// ==========================================
// 用途: 核心渠道启发式选择 + 优先级加分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Objective {
    TechnicalAuthority, // 技术权威
    BrandAwareness,     // 品牌曝光
    Community,          // 社区互动
    Conversion,         // 转化获客
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Objective::TechnicalAuthority => write!(f, "TECHNICAL_AUTHORITY"),
            Objective::BrandAwareness => write!(f, "BRAND_AWARENESS"),
            Objective::Community => write!(f, "COMMUNITY"),
            Objective::Conversion => write!(f, "CONVERSION"),
        }
    }
}

impl Objective {
    /// 从字符串解析内容目标
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "TECHNICAL_AUTHORITY" => Some(Objective::TechnicalAuthority),
            "BRAND_AWARENESS" => Some(Objective::BrandAwareness),
            "COMMUNITY" => Some(Objective::Community),
            "CONVERSION" => Some(Objective::Conversion),
            _ => None,
        }
    }
}

// ==========================================
// 日历冲突类型 (Conflict Kind)
// ==========================================
// 依据: Content_Engine_Specs_v0.2.md - 5. Calendar Validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictKind {
    NoCore,       // 当日无核心内容
    TooManyHeavy, // 周内重内容超配额
    ProjectRepeat, // 项目连日重复
    FormatRepeat, // 形式三连重复
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl ConflictKind {
    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ConflictKind::NoCore => "no-core",
            ConflictKind::TooManyHeavy => "too-many-heavy",
            ConflictKind::ProjectRepeat => "project-repeat",
            ConflictKind::FormatRepeat => "format-repeat",
        }
    }
}
