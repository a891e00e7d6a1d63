// ==========================================
// 编辑内容排期系统 - 排期配置
// ==========================================
// 依据: Content_Engine_Specs_v0.2.md - 9. 配置项全集
// ==========================================
// 职责: 约束配置、重量规则、渠道计划的定义与读取
// 红线: 引擎不持有配置来源,统一经 PlanningConfigReader 注入
// ==========================================

use crate::domain::slot::{EditorialDna, PublicationSlot};
use crate::domain::types::Channel;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::error::Error;

// ==========================================
// SchedulingConstraints - 排期约束配置
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingConstraints {
    pub max_heavy_per_week: u32,     // 每ISO周重内容上限
    pub cores_per_day: u32,          // 每日核心内容配额
    pub no_repeat_project_days: i64, // 项目防重窗口(天)
    pub no_repeat_format_days: i64,  // 形式防重窗口(天)
    pub buffer_count: u32,           // 目标储备数
    pub horizon_days: i64,           // 排期窗口长度(天)
}

impl Default for SchedulingConstraints {
    fn default() -> Self {
        Self {
            max_heavy_per_week: 3,
            cores_per_day: 1,
            no_repeat_project_days: 2,
            no_repeat_format_days: 2,
            buffer_count: 3,
            horizon_days: 14,
        }
    }
}

// ==========================================
// WeightRules - 重量分类规则
// ==========================================
// 依据: Content_Engine_Specs_v0.2.md - 1. Weight Classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightRules {
    pub heavy_formats: Vec<String>,   // 重形式词表
    pub heavy_channels: Vec<Channel>, // 重渠道集合
}

impl Default for WeightRules {
    fn default() -> Self {
        Self {
            heavy_formats: vec![
                "carousel_multi".to_string(),
                "reel_edited".to_string(),
                "case_study_long".to_string(),
                "video_edited".to_string(),
            ],
            heavy_channels: vec![Channel::Carousel, Channel::Reel, Channel::LongFormVideo],
        }
    }
}

impl WeightRules {
    /// 形式标签是否命中重形式词表(大小写不敏感)
    pub fn is_heavy_format(&self, format: &str) -> bool {
        self.heavy_formats
            .iter()
            .any(|f| f.eq_ignore_ascii_case(format.trim()))
    }

    /// 渠道是否属于重渠道
    pub fn is_heavy_channel(&self, channel: Channel) -> bool {
        self.heavy_channels.contains(&channel)
    }
}

// ==========================================
// ChannelPlan - 渠道计划
// ==========================================
// 用途: Batch Generator 的派生渠道来源(固定偏好顺序)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelPlan {
    pub channel_order: Vec<Channel>, // 配置渠道全集(按偏好排序)
    pub max_derivatives: usize,      // 派生内容上限
}

impl Default for ChannelPlan {
    fn default() -> Self {
        Self {
            channel_order: vec![
                Channel::Feed,
                Channel::Carousel,
                Channel::Reel,
                Channel::ProfessionalNetwork,
                Channel::LongFormVideo,
            ],
            max_derivatives: 4,
        }
    }
}

// ==========================================
// Trait: PlanningConfigReader
// ==========================================
// 用途: 引擎读取配置的统一入口(配置面由外部系统提供)
#[async_trait]
pub trait PlanningConfigReader: Send + Sync {
    /// 排期约束配置
    async fn get_constraints(&self) -> Result<SchedulingConstraints, Box<dyn Error>>;

    /// 重量分类规则
    async fn get_weight_rules(&self) -> Result<WeightRules, Box<dyn Error>>;

    /// 渠道计划
    async fn get_channel_plan(&self) -> Result<ChannelPlan, Box<dyn Error>>;

    /// 发布槽位全集
    async fn get_slots(&self) -> Result<Vec<PublicationSlot>, Box<dyn Error>>;

    /// 编辑基因(可缺失,评分按缺省支柱数归一)
    async fn get_editorial_dna(&self) -> Result<Option<EditorialDna>, Box<dyn Error>>;
}

// ==========================================
// StaticPlanningConfig - 静态配置实现
// ==========================================
// 用途: 进程内固定配置;也是测试用配置的基准实现
#[derive(Debug, Clone, Default)]
pub struct StaticPlanningConfig {
    pub constraints: SchedulingConstraints,
    pub weight_rules: WeightRules,
    pub channel_plan: ChannelPlan,
    pub slots: Vec<PublicationSlot>,
    pub dna: Option<EditorialDna>,
}

impl StaticPlanningConfig {
    /// 配置快照(JSON)
    ///
    /// # 用途
    /// 排期计算时记录配置快照,保证结果可复现
    pub fn config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let snapshot = serde_json::json!({
            "constraints": self.constraints,
            "weight_rules": self.weight_rules,
            "channel_plan": self.channel_plan,
            "slots": self.slots,
            "editorial_dna": self.dna,
        });
        Ok(serde_json::to_string(&snapshot)?)
    }
}

#[async_trait]
impl PlanningConfigReader for StaticPlanningConfig {
    async fn get_constraints(&self) -> Result<SchedulingConstraints, Box<dyn Error>> {
        Ok(self.constraints.clone())
    }

    async fn get_weight_rules(&self) -> Result<WeightRules, Box<dyn Error>> {
        Ok(self.weight_rules.clone())
    }

    async fn get_channel_plan(&self) -> Result<ChannelPlan, Box<dyn Error>> {
        Ok(self.channel_plan.clone())
    }

    async fn get_slots(&self) -> Result<Vec<PublicationSlot>, Box<dyn Error>> {
        Ok(self.slots.clone())
    }

    async fn get_editorial_dna(&self) -> Result<Option<EditorialDna>, Box<dyn Error>> {
        Ok(self.dna.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constraints() {
        let c = SchedulingConstraints::default();
        assert_eq!(c.max_heavy_per_week, 3);
        assert_eq!(c.cores_per_day, 1);
        assert_eq!(c.no_repeat_project_days, 2);
        assert_eq!(c.no_repeat_format_days, 2);
        assert_eq!(c.buffer_count, 3);
        assert_eq!(c.horizon_days, 14);
    }

    #[test]
    fn test_weight_rules_case_insensitive() {
        let rules = WeightRules::default();
        assert!(rules.is_heavy_format("CAROUSEL_MULTI"));
        assert!(rules.is_heavy_format("  reel_edited "));
        assert!(!rules.is_heavy_format("feed_post"));
    }

    #[test]
    fn test_config_snapshot_roundtrip() {
        let config = StaticPlanningConfig::default();
        let snapshot = config.config_snapshot().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&snapshot).unwrap();
        assert_eq!(parsed["constraints"]["max_heavy_per_week"], 3);
        assert_eq!(parsed["channel_plan"]["max_derivatives"], 4);
    }
}
