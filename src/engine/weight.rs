// ==========================================
// 编辑内容排期系统 - 重量分类引擎
// ==========================================
// 依据: Content_Engine_Specs_v0.2.md - 1. Weight Classifier
// 红线: 分类函数全域有值,同输入必同输出
// ==========================================
// 职责: 按形式/渠道/素材类型判定内容重量
// 输入: content_item + 可选 media_asset + 重量规则
// 输出: Weight (HEAVY/LIGHT)
// ==========================================

use crate::config::planning_config::WeightRules;
use crate::domain::content::{ContentItem, MediaAsset};
use crate::domain::types::{MediaKind, Weight};

// ==========================================
// WeightClassifier - 重量分类引擎
// ==========================================
pub struct WeightClassifier {
    // 无状态引擎,规则通过参数传入
}

impl WeightClassifier {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 判定内容重量
    ///
    /// 判定顺序(先命中先生效):
    /// 1) 人工重量覆盖
    /// 2) 形式命中重形式词表
    /// 3) 渠道属于重渠道集合
    /// 4) 源素材为视频
    /// 5) 兜底为轻内容
    ///
    /// # 参数
    /// - `item`: 内容条目(不要求任何状态)
    /// - `asset`: 源素材(可缺失)
    /// - `rules`: 重量分类规则
    pub fn classify(
        &self,
        item: &ContentItem,
        asset: Option<&MediaAsset>,
        rules: &WeightRules,
    ) -> Weight {
        if let Some(weight) = item.weight_override {
            return weight;
        }

        if rules.is_heavy_format(&item.format) {
            return Weight::Heavy;
        }

        if rules.is_heavy_channel(item.channel) {
            return Weight::Heavy;
        }

        if let Some(asset) = asset {
            if asset.kind == MediaKind::Video {
                return Weight::Heavy;
            }
        }

        Weight::Light
    }

    /// 取有效重量(已分类用缓存,未分类按需计算)
    pub fn effective_weight(
        &self,
        item: &ContentItem,
        asset: Option<&MediaAsset>,
        rules: &WeightRules,
    ) -> Weight {
        match item.weight {
            Some(weight) => weight,
            None => self.classify(item, asset, rules),
        }
    }
}

impl Default for WeightClassifier {
    fn default() -> Self {
        Self::new()
    }
}
