// ==========================================
// 编辑内容排期系统 - 发布槽位与编辑基因
// ==========================================
// 依据: Editorial_Master_Spec.md - PART B2 栏目与支柱
// 红线: 槽位与编辑基因为外部配置,引擎只读不改
// ==========================================

use crate::domain::types::Channel;
use chrono::Weekday;
use serde::{Deserialize, Serialize};

// ==========================================
// PublicationSlot - 发布槽位
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicationSlot {
    pub slot_id: String,             // 槽位ID
    pub label: String,               // 槽位名称(人读)
    pub weekday: Weekday,            // 星期几
    pub channels: Vec<Channel>,      // 允许的渠道集合
    pub pillar_hint: Option<String>, // 支柱倾向(可选)
}

impl PublicationSlot {
    /// 槽位是否接受指定渠道
    pub fn accepts(&self, channel: Channel) -> bool {
        self.channels.contains(&channel)
    }
}

// ==========================================
// EditorialDna - 编辑基因
// ==========================================
// 用途: 仅用于支柱多样性评分的归一化
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorialDna {
    pub pillars: Vec<String>, // 识别的支柱全集
}

/// 编辑基因缺失时的支柱数缺省值
pub const DEFAULT_PILLAR_COUNT: usize = 6;

impl EditorialDna {
    /// 已知支柱数(空集合退化为缺省值)
    pub fn known_pillar_count(&self) -> usize {
        if self.pillars.is_empty() {
            DEFAULT_PILLAR_COUNT
        } else {
            self.pillars.len()
        }
    }
}
