// ==========================================
// 编辑内容排期系统 - 储备监视器
// ==========================================
// 依据: Content_Engine_Specs_v0.2.md - 8. Buffer Monitor
// 红线: 只观测不行动;补充储备由调用方决策
// ==========================================

use crate::domain::content::ContentItem;
use crate::domain::schedule::BufferStatus;
use crate::domain::types::ContentStatus;

// ==========================================
// BufferMonitor - 储备监视器
// ==========================================
pub struct BufferMonitor {
    // 无状态引擎
}

impl BufferMonitor {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 检查应急储备水位
    ///
    /// 口径: buffer_flag 且状态为 APPROVED 的条目计入储备
    ///
    /// # 参数
    /// - `collection`: 全量内容集合
    /// - `target`: 目标储备数
    pub fn check(&self, collection: &[ContentItem], target: u32) -> BufferStatus {
        let available = collection
            .iter()
            .filter(|item| item.buffer_flag && item.status == ContentStatus::Approved)
            .count();

        BufferStatus {
            available,
            target: target as usize,
            sufficient: available >= target as usize,
        }
    }
}

impl Default for BufferMonitor {
    fn default() -> Self {
        Self::new()
    }
}
