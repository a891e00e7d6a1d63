// ==========================================
// 编辑内容排期系统 - 内容存储边界
// ==========================================
// 依据: Editorial_Master_Spec.md - PART D1 存储边界
// 红线: 引擎不直接落库,快照进、更新批次出
// ==========================================
// 职责: 抽象加载/保存操作;具体存储介质与引擎契约无关
// ==========================================

use crate::domain::content::{ContentItem, MediaAsset};
use crate::domain::schedule::ItemUpdate;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

// ==========================================
// Trait: ContentStore
// ==========================================
// 用途: 调用方持有的存储边界;单写者语义由调用方保证
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// 加载全量内容集合快照
    async fn load_collection(&self) -> RepositoryResult<Vec<ContentItem>>;

    /// 加载全量素材快照
    async fn load_assets(&self) -> RepositoryResult<Vec<MediaAsset>>;

    /// 新增内容条目(批量生成结果落库)
    async fn insert_items(&self, items: &[ContentItem]) -> RepositoryResult<usize>;

    /// 应用更新批次
    ///
    /// 全批校验后再应用:任一 item_id 不存在则整批拒绝,
    /// 与调用方的事务纪律保持一致。
    async fn apply_updates(&self, updates: &[ItemUpdate]) -> RepositoryResult<usize>;
}

// ==========================================
// InMemoryContentStore - 进程内存储实现
// ==========================================
// 用途: 参考实现与测试基座;生产介质由调用方自行适配
#[derive(Default)]
pub struct InMemoryContentStore {
    items: Arc<Mutex<HashMap<String, ContentItem>>>,
    assets: Arc<Mutex<HashMap<String, MediaAsset>>>,
}

impl InMemoryContentStore {
    /// 创建空存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 以初始数据创建存储
    pub fn with_data(items: Vec<ContentItem>, assets: Vec<MediaAsset>) -> Self {
        let items: HashMap<String, ContentItem> = items
            .into_iter()
            .map(|item| (item.item_id.clone(), item))
            .collect();
        let assets: HashMap<String, MediaAsset> = assets
            .into_iter()
            .map(|asset| (asset.asset_id.clone(), asset))
            .collect();
        Self {
            items: Arc::new(Mutex::new(items)),
            assets: Arc::new(Mutex::new(assets)),
        }
    }

    /// 按ID读取单条内容(测试断言用)
    pub fn get_item(&self, item_id: &str) -> Option<ContentItem> {
        self.items
            .lock()
            .ok()
            .and_then(|guard| guard.get(item_id).cloned())
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn load_collection(&self) -> RepositoryResult<Vec<ContentItem>> {
        let guard = self
            .items
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        let mut collection: Vec<ContentItem> = guard.values().cloned().collect();
        // 快照顺序稳定,便于上层确定性处理
        collection.sort_by(|a, b| a.item_id.cmp(&b.item_id));
        Ok(collection)
    }

    async fn load_assets(&self) -> RepositoryResult<Vec<MediaAsset>> {
        let guard = self
            .assets
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        let mut assets: Vec<MediaAsset> = guard.values().cloned().collect();
        assets.sort_by(|a, b| a.asset_id.cmp(&b.asset_id));
        Ok(assets)
    }

    async fn insert_items(&self, items: &[ContentItem]) -> RepositoryResult<usize> {
        let mut guard = self
            .items
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        for item in items {
            if guard.contains_key(&item.item_id) {
                return Err(RepositoryError::BusinessRuleViolation(format!(
                    "内容已存在: {}",
                    item.item_id
                )));
            }
        }

        for item in items {
            guard.insert(item.item_id.clone(), item.clone());
        }

        debug!(inserted = items.len(), "内容条目写入完成");
        Ok(items.len())
    }

    async fn apply_updates(&self, updates: &[ItemUpdate]) -> RepositoryResult<usize> {
        let mut guard = self
            .items
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        // 先全批校验
        for update in updates {
            if !guard.contains_key(&update.item_id) {
                return Err(RepositoryError::NotFound {
                    entity: "ContentItem".to_string(),
                    id: update.item_id.clone(),
                });
            }
        }

        // 再逐条应用
        for update in updates {
            let Some(item) = guard.get_mut(&update.item_id) else {
                continue;
            };

            if let Some(status) = update.status {
                item.status = status;
            }
            if let Some(date) = update.scheduled_date {
                item.scheduled_date = Some(date);
            }
            if let Some(score) = update.priority_score {
                item.priority_score = score;
            }
            if let Some(weight) = update.weight {
                item.weight = Some(weight);
            }
            if let Some(reason) = &update.rejection_reason {
                item.rejection_reason = Some(reason.clone());
            }
            if let Some(at) = update.published_at {
                item.published_at = Some(at);
            }
            if let Some(at) = update.measured_at {
                item.measured_at = Some(at);
            }
            if update.clear_scheduled_date {
                item.scheduled_date = None;
            }
            if update.clear_rejection_reason {
                item.rejection_reason = None;
            }
        }

        debug!(applied = updates.len(), "更新批次应用完成");
        Ok(updates.len())
    }
}
