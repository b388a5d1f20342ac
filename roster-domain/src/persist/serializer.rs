//! 快照序列化器协议
//!
//! 把完整快照写入持久化介质或从中读回。格式与写入的原子性由实现负责，
//! 调用方只关心失败以可恢复错误的形式返回。
//!
use super::Snapshot;
use crate::error::DomainResult as Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait SnapshotSerializer: Send + Sync {
    async fn save(&self, snapshot: &Snapshot) -> Result<()>;

    /// 读取最近一次保存的快照；尚无数据时返回空快照
    async fn load(&self) -> Result<Snapshot>;
}

#[async_trait]
impl<T> SnapshotSerializer for Arc<T>
where
    T: SnapshotSerializer + ?Sized,
{
    async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        (**self).save(snapshot).await
    }

    async fn load(&self) -> Result<Snapshot> {
        (**self).load().await
    }
}
