//! Mutation Gate - 可选的写操作串行化
//!
//! 远程句柄被所有请求共享且没有版本控制，"先修改再回读" 的序列在并发下
//! 可能读到错位的表/行。启用后，写操作在整个 修改 + 回读 期间独占，
//! 读操作共享；关闭时不加任何锁。
//!
//! 只能约束经过本进程的请求，其他客户端直接访问远程服务时仍可能交错。

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// 写操作闸门
#[derive(Debug, Default)]
pub struct MutationGate {
    lock: Option<RwLock<()>>,
}

impl MutationGate {
    /// 根据配置创建
    pub fn new(serialize_mutations: bool) -> Self {
        if serialize_mutations {
            Self::serialized()
        } else {
            Self::unserialized()
        }
    }

    /// 不加锁（与远程服务的原始行为一致）
    pub fn unserialized() -> Self {
        Self { lock: None }
    }

    /// 写操作互斥，读操作共享
    pub fn serialized() -> Self {
        Self {
            lock: Some(RwLock::new(())),
        }
    }

    pub fn is_serialized(&self) -> bool {
        self.lock.is_some()
    }

    /// 进入写区段，守卫释放前其他读写都会等待
    pub async fn write(&self) -> Option<RwLockWriteGuard<'_, ()>> {
        match &self.lock {
            Some(lock) => Some(lock.write().await),
            None => None,
        }
    }

    /// 进入读区段
    pub async fn read(&self) -> Option<RwLockReadGuard<'_, ()>> {
        match &self.lock {
            Some(lock) => Some(lock.read().await),
            None => None,
        }
    }
}
