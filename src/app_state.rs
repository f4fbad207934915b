use std::{sync::Arc, time::Duration};

use crate::service::{CommitContext, CommitService};

/// 应用状态
/// 包含所有 handler 共享的资源
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CommitService>,
    /// 单个请求的超时时间（链上广播 + 落库）
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(service: Arc<CommitService>, request_timeout: Duration) -> Self {
        Self {
            service,
            request_timeout,
        }
    }

    /// 每个请求一个新的上下文
    pub fn request_context(&self) -> CommitContext {
        CommitContext::with_timeout(self.request_timeout)
    }
}
