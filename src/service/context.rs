//! 单次提交的取消 / 超时上下文
//!
//! 所有会挂起的网络、数据库调用都经由 [`CommitContext::run`]，
//! 一旦上下文被取消或超过截止时间，正在进行的调用会被丢弃并返回 [`Interrupted`]。

use std::{future::Future, time::Duration};

use thiserror::Error;
use tokio::{sync::watch, time::Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Interrupted {
    #[error("operation cancelled")]
    Cancelled,
    #[error("deadline exceeded")]
    DeadlineExceeded,
}

#[derive(Debug, Clone)]
pub struct CommitContext {
    cancel: watch::Receiver<bool>,
    deadline: Option<Instant>,
}

/// 取消句柄；drop 不会触发取消
#[derive(Debug)]
pub struct CancelHandle(watch::Sender<bool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.send_replace(true);
    }
}

impl CommitContext {
    /// 永不取消、没有截止时间
    pub fn background() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self {
            cancel: rx,
            deadline: None,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::background().deadline_after(timeout)
    }

    pub fn cancellable() -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        let ctx = Self {
            cancel: rx,
            deadline: None,
        };
        (ctx, CancelHandle(tx))
    }

    /// 设置截止时间（只会收紧，不会放宽已有的截止时间）
    pub fn deadline_after(mut self, timeout: Duration) -> Self {
        let at = Instant::now() + timeout;
        self.deadline = Some(match self.deadline {
            Some(existing) if existing < at => existing,
            _ => at,
        });
        self
    }

    /// 在上下文约束下执行 `fut`
    ///
    /// 取消与超时优先于 `fut`，已取消的上下文不会开始任何 I/O
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, Interrupted> {
        let mut cancel = self.cancel.clone();
        let cancelled = async move {
            loop {
                if *cancel.borrow_and_update() {
                    return;
                }
                if cancel.changed().await.is_err() {
                    // 发送端已释放，之后不可能再被取消
                    std::future::pending::<()>().await;
                }
            }
        };

        let deadline = self.deadline;
        let expired = async move {
            match deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => Err(Interrupted::Cancelled),
            _ = expired => Err(Interrupted::DeadlineExceeded),
            out = fut => Ok(out),
        }
    }
}

impl Default for CommitContext {
    fn default() -> Self {
        Self::background()
    }
}
