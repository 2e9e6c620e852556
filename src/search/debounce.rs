use std::{
    future::Future,
    sync::{Mutex, PoisonError},
    time::Duration,
};

use tokio::{task::JoinHandle, time};
use tokio_util::sync::CancellationToken;

struct Pending {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Runs the most recently scheduled task once `delay` passes without a newer
/// `schedule` call. Scheduling cancels whatever was pending, including a
/// task that already started running.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<Pending>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let child = token.clone();
        let delay = self.delay;

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = child.cancelled() => {}
                _ = async {
                    time::sleep(delay).await;
                    task.await;
                } => {}
            }
        });

        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(Pending { token, handle });
        if let Some(previous) = previous {
            previous.token.cancel();
        }
    }

    /// Cancel the pending task. Returns whether one was still outstanding.
    pub fn cancel(&self) -> bool {
        match self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            Some(previous) => {
                let outstanding = !previous.handle.is_finished();
                previous.token.cancel();
                outstanding
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map_or(false, |pending| !pending.handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(pending) = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pending.token.cancel();
        }
    }
}
