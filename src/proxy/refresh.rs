// Single-flight token refresh
// Author: kelexine (https://github.com/kelexine)

use crate::models::TokenPair;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::OnceCell;
use tracing::debug;

/// How a caller obtained its new token pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refreshed {
    /// This caller ran the refresh call.
    Fresh(TokenPair),
    /// Another request refreshing the same token did the work.
    Shared(TokenPair),
}

impl Refreshed {
    pub fn into_tokens(self) -> TokenPair {
        match self {
            Refreshed::Fresh(tokens) | Refreshed::Shared(tokens) => tokens,
        }
    }
}

/// A finished refresh and when it finished.
#[derive(Clone)]
struct Completed {
    tokens: TokenPair,
    at: Instant,
}

struct Slot {
    result: OnceCell<Option<Completed>>,
}

impl Slot {
    /// Unfinished slots are live; finished ones only while in grace.
    fn is_live(&self, grace: Duration) -> bool {
        match self.result.get() {
            None => true,
            Some(Some(done)) => done.at.elapsed() < grace,
            Some(None) => false,
        }
    }
}

/// Coalesces concurrent refreshes that present the same refresh token.
///
/// The first caller for a token runs the refresh; callers arriving while it is
/// in flight wait for its result. A successful result is handed out for
/// `grace` after the refresh finished, since siblings may still carry the
/// rotated token.
/// Failures are not kept: the next caller tries again.
///
/// If the running caller is cancelled, a waiting caller takes over the refresh.
pub struct RefreshCoordinator {
    enabled: bool,
    grace: Duration,
    slots: Mutex<HashMap<String, Arc<Slot>>>,
}

impl RefreshCoordinator {
    pub fn new(enabled: bool, grace: Duration) -> Self {
        Self {
            enabled,
            grace,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Run `refresh` for `refresh_token`, or join one already running.
    pub async fn refresh<F, Fut>(&self, refresh_token: &str, refresh: F) -> Option<Refreshed>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<TokenPair>>,
    {
        if !self.enabled {
            return refresh().await.map(Refreshed::Fresh);
        }

        let slot = self.slot(refresh_token);

        let mut ran = false;
        let result = slot
            .result
            .get_or_init(|| {
                ran = true;
                async move {
                    refresh().await.map(|tokens| Completed {
                        tokens,
                        at: Instant::now(),
                    })
                }
            })
            .await
            .clone();

        match result {
            Some(done) if ran => Some(Refreshed::Fresh(done.tokens)),
            Some(Completed { tokens, .. }) => {
                debug!("Reusing a concurrent token refresh");
                Some(Refreshed::Shared(tokens))
            }
            None => {
                let mut slots = self.slots.lock();
                if slots.get(refresh_token).is_some_and(|current| Arc::ptr_eq(current, &slot)) {
                    slots.remove(refresh_token);
                }
                None
            }
        }
    }

    fn slot(&self, refresh_token: &str) -> Arc<Slot> {
        let mut slots = self.slots.lock();
        let grace = self.grace;
        slots.retain(|_, slot| slot.is_live(grace));

        slots
            .entry(refresh_token.to_string())
            .or_insert_with(|| {
                Arc::new(Slot {
                    result: OnceCell::new(),
                })
            })
            .clone()
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.slots.lock().len()
    }
}
