//! Bounded store lookups shared by search and correlation
//!
//! Every lookup owns its inputs and is boxed as a `'static` future, so the
//! fan-out stream stays `Send` for callers on any task.

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use std::sync::Arc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::config::SearchConfig;
use crate::domain::records::{Record, RecordStore};
use crate::domain::registry::CollectionDescriptor;
use crate::error::{Error, Result};

/// Deadline and cancellation shared by all lookups of one request
#[derive(Debug, Clone)]
pub(crate) struct LookupBudget {
    pub deadline: Instant,
    pub deadline_ms: u64,
    pub cancel: CancellationToken,
}

impl LookupBudget {
    /// Budget starting now under the configured deadline
    pub fn start(config: &SearchConfig, cancel: &CancellationToken) -> Self {
        Self {
            deadline: Instant::now() + config.deadline(),
            deadline_ms: config.deadline_ms,
            cancel: cancel.clone(),
        }
    }
}

/// Substring lookup of `needle` over `fields`, cut short by the budget
pub(crate) fn bounded_lookup(
    store: Arc<dyn RecordStore>,
    collection: CollectionDescriptor,
    fields: Vec<String>,
    needle: String,
    limit: u32,
    budget: LookupBudget,
) -> BoxFuture<'static, Result<Vec<Record>>> {
    async move {
        let lookup = store.search_contains(&collection, &fields, &needle, limit);

        tokio::select! {
            _ = budget.cancel.cancelled() => Err(Error::Cancelled),
            outcome = tokio::time::timeout_at(budget.deadline, lookup) => {
                outcome.map_err(|_| Error::Timeout(budget.deadline_ms))?
            }
        }
    }
    .boxed()
}
