use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::view::ProductId;

/// What to do with a quantity reply that arrives after a newer one.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum StalePolicy {
    /// Drop replies older than the last one applied for the same line item
    #[default]
    RejectStale,
    /// Apply every reply in arrival order
    Accept,
}

/// Numbers quantity requests and remembers the newest applied one per line
/// item, plus the newest one that wrote the shared cart total.
#[derive(Debug, Default)]
pub(crate) struct Sequencer {
    next: AtomicU64,
    applied: Mutex<HashMap<ProductId, u64>>,
    cart_total: AtomicU64,
}

impl Sequencer {
    pub fn issue(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Record `sequence` as applied unless a newer one already was.
    pub fn admit(&self, policy: StalePolicy, product_id: &ProductId, sequence: u64) -> bool {
        let mut applied = self.applied.lock();
        let last = applied.entry(product_id.clone()).or_insert(0);
        if policy == StalePolicy::RejectStale && sequence < *last {
            return false;
        }
        *last = (*last).max(sequence);
        true
    }

    /// Record `sequence` as the cart total's writer unless a newer reply,
    /// for any line item, already wrote it.
    pub fn admit_cart_total(&self, policy: StalePolicy, sequence: u64) -> bool {
        let newest = self.cart_total.fetch_max(sequence, Ordering::Relaxed);
        policy == StalePolicy::Accept || sequence >= newest
    }
}
