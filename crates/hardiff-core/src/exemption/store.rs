//! Host-owned, atomically swapped exemption policy
//!
//! Writers replace the whole policy under a short write lock; readers take an
//! `Arc` snapshot once per engine call and never see a swap mid-call.

use std::sync::Arc;

use parking_lot::RwLock;

use super::policy::ExemptionPolicy;

/// The policy a single engine call works against
pub type PolicySnapshot = Option<Arc<ExemptionPolicy>>;

/// Shared slot holding the currently loaded exemption policy
#[derive(Debug, Default)]
pub struct ExemptionStore {
    current: RwLock<PolicySnapshot>,
}

impl ExemptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with a policy
    pub fn with_policy(policy: ExemptionPolicy) -> Self {
        Self {
            current: RwLock::new(Some(Arc::new(policy))),
        }
    }

    /// Replace (`Some`) or clear (`None`) the policy
    ///
    /// Returns the policy that was in force before the swap.
    pub fn set(&self, policy: Option<ExemptionPolicy>) -> PolicySnapshot {
        let next = policy.map(Arc::new);
        std::mem::replace(&mut *self.current.write(), next)
    }

    pub fn clear(&self) -> PolicySnapshot {
        self.set(None)
    }

    /// Current policy; cheap, holds the read lock only for an `Arc` clone
    pub fn snapshot(&self) -> PolicySnapshot {
        self.current.read().clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.read().is_some()
    }
}
