//! Exemption policy, resolution and the host-owned policy store.

pub mod policy;
pub mod resolver;
pub mod store;

pub use policy::{ExemptionPolicy, ExemptionSet, ScopedRule};
pub use resolver::{resolve, ExemptionSource, ResolvedExemptions};
pub use store::{ExemptionStore, PolicySnapshot};
