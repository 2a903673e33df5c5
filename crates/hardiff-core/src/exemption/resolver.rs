//! Exemption resolution
//!
//! The first scoped rule (in list order) whose matcher occurs in the record
//! URL wins and its sets are used exclusively; otherwise the global set
//! applies. Without a policy nothing is exempt.

use super::policy::{ExemptionPolicy, ExemptionSet};
use crate::model::{ExemptionClass, SectionKind};

/// Where a resolved exemption set came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExemptionSource {
    /// No policy loaded
    NoPolicy,
    /// The catch-all set
    Global,
    /// The scoped rule at this position
    Scoped(usize),
}

/// The exemption set in force for one record
#[derive(Debug, Clone, Copy)]
pub struct ResolvedExemptions<'a> {
    set: Option<&'a ExemptionSet>,
    source: ExemptionSource,
}

impl<'a> ResolvedExemptions<'a> {
    /// Nothing is exempt
    pub fn none() -> Self {
        Self {
            set: None,
            source: ExemptionSource::NoPolicy,
        }
    }

    pub fn source(&self) -> ExemptionSource {
        self.source
    }

    pub fn is_header_exempt(&self, name: &str) -> bool {
        self.set.is_some_and(|s| s.contains_header(name))
    }

    pub fn is_payload_key_exempt(&self, key: &str) -> bool {
        self.set.is_some_and(|s| s.contains_payload_key(key))
    }

    /// Whether a difference on `key` in `section` is exempt
    ///
    /// `key` is the key's own name (not its full path).
    pub fn is_exempt(&self, section: SectionKind, key: &str) -> bool {
        match section.exemption_class() {
            ExemptionClass::Header => self.is_header_exempt(key),
            ExemptionClass::Payload => self.is_payload_key_exempt(key),
            ExemptionClass::NotExemptible => false,
        }
    }
}

/// Resolve the exemption set for a record URL
pub fn resolve<'a>(policy: Option<&'a ExemptionPolicy>, url: &str) -> ResolvedExemptions<'a> {
    let Some(policy) = policy else {
        return ResolvedExemptions::none();
    };

    match policy
        .scoped_rules()
        .iter()
        .position(|rule| rule.matches(url))
    {
        Some(position) => ResolvedExemptions {
            set: Some(policy.scoped_rules()[position].exemptions()),
            source: ExemptionSource::Scoped(position),
        },
        None => ResolvedExemptions {
            set: Some(policy.global()),
            source: ExemptionSource::Global,
        },
    }
}
