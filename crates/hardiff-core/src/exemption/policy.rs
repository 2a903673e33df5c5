//! Exemption policy model
//!
//! A policy names header and payload keys that are expected to differ between
//! two captures. Differences on exempt keys are still reported, but downgrade
//! a section to `Exempted` instead of `Partial`.

use std::collections::BTreeSet;

use crate::errors::HarDiffError;

/// A pair of exempt key sets
///
/// Header names are stored lowercase and matched case-insensitively; payload
/// keys are matched exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExemptionSet {
    header_names: BTreeSet<String>,
    payload_keys: BTreeSet<String>,
}

impl ExemptionSet {
    pub fn new<H, P>(header_names: H, payload_keys: P) -> Self
    where
        H: IntoIterator,
        H::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            header_names: header_names
                .into_iter()
                .map(|h| h.as_ref().to_ascii_lowercase())
                .collect(),
            payload_keys: payload_keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains_header(&self, name: &str) -> bool {
        self.header_names.contains(&name.to_ascii_lowercase())
    }

    pub fn contains_payload_key(&self, key: &str) -> bool {
        self.payload_keys.contains(key)
    }

    pub fn header_names(&self) -> &BTreeSet<String> {
        &self.header_names
    }

    pub fn payload_keys(&self) -> &BTreeSet<String> {
        &self.payload_keys
    }

    pub fn is_empty(&self) -> bool {
        self.header_names.is_empty() && self.payload_keys.is_empty()
    }
}

/// An exemption rule restricted to records whose URL contains a substring
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopedRule {
    host_substring: Option<String>,
    url_substring: Option<String>,
    exemptions: ExemptionSet,
}

impl ScopedRule {
    /// Rule that applies when the host substring occurs in the record URL
    pub fn for_host(host: impl Into<String>, exemptions: ExemptionSet) -> Self {
        Self {
            host_substring: Some(host.into()),
            url_substring: None,
            exemptions,
        }
    }

    /// Rule that applies when the URL substring occurs in the record URL
    pub fn for_url(url: impl Into<String>, exemptions: ExemptionSet) -> Self {
        Self {
            host_substring: None,
            url_substring: Some(url.into()),
            exemptions,
        }
    }

    /// Rule with arbitrary (possibly missing) matchers, as decoded from a
    /// policy document
    pub fn with_matchers(
        host_substring: Option<String>,
        url_substring: Option<String>,
        exemptions: ExemptionSet,
    ) -> Self {
        Self {
            host_substring,
            url_substring,
            exemptions,
        }
    }

    pub fn host_substring(&self) -> Option<&str> {
        self.host_substring.as_deref()
    }

    pub fn url_substring(&self) -> Option<&str> {
        self.url_substring.as_deref()
    }

    pub fn exemptions(&self) -> &ExemptionSet {
        &self.exemptions
    }

    /// Whether the rule has at least one non-empty matcher
    ///
    /// An empty substring would match every URL, so it counts as missing.
    pub fn has_matcher(&self) -> bool {
        self.matchers().next().is_some()
    }

    /// Whether this rule governs a record with the given URL
    pub fn matches(&self, url: &str) -> bool {
        self.matchers().any(|needle| url.contains(needle))
    }

    fn matchers(&self) -> impl Iterator<Item = &str> {
        [self.host_substring.as_deref(), self.url_substring.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
    }
}

/// Global exemptions plus ordered scoped overrides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExemptionPolicy {
    global: ExemptionSet,
    scoped_rules: Vec<ScopedRule>,
}

impl ExemptionPolicy {
    pub fn new(global: ExemptionSet, scoped_rules: Vec<ScopedRule>) -> Self {
        Self {
            global,
            scoped_rules,
        }
    }

    /// Policy with only a catch-all rule
    pub fn global_only(global: ExemptionSet) -> Self {
        Self::new(global, Vec::new())
    }

    pub fn global(&self) -> &ExemptionSet {
        &self.global
    }

    pub fn scoped_rules(&self) -> &[ScopedRule] {
        &self.scoped_rules
    }

    /// Report scoped rules that can never match
    ///
    /// Such rules are skipped during resolution; this only surfaces them so a
    /// host can warn about them when a policy is loaded.
    pub fn validate(&self) -> Vec<HarDiffError> {
        self.scoped_rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| !rule.has_matcher())
            .map(|(position, _)| HarDiffError::PolicyMismatch { position })
            .collect()
    }
}
