use serde::{Deserialize, Serialize};

/// A comparable section of a record pair, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Method, normalised path and response status
    General,
    /// Request headers
    Headers,
    /// Query parameters
    Params,
    /// Request body
    Payload,
    /// Response headers
    ResponseHeaders,
    /// Response body
    ResponseBody,
}

/// Which exemption list governs a section's keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExemptionClass {
    Header,
    Payload,
    /// Differences in this section are never exempt
    NotExemptible,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        SectionKind::General,
        SectionKind::Headers,
        SectionKind::Params,
        SectionKind::Payload,
        SectionKind::ResponseHeaders,
        SectionKind::ResponseBody,
    ];

    /// Stable name, also used as the key for whole-section presence
    pub fn name(&self) -> &'static str {
        match self {
            SectionKind::General => "general",
            SectionKind::Headers => "headers",
            SectionKind::Params => "params",
            SectionKind::Payload => "payload",
            SectionKind::ResponseHeaders => "response_headers",
            SectionKind::ResponseBody => "response_body",
        }
    }

    pub fn exemption_class(&self) -> ExemptionClass {
        match self {
            SectionKind::Headers | SectionKind::ResponseHeaders => ExemptionClass::Header,
            SectionKind::Payload | SectionKind::ResponseBody => ExemptionClass::Payload,
            SectionKind::General | SectionKind::Params => ExemptionClass::NotExemptible,
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
