use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Record - one logged HTTP request/response exchange
///
/// Records are produced by the host (see `hardiff-har`) and are never mutated
/// by the engine; aligners and the comparator only borrow them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// HTTP verb, case-preserved as captured
    pub method: String,

    /// Absolute URL as captured
    pub url: String,

    /// URL path plus query string
    pub path: String,

    /// Request headers; names are stored as captured and compared
    /// case-insensitively
    pub request_headers: BTreeMap<String, String>,

    /// Query parameters; repeated parameters keep every value in order
    pub query_params: BTreeMap<String, Vec<String>>,

    /// Raw request body, if the capture had one
    pub request_body: Option<String>,

    /// Response status code
    pub response_status: u16,

    /// Response headers, same conventions as `request_headers`
    pub response_headers: BTreeMap<String, String>,

    /// Raw response body, if the capture had one
    pub response_body: Option<String>,

    /// 1-based position within its own log
    pub sequence_index: usize,
}

impl Record {
    /// Start building a record
    ///
    /// # Example
    /// ```
    /// use hardiff_core::Record;
    ///
    /// let record = Record::builder(1, "GET", "/users?page=2")
    ///     .request_header("Accept", "application/json")
    ///     .response_status(200)
    ///     .build();
    ///
    /// assert_eq!(record.query_params["page"], vec!["2".to_string()]);
    /// ```
    pub fn builder(
        sequence_index: usize,
        method: impl Into<String>,
        path: impl Into<String>,
    ) -> RecordBuilder {
        RecordBuilder::new(sequence_index, method, path)
    }

    /// Path without the query string
    pub fn path_without_query(&self) -> &str {
        strip_query(&self.path)
    }

    /// Whether the method is GET (case-insensitive)
    pub fn is_get(&self) -> bool {
        self.method.eq_ignore_ascii_case("GET")
    }

    /// Look up a request header case-insensitively
    pub fn request_header(&self, name: &str) -> Option<&str> {
        lookup_header(&self.request_headers, name)
    }

    /// Look up a response header case-insensitively
    pub fn response_header(&self, name: &str) -> Option<&str> {
        lookup_header(&self.response_headers, name)
    }
}

pub(crate) fn strip_query(path: &str) -> &str {
    path.split('?').next().unwrap_or(path)
}

fn lookup_header<'a>(headers: &'a BTreeMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Split a raw query string into ordered parameter values
///
/// Pairs are split on `&` and then on the first `=`; a pair without `=` is a
/// parameter with an empty value. Values are kept verbatim (no decoding).
pub fn parse_query_string(query: &str) -> BTreeMap<String, Vec<String>> {
    let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        params
            .entry(name.to_string())
            .or_default()
            .push(value.to_string());
    }
    params
}

/// Builder for [`Record`]
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: Record,
    explicit_params: bool,
}

impl RecordBuilder {
    fn new(sequence_index: usize, method: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            record: Record {
                method: method.into(),
                url: format!("http://localhost{}", path),
                path,
                request_headers: BTreeMap::new(),
                query_params: BTreeMap::new(),
                request_body: None,
                response_status: 200,
                response_headers: BTreeMap::new(),
                response_body: None,
                sequence_index,
            },
            explicit_params: false,
        }
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.record.url = url.into();
        self
    }

    pub fn request_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.record
            .request_headers
            .insert(name.into(), value.into());
        self
    }

    pub fn response_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.record
            .response_headers
            .insert(name.into(), value.into());
        self
    }

    /// Append a query parameter value
    ///
    /// Once any parameter is set explicitly, `build()` no longer derives
    /// parameters from the path.
    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.explicit_params = true;
        self.record
            .query_params
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }

    pub fn request_body(mut self, body: impl Into<String>) -> Self {
        self.record.request_body = Some(body.into());
        self
    }

    pub fn response_status(mut self, status: u16) -> Self {
        self.record.response_status = status;
        self
    }

    pub fn response_body(mut self, body: impl Into<String>) -> Self {
        self.record.response_body = Some(body.into());
        self
    }

    pub fn build(mut self) -> Record {
        if !self.explicit_params {
            if let Some((_, query)) = self.record.path.split_once('?') {
                self.record.query_params = parse_query_string(query);
            }
        }
        self.record
    }
}
