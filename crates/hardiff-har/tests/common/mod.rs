use serde_json::{json, Value};

/// A HAR entry with the given method, URL and optional bodies
#[allow(dead_code)]
pub fn entry(method: &str, url: &str, post: Option<&str>, response: Option<&str>) -> Value {
    let mut request = json!({
        "method": method,
        "url": url,
        "httpVersion": "HTTP/1.1",
        "headers": [{"name": "Accept", "value": "*/*"}],
        "queryString": [],
    });
    if let Some(text) = post {
        request["postData"] = json!({"mimeType": "application/json", "text": text});
    }
    let mut content = json!({"size": 0, "mimeType": "application/json"});
    if let Some(text) = response {
        content["text"] = json!(text);
    }
    json!({
        "startedDateTime": "2024-01-01T00:00:00.000Z",
        "request": request,
        "response": {
            "status": 200,
            "statusText": "OK",
            "headers": [{"name": "Content-Type", "value": "application/json"}],
            "content": content,
        },
    })
}

/// Wrap entries into a HAR document
#[allow(dead_code)]
pub fn har(entries: Vec<Value>) -> String {
    json!({
        "log": {
            "version": "1.2",
            "creator": {"name": "test", "version": "1"},
            "entries": entries,
        }
    })
    .to_string()
}
