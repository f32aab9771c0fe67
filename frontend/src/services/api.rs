//! HTTP calls to the processing backend.

use gloo_net::http::Request;
use serde::Serialize;
use serde_json::Value;

use crate::config::{PROCESS_ENDPOINT, PROGRESS_ENDPOINT};
use crate::types::{AppError, AppResult, PollSnapshot, RowRecord};

/// Submit body, `{ "columnData": [...] }` on the wire.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitPayload<'a> {
    column_data: &'a [RowRecord],
}

/// Post the extracted rows to the processing endpoint.
///
/// The backend acknowledges with an arbitrary JSON body; only a
/// non-null `error` field fails the submission, any other shape is
/// success.
pub async fn submit_rows(rows: &[RowRecord]) -> AppResult<()> {
    let request = Request::post(PROCESS_ENDPOINT)
        .json(&SubmitPayload { column_data: rows })
        .map_err(|e| AppError::Network(e.to_string()))?;

    let response = request
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;

    if !response.ok() {
        let detail = response
            .text()
            .await
            .unwrap_or_else(|_| "resposta vazia".to_string());
        return Err(AppError::Server(format!("HTTP {}: {}", response.status(), detail)));
    }

    let body: Value = response
        .json()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;

    match response_error(&body) {
        Some(error) => Err(AppError::Server(error)),
        None => Ok(()),
    }
}

/// Fetch the current processing snapshot.
pub async fn fetch_progress() -> AppResult<PollSnapshot> {
    let response = Request::get(PROGRESS_ENDPOINT)
        .send()
        .await
        .map_err(|e| AppError::Poll(e.to_string()))?;

    if !response.ok() {
        return Err(AppError::Poll(format!("HTTP {}", response.status())));
    }

    response
        .json::<PollSnapshot>()
        .await
        .map_err(|e| AppError::Poll(e.to_string()))
}

/// Error reported inside an otherwise successful submit response.
fn response_error(body: &Value) -> Option<String> {
    match body.get("error") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_serializes_as_column_data() {
        let rows = vec![RowRecord {
            url: "http://a.com".into(),
            term: "foo".into(),
            sheet: Some("Sheet - 1".into()),
        }];
        let json = serde_json::to_value(SubmitPayload { column_data: &rows }).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "columnData": [
                    {"url": "http://a.com", "term": "foo", "sheet": "Sheet - 1"}
                ]
            })
        );
    }

    #[test]
    fn response_error_requires_a_non_null_error_field() {
        assert_eq!(response_error(&serde_json::json!({"message": "ok"})), None);
        assert_eq!(response_error(&serde_json::json!({"error": null})), None);
        assert_eq!(response_error(&serde_json::json!("ok")), None);
        assert_eq!(
            response_error(&serde_json::json!({"error": "sem navegador"})),
            Some("sem navegador".to_string())
        );
        // Non-string errors are stringified rather than dropped.
        assert_eq!(
            response_error(&serde_json::json!({"error": {"code": 7}})),
            Some(r#"{"code":7}"#.to_string())
        );
    }
}
