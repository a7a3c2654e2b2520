use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use serde_json::{Map, Value};

use crate::config;
use crate::error::{ApiError, FieldError};

/// One declarative field constraint. `check` receives the present value and
/// returns the normalized value on success, `None` on failure.
pub struct Rule {
    pub field: &'static str,
    pub required: bool,
    pub message: &'static str,
    pub check: fn(&Value) -> Option<Value>,
}

/// Whether `required` rules are enforced. On updates every field is optional;
/// a present field is still held to its constraint.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum RuleMode {
    Create,
    Update,
}

/// Rule set for design write bodies, evaluated in order.
const DESIGN_RULES: &[Rule] = &[
    Rule {
        field: "title",
        required: true,
        message: "Title required",
        check: check_title,
    },
    Rule {
        field: "canvasData",
        required: true,
        message: "Canvas data must be an object",
        check: check_canvas_data,
    },
    Rule {
        field: "thumbnail",
        required: false,
        message: "Thumbnail must be a string",
        check: check_thumbnail,
    },
];

fn check_title(value: &Value) -> Option<Value> {
    let trimmed = value.as_str()?.trim();
    if trimmed.is_empty() || trimmed.chars().count() > 100 {
        return None;
    }
    Some(Value::String(trimmed.to_string()))
}

fn check_canvas_data(value: &Value) -> Option<Value> {
    value.is_object().then(|| value.clone())
}

fn check_thumbnail(value: &Value) -> Option<Value> {
    value.as_str().map(|s| Value::String(s.to_string()))
}

/// Validation middleware for POST /api/designs
pub async fn validate_design_create(request: Request, next: Next) -> Result<Response, ApiError> {
    apply_rules(request, next, RuleMode::Create).await
}

/// Validation middleware for PUT /api/designs/:id
pub async fn validate_design_update(request: Request, next: Next) -> Result<Response, ApiError> {
    apply_rules(request, next, RuleMode::Update).await
}

/// Buffer the body, evaluate the rule set, and forward the normalized body to
/// the handler. Any rule failure short-circuits with the 400 envelope.
async fn apply_rules(request: Request, next: Next, mode: RuleMode) -> Result<Response, ApiError> {
    let limit = config::config().server.max_request_size_bytes;
    let (mut parts, body) = request.into_parts();

    let bytes = to_bytes(body, limit)
        .await
        .map_err(|_| ApiError::bad_request("Request body too large"))?;
    let value: Value = serde_json::from_slice(&bytes)
        .map_err(|_| ApiError::bad_request("Invalid JSON body"))?;

    let normalized = run_rules(DESIGN_RULES, value, mode)?;

    let bytes = serde_json::to_vec(&normalized).map_err(|_| ApiError::internal())?;
    parts.headers.remove(header::CONTENT_LENGTH);
    parts
        .headers
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

fn run_rules(rules: &[Rule], body: Value, mode: RuleMode) -> Result<Value, ApiError> {
    // A non-object body has no fields; required rules report it as missing
    let mut normalized = match body {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    let mut errors = Vec::new();

    for rule in rules {
        // JSON null counts as absent, matching how clients omit fields
        let current = normalized.get(rule.field).filter(|v| !v.is_null()).cloned();
        match current {
            None => {
                if rule.required && mode == RuleMode::Create {
                    errors.push(FieldError {
                        field: rule.field.to_string(),
                        message: rule.message.to_string(),
                    });
                }
            }
            Some(value) => match (rule.check)(&value) {
                Some(checked) => {
                    normalized.insert(rule.field.to_string(), checked);
                }
                None => errors.push(FieldError {
                    field: rule.field.to_string(),
                    message: rule.message.to_string(),
                }),
            },
        }
    }

    if errors.is_empty() {
        Ok(Value::Object(normalized))
    } else {
        Err(ApiError::validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(body: Value, mode: RuleMode) -> Result<Value, ApiError> {
        run_rules(DESIGN_RULES, body, mode)
    }

    fn failed_fields(err: ApiError) -> Vec<String> {
        match err {
            ApiError::Validation(errors) => errors.into_iter().map(|e| e.field).collect(),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn valid_create_body_passes_with_trimmed_title() {
        let body = json!({ "title": "  My Design  ", "canvasData": { "shapes": [] } });
        let normalized = run(body, RuleMode::Create).unwrap();
        assert_eq!(normalized["title"], json!("My Design"));
        assert_eq!(normalized["canvasData"], json!({ "shapes": [] }));
    }

    #[test]
    fn create_reports_all_missing_fields_in_rule_order() {
        let err = run(json!({}), RuleMode::Create).unwrap_err();
        assert_eq!(failed_fields(err), vec!["title", "canvasData"]);
    }

    #[test]
    fn whitespace_only_title_fails() {
        let body = json!({ "title": "   ", "canvasData": {} });
        let err = run(body, RuleMode::Create).unwrap_err();
        assert_eq!(failed_fields(err), vec!["title"]);
    }

    #[test]
    fn title_over_100_chars_fails() {
        let body = json!({ "title": "x".repeat(101), "canvasData": {} });
        let err = run(body, RuleMode::Create).unwrap_err();
        assert_eq!(failed_fields(err), vec!["title"]);

        let body = json!({ "title": "x".repeat(100), "canvasData": {} });
        assert!(run(body, RuleMode::Create).is_ok());
    }

    #[test]
    fn primitive_canvas_data_fails() {
        let body = json!({ "title": "ok", "canvasData": "not an object" });
        let err = run(body, RuleMode::Create).unwrap_err();
        assert_eq!(failed_fields(err), vec!["canvasData"]);
    }

    #[test]
    fn update_allows_absent_fields() {
        assert!(run(json!({}), RuleMode::Update).is_ok());
        assert!(run(json!({ "title": "renamed" }), RuleMode::Update).is_ok());
    }

    #[test]
    fn update_still_enforces_present_fields() {
        let err = run(json!({ "title": "" }), RuleMode::Update).unwrap_err();
        assert_eq!(failed_fields(err), vec!["title"]);

        let err = run(json!({ "canvasData": 7 }), RuleMode::Update).unwrap_err();
        assert_eq!(failed_fields(err), vec!["canvasData"]);
    }

    #[test]
    fn non_object_body_is_all_missing() {
        let err = run(json!([1, 2, 3]), RuleMode::Create).unwrap_err();
        assert_eq!(failed_fields(err), vec!["title", "canvasData"]);
    }
}
