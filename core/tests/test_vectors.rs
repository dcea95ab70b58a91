//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results or errors. Comparing parsed JSON (not raw
//! strings) avoids false negatives from field-ordering differences.

use serde_json::Value;
use todolist_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, TodoApi, TodoId, TodoItem};

const BASE_URL: &str = "http://localhost:5000";

fn api() -> TodoApi {
    TodoApi::new(BASE_URL)
}

fn load(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");

    if let Some(headers) = expected.get("headers") {
        let expected_headers: Vec<(String, String)> = headers
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");
    }

    match expected.get("body") {
        Some(body) => {
            let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

/// Check a parse result against `expected_error` / `expected_message`.
/// Returns `true` when the case expected an error.
fn check_error<T: std::fmt::Debug>(name: &str, case: &Value, result: &Result<T, ApiError>) -> bool {
    let Some(expected_error) = case.get("expected_error") else {
        assert!(result.is_ok(), "{name}: expected success, got {result:?}");
        return false;
    };
    let err = result.as_ref().unwrap_err();
    match expected_error.as_str().unwrap() {
        "NotFound" => assert!(matches!(err, ApiError::NotFound { .. }), "{name}: expected NotFound"),
        "Http" => assert!(matches!(err, ApiError::Http { .. }), "{name}: expected Http"),
        other => panic!("{name}: unknown expected_error: {other}"),
    }
    assert_eq!(
        err.server_message(),
        case.get("expected_message").and_then(Value::as_str),
        "{name}: message"
    );
    true
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let a = api();
    for case in load(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();

        assert_request(name, &a.build_list_todos(), &case["expected_request"]);

        let result = a.parse_list_todos(simulated(&case));
        if !check_error(name, &case, &result) {
            let expected: Vec<TodoItem> = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let a = api();
    for case in load(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let text = case["input"].as_str().unwrap();

        let req = a.build_create_todo(text).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = a.parse_create_todo(simulated(&case));
        check_error(name, &case, &result);
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let a = api();
    for case in load(include_str!("../../test-vectors/update.json")) {
        let name = case["name"].as_str().unwrap();
        let id = TodoId::from(case["input_id"].as_str().unwrap());
        let text = case["input"].as_str().unwrap();

        let req = a.build_update_todo(&id, text).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = a.parse_update_todo(simulated(&case));
        check_error(name, &case, &result);
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let a = api();
    for case in load(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();
        let id = TodoId::from(case["input_id"].as_str().unwrap());

        assert_request(name, &a.build_delete_todo(&id), &case["expected_request"]);

        let result = a.parse_delete_todo(simulated(&case));
        check_error(name, &case, &result);
    }
}
