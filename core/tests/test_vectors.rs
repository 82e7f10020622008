//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use todo_sync::{
    HttpMethod, HttpResponse, RemoteTodoStore, SortDirection, SortField, SyncError, Todo,
    TodoQuery,
};

const BASE_URL: &str = "http://localhost:3000/todos";
const TOKEN: &str = "vector-token";

fn store() -> RemoteTodoStore {
    RemoteTodoStore::new(BASE_URL, TOKEN)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PATCH" => HttpMethod::Patch,
        other => panic!("unknown method: {other}"),
    }
}

/// Parse the query object from test vectors into `TodoQuery`.
fn parse_query(input: &serde_json::Value) -> TodoQuery {
    let sort_field = match input["sort_field"].as_str().unwrap() {
        "createdTime" => SortField::CreatedTime,
        "title" => SortField::Title,
        other => panic!("unknown sort field: {other}"),
    };
    let sort_direction = match input["sort_direction"].as_str().unwrap() {
        "asc" => SortDirection::Asc,
        "desc" => SortDirection::Desc,
        other => panic!("unknown sort direction: {other}"),
    };
    TodoQuery {
        sort_field,
        sort_direction,
        search: input["search"].as_str().unwrap_or_default().to_string(),
    }
}

fn expected_headers(expected_req: &serde_json::Value) -> Vec<(String, String)> {
    expected_req["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect()
}

fn simulated_response(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn expected_remote_error(expected: &serde_json::Value) -> SyncError {
    SyncError::Remote {
        status: expected["status"].as_u64().unwrap() as u16,
        message: expected["message"].as_str().unwrap().to_string(),
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let raw = include_str!("../../test-vectors/list.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let s = store();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let query = parse_query(&case["input"]);
        let expected_req = &case["expected_request"];

        // Verify build
        let req = s.build_list_todos(&query);
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.path, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: path");
        assert_eq!(req.headers, expected_headers(expected_req), "{name}: headers");
        assert!(req.body.is_none(), "{name}: body should be None");

        // Verify parse
        let result = s.parse_list_todos(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            assert_eq!(err, expected_remote_error(expected_error), "{name}: error");
        } else {
            let todos = result.unwrap();
            let expected: Vec<Todo> = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(todos, expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let raw = include_str!("../../test-vectors/create.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let s = store();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let title = case["input"]["title"].as_str().unwrap();

        // Validation failures never produce a request
        if let Some(expected_error) = case.get("expected_error") {
            let err = s.build_create_todo(title).unwrap_err();
            match expected_error.as_str().unwrap() {
                "EmptyTitle" => {
                    assert!(matches!(err, SyncError::EmptyTitle), "{name}: expected EmptyTitle")
                }
                other => panic!("{name}: unknown expected_error: {other}"),
            }
            continue;
        }

        let expected_req = &case["expected_request"];

        // Verify build
        let req = s.build_create_todo(title).unwrap();
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.path, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: path");
        assert_eq!(req.headers, expected_headers(expected_req), "{name}: headers");
        let req_body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(req_body, expected_req["body"], "{name}: body");

        // Verify parse
        let todo = s.parse_create_todo(simulated_response(case)).unwrap();
        let expected: Todo = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(todo, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let raw = include_str!("../../test-vectors/update.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let s = store();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: Todo = serde_json::from_value(case["input"].clone()).unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = s.build_update_todo(&input).unwrap();
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.path, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: path");
        assert_eq!(req.headers, expected_headers(expected_req), "{name}: headers");
        let req_body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(req_body, expected_req["body"], "{name}: body");

        // Verify parse
        let result = s.parse_update_todo(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            assert_eq!(err, expected_remote_error(expected_error), "{name}: error");
        } else {
            assert!(result.is_ok(), "{name}: expected success");
        }
    }
}
