// SPDX-License-Identifier: Apache-2.0

use clinic_booking_api::{openapi_v1_spec, API_ERROR_CODES};
use serde_json::Value;

#[test]
fn openapi_schema_lint_rules_hold() {
    let spec = openapi_v1_spec();
    assert_eq!(spec["openapi"], "3.0.3");
    assert_eq!(spec["info"]["version"], "v1");

    let api_error = &spec["components"]["schemas"]["ApiError"];
    assert_eq!(api_error["type"], "object");
    assert_eq!(api_error["additionalProperties"], Value::Bool(false));
    let required = api_error["required"]
        .as_array()
        .expect("ApiError.required array")
        .iter()
        .map(|v| v.as_str().expect("required string"))
        .collect::<Vec<_>>();
    assert_eq!(required, vec!["code", "message", "details", "request_id"]);

    let codes = api_error["properties"]["code"]["enum"]
        .as_array()
        .expect("code enum");
    assert_eq!(codes.len(), API_ERROR_CODES.len());
}

#[test]
fn every_schema_reference_resolves() {
    let spec = openapi_v1_spec();
    let schemas = spec["components"]["schemas"]
        .as_object()
        .expect("schemas");
    let mut refs = Vec::new();
    collect_refs(&spec, &mut refs);
    assert!(!refs.is_empty());
    for r in refs {
        let name = r
            .strip_prefix("#/components/schemas/")
            .expect("local schema ref");
        assert!(schemas.contains_key(name), "dangling ref {r}");
    }
}

#[test]
fn secured_operations_document_unauthorized() {
    let spec = openapi_v1_spec();
    for (path, item) in spec["paths"].as_object().expect("paths") {
        for (method, op) in item.as_object().expect("path item") {
            if op.get("security").is_some() {
                assert!(
                    op["responses"].get("401").is_some(),
                    "{method} {path} is secured but has no 401"
                );
            }
            if path.starts_with("/api/admin/") {
                assert!(
                    op["responses"].get("403").is_some(),
                    "{method} {path} lacks 403"
                );
            }
        }
    }
}

fn collect_refs(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                if k == "$ref" {
                    if let Some(s) = v.as_str() {
                        out.push(s.to_string());
                    }
                } else {
                    collect_refs(v, out);
                }
            }
        }
        Value::Array(items) => items.iter().for_each(|v| collect_refs(v, out)),
        _ => {}
    }
}
