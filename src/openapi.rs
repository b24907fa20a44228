//! Minimal OpenAPI document model and endpoint extraction.
//!
//! The architect role answers with a small OpenAPI YAML document per user
//! story. Downstream jobs only care about one slice of it: which endpoints
//! exist and the JSON schemas of their request/response bodies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A minimal OpenAPI-shaped document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenApiDocument {
    /// OpenAPI version string (e.g. "3.1.0").
    pub openapi: String,
    /// Document metadata.
    pub info: ApiInfo,
    /// Path item objects keyed by path.
    #[serde(default)]
    pub paths: BTreeMap<String, Value>,
}

/// OpenAPI info block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiInfo {
    pub title: String,
    pub version: String,
}

/// One endpoint extracted from an API document: the data model handed to
/// the backend handler and UI component jobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEndpoint {
    /// Endpoint path (e.g. "/todos").
    pub path: String,
    /// Lowercased HTTP method (e.g. "get").
    pub method: String,
    /// Request body schema, when the endpoint accepts JSON input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Response schemas keyed by status code.
    pub responses: BTreeMap<String, ResponseSchema>,
}

/// Extracted request body schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestBody {
    /// Whether the body is required.
    #[serde(default)]
    pub required: bool,
    /// JSON schema properties of the body.
    pub properties: Value,
}

/// Extracted response schema for one status code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSchema {
    /// Response description, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON schema properties of the response body.
    pub properties: Value,
}

/// Extracts endpoint descriptors from an API document.
///
/// Only responses carrying an `application/json` schema count; an operation
/// with none is skipped entirely. An absent or non-JSON request body yields
/// `request_body: None`. Output order is deterministic (path, then method).
pub fn extract_endpoints(document: &OpenApiDocument) -> Vec<ApiEndpoint> {
    let mut endpoints = Vec::new();

    for (path, item) in &document.paths {
        let Some(operations) = item.as_object() else {
            continue;
        };

        for (method, operation) in operations {
            let mut responses = BTreeMap::new();
            for (status, response) in operation["responses"]
                .as_object()
                .into_iter()
                .flatten()
            {
                let schema = &response["content"]["application/json"]["schema"];
                if schema.is_object() {
                    responses.insert(
                        status.clone(),
                        ResponseSchema {
                            description: response["description"]
                                .as_str()
                                .map(str::to_string),
                            properties: schema["properties"].clone(),
                        },
                    );
                }
            }

            if responses.is_empty() {
                continue;
            }

            let body = &operation["requestBody"];
            let body_schema = &body["content"]["application/json"]["schema"];
            let request_body = body_schema.is_object().then(|| RequestBody {
                required: body["required"].as_bool().unwrap_or(false),
                properties: body_schema["properties"].clone(),
            });

            endpoints.push(ApiEndpoint {
                path: path.clone(),
                method: method.clone(),
                request_body,
                responses,
            });
        }
    }

    endpoints
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(paths: Value) -> OpenApiDocument {
        serde_json::from_value(json!({
            "openapi": "3.1.0",
            "info": { "title": "Test API", "version": "0.0.1" },
            "paths": paths,
        }))
        .unwrap()
    }

    #[test]
    fn extracts_endpoint_with_json_response() {
        let doc = document(json!({
            "/todos": {
                "get": {
                    "responses": {
                        "200": {
                            "description": "All todos",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": { "items": { "type": "array" } }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }));

        let endpoints = extract_endpoints(&doc);
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].path, "/todos");
        assert_eq!(endpoints[0].method, "get");
        assert!(endpoints[0].request_body.is_none());
        let response = &endpoints[0].responses["200"];
        assert_eq!(response.description.as_deref(), Some("All todos"));
        assert_eq!(response.properties["items"]["type"], "array");
    }

    #[test]
    fn skips_operations_without_json_schemas() {
        let doc = document(json!({
            "/health": {
                "get": {
                    "responses": {
                        "204": { "description": "No content" }
                    }
                }
            }
        }));
        assert!(extract_endpoints(&doc).is_empty());
    }

    #[test]
    fn extracts_request_body_with_required_flag() {
        let doc = document(json!({
            "/todos": {
                "post": {
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": {
                                    "properties": { "title": { "type": "string" } }
                                }
                            }
                        }
                    },
                    "responses": {
                        "201": {
                            "content": {
                                "application/json": {
                                    "schema": { "properties": { "id": { "type": "string" } } }
                                }
                            }
                        }
                    }
                }
            }
        }));

        let endpoints = extract_endpoints(&doc);
        let body = endpoints[0].request_body.as_ref().unwrap();
        assert!(body.required);
        assert_eq!(body.properties["title"]["type"], "string");
    }

    #[test]
    fn empty_paths_yield_no_endpoints() {
        let doc = document(json!({}));
        assert!(extract_endpoints(&doc).is_empty());
    }

    #[test]
    fn parses_from_yaml_answer() {
        let yaml = "openapi: 3.1.0\ninfo:\n  title: Minimal\n  version: 0.0.1\npaths: {}\n";
        let doc: OpenApiDocument = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(doc.info.title, "Minimal");
        assert!(extract_endpoints(&doc).is_empty());
    }

    #[test]
    fn output_order_is_deterministic() {
        let response = json!({
            "200": {
                "content": { "application/json": { "schema": { "properties": {} } } }
            }
        });
        let doc = document(json!({
            "/b": { "get": { "responses": response } },
            "/a": { "get": { "responses": response } },
        }));
        let endpoints = extract_endpoints(&doc);
        assert_eq!(endpoints[0].path, "/a");
        assert_eq!(endpoints[1].path, "/b");
    }
}
