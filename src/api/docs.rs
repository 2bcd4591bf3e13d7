// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OpenAPI document and interactive docs page

use axum::{response::Html, Json};
use serde_json::{json, Value};

use crate::version::{API_DESCRIPTION, API_TITLE, VERSION_NUMBER};

const DOCS_HTML: &str = r##"<!DOCTYPE html>
<html>
<head>
  <title>ID Card OCR API - Docs</title>
  <meta charset="utf-8">
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    SwaggerUIBundle({ url: "/openapi.json", dom_id: "#swagger-ui" });
  </script>
</body>
</html>
"##;

fn error_schema_ref() -> Value {
    json!({
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

/// OpenAPI 3 description of every route
pub fn openapi_document() -> Value {
    let mut bad_request = error_schema_ref();
    bad_request["description"] = json!("No file, non-image content type, or empty file");
    let mut too_large = error_schema_ref();
    too_large["description"] = json!("Upload exceeds the size limit");
    let mut internal = error_schema_ref();
    internal["description"] = json!("Image could not be processed");

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": API_TITLE,
            "description": API_DESCRIPTION,
            "version": VERSION_NUMBER
        },
        "paths": {
            "/": {
                "get": {
                    "summary": "API information",
                    "responses": { "200": { "description": "Service banner and endpoint index" } }
                }
            },
            "/health": {
                "get": {
                    "summary": "Health check",
                    "responses": { "200": { "description": "Service is up" } }
                }
            },
            "/ocrfromidcard": {
                "post": {
                    "summary": "Extract information from an uploaded ID card image",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "multipart/form-data": {
                                "schema": {
                                    "type": "object",
                                    "required": ["file"],
                                    "properties": {
                                        "file": { "type": "string", "format": "binary" }
                                    }
                                }
                            }
                        }
                    },
                    "responses": {
                        "200": {
                            "description": "Extracted fields",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/ExtractionResult" }
                                }
                            }
                        },
                        "400": bad_request,
                        "413": too_large,
                        "500": internal
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "IdCardInfo": {
                    "type": "object",
                    "properties": {
                        "first_name": { "type": "string", "nullable": true },
                        "last_name": { "type": "string", "nullable": true },
                        "father_name": { "type": "string", "nullable": true },
                        "national_id": { "type": "string", "nullable": true },
                        "birth_date": { "type": "string", "nullable": true },
                        "birth_place": { "type": "string", "nullable": true },
                        "certificate_number": { "type": "string", "nullable": true },
                        "national_id_valid": { "type": "boolean" }
                    }
                },
                "ExtractionResult": {
                    "type": "object",
                    "properties": {
                        "success": { "type": "boolean" },
                        "raw_text": { "type": "string" },
                        "extracted_info": { "$ref": "#/components/schemas/IdCardInfo" }
                    }
                },
                "ErrorResponse": {
                    "type": "object",
                    "properties": {
                        "detail": { "type": "string" }
                    }
                }
            }
        }
    })
}

/// GET /openapi.json
pub async fn openapi_handler() -> Json<Value> {
    Json(openapi_document())
}

/// GET /docs
pub async fn docs_handler() -> Html<&'static str> {
    Html(DOCS_HTML)
}
