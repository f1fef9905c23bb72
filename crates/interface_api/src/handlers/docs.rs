//! API documentation handlers

use axum::{response::Html, Json};
use serde_json::{json, Value};

const SWAGGER_UI: &str = r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Claims API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: "/docs/openapi.json", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;

/// Swagger UI page backed by [`openapi_spec`]
pub async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI)
}

/// OpenAPI 3 description of the service
pub async fn openapi_spec() -> Json<Value> {
    Json(openapi_document())
}

pub fn openapi_document() -> Value {
    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Claims API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "First Notice of Loss intake: submit, list and view insurance claims."
        },
        "paths": {
            "/health": {
                "get": {
                    "summary": "Liveness check",
                    "responses": { "200": { "description": "Service is up" } }
                }
            },
            "/health/ready": {
                "get": {
                    "summary": "Readiness check including the claims store",
                    "responses": {
                        "200": { "description": "Store reachable" },
                        "503": { "description": "Store unavailable" }
                    }
                }
            },
            "/claims": {
                "post": {
                    "summary": "Submit a claim",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/ClaimSubmission" }
                            }
                        }
                    },
                    "responses": {
                        "201": {
                            "description": "Claim created",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/ClaimDetail" }
                                }
                            }
                        },
                        "400": {
                            "description": "Validation failed",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/ValidationError" }
                                }
                            }
                        }
                    }
                },
                "get": {
                    "summary": "List claims, newest first",
                    "parameters": [
                        { "name": "status", "in": "query", "schema": { "$ref": "#/components/schemas/ClaimStatus" } },
                        { "name": "lob", "in": "query", "schema": { "$ref": "#/components/schemas/Lob" } },
                        { "name": "assignedTo", "in": "query", "schema": { "type": "string" } },
                        { "name": "search", "in": "query", "schema": { "type": "string" },
                          "description": "Case-insensitive match on claim number, insured name or policy number" },
                        { "name": "page", "in": "query", "schema": { "type": "integer", "minimum": 1, "default": 1 } },
                        { "name": "pageSize", "in": "query",
                          "schema": { "type": "integer", "minimum": 5, "maximum": 50, "default": 20 } }
                    ],
                    "responses": {
                        "200": {
                            "description": "One page of claims",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/ClaimPage" }
                                }
                            }
                        }
                    }
                }
            },
            "/claims/{id}": {
                "get": {
                    "summary": "Get a claim with its events",
                    "parameters": [
                        { "name": "id", "in": "path", "required": true, "schema": { "type": "string", "format": "uuid" } }
                    ],
                    "responses": {
                        "200": {
                            "description": "The claim",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/ClaimDetail" }
                                }
                            }
                        },
                        "404": { "description": "No such claim" }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Lob": { "type": "string", "enum": ["Personal Auto", "Homeowners", "Commercial"] },
                "Priority": { "type": "string", "enum": ["LOW", "MEDIUM", "HIGH"] },
                "ClaimStatus": { "type": "string", "enum": ["SUBMITTED", "ASSIGNED", "IN_REVIEW", "CLOSED"] },
                "ClaimSubmission": {
                    "type": "object",
                    "required": ["lob", "policyNumber", "insuredName", "lossDate", "lossType",
                                 "description", "contactEmail", "priority"],
                    "properties": {
                        "lob": { "$ref": "#/components/schemas/Lob" },
                        "policyNumber": { "type": "string", "minLength": 3, "maxLength": 50 },
                        "insuredName": { "type": "string", "minLength": 2, "maxLength": 120 },
                        "lossDate": { "type": "string", "format": "date" },
                        "lossType": { "type": "string", "minLength": 2, "maxLength": 60 },
                        "description": { "type": "string", "minLength": 5, "maxLength": 2000 },
                        "contactEmail": { "type": "string", "format": "email" },
                        "priority": { "$ref": "#/components/schemas/Priority" }
                    }
                },
                "Claim": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "format": "uuid" },
                        "claimNumber": { "type": "string", "pattern": "^CLM-\\d{4}-\\d{6}$" },
                        "lob": { "$ref": "#/components/schemas/Lob" },
                        "policyNumber": { "type": "string" },
                        "insuredName": { "type": "string" },
                        "lossDate": { "type": "string", "format": "date" },
                        "lossType": { "type": "string" },
                        "description": { "type": "string" },
                        "contactEmail": { "type": "string" },
                        "priority": { "$ref": "#/components/schemas/Priority" },
                        "status": { "$ref": "#/components/schemas/ClaimStatus" },
                        "assignedTo": { "type": "string", "nullable": true },
                        "createdAt": { "type": "string", "format": "date-time" },
                        "updatedAt": { "type": "string", "format": "date-time" }
                    }
                },
                "ClaimEvent": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "format": "uuid" },
                        "claimId": { "type": "string", "format": "uuid" },
                        "type": { "type": "string", "enum": ["STATUS_CHANGED", "NOTE", "ASSIGNED"] },
                        "message": { "type": "string" },
                        "createdAt": { "type": "string", "format": "date-time" }
                    }
                },
                "ClaimDetail": {
                    "allOf": [
                        { "$ref": "#/components/schemas/Claim" },
                        {
                            "type": "object",
                            "properties": {
                                "events": { "type": "array", "items": { "$ref": "#/components/schemas/ClaimEvent" } }
                            }
                        }
                    ]
                },
                "ClaimPage": {
                    "type": "object",
                    "properties": {
                        "page": { "type": "integer" },
                        "pageSize": { "type": "integer" },
                        "total": { "type": "integer" },
                        "items": { "type": "array", "items": { "$ref": "#/components/schemas/Claim" } }
                    }
                },
                "ValidationError": {
                    "type": "object",
                    "properties": {
                        "error": { "type": "string", "enum": ["VALIDATION_ERROR"] },
                        "issues": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "path": { "type": "array", "items": { "type": "string" } },
                                    "message": { "type": "string" },
                                    "code": { "type": "string" }
                                }
                            }
                        }
                    }
                }
            }
        }
    })
}
