// SPDX-License-Identifier: Apache-2.0

use serde_json::{json, Value};

use crate::{API_ERROR_CODES, API_ERROR_SCHEMA_REF};

fn error(description: &str) -> Value {
    json!({
        "description": description,
        "content": {"application/json": {"schema": {"$ref": API_ERROR_SCHEMA_REF}}}
    })
}

fn id_param(description: &str) -> Value {
    json!({"name": "id", "in": "path", "required": true, "description": description,
           "schema": {"type": "integer", "minimum": 1}})
}

fn query_param(name: &str, required: bool, schema: Value) -> Value {
    json!({"name": name, "in": "query", "required": required, "schema": schema})
}

fn body(schema_ref: &str) -> Value {
    json!({"required": true, "content": {"application/json": {"schema": {"$ref": schema_ref}}}})
}

#[must_use]
pub fn openapi_v1_spec() -> Value {
    let codes: Vec<&str> = API_ERROR_CODES.iter().map(|c| c.as_str()).collect();
    let bearer = json!([{"bearerAuth": []}]);
    let admin_denied = error("administrator role required");
    let unauthorized = error("missing or invalid bearer token");
    json!({
      "openapi": "3.0.3",
      "info": {"title": "clinic-booking API", "version": "v1"},
      "paths": {
        "/api/health": {"get": {"responses": {"200": {"description": "service is up"}}}},
        "/api/openapi.json": {"get": {"responses": {"200": {"description": "this document"}}}},
        "/api/auth/register": {
          "post": {
            "requestBody": body("#/components/schemas/RegisterRequest"),
            "responses": {
              "201": {"description": "patient account created"},
              "400": error("invalid registration field"),
              "409": error("username or email already registered")
            }
          }
        },
        "/api/auth/login": {
          "post": {
            "requestBody": body("#/components/schemas/LoginRequest"),
            "responses": {
              "200": {"description": "bearer token and account"},
              "401": error("invalid credentials")
            }
          }
        },
        "/api/appointments": {
          "post": {
            "security": bearer,
            "requestBody": body("#/components/schemas/CreateBookingRequest"),
            "responses": {
              "201": {"description": "appointment booked"},
              "400": error("incomplete selection or malformed field"),
              "401": unauthorized,
              "403": error("administrators cannot book"),
              "404": error("doctor not found"),
              "409": error("slot already booked")
            }
          }
        },
        "/api/appointments/user": {
          "get": {
            "security": bearer,
            "responses": {"200": {"description": "caller's appointments, newest first"}, "401": unauthorized}
          }
        },
        "/api/appointments/availability": {
          "get": {
            "security": bearer,
            "parameters": [
              query_param("doctor_id", true, json!({"type": "integer", "minimum": 1})),
              query_param("date", true, json!({"type": "string", "format": "date"})),
              query_param("time", true, json!({"type": "string", "pattern": "^[0-2][0-9]:[0-5][0-9]$"}))
            ],
            "responses": {"200": {"description": "availability flag"}, "400": error("invalid query"), "401": unauthorized}
          }
        },
        "/api/appointments/slots": {
          "get": {
            "security": bearer,
            "parameters": [
              query_param("doctor_id", true, json!({"type": "integer", "minimum": 1})),
              query_param("date", true, json!({"type": "string", "format": "date"}))
            ],
            "responses": {"200": {"description": "slot grid with occupancy"}, "400": error("invalid query"), "401": unauthorized}
          }
        },
        "/api/appointments/calendar": {
          "get": {
            "security": bearer,
            "parameters": [
              query_param("year", false, json!({"type": "integer"})),
              query_param("month", false, json!({"type": "integer", "minimum": 1, "maximum": 12}))
            ],
            "responses": {"200": {"description": "month calendar with previous/next month links"}, "400": error("invalid month"), "401": unauthorized}
          }
        },
        "/api/appointments/{id}/cancel": {
          "post": {
            "security": bearer,
            "parameters": [id_param("appointment id")],
            "responses": {
              "200": {"description": "appointment cancelled"},
              "401": unauthorized,
              "404": error("appointment not found"),
              "409": error("appointment is not scheduled")
            }
          }
        },
        "/api/doctors": {"get": {"responses": {"200": {"description": "active doctors ordered by name"}}}},
        "/api/doctors/{id}": {
          "get": {
            "parameters": [id_param("doctor id")],
            "responses": {"200": {"description": "doctor"}, "404": error("doctor not found")}
          }
        },
        "/api/admin/doctors": {
          "get": {
            "security": bearer,
            "responses": {"200": {"description": "all doctors including inactive"}, "401": unauthorized, "403": admin_denied}
          },
          "post": {
            "security": bearer,
            "requestBody": body("#/components/schemas/DoctorDraft"),
            "responses": {"201": {"description": "doctor created"}, "400": error("invalid doctor"), "401": unauthorized, "403": admin_denied}
          }
        },
        "/api/admin/doctors/{id}": {
          "put": {
            "security": bearer,
            "parameters": [id_param("doctor id")],
            "requestBody": body("#/components/schemas/DoctorDraft"),
            "responses": {"200": {"description": "doctor updated"}, "400": error("invalid doctor"), "401": unauthorized, "403": admin_denied, "404": error("doctor not found")}
          },
          "delete": {
            "security": bearer,
            "parameters": [id_param("doctor id")],
            "responses": {"200": {"description": "deleted or deactivated"}, "401": unauthorized, "403": admin_denied, "404": error("doctor not found")}
          }
        },
        "/api/admin/users": {
          "get": {
            "security": bearer,
            "responses": {"200": {"description": "accounts, newest first"}, "401": unauthorized, "403": admin_denied}
          }
        },
        "/api/admin/users/{id}": {
          "delete": {
            "security": bearer,
            "parameters": [id_param("account id")],
            "responses": {"200": {"description": "account and its appointments deleted"}, "400": error("cannot delete own account"), "401": unauthorized, "403": admin_denied, "404": error("account not found")}
          }
        },
        "/api/admin/users/{id}/role": {
          "put": {
            "security": bearer,
            "parameters": [id_param("account id")],
            "requestBody": body("#/components/schemas/RoleUpdate"),
            "responses": {"200": {"description": "role updated"}, "400": error("unknown role"), "401": unauthorized, "403": admin_denied, "404": error("account not found")}
          }
        },
        "/api/admin/appointments/{id}/status": {
          "put": {
            "security": bearer,
            "parameters": [id_param("appointment id")],
            "requestBody": body("#/components/schemas/StatusUpdate"),
            "responses": {"200": {"description": "status updated"}, "400": error("unknown status"), "401": unauthorized, "403": admin_denied, "404": error("appointment not found"), "409": error("transition not allowed")}
          }
        }
      },
      "components": {
        "securitySchemes": {"bearerAuth": {"type": "http", "scheme": "bearer"}},
        "schemas": {
          "ApiError": {
            "type": "object",
            "additionalProperties": false,
            "required": ["code", "message", "details", "request_id"],
            "properties": {
              "code": {"type": "string", "enum": codes},
              "message": {"type": "string"},
              "details": {"type": "object"},
              "request_id": {"type": "string"}
            }
          },
          "CreateBookingRequest": {
            "type": "object",
            "properties": {
              "doctor_id": {"type": "integer", "minimum": 1},
              "appointment_date": {"type": "string", "format": "date"},
              "appointment_time": {"type": "string", "example": "09:30"}
            }
          },
          "DoctorDraft": {
            "type": "object",
            "required": ["full_name", "specialization"],
            "properties": {
              "full_name": {"type": "string"},
              "specialization": {"type": "string"},
              "phone": {"type": "string", "nullable": true},
              "email": {"type": "string", "nullable": true},
              "is_active": {"type": "boolean"}
            }
          },
          "LoginRequest": {
            "type": "object",
            "required": ["username", "password"],
            "properties": {"username": {"type": "string"}, "password": {"type": "string"}}
          },
          "RegisterRequest": {
            "type": "object",
            "required": ["username", "email", "password", "full_name", "birth_date", "phone"],
            "properties": {
              "username": {"type": "string", "minLength": 3, "maxLength": 32},
              "email": {"type": "string"},
              "password": {"type": "string", "minLength": 6},
              "full_name": {"type": "string"},
              "birth_date": {"type": "string", "format": "date"},
              "phone": {"type": "string"}
            }
          },
          "RoleUpdate": {
            "type": "object",
            "required": ["role"],
            "properties": {"role": {"type": "string", "enum": ["patient", "admin"]}}
          },
          "StatusUpdate": {
            "type": "object",
            "required": ["status"],
            "properties": {"status": {"type": "string", "enum": ["scheduled", "cancelled", "completed"]}}
          }
        }
      }
    })
}
