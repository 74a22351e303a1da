// SPDX-License-Identifier: Apache-2.0

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::AppState;

const ALLOW_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS";
const ALLOW_HEADERS: &str = "authorization,content-type,x-request-id";

fn allowed_origin(headers: &HeaderMap, allowed: &[String]) -> Option<HeaderValue> {
    let origin = headers
        .get("origin")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty() && v.len() <= 256)?;
    if allowed.iter().any(|x| x == origin) {
        HeaderValue::from_str(origin).ok()
    } else {
        None
    }
}

pub(crate) async fn cors_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let origin = allowed_origin(req.headers(), &state.config.cors_allowed_origins);
    if req.method() == Method::OPTIONS {
        let mut resp = StatusCode::NO_CONTENT.into_response();
        if let Some(origin) = origin {
            let headers = resp.headers_mut();
            headers.insert("access-control-allow-origin", origin);
            headers.insert(
                "access-control-allow-methods",
                HeaderValue::from_static(ALLOW_METHODS),
            );
            headers.insert(
                "access-control-allow-headers",
                HeaderValue::from_static(ALLOW_HEADERS),
            );
        }
        return resp;
    }

    let mut resp = next.run(req).await;
    if let Some(origin) = origin {
        resp.headers_mut()
            .insert("access-control-allow-origin", origin);
        resp.headers_mut()
            .insert("vary", HeaderValue::from_static("origin"));
    }
    resp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_listed_origins_are_echoed() {
        let allowed = vec!["https://clinic.example".to_string()];
        let mut headers = HeaderMap::new();
        assert!(allowed_origin(&headers, &allowed).is_none());
        headers.insert("origin", HeaderValue::from_static("https://evil.example"));
        assert!(allowed_origin(&headers, &allowed).is_none());
        headers.insert("origin", HeaderValue::from_static("https://clinic.example"));
        assert_eq!(
            allowed_origin(&headers, &allowed),
            Some(HeaderValue::from_static("https://clinic.example"))
        );
        assert!(allowed_origin(&headers, &[]).is_none());
    }
}
