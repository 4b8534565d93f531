use std::str::FromStr;

use axum::{
    Json,
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use utils::response::ApiResponse;
use workflow::{Actor, ActorRole};

pub const ROLE_HEADER: &str = "x-trackflow-role";

/// Role named by the caller. Missing or blank headers mean a plain member.
fn role_from_headers(headers: &HeaderMap) -> Result<ActorRole, String> {
    let Some(value) = headers.get(ROLE_HEADER) else {
        return Ok(ActorRole::default());
    };
    let raw = value
        .to_str()
        .map_err(|_| format!("{ROLE_HEADER} must be ASCII"))?
        .trim();
    if raw.is_empty() {
        return Ok(ActorRole::default());
    }
    ActorRole::from_str(raw).map_err(|_| format!("Unknown role '{raw}' in {ROLE_HEADER}"))
}

/// Attaches the asserted [`Actor`] to the request so handlers can take it as an
/// extension. Identity is not verified.
pub async fn resolve_actor(mut req: Request, next: Next) -> Response {
    match role_from_headers(req.headers()) {
        Ok(role) => {
            req.extensions_mut().insert(Actor { role });
            next.run(req).await
        }
        Err(message) => {
            tracing::warn!(
                path = %req.uri().path(),
                method = %req.method(),
                "Rejected request with invalid role header"
            );
            let response = ApiResponse::<()>::error(&message);
            (StatusCode::BAD_REQUEST, Json(response)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn missing_header_defaults_to_member() {
        assert_eq!(role_from_headers(&HeaderMap::new()), Ok(ActorRole::Member));
    }

    #[test]
    fn header_is_parsed_case_insensitively() {
        let mut headers = HeaderMap::new();
        headers.insert(ROLE_HEADER, HeaderValue::from_static(" Admin "));
        assert_eq!(role_from_headers(&headers), Ok(ActorRole::Admin));
    }

    #[test]
    fn unknown_role_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(ROLE_HEADER, HeaderValue::from_static("producer"));
        assert!(role_from_headers(&headers).is_err());
    }
}
