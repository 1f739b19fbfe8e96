use axum::{
    extract::Request,
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue,
    },
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "igscout_session";

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// The browser's session key, stored as a request extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId(pub Uuid);

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is inserted into request
/// extensions as [`RequestId`] and echoed as the `x-request-id` response
/// header.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Axum middleware that attaches a [`SessionId`] to every request.
///
/// A valid `igscout_session` cookie is reused; otherwise a new `UUIDv4` is
/// issued and set on the response.
pub async fn session_cookie(mut req: Request, next: Next) -> Response {
    let existing = session_from_cookies(req.headers());
    let id = existing.unwrap_or_else(Uuid::new_v4);

    req.extensions_mut().insert(SessionId(id));

    let mut res = next.run(req).await;

    if existing.is_none() {
        let cookie = format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax");
        if let Ok(val) = HeaderValue::from_str(&cookie) {
            res.headers_mut().append(SET_COOKIE, val);
        }
    }

    res
}

fn session_from_cookies(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cookie: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static(cookie));
        headers
    }

    #[test]
    fn session_cookie_is_found_among_others() {
        let id = Uuid::parse_str("0f8fad5b-d9cb-469f-a165-70867728950e").unwrap();
        let headers = headers("theme=dark; igscout_session=0f8fad5b-d9cb-469f-a165-70867728950e");
        assert_eq!(session_from_cookies(&headers), Some(id));
    }

    #[test]
    fn malformed_session_cookie_is_ignored() {
        assert_eq!(session_from_cookies(&headers("igscout_session=nope")), None);
    }

    #[test]
    fn missing_cookie_header_yields_none() {
        assert_eq!(session_from_cookies(&HeaderMap::new()), None);
    }
}
