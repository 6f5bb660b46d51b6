use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use cookie::Cookie;

/// Pull a candidate encoded token out of a request.
///
/// The configured header is consulted first, then the named cookie; the
/// first non-empty value wins and the other source is never read. The value
/// is the raw encoded token, with no `Bearer` prefix handling: issuance
/// writes the token into the header verbatim and extraction mirrors that.
///
/// Absence of both sources is `None`, not an error; the caller decides what
/// that means.
pub fn extract_credential(
    headers: &HeaderMap,
    auth_header: &str,
    cookie_name: Option<&str>,
) -> Option<String> {
    if let Some(value) = headers.get(auth_header).and_then(|v| v.to_str().ok()) {
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    let cookie_name = cookie_name?;
    for header in headers.get_all(COOKIE) {
        let Ok(raw) = header.to_str() else {
            continue;
        };
        for cookie in Cookie::split_parse(raw) {
            let Ok(cookie) = cookie else {
                continue;
            };
            if cookie.name() == cookie_name && !cookie.value().is_empty() {
                return Some(cookie.value().to_string());
            }
        }
    }

    None
}
