use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::debug;

/// Per-request admin flag, set from the bearer token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdminAuth {
    pub is_admin: bool,
}

/// Admin authentication middleware
///
/// Compares the Authorization header against the configured admin token and
/// records the outcome in request extensions. Requests without a valid token
/// continue as public requests.
pub async fn admin_auth_middleware(
    admin_token: Option<Arc<String>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let is_admin = is_admin_request(&request, admin_token.as_deref().map(String::as_str));
    if is_admin {
        debug!("Admin request");
    }
    request.extensions_mut().insert(AdminAuth { is_admin });

    next.run(request).await
}

/// True when the request carries the admin token, with or without the
/// "Bearer " prefix. Always false when no token is configured.
fn is_admin_request(request: &Request<Body>, admin_token: Option<&str>) -> bool {
    let Some(expected) = admin_token else {
        return false;
    };
    let Some(header) = request
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok())
    else {
        return false;
    };

    let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
    !token.is_empty() && bool::from(token.as_bytes().ct_eq(expected.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder();
        if let Some(auth) = auth {
            builder = builder.header("authorization", auth);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn bearer_token_grants_admin() {
        assert!(is_admin_request(&request(Some("Bearer s3cret")), Some("s3cret")));
        assert!(is_admin_request(&request(Some("s3cret")), Some("s3cret")));
    }

    #[test]
    fn wrong_or_missing_token_is_public() {
        assert!(!is_admin_request(&request(Some("Bearer nope")), Some("s3cret")));
        assert!(!is_admin_request(&request(None), Some("s3cret")));
        assert!(!is_admin_request(&request(Some("Bearer s3cre")), Some("s3cret")));
        assert!(!is_admin_request(&request(Some("Bearer s3cretX")), Some("s3cret")));
    }

    #[test]
    fn unset_token_disables_admin() {
        assert!(!is_admin_request(&request(Some("Bearer ")), None));
        assert!(!is_admin_request(&request(Some("Bearer anything")), None));
    }
}
