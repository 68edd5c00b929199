//! Request gatekeeper.
//!
//! Single entry point in front of the whole router: classifies the route,
//! applies the fixed-window rate budget for `/api/*`, redirects admin pages
//! without a session cookie, and stamps security headers on everything that
//! gets forwarded. Rejections short-circuit before routing.

use crate::auth::ADMIN_TOKEN_COOKIE;
use crate::middleware::rate_limit::RateLimiter;
use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use std::time::Duration;
use tracing::warn;

/// One row of the route-classification table.
pub struct RoutePolicy {
    pub prefix: &'static str,
    pub max_requests: u32,
    pub window: Duration,
    pub message: &'static str,
}

/// Rate budgets for API routes, most specific prefix first.
pub const API_POLICIES: [RoutePolicy; 3] = [
    RoutePolicy {
        prefix: "/api/admin/login",
        max_requests: 5,
        window: Duration::from_secs(15 * 60),
        message: "Too many login attempts. Please try again later.",
    },
    RoutePolicy {
        prefix: "/api/applications",
        max_requests: 10,
        window: Duration::from_secs(60 * 60),
        message: "Too many application submissions. Please try again later.",
    },
    RoutePolicy {
        prefix: "/api/",
        max_requests: 100,
        window: Duration::from_secs(15 * 60),
        message: "Too many requests. Please try again later.",
    },
];

fn match_policy(path: &str) -> Option<&'static RoutePolicy> {
    API_POLICIES.iter().find(|p| path.starts_with(p.prefix))
}

/// Best available client identity. Forwarding headers are spoofable unless
/// a trusted proxy sanitizes them; requests with neither header all share
/// the "unknown" bucket.
fn client_id(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .or_else(|| headers.get("x-real-ip"))
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Gatekeeper state shared across requests.
#[derive(Clone)]
pub struct Gatekeeper {
    pub limiter: RateLimiter,
}

impl Gatekeeper {
    pub fn new(limiter: RateLimiter) -> Self {
        Self { limiter }
    }
}

/// Gatekeeper middleware, layered around the entire router.
pub async fn gatekeeper_middleware(
    State(gate): State<Gatekeeper>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let client = client_id(request.headers());

    // Rate limiting for API routes. The counter key is the full path so
    // distinct routes under one prefix keep separate budgets.
    if let Some(policy) = match_policy(&path) {
        if !gate
            .limiter
            .allow(&client, &path, policy.max_requests, policy.window)
        {
            warn!(client = %client, path = %path, "Rate limit exceeded");
            return (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({ "error": policy.message })),
            )
                .into_response();
        }
    }

    // Coarse early gate for admin pages: cookie presence only. The
    // authoritative verification lives in the admin auth middleware.
    if path.starts_with("/admin") && !path.starts_with("/admin/login") {
        let jar = CookieJar::from_headers(request.headers());
        if jar.get(ADMIN_TOKEN_COOKIE).is_none() {
            return Redirect::temporary("/admin/login").into_response();
        }
    }

    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::X_XSS_PROTECTION,
        HeaderValue::from_static("1; mode=block"),
    );
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Router};
    use tower::ServiceExt;

    #[test]
    fn test_most_specific_prefix_wins() {
        let login = match_policy("/api/admin/login").unwrap();
        assert_eq!(login.max_requests, 5);
        assert_eq!(login.window, Duration::from_secs(15 * 60));

        let applications = match_policy("/api/applications").unwrap();
        assert_eq!(applications.max_requests, 10);
        assert_eq!(applications.window, Duration::from_secs(60 * 60));

        let general = match_policy("/api/jobs").unwrap();
        assert_eq!(general.max_requests, 100);

        // Admin API routes other than login fall under the general budget.
        let admin_jobs = match_policy("/api/admin/jobs").unwrap();
        assert_eq!(admin_jobs.max_requests, 100);

        assert!(match_policy("/admin/dashboard").is_none());
        assert!(match_policy("/").is_none());
    }

    #[test]
    fn test_client_id_header_fallbacks() {
        let mut headers = HeaderMap::new();
        assert_eq!(client_id(&headers), "unknown");

        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));
        assert_eq!(client_id(&headers), "10.0.0.2");

        // Forwarded-for takes precedence over real-ip.
        headers.insert("x-forwarded-for", HeaderValue::from_static("1.2.3.4"));
        assert_eq!(client_id(&headers), "1.2.3.4");
    }

    fn test_app() -> Router {
        let gate = Gatekeeper::new(RateLimiter::new());
        Router::new()
            .route("/api/jobs", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn_with_state(
                gate,
                gatekeeper_middleware,
            ))
    }

    fn get_request(path: &str, client: &str) -> Request<Body> {
        Request::builder()
            .uri(path)
            .header("x-forwarded-for", client)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_forwarded_response_carries_security_headers() {
        let app = test_app();
        let response = app
            .oneshot(get_request("/api/jobs", "1.2.3.4"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["x-frame-options"], "DENY");
        assert_eq!(headers["x-xss-protection"], "1; mode=block");
        assert_eq!(headers["referrer-policy"], "strict-origin-when-cross-origin");
    }

    #[tokio::test]
    async fn test_rate_limit_rejection_short_circuits() {
        let app = test_app();

        for _ in 0..100 {
            let response = app
                .clone()
                .oneshot(get_request("/api/jobs", "1.2.3.4"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .clone()
            .oneshot(get_request("/api/jobs", "1.2.3.4"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        // Rejections are terminal and skip the header-stamping path.
        assert!(response.headers().get("x-frame-options").is_none());

        // Another client is unaffected.
        let response = app
            .oneshot(get_request("/api/jobs", "5.6.7.8"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_admin_page_without_cookie_redirects() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(get_request("/admin/jobs", "1.2.3.4"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()["location"], "/admin/login");

        // The login page itself is never redirected.
        let response = app
            .oneshot(get_request("/admin/login", "1.2.3.4"))
            .await
            .unwrap();
        assert_ne!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    }

    #[tokio::test]
    async fn test_admin_page_with_cookie_is_forwarded() {
        let app = test_app();

        // Presence check only: any cookie value gets past the coarse gate.
        let request = Request::builder()
            .uri("/admin/jobs")
            .header("cookie", "admin_token=whatever")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_ne!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    }
}
