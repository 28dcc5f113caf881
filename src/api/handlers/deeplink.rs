//! Handler for deep-link resolution.
//!
//! Thin adapter at the transport boundary: extracts the session cookie and
//! the mount-relative path, invokes the resolution core, and translates the
//! terminal [`Decision`] into an HTTP response.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode, Uri,
    },
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::warn;

use crate::application::services::Resolution;
use crate::domain::Decision;
use crate::state::AppState;

/// Name of the cookie carrying the session identifier.
pub const SESSION_COOKIE: &str = "dl_session";

/// Template for the login page served on [`Decision::ServeLogin`].
///
/// Carries the original request URL so the user can retry the deep link
/// after signing in.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
struct LoginTemplate {
    original_url: String,
}

/// Resolves a deep-link request with a non-empty mount-relative path.
///
/// # Endpoint
///
/// `GET <mount>/{*path}` — e.g. `GET /link/invoice/INV-42?x=1`
///
/// # Request Flow
///
/// 1. Extract the session id from the `dl_session` cookie
/// 2. Run the resolution core
/// 3. Map the decision to a response (login page, SSO redirect, 404, or the
///    configured application shell page)
/// 4. Set the session cookie when a fresh guest session was created
pub async fn deeplink_handler(
    Path(path): Path<String>,
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    resolve_and_respond(&state, &path, uri.query(), &headers).await
}

/// Resolves a request against the bare mount path.
///
/// An empty mount-relative path means an empty deep-link name; the core
/// still resolves the session first, so this can serve the login page
/// rather than a 404 when guest login is disabled.
pub async fn deeplink_root_handler(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    resolve_and_respond(&state, "", uri.query(), &headers).await
}

async fn resolve_and_respond(
    state: &AppState,
    path: &str,
    query: Option<&str>,
    headers: &HeaderMap,
) -> Response {
    let session_id = session_cookie(headers);

    let resolution = state
        .resolver
        .resolve(path, query, session_id.as_deref())
        .await;

    let original_url = original_url(&state.mount_path, path, query);

    respond(state, resolution, &original_url).await
}

/// Extracts the session id from the `dl_session` cookie, if present.
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get(COOKIE)
        .and_then(|cookie_header| cookie_header.to_str().ok())
        .and_then(|cookie_str| {
            cookie_str.split(';').find_map(|cookie| {
                let mut parts = cookie.trim().splitn(2, '=');
                match (parts.next(), parts.next()) {
                    (Some(SESSION_COOKIE), Some(value)) => Some(value.to_string()),
                    _ => None,
                }
            })
        })
}

/// Reconstructs the URL the caller requested, for the login page and the
/// SSO continuation parameter.
fn original_url(mount_path: &str, path: &str, query: Option<&str>) -> String {
    let mut url = mount_path.to_string();
    if !path.is_empty() {
        url.push('/');
        url.push_str(path);
    }
    if let Some(q) = query {
        url.push('?');
        url.push_str(q);
    }
    url
}

async fn respond(state: &AppState, resolution: Resolution, original_url: &str) -> Response {
    let mut response = match resolution.decision {
        Decision::ServeLogin => LoginTemplate {
            original_url: original_url.to_string(),
        }
        .into_response(),
        Decision::ServeSso => serve_sso(state, original_url),
        Decision::Serve404 => (StatusCode::NOT_FOUND, "Not Found").into_response(),
        Decision::ServeIndex(page) => serve_index(state, &page).await,
    };

    if let Some(session) = resolution.guest_session {
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE, session.id
        );
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => warn!(error = %e, "failed to encode session cookie"),
        }
    }

    response
}

/// Redirects an anonymous caller to the SSO handler, carrying the original
/// URL so the handler can bounce back with the `sso_callback` marker.
fn serve_sso(state: &AppState, original_url: &str) -> Response {
    match &state.sso_handler_location {
        Some(location) => {
            let continuation: String =
                url::form_urlencoded::byte_serialize(original_url.as_bytes()).collect();
            Redirect::temporary(&format!("{location}?continuation={continuation}"))
                .into_response()
        }
        // The policy only emits ServeSso when a handler is configured.
        None => LoginTemplate {
            original_url: original_url.to_string(),
        }
        .into_response(),
    }
}

/// Serves the configured application shell page from the web root.
async fn serve_index(state: &AppState, page: &str) -> Response {
    if !is_safe_page_name(page) {
        warn!(page, "index page name rejected");
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    }

    match tokio::fs::read_to_string(state.web_root.join(page)).await {
        Ok(contents) => Html(contents).into_response(),
        Err(e) => {
            warn!(page, error = %e, "failed to read index page");
            (StatusCode::NOT_FOUND, "Not Found").into_response()
        }
    }
}

/// Rejects page names that could escape the web root.
fn is_safe_page_name(page: &str) -> bool {
    !page.is_empty()
        && !page.starts_with('/')
        && !page.contains('\\')
        && !page.split('/').any(|segment| segment == "..")
}
