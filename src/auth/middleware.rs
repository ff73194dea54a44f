use actix_session::SessionExt;
use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};
use chrono::Utc;

use crate::auth::session::{self, Flash};

/// Middleware function that checks for an authenticated, unexpired session.
/// Redirects to /login?next=<path> otherwise.
pub async fn require_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let session = req.get_session();
    let has_user = session::get_user_id(&session).is_some();
    let expired = has_user && session::session_expired(&session, Utc::now());

    if !has_user || expired {
        if expired {
            log::info!("Session expired for {}", session::get_display_name(&session));
            session::clear(&session);
        }
        session::push_flash(&session, Flash::error("Please log in to access this page."));
        let location = login_redirect(req.path(), req.query_string());
        let response = HttpResponse::SeeOther()
            .insert_header(("Location", location))
            .finish();
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Build the login URL that returns the user to `path` afterwards.
pub fn login_redirect(path: &str, query: &str) -> String {
    let target = if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    };
    let encoded: String = serde_urlencoded::to_string([("next", target.as_str())])
        .unwrap_or_default();
    if encoded.is_empty() {
        "/login".to_string()
    } else {
        format!("/login?{encoded}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_encodes_path_and_query() {
        assert_eq!(login_redirect("/dashboard", ""), "/login?next=%2Fdashboard");
        assert_eq!(
            login_redirect("/leak-logs/api/list", "page=2"),
            "/login?next=%2Fleak-logs%2Fapi%2Flist%3Fpage%3D2"
        );
    }
}
