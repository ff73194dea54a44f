use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::auth::session;
use crate::config::AppConfig;
use crate::templates_structs::{ApiEndpoints, ClientConfigResponse, UserInfoResponse};

/// GET /leak-logs/api/user
pub async fn user_info(session: Session) -> HttpResponse {
    HttpResponse::Ok().json(UserInfoResponse {
        success: true,
        user_id: session::get_user_id(&session),
        username: session::get_username(&session).unwrap_or_default(),
        display_name: session::get_display_name(&session),
        role: session::get_role(&session).map(|r| r.to_string()).unwrap_or_default(),
        login_at: session::get_login_at(&session),
    })
}

/// GET /leak-logs/api/config: endpoint map for the browser scripts. Carries no secrets.
pub async fn client_config(session: Session, config: web::Data<AppConfig>) -> HttpResponse {
    HttpResponse::Ok().json(ClientConfigResponse {
        success: true,
        app_name: config.app_name.clone(),
        endpoints: ApiEndpoints::default(),
        user: session::get_display_name(&session),
    })
}
