use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};
use chrono::Utc;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};

use crate::auth::session::{self, Flash};
use crate::auth::rate_limit::{RateLimiter, ThrottleStatus};
use crate::auth::{csrf, password, validate};
use crate::config::AppConfig;
use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::user;
use crate::templates_structs::LoginTemplate;

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub remember: Option<String>,
    #[serde(default)]
    pub csrf_token: String,
}

impl LoginForm {
    /// HTML checkboxes submit a value only when ticked.
    pub fn remember(&self) -> bool {
        self.remember.as_deref().is_some_and(|v| !v.is_empty() && v != "off")
    }
}

#[derive(Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

fn peer_ip(req: &HttpRequest) -> IpAddr {
    req.peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

pub async fn login_page(
    req: HttpRequest,
    session: Session,
    config: web::Data<AppConfig>,
    limiter: web::Data<RateLimiter>,
) -> Result<HttpResponse, AppError> {
    // If already logged in, redirect to dashboard
    if session::get_user_id(&session).is_some() && !session::session_expired(&session, Utc::now()) {
        return Ok(redirect("/dashboard"));
    }

    let mut tmpl = LoginTemplate::new(&config.app_name, csrf::get_or_create_token(&session));
    tmpl.flashes = session::take_flashes(&session);
    tmpl.throttle = limiter.status(peer_ip(&req));
    render(tmpl)
}

pub async fn login_submit(
    req: HttpRequest,
    pool: web::Data<DbPool>,
    session: Session,
    config: web::Data<AppConfig>,
    limiter: web::Data<RateLimiter>,
    query: web::Query<LoginQuery>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let ip = peer_ip(&req);
    let username = form.username.trim().to_string();
    let remember = form.remember();

    let rerender = |flash: Flash, throttle: ThrottleStatus| -> Result<HttpResponse, AppError> {
        let mut tmpl = LoginTemplate::new(&config.app_name, csrf::get_or_create_token(&session));
        tmpl.username = username.clone();
        tmpl.remember = remember;
        tmpl.flashes = session::take_flashes(&session);
        tmpl.flashes.push(flash);
        tmpl.failed = true;
        tmpl.throttle = throttle;
        render(tmpl)
    };

    // Rate-limit check BEFORE any database access
    let throttle = limiter.status(ip);
    if throttle.locked {
        log::warn!("Login refused for {username} from {ip}: too many failed attempts");
        return rerender(
            Flash::error("Too many failed login attempts. Please try again later."),
            throttle,
        );
    }

    if let Some(msg) = validate::validate_login(&form.username, &form.password) {
        return rerender(Flash::error(msg), throttle);
    }

    let found = user::find_by_username(&pool, &username).await?;
    let stored = found.as_ref().map(|u| u.password.as_str());
    let verified = password::verify_or_dummy(&form.password, stored).map_err(AppError::Hash)?;

    match found {
        Some(u) if verified => {
            limiter.clear(ip);
            let ttl = session::login_ttl(remember, config.session_lifetime, config.short_session);
            session::establish(&session, &u, ttl, Utc::now())?;
            session::push_flash(&session, Flash::success(format!("Welcome, {}!", u.display_name)));
            log::info!("Successful login: {} from {ip}", u.username);

            let target = validate::sanitize_next(query.next.as_deref())
                .unwrap_or_else(|| "/dashboard".to_string());
            Ok(redirect(&target))
        }
        _ => {
            let throttle = limiter.record_failure(ip);
            log::warn!("Failed login attempt: {username} from {ip} ({} in window)", throttle.attempts);
            rerender(Flash::error("Invalid username or password."), throttle)
        }
    }
}

pub async fn logout(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let username = session::get_username(&session).unwrap_or_else(|_| "unknown".to_string());
    session::clear(&session);
    session::push_flash(&session, Flash::info("You have been logged out."));
    log::info!("Logged out: {username}");
    Ok(redirect("/login"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(remember: Option<&str>) -> LoginForm {
        LoginForm {
            username: "alice".to_string(),
            password: "pw".to_string(),
            remember: remember.map(String::from),
            csrf_token: String::new(),
        }
    }

    #[test]
    fn remember_checkbox_values() {
        assert!(form(Some("on")).remember());
        assert!(form(Some("1")).remember());
        assert!(!form(Some("")).remember());
        assert!(!form(Some("off")).remember());
        assert!(!form(None).remember());
    }
}
