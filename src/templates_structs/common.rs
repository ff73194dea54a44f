use askama::Template;

use crate::auth::rate_limit::ThrottleStatus;
use crate::auth::session::Flash;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub app_name: String,
    pub csrf_token: String,
    pub username: String,
    pub remember: bool,
    pub flashes: Vec<Flash>,
    /// Set when this render answers a rejected submission.
    pub failed: bool,
    pub throttle: ThrottleStatus,
}

impl LoginTemplate {
    pub fn new(app_name: &str, csrf_token: String) -> Self {
        Self {
            app_name: app_name.to_string(),
            csrf_token,
            username: String::new(),
            remember: false,
            flashes: Vec::new(),
            failed: false,
            throttle: ThrottleStatus::default(),
        }
    }
}
