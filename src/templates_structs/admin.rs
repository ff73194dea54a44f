use askama::Template;

use crate::models::user::UserDisplay;
use super::PageContext;

#[derive(Template)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub ctx: PageContext,
    pub users: Vec<UserDisplay>,
}
