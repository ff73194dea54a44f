pub mod admin_handlers;
pub mod api;
pub mod auth_handlers;
pub mod dashboard;
pub mod leak_log_handlers;
pub mod system_handlers;
