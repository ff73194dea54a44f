pub mod dashboard;
pub mod leak_log;
pub mod user;
