/// Validate a login submission: both fields are required.
pub fn validate_login(username: &str, password: &str) -> Option<String> {
    if username.trim().is_empty() || password.is_empty() {
        return Some("Username and password are required.".to_string());
    }
    if username.trim().len() > 50 {
        return Some("Username must be at most 50 characters.".to_string());
    }
    None
}

/// Accept only same-site relative paths as a post-login redirect target.
pub fn sanitize_next(next: Option<&str>) -> Option<String> {
    let next = next?.trim();
    if !next.starts_with('/') || next.starts_with("//") || next.starts_with("/\\") {
        return None;
    }
    if next.chars().any(|c| c.is_control()) {
        return None;
    }
    // Never bounce back to the login form itself.
    if next == "/login" || next.starts_with("/login?") {
        return None;
    }
    Some(next.to_string())
}
