//! Login page rendering: retained input, failure marker and lockout state.

use askama::Template;

use leakwatch::auth::rate_limit::ThrottleStatus;
use leakwatch::auth::session::Flash;
use leakwatch::templates_structs::LoginTemplate;

#[test]
fn test_fresh_form() {
    let html = LoginTemplate::new("LeakWatch", "abc".to_string()).render().unwrap();

    assert!(html.contains(r#"data-login-failed="false""#));
    assert!(html.contains(r#"name="csrf_token" value="abc""#));
    assert!(html.contains(r#"name="username" value="""#));
    assert!(!html.contains("checked"));
    assert!(!html.contains("data-retry-after"));
}

#[test]
fn test_rejected_submission_keeps_input() {
    let mut tmpl = LoginTemplate::new("LeakWatch", "abc".to_string());
    tmpl.username = "alice".to_string();
    tmpl.remember = true;
    tmpl.failed = true;
    tmpl.flashes.push(Flash::error("Invalid username or password."));
    let html = tmpl.render().unwrap();

    assert!(html.contains(r#"name="username" value="alice""#));
    assert!(html.contains(r#"value="on" checked"#));
    assert!(html.contains(r#"data-login-failed="true""#));
    assert!(html.contains(r#"class="flash flash-error""#));
    assert!(html.contains("Invalid username or password."));
}

#[test]
fn test_username_is_escaped() {
    let mut tmpl = LoginTemplate::new("LeakWatch", "abc".to_string());
    tmpl.username = r#""><script>"#.to_string();
    let html = tmpl.render().unwrap();
    assert!(!html.contains(r#"value=""><script>""#));
}

#[test]
fn test_locked_form_disables_submit() {
    let mut tmpl = LoginTemplate::new("LeakWatch", "abc".to_string());
    tmpl.throttle = ThrottleStatus { attempts: 5, locked: true, retry_after_secs: 420 };
    let html = tmpl.render().unwrap();

    assert!(html.contains(r#"disabled data-retry-after="420""#));
    assert!(html.contains("Try again in 420s"));
}

#[test]
fn test_password_starts_masked_with_toggle() {
    let html = LoginTemplate::new("LeakWatch", "abc".to_string()).render().unwrap();

    assert!(html.contains(r#"type="password" id="password""#));
    assert!(html.contains(r#"id="toggle-password""#));
    assert!(html.contains(r#"aria-label="Show password">&#128065;</button>"#));
    assert!(html.contains(r#"src="/static/js/login.js""#));
}
