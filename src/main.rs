use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use leakwatch::auth::rate_limit::RateLimiter;
use leakwatch::config::AppConfig;
use leakwatch::{db, routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().expect("Invalid configuration");
    log::info!("Starting {}", config.app_name);

    // Ensure data directory exists for the default SQLite location
    if config.database_url.starts_with("sqlite://data/") {
        std::fs::create_dir_all("data").expect("Failed to create data directory");
    }

    let pool = db::init_pool(&config.database_url)
        .await
        .expect("Failed to create DB pool");
    if db::ping(&pool).await {
        log::info!("Database connection OK");
    } else {
        log::warn!("Database ping failed - some pages may not work");
    }
    db::run_migrations(&pool).await.expect("Failed to run migrations");
    db::seed_admin(&pool, &config).await.expect("Failed to seed admin user");
    if config.seed_demo {
        db::seed_demo(&pool).await.expect("Failed to seed demo data");
    }

    // Session encryption key from SESSION_KEY, so sessions survive restarts
    let secret_key = match config.session_key.as_deref() {
        Some(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Some(val) => {
            log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
            Key::generate()
        }
        None => {
            log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    let limiter = RateLimiter::new(config.login_max_attempts, config.login_window);
    let bind = config.bind_addr();
    log::info!("Listening on http://{}:{}", bind.0, bind.1);

    let config = web::Data::new(config);
    let limiter = web::Data::new(limiter);

    HttpServer::new(move || {
        App::new()
            .wrap(routes::session_middleware(secret_key.clone(), &config))
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(config.clone())
            .app_data(limiter.clone())
            // Static files
            .service(actix_files::Files::new("/static", "./static"))
            .configure(routes::configure)
    })
    .bind(bind)?
    .run()
    .await
}
