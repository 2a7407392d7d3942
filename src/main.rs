#![allow(dead_code)] // Client-side modules are consumed as a library surface

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod client;
mod config;
mod database;
mod error;
mod handlers;
mod models;
mod repository;
mod services;
mod utils;

use config::Config;
use database::create_pool;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    let config = Arc::new(config);

    info!("Starting Survey Backend on port {}", config.port);

    // Initialize database pool
    let db_pool = create_pool(&config)
        .await
        .expect("Failed to create database pool");

    // Run migrations
    database::run_migrations(&db_pool)
        .await
        .expect("Failed to run migrations");

    // Optional demo data
    if config.seed_demo_data {
        database::seed_demo_data(&db_pool)
            .await
            .expect("Failed to seed demo data");
    }

    // Create application state
    let app_state = web::Data::new(handlers::AppState::new(config.clone(), db_pool.clone()));

    let server_port = config.port;
    let cors_origins = config.cors_allowed_origins.clone();

    HttpServer::new(move || {
        let cors_origins_inner = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _req_head| {
                let origin_str = origin.to_str().unwrap_or("");
                if cors_origins_inner == "*" {
                    return true;
                }
                cors_origins_inner
                    .split(',')
                    .any(|o| o.trim() == origin_str)
            })
            .allowed_methods(vec!["GET", "POST", "PATCH", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec!["Authorization", "Content-Type", "Accept"])
            .supports_credentials()
            .max_age(3600);

        // Malformed JSON bodies use the same error shape as the handlers
        let json_cfg = web::JsonConfig::default().error_handler(|err, _req| {
            let message = format!("{}", err);
            actix_web::error::InternalError::from_response(
                err,
                actix_web::HttpResponse::BadRequest()
                    .json(serde_json::json!({ "error": message })),
            )
            .into()
        });

        App::new()
            .app_data(app_state.clone())
            .app_data(json_cfg)
            .wrap(Logger::default())
            .wrap(cors)
            .route("/", web::get().to(handlers::index))
            .route("/health", web::get().to(handlers::health_check))
            .service(
                web::scope("/surveys")
                    .route("", web::get().to(handlers::survey::list_surveys))
                    .route("", web::post().to(handlers::survey::create_survey))
                    // Must come before the {survey_id} routes
                    .route("/drafts", web::get().to(handlers::survey::list_draft_surveys))
                    .route(
                        "/drafts/{survey_id}",
                        web::delete().to(handlers::survey::delete_draft_survey),
                    )
                    .route("/{survey_id}", web::get().to(handlers::survey::get_survey))
                    .route("/{survey_id}", web::patch().to(handlers::survey::update_survey))
                    .route(
                        "/{survey_id}/duplicate",
                        web::post().to(handlers::survey::duplicate_survey),
                    )
                    .route(
                        "/{survey_id}/publish",
                        web::patch().to(handlers::survey::publish_survey),
                    )
                    .route(
                        "/{survey_id}/unpublish",
                        web::patch().to(handlers::survey::unpublish_survey),
                    )
                    .route(
                        "/{survey_id}/statistics",
                        web::get().to(handlers::response::survey_statistics),
                    )
                    .route(
                        "/{survey_id}/responses",
                        web::get().to(handlers::response::list_responses),
                    )
                    .route(
                        "/{survey_id}/responses",
                        web::post().to(handlers::response::submit_response),
                    )
                    .route(
                        "/{survey_id}/sections",
                        web::get().to(handlers::section::list_sections),
                    )
                    .route(
                        "/{survey_id}/sections",
                        web::post().to(handlers::section::create_section),
                    )
                    .route(
                        "/{survey_id}/sections/{section_id}",
                        web::get().to(handlers::section::get_section),
                    )
                    .route(
                        "/{survey_id}/sections/{section_id}",
                        web::patch().to(handlers::section::update_section),
                    )
                    .route(
                        "/{survey_id}/sections/{section_id}",
                        web::delete().to(handlers::section::delete_section),
                    )
                    .route(
                        "/{survey_id}/sections/{section_id}/statistics",
                        web::get().to(handlers::response::section_statistics),
                    ),
            )
            .service(web::scope("/questions").route(
                "/{question_id}/options",
                web::post().to(handlers::option::create_option),
            ))
            .service(
                web::scope("/options")
                    .route("/{option_id}", web::patch().to(handlers::option::update_option))
                    .route(
                        "/{option_id}",
                        web::delete().to(handlers::option::delete_option),
                    ),
            )
    })
    .bind(format!("0.0.0.0:{}", server_port))?
    .run()
    .await
}
