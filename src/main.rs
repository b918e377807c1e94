use actix_cors::Cors;
use actix_web::{self, middleware::Logger, web, App, HttpServer};
use std::sync::Arc;

use crate::{
    constants::Env,
    modules::complaint::{route, ComplaintService, WebhookSubmitter},
};

mod api;
mod constants;
mod modules;
mod utils;

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "Server is running"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");

    // Nothing is served without a webhook to forward to.
    let env = Env::from_env().map_err(|e| {
        log::error!("Configuration error: {e}");
        std::io::Error::other(e.to_string())
    })?;

    let submitter = WebhookSubmitter::new(env.webhook_url.as_str()).map_err(|e| {
        log::error!("HTTP client error: {e}");
        std::io::Error::other("HTTP client error")
    })?;
    let complaint_service = web::Data::new(ComplaintService::new(Arc::new(submitter)));

    log::info!("Starting server at http://{}:{}", env.ip, env.port);
    let frontend_url = env.frontend_url.clone();
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&frontend_url)
            .allowed_methods(vec!["GET", "POST"])
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(complaint_service.clone())
            .service(health_check)
            .service(web::scope("/api").configure(route::configure::<WebhookSubmitter>))
    })
    .bind((env.ip.as_str(), env.port))?
    .workers(env.workers)
    .run()
    .await
}
