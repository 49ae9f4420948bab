mod config;
mod db;
mod error;
mod pipeline;
mod services;

use crate::config::AppConfig;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    // create the database file and tables before the first request
    db::open(&config.database_path).map_err(io::Error::other)?;
    info!("Using database {}", config.database_path);

    let url = config.url();
    let bind = (config.host.clone(), config.port);
    info!("Server running at {}", url);

    HttpServer::new(move || {
        App::new()
            .app_data(services::json_config(config.json_limit_bytes))
            .app_data(web::Data::new(config.clone()))
            .service(services::import::configure_routes())
            .service(services::export::configure_routes())
            .service(services::health::configure_routes())
    })
    .bind(bind)?
    .run()
    .await
}
