mod demo;

use actix_files::Files;
use actix_web::{get, middleware, web, App, HttpResponse, HttpServer, Responder};
use std::env;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared across workers; every train-data request advances the demo by one tick
struct DemoClock {
    tick: AtomicU64,
}

#[get("/api/network-config")]
async fn network_config() -> impl Responder {
    HttpResponse::Ok().json(demo::network_config())
}

#[get("/api/train-data")]
async fn train_data(clock: web::Data<DemoClock>) -> impl Responder {
    let tick = clock.tick.fetch_add(1, Ordering::Relaxed);
    HttpResponse::Ok().json(demo::train_data(tick))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Get port from environment or default to 8000
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8000);

    log::info!("Starting server on 0.0.0.0:{port}");

    let clock = web::Data::new(DemoClock { tick: AtomicU64::new(0) });

    HttpServer::new(move || {
        App::new()
            .app_data(clock.clone())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(network_config)
            .service(train_data)
            .service(Files::new("/", "./dist").index_file("index.html"))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
