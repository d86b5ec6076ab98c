use super::*;
use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpServer;
use actix_web::middleware::Logger;
use actix_web::web;

pub struct Server;

impl Server {
    pub async fn run(config: Config) -> anyhow::Result<()> {
        let registry = web::Data::new(Registry::new(config.queue));
        let settings = web::Data::new(config.clone());
        log::info!("starting battleline server on {}", config.bind);
        HttpServer::new(move || {
            App::new()
                .wrap(Logger::new("%r %s %Ts"))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
                .app_data(registry.clone())
                .app_data(settings.clone())
                .route("/session", web::post().to(create))
                .route("/session/{id}", web::post().to(join))
                .route("/session/{id}", web::get().to(snapshot))
                .route("/ws/{id}", web::get().to(connect))
        })
        .workers(config.workers)
        .bind(&config.bind)?
        .run()
        .await?;
        Ok(())
    }
}
