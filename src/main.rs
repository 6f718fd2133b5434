// Third-party dependencies
use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use log::info;

use teamflow_service::routes::{auth_routes, invitation_routes, team_routes};
use teamflow_service::utils::Authentication;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:9090".to_string());
    std::fs::create_dir_all("./storage")?;

    info!("Server started at {}", address);

    HttpServer::new(|| {
        App::new()
            .wrap(Cors::permissive())
            .configure(auth_routes::init_routes)
            .service(
                web::scope("")
                    .wrap(Authentication)
                    .configure(auth_routes::init_protected_routes)
                    .configure(team_routes::init_routes)
                    .configure(invitation_routes::init_routes),
            )
    })
    .bind(address)?
    .run()
    .await
}
