use actix_web::web;

pub mod drinks;
pub mod health;

/// Register every route. Shared by `main.rs` and the integration tests so
/// both serve the same paths behind the same permission gates.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(drinks::configure_routes);
}
