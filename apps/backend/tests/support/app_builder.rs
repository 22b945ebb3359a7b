use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use coffee_backend::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use coffee_backend::routes;
use coffee_backend::state::app_state::AppState;

type RouteConfigFn = Box<dyn Fn(&mut web::ServiceConfig) + Send + Sync>;

/// Builder for test Actix services.
///
/// Carries the same logging middleware as `main.rs`; CORS is left out so
/// response bodies stay boxed.
pub struct TestAppBuilder {
    state: web::Data<AppState>,
    route_config: Option<RouteConfigFn>,
}

impl TestAppBuilder {
    pub fn new(state: AppState) -> Self {
        Self {
            state: web::Data::new(state),
            route_config: None,
        }
    }

    /// Serve every production route, gates included.
    pub fn with_prod_routes(mut self) -> Self {
        self.route_config = Some(Box::new(routes::configure) as RouteConfigFn);
        self
    }

    pub fn with_routes<F>(mut self, config_fn: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + Send + Sync + 'static,
    {
        self.route_config = Some(Box::new(config_fn) as RouteConfigFn);
        self
    }

    /// Build the service. The returned state handle shares the app's pool,
    /// so tests can inspect storage directly.
    pub async fn build(
        self,
    ) -> (
        impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
        web::Data<AppState>,
    ) {
        let data = self.state;
        let route_config = self.route_config;

        let service = test::init_service(
            App::new()
                .wrap(TraceSpan)
                .wrap(RequestTrace)
                .wrap(StructuredLogger)
                .app_data(data.clone())
                .configure(move |cfg| {
                    if let Some(config_fn) = &route_config {
                        config_fn(cfg);
                    }
                }),
        )
        .await;

        (service, data)
    }
}

/// ```ignore
/// let state = build_test_state().await;
/// let (app, state) = create_test_app(state).with_prod_routes().build().await;
/// ```
pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder::new(state)
}
