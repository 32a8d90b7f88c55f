// File: services/coinramp_backend/src/main.rs
use axum::{routing::get, Router};
use coinramp_common::init_from_config;
use coinramp_config::load_config;
use coinramp_validation::RuleRegistry;
#[cfg(feature = "stripe")]
use coinramp_common::is_stripe_enabled;
#[cfg(feature = "stripe")]
use coinramp_stripe::routes as stripe_routes;
use std::error::Error;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
#[cfg(feature = "stripe")]
use tracing::warn;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Arc::new(load_config().map_err(|e| format!("Failed to load config: {}", e))?);

    // Held until shutdown so the file writer gets flushed
    let _log_guard = init_from_config(&config.logging);

    // Shared by every route that validates with `ValidatedJson`
    let rule_registry = Arc::new(RuleRegistry::with_defaults());
    info!("Validation rules registered: {:?}", rule_registry.names());

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to Coinramp API!" }))
        .merge(coinramp_common::routes())
        .merge(coinramp_validation::routes(rule_registry));

    let api_router = Router::new().nest("/api", {
        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut router = api_router;
        #[cfg(feature = "stripe")]
        {
            if is_stripe_enabled(&config) {
                router = router.merge(stripe_routes(config.clone())?);
                info!("Stripe routes mounted under /api/stripe");
            } else {
                warn!("Stripe is compiled in but disabled in the config");
            }
        }
        router
    });

    let mut app = api_router;

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        #[cfg(feature = "stripe")]
        use coinramp_stripe::doc::StripeApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Coinramp API",
                version = "0.1.0",
                description = "Coinramp Service API Docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            tags( (name = "Coinramp", description = "Core service endpoints")),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut openapi_doc = ApiDoc::openapi();
        #[cfg(feature = "stripe")]
        openapi_doc.merge(StripeApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    let app = app.layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
