//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{AppSettings, ServerConfig};
pub use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

#[cfg(debug_assertions)]
use listshare::doc::ApiDoc;
use listshare::inbound::http::categories::{
    create_category, delete_category, list_categories, rename_category,
};
use listshare::inbound::http::health::{HealthState, live, ready};
use listshare::inbound::http::items::{
    create_item, delete_item, list_items, toggle_done, update_item,
};
use listshare::inbound::http::lists::{
    add_collaborator, create_list, delete_list, list_lists, remove_collaborator, update_list,
};
use listshare::inbound::http::preferences::{get_preferences, update_preferences};
use listshare::inbound::http::state::HttpState;
use listshare::middleware::{Cors, Trace};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    cors_origin: Option<String>,
}

fn api_scope() -> actix_web::Scope {
    web::scope("/api/v1")
        .service(list_categories)
        .service(create_category)
        .service(rename_category)
        .service(delete_category)
        .service(list_lists)
        .service(create_list)
        .service(update_list)
        .service(delete_list)
        .service(add_collaborator)
        .service(remove_collaborator)
        .service(list_items)
        .service(create_item)
        .service(toggle_done)
        .service(update_item)
        .service(delete_item)
        .service(get_preferences)
        .service(update_preferences)
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        cors_origin,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Cors::new(cors_origin))
        .wrap(Trace)
        .service(api_scope())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server over the composed state.
///
/// Default categories are seeded before the readiness probe flips.
///
/// # Errors
/// Propagates [`std::io::Error`] when seeding fails or the socket cannot be
/// bound.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let seeded = http_state
        .categories
        .seed_defaults()
        .await
        .map_err(|err| std::io::Error::other(format!("seeding default categories: {err}")))?;
    tracing::info!(seeded, "startup seeding complete");

    let http_state = web::Data::new(http_state);
    let server_health_state = health_state.clone();
    let ServerConfig {
        bind_addr,
        cors_origin,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            cors_origin: cors_origin.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
