//! API routes configuration module

use crate::api::handlers::{
    create_question, delete_question, list_categories, list_category_questions, list_questions,
    method_not_allowed, next_quiz_question, route_not_found, search_questions,
};
use crate::config::{CorsConfig, ServerConfig};
use crate::db::Database;
use axum::http::header::{
    HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
};
use axum::http::Method;
use axum::{
    routing::{delete, get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Creates and configures the API router with all routes
///
/// # Arguments
/// * `database` - Database connection pool to be shared across handlers
/// * `config` - Server configuration, read by handlers for the page size
///
/// # Returns
/// * `Router` - Configured router with all API endpoints and middleware
pub fn app(database: Database, config: Arc<ServerConfig>) -> Router {
    let cors = CorsPolicy::from_config(&config.cors);

    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/:id/questions", get(list_category_questions))
        .route("/questions", get(list_questions).post(create_question))
        .route(
            "/questions/:id",
            delete(delete_question).post(search_questions),
        )
        .route("/quizzes", post(next_quiz_question))
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(Extension(database))
        .layer(Extension(config))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_METHODS,
            cors.methods_header,
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_HEADERS,
            cors.headers_header,
        ))
        .layer(cors.layer)
        .layer(TraceLayer::new_for_http())
}

/// CORS middleware plus the headers stamped on every response, preflight or not
struct CorsPolicy {
    layer: CorsLayer,
    methods_header: HeaderValue,
    headers_header: HeaderValue,
}

impl CorsPolicy {
    fn from_config(config: &CorsConfig) -> Self {
        let methods: Vec<Method> = config
            .allowed_methods
            .iter()
            .filter_map(|m| match Method::from_bytes(m.trim().as_bytes()) {
                Ok(method) => Some(method),
                Err(_) => {
                    warn!("Ignoring invalid CORS method {:?}", m);
                    None
                }
            })
            .collect();
        let headers: Vec<HeaderName> = config
            .allowed_headers
            .iter()
            .filter_map(|h| match HeaderName::from_bytes(h.trim().as_bytes()) {
                Ok(name) => Some(name),
                Err(_) => {
                    warn!("Ignoring invalid CORS header {:?}", h);
                    None
                }
            })
            .collect();

        let origin = if config.allowed_origins.iter().any(|o| o == "*") {
            AllowOrigin::any()
        } else {
            let origins: Vec<HeaderValue> = config
                .allowed_origins
                .iter()
                .filter_map(|o| match HeaderValue::from_str(o.trim()) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("Ignoring invalid CORS origin {:?}", o);
                        None
                    }
                })
                .collect();
            AllowOrigin::list(origins)
        };

        let methods_header = join_header_value(methods.iter().map(Method::as_str));
        let headers_header = join_header_value(headers.iter().map(HeaderName::as_str));

        let layer = CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers(headers);

        CorsPolicy {
            layer,
            methods_header,
            headers_header,
        }
    }
}

/// Joins already validated tokens into a comma separated header value
fn join_header_value<'a>(tokens: impl Iterator<Item = &'a str>) -> HeaderValue {
    let joined = tokens.collect::<Vec<_>>().join(",");
    HeaderValue::from_str(&joined).unwrap_or_else(|_| HeaderValue::from_static(""))
}
