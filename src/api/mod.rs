/// API error types and handling
pub mod errors;
/// Extractors reporting rejections as API errors
pub mod extractors;
/// HTTP handlers, one per route
pub mod handlers;
/// Request and response bodies
pub mod payloads;
/// Routes configuration and setup
pub mod routes;
/// HTTP server implementation
pub mod server;
