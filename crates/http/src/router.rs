//! Router builder for the bookshelf HTTP server

use axum::Router;
use std::time::Duration;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};

use crate::MakeRequestUuid;

/// Builder for constructing the main HTTP router.
///
/// Routes and module routers are added first; middleware layers wrap
/// whatever has been added when the `with_*` method is called, so the
/// builder is driven routes-first, layers-last.
pub struct RouterBuilder {
    router: Router,
}

impl RouterBuilder {
    /// Create a new router builder
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    /// Add a route to the router
    pub fn route(mut self, path: &str, route: axum::routing::MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Mount a module's router at `path`.
    ///
    /// Page-serving modules own root paths, so `/` merges the router
    /// directly; any other path is nested under the given prefix.
    pub fn mount_module(mut self, path: &str, module_router: Router) -> Self {
        self.router = if path == "/" {
            self.router.merge(module_router)
        } else {
            self.router.nest(path, module_router)
        };
        self
    }

    /// Serve files from `dir` for any path no route claims
    pub fn with_static_assets(mut self, dir: &str) -> Self {
        self.router = self.router.fallback_service(ServeDir::new(dir));
        self
    }

    /// Add tracing middleware
    pub fn with_tracing(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        );
        self
    }

    /// Add request ID middleware: assign an id to every request and echo it
    /// on the response
    pub fn with_request_id(mut self) -> Self {
        // Set is layered outside Propagate so the propagated header is the
        // one assigned on the way in.
        self.router = self
            .router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));
        self
    }

    /// Add timeout middleware
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.router = self
            .router
            .layer(TimeoutLayer::new(Duration::from_millis(timeout_ms)));
        self
    }

    /// Build the final router
    pub fn build(self) -> Router {
        self.router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
