use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Query, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::catalog::store::CatalogStats;
use crate::cli::ServeArgs;
use crate::core::record::CrossReferenceRecord;
use crate::matching::engine::{MatchEngine, MatchingConfig};
use crate::matching::Suggestion;
use crate::utils::validation::{clean_queries, split_batch_input, QueryError};

/// Request body limit; query batches are small JSON documents
pub const MAX_BODY_SIZE: usize = 256 * 1024;

/// Upper bound on `limit` for the suggest endpoint
pub const MAX_SUGGESTIONS: usize = 50;

/// Shared application state
pub struct AppState {
    pub engine: Arc<MatchEngine>,
}

/// A single part number or a list of them
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum QueryInput {
    One(String),
    Many(Vec<String>),
}

/// How the client collected its query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchType {
    /// One part number typed by the user
    #[default]
    Single,
    /// A pasted list; string queries are split on commas and whitespace
    Batch,
    /// Part numbers recognized from an image upstream
    Image,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: Option<QueryInput>,
    #[serde(default, rename = "type")]
    pub search_type: SearchType,
}

impl SearchRequest {
    /// Raw query strings, before cleaning
    fn raw_queries(self) -> Vec<String> {
        match (self.query, self.search_type) {
            (None, _) => Vec::new(),
            (Some(QueryInput::One(text)), SearchType::Batch | SearchType::Image) => {
                split_batch_input(&text)
            }
            (Some(QueryInput::One(text)), SearchType::Single) => vec![text],
            (Some(QueryInput::Many(list)), _) => list,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub data: Vec<CrossReferenceRecord>,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
}

impl SearchResponse {
    fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Vec::new(),
            message: message.into(),
            suggestions: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    pub q: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct StatsResponse {
    source: String,
    stats: CatalogStats,
    configuration: MatchingConfig,
}

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
}

/// Create an error response with a user-facing message, logging any
/// internal detail server-side only
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
    }
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server fails to start.
pub fn run(args: ServeArgs, engine: MatchEngine) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args, Arc::new(engine)).await })
}

/// Routes and handlers without the security middleware
pub fn routes(engine: Arc<MatchEngine>) -> Router {
    let state = Arc::new(AppState { engine });

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/search", post(search_handler))
        .route("/api/suggest", get(suggest_handler))
        .route("/api/stats", get(stats_handler))
        .with_state(state)
}

/// Create the application router with all routes and middleware configured.
///
/// # Errors
///
/// Returns an error if the rate limiter configuration is rejected.
pub fn create_router(engine: Arc<MatchEngine>) -> anyhow::Result<Router> {
    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50) // Allow bursts of 50 requests
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?;

    let app = routes(engine).layer(
        ServiceBuilder::new()
            // Security headers for browser protection
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("x-content-type-options"),
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("x-frame-options"),
                HeaderValue::from_static("DENY"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("referrer-policy"),
                HeaderValue::from_static("strict-origin-when-cross-origin"),
            ))
            // IP-based rate limiting to prevent abuse
            .layer(GovernorLayer {
                config: Arc::new(governor_conf),
            })
            // Request timeout to prevent slow client attacks
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(30),
            ))
            // Limit concurrent requests to prevent DOS
            .layer(ConcurrencyLimitLayer::new(100))
            .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
    );

    Ok(app)
}

async fn run_server(args: ServeArgs, engine: Arc<MatchEngine>) -> anyhow::Result<()> {
    // Load the catalog before accepting traffic
    let catalog = engine.initialize();
    tracing::info!(
        "Serving {} records from {}",
        catalog.len(),
        catalog.origin()
    );

    let app = create_router(engine)?;

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting chip-xref web server at http://{addr}");

    if args.open {
        let _ = open::that(format!("http://{addr}"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn health_handler() -> &'static str {
    "ok"
}

/// API endpoint for part-number lookup
async fn search_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Response {
    let start_time = std::time::Instant::now();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!("Rejected search body: {}", rejection.body_text());
            return (
                rejection.status(),
                Json(SearchResponse::rejected(format!(
                    "Invalid request body: {}",
                    rejection.body_text()
                ))),
            )
                .into_response();
        }
    };

    if request.query.is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(SearchResponse::rejected("Missing 'query' field")),
        )
            .into_response();
    }

    let queries = match clean_queries(request.raw_queries()) {
        Ok(queries) => queries,
        Err(e) => {
            let message = match e {
                QueryError::Empty => "Please provide a valid part number".to_string(),
                other => other.to_string(),
            };
            return (StatusCode::BAD_REQUEST, Json(SearchResponse::rejected(message)))
                .into_response();
        }
    };

    let engine = &state.engine;
    let data = engine.search(&queries);

    let suggestions = if data.is_empty() && queries.len() == 1 {
        let mut suggestions = engine.suggest(&queries[0]);
        suggestions.truncate(engine.config().suggestion_limit);
        suggestions
    } else {
        Vec::new()
    };

    tracing::debug!(
        "Search for {} part number(s) returned {} record(s) in {} ms",
        queries.len(),
        data.len(),
        start_time.elapsed().as_millis()
    );

    let message = format!("Found {} matching record(s)", data.len());
    Json(SearchResponse {
        success: true,
        data,
        message,
        suggestions,
    })
    .into_response()
}

async fn suggest_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SuggestParams>,
) -> Response {
    let query = match clean_queries(params.q.as_deref()) {
        Ok(mut queries) => queries.remove(0),
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(create_safe_error_response(
                    "invalid_query",
                    &e.to_string(),
                    None,
                )),
            )
                .into_response();
        }
    };

    let engine = &state.engine;
    let limit = params
        .limit
        .unwrap_or(engine.config().suggestion_limit)
        .min(MAX_SUGGESTIONS);

    let mut suggestions = engine.suggest(&query);
    suggestions.truncate(limit);

    Json(serde_json::json!({
        "query": query,
        "suggestions": suggestions,
    }))
    .into_response()
}

async fn stats_handler(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    let engine = &state.engine;
    let catalog = engine.catalog();
    Json(StatsResponse {
        source: catalog.origin().to_string(),
        stats: catalog.stats(),
        configuration: engine.config().clone(),
    })
}
