//! HTTP server for the 2-3 tree.
//!
//! Provides REST API endpoints for:
//! - Insert, remove and search of integer keys
//! - Traversals, min/max and stats
//! - Tree structure export for visualization

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tree23::{Order, ServerConfig, SharedTree, TreeNode, TreeStats};

type SharedState = SharedTree<i64>;

type ApiError = (StatusCode, Json<OperationResponse>);

/// Request to insert a key
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddRequest {
    key: i64,
}

/// Request to insert many keys
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BulkAddRequest {
    keys: Vec<i64>,
}

/// Response for search operations
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    key: i64,
    found: bool,
}

/// Response for operations that return success/failure
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OperationResponse {
    success: bool,
    message: String,
}

/// Stats response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsResponse {
    size: usize,
    tree_height: usize,
    min: Option<i64>,
    max: Option<i64>,
}

/// Traversal response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TraversalResponse {
    order: Order,
    keys: Vec<i64>,
}

/// Tree visualization response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TreeResponse {
    tree: Option<TreeNode<i64>>,
    stats: TreeStats,
}

fn ok(message: impl Into<String>) -> Json<OperationResponse> {
    Json(OperationResponse {
        success: true,
        message: message.into(),
    })
}

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(OperationResponse {
            success: false,
            message: message.into(),
        }),
    )
}

fn router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/keys", get(list_keys).post(add_key))
        .route("/api/keys/:key", get(search_key).delete(remove_key))
        .route("/api/bulk", post(bulk_add))
        .route("/api/traverse/:order", get(traverse))
        .route("/api/tree", get(get_tree))
        .route("/api/stats", get(get_stats))
        .route("/api/check", get(check_tree))
        .route("/api/clear", post(clear_tree))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tree23=info,tree23_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(config.listen_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {e}", config.listen_addr);
            std::process::exit(1);
        }
    };

    tracing::info!("2-3 tree server running on http://{}", config.listen_addr);
    tracing::info!("  GET    /api/keys             - List keys in order");
    tracing::info!("  POST   /api/keys             - Insert a key");
    tracing::info!("  GET    /api/keys/:key        - Search for a key");
    tracing::info!("  DELETE /api/keys/:key        - Remove a key");
    tracing::info!("  POST   /api/bulk             - Insert many keys");
    tracing::info!("  GET    /api/traverse/:order  - in, pre or post-order walk");
    tracing::info!("  GET    /api/tree             - Tree structure for visualization");
    tracing::info!("  GET    /api/stats            - Size, height, min and max");
    tracing::info!("  GET    /api/check            - Validate tree invariants");
    tracing::info!("  POST   /api/clear            - Remove all keys");

    if let Err(e) = axum::serve(listener, router(SharedTree::new())).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

async fn list_keys(State(tree): State<SharedState>) -> Json<Vec<i64>> {
    Json(tree.traverse(Order::InOrder))
}

async fn add_key(
    State(tree): State<SharedState>,
    Json(req): Json<AddRequest>,
) -> Json<OperationResponse> {
    if tree.add(req.key) {
        ok(format!("Inserted key {}", req.key))
    } else {
        Json(OperationResponse {
            success: false,
            message: format!("Key {} already present", req.key),
        })
    }
}

async fn bulk_add(
    State(tree): State<SharedState>,
    Json(req): Json<BulkAddRequest>,
) -> Json<OperationResponse> {
    let total = req.keys.len();
    let inserted = req.keys.into_iter().filter(|&key| tree.add(key)).count();
    ok(format!(
        "Inserted {} of {} keys ({} duplicates)",
        inserted,
        total,
        total - inserted
    ))
}

async fn search_key(State(tree): State<SharedState>, Path(key): Path<i64>) -> Json<SearchResponse> {
    Json(SearchResponse {
        key,
        found: tree.search(&key),
    })
}

async fn remove_key(State(tree): State<SharedState>, Path(key): Path<i64>) -> Json<OperationResponse> {
    if tree.remove(&key) {
        ok(format!("Removed key {}", key))
    } else {
        Json(OperationResponse {
            success: false,
            message: format!("Key {} not found", key),
        })
    }
}

async fn traverse(
    State(tree): State<SharedState>,
    Path(order): Path<String>,
) -> Result<Json<TraversalResponse>, ApiError> {
    let order: Order = order.parse().map_err(|e| bad_request(format!("{}", e)))?;
    Ok(Json(TraversalResponse {
        order,
        keys: tree.traverse(order),
    }))
}

async fn get_tree(State(tree): State<SharedState>) -> Json<TreeResponse> {
    let (tree, stats) = tree.read(|t| (t.export(), t.stats()));
    Json(TreeResponse { tree, stats })
}

async fn get_stats(State(tree): State<SharedState>) -> Json<StatsResponse> {
    Json(tree.read(|t| StatsResponse {
        size: t.size(),
        tree_height: t.height(),
        min: t.find_min().copied(),
        max: t.find_max().copied(),
    }))
}

async fn check_tree(State(tree): State<SharedState>) -> Result<Json<OperationResponse>, ApiError> {
    match tree.check_invariants() {
        Ok(()) => Ok(ok("Tree invariants hold")),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(OperationResponse {
                success: false,
                message: e.to_string(),
            }),
        )),
    }
}

async fn clear_tree(State(tree): State<SharedState>) -> Json<OperationResponse> {
    tree.clear();
    ok("Tree cleared")
}
