use screencamp_core::prediction::ScorerPool;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool and scorer share their internals. Settings the
/// router needs at build time are passed to `build_app_router` directly.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: screencamp_db::DbPool,
    /// Bounded launcher for the risk-scoring process.
    pub scorer: ScorerPool,
}
