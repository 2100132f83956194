pub mod bookings;
pub mod camps;
pub mod health;
pub mod prediction;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// ```text
/// GET    /camps               list (filters: search, state, district)
/// POST   /camps               create
/// DELETE /camps/{id}          delete
///
/// GET    /bookings            list with camp attached
/// POST   /bookings            create
/// DELETE /bookings/{id}       delete
///
/// POST   /register            register
/// POST   /login               login
/// GET    /users/count         count
///
/// POST   /predict             predict
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/camps", camps::router())
        .nest("/bookings", bookings::router())
        .merge(users::router())
        .merge(prediction::router())
}
