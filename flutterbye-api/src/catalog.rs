use axum::{extract::State, routing::get, Json, Router};
use flutterbye_catalog::Product;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/catalog/products", get(list_products))
}

/// GET /catalog/products
async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog.list().into_iter().cloned().collect())
}
