use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use stockroom_core::{CatalogError, Product, ProductId, PublishError, StorageError};
use stockroom_shared::ProductEvent;
use tracing::{debug, info, warn};

use crate::{error::AppError, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub name: String,
}

/// Replacement values for every mutable field of a product.
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct QuantityRequest {
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InventoryValueResponse {
    pub total_value: f64,
    pub product_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct FetchRequest {
    pub ids: Vec<ProductId>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FetchResponse {
    pub requested: usize,
    /// Successful lookups in completion order
    pub products: Vec<Product>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", post(create_product).get(list_products))
        .route("/products/search", get(search_products))
        .route("/products/fetch", post(fetch_products))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/products/{id}/sell", post(sell_product))
        .route("/products/{id}/restock", post(restock_product))
        .route("/inventory/value", get(inventory_value))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /products
async fn create_product(
    State(state): State<AppState>,
    Json(product): Json<Product>,
) -> Result<Json<Product>, AppError> {
    let mut inventory = state.inventory.write().await;
    if inventory.get(product.id).is_some() {
        return Err(CatalogError::ProductAlreadyExists(product.id).into());
    }

    // Storage may hold rows the inventory has not seen, e.g. after a restart
    match state.storage.get_by_id(product.id).await {
        Ok(_) => return Err(CatalogError::ProductAlreadyExists(product.id).into()),
        Err(StorageError::NotFound(_)) => {}
        Err(e) => return Err(e.into()),
    }

    inventory.add_product(product.clone())?;

    if let Err(e) = state.storage.save(&product).await {
        let _ = inventory.remove_product(product.id);
        return Err(e.into());
    }

    info!(product_id = product.id, "Product created");
    Ok(Json(product))
}

/// GET /products
async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Json<Vec<Product>> {
    let inventory = state.inventory.read().await;
    let products = match &query.category {
        Some(category) => inventory.list_by_category(category),
        None => inventory.products(),
    };

    Json(products)
}

/// GET /products/{id}
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>, AppError> {
    let inventory = state.inventory.read().await;
    let product = inventory
        .get(id)
        .cloned()
        .ok_or_else(|| CatalogError::ProductNotFound(id.to_string()))?;

    Ok(Json(product))
}

/// GET /products/search?name=...
async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Product>, AppError> {
    let inventory = state.inventory.read().await;
    let product = inventory.find_product_by_name(&query.name)?.clone();

    Ok(Json(product))
}

/// PUT /products/{id}
async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<Product>, AppError> {
    let product = modify_product(&state, id, move |product| {
        product.name = req.name;
        product.update_price(req.price);
        product.quantity = req.quantity;
        product.category = req.category;
        Ok(())
    })
    .await?;

    info!(product_id = id, "Product updated");
    Ok(Json(product))
}

/// DELETE /products/{id}
async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode, AppError> {
    let mut inventory = state.inventory.write().await;
    let removed = inventory.remove_product(id)?;

    match state.storage.delete(id).await {
        Ok(()) => {}
        Err(StorageError::NotFound(_)) => {
            debug!(product_id = id, "Product was never persisted");
        }
        Err(e) => {
            let _ = inventory.add_product(removed);
            return Err(e.into());
        }
    }
    drop(inventory);

    publish_change(&state, ProductEvent::deleted(id)).await;
    info!(product_id = id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /products/{id}/sell
async fn sell_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(req): Json<QuantityRequest>,
) -> Result<Json<Product>, AppError> {
    let product = modify_product(&state, id, |product| product.sell(req.quantity)).await?;
    Ok(Json(product))
}

/// POST /products/{id}/restock
async fn restock_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(req): Json<QuantityRequest>,
) -> Result<Json<Product>, AppError> {
    let product = modify_product(&state, id, |product| product.restock(req.quantity)).await?;

    Ok(Json(product))
}

/// GET /inventory/value
async fn inventory_value(State(state): State<AppState>) -> Json<InventoryValueResponse> {
    let inventory = state.inventory.read().await;

    Json(InventoryValueResponse {
        total_value: inventory.total_value(),
        product_count: inventory.len(),
    })
}

/// POST /products/fetch
/// Look up details for a batch of IDs from the external source
async fn fetch_products(
    State(state): State<AppState>,
    Json(req): Json<FetchRequest>,
) -> Json<FetchResponse> {
    let products = state
        .fetcher
        .fetch_many(state.detail_source.clone(), &req.ids)
        .await;

    Json(FetchResponse {
        requested: req.ids.len(),
        products,
    })
}

// ============================================================================
// Helpers
// ============================================================================

/// Apply `change` to a stored product and persist it.
///
/// The inventory stays write-locked until the save returns; a failed save
/// restores the previous in-memory copy.
async fn modify_product<F>(state: &AppState, id: ProductId, change: F) -> Result<Product, AppError>
where
    F: FnOnce(&mut Product) -> Result<(), CatalogError>,
{
    let mut inventory = state.inventory.write().await;
    let product = inventory
        .get_mut(id)
        .ok_or_else(|| CatalogError::ProductNotFound(id.to_string()))?;

    let previous = product.clone();
    change(product)?;
    let updated = product.clone();

    if let Err(e) = state.storage.save(&updated).await {
        if let Some(product) = inventory.get_mut(id) {
            *product = previous;
        }
        return Err(e.into());
    }
    drop(inventory);

    publish_change(state, ProductEvent::updated(id, updated.quantity)).await;
    Ok(updated)
}

/// Best-effort event publication; failures are logged and swallowed.
async fn publish_change(state: &AppState, event: ProductEvent) {
    if let Err(e) = send_event(state, &event).await {
        warn!(product_id = event.product_id, error = %e, "Product event not published");
    }
}

async fn send_event(state: &AppState, event: &ProductEvent) -> Result<(), PublishError> {
    let payload = event.to_json()?;
    let key = event.product_id.to_string();
    state.events.publish(&state.event_topic, &key, &payload).await
}
