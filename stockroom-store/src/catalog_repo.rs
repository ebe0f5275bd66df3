use async_trait::async_trait;
use sqlx::PgPool;
use stockroom_core::{Product, ProductId, ProductStorage, StorageError};
use tracing::error;

/// `ProductStorage` backed by the `products` table.
///
/// Database errors surface as the operation's transient kind; the cause is
/// logged here since the error kinds carry only the product ID.
pub struct PgProductStorage {
    pool: PgPool,
}

impl PgProductStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: f64,
    quantity: i32,
    category: String,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            price: row.price,
            quantity: row.quantity,
            category: row.category,
        }
    }
}

#[async_trait]
impl ProductStorage for PgProductStorage {
    async fn save(&self, product: &Product) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, price, quantity, category)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name, price = EXCLUDED.price, quantity = EXCLUDED.quantity,
                category = EXCLUDED.category, updated_at = NOW()
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(product.quantity)
        .bind(&product.category)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(product_id = product.id, error = %e, "Failed to save product");
            StorageError::FailedToSave(product.id)
        })?;

        Ok(())
    }

    async fn get_by_id(&self, id: ProductId) -> Result<Product, StorageError> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, price, quantity, category FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(product_id = id, error = %e, "Failed to get product");
            StorageError::FailedToGet(id)
        })?;

        row.map(Product::from).ok_or(StorageError::NotFound(id))
    }

    async fn delete(&self, id: ProductId) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(product_id = id, error = %e, "Failed to delete product");
                StorageError::FailedToDelete(id)
            })?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(id));
        }

        Ok(())
    }
}
