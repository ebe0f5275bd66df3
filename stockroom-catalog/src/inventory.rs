use std::collections::HashMap;
use stockroom_core::{CatalogError, Product, ProductId};

/// In-memory product collection keyed by ID.
///
/// There is no internal lock. Callers sharing an `Inventory` between tasks
/// must wrap it themselves (the API layer uses a `RwLock`).
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    products: HashMap<ProductId, Product>,
}

impl Inventory {
    pub fn new() -> Self {
        Self {
            products: HashMap::new(),
        }
    }

    /// Insert a new product, rejecting duplicate IDs
    pub fn add_product(&mut self, product: Product) -> Result<(), CatalogError> {
        if self.products.contains_key(&product.id) {
            return Err(CatalogError::ProductAlreadyExists(product.id));
        }

        self.products.insert(product.id, product);
        Ok(())
    }

    /// Remove a product by ID and hand it back
    pub fn remove_product(&mut self, id: ProductId) -> Result<Product, CatalogError> {
        self.products
            .remove(&id)
            .ok_or_else(|| CatalogError::ProductNotFound(id.to_string()))
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    pub fn get_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.get_mut(&id)
    }

    /// Find a product by exact name. When several share the name the lowest ID wins.
    pub fn find_product_by_name(&self, name: &str) -> Result<&Product, CatalogError> {
        self.products
            .values()
            .filter(|p| p.name == name)
            .min_by_key(|p| p.id)
            .ok_or_else(|| CatalogError::ProductNotFound(name.to_string()))
    }

    /// All products in `category`, ascending by ID
    pub fn list_by_category(&self, category: &str) -> Vec<Product> {
        let mut products: Vec<Product> = self
            .products
            .values()
            .filter(|p| p.category == category)
            .cloned()
            .collect();
        products.sort_by_key(|p| p.id);
        products
    }

    /// Every product, ascending by ID
    pub fn products(&self) -> Vec<Product> {
        let mut products: Vec<Product> = self.products.values().cloned().collect();
        products.sort_by_key(|p| p.id);
        products
    }

    /// Sum of `price * quantity` over all products
    pub fn total_value(&self) -> f64 {
        self.products.values().fold(0.0, |total, p| total + p.value())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: ProductId, name: &str, category: &str) -> Product {
        Product::new(id, name, 0.0, 0, category)
    }

    #[test]
    fn test_add_product_rejects_duplicates() {
        let mut inventory = Inventory::new();
        let original = product(1, "Test Product", "Test");

        inventory.add_product(original.clone()).unwrap();
        assert_eq!(inventory.get(1), Some(&original));

        let err = inventory.add_product(product(1, "Impostor", "Other")).unwrap_err();
        assert_eq!(err, CatalogError::ProductAlreadyExists(1));

        // First insert is untouched
        assert_eq!(inventory.get(1), Some(&original));
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn test_remove_product_twice() {
        let mut inventory = Inventory::new();
        inventory.add_product(product(1, "Test Product", "Test")).unwrap();

        let removed = inventory.remove_product(1).unwrap();
        assert_eq!(removed.name, "Test Product");
        assert!(inventory.get(1).is_none());

        assert_eq!(
            inventory.remove_product(1).unwrap_err(),
            CatalogError::ProductNotFound("1".to_string())
        );
    }

    #[test]
    fn test_find_product_by_name() {
        let mut inventory = Inventory::new();
        inventory.add_product(product(5, "Twin", "A")).unwrap();
        inventory.add_product(product(2, "Twin", "B")).unwrap();
        inventory.add_product(product(9, "Solo", "A")).unwrap();

        let found = inventory.find_product_by_name("Twin").unwrap();
        assert_eq!(found.id, 2);

        assert_eq!(inventory.find_product_by_name("Solo").unwrap().id, 9);
        assert_eq!(
            inventory.find_product_by_name("Nonexistent Product").unwrap_err(),
            CatalogError::ProductNotFound("Nonexistent Product".to_string())
        );
    }

    #[test]
    fn test_list_by_category() {
        let mut inventory = Inventory::new();
        let p1 = product(1, "Product 1", "Category 1");
        let p2 = product(2, "Product 2", "Category 2");
        let p3 = product(3, "Product 3", "Category 1");
        inventory.add_product(p3.clone()).unwrap();
        inventory.add_product(p2).unwrap();
        inventory.add_product(p1.clone()).unwrap();

        let listed = inventory.list_by_category("Category 1");
        assert_eq!(listed, vec![p1, p3]);

        assert!(inventory.list_by_category("Missing").is_empty());
    }

    #[test]
    fn test_total_value() {
        let mut inventory = Inventory::new();
        assert_eq!(inventory.total_value(), 0.0);

        inventory.add_product(Product::new(1, "A", 10.0, 2, "X")).unwrap();
        inventory.add_product(Product::new(2, "B", 20.0, 1, "X")).unwrap();
        assert_eq!(inventory.total_value(), 40.0);
    }

    #[test]
    fn test_mutation_through_get_mut() {
        let mut inventory = Inventory::new();
        inventory.add_product(Product::new(1, "A", 10.0, 2, "X")).unwrap();

        inventory.get_mut(1).unwrap().sell(2).unwrap();
        assert_eq!(inventory.get(1).unwrap().quantity, 0);
        assert_eq!(inventory.total_value(), 0.0);
        assert!(!inventory.is_empty());
    }
}
