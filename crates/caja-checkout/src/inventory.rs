//! # Inventory Service
//!
//! Catalog management: creating and editing products and categories.
//!
//! Every write is gated by an explicit capability check on the acting
//! profile, then validated, then handed to the store. The store's
//! row-level access control remains the real enforcement boundary; the
//! check here exists so a denied operation never leaves the process.

use tracing::info;

use caja_core::{validation, Action, Category, NewProduct, Product, Profile, LOW_STOCK_THRESHOLD};
use caja_store::Store;

use crate::error::ServiceResult;

/// Catalog management over the shared store handle.
#[derive(Debug, Clone)]
pub struct Inventory {
    store: Store,
}

impl Inventory {
    pub fn new(store: Store) -> Self {
        Inventory { store }
    }

    /// Full product list, for the inventory table.
    pub async fn products(&self) -> ServiceResult<Vec<Product>> {
        Ok(self.store.products().list().await?)
    }

    /// Products at or below the low-stock threshold.
    pub async fn low_stock(&self) -> ServiceResult<Vec<Product>> {
        Ok(self.store.products().low_stock(LOW_STOCK_THRESHOLD).await?)
    }

    /// Creates a product. Requires [`Action::ManageCatalog`].
    pub async fn create_product(
        &self,
        actor: &Profile,
        new: NewProduct,
    ) -> ServiceResult<Product> {
        actor.authorize(Action::ManageCatalog)?;

        validation::validate_name(&new.name)?;
        validation::validate_price(new.price.units())?;
        validation::validate_stock(new.stock)?;
        if let Some(sku) = &new.sku {
            validation::validate_sku(sku)?;
        }

        let product = self.store.products().insert(new).await?;
        info!(id = %product.id, name = %product.name, by = %actor.id, "Product created");
        Ok(product)
    }

    /// Updates a product's catalog fields and stock. Requires
    /// [`Action::ManageCatalog`].
    pub async fn update_product(&self, actor: &Profile, product: &Product) -> ServiceResult<()> {
        actor.authorize(Action::ManageCatalog)?;

        validation::validate_name(&product.name)?;
        validation::validate_price(product.price.units())?;
        validation::validate_stock(product.stock)?;
        if let Some(sku) = &product.sku {
            validation::validate_sku(sku)?;
        }

        self.store.products().update(product).await?;
        info!(id = %product.id, by = %actor.id, "Product updated");
        Ok(())
    }

    /// Creates a category. Requires [`Action::ManageCatalog`].
    pub async fn create_category(&self, actor: &Profile, name: &str) -> ServiceResult<Category> {
        actor.authorize(Action::ManageCatalog)?;
        validation::validate_name(name)?;

        let category = self.store.categories().insert(name.trim()).await?;
        info!(id = %category.id, name = %category.name, by = %actor.id, "Category created");
        Ok(category)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use caja_core::{CoreError, Money, Role};
    use caja_store::{Store, StoreConfig};
    use chrono::Utc;

    fn actor(role: Role) -> Profile {
        Profile {
            id: "u1".to_string(),
            name: "Dana".to_string(),
            email: "dana@tienda.co".to_string(),
            role,
            active: true,
            created_at: Utc::now(),
        }
    }

    fn new_product(name: &str, price: i64, stock: i64) -> NewProduct {
        NewProduct {
            sku: None,
            name: name.to_string(),
            price: Money::from_units(price),
            stock,
            category_id: None,
        }
    }

    async fn inventory() -> Inventory {
        let store = Store::connect(StoreConfig::in_memory()).await.unwrap();
        Inventory::new(store)
    }

    #[tokio::test]
    async fn admin_and_inventory_roles_can_create_products() {
        let inv = inventory().await;

        inv.create_product(&actor(Role::Admin), new_product("Pan tajado", 5_400, 12))
            .await
            .unwrap();
        inv.create_product(
            &actor(Role::Inventory),
            new_product("Almojabana", 1_500, 18),
        )
        .await
        .unwrap();

        assert_eq!(inv.products().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn cashier_is_denied_catalog_writes() {
        let inv = inventory().await;

        let err = inv
            .create_product(&actor(Role::Cashier), new_product("Pan", 800, 40))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Core(CoreError::AccessDenied { .. })
        ));

        let err = inv
            .create_category(&actor(Role::Cashier), "Bebidas")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Core(CoreError::AccessDenied { .. })
        ));
    }

    #[tokio::test]
    async fn invalid_input_is_rejected_before_the_store() {
        let inv = inventory().await;
        let admin = actor(Role::Admin);

        let err = inv
            .create_product(&admin, new_product("", 800, 40))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Core(CoreError::Validation(_))
        ));

        let err = inv
            .create_product(&admin, new_product("Pan", -5, 40))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Core(CoreError::Validation(_))
        ));

        assert!(inv.products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_rewrites_product() {
        let inv = inventory().await;
        let admin = actor(Role::Admin);

        let mut product = inv
            .create_product(&admin, new_product("Pan tajado", 5_400, 12))
            .await
            .unwrap();

        product.price = Money::from_units(5_900);
        inv.update_product(&admin, &product).await.unwrap();

        let listed = inv.products().await.unwrap();
        assert_eq!(listed[0].price.units(), 5_900);
    }

    #[tokio::test]
    async fn low_stock_uses_the_threshold() {
        let inv = inventory().await;
        let admin = actor(Role::Admin);

        inv.create_product(&admin, new_product("Queso", 7_500, 2))
            .await
            .unwrap();
        inv.create_product(&admin, new_product("Agua", 1_800, 60))
            .await
            .unwrap();

        let low = inv.low_stock().await.unwrap();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name, "Queso");
    }
}
