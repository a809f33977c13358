//! Integration tests for the SQLite store: repositories against an
//! isolated in-memory database with migrations applied.

use std::time::Duration;

use caja_core::{Money, NewProduct, NewProfile, NewSale, NewSaleLine, PaymentMethod, Role};
use caja_store::{Store, StoreConfig, StoreError};

async fn test_store() -> Store {
    Store::connect(StoreConfig::in_memory())
        .await
        .expect("in-memory store")
}

fn new_product(name: &str, sku: &str, price: i64, stock: i64) -> NewProduct {
    NewProduct {
        sku: Some(sku.to_string()),
        name: name.to_string(),
        price: Money::from_units(price),
        stock,
        category_id: None,
    }
}

#[tokio::test]
async fn migrations_apply_and_store_is_healthy() {
    let store = test_store().await;
    assert!(store.health_check().await);

    let (total, applied) = caja_store::migrations::migration_status(store.pool())
        .await
        .unwrap();
    assert_eq!(total, applied);
}

#[tokio::test]
async fn category_roundtrip_and_ordering() {
    let store = test_store().await;

    store.categories().insert("Snacks").await.unwrap();
    store.categories().insert("Bebidas").await.unwrap();

    let categories = store.categories().list().await.unwrap();
    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Bebidas", "Snacks"]);
}

#[tokio::test]
async fn duplicate_category_name_is_a_unique_violation() {
    let store = test_store().await;

    store.categories().insert("Bebidas").await.unwrap();
    let err = store.categories().insert("Bebidas").await.unwrap_err();
    assert!(matches!(err, StoreError::UniqueViolation { .. }));
}

#[tokio::test]
async fn product_roundtrip() {
    let store = test_store().await;

    let category = store.categories().insert("Bebidas").await.unwrap();
    let inserted = store
        .products()
        .insert(NewProduct {
            sku: Some("GASE-350".to_string()),
            name: "Gaseosa 350ml".to_string(),
            price: Money::from_units(2_500),
            stock: 48,
            category_id: Some(category.id.clone()),
        })
        .await
        .unwrap();

    let fetched = store
        .products()
        .get_by_id(&inserted.id)
        .await
        .unwrap()
        .expect("product exists");

    assert_eq!(fetched.name, "Gaseosa 350ml");
    assert_eq!(fetched.price.units(), 2_500);
    assert_eq!(fetched.stock, 48);
    assert_eq!(fetched.category_id.as_deref(), Some(category.id.as_str()));

    assert!(store.products().get_by_id("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_sku_is_a_unique_violation() {
    let store = test_store().await;

    store
        .products()
        .insert(new_product("Gaseosa 350ml", "GASE-350", 2_500, 48))
        .await
        .unwrap();

    let err = store
        .products()
        .insert(new_product("Otra gaseosa", "GASE-350", 2_800, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::UniqueViolation { .. }));
}

#[tokio::test]
async fn product_update_rewrites_catalog_fields() {
    let store = test_store().await;

    let mut product = store
        .products()
        .insert(new_product("Pan tajado", "PANT-500", 5_400, 12))
        .await
        .unwrap();

    product.price = Money::from_units(5_900);
    product.stock = 20;
    store.products().update(&product).await.unwrap();

    let fetched = store
        .products()
        .get_by_id(&product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.price.units(), 5_900);
    assert_eq!(fetched.stock, 20);
}

#[tokio::test]
async fn stock_read_and_write() {
    let store = test_store().await;

    let product = store
        .products()
        .insert(new_product("Leche entera 1L", "LECH-1000", 4_200, 20))
        .await
        .unwrap();

    assert_eq!(store.products().stock(&product.id).await.unwrap(), 20);

    store.products().set_stock(&product.id, 17).await.unwrap();
    assert_eq!(store.products().stock(&product.id).await.unwrap(), 17);

    let err = store.products().stock("missing").await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));

    let err = store.products().set_stock("missing", 5).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[tokio::test]
async fn low_stock_listing() {
    let store = test_store().await;

    store
        .products()
        .insert(new_product("Queso campesino", "QUES-250", 7_500, 2))
        .await
        .unwrap();
    store
        .products()
        .insert(new_product("Yogur de fresa", "YOGU-180", 2_600, 5))
        .await
        .unwrap();
    store
        .products()
        .insert(new_product("Agua sin gas", "AGUA-600", 1_800, 60))
        .await
        .unwrap();

    let low = store.products().low_stock(5).await.unwrap();
    let names: Vec<&str> = low.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Queso campesino", "Yogur de fresa"]);
}

#[tokio::test]
async fn sale_and_lines_roundtrip() {
    let store = test_store().await;

    let a = store
        .products()
        .insert(new_product("Gaseosa 350ml", "GASE-350", 2_500, 48))
        .await
        .unwrap();
    let b = store
        .products()
        .insert(new_product("Jugo de caja", "JUGO-200", 1_500, 36))
        .await
        .unwrap();

    let sale = store
        .sales()
        .insert_sale(NewSale {
            subtotal: Money::from_units(6_500),
            tax: Money::from_units(1_235),
            total: Money::from_units(7_735),
            payment_method: PaymentMethod::Cash,
        })
        .await
        .unwrap();

    store
        .sales()
        .insert_lines(
            &sale.id,
            &[
                NewSaleLine {
                    product_id: a.id.clone(),
                    quantity: 2,
                    unit_price: Money::from_units(2_500),
                },
                NewSaleLine {
                    product_id: b.id.clone(),
                    quantity: 1,
                    unit_price: Money::from_units(1_500),
                },
            ],
        )
        .await
        .unwrap();

    let fetched = store.sales().get_by_id(&sale.id).await.unwrap().unwrap();
    assert_eq!(fetched.total.units(), 7_735);
    assert_eq!(fetched.payment_method, PaymentMethod::Cash);

    let lines = store.sales().lines(&sale.id).await.unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].product_id, a.id);
    assert_eq!(lines[0].quantity, 2);
    assert_eq!(lines[1].product_id, b.id);

    let line_sum: i64 = lines
        .iter()
        .map(|l| l.line_total().units())
        .sum();
    assert_eq!(line_sum, fetched.subtotal.units());
}

#[tokio::test]
async fn sale_line_for_unknown_sale_is_a_foreign_key_violation() {
    let store = test_store().await;

    let product = store
        .products()
        .insert(new_product("Chocolatina", "CHOC-01", 1_200, 80))
        .await
        .unwrap();

    let err = store
        .sales()
        .insert_lines(
            "no-such-sale",
            &[NewSaleLine {
                product_id: product.id,
                quantity: 1,
                unit_price: Money::from_units(1_200),
            }],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::ForeignKeyViolation { .. }));
}

#[tokio::test]
async fn recent_sales_are_newest_first() {
    let store = test_store().await;

    for total in [1_000, 2_000, 3_000] {
        store
            .sales()
            .insert_sale(NewSale {
                subtotal: Money::from_units(total),
                tax: Money::zero(),
                total: Money::from_units(total),
                payment_method: PaymentMethod::Card,
            })
            .await
            .unwrap();
        // Distinct created_at values keep the ordering assertion meaningful
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let recent = store.sales().list_recent(2).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].sale.total.units(), 3_000);
    assert_eq!(recent[1].sale.total.units(), 2_000);
}

#[tokio::test]
async fn profile_roundtrip_and_active_flag() {
    let store = test_store().await;

    let profile = store
        .profiles()
        .insert(NewProfile {
            id: "auth-user-1".to_string(),
            name: "Ana".to_string(),
            email: "ana@tienda.co".to_string(),
            role: Role::Cashier,
        })
        .await
        .unwrap();
    assert!(profile.active);

    store.profiles().set_active(&profile.id, false).await.unwrap();
    let fetched = store
        .profiles()
        .get_by_id(&profile.id)
        .await
        .unwrap()
        .unwrap();
    assert!(!fetched.active);
    assert_eq!(fetched.role, Role::Cashier);

    let err = store
        .profiles()
        .insert(NewProfile {
            id: "auth-user-2".to_string(),
            name: "Otra Ana".to_string(),
            email: "ana@tienda.co".to_string(),
            role: Role::Admin,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::UniqueViolation { .. }));

    let err = store.profiles().set_active("missing", true).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}
