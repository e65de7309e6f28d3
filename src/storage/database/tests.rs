//! Tests for the table store

use super::Database;
use crate::core::models::{Bulletin, Plaza, Product, Store, User};
use chrono::NaiveDate;

fn seeded_user(username: &str, plaza_id: Option<i64>) -> User {
    let mut user = User::new(username, format!("{}@plaza.com", username), "$argon2$x");
    user.plaza_id = plaza_id;
    user
}

#[tokio::test]
async fn test_create_assigns_sequential_ids() {
    let db = Database::new();

    let first = db.create_user(seeded_user("a", None)).await.unwrap();
    let second = db.create_user(seeded_user("b", None)).await.unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
}

#[tokio::test]
async fn test_user_lookups_and_uniqueness() {
    let db = Database::new();
    db.create_user(seeded_user("manager1", Some(1))).await.unwrap();

    assert!(db.exists_user_by_username("manager1").await.unwrap());
    assert!(!db.exists_user_by_username("manager2").await.unwrap());
    assert!(db.exists_user_by_email("manager1@plaza.com").await.unwrap());

    let found = db.find_user_by_username("manager1").await.unwrap().unwrap();
    assert!(
        !db.exists_user_by_username_excluding("manager1", found.id)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_plaza_scoped_user_listing() {
    let db = Database::new();
    db.create_user(seeded_user("manager1", Some(1))).await.unwrap();
    db.create_user(seeded_user("manager2", Some(2))).await.unwrap();
    let mut inactive = seeded_user("gone", Some(1));
    inactive.is_active = false;
    db.create_user(inactive).await.unwrap();

    let plaza1 = db.find_users_by_plaza(1).await.unwrap();
    assert_eq!(plaza1.len(), 1);
    assert_eq!(plaza1[0].username, "manager1");
}

#[tokio::test]
async fn test_update_bumps_timestamp() {
    let db = Database::new();
    let user = db.create_user(seeded_user("manager1", Some(1))).await.unwrap();
    let created_at = user.updated_at;

    let mut changed = user.clone();
    changed.first_name = "John".to_string();
    let updated = db.update_user(changed).await.unwrap();

    assert!(updated.updated_at >= created_at);
    assert_eq!(
        db.find_user_by_id(user.id).await.unwrap().unwrap().first_name,
        "John"
    );
}

#[tokio::test]
async fn test_update_unknown_row_fails() {
    let db = Database::new();
    let mut user = seeded_user("ghost", None);
    user.id = 99;

    assert!(db.update_user(user).await.is_err());
}

#[tokio::test]
async fn test_plaza_search() {
    let db = Database::new();
    db.create_plaza(Plaza::new("Centro Comercial Plaza Central"))
        .await
        .unwrap();
    db.create_plaza(Plaza::new("Plaza Norte Shopping Mall"))
        .await
        .unwrap();

    let hits = db.search_plazas_by_name("norte").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Plaza Norte Shopping Mall");

    assert_eq!(db.search_plazas_by_name("plaza").await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_store_name_unique_per_plaza() {
    let db = Database::new();
    db.create_store(Store::new("Fruteria", 1)).await.unwrap();

    assert!(
        db.exists_store_by_name_and_plaza("Fruteria", 1)
            .await
            .unwrap()
    );
    // Same name in another plaza is allowed
    assert!(
        !db.exists_store_by_name_and_plaza("Fruteria", 2)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_bulletins_by_date() {
    let db = Database::new();
    let today = NaiveDate::from_ymd_opt(2026, 8, 4).unwrap();
    let yesterday = today.pred_opt().unwrap();

    db.create_bulletin(Bulletin::new("Today", "prices", today, 1, 1))
        .await
        .unwrap();
    db.create_bulletin(Bulletin::new("Yesterday", "prices", yesterday, 1, 1))
        .await
        .unwrap();
    db.create_bulletin(Bulletin::new("Other plaza", "prices", today, 2, 2))
        .await
        .unwrap();

    let todays = db.find_bulletins_by_plaza_and_date(1, today).await.unwrap();
    assert_eq!(todays.len(), 1);
    assert_eq!(todays[0].title, "Today");

    // Listing is newest first and tenant-filtered
    let all = db.find_bulletins_by_plaza(1).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].title, "Today");
}

#[tokio::test]
async fn test_products_ordered_and_categorized() {
    let db = Database::new();
    db.create_product(Product::new("Tomatoes", "Vegetables", 2000.0, 1))
        .await
        .unwrap();
    db.create_product(Product::new("Apples", "Fruits", 1200.0, 1))
        .await
        .unwrap();
    let mut unavailable = Product::new("Carrots", "Vegetables", 1800.0, 1);
    unavailable.is_available = false;
    db.create_product(unavailable).await.unwrap();

    let products = db.find_products_by_plaza(1).await.unwrap();
    assert_eq!(products[0].name, "Apples");
    assert_eq!(products.last().unwrap().name, "Tomatoes");

    let available = db.find_available_products_by_plaza(1).await.unwrap();
    assert_eq!(available.len(), 2);

    assert_eq!(
        db.product_categories_by_plaza(1).await.unwrap(),
        vec!["Fruits".to_string(), "Vegetables".to_string()]
    );
}
