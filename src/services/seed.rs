//! Startup data seeding
//!
//! Fills empty tables with the built-in permission catalog, the demo plazas
//! and their staff accounts. Each step only runs when its table is empty, so
//! restarting the gateway never duplicates rows.

use crate::auth::rbac::RbacSystem;
use crate::core::models::{Bulletin, Plaza, RoleRecord, User};
use crate::storage::StorageLayer;
use crate::utils::crypto::hash_password;
use crate::utils::error::Result;
use chrono::{Duration, Utc};
use tracing::{debug, info};

const SEED_PASSWORD: &str = "password123";

/// Role names in insertion order, so seeded role ids are stable
const SEED_ROLES: &[&str] = &[
    "MANAGER",
    "EMPLOYEE_SECURITY",
    "EMPLOYEE_PARKING",
    "EMPLOYEE_GENERAL",
    "STORE_OWNER",
    "GERENTE",
];

/// Populate empty tables with the demo catalog
pub async fn run(storage: &StorageLayer, rbac: &RbacSystem) -> Result<()> {
    info!("Starting data initialization");

    create_permissions(storage, rbac).await?;
    create_roles(storage, rbac).await?;
    create_plazas(storage).await?;
    create_users(storage).await?;
    create_bulletins(storage).await?;

    info!("Data initialization completed");
    Ok(())
}

async fn create_permissions(storage: &StorageLayer, rbac: &RbacSystem) -> Result<()> {
    let db = storage.db();
    if db.count_permissions().await? > 0 {
        return Ok(());
    }
    debug!("Creating permissions");

    let mut catalog = rbac.list_permissions();
    catalog.sort_by(|a, b| a.name.cmp(&b.name));

    for permission in catalog {
        db.create_permission(crate::core::models::PermissionRecord::new(
            &permission.name,
            &permission.description,
            &permission.resource,
            &permission.action,
        ))
        .await?;
    }

    Ok(())
}

async fn create_roles(storage: &StorageLayer, rbac: &RbacSystem) -> Result<()> {
    let db = storage.db();
    if db.count_roles().await? > 0 {
        return Ok(());
    }
    debug!("Creating roles");

    for role_name in SEED_ROLES {
        let Some(role) = rbac.get_role(role_name) else {
            continue;
        };

        let mut permission_ids = Vec::new();
        for permission_name in &role.permissions {
            if let Some(stored) = db.find_permission_by_name(permission_name).await? {
                permission_ids.push(stored.id);
            }
        }
        permission_ids.sort_unstable();

        let mut record = RoleRecord::new(&role.name, &role.description);
        record.permission_ids = permission_ids;
        db.create_role(record).await?;
    }

    Ok(())
}

async fn create_plazas(storage: &StorageLayer) -> Result<()> {
    let db = storage.db();
    if db.count_plazas().await? > 0 {
        return Ok(());
    }
    debug!("Creating plazas");

    let mut plaza1 = Plaza::new("Centro Comercial Plaza Central");
    plaza1.description = Some("Modern shopping center in the heart of the city".to_string());
    plaza1.address = Some("Calle Principal 123, Ciudad Central".to_string());
    plaza1.phone_number = Some("+1-555-0123".to_string());
    plaza1.email = Some("info@plazacentral.com".to_string());
    plaza1.opening_hours = Some("09:00".to_string());
    plaza1.closing_hours = Some("22:00".to_string());
    db.create_plaza(plaza1).await?;

    let mut plaza2 = Plaza::new("Plaza Norte Shopping Mall");
    plaza2.description = Some("Large shopping mall in the north of the city".to_string());
    plaza2.address = Some("Avenida Norte 456, Ciudad Central".to_string());
    plaza2.phone_number = Some("+1-555-0124".to_string());
    plaza2.email = Some("contacto@plazanorte.com".to_string());
    plaza2.opening_hours = Some("10:00".to_string());
    plaza2.closing_hours = Some("21:00".to_string());
    db.create_plaza(plaza2).await?;

    Ok(())
}

async fn create_users(storage: &StorageLayer) -> Result<()> {
    let db = storage.db();
    if db.count_users().await? > 0 {
        return Ok(());
    }
    debug!("Creating users");

    let plaza1 = db.find_plaza_by_name("Centro Comercial Plaza Central").await?;
    let plaza2 = db.find_plaza_by_name("Plaza Norte Shopping Mall").await?;

    let staff = [
        ("manager1", "manager@plazacentral.com", "John", "Doe", "+1-555-0001", &plaza1, "MANAGER"),
        ("manager2", "manager@plazanorte.com", "Jane", "Smith", "+1-555-0002", &plaza2, "MANAGER"),
        ("security1", "security@plazacentral.com", "Jane", "Smith", "+1-555-0002", &plaza1, "EMPLOYEE_SECURITY"),
        ("parking1", "parking@plazacentral.com", "Mike", "Johnson", "+1-555-0003", &plaza1, "EMPLOYEE_PARKING"),
        ("employee1", "employee@plazacentral.com", "Sarah", "Wilson", "+1-555-0004", &plaza1, "EMPLOYEE_GENERAL"),
    ];

    for (username, email, first_name, last_name, phone, plaza, role_name) in staff {
        let mut user = User::new(username, email, hash_password(SEED_PASSWORD)?);
        user.first_name = first_name.to_string();
        user.last_name = last_name.to_string();
        user.phone_number = Some(phone.to_string());
        user.plaza_id = plaza.as_ref().map(|p| p.id);
        if let Some(role) = db.find_role_by_name(role_name).await? {
            user.role_ids = vec![role.id];
        }
        db.create_user(user).await?;
    }

    Ok(())
}

async fn create_bulletins(storage: &StorageLayer) -> Result<()> {
    let db = storage.db();
    if db.count_bulletins().await? > 0 {
        return Ok(());
    }
    debug!("Creating sample bulletins");

    let plaza = db.find_plaza_by_name("Centro Comercial Plaza Central").await?;
    let manager = db.find_user_by_username("manager1").await?;

    let (Some(plaza), Some(manager)) = (plaza, manager) else {
        return Ok(());
    };

    let today = Utc::now().date_naive();
    let yesterday = today - Duration::days(1);

    db.create_bulletin(Bulletin::new(
        format!("Daily Market Prices - {}", today),
        "Fresh produce prices for today:\n\
         - Potatoes: $1000/kg\n\
         - Tomatoes: $2000/kg\n\
         - Onions: $1500/kg\n\
         - Carrots: $1800/kg\n\
         - Lettuce: $2500/kg\n\n\
         Special offers:\n\
         - Buy 2 get 1 free on selected fruits\n\
         - 20% discount on organic vegetables",
        today,
        plaza.id,
        manager.id,
    ))
    .await?;

    db.create_bulletin(Bulletin::new(
        format!("Daily Market Prices - {}", yesterday),
        "Yesterday's market update:\n\
         - Potatoes: $950/kg\n\
         - Tomatoes: $2100/kg\n\
         - Onions: $1400/kg\n\
         - Carrots: $1700/kg\n\
         - Lettuce: $2400/kg",
        yesterday,
        plaza.id,
        manager.id,
    ))
    .await?;

    Ok(())
}
