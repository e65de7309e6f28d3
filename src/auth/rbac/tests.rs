//! Tests for the RBAC registry

use super::*;
use crate::config::RbacConfig;

fn rbac() -> RbacSystem {
    RbacSystem::new(&RbacConfig::default()).unwrap()
}

#[test]
fn test_builtin_catalog() {
    let rbac = rbac();

    // 6 CRUD resources x 4 actions + the two facility access permissions
    assert_eq!(rbac.list_permissions().len(), 26);

    for role in [
        "MANAGER",
        "GERENTE",
        "EMPLOYEE_SECURITY",
        "EMPLOYEE_PARKING",
        "EMPLOYEE_GENERAL",
        "STORE_OWNER",
    ] {
        assert!(rbac.get_role(role).is_some(), "missing role {}", role);
    }
}

#[test]
fn test_manager_holds_all_permissions() {
    let rbac = rbac();
    let manager = rbac.get_role("MANAGER").unwrap();

    assert_eq!(manager.permissions.len(), rbac.list_permissions().len());
}

#[test]
fn test_permissions_for_roles_union() {
    let rbac = rbac();

    let effective = rbac.permissions_for_roles(&[
        "EMPLOYEE_SECURITY".to_string(),
        "EMPLOYEE_PARKING".to_string(),
    ]);

    assert!(effective.contains("BULLETINS:READ"));
    assert!(effective.contains("BULLETINS:CREATE"));
    assert!(effective.contains("SECURITY:ACCESS"));
    assert!(effective.contains("PARKING:ACCESS"));
    assert!(!effective.contains("USERS:DELETE"));
}

#[test]
fn test_unknown_role_yields_no_permissions() {
    let rbac = rbac();
    assert!(rbac.permissions_for_roles(&["INTERN".to_string()]).is_empty());
}

#[test]
fn test_check_permissions_requires_all() {
    let rbac = rbac();
    let held = vec!["BULLETINS:READ".to_string(), "BULLETINS:CREATE".to_string()];

    assert!(rbac.check_permissions(&held, &["BULLETINS:READ".to_string()]));
    assert!(!rbac.check_permissions(
        &held,
        &["BULLETINS:READ".to_string(), "USERS:READ".to_string()]
    ));
}

#[test]
fn test_check_any_permission() {
    let rbac = rbac();
    let held = vec!["SECURITY:ACCESS".to_string()];

    assert!(rbac.check_any_permission(
        &held,
        &["PARKING:ACCESS".to_string(), "SECURITY:ACCESS".to_string()]
    ));
    assert!(!rbac.check_any_permission(&held, &["PARKING:ACCESS".to_string()]));
}

#[test]
fn test_wildcard_grants_everything() {
    let rbac = rbac();
    let held = vec!["*".to_string()];

    assert!(rbac.check_permissions(&held, &["USERS:DELETE".to_string()]));
    assert!(rbac.check_resource_permission(&held, "PLAZAS", "UPDATE"));
}

#[test]
fn test_check_resource_permission() {
    let rbac = rbac();
    let held: Vec<String> = rbac
        .permissions_for_roles(&["EMPLOYEE_GENERAL".to_string()])
        .into_iter()
        .collect();

    assert!(rbac.check_resource_permission(&held, "BULLETINS", "READ"));
    assert!(!rbac.check_resource_permission(&held, "BULLETINS", "DELETE"));
}

#[test]
fn test_admin_roles_from_config() {
    let rbac = rbac();

    assert!(rbac.is_admin_role("MANAGER"));
    assert!(!rbac.is_admin_role("EMPLOYEE_GENERAL"));
    assert_eq!(rbac.default_role(), "EMPLOYEE_GENERAL");
}
