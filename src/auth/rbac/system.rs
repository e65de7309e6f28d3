//! RBAC registry and built-in catalog

use crate::config::RbacConfig;
use crate::utils::error::Result;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

use super::types::{Permission, Role};

/// Resources covered by the built-in CRUD permission grid
const CRUD_RESOURCES: &[(&str, &str)] = &[
    ("USERS", "users"),
    ("ROLES", "roles"),
    ("BULLETINS", "bulletins"),
    ("PLAZAS", "plazas"),
    ("STORES", "stores"),
    ("PRODUCTS", "products"),
];

const CRUD_ACTIONS: &[&str] = &["CREATE", "READ", "UPDATE", "DELETE"];

/// RBAC registry for roles and permissions
#[derive(Debug, Clone)]
pub struct RbacSystem {
    /// RBAC configuration
    pub(super) config: RbacConfig,
    /// Role definitions keyed by name
    pub(super) roles: HashMap<String, Role>,
    /// Permission definitions keyed by name
    pub(super) permissions: HashMap<String, Permission>,
}

impl RbacSystem {
    /// Create a new RBAC registry with the built-in catalog
    pub fn new(config: &RbacConfig) -> Result<Self> {
        info!("Initializing RBAC system");

        let mut rbac = Self {
            config: config.clone(),
            roles: HashMap::new(),
            permissions: HashMap::new(),
        };

        rbac.initialize_default_permissions();
        rbac.initialize_default_roles();

        info!(
            "RBAC system initialized with {} roles and {} permissions",
            rbac.roles.len(),
            rbac.permissions.len()
        );
        Ok(rbac)
    }

    fn initialize_default_permissions(&mut self) {
        debug!("Initializing default permissions");

        for (resource, label) in CRUD_RESOURCES {
            for action in CRUD_ACTIONS {
                let permission = Permission {
                    name: format!("{}_{}", resource, action),
                    description: format!("{} {}", capitalize(action), label),
                    resource: resource.to_string(),
                    action: action.to_string(),
                    is_system: true,
                };
                self.permissions.insert(permission.name.clone(), permission);
            }
        }

        // Facility access permissions outside the CRUD grid
        for (name, description, resource) in [
            ("SECURITY_ACCESS", "Security access", "SECURITY"),
            ("PARKING_ACCESS", "Parking access", "PARKING"),
        ] {
            self.permissions.insert(
                name.to_string(),
                Permission {
                    name: name.to_string(),
                    description: description.to_string(),
                    resource: resource.to_string(),
                    action: "ACCESS".to_string(),
                    is_system: true,
                },
            );
        }

        debug!("Initialized {} default permissions", self.permissions.len());
    }

    fn initialize_default_roles(&mut self) {
        debug!("Initializing default roles");

        let all_permissions: HashSet<String> = self.permissions.keys().cloned().collect();
        let employee_base: HashSet<String> = ["BULLETINS_READ", "BULLETINS_CREATE"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let default_roles = vec![
            Role {
                name: "MANAGER".to_string(),
                description: "Plaza manager with full access".to_string(),
                permissions: all_permissions.clone(),
                is_system: true,
            },
            Role {
                name: "GERENTE".to_string(),
                description: "Externally registered plaza manager with full access".to_string(),
                permissions: all_permissions,
                is_system: true,
            },
            Role {
                name: "EMPLOYEE_SECURITY".to_string(),
                description: "Security personnel".to_string(),
                permissions: with(&employee_base, "SECURITY_ACCESS"),
                is_system: true,
            },
            Role {
                name: "EMPLOYEE_PARKING".to_string(),
                description: "Parking personnel".to_string(),
                permissions: with(&employee_base, "PARKING_ACCESS"),
                is_system: true,
            },
            Role {
                name: "EMPLOYEE_GENERAL".to_string(),
                description: "General employee".to_string(),
                permissions: employee_base,
                is_system: true,
            },
            Role {
                name: "STORE_OWNER".to_string(),
                description: "Store owner".to_string(),
                permissions: ["STORES_READ", "PRODUCTS_READ", "BULLETINS_READ"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                is_system: true,
            },
        ];

        for role in default_roles {
            self.roles.insert(role.name.clone(), role);
        }

        debug!("Initialized {} default roles", self.roles.len());
    }

    /// Look up a role by name
    pub fn get_role(&self, name: &str) -> Option<&Role> {
        self.roles.get(name)
    }

    /// Look up a permission by name
    pub fn get_permission(&self, name: &str) -> Option<&Permission> {
        self.permissions.get(name)
    }

    /// List all roles
    pub fn list_roles(&self) -> Vec<&Role> {
        self.roles.values().collect()
    }

    /// List all permissions
    pub fn list_permissions(&self) -> Vec<&Permission> {
        self.permissions.values().collect()
    }

    /// Check whether a role name counts as administrative
    pub fn is_admin_role(&self, role: &str) -> bool {
        self.config.admin_roles.iter().any(|r| r == role)
    }

    /// Default role name for new users
    pub fn default_role(&self) -> &str {
        &self.config.default_role
    }
}

fn with(base: &HashSet<String>, extra: &str) -> HashSet<String> {
    let mut set = base.clone();
    set.insert(extra.to_string());
    set
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
