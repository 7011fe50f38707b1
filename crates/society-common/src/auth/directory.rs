//! Admin account directory
//!
//! A small, fixed set of accounts loaded at startup: either the built-in demo
//! accounts or a JSON file. Only Argon2id hashes are kept in memory.

use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;
use society_core::{AdminUser, Role};
use tracing::{info, warn};

use super::password::{hash_password, is_password_hash, verify_password};
use crate::error::{AppError, AppResult};

/// Built-in accounts: (id, email, name, role, password)
const DEMO_ACCOUNTS: [(&str, &str, &str, Role, &str); 3] = [
    ("1", "admin@society.local", "Society Admin", Role::Admin, "admin123"),
    ("2", "editor@society.local", "Content Editor", Role::Editor, "editor123"),
    ("3", "viewer@society.local", "Committee Viewer", Role::Viewer, "viewer123"),
];

static DEMO_DIRECTORY: OnceLock<Vec<AdminAccount>> = OnceLock::new();
static DUMMY_HASH: OnceLock<String> = OnceLock::new();

/// One login-capable account
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub user: AdminUser,
    password_hash: String,
}

impl AdminAccount {
    /// # Errors
    /// Returns an error if the password cannot be hashed
    pub fn with_password(user: AdminUser, password: &str) -> AppResult<Self> {
        Ok(Self {
            user,
            password_hash: hash_password(password)?,
        })
    }

    /// # Errors
    /// Returns a validation error if `hash` is not a PHC string
    pub fn with_hash(user: AdminUser, hash: impl Into<String>) -> AppResult<Self> {
        let password_hash = hash.into();
        if !is_password_hash(&password_hash) {
            return Err(AppError::Validation(format!(
                "Account {} has a malformed password hash",
                user.email
            )));
        }
        Ok(Self {
            user,
            password_hash,
        })
    }
}

/// Account entry as written in the accounts file
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountRecord {
    id: String,
    email: String,
    name: String,
    role: Role,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    password_hash: Option<String>,
}

/// Credential directory used by the login flow
#[derive(Debug, Clone)]
pub struct AdminDirectory {
    accounts: Vec<AdminAccount>,
}

impl AdminDirectory {
    /// Build a directory from accounts, rejecting duplicate emails
    ///
    /// # Errors
    /// Returns a validation error for an empty list or duplicate emails
    pub fn new(accounts: Vec<AdminAccount>) -> AppResult<Self> {
        if accounts.is_empty() {
            return Err(AppError::Validation(
                "At least one admin account is required".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for account in &accounts {
            if !seen.insert(account.user.email.to_lowercase()) {
                return Err(AppError::Validation(format!(
                    "Duplicate admin account: {}",
                    account.user.email
                )));
            }
        }
        Ok(Self { accounts })
    }

    /// The built-in demo accounts. Hashed once per process.
    ///
    /// # Errors
    /// Returns an error if hashing fails
    pub fn demo() -> AppResult<Self> {
        if let Some(accounts) = DEMO_DIRECTORY.get() {
            return Self::new(accounts.clone());
        }

        let accounts = DEMO_ACCOUNTS
            .iter()
            .map(|(id, email, name, role, password)| {
                AdminAccount::with_password(AdminUser::new(*id, *email, *name, *role), password)
            })
            .collect::<AppResult<Vec<_>>>()?;

        let accounts = DEMO_DIRECTORY.get_or_init(|| accounts).clone();
        Self::new(accounts)
    }

    /// Load accounts from a JSON file (`[{id, email, name, role, password | passwordHash}]`)
    ///
    /// # Errors
    /// Returns an error if the file is unreadable or an entry is invalid
    pub async fn load(path: &Path) -> AppResult<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::Storage(format!("{}: {e}", path.display())))?;
        let records: Vec<AccountRecord> = serde_json::from_str(&raw)
            .map_err(|e| AppError::Validation(format!("{}: {e}", path.display())))?;

        let accounts = records
            .into_iter()
            .map(|record| {
                let user = AdminUser::new(record.id, record.email, record.name, record.role);
                match (record.password_hash, record.password) {
                    (Some(hash), _) => AdminAccount::with_hash(user, hash),
                    (None, Some(password)) => {
                        warn!(email = %user.email, "Admin account stored with a plaintext password");
                        AdminAccount::with_password(user, &password)
                    }
                    (None, None) => Err(AppError::Validation(format!(
                        "Account {} has no password",
                        user.email
                    ))),
                }
            })
            .collect::<AppResult<Vec<_>>>()?;

        info!(count = accounts.len(), path = %path.display(), "Loaded admin accounts");
        Self::new(accounts)
    }

    /// Accounts file when configured, demo accounts otherwise
    ///
    /// # Errors
    /// Returns an error if the accounts cannot be loaded
    pub async fn from_config(accounts_file: Option<&Path>) -> AppResult<Self> {
        match accounts_file {
            Some(path) => Self::load(path).await,
            None => {
                warn!("ADMIN_ACCOUNTS_FILE not set; using built-in demo accounts");
                Self::demo()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Check credentials. Unknown email and wrong password are indistinguishable.
    ///
    /// # Errors
    /// Returns `AppError::InvalidCredentials` when the pair does not match
    pub fn verify(&self, email: &str, password: &str) -> AppResult<AdminUser> {
        let email = email.trim();
        let Some(account) = self
            .accounts
            .iter()
            .find(|a| a.user.email.eq_ignore_ascii_case(email))
        else {
            burn_dummy_verification(password);
            return Err(AppError::InvalidCredentials);
        };

        if verify_password(password, &account.password_hash)? {
            Ok(account.user.clone())
        } else {
            Err(AppError::InvalidCredentials)
        }
    }
}

/// Spend the same work as a real verification so unknown emails are not faster
fn burn_dummy_verification(password: &str) {
    let hash = match DUMMY_HASH.get() {
        Some(hash) => hash,
        None => match hash_password("society-dummy-password") {
            Ok(hash) => DUMMY_HASH.get_or_init(|| hash),
            Err(_) => return,
        },
    };
    let _ = verify_password(password, hash);
}
