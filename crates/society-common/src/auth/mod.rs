//! Authentication utilities

mod directory;
mod password;
mod token;

pub use directory::{AdminAccount, AdminDirectory};
pub use password::{hash_password, is_password_hash, verify_password};
pub use token::{generate_session_token, is_well_formed_token};
