// src/auth/password.rs

use bcrypt::{hash, verify};

use crate::error::PortalResult;

pub fn hash_password(password: &str, cost: u32) -> PortalResult<String> {
    Ok(hash(password, cost)?)
}

pub fn verify_password(password: &str, hash: &str) -> PortalResult<bool> {
    Ok(verify(password, hash)?)
}
