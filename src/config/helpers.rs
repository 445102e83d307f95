// src/config/helpers.rs
// Helper functions for loading environment variables

use std::env;
use std::str::FromStr;

pub fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(val) if !val.trim().is_empty() => clean_value(&val).to_string(),
        _ => default.to_string(),
    }
}

pub fn env_opt(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| clean_value(&v).to_string())
        .filter(|v| !v.is_empty())
}

/// Parses `key` into `T`, falling back to `default` when missing or unparsable.
pub fn env_parsed_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(val) => match clean_value(&val).parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                default
            }
        },
        Err(_) => default,
    }
}

// Values copied from .env files may carry trailing comments
fn clean_value(val: &str) -> &str {
    val.split(" #").next().unwrap_or("").trim()
}
