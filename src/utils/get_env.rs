use anyhow::Error;
use dotenv::dotenv;
use std::env;

pub fn get_env_var(key: &str) -> Result<String, Error> {
    dotenv().ok();
    Ok(env::var(key)?)
}

// empty values count as unset so a blank line in .env cannot
// half-configure a credential pair
pub fn get_env_var_opt(key: &str) -> Option<String> {
    dotenv().ok();
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => Some(raw),
        _ => None,
    }
}
