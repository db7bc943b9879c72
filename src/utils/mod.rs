pub mod constants;
pub mod get_env;
pub mod urls;
