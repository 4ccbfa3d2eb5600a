//! Load configuration from the XDG `config.toml` and the project `.env`, then apply
//! it to the process environment with priority **existing env > .env > XDG**.
//!
//! ```toml
//! # ~/.config/searchgraph/config.toml
//! [env]
//! OPENAI_API_KEY = "sk-..."
//! EXA_API_KEY = "..."
//! SEARCHGRAPH_MODEL = "gpt-4o-mini"
//! ```

mod env_file;
mod xdg_toml;

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

pub use env_file::env_file_path;
pub use xdg_toml::config_path;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    Dotenv(String),
}

/// Merged view of both sources: `.env` entries shadow XDG entries.
pub fn load_merged(
    app_name: &str,
    override_dir: Option<&Path>,
) -> Result<HashMap<String, String>, LoadError> {
    let mut merged = xdg_toml::load_env_map(app_name)?;
    merged.extend(env_file::load_env_map(override_dir)?);
    Ok(merged)
}

/// Sets every key from `.env` / XDG `[env]` that is not already in the process env.
///
/// * `app_name`: XDG directory name, e.g. `"searchgraph"`.
/// * `override_dir`: directory holding `.env` instead of the current directory.
///
/// Returns the keys that were set.
pub fn load_and_apply(
    app_name: &str,
    override_dir: Option<&Path>,
) -> Result<Vec<String>, LoadError> {
    let mut applied = Vec::new();
    for (key, value) in load_merged(app_name, override_dir)? {
        if std::env::var_os(&key).is_some() {
            continue;
        }
        std::env::set_var(&key, value);
        applied.push(key);
    }
    applied.sort();
    Ok(applied)
}
