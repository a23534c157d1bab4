//! Generator configuration.
//!
//! Paths come from an optional `moduleGenerator` block in the project's
//! `package.json`; everything absent falls back to the conventional layout.
//! Postman credentials come from the environment (loaded from `.env` by the
//! binary before startup).

use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_MODULES_DIR: &str = "src/app/modules";
pub const DEFAULT_ROUTES_FILE: &str = "src/routes/index.ts";

/// Where generated modules and the central router live, relative to the
/// target project root.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub modules_dir: PathBuf,
    pub routes_file: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            modules_dir: PathBuf::from(DEFAULT_MODULES_DIR),
            routes_file: PathBuf::from(DEFAULT_ROUTES_FILE),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct PackageJson {
    #[serde(rename = "moduleGenerator", default)]
    module_generator: ModuleGeneratorSection,
}

#[derive(Debug, Deserialize, Default)]
struct ModuleGeneratorSection {
    #[serde(rename = "modulesDir")]
    modules_dir: Option<String>,
    #[serde(rename = "routesFile")]
    routes_file: Option<String>,
}

impl GeneratorConfig {
    /// Load from `<project_root>/package.json`, falling back to defaults.
    ///
    /// A missing or malformed file is not an error. Generation can proceed
    /// with the conventional paths either way.
    pub fn load(project_root: &Path) -> GeneratorConfig {
        let package_json = project_root.join("package.json");
        let section = std::fs::read_to_string(&package_json)
            .ok()
            .and_then(|raw| match serde_json::from_str::<PackageJson>(&raw) {
                Ok(pkg) => Some(pkg.module_generator),
                Err(e) => {
                    tracing::warn!("ignoring malformed package.json: {}", e);
                    None
                }
            })
            .unwrap_or_default();

        GeneratorConfig {
            modules_dir: PathBuf::from(
                section.modules_dir.as_deref().unwrap_or(DEFAULT_MODULES_DIR),
            ),
            routes_file: PathBuf::from(
                section.routes_file.as_deref().unwrap_or(DEFAULT_ROUTES_FILE),
            ),
        }
    }
}

/// Credentials for the remote Postman workspace.
#[derive(Debug, Clone)]
pub struct PostmanEnv {
    pub api_key: String,
    pub collection_id: String,
}

impl PostmanEnv {
    /// Read `POSTMAN_API_KEY` and `POSTMAN_COLLECTION_ID`.
    ///
    /// Returns `None` when either is unset so remote sync can be skipped
    /// quietly rather than treated as a failure.
    pub fn from_env() -> Option<PostmanEnv> {
        let api_key = env::var("POSTMAN_API_KEY").ok()?;
        let collection_id = env::var("POSTMAN_COLLECTION_ID").ok()?;
        if api_key.is_empty() || collection_id.is_empty() {
            return None;
        }
        Some(PostmanEnv {
            api_key,
            collection_id,
        })
    }
}
