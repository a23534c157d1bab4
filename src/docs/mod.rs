//! Documentation generation and sync.
//!
//! Local artifacts (per-module Postman collections, the shared swagger.json)
//! are always written when their kind is enabled; the remote Postman
//! workspace is synced only when credentials are configured. A failed doc
//! step is reported and skipped so module generation never rolls back over
//! documentation problems.

pub mod interface_scan;
pub mod postman;
pub mod postman_api;
pub mod swagger;

use crate::codegen::types::FieldDefinition;
use crate::codegen::utils::capitalize_first;
use crate::config::PostmanEnv;
use std::path::{Path, PathBuf};

/// Which documentation kinds to produce and where.
#[derive(Debug, Clone)]
pub struct DocOptions {
    pub postman_dir: PathBuf,
    pub swagger_file: PathBuf,
    pub update_postman: bool,
    pub update_swagger: bool,
    pub postman_env: Option<PostmanEnv>,
}

impl Default for DocOptions {
    fn default() -> Self {
        DocOptions {
            postman_dir: PathBuf::from("postman"),
            swagger_file: PathBuf::from("swagger.json"),
            update_postman: true,
            update_swagger: true,
            postman_env: None,
        }
    }
}

/// Regenerate all enabled documentation for one module.
pub fn update_all_documentation(
    pascal_name: &str,
    folder_name: &str,
    fields: &[FieldDefinition],
    options: &DocOptions,
) {
    println!("  ℹ Updating documentation for {}...", pascal_name);

    if options.update_postman {
        let collection = postman::generate_postman_collection(pascal_name, folder_name, fields);

        if let Err(e) = postman::save_postman_collection(folder_name, &collection, &options.postman_dir)
        {
            println!("  ⚠ Error updating Postman collection: {}", e);
        } else if let Some(env) = &options.postman_env {
            println!("  ℹ Syncing {} API to Postman Cloud...", pascal_name);
            if let Err(e) = postman_api::update_postman_collection_via_api(pascal_name, &collection, env)
            {
                println!("  ⚠ Error syncing Postman collection: {}", e);
            }
        }
    }

    if options.update_swagger {
        if let Err(e) =
            swagger::update_swagger_file(pascal_name, folder_name, fields, &options.swagger_file)
        {
            println!("  ⚠ Error updating Swagger documentation: {}", e);
        }
    }
}

/// Refresh documentation for already generated modules by scanning their
/// interface files.
///
/// `target_modules` filters by folder name (case-insensitive); empty means
/// every directory under `modules_dir`. Modules are processed one at a
/// time: when remote sync is on, the shared collection is fetched, merged,
/// and pushed per module, and interleaving those cycles would drop updates.
pub fn update_existing_modules_documentation(
    modules_dir: &Path,
    options: &DocOptions,
    target_modules: &[String],
) -> Result<(), String> {
    if !modules_dir.is_dir() {
        return Err(format!(
            "Modules directory not found: {}",
            modules_dir.display()
        ));
    }

    println!("ℹ Scanning existing modules for documentation updates...");

    let mut module_dirs: Vec<String> = std::fs::read_dir(modules_dir)
        .map_err(|e| format!("Failed to read {}: {}", modules_dir.display(), e))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    module_dirs.sort();

    if !target_modules.is_empty() {
        let targets: Vec<String> = target_modules.iter().map(|m| m.to_lowercase()).collect();
        module_dirs.retain(|dir| targets.contains(&dir.to_lowercase()));
        if module_dirs.is_empty() {
            return Err(format!(
                "None of the specified modules were found: {}",
                target_modules.join(", ")
            ));
        }
    }

    let mut updated = 0;
    for module_dir in &module_dirs {
        let interface_file = modules_dir
            .join(module_dir)
            .join(format!("{}.interface.ts", module_dir));

        if !interface_file.exists() {
            println!("  ⚠ Interface file not found for module: {}", module_dir);
            continue;
        }

        println!("  ℹ Processing module: {}", module_dir);
        match interface_scan::extract_fields_from_interface(&interface_file) {
            Ok(fields) if !fields.is_empty() => {
                let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
                println!("    ✓ Extracted {} fields: {}", fields.len(), names.join(", "));
                let pascal_name = capitalize_first(module_dir);
                update_all_documentation(&pascal_name, module_dir, &fields, options);
                updated += 1;
            }
            Ok(_) => {
                println!("    ⚠ No fields found in {} interface", module_dir);
            }
            Err(e) => {
                println!("    ⚠ Error processing module {}: {}", module_dir, e);
            }
        }
    }

    println!("✓ Updated documentation for {} modules", updated);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::artifacts::interface_ts;
    use crate::codegen::field_parser::parse_field_tokens;
    use tempfile::TempDir;

    #[test]
    fn test_update_existing_modules_writes_docs() {
        let dir = TempDir::new().unwrap();
        let modules_dir = dir.path().join("modules");
        let module_dir = modules_dir.join("user");
        std::fs::create_dir_all(&module_dir).unwrap();

        let parsed = parse_field_tokens(&["name!:string".to_string(), "age:number".to_string()]);
        std::fs::write(
            module_dir.join("user.interface.ts"),
            interface_ts::render("User", &parsed.fields),
        )
        .unwrap();

        let options = DocOptions {
            postman_dir: dir.path().join("postman"),
            swagger_file: dir.path().join("swagger.json"),
            ..Default::default()
        };
        update_existing_modules_documentation(&modules_dir, &options, &[]).unwrap();

        assert!(dir
            .path()
            .join("postman/user.postman_collection.json")
            .exists());
        let swagger = std::fs::read_to_string(dir.path().join("swagger.json")).unwrap();
        assert!(swagger.contains("\"/user\""));
        assert!(swagger.contains("UserCreate"));
    }

    #[test]
    fn test_unknown_target_module_is_an_error() {
        let dir = TempDir::new().unwrap();
        let modules_dir = dir.path().join("modules");
        std::fs::create_dir_all(modules_dir.join("user")).unwrap();

        let options = DocOptions::default();
        let err = update_existing_modules_documentation(
            &modules_dir,
            &options,
            &["ghost".to_string()],
        )
        .unwrap_err();
        assert!(err.contains("ghost"));
    }

    #[test]
    fn test_missing_modules_dir_is_an_error() {
        let options = DocOptions::default();
        let err =
            update_existing_modules_documentation(Path::new("no/such/dir"), &options, &[])
                .unwrap_err();
        assert!(err.contains("Modules directory not found"));
    }
}
