//! Module generation orchestration.
//!
//! Renders the per-module artifact set into `<modules_dir>/<folder>/`,
//! registers the module in the central router, drops the shared file-upload
//! helper in place when needed, and hands off to the documentation layer.

use crate::codegen::artifacts::{self, has_file_field};
use crate::codegen::fs_utils;
use crate::codegen::router;
use crate::codegen::types::{ArtifactKind, ParsedFields};
use crate::codegen::utils::capitalize_first;
use crate::config::GeneratorConfig;
use crate::docs::{self, DocOptions};

/// Generate a complete module from parsed field tokens.
///
/// An existing module folder is left untouched: the command warns and
/// returns without writing anything, so accidental reruns cannot clobber
/// hand-edited files.
pub fn create_module(
    name: &str,
    parsed: &ParsedFields,
    config: &GeneratorConfig,
    doc_options: &DocOptions,
) -> Result<(), String> {
    let pascal_name = capitalize_first(name);
    let folder_name = pascal_name.to_lowercase();
    let folder_path = config.modules_dir.join(&folder_name);

    if folder_path.exists() {
        println!("⚠ Folder {} already exists.", folder_name);
        return Ok(());
    }
    std::fs::create_dir_all(&folder_path)
        .map_err(|e| format!("Failed to create {}: {}", folder_path.display(), e))?;
    println!("  ✓ Created folder: {}", folder_name);

    if !parsed.skipped_tokens.is_empty() {
        tracing::debug!(tokens = ?parsed.skipped_tokens, "tokens skipped during parsing");
    }

    for kind in ArtifactKind::ALL {
        if parsed.skip_artifacts.iter().any(|s| s == kind.key()) {
            println!("  ℹ Skipping file: {}.{}.ts", folder_name, kind.key());
            continue;
        }
        let content = artifacts::render(
            kind,
            &pascal_name,
            &folder_name,
            &parsed.fields,
            parsed.file_upload,
        );
        let file_path = folder_path.join(format!("{}.{}.ts", folder_name, kind.key()));
        match fs_utils::write_file(&file_path, content) {
            Ok(()) => println!("  ✓ Created file: {}", file_path.display()),
            // keep going so one bad path does not lose the whole module
            Err(e) => println!("  ⚠ Failed to write {}: {}", file_path.display(), e),
        }
    }

    if has_file_field(&parsed.fields, parsed.file_upload) {
        if let Err(e) = generate_file_helper(config) {
            println!("  ⚠ Failed to write file helper: {}", e);
        }
    }

    if let Err(e) = router::update_router_file(&config.routes_file, &folder_name, &pascal_name) {
        println!("  ⚠ Error updating router file: {}", e);
    }

    if doc_options.update_postman || doc_options.update_swagger {
        docs::update_all_documentation(&pascal_name, &folder_name, &parsed.fields, doc_options);
    }

    println!("✓ Module '{}' created successfully", pascal_name);
    Ok(())
}

const FILE_HELPER_TS: &str = r#"import fs from 'fs';
import path from 'path';

export const removeUploadedFiles = (file: any) => {
  if (!file) return;

  if (Array.isArray(file)) {
    file.forEach(f => removeUploadedFiles(f));
    return;
  }

  if (typeof file === 'object' && file.path) {
    try {
      if (fs.existsSync(file.path)) {
        fs.unlinkSync(file.path);
      }
    } catch (error) {
      console.error('Error removing file:', error);
    }
    return;
  }

  if (typeof file === 'string') {
    try {
      const filePath = path.join(process.cwd(), file);
      if (fs.existsSync(filePath)) {
        fs.unlinkSync(filePath);
      }
    } catch (error) {
      console.error('Error removing file:', error);
    }
  }
};
"#;

/// Write the shared upload-cleanup helper next to the modules tree, once.
///
/// `modules_dir` ends in `app/modules` by convention; the helper lives at
/// the sibling `helpers/fileHelper.ts` that the service imports.
fn generate_file_helper(config: &GeneratorConfig) -> Result<(), String> {
    let base = config
        .modules_dir
        .parent()
        .and_then(|p| p.parent())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| config.modules_dir.clone());
    let helper_path = base.join("helpers").join("fileHelper.ts");

    if helper_path.exists() {
        println!("  ℹ File helper already exists: {}", helper_path.display());
        return Ok(());
    }

    fs_utils::write_file(&helper_path, FILE_HELPER_TS)
        .map_err(|e| format!("Failed to write {}: {}", helper_path.display(), e))?;
    println!("  ✓ Created file: {}", helper_path.display());
    Ok(())
}
