//! Central router file patching.
//!
//! Each generated module registers itself in the project's router index by
//! adding an import line and an entry in the `apiRoutes` array. The patch is
//! substring-guarded: running it twice for the same module changes nothing.

use crate::codegen::fs_utils;
use std::path::Path;

/// Splice a module's import and route registration into router file content.
///
/// Pure over text so it can be tested without a filesystem. Unknown file
/// shapes degrade gracefully: missing imports put the new import at the top,
/// and a missing `apiRoutes` array leaves the registration out with a
/// warning from the caller side.
pub fn patch_router_content(content: &str, folder_name: &str, pascal_name: &str) -> String {
    let mut content = content.to_string();

    let import_statement = format!(
        "import {{ {}Routes }} from '../app/modules/{}/{}.route'",
        pascal_name, folder_name, folder_name
    );
    if !content.contains(&import_statement) {
        match content.rfind("import ") {
            Some(last_import) => {
                let insert_at = content[last_import..]
                    .find('\n')
                    .map(|i| last_import + i + 1)
                    .unwrap_or(content.len());
                content.insert_str(insert_at, &format!("{}\n", import_statement));
            }
            None => {
                content = format!("{}\n{}", import_statement, content);
            }
        }
    }

    let registration = format!(
        "{{ path: '/{}', route: {}Routes }}",
        folder_name, pascal_name
    );
    if !content.contains(&registration) {
        if let Some(splice) = find_api_routes_splice(&content) {
            let insert_text = if splice.has_entries {
                format!(",\n  {}", registration)
            } else {
                format!("  {}", registration)
            };
            content.insert_str(splice.insert_at, &insert_text);
        } else {
            tracing::warn!("could not find apiRoutes array in router file");
        }
    }

    content
}

struct ArraySplice {
    insert_at: usize,
    has_entries: bool,
}

fn find_api_routes_splice(content: &str) -> Option<ArraySplice> {
    let decl = content.find("const apiRoutes")?;
    let eq = content[decl..].find('=')? + decl;
    let open = content[eq..].find('[')? + eq;
    let close = content[open..].find(']')? + open;
    // splice after the last entry, not after its trailing newline
    let inner = &content[open + 1..close];
    Some(ArraySplice {
        insert_at: open + 1 + inner.trim_end().len(),
        has_entries: inner.contains('{'),
    })
}

/// Patch the router file on disk, creating nothing if the file is absent.
pub fn update_router_file(
    routes_file: &Path,
    folder_name: &str,
    pascal_name: &str,
) -> Result<(), String> {
    if !routes_file.exists() {
        println!("  ⚠ Router file not found: {}", routes_file.display());
        return Ok(());
    }

    let content = fs_utils::read_file(routes_file)?;
    let patched = patch_router_content(&content, folder_name, pascal_name);

    if patched != content {
        fs_utils::write_file(routes_file, &patched)
            .map_err(|e| format!("Failed to update {}: {}", routes_file.display(), e))?;
        println!("  ✓ Updated router file: {}", routes_file.display());
    } else {
        println!("  ℹ Router already registers {}", folder_name);
    }

    Ok(())
}
