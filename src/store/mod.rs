pub mod preferences;
pub mod subscription_history;

use std::fs;
use std::path::Path;

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(parent).map_err(|e| format!("Failed to create {}: {}", parent.display(), e))
}
