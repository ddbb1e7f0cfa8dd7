use std::path::{Path, PathBuf};

use anyhow::Context as _;

/**
 * This module contains all logic for loading shaders and other text assets from disk.
 */
pub mod shader;

/// Resolve `file_name` against the asset directory.
///
/// Absolute paths are used as-is. Relative paths are looked up under
/// `./assets` first, then under the crate's own `assets` directory so that
/// binaries started from another working directory still find their shaders.
pub fn asset_path(file_name: impl AsRef<Path>) -> PathBuf {
    let file_name = file_name.as_ref();
    if file_name.is_absolute() {
        return file_name.to_path_buf();
    }
    let local = Path::new("./").join("assets").join(file_name);
    if local.exists() {
        return local;
    }
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("assets")
        .join(file_name)
}

pub fn load_string(file_name: impl AsRef<Path>) -> anyhow::Result<String> {
    let path = asset_path(file_name);
    let txt = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(txt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_bundled_shaders() {
        let source = load_string("shaders/vertex.wgsl").unwrap();
        assert!(source.contains("fn vs_main"));
    }

    #[test]
    fn missing_files_name_the_path() {
        let err = load_string("shaders/does_not_exist.wgsl").unwrap_err();
        assert!(format!("{err}").contains("does_not_exist.wgsl"));
    }
}
