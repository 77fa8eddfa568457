use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use std::path::PathBuf;
use walkdir::WalkDir;

/// Discover standard catalog files under `catalog_dir`.
///
/// Walks the directory for `*.toml` files in stable sorted order so
/// registration (and duplicate detection) is deterministic.
pub fn discover_standard_files(catalog_dir: &Utf8Path) -> anyhow::Result<Vec<Utf8PathBuf>> {
    if !catalog_dir.is_dir() {
        anyhow::bail!("catalog directory does not exist: {}", catalog_dir);
    }

    let mut out: Vec<Utf8PathBuf> = Vec::new();
    for entry in WalkDir::new(catalog_dir) {
        let entry = entry.with_context(|| format!("walk {}", catalog_dir))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(path) = pathbuf_to_utf8(entry.path().to_path_buf()) else {
            continue;
        };
        if path.extension() == Some("toml") {
            out.push(path);
        }
    }

    // Stable order.
    out.sort();
    out.dedup();

    Ok(out)
}

fn pathbuf_to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path")
    }

    fn write_file(path: &Utf8Path, contents: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, contents).expect("write file");
    }

    #[test]
    fn discover_returns_sorted_toml_files() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);

        write_file(&root.join("zeta.toml"), "");
        write_file(&root.join("alpha.toml"), "");
        write_file(&root.join("nested/beta.toml"), "");
        write_file(&root.join("readme.md"), "not a catalog");

        let files = discover_standard_files(&root).expect("discover");
        let names: Vec<&str> = files
            .iter()
            .filter_map(|p| p.strip_prefix(&root).ok())
            .map(|p| p.as_str())
            .collect();
        assert_eq!(names, vec!["alpha.toml", "nested/beta.toml", "zeta.toml"]);
    }

    #[test]
    fn discover_missing_directory_returns_error() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        let err = discover_standard_files(&root.join("absent")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
