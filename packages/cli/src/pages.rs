//! Locating and reading page documents in the source directory.

use anyhow::{anyhow, Result};
use parchment_schema::{deserialize, Document};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Menu file kept next to the pages
pub const NAVIGATION_FILE: &str = "navigation.json";

/// Every page document under `dir`, sorted
pub fn find_pages(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        let is_json = path.extension().and_then(|s| s.to_str()) == Some("json");
        let is_menu = path.file_name().and_then(|s| s.to_str()) == Some(NAVIGATION_FILE);
        if entry.file_type().is_file() && is_json && !is_menu {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

/// Pages to act on: a single file, or every page of a directory
pub fn collect_pages(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        Ok(vec![input.to_path_buf()])
    } else if input.is_dir() {
        find_pages(input)
    } else {
        Err(anyhow!("Input path does not exist: {}", input.display()))
    }
}

pub fn load_page(path: &Path) -> Result<Document> {
    let bytes = fs::read(path)?;
    deserialize(&bytes).map_err(|e| anyhow!("{}: {}", path.display(), e))
}

/// Page id of a file: its path below `src_dir` without extension
pub fn page_id(path: &Path, src_dir: &Path) -> String {
    let relative = path.strip_prefix(src_dir).unwrap_or(path);
    relative
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Public path of a page id; `home` is the site root
pub fn page_href(page_id: &str) -> String {
    if page_id == "home" {
        "/".to_string()
    } else {
        format!("/{}", page_id)
    }
}

/// Page id → public path for every page in the source directory
pub fn page_directory(src_dir: &Path) -> Result<BTreeMap<String, String>> {
    if !src_dir.exists() {
        return Ok(BTreeMap::new());
    }
    Ok(find_pages(src_dir)?
        .iter()
        .map(|path| {
            let id = page_id(path, src_dir);
            let href = page_href(&id);
            (id, href)
        })
        .collect())
}

/// Page and file names must be safe path components
pub fn check_page_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(anyhow!(
            "Invalid page name {:?}: use letters, digits, '-' and '_'",
            name
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_pages_skips_menu() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("ministries")).unwrap();
        for file in ["home.json", "ministries/youth.json", NAVIGATION_FILE, "notes.txt"] {
            fs::write(dir.path().join(file), "{}").unwrap();
        }

        let ids: Vec<String> = find_pages(dir.path())
            .unwrap()
            .iter()
            .map(|p| page_id(p, dir.path()))
            .collect();
        assert_eq!(ids, vec!["home", "ministries/youth"]);
    }

    #[test]
    fn test_page_directory_paths() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("home.json"), "{}").unwrap();
        fs::write(dir.path().join("about.json"), "{}").unwrap();

        let pages = page_directory(dir.path()).unwrap();
        assert_eq!(pages["home"], "/");
        assert_eq!(pages["about"], "/about");
    }

    #[test]
    fn test_page_names() {
        assert!(check_page_name("mass-times").is_ok());
        assert!(check_page_name("../escape").is_err());
        assert!(check_page_name("").is_err());
    }
}
