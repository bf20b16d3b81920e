use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub(crate) fn default_sheets_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "snipsheet")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("sheets.toml");
    Some(path)
}

/// Snippets live next to the document unless given explicitly.
pub(crate) fn default_snippets_path(document: &Path) -> PathBuf {
    let mut name = document.as_os_str().to_owned();
    name.push(".snippets.json");
    PathBuf::from(name)
}
