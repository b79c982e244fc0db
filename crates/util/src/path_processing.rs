use std::path::{Path, PathBuf};

use dirs_next::home_dir;

/// Expands a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    if p == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = p.strip_prefix("~/") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    if let Some(rest) = p.strip_prefix("~\\") {
        // Windows-style
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(p)
}

/// Resolves `path` against `root` unless it is already absolute.
///
/// `~` prefixes are expanded first, so `~/checkout/.env` never gets glued
/// onto the root.
pub fn resolve_against(root: &Path, path: &str) -> PathBuf {
    let expanded = expand_tilde(path);
    if expanded.is_absolute() { expanded } else { root.join(expanded) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_join_the_root() {
        let root = Path::new("/work/codex-mcp");
        assert_eq!(resolve_against(root, "dist/index.js"), PathBuf::from("/work/codex-mcp/dist/index.js"));
        assert_eq!(
            resolve_against(root, "../test-codex-project"),
            PathBuf::from("/work/codex-mcp/../test-codex-project")
        );
    }

    #[test]
    fn absolute_paths_are_kept() {
        let root = Path::new("/work/codex-mcp");
        assert_eq!(resolve_against(root, "/etc/codex/.env"), PathBuf::from("/etc/codex/.env"));
    }

    #[test]
    fn tilde_expands_to_home() {
        let Some(home) = home_dir() else {
            return;
        };
        assert_eq!(expand_tilde("~"), home);
        assert_eq!(expand_tilde("~/codex/.env"), home.join("codex/.env"));
        assert_eq!(resolve_against(Path::new("/ignored"), "~/codex"), home.join("codex"));
    }
}
