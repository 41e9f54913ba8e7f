//! Resource lookup across layered source roots

use std::path::{Path, PathBuf};

use crate::core::config::LocatorConfig;

/// Resolves logical resource paths to files on disk.
///
/// At every base directory the candidates are tried in order:
/// `{base}/{path}`, `{base}/src/main/{lang}/{path}` and
/// `{base}/src/main/resources/{path}`. When none exists the search moves one
/// directory up, until the file-system root is reached.
#[derive(Debug, Clone)]
pub struct ResourceLocator {
    root: PathBuf,
    prefixes: Vec<PathBuf>,
}

impl ResourceLocator {
    /// Create a locator searching upward from `root`
    pub fn new(root: impl Into<PathBuf>, config: &LocatorConfig) -> Self {
        let root = root.into();
        let root = std::path::absolute(&root).unwrap_or(root);
        let prefixes = vec![
            PathBuf::new(),
            PathBuf::from("src/main").join(&config.source_language),
            PathBuf::from("src/main/resources"),
        ];
        Self { root, prefixes }
    }

    /// Directory the search starts from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find the file for `path`, or `None` once every ancestor has been tried
    pub fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = path.trim_start_matches('/');
        if relative.is_empty() {
            return None;
        }

        let mut base = Some(self.root.as_path());
        while let Some(dir) = base {
            if let Some(found) = self.resolve_at(dir, relative) {
                tracing::trace!(path, found = %found.display(), "Resolved resource");
                return Some(found);
            }
            base = dir.parent();
        }

        tracing::debug!(path, root = %self.root.display(), "Resource not found");
        None
    }

    fn resolve_at(&self, base: &Path, relative: &str) -> Option<PathBuf> {
        self.prefixes
            .iter()
            .map(|prefix| base.join(prefix).join(relative))
            .find(|candidate| candidate.is_file())
    }
}

/// Lexically resolves `.` and `..` segments of a slash separated path.
///
/// `.` segments are dropped and `..` removes the previous segment (or nothing
/// at the start). Other segments, empty ones included, are kept as they are,
/// so the result never depends on what exists on disk.
///
/// # Examples
/// ```
/// use contractgen::infrastructure::locator::normalize_path;
///
/// assert_eq!(normalize_path("com/example/./img/logo.png"), "com/example/img/logo.png");
/// assert_eq!(normalize_path("com/example/../shared/logo.png"), "com/shared/logo.png");
/// ```
pub fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"data").unwrap();
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("a/b/c.txt"), "a/b/c.txt");
        assert_eq!(normalize_path("a/./b/c.txt"), "a/b/c.txt");
        assert_eq!(normalize_path("a/b/../c.txt"), "a/c.txt");
        assert_eq!(normalize_path("a/b/../../c.txt"), "c.txt");
        assert_eq!(normalize_path("../c.txt"), "c.txt");
        assert_eq!(normalize_path("a//b"), "a//b");
        assert_eq!(normalize_path("com/example/../../shared/./x.bin"), "shared/x.bin");
    }

    #[test]
    fn test_resolve_at_root() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("com/example/logo.png"));

        let locator = ResourceLocator::new(dir.path(), &LocatorConfig::default());
        assert_eq!(
            locator.resolve("com/example/logo.png"),
            Some(dir.path().join("com/example/logo.png"))
        );
    }

    #[test]
    fn test_resolve_prefers_bare_root_over_source_dirs() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("x/data.txt"));
        touch(&dir.path().join("src/main/resources/x/data.txt"));

        let locator = ResourceLocator::new(dir.path(), &LocatorConfig::default());
        assert_eq!(locator.resolve("x/data.txt"), Some(dir.path().join("x/data.txt")));
    }

    #[test]
    fn test_resolve_walks_up_to_source_roots() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("target/generated");
        std::fs::create_dir_all(&output).unwrap();
        touch(&dir.path().join("src/main/java/com/example/Messages.properties"));
        touch(&dir.path().join("src/main/resources/com/example/logo.png"));

        let locator = ResourceLocator::new(&output, &LocatorConfig::default());
        assert_eq!(
            locator.resolve("com/example/Messages.properties"),
            Some(dir.path().join("src/main/java/com/example/Messages.properties"))
        );
        assert_eq!(
            locator.resolve("com/example/logo.png"),
            Some(dir.path().join("src/main/resources/com/example/logo.png"))
        );
    }

    #[test]
    fn test_resolve_uses_configured_language() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("src/main/kotlin/a/b.txt"));

        let config = LocatorConfig {
            source_language: "kotlin".to_string(),
        };
        let locator = ResourceLocator::new(dir.path(), &config);
        assert!(locator.resolve("a/b.txt").is_some());
    }

    #[test]
    fn test_resolve_missing_returns_none() {
        let dir = TempDir::new().unwrap();
        let locator = ResourceLocator::new(dir.path(), &LocatorConfig::default());
        assert_eq!(locator.resolve("no/such/contractgen-resource-7f3a.bin"), None);
        assert_eq!(locator.resolve(""), None);
    }

    #[test]
    fn test_directories_do_not_match() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("some/dir-7f3a")).unwrap();
        let locator = ResourceLocator::new(dir.path(), &LocatorConfig::default());
        assert_eq!(locator.resolve("some/dir-7f3a"), None);
    }
}
