//! Offline copy of the rendered board page.
//!
//! The cache is optional: callers log failures and carry on without it.

use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::Result;

const PAGE_FILE: &str = "index.html";

#[derive(Debug, Clone)]
pub struct PageCache {
    dir: PathBuf,
}

impl PageCache {
    /// `<data_dir>/cache`
    pub fn default_dir() -> Result<PathBuf> {
        Ok(data_dir()?.join("cache"))
    }

    /// Prepare the cache directory.
    pub fn register(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        tracing::debug!(dir = %dir.display(), "page cache registered");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn page_path(&self) -> PathBuf {
        self.dir.join(PAGE_FILE)
    }

    /// Replace the cached page. Readers never see a half-written file.
    pub fn store(&self, html: &str) -> Result<PathBuf> {
        let target = self.page_path();
        let tmp = self.dir.join(format!("{PAGE_FILE}.tmp"));
        let written = std::fs::write(&tmp, html).and_then(|()| std::fs::rename(&tmp, &target));
        if let Err(e) = written {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(target)
    }

    /// The last stored page, if any.
    pub fn load(&self) -> Option<String> {
        std::fs::read_to_string(self.page_path()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_and_load_page() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PageCache::register(dir.path().join("cache")).unwrap();
        assert!(cache.load().is_none());

        let path = cache.store("<p>first</p>").unwrap();
        assert!(path.ends_with("index.html"));
        cache.store("<p>second</p>").unwrap();
        assert_eq!(cache.load().as_deref(), Some("<p>second</p>"));
        assert!(!cache.dir().join("index.html.tmp").exists());
    }

    #[test]
    fn failed_store_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PageCache::register(dir.path().join("cache")).unwrap();
        // A directory in the way makes the rename fail.
        std::fs::create_dir(cache.page_path()).unwrap();
        std::fs::write(cache.page_path().join("keep"), "x").unwrap();

        assert!(cache.store("<p>page</p>").is_err());
        assert!(!cache.dir().join("index.html.tmp").exists());
    }

    #[test]
    fn register_fails_when_path_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("taken");
        std::fs::write(&file, "x").unwrap();
        assert!(PageCache::register(&file).is_err());
    }
}
