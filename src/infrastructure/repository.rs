//! Site discovery and file access

use crate::error::{Result, TagdexError};
use crate::infrastructure::config::{Config, CONFIG_DIR};
use std::fs;
use std::path::{Path, PathBuf};

/// Abstract repository for site-level operations
pub trait SiteRepository {
    /// Get the root directory of this site
    fn root(&self) -> &Path;

    /// Load configuration from .tagdex/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .tagdex/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .tagdex directory exists
    fn is_initialized(&self) -> bool;

    /// Create .tagdex directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of SiteRepository
#[derive(Debug, Clone)]
pub struct FileSystemSite {
    pub root: PathBuf,
}

impl FileSystemSite {
    pub fn new(root: PathBuf) -> Self {
        FileSystemSite { root }
    }

    /// Discover the site root by walking up from the current directory.
    /// TAGDEX_ROOT takes precedence when set.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("TAGDEX_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_config_dir(&path) {
                return Ok(FileSystemSite::new(path));
            } else {
                return Err(TagdexError::Config(format!(
                    "TAGDEX_ROOT is set to '{}' but no .tagdex directory found. \
                    Run 'tagdex init' in that directory or unset TAGDEX_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the site root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_config_dir(&current) {
                return Ok(FileSystemSite::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(TagdexError::NotTagdexSite(start.to_path_buf())),
            }
        }
    }

    fn has_config_dir(path: &Path) -> bool {
        path.join(CONFIG_DIR).is_dir()
    }

    /// Absolute path of the posts directory for this config
    pub fn posts_path(&self, config: &Config) -> PathBuf {
        self.root.join(&config.posts_dir)
    }

    /// Resolve an output path: absolute paths are kept, relative ones are
    /// taken from the site root.
    pub fn resolve_output(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Write a rendered file, creating parent directories as needed
    pub fn write_output(&self, path: &Path, content: &str) -> Result<PathBuf> {
        let path = self.resolve_output(path);

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&path, content)?;
        Ok(path)
    }
}

impl SiteRepository for FileSystemSite {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_config_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let config_dir = self.root.join(CONFIG_DIR);

        if config_dir.exists() {
            return Err(TagdexError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&config_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::sync::{Mutex, OnceLock};
    use tempfile::TempDir;

    fn env_test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    struct EnvVarRestore {
        key: &'static str,
        previous: Option<OsString>,
    }

    impl EnvVarRestore {
        fn capture(key: &'static str) -> Self {
            Self {
                key,
                previous: std::env::var_os(key),
            }
        }
    }

    impl Drop for EnvVarRestore {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                std::env::set_var(self.key, value);
            } else {
                std::env::remove_var(self.key);
            }
        }
    }

    #[test]
    fn test_is_initialized() {
        let temp = TempDir::new().unwrap();
        let site = FileSystemSite::new(temp.path().to_path_buf());

        assert!(!site.is_initialized());
        site.initialize().unwrap();
        assert!(site.is_initialized());
        assert!(temp.path().join(".tagdex").is_dir());
    }

    #[test]
    fn test_initialize_twice_fails() {
        let temp = TempDir::new().unwrap();
        let site = FileSystemSite::new(temp.path().to_path_buf());

        site.initialize().unwrap();
        assert!(site.initialize().is_err());
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".tagdex")).unwrap();

        let subdir = temp.path().join("_posts").join("2014");
        fs::create_dir_all(&subdir).unwrap();

        let site = FileSystemSite::discover_from(&subdir).unwrap();
        assert_eq!(site.root, temp.path());
    }

    #[test]
    fn test_discover_fails_when_not_a_site() {
        let temp = TempDir::new().unwrap();

        match FileSystemSite::discover_from(temp.path()).unwrap_err() {
            TagdexError::NotTagdexSite(_) => {}
            other => panic!("Expected NotTagdexSite error, got {:?}", other),
        }
    }

    #[test]
    fn test_discover_prefers_tagdex_root() {
        let _guard = env_test_lock().lock().unwrap();
        let _restore = EnvVarRestore::capture("TAGDEX_ROOT");

        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".tagdex")).unwrap();
        std::env::set_var("TAGDEX_ROOT", temp.path());

        let site = FileSystemSite::discover().unwrap();
        assert_eq!(site.root, temp.path());
    }

    #[test]
    fn test_discover_rejects_bad_tagdex_root() {
        let _guard = env_test_lock().lock().unwrap();
        let _restore = EnvVarRestore::capture("TAGDEX_ROOT");

        let temp = TempDir::new().unwrap();
        std::env::set_var("TAGDEX_ROOT", temp.path());

        let err = FileSystemSite::discover().unwrap_err();
        assert!(err.to_string().contains("TAGDEX_ROOT"));
    }

    #[test]
    fn test_write_output_creates_parents() {
        let temp = TempDir::new().unwrap();
        let site = FileSystemSite::new(temp.path().to_path_buf());

        let written = site
            .write_output(Path::new("public/tags/index.html"), "<h1>Tags</h1>")
            .unwrap();

        assert_eq!(written, temp.path().join("public/tags/index.html"));
        assert_eq!(fs::read_to_string(written).unwrap(), "<h1>Tags</h1>");
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let site = FileSystemSite::new(temp.path().to_path_buf());
        site.initialize().unwrap();

        let config = Config::new("_posts");
        site.save_config(&config).unwrap();

        assert_eq!(site.load_config().unwrap(), config);
        assert_eq!(site.posts_path(&config), temp.path().join("_posts"));
    }
}
