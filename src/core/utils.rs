use dirs::home_dir;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".brainy_pockets";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const STATE_FILE: &str = "state.json";
const HOME_ENV: &str = "BRAINY_POCKETS_HOME";

/// Resolves on-disk locations below the application data directory.
pub struct PathResolver;

impl PathResolver {
    /// Returns the application data directory, defaulting to `~/.brainy_pockets`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn config_dir_in(base: &Path) -> PathBuf {
        base.join(CONFIG_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        Self::config_dir_in(base).join(CONFIG_FILE)
    }

    /// Key-value file holding small flags such as the intro marker.
    pub fn state_file_in(base: &Path) -> PathBuf {
        base.join(STATE_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Writes `data` to `path` by staging it in a sibling temp file first.
pub fn write_atomic(path: &Path, data: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => "tmp".to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_atomic_creates_parent_and_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("nested").join("state.json");
        write_atomic(&target, "{}").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "{}");
        assert!(!target.with_extension("json.tmp").exists());
    }

    #[test]
    fn layout_is_relative_to_base() {
        let base = PathBuf::from("/tmp/pockets");
        assert_eq!(
            PathResolver::config_file_in(&base),
            PathBuf::from("/tmp/pockets/config/config.json")
        );
        assert_eq!(
            PathResolver::state_file_in(&base),
            PathBuf::from("/tmp/pockets/state.json")
        );
    }
}
