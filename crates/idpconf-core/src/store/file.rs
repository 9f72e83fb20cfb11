//! File-based configuration store (YAML)
//!
//! Default location is the user config directory (~/.config/idpconf/providers.yaml).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::types::RawProviderConfig;
use super::traits::ConfigStore;

/// Store file structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StoreFile {
    /// Provider instances keyed by instance id
    #[serde(default)]
    pub instances: BTreeMap<String, RawProviderConfig>,
}

/// File-based configuration store
///
/// Reads and writes all instances from a single YAML file. Nothing is
/// cached: every read loads the file and every write loads, modifies and
/// rewrites it while holding the store lock, so edits made through another
/// handle or by hand are picked up on the next call and never overwritten
/// with stale contents.
///
/// # Example
///
/// ```no_run
/// use idpconf_core::store::FileConfigStore;
///
/// // ~/.config/idpconf/providers.yaml
/// let store = FileConfigStore::user();
///
/// // Explicit location
/// let store = FileConfigStore::new("/etc/broker/providers.yaml");
/// ```
pub struct FileConfigStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileConfigStore {
    /// Create a file store for a specific path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    /// Create a store in the user config directory (~/.config/idpconf/providers.yaml)
    pub fn user() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self::new(config_dir.join("idpconf").join("providers.yaml"))
    }

    /// Get the store file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the store file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn load(&self) -> ConfigResult<StoreFile> {
        if !self.path.exists() {
            return Ok(StoreFile::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(StoreFile::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    fn save(&self, file: &StoreFile) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write next to the target and rename so a crash never leaves a half-written file
        let content = serde_yaml::to_string(file)?;
        let tmp_path = self.path.with_extension("yaml.tmp");
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Run `f` on the contents currently on disk
    fn read_with<T>(&self, f: impl FnOnce(&StoreFile) -> T) -> ConfigResult<T> {
        let _guard = self.lock.read();
        let file = self.load()?;
        Ok(f(&file))
    }

    /// Load, modify and persist under the write lock
    fn modify<T>(&self, f: impl FnOnce(&mut StoreFile) -> ConfigResult<T>) -> ConfigResult<T> {
        let _guard = self.lock.write();
        let mut file = self.load()?;
        let result = f(&mut file)?;
        self.save(&file)?;
        Ok(result)
    }

    /// Current contents of the store file
    pub fn reload(&self) -> ConfigResult<StoreFile> {
        self.read_with(StoreFile::clone)
    }

    /// Copy the current store file next to itself
    pub fn backup(&self) -> ConfigResult<Option<PathBuf>> {
        if !self.exists() {
            return Ok(None);
        }

        let backup_path = self.path.with_extension("yaml.backup");
        fs::copy(&self.path, &backup_path)?;
        Ok(Some(backup_path))
    }

    /// Export all instances as pretty JSON
    pub fn export_json(&self) -> ConfigResult<String> {
        let file = self.read_with(StoreFile::clone)?;
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Replace all instances with the contents of a JSON export
    pub fn import_json(&self, json: &str) -> ConfigResult<()> {
        let imported: StoreFile = serde_json::from_str(json)?;
        self.modify(|file| {
            *file = imported;
            Ok(())
        })
    }
}

impl std::fmt::Debug for FileConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileConfigStore")
            .field("path", &self.path)
            .field("exists", &self.exists())
            .finish()
    }
}

impl ConfigStore for FileConfigStore {
    fn name(&self) -> &str {
        "file"
    }

    fn get(&self, instance_id: &str) -> ConfigResult<RawProviderConfig> {
        self.read_with(|file| file.instances.get(instance_id).cloned())?
            .ok_or_else(|| ConfigError::NotFound(instance_id.to_string()))
    }

    fn put(&self, instance_id: &str, config: RawProviderConfig) -> ConfigResult<()> {
        self.modify(|file| {
            file.instances.insert(instance_id.to_string(), config);
            Ok(())
        })
    }

    fn delete(&self, instance_id: &str) -> ConfigResult<()> {
        self.modify(|file| match file.instances.remove(instance_id) {
            Some(_) => Ok(()),
            None => Err(ConfigError::NotFound(instance_id.to_string())),
        })
    }

    fn list_instances(&self) -> ConfigResult<Vec<String>> {
        self.read_with(|file| file.instances.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_store_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("providers.yaml");
        let store = FileConfigStore::new(&path);

        // Initially empty
        assert!(!store.exists());
        assert!(store.list_instances().unwrap().is_empty());
        assert!(matches!(store.get("corp"), Err(ConfigError::NotFound(_))));

        store
            .put("corp", RawProviderConfig::for_type("oidc").with("clientId", "broker"))
            .unwrap();
        assert!(store.exists());

        // A second store on the same path reads what was written
        let other = FileConfigStore::new(&path);
        assert_eq!(other.get("corp").unwrap().get("clientId"), Some("broker"));

        store.delete("corp").unwrap();
        assert!(matches!(other.get("corp"), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_handles_never_overwrite_each_other() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("providers.yaml");
        let broker = FileConfigStore::new(&path);
        let admin = FileConfigStore::new(&path);

        broker.put("p1", RawProviderConfig::for_type("oidc").with("clientId", "old")).unwrap();
        assert_eq!(broker.get("p1").unwrap().get("clientId"), Some("old"));

        admin.put("p1", RawProviderConfig::for_type("oidc").with("clientId", "new")).unwrap();
        assert_eq!(broker.get("p1").unwrap().get("clientId"), Some("new"));

        // A write through the first handle keeps the other handle's change
        broker.put("p2", RawProviderConfig::for_type("saml")).unwrap();
        let on_disk = FileConfigStore::new(&path).reload().unwrap();
        assert_eq!(on_disk.instances["p1"].get("clientId"), Some("new"));
        assert_eq!(broker.list_instances().unwrap(), vec!["p1", "p2"]);
    }

    #[test]
    fn test_hand_edit_is_picked_up() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("providers.yaml");
        let store = FileConfigStore::new(&path);
        store.put("p1", RawProviderConfig::for_type("saml")).unwrap();
        assert!(store.get("p1").is_ok());

        fs::write(&path, "instances:\n  p3:\n    providerType: oidc\n").unwrap();
        assert!(matches!(store.get("p1"), Err(ConfigError::NotFound(_))));
        assert_eq!(store.get("p3").unwrap().get("providerType"), Some("oidc"));
    }

    #[test]
    fn test_yaml_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("providers.yaml");
        let store = FileConfigStore::new(&path);

        store
            .put("partner", RawProviderConfig::for_type("custom-oidc").with("dummyConfig", "hello"))
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("instances:"));
        assert!(content.contains("partner:"));
        assert!(content.contains("providerType: custom-oidc"));
        assert!(content.contains("dummyConfig: hello"));
    }

    #[test]
    fn test_reads_hand_written_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("providers.yaml");
        fs::write(
            &path,
            "instances:\n  saml-idp:\n    providerType: saml\n    forceAuthn: \"true\"\n",
        )
        .unwrap();

        let store = FileConfigStore::new(&path);
        let raw = store.get("saml-idp").unwrap();
        assert_eq!(raw.get("providerType"), Some("saml"));
        assert_eq!(raw.get("forceAuthn"), Some("true"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("providers.yaml");
        fs::write(&path, "instances: [not, a, map]").unwrap();

        let store = FileConfigStore::new(&path);
        assert!(matches!(store.get("x"), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_json_export_import() {
        let dir = tempdir().unwrap();
        let source = FileConfigStore::new(dir.path().join("a.yaml"));
        source.put("p1", RawProviderConfig::for_type("saml")).unwrap();

        let json = source.export_json().unwrap();

        let target = FileConfigStore::new(dir.path().join("b.yaml"));
        target.put("stale", RawProviderConfig::new()).unwrap();
        target.import_json(&json).unwrap();

        assert_eq!(target.list_instances().unwrap(), vec!["p1"]);
    }

    #[test]
    fn test_backup() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("providers.yaml");
        let store = FileConfigStore::new(&path);

        // No backup if file doesn't exist
        assert!(store.backup().unwrap().is_none());

        store.put("p1", RawProviderConfig::for_type("oidc")).unwrap();

        let backup_path = store.backup().unwrap().unwrap();
        assert!(backup_path.exists());
        assert!(backup_path.to_string_lossy().contains("backup"));
    }
}
