use crate::load;
use camino::{Utf8Path, Utf8PathBuf};
use confguard_domain::{ConfigTree, ParseOptions, TreeSource};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Process-lifetime memoization of parsed device trees.
///
/// Built at run start and passed explicitly to matrix generation and
/// evaluation. Entries are populated lazily on first request and never
/// invalidated mid-run: source files are assumed static for the audit.
#[derive(Debug)]
pub struct DeviceCache {
    config_dir: Utf8PathBuf,
    options: ParseOptions,
    entries: BTreeMap<String, Arc<ConfigTree>>,
}

impl DeviceCache {
    pub fn new(config_dir: impl Into<Utf8PathBuf>, options: ParseOptions) -> Self {
        Self {
            config_dir: config_dir.into(),
            options,
            entries: BTreeMap::new(),
        }
    }

    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Number of devices parsed so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TreeSource for DeviceCache {
    fn tree(&mut self, device: &str) -> anyhow::Result<Arc<ConfigTree>> {
        if let Some(tree) = self.entries.get(device) {
            return Ok(Arc::clone(tree));
        }
        let path = self.config_dir.join(device);
        let tree = Arc::new(load::load_device(&path, &self.options)?);
        self.entries.insert(device.to_string(), Arc::clone(&tree));
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path")
    }

    #[test]
    fn repeated_lookups_return_the_same_tree_instance() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        std::fs::write(root.join("sw1.conf").as_std_path(), "hostname sw1\n").expect("write");

        let mut cache = DeviceCache::new(root, ParseOptions::default());
        let a = cache.tree("sw1.conf").expect("first");
        let b = cache.tree("sw1.conf").expect("second");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn lookup_of_missing_device_fails_with_the_full_path() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        let mut cache = DeviceCache::new(root.clone(), ParseOptions::default());

        let err = cache.tree("ghost.conf").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("ghost.conf"));
        assert!(msg.contains(root.as_str()));
        assert!(cache.is_empty());
    }

    #[test]
    fn parse_options_are_honored() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        std::fs::write(root.join("sw1.conf").as_std_path(), "a\n\nb\n").expect("write");

        let mut keep = DeviceCache::new(root.clone(), ParseOptions::default());
        assert_eq!(keep.tree("sw1.conf").expect("keep").len(), 3);

        let mut drop_blanks = DeviceCache::new(
            root,
            ParseOptions {
                keep_blank_lines: false,
            },
        );
        assert_eq!(drop_blanks.tree("sw1.conf").expect("drop").len(), 2);
    }
}
