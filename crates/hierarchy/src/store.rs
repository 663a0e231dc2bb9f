use crate::{HierarchyError, HierarchyTree, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Where a source's hierarchy document lives below the source root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLayout {
    /// Directory name prefix, followed by the source id (e.g., `xml_DB_BNK`)
    pub dir_prefix: String,

    /// Document file name inside the source directory
    pub file_name: String,
}

impl Default for SourceLayout {
    fn default() -> Self {
        Self {
            dir_prefix: "xml_DB_".to_string(),
            file_name: "instancesHierarchy.xml".to_string(),
        }
    }
}

/// Loads hierarchy documents from a source root directory
#[derive(Debug, Clone)]
pub struct HierarchyStore {
    root: PathBuf,
    layout: SourceLayout,
}

impl HierarchyStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::with_layout(root, SourceLayout::default())
    }

    pub fn with_layout(root: impl AsRef<Path>, layout: SourceLayout) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            layout,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the hierarchy document for `source_id`
    pub fn source_path(&self, source_id: &str) -> Result<PathBuf> {
        if !is_valid_source_id(source_id) {
            return Err(HierarchyError::InvalidSourceId(source_id.to_string()));
        }
        Ok(self
            .root
            .join(format!("{}{source_id}", self.layout.dir_prefix))
            .join(&self.layout.file_name))
    }

    /// Read and parse the hierarchy document of one source.
    ///
    /// Every call performs its own read and parse; jobs sharing a source do
    /// not share the resulting tree.
    pub fn load(&self, source_id: &str) -> Result<HierarchyTree> {
        let path = self.source_path(source_id)?;
        if !path.is_file() {
            return Err(HierarchyError::SourceMissing(path));
        }

        log::info!("Parsing {} ...", path.display());
        let start = Instant::now();
        let file = File::open(&path)?;
        let tree = HierarchyTree::parse_reader(BufReader::new(file))?;
        log::debug!(
            "Parsed {} ({} nodes, {:.4}s)",
            path.display(),
            tree.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(tree)
    }
}

fn is_valid_source_id(source_id: &str) -> bool {
    !source_id.is_empty()
        && source_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_source_path_layout() {
        let store = HierarchyStore::new("/data/xml");
        assert_eq!(
            store.source_path("BNK").unwrap(),
            PathBuf::from("/data/xml/xml_DB_BNK/instancesHierarchy.xml")
        );

        let custom = HierarchyStore::with_layout(
            "/data",
            SourceLayout {
                dir_prefix: String::new(),
                file_name: "hierarchy.xml".to_string(),
            },
        );
        assert_eq!(
            custom.source_path("CMS").unwrap(),
            PathBuf::from("/data/CMS/hierarchy.xml")
        );
    }

    #[test]
    fn test_rejects_path_like_source_ids() {
        let store = HierarchyStore::new("/data/xml");
        for bad in ["", "../etc", "a/b", "BNK "] {
            assert!(
                matches!(store.source_path(bad), Err(HierarchyError::InvalidSourceId(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_load_missing_and_present() {
        let temp = TempDir::new().unwrap();
        let store = HierarchyStore::new(temp.path());

        assert!(matches!(
            store.load("BNK"),
            Err(HierarchyError::SourceMissing(_))
        ));

        let dir = temp.path().join("xml_DB_BNK");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("instancesHierarchy.xml"),
            r#"<HierarchyItem name="BNK" alias="BNK"/>"#,
        )
        .unwrap();

        let tree = store.load("BNK").unwrap();
        assert_eq!(tree.len(), 1);
    }
}
