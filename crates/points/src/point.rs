use std::fmt;
use std::hash::{Hash, Hasher};

/// Resolved data point, identified by `prefix:local_name`
#[derive(Debug, Clone)]
pub struct Point {
    prefix: String,
    local_name: String,
    key: String,
}

impl Point {
    pub fn new(prefix: impl Into<String>, local_name: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let local_name = local_name.into();
        let key = format!("{prefix}:{local_name}");
        Self {
            prefix,
            local_name,
            key,
        }
    }

    /// Alias of the parent node
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Name of the point node itself
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Composite key used for equality and ordering
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}
