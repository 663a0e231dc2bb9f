/// Element name that marks a hierarchy item
pub const ITEM_TAG: &str = "HierarchyItem";

/// Index of a node in the tree arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One element of a hierarchy document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyNode {
    /// Element tag (e.g., "HierarchyItem")
    pub tag: String,

    /// `name` attribute
    pub name: Option<String>,

    /// `alias` attribute, globally distinct within one document
    pub alias: Option<String>,

    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,

    /// Last node (in document order) that belongs to this node's subtree
    pub(crate) subtree_end: usize,
}

impl HierarchyNode {
    pub(crate) fn new(
        tag: String,
        name: Option<String>,
        alias: Option<String>,
        parent: Option<NodeId>,
        id: usize,
    ) -> Self {
        Self {
            tag,
            name,
            alias,
            parent,
            children: Vec::new(),
            subtree_end: id,
        }
    }

    /// True for `HierarchyItem` elements; wrapper elements are structural only
    pub fn is_item(&self) -> bool {
        self.tag == ITEM_TAG
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }
}

/// Result of looking up the parent of an alias
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentLink {
    /// Alias is unknown or only carried by the document root
    Orphan,

    /// Exactly one distinct parent element
    Unique(NodeId),

    /// Alias appears under several distinct parents
    Ambiguous(usize),
}

impl ParentLink {
    pub fn unique(self) -> Option<NodeId> {
        match self {
            ParentLink::Unique(id) => Some(id),
            _ => None,
        }
    }

    /// Number of distinct parents
    pub fn count(self) -> usize {
        match self {
            ParentLink::Orphan => 0,
            ParentLink::Unique(_) => 1,
            ParentLink::Ambiguous(n) => n,
        }
    }
}
