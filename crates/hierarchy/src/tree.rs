use crate::node::{HierarchyNode, NodeId, ParentLink, ITEM_TAG};
use crate::{HierarchyError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::encoding::Decoder;
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::BufRead;

/// Immutable arena of hierarchy nodes in document order.
///
/// Nodes are pushed as their start tag is read, so every subtree occupies a
/// contiguous index range `[id, subtree_end]`. The alias index is built in the
/// same pass and maps an item alias to the distinct elements containing it.
#[derive(Debug, Clone)]
pub struct HierarchyTree {
    nodes: Vec<HierarchyNode>,
    parents_by_alias: HashMap<String, Vec<NodeId>>,
}

impl HierarchyTree {
    /// Parse a hierarchy document from a string
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_bytes(text.as_bytes())
    }

    /// Parse a hierarchy document from raw bytes, decoded by its declared encoding
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self> {
        Self::parse_reader(bytes)
    }

    /// Stream a hierarchy document from any buffered reader
    pub fn parse_reader<R: BufRead>(input: R) -> Result<Self> {
        let mut reader = Reader::from_reader(input);
        let mut builder = TreeBuilder::default();
        let mut buf = Vec::new();

        loop {
            let position = reader.buffer_position() as u64;
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|err| HierarchyError::xml(position, err.to_string()))?;

            let decoder = reader.decoder();
            match event {
                Event::Start(start) => {
                    builder.open(&start, decoder, position)?;
                }
                Event::Empty(start) => {
                    builder.open(&start, decoder, position)?;
                    builder.close();
                }
                Event::End(_) => builder.close(),
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        builder.finish(reader.buffer_position() as u64)
    }

    /// Document root element
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &HierarchyNode {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&HierarchyNode> {
        self.nodes.get(id.0)
    }

    /// Parent element of a node (None for the document root)
    pub fn parent(&self, id: NodeId) -> Option<&HierarchyNode> {
        self.node(id).parent.map(|p| self.node(p))
    }

    /// All hierarchy items in document order
    pub fn items(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_item())
            .map(|(idx, _)| NodeId(idx))
    }

    /// Hierarchy items carrying the given `name`, in document order
    pub fn items_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.items()
            .filter(move |id| self.node(*id).name.as_deref() == Some(name))
    }

    /// True when `node` lies strictly inside the subtree of `ancestor`
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        ancestor.0 < node.0 && node.0 <= self.node(ancestor).subtree_end
    }

    /// Locate the first item named `system` nested (at any depth) under an
    /// item named `location`.
    pub fn find_subtree(&self, location: &str, system: &str) -> Option<NodeId> {
        let locations: Vec<NodeId> = self.items_named(location).collect();
        if locations.is_empty() {
            return None;
        }

        let mut matches = self
            .items_named(system)
            .filter(|candidate| locations.iter().any(|loc| self.is_ancestor(*loc, *candidate)));

        let first = matches.next()?;
        let ignored = matches.count();
        if ignored > 0 {
            log::debug!(
                "{location}/{system}: using first match at {}, ignoring {ignored} more",
                self.path_of(first)
            );
        }
        Some(first)
    }

    /// Every hierarchy item below `root`, in document order
    pub fn descendants(&self, root: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let end = self.node(root).subtree_end;
        (root.0 + 1..=end)
            .map(NodeId)
            .filter(|id| self.node(*id).is_item())
    }

    /// O(1) lookup of the element(s) containing items with this alias
    pub fn parent_of_alias(&self, alias: &str) -> ParentLink {
        match self.parents_by_alias.get(alias).map(Vec::as_slice) {
            None | Some([]) => ParentLink::Orphan,
            Some([parent]) => ParentLink::Unique(*parent),
            Some(parents) => ParentLink::Ambiguous(parents.len()),
        }
    }

    /// Slash separated names from the root, for diagnostics
    pub fn path_of(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id);
            names.push(node.name.as_deref().unwrap_or(node.tag.as_str()));
            current = node.parent;
        }
        names.reverse();
        names.join("/")
    }
}

#[derive(Default)]
struct TreeBuilder {
    nodes: Vec<HierarchyNode>,
    stack: Vec<NodeId>,
    parents_by_alias: HashMap<String, Vec<NodeId>>,
}

impl TreeBuilder {
    fn open(
        &mut self,
        start: &BytesStart<'_>,
        decoder: Decoder,
        position: u64,
    ) -> Result<NodeId> {
        let parent = self.stack.last().copied();
        if parent.is_none() && !self.nodes.is_empty() {
            return Err(HierarchyError::xml(position, "multiple root elements"));
        }

        let tag = decoder
            .decode(start.name().as_ref())
            .map_err(|err| HierarchyError::xml(position, err.to_string()))?
            .into_owned();
        let (name, alias) = read_attributes(start, decoder, position)?;
        let id = NodeId(self.nodes.len());

        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        if tag == ITEM_TAG {
            if let Some(alias) = &alias {
                let parents = self.parents_by_alias.entry(alias.clone()).or_default();
                if let Some(parent) = parent {
                    if !parents.contains(&parent) {
                        parents.push(parent);
                    }
                }
            }
        }

        self.nodes
            .push(HierarchyNode::new(tag, name, alias, parent, id.0));
        self.stack.push(id);
        Ok(id)
    }

    fn close(&mut self) {
        if let Some(id) = self.stack.pop() {
            self.nodes[id.0].subtree_end = self.nodes.len() - 1;
        }
    }

    fn finish(self, position: u64) -> Result<HierarchyTree> {
        if let Some(open) = self.stack.last() {
            return Err(HierarchyError::xml(
                position,
                format!("unclosed element <{}>", self.nodes[open.0].tag),
            ));
        }
        if self.nodes.is_empty() {
            return Err(HierarchyError::EmptyDocument);
        }

        Ok(HierarchyTree {
            nodes: self.nodes,
            parents_by_alias: self.parents_by_alias,
        })
    }
}

fn read_attributes(
    start: &BytesStart<'_>,
    decoder: Decoder,
    position: u64,
) -> Result<(Option<String>, Option<String>)> {
    let mut name = None;
    let mut alias = None;

    for attr in start.attributes() {
        let attr = attr.map_err(|err| HierarchyError::xml(position, err.to_string()))?;
        let slot = match attr.key.as_ref() {
            b"name" => &mut name,
            b"alias" => &mut alias,
            _ => continue,
        };
        let value = attr
            .decode_and_unescape_value(decoder)
            .map_err(|err| HierarchyError::xml(position, err.to_string()))?;
        *slot = Some(value.into_owned());
    }

    Ok((name, alias))
}
