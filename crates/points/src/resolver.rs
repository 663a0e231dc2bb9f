use crate::classify::is_input_point;
use crate::{Point, ResolutionWarning};
use ssr_hierarchy::{HierarchyTree, NodeId, ParentLink};

/// Points found under one subtree, plus what was dropped on the way
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Retained points in document order
    pub points: Vec<Point>,

    /// Input points whose parent could not be resolved
    pub warnings: Vec<ResolutionWarning>,

    /// Items skipped as `{location}_{name}` self references
    pub self_references: usize,

    /// Items outside the input-point class
    pub rejected: usize,

    /// Items visited
    pub scanned: usize,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// True when `alias` is the structural alias `{location}_{name}`
pub fn is_self_reference(location: &str, name: &str, alias: Option<&str>) -> bool {
    let Some(alias) = alias else {
        return false;
    };
    alias.len() == location.len() + 1 + name.len()
        && alias.starts_with(location)
        && alias[location.len()..].starts_with('_')
        && alias.ends_with(name)
}

/// Extracts input points below a located subtree
pub struct PointResolver<'a> {
    tree: &'a HierarchyTree,
    location: &'a str,
}

impl<'a> PointResolver<'a> {
    pub fn new(tree: &'a HierarchyTree, location: &'a str) -> Self {
        Self { tree, location }
    }

    /// Walk every item below `root` and resolve the input points.
    ///
    /// Unresolvable parents are logged and dropped; resolution never fails.
    pub fn resolve(&self, root: NodeId) -> Resolution {
        let mut resolution = Resolution::default();

        for id in self.tree.descendants(root) {
            resolution.scanned += 1;
            let node = self.tree.node(id);

            let Some(name) = node.name() else {
                resolution.rejected += 1;
                continue;
            };
            if is_self_reference(self.location, name, node.alias()) {
                resolution.self_references += 1;
                continue;
            }
            if !is_input_point(name) {
                resolution.rejected += 1;
                continue;
            }

            match self.resolve_prefix(name, node.alias()) {
                Ok(prefix) => resolution.points.push(Point::new(prefix, name)),
                Err(warning) => {
                    log::warn!("{warning}");
                    resolution.warnings.push(warning);
                }
            }
        }

        resolution
    }

    fn resolve_prefix(
        &self,
        name: &str,
        alias: Option<&str>,
    ) -> Result<&'a str, ResolutionWarning> {
        let alias = alias.ok_or_else(|| ResolutionWarning::MissingAlias {
            name: name.to_string(),
        })?;

        let parent = match self.tree.parent_of_alias(alias) {
            ParentLink::Unique(parent) => parent,
            link => {
                return Err(ResolutionWarning::ParentCount {
                    alias: alias.to_string(),
                    parents: link.count(),
                })
            }
        };

        self.tree
            .node(parent)
            .alias()
            .ok_or_else(|| ResolutionWarning::ParentWithoutAlias {
                alias: alias.to_string(),
            })
    }
}
