//! Navigation tree builder.
//!
//! Turns sidebar declarations ([`Node`]) into resolved navigation trees
//! ([`NavigationTree`]) for UI presentation. Traversal is depth-first and
//! keeps declaration order; problems are accumulated rather than aborting.
//!
//! # Example
//!
//! ```
//! use docnav_site::{ContentEntry, Node, Registry, build_tree};
//!
//! let (registry, _) = Registry::build(vec![ContentEntry::new("intro")]);
//! let items = vec![Node::category("Guide", vec![Node::doc("intro")])];
//!
//! let (tree, errors) = build_tree("docs", &items, &registry);
//! assert!(errors.is_empty());
//! assert_eq!(tree.doc_ids(), vec!["intro"]);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::registry::Registry;

/// Sidebar item as declared by a site maintainer.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "RawNode")]
pub enum Node {
    /// Reference to a content entry by id.
    Doc {
        /// Content id.
        id: String,
        /// Label override.
        label: Option<String>,
    },
    /// Labeled group of further nodes.
    Category {
        /// Display label, also used for cycle detection.
        label: String,
        /// Child nodes in display order.
        items: Vec<Node>,
        /// Whether the category starts collapsed.
        collapsed: Option<bool>,
    },
    /// Link to an arbitrary URL.
    Link {
        /// Display label.
        label: String,
        /// Link target.
        href: String,
    },
}

impl Node {
    /// Reference a content entry.
    pub fn doc(id: impl Into<String>) -> Self {
        Self::Doc {
            id: id.into(),
            label: None,
        }
    }

    /// Declare a category with the given items.
    pub fn category(label: impl Into<String>, items: Vec<Node>) -> Self {
        Self::Category {
            label: label.into(),
            items,
            collapsed: None,
        }
    }

    /// Declare an external link.
    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self::Link {
            label: label.into(),
            href: href.into(),
        }
    }
}

/// Declaration syntax: a bare string is shorthand for a doc reference.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNode {
    Shorthand(String),
    Tagged(TaggedNode),
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum TaggedNode {
    Doc {
        id: String,
        #[serde(default)]
        label: Option<String>,
    },
    Category {
        label: String,
        #[serde(default)]
        items: Vec<Node>,
        #[serde(default)]
        collapsed: Option<bool>,
    },
    Link {
        label: String,
        href: String,
    },
}

impl From<RawNode> for Node {
    fn from(raw: RawNode) -> Self {
        match raw {
            RawNode::Shorthand(id) => Self::Doc { id, label: None },
            RawNode::Tagged(TaggedNode::Doc { id, label }) => Self::Doc { id, label },
            RawNode::Tagged(TaggedNode::Category {
                label,
                items,
                collapsed,
            }) => Self::Category {
                label,
                items,
                collapsed,
            },
            RawNode::Tagged(TaggedNode::Link { label, href }) => Self::Link { label, href },
        }
    }
}

/// Resolved navigation item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NavNode {
    /// Resolved content entry.
    Doc {
        /// Content id.
        id: String,
        /// Display label (declared, manifest, or id).
        label: String,
    },
    /// Category with resolved children.
    Category {
        /// Display label.
        label: String,
        /// Whether the category starts collapsed.
        collapsed: bool,
        /// Child items in declaration order.
        #[serde(skip_serializing_if = "Vec::is_empty")]
        items: Vec<NavNode>,
    },
    /// External link.
    Link {
        /// Display label.
        label: String,
        /// Link target.
        href: String,
    },
}

/// Resolved sidebar: an ordered sequence of navigation items.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NavigationTree {
    /// Root items in declaration order.
    pub items: Vec<NavNode>,
}

impl NavigationTree {
    /// Content ids in reading order (depth-first, declaration order).
    #[must_use]
    pub fn doc_ids(&self) -> Vec<&str> {
        fn walk<'a>(items: &'a [NavNode], out: &mut Vec<&'a str>) {
            for item in items {
                match item {
                    NavNode::Doc { id, .. } => out.push(id),
                    NavNode::Category { items, .. } => walk(items, out),
                    NavNode::Link { .. } => {}
                }
            }
        }

        let mut ids = Vec::new();
        walk(&self.items, &mut ids);
        ids
    }

    /// Previous and next documents around `id` in reading order.
    ///
    /// Returns `None` if `id` is not part of this tree.
    #[must_use]
    pub fn neighbors(&self, id: &str) -> Option<(Option<&str>, Option<&str>)> {
        let ids = self.doc_ids();
        let pos = ids.iter().position(|candidate| *candidate == id)?;
        let previous = pos.checked_sub(1).map(|i| ids[i]);
        let next = ids.get(pos + 1).copied();
        Some((previous, next))
    }

    /// Whether the tree has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Resolved sidebars keyed by name.
pub type Sidebars = BTreeMap<String, NavigationTree>;

/// Dotted breadcrumb of a location inside a sidebar.
///
/// Segments are escaped on display: `.` becomes `\.` and `\` becomes `\\`,
/// so labels containing dots still give unambiguous paths.
#[derive(Clone, Debug)]
struct NavPath(Vec<String>);

impl NavPath {
    fn root(name: &str) -> Self {
        Self(vec![name.to_owned()])
    }

    fn child(&self, label: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(label.to_owned());
        Self(segments)
    }
}

impl fmt::Display for NavPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            for c in segment.chars() {
                if matches!(c, '.' | '\\') {
                    f.write_str("\\")?;
                }
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

/// Depth-first builder state for a single sidebar.
struct TreeBuilder<'r> {
    registry: &'r Registry,
    errors: Vec<ValidationError>,
}

impl TreeBuilder<'_> {
    fn build_items<'n>(
        &mut self,
        items: &'n [Node],
        path: &NavPath,
        ancestors: &mut Vec<&'n str>,
    ) -> Vec<NavNode> {
        items
            .iter()
            .filter_map(|item| self.build_node(item, path, ancestors))
            .collect()
    }

    fn build_node<'n>(
        &mut self,
        node: &'n Node,
        path: &NavPath,
        ancestors: &mut Vec<&'n str>,
    ) -> Option<NavNode> {
        match node {
            Node::Doc { id, label } => {
                let Some(entry) = self.registry.get(id) else {
                    self.errors.push(ValidationError::unresolved_reference(
                        path.to_string(),
                        "content id",
                        id,
                    ));
                    return None;
                };
                let label = label
                    .as_ref()
                    .or(entry.label.as_ref())
                    .unwrap_or(&entry.id)
                    .clone();
                Some(NavNode::Doc {
                    id: id.clone(),
                    label,
                })
            }
            Node::Category {
                label,
                items,
                collapsed,
            } => {
                let category_path = path.child(label);
                if ancestors.contains(&label.as_str()) {
                    self.errors.push(ValidationError::cyclic_category(
                        category_path.to_string(),
                        label,
                    ));
                    return None;
                }
                if items.is_empty() {
                    self.errors.push(ValidationError::empty_category(
                        category_path.to_string(),
                        label,
                    ));
                }

                ancestors.push(label);
                let children = self.build_items(items, &category_path, ancestors);
                ancestors.pop();

                Some(NavNode::Category {
                    label: label.clone(),
                    collapsed: collapsed.unwrap_or(true),
                    items: children,
                })
            }
            Node::Link { label, href } => {
                if href.trim().is_empty() {
                    self.errors.push(ValidationError::invalid_setting(
                        path.to_string(),
                        format!("link '{label}' has an empty href"),
                    ));
                    return None;
                }
                Some(NavNode::Link {
                    label: label.clone(),
                    href: href.clone(),
                })
            }
        }
    }
}

/// Build a single sidebar from its declaration.
///
/// # Arguments
///
/// * `name` - Sidebar name, used as the first breadcrumb segment
/// * `items` - Declared root items
/// * `registry` - Known content ids
///
/// # Returns
///
/// The resolved tree and every problem found. Unresolved references and
/// cyclic categories are left out of the tree; empty categories are kept.
#[must_use]
pub fn build_tree(
    name: &str,
    items: &[Node],
    registry: &Registry,
) -> (NavigationTree, Vec<ValidationError>) {
    let mut builder = TreeBuilder {
        registry,
        errors: Vec::new(),
    };
    let mut ancestors = Vec::new();
    let items = builder.build_items(items, &NavPath::root(name), &mut ancestors);
    (NavigationTree { items }, builder.errors)
}

/// Build every declared sidebar.
///
/// Sidebars are processed in name order so error output is deterministic.
#[must_use]
pub fn build_sidebars(
    declarations: &BTreeMap<String, Vec<Node>>,
    registry: &Registry,
) -> (Sidebars, Vec<ValidationError>) {
    let mut sidebars = Sidebars::new();
    let mut errors = Vec::new();

    for (name, items) in declarations {
        let (tree, tree_errors) = build_tree(name, items, registry);
        tracing::debug!(
            sidebar = %name,
            items = tree.items.len(),
            errors = tree_errors.len(),
            "Built sidebar"
        );
        errors.extend(tree_errors);
        sidebars.insert(name.clone(), tree);
    }

    (sidebars, errors)
}
