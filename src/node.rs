//! Tree Node Model
//!
//! Node records the tree view hands to each row, plus the
//! descendant check and the classname icon lookup.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Node identifier: path segments are either strings or numbers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeKey {
    Number(i64),
    Text(String),
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Number(n) => write!(f, "{}", n),
            NodeKey::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for NodeKey {
    fn from(n: i64) -> Self {
        NodeKey::Number(n)
    }
}

impl From<i32> for NodeKey {
    fn from(n: i32) -> Self {
        NodeKey::Number(n.into())
    }
}

impl From<&str> for NodeKey {
    fn from(s: &str) -> Self {
        NodeKey::Text(s.to_string())
    }
}

impl From<String> for NodeKey {
    fn from(s: String) -> Self {
        NodeKey::Text(s)
    }
}

/// Loader for children fetched on demand by the tree view
pub type ChildrenLoader = Arc<dyn Fn(&TreeNode) -> Vec<TreeNode> + Send + Sync>;

/// Children of a node: a concrete list or a deferred loader
#[derive(Clone)]
pub enum NodeChildren {
    Loaded(Vec<TreeNode>),
    Deferred(ChildrenLoader),
}

impl fmt::Debug for NodeChildren {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeChildren::Loaded(children) => f.debug_tuple("Loaded").field(children).finish(),
            NodeChildren::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl PartialEq for NodeChildren {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NodeChildren::Loaded(a), NodeChildren::Loaded(b)) => a == b,
            (NodeChildren::Deferred(a), NodeChildren::Deferred(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Node classification used to pick the leaf icon
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NodeClass {
    Compound,
    Study,
    ReportingEffort,
    Table,
    Listing,
    Graph,
    ColumnLayout,
    FootnoteGroup,
    #[default]
    Unclassified,
    Other(String),
}

impl NodeClass {
    pub fn as_str(&self) -> &str {
        match self {
            NodeClass::Compound => "compound",
            NodeClass::Study => "study",
            NodeClass::ReportingEffort => "reporting-effort",
            NodeClass::Table => "table",
            NodeClass::Listing => "listing",
            NodeClass::Graph => "graph",
            NodeClass::ColumnLayout => "column-layout",
            NodeClass::FootnoteGroup => "footnote-group",
            NodeClass::Unclassified => "",
            NodeClass::Other(name) => name.as_str(),
        }
    }

    /// Single-letter glyph shown in the leaf icon box
    pub fn glyph(&self) -> &'static str {
        match self {
            NodeClass::Compound => "C",
            NodeClass::Study => "S",
            NodeClass::ReportingEffort => "R",
            NodeClass::Table => "T",
            NodeClass::Listing => "L",
            NodeClass::Graph => "G",
            NodeClass::ColumnLayout => "C",
            NodeClass::FootnoteGroup => "F",
            NodeClass::Unclassified | NodeClass::Other(_) => "",
        }
    }
}

impl From<&str> for NodeClass {
    fn from(name: &str) -> Self {
        match name {
            "compound" => NodeClass::Compound,
            "study" => NodeClass::Study,
            "reporting-effort" => NodeClass::ReportingEffort,
            "table" => NodeClass::Table,
            "listing" => NodeClass::Listing,
            "graph" => NodeClass::Graph,
            "column-layout" => NodeClass::ColumnLayout,
            "footnote-group" => NodeClass::FootnoteGroup,
            "" => NodeClass::Unclassified,
            other => NodeClass::Other(other.to_string()),
        }
    }
}

impl Serialize for NodeClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NodeClass {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = Option::<String>::deserialize(deserializer)?;
        Ok(name.as_deref().map(NodeClass::from).unwrap_or_default())
    }
}

/// Glyph for a raw classname string
pub fn icon_glyph(classname: &str) -> &'static str {
    NodeClass::from(classname).glyph()
}

/// Tree node as owned by the tree view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub key: NodeKey,
    pub title: String,
    #[serde(
        default,
        serialize_with = "serialize_children",
        deserialize_with = "deserialize_children"
    )]
    pub children: Option<NodeChildren>,
    #[serde(default)]
    pub classname: NodeClass,
    #[serde(default)]
    pub expanded: bool,
}

fn serialize_children<S: Serializer>(children: &Option<NodeChildren>, serializer: S) -> Result<S::Ok, S::Error> {
    match children {
        Some(NodeChildren::Loaded(list)) => serializer.collect_seq(list),
        // A loader has no data representation
        Some(NodeChildren::Deferred(_)) | None => serializer.serialize_none(),
    }
}

fn deserialize_children<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NodeChildren>, D::Error> {
    let list = Option::<Vec<TreeNode>>::deserialize(deserializer)?;
    Ok(list.map(NodeChildren::Loaded))
}

impl TreeNode {
    pub fn new(key: impl Into<NodeKey>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            children: None,
            classname: NodeClass::Unclassified,
            expanded: false,
        }
    }

    pub fn with_class(mut self, classname: NodeClass) -> Self {
        self.classname = classname;
        self
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = Some(NodeChildren::Loaded(children));
        self
    }

    pub fn with_loader(mut self, loader: ChildrenLoader) -> Self {
        self.children = Some(NodeChildren::Deferred(loader));
        self
    }

    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    /// Concrete children, if loaded
    pub fn loaded_children(&self) -> Option<&[TreeNode]> {
        match &self.children {
            Some(NodeChildren::Loaded(list)) => Some(list),
            _ => None,
        }
    }

    /// True when a non-empty concrete child list is present
    pub fn has_children(&self) -> bool {
        self.loaded_children().is_some_and(|list| !list.is_empty())
    }

    /// True when the row should offer expand/collapse: a non-empty list or a loader
    pub fn is_expandable(&self) -> bool {
        matches!(self.children, Some(NodeChildren::Deferred(_))) || self.has_children()
    }

    /// True when children are absent or an empty list
    pub fn is_leaf(&self) -> bool {
        match &self.children {
            None => true,
            Some(NodeChildren::Loaded(list)) => list.is_empty(),
            Some(NodeChildren::Deferred(_)) => false,
        }
    }
}

/// Whether `younger` is reachable from `older` through loaded children
///
/// Deferred children are not searched. Identity is the node key.
pub fn is_descendant(older: &TreeNode, younger: &TreeNode) -> bool {
    older.loaded_children().is_some_and(|children| {
        children
            .iter()
            .any(|child| child.key == younger.key || is_descendant(child, younger))
    })
}
