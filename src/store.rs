//! Demo Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::node::{NodeKey, TreeNode};
use crate::tree;

/// Demo state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct DemoState {
    /// Root nodes of the sample tree
    pub roots: Vec<TreeNode>,
    /// Current search query
    pub search: String,
}

impl DemoState {
    pub fn new(roots: Vec<TreeNode>) -> Self {
        Self {
            roots,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type DemoStore = Store<DemoState>;

/// Get the demo store from context
pub fn use_demo_store() -> DemoStore {
    expect_context::<DemoStore>()
}

/// Expand or collapse a node by key
pub fn store_toggle_expanded(store: &DemoStore, key: &NodeKey) {
    if !tree::toggle_expanded(&mut store.roots().write(), key) {
        log::warn!(target: "APP", "toggle for unknown node {}", key);
    }
}
