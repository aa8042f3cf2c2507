//! Demo App
//!
//! A sample reporting tree rendered row by row with `NodeContentRenderer`:
//! expand/collapse, search highlighting and drag state. Drops are logged.

use std::sync::Arc;

use leptos::prelude::*;
use reactive_stores::Store;

use leptos_dragdrop::*;

use crate::components::NodeContentRenderer;
use crate::node::{is_descendant, NodeKey, TreeNode};
use crate::row::{DragFlags, RowContext, RowDirection, RowProps, ToggleChildren};
use crate::store::{store_toggle_expanded, use_demo_store, DemoState, DemoStateStoreFields};
use crate::theme::{use_row_theme, RowTheme};
use crate::tree::{self, FlatRow};

const TREE_ID: &str = "file-theme-demo";

const SAMPLE_TREE: &str = r#"[
    {
        "key": "cmp-101",
        "title": "Compound 101",
        "classname": "compound",
        "expanded": true,
        "children": [
            {
                "key": "std-301",
                "title": "Study 301",
                "classname": "study",
                "expanded": true,
                "children": [
                    {
                        "key": "re-csr",
                        "title": "CSR reporting effort",
                        "classname": "reporting-effort",
                        "expanded": true,
                        "children": [
                            { "key": "t-14-1", "title": "Table 14.1 Demographics", "classname": "table" },
                            { "key": "l-16-2", "title": "Listing 16.2 Adverse events", "classname": "listing" },
                            { "key": "g-14-2", "title": "Figure 14.2 Kaplan-Meier", "classname": "graph" },
                            { "key": "cl-std", "title": "Standard columns", "classname": "column-layout" },
                            { "key": "fn-std", "title": "Standard footnotes", "classname": "footnote-group" }
                        ]
                    }
                ]
            },
            { "key": "std-302", "title": "Study 302", "classname": "study", "children": [] }
        ]
    }
]"#;

/// Sample tree bundled with the demo
pub fn sample_tree() -> Vec<TreeNode> {
    match serde_json::from_str(SAMPLE_TREE) {
        Ok(roots) => roots,
        Err(err) => {
            log::error!(target: "APP", "sample tree failed to parse: {}", err);
            Vec::new()
        }
    }
}

fn search_matches(node: &TreeNode, query: &str) -> bool {
    !query.is_empty() && node.title.to_lowercase().contains(&query.to_lowercase())
}

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(DemoState::new(sample_tree()));
    provide_context(store);
    provide_context(RowTheme::default());

    // Create DnD signals
    let dnd = create_dnd_signals();
    provide_context(dnd);
    bind_global_drag_cleanup(dnd);

    let on_drop = make_on_drop(dnd, |dragged_id, target| {
        // Moving nodes belongs to the host tree view
        log::info!(target: "APP", "drop: dragged={}, target={:?}", dragged_id, target);
    });

    let rows = move || tree::flatten_rows(&store.roots().read());

    // First visible match gets search focus
    let search_focus = Memo::new(move |_| {
        let query = store.search().get();
        tree::flatten_rows(&store.roots().read())
            .into_iter()
            .find(|row| search_matches(&row.node, &query))
            .map(|row| row.node.key)
    });

    Effect::new(move |_| {
        let count = store.roots().read().len();
        log::debug!(target: "APP", "tree has {} root nodes", count);
    });

    view! {
        <div class="tree-demo">
            <input
                type="search"
                class="tree-search"
                placeholder="Search titles..."
                prop:value=move || store.search().get()
                on:input=move |ev| store.search().set(event_target_value(&ev))
            />
            <div class="tree-view" on:dragover=make_on_dragover(dnd) on:drop=on_drop>
                <For
                    each=rows
                    key=|row| (row.node.key.clone(), row.position.tree_index, row.node.expanded)
                    children=move |row| view! { <DemoRow row=row dnd=dnd search_focus=search_focus /> }
                />
            </div>
        </div>
    }
}

/// One visible row, re-rendered when drag or search state changes
#[component]
fn DemoRow(row: FlatRow, dnd: DndSignals, search_focus: Memo<Option<NodeKey>>) -> impl IntoView {
    let store = use_demo_store();
    let width = use_row_theme().scaffold_block_px_width;
    let drag_key = row.node.key.to_string();

    let on_dragenter = make_on_item_dragenter(dnd, drag_key.clone());
    let on_dragleave = make_on_dragleave(dnd);

    let toggle: ToggleChildren = Arc::new(move |ctx: RowContext| store_toggle_expanded(&store, &ctx.node.key));

    let render = move || {
        let dragging = dnd.dragging_id_read.get();
        let drop_target = dnd.drop_target_read.get();
        let query = store.search().get();

        let find = |id: &str| {
            let roots = store.roots().read();
            let found = tree::find_node_by(&roots, &|n| n.key.to_string() == id).cloned();
            found
        };
        let dragged_node = dragging.as_deref().and_then(find);
        let target_node = match &drop_target {
            Some(DropTarget::Item(id)) => find(id),
            _ => None,
        };

        let drag = DragFlags {
            is_dragging: dragging.as_deref() == Some(drag_key.as_str()),
            did_drop: dnd.did_drop_read.get(),
            is_over: drop_target.as_ref().is_some_and(|t| t.is_item(&drag_key)),
        };
        let mut props = RowProps::new(row.node.clone(), row.position.clone(), width, TREE_ID, RowDirection::Ltr, drag);
        props.parent_node = row.parent.clone();
        props.can_drag = true;
        // A node cannot land inside its own subtree
        props.can_drop = match (&dragged_node, &target_node) {
            (Some(dragged), Some(target)) => dragged.key != target.key && !is_descendant(dragged, target),
            _ => false,
        };
        props.dragged_node = dragged_node;
        props.is_search_match = search_matches(&row.node, &query);
        props.is_search_focus = props.is_search_match && search_focus.get().as_ref() == Some(&row.node.key);
        props.toggle_children_visibility = Some(toggle.clone());

        let kind = row.node.classname.as_str().to_string();
        if !kind.is_empty() {
            props.buttons = vec![ViewFn::from(move || view! { <span class="node-kind">{kind.clone()}</span> })];
        }

        view! { <NodeContentRenderer props=props dnd=dnd /> }
    };

    view! {
        <div class="tree-row" on:dragenter=on_dragenter on:dragleave=on_dragleave>
            {render}
        </div>
    }
}
