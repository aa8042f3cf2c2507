//! Row Props and View Model
//!
//! `RowProps` is the per-row bundle the tree view passes on every render.
//! `RowModel::build` turns it into the classes, styles and controls the
//! row component draws, so the rendering rules can be checked without a DOM.

use std::fmt;
use std::sync::Arc;

use leptos::prelude::*;
use leptos_dragdrop::DragSourceOptions;

use crate::node::{is_descendant, NodeKey, TreeNode};
use crate::theme::RowTheme;

/// `{node, path, treeIndex}` handed to toggle callbacks and title renderers
#[derive(Debug, Clone, PartialEq)]
pub struct RowContext {
    pub node: TreeNode,
    pub path: Vec<NodeKey>,
    pub tree_index: usize,
}

pub type ToggleChildren = Arc<dyn Fn(RowContext) + Send + Sync>;
pub type TitleRenderer = Arc<dyn Fn(&RowContext) -> AnyView + Send + Sync>;

/// Row title: literal text, a literal view, or a function of the row context
#[derive(Clone)]
pub enum Title {
    Text(String),
    View(ViewFn),
    Render(TitleRenderer),
}

impl fmt::Debug for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Title::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Title::View(_) => f.write_str("View(..)"),
            Title::Render(_) => f.write_str("Render(..)"),
        }
    }
}

impl From<&str> for Title {
    fn from(text: &str) -> Self {
        Title::Text(text.to_string())
    }
}

impl From<String> for Title {
    fn from(text: String) -> Self {
        Title::Text(text)
    }
}

impl From<ViewFn> for Title {
    fn from(view: ViewFn) -> Self {
        Title::View(view)
    }
}

/// Text direction of the tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowDirection {
    #[default]
    Ltr,
    Rtl,
}

impl RowDirection {
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("rtl") {
            RowDirection::Rtl
        } else {
            RowDirection::Ltr
        }
    }

    /// CSS property used for horizontal offsets
    fn offset_property(self) -> &'static str {
        match self {
            RowDirection::Ltr => "left",
            RowDirection::Rtl => "right",
        }
    }
}

/// Ordered inline style declarations; setting a property again replaces it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyle(Vec<(String, String)>);

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        match self.0.iter_mut().find(|(p, _)| *p == property) {
            Some(entry) => entry.1 = value,
            None => self.0.push((property, value)),
        }
    }

    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.iter().find(|(p, _)| p == property).map(|(_, v)| v.as_str())
    }

    /// Apply `other` on top of this style
    pub fn merge(&mut self, other: &InlineStyle) {
        for (property, value) in &other.0 {
            self.set(property.clone(), value.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_css(&self) -> String {
        self.0
            .iter()
            .map(|(p, v)| format!("{}: {};", p, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for InlineStyle {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut style = InlineStyle::new();
        for (property, value) in iter {
            style.set(property, value);
        }
        style
    }
}

/// Where the row sits in the flattened tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowPosition {
    pub path: Vec<NodeKey>,
    pub tree_index: usize,
    pub list_index: usize,
    /// Count of siblings below each ancestor, root first
    pub lower_sibling_counts: Vec<usize>,
}

/// Drag monitor flags for this row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragFlags {
    pub is_dragging: bool,
    pub did_drop: bool,
    pub is_over: bool,
}

/// Render props for one row
#[derive(Clone)]
pub struct RowProps {
    pub node: TreeNode,
    pub position: RowPosition,
    pub scaffold_block_px_width: u32,
    pub tree_id: String,
    pub row_direction: RowDirection,
    pub drag: DragFlags,

    pub buttons: Vec<ViewFn>,
    pub icons: Vec<ViewFn>,
    pub can_drag: bool,
    pub can_drop: bool,
    pub class_name: String,
    pub dragged_node: Option<TreeNode>,
    pub is_search_match: bool,
    pub is_search_focus: bool,
    pub style: InlineStyle,
    pub title: Option<Title>,
    pub toggle_children_visibility: Option<ToggleChildren>,
    /// Kept for the drag manager; the row does not read it
    pub parent_node: Option<TreeNode>,
    pub swap_from: Option<usize>,
    pub swap_length: Option<usize>,
    pub swap_depth: Option<usize>,
}

impl RowProps {
    pub fn new(
        node: TreeNode,
        position: RowPosition,
        scaffold_block_px_width: u32,
        tree_id: impl Into<String>,
        row_direction: RowDirection,
        drag: DragFlags,
    ) -> Self {
        Self {
            node,
            position,
            scaffold_block_px_width,
            tree_id: tree_id.into(),
            row_direction,
            drag,
            buttons: Vec::new(),
            icons: Vec::new(),
            can_drag: false,
            can_drop: false,
            class_name: String::new(),
            dragged_node: None,
            is_search_match: false,
            is_search_focus: false,
            style: InlineStyle::new(),
            title: None,
            toggle_children_visibility: None,
            parent_node: None,
            swap_from: None,
            swap_length: None,
            swap_depth: None,
        }
    }

    pub fn context(&self) -> RowContext {
        RowContext {
            node: self.node.clone(),
            path: self.position.path.clone(),
            tree_index: self.position.tree_index,
        }
    }

    /// The `title` prop, falling back to the node's own title when unset or empty
    pub fn resolved_title(&self) -> Title {
        match &self.title {
            Some(Title::Text(text)) if text.is_empty() => Title::Text(self.node.title.clone()),
            Some(title) => title.clone(),
            None => Title::Text(self.node.title.clone()),
        }
    }

    pub fn render_title(&self) -> AnyView {
        match self.resolved_title() {
            Title::Text(text) => text.into_any(),
            Title::View(view) => view.run(),
            Title::Render(render) => render(&self.context()),
        }
    }

    /// Invoke the toggle callback, if any, with this row's context
    pub fn request_toggle(&self) {
        if let Some(toggle) = &self.toggle_children_visibility {
            log::debug!(target: "ROW", "toggle {} (expanded={})", self.node.key, self.node.expanded);
            toggle(self.context());
        }
    }

    pub fn is_dragged_descendant(&self) -> bool {
        self.dragged_node
            .as_ref()
            .is_some_and(|dragged| is_descendant(dragged, &self.node))
    }

    pub fn is_landing_pad_active(&self) -> bool {
        !self.drag.did_drop && self.drag.is_dragging
    }
}

/// Control drawn before the row: toggle button or leaf icon
#[derive(Debug, Clone, PartialEq)]
pub enum RowControl {
    Toggle {
        aria_label: &'static str,
        class: String,
        style: InlineStyle,
    },
    LeafIcon {
        glyph: &'static str,
        style: InlineStyle,
    },
}

/// One indentation block of the scaffold
#[derive(Debug, Clone, PartialEq)]
pub struct ScaffoldBlock {
    pub class: String,
    pub style: InlineStyle,
}

/// Everything the row component draws, computed from props
#[derive(Debug, Clone, PartialEq)]
pub struct RowModel {
    pub control: Option<RowControl>,
    pub scaffold: Vec<ScaffoldBlock>,
    pub wrapper_class: String,
    pub row_class: String,
    pub row_style: InlineStyle,
    pub contents_class: String,
    pub toolbar_class: String,
    pub toolbar_button_class: String,
    pub label_class: String,
    pub title_class: String,
    pub drag_source: Option<DragSourceOptions>,
}

fn px(value: f64) -> String {
    format!("{}px", value)
}

fn join_classes<'a>(base: &str, extra: impl IntoIterator<Item = (bool, &'a str)>) -> String {
    let mut class = base.to_string();
    for (enabled, name) in extra {
        if enabled && !name.is_empty() {
            class.push(' ');
            class.push_str(name);
        }
    }
    class
}

impl RowModel {
    pub fn build(props: &RowProps, theme: &RowTheme) -> Self {
        let width = props.scaffold_block_px_width;
        let offset = props.row_direction.offset_property();
        let depth = props.position.path.len().saturating_sub(1);
        let landing_pad = props.is_landing_pad_active();

        let control = props.toggle_children_visibility.as_ref().and_then(|_| {
            let node = &props.node;
            if node.is_expandable() {
                // (siblings - 0.7) * width, kept in tenths to avoid float noise
                let tenths = props.position.lower_sibling_counts.len() as i64 * 10 - 7;
                let left = (tenths * width as i64) as f64 / 10.0;
                let (aria_label, class) = if node.expanded {
                    ("Collapse", theme.collapse_button.clone())
                } else {
                    ("Expand", theme.expand_button.clone())
                };
                Some(RowControl::Toggle {
                    aria_label,
                    class,
                    style: InlineStyle::new().with(offset, px(left)),
                })
            } else if node.is_leaf() {
                let style = InlineStyle::new()
                    .with(offset, px((depth as u64 * width as u64) as f64))
                    .with("position", "absolute")
                    .with("border", "solid 1px black")
                    .with("font-size", "8px")
                    .with("text-align", "center")
                    .with("margin-right", "10px")
                    .with("width", "12px")
                    .with("height", "16px")
                    .with("line-height", "16px");
                Some(RowControl::LeafIcon {
                    glyph: node.classname.glyph(),
                    style,
                })
            } else {
                None
            }
        });

        let mut scaffold: Vec<ScaffoldBlock> = (0..depth)
            .map(|_| ScaffoldBlock {
                class: theme.line_children.clone(),
                style: InlineStyle::new().with("width", px(width as f64)),
            })
            .collect();
        scaffold.push(ScaffoldBlock {
            class: theme.line_block.clone(),
            style: InlineStyle::new()
                .with("width", px(width as f64))
                .with(offset, px(width as f64)),
        });

        let wrapper_class = join_classes(
            &theme.row_wrapper,
            [
                (!props.can_drag, theme.row_wrapper_drag_disabled.as_str()),
                (props.row_direction == RowDirection::Rtl, theme.rtl.as_str()),
            ],
        );

        let row_class = join_classes(
            &theme.row,
            [
                (landing_pad, theme.row_landing_pad.as_str()),
                (landing_pad && !props.can_drop, theme.row_cancel_pad.as_str()),
                (props.is_search_match, theme.row_search_match.as_str()),
                (props.is_search_focus, theme.row_search_focus.as_str()),
                (true, props.class_name.as_str()),
            ],
        );

        let opacity = if props.is_dragged_descendant() { "0.5" } else { "1" };
        let mut row_style = InlineStyle::new().with("opacity", opacity);
        row_style.merge(&props.style);

        let contents_class = join_classes(
            &theme.row_contents,
            [(!props.can_drag, theme.row_contents_drag_disabled.as_str())],
        );

        Self {
            control,
            scaffold,
            wrapper_class,
            row_class,
            row_style,
            contents_class,
            toolbar_class: theme.row_toolbar.clone(),
            toolbar_button_class: theme.toolbar_button.clone(),
            label_class: theme.row_label.clone(),
            title_class: theme.row_title.clone(),
            drag_source: props.can_drag.then(DragSourceOptions::copy),
        }
    }

    pub fn opacity(&self) -> Option<&str> {
        self.row_style.get("opacity")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeClass;
    use leptos_dragdrop::DropEffect;
    use std::sync::Mutex;

    fn position(path: &[i64], tree_index: usize) -> RowPosition {
        RowPosition {
            path: path.iter().copied().map(NodeKey::from).collect(),
            tree_index,
            list_index: tree_index,
            lower_sibling_counts: vec![0; path.len()],
        }
    }

    fn props_for(node: TreeNode, path: &[i64]) -> RowProps {
        RowProps::new(node, position(path, 3), 44, "tree", RowDirection::Ltr, DragFlags::default())
    }

    fn noop_toggle() -> ToggleChildren {
        Arc::new(|_| {})
    }

    fn parent() -> TreeNode {
        TreeNode::new(1, "Study").with_children(vec![
            TreeNode::new(2, "Table").with_children(vec![TreeNode::new(3, "Footnotes")]),
        ])
    }

    #[test]
    fn test_no_toggle_callback_no_control() {
        let model = RowModel::build(&props_for(TreeNode::new(1, "Leaf"), &[1]), &RowTheme::default());
        assert!(model.control.is_none());

        let model = RowModel::build(&props_for(parent(), &[1]), &RowTheme::default());
        assert!(model.control.is_none());
    }

    #[test]
    fn test_toggle_button_for_parent() {
        let mut props = props_for(parent(), &[1, 2]);
        props.toggle_children_visibility = Some(noop_toggle());
        let theme = RowTheme::default();

        match RowModel::build(&props, &theme).control {
            Some(RowControl::Toggle { aria_label, class, style }) => {
                assert_eq!(aria_label, "Expand");
                assert_eq!(class, theme.expand_button);
                // (2 - 0.7) * 44
                assert_eq!(style.get("left"), Some("57.2px"));
            }
            other => panic!("expected toggle, got {:?}", other),
        }

        props.node.expanded = true;
        match RowModel::build(&props, &theme).control {
            Some(RowControl::Toggle { aria_label, class, .. }) => {
                assert_eq!(aria_label, "Collapse");
                assert_eq!(class, theme.collapse_button);
            }
            other => panic!("expected toggle, got {:?}", other),
        }
    }

    #[test]
    fn test_leaf_icon_for_childless_node() {
        let leaf = TreeNode::new(9, "Listing 16.2").with_class(NodeClass::Listing);
        let mut props = props_for(leaf, &[1, 4, 9]);
        props.toggle_children_visibility = Some(noop_toggle());

        match RowModel::build(&props, &RowTheme::default()).control {
            Some(RowControl::LeafIcon { glyph, style }) => {
                assert_eq!(glyph, "L");
                assert_eq!(style.get("left"), Some("88px"));
                assert_eq!(style.get("position"), Some("absolute"));
                assert_eq!(style.get("width"), Some("12px"));
            }
            other => panic!("expected leaf icon, got {:?}", other),
        }

        props.node = TreeNode::new(9, "Empty").with_children(vec![]);
        assert!(matches!(
            RowModel::build(&props, &RowTheme::default()).control,
            Some(RowControl::LeafIcon { glyph: "", .. })
        ));
    }

    #[test]
    fn test_deferred_children_get_toggle() {
        let lazy = TreeNode::new(5, "Lazy").with_loader(Arc::new(|_| Vec::new()));
        let mut props = props_for(lazy, &[5]);
        props.toggle_children_visibility = Some(noop_toggle());

        match RowModel::build(&props, &RowTheme::default()).control {
            Some(RowControl::Toggle { aria_label, style, .. }) => {
                assert_eq!(aria_label, "Expand");
                // (1 - 0.7) * 44
                assert_eq!(style.get("left"), Some("13.2px"));
            }
            other => panic!("expected toggle, got {:?}", other),
        }
    }

    #[test]
    fn test_scaffold_per_depth() {
        let theme = RowTheme::default();
        let model = RowModel::build(&props_for(TreeNode::new(1, "x"), &[1, 2, 3]), &theme);
        assert_eq!(model.scaffold.len(), 3);
        assert_eq!(model.scaffold.iter().filter(|b| b.class == theme.line_children).count(), 2);
        let block = model.scaffold.last().unwrap();
        assert_eq!(block.class, theme.line_block);
        assert_eq!(block.style.get("width"), Some("44px"));
        assert_eq!(block.style.get("left"), Some("44px"));

        let root = RowModel::build(&props_for(TreeNode::new(1, "x"), &[1]), &theme);
        assert_eq!(root.scaffold.len(), 1);

        let empty = RowModel::build(&props_for(TreeNode::new(1, "x"), &[]), &theme);
        assert_eq!(empty.scaffold.len(), 1);
    }

    #[test]
    fn test_row_class_order() {
        let mut props = props_for(TreeNode::new(1, "x"), &[1]);
        props.drag = DragFlags { is_dragging: true, did_drop: false, is_over: true };
        props.is_search_match = true;
        props.is_search_focus = true;
        props.class_name = "custom".to_string();

        let model = RowModel::build(&props, &RowTheme::default());
        assert_eq!(
            model.row_class,
            "rst__row rst__rowLandingPad rst__rowCancelPad rst__rowSearchMatch rst__rowSearchFocus custom"
        );

        props.can_drop = true;
        let model = RowModel::build(&props, &RowTheme::default());
        assert!(!model.row_class.contains("rst__rowCancelPad"));
        assert!(model.row_class.contains("rst__rowLandingPad"));
    }

    #[test]
    fn test_no_landing_pad_after_drop() {
        let mut props = props_for(TreeNode::new(1, "x"), &[1]);
        props.drag = DragFlags { is_dragging: true, did_drop: true, is_over: false };
        let model = RowModel::build(&props, &RowTheme::default());
        assert_eq!(model.row_class, "rst__row");
    }

    #[test]
    fn test_drag_disabled_classes() {
        let mut props = props_for(TreeNode::new(1, "x"), &[1]);
        let model = RowModel::build(&props, &RowTheme::default());
        assert_eq!(model.wrapper_class, "rst__rowWrapper rst__rowWrapperDragDisabled");
        assert_eq!(model.contents_class, "rst__rowContents rst__rowContentsDragDisabled");

        props.can_drag = true;
        let model = RowModel::build(&props, &RowTheme::default());
        assert_eq!(model.wrapper_class, "rst__rowWrapper");
        assert_eq!(model.contents_class, "rst__rowContents");
    }

    #[test]
    fn test_drag_source_only_when_draggable() {
        let mut props = props_for(TreeNode::new(1, "x"), &[1]);
        assert_eq!(RowModel::build(&props, &RowTheme::default()).drag_source, None);

        props.can_drag = true;
        let options = RowModel::build(&props, &RowTheme::default()).drag_source.unwrap();
        assert_eq!(options.drop_effect, DropEffect::Copy);
    }

    #[test]
    fn test_opacity_for_dragged_descendant() {
        let dragged = parent();
        let grandchild = TreeNode::new(3, "Footnotes");

        let mut props = props_for(grandchild, &[1, 2, 3]);
        assert_eq!(RowModel::build(&props, &RowTheme::default()).opacity(), Some("1"));

        props.dragged_node = Some(dragged.clone());
        assert_eq!(RowModel::build(&props, &RowTheme::default()).opacity(), Some("0.5"));

        // The dragged node itself is not its own descendant
        props.node = dragged.clone();
        assert_eq!(RowModel::build(&props, &RowTheme::default()).opacity(), Some("1"));

        props.node = TreeNode::new(99, "Elsewhere");
        assert_eq!(RowModel::build(&props, &RowTheme::default()).opacity(), Some("1"));
    }

    #[test]
    fn test_style_overrides_merge_after_opacity() {
        let mut props = props_for(TreeNode::new(1, "x"), &[1]);
        props.style = [("color", "red"), ("opacity", "0.8")].into_iter().collect();
        let model = RowModel::build(&props, &RowTheme::default());
        assert_eq!(model.row_style.to_css(), "opacity: 0.8; color: red;");
    }

    #[test]
    fn test_rtl_offsets() {
        let mut props = props_for(parent(), &[1]);
        props.row_direction = RowDirection::parse("RTL");
        props.toggle_children_visibility = Some(noop_toggle());
        let model = RowModel::build(&props, &RowTheme::default());

        assert!(model.wrapper_class.ends_with(" rst__rtl"));
        match model.control {
            Some(RowControl::Toggle { style, .. }) => {
                assert_eq!(style.get("right"), Some("13.2px"));
                assert_eq!(style.get("left"), None);
            }
            other => panic!("expected toggle, got {:?}", other),
        }
    }

    #[test]
    fn test_request_toggle_passes_context() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut props = props_for(parent(), &[1]);
        props.toggle_children_visibility = Some(Arc::new(move |ctx| sink.lock().unwrap().push(ctx)));

        props.request_toggle();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].node.key, NodeKey::Number(1));
        assert_eq!(seen[0].path, vec![NodeKey::Number(1)]);
        assert_eq!(seen[0].tree_index, 3);
    }

    #[test]
    fn test_resolved_title() {
        let mut props = props_for(TreeNode::new(1, "Node title"), &[1]);
        assert!(matches!(props.resolved_title(), Title::Text(t) if t == "Node title"));

        props.title = Some(Title::from(""));
        assert!(matches!(props.resolved_title(), Title::Text(t) if t == "Node title"));

        props.title = Some(Title::from("Override"));
        assert!(matches!(props.resolved_title(), Title::Text(t) if t == "Override"));
    }

    #[test]
    fn test_view_title_is_rendered() {
        let runs = Arc::new(Mutex::new(0));
        let counter = runs.clone();
        let mut props = props_for(TreeNode::new(4, "Node title"), &[4]);
        props.title = Some(Title::from(ViewFn::from(move || {
            *counter.lock().unwrap() += 1;
            "Custom"
        })));

        assert!(matches!(props.resolved_title(), Title::View(_)));
        let _ = props.render_title();
        assert_eq!(*runs.lock().unwrap(), 1);
    }

    #[test]
    fn test_title_renderer_receives_context() {
        let seen = Arc::new(Mutex::new(None));
        let sink = seen.clone();
        let mut props = props_for(TreeNode::new(4, "x"), &[1, 4]);
        props.title = Some(Title::Render(Arc::new(move |ctx: &RowContext| {
            *sink.lock().unwrap() = Some(ctx.clone());
            "rendered".into_any()
        })));

        let _ = props.render_title();

        let ctx = seen.lock().unwrap().clone().unwrap();
        assert_eq!(ctx.node.key, NodeKey::Number(4));
        assert_eq!(ctx.path.len(), 2);
        assert_eq!(ctx.tree_index, 3);
    }

    #[test]
    fn test_inline_style_replaces() {
        let mut style = InlineStyle::new().with("width", "1px");
        style.set("width", "2px");
        assert_eq!(style.to_css(), "width: 2px;");
        assert!(InlineStyle::new().to_css().is_empty());
    }
}
