//! Row Theme
//!
//! Class names used by the row renderer. Provided via Leptos context so a
//! host can swap in its own (e.g. hashed CSS-module) names.

use leptos::prelude::*;

/// Default scaffold block width in pixels
pub const DEFAULT_SCAFFOLD_PX: u32 = 44;

/// Default class prefix, matching `style/file-theme.css`
pub const DEFAULT_PREFIX: &str = "rst__";

/// CSS class names for every element of a row
#[derive(Debug, Clone, PartialEq)]
pub struct RowTheme {
    pub row_wrapper: String,
    pub row_wrapper_drag_disabled: String,
    pub row: String,
    pub row_landing_pad: String,
    pub row_cancel_pad: String,
    pub row_search_match: String,
    pub row_search_focus: String,
    pub row_contents: String,
    pub row_contents_drag_disabled: String,
    pub row_toolbar: String,
    pub toolbar_button: String,
    pub row_label: String,
    pub row_title: String,
    pub line_children: String,
    pub line_block: String,
    pub collapse_button: String,
    pub expand_button: String,
    pub rtl: String,
    pub scaffold_block_px_width: u32,
}

impl RowTheme {
    /// Theme whose class names all start with `prefix`
    pub fn with_prefix(prefix: &str) -> Self {
        let class = |name: &str| format!("{}{}", prefix, name);
        Self {
            row_wrapper: class("rowWrapper"),
            row_wrapper_drag_disabled: class("rowWrapperDragDisabled"),
            row: class("row"),
            row_landing_pad: class("rowLandingPad"),
            row_cancel_pad: class("rowCancelPad"),
            row_search_match: class("rowSearchMatch"),
            row_search_focus: class("rowSearchFocus"),
            row_contents: class("rowContents"),
            row_contents_drag_disabled: class("rowContentsDragDisabled"),
            row_toolbar: class("rowToolbar"),
            toolbar_button: class("toolbarButton"),
            row_label: class("rowLabel"),
            row_title: class("rowTitle"),
            line_children: class("lineChildren"),
            line_block: class("lineBlock"),
            collapse_button: class("collapseButton"),
            expand_button: class("expandButton"),
            rtl: class("rtl"),
            scaffold_block_px_width: DEFAULT_SCAFFOLD_PX,
        }
    }
}

impl Default for RowTheme {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_PREFIX)
    }
}

/// Theme from context, or the default file theme
pub fn use_row_theme() -> RowTheme {
    use_context::<RowTheme>().unwrap_or_default()
}
