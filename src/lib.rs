//! File-theme tree rows for Leptos
//!
//! `NodeContentRenderer` draws one row of a drag-and-drop tree view. The
//! tree view owns the nodes and drag state and passes them in as `RowProps`.

pub mod node;
pub mod row;
pub mod theme;
pub mod validation;
pub mod logging;
pub mod tree;
pub mod store;
pub mod components;
pub mod app;

pub use components::NodeContentRenderer;
pub use node::{icon_glyph, is_descendant, NodeChildren, NodeClass, NodeKey, TreeNode};
pub use row::{DragFlags, InlineStyle, RowContext, RowDirection, RowModel, RowPosition, RowProps, Title};
pub use theme::RowTheme;
pub use validation::RowPropsError;
