//! UI Components
//!
//! Reusable Leptos components.

mod node_content_renderer;

pub use node_content_renderer::NodeContentRenderer;
