//! Leptos DragDrop Utilities
//!
//! HTML5 drag-and-drop connectors for Leptos.
//! `DragSource` makes its content draggable, `DragPreview` marks the element
//! used as the drag image, and `DndSignals` tracks the drag in progress.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// MIME type used for the dragged id in the DataTransfer payload
pub const DRAG_MIME: &str = "text/plain";

/// Attribute marking the element used as the drag image
const PREVIEW_ATTR: &str = "data-drag-preview";

/// Drop effect advertised by a drag source
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DropEffect {
    #[default]
    Move,
    Copy,
    Link,
    None,
}

impl DropEffect {
    /// Value accepted by `DataTransfer.dropEffect`
    pub fn as_str(self) -> &'static str {
        match self {
            DropEffect::Move => "move",
            DropEffect::Copy => "copy",
            DropEffect::Link => "link",
            DropEffect::None => "none",
        }
    }
}

/// Options applied when a drag source starts dragging
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DragSourceOptions {
    pub drop_effect: DropEffect,
}

impl DragSourceOptions {
    pub fn copy() -> Self {
        Self { drop_effect: DropEffect::Copy }
    }
}

/// Drop target types
#[derive(Clone, Debug, PartialEq)]
pub enum DropTarget {
    /// Drop on an item (become child)
    Item(String),
}

impl DropTarget {
    pub fn is_item(&self, id: &str) -> bool {
        matches!(self, DropTarget::Item(target) if target == id)
    }
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_id_read: ReadSignal<Option<String>>,
    pub dragging_id_write: WriteSignal<Option<String>>,
    pub drop_target_read: ReadSignal<Option<DropTarget>>,
    pub drop_target_write: WriteSignal<Option<DropTarget>>,
    /// Set once a target accepted the current drag; cleared on `dragend`
    pub did_drop_read: ReadSignal<bool>,
    pub did_drop_write: WriteSignal<bool>,
}

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_id_read, dragging_id_write) = signal(None::<String>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget>);
    let (did_drop_read, did_drop_write) = signal(false);
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drop_target_read,
        drop_target_write,
        did_drop_read,
        did_drop_write,
    }
}

/// Start drag operation
pub fn begin_drag(dnd: &DndSignals, id: String) {
    log::debug!(target: "DND", "drag start: {}", id);
    dnd.did_drop_write.set(false);
    dnd.drop_target_write.set(None);
    dnd.dragging_id_write.set(Some(id));
}

/// Record a drop on the current target
///
/// The drag stays active with `did_drop` set until the source sees `dragend`.
/// Returns the dragged id and target, or `None` when nothing was accepted.
pub fn accept_drop(dnd: &DndSignals) -> Option<(String, DropTarget)> {
    if dnd.did_drop_read.get_untracked() {
        return None;
    }
    let dragged = dnd.dragging_id_read.get_untracked()?;
    let target = dnd.drop_target_read.get_untracked()?;
    dnd.did_drop_write.set(true);
    dnd.drop_target_write.set(None);
    Some((dragged, target))
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    if let Some(id) = dnd.dragging_id_read.get_untracked() {
        log::debug!(target: "DND", "drag end: {} (dropped={})", id, dnd.did_drop_read.get_untracked());
    }
    dnd.dragging_id_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.did_drop_write.set(false);
}

/// Create dragenter handler for items (become child target)
pub fn make_on_item_dragenter(dnd: DndSignals, item_id: String) -> impl Fn(web_sys::DragEvent) + Clone + 'static {
    move |ev: web_sys::DragEvent| {
        if let Some(dragging) = dnd.dragging_id_read.get_untracked() {
            ev.prevent_default();
            // Don't allow dropping on self
            if dragging != item_id {
                dnd.drop_target_write.set(Some(DropTarget::Item(item_id.clone())));
            }
        }
    }
}

/// Create dragover handler; accepting the event is what enables `drop`
pub fn make_on_dragover(dnd: DndSignals) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |ev: web_sys::DragEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            ev.prevent_default();
        }
    }
}

/// Create dragleave handler
pub fn make_on_dragleave(dnd: DndSignals) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |_ev: web_sys::DragEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Create drop handler for targets
pub fn make_on_drop<F>(dnd: DndSignals, on_drop: F) -> impl Fn(web_sys::DragEvent) + Clone + 'static
where
    F: Fn(String, DropTarget) + Clone + 'static,
{
    move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        if let Some((dragged, target)) = accept_drop(&dnd) {
            on_drop(dragged, target);
        }
    }
}

/// Bind a document listener that ends a drag the source never reported
///
/// A row re-rendered mid-drag loses its `dragend`; mouse events are held
/// back during an HTML5 drag, so the first `mousemove` means it is over.
pub fn bind_global_drag_cleanup(dnd: DndSignals) {
    use wasm_bindgen::closure::Closure;

    let on_finished = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            end_drag(&dnd);
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mousemove", on_finished.as_ref().unchecked_ref());
        }
    }
    on_finished.forget();
}

fn find_preview(ev: &web_sys::DragEvent) -> Option<web_sys::Element> {
    let source = ev.current_target()?.dyn_into::<web_sys::Element>().ok()?;
    source.query_selector(&format!("[{}]", PREVIEW_ATTR)).ok().flatten()
}

/// Marks its content as the drag image of the enclosing `DragSource`
#[component]
pub fn DragPreview(children: Children) -> impl IntoView {
    view! {
        <div data-drag-preview="">{children()}</div>
    }
}

/// Makes its content draggable
///
/// On `dragstart` the drop effect from `options` is written to the
/// DataTransfer, the nearest `DragPreview` becomes the drag image and the
/// drag id is recorded in `dnd` (or the `DndSignals` found in context).
#[component]
pub fn DragSource(
    #[prop(into)]
    drag_id: String,
    #[prop(optional)]
    options: DragSourceOptions,
    #[prop(optional_no_strip)]
    dnd: Option<DndSignals>,
    children: Children,
) -> impl IntoView {
    let dnd = dnd.or_else(use_context::<DndSignals>);

    let on_dragstart = move |ev: web_sys::DragEvent| {
        // Nested sources must not restart the outer drag
        ev.stop_propagation();
        if let Some(dt) = ev.data_transfer() {
            let effect = options.drop_effect.as_str();
            dt.set_effect_allowed(effect);
            dt.set_drop_effect(effect);
            if let Err(err) = dt.set_data(DRAG_MIME, &drag_id) {
                log::warn!(target: "DND", "setData rejected for {}: {:?}", drag_id, err);
            }
            if let Some(preview) = find_preview(&ev) {
                dt.set_drag_image(&preview, 0, 0);
            }
        }
        if let Some(dnd) = dnd {
            // Publish after the browser has taken the drag image, so the
            // re-render this triggers does not show up in the preview
            let id = drag_id.clone();
            let publish = wasm_bindgen::closure::Closure::once_into_js(move || begin_drag(&dnd, id));
            match web_sys::window() {
                Some(win) => {
                    let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(publish.unchecked_ref(), 0);
                }
                None => begin_drag(&dnd, drag_id.clone()),
            }
        }
    };

    let on_dragend = move |_ev: web_sys::DragEvent| {
        if let Some(dnd) = dnd {
            end_drag(&dnd);
        }
    };

    view! {
        <div class="drag-source" draggable="true" on:dragstart=on_dragstart on:dragend=on_dragend>
            {children()}
        </div>
    }
}
