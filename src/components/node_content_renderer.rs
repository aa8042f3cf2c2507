//! Node Content Renderer
//!
//! One row of the file-theme tree: scaffold lines, toggle or leaf icon,
//! title and toolbars, wrapped in the drag connectors.

use leptos::prelude::*;
use leptos_dragdrop::{DndSignals, DragPreview, DragSource};

use crate::row::{RowControl, RowModel, RowProps};
use crate::theme::use_row_theme;

/// A single tree row
///
/// `dnd` defaults to the `DndSignals` in context; without either the row is
/// still draggable but nothing records the drag.
#[component]
pub fn NodeContentRenderer(
    props: RowProps,
    #[prop(optional)]
    dnd: Option<DndSignals>,
) -> impl IntoView {
    props.warn_invalid();

    let theme = use_row_theme();
    let RowModel {
        control,
        scaffold,
        wrapper_class,
        row_class,
        row_style,
        contents_class,
        toolbar_class,
        toolbar_button_class,
        label_class,
        title_class,
        drag_source,
    } = RowModel::build(&props, &theme);

    let control = control.map(|control| match control {
        RowControl::Toggle { aria_label, class, style } => {
            let toggle_props = props.clone();
            view! {
                <button
                    type="button"
                    aria-label=aria_label
                    class=class
                    style={style.to_css()}
                    on:click=move |_| toggle_props.request_toggle()
                />
            }
            .into_any()
        }
        RowControl::LeafIcon { glyph, style } => view! {
            <div style={style.to_css()}>{glyph}</div>
        }
        .into_any(),
    });

    let scaffold = scaffold
        .into_iter()
        .map(|block| view! { <div class={block.class} style={block.style.to_css()}></div> })
        .collect_view();

    // Leading icons and trailing buttons share the toolbar-button wrapper
    let toolbar = |items: &[ViewFn]| {
        items
            .iter()
            .map(|item| view! { <div class={toolbar_button_class.clone()}>{item.run()}</div> })
            .collect_view()
    };
    let icons = toolbar(&props.icons);
    let buttons = toolbar(&props.buttons);
    let title = props.render_title();
    let leading_toolbar = toolbar_class.clone();

    let content = view! {
        <div
            style="height: 100%;"
            data-tree-id={props.tree_id.clone()}
            data-tree-index={props.position.tree_index.to_string()}
            data-list-index={props.position.list_index.to_string()}
        >
            {control}
            <div class=wrapper_class>
                <DragPreview>
                    <div style="display: flex;">
                        {scaffold}
                        <div class=row_class style={row_style.to_css()}>
                            <div class=contents_class>
                                <div class=leading_toolbar>{icons}</div>
                                <div class=label_class>
                                    <span class=title_class>{title}</span>
                                </div>
                                <div class=toolbar_class>{buttons}</div>
                            </div>
                        </div>
                    </div>
                </DragPreview>
            </div>
        </div>
    };

    match drag_source {
        Some(options) => view! {
            <DragSource drag_id={props.node.key.to_string()} options=options dnd=dnd>
                {content}
            </DragSource>
        }
        .into_any(),
        None => content.into_any(),
    }
}
