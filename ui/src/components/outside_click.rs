use std::collections::BTreeSet;

use dioxus::prelude::*;

use satchel_common::message::RecipientKind;

/// Selector for the dropdown regions the dismiss controller treats as
/// "inside". Clicks landing anywhere else close every open dropdown.
#[cfg(target_family = "wasm")]
const DROPDOWN_REGION_SELECTOR: &str = ".filter-dropdown";

/// Close all open dropdowns when a pointer-down lands outside every
/// dropdown region.
///
/// One document-level listener per mounted page: registered on first
/// render, removed again when the page unmounts. The handler only
/// writes when something is actually open.
#[cfg(target_family = "wasm")]
pub fn use_dismiss_on_outside_click(open: Signal<BTreeSet<RecipientKind>>) {
    use std::rc::Rc;

    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    let listener = use_hook(move || {
        let callback = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let mut open = open;
            let dismiss = should_dismiss(targets_dropdown_region(&event), &open.peek());
            if dismiss {
                open.write().clear();
            }
        }) as Box<dyn FnMut(web_sys::Event)>);

        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            if let Err(err) = document
                .add_event_listener_with_callback("pointerdown", callback.as_ref().unchecked_ref())
            {
                tracing::warn!("Failed to register dismiss listener: {err:?}");
            }
        }
        Rc::new(callback)
    });

    use_drop(move || {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            let callback: &Closure<dyn FnMut(web_sys::Event)> = &listener;
            let _ = document.remove_event_listener_with_callback(
                "pointerdown",
                callback.as_ref().unchecked_ref(),
            );
        }
    });
}

#[cfg(not(target_family = "wasm"))]
pub fn use_dismiss_on_outside_click(_open: Signal<BTreeSet<RecipientKind>>) {}

/// Whether a pointer-down dismisses: it must land outside every dropdown
/// region while at least one dropdown is open.
#[allow(dead_code)] // called from the WASM listener
fn should_dismiss(inside_region: bool, open: &BTreeSet<RecipientKind>) -> bool {
    !inside_region && !open.is_empty()
}

/// Whether the event target sits inside a dropdown region.
#[cfg(target_family = "wasm")]
fn targets_dropdown_region(event: &web_sys::Event) -> bool {
    use wasm_bindgen::JsCast;

    event
        .target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        .and_then(|element| element.closest(DROPDOWN_REGION_SELECTOR).ok())
        .flatten()
        .is_some()
}
