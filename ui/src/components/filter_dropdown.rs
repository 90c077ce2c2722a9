use std::collections::BTreeSet;

use dioxus::prelude::*;

use satchel_common::filter::FilterSet;
use satchel_common::message::RecipientKind;

/// Checklist dropdown for one recipient dimension.
///
/// All three instances share the same `FilterSet` signal; open state is
/// per-dimension and independent, so opening one never closes another.
/// The `filter-dropdown` wrapper class is what the outside-click
/// controller treats as "inside".
#[component]
pub fn FilterDropdown(
    kind: RecipientKind,
    mut filters: Signal<FilterSet>,
    mut open: Signal<BTreeSet<RecipientKind>>,
) -> Element {
    let is_open = open.read().contains(&kind);

    let (options, selected_count, select_all) = {
        let filters = filters.read();
        let dimension = filters.dimension(kind);
        (
            dimension.options().to_vec(),
            dimension.selected_count(),
            dimension.select_all(),
        )
    };
    let total = options.len();
    let label = kind.label();
    let toggle_class = if is_open {
        "filter-toggle open"
    } else {
        "filter-toggle"
    };

    rsx! {
        div { class: "filter-dropdown",
            button {
                class: "{toggle_class}",
                onclick: move |_| {
                    let mut opened = open.write();
                    if !opened.remove(&kind) {
                        opened.insert(kind);
                    }
                },
                "{label} ({selected_count}/{total})"
            }
            if is_open {
                div { class: "filter-menu",
                    label { class: "filter-option filter-select-all",
                        input {
                            r#type: "checkbox",
                            checked: select_all,
                            onchange: move |_| filters.write().toggle_all(kind),
                        }
                        " Select all"
                    }
                    if options.is_empty() {
                        p { class: "empty-state", "Nothing to filter by." }
                    } else {
                        {options.into_iter().map(|option| {
                            let checked = filters.read().dimension(kind).is_selected(&option.id);
                            let toggle_id = option.id.clone();
                            rsx! {
                                label { class: "filter-option",
                                    key: "{option.id}",
                                    input {
                                        r#type: "checkbox",
                                        checked,
                                        onchange: move |_| filters.write().toggle(kind, &toggle_id),
                                    }
                                    " {option.label}"
                                }
                            }
                        })}
                    }
                }
            }
        }
    }
}
