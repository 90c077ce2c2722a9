use std::collections::BTreeSet;

use dioxus::prelude::*;

use satchel_common::filter::{visible_messages, FilterSet};
use satchel_common::inbox::load_inbox;
use satchel_common::message::{Message, RecipientKind};

use super::api::HttpGateway;
use super::filter_dropdown::FilterDropdown;
use super::message_modal::MessageModal;
use super::outside_click::use_dismiss_on_outside_click;
use super::session_state::use_session;
use super::toast::{show_error, use_toasts};

#[component]
pub fn InboxView() -> Element {
    let session_state = use_session();
    let toasts = use_toasts();
    let mut messages = use_signal(Vec::<Message>::new);
    let mut filters = use_signal(FilterSet::new);
    let open_dropdowns = use_signal(BTreeSet::<RecipientKind>::new);
    let mut selected_message = use_signal(|| None::<String>);
    let mut loading = use_signal(|| true);

    use_dismiss_on_outside_click(open_dropdowns);

    // Initial data fetch. One load per mount; refresh is a full page
    // reload, so there is no re-fetch path to coordinate with.
    use_effect(move || {
        spawn(async move {
            let Some(state) = session_state.read().clone() else {
                loading.set(false);
                return;
            };
            let gateway = HttpGateway::from_config(state.token.clone());
            match load_inbox(&gateway, &state.session).await {
                Ok(data) => {
                    tracing::info!("Loaded {} inbox messages", data.messages.len());
                    filters.set(FilterSet::from_catalog(&data.catalog));
                    messages.set(data.messages);
                }
                Err(err) => {
                    tracing::error!("Inbox load failed: {err}");
                    show_error(toasts, err.user_message());
                }
            }
            loading.set(false);
        });
    });

    let shown = use_memo(move || {
        let role = match session_state.read().as_ref() {
            Some(state) => state.session.role,
            None => return Vec::new(),
        };
        let messages = messages.read();
        let filters = filters.read();
        visible_messages(&messages, &filters, role)
            .into_iter()
            .cloned()
            .collect::<Vec<Message>>()
    });

    let Some(role) = session_state.read().as_ref().map(|s| s.session.role) else {
        return rsx! {
            div { class: "inbox-view",
                p { class: "empty-state", "Sign in to see your messages." }
            }
        };
    };

    let is_loading = *loading.read();
    let have_messages = !messages.read().is_empty();
    let shown = shown();

    // The modal looks the message up by id so it always shows the
    // fetched record, filtered out of the list or not.
    let open_message: Option<Message> = selected_message.read().as_ref().and_then(|id| {
        messages.read().iter().find(|m| &m.id == id).cloned()
    });

    rsx! {
        div { class: "inbox-view",
            div { class: "inbox-header",
                nav { class: "breadcrumb",
                    span { "Messages" }
                    span { class: "breadcrumb-sep", " / " }
                    span { class: "breadcrumb-current", "Inbox" }
                }
                button {
                    class: "refresh-btn",
                    onclick: move |_| reload_page(),
                    "Refresh"
                }
            }

            if role.filters_offered() {
                div { class: "filter-row",
                    FilterDropdown { kind: RecipientKind::Users, filters, open: open_dropdowns }
                    FilterDropdown { kind: RecipientKind::Classes, filters, open: open_dropdowns }
                    FilterDropdown { kind: RecipientKind::Students, filters, open: open_dropdowns }
                }
            }

            if is_loading {
                p { class: "loading", "Loading messages..." }
            }

            div { class: "message-list",
                if shown.is_empty() {
                    if !is_loading && !have_messages {
                        p { class: "empty-state", "Your inbox is empty." }
                    } else if !is_loading {
                        p { class: "empty-state", "No messages match the selected filters." }
                    }
                } else {
                    {shown.into_iter().map(|message| {
                        let id_clone = message.id.clone();
                        let sender_name = message.sender.name.clone();
                        let sender_role = message.sender.role.label();
                        let sent = message.created_at.format("%d %b %Y, %H:%M").to_string();
                        let preview = preview_text(&message.body);
                        rsx! {
                            div { class: "message-card",
                                key: "{message.id}",
                                onclick: move |_| selected_message.set(Some(id_clone.clone())),
                                div { class: "message-card-head",
                                    span { class: "message-sender", "{sender_name}" }
                                    span { class: "message-sender-role", " ({sender_role})" }
                                    span { class: "message-date", "{sent}" }
                                }
                                h3 { class: "message-subject", "{message.subject}" }
                                p { class: "message-preview", "{preview}" }
                            }
                        }
                    })}
                }
            }

            if let Some(message) = open_message {
                MessageModal {
                    message,
                    on_close: move |_| selected_message.set(None),
                }
            }
        }
    }
}

/// First line of the body, shortened to fit the card.
fn preview_text(body: &str) -> String {
    const MAX_CHARS: usize = 120;
    let first_line = body.lines().next().unwrap_or_default();
    if first_line.chars().count() <= MAX_CHARS {
        first_line.to_string()
    } else {
        let cut: String = first_line.chars().take(MAX_CHARS).collect();
        format!("{cut}...")
    }
}

fn reload_page() {
    #[cfg(target_family = "wasm")]
    if let Some(window) = web_sys::window() {
        let _ = window.location().reload();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_keeps_short_first_lines_whole() {
        assert_eq!(preview_text("Bring a hat.\nAnd sunscreen."), "Bring a hat.");
        assert_eq!(preview_text(""), "");
    }

    #[test]
    fn preview_truncates_on_a_char_boundary() {
        let body = "é".repeat(200);
        let preview = preview_text(&body);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 123);
    }
}
