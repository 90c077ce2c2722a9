use dioxus::prelude::*;

use satchel_common::message::Message;

/// Detail modal for one message: full body, attachment reference (or an
/// explicit "none"), sender, and the send date. Closed by the button or
/// a click on the backdrop.
#[component]
pub fn MessageModal(message: Message, on_close: EventHandler<()>) -> Element {
    let sender_name = message.sender.name.clone();
    let sender_role = message.sender.role.label();
    let sent = message.created_at.format("%d %b %Y, %H:%M").to_string();
    let attachment = message
        .attachment
        .clone()
        .unwrap_or_else(|| "none".to_string());

    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| on_close.call(()),
            div {
                class: "message-modal",
                // Keep panel clicks from reaching the backdrop handler
                onclick: move |evt| evt.stop_propagation(),
                div { class: "modal-header",
                    h3 { "{message.subject}" }
                    button {
                        class: "modal-close",
                        onclick: move |_| on_close.call(()),
                        "\u{2715}"
                    }
                }
                div { class: "modal-body",
                    p { class: "message-body", "{message.body}" }
                }
                div { class: "modal-footer",
                    p { class: "modal-attachment", "Attachment: {attachment}" }
                    p { class: "modal-sender", "From: {sender_name} ({sender_role})" }
                    p { class: "modal-date", "Sent: {sent}" }
                }
            }
        }
    }
}
