use dioxus::prelude::*;

use super::inbox_view::InboxView;
use super::session_state::{load_session, use_session};
use super::toast::{ToastState, ToastTray};

#[derive(Clone, Debug, PartialEq, Routable)]
pub enum Route {
    #[layout(AppLayout)]
    #[route("/")]
    Inbox {},
}

#[component]
pub fn App() -> Element {
    // Session is read from storage exactly once and injected from here;
    // pages below never reach into storage themselves.
    use_context_provider(|| Signal::new(load_session()));
    use_context_provider(|| Signal::new(ToastState::new()));

    rsx! { Router::<Route> {} }
}

#[component]
fn AppLayout() -> Element {
    let session_state = use_session();

    let signed_in = session_state
        .read()
        .as_ref()
        .map(|state| (state.session.name.clone(), state.session.role.label()));

    rsx! {
        div { class: "satchel-app",
            header { class: "app-header",
                div { class: "header-top",
                    h1 { "Satchel" }
                    if let Some((name, role_label)) = signed_in {
                        div { class: "user-info",
                            span { class: "user-name", "{name}" }
                            span { class: "user-role", " [{role_label}]" }
                        }
                    }
                }
                p { "School messaging" }
            }
            main {
                Outlet::<Route> {}
            }
            ToastTray {}
        }
    }
}

/// Route component: renders the inbox view.
#[component]
fn Inbox() -> Element {
    rsx! { InboxView {} }
}
