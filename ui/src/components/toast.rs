use dioxus::prelude::*;

/// How long a toast stays up before dismissing itself.
#[cfg(target_family = "wasm")]
const TOAST_MILLIS: u32 = 5_000;

/// Severity of a toast notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Error,
    Info,
}

impl ToastLevel {
    fn css_class(self) -> &'static str {
        match self {
            ToastLevel::Error => "toast toast-error",
            ToastLevel::Info => "toast toast-info",
        }
    }
}

/// One on-screen notification.
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub level: ToastLevel,
    pub message: String,
}

/// Queue of visible toasts, provided as context at the app root.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastState {
    toasts: Vec<Toast>,
    next_id: u32,
}

impl ToastState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Queue a toast and return its id for later dismissal.
    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.toasts.push(Toast {
            id,
            level,
            message: message.into(),
        });
        id
    }

    pub fn push_error(&mut self, message: impl Into<String>) -> u32 {
        self.push(ToastLevel::Error, message)
    }

    pub fn dismiss(&mut self, id: u32) {
        self.toasts.retain(|toast| toast.id != id);
    }
}

/// Shared toast context, provided at the top of the app.
pub fn use_toasts() -> Signal<ToastState> {
    use_context::<Signal<ToastState>>()
}

/// Queue an error toast and schedule its auto-dismissal.
pub fn show_error(mut toasts: Signal<ToastState>, message: impl Into<String>) {
    let id = toasts.write().push_error(message);
    auto_dismiss(toasts, id);
}

fn auto_dismiss(toasts: Signal<ToastState>, id: u32) {
    #[cfg(target_family = "wasm")]
    spawn(async move {
        gloo_timers::future::TimeoutFuture::new(TOAST_MILLIS).await;
        let mut toasts = toasts;
        toasts.write().dismiss(id);
    });
    #[cfg(not(target_family = "wasm"))]
    let _ = (toasts, id);
}

/// Overlay listing the active toasts, newest at the bottom.
#[component]
pub fn ToastTray() -> Element {
    let mut toasts = use_toasts();
    let active = toasts.read().toasts().to_vec();

    if active.is_empty() {
        return rsx! {};
    }

    rsx! {
        div { class: "toast-tray",
            for toast in active {
                {
                    let id = toast.id;
                    let css_class = toast.level.css_class();
                    rsx! {
                        div { class: "{css_class}", key: "{id}",
                            span { class: "toast-message", "{toast.message}" }
                            button {
                                class: "toast-dismiss",
                                onclick: move |_| toasts.write().dismiss(id),
                                "\u{2715}"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_assigns_distinct_increasing_ids() {
        let mut state = ToastState::new();
        let a = state.push_error("first");
        let b = state.push_error("second");
        assert!(b > a);
        assert_eq!(state.toasts().len(), 2);
    }

    #[test]
    fn dismiss_removes_only_the_matching_toast() {
        let mut state = ToastState::new();
        let a = state.push_error("first");
        let b = state.push(ToastLevel::Info, "second");
        state.dismiss(a);
        let remaining: Vec<u32> = state.toasts().iter().map(|t| t.id).collect();
        assert_eq!(remaining, vec![b]);
    }

    #[test]
    fn dismissing_an_unknown_id_is_a_no_op() {
        let mut state = ToastState::new();
        state.push_error("only");
        state.dismiss(999);
        assert_eq!(state.toasts().len(), 1);
    }
}
