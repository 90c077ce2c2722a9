pub mod api;
pub mod app;
pub mod filter_dropdown;
pub mod inbox_view;
pub mod message_modal;
pub mod outside_click;
pub mod session_state;
pub mod toast;
