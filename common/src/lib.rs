pub mod filter;
pub mod gateway;
pub mod inbox;
pub mod message;
pub mod roster;
pub mod session;
