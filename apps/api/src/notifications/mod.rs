pub mod handlers;
pub mod messages;
pub mod store;
