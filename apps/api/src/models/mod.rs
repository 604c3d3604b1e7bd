pub mod application;
pub mod bookmark;
pub mod conversation;
pub mod job;
pub mod notification;
pub mod user;
