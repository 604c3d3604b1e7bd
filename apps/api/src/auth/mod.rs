pub mod handlers;
pub mod password;
pub mod validation;
