pub mod auth;
pub mod color;
pub mod direction;
pub mod session;
