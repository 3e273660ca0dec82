//! Branch module: the offices that employees and vehicles belong to

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
