//! Query Handlers 实现

mod table_handlers;

pub use table_handlers::*;
