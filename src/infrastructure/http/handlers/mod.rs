//! HTTP Handlers

mod openapi;
mod ping;
mod table;

pub use openapi::*;
pub use ping::*;
pub use table::*;
