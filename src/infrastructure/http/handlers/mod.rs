//! HTTP Handlers

mod ping;
mod subject;

pub use ping::*;
pub use subject::*;
