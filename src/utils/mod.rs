pub mod language;
pub mod logging;

pub use language::{resolve_option, resolve_text};
