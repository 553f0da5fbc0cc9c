pub mod form_flow;

pub use form_flow::{FormFlow, FormSection};
