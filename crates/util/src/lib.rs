pub mod date_handling;
pub mod path_processing;
pub mod text_processing;

pub use date_handling::format_local_timestamp;
pub use path_processing::{expand_tilde, resolve_against};
pub use text_processing::{redact_sensitive, secret_prefix};
