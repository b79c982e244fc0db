//! The individual setup checks. Each one inspects a single resource and
//! returns its own [`CheckReport`](crate::report::CheckReport); none of them
//! reads another's result.

mod artifact;
mod endpoint;
mod env_file;
mod mcp_config;
mod test_project;

pub use artifact::check_build_artifact;
pub use endpoint::{check_api_endpoint, describe_timeout};
pub use env_file::{EnvFileScan, check_env_file};
pub use mcp_config::check_mcp_config;
pub use test_project::check_test_project;
