//! Auth-domain inputs: validated API names and redacted header secrets.

pub mod api_name;
pub mod secret;

pub use api_name::*;
pub use secret::*;
