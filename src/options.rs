//! Per-call override records and the field tables that drive their wire projection.

pub mod acquire;
pub mod call;
pub mod context;
pub mod wire;

pub use acquire::*;
pub use call::*;
pub use context::*;
pub use wire::*;
