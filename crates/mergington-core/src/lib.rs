pub mod activity;
pub mod catalog;
pub mod config;
pub mod error;
pub mod io;
pub mod registry;

pub use activity::Activity;
pub use error::{RegistryError, Result};
pub use registry::{CapacityPolicy, Registry};
