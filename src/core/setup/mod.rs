pub mod coordinator;

pub use coordinator::{DependencyStatus, SetupCoordinator};
