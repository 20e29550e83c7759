// ─── Prefix Dependencies ───
// A third-party launcher some games need inside their prefix: where to get
// its installer, how to run it silently and how to tell it is installed.

pub mod installer;
pub mod model;
pub mod probe;

pub use installer::DependencyInstaller;
pub use model::Dependency;
pub use probe::is_dependency_installed;
