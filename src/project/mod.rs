//! Project handle abstraction — the seam between recipes and the host.

pub mod memory;

use crate::core::types::DependencyScope;

/// Mutable capability set a host project model exposes to the applier.
///
/// The applier borrows a handle for the duration of one apply call and
/// assumes exclusive access; serializing concurrent applies against the
/// same handle is the host's job. Each capability returns the host's
/// rejection cause on failure.
pub trait ProjectHandle {
    /// Enable a capability plugin. Re-enabling an enabled plugin is a no-op.
    fn enable_plugin(&mut self, id: &str) -> Result<(), String>;

    /// Set the project group and version. Last write wins.
    fn set_identity(&mut self, group: &str, version: &str) -> Result<(), String>;

    /// Set an extra project property. Last write wins.
    fn set_property(&mut self, key: &str, value: &str) -> Result<(), String>;

    /// Declare an artifact repository for coordinate resolution.
    fn add_repository(&mut self, id: &str) -> Result<(), String>;

    /// Register a scoped dependency declaration.
    fn add_dependency(&mut self, scope: DependencyScope, coordinate: &str) -> Result<(), String>;
}
