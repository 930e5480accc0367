//! libSQL-backed implementations of the collaborator traits.
//!
//! Both adapters share the `FellowDb` connection with the relationship store.

mod catalog;
mod directory;

pub use catalog::LocalCatalog;
pub use directory::LocalDirectory;
