//! Application layer - startup wiring between adapters and the domain.

mod bootstrap;

pub use bootstrap::LoadedArtifacts;
