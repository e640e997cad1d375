//! Startup artifact loading adapters

mod filesystem;

pub use filesystem::FsArtifactLoader;
