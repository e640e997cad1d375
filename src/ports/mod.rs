//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the valuation domain and the outside world. Adapters implement these ports.
//!
//! - `ReferenceSource` - Read-only statistics over historical listings
//! - `PriceModel` - The fitted regression model
//! - `ArtifactLoader` - Startup loading of both artifacts

mod artifact_loader;
mod price_model;
mod reference_source;

pub use artifact_loader::{ArtifactLoader, StartupError};
pub use price_model::{ModelQuality, PredictionError, PriceModel};
pub use reference_source::{MeanCoordinates, ReferenceSource};
