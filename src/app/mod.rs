// Application layer - Use case interactors

pub mod container;
pub mod convert_interactor;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer, ToolPaths};
pub use convert_interactor::{ConversionPlan, ConvertInteractor};
