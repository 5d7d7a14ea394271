//! Filter graph and encoder command planning module

pub mod command;
pub mod filters;

pub use command::{CommandAssembler, CommandInputs};
pub use filters::FilterChainBuilder;
