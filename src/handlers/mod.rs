//! Handler builders and associated traits.
//!
//! Each builder implements [`HandlerBuilderTrait`], validating its
//! configuration up front so that a constructed handler is always usable.

use thiserror::Error;

use crate::handler::FemtoHandler;

pub mod http_builder;

pub use http_builder::HTTPAdapterBuilder;

/// Errors that may occur while building a handler.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandlerBuildError {
    /// Invalid user supplied configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Trait implemented by all handler builders.
pub trait HandlerBuilderTrait: Send + Sync {
    /// Concrete handler produced by this builder.
    type Handler: FemtoHandler + 'static;

    /// Build the concrete handler instance.
    fn build_inner(&self) -> Result<Self::Handler, HandlerBuildError>;

    /// Build the handler as a trait object for registration with a pipeline.
    fn build(&self) -> Result<Box<dyn FemtoHandler>, HandlerBuildError> {
        Ok(Box::new(self.build_inner()?))
    }
}
