// src/unit/mod.rs

//! Initialization units as handed to the resolver.
//!
//! - [`descriptor`] defines [`UnitDescriptor`] and its opaque [`RunAction`].
//! - [`registry`] is the validated store the pipeline reads from.
//! - [`provider`] is the seam through which an external discovery
//!   mechanism (manifest, static tables, plugin scan...) feeds units in.

pub mod descriptor;
pub mod provider;
pub mod registry;

pub use descriptor::{RunAction, UnitDescriptor};
pub use provider::DescriptorProvider;
pub use registry::{RegisterOutcome, SharedRegistry, UnitRegistry, ValidationError};
