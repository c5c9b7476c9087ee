// src/unit/registry.rs

//! Validated store of unit descriptors.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;
use tracing::{debug, warn};

use crate::types::UnitId;
use crate::unit::{DescriptorProvider, UnitDescriptor};

/// Why a descriptor was refused by the registry.
///
/// A rejected descriptor is dropped on its own; the rest of the batch is
/// still registered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unit id must not be empty")]
    EmptyId,

    #[error("unit '{0}' is registered more than once")]
    DuplicateId(UnitId),

    #[error("unit '{0}' already has a different run action registered")]
    ConflictingAction(UnitId),
}

/// Result of a successful [`UnitRegistry::register`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// A new unit was stored.
    Added,
    /// The same action was already registered under this id; nothing changed.
    Coalesced,
}

/// Units in registration order, keyed by id.
///
/// This is an explicit value passed into each pipeline call. Nothing in the
/// crate keeps a process-wide instance.
#[derive(Debug, Clone, Default)]
pub struct UnitRegistry {
    units: Vec<UnitDescriptor>,
    index: HashMap<UnitId, usize>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every descriptor the provider yields.
    ///
    /// Offending descriptors are dropped and returned alongside the
    /// registry; the batch itself never fails.
    pub fn from_provider<P>(provider: &P) -> (Self, Vec<ValidationError>)
    where
        P: DescriptorProvider + ?Sized,
    {
        let mut registry = Self::new();
        let rejected = registry.extend(provider.descriptors());
        (registry, rejected)
    }

    /// Register a batch, collecting the errors of rejected descriptors.
    pub fn extend<I>(&mut self, descriptors: I) -> Vec<ValidationError>
    where
        I: IntoIterator<Item = UnitDescriptor>,
    {
        descriptors
            .into_iter()
            .filter_map(|d| self.register(d).err())
            .collect()
    }

    /// Add a single descriptor.
    ///
    /// Re-registering an id with the very same [`crate::unit::RunAction`]
    /// is coalesced into the first registration. Any other reuse of an id
    /// is rejected.
    pub fn register(
        &mut self,
        descriptor: UnitDescriptor,
    ) -> Result<RegisterOutcome, ValidationError> {
        if descriptor.id().trim().is_empty() {
            warn!("rejecting unit with empty id");
            return Err(ValidationError::EmptyId);
        }

        if let Some(&idx) = self.index.get(descriptor.id()) {
            let existing = &self.units[idx];
            let err = match (existing.action(), descriptor.action()) {
                (Some(a), Some(b)) if a.same_as(b) => {
                    debug!(unit = %descriptor.id(), "same action registered twice; coalescing");
                    return Ok(RegisterOutcome::Coalesced);
                }
                (Some(_), Some(_)) => {
                    ValidationError::ConflictingAction(descriptor.id().to_string())
                }
                _ => ValidationError::DuplicateId(descriptor.id().to_string()),
            };
            warn!(unit = %descriptor.id(), error = %err, "rejecting unit");
            return Err(err);
        }

        debug!(
            unit = %descriptor.id(),
            deps = ?descriptor.dependencies(),
            has_action = descriptor.action().is_some(),
            "registered unit"
        );
        self.index.insert(descriptor.id().to_string(), self.units.len());
        self.units.push(descriptor);
        Ok(RegisterOutcome::Added)
    }

    pub fn get(&self, id: &str) -> Option<&UnitDescriptor> {
        self.index.get(id).map(|&idx| &self.units[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &UnitDescriptor> {
        self.units.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(|d| d.id())
    }
}

/// A registry shared between a discovery collaborator and resolution passes.
///
/// Writes take the single writer lock; a pass works on a
/// [`snapshot`](SharedRegistry::snapshot) so it always sees a consistent set
/// and never holds the lock while resolving or running actions.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<UnitRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: UnitRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn register(&self, descriptor: UnitDescriptor) -> Result<RegisterOutcome, ValidationError> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .register(descriptor)
    }

    pub fn extend<I>(&self, descriptors: I) -> Vec<ValidationError>
    where
        I: IntoIterator<Item = UnitDescriptor>,
    {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(descriptors)
    }

    /// Clone of the current contents.
    pub fn snapshot(&self) -> UnitRegistry {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
