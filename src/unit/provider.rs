// src/unit/provider.rs

use crate::unit::UnitDescriptor;

/// Capability implemented by whatever discovers units.
///
/// The core never inspects code or metadata itself; it only enumerates
/// what a provider hands it. [`crate::config::Manifest`] is the provider
/// used by the binary.
pub trait DescriptorProvider {
    fn descriptors(&self) -> Vec<UnitDescriptor>;
}

impl DescriptorProvider for [UnitDescriptor] {
    fn descriptors(&self) -> Vec<UnitDescriptor> {
        self.to_vec()
    }
}

impl DescriptorProvider for Vec<UnitDescriptor> {
    fn descriptors(&self) -> Vec<UnitDescriptor> {
        self.clone()
    }
}
