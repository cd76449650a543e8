// lexgate-core/src/registry.rs
// ============================================================================
// Module: Adapter Registry
// Description: Case-insensitive jurisdiction-to-adapter lookup.
// Purpose: Resolve country codes to adapters with duplicate rejection.
// Dependencies: lexgate-core::adapter
// ============================================================================

//! ## Overview
//! The registry maps lowercase jurisdiction codes to adapter instances.
//! It is built once from a static adapter list at startup and read-only
//! afterwards. Registration of the same instance is idempotent; a second
//! distinct adapter under the same normalized code is rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

use crate::adapter::JurisdictionAdapter;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Registry failure.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two distinct adapters registered under the same normalized code.
    #[error("duplicate country: {0}")]
    DuplicateCountry(String),
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Case-insensitive jurisdiction registry.
///
/// # Invariants
/// - Keys are lowercase jurisdiction codes.
/// - `list` returns adapters ordered by lowercase code.
#[derive(Default)]
pub struct AdapterRegistry {
    /// Adapters keyed by lowercase jurisdiction code.
    adapters: BTreeMap<String, Arc<dyn JurisdictionAdapter>>,
}

impl AdapterRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an adapter under its descriptor's jurisdiction code.
    ///
    /// Re-registering the same instance is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateCountry`] when a distinct adapter
    /// already holds the normalized code.
    pub fn register(&mut self, adapter: Arc<dyn JurisdictionAdapter>) -> Result<(), RegistryError> {
        let code = adapter.descriptor().jurisdiction_code.to_lowercase();
        if let Some(existing) = self.adapters.get(&code) {
            if Arc::ptr_eq(existing, &adapter) {
                return Ok(());
            }
            return Err(RegistryError::DuplicateCountry(code));
        }
        self.adapters.insert(code, adapter);
        Ok(())
    }

    /// Resolves a jurisdiction code, case-insensitively.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<Arc<dyn JurisdictionAdapter>> {
        self.adapters.get(&code.to_lowercase()).cloned()
    }

    /// Returns all adapters ordered by lowercase code.
    #[must_use]
    pub fn list(&self) -> Vec<Arc<dyn JurisdictionAdapter>> {
        self.adapters.values().cloned().collect()
    }

    /// Returns the number of registered adapters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// Returns true when no adapter is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
