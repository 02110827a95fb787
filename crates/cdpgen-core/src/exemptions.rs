//! Nullability exemption registry.
//!
//! Built in one pass over every declared type before any code is emitted.
//! An optional field whose type is in the registry is emitted without
//! pointer indirection, since its zero value already reads as absent.

use crate::cycles;
use crate::error::GenResult;
use crate::resolve::{ResolvedRef, Scope, classify};
use crate::schema::Protocol;
use std::collections::BTreeSet;

/// Declared types exempt from pointer wrapping, keyed by `Domain.Name`
#[derive(Debug, Clone, Default)]
pub struct Exemptions {
    names: BTreeSet<String>,
}

impl Exemptions {
    /// Classify every declared type and record the nullable-by-nature ones.
    ///
    /// Cycle-table targets are always exempt: the shared definition is
    /// referenced through an alias that may cross package boundaries.
    pub fn build(protocol: &Protocol) -> GenResult<Self> {
        let mut exemptions = Self::default();
        for domain in &protocol.domains {
            for ty in &domain.types {
                let Some(id) = ty.id.as_deref() else {
                    continue;
                };
                if classify(ty, &domain.name)?.is_nullable_by_nature() {
                    exemptions.insert(format!("{}.{id}", domain.name));
                }
            }
        }
        for target in cycles::shared_targets() {
            exemptions.insert(target.to_string());
        }
        Ok(exemptions)
    }

    pub fn insert(&mut self, qualified: String) {
        self.names.insert(qualified);
    }

    /// Whether `Domain.Name` is registered
    pub fn contains(&self, qualified: &str) -> bool {
        self.names.contains(qualified)
    }

    /// Whether an optional field of the resolved type skips the pointer
    pub fn is_exempt(&self, resolved: &ResolvedRef) -> bool {
        resolved.scope == Scope::Shared || self.contains(&resolved.qualified())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
