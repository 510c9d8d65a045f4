//! Catalog-backed lookup of particle kinds by PDG code and by name.

use super::kind::ParticleKind;
use hep_common::{Error, Result};
use hep_config::validate::validate_catalog;
use hep_config::{default_catalog, ParticleRecord, ParticleRef};
use std::collections::HashMap;
use std::sync::Arc;

/// Immutable registry of particle kinds.
///
/// Populated once from catalog records. Lookups by an unknown key return
/// `None`; [`ParticleRegistry::resolve`] turns absence into
/// [`Error::UnknownParticle`] for callers that require the kind.
#[derive(Debug, Clone, Default)]
pub struct ParticleRegistry {
    kinds: Vec<Arc<ParticleKind>>,
    by_pdg: HashMap<i32, usize>,
    by_name: HashMap<String, usize>,
}

impl ParticleRegistry {
    /// Validate catalog records and build the registry.
    pub fn from_records(records: &[ParticleRecord]) -> Result<Self> {
        validate_catalog(records)?;

        let mut registry = Self::default();
        for record in records {
            let index = registry.kinds.len();
            registry.by_pdg.insert(record.pdg, index);
            registry.by_name.insert(record.name.clone(), index);
            registry
                .kinds
                .push(Arc::new(ParticleKind::from_validated(record)));
        }
        Ok(registry)
    }

    /// Registry over the built-in catalog.
    pub fn builtin() -> Result<Self> {
        Self::from_records(&default_catalog())
    }

    pub fn get_by_pdg(&self, pdg: i32) -> Option<&Arc<ParticleKind>> {
        self.by_pdg.get(&pdg).map(|&i| &self.kinds[i])
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Arc<ParticleKind>> {
        self.by_name.get(name).map(|&i| &self.kinds[i])
    }

    pub fn get(&self, reference: &ParticleRef) -> Option<&Arc<ParticleKind>> {
        match reference {
            ParticleRef::Pdg(code) => self.get_by_pdg(*code),
            ParticleRef::Name(name) => self.get_by_name(name),
        }
    }

    /// Look up a kind, failing with [`Error::UnknownParticle`] when absent.
    pub fn resolve(&self, reference: &ParticleRef) -> Result<Arc<ParticleKind>> {
        self.get(reference).cloned().ok_or_else(|| {
            Error::UnknownParticle(match reference {
                ParticleRef::Pdg(code) => format!("PDG code {}", code),
                ParticleRef::Name(name) => format!("name '{}'", name),
            })
        })
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Kinds in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ParticleKind>> {
        self.kinds.iter()
    }
}
