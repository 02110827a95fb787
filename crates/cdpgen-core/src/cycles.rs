//! Import cycle breaking.
//!
//! A few domains reference each other's types. Generated packages cannot
//! import each other in a loop, so the listed references are redirected to
//! a shared package that both sides import. The owning domain keeps an alias
//! to the shared definition so its own API is unchanged.
//!
//! After resolution, [`ImportGraph`] checks that no cycle remains.

use crate::error::{GenError, GenResult};
use crate::resolve::{Scope, resolve_reference};
use crate::schema::Protocol;
use std::collections::{BTreeMap, BTreeSet};

/// One redirected cross-domain reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleBreak {
    /// Raw name of the referencing domain
    pub consumer: &'static str,

    /// Raw `Domain.Name` being referenced
    pub reference: &'static str,

    /// Identifier of the definition in the shared package
    pub shared: &'static str,
}

/// The fixed cycle-breaking table.
pub const CYCLE_BREAKS: &[CycleBreak] = &[
    CycleBreak {
        consumer: "Network",
        reference: "Page.FrameId",
        shared: "PageFrameID",
    },
    CycleBreak {
        consumer: "Page",
        reference: "DOM.BackendNodeId",
        shared: "DOMBackendNodeID",
    },
    CycleBreak {
        consumer: "Security",
        reference: "Network.TimeSinceEpoch",
        shared: "NetworkTimeSinceEpoch",
    },
];

/// Table entry for `reference` as seen from `consumer`
pub fn lookup(consumer: &str, reference: &str) -> Option<&'static CycleBreak> {
    CYCLE_BREAKS
        .iter()
        .find(|entry| entry.consumer == consumer && entry.reference == reference)
}

/// Shared identifier for a declared type, if any consumer redirects to it.
///
/// The declaring domain emits an alias to this identifier instead of its
/// own definition.
pub fn shared_ident_for(domain: &str, name: &str) -> Option<&'static str> {
    CYCLE_BREAKS
        .iter()
        .find(|entry| {
            entry
                .reference
                .split_once('.')
                .is_some_and(|(d, n)| d == domain && n == name)
        })
        .map(|entry| entry.shared)
}

/// Distinct raw references that live in the shared package, sorted
pub fn shared_targets() -> BTreeSet<&'static str> {
    CYCLE_BREAKS.iter().map(|entry| entry.reference).collect()
}

/// Package dependency graph between domains
#[derive(Debug, Clone, Default)]
pub struct ImportGraph {
    edges: BTreeMap<String, BTreeSet<String>>,
}

impl ImportGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from every reference in the protocol.
    ///
    /// Also verifies that every reference names a declared domain and type;
    /// an undeclared target is an [`GenError::UnresolvedReference`].
    pub fn from_protocol(protocol: &Protocol) -> GenResult<Self> {
        let mut graph = Self::new();
        for domain in &protocol.domains {
            graph.add_domain(&domain.name);
            for reference in domain.references() {
                let resolved = resolve_reference(reference, &domain.name)?;
                let declared = protocol
                    .domain(&resolved.domain)
                    .and_then(|target| target.find_type(&resolved.name))
                    .is_some();
                if !declared {
                    return Err(GenError::UnresolvedReference {
                        domain: domain.name.clone(),
                        reference: reference.to_string(),
                    });
                }
                if let Scope::Domain { .. } = resolved.scope {
                    graph.add_edge(&domain.name, &resolved.domain);
                }
            }
        }
        Ok(graph)
    }

    pub fn add_domain(&mut self, domain: &str) {
        self.edges.entry(domain.to_string()).or_default();
    }

    /// Record that `from` imports `to`
    pub fn add_edge(&mut self, from: &str, to: &str) {
        self.add_domain(to);
        self.edges
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string());
    }

    /// Domains imported by `domain`, sorted
    pub fn imports(&self, domain: &str) -> impl Iterator<Item = &str> {
        self.edges
            .get(domain)
            .into_iter()
            .flat_map(|targets| targets.iter().map(String::as_str))
    }

    /// First cycle found in name order, as a closed path (`A`, `B`, `A`)
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        let mut done: BTreeSet<&str> = BTreeSet::new();
        for start in self.edges.keys() {
            let mut path = Vec::new();
            if let Some(cycle) = self.visit(start, &mut path, &mut done) {
                return Some(cycle);
            }
        }
        None
    }

    fn visit<'a>(
        &'a self,
        node: &'a str,
        path: &mut Vec<&'a str>,
        done: &mut BTreeSet<&'a str>,
    ) -> Option<Vec<String>> {
        if let Some(pos) = path.iter().position(|n| *n == node) {
            let mut cycle: Vec<String> = path[pos..].iter().map(|n| n.to_string()).collect();
            cycle.push(node.to_string());
            return Some(cycle);
        }
        if done.contains(node) {
            return None;
        }

        path.push(node);
        for next in self.imports(node) {
            if let Some(cycle) = self.visit(next, path, done) {
                return Some(cycle);
            }
        }
        path.pop();
        done.insert(node);
        None
    }

    /// Fail with [`GenError::ImportCycle`] if any cycle remains
    pub fn check(&self) -> GenResult<()> {
        match self.find_cycle() {
            Some(cycle) => Err(GenError::ImportCycle {
                path: cycle.join(" -> "),
            }),
            None => Ok(()),
        }
    }
}
