//! Go binding generation from a merged protocol description.
//!
//! # Architecture
//!
//! Generation runs in two passes over the merged [`Protocol`]:
//!
//! ```text
//! Protocol
//!     ↓
//!  [ImportGraph check]  reject cross-package cycles
//!  [Exemptions::build]  nullable-by-nature declared types
//!     ↓
//!  per domain (sorted) → protocol/<pkg>/{types,command,event,domain,domain_test}.go
//!                      → protocol/internal/types.go (cycle-table definitions)
//!     ↓
//!  cdp_client.go, cdp_domains.go, cdp_methods.go, cdp_errors.go,
//!  protocol/internal/error.go, internal/testutil/transport.go
//! ```
//!
//! Nothing is written to disk here; [`generate`] returns the files in
//! emission order and the materializer writes them.
//!
//! # Usage
//!
//! ```rust,no_run
//! use cdpgen_cli::codegen::generate;
//! use cdpgen_core::Protocol;
//!
//! let protocol = Protocol::from_json(r#"{"domains": []}"#).unwrap();
//! let files = generate(&protocol, "github.com/mafredri/cdp").unwrap();
//! for file in &files {
//!     println!("{}", file.path().display());
//! }
//! ```

mod aggregate;
mod commands;
mod docs;
mod domain;
mod events;
mod shared;
mod support;
mod testgen;
mod types;

pub mod gofile;

pub use gofile::{GENERATED_HEADER, GoFile, NameScope};

use cdpgen_core::cycles::ImportGraph;
use cdpgen_core::{Domain, Exemptions, GenResult, Protocol};
use shared::SharedTypes;
use tracing::{debug, info};

/// Import path of the rpcc transport package
pub(crate) fn rpcc_import(root: &str) -> String {
    format!("{root}/rpcc")
}

/// Import path of the shared `protocol/internal` package
pub(crate) fn internal_import(root: &str) -> String {
    protocol_import(root, "internal")
}

/// Import path of a generated protocol package
pub(crate) fn protocol_import(root: &str, package: &str) -> String {
    format!("{root}/protocol/{package}")
}

/// Import path of the generated test transport
pub(crate) fn testutil_import(root: &str) -> String {
    format!("{root}/internal/testutil")
}

/// Generate every Go file for `protocol`, importable under `root`.
///
/// Fails before emitting anything if references are unresolved or the
/// package import graph has a cycle. Any identifier collision aborts the
/// run.
pub fn generate(protocol: &Protocol, root: &str) -> GenResult<Vec<GoFile>> {
    let graph = ImportGraph::from_protocol(protocol)?;
    graph.check()?;
    let exemptions = Exemptions::build(protocol)?;
    debug!(exempt = exemptions.len(), "Built nullability exemptions");

    let mut domains: Vec<&Domain> = protocol.domains.iter().collect();
    domains.sort_by(|a, b| a.name.cmp(&b.name));

    let mut files = Vec::new();
    let mut shared = SharedTypes::new();
    for domain in &domains {
        files.extend(domain::emit_domain(root, domain, &exemptions, &mut shared)?);
    }
    debug!(shared = shared.len(), "Collected shared definitions");
    files.push(shared.into_file());
    files.push(support::op_error_file());

    let mut scope = NameScope::new(format!("package {}", aggregate::ROOT_PACKAGE));
    files.push(aggregate::client_file(
        root,
        protocol.version.as_ref(),
        &domains,
        &mut scope,
    )?);
    files.push(aggregate::domains_file(root, &domains, &mut scope)?);
    files.push(aggregate::methods_file(&domains, &mut scope)?);
    files.push(support::errors_file(&mut scope)?);
    files.push(support::transport_file(root));

    info!(domains = domains.len(), files = files.len(), "Generated bindings");
    Ok(files)
}

#[cfg(test)]
#[path = "codegen_tests.rs"]
mod codegen_tests;
