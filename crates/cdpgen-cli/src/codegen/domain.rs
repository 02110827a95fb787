//! One domain package: types, commands, events, the client and its tests.

use super::commands::{emit_command_method, emit_command_types};
use super::docs::DocBlock;
use super::events::{emit_event_method, emit_event_types};
use super::gofile::{GoFile, NameScope};
use super::rpcc_import;
use super::shared::SharedTypes;
use super::testgen::emit_tests;
use super::types::TypeMapper;
use cdpgen_core::{Domain, Exemptions, GenResult, cycles};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Identifiers every domain package declares for its client
const CLIENT_IDENTS: &[&str] = &["NewClient", "domainClient"];

/// Emit every file of `domain`'s package, in a fixed order:
/// `types.go`, `command.go`, `event.go`, `domain.go`, `domain_test.go`.
///
/// Cycle-table targets declared here are also written to `shared`.
pub(crate) fn emit_domain(
    root: &str,
    domain: &Domain,
    exemptions: &Exemptions,
    shared: &mut SharedTypes,
) -> GenResult<Vec<GoFile>> {
    let pkg = domain.package();
    let dir = PathBuf::from("protocol").join(&pkg);
    let mapper = TypeMapper::new(&domain.name, root, exemptions);

    let mut scope = NameScope::new(format!("package {pkg}"));
    for ident in CLIENT_IDENTS {
        scope.declare(ident)?;
    }
    let mut methods = NameScope::new(format!("methods of {pkg}.domainClient"));

    let mut types = GoFile::new(dir.join("types.go"), &pkg);
    for ty in &domain.types {
        mapper.emit_declared(ty, &mut scope, &mut types)?;
        let name = ty.id.as_deref().unwrap_or_default();
        if let Some(ident) = cycles::shared_ident_for(&domain.name, name) {
            shared.emit(&domain.name, ty, ident, root, exemptions)?;
        }
    }

    let mut command = GoFile::new(dir.join("command.go"), &pkg);
    for cmd in &domain.commands {
        emit_command_types(&mapper, domain, cmd, &mut scope, &mut command)?;
    }

    let mut event = GoFile::new(dir.join("event.go"), &pkg);
    for evt in &domain.events {
        emit_event_types(&mapper, root, domain, evt, &mut scope, &mut event)?;
    }

    let mut client = client_file(root, domain, &dir);
    let mut skipped = 0;
    for cmd in &domain.commands {
        if cmd.is_redirected() {
            skipped += 1;
            continue;
        }
        emit_command_method(root, domain, cmd, &mut methods, &mut client)?;
    }
    for evt in &domain.events {
        emit_event_method(root, domain, evt, &mut scope, &mut methods, &mut client)?;
    }

    let tests = emit_tests(root, domain, &dir);

    debug!(
        domain = %domain.name,
        types = domain.types.len(),
        commands = domain.commands.len(),
        redirected = skipped,
        events = domain.events.len(),
        "Emitted domain"
    );
    Ok(vec![types, command, event, client, tests])
}

/// `domain.go` with the package doc, `domainClient` and `NewClient`
fn client_file(root: &str, domain: &Domain, dir: &Path) -> GoFile {
    let pkg = domain.package();
    let mut file = GoFile::new(dir.join("domain.go"), &pkg);
    let doc = DocBlock::new(
        format!("Package {pkg} implements the {} domain.", domain.name),
        &domain.docs(),
    )
    .notes("domain", domain.experimental, domain.deprecated);
    file.set_package_doc(doc.lines().to_vec());
    file.import(&rpcc_import(root));

    let name = &domain.name;
    file.push_str(&format!(
        "// domainClient is a client for the {name} domain.\n\
         type domainClient struct{{ conn *rpcc.Conn }}\n\n\
         // NewClient returns a client for the {name} domain with the connection set to conn.\n\
         func NewClient(conn *rpcc.Conn) *domainClient {{\n\
         \treturn &domainClient{{conn: conn}}\n\
         }}\n\n"
    ));
    file
}
