//! Top-level `cdp` package files: the aggregate client, the domain
//! contracts and the method/event name constants.
//!
//! All three share one package scope with the support files, passed in
//! by the caller.

use super::commands::contract_method;
use super::docs::DocBlock;
use super::events::contract_event;
use super::gofile::{GoFile, NameScope, quote};
use super::{protocol_import, rpcc_import};
use cdpgen_core::{Domain, GenResult, Version};

/// Package name of the top-level files
pub(crate) const ROOT_PACKAGE: &str = "cdp";

/// `cdp_client.go`: `Client` with one field per domain, and `NewClient`
pub(crate) fn client_file(
    root: &str,
    version: Option<&Version>,
    domains: &[&Domain],
    scope: &mut NameScope,
) -> GenResult<GoFile> {
    scope.declare("Client")?;
    scope.declare("NewClient")?;

    let mut file = GoFile::new("cdp_client.go", ROOT_PACKAGE);
    let mut doc = vec![
        "Package cdp provides type-safe bindings for the Chrome DevTools Protocol (CDP)."
            .to_string(),
    ];
    if let Some(version) = version {
        doc.push(String::new());
        doc.push(format!(
            "Generated from protocol version {}.{}.",
            version.major, version.minor
        ));
    }
    file.set_package_doc(doc);
    file.import(&rpcc_import(root));

    let mut fields = String::new();
    let mut inits = String::new();
    for domain in domains {
        let ident = domain.ident();
        let pkg = domain.package();
        file.import(&protocol_import(root, &pkg));
        fields.push_str(&format!("\t{ident} {ident}\n"));
        inits.push_str(&format!("\t\t{ident}: {pkg}.NewClient(conn),\n"));
    }

    file.push_str(&format!(
        "// Client represents a Chrome DevTools Protocol client that can be used to\n\
         // invoke methods or listen to events in every CDP domain. The Client consumes\n\
         // a rpcc connection, used to invoke the methods.\n\
         type Client struct {{\n{fields}}}\n\n\
         // NewClient returns a new Client that uses conn\n\
         // for communication with the debugging target.\n\
         func NewClient(conn *rpcc.Conn) *Client {{\n\
         \treturn &Client{{\n{inits}\t}}\n\
         }}\n"
    ));
    Ok(file)
}

/// `cdp_domains.go`: one contract interface per domain, named after it.
///
/// Redirected commands are left out; their owning domain has no method
/// for them.
pub(crate) fn domains_file(
    root: &str,
    domains: &[&Domain],
    scope: &mut NameScope,
) -> GenResult<GoFile> {
    let mut file = GoFile::new("cdp_domains.go", ROOT_PACKAGE);

    for domain in domains {
        let ident = domain.ident();
        scope.declare(&ident)?;
        let mut methods = NameScope::new(format!("interface {ROOT_PACKAGE}.{ident}"));

        let mut body = String::new();
        for cmd in domain.commands.iter().filter(|c| !c.is_redirected()) {
            methods.declare(&cmd.method_ident())?;
            let doc = DocBlock::new(format!("Command {}", cmd.wire_name(&domain.name)), &[])
                .paragraphs(&cmd.docs())
                .notes("command", cmd.experimental, cmd.deprecated);
            body.push_str(&member(&doc, &contract_method(domain, cmd), body.is_empty()));
        }
        for evt in &domain.events {
            methods.declare(&evt.event_ident())?;
            let doc = DocBlock::new(format!("Event {}", evt.wire_name(&domain.name)), &[])
                .paragraphs(&evt.docs())
                .notes("event", evt.experimental, evt.deprecated);
            body.push_str(&member(&doc, &contract_event(domain, evt), body.is_empty()));
        }
        if !methods.is_empty() {
            file.import("context");
            file.import(&protocol_import(root, &domain.package()));
        }

        let doc = DocBlock::new(format!("The {} domain.", domain.name), &domain.docs())
            .notes("domain", domain.experimental, domain.deprecated);
        file.push_str(&doc.render(""));
        file.push_str(&format!("type {ident} interface {{\n{body}}}\n\n"));
    }
    Ok(file)
}

fn member(doc: &DocBlock, signature: &str, first: bool) -> String {
    let gap = if first { "" } else { "\n" };
    format!("{gap}{}\t{signature}\n", doc.render("\t"))
}

/// `cdp_methods.go`: `<Domain><Method>` constants holding wire names
pub(crate) fn methods_file(domains: &[&Domain], scope: &mut NameScope) -> GenResult<GoFile> {
    let mut file = GoFile::new("cdp_methods.go", ROOT_PACKAGE);

    let mut methods = Vec::new();
    let mut events = Vec::new();
    for domain in domains {
        let prefix = domain.ident();
        for cmd in domain.commands.iter().filter(|c| !c.is_redirected()) {
            let name = format!("{prefix}{}", cmd.method_ident());
            scope.declare(&name)?;
            methods.push((name, cmd.wire_name(&domain.name)));
        }
        for evt in &domain.events {
            let name = format!("{prefix}{}", evt.event_ident());
            scope.declare(&name)?;
            events.push((name, evt.wire_name(&domain.name)));
        }
    }

    const_block(&mut file, "Domain methods.", &methods);
    const_block(&mut file, "Domain events.", &events);
    Ok(file)
}

fn const_block(file: &mut GoFile, doc: &str, entries: &[(String, String)]) {
    if entries.is_empty() {
        return;
    }
    let mut block = format!("// {doc}\nconst (\n");
    for (name, wire) in entries {
        block.push_str(&format!("\t{name} = {}\n", quote(wire)));
    }
    block.push_str(")\n\n");
    file.push_str(&block);
}

#[cfg(test)]
#[path = "aggregate/aggregate_tests.rs"]
mod aggregate_tests;
