#![allow(non_snake_case)]

use super::*;
use cdpgen_core::{GenError, Protocol};

const IMPORT: &str = "github.com/mafredri/cdp";

const PROTOCOL: &str = r#"{
    "version": { "major": "1", "minor": "3" },
    "domains": [
        {
            "domain": "DOMDebugger",
            "experimental": true,
            "commands": [{ "name": "setDOMBreakpoint" }]
        },
        {
            "domain": "Network",
            "description": "Network domain allows tracking network activities of the page.",
            "commands": [
                {
                    "name": "setCookie",
                    "description": "Sets a cookie with the given cookie data.",
                    "parameters": [{ "name": "name", "type": "string" }],
                    "returns": [{ "name": "success", "type": "boolean" }]
                },
                { "name": "canClearBrowserCache", "redirect": "Storage" }
            ],
            "events": [{ "name": "requestWillBeSent" }]
        },
        { "domain": "Schema" }
    ]
}"#;

fn protocol() -> Protocol {
    Protocol::from_json(PROTOCOL).unwrap()
}

#[test]
fn client_file___field_and_constructor_per_domain() {
    let protocol = protocol();
    let domains: Vec<&Domain> = protocol.domains.iter().collect();
    let mut scope = NameScope::new("package cdp");

    let file = client_file(IMPORT, protocol.version.as_ref(), &domains, &mut scope).unwrap();
    let text = file.render();

    assert!(text.contains(
        "// Package cdp provides type-safe bindings for the Chrome DevTools Protocol (CDP).\n\
         //\n\
         // Generated from protocol version 1.3.\n\
         package cdp\n"
    ));
    assert!(text.contains("\tDOMDebugger DOMDebugger\n\tNetwork Network\n\tSchema Schema\n}\n"));
    assert!(text.contains("\t\tNetwork: network.NewClient(conn),\n"));
    assert!(text.contains("func NewClient(conn *rpcc.Conn) *Client {\n"));
    assert!(file.imports().any(|i| i == "github.com/mafredri/cdp/protocol/domdebugger"));
    assert!(scope.contains("Client"));
    assert!(scope.contains("NewClient"));
}

#[test]
fn client_file___no_version___single_line_doc() {
    let mut scope = NameScope::new("package cdp");

    let text = client_file(IMPORT, None, &[], &mut scope).unwrap().render();

    assert!(text.contains(
        "// Package cdp provides type-safe bindings for the Chrome DevTools Protocol (CDP).\n\
         package cdp\n"
    ));
}

#[test]
fn domains_file___contract_lists_commands_then_events() {
    let protocol = protocol();
    let domains: Vec<&Domain> = protocol.domains.iter().collect();
    let mut scope = NameScope::new("package cdp");

    let text = domains_file(IMPORT, &domains, &mut scope).unwrap().render();

    assert!(text.contains(
        "// The Network domain. Network domain allows tracking network activities of the page.\n\
         type Network interface {\n\
         \t// Command Network.setCookie\n\
         \t//\n\
         \t// Sets a cookie with the given cookie data.\n\
         \tSetCookie(context.Context, *network.SetCookieArgs) (*network.SetCookieReply, error)\n\
         \n\
         \t// Event Network.requestWillBeSent\n\
         \tRequestWillBeSent(context.Context) (network.RequestWillBeSentClient, error)\n\
         }\n"
    ));
    assert!(!text.contains("CanClearBrowserCache"));
    assert!(text.contains("// Note: This domain is experimental.\ntype DOMDebugger interface {\n"));
    assert!(text.contains("type Schema interface {\n}\n"));
}

#[test]
fn domains_file___imports_only_domains_with_methods() {
    let protocol = protocol();
    let domains: Vec<&Domain> = protocol.domains.iter().collect();
    let mut scope = NameScope::new("package cdp");

    let file = domains_file(IMPORT, &domains, &mut scope).unwrap();

    let imports: Vec<&str> = file.imports().collect();
    assert_eq!(
        imports,
        vec![
            "context",
            "github.com/mafredri/cdp/protocol/domdebugger",
            "github.com/mafredri/cdp/protocol/network",
        ]
    );
}

#[test]
fn methods_file___constants_skip_redirected() {
    let protocol = protocol();
    let domains: Vec<&Domain> = protocol.domains.iter().collect();
    let mut scope = NameScope::new("package cdp");

    let text = methods_file(&domains, &mut scope).unwrap().render();

    assert!(text.contains(
        "// Domain methods.\n\
         const (\n\
         \tDOMDebuggerSetDOMBreakpoint = \"DOMDebugger.setDOMBreakpoint\"\n\
         \tNetworkSetCookie = \"Network.setCookie\"\n\
         )\n"
    ));
    assert!(text.contains(
        "// Domain events.\nconst (\n\tNetworkRequestWillBeSent = \"Network.requestWillBeSent\"\n)\n"
    ));
    assert!(!text.contains("CanClearBrowserCache"));
}

#[test]
fn methods_file___no_events___omits_block() {
    let protocol = Protocol::from_json(
        r#"{"domains": [{ "domain": "Tethering", "commands": [{ "name": "bind" }] }]}"#,
    )
    .unwrap();
    let domains: Vec<&Domain> = protocol.domains.iter().collect();
    let mut scope = NameScope::new("package cdp");

    let text = methods_file(&domains, &mut scope).unwrap().render();

    assert!(text.contains("TetheringBind = \"Tethering.bind\""));
    assert!(!text.contains("Domain events."));
}

#[test]
fn methods_file___constant_clashing_with_contract___returns_duplicate() {
    let protocol = Protocol::from_json(
        r#"{"domains": [
            { "domain": "Network", "commands": [{ "name": "enable" }] },
            { "domain": "NetworkEnable" }
        ]}"#,
    )
    .unwrap();
    let domains: Vec<&Domain> = protocol.domains.iter().collect();
    let mut scope = NameScope::new("package cdp");
    domains_file(IMPORT, &domains, &mut scope).unwrap();

    let err = methods_file(&domains, &mut scope).unwrap_err();

    assert!(matches!(err, GenError::DuplicateIdentifier { .. }));
}
