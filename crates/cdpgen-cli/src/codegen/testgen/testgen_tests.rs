#![allow(non_snake_case)]

use super::*;
use cdpgen_core::Protocol;

const IMPORT: &str = "github.com/mafredri/cdp";

fn domain(json: &str) -> Domain {
    let protocol = Protocol::from_json(&format!(r#"{{"domains": [{json}]}}"#)).unwrap();
    protocol.domains.into_iter().next().unwrap()
}

fn tests_for(json: &str) -> GoFile {
    emit_tests(IMPORT, &domain(json), Path::new("protocol/network"))
}

#[test]
fn emit_tests___command_with_args_and_reply() {
    let file = tests_for(
        r#"{
            "domain": "Network",
            "commands": [{
                "name": "setCookie",
                "parameters": [{ "name": "name", "type": "string" }],
                "returns": [{ "name": "success", "type": "boolean" }]
            }]
        }"#,
    );
    let text = file.render();

    assert_eq!(file.path(), Path::new("protocol/network/domain_test.go"));
    assert!(text.contains("func TestDomain_SetCookie(t *testing.T) {\n"));
    assert!(text.contains("\t_, err = dom.SetCookie(context.Background(), nil)\n"));
    assert!(text.contains("\t_, err = dom.SetCookie(context.Background(), &SetCookieArgs{})\n"));
    assert!(text.contains(
        "\ttr.SetError(&rpcc.ResponseError{Code: -32000, Message: \"bad request\"})\n"
    ));
    assert!(text.contains("!strings.Contains(err.Error(), \"bad request\")"));
}

#[test]
fn emit_tests___command_without_args_or_reply() {
    let text = tests_for(
        r#"{ "domain": "Network", "commands": [{ "name": "enable" }] }"#,
    )
    .render();

    assert!(text.contains("\terr = dom.Enable(context.Background())\n"));
    assert!(!text.contains("&EnableArgs{}"));
}

#[test]
fn emit_tests___event_round_trip_and_close() {
    let file = tests_for(
        r#"{ "domain": "Network", "events": [{ "name": "dataReceived" }] }"#,
    );
    let text = file.render();

    assert!(text.contains("\tstream, err := dom.DataReceived(context.Background())\n"));
    assert!(text.contains("tr.Emit(\"Network.dataReceived\", []byte(`{}`))"));
    assert!(text.contains("tr.Emit(\"Network.dataReceived\", []byte(`[]`))"));
    assert!(text.contains("!strings.Contains(err.Error(), \"DataReceived Recv\")"));
    assert!(text.contains("\ttr.Close()\n\tif _, err = dom.DataReceived(context.Background()); err == nil {\n"));

    let imports: Vec<&str> = file.imports().collect();
    assert_eq!(
        imports,
        vec!["context", "github.com/mafredri/cdp/internal/testutil", "strings", "testing"]
    );
}

#[test]
fn emit_tests___redirected_command___is_skipped() {
    let text = tests_for(
        r#"{
            "domain": "Network",
            "commands": [
                { "name": "enable" },
                { "name": "canEmulate", "redirect": "Emulation" }
            ]
        }"#,
    )
    .render();

    assert!(text.contains("TestDomain_Enable"));
    assert!(!text.contains("CanEmulate"));
}

#[test]
fn emit_tests___types_only_domain___is_empty() {
    let file = tests_for(r#"{ "domain": "Network", "types": [{ "id": "Id", "type": "string" }] }"#);

    assert!(file.is_empty());
    assert_eq!(file.imports().count(), 0);
}
