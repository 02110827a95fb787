#![allow(non_snake_case)]

use super::*;
use cdpgen_core::GenError;
use std::path::Path;

const IMPORT: &str = "github.com/mafredri/cdp";

const PROTOCOL: &str = r#"{
    "version": { "major": "1", "minor": "3" },
    "domains": [
        {
            "domain": "Page",
            "types": [{ "id": "FrameId", "type": "string" }],
            "commands": [{ "name": "enable" }]
        },
        {
            "domain": "Network",
            "types": [
                { "id": "TimeSinceEpoch", "type": "number" },
                {
                    "id": "Request",
                    "type": "object",
                    "properties": [{ "name": "frameId", "$ref": "Page.FrameId", "optional": true }]
                }
            ],
            "events": [{ "name": "loadingFinished", "parameters": [{ "name": "timestamp", "$ref": "TimeSinceEpoch" }] }]
        }
    ]
}"#;

fn paths(files: &[GoFile]) -> Vec<&Path> {
    files.iter().map(GoFile::path).collect()
}

#[test]
fn generate___emits_domains_sorted_then_aggregates() {
    let protocol = Protocol::from_json(PROTOCOL).unwrap();

    let files = generate(&protocol, IMPORT).unwrap();

    assert_eq!(
        paths(&files),
        vec![
            Path::new("protocol/network/types.go"),
            Path::new("protocol/network/command.go"),
            Path::new("protocol/network/event.go"),
            Path::new("protocol/network/domain.go"),
            Path::new("protocol/network/domain_test.go"),
            Path::new("protocol/page/types.go"),
            Path::new("protocol/page/command.go"),
            Path::new("protocol/page/event.go"),
            Path::new("protocol/page/domain.go"),
            Path::new("protocol/page/domain_test.go"),
            Path::new("protocol/internal/types.go"),
            Path::new("protocol/internal/error.go"),
            Path::new("cdp_client.go"),
            Path::new("cdp_domains.go"),
            Path::new("cdp_methods.go"),
            Path::new("cdp_errors.go"),
            Path::new("internal/testutil/transport.go"),
        ]
    );
}

#[test]
fn generate___cycle_targets_land_in_internal() {
    let protocol = Protocol::from_json(PROTOCOL).unwrap();

    let files = generate(&protocol, IMPORT).unwrap();
    let shared = files
        .iter()
        .find(|f| f.path() == Path::new("protocol/internal/types.go"))
        .unwrap()
        .render();

    assert!(shared.contains("type NetworkTimeSinceEpoch float64\n"));
    assert!(shared.contains("type PageFrameID string\n"));
}

#[test]
fn generate___every_file_carries_header() {
    let protocol = Protocol::from_json(PROTOCOL).unwrap();

    let files = generate(&protocol, IMPORT).unwrap();

    for file in files.iter().filter(|f| !f.is_empty()) {
        assert!(file.render().starts_with(GENERATED_HEADER), "{}", file.path().display());
    }
}

#[test]
fn generate___is_deterministic() {
    let protocol = Protocol::from_json(PROTOCOL).unwrap();

    let first: Vec<String> = generate(&protocol, IMPORT).unwrap().iter().map(GoFile::render).collect();
    let second: Vec<String> = generate(&protocol, IMPORT).unwrap().iter().map(GoFile::render).collect();

    assert_eq!(first, second);
}

#[test]
fn generate___unresolved_reference___fails_before_emitting() {
    let protocol = Protocol::from_json(
        r#"{"domains": [{ "domain": "Page", "types": [{ "id": "Frame", "$ref": "Missing" }] }]}"#,
    )
    .unwrap();

    let err = generate(&protocol, IMPORT).unwrap_err();

    assert!(matches!(err, GenError::UnresolvedReference { .. }));
}

#[test]
fn generate___import_cycle___reports_path() {
    let protocol = Protocol::from_json(
        r#"{"domains": [
            { "domain": "DOM", "types": [
                { "id": "NodeId", "type": "integer" },
                { "id": "Holder", "type": "object", "properties": [{ "name": "o", "$ref": "Runtime.RemoteObjectId" }] }
            ] },
            { "domain": "Runtime", "types": [
                { "id": "RemoteObjectId", "type": "string" },
                { "id": "Holder", "type": "object", "properties": [{ "name": "n", "$ref": "DOM.NodeId" }] }
            ] }
        ]}"#,
    )
    .unwrap();

    let err = generate(&protocol, IMPORT).unwrap_err();

    assert!(err.to_string().contains("DOM -> Runtime -> DOM"), "{err}");
}

#[test]
fn import_paths___rooted_at_import() {
    assert_eq!(rpcc_import("x.io/cdp"), "x.io/cdp/rpcc");
    assert_eq!(internal_import("x.io/cdp"), "x.io/cdp/protocol/internal");
    assert_eq!(protocol_import("x.io/cdp", "dom"), "x.io/cdp/protocol/dom");
    assert_eq!(testutil_import("x.io/cdp"), "x.io/cdp/internal/testutil");
}
