#![allow(non_snake_case)]

use super::*;
use cdpgen_core::Protocol;

const IMPORT: &str = "github.com/mafredri/cdp";

const PROTOCOL: &str = r#"{
    "domains": [
        {
            "domain": "DOM",
            "types": [
                { "id": "NodeId", "type": "integer" },
                { "id": "BackendNodeId", "type": "integer" },
                { "id": "Quad", "type": "array", "items": { "type": "number" } },
                {
                    "id": "Node",
                    "type": "object",
                    "properties": [
                        { "name": "nodeId", "$ref": "NodeId" },
                        { "name": "parent", "$ref": "Node", "optional": true },
                        { "name": "children", "type": "array", "items": { "$ref": "Node" }, "optional": true },
                        { "name": "frameId", "$ref": "Page.FrameId", "optional": true },
                        { "name": "value", "type": "string", "optional": true, "description": "Node value." },
                        { "name": "mode", "type": "string", "enum": ["open", "closed"], "optional": true }
                    ]
                }
            ]
        },
        {
            "domain": "Network",
            "types": [
                { "id": "Headers", "type": "object" },
                { "id": "TimeSinceEpoch", "type": "number" },
                {
                    "id": "ResourceType",
                    "description": "Resource type as it was perceived by the rendering engine.",
                    "type": "string",
                    "enum": ["Document", "XHR"]
                },
                {
                    "id": "Request",
                    "type": "object",
                    "properties": [
                        { "name": "url", "type": "string" },
                        { "name": "headers", "$ref": "Headers", "optional": true },
                        { "name": "type", "$ref": "ResourceType", "optional": true },
                        { "name": "frameId", "$ref": "Page.FrameId", "optional": true },
                        { "name": "postData", "type": "string", "optional": true, "experimental": true }
                    ]
                }
            ]
        },
        {
            "domain": "Page",
            "types": [{ "id": "FrameId", "type": "string", "description": "Unique frame identifier." }]
        },
        {
            "domain": "Runtime",
            "types": [{ "id": "Timestamp", "type": "number" }]
        }
    ]
}"#;

fn protocol() -> Protocol {
    Protocol::from_json(PROTOCOL).unwrap()
}

fn emit(domain: &str, id: &str) -> GoFile {
    let protocol = protocol();
    let exemptions = Exemptions::build(&protocol).unwrap();
    let mapper = TypeMapper::new(domain, IMPORT, &exemptions);
    let ty = protocol.domain(domain).unwrap().find_type(id).unwrap();
    let mut scope = NameScope::new("package test");
    let mut file = GoFile::new("types.go", "test");
    mapper.emit_declared(ty, &mut scope, &mut file).unwrap();
    file
}

fn body(file: &GoFile) -> String {
    file.render()
}

// Record tests

#[test]
fn emit_declared___record___optional_fields_are_pointers() {
    let text = body(&emit("DOM", "Node"));

    assert!(text.contains("type Node struct {\n"));
    assert!(text.contains("\tNodeID NodeID `json:\"nodeId\"`\n"));
    assert!(text.contains("\tValue *string `json:\"value,omitempty\"`\n"));
}

#[test]
fn emit_declared___record___self_reference_is_pointer() {
    let text = body(&emit("DOM", "Node"));

    assert!(text.contains("\tParent *Node `json:\"parent,omitempty\"`\n"));
    assert!(text.contains("\tChildren []Node `json:\"children,omitempty\"`\n"));
}

#[test]
fn emit_declared___record___exempt_types_not_wrapped() {
    let text = body(&emit("Network", "Request"));

    assert!(text.contains("\tHeaders Headers `json:\"headers,omitempty\"`\n"));
    assert!(text.contains("\tType ResourceType `json:\"type,omitempty\"`\n"));
}

#[test]
fn emit_declared___record___cycle_reference_goes_through_internal() {
    let file = emit("Network", "Request");
    let text = body(&file);

    assert!(text.contains("\tFrameID internal.PageFrameID `json:\"frameId,omitempty\"`\n"));
    assert!(file.imports().any(|i| i == "github.com/mafredri/cdp/protocol/internal"));
}

#[test]
fn emit_declared___record___cross_domain_reference_imports_package() {
    let file = emit("DOM", "Node");
    let text = body(&file);

    assert!(text.contains("\tFrameID page.FrameID `json:\"frameId,omitempty\"`\n"));
    assert!(file.imports().any(|i| i == "github.com/mafredri/cdp/protocol/page"));
}

#[test]
fn emit_declared___record___inline_enum_documents_values() {
    let text = body(&emit("DOM", "Node"));

    assert!(text.contains("\t// Mode\n\t//\n\t// Values: \"open\", \"closed\".\n"));
    assert!(text.contains("\tMode *string `json:\"mode,omitempty\"`\n"));
}

#[test]
fn emit_declared___record___field_docs_and_notes() {
    let text = body(&emit("Network", "Request"));

    assert!(text.contains("\t// PostData\n\t//\n\t// Note: This property is experimental.\n"));
    assert!(!text.contains("// URL"));
}

// Enum tests

#[test]
fn emit_declared___enum___sentinel_and_literals() {
    let text = body(&emit("Network", "ResourceType"));

    assert!(text.contains(
        "// ResourceType Resource type as it was perceived by the rendering engine.\ntype ResourceType string\n"
    ));
    assert!(text.contains("\tResourceTypeNotSet ResourceType = \"\"\n"));
    assert!(text.contains("\tResourceTypeDocument ResourceType = \"Document\"\n"));
    assert!(text.contains("\tResourceTypeXHR ResourceType = \"XHR\"\n"));
}

#[test]
fn emit_declared___enum___valid_accepts_only_literals() {
    let text = body(&emit("Network", "ResourceType"));

    assert!(text.contains("\tcase \"Document\", \"XHR\":\n\t\treturn true\n"));
}

#[test]
fn emit_declared___enum___json_null_maps_to_sentinel() {
    let file = emit("Network", "ResourceType");
    let text = body(&file);

    assert!(text.contains("\tif e == ResourceTypeNotSet {\n\t\treturn []byte(\"null\"), nil\n"));
    assert!(text.contains("\t\t*e = ResourceTypeNotSet\n"));
    assert!(text.contains("fmt.Errorf(\"bad ResourceType: %q\", s)"));
    assert_eq!(file.imports().collect::<Vec<_>>(), vec!["encoding/json", "fmt"]);
}

#[test]
fn emit_declared___enum___colliding_literal___returns_duplicate() {
    let protocol = Protocol::from_json(
        r#"{ "domains": [{ "domain": "X", "types": [
            { "id": "Mode", "type": "string", "enum": ["a-b", "aB"] }
        ] }] }"#,
    )
    .unwrap();
    let exemptions = Exemptions::build(&protocol).unwrap();
    let mapper = TypeMapper::new("X", IMPORT, &exemptions);
    let mut scope = NameScope::new("package x");
    let mut file = GoFile::new("types.go", "x");

    let err = mapper
        .emit_declared(&protocol.domains[0].types[0], &mut scope, &mut file)
        .unwrap_err();

    assert!(matches!(err, GenError::DuplicateIdentifier { .. }));
}

#[test]
fn emit_declared___enum___empty_literal___returns_error() {
    let protocol = Protocol::from_json(
        r#"{ "domains": [{ "domain": "X", "types": [
            { "id": "Mode", "type": "string", "enum": ["", "open"] }
        ] }] }"#,
    )
    .unwrap();
    let exemptions = Exemptions::build(&protocol).unwrap();
    let mapper = TypeMapper::new("X", IMPORT, &exemptions);
    let mut scope = NameScope::new("package x");
    let mut file = GoFile::new("types.go", "x");

    let err = mapper
        .emit_declared(&protocol.domains[0].types[0], &mut scope, &mut file)
        .unwrap_err();

    assert!(matches!(
        err,
        GenError::EmptyEnumLiteral { ref domain, ref name } if domain == "X" && name == "Mode"
    ));
    assert!(!body(&file).contains("ModeNotSet"));
}

// Scalar and special type tests

#[test]
fn emit_declared___raw_bytes___pass_through_codec() {
    let file = emit("Network", "Headers");
    let text = body(&file);

    assert!(text.contains("type Headers []byte\n"));
    assert!(text.contains("func (b Headers) MarshalJSON() ([]byte, error) {\n\tif b == nil {\n"));
    assert!(text.contains("\t*b = append((*b)[0:0], data...)\n"));
}

#[test]
fn emit_declared___runtime_timestamp___divides_by_1000() {
    let text = body(&emit("Runtime", "Timestamp"));

    assert!(text.contains("type Timestamp float64\n"));
    assert!(text.contains("\tts := float64(t) / 1000\n"));
}

#[test]
fn emit_declared___network_timestamp___seconds() {
    let protocol = protocol();
    let exemptions = Exemptions::build(&protocol).unwrap();
    let mapper = TypeMapper::shared("Network", "NetworkTimeSinceEpoch", IMPORT, &exemptions);
    let ty = protocol.domain("Network").unwrap().find_type("TimeSinceEpoch").unwrap();
    let mut scope = NameScope::new("package internal");
    let mut file = GoFile::new("types.go", "internal");

    let doc = DocBlock::new("NetworkTimeSinceEpoch", &[]);

    mapper
        .emit_definition(ty, "NetworkTimeSinceEpoch", &doc, &mut scope, &mut file)
        .unwrap();

    let text = body(&file);
    assert!(text.contains("type NetworkTimeSinceEpoch float64\n"));
    assert!(text.contains("\tts := float64(t)\n"));
    assert!(!text.contains("/ 1000"));
}

#[test]
fn emit_declared___sequence___slice_of_items() {
    let text = body(&emit("DOM", "Quad"));

    assert!(text.contains("type Quad []float64\n"));
}

#[test]
fn emit_declared___cycle_target___alias_to_shared() {
    let text = body(&emit("Page", "FrameId"));

    assert!(text.contains("// FrameID Unique frame identifier.\ntype FrameID = internal.PageFrameID\n"));
}

#[test]
fn emit_definition___shared_with_reference___returns_shared_scope_error() {
    let exemptions = Exemptions::default();
    let mapper = TypeMapper::shared("Page", "PageFrameID", IMPORT, &exemptions);
    let ty = AnyType {
        id: Some("FrameId".into()),
        reference: Some("Network.LoaderId".into()),
        ..AnyType::default()
    };
    let mut scope = NameScope::new("package internal");
    let mut file = GoFile::new("types.go", "internal");

    let err = mapper
        .emit_definition(&ty, "PageFrameID", &DocBlock::default(), &mut scope, &mut file)
        .unwrap_err();

    assert!(matches!(err, GenError::SharedScope { .. }));
}

// Use-site expression tests

#[test]
fn expr___anonymous_kinds() {
    let exemptions = Exemptions::default();
    let mapper = TypeMapper::new("Page", IMPORT, &exemptions);
    let mut file = GoFile::new("a.go", "page");
    let node = |kind: &str| AnyType {
        kind: Some(kind.to_string()),
        ..AnyType::default()
    };

    assert_eq!(mapper.expr(&node("boolean"), &mut file).unwrap().expr, "bool");
    assert_eq!(mapper.expr(&node("integer"), &mut file).unwrap().expr, "int");
    assert_eq!(mapper.expr(&node("number"), &mut file).unwrap().expr, "float64");
    let any = mapper.expr(&node("object"), &mut file).unwrap();
    assert_eq!(any.expr, "json.RawMessage");
    assert!(any.nullable);
}

#[test]
fn expr___base64_string___byte_slice() {
    let exemptions = Exemptions::default();
    let mapper = TypeMapper::new("Page", IMPORT, &exemptions);
    let mut file = GoFile::new("a.go", "page");
    let node = AnyType {
        kind: Some("string".into()),
        description: Some("Base64-encoded image data.".into()),
        ..AnyType::default()
    };

    let go = mapper.expr(&node, &mut file).unwrap();

    assert_eq!(go.expr, "[]byte");
    assert!(go.nullable);
}

#[test]
fn expr___array_without_items___returns_error() {
    let exemptions = Exemptions::default();
    let mapper = TypeMapper::new("Page", IMPORT, &exemptions);
    let mut file = GoFile::new("a.go", "page");
    let node = AnyType {
        name: Some("frames".into()),
        kind: Some("array".into()),
        ..AnyType::default()
    };

    assert!(matches!(
        mapper.expr(&node, &mut file),
        Err(GenError::MissingKind { .. })
    ));
}

#[test]
fn struct_fields___duplicate_normalized_names___returns_error() {
    let exemptions = Exemptions::default();
    let mapper = TypeMapper::new("Page", IMPORT, &exemptions);
    let mut file = GoFile::new("a.go", "page");
    let props = vec![
        AnyType {
            name: Some("frameId".into()),
            kind: Some("string".into()),
            ..AnyType::default()
        },
        AnyType {
            name: Some("frameID".into()),
            kind: Some("string".into()),
            ..AnyType::default()
        },
    ];

    let err = mapper.struct_fields(&props, "Frame", &mut file).unwrap_err();

    assert_eq!(
        err.to_string(),
        "duplicate identifier FrameID in struct Page.Frame"
    );
}
