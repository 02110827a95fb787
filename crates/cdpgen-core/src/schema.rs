//! Protocol schema model.
//!
//! Plain serde mirrors of the protocol description documents. Each document
//! is `{ "version": {...}, "domains": [...] }`; the generator reads two of
//! them and merges the domain lists with [`Protocol::merge`].

use crate::error::GenResult;
use crate::naming::{self, normalize, strip_stutter};
use crate::text::clean_description;
use serde::{Deserialize, Serialize};

/// A protocol description document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Protocol {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,

    pub domains: Vec<Domain>,
}

/// Protocol version, recorded in the generated package doc
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub major: String,
    pub minor: String,
}

/// A named grouping of types, commands and events
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Domain {
    #[serde(rename = "domain")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub experimental: bool,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default)]
    pub dependencies: Vec<String>,

    #[serde(default)]
    pub types: Vec<AnyType>,

    #[serde(default)]
    pub commands: Vec<Command>,

    #[serde(default)]
    pub events: Vec<Event>,
}

/// The schema's catch-all type node
///
/// Used for declared types (`id` set), record properties, command
/// parameters and returns, event parameters and array items (`name` set or
/// neither).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnyType {
    /// Declared name, only present on top-level named types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Property or parameter name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Raw kind discriminator (`string`, `object`, ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Cross-reference, `Domain.Name` or a bare same-domain name
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Element descriptor for arrays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<AnyType>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<AnyType>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,

    #[serde(default)]
    pub optional: bool,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default)]
    pub experimental: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An enum literal and its identifier-safe name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumLiteral {
    pub value: String,
    pub name: String,
}

/// A request/response remote operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Command {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub experimental: bool,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default)]
    pub parameters: Vec<AnyType>,

    #[serde(default)]
    pub returns: Vec<AnyType>,

    /// Set when the command is an alias for a command in another domain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

/// An asynchronous notification
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Event {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub experimental: bool,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default)]
    pub parameters: Vec<AnyType>,
}

impl Protocol {
    /// Parse a protocol document from JSON text
    pub fn from_json(content: &str) -> GenResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Concatenate documents and sort the domains by name.
    ///
    /// The sort is stable; the first document carrying a version wins.
    pub fn merge(documents: impl IntoIterator<Item = Protocol>) -> Protocol {
        let mut merged = Protocol::default();
        for doc in documents {
            if merged.version.is_none() {
                merged.version = doc.version;
            }
            merged.domains.extend(doc.domains);
        }
        merged.domains.sort_by(|a, b| a.name.cmp(&b.name));
        merged
    }

    /// Look up a domain by its raw name
    pub fn domain(&self, name: &str) -> Option<&Domain> {
        self.domains.iter().find(|d| d.name == name)
    }
}

impl Domain {
    /// Exported identifier (`DOMDebugger`, `Network`)
    pub fn ident(&self) -> String {
        normalize(&self.name)
    }

    /// Package name for the domain's generated files
    pub fn package(&self) -> String {
        naming::package_name(&self.name)
    }

    /// Cleaned description lines
    pub fn docs(&self) -> Vec<String> {
        clean_description(self.description.as_deref().unwrap_or_default())
    }

    /// Look up a declared type by its raw name
    pub fn find_type(&self, id: &str) -> Option<&AnyType> {
        self.types.iter().find(|t| t.id.as_deref() == Some(id))
    }

    /// Every raw `$ref` used anywhere in the domain, in declaration order.
    ///
    /// Redirected commands are included; their types are still emitted.
    pub fn references(&self) -> Vec<&str> {
        let mut refs = Vec::new();
        let nodes = self
            .types
            .iter()
            .chain(self.commands.iter().flat_map(|c| c.parameters.iter().chain(&c.returns)))
            .chain(self.events.iter().flat_map(|e| &e.parameters));
        for node in nodes {
            node.collect_references(&mut refs);
        }
        refs
    }
}

impl AnyType {
    /// Name used in diagnostics: declared name, property name or `<anonymous>`
    pub fn label(&self) -> &str {
        self.id
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("<anonymous>")
    }

    /// Whether this is a top-level named type
    pub fn is_declared(&self) -> bool {
        self.id.is_some()
    }

    /// Identifier of a declared type within its domain's package.
    ///
    /// Matches what [`crate::resolve_reference`] produces for references
    /// to it, stutter prefix included.
    pub fn type_ident(&self, domain: &str) -> String {
        let id = self.id.as_deref().unwrap_or_default();
        strip_stutter(&normalize(domain), &normalize(id))
    }

    /// Exported field identifier for a property or parameter
    pub fn field_ident(&self) -> String {
        normalize(self.name.as_deref().unwrap_or_default())
    }

    /// Raw property name as it appears on the wire
    pub fn wire_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Cleaned description lines
    pub fn docs(&self) -> Vec<String> {
        clean_description(self.description.as_deref().unwrap_or_default())
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let Some(reference) = self.reference.as_deref() {
            out.push(reference);
        }
        if let Some(items) = &self.items {
            items.collect_references(out);
        }
        for property in &self.properties {
            property.collect_references(out);
        }
    }

    /// Enum literals paired with their identifier-safe names
    pub fn enum_literals(&self) -> Vec<EnumLiteral> {
        self.enum_values
            .iter()
            .map(|value| EnumLiteral {
                value: value.clone(),
                name: naming::enum_literal_name(value),
            })
            .collect()
    }
}

impl Command {
    /// Method identifier (`setCookie` → `SetCookie`)
    pub fn method_ident(&self) -> String {
        normalize(&self.name)
    }

    pub fn args_ident(&self) -> String {
        format!("{}Args", self.method_ident())
    }

    pub fn reply_ident(&self) -> String {
        format!("{}Reply", self.method_ident())
    }

    /// Wire method name, `<Domain>.<command>`
    pub fn wire_name(&self, domain: &str) -> String {
        format!("{domain}.{}", self.name)
    }

    pub fn is_redirected(&self) -> bool {
        self.redirect.is_some()
    }

    pub fn has_args(&self) -> bool {
        !self.parameters.is_empty()
    }

    pub fn has_reply(&self) -> bool {
        !self.returns.is_empty()
    }

    pub fn docs(&self) -> Vec<String> {
        clean_description(self.description.as_deref().unwrap_or_default())
    }
}

impl Event {
    /// Event identifier (`requestWillBeSent` → `RequestWillBeSent`)
    pub fn event_ident(&self) -> String {
        normalize(&self.name)
    }

    /// Exported stream client interface name
    pub fn client_ident(&self) -> String {
        format!("{}Client", self.event_ident())
    }

    pub fn reply_ident(&self) -> String {
        format!("{}Reply", self.event_ident())
    }

    /// Wire event name, `<Domain>.<event>`
    pub fn wire_name(&self, domain: &str) -> String {
        format!("{domain}.{}", self.name)
    }

    pub fn docs(&self) -> Vec<String> {
        clean_description(self.description.as_deref().unwrap_or_default())
    }
}
