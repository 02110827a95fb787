//! Type classification and reference resolution.
//!
//! Every schema node maps to exactly one [`TypeClass`]. Classification is
//! ordered: an explicit `$ref` wins, then the timestamp allow-list, then
//! enums, then the string/object special cases, then the raw kind.

use crate::cycles;
use crate::error::{GenError, GenResult};
use crate::naming::{normalize, package_name, strip_stutter};
use crate::schema::AnyType;
use crate::text::mentions_base64;

/// Raw kind discriminators understood by the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Boolean,
    String,
    Number,
    Integer,
    Object,
    Array,
    Any,
}

impl Kind {
    /// Parse a raw `type` value; `None` for anything outside the vocabulary
    pub fn parse(raw: &str) -> Option<Kind> {
        match raw {
            "boolean" => Some(Kind::Boolean),
            "string" => Some(Kind::String),
            "number" => Some(Kind::Number),
            "integer" => Some(Kind::Integer),
            "object" => Some(Kind::Object),
            "array" => Some(Kind::Array),
            "any" => Some(Kind::Any),
            _ => None,
        }
    }
}

/// Unit of the raw wire number behind a timestamp type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampUnit {
    Seconds,
    Milliseconds,
}

/// Target representation of a schema node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeClass {
    Reference,
    Timestamp(TimestampUnit),
    Enum,
    /// String carrying base64 data, decoded to bytes
    Base64Bytes,
    /// Named object without properties, passed through untouched
    RawBytes,
    /// Anonymous object without properties, or kind `any`
    Any,
    Boolean,
    String,
    Number,
    Integer,
    Record,
    Sequence,
}

impl TypeClass {
    /// Types whose zero value already means "absent".
    ///
    /// Optional fields of these types are not wrapped in a pointer.
    pub fn is_nullable_by_nature(&self) -> bool {
        matches!(
            self,
            TypeClass::Sequence
                | TypeClass::RawBytes
                | TypeClass::Base64Bytes
                | TypeClass::Any
                | TypeClass::Enum
        )
    }
}

/// (type name, kind) pairs with timestamp semantics.
const TIMESTAMPS: &[(&str, Kind)] = &[
    ("TimeSinceEpoch", Kind::Number),
    ("MonotonicTime", Kind::Number),
    ("Timestamp", Kind::Number),
];

/// (declaring domain, type name) pairs that stay plain numbers in their own domain.
const TIMESTAMP_EXCEPTIONS: &[(&str, &str)] = &[("Input", "TimeSinceEpoch")];

/// Domain whose timestamps count milliseconds rather than seconds.
const MILLISECOND_DOMAIN: &str = "Runtime";

/// Timestamp unit for types declared in `domain`
pub fn timestamp_unit(domain: &str) -> TimestampUnit {
    if domain == MILLISECOND_DOMAIN {
        TimestampUnit::Milliseconds
    } else {
        TimestampUnit::Seconds
    }
}

/// Classify a schema node declared or used in `domain`.
///
/// Fails on a node with neither `$ref` nor `type`, and on a `type` outside
/// the closed vocabulary.
pub fn classify(node: &AnyType, domain: &str) -> GenResult<TypeClass> {
    if node.reference.is_some() {
        return Ok(TypeClass::Reference);
    }

    let raw = node.kind.as_deref().ok_or_else(|| GenError::MissingKind {
        domain: domain.to_string(),
        name: node.label().to_string(),
    })?;
    let kind = Kind::parse(raw).ok_or_else(|| GenError::UnknownKind {
        domain: domain.to_string(),
        name: node.label().to_string(),
        kind: raw.to_string(),
    })?;

    if let Some(id) = node.id.as_deref() {
        let listed = TIMESTAMPS.contains(&(id, kind));
        if listed && !TIMESTAMP_EXCEPTIONS.contains(&(domain, id)) {
            return Ok(TypeClass::Timestamp(timestamp_unit(domain)));
        }
    }

    if !node.enum_values.is_empty() {
        return Ok(TypeClass::Enum);
    }

    let class = match kind {
        Kind::String if node.description.as_deref().is_some_and(mentions_base64) => {
            TypeClass::Base64Bytes
        }
        Kind::Object if node.properties.is_empty() && node.is_declared() => TypeClass::RawBytes,
        Kind::Object if node.properties.is_empty() => TypeClass::Any,
        Kind::Object => TypeClass::Record,
        Kind::Array => TypeClass::Sequence,
        Kind::Any => TypeClass::Any,
        Kind::Boolean => TypeClass::Boolean,
        Kind::String => TypeClass::String,
        Kind::Number => TypeClass::Number,
        Kind::Integer => TypeClass::Integer,
    };
    Ok(class)
}

/// Where a resolved reference lives relative to the referencing domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Same domain, unqualified
    Local,
    /// Another domain's package
    Domain { package: String },
    /// The shared cycle-breaking package
    Shared,
}

/// A `$ref` resolved for a specific referencing domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRef {
    pub scope: Scope,

    /// Identifier within the target scope
    pub ident: String,

    /// Raw name of the declaring domain
    pub domain: String,

    /// Raw name of the referenced type
    pub name: String,
}

impl ResolvedRef {
    /// Fully-qualified raw reference, `Domain.Name`
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.domain, self.name)
    }
}

/// Resolve a `$ref` as seen from `owning_domain`.
///
/// Both halves are normalized independently, the stutter prefix is
/// stripped, same-domain references lose their qualifier, and the
/// cycle-breaking table redirects the listed cross-domain references to the
/// shared scope.
pub fn resolve_reference(reference: &str, owning_domain: &str) -> GenResult<ResolvedRef> {
    let (domain, name) = reference
        .split_once('.')
        .unwrap_or((owning_domain, reference));

    if domain.is_empty() || name.is_empty() || name.contains('.') {
        return Err(GenError::InvalidReference {
            domain: owning_domain.to_string(),
            reference: reference.to_string(),
        });
    }

    let ident = strip_stutter(&normalize(domain), &normalize(name));
    let mut resolved = ResolvedRef {
        scope: Scope::Local,
        ident,
        domain: domain.to_string(),
        name: name.to_string(),
    };

    if domain == owning_domain {
        return Ok(resolved);
    }

    match cycles::lookup(owning_domain, &resolved.qualified()) {
        Some(entry) => {
            resolved.scope = Scope::Shared;
            resolved.ident = entry.shared.to_string();
        }
        None => {
            resolved.scope = Scope::Domain {
                package: package_name(domain),
            };
        }
    }
    Ok(resolved)
}
