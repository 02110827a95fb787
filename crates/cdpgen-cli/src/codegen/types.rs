//! Go type expressions and declared type emission.
//!
//! [`TypeMapper`] turns schema nodes into Go type expressions for one
//! package, recording the imports each expression needs. Declared types are
//! emitted as records, enums, timestamps, raw byte slices or plain named
//! types depending on their [`TypeClass`].

use super::docs::{DocBlock, values_line};
use super::gofile::{GoFile, NameScope, quote};
use cdpgen_core::cycles;
use cdpgen_core::{
    AnyType, Exemptions, GenError, GenResult, Scope, TimestampUnit, TypeClass, classify,
    resolve_reference,
};

/// A Go type expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GoType {
    pub expr: String,

    /// Zero value already reads as absent; optional fields skip the pointer
    pub nullable: bool,
}

impl GoType {
    fn plain(expr: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            nullable: false,
        }
    }

    fn nullable(expr: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            nullable: true,
        }
    }
}

/// Maps schema nodes to Go types as seen from one domain's package
pub(crate) struct TypeMapper<'a> {
    domain: &'a str,
    import: &'a str,
    exemptions: &'a Exemptions,

    /// Set while emitting a definition into the shared package
    shared: Option<&'a str>,
}

impl<'a> TypeMapper<'a> {
    pub fn new(domain: &'a str, import: &'a str, exemptions: &'a Exemptions) -> Self {
        Self {
            domain,
            import,
            exemptions,
            shared: None,
        }
    }

    /// Mapper for the shared definition `ident` of a type declared in `domain`
    pub fn shared(
        domain: &'a str,
        ident: &'a str,
        import: &'a str,
        exemptions: &'a Exemptions,
    ) -> Self {
        Self {
            domain,
            import,
            exemptions,
            shared: Some(ident),
        }
    }

    /// Import path of a generated protocol package
    pub fn protocol_import(&self, package: &str) -> String {
        super::protocol_import(self.import, package)
    }

    /// Type expression for a use site (field, parameter, array element)
    pub fn expr(&self, node: &AnyType, file: &mut GoFile) -> GenResult<GoType> {
        let go = match classify(node, self.domain)? {
            TypeClass::Reference => return self.reference(node, file),
            TypeClass::Sequence => {
                let items = node.items.as_deref().ok_or_else(|| GenError::MissingKind {
                    domain: self.domain.to_string(),
                    name: format!("{}[]", node.label()),
                })?;
                let element = self.expr(items, file)?;
                GoType::nullable(format!("[]{}", element.expr))
            }
            TypeClass::Record => {
                let fields = self.struct_fields(&node.properties, "", file)?;
                GoType::plain(format!("struct {{\n{fields}}}"))
            }
            TypeClass::Any | TypeClass::RawBytes => {
                file.import("encoding/json");
                GoType::nullable("json.RawMessage")
            }
            TypeClass::Base64Bytes => GoType::nullable("[]byte"),
            // Inline enums have no sentinel; they behave like strings.
            TypeClass::Enum | TypeClass::String => GoType::plain("string"),
            TypeClass::Boolean => GoType::plain("bool"),
            TypeClass::Number | TypeClass::Timestamp(_) => GoType::plain("float64"),
            TypeClass::Integer => GoType::plain("int"),
        };
        Ok(go)
    }

    fn reference(&self, node: &AnyType, file: &mut GoFile) -> GenResult<GoType> {
        let raw = node.reference.as_deref().unwrap_or_default();
        if let Some(shared) = self.shared {
            return Err(GenError::SharedScope {
                name: shared.to_string(),
                reference: raw.to_string(),
            });
        }

        let resolved = resolve_reference(raw, self.domain)?;
        let expr = match &resolved.scope {
            Scope::Local => resolved.ident.clone(),
            Scope::Domain { package } => {
                file.import(&self.protocol_import(package));
                format!("{package}.{}", resolved.ident)
            }
            Scope::Shared => {
                file.import(&self.protocol_import("internal"));
                format!("internal.{}", resolved.ident)
            }
        };
        Ok(GoType {
            expr,
            nullable: self.exemptions.is_exempt(&resolved),
        })
    }

    /// Field type with optionality applied.
    ///
    /// Optional fields become pointers unless nullable by nature. A field
    /// referring to its own record (`owner`) is always a pointer.
    pub fn field(&self, node: &AnyType, owner: &str, file: &mut GoFile) -> GenResult<String> {
        let go = self.expr(node, file)?;
        let self_ref = node.reference.is_some() && go.expr == owner;
        if self_ref || (node.optional && !go.nullable) {
            Ok(format!("*{}", go.expr))
        } else {
            Ok(go.expr)
        }
    }

    /// Struct body lines for `properties`, one tab deep
    pub fn struct_fields(
        &self,
        properties: &[AnyType],
        owner: &str,
        file: &mut GoFile,
    ) -> GenResult<String> {
        let label = if owner.is_empty() {
            format!("inline struct in {}", self.domain)
        } else {
            format!("struct {}.{owner}", self.domain)
        };
        let mut scope = NameScope::new(label);
        let mut out = String::new();

        for prop in properties {
            let ident = prop.field_ident();
            scope.declare(&ident)?;
            let ty = self.field(prop, owner, file)?;

            let mut doc = DocBlock::new(ident.clone(), &prop.docs());
            if prop.reference.is_none() && !prop.enum_values.is_empty() {
                doc = doc.paragraph(values_line(&prop.enum_values));
            }
            let doc = doc.notes("property", prop.experimental, prop.deprecated);
            if !doc.is_bare() {
                out.push_str(&doc.render("\t"));
            }

            let tag = if prop.optional {
                format!("{},omitempty", prop.wire_name())
            } else {
                prop.wire_name().to_string()
            };
            out.push_str(&format!("\t{ident} {ty} `json:\"{tag}\"`\n"));
        }
        Ok(out)
    }

    /// Emit a declared type of this domain.
    ///
    /// Cycle-table targets become an alias of the shared definition.
    pub fn emit_declared(
        &self,
        ty: &AnyType,
        scope: &mut NameScope,
        file: &mut GoFile,
    ) -> GenResult<()> {
        let name = ty.id.as_deref().unwrap_or_default();
        let ident = ty.type_ident(self.domain);
        scope.declare(&ident)?;
        let doc =
            DocBlock::new(ident.clone(), &ty.docs()).notes("type", ty.experimental, ty.deprecated);

        if let Some(shared) = cycles::shared_ident_for(self.domain, name) {
            file.import(&self.protocol_import("internal"));
            file.push_str(&doc.render(""));
            file.push_str(&format!("type {ident} = internal.{shared}\n\n"));
            return Ok(());
        }

        self.emit_definition(ty, &ident, &doc, scope, file)
    }

    /// Emit the full definition of `ty` under the name `ident`
    pub fn emit_definition(
        &self,
        ty: &AnyType,
        ident: &str,
        doc: &DocBlock,
        scope: &mut NameScope,
        file: &mut GoFile,
    ) -> GenResult<()> {
        let class = classify(ty, self.domain)?;
        file.push_str(&doc.render(""));

        match class {
            TypeClass::Enum => self.emit_enum(ty, ident, scope, file)?,
            TypeClass::Timestamp(unit) => emit_timestamp(ident, unit, file),
            TypeClass::RawBytes => emit_raw_bytes(ident, file),
            TypeClass::Record => {
                let fields = self.struct_fields(&ty.properties, ident, file)?;
                file.push_str(&format!("type {ident} struct {{\n{fields}}}\n\n"));
            }
            _ => {
                let go = self.expr(ty, file)?;
                file.push_str(&format!("type {ident} {}\n\n", go.expr));
            }
        }
        Ok(())
    }

    fn emit_enum(
        &self,
        ty: &AnyType,
        ident: &str,
        scope: &mut NameScope,
        file: &mut GoFile,
    ) -> GenResult<()> {
        if ty.enum_values.iter().any(String::is_empty) {
            return Err(GenError::EmptyEnumLiteral {
                domain: self.domain.to_string(),
                name: ty.id.clone().unwrap_or_default(),
            });
        }
        file.import("encoding/json");
        file.import("fmt");

        let not_set = format!("{ident}NotSet");
        scope.declare(&not_set)?;
        let mut constants = vec![(not_set.clone(), String::new())];
        for literal in ty.enum_literals() {
            let name = format!("{ident}{}", literal.name);
            scope.declare(&name)?;
            constants.push((name, literal.value));
        }

        let mut code = format!("type {ident} string\n\n");
        code.push_str(&format!("// {ident} as enums.\nconst (\n"));
        for (name, value) in &constants {
            code.push_str(&format!("\t{name} {ident} = {}\n", quote(value)));
        }
        code.push_str(")\n\n");

        let cases: Vec<String> = ty.enum_values.iter().map(|v| quote(v)).collect();
        code.push_str(&format!(
            "// Valid reports whether e is one of the declared values.\n\
             func (e {ident}) Valid() bool {{\n\
             \tswitch e {{\n\
             \tcase {}:\n\
             \t\treturn true\n\
             \tdefault:\n\
             \t\treturn false\n\
             \t}}\n\
             }}\n\n",
            cases.join(", ")
        ));

        code.push_str(&format!(
            "func (e {ident}) String() string {{\n\
             \treturn string(e)\n\
             }}\n\n"
        ));

        code.push_str(&format!(
            "// MarshalJSON encodes {not_set} as null.\n\
             func (e {ident}) MarshalJSON() ([]byte, error) {{\n\
             \tif e == {not_set} {{\n\
             \t\treturn []byte(\"null\"), nil\n\
             \t}}\n\
             \treturn json.Marshal(string(e))\n\
             }}\n\n"
        ));

        code.push_str(&format!(
            "// UnmarshalJSON decodes null as {not_set} and rejects unknown values.\n\
             func (e *{ident}) UnmarshalJSON(data []byte) error {{\n\
             \tif string(data) == \"null\" {{\n\
             \t\t*e = {not_set}\n\
             \t\treturn nil\n\
             \t}}\n\
             \tvar s string\n\
             \tif err := json.Unmarshal(data, &s); err != nil {{\n\
             \t\treturn err\n\
             \t}}\n\
             \tv := {ident}(s)\n\
             \tif !v.Valid() {{\n\
             \t\treturn fmt.Errorf(\"bad {ident}: %q\", s)\n\
             \t}}\n\
             \t*e = v\n\
             \treturn nil\n\
             }}\n\n"
        ));

        file.push_str(&code);
        Ok(())
    }
}

fn emit_timestamp(ident: &str, unit: TimestampUnit, file: &mut GoFile) {
    file.import("encoding/json");
    file.import("fmt");
    file.import("time");

    let (scaled, unit_name) = match unit {
        TimestampUnit::Seconds => ("float64(t)", "seconds"),
        TimestampUnit::Milliseconds => ("float64(t) / 1000", "milliseconds"),
    };

    file.push_str(&format!(
        "type {ident} float64\n\n\
         // String calls (time.Time).String().\n\
         func (t {ident}) String() string {{\n\
         \treturn t.Time().String()\n\
         }}\n\n\
         // Time converts the timestamp, in {unit_name} since epoch, to time.Time.\n\
         func (t {ident}) Time() time.Time {{\n\
         \tts := {scaled}\n\
         \tsecs := int64(ts)\n\
         \tnsecs := int64((ts - float64(secs)) * 1e9)\n\
         \treturn time.Unix(secs, nsecs)\n\
         }}\n\n\
         // MarshalJSON encodes the zero timestamp as null.\n\
         func (t {ident}) MarshalJSON() ([]byte, error) {{\n\
         \tif t == 0 {{\n\
         \t\treturn []byte(\"null\"), nil\n\
         \t}}\n\
         \treturn json.Marshal(float64(t))\n\
         }}\n\n\
         // UnmarshalJSON decodes a number, null decodes to zero.\n\
         func (t *{ident}) UnmarshalJSON(data []byte) error {{\n\
         \t*t = 0\n\
         \tif string(data) == \"null\" {{\n\
         \t\treturn nil\n\
         \t}}\n\
         \tvar f float64\n\
         \tif err := json.Unmarshal(data, &f); err != nil {{\n\
         \t\treturn fmt.Errorf(\"bad {ident}: %w\", err)\n\
         \t}}\n\
         \t*t = {ident}(f)\n\
         \treturn nil\n\
         }}\n\n"
    ));
}

fn emit_raw_bytes(ident: &str, file: &mut GoFile) {
    file.import("errors");

    file.push_str(&format!(
        "type {ident} []byte\n\n\
         // MarshalJSON copies behavior of json.RawMessage with omitempty support.\n\
         func (b {ident}) MarshalJSON() ([]byte, error) {{\n\
         \tif b == nil {{\n\
         \t\treturn []byte(\"null\"), nil\n\
         \t}}\n\
         \treturn b, nil\n\
         }}\n\n\
         // UnmarshalJSON copies behavior of json.RawMessage.\n\
         func (b *{ident}) UnmarshalJSON(data []byte) error {{\n\
         \tif b == nil {{\n\
         \t\treturn errors.New(\"{ident}: UnmarshalJSON on nil pointer\")\n\
         \t}}\n\
         \t*b = append((*b)[0:0], data...)\n\
         \treturn nil\n\
         }}\n\n"
    ));
}

#[cfg(test)]
#[path = "types/types_tests.rs"]
mod types_tests;
