//! Per-file output buffers and identifier scopes.

use cdpgen_core::{GenError, GenResult};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// Code generated by cdpgen. DO NOT EDIT.";

/// A Go source file being assembled.
///
/// Imports are kept in a sorted set so identical input always renders
/// identical text.
#[derive(Debug, Clone)]
pub struct GoFile {
    path: PathBuf,
    package: String,
    package_doc: Vec<String>,
    imports: BTreeSet<String>,
    body: String,
}

impl GoFile {
    /// Create an empty file at `path` (relative to the output root)
    pub fn new(path: impl Into<PathBuf>, package: &str) -> Self {
        Self {
            path: path.into(),
            package: package.to_string(),
            package_doc: Vec::new(),
            imports: BTreeSet::new(),
            body: String::new(),
        }
    }

    /// Set the package doc comment lines
    pub fn set_package_doc(&mut self, lines: Vec<String>) {
        self.package_doc = lines;
    }

    pub fn import(&mut self, path: &str) {
        self.imports.insert(path.to_string());
    }

    pub fn push_str(&mut self, text: &str) {
        self.body.push_str(text);
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn imports(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().map(String::as_str)
    }

    /// Whether nothing but the package clause would be written
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }

    /// Full file text: header, package doc and clause, imports, body.
    ///
    /// Standard library imports are grouped before the others.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.body.len() + 256);
        out.push_str(GENERATED_HEADER);
        out.push_str("\n\n");

        for line in &self.package_doc {
            if line.is_empty() {
                out.push_str("//\n");
            } else {
                out.push_str(&format!("// {line}\n"));
            }
        }
        out.push_str(&format!("package {}\n", self.package));

        let (std, other): (Vec<&str>, Vec<&str>) = self.imports().partition(|p| is_std(p));
        if !self.imports.is_empty() {
            out.push_str("\nimport (\n");
            for path in &std {
                out.push_str(&format!("\t\"{path}\"\n"));
            }
            if !std.is_empty() && !other.is_empty() {
                out.push('\n');
            }
            for path in &other {
                out.push_str(&format!("\t\"{path}\"\n"));
            }
            out.push_str(")\n");
        }

        if !self.is_empty() {
            out.push('\n');
            out.push_str(self.body.trim_start_matches('\n'));
            if !out.ends_with('\n') {
                out.push('\n');
            }
        }
        out
    }
}

/// Standard library paths have no dot in their first element.
fn is_std(path: &str) -> bool {
    !path.split('/').next().unwrap_or_default().contains('.')
}

/// Identifiers declared in one generated scope (a package, a struct, a
/// method set).
///
/// Declaring the same identifier twice means two schema names normalized
/// to one target name; the run aborts rather than emit code that does not
/// compile.
#[derive(Debug, Clone)]
pub struct NameScope {
    scope: String,
    idents: BTreeSet<String>,
}

impl NameScope {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            idents: BTreeSet::new(),
        }
    }

    /// Record `ident`, failing if it is already declared
    pub fn declare(&mut self, ident: &str) -> GenResult<()> {
        if self.idents.insert(ident.to_string()) {
            Ok(())
        } else {
            Err(GenError::DuplicateIdentifier {
                scope: self.scope.clone(),
                ident: ident.to_string(),
            })
        }
    }

    pub fn contains(&self, ident: &str) -> bool {
        self.idents.contains(ident)
    }

    pub fn len(&self) -> usize {
        self.idents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idents.is_empty()
    }
}

/// Go interpreted string literal for `text`.
///
/// JSON string escapes are a subset of Go's, so the JSON encoding is
/// used directly.
pub fn quote(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}
