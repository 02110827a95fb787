//! Fixed Go sources emitted alongside the generated packages.
//!
//! These do not depend on the protocol beyond the import path.

use super::aggregate::ROOT_PACKAGE;
use super::gofile::{GoFile, NameScope};
use super::rpcc_import;
use cdpgen_core::GenResult;

// Embedded template bodies; package clause and imports are added by GoFile
mod templates {
    pub const OP_ERROR: &str = include_str!("../../templates/go/op_error.go.tmpl");
    pub const CDP_ERRORS: &str = include_str!("../../templates/go/cdp_errors.go.tmpl");
    pub const TRANSPORT: &str = include_str!("../../templates/go/transport.go.tmpl");
}

/// `protocol/internal/error.go`: the `OpError` every domain method returns
pub(crate) fn op_error_file() -> GoFile {
    let mut file = GoFile::new("protocol/internal/error.go", "internal");
    file.set_package_doc(vec![
        "Package internal holds definitions shared by the generated domain packages.".to_string(),
    ]);
    file.import("fmt");
    file.push_str(templates::OP_ERROR);
    file
}

/// `cdp_errors.go`: `ErrorCause` for unwrapping domain errors
pub(crate) fn errors_file(scope: &mut NameScope) -> GenResult<GoFile> {
    scope.declare("ErrorCause")?;
    let mut file = GoFile::new("cdp_errors.go", ROOT_PACKAGE);
    file.import("errors");
    file.push_str(templates::CDP_ERRORS);
    Ok(file)
}

/// `internal/testutil/transport.go`: the in-memory transport the
/// generated domain tests run against
pub(crate) fn transport_file(root: &str) -> GoFile {
    let mut file = GoFile::new("internal/testutil/transport.go", "testutil");
    file.set_package_doc(vec![
        "Package testutil provides an in-memory rpcc transport for domain tests.".to_string(),
    ]);
    for path in ["context", "encoding/json", "io", "sync", "testing"] {
        file.import(path);
    }
    file.import(&rpcc_import(root));
    file.push_str(templates::TRANSPORT);
    file
}
