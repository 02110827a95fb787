//! Definitions moved into the shared `protocol/internal` package.

use super::docs::DocBlock;
use super::gofile::{GoFile, NameScope};
use super::types::TypeMapper;
use cdpgen_core::{AnyType, Exemptions, GenResult};

/// Collects cycle-table definitions as their declaring domains are emitted
#[derive(Debug)]
pub(crate) struct SharedTypes {
    file: GoFile,
    scope: NameScope,
}

impl SharedTypes {
    pub fn new() -> Self {
        Self {
            file: GoFile::new("protocol/internal/types.go", "internal"),
            scope: NameScope::new("package internal"),
        }
    }

    /// Emit the full definition of `ty`, declared in `domain`, as `ident`
    pub fn emit(
        &mut self,
        domain: &str,
        ty: &AnyType,
        ident: &str,
        root: &str,
        exemptions: &Exemptions,
    ) -> GenResult<()> {
        self.scope.declare(ident)?;
        let mapper = TypeMapper::shared(domain, ident, root, exemptions);
        let doc = DocBlock::new(ident, &ty.docs()).notes("type", ty.experimental, ty.deprecated);
        mapper.emit_definition(ty, ident, &doc, &mut self.scope, &mut self.file)
    }

    pub fn len(&self) -> usize {
        self.scope.len()
    }

    /// The finished file; empty when no cycle target was declared
    pub fn into_file(self) -> GoFile {
        self.file
    }
}
