//! Go test scaffold for each domain package.
//!
//! Every command is invoked with nil args, with zeroed args and against a
//! failing transport. Every event is subscribed to, fed a valid and an
//! invalid payload, and re-subscribed after the connection closes.

use super::gofile::GoFile;
use super::{rpcc_import, testutil_import};
use cdpgen_core::{Command, Domain, Event};
use std::path::Path;

/// Build `domain_test.go` for `domain`.
///
/// Redirected commands have no implementation here and are skipped. A
/// domain with nothing to exercise yields an empty file.
pub(crate) fn emit_tests(root: &str, domain: &Domain, dir: &Path) -> GoFile {
    let pkg = domain.package();
    let mut file = GoFile::new(dir.join("domain_test.go"), &pkg);

    for cmd in domain.commands.iter().filter(|c| !c.is_redirected()) {
        command_test(root, cmd, &mut file);
    }
    for evt in &domain.events {
        event_test(root, &domain.name, evt, &mut file);
    }
    file
}

fn common_imports(root: &str, file: &mut GoFile) {
    file.import("context");
    file.import("strings");
    file.import("testing");
    file.import(&testutil_import(root));
}

fn command_test(root: &str, cmd: &Command, file: &mut GoFile) {
    common_imports(root, file);
    file.import(&rpcc_import(root));

    let method = cmd.method_ident();
    let discard = if cmd.has_reply() { "_, err" } else { "err" };
    let call = |args: &str| format!("\t{discard} = dom.{method}(context.Background(){args})\n");
    let (nil_args, zero_args) = if cmd.has_args() {
        (", nil".to_string(), format!(", &{}{{}}", cmd.args_ident()))
    } else {
        (String::new(), String::new())
    };

    let mut body = format!(
        "func TestDomain_{method}(t *testing.T) {{\n\
         \ttr := testutil.NewTransport(t)\n\
         \tdefer tr.Close()\n\
         \tdom := NewClient(tr.Conn)\n\n\
         \tvar err error\n"
    );
    body.push_str(&call(&nil_args));
    body.push_str("\tif err != nil {\n\t\tt.Error(err)\n\t}\n\n");
    if cmd.has_args() {
        body.push_str(&call(&zero_args));
        body.push_str("\tif err != nil {\n\t\tt.Error(err)\n\t}\n\n");
    }
    body.push_str("\ttr.SetError(&rpcc.ResponseError{Code: -32000, Message: \"bad request\"})\n");
    body.push_str(&call(&nil_args));
    body.push_str(
        "\tif err == nil || !strings.Contains(err.Error(), \"bad request\") {\n\
         \t\tt.Errorf(\"unexpected error; got: %v, want bad request\", err)\n\
         \t}\n\
         }\n\n",
    );
    file.push_str(&body);
}

fn event_test(root: &str, domain: &str, evt: &Event, file: &mut GoFile) {
    common_imports(root, file);

    let method = evt.event_ident();
    let wire = evt.wire_name(domain);
    file.push_str(&format!(
        "func TestDomain_{method}(t *testing.T) {{\n\
         \ttr := testutil.NewTransport(t)\n\
         \tdefer tr.Close()\n\
         \tdom := NewClient(tr.Conn)\n\n\
         \tstream, err := dom.{method}(context.Background())\n\
         \tif err != nil {{\n\
         \t\tt.Fatal(err)\n\
         \t}}\n\
         \tdefer stream.Close()\n\n\
         \tif err = tr.Emit(\"{wire}\", []byte(`{{}}`)); err != nil {{\n\
         \t\tt.Fatal(err)\n\
         \t}}\n\
         \tif _, err = stream.Recv(); err != nil {{\n\
         \t\tt.Error(err)\n\
         \t}}\n\n\
         \tif err = tr.Emit(\"{wire}\", []byte(`[]`)); err != nil {{\n\
         \t\tt.Fatal(err)\n\
         \t}}\n\
         \t_, err = stream.Recv()\n\
         \tif err == nil || !strings.Contains(err.Error(), \"{method} Recv\") {{\n\
         \t\tt.Errorf(\"unexpected error; got: %v, want {method} Recv\", err)\n\
         \t}}\n\n\
         \ttr.Close()\n\
         \tif _, err = dom.{method}(context.Background()); err == nil {{\n\
         \t\tt.Error(\"subscribe after close: want error, got nil\")\n\
         \t}}\n\
         }}\n\n"
    ));
}

#[cfg(test)]
#[path = "testgen/testgen_tests.rs"]
mod testgen_tests;
