//! Command argument/reply types and their invocation methods.

use super::docs::{DocBlock, values_line};
use super::gofile::{GoFile, NameScope};
use super::types::TypeMapper;
use super::{internal_import, rpcc_import};
use cdpgen_core::naming::param_name;
use cdpgen_core::{AnyType, Command, Domain, GenResult};

/// Emit `<Cmd>Args` with its constructor and setters, then `<Cmd>Reply`.
///
/// Redirected commands still get both types.
pub(crate) fn emit_command_types(
    mapper: &TypeMapper<'_>,
    domain: &Domain,
    cmd: &Command,
    scope: &mut NameScope,
    file: &mut GoFile,
) -> GenResult<()> {
    if cmd.has_args() {
        emit_args(mapper, domain, cmd, scope, file)?;
    }

    if cmd.has_reply() {
        let reply = cmd.reply_ident();
        scope.declare(&reply)?;
        let fields = mapper.struct_fields(&cmd.returns, &reply, file)?;
        file.push_str(&format!(
            "// {reply} represents the return values for {} in the {} domain.\n\
             type {reply} struct {{\n{fields}}}\n\n",
            cmd.method_ident(),
            domain.name
        ));
    }
    Ok(())
}

fn emit_args(
    mapper: &TypeMapper<'_>,
    domain: &Domain,
    cmd: &Command,
    scope: &mut NameScope,
    file: &mut GoFile,
) -> GenResult<()> {
    let args = cmd.args_ident();
    scope.declare(&args)?;
    let fields = mapper.struct_fields(&cmd.parameters, &args, file)?;
    file.push_str(&format!(
        "// {args} represents the arguments for {} in the {} domain.\n\
         type {args} struct {{\n{fields}}}\n\n",
        cmd.method_ident(),
        domain.name
    ));

    let (required, optional): (Vec<&AnyType>, Vec<&AnyType>) =
        cmd.parameters.iter().partition(|p| !p.optional);

    let ctor = format!("New{args}");
    scope.declare(&ctor)?;
    let mut params = Vec::with_capacity(required.len());
    let mut assigns = String::new();
    for param in required {
        let name = param_name(param.wire_name());
        let ty = mapper.field(param, &args, file)?;
        params.push(format!("{name} {ty}"));
        assigns.push_str(&format!("\targs.{} = {name}\n", param.field_ident()));
    }
    file.push_str(&format!(
        "// {ctor} initializes {args} with the required arguments.\n\
         func {ctor}({}) *{args} {{\n\
         \targs := new({args})\n\
         {assigns}\
         \treturn args\n\
         }}\n\n",
        params.join(", ")
    ));

    let mut setters = NameScope::new(format!("methods of {}.{args}", domain.name));
    for param in optional {
        let field = param.field_ident();
        let setter = format!("Set{field}");
        setters.declare(&setter)?;

        let name = param_name(param.wire_name());
        let go = mapper.expr(param, file)?;
        let value = if go.nullable {
            name.clone()
        } else {
            format!("&{name}")
        };

        let mut doc = DocBlock::new(format!("{setter} sets the {field} optional argument."), &param.docs());
        if param.reference.is_none() && !param.enum_values.is_empty() {
            doc = doc.paragraph(values_line(&param.enum_values));
        }
        let doc = doc.notes("argument", param.experimental, param.deprecated);

        file.push_str(&doc.render(""));
        file.push_str(&format!(
            "func (a *{args}) {setter}({name} {}) *{args} {{\n\
             \ta.{field} = {value}\n\
             \treturn a\n\
             }}\n\n",
            go.expr
        ));
    }
    Ok(())
}

/// Emit the `domainClient` method invoking `cmd`.
///
/// A nil `*Args` is passed on as an untyped nil so the transport omits
/// the parameters entirely.
pub(crate) fn emit_command_method(
    root: &str,
    domain: &Domain,
    cmd: &Command,
    methods: &mut NameScope,
    file: &mut GoFile,
) -> GenResult<()> {
    let method = cmd.method_ident();
    methods.declare(&method)?;
    file.import("context");
    file.import(&rpcc_import(root));
    file.import(&internal_import(root));

    let wire = cmd.wire_name(&domain.name);
    let doc = DocBlock::new(format!("{method} invokes the {} method.", domain.name), &cmd.docs())
        .notes("command", cmd.experimental, cmd.deprecated);

    let mut params = String::from("ctx context.Context");
    if cmd.has_args() {
        params.push_str(&format!(", args *{}", cmd.args_ident()));
    }
    let (results, reply_arg) = if cmd.has_reply() {
        (format!("(reply *{}, err error)", cmd.reply_ident()), "reply")
    } else {
        ("(err error)".to_string(), "nil")
    };

    let mut body = String::new();
    if cmd.has_reply() {
        body.push_str(&format!("\treply = new({})\n", cmd.reply_ident()));
    }
    if cmd.has_args() {
        body.push_str(&format!(
            "\tif args != nil {{\n\
             \t\terr = rpcc.Invoke(ctx, \"{wire}\", args, {reply_arg}, d.conn)\n\
             \t}} else {{\n\
             \t\terr = rpcc.Invoke(ctx, \"{wire}\", nil, {reply_arg}, d.conn)\n\
             \t}}\n"
        ));
    } else {
        body.push_str(&format!(
            "\terr = rpcc.Invoke(ctx, \"{wire}\", nil, {reply_arg}, d.conn)\n"
        ));
    }
    body.push_str(&format!(
        "\tif err != nil {{\n\
         \t\terr = &internal.OpError{{Domain: \"{}\", Op: \"{method}\", Err: err}}\n\
         \t}}\n\
         \treturn\n",
        domain.name
    ));

    file.push_str(&doc.render(""));
    file.push_str(&format!(
        "func (d *domainClient) {method}({params}) {results} {{\n{body}}}\n\n"
    ));
    Ok(())
}

/// Interface method for `cmd` as declared from the top-level package
pub(crate) fn contract_method(domain: &Domain, cmd: &Command) -> String {
    let pkg = domain.package();
    let mut params = vec!["context.Context".to_string()];
    if cmd.has_args() {
        params.push(format!("*{pkg}.{}", cmd.args_ident()));
    }
    let results = if cmd.has_reply() {
        format!("(*{pkg}.{}, error)", cmd.reply_ident())
    } else {
        "error".to_string()
    };
    format!("{}({}) {results}", cmd.method_ident(), params.join(", "))
}
