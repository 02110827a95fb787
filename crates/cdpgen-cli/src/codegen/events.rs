//! Event stream clients.

use super::docs::DocBlock;
use super::gofile::{GoFile, NameScope};
use super::types::TypeMapper;
use super::{internal_import, rpcc_import};
use cdpgen_core::naming::param_name;
use cdpgen_core::{Domain, Event, GenResult};

/// Emit the `<Evt>Client` interface and `<Evt>Reply` struct
pub(crate) fn emit_event_types(
    mapper: &TypeMapper<'_>,
    root: &str,
    domain: &Domain,
    evt: &Event,
    scope: &mut NameScope,
    file: &mut GoFile,
) -> GenResult<()> {
    let client = evt.client_ident();
    let reply = evt.reply_ident();
    scope.declare(&client)?;
    scope.declare(&reply)?;
    file.import(&rpcc_import(root));

    let doc = DocBlock::new(
        format!("{client} is a client for {} events.", evt.event_ident()),
        &evt.docs(),
    )
    .notes("event", evt.experimental, evt.deprecated);
    file.push_str(&doc.render(""));
    file.push_str(&format!(
        "type {client} interface {{\n\
         \t// Recv calls RecvMsg on rpcc.Stream, blocks until the event is\n\
         \t// triggered, context canceled or connection closed.\n\
         \tRecv() (*{reply}, error)\n\
         \trpcc.Stream\n\
         }}\n\n"
    ));

    let fields = mapper.struct_fields(&evt.parameters, &reply, file)?;
    file.push_str(&format!(
        "// {reply} is the reply for {} events.\n\
         type {reply} struct {{\n{fields}}}\n\n",
        evt.wire_name(&domain.name)
    ));
    Ok(())
}

/// Emit the subscribe method on `domainClient` and its unexported stream
/// wrapper.
///
/// The wrapper name is the event name plus `Client`, kept unexported so
/// it cannot clash with the exported interface.
pub(crate) fn emit_event_method(
    root: &str,
    domain: &Domain,
    evt: &Event,
    scope: &mut NameScope,
    methods: &mut NameScope,
    file: &mut GoFile,
) -> GenResult<()> {
    let method = evt.event_ident();
    let wrapper = format!("{}Client", param_name(&evt.name));
    methods.declare(&method)?;
    scope.declare(&wrapper)?;
    file.import("context");
    file.import(&rpcc_import(root));
    file.import(&internal_import(root));

    let client = evt.client_ident();
    let reply = evt.reply_ident();
    let wire = evt.wire_name(&domain.name);
    let name = &domain.name;

    let doc = DocBlock::new(
        format!("{method} opens an event stream for the {wire} event."),
        &evt.docs(),
    )
    .notes("event", evt.experimental, evt.deprecated);
    file.push_str(&doc.render(""));
    file.push_str(&format!(
        "func (d *domainClient) {method}(ctx context.Context) ({client}, error) {{\n\
         \ts, err := rpcc.NewStream(ctx, \"{wire}\", d.conn)\n\
         \tif err != nil {{\n\
         \t\treturn nil, &internal.OpError{{Domain: \"{name}\", Op: \"{method}\", Err: err}}\n\
         \t}}\n\
         \treturn &{wrapper}{{Stream: s}}, nil\n\
         }}\n\n\
         type {wrapper} struct{{ rpcc.Stream }}\n\n\
         // GetStream returns the underlying rpcc.Stream.\n\
         func (c *{wrapper}) GetStream() rpcc.Stream {{ return c.Stream }}\n\n\
         func (c *{wrapper}) Recv() (*{reply}, error) {{\n\
         \tevent := new({reply})\n\
         \tif err := c.RecvMsg(event); err != nil {{\n\
         \t\treturn nil, &internal.OpError{{Domain: \"{name}\", Op: \"{method} Recv\", Err: err}}\n\
         \t}}\n\
         \treturn event, nil\n\
         }}\n\n"
    ));
    Ok(())
}

/// Interface method for `evt` as declared from the top-level package
pub(crate) fn contract_event(domain: &Domain, evt: &Event) -> String {
    format!(
        "{}(context.Context) ({}.{}, error)",
        evt.event_ident(),
        domain.package(),
        evt.client_ident()
    )
}
