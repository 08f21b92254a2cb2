//! Sample graphs shared by integration tests.

use anyhow::Result;
use ninja_writer::graph::{EvalString, Pool, Rule, State};

/// `gcc $cflags -c $in -o $out`
pub fn cc_command() -> EvalString {
    EvalString::new()
        .with_text("gcc ")
        .with_reference("cflags")
        .with_text(" -c ")
        .with_reference("in")
        .with_text(" -o ")
        .with_reference("out")
}

/// A small C project: globals, a link pool, compile and link rules, and
/// three edges.
pub fn c_project() -> Result<State> {
    let mut state = State::new();
    state.add_binding("cflags", "-O2 -Wall");
    state.add_binding("builddir", "out");
    state.add_pool(Pool::new("link_pool", 4))?;
    state.add_rule(
        Rule::new("cc")
            .with_binding("command", cc_command())
            .with_binding("description", EvalString::from("CC ").with_reference("out"))
            .with_binding("depfile", EvalString::new().with_reference("out").with_text(".d")),
    )?;
    state.add_rule(
        Rule::new("link")
            .with_binding(
                "command",
                EvalString::from("gcc @")
                    .with_reference("rspfile")
                    .with_text(" -o ")
                    .with_reference("out"),
            )
            .with_binding("pool", EvalString::from("link_pool"))
            .with_binding("rspfile", EvalString::new().with_reference("out").with_text(".rsp"))
            .with_binding("rspfile_content", EvalString::new().with_reference("in")),
    )?;
    state.add_edge("cc", ["a.o"], ["a.c"])?;
    state.add_edge("cc", ["b.o"], ["b.c"])?;
    state.add_edge("link", ["app", "app.map"], ["a.o", "b.o"])?;
    Ok(state)
}
