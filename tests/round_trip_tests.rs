//! Serialised manifests re-parse into the graph they came from.

use anyhow::{Result, ensure};
use ninja_writer::graph::{EvalString, Pool, Rule, State};
use ninja_writer::writer::render;
use rstest::{fixture, rstest};
use test_support::graphs::c_project;
use test_support::read_manifest;

#[fixture]
fn escaping_graph() -> Result<State> {
    let mut state = State::new();
    state.add_binding("arch.flags", "-m64");
    state.add_pool(Pool::new("heavy", 1))?;
    state.add_rule(
        Rule::new("copy")
            .with_binding(
                "command",
                EvalString::from("cp ")
                    .with_reference("in")
                    .with_text(" ")
                    .with_reference("in")
                    .with_text("_copy"),
            )
            .with_binding(
                "description",
                EvalString::from("echo $HOME costs $5 ").with_reference("arch.flags"),
            )
            .with_binding("pool", EvalString::from("heavy")),
    )?;
    state.add_edge("copy", ["x_copy"], ["x"])?;
    state.add_edge("phony", ["all"], ["x_copy"])?;
    Ok(state)
}

#[rstest]
fn c_project_survives_a_round_trip() -> Result<()> {
    let state = c_project()?;
    let text = render(&state)?;
    let reread = read_manifest(text.as_str())?;
    ensure!(reread == state, "round trip changed the graph:\n{text}");
    Ok(())
}

#[rstest]
fn escapes_and_braces_survive_a_round_trip(escaping_graph: Result<State>) -> Result<()> {
    let state = escaping_graph?;
    let text = render(&state)?;
    ensure!(
        text.as_str().contains("\tcommand cp $in ${in}_copy\n"),
        "missing braced reference:\n{text}"
    );
    ensure!(
        text.as_str()
            .contains("\tdescription echo $$HOME costs $$5 ${arch.flags}\n"),
        "missing escapes:\n{text}"
    );
    let reread = read_manifest(text.as_str())?;
    ensure!(reread == state, "round trip changed the graph:\n{text}");
    Ok(())
}

#[rstest]
fn rendering_is_idempotent(escaping_graph: Result<State>) -> Result<()> {
    let first = render(&escaping_graph?)?;
    let second = render(&read_manifest(first.as_str())?)?;
    ensure!(first == second, "second pass differs:\n{first}\n---\n{second}");
    Ok(())
}

#[rstest]
fn empty_response_file_bindings_survive_a_round_trip() -> Result<()> {
    let mut state = State::new();
    state.add_rule(
        Rule::new("link")
            .with_binding("command", EvalString::from("ld"))
            .with_binding("rspfile", EvalString::new())
            .with_binding("rspfile_content", EvalString::new()),
    )?;
    let text = render(&state)?;
    ensure!(
        text.as_str() == "rule link\n\tcommand ld\n\n",
        "unexpected manifest: {text}"
    );
    let reread = read_manifest(text.as_str())?;
    ensure!(reread == state, "round trip changed the graph:\n{text}");
    Ok(())
}

#[rstest]
fn dollars_in_global_values_survive_a_round_trip() -> Result<()> {
    let mut state = State::new();
    state.add_binding("x", "a$b");
    state.add_binding("price", "$5 $ or $$");
    let text = render(&state)?;
    let reread = read_manifest(text.as_str())?;
    ensure!(
        reread.bindings().get("x").map(String::as_str) == Some("a$b"),
        "global value re-read differently:\n{text}"
    );
    ensure!(reread == state, "round trip changed the graph:\n{text}");
    Ok(())
}

#[rstest]
fn awkward_paths_survive_a_round_trip() -> Result<()> {
    let mut state = State::new();
    state.add_rule(Rule::new("cc").with_binding("command", EvalString::from("cc")))?;
    state.add_edge("cc", ["out dir/a.o", "a: b.o"], ["C:/src/a.c", "x, y.c", "$HOME.c"])?;
    let text = render(&state)?;
    let reread = read_manifest(text.as_str())?;
    ensure!(reread == state, "round trip changed the graph:\n{text}");
    Ok(())
}

#[rstest]
fn empty_graph_round_trips_to_empty_text() -> Result<()> {
    let text = render(&State::new())?;
    ensure!(text.as_str().is_empty());
    ensure!(read_manifest(text.as_str())? == State::new());
    Ok(())
}
