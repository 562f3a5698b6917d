//! Tests for the runtime library: generated code is run under node against
//! a minimal DOM. Skipped when `node` is not installed.

use std::io::ErrorKind;
use std::process::Command;

use h2j_codegen::{RUNTIME_JS, compile};

const FAKE_DOM: &str = include_str!("fixtures/fake_dom.js");

/// Helper to compile `template` and run `scenario` after its `render`
/// function. The scenario throws on a failed assertion.
fn run(template: &str, scenario: &str) {
    let code = compile(template).expect("template should compile").code;
    let script = format!("{RUNTIME_JS}\n{FAKE_DOM}\n{code}\n{scenario}\n");
    let output = match Command::new("node").arg("-e").arg(&script).output() {
        Ok(output) => output,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            eprintln!("node not found, skipping runtime test");
            return;
        }
        Err(err) => panic!("failed to run node: {err}"),
    };
    assert!(
        output.status.success(),
        "runtime scenario failed:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
}

const LIST: &str = r#"<ul><for each="items" as="item"><li>{{item}}</li></for></ul>"#;

#[test]
fn test_set_rerenders_bound_text() {
    run(
        r#"<p class="greeting">Hello {{user.name}}!</p>"#,
        r#"
var target = document.createElement("main");
var scope = render({user: {name: "Ada"}}, target);
assertEqual(serialize(target), '<main><p class="greeting">Hello Ada!</p></main>', "first render");
scope.set("user.name", "Grace");
assertEqual(serialize(target), '<main><p class="greeting">Hello Grace!</p></main>', "set field");
scope.set(["user"], {name: "Lin"});
assertEqual(serialize(target), '<main><p class="greeting">Hello Lin!</p></main>', "set object");
"#,
    );
}

#[test]
fn test_if_else_follows_condition() {
    run(
        r#"<if test="on">yes</if><else>no</else>"#,
        r#"
var on = document.createElement("main");
render({on: [1]}, on);
assertEqual(serialize(on), "<main>yes</main>", "truthy");
var off = document.createElement("main");
render({on: []}, off);
assertEqual(serialize(off), "<main>no</main>", "empty list is falsy");
"#,
    );
}

#[test]
fn test_empty_collection_renders_only_anchors() {
    run(
        LIST,
        r#"
var empty = document.createElement("main");
render({items: []}, empty);
assertEqual(serialize(empty), "<main><ul><!--for item--><!--end for item--></ul></main>", "empty");
var missing = document.createElement("main");
render({}, missing);
assertEqual(serialize(missing), serialize(empty), "missing");
"#,
    );
}

#[test]
fn test_list_mutations_rerender_loop() {
    run(
        LIST,
        r#"
var items = new h2j.List(["a"]);
var target = document.createElement("main");
render({items: items}, target);
items.push("b");
assertEqual(serialize(target), "<main><ul><!--for item--><li>a</li><li>b</li><!--end for item--></ul></main>", "push");
items.removeAt(0);
items.unshift("z");
assertEqual(serialize(target), "<main><ul><!--for item--><li>z</li><li>b</li><!--end for item--></ul></main>", "removeAt and unshift");
assertEqual(items.watchers(), 1, "watchers");
"#,
    );
}

#[test]
fn test_application_rerender_replaces_watchers() {
    run(
        LIST,
        r#"
var items = new h2j.List(["a"]);
var app = new h2j.Application(render, {items: items});
var host = document.createElement("main");
app.mount(host);
app.render();
assertEqual(items.watchers(), 1, "watchers after two renders");
items.push("b");
assertEqual(serialize(host), "<main><ul><!--for item--><li>a</li><li>b</li><!--end for item--></ul></main>", "push after re-render");
"#,
    );
}

#[test]
fn test_outer_loop_rerender_releases_inner_watchers() {
    run(
        r#"<for each="rows" as="row"><p><for each="row.cells" as="cell">{{cell}}</for></p></for>"#,
        r#"
var cells = new h2j.List([1, 2]);
var rows = new h2j.List([{cells: cells}]);
var target = document.createElement("main");
render({rows: rows}, target);
rows.push({cells: new h2j.List([])});
assertEqual(cells.watchers(), 1, "inner watchers after outer push");
cells.push(3);
assertEqual(
    serialize(target),
    "<main><!--for row--><p><!--for cell-->123<!--end for cell--></p>" +
        "<p><!--for cell--><!--end for cell--></p><!--end for row--></main>",
    "inner push"
);
"#,
    );
}
