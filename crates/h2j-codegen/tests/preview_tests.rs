//! Tests for the data preview: conditions, loops, scoping and escaping.

use h2j_codegen::{PreviewError, compile, preview};
use h2j_dom::Position;
use serde_json::{Value, json};

/// Helper to compile a template and preview it against `data`.
fn render(source: &str, data: &Value) -> Result<String, PreviewError> {
    let compilation = compile(source).expect("template should compile");
    preview(&compilation.program, data)
}

const LIST: &str = r#"<ul><for each="items" as="item"><li>{{item.name}}</li></for></ul>"#;

#[test]
fn test_loop_renders_each_item() {
    let data = json!({"items": [{"name": "a"}, {"name": "<b>"}]});
    assert_eq!(
        render(LIST, &data).expect("renders"),
        "<ul><li>a</li><li>&lt;b&gt;</li></ul>"
    );
}

#[test]
fn test_empty_or_missing_collection_renders_nothing() {
    assert_eq!(render(LIST, &json!({"items": []})).expect("renders"), "<ul></ul>");
    assert_eq!(render(LIST, &json!({})).expect("renders"), "<ul></ul>");
    assert_eq!(render(LIST, &json!({"items": null})).expect("renders"), "<ul></ul>");
}

#[test]
fn test_non_list_collection_is_an_error() {
    assert_eq!(
        render(LIST, &json!({"items": 5})),
        Err(PreviewError::NotIterable {
            path: "items".to_string(),
            position: Position::new(1, 5),
        })
    );
}

#[test]
fn test_if_else() {
    let source = r#"<if test="user.admin"><b>admin</b></if> <else>guest</else>"#;
    assert_eq!(
        render(source, &json!({"user": {"admin": true}})).expect("renders"),
        "<b>admin</b> "
    );
    assert_eq!(
        render(source, &json!({"user": {"admin": 0}})).expect("renders"),
        " guest"
    );
    assert_eq!(render(source, &json!({})).expect("renders"), " guest");
}

#[test]
fn test_if_inside_loop_pairs_per_iteration() {
    let source = r#"<for each="xs" as="x"><if test="x">y</if><else>n</else></for>"#;
    assert_eq!(
        render(source, &json!({"xs": [1, 0, "", "s", []]})).expect("renders"),
        "ynnyn"
    );
}

#[test]
fn test_nested_loops_shadow_outer_names() {
    let source =
        r#"<for each="rows" as="row"><for each="row.cells" as="c">{{c}}{{title}}</for>;</for>"#;
    let data = json!({"title": "T", "rows": [{"cells": [1, 2]}, {"cells": []}]});
    assert_eq!(render(source, &data).expect("renders"), "1T2T;;");

    let shadow = r#"<for each="items" as="title">{{title}}</for>{{title}}"#;
    let data = json!({"title": "outer", "items": ["a", "b"]});
    assert_eq!(render(shadow, &data).expect("renders"), "abouter");
}

#[test]
fn test_undefined_variable() {
    assert_eq!(
        render("<p>{{nobody}}</p>", &json!({})),
        Err(PreviewError::UndefinedVariable {
            name: "nobody".to_string(),
            position: Position::new(1, 4),
        })
    );
}

#[test]
fn test_missing_nested_value_renders_empty() {
    assert_eq!(
        render("[{{user.nick}}]", &json!({"user": {}})).expect("renders"),
        "[]"
    );
}

#[test]
fn test_values_display_like_the_runtime() {
    let source = "{{n}} {{b}} {{list}} {{nothing}}";
    let data = json!({"n": 3, "b": false, "list": [1, "x"], "nothing": null});
    assert_eq!(render(source, &data).expect("renders"), "3 false 1,x ");
}

#[test]
fn test_root_must_be_object() {
    assert_eq!(render("x", &json!([1])), Err(PreviewError::RootNotObject));
}

#[test]
fn test_literal_text_is_escaped_except_raw_text() {
    assert_eq!(
        render("<p>a &amp; b</p>", &json!({})).expect("renders"),
        "<p>a &amp; b</p>"
    );
    assert_eq!(
        render("<script>if (a < b) {}</script>", &json!({})).expect("renders"),
        "<script>if (a < b) {}</script>"
    );
}

#[test]
fn test_raw_text_keeps_character_references() {
    assert_eq!(
        render(r#"<script>var s = "&amp;";</script>"#, &json!({})).expect("renders"),
        r#"<script>var s = "&amp;";</script>"#
    );
}

#[test]
fn test_attributes_and_declarations() {
    assert_eq!(
        render(r#"<!DOCTYPE html><a href="?a=1&amp;b=2">x</a><br>"#, &json!({}))
            .expect("renders"),
        r#"<!DOCTYPE html><a href="?a=1&amp;b=2">x</a><br>"#
    );
}
