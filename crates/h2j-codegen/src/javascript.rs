//! JavaScript emission.
//!
//! Lowers a [`Program`] into a `render(data, target)` function written
//! against the runtime library in [`RUNTIME_JS`](crate::RUNTIME_JS).
//! Elements append to the innermost open element, or to `target` at top
//! level. A `for` block becomes an `h2j.each` callback that receives the
//! iteration scope and a fragment to append to.

use h2j_dom::AttributesMap;

use crate::instruction::{Instruction, Program};

const INDENT: &str = "    ";

/// Quote `s` as a JavaScript string literal.
///
/// `<` is written as `\u003c` so the output can be inlined into a
/// `<script>` element.
#[must_use]
pub fn string_lit(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '<' | '\u{2028}' | '\u{2029}' => out.push_str(&format!("\\u{:04x}", u32::from(ch))),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn path_lit(path: &[String]) -> String {
    let parts: Vec<String> = path.iter().map(|p| string_lit(p)).collect();
    format!("[{}]", parts.join(", "))
}

fn attributes_lit(attributes: &AttributesMap) -> String {
    if attributes.is_empty() {
        return "{}".to_string();
    }
    let parts: Vec<String> = attributes
        .iter()
        .map(|(name, value)| format!("{}: {}", string_lit(name), string_lit(value)))
        .collect();
    format!("{{{}}}", parts.join(", "))
}

struct Emitter {
    out: String,
    depth: usize,
    /// Local names of the elements currently receiving children.
    parents: Vec<String>,
}

impl Emitter {
    fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
            parents: vec!["target".to_string()],
        }
    }

    fn parent(&self) -> &str {
        self.parents.last().map_or("target", String::as_str)
    }

    fn line(&mut self, code: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(code);
        self.out.push('\n');
    }

    fn open(&mut self, code: &str) {
        self.line(code);
        self.depth += 1;
    }

    fn close(&mut self, code: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(code);
    }

    fn instruction(&mut self, instruction: &Instruction) {
        match instruction {
            Instruction::Declaration { content } => {
                let code = format!("h2j.declaration({}, {});", self.parent(), string_lit(content));
                self.line(&code);
            }
            Instruction::OpenElement {
                ident,
                tag,
                attributes,
                is_void,
            } => {
                let code = format!(
                    "var {ident} = h2j.element({}, {}, {});",
                    self.parent(),
                    string_lit(tag),
                    attributes_lit(attributes)
                );
                self.line(&code);
                if !is_void {
                    self.parents.push(ident.clone());
                }
            }
            Instruction::CloseElement { .. } => {
                let _ = self.parents.pop();
            }
            Instruction::Text { ident, content } => {
                let code = format!(
                    "var {ident} = h2j.text({}, {});",
                    self.parent(),
                    string_lit(content)
                );
                self.line(&code);
            }
            Instruction::BoundText { ident, path, .. } => {
                let code = format!(
                    "var {ident} = h2j.bind({}, scope, {});",
                    self.parent(),
                    path_lit(path)
                );
                self.line(&code);
            }
            Instruction::BeginIf {
                ident, condition, ..
            } => {
                self.line(&format!(
                    "var {ident} = h2j.test(scope.get({}));",
                    path_lit(condition)
                ));
                self.open(&format!("if ({ident}) {{"));
            }
            Instruction::BeginElse { condition } => self.open(&format!("if (!{condition}) {{")),
            Instruction::EndIf | Instruction::EndElse => self.close("}"),
            Instruction::BeginFor {
                collection, item, ..
            } => {
                let code = format!(
                    "h2j.each({}, scope, {}, {}, function (scope, fragment) {{",
                    self.parent(),
                    path_lit(collection),
                    string_lit(item)
                );
                self.open(&code);
                self.parents.push("fragment".to_string());
            }
            Instruction::EndFor => {
                let _ = self.parents.pop();
                self.close("});");
            }
        }
    }
}

/// Emit the `render(data, target)` function for `program`.
///
/// The function builds the DOM under `target` and returns the root scope;
/// `scope.set(path, value)` re-renders the text bound to `path`.
#[must_use]
pub fn emit_javascript(program: &Program) -> String {
    let mut emitter = Emitter::new();
    emitter.line("// Generated by html2js. Requires the h2j runtime library.");
    emitter.open("function render(data, target) {");
    emitter.line("var scope = h2j.scope(data);");
    for instruction in program.instructions() {
        emitter.instruction(instruction);
    }
    emitter.line("return scope;");
    emitter.close("}");
    emitter.out
}
