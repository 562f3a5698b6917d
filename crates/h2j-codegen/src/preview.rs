//! Data preview: runs a [`Program`] against JSON data and returns the HTML
//! the generated code would build, with the same truthiness and value
//! display rules as the runtime library.

use std::collections::HashMap;

use h2j_common::escape;
use h2j_html::is_raw_text_element;
use serde_json::{Number, Value};

use crate::context::Context;
use crate::error::PreviewError;
use crate::instruction::{Instruction, Program};

/// `null`, missing, `false`, `0`, `""` and `[]` are falsy.
#[must_use]
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|x| x.abs() > 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(_)) => true,
    }
}

/// The text a bound value renders as.
#[must_use]
pub fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => display_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(display).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// JavaScript prints integral doubles without a fraction: `String(1.0)` is
/// `"1"` and `String(-0)` is `"0"`.
fn display_number(n: &Number) -> String {
    match n.as_f64() {
        Some(x) if n.is_f64() && x.fract().abs() < f64::MIN_POSITIVE && x.abs() < 1e21 => {
            format!("{:.0}", x + 0.0)
        }
        _ => n.to_string(),
    }
}

struct Renderer<'p> {
    instructions: &'p [Instruction],
    /// Matching end index of every control block.
    ends: Vec<Option<usize>>,
    /// Last evaluated value of every `if` condition, by local name.
    conditions: HashMap<&'p str, bool>,
    open_tags: Vec<&'p str>,
    out: String,
}

impl Renderer<'_> {
    fn in_raw_text(&self) -> bool {
        self.open_tags
            .last()
            .copied()
            .is_some_and(is_raw_text_element)
    }

    /// Run instructions `start..end`.
    fn run(
        &mut self,
        context: &mut Context<'_>,
        start: usize,
        end: usize,
    ) -> Result<(), PreviewError> {
        let instructions = self.instructions;
        let mut pc = start;
        while pc < end {
            match &instructions[pc] {
                Instruction::Declaration { content } => {
                    self.out.push_str("<!");
                    self.out.push_str(content);
                    self.out.push('>');
                }
                Instruction::OpenElement {
                    tag,
                    attributes,
                    is_void,
                    ..
                } => {
                    self.out.push('<');
                    self.out.push_str(tag);
                    for (name, value) in attributes {
                        self.out.push(' ');
                        self.out.push_str(name);
                        self.out.push_str("=\"");
                        self.out.push_str(&escape(value));
                        self.out.push('"');
                    }
                    self.out.push('>');
                    if !is_void {
                        self.open_tags.push(tag.as_str());
                    }
                }
                Instruction::CloseElement { tag } => {
                    let _ = self.open_tags.pop();
                    self.out.push_str("</");
                    self.out.push_str(tag);
                    self.out.push('>');
                }
                Instruction::Text { content, .. } => {
                    if self.in_raw_text() {
                        self.out.push_str(content);
                    } else {
                        self.out.push_str(&escape(content));
                    }
                }
                Instruction::BoundText { path, position, .. } => {
                    let name = path.first().map_or("", String::as_str);
                    if context.lookup(name).is_none() {
                        return Err(PreviewError::UndefinedVariable {
                            name: name.to_string(),
                            position: *position,
                        });
                    }
                    let text = context.resolve(path).map(display).unwrap_or_default();
                    self.out.push_str(&escape(&text));
                }
                Instruction::BeginIf {
                    ident, condition, ..
                } => {
                    let close = self.ends[pc].unwrap_or(end);
                    let truthy = is_truthy(context.resolve(condition));
                    let _ = self.conditions.insert(ident.as_str(), truthy);
                    if truthy {
                        self.run(context, pc + 1, close)?;
                    }
                    pc = close;
                }
                Instruction::BeginElse { condition } => {
                    let close = self.ends[pc].unwrap_or(end);
                    let if_taken = self
                        .conditions
                        .get(condition.as_str())
                        .copied()
                        .unwrap_or(false);
                    if !if_taken {
                        self.run(context, pc + 1, close)?;
                    }
                    pc = close;
                }
                Instruction::BeginFor {
                    collection,
                    item,
                    position,
                    ..
                } => {
                    let close = self.ends[pc].unwrap_or(end);
                    let items = match context.resolve(collection) {
                        None | Some(Value::Null) => Vec::new(),
                        Some(Value::Array(items)) => items.clone(),
                        Some(_) => {
                            return Err(PreviewError::NotIterable {
                                path: collection.join("."),
                                position: *position,
                            });
                        }
                    };
                    for value in items {
                        context.push(item.clone(), value);
                        let result = self.run(context, pc + 1, close);
                        context.pop();
                        result?;
                    }
                    pc = close;
                }
                Instruction::EndIf | Instruction::EndElse | Instruction::EndFor => {}
            }
            pc += 1;
        }
        Ok(())
    }
}

/// Render `program` against `data`.
///
/// # Errors
///
/// Returns a [`PreviewError`] when `data` is not an object, a binding names
/// an undefined variable, or a loop collection is not a list.
pub fn preview(program: &Program, data: &Value) -> Result<String, PreviewError> {
    let mut context = Context::new(data)?;
    let mut renderer = Renderer {
        instructions: program.instructions(),
        ends: program.block_ends(),
        conditions: HashMap::new(),
        open_tags: Vec::new(),
        out: String::new(),
    };
    renderer.run(&mut context, 0, program.len())?;
    Ok(renderer.out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([])] {
            assert!(!is_truthy(Some(&falsy)), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(1), json!("0"), json!([0]), json!({})] {
            assert!(is_truthy(Some(&truthy)), "{truthy} should be truthy");
        }
        assert!(!is_truthy(None));
    }

    #[test]
    fn test_display() {
        assert_eq!(display(&json!(null)), "");
        assert_eq!(display(&json!(42)), "42");
        assert_eq!(display(&json!([1, null, "x"])), "1,,x");
        assert_eq!(display(&json!({"a": 1})), "[object Object]");
    }

    #[test]
    fn test_display_numbers_like_javascript() {
        assert_eq!(display(&json!(1.0)), "1");
        assert_eq!(display(&json!(-0.0)), "0");
        assert_eq!(display(&json!(-3.0)), "-3");
        assert_eq!(display(&json!(2.5)), "2.5");
        assert_eq!(display(&json!([1.0, 1.5])), "1,1.5");
    }
}
