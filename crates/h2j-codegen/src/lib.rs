//! Code generation for html2js.
//!
//! Two independent renderers share the node tree:
//!
//! - [`to_html`] serializes the tree back to static markup.
//! - [`Generator`] walks the tree into a [`Program`], which
//!   [`emit_javascript`] lowers into a `render(data, target)` function and
//!   [`preview`] can run against JSON data.
//!
//! [`compile`] does all of it for one source document.

/// Data context used by [`preview`].
pub mod context;
/// Generation and preview errors.
pub mod error;
/// Tree walk producing instructions.
pub mod generator;
/// Instruction set and programs.
pub mod instruction;
/// JavaScript emission.
pub mod javascript;
/// Program interpreter over JSON data.
pub mod preview;
/// Static HTML serialization.
pub mod static_html;

use h2j_dom::CustomElementRegistry;

pub use error::{GenerateError, PreviewError};
pub use generator::Generator;
pub use instruction::{Instruction, Program};
pub use javascript::emit_javascript;
pub use preview::preview;
pub use static_html::to_html;

/// The runtime support library the generated code calls into.
pub const RUNTIME_JS: &str = include_str!("../runtime/h2j.js");

/// Everything produced from one source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    /// The document re-serialized as static HTML.
    pub static_html: String,
    /// The generated instruction sequence.
    pub program: Program,
    /// The JavaScript `render` function.
    pub code: String,
}

/// Compile `source` with the built-in element registry.
///
/// # Errors
///
/// Returns the first [`GenerateError`] in document order. Malformed markup
/// never fails; it is recovered while parsing.
pub fn compile(source: &str) -> Result<Compilation, GenerateError> {
    compile_with_registry(source, CustomElementRegistry::global())
}

/// Compile `source`, creating elements through `registry`.
///
/// # Errors
///
/// Returns the first [`GenerateError`] in document order.
pub fn compile_with_registry(
    source: &str,
    registry: &CustomElementRegistry,
) -> Result<Compilation, GenerateError> {
    let tree = h2j_html::parse_with_registry(source, registry);
    let static_html = to_html(&tree);
    let program = Generator::new().generate(&tree)?;
    let code = emit_javascript(&program);
    Ok(Compilation {
        static_html,
        program,
        code,
    })
}
