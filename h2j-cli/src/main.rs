//! html2js command-line compiler
//!
//! Compiles an HTML template into a JavaScript `render(data, target)`
//! function and writes it next to the input.
//!
//! Debug output:
//! - `--dump-tree`: the parsed node tree plus any recovered parse issues
//! - `--dump-instructions`: the generated instruction listing
//! - `--data FILE`: the HTML the code would build for a JSON data file

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use h2j_codegen::{Compilation, RUNTIME_JS, compile, preview};
use h2j_common::warning::{clear_warnings, warning_count};
use h2j_html::{format_tree, parse_with_issues};
use owo_colors::OwoColorize;
use serde_json::Value;

/// Extension of the generated code file.
const OUTPUT_EXTENSION: &str = "js";

/// html2js: compile HTML templates with {{bindings}} and <if>/<else>/<for>
/// into JavaScript
#[derive(Parser, Debug)]
#[command(name = "html2js")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Write page.js next to page.html
    html2js page.html

    # Bundle the runtime library into the output
    html2js --runtime -o dist/page.js page.html

    # Print the static HTML instead of writing code
    html2js --html page.html

    # Preview the page against sample data
    html2js --data sample.json page.html
"#)]
struct Cli {
    /// Template to compile
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Where to write the generated code (default: INPUT with a .js extension)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Print the static HTML rendering instead of writing code
    #[arg(long)]
    html: bool,

    /// Prepend the runtime support library to the generated code
    #[arg(long)]
    runtime: bool,

    /// Print the parsed node tree
    #[arg(long)]
    dump_tree: bool,

    /// Print the generated instruction listing
    #[arg(long)]
    dump_instructions: bool,

    /// Render the template against a JSON data file and print the HTML
    #[arg(long, value_name = "JSON-FILE")]
    data: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    clear_warnings();

    let source = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    if cli.dump_tree {
        print_tree_with_issues(&source);
    }

    let compilation = compile(&source)?;
    report_warnings(&cli.input);

    if cli.dump_instructions {
        println!("{}", "=== Instructions ===".bold());
        print!("{}", compilation.program);
    }

    if let Some(ref data_path) = cli.data {
        let data = read_data(data_path)?;
        let html = preview(&compilation.program, &data)?;
        println!("{}", "=== Preview ===".bold());
        println!("{html}");
    }

    if cli.html {
        println!("{}", compilation.static_html);
        return Ok(());
    }

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input));
    fs::write(&output, output_code(&compilation, cli.runtime))
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("Generated code saved to: {}", output.display());

    Ok(())
}

/// `page.html` becomes `page.js`; a path without an extension gains one.
fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension(OUTPUT_EXTENSION)
}

/// The text written to the output file.
fn output_code(compilation: &Compilation, with_runtime: bool) -> String {
    if with_runtime {
        format!("{RUNTIME_JS}\n{}", compilation.code)
    } else {
        compilation.code.clone()
    }
}

fn read_data(path: &Path) -> anyhow::Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// One summary line when markup had to be recovered while parsing.
fn report_warnings(input: &Path) {
    let count = warning_count();
    if count > 0 {
        let summary = format!("{}: {count} markup warning(s)", input.display());
        eprintln!("{}", summary.yellow());
    }
}

fn print_tree_with_issues(source: &str) {
    let (tree, issues) = parse_with_issues(source);
    println!("{}", "=== Node Tree ===".bold());
    print!("{}", format_tree(&tree, tree.root()));

    if !issues.is_empty() {
        println!("\n{}", "=== Parse Issues ===".bold());
        for issue in &issues {
            println!("  {}", issue.yellow());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path_replaces_extension() {
        assert_eq!(
            default_output_path(Path::new("pages/index.html")),
            PathBuf::from("pages/index.js")
        );
        assert_eq!(
            default_output_path(Path::new("template")),
            PathBuf::from("template.js")
        );
    }

    #[test]
    fn test_output_code_optionally_bundles_runtime() {
        let compilation = compile("<p>{{x}}</p>").expect("compiles");
        assert_eq!(output_code(&compilation, false), compilation.code);
        let bundled = output_code(&compilation, true);
        assert!(bundled.starts_with(RUNTIME_JS));
        assert!(bundled.ends_with(&compilation.code));
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "html2js",
            "page.html",
            "-o",
            "out.js",
            "--runtime",
            "--dump-instructions",
            "--data",
            "sample.json",
        ])
        .expect("valid arguments");
        assert_eq!(cli.input, PathBuf::from("page.html"));
        assert_eq!(cli.output, Some(PathBuf::from("out.js")));
        assert!(cli.runtime && cli.dump_instructions);
        assert!(!cli.html && !cli.dump_tree);
        assert_eq!(cli.data, Some(PathBuf::from("sample.json")));
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Cli::try_parse_from(["html2js"]).is_err());
    }
}
