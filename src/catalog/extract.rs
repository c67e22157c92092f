//! Command extraction from plugin source
//!
//! Recovers chat-command definitions from a plugin's `main.py` by scanning
//! for the command-registration decorator and the decorated function's
//! leading docstring:
//!
//! ```text
//! @filter.command("查番")
//! async def search_anime(self, event):
//!     '''查询番剧信息
//!     用法：/查番 番剧名称'''
//! ```
//!
//! The inspected source is foreign text (Python), so there is no syntax tree
//! to query from Rust. The scan is a tolerant line-oriented structural pass
//! restricted to the documented decorator shape: decorator line, `async def`
//! header (other decorators in between are fine, anything else clears the
//! match), optional docstring. Arbitrarily reformatted input may not be
//! recognized; unscannable input yields zero commands rather than an error.

use super::types::CommandInfo;

/// Decorator prefix that registers a chat command.
const COMMAND_DECORATOR: &str = "@filter.command(";

/// Usage-hint labels recognized at the start of a docstring line.
const USAGE_LABELS: [&str; 2] = ["用法：", "Usage:"];

/// Extract command records from plugin source text, in declaration order.
///
/// Commands without a resolvable literal name are skipped. Only asynchronous
/// function definitions are considered.
pub fn extract_commands(source: &str) -> Vec<CommandInfo> {
    let lines: Vec<&str> = source.lines().collect();
    let mut commands = Vec::new();
    let mut pending: Option<String> = None;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].trim();

        if let Some(rest) = line.strip_prefix(COMMAND_DECORATOR) {
            pending = parse_literal(rest);
            i += 1;
            continue;
        }

        // Other decorators may sit between the command decorator and the def.
        if line.starts_with('@') {
            i += 1;
            continue;
        }

        if line.starts_with("async def ") {
            if let Some(name) = pending.take() {
                // Tolerate signatures spanning multiple lines; the docstring
                // starts after the line that closes the header with a colon.
                let mut header_end = i;
                while header_end < lines.len() && !lines[header_end].trim_end().ends_with(':') {
                    header_end += 1;
                }
                let (doc, next) = read_docstring(&lines, header_end + 1);
                let (description, usage) = split_doc(&doc);
                commands.push(CommandInfo {
                    name,
                    description,
                    usage,
                });
                i = next.max(header_end + 1);
                continue;
            }
            i += 1;
            continue;
        }

        // Any other statement breaks decorator/def adjacency.
        if !line.is_empty() {
            pending = None;
        }
        i += 1;
    }

    commands
}

/// Parse the decorator's first argument as a quoted string literal.
///
/// Returns `None` for non-literal arguments (variables, calls) and for empty
/// literals; such commands are skipped entirely.
fn parse_literal(args: &str) -> Option<String> {
    let args = args.trim_start();
    let quote = args.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let rest = &args[quote.len_utf8()..];
    let end = rest.find(quote)?;
    let name = &rest[..end];
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Read a leading docstring starting at `start`, skipping blank lines.
///
/// Returns the raw docstring body and the index of the first line after it.
/// A function without a docstring yields an empty body.
fn read_docstring(lines: &[&str], start: usize) -> (String, usize) {
    let mut i = start;
    while i < lines.len() && lines[i].trim().is_empty() {
        i += 1;
    }
    let Some(first) = lines.get(i) else {
        return (String::new(), start);
    };

    let first = first.trim();
    let delim = if first.starts_with("\"\"\"") {
        "\"\"\""
    } else if first.starts_with("'''") {
        "'''"
    } else {
        return (String::new(), start);
    };

    let after = &first[delim.len()..];
    if let Some(end) = after.find(delim) {
        // Single-line docstring.
        return (after[..end].to_string(), i + 1);
    }

    let mut body: Vec<String> = Vec::new();
    if !after.is_empty() {
        body.push(after.to_string());
    }
    i += 1;
    while i < lines.len() {
        if let Some(end) = lines[i].find(delim) {
            body.push(lines[i][..end].to_string());
            i += 1;
            break;
        }
        body.push(lines[i].to_string());
        i += 1;
    }
    (body.join("\n"), i)
}

/// Split a docstring into description and usage hint.
///
/// The first non-empty line is the description. Among the remaining lines,
/// the first one beginning with a usage label is taken verbatim (trimmed);
/// search stops at the first match. Docstrings written on a single source
/// line with literal `\n` escapes are normalized first.
fn split_doc(doc: &str) -> (String, String) {
    let normalized = doc.replace("\\n", "\n");
    let mut lines = normalized
        .lines()
        .map(str::trim)
        .skip_while(|line| line.is_empty());

    let description = lines.next().unwrap_or("").to_string();
    let mut usage = String::new();
    for line in lines {
        if USAGE_LABELS.iter().any(|label| line.starts_with(label)) {
            usage = line.to_string();
            break;
        }
    }
    (description, usage)
}
