//! Structural parser for Groovy Gradle scripts.
//!
//! Gradle scripts are programs, so this only recovers their shape: closures
//! become [`Node::Block`]s, `a.b = value` becomes [`Node::Assignment`] and
//! everything else is a [`Node::Call`] of its leading identifier. Expression
//! text is kept verbatim for the typed layer in [`super::script`].

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// `name { ... }` or `name(args) { ... }`
    Block {
        name: String,
        args: String,
        body: Vec<Node>,
    },
    /// `target = value`
    Assignment { target: String, value: String },
    /// `name args` or `name(args)`
    Call { name: String, args: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradleTree {
    pub nodes: Vec<Node>,
}

impl GradleTree {
    pub fn parse(source: &str) -> Result<Self> {
        let stripped = strip_comments(source);
        let nodes = parse_nodes(&stripped)?;
        Ok(Self { nodes })
    }

    /// Every assignment and call keyed by its dotted path through the
    /// enclosing blocks, e.g. `test { reports { html.destination = x } }`
    /// yields `("test.reports.html.destination", "x")`.
    pub fn entries(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        collect_entries(&self.nodes, "", &mut out);
        out
    }

    pub fn value_of(&self, path: &str) -> Option<&str> {
        self.entries()
            .into_iter()
            .find(|(key, _)| key == path)
            .map(|(_, value)| value)
    }
}

/// Bodies of the blocks in `nodes` with the given name
pub fn blocks<'a>(nodes: &'a [Node], name: &'a str) -> impl Iterator<Item = &'a [Node]> + 'a {
    nodes.iter().filter_map(move |node| match node {
        Node::Block { name: n, body, .. } if n == name => Some(body.as_slice()),
        _ => None,
    })
}

/// Argument text of the calls in `nodes` with the given name
pub fn calls<'a>(nodes: &'a [Node], name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    nodes.iter().filter_map(move |node| match node {
        Node::Call { name: n, args } if n == name => Some(args.as_str()),
        _ => None,
    })
}

fn collect_entries<'a>(nodes: &'a [Node], prefix: &str, out: &mut Vec<(String, &'a str)>) {
    let join = |name: &str| {
        if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}.{name}")
        }
    };

    for node in nodes {
        match node {
            Node::Block { name, body, .. } => collect_entries(body, &join(name), out),
            Node::Assignment { target, value } => out.push((join(target), value)),
            Node::Call { name, args } => out.push((join(name), args)),
        }
    }
}

fn parse_nodes(src: &str) -> Result<Vec<Node>> {
    let bytes = src.as_bytes();
    let mut nodes = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' => {
                i = skip_string(bytes, i)?;
                continue;
            }
            b'(' | b'[' => depth += 1,
            b')' | b']' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| Error::ParseError(format!("unbalanced '{}'", bytes[i] as char)))?;
            }
            b'{' => {
                let close = matching_brace(bytes, i)?;
                if depth == 0 {
                    let header = src[start..i].trim();
                    let body = parse_nodes(&src[i + 1..close])?;
                    nodes.push(block_node(header, body));
                    start = close + 1;
                }
                i = close + 1;
                continue;
            }
            b'}' => return Err(Error::ParseError("unbalanced '}'".to_string())),
            b'\n' | b';' if depth == 0 => {
                let stmt = src[start..i].trim();
                let opens_block = !stmt.is_empty() && brace_follows(bytes, i);
                let joins = bytes[i] == b'\n' && (continues_on_next_line(stmt) || opens_block);
                if !joins {
                    push_statement(&mut nodes, stmt);
                    start = i + 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    if depth != 0 {
        return Err(Error::ParseError("unclosed '(' or '['".to_string()));
    }
    push_statement(&mut nodes, src[start..].trim());
    Ok(nodes)
}

fn continues_on_next_line(stmt: &str) -> bool {
    [",", "+", "=", "&&", "||", ":", "->"]
        .iter()
        .any(|suffix| stmt.ends_with(suffix))
}

/// Whether the next non-blank character after `at` opens a block
fn brace_follows(bytes: &[u8], at: usize) -> bool {
    bytes[at..].iter().find(|b| !b.is_ascii_whitespace()) == Some(&b'{')
}

fn block_node(header: &str, body: Vec<Node>) -> Node {
    let (name, args) = split_head(header);
    Node::Block { name, args, body }
}

fn push_statement(nodes: &mut Vec<Node>, stmt: &str) {
    if stmt.is_empty() {
        return;
    }

    if let Some(eq) = top_level_assignment(stmt) {
        let target = stmt[..eq].trim();
        if is_property_path(target) {
            nodes.push(Node::Assignment {
                target: target.to_string(),
                value: stmt[eq + 1..].trim().to_string(),
            });
            return;
        }
    }

    let (name, args) = split_head(stmt);
    nodes.push(Node::Call { name, args });
}

/// Split `name(args)` or `name args` into its parts
fn split_head(text: &str) -> (String, String) {
    let name_end = text
        .find(|c: char| c.is_whitespace() || c == '(')
        .unwrap_or(text.len());
    let name = text[..name_end].to_string();
    let rest = text[name_end..].trim();
    let args = rest
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .unwrap_or(rest)
        .trim()
        .to_string();
    (name, args)
}

fn top_level_assignment(stmt: &str) -> Option<usize> {
    let bytes = stmt.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' => {
                i = skip_string(bytes, i).ok()?;
                continue;
            }
            b'(' | b'[' => depth += 1,
            b')' | b']' => depth = depth.saturating_sub(1),
            b'=' if depth == 0 => {
                let prev = i.checked_sub(1).map(|p| bytes[p]);
                let next = bytes.get(i + 1).copied();
                let compound = matches!(
                    prev,
                    Some(b'=' | b'!' | b'<' | b'>' | b'+' | b'-' | b'*' | b'/' | b'?')
                );
                if !compound && next != Some(b'=') && next != Some(b'~') {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn is_property_path(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '$')
}

/// Index just past the string literal opening at `open`.
///
/// Single-line literals cannot span lines, so an unterminated one ends at
/// its newline and only that statement is affected.
fn skip_string(bytes: &[u8], open: usize) -> Result<usize> {
    let quote = bytes[open];
    let triple = bytes.get(open + 1) == Some(&quote) && bytes.get(open + 2) == Some(&quote);

    if triple {
        let mut i = open + 3;
        while i + 2 < bytes.len() {
            if bytes[i..i + 3] == [quote; 3] {
                return Ok(i + 3);
            }
            i += 1;
        }
        return Err(Error::ParseError("unterminated triple-quoted string".to_string()));
    }

    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return Ok(i),
            b if b == quote => return Ok(i + 1),
            _ => i += 1,
        }
    }
    Err(Error::ParseError("unterminated string literal".to_string()))
}

/// Whether the `/` at `slash` opens a slashy string that starts at
/// `start` (`start` is the `$` of a dollar-slashy one). Division needs an
/// operand on its left.
fn starts_slashy(bytes: &[u8], start: usize, slash: usize) -> bool {
    if matches!(bytes.get(slash + 1), Some(b'/' | b'*') | None) {
        return false;
    }
    let prev = bytes[..start].iter().rev().find(|b| !b.is_ascii_whitespace());
    match prev {
        None => true,
        Some(b) => b"=(,:[{;!&|?~".contains(b),
    }
}

/// End of the slashy (`/.../`) or dollar-slashy (`$/.../$`) string whose
/// body starts at `body`, as (body end, index past the closing delimiter)
fn slashy_end(bytes: &[u8], body: usize, dollar: bool) -> Option<(usize, usize)> {
    let mut i = body;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if !dollar && bytes.get(i + 1) == Some(&b'/') => i += 2,
            b'$' if dollar && matches!(bytes.get(i + 1), Some(b'/' | b'$')) => i += 2,
            b'/' if !dollar => return Some((i, i + 1)),
            b'/' if dollar && bytes.get(i + 1) == Some(&b'$') => return Some((i, i + 2)),
            _ => i += 1,
        }
    }
    None
}

/// Re-quote a slashy string body as a double-quoted literal
fn push_slashy_as_quoted(out: &mut String, body: &str) {
    out.push('"');
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'/') => {}
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
}

fn matching_brace(bytes: &[u8], open: usize) -> Result<usize> {
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' => {
                i = skip_string(bytes, i)?;
                continue;
            }
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    Err(Error::ParseError("unclosed '{'".to_string()))
}

/// Remove `//` and `/* */` comments, leaving string literals intact.
/// Slashy strings are rewritten as double-quoted ones so that later passes
/// only deal with quotes.
fn strip_comments(source: &str) -> String {
    let bytes = source.as_bytes();
    let mut out = String::with_capacity(source.len());
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' => {
                let end = skip_string(bytes, i).unwrap_or(bytes.len()).min(bytes.len());
                out.push_str(&source[start..end]);
                start = end;
                i = end;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                out.push_str(&source[start..i]);
                i = bytes[i..]
                    .iter()
                    .position(|&b| b == b'\n')
                    .map_or(bytes.len(), |n| i + n);
                start = i;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                out.push_str(&source[start..i]);
                let end = source[i + 2..].find("*/").map_or(bytes.len(), |n| i + 2 + n + 2);
                out.extend(source[i..end].chars().filter(|&c| c == '\n'));
                start = end;
                i = end;
            }
            b'/' | b'$' => {
                let dollar = bytes[i] == b'$';
                let slash = if dollar { i + 1 } else { i };
                let opens = (!dollar || bytes.get(slash) == Some(&b'/'))
                    && starts_slashy(bytes, i, slash);
                match opens.then(|| slashy_end(bytes, slash + 1, dollar)).flatten() {
                    Some((body_end, end)) => {
                        out.push_str(&source[start..i]);
                        push_slashy_as_quoted(&mut out, &source[slash + 1..body_end]);
                        start = end;
                        i = end;
                    }
                    None => i += 1,
                }
            }
            _ => i += 1,
        }
    }

    out.push_str(&source[start..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blocks_calls_and_assignments() {
        let tree = GradleTree::parse(
            r#"
buildscript {
    repositories { mavenCentral() }
    dependencies {
        classpath 'io.openliberty.tools:liberty-gradle-plugin:3.1'
    }
}
apply plugin: 'liberty'
rootProject.name = "demo"
"#,
        )
        .unwrap();

        assert_eq!(tree.nodes.len(), 3);
        let buildscript: Vec<_> = blocks(&tree.nodes, "buildscript").collect();
        assert_eq!(buildscript.len(), 1);
        let deps: Vec<_> = blocks(buildscript[0], "dependencies")
            .flat_map(|d| calls(d, "classpath"))
            .collect();
        assert_eq!(deps, vec!["'io.openliberty.tools:liberty-gradle-plugin:3.1'"]);

        assert_eq!(calls(&tree.nodes, "apply").collect::<Vec<_>>(), vec!["plugin: 'liberty'"]);
        assert_eq!(tree.value_of("rootProject.name"), Some("\"demo\""));
    }

    #[test]
    fn test_comments_and_strings_do_not_confuse_structure() {
        let tree = GradleTree::parse(
            r#"
// apply plugin: 'commented'
/* subprojects {
   apply plugin: 'liberty'
} */
description = 'braces { in } strings // are fine'
"#,
        )
        .unwrap();

        assert_eq!(
            tree.nodes,
            vec![Node::Assignment {
                target: "description".to_string(),
                value: "'braces { in } strings // are fine'".to_string(),
            }]
        );
    }

    #[test]
    fn test_nested_entries_compose_paths() {
        let tree = GradleTree::parse(
            r#"
test {
    reports {
        html.destination = file("$buildDir/reports/custom")
    }
}
test.reports.junitXml.enabled = true
"#,
        )
        .unwrap();

        assert_eq!(
            tree.value_of("test.reports.html.destination"),
            Some("file(\"$buildDir/reports/custom\")")
        );
        assert_eq!(tree.value_of("test.reports.junitXml.enabled"), Some("true"));
    }

    #[test]
    fn test_multiline_arguments_stay_in_one_statement() {
        let tree = GradleTree::parse("include 'a',\n        'b'\ninclude('c')\n").unwrap();
        assert_eq!(
            calls(&tree.nodes, "include").collect::<Vec<_>>(),
            vec!["'a',\n        'b'", "'c'"]
        );
    }

    #[test]
    fn test_comparisons_are_not_assignments() {
        let tree = GradleTree::parse("if (version == '1') {\n  foo = 2\n}\n").unwrap();
        match &tree.nodes[0] {
            Node::Block { name, args, body } => {
                assert_eq!(name, "if");
                assert_eq!(args, "version == '1'");
                assert_eq!(body.len(), 1);
            }
            other => panic!("expected block, got {other:?}"),
        }
    }

    #[test]
    fn test_braces_on_the_next_line_open_blocks() {
        let tree = GradleTree::parse(
            "buildscript\n{\n    dependencies\n    {\n        classpath 'g:n:1'\n    }\n}\napply plugin: 'liberty'\n",
        )
        .unwrap();

        assert_eq!(tree.nodes.len(), 2);
        let deps: Vec<_> = blocks(&tree.nodes, "buildscript")
            .flat_map(|b| blocks(b, "dependencies"))
            .flat_map(|d| calls(d, "classpath"))
            .collect();
        assert_eq!(deps, vec!["'g:n:1'"]);
    }

    #[test]
    fn test_slashy_strings_are_requoted() {
        let tree = GradleTree::parse(
            "def pattern = /it's a \\/regex/\ndef other = $/don't \"stop\"/$\nratio = total / 2\n",
        )
        .unwrap();

        assert_eq!(
            calls(&tree.nodes, "def").collect::<Vec<_>>(),
            vec![r#"pattern = "it's a /regex""#, r#"other = "don't \"stop\"""#]
        );
        assert_eq!(tree.value_of("ratio"), Some("total / 2"));
    }

    #[test]
    fn test_unterminated_quote_only_spoils_its_line() {
        let tree = GradleTree::parse("description = 'oops\napply plugin: 'liberty'\n").unwrap();
        assert_eq!(
            calls(&tree.nodes, "apply").collect::<Vec<_>>(),
            vec!["plugin: 'liberty'"]
        );
    }

    #[test]
    fn test_unbalanced_input_is_an_error() {
        assert!(GradleTree::parse("subprojects {\n apply plugin: 'liberty'\n").is_err());
        assert!(GradleTree::parse("}").is_err());
        assert!(GradleTree::parse("apply plugin: 'liberty").is_err());
    }
}
