//! Syntax-level TypeScript declaration scanning
//!
//! Lists the top-level declarations of a `.ts`/`.tsx` file using regex
//! patterns over comment- and string-stripped source, with brace/paren depth
//! tracking to keep matching at statement level. Type annotations are
//! rendered raw, exactly as written, without resolution.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use super::{Access, DeclKind, Declaration, ExprShape, Member, MemberKind, ParseError, SourceAnalyzer};
use crate::error::Error;

/// Extensions this analyzer recognizes as TypeScript sources.
const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts"];

/// Files larger than this are treated as parse failures rather than read
/// into memory.
const MAX_ANALYZED_FILE_SIZE: u64 = 1_000_000;

// Keyword prefixes match in-line whitespace only: a keyword split from its
// declaration by a newline must not let the continuation line match again as
// a second declaration.
static FUNCTION_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(export[ \t]+)?(default[ \t]+)?(async[ \t]+)?function\b\s*\*?\s*([A-Za-z_$][A-Za-z0-9_$]*)?\s*(?:<[^>]*>)?\s*\(",
    )
    .expect("FUNCTION_HEAD regex is invalid")
});

static CLASS_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(export[ \t]+)?(default[ \t]+)?(abstract[ \t]+)?class\b[ \t]*([A-Za-z_$][A-Za-z0-9_$]*)?")
        .expect("CLASS_HEAD regex is invalid")
});

static INTERFACE_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(export[ \t]+)?interface[ \t]+([A-Za-z_$][A-Za-z0-9_$]*)")
        .expect("INTERFACE_HEAD regex is invalid")
});

static EXPORT_STAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^export\s+\*(?:\s+as\s+([A-Za-z_$][A-Za-z0-9_$]*))?\s+from\s+["']([^"']*)["']"#)
        .expect("EXPORT_STAR regex is invalid")
});

static EXPORT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^export\s+(?:type\s+)?\{([^}]*)\}").expect("EXPORT_BLOCK regex is invalid")
});

static VARIABLE_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(export[ \t]+)?(const|let|var)[ \t]+([A-Za-z_$][A-Za-z0-9_$]*)")
        .expect("VARIABLE_HEAD regex is invalid")
});

static DEFAULT_EXPR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^export\s+default\b[ \t]*(.*)").expect("DEFAULT_EXPR regex is invalid")
});

static IDENT_ARROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:async\s+)?([A-Za-z_$][A-Za-z0-9_$]*)\s*=>").expect("IDENT_ARROW regex is invalid")
});

static IDENT_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_$][A-Za-z0-9_$]*)\s*;?\s*$").expect("IDENT_ONLY regex is invalid")
});

static ASYNC_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^async\s*\(").expect("ASYNC_PAREN regex is invalid"));

static MEMBER_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(public|protected|private)[ \t]+)?(?:(static)[ \t]+)?(?:(readonly)[ \t]+)?(?:(async)[ \t]+)?(?:(get|set)[ \t]+)?\*?[ \t]*([A-Za-z_$][A-Za-z0-9_$]*)[ \t]*(\?)?[ \t]*(?:<[^>]*>[ \t]*)?([(:=;]|$)",
    )
    .expect("MEMBER_HEAD regex is invalid")
});

/// Syntax-level analyzer for TypeScript projects.
///
/// Holds the discovered project configuration as its project handle; the
/// configuration contents are not interpreted, only required to exist so a
/// scan is anchored to an actual project.
pub struct TypeScriptAnalyzer {
    config_path: PathBuf,
}

impl TypeScriptAnalyzer {
    /// Discover a `tsconfig.json` from `root` upward and return an analyzer
    /// bound to it. Fails when no configuration is found anywhere up the
    /// ancestor chain.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let mut dir = Some(root);
        while let Some(current) = dir {
            let candidate = current.join("tsconfig.json");
            if candidate.is_file() {
                return Ok(Self {
                    config_path: candidate,
                });
            }
            dir = current.parent();
        }
        Err(Error::Configuration {
            path: root.to_path_buf(),
        })
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

impl SourceAnalyzer for TypeScriptAnalyzer {
    fn supports(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| SOURCE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
            .unwrap_or(false)
    }

    fn declarations(&self, path: &Path) -> Result<Vec<Declaration>, ParseError> {
        let metadata = fs::metadata(path).map_err(|e| ParseError::new(path, e.to_string()))?;
        if metadata.len() > MAX_ANALYZED_FILE_SIZE {
            return Err(ParseError::new(path, "file exceeds the analysis size limit"));
        }
        let source = fs::read_to_string(path).map_err(|e| ParseError::new(path, e.to_string()))?;
        scan_source(&source, path)
    }
}

/// Scan one file's source text for top-level declarations.
pub(crate) fn scan_source(source: &str, path: &Path) -> Result<Vec<Declaration>, ParseError> {
    let stripped = strip_noise(source);
    let mut declarations = Vec::new();
    let mut brace_depth = 0i32;
    let mut paren_depth = 0i32;
    let mut offset = 0usize;

    for line in stripped.split_inclusive('\n') {
        let content = line.strip_suffix('\n').unwrap_or(line);
        if brace_depth == 0 && paren_depth == 0 {
            let trimmed = content.trim_start();
            let head = offset + (content.len() - trimmed.len());
            scan_statement(&stripped, source, head, &mut declarations);
        }
        for byte in content.bytes() {
            match byte {
                b'{' => brace_depth += 1,
                b'}' => brace_depth -= 1,
                b'(' => paren_depth += 1,
                b')' => paren_depth -= 1,
                _ => {}
            }
        }
        if brace_depth < 0 || paren_depth < 0 {
            return Err(ParseError::new(path, "unbalanced delimiters"));
        }
        offset += line.len();
    }

    if brace_depth != 0 || paren_depth != 0 {
        return Err(ParseError::new(path, "unbalanced delimiters"));
    }
    Ok(declarations)
}

/// Try every declaration matcher against the statement starting at `head`.
fn scan_statement(stripped: &str, source: &str, head: usize, declarations: &mut Vec<Declaration>) {
    let rest = &stripped[head..];

    if let Some(caps) = FUNCTION_HEAD.captures(rest) {
        let open = head + caps.get(0).unwrap().end() - 1;
        let Some(signature) = function_signature(stripped, source, open) else {
            return;
        };
        declarations.push(Declaration {
            name: caps.get(4).map(|m| m.as_str().to_string()),
            kind: DeclKind::Function { signature },
            exported: caps.get(1).is_some() || caps.get(2).is_some(),
            is_default: caps.get(2).is_some(),
            access: None,
        });
        return;
    }

    if let Some(caps) = CLASS_HEAD.captures(rest) {
        let Some(open) = find_body_open(stripped, head) else {
            return;
        };
        let Some(close) = find_matching(stripped, open, b'{', b'}') else {
            return;
        };
        let members = scan_class_body(stripped, source, open + 1..close);
        declarations.push(Declaration {
            name: caps.get(4).map(|m| m.as_str().to_string()),
            kind: DeclKind::Class { members },
            exported: caps.get(1).is_some() || caps.get(2).is_some(),
            is_default: caps.get(2).is_some(),
            access: None,
        });
        return;
    }

    if let Some(caps) = INTERFACE_HEAD.captures(rest) {
        declarations.push(Declaration {
            name: Some(caps[2].to_string()),
            kind: DeclKind::Interface,
            exported: caps.get(1).is_some(),
            is_default: false,
            access: None,
        });
        return;
    }

    if let Some(caps) = EXPORT_STAR.captures(rest) {
        let module_range = caps.get(2).unwrap().range();
        let module = original_text(source, stripped, shift(module_range, head));
        let display = match caps.get(1) {
            Some(alias) => format!("* as {} from \"{}\"", alias.as_str(), module),
            None => format!("* from \"{}\"", module),
        };
        declarations.push(Declaration {
            name: None,
            kind: DeclKind::Reexport { display },
            exported: true,
            is_default: false,
            access: None,
        });
        return;
    }

    if let Some(caps) = EXPORT_BLOCK.captures(rest) {
        for entry in caps[1].split(',') {
            let tokens: Vec<&str> = entry.split_whitespace().collect();
            let display = match tokens.as_slice() {
                [name] => name.to_string(),
                [name, "as", alias] => format!("{} as {}", name, alias),
                _ => continue,
            };
            declarations.push(Declaration {
                name: None,
                kind: DeclKind::Reexport { display },
                exported: true,
                is_default: false,
                access: None,
            });
        }
        return;
    }

    if let Some(caps) = VARIABLE_HEAD.captures(rest) {
        let name = &caps[3];
        if name == "enum" {
            // `const enum` declarations are outside the presentable kind set
            return;
        }
        let name_end = head + caps.get(3).unwrap().end();
        declarations.push(Declaration {
            name: Some(name.to_string()),
            kind: DeclKind::Const {
                signature: variable_annotation(stripped, source, name_end),
            },
            exported: caps.get(1).is_some(),
            is_default: false,
            access: None,
        });
        return;
    }

    if let Some(caps) = DEFAULT_EXPR.captures(rest) {
        let rhs_match = caps.get(1).unwrap();
        let rhs_start = head + rhs_match.start();
        if let Some(expr) = default_export_shape(stripped, source, rhs_start, rhs_match.as_str()) {
            declarations.push(Declaration {
                name: None,
                kind: DeclKind::DefaultExport { expr },
                exported: true,
                is_default: true,
                access: None,
            });
        }
    }
}

/// Inspect the right-hand side of `export default ...`.
fn default_export_shape(
    stripped: &str,
    source: &str,
    rhs_start: usize,
    rhs_line: &str,
) -> Option<ExprShape> {
    let rhs = rhs_line.trim_end();
    if rhs.is_empty() {
        return None;
    }

    if rhs.starts_with('(') || ASYNC_PAREN.is_match(rhs) {
        let open = rhs_start + rhs.find('(').unwrap();
        let close = find_matching(stripped, open, b'(', b')')?;
        if arrow_follows(stripped, close + 1) {
            let signature = function_signature(stripped, source, open)?;
            return Some(ExprShape::Function { signature });
        }
        // parenthesized non-function expression; fall through to literal
    } else if let Some(caps) = IDENT_ARROW.captures(rhs) {
        return Some(ExprShape::Function {
            signature: format!("({})", &caps[1]),
        });
    } else if rhs.starts_with('{') {
        return Some(ExprShape::Object);
    } else if let Some(caps) = IDENT_ONLY.captures(rhs) {
        // keyword literals parse as identifiers but are not references
        let ident = &caps[1];
        if !matches!(ident, "true" | "false" | "null" | "undefined") {
            return Some(ExprShape::Identifier(ident.to_string()));
        }
    }

    let text = original_text(source, stripped, rhs_start..rhs_start + rhs.len());
    let text = text.trim();
    let text = text.strip_suffix(';').unwrap_or(text).trim_end();
    Some(ExprShape::Literal(normalize_ws(text)))
}

/// Whether the text after a closing paren continues as an arrow function
/// (either directly with `=>` or through a return annotation).
fn arrow_follows(stripped: &str, from: usize) -> bool {
    let rest = stripped[from..].trim_start();
    rest.starts_with("=>") || rest.starts_with(':')
}

/// Scan a class body for member declarations, in source order.
fn scan_class_body(stripped: &str, source: &str, body: Range<usize>) -> Vec<Member> {
    let mut members = Vec::new();
    let mut brace_depth = 0i32;
    let mut paren_depth = 0i32;
    let mut offset = body.start;

    for line in stripped[body].split_inclusive('\n') {
        let content = line.strip_suffix('\n').unwrap_or(line);
        if brace_depth == 0 && paren_depth == 0 {
            let trimmed = content.trim_start();
            let head = offset + (content.len() - trimmed.len());
            if let Some(member) = scan_member(stripped, source, head, trimmed) {
                members.push(member);
            }
        }
        for byte in content.bytes() {
            match byte {
                b'{' => brace_depth += 1,
                b'}' => brace_depth -= 1,
                b'(' => paren_depth += 1,
                b')' => paren_depth -= 1,
                _ => {}
            }
        }
        offset += line.len();
    }
    members
}

/// Parse a single member head. Members with computed or otherwise
/// non-textual names produce no record.
fn scan_member(stripped: &str, source: &str, head: usize, trimmed: &str) -> Option<Member> {
    let caps = MEMBER_HEAD.captures(trimmed)?;

    let access = caps.get(1).map(|m| match m.as_str() {
        "private" => Access::Private,
        "protected" => Access::Protected,
        _ => Access::Public,
    });
    let is_static = caps.get(2).is_some();
    let accessor = caps.get(5).map(|m| m.as_str());
    let name = caps[6].to_string();
    let following = caps.get(8).map(|m| m.as_str()).unwrap_or("");

    if following == "(" {
        let open = head + caps.get(8).unwrap().start();
        let signature = function_signature(stripped, source, open)?;
        let kind = match accessor {
            Some("get") => MemberKind::Getter,
            Some("set") => MemberKind::Setter,
            _ if name == "constructor" => MemberKind::Constructor,
            _ => MemberKind::Method,
        };
        return Some(Member {
            name,
            kind,
            access,
            is_static,
            signature: Some(signature),
        });
    }

    // property; keep the raw annotation when one is present
    let signature = if following == ":" {
        let start = head + caps.get(8).unwrap().end();
        let end = annotation_end(stripped, start);
        let annotation = normalize_ws(original_text(source, stripped, start..end));
        (!annotation.is_empty()).then(|| format!(": {}", annotation))
    } else {
        None
    };
    Some(Member {
        name,
        kind: MemberKind::Property,
        access,
        is_static,
        signature,
    })
}

/// Render `(params)` plus an optional raw return annotation for the
/// function-like head whose parameter list opens at `open`.
fn function_signature(stripped: &str, source: &str, open: usize) -> Option<String> {
    let close = find_matching(stripped, open, b'(', b')')?;
    let params = normalize_ws(original_text(source, stripped, open + 1..close));
    let mut signature = format!("({})", params);

    let bytes = stripped.as_bytes();
    let mut i = close + 1;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b':' {
        let start = i + 1;
        let end = annotation_end(stripped, start);
        let ret = normalize_ws(original_text(source, stripped, start..end));
        if !ret.is_empty() {
            signature.push_str(": ");
            signature.push_str(&ret);
        }
    }
    Some(signature)
}

/// The type annotation following a variable name, if any.
fn variable_annotation(stripped: &str, source: &str, name_end: usize) -> Option<String> {
    let bytes = stripped.as_bytes();
    let mut i = name_end;
    while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'!') {
        i += 1;
    }
    if i >= bytes.len() || bytes[i] != b':' {
        return None;
    }
    let start = i + 1;
    let end = annotation_end(stripped, start);
    let annotation = normalize_ws(original_text(source, stripped, start..end));
    (!annotation.is_empty()).then(|| format!(": {}", annotation))
}

/// Find where a raw type annotation ends: at an assignment, a statement
/// terminator, an arrow, or the opening brace of a following body. An
/// annotation that itself starts with `{` (an object type) is consumed as a
/// balanced group first.
fn annotation_end(stripped: &str, start: usize) -> usize {
    let bytes = stripped.as_bytes();
    let mut depth = 0i32; // ( [ <
    let mut braces = 0i32;
    let mut seen_content = false;
    let mut i = start;

    while i < bytes.len() {
        let byte = bytes[i];
        match byte {
            b'(' | b'[' | b'<' => {
                depth += 1;
                seen_content = true;
            }
            b')' | b']' => {
                if depth == 0 && braces == 0 {
                    return i;
                }
                depth -= 1;
            }
            b'>' => {
                if depth > 0 {
                    depth -= 1;
                }
            }
            b'{' => {
                if braces == 0 && seen_content {
                    return i;
                }
                braces += 1;
            }
            b'}' => {
                if braces == 0 {
                    return i;
                }
                braces -= 1;
                seen_content = true;
            }
            b'=' => {
                if bytes.get(i + 1) == Some(&b'>') {
                    if depth == 0 && braces == 0 {
                        return i;
                    }
                    i += 2;
                    continue;
                }
                if depth == 0 && braces == 0 {
                    return i;
                }
            }
            b';' | b',' | b'\n' => {
                if depth == 0 && braces == 0 {
                    return i;
                }
            }
            _ => {
                if !byte.is_ascii_whitespace() {
                    seen_content = true;
                }
            }
        }
        i += 1;
    }
    bytes.len()
}

/// Offset of the `{` opening a class body, skipping heritage clauses and
/// their type arguments.
fn find_body_open(stripped: &str, from: usize) -> Option<usize> {
    let bytes = stripped.as_bytes();
    let mut depth = 0i32;
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'(' | b'[' | b'<' => depth += 1,
            b')' | b']' => depth -= 1,
            b'>' => {
                if depth > 0 && (i == 0 || bytes[i - 1] != b'=') {
                    depth -= 1;
                }
            }
            b'{' if depth == 0 => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

/// Offset of the delimiter closing the one at `open`.
fn find_matching(stripped: &str, open: usize, open_byte: u8, close_byte: u8) -> Option<usize> {
    let bytes = stripped.as_bytes();
    let mut depth = 0i32;
    for (i, &byte) in bytes.iter().enumerate().skip(open) {
        if byte == open_byte {
            depth += 1;
        } else if byte == close_byte {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

fn shift(range: Range<usize>, by: usize) -> Range<usize> {
    range.start + by..range.end + by
}

/// Read a range back out of the original source. Falls back to the stripped
/// text when the range does not land on character boundaries there.
fn original_text<'a>(source: &'a str, stripped: &'a str, range: Range<usize>) -> &'a str {
    source.get(range.clone()).unwrap_or(&stripped[range])
}

fn normalize_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Blank out comments and string/template contents while preserving byte
/// offsets, so declaration heads can be matched and delimiters counted
/// without interference. Quote characters themselves are kept.
fn strip_noise(source: &str) -> String {
    #[derive(Clone, Copy, PartialEq)]
    enum State {
        Code,
        LineComment,
        BlockComment,
        Single,
        Double,
        Template,
    }

    let bytes = source.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut state = State::Code;
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        match state {
            State::Code => {
                if byte == b'/' && bytes.get(i + 1) == Some(&b'/') {
                    state = State::LineComment;
                    out.extend_from_slice(b"  ");
                    i += 2;
                    continue;
                }
                if byte == b'/' && bytes.get(i + 1) == Some(&b'*') {
                    state = State::BlockComment;
                    out.extend_from_slice(b"  ");
                    i += 2;
                    continue;
                }
                match byte {
                    b'\'' => state = State::Single,
                    b'"' => state = State::Double,
                    b'`' => state = State::Template,
                    _ => {}
                }
                out.push(byte);
            }
            State::LineComment => {
                if byte == b'\n' {
                    state = State::Code;
                    out.push(b'\n');
                } else {
                    out.push(b' ');
                }
            }
            State::BlockComment => {
                if byte == b'*' && bytes.get(i + 1) == Some(&b'/') {
                    state = State::Code;
                    out.extend_from_slice(b"  ");
                    i += 2;
                    continue;
                }
                out.push(if byte == b'\n' { b'\n' } else { b' ' });
            }
            State::Single | State::Double | State::Template => {
                let quote = match state {
                    State::Single => b'\'',
                    State::Double => b'"',
                    _ => b'`',
                };
                if byte == b'\\' && i + 1 < bytes.len() {
                    out.extend_from_slice(b"  ");
                    i += 2;
                    continue;
                }
                if byte == quote {
                    state = State::Code;
                    out.push(byte);
                } else if byte == b'\n' {
                    // only template literals span lines
                    if state != State::Template {
                        state = State::Code;
                    }
                    out.push(b'\n');
                } else {
                    out.push(b' ');
                }
            }
        }
        i += 1;
    }

    String::from_utf8(out).expect("stripped source is valid UTF-8")
}
