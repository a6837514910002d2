use regex::Regex;
use std::sync::LazyLock;

static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap());
static STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").unwrap());
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
static OCTET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"%[a-fA-F0-9]{2}").unwrap());
static INLINE_WS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t\x0B\x0C]+").unwrap());

/// Remove markup: script/style blocks with their content, then any tag.
pub fn strip_tags(s: &str) -> String {
    let s = SCRIPT_BLOCK.replace_all(s, "");
    let s = STYLE_BLOCK.replace_all(&s, "");
    TAG.replace_all(&s, "").into_owned()
}

/// Single-line free text: no tags, no percent octets, no control characters,
/// whitespace collapsed and trimmed.
pub fn sanitize_text_field(s: &str) -> String {
    let mut stripped = strip_tags(s);
    // removing one octet can join the pieces of another
    while OCTET.is_match(&stripped) {
        stripped = OCTET.replace_all(&stripped, "").into_owned();
    }

    let mut out = String::with_capacity(stripped.len());
    let mut pending_space = false;
    for ch in stripped.chars() {
        if ch.is_whitespace() || ch.is_control() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(ch);
    }
    out
}

/// Multi-line free text: like [`sanitize_text_field`] per line, but keeps
/// line breaks (normalised to `\n`).
pub fn sanitize_textarea_field(s: &str) -> String {
    let normalised = s.replace("\r\n", "\n").replace('\r', "\n");
    let stripped = strip_tags(&normalised);

    stripped
        .split('\n')
        .map(|line| {
            let line: String = line
                .chars()
                .filter(|c| !c.is_control() || *c == '\t')
                .collect();
            INLINE_WS.replace_all(line.trim(), " ").into_owned()
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
