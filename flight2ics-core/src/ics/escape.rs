//! RFC 5545 TEXT escaping and content-line folding.

/// Longest content line allowed before folding, excluding the CRLF.
pub const MAX_LINE_OCTETS: usize = 75;

/// Escape a TEXT property value.
pub fn escape_text(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace("\r\n", "\\n")
        .replace('\r', "\\n")
        .replace('\n', "\\n")
}

/// Reverse `escape_text`. Unknown escapes are kept as-is.
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => result.push('\n'),
            Some(escaped @ ('\\' | ';' | ',')) => result.push(escaped),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}

/// Fold a content line so no physical line exceeds 75 octets.
///
/// Continuation lines start with a single space, which counts toward the
/// limit. Multi-byte characters are never split.
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut folded = String::with_capacity(line.len() + 3 * (line.len() / MAX_LINE_OCTETS));
    let mut octets = 0;

    for c in line.chars() {
        let width = c.len_utf8();
        if octets + width > MAX_LINE_OCTETS {
            folded.push_str("\r\n ");
            octets = 1;
        }
        folded.push(c);
        octets += width;
    }

    folded
}
