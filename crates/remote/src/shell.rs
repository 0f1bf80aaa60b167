// crates/remote/src/shell.rs

/// Quote `raw` for a POSIX shell as a single word.
///
/// Wraps in single quotes; an embedded `'` becomes `'\''`.
pub fn shell_quote(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('\'');
    for ch in raw.chars() {
        if ch == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
    out
}

/// Strip trailing `\n` / `\r\n` from captured output.
pub(crate) fn trim_trailing_newlines(mut text: String) -> String {
    let keep = text.trim_end_matches(['\n', '\r']).len();
    text.truncate(keep);
    text
}
