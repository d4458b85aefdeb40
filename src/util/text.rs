use std::borrow::Cow;

/// Residual mojibake sequences and the punctuation they stand for.
///
/// Each left-hand side is a UTF-8 punctuation sequence as it reads after a
/// Latin-1 mis-decode (lead byte U+00E2, then two continuation bytes kept as
/// C1 controls). [`repair_mojibake`] cannot fix these when the surrounding
/// string also contains characters above U+00FF, so they are replaced
/// directly.
const ARTIFACT_REPLACEMENTS: &[(&str, &str)] = &[
    ("\u{e2}\u{80}\u{99}", "\u{2019}"), // right single quote
    ("\u{e2}\u{80}\u{9c}", "\u{201c}"), // left double quote
    ("\u{e2}\u{80}\u{9d}", "\u{201d}"), // right double quote
    ("\u{e2}\u{80}\u{93}", "\u{2013}"), // en dash
    ("\u{e2}\u{80}\u{94}", "\u{2014}"), // em dash
    ("\u{e2}\u{80}\u{a6}", "\u{2026}"), // ellipsis
];

/// Normalizes a raw feed entry title into a clean display string.
///
/// Applies five stages in a fixed order; later stages assume the output
/// shape of earlier ones:
///
/// 1. [`strip_markup`] - drop embedded HTML/XML tags
/// 2. [`repair_mojibake`] - undo a UTF-8-read-as-Latin-1 mis-decode
/// 3. [`replace_artifacts`] - substitute residual mojibake punctuation
/// 4. [`filter_noise`] - drop emoji and symbol noise
/// 5. [`collapse_whitespace`] - collapse runs of whitespace and trim
///
/// Total and deterministic: never fails, worst case returns an empty
/// string. Already-clean titles pass through unchanged.
///
/// # Examples
///
/// ```
/// use feedcheck::util::clean_title;
///
/// assert_eq!(
///     clean_title("<b>Breaking News:</b> Market <i>rises</i> sharply"),
///     "Breaking News: Market rises sharply"
/// );
/// assert_eq!(clean_title("   Multiple    spaces   here   "), "Multiple spaces here");
/// assert_eq!(clean_title("\u{1f4b0} Economic Outlook 2025"), "Economic Outlook 2025");
/// assert_eq!(clean_title(""), "");
/// ```
pub fn clean_title(raw: &str) -> String {
    let stripped = strip_markup(raw);
    let repaired = repair_mojibake(&stripped);
    let substituted = replace_artifacts(&repaired);
    let filtered = filter_noise(&substituted);
    collapse_whitespace(&filtered).into_owned()
}

/// Removes HTML/XML tags: every `<`, at least one non-`>` character, then
/// `>`, leftmost and non-overlapping. A bare `<` with no closing `>` and an
/// empty `<>` are left in place (stage 4 decides their fate).
///
/// Returns `Cow::Borrowed` when the input contains no `<` (common case).
pub fn strip_markup(s: &str) -> Cow<'_, str> {
    if !s.contains('<') {
        return Cow::Borrowed(s);
    }

    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut out = String::with_capacity(len);
    let mut i = 0;

    while i < len {
        if bytes[i] == b'<' {
            match bytes[i + 1..].iter().position(|&b| b == b'>') {
                Some(off) if off > 0 => {
                    // Tag with non-empty body: skip past the closing '>'.
                    i += off + 2;
                    continue;
                }
                // Bare '<' or empty '<>': not a tag, copied below.
                _ => {}
            }
        }

        // Copy the run of bytes up to the next '<'.
        let start = i;
        i += 1;
        while i < len && bytes[i] != b'<' {
            i += 1;
        }
        // '<' is ASCII, so start..i always lands on char boundaries.
        out.push_str(&s[start..i]);
    }

    Cow::Owned(out)
}

/// Repairs the common mis-decode where UTF-8 bytes were read as a
/// single-byte Western encoding.
///
/// If every char fits in one byte, the code points are reinterpreted as raw
/// bytes and re-decoded as UTF-8. Anything that cannot round-trip (a char
/// above U+00FF, or bytes that are not valid UTF-8) is returned unchanged,
/// which makes this a no-op on text that was never mis-decoded.
///
/// Known fragility, kept as observed in production: legitimate text whose
/// code points happen to form valid multi-byte UTF-8 (e.g. `"Â£"`) is
/// "repaired" even if it was intentional.
pub fn repair_mojibake(s: &str) -> Cow<'_, str> {
    // ASCII re-encodes to itself.
    if s.is_ascii() {
        return Cow::Borrowed(s);
    }

    let mut bytes = Vec::with_capacity(s.len());
    for c in s.chars() {
        match u8::try_from(u32::from(c)) {
            Ok(b) => bytes.push(b),
            // Char above U+00FF: cannot be the product of a single-byte
            // mis-decode.
            Err(_) => return Cow::Borrowed(s),
        }
    }

    match String::from_utf8(bytes) {
        Ok(repaired) => Cow::Owned(repaired),
        Err(_) => Cow::Borrowed(s),
    }
}

/// Replaces the fixed [`ARTIFACT_REPLACEMENTS`] table of leftover mojibake
/// sequences. Catches the cases [`repair_mojibake`] cannot, where the
/// original bytes are gone because the string mixes in characters above
/// U+00FF.
pub fn replace_artifacts(s: &str) -> Cow<'_, str> {
    // Every table entry starts with U+00E2.
    if !s.contains('\u{e2}') {
        return Cow::Borrowed(s);
    }

    let mut out = s.to_owned();
    for (artifact, replacement) in ARTIFACT_REPLACEMENTS {
        if out.contains(artifact) {
            out = out.replace(artifact, replacement);
        }
    }
    Cow::Owned(out)
}

/// Character filter keeping word characters, whitespace, `&`, `”`, and the
/// span U+0027..=U+201C (apostrophe through left curly quote: ASCII
/// punctuation, Latin-1 letters, dashes, curly singles). Emoji, ellipsis
/// and high symbols are dropped.
fn is_kept(c: char) -> bool {
    c.is_alphanumeric()
        || c == '_'
        || c.is_whitespace()
        || c == '&'
        || c == '\u{201d}'
        || ('\''..='\u{201c}').contains(&c)
}

/// Removes every character outside the title allow-list (see [`is_kept`]).
///
/// Returns `Cow::Borrowed` when nothing needs removing.
pub fn filter_noise(s: &str) -> Cow<'_, str> {
    if s.chars().all(is_kept) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.chars().filter(|&c| is_kept(c)).collect())
}

/// Collapses any run of whitespace to a single space and trims the ends.
///
/// Returns `Cow::Borrowed` when the input is already in collapsed form.
pub fn collapse_whitespace(s: &str) -> Cow<'_, str> {
    let mut needs_rebuild =
        s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace);

    if !needs_rebuild {
        let mut prev_ws = false;
        for c in s.chars() {
            let ws = c.is_whitespace();
            if ws && (prev_ws || c != ' ') {
                needs_rebuild = true;
                break;
            }
            prev_ws = ws;
        }
    }

    if !needs_rebuild {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    for word in s.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    Cow::Owned(out)
}
