use crate::token::{Prefix, Range, RawTag};
use crate::utils::split_lines;

/// Scans document text for macro tag occurrences.
///
/// The grammar is `<<`, then an optional `/` or literal `end`, then either an
/// identifier (`[A-Za-z][\w-]*`) or one of the single symbols `=` / `-`. The
/// prefix alternatives are tried in that order and fall back like the
/// reference pattern does: in `<<end>>` the `end` prefix leaves nothing for
/// the name to match, so the whole word is the name; in `<<end_foo` the
/// suffix `_foo` cannot start an identifier, so the name is `end_foo`; in
/// `<<end-` the suffix matches the symbol `-`.
///
/// Matching restarts at column 0 on every line (tags never span a line
/// break), matches are non-overlapping, and the output order is
/// left-to-right, top-to-bottom. That order is the canonical scan order the
/// pair resolver uses to assign token ids.
pub fn scan(text: &str) -> Vec<RawTag> {
    let mut tags = Vec::new();
    for (line_no, line) in split_lines(text).enumerate() {
        scan_line(line, line_no, &mut tags);
    }
    tags
}

fn scan_line(line: &str, line_no: usize, tags: &mut Vec<RawTag>) {
    let chars: Vec<char> = line.chars().collect();
    let mut at = 0;
    while at + 1 < chars.len() {
        if chars[at] == '<' && chars[at + 1] == '<' {
            if let Some(tag) = match_tag(&chars, at, line_no) {
                at = tag.range.end.character;
                tags.push(tag);
                continue;
            }
        }
        at += 1;
    }
}

/// Attempts to match one tag starting at the `<<` at `start`.
fn match_tag(chars: &[char], start: usize, line_no: usize) -> Option<RawTag> {
    let body = start + 2;

    if chars.get(body) == Some(&'/') {
        // A name must follow the slash; `<</` alone is not a tag.
        let (name, end) = match_name(chars, body + 1)?;
        return Some(RawTag {
            prefix: Some(Prefix::Slash),
            name,
            range: Range::on_line(line_no, start, end),
        });
    }

    if chars[body..].starts_with(&['e', 'n', 'd']) {
        if let Some((name, end)) = match_name(chars, body + 3) {
            return Some(RawTag {
                prefix: Some(Prefix::End),
                name,
                range: Range::on_line(line_no, start, end),
            });
        }
        // No name after `end`: backtrack and let `end...` match as a bare name.
    }

    let (name, end) = match_name(chars, body)?;
    Some(RawTag {
        prefix: None,
        name,
        range: Range::on_line(line_no, start, end),
    })
}

/// Matches an identifier or single-symbol name at `at`, returning the name
/// and the column one past its final character.
fn match_name(chars: &[char], at: usize) -> Option<(String, usize)> {
    match chars.get(at)? {
        c if c.is_ascii_alphabetic() => {
            let mut end = at + 1;
            while end < chars.len() && is_name_char(chars[end]) {
                end += 1;
            }
            Some((chars[at..end].iter().collect(), end))
        }
        '=' => Some(("=".to_string(), at + 1)),
        '-' => Some(("-".to_string(), at + 1)),
        _ => None,
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(prefix: Option<Prefix>, name: &str, line: usize, start: usize, end: usize) -> RawTag {
        RawTag {
            prefix,
            name: name.to_string(),
            range: Range::on_line(line, start, end),
        }
    }

    #[test]
    fn test_plain_tag() {
        assert_eq!(scan("<<set $x to 1>>"), vec![tag(None, "set", 0, 0, 5)]);
    }

    #[test]
    fn test_closing_tag() {
        assert_eq!(
            scan("<</widget>>"),
            vec![tag(Some(Prefix::Slash), "widget", 0, 0, 9)]
        );
    }

    #[test]
    fn test_end_prefix_splits_off_suffix() {
        assert_eq!(scan("<<endif>>"), vec![tag(Some(Prefix::End), "if", 0, 0, 7)]);
    }

    #[test]
    fn test_bare_end_backtracks_to_name() {
        // `end` with nothing matchable after it is itself the name.
        assert_eq!(scan("<<end>>"), vec![tag(None, "end", 0, 0, 5)]);
    }

    #[test]
    fn test_underscore_suffix_backtracks_to_name() {
        // `_` cannot start an identifier, so `end_foo` is one bare name.
        assert_eq!(scan("<<end_foo>>"), vec![tag(None, "end_foo", 0, 0, 9)]);
    }

    #[test]
    fn test_end_prefix_with_symbol_name() {
        assert_eq!(scan("<<end->>"), vec![tag(Some(Prefix::End), "-", 0, 0, 6)]);
    }

    #[test]
    fn test_symbol_macros() {
        assert_eq!(
            scan("<<= $name>> and <<- $raw>>"),
            vec![tag(None, "=", 0, 0, 3), tag(None, "-", 0, 16, 19)]
        );
    }

    #[test]
    fn test_names_take_digits_underscores_hyphens() {
        assert_eq!(
            scan("<<my-macro_2 arg>>"),
            vec![tag(None, "my-macro_2", 0, 0, 12)]
        );
    }

    #[test]
    fn test_multiple_matches_per_line_do_not_overlap() {
        assert_eq!(
            scan("<<if $a>>text<</if>>"),
            vec![tag(None, "if", 0, 0, 4), tag(Some(Prefix::Slash), "if", 0, 13, 18)]
        );
    }

    #[test]
    fn test_extra_angle_bracket_shifts_the_match() {
        assert_eq!(scan("<<<if>>"), vec![tag(None, "if", 0, 1, 5)]);
    }

    #[test]
    fn test_rejects_space_and_digit_after_brackets() {
        assert!(scan("<< if>>").is_empty());
        assert!(scan("<<1if>>").is_empty());
        assert!(scan("<</>>").is_empty());
    }

    #[test]
    fn test_lines_scanned_independently() {
        let text = "<<if $a>>\r\nsome text\n<</if>>";
        assert_eq!(
            scan(text),
            vec![tag(None, "if", 0, 0, 4), tag(Some(Prefix::Slash), "if", 2, 0, 5)]
        );
    }

    #[test]
    fn test_tag_split_across_lines_is_not_a_tag() {
        assert!(scan("<\n<if>>").is_empty());
    }
}
