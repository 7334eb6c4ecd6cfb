use crate::token::{MacroToken, Position, Range};

/// Finds the macro token whose range contains `position`. Containment is
/// half-open, matching the token ranges themselves.
pub fn token_at(tokens: &[MacroToken], position: Position) -> Option<&MacroToken> {
    tokens.iter().find(|token| token.range.contains(position))
}

/// Ranges to decorate when the cursor rests on a macro tag: the tag itself,
/// plus its partner when the pair is matched. Empty when the cursor is not
/// on a tag.
pub fn highlight_ranges(tokens: &[MacroToken], position: Position) -> Vec<Range> {
    let token = match token_at(tokens, position) {
        Some(token) => token,
        None => return Vec::new(),
    };
    let mut ranges = vec![token.range];
    if token.is_matched() {
        if let Some(partner) = tokens.get(token.pair) {
            ranges.push(partner.range);
        }
    }
    ranges
}
