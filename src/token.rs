use serde::Serialize;

/// A 0-based position in a document. Columns are counted in Unicode scalar
/// values from the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl Position {
    pub fn new(line: usize, character: usize) -> Position {
        Position { line, character }
    }
}

/// The extent of a matched tag: start inclusive, end exclusive. The end column
/// is the end of the matched `<<` + prefix + name text; a closing `>>` is not
/// part of the grammar and never extends the range. Tags never span lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Range {
        Range { start, end }
    }

    /// Single-line range on `line` from `start` to `end` columns.
    pub fn on_line(line: usize, start: usize, end: usize) -> Range {
        Range {
            start: Position::new(line, start),
            end: Position::new(line, end),
        }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.line == self.start.line
            && position.character >= self.start.character
            && position.character < self.end.character
    }
}

/// The optional marker between `<<` and the macro name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    /// `<</name>>`
    Slash,
    /// `<<endname>>`. The scanner stores only the text after the literal `end`;
    /// whether that spelling is really a closing tag depends on the registry
    /// and is decided during pairing.
    End,
}

/// One raw grammar match as produced by the scanner, before pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTag {
    pub prefix: Option<Prefix>,
    pub name: String,
    pub range: Range,
}

/// A recognized macro tag occurrence with its pairing state resolved.
///
/// `id` is the token's index in scan order. `pair` is the id of the opener or
/// closer this token is matched with; a token with `pair == id` is unmatched.
/// For any matched pair the two tokens share a `name` and exactly one of them
/// has `open == true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroToken {
    pub id: usize,
    pub pair: usize,
    pub name: String,
    pub open: bool,
    pub end_variant: bool,
    pub range: Range,
}

impl MacroToken {
    pub fn is_matched(&self) -> bool {
        self.pair != self.id
    }
}
