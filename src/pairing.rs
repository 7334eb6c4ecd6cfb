use crate::registry::Registry;
use crate::token::{MacroToken, Prefix, RawTag};
use std::collections::HashMap;

/// Resolves raw tag matches into paired macro tokens.
///
/// Tokens are numbered in scan order. Each opener is pushed onto a stack kept
/// per distinct name; a closer pops the most recent opener of the same name
/// and the two tokens point at each other through `pair`. Stacks are
/// name-scoped only, so tags of different names never interfere. A closer
/// with no pending opener, or an opener never closed, keeps `pair == id`.
///
/// The registry is consulted for one thing here: deciding whether an
/// `end`-prefixed match is the deprecated closing spelling of a known macro
/// (`<<endif>>` closing `<<if>>`) or a macro whose name genuinely starts with
/// `end`. Unknown suffixes fall back to the literal prefixed name.
pub fn resolve(tags: Vec<RawTag>, registry: &Registry) -> Vec<MacroToken> {
    let mut tokens: Vec<MacroToken> = Vec::with_capacity(tags.len());
    let mut opened: HashMap<String, Vec<usize>> = HashMap::new();

    for (id, tag) in tags.into_iter().enumerate() {
        let mut open = true;
        let mut end_variant = false;
        let mut pair = id;
        let mut name = tag.name;

        match tag.prefix {
            Some(Prefix::End) => {
                if registry.contains(&name) {
                    end_variant = true;
                    open = false;
                } else {
                    name = format!("end{name}");
                }
            }
            Some(Prefix::Slash) => open = false,
            None => {}
        }

        if open {
            opened.entry(name.clone()).or_default().push(id);
        } else if let Some(opener) = opened.entry(name.clone()).or_default().pop() {
            tokens[opener].pair = id;
            pair = opener;
        }

        tokens.push(MacroToken {
            id,
            pair,
            name,
            open,
            end_variant,
            range: tag.range,
        });
    }

    tokens
}
