use crate::diagnostics::{self, Diagnostic, LintOptions};
use crate::pairing;
use crate::registry::Registry;
use crate::scanner;
use crate::token::MacroToken;
use serde::Serialize;

/// The result of analyzing one document: the paired token list and the
/// diagnostics derived from it, both in scan order.
///
/// Analysis is a pure function of its inputs; nothing is cached between
/// calls, and the registry is treated as an immutable snapshot for the
/// duration of one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub tokens: Vec<MacroToken>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Analysis {
    /// Serializes the analysis into a pretty-printed JSON string.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serializes the analysis into a YAML string.
    ///
    /// # Errors
    /// Returns a `serde_yaml::Error` if serialization fails.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// Scans `text` and resolves tag pairing, without evaluating diagnostics.
pub fn collect(text: &str, registry: &Registry) -> Vec<MacroToken> {
    pairing::resolve(scanner::scan(text), registry)
}

/// Scans, pairs, and evaluates `text`, returning diagnostics in document
/// position order. This is the primary entry point for hosts that only
/// consume findings.
pub fn lint(text: &str, registry: &Registry, options: &LintOptions) -> Vec<Diagnostic> {
    let tokens = collect(text, registry);
    diagnostics::evaluate(&tokens, registry, options)
}

/// Like [`lint`], but also returns the token list, for hosts that drive
/// decorations or tag navigation from the same scan.
pub fn analyze(text: &str, registry: &Registry, options: &LintOptions) -> Analysis {
    let tokens = collect(text, registry);
    let diagnostics = diagnostics::evaluate(&tokens, registry, options);
    Analysis {
        tokens,
        diagnostics,
    }
}
