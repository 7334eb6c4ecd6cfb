use crate::registry::{MacroDef, Registry};
use crate::token::{MacroToken, Range};
use serde::{Deserialize, Serialize, Serializer};

/// Source tag stamped on every diagnostic so consumers can tell them apart
/// from findings issued by other tooling.
pub const SOURCE: &str = "sc2-ex";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
    Warning,
}

/// The fixed set of findings this crate reports. Codes serialize as their
/// numeric values, which is what editor clients key quick-fixes off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticCode {
    /// 100: macro name not present in any loaded registry source.
    UndefinedMacro,
    /// 101: container macro with a missing opening or closing tag.
    MalformedContainer,
    /// 102: deprecated `<<end...>>` closing spelling.
    DeprecatedEndVariant,
    /// 103: the macro itself is deprecated.
    DeprecatedMacro,
    /// 104: closing tag for a macro that is not a container.
    IllegalClose,
}

impl DiagnosticCode {
    pub const fn code(self) -> u16 {
        match self {
            DiagnosticCode::UndefinedMacro => 100,
            DiagnosticCode::MalformedContainer => 101,
            DiagnosticCode::DeprecatedEndVariant => 102,
            DiagnosticCode::DeprecatedMacro => 103,
            DiagnosticCode::IllegalClose => 104,
        }
    }
}

impl Serialize for DiagnosticCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u16(self.code())
    }
}

/// One finding against a single tag occurrence. The range is copied from the
/// originating token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub range: Range,
    pub message: String,
    pub code: DiagnosticCode,
    pub source: &'static str,
}

/// Warning toggles, passed in explicitly by the host configuration layer.
/// Errors (101, 104) are always reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LintOptions {
    /// Report the deprecated `<<end...>>` closing spelling (code 102).
    pub end_macro_warnings: bool,
    /// Report uses of deprecated macros (code 103).
    pub deprecated_macro_warnings: bool,
    /// Report macro names absent from the registry (code 100).
    pub undefined_macro_warnings: bool,
}

impl Default for LintOptions {
    fn default() -> LintOptions {
        LintOptions {
            end_macro_warnings: true,
            deprecated_macro_warnings: true,
            undefined_macro_warnings: true,
        }
    }
}

/// Evaluates paired tokens against the registry, producing diagnostics in
/// token scan order.
///
/// For each token at most one rule fires, tried in priority order: malformed
/// container pair (101), illegal closing tag (104), deprecated `<<end...>>`
/// spelling (102), deprecated macro (103), unrecognized name (100).
///
/// The closing semantics of `end`-prefixed names are re-derived here from
/// the registry alone, independently of how pairing classified the token.
pub fn evaluate(
    tokens: &[MacroToken],
    registry: &Registry,
    options: &LintOptions,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for token in tokens {
        let end_variant_def = token
            .name
            .strip_prefix("end")
            .and_then(|suffix| registry.get(suffix));
        let (def, open) = match end_variant_def {
            Some(def) => (Some(def), false),
            None => (registry.get(&token.name), token.open),
        };

        let diagnostic = match def {
            Some(def) if def.container && !token.is_matched() => Some(Diagnostic {
                severity: Severity::Error,
                range: token.range,
                message: format!(
                    "Malformed container macro! {} '{}' tag not found!",
                    if open { "Closing" } else { "Opening" },
                    token.name
                ),
                code: DiagnosticCode::MalformedContainer,
                source: SOURCE,
            }),
            Some(def) if !def.container && !open => Some(Diagnostic {
                severity: Severity::Error,
                range: token.range,
                message: format!(
                    "Illegal closing tag! '{}' is not a container macro!",
                    token.name
                ),
                code: DiagnosticCode::IllegalClose,
                source: SOURCE,
            }),
            Some(_) if token.end_variant && options.end_macro_warnings => Some(Diagnostic {
                severity: Severity::Warning,
                range: token.range,
                message: format!(
                    "'<<end...>>' closing macros are deprecated! Use '<</{}>>' instead.",
                    token.name
                ),
                code: DiagnosticCode::DeprecatedEndVariant,
                source: SOURCE,
            }),
            Some(def) if def.deprecated && options.deprecated_macro_warnings => Some(Diagnostic {
                severity: Severity::Warning,
                range: token.range,
                message: deprecation_message(def),
                code: DiagnosticCode::DeprecatedMacro,
                source: SOURCE,
            }),
            None if options.undefined_macro_warnings => Some(Diagnostic {
                severity: Severity::Warning,
                range: token.range,
                message: format!(
                    "Unrecognized macro! '{}' has not been defined in config files!",
                    token.name
                ),
                code: DiagnosticCode::UndefinedMacro,
                source: SOURCE,
            }),
            _ => None,
        };

        if let Some(diagnostic) = diagnostic {
            diagnostics.push(diagnostic);
        }
    }

    diagnostics
}

fn deprecation_message(def: &MacroDef) -> String {
    let mut message = String::from("Deprecated macro!");
    if !def.deprecated_suggestions.is_empty() {
        message.push_str("\nInstead use:");
        for suggestion in &def.deprecated_suggestions {
            message.push_str("\n- ");
            message.push_str(suggestion);
        }
    }
    message
}
