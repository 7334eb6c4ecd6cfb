use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Failure to bring one registry source into the merge. The loader never
/// aborts on these; each failing source is skipped and reported alongside
/// whatever the remaining sources produced.
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum RegistryError {
    #[error("Couldn't read {path}: {reason}")]
    #[diagnostic(
        code(registry::unreadable_source),
        help("Check that the file exists and is readable.")
    )]
    Unreadable { path: String, reason: String },

    #[error("Couldn't parse {path}")]
    #[diagnostic(
        code(registry::malformed_source),
        help("Macro config files are YAML or JSON documents with a 'sugarcube-2' section containing a 'macros' mapping.")
    )]
    Malformed {
        path: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("{reason}")]
        span: SourceSpan,
        reason: String,
    },
}
