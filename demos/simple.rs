use twee_macro_core::{analyze, LintOptions, Registry};

fn main() {
    let passage = r#":: Cellar
<<if $lampLit>>
  The cellar is dim but navigable.
  <<set $courage to $courage + 1>>
<<endif>>
<<clik "Go back">>
"#;

    let registry = Registry::builtin();
    let analysis = analyze(passage, &registry, &LintOptions::default());

    for diagnostic in &analysis.diagnostics {
        println!(
            "{:?} [{}] line {}, col {}: {}",
            diagnostic.severity,
            diagnostic.code.code(),
            diagnostic.range.start.line + 1,
            diagnostic.range.start.character,
            diagnostic.message
        );
    }

    match analysis.to_json() {
        Ok(json) => println!("\nFull analysis:\n{json}"),
        Err(e) => eprintln!("Failed to serialize analysis: {e:?}"),
    }
}
