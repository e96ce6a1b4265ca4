#![allow(dead_code)]

use javabridge::{Analysis, analyze};

/// Wrap `body` in the class and main method boilerplate.
pub fn wrap_main(body: &str) -> String {
    let mut source = String::from(
        "public class Main {\n    public static void main(String[] args) {\n",
    );
    for line in body.lines() {
        source.push_str("        ");
        source.push_str(line);
        source.push('\n');
    }
    source.push_str("    }\n}\n");
    source
}

/// Run the pipeline and assert it reported nothing.
pub fn analyze_clean(source: &str) -> Analysis {
    let analysis = analyze(source);
    assert!(
        analysis.success,
        "unexpected diagnostics:\n{}\n--- source ---\n{source}",
        analysis
            .diagnostics()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    );
    analysis
}

/// Translate a program that must be free of errors.
pub fn translate_clean(source: &str) -> String {
    analyze_clean(source).python
}
