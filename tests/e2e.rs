//! End-to-end tests over complete Java programs.

mod common;

use common::analyze_clean;
use javabridge::{DataType, Error, analyze};

const GRADES: &str = r#"public class Grades {
    public static void main(String[] args) {
        // Grade report
        int score = 72;
        double average = 81.5;
        String name = "Ana";
        boolean active = true;

        if (average >= 90.0) {
            System.out.println("excellent");
        } else if (average >= 80.0) {
            System.out.println("good");
        } else {
            System.out.println("keep going");
        }

        for (int i = 0; i < 3; i++) {
            if (i == 0) {
                System.out.println("first");
            } else {
                System.out.println(i);
            }
        }

        int count = 3;
        while (count > 0 && active) {
            count--;
        }
        score += 5;
        System.out.println(name + " " + score);
    }
}
"#;

const GRADES_PY: &str = r#"# Grade report

score = 72
average = 81.5
name = "Ana"
active = True
if average >= 90.0:
    print("excellent")
elif average >= 80.0:
    print("good")
else:
    print("keep going")
for i in range(0, 3):
    if i == 0:
        print("first")
    else:
        print(i)
count = 3
while count > 0 and active:
    count = count - 1
score = score + 5
print(name + " " + score)"#;

#[test]
fn e2e_full_program() {
    let analysis = analyze_clean(GRADES);
    assert_eq!(analysis.python, GRADES_PY);
    assert_eq!(analysis.program.class_name, "Grades");
    assert_eq!(analysis.program.body.len(), 10);

    let declared: Vec<&str> = analysis.declarations.keys().map(String::as_str).collect();
    assert_eq!(
        declared,
        vec!["score", "average", "name", "active", "i", "count"]
    );
    assert_eq!(analysis.declarations["name"].data_type, DataType::String);
    assert_eq!(analysis.declarations["i"].span.line, 17);
}

#[test]
fn e2e_windows_line_endings() {
    let source = GRADES.replace('\n', "\r\n");
    let analysis = analyze_clean(&source);
    // the comment keeps its trailing '\r'
    assert_eq!(analysis.python.replace('\r', ""), GRADES_PY);
}

#[test]
fn e2e_analysis_json() {
    let analysis = analyze("int x = 5;\ny = x;");
    let json = serde_json::to_value(&analysis).expect("serialize");

    assert_eq!(json["success"], false);
    assert_eq!(json["python"], "x = 5\ny = x");
    assert_eq!(json["lexicalErrors"].as_array().map(Vec::len), Some(0));
    assert_eq!(json["syntaxErrors"][0]["found"], "y");
    assert_eq!(json["syntaxErrors"][0]["line"], 2);

    assert_eq!(json["tokens"][0]["kind"], "KEYWORD");
    assert_eq!(json["tokens"][0]["text"], "int");
    assert_eq!(json["tokens"][0]["line"], 1);
    assert_eq!(json["tokens"][0]["column"], 1);
    assert_eq!(json["tokens"][3]["kind"], "INTEGER");

    assert_eq!(json["declarations"]["x"]["data_type"], "int");
    assert_eq!(json["declarations"]["x"]["line"], 1);
    assert_eq!(json["declarations"]["x"]["column"], 5);

    let first = &json["program"]["body"][0];
    assert_eq!(first["type"], "Declaration");
    assert_eq!(first["name"], "x");
    assert_eq!(first["value"]["type"], "Literal");
    assert_eq!(first["value"]["kind"], "int");
    assert_eq!(first["value"]["value"], "5");
}

#[test]
fn e2e_diagnostics_are_merged_in_source_order() {
    let analysis = analyze("int a = 1;\nb = 2;\nint c = 3 #;\nd = c;");
    let diagnostics = analysis.diagnostics();
    assert_eq!(diagnostics.len(), 3);

    assert!(matches!(diagnostics[0], Error::Parse(_)));
    assert_eq!(diagnostics[0].span().line, 2);
    assert!(matches!(diagnostics[1], Error::Lex(_)));
    assert_eq!(
        diagnostics[1].to_string(),
        "lexical error: unexpected character '#' at line 3, column 11"
    );
    assert!(matches!(diagnostics[2], Error::Parse(_)));
    assert_eq!(diagnostics[2].span().line, 4);
}

#[test]
fn e2e_broken_program_still_translates() {
    let source = "public class Broken {\n    public static void main(String[] args) {\n        int x = 1\n        x = x + 1;\n        System.out.println(x);\n    }\n";
    let analysis = analyze(source);
    assert!(!analysis.success);
    assert_eq!(analysis.python, "x = 1\nx = x + 1\nprint(x)");

    let messages: Vec<String> = analysis
        .syntax_errors
        .iter()
        .map(javabridge::ParseError::description)
        .collect();
    assert_eq!(
        messages,
        vec!["expected ';' after declaration", "expected '}' at end of class"]
    );
}

#[test]
fn e2e_empty_source() {
    let analysis = analyze_clean("");
    assert_eq!(analysis.python, "pass");
    assert_eq!(analysis.tokens.len(), 1);
}
