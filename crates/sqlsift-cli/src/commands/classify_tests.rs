use sqlsift_lib::Classifier;

use super::classify::format_verdict;

fn format(text: &str) -> String {
    format_verdict(&Classifier::new().classify(text))
}

#[test]
fn verdict_lines() {
    insta::assert_snapshot!(format("SELECT * FROM users"), @"query-like: strong-keyword (strong keyword SELECT)");
    insta::assert_snapshot!(format("SELCT * FORM users"), @"query-like: typo-pattern (misspelled SELECT ... FROM)");
    insta::assert_snapshot!(format("import os"), @"not query-like: host-code (host code (`import`))");
    insta::assert_snapshot!(format("Hello world"), @"not query-like: no-match");
}
