use super::tree::dump_tree;

fn dump(source: &str, raw: bool, spans: bool) -> String {
    let tree = sqlsift_langs::python().parse(source).unwrap();
    dump_tree(&tree, source, raw, spans)
}

#[test]
fn named_nodes_with_fields() {
    insta::assert_snapshot!(dump("x = 1", false, false), @r#"
    (module
      (assignment
        left: (identifier "x")
        right: (integer "1")))
    "#);
}

#[test]
fn spans_are_byte_offsets() {
    insta::assert_snapshot!(dump("x = 1", false, true), @r#"
    (module [0..5]
      (assignment [0..5]
        left: (identifier "x") [0..1]
        right: (integer "1") [4..5]))
    "#);
}

#[test]
fn raw_includes_anonymous_nodes() {
    let out = dump("x = 1", true, false);
    assert!(out.contains(r#"("=")"#), "{out}");
}
