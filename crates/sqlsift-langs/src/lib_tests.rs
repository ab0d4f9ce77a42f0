use super::*;

#[test]
#[cfg(feature = "lang-python")]
fn lang_from_name() {
    assert_eq!(from_name("py").unwrap().name(), "python");
    assert_eq!(from_name("Python").unwrap().name(), "python");
    assert_eq!(from_name("PYTHON3").unwrap().name(), "python");
    assert!(from_name("unknown").is_none());
}

#[test]
#[cfg(feature = "lang-python")]
fn lang_from_extension() {
    assert_eq!(from_ext("py").unwrap().name(), "python");
    assert_eq!(from_ext("PYI").unwrap().name(), "python");
    assert!(from_ext("rs").is_none());
}

#[test]
fn all_returns_enabled_langs() {
    let langs = all();
    assert!(!langs.is_empty());
    for lang in &langs {
        assert!(!lang.name().is_empty());
    }
}

#[test]
#[cfg(feature = "lang-python")]
fn python_parses_clean_source() {
    let tree = python().parse("q = 'SELECT 1'\ncur.execute(q)\n").unwrap();
    let root = tree.root_node();
    assert_eq!(root.kind(), "module");
    assert!(!root.has_error());
}

#[test]
#[cfg(feature = "lang-python")]
fn python_tree_reports_syntax_errors() {
    let tree = python().parse("cur.execute('SELECT 1'\nq = \n").unwrap();
    assert!(tree.root_node().has_error());
}

#[test]
#[cfg(feature = "lang-python")]
fn python_is_shared() {
    assert!(Arc::ptr_eq(&python(), &python()));
}
