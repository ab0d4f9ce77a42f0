use std::fs;

use indoc::indoc;

use super::*;

fn texts(discovery: &Discovery) -> Vec<&str> {
    discovery.records.iter().map(|r| r.text.as_str()).collect()
}

fn discover(source: &str) -> Discovery {
    Engine::default().discover_source(source)
}

#[test]
fn engine_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Engine>();
}

#[test]
fn inline_literal_record() {
    let discovery = discover(r#"cur.execute('SELECT * FROM "users"')"#);
    let json = serde_json::to_string_pretty(&discovery.records).unwrap();

    assert_eq!(discovery.mode, PassMode::StructuredWithSafetyNet);
    insta::assert_snapshot!(json, @r#"
    [
      {
        "text": "SELECT * FROM \"users\"",
        "start": 13,
        "end": 34,
        "startLine": 1,
        "startColumn": 13,
        "endLine": 1,
        "endColumn": 34,
        "sourceLineText": "cur.execute('SELECT * FROM \"users\"')"
      }
    ]
    "#);
}

#[test]
fn three_quote_styles() {
    let discovery = discover(indoc! {r#"
        cur.execute("SELECT id FROM orders")
        cur.execute('SELECT id FROM customers')
        cur.execute('''SELECT id FROM invoices''')
    "#});

    assert_eq!(
        texts(&discovery),
        [
            "SELECT id FROM orders",
            "SELECT id FROM customers",
            "SELECT id FROM invoices",
        ]
    );
    assert_eq!(discovery.call_sites.len(), 3);
}

#[test]
fn variable_indirection_yields_one_record() {
    let discovery = discover(indoc! {r#"
        q = "SELECT 1"
        executor.execute(q)
    "#});

    assert_eq!(texts(&discovery), ["SELECT 1"]);
    assert_eq!(discovery.records[0].start, 5);
    assert!(discovery.diagnostics.is_empty());
}

#[test]
fn executor_argument_needs_no_classification() {
    let discovery = discover(r#"cur.execute("hello")"#);
    assert_eq!(texts(&discovery), ["hello"]);
}

#[test]
fn prose_literal_is_not_a_record() {
    let discovery = discover(r#"greeting = "Hello world""#);
    assert!(discovery.records.is_empty());
}

#[test]
fn executed_scope_drops_free_literals() {
    let source = indoc! {r#"
        unused = "SELECT 2"
        cur.execute("SELECT 1")
    "#};

    assert_eq!(texts(&discover(source)), ["SELECT 2", "SELECT 1"]);

    let engine = Engine::new(Config::new().scope(Scope::Executed));
    assert_eq!(texts(&engine.discover_source(source)), ["SELECT 1"]);
}

#[test]
fn malformed_source_keeps_earlier_records() {
    let discovery = discover(indoc! {r#"
        cur.execute("SELECT 1")
        q = """SELECT broken
        FROM t
    "#});

    assert_eq!(discovery.mode, PassMode::Fallback);
    assert_eq!(discovery.records[0].text, "SELECT 1");
    assert_eq!(discovery.diagnostics.count_of(DiagnosticKind::SyntaxDegraded), 1);
    assert_eq!(discovery.diagnostics.count_of(DiagnosticKind::UnterminatedLiteral), 1);
    assert!(!discovery.diagnostics.has_errors());
}

#[test]
fn multi_line_triple_quoted_argument() {
    let discovery = discover(indoc! {r#"
        cur.execute("""
            SELECT *
            FROM users
        """)
    "#});

    let record = &discovery.records[0];
    assert_eq!(record.text, "\n    SELECT *\n    FROM users\n");
    assert_eq!((record.start_line, record.start_column), (1, 15));
    assert_eq!((record.end_line, record.end_column), (4, 0));
    assert_eq!(discovery.records.len(), 1);
}

#[test]
fn passes_agree_so_nothing_doubles() {
    let discovery = discover(indoc! {r#"
        q = "SELECT 1"
        cur.execute(q)
        cur.execute("SELECT 2")
    "#});

    assert_eq!(discovery.call_sites.len(), 2);
    assert_eq!(texts(&discovery), ["SELECT 1", "SELECT 2"]);
}

#[test]
fn fallback_only_matches_structured() {
    let source = indoc! {r#"
        q = "SELECT a FROM t"
        cur.execute(q)
        other = 'DELETE FROM t'
    "#};
    let structured = discover(source);
    let fallback = Engine::new(Config::new().structured(false)).discover_source(source);

    assert_eq!(fallback.mode, PassMode::Fallback);
    assert_eq!(structured.records, fallback.records);
}

#[test]
fn discovery_is_idempotent() {
    let source = indoc! {r#"
        q = f"SELECT * FROM {table}"
        cur.execute(q)
        cur.executemany("INSERT INTO t VALUES (?)", rows)
    "#};
    let engine = Engine::default();

    assert_eq!(engine.discover_source(source).records, engine.discover_source(source).records);
}

#[test]
fn record_text_is_the_document_slice() {
    let source = indoc! {r#"
        a = "SELECT 1"
        b = ('SELECT x '
             'FROM y')
        c = 'héllo'
        cur.execute(a)
        df = pd.read_sql("SELECT * FROM big", conn)
    "#};
    let discovery = discover(source);

    let chars: Vec<char> = source.chars().collect();
    assert!(!discovery.records.is_empty());
    for record in &discovery.records {
        assert!(record.start <= record.end && record.end <= chars.len());
        let slice: String = chars[record.start..record.end].iter().collect();
        assert_eq!(slice, record.text);
    }
    let mut keys: Vec<_> = discovery.records.iter().map(|r| r.key()).collect();
    keys.dedup();
    assert_eq!(keys.len(), discovery.records.len());
}

#[test]
fn offsets_after_non_ascii_text_count_characters() {
    let discovery = discover("# комментарий\ncur.execute('SELECT 1')\n");

    let record = &discovery.records[0];
    assert_eq!(record.text, "SELECT 1");
    assert_eq!((record.start, record.end), (27, 35));
    assert_eq!((record.start_line, record.start_column), (2, 13));
}

#[test]
fn backslash_continued_string_is_one_record() {
    let discovery = discover("cur.execute(\"SELECT * \\\nFROM t\")\n");

    assert_eq!(discovery.mode, PassMode::StructuredWithSafetyNet);
    assert_eq!(texts(&discovery), ["SELECT * \\\nFROM t"]);
    assert_eq!((discovery.records[0].start, discovery.records[0].end), (13, 30));
}

#[test]
fn nested_same_quote_fstring_is_one_record() {
    let discovery = discover(r#"cur.execute(f"SELECT a FROM {d["t"]} WHERE x")"#);

    assert_eq!(discovery.mode, PassMode::StructuredWithSafetyNet);
    assert_eq!(texts(&discovery), [r#"SELECT a FROM {d["t"]} WHERE x"#]);
    assert_eq!((discovery.records[0].start, discovery.records[0].end), (14, 44));
}

#[test]
fn oversize_document_is_rejected() {
    let engine = Engine::new(Config::new().max_document_bytes(10));
    let discovery = engine.discover_source("q = 'SELECT 1'\n");

    assert_eq!(discovery.mode, PassMode::Skipped);
    assert!(discovery.records.is_empty());
    assert_eq!(discovery.diagnostics.count_of(DiagnosticKind::DocumentTooLarge), 1);
    assert!(discovery.diagnostics.has_errors());
}

#[test]
fn oversize_document_is_truncated() {
    let engine = Engine::new(
        Config::new()
            .max_document_bytes(20)
            .oversize(OversizePolicy::Truncate),
    );
    let discovery = engine.discover_source("a = 'SELECT 1'\nb = 'SELECT 2'\n");

    assert_eq!(texts(&discovery), ["SELECT 1"]);
    assert_eq!(discovery.diagnostics.count_of(DiagnosticKind::DocumentTruncated), 1);
    assert!(!discovery.diagnostics.has_errors());
}

#[test]
fn missing_file_is_a_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let discovery = Engine::default().discover_path(&dir.path().join("missing.py"));

    assert_eq!(discovery.mode, PassMode::Skipped);
    assert!(discovery.records.is_empty());
    assert_eq!(discovery.diagnostics.count_of(DiagnosticKind::UnreadableDocument), 1);
}

#[test]
fn file_with_undecodable_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.py");
    fs::write(&path, b"x = '\xff'\ncur.execute('SELECT 1')\n").unwrap();

    let discovery = Engine::default().discover_path(&path);

    assert_eq!(texts(&discovery), ["SELECT 1"]);
    assert_eq!(discovery.records[0].start_line, 2);
    assert_eq!(discovery.diagnostics.count_of(DiagnosticKind::UndecodableLine), 1);
}

#[test]
fn oversize_file_is_refused_before_reading() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("big.py");
    fs::write(&path, "q = 'SELECT 1'\n".repeat(10)).unwrap();

    let engine = Engine::new(Config::new().max_document_bytes(32));
    let discovery = engine.discover_path(&path);

    assert_eq!(discovery.mode, PassMode::Skipped);
    assert_eq!(discovery.diagnostics.count_of(DiagnosticKind::DocumentTooLarge), 1);
}
