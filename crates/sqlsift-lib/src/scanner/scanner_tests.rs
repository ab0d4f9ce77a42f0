use indoc::indoc;

use super::fallback_scan;
use crate::{ArgumentForm, DiagnosticKind, PassOutput, SourceDocument};

fn scan(source: &str) -> PassOutput {
    fallback_scan(&SourceDocument::new(source))
}

fn unit_texts(out: &PassOutput) -> Vec<&str> {
    out.literals.iter().map(|l| l.text.as_str()).collect()
}

fn call_summary(out: &PassOutput) -> String {
    let mut s = String::new();
    for site in &out.call_sites {
        let arg = match &site.argument {
            ArgumentForm::InlineLiteral(lit) => format!("inline {:?}", lit.text),
            ArgumentForm::VariableReference { name, literal } => {
                format!("{name} -> {:?}", literal.text)
            }
            ArgumentForm::Unresolved { name } => format!("unresolved {name:?}"),
        };
        s.push_str(&format!("{:?} {} {}\n", site.trigger, site.callee, arg));
    }
    s
}

#[test]
fn inline_literal_call() {
    let out = scan(r#"cur.execute('SELECT * FROM "users"')"#);
    insta::assert_snapshot!(call_summary(&out), @r#"Execute cur.execute inline "SELECT * FROM \"users\"""#);
    assert_eq!(unit_texts(&out), [r#"SELECT * FROM "users""#]);
}

#[test]
fn variable_indirection() {
    let out = scan(indoc! {r#"
        q = "SELECT 1"
        executor.execute(q)
    "#});
    insta::assert_snapshot!(call_summary(&out), @r#"Execute executor.execute q -> "SELECT 1""#);
    assert!(out.diagnostics.is_empty());
}

#[test]
fn rebinding_and_shadowing() {
    let out = scan(indoc! {r#"
        q = "SELECT 1"
        cur.execute(q)
        q = "SELECT 2"
        cur.execute(q)
        q = build()
        cur.execute(q)
    "#});
    insta::assert_snapshot!(call_summary(&out), @r#"
    Execute cur.execute q -> "SELECT 1"
    Execute cur.execute q -> "SELECT 2"
    Execute cur.execute unresolved Some("q")
    "#);
    assert_eq!(out.diagnostics.count_of(DiagnosticKind::UnresolvedReference), 1);
}

#[test]
fn augmented_assignment_keeps_binding() {
    let out = scan(indoc! {r#"
        q = "SELECT 1"
        q += " WHERE x"
        cur.execute(q)
    "#});
    insta::assert_snapshot!(call_summary(&out), @r#"Execute cur.execute q -> "SELECT 1""#);
}

#[test]
fn chained_and_annotated_assignment() {
    let out = scan(indoc! {r#"
        a = b = "SELECT a"
        c: str = "SELECT c"
        cur.execute(b)
        cur.execute(c)
    "#});
    insta::assert_snapshot!(call_summary(&out), @r#"
    Execute cur.execute b -> "SELECT a"
    Execute cur.execute c -> "SELECT c"
    "#);
    assert!(out.bindings.lookup("a", 100.into()).is_some());
}

#[test]
fn concatenation_and_parentheses() {
    let out = scan(indoc! {r#"
        q = ("SELECT * "
             "FROM t " +
             'WHERE x')
        cur.execute(q)
    "#});
    insta::assert_snapshot!(call_summary(&out), @r#"Execute cur.execute q -> "SELECT * FROM t WHERE x""#);
    assert_eq!(unit_texts(&out), ["SELECT * FROM t WHERE x"]);
}

#[test]
fn template_literal_argument() {
    let out = scan(r#"cur.execute(f"SELECT * FROM {table} WHERE id = %s", (1,))"#);
    insta::assert_snapshot!(call_summary(&out), @r#"Execute cur.execute inline "SELECT * FROM {…} WHERE id = %s""#);
}

#[test]
fn multi_line_triple_argument() {
    let out = scan(indoc! {r#"
        cursor.execute(
            '''
            SELECT id
            FROM orders
            ''',
            params,
        )
    "#});
    insta::assert_snapshot!(call_summary(&out), @r#"Execute cursor.execute inline "\n    SELECT id\n    FROM orders\n    ""#);
}

#[test]
fn tighter_operators_split_units() {
    let out = scan(indoc! {r#"
        a = "SELECT " + "x".format(y)
        b = "SELECT %s" % name
        c = prefix + "SELECT" + " 1"
    "#});
    assert_eq!(unit_texts(&out), ["SELECT ", "x", "SELECT %s", "SELECT", " 1"]);
    assert!(out.bindings.resolve("a", 200.into()).is_none());
}

#[test]
fn callee_with_receiver_chain() {
    let out = scan(r#"self.engine.connect().exec_driver_sql("SELECT 1")"#);
    insta::assert_snapshot!(call_summary(&out), @r#"Execute self.engine.connect().exec_driver_sql inline "SELECT 1""#);
}

#[test]
fn other_trigger_kinds() {
    let out = scan(indoc! {r#"
        rows = await pool.fetch("SELECT 1")
        df = pd.read_sql_query("SELECT 2", con)
        cur.copy_expert("COPY t TO STDOUT", fh)
    "#});
    insta::assert_snapshot!(call_summary(&out), @r#"
    Fetch pool.fetch inline "SELECT 1"
    BulkRead pd.read_sql_query inline "SELECT 2"
    BulkCopy cur.copy_expert inline "COPY t TO STDOUT"
    "#);
}

#[test]
fn non_literal_arguments() {
    let out = scan(indoc! {r#"
        cur.execute(build(), x)
        cur.execute(sql=q)
        cur.execute()
    "#});
    insta::assert_snapshot!(call_summary(&out), @r"
    Execute cur.execute unresolved None
    Execute cur.execute unresolved None
    Execute cur.execute unresolved None
    ");
}

#[test]
fn definitions_are_not_calls() {
    let out = scan(indoc! {r#"
        def execute(self, sql):
            return self.cur.execute(sql)
    "#});
    insta::assert_snapshot!(call_summary(&out), @r#"Execute self.cur.execute unresolved Some("sql")"#);
}

#[test]
fn statement_with_call_does_not_bind() {
    let out = scan(indoc! {r#"
        q = cur.execute("SELECT 1")
    "#});
    assert!(out.bindings.is_empty());
    assert_eq!(out.call_sites.len(), 1);
}

#[test]
fn compound_header_on_same_line() {
    let out = scan(indoc! {r#"
        if debug: q = "SELECT 1"
        cur.execute(q)
    "#});
    insta::assert_snapshot!(call_summary(&out), @r#"Execute cur.execute q -> "SELECT 1""#);
}

#[test]
fn semicolons_split_statements() {
    let out = scan(r#"q = "SELECT 1"; cur.execute(q)"#);
    insta::assert_snapshot!(call_summary(&out), @r#"Execute cur.execute q -> "SELECT 1""#);
}

#[test]
fn backslash_continuation() {
    let out = scan(indoc! {r#"
        q = "SELECT * " \
            "FROM t"
        cur.execute(q)
    "#});
    insta::assert_snapshot!(call_summary(&out), @r#"Execute cur.execute q -> "SELECT * FROM t""#);
}

#[test]
fn missing_paren_recovers_at_next_statement() {
    let out = scan(indoc! {r#"
        cur.execute("SELECT 1"
        q = "SELECT 2"
        cur.execute(q)
    "#});
    insta::assert_snapshot!(call_summary(&out), @r#"
    Execute cur.execute inline "SELECT 1"
    Execute cur.execute q -> "SELECT 2"
    "#);
}

#[test]
fn unterminated_literal_keeps_earlier_results() {
    let out = scan(indoc! {r#"
        cur.execute("SELECT 1")
        q = """SELECT broken
        FROM t
    "#});
    insta::assert_snapshot!(call_summary(&out), @r#"Execute cur.execute inline "SELECT 1""#);
    assert_eq!(out.diagnostics.count_of(DiagnosticKind::UnterminatedLiteral), 1);
    let last = out.literals.last().unwrap();
    assert!(!last.terminated);
    assert_eq!(last.text, "SELECT broken\nFROM t\n");
}

#[test]
fn strings_in_comments_are_ignored() {
    let out = scan("# cur.execute('SELECT 1')\nx = 1\n");
    assert!(out.literals.is_empty());
    assert!(out.call_sites.is_empty());
}
