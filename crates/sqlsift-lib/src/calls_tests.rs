use rowan::TextRange;

use super::*;

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

fn raw_call(argument: RawArgument) -> RawCall {
    RawCall {
        trigger: TriggerKind::Execute,
        callee: "cur.execute".into(),
        argument,
        span: range(20, 34),
    }
}

#[test]
fn trigger_matches_last_segment() {
    assert_eq!(TriggerKind::from_callee("cur.execute"), Some(TriggerKind::Execute));
    assert_eq!(
        TriggerKind::from_callee("self.conn.cursor().executemany"),
        Some(TriggerKind::Execute)
    );
    assert_eq!(TriggerKind::from_callee("pool.fetchrow"), Some(TriggerKind::Fetch));
    assert_eq!(TriggerKind::from_callee("pd.read_sql_query"), Some(TriggerKind::BulkRead));
    assert_eq!(TriggerKind::from_callee("cur.copy_expert"), Some(TriggerKind::BulkCopy));
    assert_eq!(TriggerKind::from_callee("execute"), Some(TriggerKind::Execute));
    assert_eq!(TriggerKind::from_callee("cur.fetchall"), None);
    assert_eq!(TriggerKind::from_callee("execute.now"), None);
}

#[test]
fn inline_literal_passes_through() {
    let lit = Literal::from_token("'SELECT 1'", 32.into(), true).unwrap();
    let mut diagnostics = Diagnostics::new();
    let site = raw_call(RawArgument::Literal(lit.clone())).resolve(&BindingTable::new(), &mut diagnostics);

    assert_eq!(site.argument, ArgumentForm::InlineLiteral(lit));
    assert!(diagnostics.is_empty());
}

#[test]
fn name_resolves_through_bindings() {
    let lit = Literal::from_token("'SELECT 1'", 4.into(), true).unwrap();
    let mut bindings = BindingTable::new();
    bindings.bind("q", Some(lit.clone()), range(0, 14));

    let mut diagnostics = Diagnostics::new();
    let site = raw_call(RawArgument::Name {
        name: "q".into(),
        range: range(32, 33),
    })
    .resolve(&bindings, &mut diagnostics);

    assert_eq!(site.argument.literal(), Some(&lit));
    assert!(matches!(site.argument, ArgumentForm::VariableReference { ref name, .. } if name == "q"));
    assert!(diagnostics.is_empty());
}

#[test]
fn unbound_name_warns() {
    let mut diagnostics = Diagnostics::new();
    let site = raw_call(RawArgument::Name {
        name: "q".into(),
        range: range(32, 33),
    })
    .resolve(&BindingTable::new(), &mut diagnostics);

    assert_eq!(site.argument, ArgumentForm::Unresolved { name: Some("q".into()) });
    assert_eq!(diagnostics.count_of(DiagnosticKind::UnresolvedReference), 1);
    let first = diagnostics.iter().next().unwrap();
    assert_eq!(first.message(), "`q` has no visible string binding");
}

#[test]
fn other_argument_is_unresolved_without_warning() {
    let mut diagnostics = Diagnostics::new();
    let site = raw_call(RawArgument::Other).resolve(&BindingTable::new(), &mut diagnostics);

    assert_eq!(site.argument, ArgumentForm::Unresolved { name: None });
    assert!(site.argument.literal().is_none());
    assert!(diagnostics.is_empty());
}
