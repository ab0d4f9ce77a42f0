use super::{CONTEXTS, TYPO_KEYWORDS, TypoPatternSet, VariantKind};

#[test]
fn transposition_of_from() {
    let set = TypoPatternSet::get();
    let kind = set
        .variants("FROM")
        .find(|(v, _)| *v == "FORM")
        .map(|(_, k)| k);

    assert_eq!(kind, Some(VariantKind::Transposition));
    assert_eq!(set.keywords_for("form"), &["FROM"]);
}

#[test]
fn generators_cover_select() {
    let set = TypoPatternSet::get();
    let has = |variant: &str, kind: VariantKind| {
        set.variants("select")
            .any(|(v, k)| v == variant && k == kind)
    };

    assert!(has("SELEC", VariantKind::MissingChar));
    assert!(has("SEELCT", VariantKind::Transposition));
    assert!(has("SSELECT", VariantKind::Doubling));
    assert!(has("SWELECT", VariantKind::NeighborInsertion));
    assert!(has("AELECT", VariantKind::NeighborSubstitution));
    assert!(has("ЫELECT", VariantKind::LayoutSubstitution));
    assert!(has("CELECT", VariantKind::CommonMisspelling));
}

#[test]
fn layout_variants_match_case_insensitively() {
    assert!(TypoPatternSet::get().is_typo_of("ыelect", "SELECT"));
}

#[test]
fn exact_keywords_are_not_typos() {
    let set = TypoPatternSet::get();
    assert!(set.keywords_for("FROM").is_empty());
    // IN with I→O would be ON, itself a keyword
    assert!(set.keywords_for("ON").is_empty());
}

#[test]
fn no_variant_is_shorter_than_two_chars() {
    let set = TypoPatternSet::get();
    for kw in TYPO_KEYWORDS {
        assert!(set.variants(kw).all(|(v, _)| v.chars().count() >= 2), "{kw}");
    }
}

#[test]
fn context_words_get_variants() {
    let set = TypoPatternSet::get();
    assert!(set.variants("TABLES").next().is_some());
    assert!(set.contexts().contains(&("ALTER", "MODIFY")));

    let pairs: usize = CONTEXTS.iter().map(|(_, c)| c.len()).sum();
    assert_eq!(set.contexts().len(), pairs);
    assert!(set.keyword_count() > TYPO_KEYWORDS.len());
    assert!(set.variant_count() > set.keyword_count());
}
