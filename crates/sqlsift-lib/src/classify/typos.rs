//! Generated misspellings of SQL keywords.
//!
//! Every keyword is expanded once into the variants a hurried typist
//! produces: a dropped letter, swapped neighbors, a doubled letter, a stray
//! or substituted adjacent key, the same key on a Russian layout, and a short
//! list of misspellings common enough to spell out. Variants are stored
//! uppercase; lookups uppercase the queried word.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use indexmap::IndexMap;

use super::keywords::{
    BROAD, COMMON_MISSPELLINGS, CONTEXTS, TYPO_KEYWORDS, qwerty_neighbors, russian_layout,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VariantKind {
    MissingChar,
    Transposition,
    Doubling,
    NeighborInsertion,
    NeighborSubstitution,
    LayoutSubstitution,
    CommonMisspelling,
}

static PATTERNS: LazyLock<TypoPatternSet> = LazyLock::new(TypoPatternSet::build);

/// Keyword variants plus the reverse index from variant to keywords.
#[derive(Debug)]
pub struct TypoPatternSet {
    /// Variant → first generator that produced it, per keyword.
    variants: IndexMap<&'static str, IndexMap<String, VariantKind>>,
    index: HashMap<String, Vec<&'static str>>,
    contexts: Vec<(&'static str, &'static str)>,
}

impl TypoPatternSet {
    /// The process-wide set, built on first use.
    pub fn get() -> &'static TypoPatternSet {
        &PATTERNS
    }

    fn build() -> Self {
        let mut keywords: Vec<&'static str> = TYPO_KEYWORDS.to_vec();
        for &(main, companions) in CONTEXTS {
            keywords.push(main);
            keywords.extend_from_slice(companions);
        }
        let mut seen = HashSet::new();
        keywords.retain(|kw| seen.insert(*kw));

        let known: HashSet<&str> = BROAD.iter().copied().chain(keywords.iter().copied()).collect();

        let mut variants = IndexMap::new();
        let mut index: HashMap<String, Vec<&'static str>> = HashMap::new();
        for &keyword in &keywords {
            let mut own = IndexMap::new();
            for (variant, kind) in generate(keyword) {
                if variant == keyword || variant.chars().count() < 2 || known.contains(variant.as_str())
                {
                    continue;
                }
                own.entry(variant).or_insert(kind);
            }
            for variant in own.keys() {
                index.entry(variant.clone()).or_default().push(keyword);
            }
            variants.insert(keyword, own);
        }

        let contexts = CONTEXTS
            .iter()
            .flat_map(|&(main, companions)| companions.iter().map(move |&c| (main, c)))
            .collect();

        Self {
            variants,
            index,
            contexts,
        }
    }

    /// Variants generated for `keyword`, in generation order.
    pub fn variants(&self, keyword: &str) -> impl Iterator<Item = (&str, VariantKind)> {
        self.variants
            .get(&*keyword.to_uppercase())
            .into_iter()
            .flat_map(|m| m.iter().map(|(v, k)| (v.as_str(), *k)))
    }

    /// Keywords `word` is a misspelling of. Exact keywords map to nothing.
    pub fn keywords_for(&self, word: &str) -> &[&'static str] {
        self.index
            .get(&*word.to_uppercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_typo_of(&self, word: &str, keyword: &str) -> bool {
        self.keywords_for(word).contains(&keyword)
    }

    /// (primary keyword, companion) pairs.
    pub fn contexts(&self) -> &[(&'static str, &'static str)] {
        &self.contexts
    }

    /// Number of keywords with generated variants.
    pub fn keyword_count(&self) -> usize {
        self.variants.len()
    }

    pub fn variant_count(&self) -> usize {
        self.variants.values().map(IndexMap::len).sum()
    }
}

fn generate(keyword: &str) -> Vec<(String, VariantKind)> {
    let chars: Vec<char> = keyword.chars().collect();
    let rebuild = |cs: &[char]| cs.iter().collect::<String>();
    let mut out = Vec::new();

    if chars.len() >= 2 {
        for i in 0..chars.len() {
            let mut cs = chars.clone();
            cs.remove(i);
            out.push((rebuild(&cs), VariantKind::MissingChar));
        }
    }

    for i in 0..chars.len().saturating_sub(1) {
        let mut cs = chars.clone();
        cs.swap(i, i + 1);
        out.push((rebuild(&cs), VariantKind::Transposition));
    }

    for i in 0..chars.len() {
        let mut cs = chars.clone();
        cs.insert(i, chars[i]);
        out.push((rebuild(&cs), VariantKind::Doubling));
    }

    for (i, &c) in chars.iter().enumerate() {
        for &n in qwerty_neighbors(c) {
            let mut inserted = chars.clone();
            inserted.insert(i + 1, n);
            out.push((rebuild(&inserted), VariantKind::NeighborInsertion));

            let mut substituted = chars.clone();
            substituted[i] = n;
            out.push((rebuild(&substituted), VariantKind::NeighborSubstitution));
        }
        if let Some(r) = russian_layout(c) {
            let mut cs = chars.clone();
            cs[i] = r;
            out.push((rebuild(&cs), VariantKind::LayoutSubstitution));
        }
    }

    if let Some((_, list)) = COMMON_MISSPELLINGS.iter().find(|(kw, _)| *kw == keyword) {
        out.extend(
            list.iter()
                .map(|m| (m.to_string(), VariantKind::CommonMisspelling)),
        );
    }

    out
}
