//! Typo-tolerant "does this look like a query" classification.
//!
//! Rules are tried in tier order and the first that fires decides:
//! 1. host-language code indicators reject the text outright
//! 2. a strong keyword (`SELECT`, `DROP`, ...) accepts
//! 3. two distinct broad keywords accept
//! 4. misspelled keywords accept, either in a primary/companion context
//!    or as two distinct misspelled keywords
//!
//! Matching is case-insensitive on whole words.

mod keywords;
mod typos;

#[cfg(test)]
mod typos_tests;

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex_automata::meta::Regex;
use regex_automata::util::syntax;
use serde::Serialize;

pub use keywords::{BROAD, CONTEXTS, STRONG, TYPO_KEYWORDS};
pub use typos::{TypoPatternSet, VariantKind};

/// Python constructs that never appear in a query.
const HOST_INDICATORS: &[(&str, &str)] = &[
    (r"\.execute\(", ".execute("),
    (r"\.fetchall\(\)", ".fetchall()"),
    (r"\.fetchone\(\)", ".fetchone()"),
    (r"\bcursor\.", "cursor."),
    (r"\bconn\.", "conn."),
    (r"\bimport\s+\w", "import"),
    (r"\bdef\s+\w+\s*\(", "def"),
    (r"\bclass\s+\w+\s*[:(]", "class"),
    (r"^from\s+[\w.]+\s+import\b", "from ... import"),
];

static HOST_RE: LazyLock<Regex> =
    LazyLock::new(|| build(HOST_INDICATORS.iter().map(|(p, _)| (*p).to_owned())));

static STRONG_RE: LazyLock<Regex> =
    LazyLock::new(|| build(STRONG.iter().map(|kw| format!(r"\b{kw}\b"))));

static BROAD_RE: LazyLock<Regex> =
    LazyLock::new(|| build(BROAD.iter().map(|kw| format!(r"\b{kw}\b"))));

fn build(patterns: impl Iterator<Item = String>) -> Regex {
    let patterns: Vec<String> = patterns.collect();
    Regex::builder()
        .syntax(syntax::Config::new().case_insensitive(true).unicode(false))
        .build_many(&patterns)
        .expect("keyword patterns are valid")
}

/// Rule tiers, in the order they are tried.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    HostCode,
    StrongKeyword,
    KeywordCombination,
    TypoPattern,
    NoMatch,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::HostCode => "host-code",
            Tier::StrongKeyword => "strong-keyword",
            Tier::KeywordCombination => "keyword-combination",
            Tier::TypoPattern => "typo-pattern",
            Tier::NoMatch => "no-match",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The rule that decided a verdict, with what it matched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "kebab-case")]
pub enum MatchedRule {
    HostCode { indicator: &'static str },
    StrongKeyword { keyword: &'static str },
    KeywordCombination { keywords: Vec<&'static str> },
    /// A primary keyword followed by a companion, at least one misspelled.
    TypoContext {
        keyword: &'static str,
        companion: &'static str,
    },
    /// Two or more distinct keywords, each only present misspelled.
    TypoWords { keywords: Vec<&'static str> },
    NoMatch,
}

impl MatchedRule {
    pub fn tier(&self) -> Tier {
        match self {
            MatchedRule::HostCode { .. } => Tier::HostCode,
            MatchedRule::StrongKeyword { .. } => Tier::StrongKeyword,
            MatchedRule::KeywordCombination { .. } => Tier::KeywordCombination,
            MatchedRule::TypoContext { .. } | MatchedRule::TypoWords { .. } => Tier::TypoPattern,
            MatchedRule::NoMatch => Tier::NoMatch,
        }
    }
}

impl fmt::Display for MatchedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchedRule::HostCode { indicator } => write!(f, "host code (`{indicator}`)"),
            MatchedRule::StrongKeyword { keyword } => write!(f, "strong keyword {keyword}"),
            MatchedRule::KeywordCombination { keywords } => {
                write!(f, "keywords {}", keywords.join(", "))
            }
            MatchedRule::TypoContext { keyword, companion } => {
                write!(f, "misspelled {keyword} ... {companion}")
            }
            MatchedRule::TypoWords { keywords } => {
                write!(f, "misspelled keywords {}", keywords.join(", "))
            }
            MatchedRule::NoMatch => f.write_str("no match"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub is_query_like: bool,
    #[serde(flatten)]
    pub rule: MatchedRule,
}

impl Verdict {
    fn accept(rule: MatchedRule) -> Self {
        Self {
            is_query_like: true,
            rule,
        }
    }

    fn reject(rule: MatchedRule) -> Self {
        Self {
            is_query_like: false,
            rule,
        }
    }

    pub fn tier(&self) -> Tier {
        self.rule.tier()
    }
}

/// Stateless classifier; the pattern tables are shared process-wide.
#[derive(Clone, Copy, Debug)]
pub struct Classifier {
    typos: &'static TypoPatternSet,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            typos: TypoPatternSet::get(),
        }
    }

    pub fn is_query_like(&self, text: &str) -> bool {
        self.classify(text).is_query_like
    }

    pub fn classify(&self, text: &str) -> Verdict {
        let text = normalize_whitespace(text);
        if text.is_empty() {
            return Verdict::reject(MatchedRule::NoMatch);
        }

        if let Some(m) = HOST_RE.find(text.as_str()) {
            let indicator = HOST_INDICATORS[m.pattern().as_usize()].1;
            return Verdict::reject(MatchedRule::HostCode { indicator });
        }

        if let Some(m) = STRONG_RE.find(text.as_str()) {
            let keyword = STRONG[m.pattern().as_usize()];
            return Verdict::accept(MatchedRule::StrongKeyword { keyword });
        }

        let mut keywords = Vec::new();
        for m in BROAD_RE.find_iter(text.as_str()) {
            let keyword = BROAD[m.pattern().as_usize()];
            if !keywords.contains(&keyword) {
                keywords.push(keyword);
            }
        }
        if keywords.len() >= 2 {
            return Verdict::accept(MatchedRule::KeywordCombination { keywords });
        }

        let words: Vec<String> = words(&text).map(str::to_uppercase).collect();
        if let Some((keyword, companion)) = self.typo_context(&words) {
            return Verdict::accept(MatchedRule::TypoContext { keyword, companion });
        }

        let keywords = self.typo_words(&words);
        if keywords.len() >= 2 {
            return Verdict::accept(MatchedRule::TypoWords { keywords });
        }

        Verdict::reject(MatchedRule::NoMatch)
    }

    /// First (primary, companion) pair where the primary precedes the
    /// companion and at least one of the two is misspelled.
    fn typo_context(&self, words: &[String]) -> Option<(&'static str, &'static str)> {
        let first = |pred: &dyn Fn(&str) -> bool| words.iter().position(|w| pred(w));
        let last = |pred: &dyn Fn(&str) -> bool| words.iter().rposition(|w| pred(w));

        self.typos
            .contexts()
            .iter()
            .copied()
            .find(|&(main, companion)| {
                let main_typo = first(&|w| self.typos.is_typo_of(w, main));
                let main_exact = first(&|w| w == main);
                let comp_typo = last(&|w| self.typos.is_typo_of(w, companion));
                let comp_exact = last(&|w| w == companion);

                let before = |a: Option<usize>, b: Option<usize>| {
                    matches!((a, b), (Some(i), Some(j)) if i < j)
                };
                before(main_typo, comp_exact)
                    || before(main_exact, comp_typo)
                    || before(main_typo, comp_typo)
            })
    }

    /// Distinct keywords with at least one misspelled occurrence.
    fn typo_words(&self, words: &[String]) -> Vec<&'static str> {
        let word_keywords: HashSet<&str> = TYPO_KEYWORDS.iter().copied().collect();
        let mut found = Vec::new();
        for word in words {
            for &keyword in self.typos.keywords_for(word) {
                if word_keywords.contains(keyword) && !found.contains(&keyword) {
                    found.push(keyword);
                }
            }
        }
        found
    }
}

/// Collapses whitespace runs to one space and trims both ends.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
}
