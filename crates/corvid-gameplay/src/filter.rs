//! Excluded-term filtering for raven messages.

/// A filter which can check text against an exclusion list.
pub trait ExcludedTermFilter {
    /// Returns whether the text contains an excluded term.
    fn contains_excluded_term(&self, text: &str) -> bool;
}

/// Case-insensitive substring filter over a fixed term list.
#[derive(Debug, Default, Clone)]
pub struct TermListFilter {
    /// Excluded terms, stored lowercased
    terms: Vec<String>,
}

impl TermListFilter {
    /// Creates a filter from a list of excluded terms.
    #[must_use]
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            terms: terms
                .into_iter()
                .map(|t| t.as_ref().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }
}

impl ExcludedTermFilter for TermListFilter {
    fn contains_excluded_term(&self, text: &str) -> bool {
        let haystack = text.to_lowercase();
        self.terms.iter().any(|term| haystack.contains(term))
    }
}

/// A filter that excludes nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoExclusions;

impl ExcludedTermFilter for NoExclusions {
    fn contains_excluded_term(&self, _text: &str) -> bool {
        false
    }
}
