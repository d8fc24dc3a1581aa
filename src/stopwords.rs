use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::Arc;

/// Common English function words excluded from keyword and frequency work.
const ENGLISH: &[&str] = &[
    // articles, conjunctions
    "the", "a", "an", "and", "or", "but", "nor", "so", "yet", "if", "then", "than", "as",
    // prepositions
    "of", "to", "in", "on", "at", "for", "with", "by", "from", "into", "onto", "over", "under",
    "about", "after", "before", "between", "during", "without", "within", "through", "against",
    "among", "across", "upon", "via", "per",
    // auxiliaries
    "is", "are", "was", "were", "be", "been", "being", "am", "have", "has", "had", "having",
    "do", "does", "did", "doing", "will", "would", "could", "should", "shall", "may", "might",
    "must", "can",
    // pronouns and determiners
    "this", "that", "these", "those", "i", "you", "he", "she", "it", "we", "they", "me", "him",
    "her", "us", "them", "my", "your", "his", "its", "our", "their", "mine", "yours", "ours",
    "theirs", "myself", "yourself", "himself", "herself", "itself", "ourselves", "yourselves",
    "themselves", "who", "whom", "whose", "which", "what", "there", "here",
    // quantifiers and fillers
    "not", "no", "all", "any", "each", "every", "both", "few", "more", "most", "less", "some",
    "such", "other", "only", "own", "same", "very", "just", "also", "too", "much", "many",
    // adverbs of time and place
    "when", "where", "why", "how", "now", "once", "again", "while",
];

static ENGLISH_SET: Lazy<Arc<StopwordSet>> =
    Lazy::new(|| Arc::new(StopwordSet::from_words(ENGLISH.iter().copied())));

/// Fixed, read-only set of stopwords. Tokens reaching it are already lowercase.
#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }

    /// The process-wide English set, built on first use.
    pub fn english() -> Arc<StopwordSet> {
        Arc::clone(&ENGLISH_SET)
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
