use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    pub fn weight(self) -> f64 {
        match self {
            Polarity::Positive => 1.0,
            Polarity::Negative => -1.0,
        }
    }
}

const POSITIVE: &[&str] = &[
    // general approval
    "good", "great", "excellent", "amazing", "wonderful", "fantastic", "positive", "best",
    "better", "outstanding", "superb", "brilliant", "awesome", "incredible", "magnificent",
    "marvelous",
    // success and achievement
    "success", "successful", "win", "winning", "victory", "victorious", "achievement",
    "accomplish", "breakthrough", "progress", "growth", "improve", "improvement", "advance",
    "rise", "boost", "surge", "gain", "profit", "benefit", "advantage", "opportunity", "record",
    "high",
    // emotion
    "love", "happy", "happiness", "joy", "joyful", "celebrate", "celebration", "triumph",
    "pleased", "delighted", "excited", "thrilled", "optimistic", "hope", "hopeful", "confident",
    "proud", "satisfaction", "smile", "laugh", "peace", "peaceful", "calm",
    // quality and endorsement
    "quality", "premium", "top", "leading", "first", "winner", "champion", "hero", "star",
    "approve", "support", "agree", "accept", "welcome", "embrace", "praise", "appreciate", "thank",
    "gratitude", "honor", "respect", "admire", "inspire", "motivate",
    // health and safety
    "health", "healthy", "cure", "heal", "recover", "recovery", "save", "rescue", "help", "relief",
    "comfort", "safe", "safety", "secure", "protect", "strengthen", "strong",
];

const NEGATIVE: &[&str] = &[
    // general disapproval
    "bad", "terrible", "awful", "horrible", "worst", "worse", "negative", "poor", "fail",
    "failure", "failed", "failing", "loss", "lose", "losing", "lost", "defeat", "beaten",
    // crisis
    "crisis", "problem", "problems", "issue", "issues", "trouble", "difficulty", "challenge",
    "concern", "worry", "worried", "fear", "afraid", "scared", "panic", "anxiety", "stress",
    "decline", "decrease", "drop", "fall", "crash", "collapse", "breakdown", "recession",
    // violence and conflict
    "disaster", "catastrophe", "tragedy", "tragic", "death", "die", "died", "kill", "killed",
    "murder", "shooting", "violence", "violent", "attack", "assault", "bomb", "explosion", "war",
    "warfare", "conflict", "fight", "battle", "terrorism", "terrorist", "threat", "threaten",
    "danger", "dangerous", "risk", "risky", "harm", "damage", "destroy",
    // emotion
    "hate", "angry", "anger", "rage", "furious", "mad", "upset", "disappointed", "sad", "sadness",
    "depression", "depressed", "miserable", "unhappy", "cry", "tears", "grief", "hurt", "pain",
    "suffer", "suffering", "agony", "torture", "abuse", "victim",
    // wrongdoing
    "corrupt", "corruption", "scandal", "fraud", "lie", "lying", "cheat", "steal", "theft",
    "crime", "criminal", "illegal", "arrest", "prison", "jail", "guilty", "blame", "fault",
    // rejection
    "reject", "denial", "refuse", "oppose", "against", "protest", "criticize", "condemn",
    "dispute", "disagree", "controversy", "controversial", "boycott", "ban", "forbid",
];

static BUILTIN: Lazy<Arc<SentimentLexicon>> =
    Lazy::new(|| Arc::new(SentimentLexicon::from_words(POSITIVE, NEGATIVE)));

/// Token to polarity table. Built once, never written after construction.
#[derive(Debug, Clone)]
pub struct SentimentLexicon {
    entries: HashMap<String, Polarity>,
}

impl SentimentLexicon {
    /// A word listed in both sets keeps its positive polarity.
    pub fn from_words<P, N>(positive: P, negative: N) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        let mut entries = HashMap::new();
        for w in negative {
            entries.insert(w.as_ref().to_lowercase(), Polarity::Negative);
        }
        for w in positive {
            entries.insert(w.as_ref().to_lowercase(), Polarity::Positive);
        }
        Self { entries }
    }

    /// The built-in English news lexicon, shared process-wide.
    pub fn builtin() -> Arc<SentimentLexicon> {
        Arc::clone(&BUILTIN)
    }

    pub fn polarity(&self, token: &str) -> Option<Polarity> {
        self.entries.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
