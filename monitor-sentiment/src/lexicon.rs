//! # Headline Lexicon
//!
//! Rule-based polarity scorer in the style of VADER: word valences on a
//! -4..=4 scale, negation and booster handling, contrastive "but", and a
//! compound score normalized into [-1, 1]. Fully deterministic.

use std::collections::{HashMap, HashSet};

use monitor_core::Sentiment;

/// Compound score above which text is positive (and below the negation of which it is negative)
pub const COMPOUND_THRESHOLD: f64 = 0.05;

/// Normalization constant approximating the max expected squared sum
const ALPHA: f64 = 15.0;

/// Scalar applied to a valence preceded by a negation
const NEGATION_SCALAR: f64 = -0.74;

/// Booster increment/decrement
const BOOSTER_INCR: f64 = 0.293;

/// Extra weight for an ALL-CAPS sentiment word in mixed-case text
const CAPS_INCR: f64 = 0.733;

/// Per '!' emphasis, counted up to four
const EXCLAMATION_INCR: f64 = 0.292;

/// How far back negations and boosters reach
const LOOKBACK: usize = 3;

#[rustfmt::skip]
const VALENCES: &[(&str, f64)] = &[
    // Positive: corporate and market
    ("profit", 1.9), ("profitable", 1.9), ("gain", 2.0), ("growth", 1.8), ("grow", 1.6),
    ("surge", 1.9), ("soar", 2.2), ("rally", 1.7), ("jump", 1.3), ("rise", 1.2),
    ("climb", 1.2), ("rebound", 1.5), ("recover", 1.6), ("recovery", 1.6), ("boost", 1.7),
    ("beat", 1.3), ("outperform", 1.8), ("upgrade", 1.7), ("bullish", 2.1), ("dividend", 1.0),
    ("expand", 1.2), ("expansion", 1.2), ("win", 2.8), ("wins", 2.8), ("award", 2.5),
    ("approve", 1.8), ("approval", 1.8), ("strong", 2.3), ("robust", 1.8), ("success", 2.7),
    ("successful", 2.8), ("breakthrough", 2.0), ("innovative", 2.0), ("improve", 1.9),
    ("improvement", 1.9), ("optimistic", 2.3), ("confident", 2.2), ("confidence", 2.3),
    ("positive", 2.6), ("good", 1.9), ("great", 3.1), ("excellent", 3.2), ("best", 3.2),
    ("better", 1.9), ("benefit", 2.0), ("opportunity", 1.8), ("upbeat", 2.0), ("thrive", 2.4),
    ("milestone", 1.4), ("lead", 0.9), ("secure", 1.4), ("stable", 1.2), ("welcome", 2.0),
    ("celebrate", 2.7), ("happy", 2.7), ("hope", 1.9), ("support", 1.7), ("partnership", 1.2),
    ("upside", 1.6), ("high", 0.7), ("top", 0.8),
    // Negative: corporate and market
    ("loss", -2.2), ("lose", -1.9), ("decline", -1.5), ("fall", -1.3), ("drop", -1.1),
    ("plunge", -2.1), ("crash", -2.5), ("slump", -1.8), ("tumble", -1.8), ("sink", -1.4),
    ("slide", -1.1), ("dip", -0.9), ("slowdown", -1.3), ("downgrade", -1.8), ("bearish", -2.1),
    ("miss", -1.2), ("weak", -1.9), ("weaken", -1.7), ("cut", -1.1), ("layoff", -2.0),
    ("fraud", -3.0), ("scam", -2.9), ("inquiry", -1.1), ("investigation", -1.0), ("penalty", -1.8),
    ("lawsuit", -1.8), ("sue", -1.6), ("default", -1.7), ("debt", -1.2),
    ("bankrupt", -2.8), ("bankruptcy", -2.8), ("crisis", -3.1), ("risk", -1.1), ("fear", -2.2),
    ("worry", -1.9), ("concern", -1.2), ("uncertainty", -1.4), ("volatile", -1.0),
    ("warning", -1.4), ("warn", -1.4), ("threat", -2.4), ("fail", -2.3), ("failure", -2.3),
    ("problem", -1.7), ("trouble", -1.7), ("scandal", -2.7), ("collapse", -2.4),
    ("negative", -2.7), ("bad", -2.5), ("worse", -2.1), ("worst", -3.1), ("poor", -2.1),
    ("delay", -1.3), ("halt", -1.2), ("ban", -2.6), ("reject", -1.7), ("resign", -1.0),
    ("downturn", -1.8), ("recession", -2.2), ("inflation", -0.8), ("selloff", -1.8),
    ("rumor", -0.6), ("rumour", -0.6), ("kill", -3.7), ("war", -2.9), ("attack", -2.1),
    ("death", -2.9), ("disaster", -3.1), ("low", -1.1),
];

/// Words that flip the polarity of the next few sentiment words
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "nobody", "nothing", "nowhere", "none",
    "cannot", "cant", "can't", "don't", "dont", "doesn't", "doesnt", "didn't", "didnt",
    "won't", "wont", "wouldn't", "wouldnt", "shouldn't", "shouldnt", "couldn't", "couldnt",
    "isn't", "isnt", "aren't", "arent", "wasn't", "wasnt", "weren't", "werent", "without",
    "hardly", "barely", "scarcely",
];

/// Degree modifiers: positive entries amplify, negative entries dampen
const BOOSTERS: &[(&str, f64)] = &[
    ("very", BOOSTER_INCR),
    ("extremely", BOOSTER_INCR),
    ("highly", BOOSTER_INCR),
    ("significantly", BOOSTER_INCR),
    ("substantially", BOOSTER_INCR),
    ("sharply", BOOSTER_INCR),
    ("hugely", BOOSTER_INCR),
    ("massively", BOOSTER_INCR),
    ("strongly", BOOSTER_INCR),
    ("most", BOOSTER_INCR),
    ("more", BOOSTER_INCR),
    ("slightly", -BOOSTER_INCR),
    ("somewhat", -BOOSTER_INCR),
    ("marginally", -BOOSTER_INCR),
    ("barely", -BOOSTER_INCR),
    ("less", -BOOSTER_INCR),
];

/// Scores produced for one piece of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarityScores {
    /// Normalized sum of valences in [-1, 1]
    pub compound: f64,
    /// Share of positive weight
    pub positive: f64,
    /// Share of negative weight
    pub negative: f64,
    /// Share of neutral tokens
    pub neutral: f64,
}

impl PolarityScores {
    /// Map the compound score onto a label using the ±0.05 thresholds
    pub fn sentiment(&self) -> Sentiment {
        if self.compound > COMPOUND_THRESHOLD {
            Sentiment::Positive
        } else if self.compound < -COMPOUND_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

/// Lexicon-based polarity scorer
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    valences: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
    boosters: HashMap<&'static str, f64>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            valences: VALENCES.iter().copied().collect(),
            negations: NEGATIONS.iter().copied().collect(),
            boosters: BOOSTERS.iter().copied().collect(),
        }
    }

    /// Label for `text`
    pub fn classify(&self, text: &str) -> Sentiment {
        self.polarity_scores(text).sentiment()
    }

    /// Full score breakdown for `text`
    pub fn polarity_scores(&self, text: &str) -> PolarityScores {
        let tokens: Vec<&str> = text
            .split_whitespace()
            .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
            .filter(|t| !t.is_empty())
            .collect();

        if tokens.is_empty() {
            return PolarityScores {
                compound: 0.0,
                positive: 0.0,
                negative: 0.0,
                neutral: 0.0,
            };
        }

        let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        let mixed_case = tokens.iter().any(|t| !is_all_caps(t));

        let mut valences: Vec<f64> = Vec::with_capacity(tokens.len());
        for (i, word) in lowered.iter().enumerate() {
            if self.boosters.contains_key(word.as_str()) || self.negations.contains(word.as_str()) {
                valences.push(0.0);
                continue;
            }

            let Some(mut valence) = self.lookup(word) else {
                valences.push(0.0);
                continue;
            };

            if mixed_case && is_all_caps(tokens[i]) {
                valence += CAPS_INCR * valence.signum();
            }

            for back in 1..=LOOKBACK.min(i) {
                let prev = lowered[i - back].as_str();
                if let Some(&incr) = self.boosters.get(prev) {
                    let damp = match back {
                        1 => 1.0,
                        2 => 0.95,
                        _ => 0.9,
                    };
                    valence += incr * damp * valence.signum();
                }
            }

            if (1..=LOOKBACK.min(i)).any(|back| self.negations.contains(lowered[i - back].as_str()))
            {
                valence *= NEGATION_SCALAR;
            }

            valences.push(valence);
        }

        // Contrastive "but": soften what precedes it, stress what follows
        if let Some(pivot) = lowered.iter().position(|w| w == "but") {
            for (i, v) in valences.iter_mut().enumerate() {
                if i < pivot {
                    *v *= 0.5;
                } else if i > pivot {
                    *v *= 1.5;
                }
            }
        }

        let mut sum: f64 = valences.iter().sum();
        if sum != 0.0 {
            let exclamations = text.chars().filter(|&c| c == '!').count().min(4) as f64;
            sum += exclamations * EXCLAMATION_INCR * sum.signum();
        }

        let compound = (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0);

        let mut pos = 0.0;
        let mut neg = 0.0;
        let mut neu = 0.0;
        for v in &valences {
            if *v > 0.0 {
                pos += v + 1.0;
            } else if *v < 0.0 {
                neg += v - 1.0;
            } else {
                neu += 1.0;
            }
        }
        let total = pos + neg.abs() + neu;

        PolarityScores {
            compound,
            positive: pos / total,
            negative: neg.abs() / total,
            neutral: neu / total,
        }
    }

    /// Look a word up, falling back to simple inflection stripping
    fn lookup(&self, word: &str) -> Option<f64> {
        if let Some(&v) = self.valences.get(word) {
            return Some(v);
        }

        let mut candidates: Vec<String> = Vec::new();
        for suffix in ["s", "es", "ed", "d", "ing"] {
            if let Some(stem) = word.strip_suffix(suffix) {
                if stem.len() >= 3 {
                    candidates.push(stem.to_string());
                }
            }
        }
        if let Some(stem) = word.strip_suffix("ing") {
            candidates.push(format!("{}e", stem));
        }

        candidates
            .iter()
            .find_map(|c| self.valences.get(c.as_str()).copied())
    }
}

fn is_all_caps(token: &str) -> bool {
    token.chars().any(|c| c.is_alphabetic())
        && token.chars().filter(|c| c.is_alphabetic()).all(|c| c.is_uppercase())
}
