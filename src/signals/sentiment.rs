//! Lexicon-based headline polarity in [-1, 1]

const LEXICON: &[(&str, f64)] = &[
    ("beat", 0.6),
    ("beats", 0.6),
    ("bullish", 0.7),
    ("boost", 0.5),
    ("boosts", 0.5),
    ("breakthrough", 0.7),
    ("gain", 0.4),
    ("gains", 0.4),
    ("growth", 0.4),
    ("good", 0.7),
    ("great", 0.8),
    ("high", 0.16),
    ("improve", 0.5),
    ("improved", 0.5),
    ("jump", 0.4),
    ("jumps", 0.4),
    ("outperform", 0.6),
    ("positive", 0.5),
    ("profit", 0.4),
    ("rally", 0.5),
    ("rallies", 0.5),
    ("record", 0.4),
    ("rise", 0.3),
    ("rises", 0.3),
    ("soar", 0.7),
    ("soars", 0.7),
    ("strong", 0.4),
    ("surge", 0.6),
    ("surges", 0.6),
    ("upgrade", 0.6),
    ("upgraded", 0.6),
    ("win", 0.8),
    ("wins", 0.8),
    ("bad", -0.7),
    ("bearish", -0.7),
    ("cut", -0.4),
    ("cuts", -0.4),
    ("decline", -0.4),
    ("declines", -0.4),
    ("downgrade", -0.6),
    ("downgraded", -0.6),
    ("drop", -0.4),
    ("drops", -0.4),
    ("fall", -0.4),
    ("falls", -0.4),
    ("fraud", -0.9),
    ("lawsuit", -0.6),
    ("loss", -0.5),
    ("losses", -0.5),
    ("miss", -0.5),
    ("misses", -0.5),
    ("negative", -0.5),
    ("plunge", -0.8),
    ("plunges", -0.8),
    ("probe", -0.4),
    ("recall", -0.5),
    ("slump", -0.6),
    ("slumps", -0.6),
    ("tumble", -0.6),
    ("tumbles", -0.6),
    ("warning", -0.4),
    ("weak", -0.4),
    ("worst", -1.0),
];

const NEGATORS: &[&str] = &["not", "no", "never", "without", "isn't", "wasn't", "don't", "doesn't"];
const INTENSIFIERS: &[&str] = &["very", "sharply", "strongly", "significantly", "huge"];

/// Headlines considered per request
pub const MAX_HEADLINES: usize = 10;

fn lookup(word: &str) -> Option<f64> {
    LEXICON.iter().find(|(w, _)| *w == word).map(|(_, p)| *p)
}

/// Mean polarity of the sentiment-bearing words in `text`; 0.0 when there are none.
///
/// A negator flips and halves the next sentiment word, an intensifier scales it by 1.3.
pub fn headline_polarity(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = lowered
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|t| !t.is_empty())
        .collect();

    let mut scores = Vec::new();
    let mut negate = false;
    let mut intensity = 1.0;
    for token in tokens {
        if NEGATORS.contains(&token) {
            negate = true;
            continue;
        }
        if INTENSIFIERS.contains(&token) {
            intensity = 1.3;
            continue;
        }
        if let Some(mut polarity) = lookup(token) {
            polarity *= intensity;
            if negate {
                polarity *= -0.5;
            }
            scores.push(polarity.clamp(-1.0, 1.0));
        }
        negate = false;
        intensity = 1.0;
    }

    if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

/// Average polarity over the first `MAX_HEADLINES` non-blank headlines
pub fn average_polarity<'a, I>(headlines: I) -> Option<(f64, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let polarities: Vec<f64> = headlines
        .into_iter()
        .filter(|h| !h.trim().is_empty())
        .take(MAX_HEADLINES)
        .map(headline_polarity)
        .collect();

    if polarities.is_empty() {
        None
    } else {
        let n = polarities.len();
        Some((polarities.iter().sum::<f64>() / n as f64, n))
    }
}
