//! Catalysts & Sentiment pillar: analyst consensus, the latest rating change
//! and headline polarity.

use chrono::{Duration, NaiveDate};

use crate::models::market::{AnalystRatings, NewsHeadline, RatingChange, RecommendationCounts};
use crate::models::report::{
    CatalystDetails, ConsensusBand, PillarDetails, PillarKind, PillarResult, RatingAction,
};
use crate::signals::sentiment::average_polarity;
use crate::signals::{build_pillar, NEUTRAL_SCORE};

pub const RATING_WINDOW_DAYS: i64 = 30;
pub const CONSENSUS_BLEND: f64 = 0.6;
pub const UPGRADE_DELTA: f64 = 1.5;
pub const DOWNGRADE_DELTA: f64 = -1.5;
pub const SENTIMENT_SCALE: f64 = 2.5;

/// Weighted average of recommendation buckets on a 0-10 scale
pub fn consensus_score(counts: &RecommendationCounts) -> Option<f64> {
    let total = counts.total();
    if total == 0 {
        return None;
    }
    let weighted = 10.0 * counts.strong_buy as f64
        + 8.0 * counts.buy as f64
        + 5.0 * counts.hold as f64
        + 2.0 * counts.sell as f64;
    Some(weighted / total as f64)
}

pub fn consensus_band(score: f64) -> ConsensusBand {
    if score >= 8.0 {
        ConsensusBand::StrongBuyConsensus
    } else if score >= 6.5 {
        ConsensusBand::BuyConsensus
    } else if score >= 4.0 {
        ConsensusBand::Mixed
    } else {
        ConsensusBand::SellConsensus
    }
}

fn grade_rank(grade: &str) -> u8 {
    match grade.trim().to_lowercase().as_str() {
        "strong sell" => 1,
        "sell" | "underweight" => 2,
        "underperform" | "reduce" => 3,
        "buy" | "overweight" | "outperform" | "accumulate" => 5,
        "strong buy" => 6,
        _ => 4,
    }
}

/// Classify one rating change by its action verb, falling back to the grade move
pub fn classify_change(change: &RatingChange) -> RatingAction {
    match change.action.trim().to_lowercase().as_str() {
        "up" | "upgrade" => return RatingAction::Upgrade,
        "down" | "downgrade" => return RatingAction::Downgrade,
        _ => {}
    }
    match (&change.from_grade, &change.to_grade) {
        (Some(from), Some(to)) => {
            let (from, to) = (grade_rank(from), grade_rank(to));
            if to > from {
                RatingAction::Upgrade
            } else if to < from {
                RatingAction::Downgrade
            } else {
                RatingAction::Maintain
            }
        }
        _ => RatingAction::Maintain,
    }
}

pub fn score_catalysts(
    ratings: Option<&AnalystRatings>,
    news: Option<&[NewsHeadline]>,
    as_of: NaiveDate,
) -> PillarResult {
    let mut details = CatalystDetails {
        degraded: ratings.map_or(true, |r| r.changes_unavailable) || news.is_none(),
        ..Default::default()
    };
    let mut score = NEUTRAL_SCORE;

    if let Some(ratings) = ratings {
        if let Some(counts) = &ratings.recommendations {
            details.analyst_count = counts.total();
            if let Some(consensus) = consensus_score(counts) {
                details.consensus_score = Some(consensus);
                details.consensus_band = Some(consensus_band(consensus));
                score += CONSENSUS_BLEND * (consensus - NEUTRAL_SCORE);
            }
        }

        let window_start = as_of - Duration::days(RATING_WINDOW_DAYS);
        let mut recent: Vec<&RatingChange> = ratings
            .changes
            .iter()
            .filter(|c| c.date >= window_start && c.date <= as_of)
            .collect();
        recent.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.firm.cmp(&b.firm)));

        for change in &recent {
            match classify_change(change) {
                RatingAction::Upgrade => details.upgrades_30d += 1,
                RatingAction::Downgrade => details.downgrades_30d += 1,
                RatingAction::Maintain => {}
            }
        }

        if let Some(latest) = recent.last() {
            let action = classify_change(latest);
            details.latest_action = Some(action);
            details.latest_action_firm = Some(latest.firm.clone());
            details.latest_action_date = Some(latest.date);
            score += match action {
                RatingAction::Upgrade => UPGRADE_DELTA,
                RatingAction::Downgrade => DOWNGRADE_DELTA,
                RatingAction::Maintain => 0.0,
            };
        }
    }

    if let Some(news) = news {
        if let Some((avg, count)) = average_polarity(news.iter().map(|n| n.headline.as_str())) {
            details.avg_sentiment = Some((avg * 1000.0).round() / 1000.0);
            details.articles_analyzed = count;
            score += avg * SENTIMENT_SCALE;
        }
    }

    build_pillar(PillarKind::Catalysts, score, PillarDetails::Catalysts(details))
}
