//! Event Risk pillar and the earnings blackout gate

use chrono::NaiveDate;

use crate::indicators::math::round_to;
use crate::models::market::{EarningsCalendar, OptionsSentiment};
use crate::models::report::{
    BlackoutReason, EventRiskDetails, EventRiskState, PillarDetails, PillarKind, PillarResult,
};
use crate::signals::{build_pillar, NEUTRAL_SCORE, MAX_SCORE, MIN_SCORE};

/// Blackout starts this many days before the next release (exclusive)
pub const PRE_EARNINGS_DAYS: i64 = 15;
/// Blackout continues this many days after the last release (inclusive)
pub const POST_EARNINGS_DAYS: i64 = 5;
pub const PCR_WARNING: f64 = 2.0;
pub const PCR_PENALTY: f64 = -3.0;

/// Blackout state for the given calendar; a release on `as_of` itself counts as pre-earnings
pub fn blackout_state(calendar: &EarningsCalendar, as_of: NaiveDate) -> EventRiskState {
    let days_to = calendar
        .next
        .map(|d| (d - as_of).num_days())
        .filter(|d| *d >= 0);
    let days_since = calendar.last.map(|d| (as_of - d).num_days());

    let reason = if days_to.is_some_and(|d| d < PRE_EARNINGS_DAYS) {
        BlackoutReason::PreEarnings
    } else if days_since.is_some_and(|d| (1..=POST_EARNINGS_DAYS).contains(&d)) {
        BlackoutReason::PostEarnings
    } else {
        BlackoutReason::None
    };

    EventRiskState {
        blackout: reason != BlackoutReason::None,
        reason,
        days_to_earnings: days_to,
        put_call_ratio: None,
    }
}

pub fn score_event_risk(
    earnings: Option<&EarningsCalendar>,
    options: Option<&OptionsSentiment>,
    as_of: NaiveDate,
) -> PillarResult {
    let put_call_ratio = options.and_then(|o| o.put_call_ratio()).map(|v| round_to(v, 2));
    let pcr_warning = put_call_ratio.is_some_and(|v| v > PCR_WARNING);

    let Some(calendar) = earnings else {
        let details = EventRiskDetails {
            state: EventRiskState {
                put_call_ratio,
                ..Default::default()
            },
            pcr_warning,
            degraded: true,
            ..Default::default()
        };
        let score = NEUTRAL_SCORE + if pcr_warning { PCR_PENALTY } else { 0.0 };
        return build_pillar(PillarKind::EventRisk, score, PillarDetails::EventRisk(details));
    };

    let mut state = blackout_state(calendar, as_of);
    state.put_call_ratio = put_call_ratio;

    let mut score = if state.blackout { MIN_SCORE } else { MAX_SCORE };
    if pcr_warning {
        score += PCR_PENALTY;
    }

    let details = EventRiskDetails {
        state,
        next_earnings: calendar.next,
        last_earnings: calendar.last,
        days_since_earnings: calendar.last.map(|d| (as_of - d).num_days()),
        pcr_warning,
        degraded: options.is_none(),
    };
    build_pillar(PillarKind::EventRisk, score, PillarDetails::EventRisk(details))
}
