//! Single-ticker evaluation: indicators, five pillars, aggregation and trade setup.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::EngineResult;
use crate::indicators::math::round_to;
use crate::indicators::{chart_series, compute_snapshot};
use crate::models::market::TickerData;
use crate::models::report::{Pillars, ScoreReport};
use crate::models::ticker::Ticker;
use crate::signals::aggregation::Aggregator;
use crate::signals::categories::{ThresholdTable, THRESHOLDS};
use crate::signals::trade_setup::{calculate_trade_setup, SetupInputs};
use crate::signals::{
    score_catalysts, score_event_risk, score_macro, score_technicals, score_value,
};

pub struct SignalEngine;

impl SignalEngine {
    /// Evaluate with the canonical threshold table
    pub fn evaluate(ticker: &Ticker, data: &TickerData, as_of: NaiveDate) -> EngineResult<ScoreReport> {
        Self::evaluate_with(ticker, data, as_of, &THRESHOLDS)
    }

    /// Pure function of its arguments: identical inputs give identical reports.
    pub fn evaluate_with(
        ticker: &Ticker,
        data: &TickerData,
        as_of: NaiveDate,
        thresholds: &ThresholdTable,
    ) -> EngineResult<ScoreReport> {
        let bars = &data.price_history;
        let snapshot = compute_snapshot(bars)?;
        let price_target = data.ratings.as_ref().and_then(|r| r.price_target.as_ref());

        let pillars = Pillars {
            catalysts: score_catalysts(data.ratings.as_ref(), data.news.as_deref(), as_of),
            technicals: score_technicals(&snapshot, bars.len()),
            value: score_value(
                data.fundamentals.as_ref(),
                data.ratings.as_ref(),
                snapshot.close,
                snapshot.high_52w.ok(),
            ),
            macro_liquidity: score_macro(data.macro_series.as_ref()),
            event_risk: score_event_risk(data.earnings.as_ref(), data.options.as_ref(), as_of),
        };

        let final_score = Aggregator::final_score(&pillars);
        let event_risk = pillars.event_risk_state();
        let (verdict, verdict_type) = Aggregator::verdict(final_score, &event_risk, thresholds);

        let trade_setup = calculate_trade_setup(
            &SetupInputs {
                current_price: snapshot.close,
                atr: snapshot.atr14.ok(),
                final_score,
                blackout: event_risk.blackout,
                price_target,
            },
            thresholds,
        )?;

        debug!(
            ticker = %ticker,
            final_score,
            verdict = verdict.label(),
            blackout = event_risk.blackout,
            "Evaluated ticker"
        );

        let company_name = data
            .profile
            .as_ref()
            .map(|p| p.name.trim())
            .filter(|name| !name.is_empty())
            .unwrap_or(ticker.as_str())
            .to_string();

        Ok(ScoreReport {
            ticker: ticker.to_string(),
            company_name,
            as_of,
            current_price: round_to(snapshot.close, 2),
            final_score,
            verdict: verdict.label().to_string(),
            verdict_type,
            thresholds_version: thresholds.version.to_string(),
            pillars,
            trade_setup,
            price_history: chart_series(bars),
        })
    }
}
