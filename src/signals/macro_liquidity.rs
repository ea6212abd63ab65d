//! Macro Liquidity pillar and the net-liquidity chart series.
//!
//! Net liquidity is the Fed balance sheet minus the Treasury General Account
//! minus the reverse repo facility, aligned on the union of observation dates
//! with each input carried forward until its next print.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::indicators::math::{linear_slope, round_to};
use crate::models::market::{MacroObservation, MacroSeries, PriceBar};
use crate::models::report::{MacroDetails, PillarDetails, PillarKind, PillarResult, SpreadTrend};
use crate::signals::{build_pillar, NEUTRAL_SCORE};

pub const SLOPE_WINDOW: usize = 20;
pub const EXPANDING_BONUS: f64 = 2.5;
pub const CONTRACTING_PENALTY: f64 = -1.5;
pub const SPREAD_RISK_OFF: f64 = 4.0;
pub const SPREAD_SLOPE_RISK_OFF: f64 = 0.01;
pub const RISK_OFF_PENALTY: f64 = -2.0;
pub const RISK_ON_BONUS: f64 = 1.5;
/// Ceiling applied when liquidity contracts while spreads are elevated
pub const DEFENSIVE_CEILING: f64 = 3.0;
/// Points returned by the chart endpoint
pub const CHART_POINTS: usize = 90;

/// Score adjustments for the macro pillar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroRules {
    pub expanding_bonus: f64,
    pub contracting_penalty: f64,
    pub spread_risk_off: f64,
    pub spread_slope_risk_off: f64,
    pub risk_off_penalty: f64,
    pub risk_on_bonus: f64,
    /// Upper bound on the pillar score while liquidity contracts and the
    /// spread sits above `spread_risk_off`, whatever the other terms add up to
    pub defensive_ceiling: f64,
}

pub const MACRO_RULES: MacroRules = MacroRules {
    expanding_bonus: EXPANDING_BONUS,
    contracting_penalty: CONTRACTING_PENALTY,
    spread_risk_off: SPREAD_RISK_OFF,
    spread_slope_risk_off: SPREAD_SLOPE_RISK_OFF,
    risk_off_penalty: RISK_OFF_PENALTY,
    risk_on_bonus: RISK_ON_BONUS,
    defensive_ceiling: DEFENSIVE_CEILING,
};

/// One aligned observation, in millions of dollars
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetLiquidityPoint {
    pub date: NaiveDate,
    pub net_liquidity: f64,
    pub credit_spread: Option<f64>,
}

/// Carries the latest value at or before each requested date
struct ForwardFill<'a> {
    observations: &'a [MacroObservation],
    cursor: usize,
    current: Option<f64>,
}

impl<'a> ForwardFill<'a> {
    fn new(observations: &'a [MacroObservation]) -> Self {
        Self {
            observations,
            cursor: 0,
            current: None,
        }
    }

    fn advance_to(&mut self, date: NaiveDate) -> Option<f64> {
        while let Some(obs) = self.observations.get(self.cursor) {
            if obs.date > date {
                break;
            }
            if obs.value.is_finite() {
                self.current = Some(obs.value);
            }
            self.cursor += 1;
        }
        self.current
    }
}

fn sorted(observations: &[MacroObservation]) -> Vec<MacroObservation> {
    let mut out = observations.to_vec();
    out.sort_by_key(|o| o.date);
    out
}

/// Aligned net-liquidity series, starting at the first date all three inputs are known
pub fn net_liquidity_series(series: &MacroSeries) -> Vec<NetLiquidityPoint> {
    let walcl = sorted(&series.fed_balance_sheet);
    let tga = sorted(&series.treasury_general_account);
    let rrp = sorted(&series.reverse_repo);
    let spread = sorted(&series.credit_spread);

    let dates: BTreeSet<NaiveDate> = walcl
        .iter()
        .chain(tga.iter())
        .chain(rrp.iter())
        .map(|o| o.date)
        .collect();

    let mut walcl = ForwardFill::new(&walcl);
    let mut tga = ForwardFill::new(&tga);
    let mut rrp = ForwardFill::new(&rrp);
    let mut spread = ForwardFill::new(&spread);

    dates
        .into_iter()
        .filter_map(|date| {
            let (w, t, r) = (walcl.advance_to(date), tga.advance_to(date), rrp.advance_to(date));
            let credit_spread = spread.advance_to(date);
            Some(NetLiquidityPoint {
                date,
                net_liquidity: w? - t? - r?,
                credit_spread,
            })
        })
        .collect()
}

fn tail<T>(values: &[T], n: usize) -> &[T] {
    &values[values.len().saturating_sub(n)..]
}

pub fn score_macro(series: Option<&MacroSeries>) -> PillarResult {
    score_macro_with(series, &MACRO_RULES)
}

pub fn score_macro_with(series: Option<&MacroSeries>, rules: &MacroRules) -> PillarResult {
    let Some(series) = series else {
        let details = MacroDetails {
            degraded: true,
            ..Default::default()
        };
        return build_pillar(PillarKind::Macro, NEUTRAL_SCORE, PillarDetails::Macro(details));
    };

    let points = net_liquidity_series(series);
    let mut details = MacroDetails {
        observations: points.len(),
        ..Default::default()
    };
    if points.len() < SLOPE_WINDOW {
        details.degraded = true;
        return build_pillar(PillarKind::Macro, NEUTRAL_SCORE, PillarDetails::Macro(details));
    }

    let mut score = NEUTRAL_SCORE;

    let recent: Vec<f64> = tail(&points, SLOPE_WINDOW).iter().map(|p| p.net_liquidity).collect();
    let current = recent.last().copied().unwrap_or_default();
    let slope = linear_slope(&recent).unwrap_or(0.0);
    let expanding = slope > 0.0;
    details.net_liquidity_current = Some(round_to(current, 2));
    details.net_liquidity_slope = Some(round_to(slope, 2));
    details.net_liquidity_slope_pct = (current != 0.0).then(|| round_to(slope / current * 100.0, 4));
    details.liquidity_expanding = Some(expanding);
    score += if expanding {
        rules.expanding_bonus
    } else {
        rules.contracting_penalty
    };

    let spreads = sorted(&series.credit_spread);
    let spread_values: Vec<f64> = tail(&spreads, SLOPE_WINDOW)
        .iter()
        .map(|o| o.value)
        .filter(|v| v.is_finite())
        .collect();
    let spread_now = spread_values.last().copied();
    let spread_slope = linear_slope(&spread_values);

    details.credit_spread = spread_now.map(|v| round_to(v, 2));
    details.credit_spread_trend = spread_slope.map(|s| {
        if s > 0.0 {
            SpreadTrend::Rising
        } else {
            SpreadTrend::Falling
        }
    });

    let elevated = spread_now.is_some_and(|v| v > rules.spread_risk_off);
    match spread_now {
        Some(_) => {
            let risk_off = elevated || spread_slope.unwrap_or(0.0) > rules.spread_slope_risk_off;
            details.risk_off = Some(risk_off);
            score += if risk_off {
                rules.risk_off_penalty
            } else {
                rules.risk_on_bonus
            };
        }
        None => details.degraded = true,
    }

    if !expanding && elevated {
        score = score.min(rules.defensive_ceiling);
        details.defensive_cap_applied = true;
    }

    build_pillar(PillarKind::Macro, score, PillarDetails::Macro(details))
}

/// One chart row: net liquidity in trillions, both lines normalised to 100 at the first row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetLiquidityRow {
    pub date: NaiveDate,
    pub net_liquidity: f64,
    pub net_liquidity_norm: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spy_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spy_norm: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetLiquidityReport {
    pub data: Vec<NetLiquidityRow>,
    pub current_net_liquidity: Option<f64>,
    pub credit_spread: Option<f64>,
}

const MILLIONS_PER_TRILLION: f64 = 1_000_000.0;

/// Chart series for the macro endpoint, optionally overlaid with SPY closes
pub fn net_liquidity_report(series: &MacroSeries, spy: Option<&[PriceBar]>) -> NetLiquidityReport {
    let points = net_liquidity_series(series);

    let spy_closes: Vec<MacroObservation> = spy
        .unwrap_or_default()
        .iter()
        .map(|b| MacroObservation {
            date: b.date,
            value: b.close,
        })
        .collect();
    let spy_closes = sorted(&spy_closes);
    let mut spy_fill = ForwardFill::new(&spy_closes);

    let liquidity_base = points.first().map(|p| p.net_liquidity).filter(|v| *v != 0.0);
    let mut spy_base: Option<f64> = None;

    let rows: Vec<NetLiquidityRow> = points
        .iter()
        .map(|p| {
            let spy_price = spy_fill.advance_to(p.date);
            if spy_base.is_none() {
                spy_base = spy_price.filter(|v| *v != 0.0);
            }
            NetLiquidityRow {
                date: p.date,
                net_liquidity: round_to(p.net_liquidity / MILLIONS_PER_TRILLION, 2),
                net_liquidity_norm: liquidity_base
                    .map(|base| round_to(p.net_liquidity / base * 100.0, 2))
                    .unwrap_or(100.0),
                spy_price: spy_price.map(|v| round_to(v, 2)),
                spy_norm: spy_price
                    .zip(spy_base)
                    .map(|(price, base)| round_to(price / base * 100.0, 2)),
            }
        })
        .collect();

    NetLiquidityReport {
        data: tail(&rows, CHART_POINTS).to_vec(),
        current_net_liquidity: points
            .last()
            .map(|p| round_to(p.net_liquidity / MILLIONS_PER_TRILLION, 2)),
        credit_spread: points
            .last()
            .and_then(|p| p.credit_spread)
            .map(|v| round_to(v, 2)),
    }
}
