//! Selector parsing and period options
//!
//! Every report endpoint accepts `scope`, `period`, `regime`, `start` and
//! `end` query parameters. Missing ones fall back to the dashboard defaults
//! from the configuration.

use std::collections::{BTreeSet, HashMap};

use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use ledgerdash_config::{Config, Period, Regime};
use ledgerdash_core::{DashboardQuery, Ledger, TimeContext};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Build the report query from request parameters
pub fn resolve_query(
    params: &HashMap<String, String>,
    ledger: &Ledger,
    config: &Config,
) -> ApiResult<DashboardQuery> {
    let defaults = &config.dashboard;

    let scope = ledger.parse_scope(param(params, "scope").unwrap_or(defaults.default_scope.as_str()))?;

    let period = match param(params, "period") {
        Some(value) => value.parse::<Period>().map_err(ApiError::bad_request)?,
        None => defaults.default_period,
    };

    let regime = match param(params, "regime") {
        Some(value) => value.parse::<Regime>().map_err(ApiError::bad_request)?,
        None => defaults.default_regime,
    };

    let time = if period == Period::Custom {
        let start = date_param(params, "start")?;
        let end = date_param(params, "end")?;
        match (start, end) {
            (Some(start), Some(end)) => TimeContext::custom(start, end),
            _ => return Err(ApiError::bad_request("A custom period needs both start and end")),
        }
    } else {
        TimeContext::new(period)
    };

    Ok(DashboardQuery::new(scope, time, regime).with_limits(defaults))
}

fn param<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params.get(key).map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn date_param(params: &HashMap<String, String>, key: &str) -> ApiResult<Option<NaiveDate>> {
    param(params, key)
        .map(|value| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map_err(|_| ApiError::bad_request(format!("Invalid {} date '{}', expected YYYY-MM-DD", key, value)))
        })
        .transpose()
}

#[derive(Debug, Serialize)]
pub struct PeriodOption {
    pub value: String,
    pub label: String,
}

/// Selectable periods with their display labels
pub async fn api_periods() -> Json<Vec<PeriodOption>> {
    let options = [
        Period::CurrentMonth,
        Period::PreviousMonth,
        Period::CurrentYear,
        Period::Trailing12Months,
        Period::AllTime,
        Period::Custom,
    ]
    .into_iter()
    .map(|period| PeriodOption {
        value: period.to_string(),
        label: TimeContext::new(period).description(),
    })
    .collect();
    Json(options)
}

/// Months that have at least one transaction, most recent first
pub async fn api_months(State(state): State<AppState>) -> Json<Vec<String>> {
    let ledger = state.ledger.read().await;
    let months: BTreeSet<String> = ledger
        .data()
        .transactions
        .iter()
        .filter_map(|tx| tx.month_key())
        .collect();
    Json(months.into_iter().rev().collect())
}
