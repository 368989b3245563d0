//! Spreadsheet-backed plan cache read through the Sheets `values` API.
//!
//! The sheet is a table whose first row is a header. Columns are found by
//! name, so their order in the sheet does not matter. Rows are appended
//! over time, so the bottom-most match is the most recent plan.

use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;

use super::{PlanLookup, UpstreamError};
use crate::config::SheetsConfig;
use crate::domain::TripQuery;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// Column positions of the plan table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    from: usize,
    to: usize,
    days: usize,
    budget: usize,
    plan: usize,
}

impl Columns {
    fn locate(header: &[String]) -> Result<Self, UpstreamError> {
        let find = |names: &[&str], field: &'static str| {
            header
                .iter()
                .position(|h| {
                    let h = h.trim();
                    names.iter().any(|n| h.eq_ignore_ascii_case(n))
                })
                .ok_or(UpstreamError::MissingField(field))
        };
        Ok(Self {
            from: find(&["from", "origin"], "sheet column `from`")?,
            to: find(&["to", "destination"], "sheet column `to`")?,
            days: find(&["days"], "sheet column `days`")?,
            budget: find(&["budget"], "sheet column `budget`")?,
            plan: find(&["plan"], "sheet column `plan`")?,
        })
    }
}

fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map_or("", |c| c.trim())
}

/// Finds the most recent stored plan for `query` in a header-first table.
///
/// Locations match case-insensitively; days and budget must equal the
/// query's canonical text exactly. Rows with an empty plan are skipped.
///
/// # Errors
///
/// Returns [`UpstreamError::MissingField`] if the header lacks a
/// required column.
pub fn find_in_rows(
    rows: &[Vec<String>],
    query: &TripQuery,
) -> Result<Option<String>, UpstreamError> {
    let Some((header, data)) = rows.split_first() else {
        return Ok(None);
    };
    let columns = Columns::locate(header)?;
    let days = query.days_text();
    let budget = query.budget_text();

    Ok(data
        .iter()
        .rev()
        .find(|row| {
            cell(row, columns.from).eq_ignore_ascii_case(query.origin())
                && cell(row, columns.to).eq_ignore_ascii_case(query.destination())
                && cell(row, columns.days) == days
                && cell(row, columns.budget) == budget
                && !cell(row, columns.plan).is_empty()
        })
        .map(|row| cell(row, columns.plan).to_string()))
}

/// Sheets API client implementing [`PlanLookup`].
pub struct SheetsClient {
    client: reqwest::Client,
    url: reqwest::Url,
    api_key: String,
}

impl fmt::Debug for SheetsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetsClient")
            .field("url", &self.url.as_str())
            .finish_non_exhaustive()
    }
}

impl SheetsClient {
    /// Creates a client for the sheet and range named in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::InvalidUrl`] if the base URL cannot carry
    /// a path.
    pub fn new(client: reqwest::Client, config: &SheetsConfig) -> Result<Self, UpstreamError> {
        let mut url = reqwest::Url::parse(&config.base_url)
            .map_err(|e| UpstreamError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| UpstreamError::InvalidUrl(config.base_url.clone()))?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                config.spreadsheet_id.as_str(),
                "values",
                config.range.as_str(),
            ]);
        Ok(Self {
            client,
            url,
            api_key: config.api_key.clone(),
        })
    }

    async fn fetch_rows(&self) -> Result<Vec<Vec<String>>, UpstreamError> {
        let response = self
            .client
            .get(self.url.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(UpstreamError::from_response(response).await);
        }

        let text = response.text().await?;
        let range: ValueRange =
            serde_json::from_str(&text).map_err(|e| UpstreamError::Malformed(e.to_string()))?;
        Ok(range.values)
    }
}

#[async_trait]
impl PlanLookup for SheetsClient {
    async fn find_plan(&self, query: &TripQuery) -> Result<Option<String>, UpstreamError> {
        let rows = self.fetch_rows().await?;
        let plan = find_in_rows(&rows, query)?;
        tracing::debug!(trip = %query, rows = rows.len(), hit = plan.is_some(), "sheet lookup");
        Ok(plan)
    }
}
