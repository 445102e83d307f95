// src/admin/stats.rs
//
// Registration statistics for the admin dashboard: accounts grouped by
// calendar day (UTC) with a running total, shaped for a line chart.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::auth::{Role, User};

/// Day labels as the dashboard shows them (fr-FR short date)
const LABEL_FORMAT: &str = "%d/%m/%Y";

pub const DAILY_LABEL: &str = "Nouveaux utilisateurs par jour";
pub const TOTAL_LABEL: &str = "Nombre total d'utilisateurs";

/// Per-day registration counts, oldest day first.
///
/// `labels`, `daily` and `cumulative` always have one entry per distinct day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationSeries {
    pub labels: Vec<String>,
    pub daily: Vec<u64>,
    pub cumulative: Vec<u64>,
}

impl RegistrationSeries {
    pub fn total(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

pub fn registration_series<I>(dates: I) -> RegistrationSeries
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for date in dates {
        *per_day.entry(date.date_naive()).or_insert(0) += 1;
    }

    let mut series = RegistrationSeries::default();
    let mut running = 0;
    for (day, count) in per_day {
        running += count;
        series.labels.push(day.format(LABEL_FORMAT).to_string());
        series.daily.push(count);
        series.cumulative.push(running);
    }

    series
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<u64>,
    pub border_color: String,
    pub background_color: String,
}

/// Line chart payload in the shape the dashboard's chart component takes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    pub fn from_series(series: RegistrationSeries) -> Self {
        let RegistrationSeries { labels, daily, cumulative } = series;

        Self {
            labels,
            datasets: vec![
                Dataset {
                    label: DAILY_LABEL.to_string(),
                    data: daily,
                    border_color: "rgb(75, 192, 192)".to_string(),
                    background_color: "rgba(75, 192, 192, 0.5)".to_string(),
                },
                Dataset {
                    label: TOTAL_LABEL.to_string(),
                    data: cumulative,
                    border_color: "rgb(53, 162, 235)".to_string(),
                    background_color: "rgba(53, 162, 235, 0.5)".to_string(),
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: usize,
    pub admins: usize,
    pub standard_users: usize,
    pub chart: ChartData,
}

pub fn dashboard_stats(users: &[User]) -> DashboardStats {
    let admins = users.iter().filter(|u| u.role == Role::Admin).count();
    let series = registration_series(users.iter().map(|u| u.date));

    DashboardStats {
        total_users: users.len(),
        admins,
        standard_users: users.len() - admins,
        chart: ChartData::from_series(series),
    }
}
