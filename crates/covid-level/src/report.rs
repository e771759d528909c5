//! Ranking and colored rendering of county rows.

use colored::Colorize;
use std::fmt;

use crate::client::CountyRecord;
use crate::level::CommunityLevel;

/// A county row with its parsed community level.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCounty {
    pub level: CommunityLevel,
    pub record: CountyRecord,
}

/// Sort rows most severe first, then by county name.
///
/// Rows with a level outside low/medium/high are dropped with a warning.
pub fn rank(records: Vec<CountyRecord>) -> Vec<RankedCounty> {
    let mut ranked: Vec<RankedCounty> = records
        .into_iter()
        .filter_map(|record| match record.covid_19_community_level.parse() {
            Ok(level) => Some(RankedCounty { level, record }),
            Err(e) => {
                tracing::warn!(county = %record.county, error = %e, "Skipping county");
                None
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.level
            .weight()
            .cmp(&b.level.weight())
            .then_with(|| a.record.county.cmp(&b.record.county))
    });
    ranked
}

impl fmt::Display for RankedCounty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = format!("{}:", self.record.county);
        write!(
            f,
            "{:<25} {}",
            label,
            self.record
                .covid_19_community_level
                .as_str()
                .color(self.level.color())
        )
    }
}
