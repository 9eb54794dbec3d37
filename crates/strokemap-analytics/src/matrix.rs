use std::cmp::Ordering;
use std::str::FromStr;

use serde::Serialize;
use strokemap_core::Hospital;

use crate::index::Proximity;
use crate::{AnalysisContext, AnalyticsError};

/// One row of the hospital-to-center distance matrix. Distances are `None`
/// ("N/A") when the hospital is itself in the category or no center exists.
#[derive(Debug, Clone, Serialize)]
pub struct MatrixRow<'a> {
    pub hospital: &'a Hospital,
    pub nearest_advanced: Option<&'a str>,
    pub advanced_miles: Option<f64>,
    pub nearest_evt: Option<&'a str>,
    pub evt_miles: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatrixSort {
    #[default]
    Name,
    State,
    AdvancedMiles,
    EvtMiles,
}

impl FromStr for MatrixSort {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(MatrixSort::Name),
            "state" => Ok(MatrixSort::State),
            "advanced" | "csc" => Ok(MatrixSort::AdvancedMiles),
            "evt" => Ok(MatrixSort::EvtMiles),
            _ => Err(AnalyticsError::UnknownMatrixSort(s.to_string())),
        }
    }
}

#[must_use]
pub fn distance_matrix(ctx: &AnalysisContext, sort: MatrixSort) -> Vec<MatrixRow<'_>> {
    let mut rows: Vec<MatrixRow<'_>> = ctx
        .hospitals()
        .iter()
        .filter_map(|hospital| {
            let record = ctx.index().get(&hospital.cms_id)?;
            let (nearest_advanced, advanced_miles) = applicable(&record.advanced);
            let (nearest_evt, evt_miles) = applicable(&record.evt);
            Some(MatrixRow {
                hospital,
                nearest_advanced,
                advanced_miles,
                nearest_evt,
                evt_miles,
            })
        })
        .collect();

    match sort {
        MatrixSort::Name => rows.sort_by(|a, b| a.hospital.name.cmp(&b.hospital.name)),
        MatrixSort::State => rows.sort_by(|a, b| {
            a.hospital
                .state
                .cmp(&b.hospital.state)
                .then_with(|| a.hospital.name.cmp(&b.hospital.name))
        }),
        MatrixSort::AdvancedMiles => {
            rows.sort_by(|a, b| known_first(a.advanced_miles, b.advanced_miles));
        }
        MatrixSort::EvtMiles => rows.sort_by(|a, b| known_first(a.evt_miles, b.evt_miles)),
    }
    rows
}

fn applicable(proximity: &Proximity) -> (Option<&str>, Option<f64>) {
    match proximity {
        Proximity::Nearest(facility) => (Some(facility.name.as_str()), Some(facility.miles)),
        Proximity::Member { .. } | Proximity::Unreachable => (None, None),
    }
}

/// Ascending by distance; unknown distances sort last.
fn known_first(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
