//! Normalization of raw loading records into validated intervals.
//!
//! This is the only validation gate of the engine. Everything downstream
//! assumes `start_date <= end_date` and a finite rate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::primitives::parse_calendar_date;
use crate::core::types::DateRange;

/// Who an assignment belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OwnerKind {
    #[default]
    Employee,
    /// Loading not yet bound to a person; never resizable from the timeline.
    Anonymous,
}

/// Loading record as delivered by the query layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLoading {
    pub id: String,
    pub owner_id: String,
    #[serde(default)]
    pub owner_kind: OwnerKind,
    pub start_date: String,
    pub end_date: String,
    pub rate: f64,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub object_id: Option<String>,
    #[serde(default)]
    pub object_name: Option<String>,
    #[serde(default)]
    pub section_id: Option<String>,
    #[serde(default)]
    pub section_name: Option<String>,
    #[serde(default)]
    pub stage_id: Option<String>,
    #[serde(default)]
    pub stage_name: Option<String>,
}

/// Display path of the work an interval belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelPath {
    pub project_name: Option<String>,
    pub object_name: Option<String>,
    pub section_name: Option<String>,
    pub stage_name: Option<String>,
}

impl LabelPath {
    /// Non-empty segments joined with ` / `.
    #[must_use]
    pub fn display(&self) -> String {
        [
            self.project_name.as_deref(),
            self.object_name.as_deref(),
            self.section_name.as_deref(),
            self.stage_name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|segment| !segment.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" / ")
    }
}

/// Validated, date-ranged work assignment (a "period").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub id: String,
    pub owner_id: String,
    pub owner_kind: OwnerKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rate: f64,
    pub comment: Option<String>,
    pub label_path: LabelPath,
}

impl Interval {
    /// Returns `None` when the dates are inverted or the rate is not finite.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        owner_id: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        rate: f64,
    ) -> Option<Self> {
        if start_date > end_date || !rate.is_finite() {
            return None;
        }
        Some(Self {
            id: id.into(),
            owner_id: owner_id.into(),
            owner_kind: OwnerKind::Employee,
            start_date,
            end_date,
            rate,
            comment: None,
            label_path: LabelPath::default(),
        })
    }

    #[must_use]
    pub fn with_owner_kind(mut self, owner_kind: OwnerKind) -> Self {
        self.owner_kind = owner_kind;
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    #[must_use]
    pub fn with_label_path(mut self, label_path: LabelPath) -> Self {
        self.label_path = label_path;
        self
    }

    #[must_use]
    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start_date,
            end: self.end_date,
        }
    }

    /// Active on `date`, both ends inclusive.
    #[must_use]
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.range().contains(date)
    }

    #[must_use]
    pub fn is_resizable(&self) -> bool {
        self.owner_kind == OwnerKind::Employee
    }

    /// Copy of this interval moved to new dates.
    #[must_use]
    pub fn with_dates(&self, start_date: NaiveDate, end_date: NaiveDate) -> Option<Self> {
        (start_date <= end_date).then(|| Self {
            start_date,
            end_date,
            ..self.clone()
        })
    }
}

/// Converts one raw record, or excludes it when its dates are unusable.
#[must_use]
pub fn normalize(raw: &RawLoading) -> Option<Interval> {
    let (Ok(start_date), Ok(end_date)) = (
        parse_calendar_date(&raw.start_date),
        parse_calendar_date(&raw.end_date),
    ) else {
        trace!(id = %raw.id, "dropping loading with unparseable dates");
        return None;
    };

    if end_date < start_date {
        trace!(id = %raw.id, %start_date, %end_date, "dropping loading with inverted range");
        return None;
    }
    if !raw.rate.is_finite() {
        trace!(id = %raw.id, "dropping loading with non-finite rate");
        return None;
    }

    Some(Interval {
        id: raw.id.clone(),
        owner_id: raw.owner_id.clone(),
        owner_kind: raw.owner_kind,
        start_date,
        end_date,
        rate: raw.rate,
        comment: raw.comment.clone(),
        label_path: LabelPath {
            project_name: raw.project_name.clone(),
            object_name: raw.object_name.clone(),
            section_name: raw.section_name.clone(),
            stage_name: raw.stage_name.clone(),
        },
    })
}

/// Normalizes a batch, keeping input order and silently omitting bad records.
#[must_use]
pub fn normalize_all(records: &[RawLoading]) -> Vec<Interval> {
    let intervals: Vec<Interval> = records.iter().filter_map(normalize).collect();
    debug!(
        original_count = records.len(),
        kept_count = intervals.len(),
        "normalized loading records"
    );
    intervals
}
