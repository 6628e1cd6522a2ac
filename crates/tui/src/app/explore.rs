//! Exploration dashboard state: cohort selection, analysis mode, and
//! the chart datasets.
//!
//! The charts render fixed demonstration datasets until an analysis
//! response carries a recognizable histogram payload, at which point the
//! age-distribution chart switches to the returned data.

use serde_json::Value;

use cleanroom_client::models::{ExploreMetric, ExploreRequest};

use crate::app::state::OpState;

/// A selectable patient cohort.
#[derive(Debug, Clone)]
pub struct CohortOption {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub count: u64,
}

/// The fixed cohort list offered by the selector.
pub static COHORT_OPTIONS: [CohortOption; 8] = [
    CohortOption {
        id: "all",
        label: "All Patients",
        description: "Complete patient dataset",
        count: 12450,
    },
    CohortOption {
        id: "hypertension",
        label: "I10_Hypertension",
        description: "Patients with hypertension",
        count: 3420,
    },
    CohortOption {
        id: "asthma",
        label: "J45_Asthma",
        description: "Patients with asthma",
        count: 1850,
    },
    CohortOption {
        id: "reflux",
        label: "K21_Reflux",
        description: "Gastroesophageal reflux patients",
        count: 920,
    },
    CohortOption {
        id: "diabetes",
        label: "E11_Type2Diabetes",
        description: "Type 2 diabetes patients",
        count: 2140,
    },
    CohortOption {
        id: "smokers",
        label: "Smokers",
        description: "Patients who smoke",
        count: 1680,
    },
    CohortOption {
        id: "seniors",
        label: "Age > 65",
        description: "Senior patients",
        count: 4250,
    },
    CohortOption {
        id: "obese",
        label: "BMI > 30",
        description: "Obese patients",
        count: 3850,
    },
];

/// Attributes submitted with every exploration query.
pub const EXPLORE_ATTRIBUTES: [&str; 4] = ["age", "bmi", "hba1c", "blood_pressure"];

/// One summary tile at the top of the dashboard.
#[derive(Debug, Clone)]
pub struct MetricTile {
    pub label: &'static str,
    pub value: &'static str,
    pub change: &'static str,
}

/// The four summary tiles.
pub static METRIC_TILES: [MetricTile; 4] = [
    MetricTile {
        label: "Total Patients",
        value: "12,450",
        change: "+5.2%",
    },
    MetricTile {
        label: "Average Age",
        value: "54.2",
        change: "+1.1%",
    },
    MetricTile {
        label: "Active Conditions",
        value: "847",
        change: "+12.3%",
    },
    MetricTile {
        label: "Avg BMI",
        value: "27.8",
        change: "-0.8%",
    },
];

/// Age distribution demonstration dataset.
pub const AGE_BUCKETS: [(&str, u64); 5] = [
    ("18-30", 1250),
    ("31-45", 2840),
    ("46-60", 3920),
    ("61-75", 3200),
    ("75+", 1240),
];

/// Condition distribution demonstration dataset.
pub const CONDITION_BUCKETS: [(&str, u64); 5] = [
    ("Hypertension", 3420),
    ("Diabetes", 2140),
    ("Asthma", 1850),
    ("Reflux", 920),
    ("Other", 4120),
];

/// Twelve-month average BMI trend.
pub const BMI_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Monthly average BMI values matching [`BMI_MONTHS`].
pub const BMI_VALUES: [f64; 12] = [
    28.2, 28.1, 27.9, 27.8, 27.7, 27.8, 27.9, 28.0, 27.8, 27.6, 27.5, 27.8,
];

/// Target BMI reference line.
pub const BMI_TARGET: f64 = 25.0;

/// State for the exploration dashboard tab.
pub struct ExploreState {
    /// Selected cohort as an index into [`COHORT_OPTIONS`].
    pub cohort_index: Option<usize>,
    /// Cursor position in the cohort selector list.
    pub cohort_cursor: usize,
    pub metric: ExploreMetric,
    pub analyze_op: OpState,
    /// Raw response of the last completed analysis.
    pub result: Option<Value>,
    /// Histogram extracted from the last response, if it had one.
    pub result_histogram: Option<Vec<(String, u64)>>,
}

impl ExploreState {
    pub fn new() -> Self {
        Self {
            cohort_index: None,
            cohort_cursor: 0,
            metric: ExploreMetric::Uni,
            analyze_op: OpState::Idle,
            result: None,
            result_histogram: None,
        }
    }

    pub fn selected_cohort(&self) -> Option<&'static CohortOption> {
        self.cohort_index.map(|i| &COHORT_OPTIONS[i])
    }

    /// Whether Analyze can fire: a cohort must be selected and no
    /// analysis may be in flight.
    pub fn can_analyze(&self) -> bool {
        self.cohort_index.is_some() && !self.analyze_op.is_pending()
    }

    /// The exploration request for the current selection.
    pub fn explore_request(&self) -> Option<ExploreRequest> {
        let cohort = self.selected_cohort()?;
        Some(ExploreRequest {
            cohort: cohort.id.to_string(),
            attributes: EXPLORE_ATTRIBUTES.iter().map(|a| a.to_string()).collect(),
        })
    }

    pub fn on_analyze_started(&mut self) {
        self.analyze_op = OpState::Pending;
    }

    pub fn on_analyze_complete(&mut self, result: Result<Value, String>) {
        match result {
            Ok(value) => {
                self.analyze_op = OpState::Idle;
                self.result_histogram = extract_histogram(&value);
                self.result = Some(value);
            }
            Err(message) => {
                self.analyze_op = OpState::Failed(message);
            }
        }
    }

    /// The age-distribution dataset to render: the last analysis result
    /// when it carried a histogram, the demonstration data otherwise.
    pub fn age_distribution(&self) -> Vec<(String, u64)> {
        match &self.result_histogram {
            Some(histogram) => histogram.clone(),
            None => AGE_BUCKETS
                .iter()
                .map(|(label, value)| (label.to_string(), *value))
                .collect(),
        }
    }
}

impl Default for ExploreState {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull a histogram out of an analysis response.
///
/// Two shapes are recognized:
/// - `{"labels": ["a", ...], "values": [1, ...]}` (paired arrays)
/// - a flat object of label → number
///
/// Anything else yields `None` and the caller keeps its current chart.
pub fn extract_histogram(value: &Value) -> Option<Vec<(String, u64)>> {
    if let (Some(labels), Some(values)) = (
        value.get("labels").and_then(|l| l.as_array()),
        value.get("values").and_then(|v| v.as_array()),
    ) {
        if labels.len() != values.len() || labels.is_empty() {
            return None;
        }
        let mut histogram = Vec::with_capacity(labels.len());
        for (label, count) in labels.iter().zip(values.iter()) {
            let label = label.as_str()?;
            let count = count.as_u64().or_else(|| count.as_f64().map(|f| f as u64))?;
            histogram.push((label.to_string(), count));
        }
        return Some(histogram);
    }

    let object = value.as_object()?;
    if object.is_empty() {
        return None;
    }
    let mut histogram = Vec::with_capacity(object.len());
    for (label, count) in object {
        let count = count.as_u64()?;
        histogram.push((label.clone(), count));
    }
    Some(histogram)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_analyze_requires_cohort() {
        let mut explore = ExploreState::new();
        assert!(!explore.can_analyze());
        assert!(explore.explore_request().is_none());

        explore.cohort_index = Some(1);
        assert!(explore.can_analyze());
        let request = explore.explore_request().unwrap();
        assert_eq!(request.cohort, "hypertension");
        assert_eq!(
            request.attributes,
            vec!["age", "bmi", "hba1c", "blood_pressure"]
        );
    }

    #[test]
    fn test_analyze_failure_keeps_previous_result() {
        let mut explore = ExploreState::new();
        explore.cohort_index = Some(0);
        explore.on_analyze_started();
        explore.on_analyze_complete(Ok(json!({"summary": "ok"})));
        assert!(explore.result.is_some());

        explore.on_analyze_started();
        explore.on_analyze_complete(Err("backend down".to_string()));
        assert_eq!(explore.analyze_op.error(), Some("backend down"));
        assert!(explore.result.is_some());
    }

    #[test]
    fn test_extract_histogram_paired_arrays() {
        let value = json!({"labels": ["18-30", "31-45"], "values": [10, 20]});
        let histogram = extract_histogram(&value).unwrap();
        assert_eq!(
            histogram,
            vec![("18-30".to_string(), 10), ("31-45".to_string(), 20)]
        );
    }

    #[test]
    fn test_extract_histogram_flat_object() {
        let value = json!({"smoker": 1680, "non_smoker": 10770});
        let histogram = extract_histogram(&value).unwrap();
        assert_eq!(histogram.len(), 2);
    }

    #[test]
    fn test_extract_histogram_rejects_mismatched_arrays() {
        let value = json!({"labels": ["a"], "values": [1, 2]});
        assert!(extract_histogram(&value).is_none());
    }

    #[test]
    fn test_extract_histogram_rejects_non_numeric() {
        let value = json!({"model": "ready"});
        assert!(extract_histogram(&value).is_none());
    }

    #[test]
    fn test_age_distribution_prefers_result_histogram() {
        let mut explore = ExploreState::new();
        assert_eq!(explore.age_distribution().len(), AGE_BUCKETS.len());

        explore.on_analyze_complete(Ok(json!({"labels": ["a"], "values": [1]})));
        assert_eq!(explore.age_distribution(), vec![("a".to_string(), 1)]);
    }

    #[test]
    fn test_bmi_series_aligns_with_months() {
        assert_eq!(BMI_MONTHS.len(), BMI_VALUES.len());
    }
}
