use serde::{Deserialize, Serialize};

/// A single OD600 measurement row. Either density may be genuinely absent;
/// `None` is never interpreted as a measured zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producer: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer: Option<f64>,
}

impl Observation {
    pub fn new(time: f64, producer: Option<f64>, consumer: Option<f64>) -> Self {
        Self {
            time,
            producer,
            consumer,
        }
    }

    /// A row contributes to fitting if at least one field was measured.
    pub fn is_usable(&self) -> bool {
        self.producer.is_some() || self.consumer.is_some()
    }
}

/// Read-only collection of experimental observations.
///
/// Rows with both densities absent are dropped at construction, including
/// when deserializing; retained rows are kept untransformed and in input
/// order. No interpolation is performed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Observation>", into = "Vec<Observation>")]
pub struct Dataset {
    observations: Vec<Observation>,
}

impl Dataset {
    pub fn new(rows: Vec<Observation>) -> Self {
        Self {
            observations: rows.into_iter().filter(Observation::is_usable).collect(),
        }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Number of present measurement fields across all rows.
    pub fn measurement_count(&self) -> usize {
        self.observations
            .iter()
            .map(|o| o.producer.is_some() as usize + o.consumer.is_some() as usize)
            .sum()
    }

    /// The co-culture growth experiment the reference coefficients were
    /// calibrated against: 10 sampling points over 216 hours, with the
    /// producer density unmeasured at three of them.
    pub fn reference_co_culture() -> Self {
        Self::new(vec![
            Observation::new(0.0, Some(0.0157), Some(0.0123)),
            Observation::new(24.0, Some(0.0150), Some(0.0213)),
            Observation::new(48.0, Some(0.0097), Some(0.0243)),
            Observation::new(72.0, Some(0.0013), Some(0.0130)),
            Observation::new(96.0, Some(0.0097), Some(0.0173)),
            Observation::new(120.0, Some(0.0050), Some(0.0173)),
            Observation::new(144.0, None, Some(0.0207)),
            Observation::new(168.0, Some(0.0017), Some(0.0277)),
            Observation::new(192.0, None, Some(0.0397)),
            Observation::new(216.0, None, Some(0.0433)),
        ])
    }
}

impl From<Vec<Observation>> for Dataset {
    fn from(rows: Vec<Observation>) -> Self {
        Self::new(rows)
    }
}

impl From<Dataset> for Vec<Observation> {
    fn from(dataset: Dataset) -> Self {
        dataset.observations
    }
}

#[cfg(test)]
mod tests {
    use super::{Dataset, Observation};

    #[test]
    fn rows_without_any_measurement_are_dropped() {
        let dataset = Dataset::new(vec![
            Observation::new(0.0, Some(0.01), Some(0.02)),
            Observation::new(24.0, None, None),
            Observation::new(48.0, None, Some(0.03)),
        ]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.observations()[1].time, 48.0);
        // The partial row keeps its absent field absent.
        assert_eq!(dataset.observations()[1].producer, None);
    }

    #[test]
    fn measurement_count_counts_present_fields_only() {
        let dataset = Dataset::new(vec![
            Observation::new(0.0, Some(0.01), Some(0.02)),
            Observation::new(24.0, None, Some(0.03)),
        ]);
        assert_eq!(dataset.measurement_count(), 3);
    }

    #[test]
    fn reference_dataset_keeps_all_ten_rows() {
        let dataset = Dataset::reference_co_culture();
        assert_eq!(dataset.len(), 10);
        assert_eq!(dataset.measurement_count(), 17);
        assert_eq!(dataset.observations()[0].time, 0.0);
        assert_eq!(dataset.observations()[9].producer, None);
    }

    #[test]
    fn missing_json_keys_deserialize_as_absent() {
        let dataset: Dataset = serde_json::from_str(
            r#"[
                {"time": 0, "producer": 0.0157, "consumer": 0.0123},
                {"time": 144, "consumer": 0.0207},
                {"time": 999}
            ]"#,
        )
        .unwrap();
        // The measurement-free row is dropped during deserialization.
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.observations()[1].producer, None);
        assert_eq!(dataset.observations()[1].consumer, Some(0.0207));
    }

    #[test]
    fn absent_fields_are_omitted_when_serializing() {
        let dataset = Dataset::new(vec![Observation::new(144.0, None, Some(0.0207))]);
        let json = serde_json::to_string(&dataset).unwrap();
        assert!(!json.contains("producer"));
        assert!(json.contains("consumer"));
    }
}
