//! Rolls per-metric verdicts into a [`Summary`] and its issue flag.

use camp_core::{Metric, MetricKind, Status, Summary};

/// Whether a metric with `status` should raise the "consult a doctor" flag.
///
/// Each metric states its own rule. SpO₂ lists the statuses that count
/// instead of excluding normal, so a future high band would not flag.
pub fn is_issue(kind: MetricKind, status: Status) -> bool {
    match kind {
        MetricKind::Bmi => status != Status::Normal,
        MetricKind::Spo2 => matches!(status, Status::Low | Status::Borderline),
        MetricKind::BloodPressure => status != Status::Normal,
        MetricKind::BloodSugar => status != Status::Normal,
        MetricKind::Ppbs => status != Status::Normal,
        MetricKind::Hemoglobin => status != Status::Normal,
    }
}

/// Collects evaluated metrics into a [`Summary`] in fixed metric order,
/// whatever order they are recorded in.
#[derive(Debug, Default)]
pub struct Aggregator {
    slots: [Option<Metric>; MetricKind::COUNT],
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `metric`, replacing an earlier one of the same kind.
    pub fn record(&mut self, metric: Metric) {
        let position = metric.kind.position();
        self.slots[position] = Some(metric);
    }

    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn finish(self) -> Summary {
        let metrics: Vec<Metric> = self.slots.into_iter().flatten().collect();
        let has_issues = metrics
            .iter()
            .any(|metric| is_issue(metric.kind, metric.status()));

        tracing::debug!(metrics = metrics.len(), has_issues, "summary built");

        Summary {
            metrics,
            has_issues,
        }
    }
}

impl FromIterator<Metric> for Aggregator {
    fn from_iter<I: IntoIterator<Item = Metric>>(iter: I) -> Self {
        let mut aggregator = Aggregator::new();
        for metric in iter {
            aggregator.record(metric);
        }
        aggregator
    }
}

/// Convenience wrapper around [`Aggregator`].
pub fn aggregate(metrics: impl IntoIterator<Item = Metric>) -> Summary {
    metrics.into_iter().collect::<Aggregator>().finish()
}
