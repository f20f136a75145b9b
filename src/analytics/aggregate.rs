//! Dimensional aggregation of extracted metrics
//!
//! One [`Accumulator`] is built per report request and folded over the full
//! record stream. Buckets are keyed maps that remember first-seen order, so
//! downstream sorting can break ties deterministically. Nothing here is
//! shared between invocations.

use std::collections::HashMap;

use crate::analytics::extract::ExtractedMetrics;

/// Running totals for one bucket of one dimension
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub inspected: f64,
    pub accepted: f64,
    pub rework: f64,
    pub rejected: f64,
}

impl Totals {
    fn add(&mut self, metrics: &ExtractedMetrics) {
        self.inspected += metrics.inspected;
        self.accepted += metrics.accepted;
        self.rework += metrics.rework;
        self.rejected += metrics.rejected;
    }
}

/// A string-keyed map that preserves first-insertion order
#[derive(Debug, Default)]
pub struct OrderedMap<V> {
    index: HashMap<String, usize>,
    entries: Vec<(String, V)>,
}

impl<V: Default> OrderedMap<V> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Get the value for a key, inserting a default bucket on first sight
    pub fn entry(&mut self, key: &str) -> &mut V {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                let idx = self.entries.len();
                self.index.insert(key.to_string(), idx);
                self.entries.push((key.to_string(), V::default()));
                idx
            }
        };
        &mut self.entries[idx].1
    }

    /// Consume the map, yielding entries in first-insertion order
    pub fn into_entries(self) -> Vec<(String, V)> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-request aggregation state for all report dimensions
#[derive(Debug, Default)]
pub struct Accumulator {
    /// Global totals across every record
    pub summary: Totals,
    /// Totals keyed by part name
    pub parts: OrderedMap<Totals>,
    /// Totals keyed by ISO date (YYYY-MM-DD)
    pub days: OrderedMap<Totals>,
    /// Totals keyed by inspector name
    pub inspectors: OrderedMap<Totals>,
    /// Totals keyed by location name
    pub locations: OrderedMap<Totals>,
    /// Occurrence count per trimmed defect descriptor
    pub defects: OrderedMap<u64>,
    /// Distinct part models, first-seen order
    pub part_models: Vec<String>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record's metrics into every dimension
    pub fn fold(&mut self, metrics: &ExtractedMetrics, inspector: &str, day: &str) {
        self.summary.add(metrics);
        self.parts.entry(&metrics.part_name).add(metrics);
        self.days.entry(day).add(metrics);
        self.inspectors.entry(inspector).add(metrics);
        self.locations.entry(&metrics.location).add(metrics);

        for defect in &metrics.defects {
            *self.defects.entry(defect.trim()) += 1;
        }

        if let Some(model) = &metrics.part_model {
            if !self.part_models.iter().any(|m| m == model) {
                self.part_models.push(model.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(part: &str, location: &str, inspected: f64, rejected: f64) -> ExtractedMetrics {
        ExtractedMetrics {
            part_name: part.to_string(),
            location: location.to_string(),
            inspected,
            accepted: inspected - rejected,
            rejected,
            ..ExtractedMetrics::default()
        }
    }

    #[test]
    fn test_fold_accumulates_additively() {
        let mut acc = Accumulator::new();
        acc.fold(&metrics("Bracket", "Main", 100.0, 5.0), "Vega", "2025-03-01");
        acc.fold(&metrics("Bracket", "Main", 50.0, 1.0), "Chen", "2025-03-02");

        assert_eq!(acc.summary.inspected, 150.0);
        assert_eq!(acc.summary.rejected, 6.0);
        assert_eq!(acc.parts.len(), 1);
        assert_eq!(acc.parts.entry("Bracket").inspected, 150.0);
        assert_eq!(acc.inspectors.len(), 2);
    }

    #[test]
    fn test_buckets_keep_first_seen_order() {
        let mut acc = Accumulator::new();
        acc.fold(&metrics("Gear", "Main", 1.0, 0.0), "Vega", "2025-03-02");
        acc.fold(&metrics("Axle", "Main", 1.0, 0.0), "Vega", "2025-03-01");
        acc.fold(&metrics("Gear", "Main", 1.0, 0.0), "Vega", "2025-03-03");

        let keys: Vec<String> = acc.parts.into_entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Gear", "Axle"]);
    }

    #[test]
    fn test_defects_trimmed_and_counted_exactly() {
        let mut acc = Accumulator::new();
        let mut m = metrics("Gear", "Main", 10.0, 2.0);
        m.defects = vec!["Crack ".to_string(), "Crack".to_string(), "dent".to_string()];
        acc.fold(&m, "Vega", "2025-03-01");

        assert_eq!(*acc.defects.entry("Crack"), 2);
        // Case differences stay separate buckets
        assert_eq!(*acc.defects.entry("dent"), 1);
        assert_eq!(*acc.defects.entry("Dent"), 0);
    }

    #[test]
    fn test_part_models_deduplicated_in_order() {
        let mut acc = Accumulator::new();
        let mut a = metrics("Gear", "Main", 1.0, 0.0);
        a.part_model = Some("G-7".to_string());
        let mut b = metrics("Axle", "Main", 1.0, 0.0);
        b.part_model = Some("AX-1".to_string());

        acc.fold(&a, "Vega", "2025-03-01");
        acc.fold(&b, "Vega", "2025-03-01");
        acc.fold(&a, "Vega", "2025-03-02");

        assert_eq!(acc.part_models, vec!["G-7", "AX-1"]);
    }
}
