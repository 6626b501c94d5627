//! Metrics collection for shot sweeps

use serde::{Deserialize, Serialize};

/// Outcome of one scripted shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptResult {
    /// Release spot on the court plane (x, z)
    pub spot: (f32, f32),
    /// Horizontal distance to the hoop (m)
    pub distance: f32,
    /// Charge level the script aimed for (percent)
    pub requested_power: f32,
    /// Charge actually reached at release (percent)
    pub power: f32,
    /// Flight time picked by the solver (s)
    pub flight_time: f32,
    pub made: bool,
    pub rim_hits: u32,
    /// Frames from release to basket (made shots only)
    pub frames_to_score: Option<u32>,
    /// RNG seed used
    pub seed: u64,
}

/// Makes out of attempts for one key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub key: f32,
    pub attempts: u32,
    pub makes: u32,
}

impl Bucket {
    pub fn make_pct(&self) -> f32 {
        if self.attempts == 0 {
            0.0
        } else {
            100.0 * self.makes as f32 / self.attempts as f32
        }
    }
}

/// Aggregated sweep statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimMetrics {
    pub attempts: u32,
    pub makes: u32,
    pub rim_hits: u32,
    /// Keyed by requested charge level (percent)
    pub by_power: Vec<Bucket>,
    /// Keyed by distance rounded to 0.1 m
    pub by_distance: Vec<Bucket>,
}

fn add_to(buckets: &mut Vec<Bucket>, key: f32, made: bool) {
    let index = match buckets.iter().position(|b| (b.key - key).abs() < 1e-3) {
        Some(index) => index,
        None => {
            buckets.push(Bucket {
                key,
                ..Default::default()
            });
            buckets.len() - 1
        }
    };
    buckets[index].attempts += 1;
    if made {
        buckets[index].makes += 1;
    }
}

impl SimMetrics {
    pub fn from_results(results: &[AttemptResult]) -> Self {
        let mut metrics = Self::default();
        for result in results {
            metrics.attempts += 1;
            metrics.rim_hits += result.rim_hits;
            if result.made {
                metrics.makes += 1;
            }
            add_to(&mut metrics.by_power, result.requested_power, result.made);
            add_to(
                &mut metrics.by_distance,
                (result.distance * 10.0).round() / 10.0,
                result.made,
            );
        }
        metrics
            .by_power
            .sort_by(|a, b| a.key.total_cmp(&b.key));
        metrics
            .by_distance
            .sort_by(|a, b| a.key.total_cmp(&b.key));
        metrics
    }

    pub fn make_pct(&self) -> f32 {
        if self.attempts == 0 {
            0.0
        } else {
            100.0 * self.makes as f32 / self.attempts as f32
        }
    }

    /// Human-readable summary tables
    pub fn format_table(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Total: {} shots, {} makes ({:.0}%), {} rim hits\n\n",
            self.attempts,
            self.makes,
            self.make_pct(),
            self.rim_hits
        ));

        out.push_str("Power   Makes   Pct\n");
        out.push_str("-----   -----   ---\n");
        for b in &self.by_power {
            out.push_str(&format!(
                "{:>4.0}%   {:>2}/{:<3}  {:>3.0}%\n",
                b.key,
                b.makes,
                b.attempts,
                b.make_pct()
            ));
        }

        out.push_str("\nDist    Makes   Pct\n");
        out.push_str("-----   -----   ---\n");
        for b in &self.by_distance {
            out.push_str(&format!(
                "{:>4.1}m   {:>2}/{:<3}  {:>3.0}%\n",
                b.key,
                b.makes,
                b.attempts,
                b.make_pct()
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(distance: f32, requested_power: f32, made: bool) -> AttemptResult {
        AttemptResult {
            spot: (0.0, 0.0),
            distance,
            requested_power,
            power: requested_power,
            flight_time: 1.5,
            made,
            rim_hits: 1,
            frames_to_score: made.then_some(80),
            seed: 0,
        }
    }

    #[test]
    fn test_buckets_group_and_sort() {
        let results = [
            attempt(5.04, 40.0, true),
            attempt(4.96, 20.0, false),
            attempt(2.0, 40.0, true),
        ];
        let metrics = SimMetrics::from_results(&results);

        assert_eq!(metrics.attempts, 3);
        assert_eq!(metrics.makes, 2);
        assert_eq!(metrics.rim_hits, 3);
        assert_eq!(
            metrics.by_power.iter().map(|b| b.key).collect::<Vec<_>>(),
            vec![20.0, 40.0]
        );
        assert_eq!(metrics.by_power[1].makes, 2);
        // 5.04 and 4.96 both round to 5.0
        assert_eq!(metrics.by_distance.len(), 2);
        assert_eq!(metrics.by_distance[1].attempts, 2);
        assert!((metrics.by_distance[1].make_pct() - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_empty_metrics() {
        let metrics = SimMetrics::from_results(&[]);
        assert_eq!(metrics.make_pct(), 0.0);
        assert!(metrics.format_table().contains("Total: 0 shots"));
    }
}
