//! Marker grouping for non-overlapping overlay rendering.
//!
//! Single greedy pass in input order. Membership is measured against the
//! anchor issue only, so a chain of markers longer than the threshold can
//! split differently depending on order. Downstream overlays rely on this
//! grouping; it is not transitive clustering.

use tracing::debug;

use crate::config::ClusteringConfig;
use crate::types::{ClusteredMarkers, Issue, MarkerCluster, Point};

/// Marker distance, in asset pixels, below which markers are grouped.
pub const CLUSTER_THRESHOLD: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerClusterer {
    pub threshold: f64,
}

impl Default for MarkerClusterer {
    fn default() -> Self {
        Self {
            threshold: CLUSTER_THRESHOLD,
        }
    }
}

impl MarkerClusterer {
    pub fn from_config(config: &ClusteringConfig) -> Self {
        Self {
            threshold: config.threshold,
        }
    }

    pub fn cluster(&self, issues: &[Issue]) -> ClusteredMarkers {
        let mut claimed = vec![false; issues.len()];
        let mut result = ClusteredMarkers::default();

        for (anchor_idx, anchor) in issues.iter().enumerate() {
            if claimed[anchor_idx] {
                continue;
            }

            let members: Vec<usize> = (0..issues.len())
                .filter(|&idx| {
                    !claimed[idx]
                        && anchor.marker.distance_to(&issues[idx].marker) < self.threshold
                })
                .collect();

            if members.len() > 1 {
                for &idx in &members {
                    claimed[idx] = true;
                }
                let grouped: Vec<Issue> = members.iter().map(|&idx| issues[idx].clone()).collect();
                result.clusters.push(MarkerCluster {
                    id: format!("cluster-{}", result.clusters.len() + 1),
                    position: centroid(&grouped),
                    issues: grouped,
                });
            } else {
                claimed[anchor_idx] = true;
                result.standalone.push(anchor.clone());
            }
        }

        debug!(
            issues = issues.len(),
            standalone = result.standalone.len(),
            clusters = result.clusters.len(),
            "clustered issue markers"
        );
        result
    }
}

fn centroid(issues: &[Issue]) -> Point {
    let n = issues.len().max(1) as f64;
    let (sx, sy) = issues
        .iter()
        .fold((0.0, 0.0), |(sx, sy), i| (sx + i.marker.x, sy + i.marker.y));
    Point::new(sx / n, sy / n)
}

pub fn cluster_markers(issues: &[Issue]) -> ClusteredMarkers {
    MarkerClusterer::default().cluster(issues)
}
