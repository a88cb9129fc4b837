use crate::config::clustering::ClusteringConfig;
use crate::config::traits::ConfigSection;
use crate::engines::report::{seeded_rng, timed};
use crate::error::AlgolabError;
use rand::rngs::StdRng;
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub type Point = [f64; 3];

pub fn distance_squared(a: &Point, b: &Point) -> f64 {
    (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)
}

fn nearest(point: &Point, centroids: &[Point]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (i, centroid) in centroids.iter().enumerate() {
        let d = distance_squared(point, centroid);
        if d < best.1 {
            best = (i, d);
        }
    }
    best
}

/// Lloyd's k-means with k-means++ seeding and several restarts
#[derive(Debug, Clone)]
pub struct KMeans {
    pub n_clusters: usize,
    pub n_init: usize,
    pub max_iter: usize,
    pub tolerance: f64,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KMeansModel {
    pub centroids: Vec<Point>,
    pub labels: Vec<usize>,
    /// Sum of squared distances of points to their centroid
    pub inertia: f64,
    pub iterations: usize,
}

impl KMeans {
    pub fn new(n_clusters: usize) -> Self {
        let defaults = ClusteringConfig::default();
        Self {
            n_clusters,
            n_init: defaults.n_init,
            max_iter: defaults.max_iter,
            tolerance: defaults.tolerance,
            seed: None,
        }
    }

    pub fn from_config(config: &ClusteringConfig, seed: Option<u64>) -> Result<Self, AlgolabError> {
        config.validate()?;
        Ok(Self {
            n_clusters: config.n_clusters,
            n_init: config.n_init,
            max_iter: config.max_iter,
            tolerance: config.tolerance,
            seed,
        })
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn fit(&self, points: &[Point]) -> Result<KMeansModel, AlgolabError> {
        if self.n_clusters == 0 {
            return Err(AlgolabError::Clustering("n_clusters must be positive".to_string()));
        }
        if points.is_empty() {
            return Err(AlgolabError::Clustering("No points to cluster".to_string()));
        }
        if points.len() < self.n_clusters {
            return Err(AlgolabError::Clustering(format!(
                "n_samples={} should be >= n_clusters={}",
                points.len(),
                self.n_clusters
            )));
        }

        let mut rng = seeded_rng(self.seed);
        let mut best: Option<KMeansModel> = None;

        for restart in 0..self.n_init.max(1) {
            let model = timed("kmeans-restart", || self.fit_once(points, &mut rng));
            log::debug!(
                "k-means restart {} converged in {} iterations, inertia {:.6}",
                restart, model.iterations, model.inertia
            );
            let better = best.as_ref().map_or(true, |b| model.inertia < b.inertia);
            if better {
                best = Some(model);
            }
        }

        best.ok_or_else(|| AlgolabError::Clustering("k-means produced no model".to_string()))
    }

    fn fit_once(&self, points: &[Point], rng: &mut StdRng) -> KMeansModel {
        let mut centroids = plus_plus_init(points, self.n_clusters, rng);
        let mut iterations = 0;

        while iterations < self.max_iter {
            let assignments = assign(points, &centroids);
            let updated = update_centroids(points, &assignments, &centroids);
            let shift: f64 = centroids
                .iter()
                .zip(&updated)
                .map(|(old, new)| distance_squared(old, new))
                .sum();

            centroids = updated;
            iterations += 1;
            if shift <= self.tolerance {
                break;
            }
        }

        let assignments = assign(points, &centroids);
        let labels = assignments.iter().map(|(label, _)| *label).collect();
        let inertia = assignments.iter().map(|(_, d)| d).sum();

        KMeansModel {
            centroids,
            labels,
            inertia,
            iterations,
        }
    }
}

fn assign(points: &[Point], centroids: &[Point]) -> Vec<(usize, f64)> {
    points
        .par_iter()
        .map(|point| nearest(point, centroids))
        .collect()
}

/// Mean of each cluster; an empty cluster takes the point farthest from its centroid
fn update_centroids(points: &[Point], assignments: &[(usize, f64)], previous: &[Point]) -> Vec<Point> {
    let k = previous.len();
    let mut sums = vec![[0.0; 3]; k];
    let mut counts = vec![0usize; k];

    for (point, (label, _)) in points.iter().zip(assignments) {
        for c in 0..3 {
            sums[*label][c] += point[c];
        }
        counts[*label] += 1;
    }

    let mut taken = vec![false; points.len()];
    let mut centroids = Vec::with_capacity(k);
    for cluster in 0..k {
        if counts[cluster] > 0 {
            let n = counts[cluster] as f64;
            centroids.push([sums[cluster][0] / n, sums[cluster][1] / n, sums[cluster][2] / n]);
            continue;
        }

        let farthest = assignments
            .iter()
            .enumerate()
            .filter(|(i, _)| !taken[*i])
            .max_by(|a, b| a.1 .1.partial_cmp(&b.1 .1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i);
        match farthest {
            Some(i) => {
                taken[i] = true;
                centroids.push(points[i]);
            }
            None => centroids.push(previous[cluster]),
        }
    }
    centroids
}

/// k-means++ seeding: each new centroid is drawn with probability proportional to D(x)^2
pub fn plus_plus_init<R: Rng>(points: &[Point], k: usize, rng: &mut R) -> Vec<Point> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.gen_range(0..points.len())]);

    let mut closest: Vec<f64> = points
        .iter()
        .map(|p| distance_squared(p, &centroids[0]))
        .collect();

    while centroids.len() < k {
        let total: f64 = closest.iter().sum();
        let next = if total <= 0.0 {
            rng.gen_range(0..points.len())
        } else {
            let mut spin = rng.gen::<f64>() * total;
            let mut chosen = points.len() - 1;
            for (i, d) in closest.iter().enumerate() {
                spin -= d;
                if spin <= 0.0 {
                    chosen = i;
                    break;
                }
            }
            chosen
        };

        let centroid = points[next];
        for (i, p) in points.iter().enumerate() {
            let d = distance_squared(p, &centroid);
            if d < closest[i] {
                closest[i] = d;
            }
        }
        centroids.push(centroid);
    }

    centroids
}

impl KMeansModel {
    pub fn n_clusters(&self) -> usize {
        self.centroids.len()
    }

    /// Pixel count per cluster
    pub fn counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.centroids.len()];
        for label in &self.labels {
            counts[*label] += 1;
        }
        counts
    }

    pub fn predict(&self, point: &Point) -> usize {
        nearest(point, &self.centroids).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_plus_plus_picks_distinct_points_when_possible() {
        let points = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]];
        let mut rng = StdRng::seed_from_u64(11);
        let centroids = plus_plus_init(&points, 2, &mut rng);
        assert_ne!(centroids[0], centroids[1]);
    }

    #[test]
    fn test_empty_cluster_is_reseeded() {
        let points = vec![[0.0, 0.0, 0.0], [0.1, 0.0, 0.0], [5.0, 5.0, 5.0]];
        let assignments = assign(&points, &[[0.0, 0.0, 0.0], [100.0, 100.0, 100.0]]);
        let centroids = update_centroids(&points, &assignments, &[[0.0; 3], [100.0; 3]]);
        assert_eq!(centroids[1], [5.0, 5.0, 5.0]);
    }
}
