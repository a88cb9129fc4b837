use super::kmeans::{KMeans, KMeansModel, Point};
use crate::engines::report::{timed, RunClock, RunInfo};
use crate::error::AlgolabError;
use serde::{Deserialize, Serialize};

/// Scales 0-255 channels to [0, 1]
pub fn normalize(pixels: &[Point]) -> Vec<Point> {
    pixels
        .iter()
        .map(|p| [p[0] / 255.0, p[1] / 255.0, p[2] / 255.0])
        .collect()
}

fn denormalize(p: &Point) -> Point {
    [p[0] * 255.0, p[1] * 255.0, p[2] * 255.0]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub color: [u8; 3],
    pub count: usize,
    pub share: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantizationReport {
    pub run: RunInfo,
    pub n_clusters: usize,
    pub pixel_count: usize,
    pub inertia: f64,
    pub iterations: usize,
    /// Ordered by decreasing frequency
    pub palette: Vec<PaletteEntry>,
}

impl KMeansModel {
    /// Every normalized point replaced by its nearest centroid, back in 0-255
    pub fn compress(&self, points: &[Point]) -> Vec<Point> {
        points
            .iter()
            .map(|point| denormalize(&self.centroids[self.predict(point)]))
            .collect()
    }

    /// Cluster colors with their pixel share, most frequent first
    pub fn palette(&self) -> Vec<PaletteEntry> {
        let total = self.labels.len().max(1) as f64;
        let mut entries: Vec<PaletteEntry> = self
            .centroids
            .iter()
            .zip(self.counts())
            .map(|(centroid, count)| {
                let rgb = denormalize(centroid);
                PaletteEntry {
                    color: [to_channel(rgb[0]), to_channel(rgb[1]), to_channel(rgb[2])],
                    count,
                    share: count as f64 / total,
                }
            })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries
    }
}

fn to_channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Reduce `pixels` (0-255 RGB) to `kmeans.n_clusters` colors
pub fn quantize(pixels: &[Point], kmeans: &KMeans) -> Result<(Vec<Point>, QuantizationReport), AlgolabError> {
    let clock = RunClock::start("kmeans-quantize", kmeans.seed);
    if let Some(bad) = pixels.iter().find(|p| p.iter().any(|c| !(0.0..=255.0).contains(c))) {
        return Err(AlgolabError::InvalidInput(format!(
            "Pixel {:?} has a channel outside [0, 255]",
            bad
        )));
    }

    let normalized = timed("normalize", || normalize(pixels));
    let model = timed("cluster", || kmeans.fit(&normalized))?;
    let compressed = model.compress(&normalized);

    let report = QuantizationReport {
        n_clusters: model.n_clusters(),
        pixel_count: pixels.len(),
        inertia: model.inertia,
        iterations: model.iterations,
        palette: model.palette(),
        run: clock.finish(),
    };
    Ok((compressed, report))
}
