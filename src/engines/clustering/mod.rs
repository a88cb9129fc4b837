pub mod kmeans;
pub mod palette;
pub mod pixels;

pub use kmeans::{KMeans, KMeansModel, Point};
pub use palette::{normalize, quantize, PaletteEntry, QuantizationReport};
pub use pixels::{load_pixels, parse_pixels, write_pixels};
