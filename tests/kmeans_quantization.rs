use algolab::engines::clustering::{normalize, quantize, KMeans, Point};
use algolab::AlgolabError;

/// 50 reddish and 30 bluish pixels
fn two_blobs() -> Vec<Point> {
    let mut pixels = Vec::new();
    for i in 0..50 {
        let jitter = (i % 5) as f64;
        pixels.push([245.0 + jitter, 10.0 + jitter, 10.0]);
    }
    for i in 0..30 {
        let jitter = (i % 3) as f64;
        pixels.push([10.0, 10.0 + jitter, 245.0 + jitter]);
    }
    pixels
}

#[test]
fn test_normalize_scales_to_unit_range() {
    assert_eq!(normalize(&[[255.0, 0.0, 51.0]]), vec![[1.0, 0.0, 0.2]]);
}

#[test]
fn test_two_blobs_give_two_palette_entries() {
    let kmeans = KMeans::new(2).with_seed(Some(17));
    let (compressed, report) = quantize(&two_blobs(), &kmeans).unwrap();

    assert_eq!(compressed.len(), 80);
    assert_eq!(report.pixel_count, 80);
    assert_eq!(report.palette.len(), 2);

    let first = &report.palette[0];
    assert_eq!(first.count, 50);
    assert!((first.share - 0.625).abs() < 1e-12);
    assert!(first.color[0] > 240 && first.color[2] < 20);

    let second = &report.palette[1];
    assert_eq!(second.count, 30);
    assert!(second.color[2] > 240 && second.color[0] < 20);

    // every red pixel collapses onto the same color
    assert!(compressed[..50].windows(2).all(|w| w[0] == w[1]));
    assert!(compressed[50..].windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_model_labels_and_inertia() {
    let points = normalize(&two_blobs());
    let model = KMeans::new(2).with_seed(Some(5)).fit(&points).unwrap();

    assert_eq!(model.labels.len(), points.len());
    assert!(model.labels[..50].iter().all(|&l| l == model.labels[0]));
    assert!(model.labels[50..].iter().all(|&l| l == model.labels[50]));
    assert_ne!(model.labels[0], model.labels[50]);
    assert!(model.inertia < 0.01);
    assert_eq!(model.predict(&[1.0, 0.0, 0.0]), model.labels[0]);
}

#[test]
fn test_compress_maps_unseen_pixels_to_nearest_color() {
    let points = normalize(&two_blobs());
    let model = KMeans::new(2).with_seed(Some(5)).fit(&points).unwrap();

    let fresh = normalize(&[[230.0, 30.0, 20.0], [20.0, 40.0, 220.0]]);
    let compressed = model.compress(&fresh);
    assert_eq!(compressed.len(), 2);
    assert!(compressed[0][0] > 240.0 && compressed[0][2] < 20.0);
    assert!(compressed[1][2] > 240.0 && compressed[1][0] < 20.0);

    // on the training points it agrees with the fitted labels
    let own = model.compress(&points);
    for (pixel, label) in own.iter().zip(&model.labels) {
        let centroid = model.centroids[*label];
        assert!((pixel[0] - centroid[0] * 255.0).abs() < 1e-9);
    }
}

#[test]
fn test_more_restarts_never_hurt() {
    let points = normalize(&two_blobs());
    let mut single = KMeans::new(4).with_seed(Some(1));
    single.n_init = 1;
    let many = KMeans::new(4).with_seed(Some(1));

    let a = single.fit(&points).unwrap();
    let b = many.fit(&points).unwrap();
    // the first restart of `many` is the same run as `single`
    assert!(b.inertia <= a.inertia + 1e-12);
}

#[test]
fn test_duplicate_points_fill_every_cluster() {
    let points = vec![[0.5, 0.5, 0.5]; 6];
    let model = KMeans::new(3).with_seed(Some(2)).fit(&points).unwrap();
    assert_eq!(model.centroids.len(), 3);
    assert_eq!(model.inertia, 0.0);
}

#[test]
fn test_invalid_inputs() {
    let pixels = two_blobs();
    assert!(matches!(KMeans::new(0).fit(&normalize(&pixels)), Err(AlgolabError::Clustering(_))));
    assert!(KMeans::new(2).fit(&[]).is_err());
    assert!(KMeans::new(3).fit(&[[0.0; 3], [1.0; 3]]).is_err());
    assert!(matches!(
        quantize(&[[300.0, 0.0, 0.0]], &KMeans::new(1)),
        Err(AlgolabError::InvalidInput(_))
    ));
}
