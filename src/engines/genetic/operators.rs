use rand::Rng;

/// Tournament selection: index of the best of K random candidates
pub fn tournament_selection<R: Rng>(
    fitness: &[f64],
    tournament_size: usize,
    rng: &mut R,
) -> usize {
    let mut best_idx = rng.gen_range(0..fitness.len());
    let mut best_fitness = fitness[best_idx];

    for _ in 1..tournament_size {
        let idx = rng.gen_range(0..fitness.len());
        if fitness[idx] > best_fitness {
            best_idx = idx;
            best_fitness = fitness[idx];
        }
    }

    best_idx
}

/// Roulette wheel selection: probability proportional to fitness
pub fn roulette_selection<R: Rng>(fitness: &[f64], rng: &mut R) -> usize {
    let total_fitness: f64 = fitness.iter().map(|f| f.max(0.0)).sum();

    if total_fitness <= 0.0 {
        return rng.gen_range(0..fitness.len());
    }

    let mut spin = rng.gen::<f64>() * total_fitness;

    for (idx, f) in fitness.iter().enumerate() {
        spin -= f.max(0.0);
        if spin <= 0.0 {
            return idx;
        }
    }

    fitness.len() - 1
}

/// Maps `v` from `[low1, high1]` to `[low2, high2]`
pub fn map_range(v: f64, low1: f64, high1: f64, low2: f64, high2: f64) -> f64 {
    (v - low1) * ((high2 - low2) / (high1 - low1)) + low2
}

/// Mating pool of indices, each repeated `floor(map(fitness, 0, max, 0, 100))` times.
/// Empty when no individual has positive fitness.
pub fn mating_pool(fitness: &[f64]) -> Vec<usize> {
    let max_fitness = fitness.iter().cloned().fold(0.0_f64, f64::max);
    if max_fitness <= 0.0 {
        return Vec::new();
    }

    let mut pool = Vec::new();
    for (idx, f) in fitness.iter().enumerate() {
        let copies = map_range(*f, 0.0, max_fitness, 0.0, 100.0).floor() as usize;
        pool.extend(std::iter::repeat(idx).take(copies));
    }
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_map_range() {
        assert_eq!(map_range(0.5, 0.0, 1.0, 0.0, 100.0), 50.0);
        assert_eq!(map_range(2.0, 0.0, 4.0, 10.0, 20.0), 15.0);
    }

    #[test]
    fn test_mating_pool_proportional() {
        let pool = mating_pool(&[0.5, 0.25, 0.0]);
        assert_eq!(pool.iter().filter(|&&i| i == 0).count(), 100);
        assert_eq!(pool.iter().filter(|&&i| i == 1).count(), 50);
        assert!(!pool.contains(&2));
    }

    #[test]
    fn test_mating_pool_all_zero_is_empty() {
        assert!(mating_pool(&[0.0, 0.0]).is_empty());
    }

    #[test]
    fn test_tournament_picks_best_when_exhaustive() {
        let mut rng = StdRng::seed_from_u64(7);
        let fitness = [0.1, 0.9, 0.3];
        // Large tournaments almost surely see index 1
        let idx = tournament_selection(&fitness, 64, &mut rng);
        assert_eq!(idx, 1);
    }

    #[test]
    fn test_roulette_never_picks_zero_fitness() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            assert_ne!(roulette_selection(&[0.0, 1.0, 2.0], &mut rng), 0);
        }
    }
}
