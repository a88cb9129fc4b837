use algolab::config::evolution::{EvolutionConfig, SelectionMethod};
use algolab::engines::genetic::{Dna, PhraseEvolver, Population, ALPHABET};
use algolab::engines::{ChannelProgressCallback, ProgressMessage, QuietProgressCallback};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::mpsc::channel;

fn short_config(target: &str) -> EvolutionConfig {
    EvolutionConfig {
        target: target.to_string(),
        population_size: 200,
        mutation_rate: 0.01,
        max_generations: 2000,
        selection_method: SelectionMethod::MatingPool,
        tournament_size: 5,
    }
}

#[test]
fn test_fitness_is_share_of_matching_positions() {
    let mut dna = Dna::from_phrase("To be or");
    let target: Vec<char> = "To bX or".chars().collect();
    dna.calculate_fitness(&target);
    assert_eq!(dna.fitness, 7.0 / 8.0);
}

#[test]
fn test_crossover_takes_prefix_from_self() {
    let a = Dna::from_phrase("aaaaaa");
    let b = Dna::from_phrase("bbbbbb");
    assert_eq!(a.crossover_at(&b, 2).phrase(), "aabbbb");
    assert_eq!(a.crossover_at(&b, 0).phrase(), "bbbbbb");
}

#[test]
fn test_mutation_rate_bounds() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut dna = Dna::from_phrase("unchanged");
    dna.mutate(0.0, &mut rng);
    assert_eq!(dna.phrase(), "unchanged");

    let mut random = Dna::random(40, &mut rng);
    let before = random.clone();
    random.mutate(1.0, &mut rng);
    assert_eq!(random.len(), before.len());
    assert!(random.genes.iter().all(|g| ALPHABET.contains(*g)));
}

#[test]
fn test_zero_fitness_population_still_breeds() {
    let config = short_config("ab");
    let members = vec![Dna::from_phrase("  "); 20];
    let mut population = Population::with_members(&config, members);
    assert_eq!(population.best_fitness(), 0.0);

    let mut rng = StdRng::seed_from_u64(8);
    population.natural_selection();
    population.generate(&mut rng);

    assert_eq!(population.generation(), 1);
    assert_eq!(population.members().len(), 20);
    assert!(population.members().iter().all(|m| m.len() == 2));
}

#[test]
fn test_population_reports_best_and_average() {
    let mut rng = StdRng::seed_from_u64(5);
    let population = Population::new(&short_config("To be"), &mut rng);
    assert_eq!(population.members().len(), 200);
    assert!(population.best_fitness() >= population.average_fitness());
    assert_eq!(population.phrases(3).lines().count(), 3);
}

#[test]
fn test_evolution_reaches_short_target() {
    let evolver = PhraseEvolver::new(short_config("To be"), Some(42)).unwrap();
    let report = evolver.run(QuietProgressCallback).unwrap();

    assert!(report.reached_target);
    assert_eq!(report.best_phrase, "To be");
    assert_eq!(report.best_fitness, 1.0);
    assert_eq!(report.best_history.len(), report.generations + 1);
}

#[test]
fn test_tournament_and_roulette_also_converge() {
    for method in [SelectionMethod::Tournament, SelectionMethod::Roulette] {
        let mut config = short_config("be.");
        config.selection_method = method;
        let report = PhraseEvolver::new(config, Some(9))
            .unwrap()
            .run(QuietProgressCallback)
            .unwrap();
        assert!(report.reached_target, "{:?} did not converge", method);
    }
}

#[test]
fn test_best_history_never_gets_worse() {
    for seed in 0..5 {
        let mut config = short_config("To be or not to be.");
        config.max_generations = 150;
        let report = PhraseEvolver::new(config, Some(seed)).unwrap().run(QuietProgressCallback).unwrap();

        assert_never_worse(&report.best_history);
        assert_eq!(report.best_fitness, *report.best_history.last().unwrap());
    }
}

fn assert_never_worse(history: &[f64]) {
    for (generation, pair) in history.windows(2).enumerate() {
        assert!(
            pair[1] >= pair[0],
            "best fitness dropped at generation {}: {} -> {}",
            generation + 1,
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn test_same_seed_same_run() {
    let first = PhraseEvolver::new(short_config("or not"), Some(3)).unwrap().run(QuietProgressCallback).unwrap();
    let second = PhraseEvolver::new(short_config("or not"), Some(3)).unwrap().run(QuietProgressCallback).unwrap();
    assert_eq!(first.generations, second.generations);
    assert_eq!(first.best_history, second.best_history);
}

#[test]
fn test_generation_cap_stops_run() {
    let mut config = short_config("To be or not to be.");
    config.max_generations = 3;
    let report = PhraseEvolver::new(config, Some(1)).unwrap().run(QuietProgressCallback).unwrap();
    assert!(report.generations <= 3);
}

#[test]
fn test_progress_is_forwarded_over_channel() {
    let (tx, rx) = channel();
    let report = PhraseEvolver::new(short_config("be"), Some(11))
        .unwrap()
        .run(ChannelProgressCallback::new(tx))
        .unwrap();

    let completions = rx
        .try_iter()
        .filter(|m| matches!(m, ProgressMessage::IterationComplete { .. }))
        .count();
    assert_eq!(completions, report.generations);
}

#[test]
fn test_invalid_configs_are_rejected() {
    assert!(PhraseEvolver::new(short_config("Hello World."), None).is_ok());
    assert!(PhraseEvolver::new(short_config("Hello!"), None).is_err());
    assert!(PhraseEvolver::new(short_config(""), None).is_err());

    let mut config = short_config("To be");
    config.population_size = 1;
    assert!(PhraseEvolver::new(config, None).is_err());

    let mut config = short_config("To be");
    config.mutation_rate = 1.5;
    assert!(PhraseEvolver::new(config, None).is_err());
}
