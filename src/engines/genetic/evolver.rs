use super::population::Population;
use crate::config::evolution::EvolutionConfig;
use crate::config::traits::ConfigSection;
use crate::engines::progress::ProgressCallback;
use crate::engines::report::{seeded_rng, RunClock, RunInfo};
use crate::error::AlgolabError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionReport {
    pub run: RunInfo,
    pub target: String,
    pub best_phrase: String,
    pub best_fitness: f64,
    pub generations: usize,
    pub reached_target: bool,
    /// Best fitness seen so far, the initial population first
    pub best_history: Vec<f64>,
    pub average_history: Vec<f64>,
}

/// Evolves random strings towards a target phrase
pub struct PhraseEvolver {
    config: EvolutionConfig,
    seed: Option<u64>,
}

impl PhraseEvolver {
    pub fn new(config: EvolutionConfig, seed: Option<u64>) -> Result<Self, AlgolabError> {
        config.validate()?;
        Ok(Self { config, seed })
    }

    pub fn run<C: ProgressCallback>(&self, mut callback: C) -> Result<EvolutionReport, AlgolabError> {
        let clock = RunClock::start("genetic-phrase", self.seed);
        let mut rng = seeded_rng(self.seed);
        let mut population = Population::new(&self.config, &mut rng);

        let mut best_history = vec![population.best_so_far_fitness()];
        let mut average_history = vec![population.average_fitness()];

        while !population.is_finished() && population.generation() < self.config.max_generations {
            callback.on_iteration_start(population.generation() + 1);

            population.natural_selection();
            population.generate(&mut rng);
            population.calculate_fitness();
            population.evaluate();

            best_history.push(population.best_so_far_fitness());
            average_history.push(population.average_fitness());

            let summary = format!(
                "avg = {:.4} phrase = {:?}",
                population.average_fitness(),
                population.best()
            );
            callback.on_iteration_complete(population.generation(), population.best_so_far_fitness(), &summary);
        }

        if population.is_finished() {
            log::info!(
                "Target phrase reached after {} generations",
                population.generation()
            );
        } else {
            log::warn!(
                "Stopped after {} generations without reaching the target",
                population.generation()
            );
        }

        Ok(EvolutionReport {
            run: clock.finish(),
            target: self.config.target.clone(),
            best_phrase: population.best_so_far().to_string(),
            best_fitness: population.best_so_far_fitness(),
            generations: population.generation(),
            reached_target: population.is_finished(),
            best_history,
            average_history,
        })
    }
}
