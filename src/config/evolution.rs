use super::traits::{check_unit_interval, ConfigSection};
use crate::engines::genetic::dna::ALPHABET;
use crate::error::AlgolabError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub target: String,
    pub population_size: usize,
    pub mutation_rate: f64,
    pub max_generations: usize,
    pub selection_method: SelectionMethod,
    pub tournament_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMethod {
    /// Fitness-proportional mating pool, each individual copied up to 100 times
    MatingPool,
    Roulette,
    Tournament,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            target: "To be or not to be.".to_string(),
            population_size: 500,
            mutation_rate: 0.008,
            max_generations: 10_000,
            selection_method: SelectionMethod::MatingPool,
            tournament_size: 5,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), AlgolabError> {
        if self.target.is_empty() {
            return Err(AlgolabError::Configuration(
                "Target phrase must not be empty".to_string()
            ));
        }
        if let Some(c) = self.target.chars().find(|c| !ALPHABET.contains(*c)) {
            return Err(AlgolabError::Configuration(format!(
                "Target phrase contains '{}', which is outside the gene alphabet",
                c
            )));
        }
        if self.population_size < 2 {
            return Err(AlgolabError::Configuration(
                "Population size must be at least 2".to_string()
            ));
        }
        check_unit_interval(Self::section_name(), "mutation_rate", self.mutation_rate)?;
        if self.selection_method == SelectionMethod::Tournament && self.tournament_size == 0 {
            return Err(AlgolabError::Configuration(
                "Tournament size must be positive".to_string()
            ));
        }
        Ok(())
    }
}
