use super::dna::Dna;
use super::operators::{mating_pool, roulette_selection, tournament_selection};
use crate::config::evolution::{EvolutionConfig, SelectionMethod};
use rand::Rng;
use rayon::prelude::*;

pub struct Population {
    target: Vec<char>,
    mutation_rate: f64,
    selection_method: SelectionMethod,
    tournament_size: usize,
    members: Vec<Dna>,
    mating_pool: Vec<usize>,
    generation: usize,
    best: String,
    best_fitness: f64,
    /// Fittest phrase seen in any generation so far
    elite: String,
    elite_fitness: f64,
    finished: bool,
}

impl Population {
    pub fn new<R: Rng>(config: &EvolutionConfig, rng: &mut R) -> Self {
        let length = config.target.chars().count();
        let members = (0..config.population_size)
            .map(|_| Dna::random(length, rng))
            .collect();
        Self::with_members(config, members)
    }

    /// Start from the given phrases instead of random ones
    pub fn with_members(config: &EvolutionConfig, members: Vec<Dna>) -> Self {
        let mut population = Self {
            target: config.target.chars().collect(),
            mutation_rate: config.mutation_rate,
            selection_method: config.selection_method,
            tournament_size: config.tournament_size,
            members,
            mating_pool: Vec::new(),
            generation: 0,
            best: String::new(),
            best_fitness: 0.0,
            elite: String::new(),
            elite_fitness: f64::NEG_INFINITY,
            finished: false,
        };
        population.calculate_fitness();
        population.evaluate();
        population
    }

    pub fn calculate_fitness(&mut self) {
        let target = &self.target;
        self.members
            .par_iter_mut()
            .for_each(|member| member.calculate_fitness(target));
    }

    /// Rebuild the mating pool from the current fitness values
    pub fn natural_selection(&mut self) {
        self.mating_pool = if self.selection_method == SelectionMethod::MatingPool {
            mating_pool(&self.fitness_values())
        } else {
            Vec::new()
        };
    }

    /// Replace every member with a mutated child of two selected parents
    pub fn generate<R: Rng>(&mut self, rng: &mut R) {
        let fitness = self.fitness_values();
        let next: Vec<Dna> = (0..self.members.len())
            .map(|_| {
                let a = self.select_parent(&fitness, rng);
                let b = self.select_parent(&fitness, rng);
                let mut child = self.members[a].crossover(&self.members[b], rng);
                child.mutate(self.mutation_rate, rng);
                child
            })
            .collect();

        self.members = next;
        self.generation += 1;
    }

    fn select_parent<R: Rng>(&self, fitness: &[f64], rng: &mut R) -> usize {
        match self.selection_method {
            SelectionMethod::MatingPool => {
                if self.mating_pool.is_empty() {
                    rng.gen_range(0..self.members.len())
                } else {
                    self.mating_pool[rng.gen_range(0..self.mating_pool.len())]
                }
            }
            SelectionMethod::Roulette => roulette_selection(fitness, rng),
            SelectionMethod::Tournament => tournament_selection(fitness, self.tournament_size, rng),
        }
    }

    /// Track the current fittest member and whether it matches the target
    pub fn evaluate(&mut self) {
        if self.members.is_empty() {
            return;
        }
        let mut best_idx = 0;
        let mut best_fitness = f64::NEG_INFINITY;
        for (i, member) in self.members.iter().enumerate() {
            if member.fitness > best_fitness {
                best_fitness = member.fitness;
                best_idx = i;
            }
        }

        self.best = self.members[best_idx].phrase();
        self.best_fitness = best_fitness;
        if best_fitness > self.elite_fitness {
            self.elite = self.best.clone();
            self.elite_fitness = best_fitness;
        }
        if best_fitness >= 1.0 {
            self.finished = true;
        }
    }

    fn fitness_values(&self) -> Vec<f64> {
        self.members.iter().map(|m| m.fitness).collect()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn best(&self) -> &str {
        &self.best
    }

    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }

    pub fn best_so_far(&self) -> &str {
        &self.elite
    }

    pub fn best_so_far_fitness(&self) -> f64 {
        self.elite_fitness.max(0.0)
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn members(&self) -> &[Dna] {
        &self.members
    }

    pub fn average_fitness(&self) -> f64 {
        self.members.iter().map(|m| m.fitness).sum::<f64>() / self.members.len() as f64
    }

    /// First `limit` phrases, one per line
    pub fn phrases(&self, limit: usize) -> String {
        self.members
            .iter()
            .take(limit)
            .map(|m| m.phrase() + "\n")
            .collect()
    }
}
