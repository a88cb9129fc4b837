use rand::Rng;
use serde::{Deserialize, Serialize};

/// Characters a gene may take
pub const ALPHABET: &str = " .ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

fn random_gene<R: Rng>(rng: &mut R) -> char {
    let bytes = ALPHABET.as_bytes();
    bytes[rng.gen_range(0..bytes.len())] as char
}

/// A candidate phrase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dna {
    pub genes: Vec<char>,
    pub fitness: f64,
}

impl Dna {
    pub fn random<R: Rng>(length: usize, rng: &mut R) -> Self {
        Self {
            genes: (0..length).map(|_| random_gene(rng)).collect(),
            fitness: 0.0,
        }
    }

    pub fn from_phrase(phrase: &str) -> Self {
        Self {
            genes: phrase.chars().collect(),
            fitness: 0.0,
        }
    }

    pub fn phrase(&self) -> String {
        self.genes.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Share of positions that already match `target`
    pub fn calculate_fitness(&mut self, target: &[char]) {
        if target.is_empty() {
            self.fitness = 0.0;
            return;
        }
        let score = self
            .genes
            .iter()
            .zip(target)
            .filter(|(gene, wanted)| gene == wanted)
            .count();
        self.fitness = score as f64 / target.len() as f64;
    }

    /// Midpoint crossover: genes before the midpoint come from `self`, the rest from `partner`
    pub fn crossover<R: Rng>(&self, partner: &Dna, rng: &mut R) -> Dna {
        let len = self.len().min(partner.len());
        if len == 0 {
            return self.clone();
        }
        let midpoint = rng.gen_range(0..len);
        self.crossover_at(partner, midpoint)
    }

    pub fn crossover_at(&self, partner: &Dna, midpoint: usize) -> Dna {
        let genes = self
            .genes
            .iter()
            .zip(&partner.genes)
            .enumerate()
            .map(|(i, (mine, theirs))| if i < midpoint { *mine } else { *theirs })
            .collect();
        Dna { genes, fitness: 0.0 }
    }

    pub fn mutate<R: Rng>(&mut self, mutation_rate: f64, rng: &mut R) {
        for gene in self.genes.iter_mut() {
            if rng.gen::<f64>() < mutation_rate {
                *gene = random_gene(rng);
            }
        }
    }
}
