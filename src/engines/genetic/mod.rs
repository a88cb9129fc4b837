pub mod dna;
pub mod operators;
pub mod population;
pub mod evolver;

pub use dna::{Dna, ALPHABET};
pub use evolver::{EvolutionReport, PhraseEvolver};
pub use population::Population;
