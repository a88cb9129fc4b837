use super::objective::{continuous_objective, Bounds, Direction, Objective, TargetMatch};
use super::SwarmReport;
use crate::config::swarm::{BeeColonyConfig, ObjectiveKind};
use crate::config::traits::ConfigSection;
use crate::engines::progress::ProgressCallback;
use crate::engines::report::{seeded_rng, RunClock};
use crate::error::AlgolabError;
use rand::Rng;

/// A food source and the bee exploiting it
#[derive(Debug, Clone)]
pub struct Honeybee {
    pub solution: Vec<f64>,
    pub value: f64,
    pub fitness: f64,
    /// Once this reaches the hive's limit the source is abandoned
    pub unimproved_trials: usize,
}

/// Fitness used for greedy selection and onlooker probabilities, higher is better
pub fn fitness_of(value: f64, direction: Direction) -> f64 {
    match direction {
        Direction::Maximize => value,
        Direction::Minimize => {
            if value >= 0.0 {
                1.0 / (1.0 + value)
            } else {
                1.0 + value.abs()
            }
        }
    }
}

/// Artificial bee colony with employed, onlooker and scout phases
pub struct Hive {
    objective: Box<dyn Objective>,
    bounds: Bounds,
    direction: Direction,
    integer: bool,
    swarm_size: usize,
    max_cycles: usize,
    max_unimproved_trials: usize,
    objective_value: Option<f64>,
    seed: Option<u64>,
}

impl Hive {
    pub fn new(
        objective: Box<dyn Objective>,
        bounds: Bounds,
        direction: Direction,
        swarm_size: usize,
        max_cycles: usize,
        seed: Option<u64>,
    ) -> Result<Self, AlgolabError> {
        if swarm_size < 2 {
            return Err(AlgolabError::InvalidInput(
                "Bee colony needs at least two bees".to_string(),
            ));
        }
        let max_unimproved_trials = default_trial_limit(swarm_size, bounds.dim());
        Ok(Self {
            objective,
            bounds,
            direction,
            integer: false,
            swarm_size,
            max_cycles,
            max_unimproved_trials,
            objective_value: None,
            seed,
        })
    }

    pub fn from_config(config: &BeeColonyConfig, seed: Option<u64>) -> Result<Self, AlgolabError> {
        config.validate()?;
        let hive = match config.objective {
            ObjectiveKind::TargetMatch => {
                let objective = TargetMatch::new(&config.target);
                let dim = objective.len();
                let bounds = Bounds::uniform(dim, 'a' as u32 as f64, 'z' as u32 as f64)?;
                Self::new(
                    Box::new(objective),
                    bounds,
                    Direction::Maximize,
                    config.swarm_size,
                    config.max_cycles,
                    seed,
                )?
                .with_integer_solutions(true)
                .with_objective_value(Some(dim as f64))
            }
            kind => {
                let bounds = Bounds::uniform(config.dim, config.min_x, config.max_x)?;
                Self::new(
                    continuous_objective(kind)?,
                    bounds,
                    Direction::Minimize,
                    config.swarm_size,
                    config.max_cycles,
                    seed,
                )?
            }
        };
        Ok(match config.max_unimproved_trials {
            Some(limit) => hive.with_trial_limit(limit),
            None => hive,
        })
    }

    /// Round every gene, for problems over character codes or counts
    pub fn with_integer_solutions(mut self, integer: bool) -> Self {
        self.integer = integer;
        self
    }

    /// Stop as soon as the best value reaches this value
    pub fn with_objective_value(mut self, value: Option<f64>) -> Self {
        self.objective_value = value;
        self
    }

    pub fn with_trial_limit(mut self, limit: usize) -> Self {
        self.max_unimproved_trials = limit.max(1);
        self
    }

    pub fn trial_limit(&self) -> usize {
        self.max_unimproved_trials
    }

    fn scout<R: Rng>(&self, rng: &mut R) -> Honeybee {
        let mut solution = self.bounds.sample(rng);
        if self.integer {
            for gene in solution.iter_mut() {
                *gene = gene.round();
            }
        }
        self.bee_at(solution)
    }

    fn bee_at(&self, solution: Vec<f64>) -> Honeybee {
        let value = self.objective.evaluate(&solution);
        Honeybee {
            solution,
            value,
            fitness: fitness_of(value, self.direction),
            unimproved_trials: 0,
        }
    }

    /// Try a neighbour of `swarm[index]` on one random locus, keep it if strictly fitter
    fn exploit<R: Rng>(&self, swarm: &mut [Honeybee], index: usize, rng: &mut R) {
        let dim = self.bounds.dim();
        let locus = rng.gen_range(0..dim);

        let mut partner = rng.gen_range(0..swarm.len() - 1);
        if partner >= index {
            partner += 1;
        }

        let current = swarm[index].solution[locus];
        let phi = rng.gen_range(-1.0..=1.0);
        let mut gene = current + phi * (current - swarm[partner].solution[locus]);
        if self.integer {
            gene = gene.round();
        }
        gene = self.bounds.clamp(locus, gene);

        let mut neighbour = swarm[index].solution.clone();
        neighbour[locus] = gene;
        let candidate = self.bee_at(neighbour);

        if candidate.fitness > swarm[index].fitness {
            swarm[index] = candidate;
        } else {
            swarm[index].unimproved_trials += 1;
        }
    }

    fn selection_probabilities(&self, swarm: &[Honeybee]) -> Vec<f64> {
        let total: f64 = swarm.iter().map(|bee| bee.fitness.max(0.0)).sum();
        if total <= 0.0 {
            return vec![1.0; swarm.len()];
        }
        swarm.iter().map(|bee| bee.fitness.max(0.0) / total).collect()
    }

    fn reached_objective(&self, best: &Honeybee) -> bool {
        match self.objective_value {
            Some(goal) => match self.direction {
                Direction::Maximize => best.value >= goal,
                Direction::Minimize => best.value <= goal,
            },
            None => false,
        }
    }

    pub fn run<C: ProgressCallback>(&self, mut callback: C) -> Result<SwarmReport, AlgolabError> {
        let clock = RunClock::start("bee-colony", self.seed);
        let mut rng = seeded_rng(self.seed);

        let mut swarm: Vec<Honeybee> = (0..self.swarm_size).map(|_| self.scout(&mut rng)).collect();
        let mut best = memorize_best(&swarm, None);

        let mut history = vec![best.value];
        let mut cycle = 0;
        let mut converged = self.reached_objective(&best);

        while cycle < self.max_cycles && !converged {
            callback.on_iteration_start(cycle + 1);

            // employed bees
            for index in 0..self.swarm_size {
                self.exploit(&mut swarm, index, &mut rng);
            }

            // onlookers
            let probabilities = self.selection_probabilities(&swarm);
            let mut index = 0;
            let mut onlookers = 0;
            while onlookers < self.swarm_size {
                if rng.gen::<f64>() < probabilities[index] {
                    onlookers += 1;
                    self.exploit(&mut swarm, index, &mut rng);
                }
                index = (index + 1) % self.swarm_size;
            }

            // scouts
            for index in 0..self.swarm_size {
                if swarm[index].unimproved_trials >= self.max_unimproved_trials {
                    log::debug!("Bee {} abandoned its source at cycle {}", index, cycle + 1);
                    swarm[index] = self.scout(&mut rng);
                }
            }

            best = memorize_best(&swarm, Some(best));
            cycle += 1;
            history.push(best.value);
            converged = self.reached_objective(&best);

            let summary = format!("best = {}", self.objective.describe(&best.solution));
            callback.on_iteration_complete(cycle, best.value, &summary);
        }

        log::info!(
            "Bee colony best value {:.6} after {} cycles",
            best.value, cycle
        );

        Ok(SwarmReport {
            run: clock.finish(),
            objective: self.objective.name().to_string(),
            best_description: self.objective.describe(&best.solution),
            best_position: best.solution,
            best_value: best.value,
            iterations: cycle,
            converged,
            history,
        })
    }
}

fn default_trial_limit(swarm_size: usize, dim: usize) -> usize {
    ((0.5 * swarm_size as f64 * dim as f64).ceil() as usize).max(1)
}

fn memorize_best(swarm: &[Honeybee], previous: Option<Honeybee>) -> Honeybee {
    let mut best = previous;
    for bee in swarm {
        let better = best.as_ref().map_or(true, |b| bee.fitness > b.fitness);
        if better {
            best = Some(bee.clone());
        }
    }
    // swarm is never empty, so `best` is always set here
    best.unwrap_or_else(|| swarm[0].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::progress::QuietProgressCallback;
    use crate::engines::swarm::objective::FnObjective;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn flat_hive() -> Hive {
        let bounds = Bounds::uniform(2, -1.0, 1.0).unwrap();
        let objective = FnObjective::new("flat", |_: &[f64]| 0.0);
        Hive::new(Box::new(objective), bounds, Direction::Maximize, 4, 5, Some(1)).unwrap()
    }

    #[test]
    fn test_zero_fitness_gives_every_onlooker_a_chance() {
        let hive = flat_hive();
        let mut rng = StdRng::seed_from_u64(2);
        let swarm: Vec<Honeybee> = (0..4).map(|_| hive.scout(&mut rng)).collect();
        assert!(swarm.iter().all(|bee| bee.fitness == 0.0));
        assert_eq!(hive.selection_probabilities(&swarm), vec![1.0; 4]);

        let report = hive.run(QuietProgressCallback).unwrap();
        assert_eq!(report.iterations, 5);
        assert_eq!(report.best_value, 0.0);
    }

    #[test]
    fn test_probabilities_are_fitness_shares() {
        let hive = flat_hive();
        let bee = |fitness: f64| Honeybee {
            solution: vec![0.0, 0.0],
            value: fitness,
            fitness,
            unimproved_trials: 0,
        };
        let swarm = vec![bee(1.0), bee(3.0), bee(-2.0)];
        assert_eq!(hive.selection_probabilities(&swarm), vec![0.25, 0.75, 0.0]);
    }

    #[test]
    fn test_fitness_minimize_is_monotone() {
        assert!(fitness_of(0.0, Direction::Minimize) > fitness_of(1.0, Direction::Minimize));
        assert!(fitness_of(-2.0, Direction::Minimize) > fitness_of(0.0, Direction::Minimize));
        assert_eq!(fitness_of(3.0, Direction::Maximize), 3.0);
    }

    #[test]
    fn test_default_trial_limit() {
        assert_eq!(default_trial_limit(100, 20), 1000);
        assert_eq!(default_trial_limit(3, 1), 2);
    }
}
