use super::objective::{continuous_objective, Bounds, Objective};
use super::SwarmReport;
use crate::config::swarm::ParticleSwarmConfig;
use crate::config::traits::ConfigSection;
use crate::engines::progress::ProgressCallback;
use crate::engines::report::{seeded_rng, RunClock};
use crate::error::AlgolabError;
use rand::Rng;

#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec<f64>,
    pub velocity: Vec<f64>,
    pub error: f64,
    pub best_position: Vec<f64>,
    pub best_error: f64,
}

impl Particle {
    /// Position and velocity are both drawn uniformly from the search box
    pub fn random<R: Rng>(bounds: &Bounds, objective: &dyn Objective, rng: &mut R) -> Self {
        let position = bounds.sample(rng);
        let velocity = bounds.sample(rng);
        let error = objective.evaluate(&position);
        Self {
            best_position: position.clone(),
            best_error: error,
            position,
            velocity,
            error,
        }
    }
}

/// Coefficients of the velocity update
#[derive(Debug, Clone, Copy)]
pub struct Coefficients {
    pub inertia: f64,
    pub cognitive: f64,
    pub social: f64,
    pub max_velocity: f64,
}

/// Global-best particle swarm that minimizes its objective
pub struct ParticleSwarm {
    objective: Box<dyn Objective>,
    bounds: Bounds,
    coefficients: Coefficients,
    num_particles: usize,
    max_epochs: usize,
    target_error: Option<f64>,
    seed: Option<u64>,
}

impl ParticleSwarm {
    pub fn new(
        objective: Box<dyn Objective>,
        bounds: Bounds,
        coefficients: Coefficients,
        num_particles: usize,
        max_epochs: usize,
        seed: Option<u64>,
    ) -> Result<Self, AlgolabError> {
        if num_particles == 0 {
            return Err(AlgolabError::InvalidInput("Swarm needs at least one particle".to_string()));
        }
        if coefficients.max_velocity <= 0.0 {
            return Err(AlgolabError::InvalidInput("Max velocity must be positive".to_string()));
        }
        Ok(Self {
            objective,
            bounds,
            coefficients,
            num_particles,
            max_epochs,
            target_error: None,
            seed,
        })
    }

    pub fn from_config(config: &ParticleSwarmConfig, seed: Option<u64>) -> Result<Self, AlgolabError> {
        config.validate()?;
        let objective = continuous_objective(config.objective)?;
        let bounds = Bounds::uniform(config.dim, config.min_x, config.max_x)?;
        let coefficients = Coefficients {
            inertia: config.inertia,
            cognitive: config.cognitive,
            social: config.social,
            max_velocity: config.velocity_limit(),
        };
        let swarm = Self::new(
            objective,
            bounds,
            coefficients,
            config.num_particles,
            config.max_epochs,
            seed,
        )?;
        Ok(swarm.with_target_error(config.target_error))
    }

    /// Stop early once the best error is at or below `target`
    pub fn with_target_error(mut self, target: Option<f64>) -> Self {
        self.target_error = target;
        self
    }

    pub fn run<C: ProgressCallback>(&self, mut callback: C) -> Result<SwarmReport, AlgolabError> {
        let clock = RunClock::start("particle-swarm", self.seed);
        let mut rng = seeded_rng(self.seed);
        let objective = self.objective.as_ref();
        let dim = self.bounds.dim();
        let Coefficients { inertia, cognitive, social, max_velocity } = self.coefficients;

        let mut swarm: Vec<Particle> = (0..self.num_particles)
            .map(|_| Particle::random(&self.bounds, objective, &mut rng))
            .collect();
        for particle in swarm.iter_mut() {
            for v in particle.velocity.iter_mut() {
                *v = v.clamp(-max_velocity, max_velocity);
            }
        }

        let mut best_position = vec![0.0; dim];
        let mut best_error = f64::INFINITY;
        for particle in &swarm {
            if particle.error < best_error {
                best_error = particle.error;
                best_position = particle.position.clone();
            }
        }

        let mut history = vec![best_error];
        let mut epoch = 0;
        let mut converged = self.reached_target(best_error);

        while epoch < self.max_epochs && !converged {
            callback.on_iteration_start(epoch + 1);

            for particle in swarm.iter_mut() {
                for k in 0..dim {
                    let r1 = rng.gen::<f64>();
                    let r2 = rng.gen::<f64>();
                    let v = inertia * particle.velocity[k]
                        + cognitive * r1 * (particle.best_position[k] - particle.position[k])
                        + social * r2 * (best_position[k] - particle.position[k]);
                    particle.velocity[k] = v.clamp(-max_velocity, max_velocity);
                }

                for k in 0..dim {
                    let moved = particle.position[k] + particle.velocity[k];
                    particle.position[k] = self.bounds.clamp(k, moved);
                }

                particle.error = objective.evaluate(&particle.position);

                if particle.error < particle.best_error {
                    particle.best_error = particle.error;
                    particle.best_position = particle.position.clone();
                }

                if particle.error < best_error {
                    best_error = particle.error;
                    best_position = particle.position.clone();
                }
            }

            epoch += 1;
            history.push(best_error);
            converged = self.reached_target(best_error);
            callback.on_iteration_complete(epoch, best_error, "");
        }

        log::info!(
            "Particle swarm best error {:.6} after {} epochs",
            best_error, epoch
        );

        Ok(SwarmReport {
            run: clock.finish(),
            objective: objective.name().to_string(),
            best_description: objective.describe(&best_position),
            best_position,
            best_value: best_error,
            iterations: epoch,
            converged,
            history,
        })
    }

    fn reached_target(&self, best_error: f64) -> bool {
        self.target_error.map_or(false, |target| best_error <= target)
    }
}
