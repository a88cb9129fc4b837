use algolab::color::{self, ColorSpace, Whitepoint};
use algolab::config::ConfigManager;
use algolab::engines::clustering::{self, KMeans};
use algolab::engines::genetic::PhraseEvolver;
use algolab::engines::swarm::{Hive, ParticleSwarm, SwarmReport};
use algolab::engines::{ConsoleProgressCallback, ProgressCallback, QuietProgressCallback};
use algolab::scene::{Scene, SceneScript};
use algolab::trajectory::TrajectoryGenerator;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "algolab", version, about = "Numeric algorithm demos")]
struct Cli {
    /// TOML config file; ALGOLAB__<SECTION>__<FIELD> env vars override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the run report as JSON instead of a summary
    #[arg(long, global = true)]
    json: bool,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evolve a population of strings towards a target phrase
    Phrase {
        target: Option<String>,
        #[arg(long)]
        population: Option<usize>,
        #[arg(long)]
        mutation_rate: Option<f64>,
        #[arg(long, default_value_t = 1)]
        print_every: usize,
    },
    /// Minimize a test function with particle swarm optimization
    Pso {
        #[arg(long)]
        dim: Option<usize>,
        #[arg(long)]
        particles: Option<usize>,
        #[arg(long)]
        epochs: Option<usize>,
        #[arg(long, default_value_t = 10)]
        print_every: usize,
    },
    /// Run the artificial bee colony
    Bees {
        target: Option<String>,
        #[arg(long)]
        swarm_size: Option<usize>,
        #[arg(long)]
        cycles: Option<usize>,
        #[arg(long, default_value_t = 100)]
        print_every: usize,
    },
    /// Reduce a list of RGB pixels to a k-color palette
    Kmeans {
        pixels: PathBuf,
        n_clusters: Option<usize>,
        /// Write the quantized pixels here
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Convert a color between spaces
    Color {
        from: ColorSpace,
        to: ColorSpace,
        #[arg(num_args = 3, required = true, allow_negative_numbers = true)]
        components: Vec<f64>,
        #[arg(long, default_value = "D65")]
        whitepoint: Whitepoint,
        #[arg(long, default_value_t = 1)]
        precision: usize,
    },
    /// Quintic trajectory between two points
    Trajectory {
        #[arg(long, num_args = 3, required = true, allow_negative_numbers = true)]
        start: Vec<f64>,
        #[arg(long, num_args = 3, required = true, allow_negative_numbers = true)]
        goal: Vec<f64>,
        #[arg(long)]
        duration: f64,
        #[arg(long, default_value_t = 11)]
        samples: usize,
    },
    /// Run a scene editing script
    Scene { script: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let manager = ConfigManager::new();
    manager
        .load(cli.config.as_deref())
        .context("failed to load configuration")?;
    let config = manager.get()?;

    match cli.command {
        Command::Phrase { target, population, mutation_rate, print_every } => {
            let mut section = config.evolution;
            if let Some(target) = target {
                section.target = target;
            }
            if let Some(population) = population {
                section.population_size = population;
            }
            if let Some(rate) = mutation_rate {
                section.mutation_rate = rate;
            }
            let evolver = PhraseEvolver::new(section, cli.seed)?;
            let report = evolver.run(progress(cli.json, "generation", print_every))?;
            emit(cli.json, &report, || {
                println!("total generations: {}", report.generations);
                println!("best fitness:      {:.4}", report.best_fitness);
                println!("best phrase:       {}", report.best_phrase);
            })?;
        }
        Command::Pso { dim, particles, epochs, print_every } => {
            let mut section = config.particle_swarm;
            if let Some(dim) = dim {
                section.dim = dim;
            }
            if let Some(particles) = particles {
                section.num_particles = particles;
            }
            if let Some(epochs) = epochs {
                section.max_epochs = epochs;
            }
            let swarm = ParticleSwarm::from_config(&section, cli.seed)?;
            let report = swarm.run(progress(cli.json, "epoch", print_every))?;
            emit(cli.json, &report, || print_swarm(&report))?;
        }
        Command::Bees { target, swarm_size, cycles, print_every } => {
            let mut section = config.bee_colony;
            if let Some(target) = target {
                section.target = target;
            }
            if let Some(size) = swarm_size {
                section.swarm_size = size;
            }
            if let Some(cycles) = cycles {
                section.max_cycles = cycles;
            }
            let hive = Hive::from_config(&section, cli.seed)?;
            let report = hive.run(progress(cli.json, "cycle", print_every))?;
            emit(cli.json, &report, || print_swarm(&report))?;
        }
        Command::Kmeans { pixels, n_clusters, output } => {
            let mut section = config.clustering;
            if let Some(k) = n_clusters {
                section.n_clusters = k;
            }
            let data = clustering::load_pixels(&pixels)
                .with_context(|| format!("failed to read pixels from {}", pixels.display()))?;
            let kmeans = KMeans::from_config(&section, cli.seed)?;
            let (compressed, report) = clustering::quantize(&data, &kmeans)?;
            if let Some(path) = &output {
                clustering::write_pixels(path, &compressed)?;
            }
            emit(cli.json, &report, || {
                println!("{} pixels -> {} colors (inertia {:.6})", report.pixel_count, report.n_clusters, report.inertia);
                for entry in &report.palette {
                    let [r, g, b] = entry.color;
                    println!("  #{:02x}{:02x}{:02x}  {:6.2}%", r, g, b, entry.share * 100.0);
                }
                if let Some(path) = &output {
                    println!("Pixels saved to {}", path.display());
                }
            })?;
        }
        Command::Color { from, to, components, whitepoint, precision } => {
            let input = [components[0], components[1], components[2]];
            let converted = color::convert(&input, from, to, whitepoint)?;
            #[derive(Serialize)]
            struct ColorReport {
                from: ColorSpace,
                to: ColorSpace,
                whitepoint: Whitepoint,
                input: [f64; 3],
                output: [f64; 3],
            }
            let report = ColorReport { from, to, whitepoint, input, output: converted };
            emit(cli.json, &report, || {
                println!(
                    "{} to {}",
                    color::format_color(&input, from, precision),
                    color::format_color(&converted, to, precision)
                );
            })?;
        }
        Command::Trajectory { start, goal, duration, samples } => {
            let generator = TrajectoryGenerator::new(
                [start[0], start[1], start[2]],
                [goal[0], goal[1], goal[2]],
                duration,
            );
            let trajectory = generator.solve()?;
            let points = trajectory.sample(samples);
            emit(cli.json, &points, || {
                for (axis, c) in ["x", "y", "z"].iter().zip(&trajectory.coefficients) {
                    println!("{}(t) coefficients: {:?}", axis, c);
                }
                for p in &points {
                    println!(
                        "t={:7.3}  pos=({:8.3}, {:8.3}, {:8.3})  vel=({:7.3}, {:7.3}, {:7.3})",
                        p.t, p.position[0], p.position[1], p.position[2],
                        p.velocity[0], p.velocity[1], p.velocity[2]
                    );
                }
            })?;
        }
        Command::Scene { script } => {
            let text = std::fs::read_to_string(&script)
                .with_context(|| format!("failed to read script {}", script.display()))?;
            let scene = Scene::new(config.scene, cli.seed)?;
            let report = SceneScript::new(scene).run(&text)?;
            emit(cli.json, &report, || {
                for line in &report.log {
                    println!("{}", line);
                }
            })?;
        }
    }

    Ok(())
}

fn progress(quiet: bool, label: &'static str, every: usize) -> Box<dyn ProgressCallback> {
    if quiet {
        Box::new(QuietProgressCallback)
    } else {
        Box::new(ConsoleProgressCallback::new(label, every))
    }
}

fn emit<T: Serialize>(json: bool, report: &T, summary: impl FnOnce()) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        summary();
    }
    Ok(())
}

fn print_swarm(report: &SwarmReport) {
    println!("objective:     {}", report.objective);
    println!("iterations:    {}", report.iterations);
    println!("best value:    {:.6}", report.best_value);
    println!("best solution: {}", report.best_description);
}
