//! Particle PHD filter demo
//!
//! Runs the filter on a simulated two-target scenario with clutter and
//! missed detections, printing the per-step intensity estimate and a
//! terminal histogram of the final particle cloud.

use clap::Parser;
use particle_phd_rs::common::SimpleRng;
use particle_phd_rs::measurements::{GroundTruth, MeasurementSource, SimulatedSensor};
use particle_phd_rs::phd::{PhdConfig, PhdFilter};
use particle_phd_rs::reporter::LoggingReporter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Random seed for deterministic runs
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Number of time steps to simulate
    #[arg(short, long, default_value_t = 10)]
    time_steps: usize,

    /// Number of particles after resampling
    #[arg(short, long, default_value_t = 500)]
    num_particles: usize,

    /// Clutter rate (expected number of false measurements per time step)
    #[arg(short, long, default_value_t = 10.0)]
    clutter_rate: f64,

    /// Detection probability
    #[arg(short = 'p', long, default_value_t = 0.9)]
    detection_probability: f64,

    /// Birth rate (expected births per particle per step)
    #[arg(short, long, default_value_t = 0.1)]
    birth_rate: f64,

    /// True initial target positions
    #[arg(long, value_delimiter = ',', default_value = "30,60")]
    targets: Vec<f64>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = PhdConfig {
        num_particles: args.num_particles,
        detection_prob: args.detection_probability,
        clutter_rate: args.clutter_rate,
        birth_rate: args.birth_rate,
        ..Default::default()
    };

    println!("Particle PHD Filter Demo");
    println!("========================");
    println!("Seed: {}", args.seed);
    println!("Particles: {}", config.num_particles);
    println!("Clutter rate: {}", config.clutter_rate);
    println!("Detection probability: {}", config.detection_prob);
    println!("Targets: {:?}", args.targets);
    println!();

    let mut rng = SimpleRng::new(args.seed);
    let sensor = SimulatedSensor::from_config(&config);
    let mut truth = GroundTruth::new(args.targets);

    let mut filter = match PhdFilter::new(config.clone(), &mut rng) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let mut reporter = LoggingReporter;
    for t in 1..=args.time_steps {
        let measurements = sensor.measure(&mut rng, truth.positions());
        truth.drift(&mut rng);

        match filter.step_with_reporter(&mut rng, &measurements, &mut reporter) {
            Ok(estimate) => println!(
                "step {:>3}: {:>2} measurements, {:>3} births, expected targets {:.2}",
                t, estimate.num_measurements, estimate.num_births, estimate.expected_targets
            ),
            Err(e) => {
                eprintln!("Filter step {} failed: {}", t, e);
                std::process::exit(1);
            }
        }
    }

    println!();
    println!("Final true positions: {:?}", truth.positions());
    print_histogram(&filter, &config);
}

/// Terminal histogram of the particle cloud over the state space.
fn print_histogram(filter: &PhdFilter, config: &PhdConfig) {
    const BINS: usize = 25;
    const MAX_WIDTH: usize = 50;

    let counts = filter.population().histogram(config.state_space, BINS);
    let max = counts.iter().copied().max().unwrap_or(0).max(1);
    let bin_width = config.state_space_width() / BINS as f64;

    println!("Particle distribution:");
    for (i, &count) in counts.iter().enumerate() {
        let lo = config.state_space.0 + i as f64 * bin_width;
        let bar = "#".repeat(count * MAX_WIDTH / max);
        println!("{:>7.1} | {:<width$} {}", lo, bar, count, width = MAX_WIDTH);
    }
}
