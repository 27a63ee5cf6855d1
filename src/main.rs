//! Landscape Evo CLI - Run an evolution from JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use landscape_evo::{
    compute::{FitnessLandscape, Population, PopulationStats},
    persist::{PopulationSnapshot, SnapshotError, SnapshotHook, SnapshotRecorder},
    schema::{LandscapeSource, RunConfig},
};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--example" {
        print_example_config();
        return;
    }

    if args.len() < 2 {
        eprintln!("Usage: {} <run.json> [generations] [policy]", args[0]);
        eprintln!();
        eprintln!("Evolve a population on a fitness landscape from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  run.json     Path to run configuration file");
        eprintln!("  generations  Override the configured generation count");
        eprintln!("  policy       Override the selection policy: t/tournament or r/roulette");
        eprintln!();
        eprintln!("Print an example configuration with --example.");
        std::process::exit(1);
    }

    let config_path = PathBuf::from(&args[1]);

    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let mut config: RunConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    if let Some(generations) = args.get(2).and_then(|s| s.parse().ok()) {
        config.generations = generations;
    }

    if let Some(id) = args.get(3)
        && let Some(fallback) = config.override_selection(id)
    {
        eprintln!("Warning: {}; using {}", fallback, config.selection);
    }

    if let Err(e) = config.validate() {
        eprintln!("Invalid config: {}", e);
        std::process::exit(1);
    }

    // Relative landscape paths resolve against the config file
    let landscape = match &config.landscape {
        LandscapeSource::File { path } => {
            let path = config_path
                .parent()
                .map(|dir| dir.join(path))
                .unwrap_or_else(|| path.clone());
            FitnessLandscape::load_from_path(&path)
        }
        LandscapeSource::Pattern {
            width,
            height,
            pattern,
        } => FitnessLandscape::from_pattern(*width, *height, pattern),
    }
    .unwrap_or_else(|e| {
        eprintln!("Error loading landscape: {}", e);
        std::process::exit(1);
    });

    println!("Landscape Evolution");
    println!("===================");
    println!("Landscape: {}x{}", landscape.width(), landscape.height());
    println!("Population: {}", config.population.size);
    println!("Mutation rate: {}", config.population.mutation_rate);
    println!("Selection: {}", config.selection);
    println!("Generations: {}", config.generations);
    println!();

    let mut population = Population::new(landscape, &config.population).unwrap_or_else(|e| {
        eprintln!("Error creating population: {}", e);
        std::process::exit(1);
    });

    let mut recorder = config.snapshot_dir.as_ref().map(|dir| {
        SnapshotRecorder::new(dir).unwrap_or_else(|e| {
            eprintln!("Error creating snapshot directory: {}", e);
            std::process::exit(1);
        })
    });

    print_stats("Initial population", &population.stats());

    println!("Running evolution...");
    let start = Instant::now();

    // Report progress every 10%
    let total = config.generations;
    let chunk = (total / 10).max(1);
    let first_generation = population.generation();

    let mut hook = |snapshot: &PopulationSnapshot| -> Result<(), SnapshotError> {
        if let Some(recorder) = recorder.as_mut() {
            recorder.on_generation(snapshot)?;
        }

        let done = snapshot.generation - first_generation;
        if done > 0 && (done % chunk == 0 || done == total) {
            let stats = PopulationStats::from_organisms(&snapshot.organisms);
            let elapsed = start.elapsed().as_secs_f32();
            println!(
                "  Generation {}/{}: mean={:.4}, max={:.4}, genotypes={}, {:.1} gen/s",
                done,
                total,
                stats.mean_fitness,
                stats.max_fitness,
                stats.distinct_genotypes,
                done as f32 / elapsed
            );
        }
        Ok(())
    };

    if let Err(e) = population.evolve_with_hook(total, config.selection, &mut hook) {
        eprintln!(
            "Evolution stopped at generation {}: {}",
            population.generation(),
            e
        );
        std::process::exit(2);
    }

    let elapsed = start.elapsed();
    println!();
    print_stats("Final population", &population.stats());
    if let Some(recorder) = &recorder {
        println!(
            "Snapshots: {} written to {}",
            recorder.written().len(),
            recorder.dir().display()
        );
    }
    println!(
        "Time: {:.2}s ({:.1} gen/s)",
        elapsed.as_secs_f32(),
        total as f32 / elapsed.as_secs_f32()
    );
}

fn print_stats(label: &str, stats: &PopulationStats) {
    println!("{}:", label);
    println!("  Mean fitness: {:.6}", stats.mean_fitness);
    println!(
        "  Fitness range: [{:.6}, {:.6}]",
        stats.min_fitness, stats.max_fitness
    );
    println!("  Distinct genotypes: {}", stats.distinct_genotypes);
    if let Some(((x, y), count)) = stats.dominant_genotype {
        println!("  Dominant genotype: ({}, {}) x{}", x, y, count);
    }
    println!();
}

fn print_example_config() {
    let config = RunConfig::default();
    match serde_json::to_string_pretty(&config) {
        Ok(json) => {
            println!("Example configuration (run.json):");
            println!("{}", json);
        }
        Err(e) => {
            eprintln!("Error serializing example config: {}", e);
            std::process::exit(1);
        }
    }
}
