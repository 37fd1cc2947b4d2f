use clap::{Parser, Subcommand};
use log::info;
use robot_arena::config;
use robot_arena::generate::{GeneratorConfig, generate_scene};
use robot_arena::logging;
use robot_arena::scene;
use robot_arena::{Arena, Simulation};
use std::path::PathBuf;

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Debug filter to specify log topics (e.g., "arena,robot")
    /// Available topics: arena, robot, collision, scene
    #[arg(long, global = true)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate a scene file (or the demo room) without a window.
    Run {
        /// Scene file to load; the demo room when omitted.
        scene: Option<PathBuf>,

        /// Number of 10 ms ticks to simulate.
        #[arg(long, default_value_t = 1000)]
        ticks: u64,

        /// Save the final state to this scene file.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Start paused; no ticks are run.
        #[arg(long)]
        paused: bool,
    },
    /// Write a random scene.
    Generate {
        #[arg(long, default_value_t = 5)]
        obstacles: usize,

        #[arg(long, default_value_t = 3)]
        robots: usize,

        /// Seed for a reproducible scene.
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, default_value_t = config::DEFAULT_ROOM_WIDTH)]
        width: f64,

        #[arg(long, default_value_t = config::DEFAULT_ROOM_HEIGHT)]
        height: f64,

        /// Output file; printed to stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Parse a scene file and report what it contains.
    Check { scene: PathBuf },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Err(e) = logging::init_logger(logging::parse_level(&args.log_level), args.debug_filter.clone()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
    if let Some(filter) = &args.debug_filter {
        for topic in filter.split(',').map(str::trim) {
            if !topic.is_empty() && !logging::TOPICS.contains(&topic) {
                log::warn!("Unknown debug topic '{}'", topic);
            }
        }
    }

    match args.command {
        Command::Run {
            scene: scene_path,
            ticks,
            output,
            paused,
        } => {
            let mut arena = match scene_path {
                Some(path) => {
                    let mut arena = Arena::default();
                    scene::load_file(&path)?.apply(&mut arena);
                    arena
                }
                None => {
                    info!("No scene given, using the demo room");
                    Arena::demo()
                }
            };
            arena.set_running(!paused);

            let mut simulation = Simulation::new(arena);
            let ran = simulation.run_for(ticks);
            let arena = simulation.into_arena();

            println!("After {} ticks:", ran);
            for robot in arena.robots() {
                println!("  {}", robot);
            }
            if let Some(path) = output {
                scene::save_file(&path, &arena)?;
            }
        }
        Command::Generate {
            obstacles,
            robots,
            seed,
            width,
            height,
            output,
        } => {
            let scene = generate_scene(&GeneratorConfig {
                width,
                height,
                obstacles,
                robots,
                seed,
            });
            match output {
                Some(path) => {
                    std::fs::write(&path, scene.to_string())?;
                    info!("Wrote generated scene to {}", path.display());
                }
                None => print!("{}", scene),
            }
        }
        Command::Check { scene: path } => {
            let scene = scene::load_file(&path)?;
            match scene.size {
                Some(size) => println!("room: {}x{}", size.x, size.y),
                None => println!("room: not given"),
            }
            println!("{} obstacles, {} robots", scene.obstacles.len(), scene.robots.len());
        }
    }
    Ok(())
}
