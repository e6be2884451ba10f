//! # Pixelnav Command Line Demo
//!
//! Generates a seeded world, plans a path across it and picks a meeting point
//! for two agents.

use clap::Parser;
use log::{error, info, warn};
use pixelnav::{ColorMap, Coordinate, NavConfig, NavError, NavResult, ObstacleMap, Palette, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "dev-tools")]
use tracing::Level;

/// Width of the doorway cut into each interior wall of the demo world.
const DOOR_WIDTH: u32 = 24;

/// Command line arguments for the pixelnav demo.
#[derive(Parser, Debug)]
#[command(name = "pixelnav")]
#[command(about = "Clearance-aware path planning and rendezvous over bitmap worlds")]
#[command(version)]
struct Args {
    /// Random seed for doorway placement and rendezvous probes
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// World width in pixels
    #[arg(long, default_value_t = 200)]
    width: u32,

    /// World height in pixels
    #[arg(long, default_value_t = 150)]
    height: u32,

    /// Path start as x,y
    #[arg(long, value_parser = parse_point, default_value = "10,10")]
    start: Point,

    /// Path goal as x,y
    #[arg(long, value_parser = parse_point, default_value = "180,130")]
    goal: Point,

    /// First agent position as x,y
    #[arg(long, value_parser = parse_point, default_value = "20,75")]
    agent_a: Point,

    /// Second agent position as x,y
    #[arg(long, value_parser = parse_point, default_value = "180,75")]
    agent_b: Point,

    /// Override the planner's buffer radius
    #[arg(long)]
    planner_buffer: Option<u32>,

    /// Override the rendezvous buffer radius
    #[arg(long)]
    rendezvous_buffer: Option<u32>,

    /// Print the effective navigation configuration as JSON and exit
    #[arg(long)]
    config_json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn parse_point(value: &str) -> Result<Point, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{}'", value))?;
    let x = x.trim().parse::<f64>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<f64>().map_err(|e| e.to_string())?;
    Ok(Point::new(x, y))
}

fn main() {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    if let Err(err) = run(&args) {
        error!("{}", err);
        std::process::exit(1);
    }
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        let level = match log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::INFO,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .parse_filters(log_level)
            .format_target(false)
            .init();
    }
}

fn build_config(args: &Args) -> NavConfig {
    let mut config = NavConfig::new(args.seed);
    if let Some(buffer) = args.planner_buffer {
        config.planner.buffer_radius = buffer;
    }
    if let Some(buffer) = args.rendezvous_buffer {
        config.rendezvous.buffer_radius = buffer;
    }
    config
}

/// Builds the demo courtyard: a walled world split into three rooms by two
/// interior walls, each with one seeded doorway, and a pillar in the middle
/// of the centre room.
fn build_world(width: u32, height: u32, palette: &Palette, seed: u64) -> NavResult<ColorMap> {
    if width < 60 || height < 48 {
        return Err(NavError::InvalidInput(format!(
            "demo world must be at least 60x48, got {}x{}",
            width, height
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut world = ColorMap::filled(width, height, palette.clear)?;
    world.draw_rect_outline(Coordinate::new(0, 0), width, height, palette.obstacle);

    for wall_x in [width / 3, 2 * width / 3] {
        let door_top = rng.gen_range(8..=height - 8 - DOOR_WIDTH);
        world.fill_rect(Coordinate::new(wall_x as i32, 0), 1, door_top, palette.obstacle);
        let below = door_top + DOOR_WIDTH;
        world.fill_rect(
            Coordinate::new(wall_x as i32, below as i32),
            1,
            height - below,
            palette.obstacle,
        );
        info!("Wall at x={} has a doorway at y={}..{}", wall_x, door_top, below);
    }

    let pillar = Coordinate::new(width as i32 / 2 - 3, height as i32 / 2 - 3);
    world.fill_rect(pillar, 6, 6, palette.obstacle);

    Ok(world)
}

fn run(args: &Args) -> NavResult<()> {
    info!("Starting pixelnav v{}", pixelnav::VERSION);
    let config = build_config(args);

    if args.config_json {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    info!("Building {}x{} courtyard (seed {})", args.width, args.height, args.seed);
    let world = build_world(args.width, args.height, &config.palette, args.seed)?;
    let map = ObstacleMap::new(&world, config.palette);

    match config.planner().find_path(&map, args.start, args.goal) {
        Ok(path) => println!(
            "path: {} cells, cost {:.3}, {:?} -> {:?}",
            path.len(),
            path.cost(),
            path.start(),
            path.goal()
        ),
        Err(NavError::SearchExhausted { iterations, capped }) => {
            warn!("Search gave up after {} iterations", iterations);
            println!("path: none (iteration cap hit: {})", capped);
        }
        Err(err) => return Err(err),
    }

    let mut rng = config.create_rng();
    let meeting = config
        .rendezvous_solver()
        .find_meeting_point(&map, args.agent_a, args.agent_b, &mut rng);
    println!(
        "meeting point: {} via {:?}{}",
        meeting.coordinate,
        meeting.stage,
        if meeting.is_degraded() { " (degraded)" } else { "" }
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("3,4").unwrap(), Point::new(3.0, 4.0));
        assert_eq!(parse_point(" 1.5 , 2 ").unwrap(), Point::new(1.5, 2.0));
        assert!(parse_point("3").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn test_args_overrides() {
        let args = Args::parse_from([
            "pixelnav",
            "--seed",
            "9",
            "--planner-buffer",
            "3",
        ]);
        let config = build_config(&args);
        assert_eq!(config.seed, 9);
        assert_eq!(config.planner.buffer_radius, 3);
        assert_eq!(config.rendezvous.buffer_radius, 5);
    }

    #[test]
    fn test_default_demo_finds_a_path() {
        let args = Args::parse_from(["pixelnav"]);
        let config = build_config(&args);
        let world = build_world(args.width, args.height, &config.palette, args.seed).unwrap();
        let map = ObstacleMap::new(&world, config.palette);

        let path = config.planner().find_path(&map, args.start, args.goal).unwrap();
        assert!(path.is_contiguous());
        assert_eq!(path.goal(), Some(args.goal.to_coordinate()));

        let mut rng = config.create_rng();
        let meeting = config
            .rendezvous_solver()
            .find_meeting_point(&map, args.agent_a, args.agent_b, &mut rng);
        assert!(meeting.is_buffered());
    }

    #[test]
    fn test_every_doorway_is_passable() {
        let palette = Palette::default();
        let planner = NavConfig::default().planner();
        for seed in 0..8 {
            let world = build_world(200, 150, &palette, seed).unwrap();
            let map = ObstacleMap::new(&world, palette);
            assert!(planner.find_path(&map, (10, 10), (180, 130)).is_ok());
        }
    }

    #[test]
    fn test_tiny_demo_world_rejected() {
        let palette = Palette::default();
        assert!(matches!(
            build_world(40, 40, &palette, 1),
            Err(NavError::InvalidInput(_))
        ));
    }
}
