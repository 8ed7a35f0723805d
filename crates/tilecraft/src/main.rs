use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use env_logger::{Builder, Env};
use tilecraft::GameConfig;
use tilecraft::headless::{AsciiRenderer, Scenario, run_scenario};
use tilecraft::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of ticks to simulate
    #[arg(long, default_value = "600")]
    ticks: u64,

    /// Input script: idle, explorer, patrol, builder
    #[arg(long, default_value = "explorer")]
    scenario: String,

    /// World seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Generation preset: default, flat, forest
    #[arg(long)]
    preset: Option<String>,

    /// RON file with a full generation config
    #[arg(long)]
    worldgen: Option<PathBuf>,

    /// Config file to read, without the .ron extension
    #[arg(long, default_value = tilecraft::config::DEFAULT_CONFIG_NAME)]
    config: PathBuf,

    /// Print a frame every N ticks (0 = only the final frame)
    #[arg(long)]
    frame_interval: Option<u64>,

    /// Print the resolved generation config as RON and exit
    #[arg(long)]
    dump_worldgen: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = GameConfig::load_from(&args.config)?;
    if let Some(seed) = args.seed {
        config.world.seed = seed;
    }
    if let Some(preset) = args.preset {
        config.world.preset = preset;
    }
    if let Some(path) = args.worldgen {
        config.world.worldgen_file = Some(path);
    }
    if let Some(interval) = args.frame_interval {
        config.debug.frame_interval = interval;
    }

    let default_filter = if config.debug.verbose_logging {
        "debug"
    } else {
        "info"
    };
    Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    if args.dump_worldgen {
        let worldgen = config.worldgen()?;
        println!("{}", worldgen.to_ron().context("Failed to serialize worldgen config")?);
        return Ok(());
    }

    let scenario: Scenario = args.scenario.parse()?;
    let controller_config = config.controller_config()?;
    let renderer = AsciiRenderer::for_view(controller_config.view_width, controller_config.view_height);
    let mut controller = WorldController::new(controller_config)?;

    log::info!(
        "Running scenario '{}' for {} ticks (chunk width {} tiles)",
        scenario.name(),
        args.ticks,
        CHUNK_SIZE
    );

    let summary = run_scenario(
        &mut controller,
        scenario,
        args.ticks,
        config.debug.frame_interval,
        |report| {
            println!("--- tick {} ---", report.tick);
            print!("{}", renderer.render(&report.frame));
        },
    );

    if let Some(frame) = &summary.final_frame {
        println!("--- final frame (tick {}) ---", summary.ticks);
        print!("{}", renderer.render(frame));
    }

    let grid_pos = TilePos::from_world(summary.final_position);
    println!(
        "Ticks: {}  Chunks generated: {}  Tiles generated: {}  Placed: {}  Removed: {}  Jumps: {}",
        summary.ticks,
        summary.chunks_generated,
        summary.tiles_generated,
        summary.blocks_placed,
        summary.blocks_removed,
        summary.jumps
    );
    println!(
        "Player at ({:.1}, {:.1}), tile ({}, {}); {} tiles in memory",
        summary.final_position.x,
        summary.final_position.y,
        grid_pos.x(),
        grid_pos.y(),
        controller.store().len()
    );

    Ok(())
}
