use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use csand::{InputEvent, SandConfig, Scene, Session, TextRenderer};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (RON); defaults to ./csand.ron when present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<u16>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Starting layout: empty, sand-drop, hourglass, bonfire, oil-spill
    #[arg(long, default_value = "sand-drop")]
    scene: Scene,

    /// Number of frames to run
    #[arg(long, default_value = "100")]
    frames: u64,

    /// Key presses replayed one per frame (digits select, space pauses, = faster, - slower, . steps)
    #[arg(long, default_value = "")]
    keys: String,

    /// Hold the paint cursor at X,Y on every frame
    #[arg(long, value_parser = parse_cursor)]
    paint: Option<(u16, u16)>,

    /// Print the world every N frames (0 prints only the last frame)
    #[arg(long, default_value = "0")]
    print_every: u64,

    /// List available scenes
    #[arg(long)]
    list_scenes: bool,

    /// List materials after config overrides
    #[arg(long)]
    list_materials: bool,

    /// Print the effective configuration as RON and exit
    #[arg(long)]
    dump_config: bool,
}

fn parse_cursor(value: &str) -> Result<(u16, u16), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", value))?;
    let x = x.trim().parse().map_err(|e| format!("bad x '{}': {}", x, e))?;
    let y = y.trim().parse().map_err(|e| format!("bad y '{}': {}", y, e))?;
    Ok((x, y))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    // Handle --list-scenes flag
    if args.list_scenes {
        for scene in Scene::ALL {
            println!("{:<10} {}", scene.name(), scene.description());
        }
        return Ok(());
    }

    let mut config = SandConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    // Command-line flags win over every config layer
    if let Some(width) = args.width {
        config.grid.width = width;
    }
    if let Some(height) = args.height {
        config.grid.height = height;
    }
    if let Some(seed) = args.seed {
        config.sim.seed = seed;
    }

    if args.dump_config {
        println!("{}", config.to_ron()?);
        return Ok(());
    }

    if args.list_materials {
        let registry = config.build_registry()?;
        for (id, properties) in registry.iter() {
            println!(
                "{:>3} {:<12} {:?} density={} decay={} ignition={}",
                id.0,
                properties.name,
                properties.kind,
                properties.density,
                properties.decay_probability,
                properties.ignition_probability
            );
        }
        return Ok(());
    }

    let mut session = Session::new(&config)?;
    args.scene.build(session.grid_mut());
    log::info!("Starting csand with scene {}", args.scene);

    let events = InputEvent::parse_script(&args.keys);
    let renderer = TextRenderer::new(session.registry());

    for frame in 0..args.frames {
        if let Some(&event) = events.get(frame as usize) {
            session.handle_input(event);
        }
        session.frame(args.paint);

        if args.print_every > 0 && (frame + 1) % args.print_every == 0 {
            println!("frame {} (tick {})", frame + 1, session.ticks());
            print!("{}", renderer.render(session.grid()));
        }
    }

    if args.print_every == 0 {
        print!("{}", renderer.render(session.grid()));
    }

    let stats = session.stats();
    log::info!(
        "Ran {} ticks: {} swaps, {} decays, {} ignitions, {} paints",
        session.ticks(),
        stats.swaps,
        stats.decays,
        stats.ignitions,
        stats.paints
    );

    Ok(())
}
