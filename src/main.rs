use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use terrain_forge::{
    archetypes, config, preview, Archetype, CarveMode, GenerationParams, SeedMode, TerrainGenerator,
};

#[derive(Parser, Debug)]
#[command(name = "terrain_forge")]
#[command(about = "Generate archetype-based terrain heightmaps with carved rivers")]
struct Args {
    /// Terrain archetype by name or catalog index (Plains, Seaside, SeasideCliff, Cauldron, Valley)
    #[arg(short, long, default_value = "Plains")]
    archetype: String,

    /// Load generation parameters from a JSON file (flags below override it)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Cells per side of the heightmap
    #[arg(short = 'S', long)]
    size: Option<usize>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// World units per normalized height unit
    #[arg(long)]
    height_scale: Option<f32>,

    /// Box-blur kernel side
    #[arg(long)]
    kernel: Option<usize>,

    /// Number of box-blur passes
    #[arg(long)]
    iterations: Option<usize>,

    /// River width in cells
    #[arg(long)]
    river_width: Option<f32>,

    /// River depth in world units
    #[arg(long)]
    river_depth: Option<f32>,

    /// Half sine periods of river meander over its length
    #[arg(long)]
    curve_frequency: Option<f32>,

    /// How overlapping river cuts combine (cumulative, max-depth)
    #[arg(long)]
    carve_mode: Option<CarveMode>,

    /// Save a colour PNG preview (e.g., "terrain.png")
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Write the river path as JSON
    #[arg(long)]
    river_json: Option<PathBuf>,

    /// Write the effective parameters as JSON
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Print an ASCII map this many columns wide
    #[arg(long)]
    ascii: Option<usize>,

    /// List the archetype catalog and exit
    #[arg(long)]
    list: bool,
}

fn resolve_archetype(arg: &str) -> Option<Archetype> {
    match arg.parse::<i64>() {
        Ok(index) => Some(Archetype::all()[archetypes::clamp_index(index)]),
        Err(_) => archetypes::find_by_name(arg),
    }
}

fn build_params(args: &Args) -> Result<GenerationParams, terrain_forge::TerrainError> {
    let mut params = match &args.config {
        Some(path) => config::load_params(path)?,
        None => GenerationParams::default(),
    };

    if let Some(size) = args.size { params.grid_size = size; }
    if let Some(seed) = args.seed { params.seed = SeedMode::Fixed(seed); }
    if let Some(scale) = args.height_scale { params.height_scale = scale; }
    if let Some(kernel) = args.kernel { params.smoothing_kernel_size = kernel; }
    if let Some(iterations) = args.iterations { params.smoothing_iterations = iterations; }
    if let Some(width) = args.river_width { params.river.width = width; }
    if let Some(depth) = args.river_depth { params.river.depth = depth; }
    if let Some(freq) = args.curve_frequency { params.river.curve_frequency = freq; }
    if let Some(mode) = args.carve_mode { params.river.carve_mode = mode; }

    Ok(params)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();

    if args.list {
        for a in Archetype::all() {
            println!("{:>2}  {:<13} river {:>3.0}%  {}",
                a.index(), a.name(), a.river_chance() * 100.0, a.description());
        }
        println!();
        println!("Carve modes (--carve-mode):");
        for mode in CarveMode::all() {
            println!("    {:<11} {}", mode.to_string(), mode.description());
        }
        return;
    }

    let Some(archetype) = resolve_archetype(&args.archetype) else {
        eprintln!("Unknown archetype '{}' (try --list)", args.archetype);
        std::process::exit(2);
    };

    let params = match build_params(&args) {
        Ok(params) => params,
        Err(e) => {
            eprintln!("Failed to load parameters: {}", e);
            std::process::exit(2);
        }
    };

    if let Some(path) = &args.save_config {
        if let Err(e) = config::save_params(&params, path) {
            eprintln!("Failed to save config: {}", e);
        }
    }

    println!("Generating {} terrain", archetype);
    println!("Map size: {}x{}", params.grid_size, params.grid_size);

    let mut generator = TerrainGenerator::new(params);
    if let Err(e) = generator.select_archetype_and_generate(archetype.index() as i64) {
        eprintln!("Generation failed: {}", e);
        std::process::exit(1);
    }
    let Some(result) = generator.last_result() else {
        return;
    };

    println!("Seed: {}", result.seed);
    println!("Noise scale: {} (slope {})",
        result.archetype_params.noise_scale, result.archetype_params.slope_noise_scale);

    let (min_h, max_h) = result.heights.min_max();
    println!("Height range: {:.2} to {:.2} world units",
        min_h * result.height_scale, max_h * result.height_scale);

    let river = generator.current_river_path();
    if river.is_empty() {
        println!("No river");
    } else {
        println!("River: {} points, {:.1} cells long", river.len(), river.length());
    }

    if let Some(cols) = args.ascii {
        print!("{}", preview::render_ascii(&result.heights, result.river.as_ref(), cols));
        println!("{}", preview::height_legend());
    }

    if let Some(path) = &args.preview {
        match preview::save_png(&result.heights, result.river.as_ref(), path) {
            Ok(()) => println!("Saved preview: {}", path.display()),
            Err(e) => eprintln!("Failed to save preview: {}", e),
        }
    }

    if let Some(path) = &args.river_json {
        let written = serde_json::to_string_pretty(river)
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(path, json).map_err(|e| e.to_string()));
        match written {
            Ok(()) => println!("Saved river path: {}", path.display()),
            Err(e) => eprintln!("Failed to save river path: {}", e),
        }
    }
}
