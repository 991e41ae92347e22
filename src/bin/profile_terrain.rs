//! Profiling tool to time each pipeline stage per archetype

use std::time::{Duration, Instant};

use terrain_forge::{
    archetypes::Archetype,
    coherent::CoherentNoise,
    heightmap, river, smoothing,
    params::GenerationParams,
    random::RandomSource,
};

fn main() {
    let size = 512;
    let seed = 1337u64;
    let params = GenerationParams::default().with_grid_size(size).with_seed(seed);
    let noise = CoherentNoise::new();

    println!("=== Performance Profiling ===");
    println!("Map size: {}x{} ({} cells)", size, size, size * size);
    println!("Smoothing: kernel {} x {} passes", params.smoothing_kernel_size, params.smoothing_iterations);
    println!();

    for &archetype in Archetype::all() {
        let mut rng = RandomSource::new(seed);
        let archetype_params = archetype.derive_params(&mut rng);

        let start = Instant::now();
        let mut heights = match heightmap::generate_heightmap(archetype, &archetype_params, size, &noise) {
            Ok(h) => h,
            Err(e) => {
                eprintln!("{}: {}", archetype, e);
                continue;
            }
        };
        let heightmap_time = start.elapsed();

        // Always carve here so every archetype reports a river timing
        let start = Instant::now();
        let path = river::generate_river(
            &mut heights,
            archetype.river_start(),
            archetype.river_end(),
            &params.river,
            params.height_scale,
            &noise,
            &mut rng,
        );
        let river_time = start.elapsed();
        let river_points = path.as_ref().map(|p| p.len()).unwrap_or(0);

        let start = Instant::now();
        let smoothed = smoothing::smooth(heights, params.smoothing_kernel_size, params.smoothing_iterations);
        let smooth_time = start.elapsed();

        let total = heightmap_time + river_time + smooth_time;
        println!("{}:", archetype);
        print_stage("Heightmap", heightmap_time, total);
        print_stage("River", river_time, total);
        print_stage("Smoothing", smooth_time, total);
        println!("  River points: {}", river_points);
        if let Ok(grid) = smoothed {
            let (min_h, max_h) = grid.min_max();
            println!("  Final range: {:.4} to {:.4}", min_h, max_h);
        }
        println!();
    }
}

fn print_stage(name: &str, time: Duration, total: Duration) {
    println!("  {:<10} {:>8.2}% ({:?})", name, 100.0 * time.as_secs_f64() / total.as_secs_f64().max(1e-12), time);
}
