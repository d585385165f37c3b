use std::fs;

use clap::Parser;

use island_generator::ascii;
use island_generator::config::IslandConfig;
use island_generator::export;
use island_generator::island;
use island_generator::placement::PlacementConfig;
use island_generator::proximity::ProximityConfig;

#[derive(Parser, Debug)]
#[command(name = "island_generator")]
#[command(about = "Generate procedural island terrain with resource placements")]
struct Args {
    /// Random seed (uses a random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Grid cells per axis
    #[arg(short, long)]
    resolution: Option<usize>,

    /// World-space side length of the island square
    #[arg(long)]
    island_size: Option<f32>,

    /// Load full generation config from a JSON file (CLI flags override it)
    #[arg(short, long)]
    config: Option<String>,

    /// Print an ASCII height map to the terminal
    #[arg(long)]
    ascii: bool,

    /// Print an ASCII land/valid-point map to the terminal
    #[arg(long)]
    ascii_land: bool,

    /// Export the heightfield to a PNG
    #[arg(long)]
    export_heightmap: Option<String>,

    /// Export the land mask to a PNG
    #[arg(long)]
    export_mask: Option<String>,

    /// Export terrain with placement markers to a PNG
    #[arg(long)]
    export_placements: Option<String>,

    /// Number of resource archetypes in the catalog
    #[arg(long, default_value = "3")]
    resource_archetypes: usize,

    /// Secondary entities placed around each resource
    #[arg(long, default_value = "1")]
    secondaries_per_resource: usize,

    /// Skip the placement passes entirely
    #[arg(long)]
    no_placement: bool,
}

fn main() {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match load_config(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => IslandConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    } else if args.config.is_none() {
        config.seed = rand::random();
    }
    if let Some(resolution) = args.resolution {
        config.resolution = resolution;
    }
    if let Some(island_size) = args.island_size {
        config.island_size = island_size;
    }

    println!("Generating island (seed {})...", config.seed);
    let data = island::generate_island(&config);

    println!("Clusters: {}", data.clusters.len());
    println!(
        "Land: {:.1}% of {} vertices, max height {:.2}",
        data.land_fraction() * 100.0,
        data.heights.width * data.heights.height,
        data.max_height()
    );
    println!("Valid interior points: {}", data.valid_points.len());
    println!(
        "Dense mesh: {} vertices, {} triangles",
        data.mesh.vertices.len(),
        data.mesh.triangle_count()
    );
    println!(
        "Land mesh: {} vertices, {} triangles",
        data.land_mesh.vertices.len(),
        data.land_mesh.triangle_count()
    );

    let mut batches = Vec::new();
    if !args.no_placement {
        println!("Placing resources...");
        let placement_config = PlacementConfig {
            archetype_count: args.resource_archetypes,
            ..Default::default()
        };
        let resources = island::place_resources(&data, &placement_config, 1);
        println!("  Placed {} resources", resources.instances.len());

        let proximity_config = ProximityConfig {
            count_per_anchor: args.secondaries_per_resource,
            ..Default::default()
        };
        let secondaries = island::place_secondaries(&data, &resources, &proximity_config, 1);
        println!("  Placed {} secondaries", secondaries.instances.len());

        batches.push(resources);
        batches.push(secondaries);
    }

    if args.ascii {
        println!("\n{}", ascii::render_height_map(&data.heights));
    }
    if args.ascii_land {
        println!(
            "\n{}",
            ascii::render_land_map(&data.land_mask, &data.valid_points, &config)
        );
    }

    if let Some(path) = &args.export_heightmap {
        match export::export_heightmap(&data.heights, path) {
            Ok(()) => println!("Heightmap exported to {}", path),
            Err(e) => eprintln!("Heightmap export failed: {}", e),
        }
    }
    if let Some(path) = &args.export_mask {
        match export::export_land_mask(&data.land_mask, path) {
            Ok(()) => println!("Land mask exported to {}", path),
            Err(e) => eprintln!("Land mask export failed: {}", e),
        }
    }
    if let Some(path) = &args.export_placements {
        let refs: Vec<&_> = batches.iter().collect();
        match export::export_placements(&data.heights, &refs, &config, path) {
            Ok(()) => println!("Placements exported to {}", path),
            Err(e) => eprintln!("Placement export failed: {}", e),
        }
    }
}

fn load_config(path: &str) -> Result<IslandConfig, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
