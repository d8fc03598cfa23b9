use std::path::PathBuf;
use std::process;

use clap::Parser;

use city_generator::city::generate_city;
use city_generator::config::CityConfig;
use city_generator::delivery::{generate_orders, plan_route, save_route};
use city_generator::map_export::{load_map, save_map};
use city_generator::seeds::CitySeeds;
use city_generator::{logging, Result};

#[derive(Parser, Debug)]
#[command(name = "city_generator")]
#[command(about = "Generate procedural city road maps and plan deliveries over them")]
struct Args {
    /// City size: 1 or less for 64x64, 2 or more for 256x256
    #[arg(short = 'S', long)]
    size: Option<i64>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where to write the map dump
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Where to write the delivery route
    #[arg(short, long)]
    route: Option<PathBuf>,

    /// JSON config file; flags given on the command line take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only generate the map, skip the delivery pass
    #[arg(long)]
    no_deliveries: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn resolve_config(&self) -> Result<CityConfig> {
        let mut config = match &self.config {
            Some(path) => CityConfig::load(path)?,
            None => CityConfig::default(),
        };
        if let Some(size) = self.size {
            config.size = size;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(output) = &self.output {
            config.map_output = output.clone();
        }
        if let Some(route) = &self.route {
            config.route_output = route.clone();
        }
        if self.no_deliveries {
            config.deliveries = false;
        }
        Ok(config)
    }
}

fn main() {
    let args = Args::parse();
    logging::init(logging::level_for_verbosity(args.verbose));

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.resolve_config()?;

    // Initialize RNG
    let seed = config.seed.unwrap_or_else(rand::random);
    let seeds = CitySeeds::from_master(seed);
    let mut layout_rng = seeds.layout_rng();

    let size = config.city_size();
    println!("Generating {} city with seed: {}", size, seed);
    println!("Map size: {}x{}", size.side(), size.side());

    let (map, report) = generate_city(size, &mut layout_rng)?;
    println!("Hub at {}, highway heading {} from {}", report.hub, report.highway_heading, report.highway_start);
    println!(
        "Placed {} houses and {} road cells ({} highway attempts, {} hub placements)",
        report.house_count, report.road_count, report.highway_attempts, report.hub_placements
    );

    save_map(&map, &config.map_output)?;
    println!("Map written to {}", config.map_output.display());

    if !config.deliveries {
        return Ok(());
    }

    // The delivery pass reads the map back from disk like any other consumer.
    let city = load_map(&config.map_output)?;
    let mut delivery_rng = seeds.deliveries_rng();
    let orders = generate_orders(&mut delivery_rng, city.house_count(), config.min_orders, config.max_orders);
    println!("Delivering {} orders: {:?}", orders.len(), orders);

    let plan = plan_route(&city, &orders, config.sort_buckets)?;
    for leg in &plan.legs {
        let stop = leg.to().unwrap_or_default();
        println!("  house {:>4} at {}: {} cells", leg.house, stop, leg.path.len());
    }
    if !plan.unreachable.is_empty() {
        println!("Unreachable orders: {:?}", plan.unreachable);
    }

    save_route(&plan, &config.route_output)?;
    println!("Route ({} cells) written to {}", plan.total_cells(), config.route_output.display());

    Ok(())
}
