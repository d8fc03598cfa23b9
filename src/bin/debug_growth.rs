//! Debug tool for eyeballing growth statistics across many seeds
//! Prints one row per seed for each city size plus a summary line

use city_generator::city::{generate_city, CitySize};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const SEEDS: u64 = 32;

fn main() {
    println!("Generating growth statistics for {} seeds...", SEEDS);

    for size in [CitySize::Small, CitySize::Large] {
        let cells = (size.side() * size.side()) as f64;
        let mut total_houses = 0u64;
        let mut total_roads = 0usize;
        let mut rehubbed = 0;

        println!();
        println!("{} city ({}x{})", size, size.side(), size.side());
        println!("{:>6} {:>8} {:>8} {:>8} {:>9} {:>5}", "seed", "houses", "roads", "cover%", "attempts", "hubs");

        for seed in 0..SEEDS {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let report = match generate_city(size, &mut rng) {
                Ok((_, report)) => report,
                Err(e) => {
                    println!("{:>6} {}", seed, e);
                    continue;
                }
            };

            let coverage = 100.0 * (report.road_count as f64 + report.house_count as f64) / cells;
            println!(
                "{:>6} {:>8} {:>8} {:>8.1} {:>9} {:>5}",
                seed,
                report.house_count,
                report.road_count,
                coverage,
                report.highway_attempts,
                report.hub_placements
            );

            total_houses += report.house_count as u64;
            total_roads += report.road_count;
            if report.hub_placements > 1 {
                rehubbed += 1;
            }
        }

        println!(
            "mean: {:.1} houses, {:.1} roads; {} seeds needed a second hub",
            total_houses as f64 / SEEDS as f64,
            total_roads as f64 / SEEDS as f64,
            rehubbed
        );
    }
}
