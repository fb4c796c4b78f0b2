//! Command-line pathfinding demo.
//!
//! Run: cargo run --bin navdemo [map.json | map.txt]
//!
//! A `.json` argument is read as a map snapshot, any other file as an ASCII
//! drawing (`#` blocked, `.` open). Without an argument a random map is
//! generated. A handful of queries are run between open cells and each
//! result is drawn over the map.

use jpsnav_core::{FPoint, Point};
use jpsnav_demos::{HEIGHT, WIDTH, draw_path, load_map, parse_map, random_map};
use jpsnav_paths::{NavMap, path_cost};

fn open_cells(map: &NavMap) -> Vec<Point> {
    map.range().iter().filter(|&p| map.walkable(p)).collect()
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut map = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)?;
            if path.ends_with(".json") {
                load_map(&text)?
            } else {
                parse_map(&text)?
            }
        }
        None => random_map(WIDTH, HEIGHT, 0.25, 42)?,
    };
    map.mark_connected();
    println!("{}x{} map, components:", map.width(), map.height());
    println!("{}\n", map.dump_connected());

    let open = open_cells(&map);
    if open.len() < 2 {
        println!("not enough open cells");
        return Ok(());
    }
    let pairs = [
        (open[0], open[open.len() - 1]),
        (open[open.len() / 3], open[2 * open.len() / 3]),
        (open[open.len() / 2], open[1]),
    ];

    for (start, end) in pairs {
        println!("{start} -> {end}");
        match map.find_path_by_grid(start, end)? {
            Some(path) => {
                println!("  {} waypoints, cost {}", path.len(), path_cost(&path));
                let raw = map.find_path_by_grid_raw(start, end)?.unwrap_or_default();
                println!("  raw cost {}", path_cost(&raw));
                println!("{}", draw_path(&map, &raw));
            }
            None => println!("  unreachable"),
        }

        let (fs, fe) = (FPoint::from(start), FPoint::new(end.x as f32 + 0.25, end.y as f32 + 0.75));
        if let Some(points) = map.find_path(fs, fe)? {
            let steps: Vec<String> = points.iter().map(|p| p.to_string()).collect();
            println!("  continuous: {}", steps.join(" "));
        }
        println!();
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
