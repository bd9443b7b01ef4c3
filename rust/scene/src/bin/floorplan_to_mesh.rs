// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: Build wall and floor meshes from a LabelMe floor plan annotation
//!
//! Prints a summary of the generated scene; no mesh files are written.
//!
//! Usage:
//!   floorplan-to-mesh [options] <annotation.json> [options]

use floorplan_lite_scene::{build_scene, load_labelme, MaterialRef, SceneConfig, SceneSummary};
use std::env;
use std::process;

struct Options {
    input: String,
    config: SceneConfig,
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1..].iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    let options = match parse_args(&args[1..], SceneConfig::from_env()) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            print_usage();
            process::exit(1);
        }
    };

    let scene = load_labelme(&options.input)
        .and_then(|data| build_scene(&data, &options.config))
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        });

    let summary = scene.summary();
    if options.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: Cannot serialize summary: {}", e);
                process::exit(1);
            }
        }
    } else {
        print_summary(&options.input, &summary);
    }
}

/// Options may come before or after the input path
fn parse_args(args: &[String], mut config: SceneConfig) -> Result<Options, String> {
    let mut input: Option<String> = None;
    let mut json = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--height" => {
                let value = option_value(args, &mut i, "--height")?;
                config.wall_height = value
                    .parse()
                    .map_err(|_| format!("Invalid height value: {}", value))?;
            }
            "--wall-material" => {
                let value = option_value(args, &mut i, "--wall-material")?;
                config.wall_material = Some(MaterialRef::new(value));
            }
            "--floor-material" => {
                let value = option_value(args, &mut i, "--floor-material")?;
                config.floor_material = Some(MaterialRef::new(value));
            }
            "--no-merge" => {
                config.merge_overlaps = false;
            }
            "--sequential" => {
                config.parallel = false;
            }
            "--json" => {
                json = true;
            }
            flag if flag.starts_with('-') => {
                return Err(format!("Unknown option: {}", flag));
            }
            path => {
                if let Some(first) = &input {
                    return Err(format!(
                        "Unexpected argument: {} (input already given as {})",
                        path, first
                    ));
                }
                input = Some(path.to_string());
            }
        }
        i += 1;
    }

    let input = input.ok_or_else(|| "Missing input annotation file".to_string())?;
    Ok(Options {
        input,
        config,
        json,
    })
}

fn option_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("Missing value for {}", flag))
}

fn print_summary(input: &str, summary: &SceneSummary) {
    println!("=== Floor Plan to Mesh ===");
    println!("Input: {}", input);
    println!();

    println!("{} ({} objects)", summary.walls.name, summary.walls.objects.len());
    for (i, object) in summary.walls.objects.iter().enumerate() {
        println!(
            "  [{}] {}: {} vertices, {} triangles, material {}",
            i, object.name, object.vertices, object.triangles, object.material
        );
    }

    match &summary.floor {
        Some(floor) => println!(
            "{}: {} vertices, {} triangles, material {}",
            floor.name, floor.vertices, floor.triangles, floor.material
        ),
        None => println!("Floor: none"),
    }

    if let Some(bounds) = &summary.bounds {
        println!(
            "Bounds: ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2})",
            bounds.min[0], bounds.min[1], bounds.min[2], bounds.max[0], bounds.max[1], bounds.max[2]
        );
    }

    let d = &summary.diagnostics;
    println!();
    println!("Diagnostics:");
    println!(
        "  Rectangles:        {} ({} coordinates welded)",
        d.rectangles, d.welded_coordinates
    );
    println!(
        "  Edges:             {} input, {} split, {} outline",
        d.input_edges, d.split_edges, d.outline_edges
    );
    println!(
        "  Merged away:       {} duplicate, {} back-to-back, {} interior",
        d.duplicate_edges, d.back_to_back_edges, d.interior_edges
    );
    println!(
        "  Loops:             {} extracted, {} holes, {} non-convex, {} rejected",
        d.extracted_loops, d.hole_loops, d.non_convex_loops, d.rejected_loops
    );
    println!(
        "  Walk:              {} open chains, {} short loops, {} ambiguous junctions",
        d.open_chains, d.short_loops, d.ambiguous_junctions
    );
}

fn print_usage() {
    println!(
        r#"Floor Plan to Mesh
==================

Builds extruded wall meshes and a floor quad from a LabelMe floor plan
annotation and prints a summary of the result.

USAGE:
  floorplan-to-mesh [OPTIONS] <annotation.json>

ARGUMENTS:
  <annotation.json>         LabelMe JSON with "wall" rectangles and an "area" shape

OPTIONS:
  --height <units>          Wall height (default: 2.5)
  --wall-material <name>    Material for wall objects (default: Standard)
  --floor-material <name>   Material for the floor object (default: Standard)
  --no-merge                Walk loops over all split edges without merging overlaps
  --sequential              Extrude wall loops on the current thread
  --json                    Print the summary as JSON
  -h, --help                Show this help message

ENVIRONMENT:
  FLOORPLAN_WALL_HEIGHT, FLOORPLAN_WALL_MATERIAL, FLOORPLAN_FLOOR_MATERIAL,
  FLOORPLAN_MERGE_OVERLAPS, FLOORPLAN_PARALLEL set defaults for the options.
  RUST_LOG controls log output on stderr (default: info)."#
    );
}
