//! CLI driver (spec §6): reads `./input.ppm`, runs the color and
//! gradient preprocessing paths, builds the composite-weight grid
//! graph, then writes one segmentation per engine.
//!
//! Grounded in `original_source/Trabalho_2/src/main.cc`'s `main`:
//! same stage order and parameter defaults, `clock()`/`printf` timing
//! replaced with `log::info!` + `std::time::Instant`.

use std::process::ExitCode;
use std::time::Instant;

use log::{error, info};

use pixelgraph::color::Rgb;
use pixelgraph::filters::{blur, grayscale, sobel};
use pixelgraph::graph::directed::DirectedGraph;
use pixelgraph::graph::grid::{build_grid_graph, GridBuilderConfig};
use pixelgraph::graph::render::{paint_by_component, to_pixel_matrix};
use pixelgraph::graph::{arborescence, felzenszwalb};
use pixelgraph::io::ppm::{read_ppm, write_ppm};

const FH_K: f64 = 1550.0;
const FH_MIN_SIZE: usize = 0;
const EDMONDS_K: f64 = 300.0;
const EDMONDS_MIN_SIZE: usize = 20;
const GRADIENT_BLUR_PASSES: u32 = 5;
const COLOR_BLUR_PASSES: u32 = 3;

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();

    if !std::path::Path::new("input.ppm").exists() {
        error!("no input.ppm found in the current directory");
        return Err("missing input.ppm".into());
    }

    let (original, width, height) = read_ppm("input.ppm")?;
    let after_load = Instant::now();
    info!("loaded {width}x{height} image in {:?}", after_load - start);

    let gray_rgb: Vec<Vec<Rgb>> = grayscale::to_grayscale(&original)
        .iter()
        .map(|row| {
            row.iter()
                .map(|&v| {
                    let channel = v.round().clamp(0.0, 255.0) as u8;
                    Rgb::new(channel, channel, channel)
                })
                .collect()
        })
        .collect();
    let blurred_gray = blur::gaussian_blur(&gray_rgb, GRADIENT_BLUR_PASSES);
    let color_path = blur::gaussian_blur(&original, COLOR_BLUR_PASSES);
    let gradient = sobel::sobel_magnitude(&grayscale::to_grayscale(&blurred_gray));
    let after_preprocess = Instant::now();
    info!("preprocessed color and gradient paths in {:?}", after_preprocess - after_load);

    let config = GridBuilderConfig {
        alpha: 1.1,
        beta: 0.45,
        floor: 0.0,
    };
    let graph = build_grid_graph(&original, &color_path, &gradient, config);
    let after_graph = Instant::now();
    info!("built pixel graph ({} vertices) in {:?}", graph.len(), after_graph - after_preprocess);

    let fh_partition = felzenszwalb::segment(&graph, FH_K, FH_MIN_SIZE);
    let after_fh = Instant::now();
    info!(
        "felzenszwalb segmentation into {} components in {:?}",
        fh_partition.num_components(),
        after_fh - after_graph
    );

    let fh_painted = paint_by_component(&graph, &fh_partition);
    let fh_matrix = to_pixel_matrix(&fh_painted, width, height);
    write_ppm("Felzenszwalb.ppm", &fh_matrix)?;
    let after_fh_write = Instant::now();
    info!("wrote Felzenszwalb.ppm in {:?}", after_fh_write - after_fh);

    let directed = DirectedGraph::from_weighted_graph(&graph);
    let after_directed = Instant::now();
    info!("built directed view in {:?}", after_directed - after_fh_write);

    let edmonds_partition = arborescence::segment(&directed, EDMONDS_K, EDMONDS_MIN_SIZE);
    let after_edmonds = Instant::now();
    info!(
        "edmonds-mode segmentation into {} components in {:?}",
        edmonds_partition.num_components(),
        after_edmonds - after_directed
    );

    let edmonds_painted = paint_by_component(&graph, &edmonds_partition);
    let edmonds_matrix = to_pixel_matrix(&edmonds_painted, width, height);
    write_ppm("Edmonds.ppm", &edmonds_matrix)?;
    let after_edmonds_write = Instant::now();
    info!("wrote Edmonds.ppm in {:?}", after_edmonds_write - after_edmonds);

    info!("total runtime {:?}", after_edmonds_write - start);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("segment failed: {err}");
            ExitCode::FAILURE
        }
    }
}
