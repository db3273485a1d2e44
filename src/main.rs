use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use shadowbox::{Config, PipelineOptions, generate, load_grid};

/// Mesh a voxel grid into a printable binary STL.
#[derive(Parser, Debug)]
#[command(name = "shadowbox")]
#[command(about = "Mesh a voxel grid into a printable binary STL", long_about = None)]
#[command(version)]
struct Cli {
    /// Text grid: `sx sy sz` header then rows of hex nibbles
    #[arg(value_name = "GRID")]
    grid: PathBuf,

    /// Where to write the STL
    #[arg(short, long, value_name = "OUT.stl")]
    output: PathBuf,

    /// TOML settings file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Grid units per voxel edge
    #[arg(long)]
    resolution: Option<u32>,

    /// Wall inset in grid units
    #[arg(long)]
    wall_thickness: Option<u32>,

    /// Millimetres per grid unit
    #[arg(long, value_name = "MM")]
    scale: Option<f64>,

    /// Keep disconnected debris
    #[arg(long)]
    no_trim: bool,

    /// Extract z-slices in parallel
    #[arg(long)]
    parallel: bool,
}

impl Cli {
    /// File settings with command-line flags layered on top.
    fn options(&self, cfg: &Config) -> PipelineOptions {
        let mut opts = cfg.pipeline_options();
        if let Some(r) = self.resolution {
            opts.params.resolution = r;
        }
        if let Some(w) = self.wall_thickness {
            opts.params.wall_thickness = w;
        }
        if let Some(s) = self.scale {
            opts.scale = s;
        }
        if self.no_trim {
            opts.trim_floating = false;
        }
        opts.parallel = self.parallel;
        opts
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let cfg = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let opts = cli.options(&cfg);
    log::debug!("options: {:?}", opts);

    let grid = load_grid(&cli.grid)?;
    let out = generate(grid, &opts)?;
    std::fs::write(&cli.output, &out.stl)
        .map_err(|e| format!("failed to write {}: {}", cli.output.display(), e))?;
    log::info!(
        "wrote {} triangle(s) to {}",
        out.triangles,
        cli.output.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
