use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::error;
use project::{Coordinate, Size, DEFAULT_CANVAS_SIZE};

mod commands;
mod errors;

use crate::errors::CliError;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create a project with a single empty layer
    New {
        out_file: PathBuf,
        #[clap(short, long, default_value = "Untitled")]
        name: String,
        #[clap(long, default_value_t = DEFAULT_CANVAS_SIZE.width)]
        width: u16,
        #[clap(long, default_value_t = DEFAULT_CANVAS_SIZE.height)]
        height: u16,
    },
    /// Print the project's name, size and layer stack
    Info { project_path: PathBuf },
    /// Add a layer on top of the stack
    AddLayer { project_path: PathBuf, name: String },
    /// Set a single pixel
    Paint {
        project_path: PathBuf,
        x: u16,
        y: u16,
        /// hex color, e.g. #8000aa
        color: String,
        #[clap(short, long)]
        /// index from the bottom of the stack, defaults to the top layer
        layer: Option<usize>,
        #[clap(short, long, default_value = "1.0")]
        alpha: f64,
    },
    /// Change the canvas size, dropping pixels that no longer fit
    Resize {
        project_path: PathBuf,
        width: u16,
        height: u16,
    },
    /// Render the project to an image; the type follows the file extension
    Render {
        project_path: PathBuf,
        out_file: PathBuf,
        #[clap(short, long)]
        /// hex color painted under the bottom layer
        background: Option<String>,
        #[clap(long, default_value = render::SRGB_COLOR_SPACE)]
        color_space: String,
    },
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::New {
            out_file,
            name,
            width,
            height,
        } => commands::new_project(&out_file, &name, Size::new(width, height)),
        Commands::Info { project_path } => {
            let project = commands::load(&project_path)?;
            print!("{}", commands::describe(&project));
            Ok(())
        }
        Commands::AddLayer { project_path, name } => commands::add_layer(&project_path, &name),
        Commands::Paint {
            project_path,
            x,
            y,
            color,
            layer,
            alpha,
        } => {
            let color = commands::parse_color(&color, alpha)?;
            commands::paint(&project_path, layer, Coordinate::new(x, y), color)
        }
        Commands::Resize {
            project_path,
            width,
            height,
        } => commands::resize(&project_path, Size::new(width, height)),
        Commands::Render {
            project_path,
            out_file,
            background,
            color_space,
        } => {
            let background = background
                .map(|hex| commands::parse_color(&hex, 1.0))
                .transpose()?;
            commands::render_file(&project_path, &out_file, background, &color_space)
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
