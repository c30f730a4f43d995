use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use colors_transform::Color as _;
use log::info;
use project::{document, Color, Coordinate, Project, Size};
use render::{encode_image, render_into, ColorSpace, PixelSurface, RenderImageType};

use crate::errors::CliError;

pub fn parse_color(hex: &str, alpha: f64) -> Result<Color, CliError> {
    let parsed = colors_transform::Rgb::from_hex_str(hex)
        .map_err(|_| CliError::InvalidColor(hex.to_string()))?;

    Ok(Color::new(
        parsed.get_red().round() as u8,
        parsed.get_green().round() as u8,
        parsed.get_blue().round() as u8,
        alpha,
    ))
}

pub fn load(path: &Path) -> Result<Project, CliError> {
    let file = File::open(path)?;
    Ok(document::read_from(BufReader::new(file))?)
}

pub fn save(project: &mut Project, path: &Path) -> Result<(), CliError> {
    let mut out = BufWriter::new(File::create(path)?);
    document::write_to(project, &mut out)?;
    out.flush()?;
    Ok(())
}

pub fn new_project(path: &Path, name: &str, size: Size) -> Result<(), CliError> {
    let mut project = Project::new(name, size);
    project.add_layer("Background");
    save(&mut project, path)?;

    info!("Created {:?} ({}) at {:?}", name, project.id(), path);
    Ok(())
}

pub fn describe(project: &Project) -> String {
    let size = project.size();
    let mut out = format!(
        "{} ({})\nsize: {}x{}\nlayers:\n",
        project.name(),
        project.id(),
        size.width,
        size.height
    );
    for (index, layer) in project.layers().iter().enumerate() {
        out.push_str(&format!("  {}: {} [{} pixels]\n", index, layer.name(), layer.len()));
    }
    out
}

pub fn add_layer(path: &Path, name: &str) -> Result<(), CliError> {
    let mut project = load(path)?;
    project.add_layer(name);
    save(&mut project, path)
}

/// `layer` indexes the stack from the bottom. `None` paints on the top layer.
pub fn paint(
    path: &Path,
    layer: Option<usize>,
    coordinate: Coordinate,
    color: Color,
) -> Result<(), CliError> {
    let mut project = load(path)?;
    let index = match layer {
        Some(index) => index,
        None => project.layer_count().checked_sub(1).ok_or(CliError::NoSuchLayer(0))?,
    };
    let id = project
        .layers()
        .get(index)
        .map(|layer| layer.id())
        .ok_or(CliError::NoSuchLayer(index))?;

    project.set_pixel(id, coordinate, color);
    save(&mut project, path)
}

pub fn resize(path: &Path, size: Size) -> Result<(), CliError> {
    let mut project = load(path)?;
    project.set_size(size);
    save(&mut project, path)
}

pub fn render_file(
    path: &Path,
    out_file: &Path,
    background: Option<Color>,
    color_space: &str,
) -> Result<(), CliError> {
    let image_type = out_file
        .extension()
        .and_then(|extension| extension.to_str())
        .and_then(RenderImageType::from_extension)
        .ok_or_else(|| CliError::UnknownImageType(out_file.display().to_string()))?;

    let project = load(path)?;

    let mut surface = PixelSurface::new(project.size(), ColorSpace::named(color_space)?)?;
    if let Some(background) = background {
        surface.clear(&background);
    }
    render_into(&project, &mut surface);

    let data = encode_image(&surface.into_image()?, image_type)?;
    fs::write(out_file, data)?;

    info!("Rendered {:?} to {:?}", project.name(), out_file);
    Ok(())
}
