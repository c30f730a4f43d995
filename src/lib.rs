//! Layered sparse pixel-art projects.
//!
//! - [`structures`]: coordinates, colors, sizes and their packed integer forms.
//! - [`project`]: layers, projects and document encoding.
//! - [`renderer`]: compositing a project into an image.

pub use ::render as renderer;
pub use project;
pub use structures;

pub use ::render::{render, render_into, render_to_image_type, RenderError, RenderImageType};
pub use project::{document, Layer, LayerId, Project, ProjectEvent, ProjectId};
pub use structures::{Color, Coordinate, Pack, Size};
