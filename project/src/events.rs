use structures::{Color, Coordinate, Size};

use crate::LayerId;

/// What changed on a [`Project`](crate::Project). Listeners receive these
/// synchronously, after the mutation has been applied.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectEvent {
    Renamed { name: String },
    Resized { from: Size, to: Size },
    LayerAdded { layer: LayerId },
    LayerRemoved { layer: LayerId },
    LayerRenamed { layer: LayerId, name: String },
    PixelSet {
        layer: LayerId,
        coordinate: Coordinate,
        color: Color,
    },
}

pub(crate) type Listener = Box<dyn FnMut(&ProjectEvent)>;
