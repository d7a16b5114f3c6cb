pub mod editor;
pub mod geometry;
pub mod model;
pub mod wire;

pub use editor::{ClickOutcome, EditorError, EditorState, ZoneEditor};
pub use geometry::{point_in_polygon, to_reference_frame, Point, REF_HEIGHT, REF_WIDTH};
pub use model::Zone;
pub use wire::{from_wire, to_wire, ZoneRecord, ZoneWire};
