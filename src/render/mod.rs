mod axis;
mod frame;
mod labels;
mod lanes;
mod layer_stack;

pub use axis::{HeaderCell, header_cells};
pub use frame::{NowMarker, TimelineFrame};
pub use labels::TimeLabelFormatter;
pub use lanes::{AssemblyOptions, BlockSource, BlockTag, Lane, ProjectedBlock, assemble_lanes};
pub use layer_stack::{LaneKind, LaneRole};
