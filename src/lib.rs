pub mod area;
pub mod config;
pub mod pathfinder;
pub mod types;

pub use area::Area;
pub use config::{RouterConfig, load_config};
pub use pathfinder::{
    CellSet, Occupancy, Pathfinder, SearchAborted, corner_count, path_cost, path_to_regions,
    simplify_path,
};
pub use types::{Point, Region};
