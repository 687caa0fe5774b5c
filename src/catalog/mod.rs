pub mod reader;
pub mod types;

pub use reader::{load_catalog, read_catalog, REQUIRED_COLUMNS};
pub use types::{PlanetRecord, SelectedInput};
