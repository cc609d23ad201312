pub mod csv_import;
pub mod file;

pub use file::{bundled_dataset, load_dataset};
