pub mod loader;
pub mod types;

pub use loader::{load_chain_csv, LoaderError, REQUIRED_COLUMNS};
pub use types::{OptionType, OptionsChain, Quote};
