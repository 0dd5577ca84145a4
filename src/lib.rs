pub mod data;
pub mod report;
pub mod scan;
pub mod server;

// Re-export commonly used types
pub use data::{load_chain_csv, LoaderError, OptionType, OptionsChain, Quote};
pub use scan::{
    scan, scan_chain, ButterflyCandidate, ButterflyResult, ConfigError, LegPricing, ScanConfig,
};
