// Loading, cleaning and filtering of the transfers dataset
pub mod csv_parser;
pub mod dataset;
pub mod filter;
