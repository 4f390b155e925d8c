mod errors;
mod report;
mod run;

pub use errors::ExchangeError;
pub use report::{NOT_FOUND, print_missing_config};
pub use run::{FlowState, Outcome, run_exchange};
