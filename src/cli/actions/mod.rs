pub mod pipeline;
pub mod services;

// Internal "interpreter" for `Action`.
mod run;

use std::path::PathBuf;

/// Arguments shared by every action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub config: PathBuf,
    pub compact: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Pipeline(Args),
    Services(Args),
}

impl Action {
    /// Execute the action, writing its JSON report to stdout.
    /// # Errors
    /// Returns an error if the configuration cannot be loaded or assembled.
    pub fn execute(self) -> anyhow::Result<()> {
        let stdout = std::io::stdout();
        run::execute(self, &mut stdout.lock())
    }
}
