pub mod expense;
pub mod history;
pub mod report;
pub mod sale;
pub mod system;

use crate::cli::core::CommandError;
use crate::cli::registry::CommandRegistry;
use crate::domain::Money;

pub fn register_all(registry: &mut CommandRegistry) {
    for entry in report::definitions()
        .into_iter()
        .chain(sale::definitions())
        .chain(expense::definitions())
        .chain(history::definitions())
        .chain(system::definitions())
    {
        registry.register(entry);
    }
}

pub(crate) fn parse_amount(raw: &str) -> Result<Money, CommandError> {
    raw.parse::<Money>().map_err(|_| {
        CommandError::InvalidArguments(format!(
            "invalid amount `{raw}` (use 12, 12.50 or 12,50)"
        ))
    })
}

pub(crate) fn parse_count(key: &str, raw: &str) -> Result<u32, CommandError> {
    raw.parse::<u32>().map_err(|_| {
        CommandError::InvalidArguments(format!("`{key}` expects a whole number, got `{raw}`"))
    })
}
