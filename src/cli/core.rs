//! Shell context, dispatch, and error reporting shared by every command.

use std::io;

use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;

use crate::{
    config::{Config, ConfigManager},
    core::{time::SystemClock, RecordStore},
    currency::CurrencyFormat,
    domain::Money,
    errors::{ConfigError, LedgerError},
    storage::JsonFileStorage,
};

pub use crate::errors::CliError;

use super::commands;
use super::io as cli_io;
use super::registry::{CommandEntry, CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<ReadlineError> for CliError {
    fn from(err: ReadlineError) -> Self {
        CliError::Input(err.to_string())
    }
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: RecordStore,
    pub config: Config,
    pub config_manager: ConfigManager,
    pub currency: CurrencyFormat,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    /// Opens the configured data directory and loads both record lists.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        let storage = JsonFileStorage::new(config_manager.data_dir(&config))?;
        tracing::debug!(root = %storage.root().display(), "using json slot storage");
        let store = RecordStore::open(Box::new(storage), Box::new(SystemClock));
        Ok(Self::with_parts(mode, store, config, config_manager))
    }

    pub fn with_parts(
        mode: CliMode,
        store: RecordStore,
        config: Config,
        config_manager: ConfigManager,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        cli_io::apply_config(&config);
        Self {
            mode,
            registry,
            store,
            currency: config.currency_format(),
            config,
            config_manager,
            theme: ColorfulTheme::default(),
            running: true,
        }
    }

    pub(crate) fn prompt(&self) -> String {
        format!("cart [{}]> ", self.format_money(self.balance()))
    }

    fn balance(&self) -> Money {
        let sales: Money = self.store.sales().iter().map(|sale| sale.total).sum();
        let expenses: Money = self.store.expenses().iter().map(|e| e.amount).sum();
        sales - expenses
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn format_money(&self, amount: Money) -> String {
        self.currency.format(amount)
    }

    /// Replaces the active configuration, persists it, and refreshes derived display state.
    pub(crate) fn update_config(&mut self, config: Config) -> CommandResult {
        self.config_manager.save(&config)?;
        cli_io::apply_config(&config);
        self.currency = config.currency_format();
        self.config = config;
        Ok(())
    }

    /// Asks before a destructive action. Script mode always proceeds.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match super::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                cli_io::print_warning(err);
                return Ok(LoopControl::Continue);
            }
        };
        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, raw, &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        if let Some(best) = self.registry.closest(input) {
            cli_io::print_hint(format!("did you mean `{best}`?"));
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        Ok(self.confirm("Exit shell?")?)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Ledger(LedgerError::Validation(message)) => {
                cli_io::print_error(message);
                Ok(())
            }
            other => {
                tracing::error!(error = %other, "command failed");
                cli_io::print_error(other);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
pub(crate) fn script_context(
    now: chrono::DateTime<chrono::Utc>,
) -> (ShellContext, tempfile::TempDir) {
    use crate::core::time::FixedClock;
    use crate::storage::MemoryStorage;

    let dir = tempfile::tempdir().expect("temp dir");
    let config_manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("config");
    let store = RecordStore::open(Box::new(MemoryStorage::new()), Box::new(FixedClock(now)));
    let mut config = Config::default();
    config.ui_color_enabled = false;
    let context = ShellContext::with_parts(CliMode::Script, store, config, config_manager);
    (context, dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn unknown_commands_do_not_stop_the_shell() {
        let (mut context, _dir) = script_context(Utc::now());
        assert_eq!(
            context.process_line("dashbord").unwrap(),
            LoopControl::Continue
        );
        assert_eq!(context.process_line("   ").unwrap(), LoopControl::Continue);
        assert_eq!(context.process_line("exit").unwrap(), LoopControl::Exit);
    }

    #[test]
    fn unbalanced_quotes_are_reported_not_fatal() {
        let (mut context, _dir) = script_context(Utc::now());
        assert_eq!(
            context.process_line("expense 5 \"ice").unwrap(),
            LoopControl::Continue
        );
        assert!(context.store.expenses().is_empty());
    }

    #[test]
    fn records_and_deletes_through_commands() {
        let (mut context, _dir) = script_context(Utc::now());
        context
            .process_line("sale 12,50 cash skewers=2 complete can=1")
            .unwrap();
        context
            .process_line("expense 8 \"bag of ice\"")
            .unwrap();
        assert_eq!(context.store.sales().len(), 1);
        assert_eq!(context.store.expenses()[0].description, "bag of ice");
        assert_eq!(context.balance(), Money::from_cents(450));

        let id = context.store.expenses()[0].id.simple().to_string();
        context.process_line(&format!("delete {}", &id[..8])).unwrap();
        assert!(context.store.expenses().is_empty());
        assert_eq!(context.store.sales().len(), 1);
    }

    #[test]
    fn rejected_input_surfaces_as_command_error() {
        let (mut context, _dir) = script_context(Utc::now());
        assert!(matches!(
            context.process_line("sale 0"),
            Err(CommandError::Ledger(LedgerError::Validation(_)))
        ));
        assert!(matches!(
            context.process_line("sale abc"),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(context.process_line("dashboard").is_ok());
        assert!(context.process_line("report").is_ok());
        assert!(context.process_line("history 5").is_ok());
    }

    #[test]
    fn config_changes_refresh_currency_format() {
        let (mut context, _dir) = script_context(Utc::now());
        context.process_line("config set locale en-US").unwrap();
        context.process_line("config set currency USD").unwrap();
        assert_eq!(context.format_money(Money::from_cents(123_456)), "$1,234.56");
        let reloaded = context.config_manager.load().unwrap();
        assert_eq!(reloaded.currency, "USD");
    }
}
