use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io;
use crate::cli::output::{self, section as output_section};
use crate::cli::registry::CommandEntry;
use crate::config::CONFIG_KEYS;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "config",
            "Show or change preferences",
            "config [show|set <locale|currency|color|data_dir> <value>]",
            cmd_config,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new("help", "Show available commands", "help [command]", cmd_help),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.split_first() {
        None => show_config(context),
        Some((sub, _)) if sub.eq_ignore_ascii_case("show") => show_config(context),
        Some((sub, rest)) if sub.eq_ignore_ascii_case("set") => {
            let Some((key, value)) = rest.split_first() else {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    CONFIG_KEYS.join("|")
                )));
            };
            let key = key.to_ascii_lowercase();
            let mut updated = context.config.clone();
            updated.set_value(&key, &value.join(" "))?;
            let moved_data = updated.data_dir != context.config.data_dir;
            context.update_config(updated)?;
            io::print_success(format!("`{key}` updated."));
            if moved_data {
                io::print_hint("the new data directory is used from the next start");
            }
            Ok(())
        }
        Some((other, _)) => Err(CommandError::InvalidArguments(format!(
            "unknown config subcommand `{other}`"
        ))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    let config = &context.config;
    output_section("Configuration");
    let rows = vec![
        vec!["locale".to_string(), config.locale.clone()],
        vec!["currency".to_string(), config.currency.clone()],
        vec![
            "color".to_string(),
            if config.ui_color_enabled { "on" } else { "off" }.to_string(),
        ],
        vec![
            "data_dir".to_string(),
            context
                .config_manager
                .data_dir(config)
                .display()
                .to_string(),
        ],
    ];
    output::table(&["Key", "Value"], &rows, &[]);
    io::print_hint(format!("stored at {}", context.config_manager.path().display()));
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output_section(format!("Cart Ledger {}", meta.summary()));
    io::print_info(format!("  Built at : {}", meta.built_at));
    io::print_info(format!("  Target   : {} ({})", meta.target, meta.profile));
    io::print_info(format!("  Rustc    : {}", meta.rustc));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        }
        return Ok(());
    }
    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
