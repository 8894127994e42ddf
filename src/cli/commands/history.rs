use chrono::Local;
use uuid::Uuid;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::time::{format_business_date, format_time};
use crate::domain::{Displayable, HistoryEntry, Identifiable, Timestamped};

const SHORT_ID_LEN: usize = 8;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "history",
            "List sales and expenses, newest first",
            "history [limit]",
            cmd_history,
        ),
        CommandEntry::new(
            "delete",
            "Delete a sale or expense by id",
            "delete <id-or-prefix>",
            cmd_delete,
        ),
    ]
}

pub(crate) fn short_id(id: Uuid) -> String {
    let mut short = id.simple().to_string();
    short.truncate(SHORT_ID_LEN);
    short
}

fn cmd_history(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let limit = match args.first() {
        Some(raw) => Some(raw.parse::<usize>().map_err(|_| {
            CommandError::InvalidArguments(format!("invalid limit `{raw}`"))
        })?),
        None => None,
    };

    let entries = context.store.history();
    if entries.is_empty() {
        io::print_info("No records yet.");
        return Ok(());
    }
    let shown = limit.unwrap_or(entries.len()).min(entries.len());
    let rows: Vec<Vec<String>> = entries
        .iter()
        .take(shown)
        .map(|entry| history_row(context, entry))
        .collect();

    output::section("History");
    output::table(&["Id", "Date", "Time", "Kind", "Description", "Amount"], &rows, &[5]);
    if shown < entries.len() {
        io::print_hint(format!("{} older record(s) not shown", entries.len() - shown));
    }
    Ok(())
}

fn history_row(context: &ShellContext, entry: &HistoryEntry<'_>) -> Vec<String> {
    let detail = match entry {
        HistoryEntry::Sale(sale) => {
            format!("{} ({})", entry.display_label(), sale.payment_method.label())
        }
        HistoryEntry::Expense(expense) => {
            format!("{} ({})", entry.display_label(), expense.kind.label())
        }
    };
    vec![
        short_id(entry.id()),
        format_business_date(&Local, entry.timestamp()),
        format_time(&Local, entry.timestamp()),
        if entry.is_sale() { "sale" } else { "expense" }.to_string(),
        detail,
        context.format_money(entry.signed_amount()),
    ]
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(reference) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: delete <id-or-prefix>".into(),
        ));
    };
    let (id, is_sale, description) = {
        let entry = context
            .store
            .find_entry(reference)
            .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
        let amount = context.format_money(entry.signed_amount());
        (
            entry.id(),
            entry.is_sale(),
            format!("{} {}", entry.display_label(), amount),
        )
    };

    if !context.confirm(&format!("Delete `{description}`?"))? {
        io::print_info("Deletion cancelled.");
        return Ok(());
    }

    let removed = if is_sale {
        context.store.delete_sale(id)?.is_some()
    } else {
        context.store.delete_expense(id)?.is_some()
    };
    if removed {
        io::print_success(format!("Deleted {} ({description}).", short_id(id)));
    } else {
        io::print_warning(format!("Record {} was already gone.", short_id(id)));
    }
    Ok(())
}
