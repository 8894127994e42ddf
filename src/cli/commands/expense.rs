use crate::cli::commands::parse_amount;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::domain::{ExpenseDraft, ExpenseType};

const USAGE: &str = "expense <amount> <description...> [--capital]";
const CAPITAL_FLAG: &str = "--capital";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "expense",
        "Record an expense or initial capital",
        USAGE,
        cmd_expense,
    )]
}

fn cmd_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let draft = parse_expense(args)?;
    let expense = context.store.add_expense(draft)?.clone();
    io::print_success(format!(
        "{} recorded: {} ({})",
        expense.kind.label(),
        context.format_money(expense.amount),
        expense.description
    ));
    Ok(())
}

pub(crate) fn parse_expense(args: &[&str]) -> Result<ExpenseDraft, CommandError> {
    let Some((amount, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(format!("usage: {USAGE}")));
    };
    let amount = parse_amount(amount)?;
    let kind = if rest.iter().any(|arg| arg.eq_ignore_ascii_case(CAPITAL_FLAG)) {
        ExpenseType::InitialCapital
    } else {
        ExpenseType::ExtraExpense
    };
    let description = rest
        .iter()
        .filter(|arg| !arg.eq_ignore_ascii_case(CAPITAL_FLAG))
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    if description.trim().is_empty() {
        return Err(CommandError::InvalidArguments(format!(
            "a description is required; usage: {USAGE}"
        )));
    }
    Ok(ExpenseDraft::new(description, amount, kind))
}
