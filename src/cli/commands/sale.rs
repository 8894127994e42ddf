use crate::cli::commands::{parse_amount, parse_count};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::domain::{DrinkKind, Drinks, PaymentMethod, SaleDraft};

const USAGE: &str =
    "sale <amount> [pix|cash] [skewers=N] [complete] [juice=N] [can=N] [soda1l=N] [soda2l=N]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new("sale", "Record a sale", USAGE, cmd_sale)]
}

fn cmd_sale(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let draft = parse_sale(args)?;
    let sale = context.store.add_sale(draft)?.clone();
    let mut summary = format!(
        "Sale recorded: {} via {}",
        context.format_money(sale.total),
        sale.payment_method.label()
    );
    if sale.skewers > 0 {
        summary.push_str(&format!(
            ", {} skewer(s), {}",
            sale.skewers,
            sale.plate_label()
        ));
    }
    if !sale.drinks.is_empty() {
        let drinks: Vec<String> = sale
            .drinks
            .ordered()
            .map(|(kind, count)| format!("{count} {}", kind.label()))
            .collect();
        summary.push_str(&format!(", drinks: {}", drinks.join(", ")));
    }
    io::print_success(summary);
    Ok(())
}

pub(crate) fn parse_sale(args: &[&str]) -> Result<SaleDraft, CommandError> {
    let Some((amount, options)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(format!("usage: {USAGE}")));
    };
    let mut draft = SaleDraft::new(parse_amount(amount)?, PaymentMethod::default());
    let mut drinks = Drinks::default();

    for option in options {
        let lowered = option.to_ascii_lowercase();
        match lowered.split_once('=') {
            None => match lowered.as_str() {
                "pix" => draft.payment_method = PaymentMethod::Pix,
                "cash" => draft.payment_method = PaymentMethod::Cash,
                "complete" => draft.is_complete = true,
                _ => {
                    return Err(CommandError::InvalidArguments(format!(
                        "unknown sale option `{option}`"
                    )))
                }
            },
            Some((key, value)) => {
                let count = parse_count(key, value)?;
                match key {
                    "skewers" => draft.skewers = count,
                    "juice" => drinks.set(DrinkKind::Juice, count),
                    "can" => drinks.set(DrinkKind::CanSoda, count),
                    "soda1l" => drinks.set(DrinkKind::Soda1L, count),
                    "soda2l" => drinks.set(DrinkKind::Soda2L, count),
                    _ => {
                        return Err(CommandError::InvalidArguments(format!(
                            "unknown sale option `{key}`"
                        )))
                    }
                }
            }
        }
    }
    Ok(draft.with_drinks(drinks))
}
