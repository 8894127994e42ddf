use chrono::Local;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::services::{ChartPoint, SummaryService};
use crate::core::time::{business_date, format_business_date};
use crate::domain::Money;

const BAR_WIDTH: usize = 24;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "dashboard",
            "Balance, today's sales, Pix/Cash split and the last 7 days",
            "dashboard",
            cmd_dashboard,
        ),
        CommandEntry::new(
            "report",
            "Current Friday-to-Monday week plus per-day totals",
            "report [days]",
            cmd_report,
        ),
    ]
}

fn cmd_dashboard(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let now = context.store.now();
    let summary =
        SummaryService::dashboard(context.store.sales(), context.store.expenses(), &Local, now);

    output::section(format!("Dashboard {}", format_business_date(&Local, now)));
    let rows = vec![
        vec!["Balance".to_string(), context.format_money(summary.balance())],
        vec!["Today".to_string(), context.format_money(summary.today_sales)],
        vec!["Total sales".to_string(), context.format_money(summary.total_sales)],
        vec![
            "Total expenses".to_string(),
            context.format_money(summary.total_expenses),
        ],
        vec!["Pix".to_string(), context.format_money(summary.pix)],
        vec!["Cash".to_string(), context.format_money(summary.cash)],
    ];
    output::table(&["", "Amount"], &rows, &[1]);

    output::section("Last 7 days");
    for line in chart_lines(context, &summary.chart) {
        io::print_info(line);
    }
    Ok(())
}

fn chart_lines(context: &ShellContext, chart: &[ChartPoint]) -> Vec<String> {
    let peak = chart
        .iter()
        .map(|point| point.total.cents())
        .max()
        .unwrap_or(0);
    chart
        .iter()
        .map(|point| {
            let filled = if peak > 0 {
                (point.total.cents().max(0) * BAR_WIDTH as i64 / peak) as usize
            } else {
                0
            };
            format!(
                "{} {:<width$} {}",
                point.label,
                "#".repeat(filled),
                context.format_money(point.total),
                width = BAR_WIDTH
            )
        })
        .collect()
}

fn cmd_report(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let day_limit = match args.first() {
        Some(raw) => Some(raw.parse::<usize>().map_err(|_| {
            CommandError::InvalidArguments(format!("invalid day count `{raw}`"))
        })?),
        None => None,
    };
    let now = context.store.now();
    let (sales, expenses) = (context.store.sales(), context.store.expenses());

    let week = SummaryService::weekly_report(sales, expenses, &Local, now);
    output::section(format!(
        "Week {} to {}",
        format_business_date(&Local, week.range.start),
        format_business_date(&Local, week.range.end)
    ));
    let week_rows = vec![
        vec![
            format!("Sales ({})", week.sale_count),
            context.format_money(week.sales),
        ],
        vec!["  Pix".to_string(), context.format_money(week.pix)],
        vec!["  Cash".to_string(), context.format_money(week.cash)],
        vec![
            format!("Expenses ({})", week.expense_count),
            context.format_money(week.expenses),
        ],
        vec!["Profit".to_string(), context.format_money(week.profit())],
    ];
    output::table(&["", "Amount"], &week_rows, &[1]);

    let days = SummaryService::daily_breakdown(sales, expenses, &Local);
    output::section("Daily breakdown");
    if days.is_empty() {
        io::print_info("No records yet.");
        return Ok(());
    }
    let shown = day_limit.unwrap_or(days.len()).min(days.len());
    let rows: Vec<Vec<String>> = days
        .iter()
        .take(shown)
        .map(|day| {
            vec![
                format!(
                    "{} {}",
                    business_date(&Local, day.day_start).format("%a"),
                    format_business_date(&Local, day.day_start)
                ),
                context.format_money(day.sales),
                context.format_money(day.pix),
                context.format_money(day.cash),
                context.format_money(day.expenses),
                context.format_money(day.profit()),
            ]
        })
        .collect();
    output::table(
        &["Day", "Sales", "Pix", "Cash", "Expenses", "Profit"],
        &rows,
        &[1, 2, 3, 4, 5],
    );
    let all_time: Money = days.iter().map(|day| day.profit()).sum();
    io::print_info(format!("All-time profit: {}", context.format_money(all_time)));
    Ok(())
}
