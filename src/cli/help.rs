use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output_section("Commands");
    for entry in registry.list() {
        io::print_info(format!("  {:<12} {}", entry.name, entry.description));
    }
    io::print_hint("`help <command>` shows the full usage; Tab completes command names.");
}

pub fn print_command(entry: &CommandEntry) {
    output_section(entry.name);
    io::print_info(entry.description);
    io::print_info(format!("  usage: {}", entry.usage));
}
