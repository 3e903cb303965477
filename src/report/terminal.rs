use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::license::graph::LicenseGraph;
use crate::license::ruleset::RuleSet;
use crate::models::{PermissionTier, ReachabilityEntry, ScoringResult};

/// Render a colored terminal report.
pub fn render(
    result: &ScoringResult,
    packages: usize,
    reachability: &[ReachabilityEntry],
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let conflicts = result.conflict_records.len();

    if quiet {
        println!(
            "Packages: {}  Stack license: {}  Conflicts: {}",
            packages,
            stack_label(result),
            count_label(conflicts),
        );
        return Ok(());
    }

    println!(
        "\n {} v{}\n",
        "stack-license".bold(),
        env!("CARGO_PKG_VERSION")
    );

    if result.is_resolved() {
        println!(
            " {} Stack license for {} packages: {}\n",
            "✓".green(),
            packages,
            result.stack_license.green().bold()
        );
    } else if conflicts > 0 {
        println!(
            " {} No license satisfies every package. Conflicting packages:\n",
            "✗".red()
        );
        render_conflicts(result);
        println!();
    } else {
        println!(
            " {} No stack license: the payload contains unrecognized licenses\n",
            "⚠".yellow()
        );
    }

    if verbose && !reachability.is_empty() {
        println!(" {} Upgrade paths of input licenses:\n", "[INFO]".cyan().bold());
        render_reachability(reachability);
        println!();
    }

    Ok(())
}

fn stack_label(result: &ScoringResult) -> ColoredString {
    if result.is_resolved() {
        result.stack_license.green()
    } else {
        "none".red()
    }
}

fn count_label(conflicts: usize) -> ColoredString {
    if conflicts == 0 {
        conflicts.to_string().green()
    } else {
        conflicts.to_string().red()
    }
}

fn render_conflicts(result: &ScoringResult) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Package").add_attribute(Attribute::Bold),
            Cell::new("License").add_attribute(Attribute::Bold),
        ]);

    for record in &result.conflict_records {
        table.add_row(vec![
            Cell::new(&record.package_version),
            Cell::new(&record.license).fg(Color::Red),
        ]);
    }

    println!("{}", table);
}

fn render_reachability(entries: &[ReachabilityEntry]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("License").add_attribute(Attribute::Bold),
            Cell::new("Tier").add_attribute(Attribute::Bold),
            Cell::new("Reachable").add_attribute(Attribute::Bold),
        ]);

    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.license),
            Cell::new(entry.tier.to_string()).fg(tier_color(entry.tier)),
            Cell::new(entry.reachable.join(", ")),
        ]);
    }

    println!("{}", table);
}

/// Print every known license with its tier and direct upgrade targets.
pub fn render_rule_set(rules: &RuleSet) -> Result<()> {
    let graph = LicenseGraph::from_rule_set(rules)?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("License").add_attribute(Attribute::Bold),
            Cell::new("Tier").add_attribute(Attribute::Bold),
            Cell::new("Upgrades to").add_attribute(Attribute::Bold),
        ]);

    for node in graph.nodes() {
        let targets: Vec<&str> = graph.successors(node).map(|n| n.id()).collect();
        table.add_row(vec![
            Cell::new(node.id()),
            Cell::new(node.tier().to_string()).fg(tier_color(node.tier())),
            Cell::new(targets.join(", ")),
        ]);
    }

    println!("{}", table);
    Ok(())
}

fn tier_color(tier: PermissionTier) -> Color {
    match tier {
        PermissionTier::Permissive => Color::Green,
        PermissionTier::WeaklyProtective => Color::Yellow,
        PermissionTier::StronglyProtective => Color::Red,
        PermissionTier::NetworkProtective => Color::Magenta,
    }
}
