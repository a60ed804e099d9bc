//! Seed an aggregate and run the simulation.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use morpho::prelude::*;
use std::path::Path;

use crate::config::Config;

pub fn run(ticks: Option<u64>, cells: Option<usize>, export: Option<&str>, verbose: bool) -> Result<()> {
    let config = Config::load()?;
    let ticks = ticks.unwrap_or(config.run.ticks);
    let mut plan = config.seed.clone();
    if let Some(count) = cells {
        plan.count = count;
    }
    if plan.count == 0 {
        bail!("Nothing to simulate: seed at least one cell with {}", "--cells".cyan());
    }

    let mut aggregate =
        Aggregate::from_config(config.aggregate).context("Invalid aggregate configuration")?;
    seed(&mut aggregate, &plan).context("Failed to seed the aggregate")?;
    let kind = plan.variant.build().kind().to_string();
    println!(
        "{} Seeded {} {} cells",
        "→".blue(),
        plan.count.to_string().cyan(),
        kind.cyan()
    );

    println!("{} Running {} ticks...", "→".blue(), ticks.to_string().cyan());

    let pb = ProgressBar::new(ticks);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ticks {msg}")?
            .progress_chars("#>-"),
    );

    for _ in 0..ticks {
        let events = aggregate.tick();
        if let Some(AggregateEvent::TickComplete { alive, born, died, .. }) = events.last() {
            pb.set_message(format!("{alive} cells"));
            if verbose && (*born > 0 || *died > 0) {
                pb.println(format!("  +{born} -{died} → {alive} cells"));
            }
        }
        pb.inc(1);
        if aggregate.is_empty() {
            pb.println(format!("  {} population extinct", "•".yellow()));
            break;
        }
    }
    pb.finish_with_message("done");

    print_readout(&aggregate);

    if let Some(output) = export {
        let content = export_json(&aggregate).context("Failed to serialize aggregate")?;
        std::fs::write(Path::new(output), content)
            .with_context(|| format!("Failed to write {output}"))?;
        println!();
        println!("{} Exported to {}", "✓".green().bold(), output.cyan());
    }

    let stats = aggregate.stats();
    tracing::info!(
        ticks = stats.tick,
        alive = stats.alive,
        born = stats.total_born,
        died = stats.total_died,
        "run complete"
    );

    Ok(())
}

/// Control-panel readout: iteration, population and simulated time.
fn print_readout(aggregate: &Aggregate) {
    let stats = aggregate.stats();
    let summary = summarize(aggregate);

    println!();
    println!("{} Simulation complete!", "✓".green().bold());
    println!("  Iteration: {}", stats.tick.to_string().green());
    println!("  Cells:     {}", stats.alive.to_string().green());
    println!("  Time:      {}", format!("{:.2}", stats.time).green());
    println!();
    println!(
        "  Born: {}  Died: {}  Max generation: {}",
        stats.total_born.to_string().cyan(),
        stats.total_died.to_string().yellow(),
        summary.max_generation.to_string().cyan()
    );
    println!(
        "  Radius: mean {:.3}  min {:.3}  max {:.3}",
        summary.mean_radius, summary.min_radius, summary.max_radius
    );

    let phases = summary.phases;
    let row = [
        (CycleState::Mitosis, phases.mitosis),
        (CycleState::Gap1, phases.gap1),
        (CycleState::Synthesis, phases.synthesis),
        (CycleState::Gap2, phases.gap2),
        (CycleState::QuiescentGap0, phases.quiescent),
        (CycleState::Apoptotic, phases.apoptotic),
    ]
    .iter()
    .map(|(state, n)| format!("{} {}", state.label().bold(), n))
    .collect::<Vec<_>>()
    .join("  ");
    println!("  Phases: {row}");
}
