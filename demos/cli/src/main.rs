use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use timeline_core::{TimelineConfig, TimelineController, TimelineDataset, Transition};
use timeline_data::{builtin_insights, builtin_timeline, load_insights_str, load_timeline_str};

#[derive(Parser, Debug)]
#[command(
    name = "timeline-cli",
    about = "Inspect the AI evolution timeline from the terminal."
)]
struct Args {
    /// Dataset JSON file; the built-in timeline is used when omitted.
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Insight table JSON file; the built-in texts are used when omitted.
    #[arg(long, global = true)]
    insights: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every section with its final stats.
    Sections,
    /// Print the interpolated frames of a transition into a section.
    Frames {
        /// Target section index.
        #[arg(long)]
        to: usize,
        /// Source section index; defaults to the section before `to`.
        #[arg(long)]
        from: Option<usize>,
        /// Number of evenly spaced frames to print.
        #[arg(long, default_value_t = 6)]
        steps: u32,
        /// Transition length in milliseconds.
        #[arg(long)]
        duration_ms: Option<u32>,
    },
    /// Request the insight for a section and print it once it arrives.
    Insight {
        #[arg(long)]
        section: usize,
    },
}

fn read_dataset(input: Option<&PathBuf>) -> anyhow::Result<TimelineDataset> {
    match input {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("Could not read file {path:?}"))?;
            load_timeline_str(&data).with_context(|| format!("Invalid dataset in {path:?}"))
        }
        None => Ok(builtin_timeline()?),
    }
}

fn check_section(dataset: &TimelineDataset, index: usize) -> anyhow::Result<()> {
    if index >= dataset.len() {
        bail!("section {index} does not exist, the timeline has {} sections", dataset.len());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let dataset = read_dataset(args.input.as_ref())?;
    let insights = match &args.insights {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("Could not read file {path:?}"))?;
            load_insights_str(&data)?
        }
        None => builtin_insights()?,
    };
    log::info!("loaded {} sections, {} insights", dataset.len(), insights.len());

    match args.command {
        Command::Sections => {
            for (index, section) in dataset.iter().enumerate() {
                let stats = section
                    .stats
                    .iter()
                    .map(|stat| format!("{} {}", stat.label, stat.value))
                    .collect::<Vec<_>>()
                    .join(", ");
                println!(
                    "[{index}] {} ({}) compute {:.0}% {}\n    {stats}",
                    section.date,
                    section.id,
                    section.compute_value,
                    section.timeline_icons.join(" ")
                );
            }
        }
        Command::Frames {
            to,
            from,
            steps,
            duration_ms,
        } => {
            check_section(&dataset, to)?;
            let duration = duration_ms.unwrap_or(TimelineConfig::default().animation_duration_ms);
            let from = from.unwrap_or_else(|| dataset.predecessor(to));
            let transition = Transition::between(&dataset, from, to, duration);
            let steps = steps.max(1);

            for step in 0..=steps {
                let elapsed = f64::from(duration) * f64::from(step) / f64::from(steps);
                let frame = transition.frame_at(elapsed);
                let stats = frame
                    .stats
                    .iter()
                    .map(|stat| format!("{}={}", stat.label, stat.value))
                    .collect::<Vec<_>>()
                    .join("  ");
                println!(
                    "{elapsed:>7.1}ms  compute {:>6.2}  {stats}",
                    frame.compute_value
                );
            }
        }
        Command::Insight { section } => {
            check_section(&dataset, section)?;
            let config = TimelineConfig::default();
            let mut controller = TimelineController::new(dataset, config);
            controller.mount();
            controller.on_section_change(section);

            let ticket = controller
                .request_insight()
                .context("an insight request is already in flight")?;
            println!("{}", controller.button_label());
            std::thread::sleep(std::time::Duration::from_millis(u64::from(
                controller.config().insight_delay_ms,
            )));
            controller.resolve_insight(ticket, &insights);

            let current = controller.current_section();
            println!("{} ({})", current.date, current.id);
            println!("{}", controller.ui_state().ai_insight);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_sections_are_rejected() {
        let dataset = builtin_timeline().expect("builtin dataset");
        assert!(check_section(&dataset, 4).is_ok());

        let err = check_section(&dataset, 9).expect_err("section 9 is past the end");
        assert_eq!(
            err.to_string(),
            "section 9 does not exist, the timeline has 5 sections"
        );
    }
}
