use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::application::dtos::{RecordOutcomeDto, StreakStatusDto, WeekActivityDto};
use crate::application::services::StreakService;

#[derive(Parser)]
#[command(
    name = "boldmove",
    about = "Bold Move streak tracker: record daily bold actions and keep the streak alive",
    version
)]
pub struct Cli {
    /// Config file path (default: platform data dir)
    #[arg(long, global = true, env = "BOLDMOVE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record today's bold action
    Record,

    /// Show streak status and milestone progress
    Status,

    /// Show the trailing 7-day activity window
    Week,

    /// Wipe the streak record back to zero
    Reset,
}

pub async fn run(cli: &Cli, service: &StreakService) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Record => {
            let outcome = service.record_activity().await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print_record_outcome(&outcome);
            }
        }
        Commands::Status => {
            let status = service.status().await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                print_status(&status);
            }
        }
        Commands::Week => {
            let status = service.status().await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&status.week)?);
            } else {
                print_week(&status.week);
            }
        }
        Commands::Reset => {
            let streak = service.reset().await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&streak)?);
            } else {
                println!("Streak record reset to zero.");
            }
        }
    }

    Ok(())
}

fn print_record_outcome(outcome: &RecordOutcomeDto) {
    if outcome.already_recorded {
        println!(
            "Already recorded today. Current streak: {} day(s).",
            outcome.streak.current_streak
        );
        return;
    }

    println!(
        "Bold move recorded! Current streak: {} day(s), longest: {}, total active days: {}.",
        outcome.streak.current_streak,
        outcome.streak.longest_streak,
        outcome.streak.total_active_days
    );

    if let Some(milestone) = &outcome.milestone {
        println!(
            "Milestone unlocked: {} {} ({} days)",
            milestone.emblem, milestone.title, milestone.streak
        );
    }
}

fn print_status(status: &StreakStatusDto) {
    println!(
        "Current streak: {} day(s){}",
        status.streak.current_streak,
        if status.active_today {
            " (active today)"
        } else {
            ""
        }
    );
    println!("Longest streak: {} day(s)", status.streak.longest_streak);
    println!("Total active days: {}", status.streak.total_active_days);
    if let Some(last) = &status.streak.last_active_date {
        println!("Last active: {}", last);
    }
    if let Some(next) = &status.next_milestone {
        println!(
            "Next milestone: {} {} at {} days",
            next.emblem, next.title, next.streak
        );
    }
    print_week(&status.week);
}

/// Oldest day on the left, today on the right
fn print_week(week: &WeekActivityDto) {
    let line: String = week
        .days
        .iter()
        .rev()
        .map(|&active| if active { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ");
    println!("Last 7 days: {}  ({} active)", line, week.active_count);
}
