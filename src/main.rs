use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use questlog::config::Config;
use questlog::core::constants::{DEFAULT_HISTORY_DAYS, LEDGER_FILENAME};
use questlog::core::progression::{level_from_signed_xp, xp_required_for_level};
use questlog::core::tiers::validate_level_tiers;
use questlog::error::LedgerError;
use questlog::ledger::{lock, FileStore, Ledger, LedgerStore};
use questlog::missions::MissionCatalog;
use questlog::profile::{build_profile, UserProfile};
use questlog::rewards::{claim_reward, rewards_available, REWARD_TYPES};
use questlog::stats::{daily_history, monthly_stats, weekly_stats, PeriodStats};
use questlog::utils::build_info;
use questlog::utils::persistence::{data_dir, save_json};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "questlog")]
#[command(about = "Questlog - log missions, earn XP, reach level 100", long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Directory holding the ledger and config (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Show version information
    #[arg(short = 'V', long)]
    version: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show level, progress and pacing (default)
    Profile {
        #[arg(long)]
        json: bool,
    },

    /// Set how many times a mission was done on a date
    Log {
        mission: String,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<String>,
        #[arg(long, default_value_t = 1)]
        count: u32,
    },

    /// Delete a mission entry
    Unlog {
        mission: String,
        #[arg(long)]
        date: Option<String>,
    },

    /// Add one completion of a mission
    Inc {
        mission: String,
        #[arg(long)]
        date: Option<String>,
    },

    /// Remove one completion of a mission
    Dec {
        mission: String,
        #[arg(long)]
        date: Option<String>,
    },

    /// Show the entries of a day
    Day {
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        json: bool,
    },

    /// List categories and missions
    Missions,

    /// XP sums over a period
    Stats {
        #[command(subcommand)]
        period: StatsPeriod,
    },

    /// Show reward types and how many can be claimed
    Rewards,

    /// Claim one available reward
    Claim { reward: String },

    /// Level reached with a given XP total
    Level {
        #[arg(allow_hyphen_values = true)]
        xp: i64,
    },

    /// Cumulative XP needed to reach a level
    XpFor { level: u32 },

    /// Write the whole ledger as JSON
    Export { path: PathBuf },

    /// Show or change settings
    Config {
        #[arg(long)]
        name: Option<String>,
        /// Goal date, YYYY-MM-DD
        #[arg(long)]
        target_date: Option<String>,
    },
}

#[derive(Subcommand)]
enum StatsPeriod {
    /// ISO week, YYYY-Www (default: this week)
    Week { week: Option<String> },
    /// Month, YYYY-MM (default: this month)
    Month { month: Option<String> },
    /// Daily totals for recent days
    History {
        #[arg(long, default_value_t = DEFAULT_HISTORY_DAYS)]
        days: i64,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<LedgerError>() {
            Some(err) if err.is_locked() => {
                eprintln!("Locked: {}", err);
                ExitCode::from(3)
            }
            Some(err) if err.is_validation() => {
                eprintln!("Rejected: {}", err);
                ExitCode::from(2)
            }
            _ => {
                eprintln!("Error: {:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.version {
        println!("{}", build_info::version_line());
        return Ok(());
    }

    validate_level_tiers().context("level tier table is misconfigured")?;

    let command = cli.command.unwrap_or(Commands::Profile { json: false });

    // Pure curve queries need no data directory.
    match command {
        Commands::Level { xp } => {
            let r = level_from_signed_xp(xp);
            println!(
                "Level {} ({}/{} XP, {:.1}%)",
                r.level, r.current_tier_xp, r.xp_for_next_level, r.progress_percent
            );
            return Ok(());
        }
        Commands::XpFor { level } => {
            println!("{}", xp_required_for_level(level));
            return Ok(());
        }
        Commands::Missions => {
            print_missions(&MissionCatalog::default());
            return Ok(());
        }
        _ => {}
    }

    let dir = data_dir(cli.data_dir.as_deref()).context("could not open data directory")?;
    let mut config = Config::load(&dir);
    let ledger_path = dir.join(LEDGER_FILENAME);
    let store = FileStore::open(&ledger_path)
        .with_context(|| format!("could not open ledger {}", ledger_path.display()))?;
    let mut ledger = Ledger::new(store, MissionCatalog::default());
    debug!(dir = %dir.display(), "ready");

    match command {
        Commands::Profile { json } => {
            let profile = build_profile(&ledger, &config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else {
                print_profile(&profile, &config);
            }
        }
        Commands::Log {
            mission,
            date,
            count,
        } => {
            let date = resolve_date(date.as_deref())?;
            let xp = ledger.save_entry(date, &mission, count)?;
            println!("{} x{} on {}: {} XP", mission, count, date, xp);
            print_level_line(&build_profile(&ledger, &config)?);
        }
        Commands::Unlog { mission, date } => {
            let date = resolve_date(date.as_deref())?;
            if ledger.remove_entry(date, &mission)? {
                println!("Removed {} on {}", mission, date);
            } else {
                println!("Nothing logged for {} on {}", mission, date);
            }
            print_level_line(&build_profile(&ledger, &config)?);
        }
        Commands::Inc { mission, date } => {
            let date = resolve_date(date.as_deref())?;
            let count = ledger.increment(date, &mission)?;
            println!("{} on {}: x{}", mission, date, count);
            print_level_line(&build_profile(&ledger, &config)?);
        }
        Commands::Dec { mission, date } => {
            let date = resolve_date(date.as_deref())?;
            let count = ledger.decrement(date, &mission)?;
            println!("{} on {}: x{}", mission, date, count);
            print_level_line(&build_profile(&ledger, &config)?);
        }
        Commands::Day { date, json } => {
            let date = resolve_date(date.as_deref())?;
            let day = ledger.day(date)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&day)?);
            } else {
                let lock_note = if day.locked { " [locked]" } else { "" };
                println!("{}{}: {} XP", day.date, lock_note, day.total_xp);
                for entry in &day.entries {
                    println!(
                        "  {:<40} x{:<3} {:>5} XP",
                        entry.mission_name, entry.count, entry.total_xp
                    );
                }
            }
        }
        Commands::Stats { period } => match period {
            StatsPeriod::Week { week } => print_period(&weekly_stats(&ledger, week.as_deref())?),
            StatsPeriod::Month { month } => {
                print_period(&monthly_stats(&ledger, month.as_deref())?)
            }
            StatsPeriod::History { days } => {
                for day in daily_history(&ledger, days)? {
                    println!("{}  {:>5} XP", day.date, day.total_xp);
                }
            }
        },
        Commands::Rewards => {
            let profile = build_profile(&ledger, &config)?;
            println!("Rewards available: {}", profile.rewards_available);
            for reward in REWARD_TYPES.iter() {
                println!("  {:<10} {} ({:?})", reward.id, reward.name, reward.tier);
            }
            for claim in ledger.store().claimed_rewards()? {
                println!(
                    "  claimed level {} -> {} on {}",
                    claim.level,
                    claim.reward_type,
                    claim.claimed_at.format("%Y-%m-%d")
                );
            }
        }
        Commands::Claim { reward } => {
            let level = build_profile(&ledger, &config)?.level;
            let claimed_level = claim_reward(ledger.store_mut(), level, &reward)?;
            let remaining = rewards_available(level, ledger.store().claimed_reward_count()?);
            println!(
                "Claimed {} for level {} ({} left)",
                reward, claimed_level, remaining
            );
        }
        Commands::Export { path } => {
            save_json(&path, &ledger.store().snapshot())
                .with_context(|| format!("could not write {}", path.display()))?;
            println!("Exported ledger to {}", path.display());
        }
        Commands::Config { name, target_date } => {
            let mut changed = false;
            if let Some(name) = name {
                config.name = name;
                changed = true;
            }
            if let Some(date) = target_date {
                config.target_date = lock::parse_date(&date)?;
                changed = true;
            }
            if changed {
                config.save(&dir).context("could not save config")?;
            }
            println!("name: {}", config.name);
            println!("target date: {}", config.target_date);
        }
        Commands::Level { .. } | Commands::XpFor { .. } | Commands::Missions => {}
    }

    Ok(())
}

fn resolve_date(arg: Option<&str>) -> Result<NaiveDate, LedgerError> {
    match arg {
        Some(input) => lock::parse_date(input),
        None => Ok(lock::today()),
    }
}

fn print_level_line(profile: &UserProfile) {
    println!(
        "Level {} - {}/{} XP ({:.1}%), {} XP total",
        profile.level,
        profile.current_tier_xp,
        profile.xp_for_next_level,
        profile.progress_percent,
        profile.total_xp
    );
}

fn print_profile(profile: &UserProfile, config: &Config) {
    println!("{}", profile.name);
    print_level_line(profile);
    println!("Rewards available: {}", profile.rewards_available);
    if profile.days_remaining > 0 {
        println!(
            "Goal: level {} by {} - {} days left, {} XP/day needed ({} XP to go)",
            config.goal().level,
            config.target_date,
            profile.days_remaining,
            profile.xp_per_day_required,
            profile.xp_to_target
        );
    } else {
        println!(
            "Goal date {} has passed ({} XP to go)",
            config.target_date, profile.xp_to_target
        );
    }
}

fn print_missions(catalog: &MissionCatalog) {
    for category in catalog.categories() {
        println!("{} ({})", category.name, category.id);
        for mission in &category.missions {
            let bonus = if mission.is_bonus { " [bonus]" } else { "" };
            println!(
                "  {:<28} {:>3} XP  {}{}",
                mission.id, mission.xp, mission.name, bonus
            );
        }
    }
}

fn print_period(stats: &PeriodStats) {
    println!(
        "{} ({} to {}): {} XP over {} days, {} XP/day average",
        stats.period,
        stats.start_date,
        stats.end_date,
        stats.total_xp,
        stats.days_with_entries,
        stats.daily_average
    );
    for category in stats.by_category.iter().filter(|c| c.total_xp > 0) {
        println!(
            "  {:<14} {:>5} XP  ({} entries)",
            category.category_name, category.total_xp, category.mission_count
        );
    }
}
