//! CLI interface for symptom-learn

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{self, Config};
use crate::content::{sample, ContentRegistry, PromptDefinition};
use crate::learning::{
    AutoShowPolicy, DismissalRecord, DisplayAction, JsonFilePreferencesStore,
    LearningPromptDisplayState, LearningPromptEngine, PromptMatch, Severity, SymptomContext,
};
use crate::types::ExplanationLevel;

#[derive(Parser)]
#[command(name = "symptom-learn")]
#[command(about = "Surface educational content for logged symptoms", long_about = None)]
#[command(version)]
struct Cli {
    /// User whose preferences are read and updated
    #[arg(short, long, global = true, env = "SYMPTOM_LEARN_USER", default_value = "default")]
    user: String,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank prompts matching a symptom query
    Search {
        query: String,
    },
    /// Log a symptom and show the prompt that would be presented
    Log {
        symptom: String,
        /// mild, moderate or severe
        #[arg(long)]
        severity: Option<String>,
        /// First time this symptom is logged
        #[arg(long)]
        new: bool,
        /// Free-text duration (e.g. "3 days")
        #[arg(long)]
        duration: Option<String>,
        /// Actions to apply in order: expand, fullscreen, explore:<section>, anatomy:<structure>, dismiss[:reason]
        #[arg(short, long = "action")]
        actions: Vec<String>,
        /// Print the trigger event and final state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Dismiss a prompt so it is not shown again during its cooldown
    Dismiss {
        /// Prompt id, symptom or alias
        prompt: String,
        #[arg(long)]
        reason: Option<String>,
        /// Do not show again for this many days regardless of the cooldown
        #[arg(long)]
        snooze_days: Option<i64>,
    },
    /// Print a prompt's explanation
    Explain {
        /// Prompt id, symptom or alias
        prompt: String,
        /// Complexity level 1-5 (out-of-range values are clamped)
        #[arg(short, long, allow_hyphen_values = true)]
        level: Option<i64>,
        /// Print all five levels
        #[arg(long)]
        all: bool,
    },
    /// List the registry
    List,
    /// Describe the five explanation levels
    Levels,
    /// Manage the user's learning prompt preferences
    Prefs {
        #[command(subcommand)]
        command: PrefsCommands,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum PrefsCommands {
    /// Show stored preferences
    Show,
    /// Update preferences
    Set {
        #[arg(long)]
        enabled: Option<bool>,
        /// always, new-symptoms-only or never
        #[arg(long)]
        auto_show: Option<String>,
        /// Preferred explanation level 1-5
        #[arg(long)]
        level: Option<u8>,
        /// Days before a dismissed prompt may reappear
        #[arg(long)]
        cooldown_days: Option<u32>,
    },
    /// Forget the dismissal of a prompt
    Forget {
        prompt: String,
    },
    /// Reset to configured defaults
    Reset,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Print the default configuration
    Init,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let user = cli.user.as_str();
    let command = match cli.command {
        Commands::Config { command } => {
            return match command {
                ConfigCommands::Show => config::show_config(&config),
                ConfigCommands::Init => {
                    print!("{}", config::default_config_toml()?);
                    Ok(())
                }
            };
        }
        command => command,
    };

    let engine = build_engine(&config)?;

    match command {
        Commands::Search { query } => {
            let matches = engine.search(user, &query)?;
            if matches.is_empty() {
                println!("No prompts match '{}'.", query);
            }
            for m in &matches {
                print_match(m);
            }
        }
        Commands::Log { symptom, severity, new, duration, actions, json } => {
            let severity = match severity {
                Some(s) => Some(
                    Severity::from_name(&s)
                        .with_context(|| format!("Unknown severity '{}'", s))?,
                ),
                None => None,
            };
            let context = SymptomContext {
                severity,
                duration,
                is_new: new,
                ..SymptomContext::default()
            };

            let now = Utc::now();
            let (event, mut state) = engine.on_symptom_logged(user, &symptom, context, now)?;
            for raw in &actions {
                let action = parse_action(raw)?;
                state = engine.handle_action(user, &state, action, Utc::now())?;
            }

            if json {
                let out = serde_json::json!({ "event": event, "state": state });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print_log_outcome(&event.matches, &state);
            }
        }
        Commands::Dismiss { prompt, reason, snooze_days } => {
            let definition = resolve(&engine, &prompt)?;
            let now = Utc::now();
            let mut record = DismissalRecord::new(definition.id.clone(), prompt.clone(), now);
            if let Some(days) = snooze_days {
                record = record.with_show_again_after(snooze_until(now, days)?);
            }
            if let Some(reason) = reason {
                record = record.with_reason(reason);
            }
            let prefs = engine.dismiss(user, record)?;
            println!(
                "Dismissed {} (cooldown {} days).",
                definition.id, prefs.show_after_dismiss_days
            );
        }
        Commands::Explain { prompt, level, all } => {
            let definition = resolve(&engine, &prompt)?;
            println!("{}\n", definition.title);
            if all {
                for (level, text) in definition.explanations.iter() {
                    println!("[{}] {}\n    {}\n", level, level.name(), text);
                }
            } else {
                println!("{}", engine.explain(user, &definition, level)?);
            }
        }
        Commands::List => {
            for prompt in engine.registry().iter() {
                println!(
                    "{:<24} {:<16} {:<7} {}",
                    prompt.id,
                    prompt.symptom,
                    prompt.priority,
                    prompt.aliases.join(", ")
                );
            }
        }
        Commands::Levels => {
            for level in ExplanationLevel::ALL {
                println!("{}  {:<24} {:<12} {}", level, level.name(), level.label(), level.audience());
            }
        }
        Commands::Prefs { command } => run_prefs(&engine, &config, user, command)?,
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn run_prefs(engine: &LearningPromptEngine, config: &Config, user: &str, command: PrefsCommands) -> Result<()> {
    match command {
        PrefsCommands::Show => {
            let prefs = engine.preferences(user)?;
            println!("{}", serde_json::to_string_pretty(&prefs)?);
        }
        PrefsCommands::Set { enabled, auto_show, level, cooldown_days } => {
            let mut prefs = engine.preferences(user)?;
            if let Some(enabled) = enabled {
                prefs = prefs.with_enabled(enabled);
            }
            if let Some(policy) = auto_show {
                let policy = AutoShowPolicy::from_name(&policy)
                    .with_context(|| format!("Unknown auto-show policy '{}'", policy))?;
                prefs = prefs.with_auto_show(policy);
            }
            if let Some(level) = level {
                let level = ExplanationLevel::new(level)
                    .with_context(|| format!("Level must be between 1 and 5, got {}", level))?;
                prefs = prefs.with_preferred_level(level);
            }
            if let Some(days) = cooldown_days {
                prefs = prefs.with_cooldown_days(days);
            }
            engine.save_preferences(user, &prefs)?;
            println!("Preferences updated for {}.", user);
        }
        PrefsCommands::Forget { prompt } => {
            let definition = resolve(engine, &prompt)?;
            let prefs = engine.preferences(user)?.without_dismissal(&definition.id);
            engine.save_preferences(user, &prefs)?;
            println!("{} may be shown again.", definition.id);
        }
        PrefsCommands::Reset => {
            let prefs = crate::learning::LearningPromptPreferences::from_config(&config.prompts);
            engine.save_preferences(user, &prefs)?;
            println!("Preferences reset for {}.", user);
        }
    }
    Ok(())
}

fn build_engine(config: &Config) -> Result<LearningPromptEngine> {
    let registry = match &config.content.registry_path {
        Some(path) => ContentRegistry::load(path)?,
        None => sample::registry()?,
    };
    let store = JsonFilePreferencesStore::with_dir(config.store.resolved_dir()?)?;
    Ok(LearningPromptEngine::new(
        Arc::new(registry),
        Arc::new(store),
        config.prompts.clone(),
    ))
}

/// Instant a snooze of `days` whole days ends
fn snooze_until(now: DateTime<Utc>, days: i64) -> Result<DateTime<Utc>> {
    if days < 0 {
        bail!("Snooze days must not be negative, got {}", days);
    }
    Duration::try_days(days)
        .and_then(|snooze| now.checked_add_signed(snooze))
        .with_context(|| format!("Snooze of {} days is out of range", days))
}

fn resolve(engine: &LearningPromptEngine, key: &str) -> Result<Arc<PromptDefinition>> {
    match engine.resolve(key) {
        Some(prompt) => Ok(Arc::clone(prompt)),
        None => bail!("No prompt found for '{}'", key),
    }
}

/// Parse `expand`, `fullscreen`, `explore:<id>`, `anatomy:<id>` or `dismiss[:reason]`
fn parse_action(raw: &str) -> Result<DisplayAction> {
    let (name, arg) = match raw.split_once(':') {
        Some((name, arg)) => (name, Some(arg.to_string())),
        None => (raw, None),
    };
    let action = match (name, arg) {
        ("expand", None) => DisplayAction::Expand,
        ("fullscreen", None) => DisplayAction::Fullscreen,
        ("explore", Some(section_id)) => DisplayAction::ExploreSection { section_id },
        ("anatomy", Some(structure_id)) => DisplayAction::ClickAnatomy { structure_id },
        ("dismiss", reason) => DisplayAction::Dismiss { reason, show_again_after: None },
        _ => bail!("Unknown action '{}'", raw),
    };
    Ok(action)
}

fn print_match(m: &PromptMatch) {
    let mut flags = Vec::new();
    if m.already_dismissed {
        flags.push("dismissed");
    }
    if m.already_explored {
        flags.push("explored");
    }
    println!(
        "{:.1}  {:<24} via {} '{}' [{}] {}",
        m.match_score,
        m.prompt_id(),
        m.match_kind,
        m.matched_term,
        m.prompt.priority,
        flags.join(",")
    );
}

fn print_log_outcome(matches: &[PromptMatch], state: &LearningPromptDisplayState) {
    println!("{} candidate(s):", matches.len());
    for m in matches {
        print_match(m);
    }
    match (&state.prompt, state.mode) {
        (Some(prompt), Some(mode)) => {
            println!("\nShowing {} as {}:", prompt.id, mode);
            println!("  {}", prompt.title);
            println!("  {}", prompt.teaser);
            if let Some(section) = state.current_section.as_deref().and_then(|id| prompt.section(id)) {
                println!("\n  {} ({})\n  {}", section.title, section.kind, section.body);
            }
        }
        _ => println!("\nNo prompt shown."),
    }
    if !state.interactions.is_empty() {
        println!("\nInteractions:");
        for entry in &state.interactions {
            println!(
                "  {} {} {}{}",
                entry.timestamp.format("%H:%M:%S"),
                entry.prompt_id,
                entry.action,
                entry.detail.as_deref().map(|d| format!(" ({})", d)).unwrap_or_default()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action() {
        assert_eq!(parse_action("expand").unwrap(), DisplayAction::Expand);
        assert_eq!(
            parse_action("explore:care").unwrap(),
            DisplayAction::ExploreSection { section_id: "care".to_string() }
        );
        assert_eq!(
            parse_action("dismiss:not-now").unwrap(),
            DisplayAction::Dismiss { reason: Some("not-now".to_string()), show_again_after: None }
        );
        assert_eq!(parse_action("dismiss").unwrap(), DisplayAction::dismiss());
        assert!(parse_action("explore").is_err());
        assert!(parse_action("shout").is_err());
    }

    #[test]
    fn test_snooze_until() {
        use chrono::TimeZone;
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        assert_eq!(snooze_until(now, 3).unwrap(), now + Duration::days(3));
        assert_eq!(snooze_until(now, 0).unwrap(), now);
        assert!(snooze_until(now, -1).is_err());
        assert!(snooze_until(now, 9_999_999_999_999).is_err());
        assert!(snooze_until(now, i64::MAX).is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
