use super::render;
use anyhow::Result;
use colored::Colorize;
use devreon_estimator::config;
use devreon_estimator::error::AppError;
use devreon_estimator::pricing::{format_rupees, Estimate, TimelineAdjustment};
use devreon_estimator::providers::{build_provider, ReasoningProvider};
use devreon_estimator::session::{EstimatorSession, NextOutcome, StepKind};
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    ProjectType,
    Feature,
    Timeline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Next,
    Previous,
    Quit,
    Help,
    /// 1-based option on the current step
    Pick(usize),
    /// 1-based option in a named group, usable from any step
    Edit(Group, usize),
    Unknown,
}

fn parse_input(line: &str) -> Input {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Input::Next;
    };
    let second = words.next();

    match (first.to_lowercase().as_str(), second) {
        ("n" | "next", None) => Input::Next,
        ("p" | "prev" | "back", None) => Input::Previous,
        ("q" | "quit" | "exit", None) => Input::Quit,
        ("?" | "h" | "help", None) => Input::Help,
        (word, Some(arg)) => {
            let group = match word {
                "project" => Group::ProjectType,
                "feature" => Group::Feature,
                "timeline" => Group::Timeline,
                _ => return Input::Unknown,
            };
            match arg.parse::<usize>() {
                Ok(n) if n > 0 => Input::Edit(group, n),
                _ => Input::Unknown,
            }
        }
        (word, None) => match word.parse::<usize>() {
            Ok(n) if n > 0 => Input::Pick(n),
            _ => Input::Unknown,
        },
    }
}

/// Execute the wizard command
pub async fn execute(config_path: &Path, offline: bool) -> Result<()> {
    let cfg = config::load_config(config_path)?;
    let provider = build_provider(&cfg.gemini, offline);
    let mut session = EstimatorSession::new(cfg.catalog);

    println!("{}", "AI Project Cost Estimator".green().bold());
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print_step(&session);
        print!("{} ", ">".cyan());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_input(&line) {
            Input::Quit => break,
            Input::Help => print_help(),
            Input::Previous => {
                session.previous();
            }
            Input::Next => {
                if session.next() == NextOutcome::Calculate {
                    get_estimate(&mut session, provider.as_ref()).await?;
                }
            }
            Input::Pick(n) => {
                let group = match session.step_kind() {
                    StepKind::ProjectType => Group::ProjectType,
                    StepKind::Features => Group::Feature,
                    StepKind::Timeline => Group::Timeline,
                    StepKind::Result => {
                        println!("  Use 'project N', 'feature N' or 'timeline N' to edit.");
                        continue;
                    }
                };
                edit(&mut session, group, n).await?;
            }
            Input::Edit(group, n) => edit(&mut session, group, n).await?,
            Input::Unknown => println!("  {}", "Unrecognized input, type 'help'".red()),
        }
    }

    Ok(())
}

async fn get_estimate(
    session: &mut EstimatorSession,
    provider: &dyn ReasoningProvider,
) -> std::io::Result<()> {
    render::run_estimate(session, provider).await;
    println!();
    render::show_figures(session, true).await?;
    if let Some(reasoning) = session.reasoning() {
        render::print_reasoning(reasoning);
    }
    Ok(())
}

async fn edit(session: &mut EstimatorSession, group: Group, n: usize) -> std::io::Result<()> {
    match apply_edit(session, group, n) {
        Ok(Some(_)) => {
            println!("  {}", "Figures updated".yellow());
            render::show_figures(session, true).await?;
        }
        Ok(None) => {}
        Err(e) => println!("  {}", e.to_string().red()),
    }
    Ok(())
}

fn apply_edit(
    session: &mut EstimatorSession,
    group: Group,
    n: usize,
) -> Result<Option<Estimate>, AppError> {
    let catalog = session.catalog();
    let out_of_range = || AppError::UnknownOption {
        group: match group {
            Group::ProjectType => "project type",
            Group::Feature => "feature",
            Group::Timeline => "timeline",
        },
        id: format!("#{}", n),
    };

    match group {
        Group::ProjectType => {
            let id = catalog.project_types.get(n - 1).ok_or_else(out_of_range)?.id.clone();
            session.select_project_type(&id)
        }
        Group::Feature => {
            let id = catalog.features.get(n - 1).ok_or_else(out_of_range)?.id.clone();
            session.toggle_feature(&id)
        }
        Group::Timeline => {
            let id = catalog.timelines.get(n - 1).ok_or_else(out_of_range)?.id.clone();
            session.select_timeline(&id)
        }
    }
}

fn print_help() {
    println!("  Enter an option number to choose it, 'n' (or Enter) for next, 'p' for back, 'q' to quit.");
    println!("  From any step: 'project N', 'feature N', 'timeline N'.");
    println!();
}

fn print_step(session: &EstimatorSession) {
    let dots: String = (1..=session.total_steps())
        .map(|i| if session.step_reached(i) { '●' } else { '○' })
        .collect();
    println!();
    println!(
        "{}  Step {}/{}: {}",
        dots,
        session.current_step(),
        session.total_steps(),
        session.step_kind().title().bold()
    );

    let catalog = session.catalog();
    let selection = session.selection();
    let mark = |on: bool| if on { "[x]" } else { "[ ]" };

    match session.step_kind() {
        StepKind::ProjectType => {
            for (i, p) in catalog.project_types.iter().enumerate() {
                let on = selection.project_type.as_ref().is_some_and(|s| s.id == p.id);
                println!("  {} {}. {:<24} {}", mark(on), i + 1, p.label, format_rupees(p.cost));
            }
        }
        StepKind::Features => {
            for (i, f) in catalog.features.iter().enumerate() {
                let on = selection.features.iter().any(|s| s.id == f.id);
                println!("  {} {}. {:<24} +{}", mark(on), i + 1, f.label, format_rupees(f.cost));
            }
        }
        StepKind::Timeline => {
            for (i, t) in catalog.timelines.iter().enumerate() {
                let on = selection.timeline.as_ref().is_some_and(|s| s.id == t.id);
                println!(
                    "  {} {}. {:<24} {}",
                    mark(on),
                    i + 1,
                    t.label,
                    TimelineAdjustment::from_multiplier(t.multiplier)
                );
            }
        }
        StepKind::Result => {
            println!("  Project:  {}", selection.project_type_name());
            let features = selection.feature_names();
            println!(
                "  Features: {}",
                if features.is_empty() {
                    "None selected".to_string()
                } else {
                    features.join(", ")
                }
            );
            println!("  Timeline: {}", selection.timeline_name());
        }
    }

    let back = if session.previous_enabled() { "Back" } else { "-" };
    println!("  [{}] [{}]", back, session.next_label());
}
