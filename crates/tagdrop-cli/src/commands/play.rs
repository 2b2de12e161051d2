//! The `tagdrop play` command.
//!
//! Runs one quiz session as a line-oriented loop on stdin: each line is a
//! placement intent, and the board is redrawn on demand. Progress and load
//! diagnostics go to stderr so stdout stays the board itself.

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use tagdrop_core::error::LoadError;
use tagdrop_core::grading::GradeResult;
use tagdrop_core::parser;
use tagdrop_core::session::QuizSession;
use tagdrop_core::state::Area;
use tagdrop_render::text;
use tagdrop_sources::config::{load_config_from, FetchConfig};
use tagdrop_sources::source_for;

pub async fn execute(
    quiz_path: PathBuf,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let manifest = parser::parse_manifest(&quiz_path)?;
    let seed = seed.or(config.play.seed);

    let mut session = if manifest.source_url.is_some() {
        match seed {
            Some(seed) => QuizSession::pending_seeded(
                &manifest.id,
                Some(manifest.question.clone()),
                manifest.image.clone(),
                seed,
            ),
            None => QuizSession::pending(
                &manifest.id,
                Some(manifest.question.clone()),
                manifest.image.clone(),
            ),
        }
    } else {
        let quiz = manifest.to_quiz()?;
        match seed {
            Some(seed) => QuizSession::seeded(quiz, seed),
            None => QuizSession::new(quiz),
        }
    };

    if let Some(url) = &manifest.source_url {
        fetch_into(&mut session, url, &config.fetch).await?;
    }

    println!("{}", text::render_board(&session));
    println!("Type \"help\" for commands.");

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read input")?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let (command, rest) = match input.split_once(' ') {
            Some((c, r)) => (c, r.trim()),
            None => (input, ""),
        };

        match command {
            "move" | "toggle" => {
                if rest.is_empty() {
                    println!("Usage: move <label>");
                    continue;
                }
                match session.toggle(rest) {
                    Ok(area) => println!("Moved \"{rest}\" to the {area}."),
                    Err(e) => println!("{e}"),
                }
            }
            "put" => match rest.split_once(' ') {
                Some((area, label)) if !label.trim().is_empty() => {
                    let label = label.trim();
                    match area.parse::<Area>() {
                        Ok(area) => match session.move_tag(label, area) {
                            Ok(()) => println!("Moved \"{label}\" to the {area}."),
                            Err(e) => println!("{e}"),
                        },
                        Err(e) => println!("{e}"),
                    }
                }
                _ => println!("Usage: put <pool|answer> <label>"),
            },
            "grade" | "check" => match session.grade() {
                Ok(result) => {
                    print!("{}", text::render_feedback(&result, &session));
                    print_summary(&result);
                    if result.all_correct && config.play.celebrate {
                        println!("{}", text::CELEBRATION);
                    }
                }
                Err(e) => println!("{e}"),
            },
            "feedback" => match session.last_grade() {
                Some(result) => print!("{}", text::render_feedback(result, &session)),
                None => println!("Nothing graded yet."),
            },
            "reset" => {
                session.reset();
                if config.play.reshuffle_on_reset {
                    // A failed-load session has nothing to shuffle.
                    let _ = session.shuffle();
                }
                println!("{}", text::render_board(&session));
            }
            "shuffle" => match session.shuffle() {
                Ok(()) => println!("{}", text::render_board(&session)),
                Err(e) => println!("{e}"),
            },
            "board" | "show" => println!("{}", text::render_board(&session)),
            "retry" | "reload" => match &manifest.source_url {
                Some(url) => {
                    fetch_into(&mut session, url, &config.fetch).await?;
                    println!("{}", text::render_board(&session));
                }
                None => println!("This quiz has no source_url to reload from."),
            },
            "help" => print_help(),
            "quit" | "exit" | "q" => break,
            other => println!("Unknown command: {other} (try \"help\")"),
        }
    }

    Ok(())
}

/// Fetch the quiz's tag document and install it, reporting on stderr.
///
/// A failed load is reported but not fatal: the session keeps its previous
/// state (or stays failed) and the loop remains usable for `retry`.
async fn fetch_into(
    session: &mut QuizSession,
    url: &str,
    fetch: &FetchConfig,
) -> Result<()> {
    let source = source_for(url, fetch)?;
    eprintln!("Fetching tags from {}...", source.describe());
    match session.load_from(source.as_ref()).await {
        Ok(count) => eprintln!("Loaded {count} tags."),
        Err(e) => {
            eprintln!("Load failed: {e}");
            if let LoadError::Source(src) = &e {
                if src.is_transient() {
                    eprintln!("The source looks temporarily unavailable; try \"retry\".");
                }
            }
        }
    }
    Ok(())
}

fn print_summary(result: &GradeResult) {
    let mut table = Table::new();
    table.set_header(vec!["Placed", "Correct", "Incorrect", "Verdict"]);
    table.add_row(vec![
        Cell::new(result.outcomes.len()),
        Cell::new(result.correct_count()),
        Cell::new(result.incorrect_count()),
        Cell::new(if result.all_correct {
            "all correct"
        } else {
            "keep trying"
        }),
    ]);
    println!("{table}");
}

fn print_help() {
    println!("Commands:");
    println!("  move <label>               move a tag to the opposite area");
    println!("  put <pool|answer> <label>  place a tag in a specific area");
    println!("  grade                      check the current placement");
    println!("  feedback                   reprint feedback for the last grading");
    println!("  reset                      return every tag to the pool");
    println!("  shuffle                    reshuffle the pool order");
    println!("  board                      redraw the board");
    println!("  retry                      fetch the tag document again");
    println!("  quit                       leave the quiz");
}
