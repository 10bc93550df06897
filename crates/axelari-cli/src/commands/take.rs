//! The `axelari take` command.
//!
//! Runs one section attempt on the terminal. Input lines and timer events are
//! multiplexed so the countdown keeps running while the prompt waits.

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use axelari_core::error::AssessmentError;
use axelari_core::session::CompletionOutcome;
use axelari_core::timer::format_mmss;
use axelari_core::{AssessmentEngine, AssessmentSession, CompletionTrigger, EngineConfig};

use super::{ConsoleNotifier, Paths, Workspace};

enum Step {
    Continue,
    Quit,
    Completed(CompletionOutcome),
}

pub async fn execute(paths: &Paths, section_id: u32) -> Result<()> {
    let workspace = Workspace::load(paths)?;
    let session = workspace.open_session(Arc::new(ConsoleNotifier))?;
    let mut engine = AssessmentEngine::new(session, EngineConfig::default());

    let duration = engine.start_section(section_id)?.duration_secs();
    let name = engine
        .session()
        .section(section_id)
        .map(|s| s.name.clone())
        .unwrap_or_default();
    println!(
        "{name}: {} question(s), {} on the clock",
        engine.session().active_questions().len(),
        format_mmss(duration)
    );
    println!("Commands: <number> answer, n next, p previous, t time, s submit, q quit");
    print_question(engine.session());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let outcome = loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    engine.cancel_section();
                    break None;
                };
                match handle_input(&mut engine, line.trim()) {
                    Step::Continue => {}
                    Step::Quit => {
                        engine.cancel_section();
                        break None;
                    }
                    Step::Completed(outcome) => break Some(outcome),
                }
            }
            Some(event) = engine.next_timer_event() => {
                if let Some(outcome) = engine.handle_timer_event(event) {
                    break Some(outcome);
                }
            }
        }
    };

    let session = engine.into_session();
    workspace.save_session(&session)?;

    match outcome {
        Some(outcome) => print_outcome(&outcome),
        None => println!("\nAttempt stopped. Your progress was saved; start again any time."),
    }
    Ok(())
}

fn handle_input(engine: &mut AssessmentEngine, input: &str) -> Step {
    match input {
        "" => {}
        "q" => return Step::Quit,
        "n" => match engine.next_question() {
            Ok(_) => print_question(engine.session()),
            Err(e) => report_rejected(&e),
        },
        "p" => match engine.previous_question() {
            Ok(_) => print_question(engine.session()),
            Err(e) => report_rejected(&e),
        },
        "t" => {
            if let Some(attempt) = engine.session().active() {
                println!("{} left", format_mmss(attempt.remaining_secs()));
            }
        }
        "s" => match engine.submit_section() {
            Ok(Some(outcome)) => return Step::Completed(outcome),
            Ok(None) => {}
            Err(e) => report_rejected(&e),
        },
        other => match other.parse::<usize>() {
            Ok(choice) if choice >= 1 => select_option(engine, choice - 1),
            _ => println!("Unknown command: {other}"),
        },
    }
    Step::Continue
}

/// Unavailable actions are hints on the prompt; bad references are errors.
fn report_rejected(e: &AssessmentError) {
    if e.is_affordance() {
        println!("{e}");
    } else {
        eprintln!("Error: {e}");
    }
}

fn select_option(engine: &mut AssessmentEngine, index: usize) {
    let Some(question_id) = engine.session().current_question().map(|q| q.id) else {
        println!("There is no question to answer.");
        return;
    };
    if let Err(e) = engine.answer_option(question_id, index) {
        report_rejected(&e);
        return;
    }
    if engine.session().can_submit() {
        println!("Answer recorded. Press s to submit.");
    } else {
        println!("Answer recorded. Press n for the next question.");
    }
}

fn print_question(session: &AssessmentSession) {
    let Some(attempt) = session.active() else {
        return;
    };
    let Some(question) = session.current_question() else {
        println!("\nThis section has no questions. Press s to submit.");
        return;
    };

    println!(
        "\nQuestion {}/{} [{} left]",
        attempt.cursor() + 1,
        session.active_questions().len(),
        format_mmss(attempt.remaining_secs())
    );
    println!("{}", question.text);
    let selected = attempt.answers().get(question.id);
    for (i, option) in question.options.iter().enumerate() {
        let mark = if selected == Some(option.weight) { "x" } else { " " };
        println!("  [{mark}] {}. {}", i + 1, option.text);
    }
}

fn print_outcome(outcome: &CompletionOutcome) {
    let heading = match outcome.trigger {
        CompletionTrigger::Submitted => "Section submitted.",
        CompletionTrigger::TimeExpired => "Time is up. Your answers were submitted.",
    };
    println!("\n{heading}");
    println!("Score: {}%", outcome.result.score);
    for d in &outcome.result.dimensions {
        println!("  {}: {}%", d.name, d.score);
    }
    if let Some(reliability) = &outcome.result.reliability {
        println!(
            "Reliability: alpha {:.2}, interval {}-{}",
            reliability.cronbach_alpha,
            reliability.confidence_interval[0],
            reliability.confidence_interval[1]
        );
    }
}
