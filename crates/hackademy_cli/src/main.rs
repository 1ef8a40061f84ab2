//! Headless host for the Hackademy editor engine and mentor.

mod replay;
mod script;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use hackademy_core::suggest::suggest;
use hackademy_core::{Config, Curriculum, EditorFrame, StageId, StageProvider, Vocabulary};
use hackademy_mentor::{
    spawn_mentor, ChatMessage, GeminiClient, MentorCmd, MentorConfig, MentorEvent,
};
use replay::ReplayReport;
use serde_json::json;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hackademy", about = "Hackademy editor engine CLI", version)]
struct Cli {
    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List curriculum stages
    Stages,
    /// Show completions for a partial word
    Suggest { word: String },
    /// Run a keystroke script against a stage's starting code
    Replay {
        /// Stage id (e.g. intro, css-styling); empty buffer when omitted
        #[arg(short, long)]
        stage: Option<StageId>,
        /// Script file; stdin when omitted
        #[arg(long)]
        script: Option<PathBuf>,
        /// Print a frame after every step and log every editor event
        /// (also enabled by HACKADEMY_TRACE_SESSION)
        #[arg(long)]
        trace: bool,
    },
    /// Ask the mentor to review code for a stage's mission
    Review {
        #[arg(short, long)]
        stage: StageId,
        /// Code file; stdin when omitted
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Ask the mentor a question about a stage
    Ask {
        #[arg(short, long)]
        stage: StageId,
        /// Code file; the stage's starting code when omitted
        #[arg(short, long)]
        file: Option<PathBuf>,
        question: String,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("hackademy=warn,hackademy_cli=info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn format_stages(curriculum: &Curriculum, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(curriculum.stages())?);
    }
    let lines: Vec<String> = curriculum
        .stages()
        .iter()
        .enumerate()
        .map(|(i, stage)| format!("{}. {:<12} {}", i + 1, stage.id, stage.title))
        .collect();
    Ok(lines.join("\n"))
}

fn format_suggestions(word: &str, vocabulary: &Vocabulary, json: bool) -> Result<String> {
    let found = suggest(word, vocabulary);
    if json {
        return Ok(serde_json::to_string_pretty(&found)?);
    }
    if found.is_empty() {
        return Ok(format!("No suggestions for {:?}", word));
    }
    let lines: Vec<String> = found
        .iter()
        .map(|entry| format!("{:<16} {}", entry.token(), entry.category().as_str()))
        .collect();
    Ok(lines.join("\n"))
}

/// Buffer with `|` at the caret.
fn render_frame(frame: &EditorFrame) -> String {
    let text = frame.buffer.text();
    let caret = text
        .char_indices()
        .nth(frame.cursor)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len());
    let mut out = format!(
        "revision {} | cursor {} | lines {} | {:?}{}\n",
        frame.revision,
        frame.cursor,
        frame.line_count,
        frame.mode,
        if frame.focused { "" } else { " | unfocused" }
    );
    if let Some(popup) = &frame.popup {
        let entries: Vec<String> = popup
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                if i == popup.active {
                    format!("[{}]", entry)
                } else {
                    entry.clone()
                }
            })
            .collect();
        out.push_str(&format!(
            "popup at ({:.1}, {:.1}): {}\n",
            popup.anchor.top,
            popup.anchor.left,
            entries.join(" ")
        ));
    }
    out.push_str("---\n");
    out.push_str(&text[..caret]);
    out.push('|');
    out.push_str(&text[caret..]);
    out.push_str("\n---");
    out
}

fn format_replay(report: &ReplayReport, json: bool) -> Result<String> {
    if json {
        let value = json!({
            "frames": report.frames,
            "stage": report.stage,
            "solved": report.solved,
            "reviews_requested": report.reviews.len(),
        });
        return Ok(serde_json::to_string_pretty(&value)?);
    }
    let mut sections: Vec<String> = report.frames.iter().map(render_frame).collect();
    if let Some(stage) = report.stage {
        sections.push(format!(
            "stage {}: {}{}",
            stage,
            if report.solved { "solved" } else { "not solved" },
            match report.reviews.len() {
                0 => String::new(),
                n => format!(" ({} review request(s))", n),
            }
        ));
    }
    Ok(sections.join("\n"))
}

/// `--trace` forces tracing on; otherwise the environment setting stands.
fn replay_config(mut config: Config, trace: bool) -> Config {
    config.trace_session |= trace;
    config
}

fn mentor_reply(cmd: MentorCmd, config: MentorConfig) -> Result<(String, bool)> {
    let wait = config.timeout + Duration::from_secs(5);
    let mentor = spawn_mentor(GeminiClient::new(config)?);
    mentor.cmd_tx.send(cmd).context("mentor worker stopped")?;
    match mentor
        .evt_rx
        .recv_timeout(wait)
        .context("no reply from mentor worker")?
    {
        MentorEvent::Reply { text, degraded, .. } => Ok((text, degraded)),
    }
}

fn main() -> Result<()> {
    init_tracing();
    let Cli { json, command } = Cli::parse();
    let curriculum = Curriculum::builtin();

    match command {
        Commands::Stages => println!("{}", format_stages(&curriculum, json)?),
        Commands::Suggest { word } => {
            println!("{}", format_suggestions(&word, &Vocabulary::builtin(), json)?)
        }
        Commands::Replay {
            stage,
            script,
            trace,
        } => {
            let source = read_input(script.as_deref())?;
            let steps = script::parse_script(&source)?;
            let config = replay_config(Config::from_env(), trace);
            let report = replay::run(stage, &steps, &config, config.trace_session)?;
            println!("{}", format_replay(&report, json)?);
        }
        Commands::Review { stage, file } => {
            let stage = curriculum.get(stage)?;
            let code = read_input(file.as_deref())?;
            if !stage.validate(&code) {
                tracing::warn!(stage = %stage.id, "code does not pass the stage check yet");
            }
            let (text, degraded) = mentor_reply(
                MentorCmd::Review {
                    epoch: 0,
                    code,
                    mission: stage.mission.to_string(),
                },
                MentorConfig::from_env(),
            )?;
            print_reply(&text, degraded, json)?;
        }
        Commands::Ask {
            stage,
            file,
            question,
        } => {
            let stage = curriculum.get(stage)?;
            let code = match file {
                Some(path) => read_input(Some(&path))?,
                None => stage.initial_code.to_string(),
            };
            if question.trim().is_empty() {
                bail!("question is empty");
            }
            let (text, degraded) = mentor_reply(
                MentorCmd::Chat {
                    epoch: 0,
                    history: vec![ChatMessage::user(question)],
                    code,
                    stage: stage.id.to_string(),
                },
                MentorConfig::from_env(),
            )?;
            print_reply(&text, degraded, json)?;
        }
    }
    Ok(())
}

fn print_reply(text: &str, degraded: bool, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "reply": text, "degraded": degraded }))?
        );
    } else {
        println!("{}", text);
    }
    Ok(())
}
