//! Implements InputPort. Inquire-based interactive chat, batch runner and tone browser.

use crate::adapters::persistence::{read_comments, write_results};
use crate::adapters::ui::stats::SessionStats;
use crate::domain::{DomainError, ReplyResult, Tone};
use crate::ports::InputPort;
use crate::usecases::ReplyService;
use async_trait::async_trait;
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::ui::{Color, RenderConfig, StyleSheet, Styled};
use inquire::{InquireError, Select, Text};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

const MENU_CHAT: &str = "💬 Chat";
const MENU_BATCH: &str = "📄 Batch from CSV";
const MENU_TONES: &str = "🎭 Browse tones";
const MENU_SETTINGS: &str = "⚙️  Settings";
const MENU_EXIT: &str = "🚪 Exit";

const TONE_AUTO: &str = "Auto";

const CMD_BACK: &str = "/back";
const CMD_STATS: &str = "/stats";
const CMD_CLEAR: &str = "/clear";

/// Applies the prompt theme for all subsequent inquire prompts.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("✦").with_fg(Color::LightMagenta))
        .with_highlighted_option_prefix(Styled::new("➤").with_fg(Color::LightYellow))
        .with_help_message(StyleSheet::new().with_fg(Color::DarkGrey));
    inquire::set_global_render_config(config);
}

/// Esc / Ctrl-C on a prompt means "go back", not failure.
fn is_cancel(e: &InquireError) -> bool {
    matches!(
        e,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

fn ui_err(e: InquireError) -> DomainError {
    DomainError::Ui(e.to_string())
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.magenta} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Menu labels for the tone picker: Auto, then every tone.
fn tone_options() -> Vec<String> {
    std::iter::once(TONE_AUTO.to_string())
        .chain(Tone::ALL.into_iter().map(Tone::title))
        .collect()
}

/// Map a picker label to an override. `Auto` means none.
fn tone_override_from_choice(choice: &str) -> Option<String> {
    if choice == TONE_AUTO {
        None
    } else {
        Some(choice.to_lowercase())
    }
}

/// One rendered assistant message: reply (or labelled error) plus metadata line.
fn render_reply(result: &ReplyResult, timestamp: &str) -> String {
    let sentiment = result
        .sentiment_detected
        .map(|s| s.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let tone = result
        .tone_used
        .map(|t| t.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let (icon, body) = match result.outcome() {
        Ok(reply) => ("✅", reply.to_string()),
        Err(error) => ("❌", format!("Error generating reply: {}", error)),
    };
    format!(
        "🤖 {}\n   {} Sentiment: {} | Tone: {} | {}",
        body, icon, sentiment, tone, timestamp
    )
}

fn print_tones() {
    for tone in Tone::ALL {
        let profile = tone.profile();
        let example = tone.example();
        println!("── {} ──", tone.title());
        println!("  {}", profile.description);
        println!("  Style: {}", profile.style);
        println!("  Focus: {}", profile.focus);
        println!("  Example comment: \"{}\"", example.comment);
        println!("  Example reply:   \"{}\"", example.reply);
        println!();
    }
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    reply_service: Arc<ReplyService>,
}

impl TuiInputPort {
    pub fn new(reply_service: Arc<ReplyService>) -> Self {
        Self { reply_service }
    }

    async fn run_chat(&self, stats: &mut SessionStats) -> Result<(), DomainError> {
        println!(
            "Type a comment to get a reply. {} shows stats, {} resets them, {} returns to the menu.",
            CMD_STATS, CMD_CLEAR, CMD_BACK
        );
        loop {
            let input = match Text::new("Comment:")
                .with_placeholder("I'm struggling to believe this applies to me...")
                .prompt()
            {
                Ok(s) => s,
                Err(e) if is_cancel(&e) => return Ok(()),
                Err(e) => return Err(ui_err(e)),
            };
            let comment = input.trim();
            match comment {
                "" => {
                    println!("Please enter a comment.");
                    continue;
                }
                CMD_BACK => return Ok(()),
                CMD_STATS => {
                    print!("{}", stats);
                    continue;
                }
                CMD_CLEAR => {
                    stats.reset();
                    println!("Conversation stats cleared.");
                    continue;
                }
                _ => {}
            }

            let choice = match Select::new("Tone", tone_options()).prompt() {
                Ok(c) => c,
                Err(e) if is_cancel(&e) => continue,
                Err(e) => return Err(ui_err(e)),
            };
            let tone_override = tone_override_from_choice(&choice);

            let pb = spinner("Generating response...".to_string());
            let result = self
                .reply_service
                .generate_reply(comment, tone_override.as_deref(), None)
                .await;
            pb.finish_and_clear();

            stats.record(&result);
            let timestamp = Local::now().format("%H:%M:%S").to_string();
            println!("{}\n", render_reply(&result, &timestamp));
        }
    }

    async fn run_batch(&self) -> Result<(), DomainError> {
        let input_path = match Text::new("Input CSV (columns: comment[,tone]):")
            .with_default("comments.csv")
            .prompt()
        {
            Ok(p) => PathBuf::from(p.trim()),
            Err(e) if is_cancel(&e) => return Ok(()),
            Err(e) => return Err(ui_err(e)),
        };
        let output_path = match Text::new("Output CSV:").with_default("replies.csv").prompt() {
            Ok(p) => PathBuf::from(p.trim()),
            Err(e) if is_cancel(&e) => return Ok(()),
            Err(e) => return Err(ui_err(e)),
        };

        let input = match read_comments(&input_path) {
            Ok(input) => input,
            Err(e) => {
                println!("❌ {}", e);
                return Ok(());
            }
        };
        if input.comments.is_empty() {
            println!("No comments found in {}.", input_path.display());
            return Ok(());
        }

        let pb = spinner(format!("Generating {} replies...", input.comments.len()));
        let results = self
            .reply_service
            .generate_many(&input.comments, &input.overrides)
            .await;
        pb.finish_and_clear();

        let succeeded = results.iter().filter(|r| r.success).count();
        if let Err(e) = write_results(&output_path, &input.comments, &results) {
            println!("❌ {}", e);
            return Ok(());
        }
        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            succeeded,
            total = results.len(),
            "batch run finished"
        );
        println!(
            "✅ {}/{} replies generated. Results written to {}",
            succeeded,
            results.len(),
            output_path.display()
        );
        Ok(())
    }

    fn print_settings(&self) {
        let cfg = self.reply_service.config();
        println!("Model:       {}", cfg.model);
        println!("Max tokens:  {}", cfg.max_tokens);
        println!("Temperature: {}", cfg.temperature);
        println!("Top P:       {}", cfg.top_p);
        println!("Endpoint:    {}", cfg.api_url);
        println!();
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let mut stats = SessionStats::default();
        let options = vec![MENU_CHAT, MENU_BATCH, MENU_TONES, MENU_SETTINGS, MENU_EXIT];
        loop {
            let choice = match Select::new("What would you like to do?", options.clone()).prompt()
            {
                Ok(c) => c,
                Err(e) if is_cancel(&e) => return Ok(()),
                Err(e) => return Err(ui_err(e)),
            };
            match choice {
                MENU_CHAT => self.run_chat(&mut stats).await?,
                MENU_BATCH => self.run_batch().await?,
                MENU_TONES => print_tones(),
                MENU_SETTINGS => self.print_settings(),
                _ => return Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sentiment;

    #[test]
    fn test_tone_options() {
        let options = tone_options();
        assert_eq!(options.len(), 6);
        assert_eq!(options[0], "Auto");
        assert_eq!(options[5], "Witty");
    }

    #[test]
    fn test_tone_override_from_choice() {
        assert_eq!(tone_override_from_choice("Auto"), None);
        assert_eq!(
            tone_override_from_choice("Empathetic").as_deref(),
            Some("empathetic")
        );
    }

    #[test]
    fn test_render_success() {
        let result = ReplyResult::replied("Grace upon grace.".into(), Sentiment::Positive, Tone::Humble);
        let shown = render_reply(&result, "10:00:00");
        assert!(shown.contains("Grace upon grace."));
        assert!(shown.contains("✅ Sentiment: positive | Tone: humble | 10:00:00"));
    }

    #[test]
    fn test_render_failure_is_labelled() {
        let result = ReplyResult::failed("Rate limited: quota".into(), None, None);
        let shown = render_reply(&result, "10:00:00");
        assert!(shown.contains("Error generating reply: Rate limited: quota"));
        assert!(shown.contains("❌ Sentiment: N/A | Tone: N/A"));
    }
}
