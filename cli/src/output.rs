//! Output formatting

use clap::ValueEnum;
use colored::Colorize;
use javer_client::{FieldGroup, FormId, Surface, Tone, UiFeedbackState};
use serde::Serialize;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn print<T: Serialize>(&self, data: &T) {
        match self {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(data).unwrap_or_default());
            }
            OutputFormat::Yaml => {
                println!("---\n{}", serde_yaml::to_string(data).unwrap_or_default());
            }
            OutputFormat::Text => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
        }
    }
}

#[derive(Serialize)]
struct FeedbackLine<'a> {
    area: &'static str,
    #[serde(flatten)]
    state: &'a UiFeedbackState,
}

/// Terminal rendition of the page: feedback areas become output lines,
/// everything else is logged.
pub struct TerminalSurface {
    format: OutputFormat,
}

impl TerminalSurface {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl Surface for TerminalSurface {
    fn render(&mut self, form: FormId, state: &UiFeedbackState) {
        // Cleared areas have nothing to show
        if !state.visible {
            return;
        }
        match self.format {
            OutputFormat::Text => match state.tone {
                Tone::Success => println!("{}", state.text.as_str().green()),
                Tone::Error => eprintln!("{}", state.text.as_str().red()),
                Tone::Neutral => println!("{}", state.text),
            },
            format => format.print(&FeedbackLine {
                area: form.feedback_id(),
                state,
            }),
        }
    }

    fn reset_form(&mut self, form: FormId) {
        tracing::debug!(%form, "form reset");
    }

    fn set_modal_visible(&mut self, modal: &str, visible: bool) {
        tracing::debug!(modal, visible, "modal");
    }

    fn set_group_visible(&mut self, group: FieldGroup, visible: bool) {
        tracing::debug!(group = group.id(), visible, "field group");
    }

    fn navigate(&mut self, view: &str) {
        match self.format {
            OutputFormat::Text => println!("{} {}", "→".bold(), view.bold()),
            format => format.print(&serde_json::json!({ "navigate": view })),
        }
    }

    fn render_portal(&mut self, documento: Option<&str>) {
        match (self.format, documento) {
            (OutputFormat::Text, Some(documento)) => {
                println!("{} {}", "Investidor:".bold(), documento)
            }
            (OutputFormat::Text, None) => println!("{}", "Sessão sem investidor.".yellow()),
            (format, documento) => format.print(&serde_json::json!({ "investidor": documento })),
        }
    }
}
