//! Terminal presentation of render outcomes.

use std::fmt::Write;

use crate::card::Card;
use crate::state::ViewKind;
use crate::view::RenderOutcome;
use crate::{ClientError, Result};

fn heading(view: ViewKind) -> &'static str {
    match view {
        ViewKind::Trending => "Trending now",
        ViewKind::Search => "Recommendations",
    }
}

/// Human-readable rendering: a heading, then one block per card or the
/// status message.
pub fn text(outcome: &RenderOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", heading(outcome.view()));

    if let Some(message) = outcome.message() {
        let prefix = match outcome {
            RenderOutcome::Error { .. } => "Error: ",
            _ => "",
        };
        let _ = writeln!(out, "{}{}", prefix, message);
        return out;
    }

    for card in outcome.cards() {
        out.push('\n');
        write_card(&mut out, card);
    }
    out
}

fn write_card(out: &mut String, card: &Card) {
    let _ = writeln!(out, "{}. {} {}", card.index + 1, card.badge.icon.glyph(), card.badge.label);
    let _ = writeln!(out, "   {}", card.title);
    let _ = writeln!(out, "   Genre: {} | Year: {}", card.genre, card.year);
    if let Some(director) = &card.director {
        let _ = writeln!(out, "   Director: {}", director);
    }
    let _ = writeln!(out, "   Image: {}", card.image_src());
    if let Some(link) = &card.link {
        let _ = writeln!(out, "   Link: {}", link.href);
    }
}

/// One line per card:
/// `1. Title | genre | Year: 1999 | Score: 0.812 [Source: vector]`.
pub fn compact(outcome: &RenderOutcome) -> String {
    if let Some(message) = outcome.message() {
        return format!("{}\n", message);
    }

    let mut out = String::new();
    for card in outcome.cards() {
        let score = card
            .score
            .map(|score| format!(" | Score: {:.3}", score))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{}. {} | {} | Year: {}{} [Source: {}]",
            card.index + 1,
            card.title,
            card.genre,
            card.year,
            score,
            card.source
        );
    }
    out
}

/// Pretty-printed JSON of the whole outcome.
pub fn json(outcome: &RenderOutcome) -> Result<String> {
    serde_json::to_string_pretty(outcome).map_err(|e| ClientError::Other(e.to_string()))
}

/// One-line health report. A failed check is shown, not propagated.
pub fn health(base_url: &str, result: &Result<String>) -> String {
    match result {
        Ok(message) => format!("{}: {}", base_url, message),
        Err(e) => format!("Error: {}", e),
    }
}
