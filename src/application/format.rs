//! Report rendering for the delivery channel (Telegram-flavoured HTML).
//!
//! The formatter is deterministic: identical input, mode and options
//! always produce byte-identical text. The report date is an explicit
//! option rather than the wall clock, and ranking is taken as given;
//! Top-N only truncates, it never re-orders.

use chrono::NaiveDate;

use crate::domain::entities::consolidated_match::{ConsolidatedMatch, SourcePrediction};

const RULE_HEAVY: &str = "══════════════════════════════════════════════════";
const RULE_LIGHT: &str = "──────────────────────────────────────────────────";

/// Which report layout to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// Every ranked match, capped at [`ReportOptions::max_records`].
    Full,
    /// Only the first `n` matches of the already-ranked input.
    TopN(usize),
}

/// Presentation settings, supplied by the caller.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub report_date: NaiveDate,
    /// Threshold echoed in the header; filtering already happened upstream.
    pub min_confidence: u8,
    /// Record cap for full reports, bounded by the delivery channel's
    /// message-size limits.
    pub max_records: usize,
}

pub struct MessageFormatter;

impl MessageFormatter {
    /// Render ranked matches as a report. `None` means nothing to publish.
    pub fn format(
        &self,
        matches: &[ConsolidatedMatch],
        mode: ReportMode,
        options: &ReportOptions,
    ) -> Option<String> {
        if matches.is_empty() {
            return None;
        }
        match mode {
            ReportMode::Full => Some(self.render_full(matches, options)),
            ReportMode::TopN(n) => Some(self.render_top(matches, n, options)),
        }
    }

    fn render_full(&self, matches: &[ConsolidatedMatch], options: &ReportOptions) -> String {
        let date = options.report_date.format("%d/%m/%Y");
        let mut out = format!("🏆 <b>CONSOLIDATED PREDICTIONS - {date}</b>\n");
        out.push_str("📊 Cross-checked across multiple prediction sources\n");
        out.push_str(&format!(
            "⭐ Filtered by confidence (minimum {}%)\n\n",
            options.min_confidence
        ));
        out.push_str(RULE_HEAVY);
        out.push_str("\n\n");

        let shown: Vec<&ConsolidatedMatch> = matches.iter().take(options.max_records).collect();
        for (i, &m) in shown.iter().enumerate() {
            out.push_str(&format!(
                "⚽ <b>{}. {} vs {}</b>\n",
                i + 1,
                m.home_team,
                m.away_team
            ));
            if let Some(league) = &m.league {
                out.push_str(&format!("🏆 {league}\n"));
            }
            if let Some(kickoff) = &m.kickoff {
                out.push_str(&format!("⏰ {kickoff}\n"));
            }
            out.push_str(&summary_lines(m));
            out.push('\n');
            out.push_str(&analysis_block(m));
            out.push('\n');
            out.push_str(RULE_LIGHT);
            out.push_str("\n\n");
        }

        out.push_str(&format!("✅ <b>Matches analysed:</b> {}\n", shown.len()));
        out.push_str("💡 <i>Consensus means agreement across independent sources.</i>\n");
        out.push_str("<i>Play responsibly!</i>");
        out
    }

    fn render_top(&self, matches: &[ConsolidatedMatch], n: usize, options: &ReportOptions) -> String {
        let date = options.report_date.format("%d/%m/%Y");
        let top: Vec<&ConsolidatedMatch> = matches.iter().take(n).collect();

        let mut out = format!("🏆 <b>TOP {} PREDICTIONS - {date}</b>\n", top.len());
        out.push_str(&format!(
            "⭐ Filtered by confidence (minimum {}%)\n\n",
            options.min_confidence
        ));
        out.push_str(RULE_HEAVY);
        out.push_str("\n\n");

        for (i, &m) in top.iter().enumerate() {
            let medal = match i {
                0 => "🥇",
                1 => "🥈",
                2 => "🥉",
                _ => "🎖️",
            };
            out.push_str(&format!(
                "{medal} <b>{}. {} vs {}</b>\n",
                i + 1,
                m.home_team,
                m.away_team
            ));
            out.push_str(&summary_lines(m));
            out.push('\n');
        }

        out.push_str(RULE_HEAVY);
        out.push_str("\n\n");
        out.push_str(&format!(
            "📊 <b>Matches above threshold:</b> {}\n",
            matches.len()
        ));
        out.push_str("💡 <i>Only the strongest consensus picks are shown.</i>");
        out
    }
}

fn summary_lines(m: &ConsolidatedMatch) -> String {
    let label = m
        .consensus
        .best_prediction
        .as_deref()
        .unwrap_or("No consensus");
    format!(
        "🎯 Prediction: <b>{label}</b>\n📈 Confidence: <b>{}%</b>\n🤝 Agreement: {}%\n📍 Sources: {}\n",
        m.consensus.avg_confidence, m.consensus.agreement_pct, m.consensus.source_count
    )
}

/// Detailed per-match analysis for the full report: prediction in prose,
/// confidence/agreement bands, one line per contributing source and a
/// closing reliability note.
fn analysis_block(m: &ConsolidatedMatch) -> String {
    let mut out = String::from("📊 <b>Consolidated analysis</b>\n");

    let prediction = match &m.consensus.best_prediction {
        Some(label) => describe_prediction(label, &m.home_team, &m.away_team),
        None => "No usable prediction from any source".to_string(),
    };
    out.push_str(&format!("🎯 <b>Best prediction:</b> {prediction}\n"));
    out.push_str(&format!(
        "📈 <b>Confidence:</b> {}% ({})\n",
        m.consensus.avg_confidence,
        confidence_level(m.consensus.avg_confidence)
    ));
    out.push_str(&format!(
        "🤝 <b>Source agreement:</b> {}% ({})\n",
        m.consensus.agreement_pct,
        agreement_level(m.consensus.agreement_pct)
    ));

    out.push_str("<b>Per source:</b>\n");
    for s in unique_by_source(&m.sources) {
        let label = if s.prediction.trim().is_empty() {
            "no tip"
        } else {
            s.prediction.trim()
        };
        if s.confidence > 0.0 {
            out.push_str(&format!(
                "   • <b>{}:</b> {} ({:.0}%)\n",
                s.source, label, s.confidence
            ));
        } else {
            out.push_str(&format!("   • <b>{}:</b> {}\n", s.source, label));
        }
    }

    out.push_str(&format!(
        "💡 <b>Recommendation:</b> {}\n",
        recommendation(m.consensus.avg_confidence, m.consensus.agreement_pct)
    ));
    out
}

fn describe_prediction(label: &str, home: &str, away: &str) -> String {
    match label.trim().to_uppercase().as_str() {
        "1" => format!("{home} win"),
        "X" => "Draw".to_string(),
        "2" => format!("{away} win"),
        "1X" => format!("{home} win or draw"),
        "12" => "Either side to win".to_string(),
        "X2" => format!("Draw or {away} win"),
        "OVER" => "Over 2.5 goals".to_string(),
        "UNDER" => "Under 2.5 goals".to_string(),
        "GG" => "Both teams to score".to_string(),
        "NG" => "At least one side fails to score".to_string(),
        _ => label.trim().to_string(),
    }
}

fn confidence_level(pct: u8) -> &'static str {
    match pct {
        75.. => "very high",
        60..=74 => "high",
        45..=59 => "medium",
        _ => "low",
    }
}

fn agreement_level(pct: u8) -> &'static str {
    match pct {
        80.. => "very strong",
        60..=79 => "strong",
        40..=59 => "moderate",
        _ => "weak",
    }
}

fn recommendation(confidence: u8, agreement: u8) -> &'static str {
    if agreement >= 70 && confidence >= 60 {
        "High-reliability pick, multiple sources agree."
    } else if agreement >= 50 && confidence >= 50 {
        "Moderately reliable, most sources agree."
    } else {
        "Limited reliability, consider other options."
    }
}

/// First prediction per source name, in merge order.
fn unique_by_source(sources: &[SourcePrediction]) -> Vec<&SourcePrediction> {
    let mut seen: Vec<&str> = Vec::new();
    let mut unique = Vec::new();
    for s in sources {
        if !seen.contains(&s.source.as_str()) {
            seen.push(&s.source);
            unique.push(s);
        }
    }
    unique
}
