//! Rendering of scan results.
//!
//! Text output prints each selected URL with its matching segment
//! highlighted, rarest first. JSON and CSV carry the same rows for
//! downstream tooling.

use crate::rarity::path::ParsedLine;
use crate::rarity::ranker::RankedWord;
use crate::rarity::scan::ScanOutcome;
use anyhow::{Context, Result};
use crossterm::style::Stylize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One highlighted URL per line
    #[default]
    Text,
    /// Pretty-printed JSON array
    Json,
    /// CSV with a header row
    Csv,
}

/// Rebuilds `raw` as `scheme://host[:port]/path[?query]` with the first
/// occurrence of `token` in the decoded path highlighted. Scheme-less
/// lines are printed without an origin.
///
/// Returns `None` when `raw` no longer parses as a URL.
pub fn highlight_url(raw: &str, token: &str, color: bool) -> Option<String> {
    let parsed = ParsedLine::parse(raw)?;

    let path = if color && !token.is_empty() {
        parsed.path.replacen(token, &token.red().to_string(), 1)
    } else {
        parsed.path.clone()
    };

    let query = parsed
        .url
        .query()
        .map(|q| format!("?{}", q))
        .unwrap_or_default();

    Some(format!("{}{}{}", parsed.origin(), path, query))
}

pub struct Renderer {
    format: OutputFormat,
    verbose: bool,
    color: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(OutputFormat::Text)
    }
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            verbose: false,
            color: false,
        }
    }

    #[must_use]
    pub const fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[must_use]
    pub const fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn render<W: Write>(&self, out: &mut W, outcome: &ScanOutcome) -> Result<()> {
        let written = match self.format {
            OutputFormat::Text => self.render_text(out, outcome),
            OutputFormat::Json => render_json(out, &outcome.ranked),
            OutputFormat::Csv => render_csv(out, &outcome.ranked),
        };
        written.context("Failed to write results")
    }

    fn paint_cyan(&self, text: &str) -> String {
        if self.color {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_yellow(&self, text: &str) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    fn render_text<W: Write>(&self, out: &mut W, outcome: &ScanOutcome) -> Result<()> {
        let config = &outcome.config;

        if self.verbose {
            writeln!(
                out,
                "{}: {}",
                self.paint_cyan("Total unique words at selected position"),
                outcome.snapshot.distinct_words()
            )?;
            writeln!(
                out,
                "{}: {:.6}",
                self.paint_cyan("Entropy level"),
                config.max_entropy
            )?;
            writeln!(
                out,
                "{}:",
                self.paint_yellow(&format!("Sample of {}", outcome.ranked.len()))
            )?;
        }

        for ranked in &outcome.ranked {
            let line = highlight_url(&ranked.url, &ranked.word, self.color)
                .unwrap_or_else(|| ranked.url.clone());

            if self.verbose {
                let note = format!(
                    "(Entropy at position {}: {:.2}, frequency {})",
                    config.position, ranked.entropy, ranked.frequency
                );
                write!(out, "{}: ", self.paint_cyan(&note))?;
            }
            writeln!(out, "{}", line)?;
        }

        out.flush()?;
        Ok(())
    }
}

fn render_json<W: Write>(out: &mut W, ranked: &[RankedWord]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, ranked)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn render_csv<W: Write>(out: &mut W, ranked: &[RankedWord]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(&mut *out);
    for row in ranked {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rarity::config::ScanConfig;
    use crate::rarity::scan::scan_reader;
    use std::io::Cursor;

    fn outcome(input: &str, config: &ScanConfig) -> ScanOutcome {
        scan_reader(Cursor::new(input.to_string()), config).unwrap()
    }

    fn render(renderer: &Renderer, outcome: &ScanOutcome) -> String {
        let mut buf = Vec::new();
        renderer.render(&mut buf, outcome).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_highlight_without_color_rebuilds_url() {
        assert_eq!(
            highlight_url("https://user:pw@a.com:8443/x/admin?id=1#frag", "admin", false),
            Some("https://a.com:8443/x/admin?id=1".to_string())
        );
    }

    #[test]
    fn test_highlight_marks_first_occurrence_only() {
        let line = highlight_url("http://a.com/ab/ab", "ab", true).unwrap();
        let marked = "ab".red().to_string();

        assert!(line.starts_with("http://a.com/"));
        assert!(line.ends_with("/ab"));
        assert_eq!(line.replacen(&marked, "ab", 1), "http://a.com/ab/ab");
    }

    #[test]
    fn test_highlight_empty_token() {
        assert_eq!(
            highlight_url("http://a.com/admin/", "", true),
            Some("http://a.com/admin/".to_string())
        );
    }

    #[test]
    fn test_highlight_unparseable() {
        assert_eq!(highlight_url("not a url###%%", "x", false), None);
        assert_eq!(highlight_url("http://a.com/%zz", "x", false), None);
    }

    #[test]
    fn test_highlight_searches_decoded_path() {
        let line = highlight_url("http://a.com/x/caf%C3%A9?id=1", "café", true).unwrap();
        let marked = "café".red().to_string();

        assert!(line.contains(&marked));
        assert_eq!(line.replacen(&marked, "café", 1), "http://a.com/x/café?id=1");
    }

    #[test]
    fn test_highlight_relative_line() {
        assert_eq!(
            highlight_url("/api/admin?x=1", "admin", false),
            Some("/api/admin?x=1".to_string())
        );
        assert_eq!(
            highlight_url("//cdn.a.com/lib", "lib", false),
            Some("//cdn.a.com/lib".to_string())
        );
    }

    #[test]
    fn test_text_output_rarest_first() {
        let config = ScanConfig::default().position(2).max_entropy(4.0);
        let outcome = outcome(
            "http://a.com/x/abc123\nhttp://a.com/x/abc123\nhttp://a.com/x/q\n",
            &config,
        );

        let text = render(&Renderer::new(OutputFormat::Text), &outcome);
        assert_eq!(text, "http://a.com/x/q\nhttp://a.com/x/abc123\n");
    }

    #[test]
    fn test_verbose_text_output() {
        let config = ScanConfig::default().position(2).max_entropy(4.0);
        let outcome = outcome(
            "http://a.com/x/abc123\nhttp://a.com/x/abc123\nhttp://a.com/x/q\n",
            &config,
        );

        let text = render(&Renderer::new(OutputFormat::Text).verbose(true), &outcome);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Total unique words at selected position: 2");
        assert_eq!(lines[1], "Entropy level: 4.000000");
        assert_eq!(lines[2], "Sample of 2:");
        assert_eq!(
            lines[3],
            "(Entropy at position 2: 0.00, frequency 1): http://a.com/x/q"
        );
        assert_eq!(
            lines[4],
            "(Entropy at position 2: 2.58, frequency 2): http://a.com/x/abc123"
        );
    }

    #[test]
    fn test_json_output() {
        let config = ScanConfig::default().position(2).max_entropy(4.0);
        let outcome = outcome("http://a.com/x/q\n", &config);

        let json = render(&Renderer::new(OutputFormat::Json), &outcome);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed[0]["word"], "q");
        assert_eq!(parsed[0]["frequency"], 1);
        assert_eq!(parsed[0]["url"], "http://a.com/x/q");
    }

    #[test]
    fn test_csv_output() {
        let config = ScanConfig::default().position(2).max_entropy(4.0);
        let outcome = outcome("http://a.com/x/q\nhttp://a.com/x/q\n", &config);

        let csv = render(&Renderer::new(OutputFormat::Csv), &outcome);
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some("word,frequency,entropy,url"));
        assert_eq!(lines.next(), Some("q,2,0.0,http://a.com/x/q"));
        assert_eq!(lines.next(), None);
    }
}
