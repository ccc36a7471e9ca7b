use std::io::Write;

use newsdesk_core::{ParsedCandidate, SkipStats};
use newsdesk_ingest::IngestReport;
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the header of a dry-run extraction.
pub fn print_extraction_summary(
    w: &mut dyn Write,
    file_name: &str,
    candidates: usize,
    skip_stats: &SkipStats,
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(
            w,
            "{} {} ({} segments, {} candidates)",
            "DRY RUN:".bold().cyan(),
            file_name.bold(),
            skip_stats.total_segments,
            candidates
        )?;
    } else {
        writeln!(
            w,
            "DRY RUN: {} ({} segments, {} candidates)",
            file_name, skip_stats.total_segments, candidates
        )?;
    }

    let skipped = skip_stats.too_short + skip_stats.no_title + skip_stats.truncated;
    if skipped > 0 {
        let line = format!(
            "(Skipped {} short segments, {} without a title, {} over the cap)",
            skip_stats.too_short, skip_stats.no_title, skip_stats.truncated
        );
        if color.enabled() {
            writeln!(w, "{}", line.dimmed())?;
        } else {
            writeln!(w, "{line}")?;
        }
    }
    writeln!(w)?;
    Ok(())
}

/// Print one extracted candidate.
pub fn print_candidate(
    w: &mut dyn Write,
    index: usize,
    candidate: &ParsedCandidate,
    color: ColorMode,
) -> std::io::Result<()> {
    let tags = if candidate.tags.is_empty() {
        "-".to_string()
    } else {
        candidate.tags.join(", ")
    };

    if color.enabled() {
        writeln!(w, "[{}] {}", index + 1, candidate.title.bold())?;
        writeln!(w, "    {} {}", "Category:".dimmed(), candidate.category.cyan())?;
        writeln!(w, "    {} {}", "Tags:".dimmed(), tags)?;
        writeln!(w, "    {} {}", "Summary:".dimmed(), candidate.summary)?;
        writeln!(
            w,
            "    {} {}",
            "Slug:".dimmed(),
            newsdesk_core::base_slug(&candidate.title).green()
        )?;
    } else {
        writeln!(w, "[{}] {}", index + 1, candidate.title)?;
        writeln!(w, "    Category: {}", candidate.category)?;
        writeln!(w, "    Tags: {}", tags)?;
        writeln!(w, "    Summary: {}", candidate.summary)?;
        writeln!(w, "    Slug: {}", newsdesk_core::base_slug(&candidate.title))?;
    }
    writeln!(w)?;
    Ok(())
}

/// Print the outcome of an ingestion run.
pub fn print_ingest_report(
    w: &mut dyn Write,
    file_name: &str,
    report: &IngestReport,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w, "Ingested {}:", file_name)?;
    for article in &report.created {
        if color.enabled() {
            writeln!(w, "  {} {} ({})", "+".green(), article.title, article.slug.dimmed())?;
        } else {
            writeln!(w, "  + {} ({})", article.title, article.slug)?;
        }
    }
    for error in &report.errors {
        if color.enabled() {
            writeln!(w, "  {} {}", "!".red(), error)?;
        } else {
            writeln!(w, "  ! {}", error)?;
        }
    }

    let line = format!(
        "{} created, {} duplicates, {} failed, {} extracted",
        report.count(),
        report.duplicates,
        report.errors.len(),
        report.total
    );
    if color.enabled() {
        writeln!(w, "{}", line.bold())?;
    } else {
        writeln!(w, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> ParsedCandidate {
        ParsedCandidate {
            title: "Hostel Fees Revised".to_string(),
            summary: "Fees go up next term.".to_string(),
            full_content: "Hostel Fees Revised\nFees go up next term.".to_string(),
            category: "General".to_string(),
            tags: vec!["update".to_string()],
        }
    }

    #[test]
    fn test_candidate_plain() {
        let mut buf = Vec::new();
        print_candidate(&mut buf, 0, &candidate(), ColorMode(false)).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.starts_with("[1] Hostel Fees Revised\n"));
        assert!(out.contains("    Tags: update\n"));
        assert!(out.contains("    Slug: hostel-fees-revised\n"));
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn test_summary_mentions_skips() {
        let stats = SkipStats {
            total_segments: 5,
            too_short: 2,
            no_title: 0,
            truncated: 1,
        };
        let mut buf = Vec::new();
        print_extraction_summary(&mut buf, "bulletin.pdf", 2, &stats, ColorMode(false)).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("DRY RUN: bulletin.pdf (5 segments, 2 candidates)"));
        assert!(out.contains("Skipped 2 short segments"));
    }

    #[test]
    fn test_colored_output_has_escapes() {
        let mut buf = Vec::new();
        print_candidate(&mut buf, 0, &candidate(), ColorMode(true)).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains('\u{1b}'));
    }

    #[test]
    fn test_ingest_report_totals() {
        let report = IngestReport {
            duplicates: 1,
            total: 2,
            errors: vec!["Failed to create article: X".to_string()],
            ..Default::default()
        };
        let mut buf = Vec::new();
        print_ingest_report(&mut buf, "b.pdf", &report, ColorMode(false)).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("  ! Failed to create article: X\n"));
        assert!(out.contains("0 created, 1 duplicates, 1 failed, 2 extracted"));
    }
}
