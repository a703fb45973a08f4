//! Text output formatting with bars, tables, and colors.

use std::fmt::Write as _;

use covdash_core::{
    ActiveFilter, ApiRecord, CoverageThresholds, CoverageTier, DistributionBucket, Page, Quadrant,
    ScatterPoint, SortDirection, SortField, SortState, SummaryStats, TrendPoint, UsageBucket,
    UsageBucketCount, UsageThresholds,
};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";

// Progress bar characters
const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';

const NAME_WIDTH: usize = 28;

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
    bar_width: usize,
    coverage: CoverageThresholds,
    usage: UsageThresholds,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            bar_width: 10,
            coverage: CoverageThresholds::default(),
            usage: UsageThresholds::default(),
        }
    }

    /// Set the progress bar width.
    #[allow(dead_code)]
    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width;
        self
    }

    /// Sets the coverage tiers used for coloring.
    pub fn with_coverage_thresholds(mut self, thresholds: CoverageThresholds) -> Self {
        self.coverage = thresholds;
        self
    }

    /// Sets the usage buckets used for coloring.
    pub fn with_usage_thresholds(mut self, thresholds: UsageThresholds) -> Self {
        self.usage = thresholds;
        self
    }

    // ========================================================================
    // Summary
    // ========================================================================

    /// Formats the summary cards and the coverage-tier breakdown.
    pub fn format_summary(&self, stats: &SummaryStats, records: &[ApiRecord]) -> String {
        let mut lines = Vec::new();

        lines.push(self.bold("CovDash Summary"));
        lines.push("─".repeat(50));

        if stats.is_empty() {
            lines.push(self.dim("No APIs in the dataset."));
            return lines.join("\n");
        }

        lines.push(format!("Total APIs:       {}", stats.total_apis));
        lines.push(format!(
            "Average coverage: {} {}",
            self.progress_bar(stats.average_coverage),
            self.color_for_coverage(stats.average_coverage, &format!("{}%", stats.average_coverage))
        ));
        lines.push(format!("Total usage:      {} call sites", stats.total_usage));
        if let Some(date) = stats.last_updated {
            lines.push(format!("Last updated:     {}", self.dim(&date.to_string())));
        }

        lines.push(String::new());
        lines.push(self.dim("Coverage tiers:"));
        for tier in [CoverageTier::High, CoverageTier::Medium, CoverageTier::Low] {
            let count = records
                .iter()
                .filter(|r| r.coverage_tier(&self.coverage) == tier)
                .count();
            let label = format!("  {:<16}", self.tier_label(tier));
            lines.push(format!("{}{count}", self.color_for_tier(tier, &label)));
        }

        lines.join("\n")
    }

    // ========================================================================
    // Table
    // ========================================================================

    /// Formats one page of records as a table.
    pub fn format_page(
        &self,
        page: &Page<'_, ApiRecord>,
        sort: SortState,
        active: &[ActiveFilter],
    ) -> String {
        let mut lines = Vec::new();

        if !active.is_empty() {
            let labels: Vec<&str> = active.iter().map(|f| f.label.as_str()).collect();
            lines.push(format!("Filters: {}", self.cyan(&labels.join(", "))));
        }

        let header = format!(
            "{:<name$} {:<16} {:>9} {:>12} {:>10}",
            self.header_label("Name", SortField::Name, sort),
            self.header_label("Coverage", SortField::CoveragePercentage, sort),
            self.header_label("Lines", SortField::FullSize, sort),
            self.header_label("Usage", SortField::UsageCount, sort),
            "Updated",
            name = NAME_WIDTH,
        );
        lines.push(self.bold(&header));
        lines.push("─".repeat(header.chars().count()));

        if page.items.is_empty() {
            lines.push(self.dim("No APIs match the current filters."));
        }

        for record in page.items {
            lines.push(self.format_row(record));
        }

        lines.push(String::new());
        let position = match page.display_range() {
            Some((first, last)) => format!("Showing {first}-{last} of {}", page.total_items),
            None => format!("Showing 0 of {}", page.total_items),
        };
        lines.push(self.dim(&format!(
            "{position} · Page {}/{}",
            page.page_index + 1,
            page.total_pages
        )));

        lines.join("\n")
    }

    /// Formats a single table row.
    pub fn format_row(&self, record: &ApiRecord) -> String {
        let coverage = format!(
            "{} {:>4}",
            self.progress_bar(record.coverage_percentage),
            self.color_for_coverage(
                record.coverage_percentage,
                &format!("{}%", record.coverage_percentage)
            )
        );
        let lines = format!("{}/{}", record.covered_lines, record.full_size);
        let usage = format!("{} ({}%)", record.usage_count, record.usage_percentage);

        format!(
            "{:<name$} {} {:>9} {} {:>10}",
            truncate(&record.name, NAME_WIDTH),
            coverage,
            lines,
            self.color_for_usage(record.usage_bucket(&self.usage), &format!("{usage:>12}")),
            record.last_updated,
            name = NAME_WIDTH,
        )
    }

    fn header_label(&self, label: &str, field: SortField, sort: SortState) -> String {
        if sort.field != field {
            return label.to_string();
        }
        match sort.direction {
            SortDirection::Asc => format!("{label} ▲"),
            SortDirection::Desc => format!("{label} ▼"),
        }
    }

    // ========================================================================
    // Charts
    // ========================================================================

    /// Formats the coverage histogram.
    pub fn format_coverage_distribution(&self, buckets: &[DistributionBucket]) -> String {
        let max = buckets.iter().map(|b| b.count).max().unwrap_or(0);
        let mut lines = vec![self.bold("Coverage distribution"), "─".repeat(40)];

        for bucket in buckets {
            let bar = self.count_bar(bucket.count, max);
            let colored = self.color_for_coverage(bucket.max, &bar);
            lines.push(format!("{:>8} {colored} {}", bucket.range, bucket.count));
        }

        lines.join("\n")
    }

    /// Formats the usage-bucket histogram.
    pub fn format_usage_distribution(&self, counts: &[UsageBucketCount]) -> String {
        let max = counts.iter().map(|c| c.count).max().unwrap_or(0);
        let mut lines = vec![self.bold("Usage distribution"), "─".repeat(40)];

        for entry in counts {
            let bar = self.count_bar(entry.count, max);
            lines.push(format!(
                "{:<13} {} {}",
                entry.bucket.label(),
                self.color_for_usage(entry.bucket, &bar),
                entry.count
            ));
        }

        lines.join("\n")
    }

    /// Formats scatter points grouped by quadrant, riskiest first.
    pub fn format_scatter(&self, points: &[ScatterPoint]) -> String {
        let mut lines = vec![self.bold("Coverage vs usage"), "─".repeat(50)];

        for &quadrant in Quadrant::all() {
            let members: Vec<&ScatterPoint> =
                points.iter().filter(|p| p.quadrant == quadrant).collect();
            let heading = format!("{} ({})", quadrant.label(), members.len());
            lines.push(match quadrant {
                Quadrant::UndertestedPopular => self.red(&heading),
                Quadrant::WellTestedPopular => self.green(&heading),
                _ => self.bold(&heading),
            });

            for point in members {
                lines.push(format!(
                    "  {:<name$} {:>4}% covered {:>4}% usage  {}",
                    truncate(&point.name, NAME_WIDTH),
                    point.coverage,
                    point.usage,
                    self.dim(&format!("{} lines", point.full_size)),
                    name = NAME_WIDTH,
                ));
            }
        }

        lines.join("\n")
    }

    /// Formats the coverage trend.
    pub fn format_trend(&self, points: &[TrendPoint]) -> String {
        let mut lines = vec![self.bold("Coverage trend"), "─".repeat(40)];

        if points.is_empty() {
            lines.push(self.dim("No trend data."));
            return lines.join("\n");
        }

        let mut previous: Option<u32> = None;
        for point in points {
            let delta = match previous {
                Some(prev) if point.coverage > prev => self.green(&format!("+{}", point.coverage - prev)),
                Some(prev) if point.coverage < prev => self.red(&format!("-{}", prev - point.coverage)),
                Some(_) => self.dim("="),
                None => String::new(),
            };
            lines.push(format!(
                "{} {} {:>3}% {:>5} APIs {delta}",
                point.date,
                self.progress_bar(point.coverage),
                point.coverage,
                point.apis
            ));
            previous = Some(point.coverage);
        }

        lines.join("\n")
    }

    // ========================================================================
    // Explore
    // ========================================================================

    /// Formats the result of one search in `explore`.
    pub fn format_search_result(&self, query: &str, records: &[ApiRecord], limit: usize) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} {}",
            self.bold(&format!("\"{query}\"")),
            self.dim(&format!("{} matches", records.len()))
        );

        for record in records.iter().take(limit) {
            let _ = writeln!(out, "  {}", self.format_row(record));
        }
        if records.len() > limit {
            let _ = writeln!(out, "  {}", self.dim(&format!("… {} more", records.len() - limit)));
        }

        out.trim_end().to_string()
    }

    /// Formats an error message.
    pub fn format_error(&self, context: &str, error: &str) -> String {
        format!("{}: {} - {}", self.bold(context), self.red("Error"), error)
    }

    // ========================================================================
    // Bars
    // ========================================================================

    /// Formats a coverage bar, uncolored.
    pub fn progress_bar(&self, percent: u32) -> String {
        let percent = percent.min(100) as usize;
        let filled = (percent * self.bar_width + 50) / 100;
        let empty = self.bar_width.saturating_sub(filled);

        format!(
            "{}{}",
            BAR_FULL.to_string().repeat(filled),
            BAR_EMPTY.to_string().repeat(empty)
        )
    }

    /// Formats a histogram bar scaled to the largest count.
    pub fn count_bar(&self, count: usize, max: usize) -> String {
        let width = self.bar_width * 2;
        let filled = if max == 0 {
            0
        } else {
            (count * width + max / 2) / max
        };
        let filled = if count > 0 { filled.max(1) } else { 0 };

        BAR_FULL.to_string().repeat(filled)
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn tier_label(&self, tier: CoverageTier) -> String {
        match tier {
            CoverageTier::High => format!("High (>={}%)", self.coverage.high),
            CoverageTier::Medium => format!("Medium (>={}%)", self.coverage.medium),
            CoverageTier::Low => "Low".to_string(),
        }
    }

    fn color_for_tier(&self, tier: CoverageTier, text: &str) -> String {
        match tier {
            CoverageTier::High => self.green(text),
            CoverageTier::Medium => self.yellow(text),
            CoverageTier::Low => self.red(text),
        }
    }

    fn color_for_coverage(&self, percent: u32, text: &str) -> String {
        self.color_for_tier(CoverageTier::classify(percent, &self.coverage), text)
    }

    fn color_for_usage(&self, bucket: UsageBucket, text: &str) -> String {
        match bucket {
            UsageBucket::High => self.blue(text),
            UsageBucket::Medium => self.cyan(text),
            UsageBucket::Low => text.to_string(),
            UsageBucket::Unused => self.dim(text),
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn blue(&self, text: &str) -> String {
        self.paint(BLUE, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

/// Shortens `text` to `width` characters, marking the cut with `…`.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let kept: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}
