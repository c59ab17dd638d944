use crate::aggregate::AnalysisResult;
use crate::counter::CountItem;
use crate::error::AnalyzeError;
use std::io::Write;

/// Presents an `AnalysisResult` visually.
pub trait ChartRenderer {
    fn render(&mut self, result: &AnalysisResult) -> Result<(), AnalyzeError>;
}

/// Draws the four summary charts as plain text.
pub struct TextCharts<W: Write> {
    out: W,
    width: usize,
}

impl<W: Write> TextCharts<W> {
    pub fn new(out: W) -> Self {
        Self { out, width: 40 }
    }

    /// Longest bar, in columns.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn bar_chart(&mut self, title: &str, axis: (&str, &str), items: &[CountItem]) -> std::io::Result<()> {
        writeln!(self.out, "{title}")?;
        writeln!(self.out, "{}", "=".repeat(title.len()))?;
        if items.is_empty() {
            writeln!(self.out, "(no data)")?;
            return writeln!(self.out);
        }
        let label_w = items
            .iter()
            .map(|i| i.name.chars().count())
            .max()
            .unwrap_or(0)
            .max(axis.0.len());
        let max = items.iter().map(|i| i.count).max().unwrap_or(0);
        writeln!(self.out, "{:<label_w$} | {}", axis.0, axis.1)?;
        for item in items {
            let bar = "#".repeat(scale(item.count, max, self.width));
            writeln!(self.out, "{:<label_w$} | {bar} {}", item.name, item.count)?;
        }
        writeln!(self.out)
    }

    fn trend_chart(&mut self, result: &AnalysisResult) -> std::io::Result<()> {
        let title = "Hourly Request Trend";
        writeln!(self.out, "{title}")?;
        writeln!(self.out, "{}", "=".repeat(title.len()))?;
        if result.hourly_trend.is_empty() {
            writeln!(self.out, "(no data)")?;
            return writeln!(self.out);
        }
        let day = result.full_day_trend();
        let max = day.iter().copied().max().unwrap_or(0);
        writeln!(self.out, "Hour | Number of Requests")?;
        for (hour, &count) in day.iter().enumerate() {
            let offset = scale(count, max, self.width);
            writeln!(self.out, "{hour:>4} | {}o {count}", " ".repeat(offset))?;
        }
        writeln!(self.out)
    }
}

impl<W: Write> ChartRenderer for TextCharts<W> {
    fn render(&mut self, result: &AnalysisResult) -> Result<(), AnalyzeError> {
        self.bar_chart(
            "Top IP Addresses by Request Count",
            ("IP Address", "Request Count"),
            &result.top_ips(),
        )?;
        self.trend_chart(result)?;
        let statuses: Vec<CountItem> = result
            .status_counts
            .iter()
            .map(|(name, count)| CountItem { name: name.to_string(), count })
            .collect();
        self.bar_chart("HTTP Status Code Distribution", ("Status Code", "Frequency"), &statuses)?;
        self.bar_chart("Top Accessed Endpoints", ("Endpoint", "Access Count"), &result.top_endpoints())?;
        self.out.flush()?;
        Ok(())
    }
}

fn scale(count: usize, max: usize, width: usize) -> usize {
    if max == 0 {
        return 0;
    }
    // non-zero counts always get at least one column
    ((count * width + max - 1) / max).min(width)
}
