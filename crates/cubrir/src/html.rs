//! Self-contained HTML rendering of a coverage analysis.
//!
//! One page, no external assets: a collapsible section per file with
//! covered lines highlighted, and an overall totals row. Source text is
//! escaped, so reports over arbitrary code are safe to open locally.

use crate::report::{CoverageAnalysis, FileReport};
use crate::result::CubrirResult;
use std::collections::BTreeSet;
use std::path::Path;

const PAGE_STYLE: &str = "\
body { font-family: sans-serif; margin: 2rem; color: #222; }
h1 { font-size: 1.4rem; }
details.file { border: 1px solid #ccc; margin-bottom: 0.5rem; }
summary { display: flex; gap: 1rem; background: #eee; padding: 0.4rem 0.8rem; cursor: pointer; }
summary .name { flex: 1; font-weight: bold; }
pre { margin: 0; padding: 0.8rem; overflow-x: auto; background: #fafafa; }
mark { background: #c8f7c5; }
.totals { margin-top: 1rem; font-weight: bold; }
";

/// HTML page generator for a coverage analysis
#[derive(Debug)]
pub struct HtmlFormatter<'a> {
    analysis: &'a CoverageAnalysis,
    title: String,
}

impl<'a> HtmlFormatter<'a> {
    /// Create a formatter for an analysis
    #[must_use]
    pub fn new(analysis: &'a CoverageAnalysis) -> Self {
        Self {
            analysis,
            title: "Line Coverage".to_string(),
        }
    }

    /// Set the page title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Generate the page as a string
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();
        let title = html_escape(&self.title);

        output.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        output.push_str(&format!("<title>{title}</title>\n"));
        output.push_str(&format!("<style>\n{PAGE_STYLE}</style>\n"));
        output.push_str("</head>\n<body>\n");
        output.push_str(&format!("<h1>{title}</h1>\n"));

        for file in &self.analysis.files {
            render_file(&mut output, file);
        }

        output.push_str(&format!(
            "<div class=\"totals\">Used files: {} &middot; {:.1}% &middot; {} / {} lines</div>\n",
            self.analysis.num_files,
            self.analysis.percent_used,
            self.analysis.total_used,
            self.analysis.total_lines,
        ));
        output.push_str("</body>\n</html>\n");
        output
    }

    /// Save the page to a file
    pub fn save(&self, path: &Path) -> CubrirResult<()> {
        std::fs::write(path, self.generate())?;
        Ok(())
    }
}

fn render_file(output: &mut String, file: &FileReport) {
    output.push_str("<details class=\"file\">\n<summary>");
    output.push_str(&format!(
        "<span class=\"name\">{}</span><span class=\"percent\">{:.1}%</span><span class=\"usage\">{} / {} lines</span>",
        html_escape(&file.name),
        file.percent_used,
        file.used_lines,
        file.total_lines,
    ));
    output.push_str("</summary>\n<pre>");

    let covered: BTreeSet<u32> = file.lines.iter().copied().collect();
    for (number, line) in (1u32..).zip(file.source.lines()) {
        let text = html_escape(line);
        if covered.contains(&number) {
            output.push_str(&format!("<mark>{number:>4} {text}</mark>\n"));
        } else {
            output.push_str(&format!("{number:>4} {text}\n"));
        }
    }

    output.push_str("</pre>\n</details>\n");
}

/// Escape HTML special characters
fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
