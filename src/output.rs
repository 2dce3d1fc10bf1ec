//! Output formatting for query results, stats and trigram listings

use crate::index::types::{DocId, IndexStats, Trigram};
use crate::utils::format_trigram;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// One candidate document for a query
#[derive(Debug, Clone, Serialize)]
pub struct DocMatch {
    pub doc_id: DocId,
    pub path: Option<PathBuf>,
}

/// Outcome of one query pattern
#[derive(Debug, Clone, Serialize)]
pub struct QueryReport {
    pub pattern: String,
    pub matches: Vec<DocMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn stdout(color: bool) -> StandardStream {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

/// Print query reports, one heading per pattern followed by `id<TAB>path` lines
pub fn print_reports(out: &mut impl WriteColor, reports: &[QueryReport]) -> io::Result<()> {
    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }

        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
        write!(out, "{}", report.pattern)?;
        out.reset()?;

        if let Some(ref err) = report.error {
            write!(out, ": ")?;
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
            writeln!(out, "{}", err)?;
            out.reset()?;
            continue;
        }
        writeln!(out, " ({} candidates)", report.matches.len())?;

        for m in &report.matches {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            write!(out, "{}", m.doc_id)?;
            out.reset()?;
            match m.path {
                Some(ref path) => writeln!(out, "\t{}", path.display())?,
                None => writeln!(out)?,
            }
        }
    }
    Ok(())
}

pub fn print_stats(out: &mut impl Write, stats: &IndexStats) -> io::Result<()> {
    writeln!(out, "Index Statistics")?;
    writeln!(out, "================")?;
    writeln!(out)?;
    writeln!(out, "Documents:          {}", stats.doc_count)?;
    writeln!(out, "Unsearchable docs:  {}", stats.unsearchable_docs)?;
    writeln!(out, "Distinct trigrams:  {}", stats.trigram_count)?;
    writeln!(out, "Total postings:     {}", stats.posting_count)?;
    writeln!(out, "Largest posting:    {}", stats.max_posting_len)?;
    if stats.trigram_count > 0 {
        let avg = stats.posting_count as f64 / stats.trigram_count as f64;
        writeln!(out, "Avg posting length: {:.2}", avg)?;
    }
    Ok(())
}

/// Print trigrams in extraction order, one per line with their packed value
pub fn print_trigrams(out: &mut impl Write, trigrams: &[Trigram]) -> io::Result<()> {
    for (pos, &t) in trigrams.iter().enumerate() {
        writeln!(out, "{}\t{:#08x}\t{}", pos, t, format_trigram(t))?;
    }
    Ok(())
}

pub fn print_json<T: Serialize>(out: &mut impl Write, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::NoColor;

    fn render(reports: &[QueryReport]) -> String {
        let mut out = NoColor::new(Vec::new());
        print_reports(&mut out, reports).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn test_print_reports() {
        let reports = vec![
            QueryReport {
                pattern: "hello".to_string(),
                matches: vec![
                    DocMatch {
                        doc_id: 1,
                        path: Some(PathBuf::from("a.txt")),
                    },
                    DocMatch {
                        doc_id: 3,
                        path: None,
                    },
                ],
                error: None,
            },
            QueryReport {
                pattern: "xy".to_string(),
                matches: Vec::new(),
                error: Some("Query too short".to_string()),
            },
        ];

        assert_eq!(
            render(&reports),
            "hello (2 candidates)\n1\ta.txt\n3\n\nxy: Query too short\n"
        );
    }

    #[test]
    fn test_print_stats() {
        let stats = IndexStats {
            doc_count: 2,
            trigram_count: 4,
            posting_count: 6,
            unsearchable_docs: 0,
            max_posting_len: 2,
        };
        let mut out = Vec::new();
        print_stats(&mut out, &stats).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Documents:          2"));
        assert!(text.contains("Avg posting length: 1.50"));
    }

    #[test]
    fn test_print_trigrams() {
        let mut out = Vec::new();
        print_trigrams(&mut out, &[0x616263]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0\t0x616263\tabc\n");
    }

    #[test]
    fn test_report_json_skips_empty_error() {
        let report = QueryReport {
            pattern: "abc".to_string(),
            matches: vec![DocMatch {
                doc_id: 1,
                path: None,
            }],
            error: None,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["matches"][0]["doc_id"], 1);
        assert!(json.get("error").is_none());
    }
}
