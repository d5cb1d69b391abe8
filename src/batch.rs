//! Directory batch processing.
//!
//! Every `.pdf` file in an input directory is parsed, its outline extracted
//! and written as `<stem>.json` into an output directory. A failing document
//! is recorded in the [`BatchReport`] and does not stop the batch.

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::detect::has_pdf_extension;
use crate::error::{Error, Result};
use crate::model::DocumentOutline;
use crate::outline::{OutlineConfig, OutlineExtractor};
use crate::parser::{ParseOptions, PdfParser};
use crate::render::{to_json, JsonFormat};

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Options passed to the PDF parser
    pub parse: ParseOptions,
    /// Outline inference thresholds
    pub outline: OutlineConfig,
    /// Output JSON format
    pub format: JsonFormat,
    /// Process documents in parallel (requires the `parallel` feature)
    pub parallel: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default().lenient(),
            outline: OutlineConfig::default(),
            format: JsonFormat::Pretty,
            parallel: true,
        }
    }
}

impl BatchOptions {
    /// Create batch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parse options.
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    /// Set outline configuration.
    pub fn with_outline_config(mut self, outline: OutlineConfig) -> Self {
        self.outline = outline;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Process one document at a time.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Result of processing a single input file.
#[derive(Debug)]
pub struct FileOutcome {
    /// Input PDF path
    pub input: PathBuf,
    /// Output JSON path (written only on success)
    pub output: PathBuf,
    /// Extracted outline or the error that stopped this document
    pub result: Result<DocumentOutline>,
}

impl FileOutcome {
    /// Whether the document was processed and written.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Summary of a batch run, in input-file order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One outcome per input file
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    /// Number of documents written successfully.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    /// Number of documents that failed.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Iterate over the failed outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok())
    }

    /// Whether every document succeeded.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// List `.pdf` files directly inside `dir`, sorted by path.
///
/// The extension is matched case-insensitively, so `report.PDF` is listed.
pub fn list_pdfs<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::InvalidDirectory {
            path: dir.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_pdf_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// The JSON path for `input` inside `output_dir`: same stem, `.json` extension.
pub fn output_path_for<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output_dir: Q) -> PathBuf {
    let mut name = input
        .as_ref()
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "output".into());
    name.push(".json");
    output_dir.as_ref().join(name)
}

/// Parse one PDF, extract its outline and write the JSON to `output`.
pub fn process_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    extractor: &OutlineExtractor,
    options: &BatchOptions,
) -> Result<DocumentOutline> {
    let input = input.as_ref();
    let output = output.as_ref();

    log::info!("Processing: {}", input.display());

    let parser = PdfParser::open_with_options(input, options.parse.clone())?;
    let document = parser.parse()?;
    let outline = extractor.extract(&document);

    let json = to_json(&outline, options.format)?;
    fs::write(output, json)?;

    log::info!("Output saved to: {}", output.display());
    Ok(outline)
}

/// Process every PDF in `input_dir`, writing results into `output_dir`.
pub fn process_directory<P: AsRef<Path>, Q: AsRef<Path>>(
    input_dir: P,
    output_dir: Q,
    options: &BatchOptions,
) -> Result<BatchReport> {
    process_directory_with_progress(input_dir, output_dir, options, |_| {})
}

/// Like [`process_directory`], calling `on_done` as each file finishes.
///
/// With parallel processing `on_done` is called from worker threads in
/// completion order; the returned report is always in input order.
pub fn process_directory_with_progress<P, Q, F>(
    input_dir: P,
    output_dir: Q,
    options: &BatchOptions,
    on_done: F,
) -> Result<BatchReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: Fn(&FileOutcome) + Sync,
{
    let inputs = list_pdfs(input_dir)?;
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir).map_err(|e| Error::InvalidDirectory {
        path: output_dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    log::debug!("Found {} PDF files", inputs.len());

    let extractor = OutlineExtractor::new(options.outline.clone());
    let run = |input: &PathBuf| {
        let output = output_path_for(input, output_dir);
        let result = process_file(input, &output, &extractor, options);
        if let Err(e) = &result {
            log::warn!("Failed to process {}: {}", input.display(), e);
        }
        let outcome = FileOutcome {
            input: input.clone(),
            output,
            result,
        };
        on_done(&outcome);
        outcome
    };

    #[cfg(feature = "parallel")]
    let outcomes: Vec<FileOutcome> = if options.parallel {
        inputs.par_iter().map(run).collect()
    } else {
        inputs.iter().map(run).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<FileOutcome> = inputs.iter().map(run).collect();

    Ok(BatchReport { outcomes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_path_for() {
        assert_eq!(
            output_path_for("input/report.pdf", "output"),
            PathBuf::from("output/report.json")
        );
        assert_eq!(
            output_path_for("input/a.b.PDF", "out"),
            PathBuf::from("out/a.b.json")
        );
    }

    #[test]
    fn test_list_pdfs_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["b.pdf", "a.PDF", "notes.txt", "c.pdf.bak"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        let names: Vec<String> = list_pdfs(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf"]);
    }

    #[test]
    fn test_list_pdfs_missing_dir() {
        let dir = TempDir::new().unwrap();
        let result = list_pdfs(dir.path().join("missing"));
        assert!(matches!(result, Err(Error::InvalidDirectory { .. })));
    }

    #[test]
    fn test_failures_do_not_stop_batch() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::write(input.path().join("broken.pdf"), b"not a pdf").unwrap();
        fs::write(input.path().join("empty.pdf"), b"").unwrap();

        let report = process_directory(
            input.path(),
            output.path().join("nested"),
            &BatchOptions::new().sequential(),
        )
        .unwrap();

        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.failed(), 2);
        assert!(!report.is_success());
        assert!(output.path().join("nested").is_dir());
        assert!(!output.path().join("nested/broken.json").exists());
    }

    #[test]
    fn test_batch_report_counts() {
        let report = BatchReport {
            outcomes: vec![
                FileOutcome {
                    input: "a.pdf".into(),
                    output: "a.json".into(),
                    result: Ok(DocumentOutline::new("A", Vec::new())),
                },
                FileOutcome {
                    input: "b.pdf".into(),
                    output: "b.json".into(),
                    result: Err(Error::UnknownFormat),
                },
            ],
        };
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.failures().next().unwrap().input, PathBuf::from("b.pdf"));
    }
}
