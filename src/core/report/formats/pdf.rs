//! PDF report generator via HTML-to-PDF conversion
//!
//! Renders the HTML report to a temporary file and prints it with headless
//! Chrome/Chromium.

use super::html::HtmlReporter;
use crate::core::report::{ReportContext, ReportGenerator};
use crate::{debug, verbose};
use std::error::Error;
use std::path::Path;
use std::process::{Command, Stdio};

/// Environment variable naming a Chrome/Chromium executable
pub const CHROME_ENV: &str = "INTELLIGRADE_CHROME";

/// PDF report generator using HTML-to-PDF conversion
pub struct PdfReporter {
    /// Optional custom PDF converter command
    converter: Option<String>,
}

impl PdfReporter {
    /// Create a new PDF reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { converter: None }
    }

    /// Create a PDF reporter with a custom converter
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn with_converter(converter: &str) -> Self {
        Self {
            converter: Some(converter.to_owned()),
        }
    }

    /// Detect available Chrome/Chromium browser
    ///
    /// `INTELLIGRADE_CHROME` is tried before the well-known executable names.
    #[must_use]
    pub fn detect_chrome() -> Option<String> {
        let from_env = std::env::var(CHROME_ENV).ok().filter(|v| !v.is_empty());
        let found = from_env
            .into_iter()
            .chain(BROWSER_CANDIDATES.iter().map(|c| (*c).to_owned()))
            .find(|candidate| {
                Command::new(candidate)
                    .arg("--version")
                    .output()
                    .is_ok_and(|out| out.status.success())
            });
        if let Some(browser) = &found {
            debug!("Using {browser} for PDF conversion");
        }
        found
    }

    /// Print `html_path` to `pdf_path` with a headless browser
    fn print_to_pdf(browser: &str, html_path: &Path, pdf_path: &Path) -> Result<(), Box<dyn Error>> {
        verbose!("Printing {} to {}", html_path.display(), pdf_path.display());
        let status = Command::new(browser)
            .args([
                "--headless=new",
                "--disable-gpu",
                "--no-sandbox",
                "--run-all-compositor-stages-before-draw",
                "--no-pdf-header-footer",
            ])
            .arg(format!("--print-to-pdf={}", pdf_path.display()))
            .arg(format!("file://{}", html_path.canonicalize()?.display()))
            .stderr(Stdio::null())
            .stdout(Stdio::null())
            .status()?;

        if status.success() && pdf_path.exists() {
            Ok(())
        } else {
            Err(format!("{browser} exited without writing {}", pdf_path.display()).into())
        }
    }

    fn browser(&self) -> Result<String, Box<dyn Error>> {
        self.converter
            .clone()
            .or_else(Self::detect_chrome)
            .ok_or_else(|| NO_BROWSER.into())
    }
}

/// Executables probed when no converter or `INTELLIGRADE_CHROME` is given
const BROWSER_CANDIDATES: [&str; 8] = [
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
    "chrome",
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "C:\\Program Files\\Google\\Chrome\\Application\\chrome.exe",
    "C:\\Program Files (x86)\\Google\\Chrome\\Application\\chrome.exe",
];

const NO_BROWSER: &str = "PDF output needs Chrome or Chromium, and none was found.\n\
    Install one (e.g. `sudo apt install chromium-browser`, `brew install --cask google-chrome`),\n\
    point INTELLIGRADE_CHROME or --chrome at the executable,\n\
    or choose another format with --format md or --format html.";

impl Default for PdfReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for PdfReporter {
    /// Render the HTML report to a temporary file, then print it to `output_path`
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let html_path = std::env::temp_dir().join(format!(
            "intelligrade_report_{}_{}.html",
            ctx.file_safe_id(),
            std::process::id()
        ));

        let browser = self.browser()?;
        HtmlReporter::new().generate(ctx, &html_path)?;
        let result = Self::print_to_pdf(&browser, &html_path, output_path);
        let _ = std::fs::remove_file(&html_path);
        result
    }

    /// PDF output is binary; this returns the HTML it is printed from
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        HtmlReporter::new().render(ctx)
    }
}
