//! Rendering the catalog and reporting the outcome.
//!
//! Every figure is rendered in isolation; a failing or even panicking figure
//! only shows up as a red line in the report while its siblings still get
//! written to disk.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use svg::Document;

use crate::figures::{FigureFn, CATALOG};
use crate::options::RenderOptions;
use crate::sheet::Sheet;

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// What became of one figure.
#[derive(Debug)]
pub enum Outcome {
    /// Rendered and saved to this path.
    Written(PathBuf),
    /// Failed with this message.
    Failed(String),
}

/// The collected outcomes of one catalog run.
#[derive(Debug, Default)]
pub struct CompilationReport {
    entries: Vec<(String, Outcome)>,
}

impl CompilationReport {
    /// Whether every figure was written.
    pub fn is_success(&self) -> bool {
        self.entries
            .iter()
            .all(|(_, outcome)| matches!(outcome, Outcome::Written(_)))
    }

    /// All outcomes in catalog order.
    pub fn entries(&self) -> &[(String, Outcome)] {
        &self.entries
    }
}

impl std::fmt::Display for CompilationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // the success banner only appears when the whole catalog rendered;
        // any failure demotes the run to a failure-only listing
        if self.is_success() {
            writeln!(f, "{GREEN}successfully generated figures:{RESET}")?;
            for (name, _) in &self.entries {
                writeln!(f, "  {name}.svg")?;
            }
            return Ok(());
        }

        writeln!(f, "{RED}could not generate figures:{RESET}")?;
        for (name, outcome) in &self.entries {
            if let Outcome::Failed(detail) = outcome {
                writeln!(f, "  {name}: {detail}")?;
            }
        }
        Ok(())
    }
}

/// Render one figure, containing both errors and panics.
fn render_one(figure: FigureFn, sheet: &Sheet) -> Result<Document, String> {
    let caught = catch_unwind(AssertUnwindSafe(|| figure(sheet)));
    match caught {
        Ok(Ok(img)) => Ok(img),
        Ok(Err(err)) => Err(format!("{err:#}")),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "figure panicked".to_string());
            Err(message)
        }
    }
}

/// Render `catalog` onto `sheet` and write the results into `out_dir`.
pub fn render_catalog(
    catalog: &[(&str, FigureFn)],
    sheet: &Sheet,
    out_dir: &Path,
) -> CompilationReport {
    let mut report = CompilationReport::default();
    for &(name, figure) in catalog {
        let outcome = match render_one(figure, sheet) {
            Ok(img) => {
                let path = out_dir.join(format!("{name}.svg"));
                match svg::save(&path, &img) {
                    Ok(()) => Outcome::Written(path),
                    Err(err) => Outcome::Failed(format!("could not save: {err}")),
                }
            }
            Err(detail) => Outcome::Failed(detail),
        };
        if let Outcome::Failed(detail) = &outcome {
            log::warn!("figure {name} failed: {detail}");
        }
        report.entries.push((name.to_string(), outcome));
    }
    report
}

/// Render the whole catalog with the given options.
pub fn make_images(options: &RenderOptions) -> CompilationReport {
    if let Err(err) = std::fs::create_dir_all(&options.output_dir) {
        log::warn!(
            "could not create {}: {err}",
            options.output_dir.display()
        );
    }
    let sheet = Sheet::new(options);
    render_catalog(CATALOG, &sheet, &options.output_dir)
}
