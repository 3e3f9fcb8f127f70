// Drives the menu over any reader/writer pair: stdin/stdout in the binary, buffers in tests
use super::menu::{MenuState, Notice};
use crate::analysis::{self, region::RegionMapper};
use crate::data::dataset::Dataset;
use crate::data::filter::RecordFilter;
use crate::error::AnalysisError;
use crate::report::{self, export};
use shared::models::EducationLevel;
use std::io::{BufRead, Write};
use std::path::Path;

pub struct Session<'a, R, W> {
    dataset: &'a Dataset,
    mapper: &'a RegionMapper,
    export_dir: Option<&'a Path>,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(dataset: &'a Dataset, mapper: &'a RegionMapper, input: R, output: W) -> Self {
        Session {
            dataset,
            mapper,
            export_dir: None,
            input,
            output,
        }
    }

    pub fn with_export_dir(mut self, export_dir: Option<&'a Path>) -> Self {
        self.export_dir = export_dir;
        self
    }

    /// Runs until the user exits or input ends.
    pub fn run(&mut self) -> Result<(), AnalysisError> {
        let mut state = MenuState::MainMenu;
        loop {
            state = match &state {
                MenuState::Exit => break,
                MenuState::Report { filter, level } => {
                    self.report(filter, *level)?;
                    state.after_report()
                }
                _ => {
                    write!(self.output, "{}", state.prompt(self.dataset))?;
                    self.output.flush()?;
                    let Some(line) = self.read_line()? else {
                        writeln!(self.output, "{}", Notice::Finished.message())?;
                        break;
                    };
                    let transition = state.on_input(&line, self.dataset);
                    if let Some(notice) = transition.notice {
                        writeln!(self.output, "{}", notice.message())?;
                    }
                    transition.next
                }
            };
        }
        self.output.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>, AnalysisError> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf))
    }

    fn report(&mut self, filter: &RecordFilter, level: EducationLevel) -> Result<(), AnalysisError> {
        let filtered = self.dataset.filter(filter);
        let outcome = analysis::analyze(&filtered, filter, level, self.mapper);
        write!(self.output, "{}", report::render_outcome(&outcome))?;

        if let Some(dir) = self.export_dir {
            match export::write_bundle(dir, &outcome.charts) {
                Ok(path) => writeln!(self.output, "Chart data written to {}", path.display())?,
                Err(e) => {
                    tracing::warn!(error = %e, dir = %dir.display(), "Chart export failed");
                    writeln!(self.output, "Could not export chart data: {}", e)?;
                }
            }
        }
        Ok(())
    }
}
