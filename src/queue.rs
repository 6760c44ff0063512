use std::{
    path::{Path, PathBuf},
    process::Command,
};

use crate::{Error, Resources};

/// One Q-Chem run, as seen by a [Queue]. `input` and `output` are relative to
/// the directory the submission command is run from.
#[derive(Clone, Debug, PartialEq)]
pub struct QChemJob {
    pub name: String,
    pub input: PathBuf,
    pub output: PathBuf,

    /// name of the Q-Chem scratch directory
    pub scratch: String,

    /// keep the scratch directory after the run for a later job to `read`
    pub save: bool,

    pub resources: Resources,
}

impl QChemJob {
    /// the line that runs this job with the Q-Chem executable `qchem_cmd`
    pub fn command(&self, qchem_cmd: &str) -> String {
        let save = if self.save { " -save" } else { "" };
        format!(
            "{qchem_cmd}{save} -nt {} {} {} {}",
            self.resources.ppn,
            self.input.display(),
            self.output.display(),
            self.scratch,
        )
    }
}

pub trait Queue {
    /// the extension to append to submit scripts for this type of Queue
    const SCRIPT_EXT: &'static str;

    fn write_submit_script(
        &self,
        job: &QChemJob,
        filename: &Path,
    ) -> Result<(), Error>;

    fn submit_command(&self) -> &str;

    /// extra arguments to [Queue::submit_command] that hold the submitted
    /// script until the job `job_id` has finished successfully
    fn dependency_args(&self, job_id: &str) -> Vec<String>;

    /// submit the script at `filename`, optionally after the job `after`, and
    /// return the job id, taken as the last word printed by the submit command
    fn submit(
        &self,
        filename: &Path,
        after: Option<&str>,
    ) -> Result<String, Error> {
        let submit_err = |msg: String| Error::Submit {
            script: filename.to_owned(),
            msg,
        };
        let mut cmd = Command::new(self.submit_command());
        if let Some(id) = after {
            cmd.args(self.dependency_args(id));
        }
        let out = cmd.arg(filename).output().map_err(|e| {
            submit_err(format!("failed to run {}: {e}", self.submit_command()))
        })?;
        if !out.status.success() {
            return Err(submit_err(format!(
                "{} exited with {}: {}",
                self.submit_command(),
                out.status,
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }
        String::from_utf8_lossy(&out.stdout)
            .split_whitespace()
            .last()
            .map(str::to_owned)
            .ok_or_else(|| submit_err(String::from("no job id in output")))
    }
}
