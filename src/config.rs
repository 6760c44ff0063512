use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{utils::read_file, Error};

#[derive(Clone, Copy, Deserialize, Debug, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum QueueKind {
    #[default]
    Slurm,
    Local,
}

#[derive(Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// The queue used to run the optimization and frequency jobs
    pub queue: QueueKind,

    /// The command used to run Q-Chem inside the submission scripts
    pub qchem_cmd: String,

    /// The directory the Q-Chem inputs and submission scripts are written to.
    /// Created if it does not exist. Defaults to `piezo_<job_name>`
    pub job_dir: Option<String>,

    /// Prefix for the Slurm job names and the name of the saved Q-Chem scratch
    /// directory shared by the two jobs. Defaults to the stem of the input
    /// file, so runs on different molecules do not share a scratch directory
    pub job_name: Option<String>,

    /// Shell lines placed before the Q-Chem command in each submission script,
    /// for loading modules or exporting `QC` and `QCSCRATCH`
    pub env_setup: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            queue: QueueKind::default(),
            qchem_cmd: String::from("qchem"),
            job_dir: None,
            job_name: None,
            env_setup: None,
        }
    }
}

impl Config {
    pub fn load(filename: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = read_file(filename.as_ref())?;
        Ok(toml::from_str(&contents)?)
    }

    /// the configured job name, or the file stem of `qchem_file`
    pub fn job_name(&self, qchem_file: &Path) -> String {
        match (&self.job_name, qchem_file.file_stem()) {
            (Some(name), _) => name.clone(),
            (None, Some(stem)) => stem.to_string_lossy().into_owned(),
            (None, None) => String::from("piezo"),
        }
    }

    /// the configured job directory, or `piezo_<job_name>`
    pub fn job_dir(&self, qchem_file: &Path) -> PathBuf {
        match &self.job_dir {
            Some(dir) => PathBuf::from(dir),
            None => {
                PathBuf::from(format!("piezo_{}", self.job_name(qchem_file)))
            }
        }
    }
}
