use std::path::Path;

use crate::{
    queue::{QChemJob, Queue},
    utils::write_file,
    Error,
};

/// Slurm is a type for holding the information for submitting a Q-Chem job
/// with `sbatch`. Each job gets a single node with one task holding
/// `resources.ppn` CPUs
#[derive(Debug)]
pub struct Slurm {
    qchem_cmd: String,
    env_setup: Option<String>,
}

impl Slurm {
    pub fn new(qchem_cmd: &str, env_setup: Option<String>) -> Self {
        Self {
            qchem_cmd: qchem_cmd.to_owned(),
            env_setup,
        }
    }
}

impl Default for Slurm {
    fn default() -> Self {
        Self::new("qchem", None)
    }
}

impl Queue for Slurm {
    const SCRIPT_EXT: &'static str = "slurm";

    fn write_submit_script(
        &self,
        job: &QChemJob,
        filename: &Path,
    ) -> Result<(), Error> {
        let mut body = format!(
            "#!/bin/bash
#SBATCH --job-name={}
#SBATCH --nodes=1
#SBATCH --ntasks=1
#SBATCH --cpus-per-task={}
#SBATCH --time={}:00:00
#SBATCH -o {}.out
#SBATCH --no-requeue
",
            job.name,
            job.resources.ppn,
            job.resources.hours,
            filename.display(),
        );
        if let Some(env) = &self.env_setup {
            body.push_str(env.trim_end());
            body.push('\n');
        }
        body.push_str(&job.command(&self.qchem_cmd));
        body.push('\n');
        write_file(filename, &body)
    }

    fn submit_command(&self) -> &str {
        "sbatch"
    }

    fn dependency_args(&self, job_id: &str) -> Vec<String> {
        vec![format!("--dependency=afterok:{job_id}")]
    }
}
