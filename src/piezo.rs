use std::path::{Path, PathBuf};

use log::info;

use crate::{
    config::Config,
    qchem::{Molecule, QChemInput},
    queue::{QChemJob, Queue},
    utils::{read_file, setup, write_file},
    AtomList, Error, PiezoSolver, Resources,
};

/// Phase names, used for the file names inside the job directory
const OPT: &str = "opt";
const FREQ: &str = "freq";

/// Writes and submits, through a [Queue], the Q-Chem geometry optimization and
/// frequency jobs a piezoelectric matrix is built from. It does not compute or
/// read back the matrix: the atom groups are only recorded in the `$comment`
/// section of the optimization input. The frequency job reads the optimized
/// geometry from the scratch directory saved by the optimization.
#[derive(Debug)]
pub struct PiezoMoleculeSolver<Q: Queue> {
    base: QChemInput,
    /// atom labels from the base `$molecule` section
    labels: Vec<String>,
    queue: Q,
    dir: PathBuf,
    job_name: String,
}

impl<Q: Queue> PiezoMoleculeSolver<Q> {
    /// load the base Q-Chem input from `qchem_file`. The input must contain an
    /// explicit geometry so that atom indices can be checked against it.
    pub fn new(
        qchem_file: &Path,
        queue: Q,
        config: &Config,
    ) -> Result<Self, Error> {
        let base = read_file(qchem_file)?
            .parse::<QChemInput>()
            .map_err(|e| Error::Input {
                path: qchem_file.to_owned(),
                source: e,
            })?;
        let labels = match base.molecule() {
            Ok(Molecule::Explicit { atoms, .. }) => atoms,
            Ok(Molecule::Read) => {
                return Err(Error::NoGeometry {
                    path: qchem_file.to_owned(),
                })
            }
            Err(e) => {
                return Err(Error::Input {
                    path: qchem_file.to_owned(),
                    source: e,
                })
            }
        };
        Ok(Self {
            base,
            labels,
            queue,
            dir: config.job_dir(qchem_file),
            job_name: config.job_name(qchem_file),
        })
    }

    pub fn natoms(&self) -> usize {
        self.labels.len()
    }

    /// the `$comment` body recording which atoms make up each group
    fn groups_comment(
        &self,
        atoms1: &AtomList,
        atoms2: &AtomList,
    ) -> Vec<String> {
        let mut ret = vec![String::from("piezoelectric matrix atom groups")];
        for (i, list) in [atoms1, atoms2].into_iter().enumerate() {
            let members: Vec<String> = list
                .iter()
                .map(|&a| match self.labels.get(a) {
                    Some(label) => format!("{a}({label})"),
                    None => a.to_string(),
                })
                .collect();
            ret.push(format!("group {}: {}", i + 1, members.join(" ")));
        }
        ret
    }

    /// the optimization input: the base input with `jobtype opt` and the atom
    /// groups recorded in `$comment`
    pub fn opt_input(
        &self,
        atoms1: &AtomList,
        atoms2: &AtomList,
    ) -> QChemInput {
        let mut inp = self.base.clone();
        inp.set_rem("jobtype", "opt");
        inp.set_section("comment", self.groups_comment(atoms1, atoms2));
        inp
    }

    /// the frequency input: the base input with its geometry replaced by
    /// `read` and `jobtype freq`
    pub fn freq_input(&self) -> QChemInput {
        let mut inp = self.base.clone();
        inp.set_section("molecule", vec![String::from("read")]);
        inp.set_rem("jobtype", "freq");
        inp
    }

    fn job(&self, phase: &str, resources: Resources) -> QChemJob {
        QChemJob {
            name: format!("{}_{phase}", self.job_name),
            input: self.dir.join(format!("{phase}.in")),
            output: self.dir.join(format!("{phase}.out")),
            scratch: self.job_name.clone(),
            save: phase == OPT,
            resources,
        }
    }

    /// write the input and submit script for `job` and submit it, after the
    /// job `after` if given. returns the new job id
    fn write_and_submit(
        &self,
        job: &QChemJob,
        input: &QChemInput,
        after: Option<&str>,
    ) -> Result<String, Error> {
        write_file(&job.input, &input.to_string())?;
        let script = job.input.with_extension(Q::SCRIPT_EXT);
        self.queue.write_submit_script(job, &script)?;
        let id = self.queue.submit(&script, after)?;
        info!(
            "submitted {} ({} ppn, {} h) as job {id}",
            job.name, job.resources.ppn, job.resources.hours
        );
        Ok(id)
    }
}

impl<Q: Queue> PiezoSolver for PiezoMoleculeSolver<Q> {
    type Error = Error;

    fn calculate_piezoelectric_matrix(
        &mut self,
        atoms1: &AtomList,
        atoms2: &AtomList,
        opt: Resources,
        freq: Resources,
    ) -> Result<(), Error> {
        let natoms = self.natoms();
        for (i, list) in [atoms1, atoms2].into_iter().enumerate() {
            if let Some(index) = list.out_of_range(natoms) {
                return Err(Error::AtomIndex {
                    list: i + 1,
                    index,
                    natoms,
                });
            }
        }
        setup(&self.dir)?;
        let opt_job = self.job(OPT, opt);
        let opt_id = self.write_and_submit(
            &opt_job,
            &self.opt_input(atoms1, atoms2),
            None,
        )?;
        let freq_job = self.job(FREQ, freq);
        self.write_and_submit(&freq_job, &self.freq_input(), Some(&opt_id))?;
        Ok(())
    }
}
