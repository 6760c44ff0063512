use std::{ffi::OsString, path::PathBuf};

use clap::{Args, Parser};

use crate::{atoms::AtomList, Resources};

#[derive(Parser, Debug)]
#[command(
    name = "Piezoelectric Matrix Evaluator",
    about = "Returns piezo-matrix for atoms or system of atoms of a molecule \
             of choice.",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub params: InvocationParameters,

    /// TOML file selecting the queue and Q-Chem command
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Everything needed for one call to
/// [`PiezoSolver::calculate_piezoelectric_matrix`](crate::PiezoSolver), built
/// once from the command line.
#[derive(Args, Clone, Debug, PartialEq)]
pub struct InvocationParameters {
    /// name of qchem input file to serve as base
    #[arg(value_name = "QCHEM_FILE")]
    pub qchem_file: PathBuf,

    /// 1st list of atom indices (integers) from qchem file (starting atom is
    /// 0), like 0,1,2
    #[arg(value_name = "ATOM_LIST1")]
    pub atom_list1: AtomList,

    /// 2nd list of atom indices (integers) from qchem file (starting atom is
    /// 0)
    #[arg(value_name = "ATOM_LIST2")]
    pub atom_list2: AtomList,

    /// number of processors per node for optimization
    #[arg(
        value_name = "OPT_PPN",
        default_value_t = 4,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub opt_ppn: u32,

    /// number of processors per node for frequency calculation
    #[arg(
        value_name = "FREQ_PPN",
        default_value_t = 16,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub freq_ppn: u32,

    /// number of hours allocated for optimization
    #[arg(
        value_name = "OPT_TIME",
        default_value_t = 24,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub opt_time: u32,

    /// number of hours allocated for frequency calculation
    #[arg(
        value_name = "FREQ_TIME",
        default_value_t = 48,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub freq_time: u32,
}

impl InvocationParameters {
    /// parse `args`, which should include the program name as its first
    /// element, without exiting the process on failure
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Cli::try_parse_from(args).map(|cli| cli.params)
    }

    /// the positional arguments that parse back into `self`, excluding the
    /// program name
    pub fn to_args(&self) -> Vec<String> {
        vec![
            self.qchem_file.display().to_string(),
            self.atom_list1.to_string(),
            self.atom_list2.to_string(),
            self.opt_ppn.to_string(),
            self.freq_ppn.to_string(),
            self.opt_time.to_string(),
            self.freq_time.to_string(),
        ]
    }

    pub fn opt_resources(&self) -> Resources {
        Resources::new(self.opt_ppn, self.opt_time)
    }

    pub fn freq_resources(&self) -> Resources {
        Resources::new(self.freq_ppn, self.freq_time)
    }
}
