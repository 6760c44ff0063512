use std::path::Path;

pub mod atoms;
pub mod cli;
pub mod config;
pub mod error;
pub mod local;
pub mod piezo;
pub mod qchem;
pub mod queue;
pub mod slurm;
pub mod utils;


pub use atoms::AtomList;
pub use cli::InvocationParameters;
pub use error::Error;

/// processors per node and wall time in hours allotted to one phase of the
/// calculation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resources {
    pub ppn: u32,
    pub hours: u32,
}

impl Resources {
    pub fn new(ppn: u32, hours: u32) -> Self {
        Self { ppn, hours }
    }
}

/// Starts the calculations behind the piezoelectric matrix coupling two groups
/// of atoms in a molecule: a geometry optimization followed by a frequency
/// calculation, each with its own [Resources]. Implementations may only hand
/// the work off (for example by submitting jobs); nothing is returned to the
/// caller on success.
pub trait PiezoSolver {
    type Error;

    fn calculate_piezoelectric_matrix(
        &mut self,
        atoms1: &AtomList,
        atoms2: &AtomList,
        opt: Resources,
        freq: Resources,
    ) -> Result<(), Self::Error>;
}

/// Build a single solver from `params.qchem_file` with `construct` and run its
/// matrix calculation with the rest of `params`. Errors from either step are
/// returned as-is.
pub fn dispatch<S, F>(
    params: InvocationParameters,
    construct: F,
) -> Result<(), S::Error>
where
    S: PiezoSolver,
    F: FnOnce(&Path) -> Result<S, S::Error>,
{
    let mut solver = construct(&params.qchem_file)?;
    solver.calculate_piezoelectric_matrix(
        &params.atom_list1,
        &params.atom_list2,
        params.opt_resources(),
        params.freq_resources(),
    )
}
