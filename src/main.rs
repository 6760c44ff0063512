use std::process::ExitCode;

use clap::Parser;
use piezo_eval::{
    cli::Cli,
    config::{Config, QueueKind},
    dispatch,
    local::LocalQueue,
    piezo::PiezoMoleculeSolver,
    queue::Queue,
    slurm::Slurm,
    Error, InvocationParameters,
};

fn run<Q: Queue>(
    params: InvocationParameters,
    queue: Q,
    config: &Config,
) -> Result<(), Error> {
    dispatch(params, |path| PiezoMoleculeSolver::new(path, queue, config))
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(f) => match Config::load(f) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };
    let env = config.env_setup.clone();
    let res = match config.queue {
        QueueKind::Slurm => {
            run(cli.params, Slurm::new(&config.qchem_cmd, env), &config)
        }
        QueueKind::Local => {
            run(cli.params, LocalQueue::new(&config.qchem_cmd, env), &config)
        }
    };
    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
