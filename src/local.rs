use std::path::Path;

use crate::{
    queue::{QChemJob, Queue},
    utils::write_file,
    Error,
};

/// Runs each submit script to completion with `bash` on the current machine,
/// so jobs are already ordered by submission and `resources.hours` is ignored.
/// The job id is the Unix time printed when the script finishes
#[derive(Debug)]
pub struct LocalQueue {
    qchem_cmd: String,
    env_setup: Option<String>,
}

impl LocalQueue {
    pub fn new(qchem_cmd: &str, env_setup: Option<String>) -> Self {
        Self {
            qchem_cmd: qchem_cmd.to_owned(),
            env_setup,
        }
    }
}

impl Queue for LocalQueue {
    const SCRIPT_EXT: &'static str = "sh";

    fn write_submit_script(
        &self,
        job: &QChemJob,
        filename: &Path,
    ) -> Result<(), Error> {
        let mut body = String::from("set -e\n");
        if let Some(env) = &self.env_setup {
            body.push_str(env.trim_end());
            body.push('\n');
        }
        body.push_str(&job.command(&self.qchem_cmd));
        body.push_str("\ndate +%s\n");
        write_file(filename, &body)
    }

    fn submit_command(&self) -> &str {
        "bash"
    }

    fn dependency_args(&self, _job_id: &str) -> Vec<String> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use crate::Resources;

    use super::*;

    fn job() -> QChemJob {
        QChemJob {
            name: String::from("piezo_opt"),
            input: PathBuf::from("opt.in"),
            output: PathBuf::from("opt.out"),
            scratch: String::from("piezo"),
            save: true,
            resources: Resources::new(4, 24),
        }
    }

    #[test]
    fn test_write_submit_script() {
        let dir = std::env::temp_dir().join("piezo_eval_local_script");
        fs::create_dir_all(&dir).unwrap();
        let script = dir.join("opt.sh");
        LocalQueue::new("qchem", None)
            .write_submit_script(&job(), &script)
            .unwrap();
        let got = fs::read_to_string(&script).unwrap();
        let want = "set -e
qchem -save -nt 4 opt.in opt.out piezo
date +%s
";
        assert_eq!(got, want);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_submit() {
        let dir = std::env::temp_dir().join("piezo_eval_local_submit");
        fs::create_dir_all(&dir).unwrap();
        let script = dir.join("opt.sh");

        let queue = LocalQueue::new("true", None);
        queue.write_submit_script(&job(), &script).unwrap();
        let id = queue.submit(&script, Some("1")).unwrap();
        assert!(id.parse::<u64>().is_ok(), "{id}");

        let queue = LocalQueue::new("false", None);
        queue.write_submit_script(&job(), &script).unwrap();
        assert!(matches!(
            queue.submit(&script, None),
            Err(Error::Submit { .. })
        ));
        fs::remove_dir_all(&dir).unwrap();
    }
}
