use std::{fs, path::Path};

use crate::Error;

/// from [StackOverflow](https://stackoverflow.com/a/45145246)
#[macro_export]
macro_rules! string {
    // match a list of expressions separated by comma:
    ($($str:expr),*) => ({
        // create a Vec with this list of expressions,
        // calling String::from on each:
        vec![$(String::from($str),)*] as Vec<String>
    });
}

/// create `dir` and any missing parents. Existing contents are left alone
pub fn setup(dir: &Path) -> Result<(), Error> {
    fs::create_dir_all(dir).map_err(|e| Error::Write {
        path: dir.to_owned(),
        source: e,
    })
}

pub fn write_file(path: &Path, contents: &str) -> Result<(), Error> {
    log::debug!("writing {}", path.display());
    fs::write(path, contents).map_err(|e| Error::Write {
        path: path.to_owned(),
        source: e,
    })
}

pub fn read_file(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|e| Error::Read {
        path: path.to_owned(),
        source: e,
    })
}
