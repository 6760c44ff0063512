use std::{fmt::Display, ops::Deref, str::FromStr};

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AtomListError {
    #[error("atom list is empty")]
    Empty,

    #[error("`{0}` is not a non-negative atom index")]
    BadIndex(String),
}

/// A group of zero-based atom indices into the `$molecule` section of a Q-Chem
/// input. Parsed from text like `0,1,2`, `0 1 2`, or `[0, 1, 2]`. Duplicates
/// are kept as given and no upper bound is checked here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtomList(Vec<usize>);

impl AtomList {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// return the first index that is out of range for a molecule with
    /// `natoms` atoms, if any
    pub fn out_of_range(&self, natoms: usize) -> Option<usize> {
        self.0.iter().copied().find(|&i| i >= natoms)
    }
}

impl Deref for AtomList {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for AtomList {
    type Err = AtomListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('[').unwrap_or(s);
        let s = s.strip_suffix(']').unwrap_or(s);
        let mut ret = Vec::new();
        for field in s.split(|c: char| c == ',' || c.is_whitespace()) {
            if field.is_empty() {
                continue;
            }
            match field.parse::<usize>() {
                Ok(i) => ret.push(i),
                Err(_) => return Err(AtomListError::BadIndex(field.to_owned())),
            }
        }
        if ret.is_empty() {
            return Err(AtomListError::Empty);
        }
        Ok(Self(ret))
    }
}

impl Display for AtomList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, idx) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{idx}")?;
        }
        Ok(())
    }
}
