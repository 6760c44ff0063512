use std::{fmt::Display, str::FromStr};

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParseInputError {
    #[error("line {0}: section name missing after `$`")]
    EmptyName(usize),

    #[error("line {line}: `${inner}` opened inside `${outer}`")]
    Nested {
        line: usize,
        outer: String,
        inner: String,
    },

    #[error("line {0}: `$end` outside of any section")]
    StrayEnd(usize),

    #[error("section `${0}` is never closed with `$end`")]
    Unterminated(String),

    #[error("multi-job (`@@@`) inputs are not supported")]
    MultiJob,

    #[error("no `$molecule` section")]
    NoMolecule,

    #[error("bad charge and multiplicity line `{0}` in `$molecule`")]
    ChargeLine(String),
}

/// A `$name` ... `$end` block from a Q-Chem input file. `name` is lowercased
/// and `lines` holds the body with trailing whitespace removed.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub name: String,
    pub lines: Vec<String>,
}

impl Section {
    pub fn new(name: &str, lines: Vec<String>) -> Self {
        Self {
            name: name.to_lowercase(),
            lines,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Molecule {
    /// `read`: take the geometry from a previous job's scratch directory
    Read,
    Explicit {
        charge: isize,
        multiplicity: usize,
        /// atom labels in input order
        atoms: Vec<String>,
    },
}

/// A single-job Q-Chem input file as an ordered list of sections. Text outside
/// of sections is dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct QChemInput {
    pub sections: Vec<Section>,
}

impl QChemInput {
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections
            .iter_mut()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// replace the body of section `name`, appending the section if it is not
    /// already present
    pub fn set_section(&mut self, name: &str, lines: Vec<String>) {
        match self.section_mut(name) {
            Some(s) => s.lines = lines,
            None => self.sections.push(Section::new(name, lines)),
        }
    }

    /// set `key` to `value` in the `$rem` section, replacing an existing
    /// setting of `key` regardless of case
    pub fn set_rem(&mut self, key: &str, value: &str) {
        let line = format!("   {key} {value}");
        let idx = match self.sections.iter().position(|s| s.name == "rem") {
            Some(i) => i,
            None => {
                self.sections.push(Section::new("rem", Vec::new()));
                self.sections.len() - 1
            }
        };
        let rem = &mut self.sections[idx];
        for l in rem.lines.iter_mut() {
            let first = l
                .split(|c: char| c.is_whitespace() || c == '=')
                .find(|f| !f.is_empty());
            if first.is_some_and(|f| f.eq_ignore_ascii_case(key)) {
                *l = line;
                return;
            }
        }
        rem.lines.push(line);
    }

    /// parse the `$molecule` section. Each non-blank line after the charge and
    /// multiplicity is taken as one atom, up to the first blank line, which
    /// separates Z-matrix variables from the atoms. In fragment inputs the `--`
    /// separators and the charge line opening each fragment are skipped
    pub fn molecule(&self) -> Result<Molecule, ParseInputError> {
        let section =
            self.section("molecule").ok_or(ParseInputError::NoMolecule)?;
        let mut lines = section
            .lines
            .iter()
            .map(|l| l.trim())
            .skip_while(|l| l.is_empty())
            .filter(|l| !l.starts_with('!'));
        let Some(first) = lines.next() else {
            return Err(ParseInputError::ChargeLine(String::new()));
        };
        if first.eq_ignore_ascii_case("read") {
            return Ok(Molecule::Read);
        }
        let (charge, multiplicity) = charge_line(first)?;
        let mut atoms = Vec::new();
        let mut fragment_start = false;
        for line in lines.take_while(|l| !l.is_empty()) {
            if line == "--" {
                fragment_start = true;
            } else if fragment_start {
                charge_line(line)?;
                fragment_start = false;
            } else if let Some(label) = line.split_whitespace().next() {
                atoms.push(label.to_owned());
            }
        }
        Ok(Molecule::Explicit {
            charge,
            multiplicity,
            atoms,
        })
    }
}

/// parse a `$molecule` line holding the charge and spin multiplicity
fn charge_line(line: &str) -> Result<(isize, usize), ParseInputError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields[..] {
        [c, m] => match (c.parse::<isize>(), m.parse::<usize>()) {
            (Ok(c), Ok(m)) => Ok((c, m)),
            _ => Err(ParseInputError::ChargeLine(line.to_owned())),
        },
        _ => Err(ParseInputError::ChargeLine(line.to_owned())),
    }
}

impl FromStr for QChemInput {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut sections = Vec::new();
        let mut cur: Option<Section> = None;
        for (i, line) in s.lines().enumerate() {
            let lineno = i + 1;
            let trimmed = line.trim();
            if trimmed == "@@@" {
                return Err(ParseInputError::MultiJob);
            }
            if let Some(rest) = trimmed.strip_prefix('$') {
                let name = rest.split_whitespace().next().unwrap_or("");
                if name.is_empty() {
                    return Err(ParseInputError::EmptyName(lineno));
                }
                let name = name.to_lowercase();
                if name == "end" {
                    match cur.take() {
                        Some(sec) => sections.push(sec),
                        None => return Err(ParseInputError::StrayEnd(lineno)),
                    }
                    continue;
                }
                if let Some(outer) = &cur {
                    return Err(ParseInputError::Nested {
                        line: lineno,
                        outer: outer.name.clone(),
                        inner: name,
                    });
                }
                cur = Some(Section::new(&name, Vec::new()));
                continue;
            }
            if let Some(sec) = cur.as_mut() {
                sec.lines.push(line.trim_end().to_owned());
            }
        }
        if let Some(sec) = cur {
            return Err(ParseInputError::Unterminated(sec.name));
        }
        Ok(Self { sections })
    }
}

impl Display for QChemInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, sec) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "${}", sec.name)?;
            for line in &sec.lines {
                writeln!(f, "{line}")?;
            }
            writeln!(f, "$end")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::string;

    use super::*;

    fn water() -> QChemInput {
        std::fs::read_to_string("test_files/water.in")
            .unwrap()
            .parse()
            .unwrap()
    }

    #[test]
    fn test_parse() {
        let got = water();
        let names: Vec<_> = got.sections.iter().map(|s| &s.name[..]).collect();
        assert_eq!(names, ["molecule", "rem"]);
        assert_eq!(
            got.section("REM").unwrap().lines,
            string![
                "   method       b3lyp",
                "   basis        6-31g*",
                "   jobtype      sp"
            ]
        );
    }

    #[test]
    fn test_molecule() {
        let got = water().molecule().unwrap();
        let want = Molecule::Explicit {
            charge: 0,
            multiplicity: 1,
            atoms: string!["O", "H", "H"],
        };
        assert_eq!(got, want);
    }

    #[test]
    fn test_fragments() {
        let inp: QChemInput = "$molecule
0 1
--
0 1
O     0.000000     0.000000     0.117790
H     0.000000     0.755453    -0.471161
--
0 2
H     0.000000    -0.755453    -0.471161
$end
"
        .parse()
        .unwrap();
        let got = inp.molecule().unwrap();
        assert_eq!(
            got,
            Molecule::Explicit {
                charge: 0,
                multiplicity: 1,
                atoms: string!["O", "H", "H"],
            }
        );

        let inp: QChemInput =
            "$molecule\n0 1\n--\nO 0.0 0.0 0.0\n$end\n".parse().unwrap();
        assert_eq!(
            inp.molecule(),
            Err(ParseInputError::ChargeLine("O 0.0 0.0 0.0".to_owned()))
        );
    }

    #[test]
    fn test_zmatrix() {
        let inp: QChemInput = "$molecule
-1 2
C
C 1 CC
H 2 CH 1 HCC

CC = 1.42
CH = 1.07
HCC = 147.8
$end
"
        .parse()
        .unwrap();
        let got = inp.molecule().unwrap();
        assert_eq!(
            got,
            Molecule::Explicit {
                charge: -1,
                multiplicity: 2,
                atoms: string!["C", "C", "H"],
            }
        );
    }

    #[test]
    fn test_read() {
        let inp: QChemInput = "$molecule\n  read\n$end\n".parse().unwrap();
        assert_eq!(inp.molecule().unwrap(), Molecule::Read);
    }

    #[test]
    fn test_molecule_errors() {
        let inp: QChemInput = "$rem\njobtype sp\n$end\n".parse().unwrap();
        assert_eq!(inp.molecule(), Err(ParseInputError::NoMolecule));

        let inp: QChemInput =
            "$molecule\nO 0.0 0.0 0.0\n$end\n".parse().unwrap();
        assert_eq!(
            inp.molecule(),
            Err(ParseInputError::ChargeLine("O 0.0 0.0 0.0".to_owned()))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "$molecule\n0 1\n".parse::<QChemInput>(),
            Err(ParseInputError::Unterminated("molecule".to_owned()))
        );
        assert_eq!(
            "$end\n".parse::<QChemInput>(),
            Err(ParseInputError::StrayEnd(1))
        );
        assert_eq!(
            "$molecule\n$rem\n$end\n".parse::<QChemInput>(),
            Err(ParseInputError::Nested {
                line: 2,
                outer: "molecule".to_owned(),
                inner: "rem".to_owned(),
            })
        );
        assert_eq!(
            "$rem\n$end\n@@@\n$rem\n$end\n".parse::<QChemInput>(),
            Err(ParseInputError::MultiJob)
        );
        assert_eq!(
            "$ \n".parse::<QChemInput>(),
            Err(ParseInputError::EmptyName(1))
        );
    }

    #[test]
    fn test_set_rem() {
        let mut inp = water();
        inp.set_rem("JOBTYPE", "opt");
        inp.set_rem("scf_convergence", "8");
        assert_eq!(
            inp.section("rem").unwrap().lines,
            string![
                "   method       b3lyp",
                "   basis        6-31g*",
                "   JOBTYPE opt",
                "   scf_convergence 8"
            ]
        );

        let mut inp: QChemInput = "$molecule\nread\n$end\n".parse().unwrap();
        inp.set_rem("jobtype", "freq");
        assert_eq!(
            inp.section("rem").unwrap().lines,
            string!["   jobtype freq"]
        );
    }

    #[test]
    fn test_display() {
        let mut inp = water();
        inp.set_section("molecule", string!["read"]);
        inp.set_section("comment", string!["hello"]);
        let want = "$molecule
read
$end

$rem
   method       b3lyp
   basis        6-31g*
   jobtype      sp
$end

$comment
hello
$end
";
        assert_eq!(inp.to_string(), want);
        assert_eq!(want.parse::<QChemInput>().unwrap(), inp);
    }
}
