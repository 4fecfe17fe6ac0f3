use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// A residue listed in a site file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    /// Residue number as written in the file, before any chain remapping.
    pub residue_number: isize,
    /// 1-based line number the site was read from.
    pub line: usize,
}

#[derive(Debug, Error)]
pub enum SiteListError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid residue number on line {line}: '{value}'")]
    InvalidResidueNumber { line: usize, value: String },
}

/// Reads a whitespace-delimited site list.
///
/// The first token of each line is the residue number; remaining tokens are
/// ignored. Blank lines and lines starting with `#` are skipped.
pub fn read_site_list(reader: impl BufRead) -> Result<Vec<Site>, SiteListError> {
    let mut sites = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = idx + 1;

        let Some(first) = line.split_whitespace().next() else {
            continue;
        };
        if first.starts_with('#') {
            continue;
        }

        let residue_number =
            first
                .parse::<isize>()
                .map_err(|_| SiteListError::InvalidResidueNumber {
                    line: line_number,
                    value: first.to_string(),
                })?;
        sites.push(Site {
            residue_number,
            line: line_number,
        });
    }
    Ok(sites)
}

pub fn read_site_list_from_path(path: &Path) -> Result<Vec<Site>, SiteListError> {
    let file = File::open(path)?;
    read_site_list(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn reads_first_token_of_each_line() {
        let input = "145\tN\t0.35\n 189 K  0.12\n  \n# comment\n329 S\n";
        let sites = read_site_list(input.as_bytes()).unwrap();
        assert_eq!(
            sites,
            vec![
                Site { residue_number: 145, line: 1 },
                Site { residue_number: 189, line: 2 },
                Site { residue_number: 329, line: 5 },
            ]
        );
    }

    #[test]
    fn preserves_duplicates_and_order() {
        let sites = read_site_list("12\n3\n12\n".as_bytes()).unwrap();
        let numbers: Vec<isize> = sites.iter().map(|s| s.residue_number).collect();
        assert_eq!(numbers, vec![12, 3, 12]);
    }

    #[test]
    fn empty_input_yields_no_sites() {
        assert!(read_site_list("".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn rejects_non_integer_first_token() {
        let err = read_site_list("10\nK189\n".as_bytes()).unwrap_err();
        match err {
            SiteListError::InvalidResidueNumber { line, value } => {
                assert_eq!(line, 2);
                assert_eq!(value, "K189");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn read_from_path_reports_missing_file() {
        let dir = tempdir().unwrap();
        let result = read_site_list_from_path(&dir.path().join("missing.data"));
        assert!(matches!(result, Err(SiteListError::Io(_))));

        let path = dir.path().join("sites.data");
        fs::write(&path, "7\n8\n").unwrap();
        assert_eq!(read_site_list_from_path(&path).unwrap().len(), 2);
    }
}
