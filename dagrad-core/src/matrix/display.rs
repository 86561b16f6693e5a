// src/matrix/display.rs
use crate::matrix::Matrix;
use std::fmt::{self, Write};

impl Matrix {
    /// Text dump for tests and inspection: rows on separate lines, elements
    /// separated by `delimiter`, e.g. `[[1, 2]\n[3, 4]]` for `", "`.
    ///
    /// Not a stable format.
    pub fn dump(&self, delimiter: &str) -> String {
        Dump {
            matrix: self,
            delimiter,
        }
        .to_string()
    }

    fn write_rows<W: Write>(&self, out: &mut W, delimiter: &str) -> fmt::Result {
        out.write_char('[')?;
        for (i, row) in self.as_slice().chunks(self.cols()).enumerate() {
            if i > 0 {
                out.write_char('\n')?;
            }
            out.write_char('[')?;
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    out.write_str(delimiter)?;
                }
                write!(out, "{}", value)?;
            }
            out.write_char(']')?;
        }
        out.write_char(']')
    }
}

struct Dump<'a> {
    matrix: &'a Matrix,
    delimiter: &'a str,
}

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.matrix.write_rows(f, self.delimiter)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_rows(f, "\t")
    }
}

#[cfg(test)]
mod tests {
    use crate::matrix::Matrix;

    #[test]
    fn test_display_uses_tabs_and_newlines() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.5]]).unwrap();
        assert_eq!(m.to_string(), "[[1\t2]\n[3\t4.5]]");
    }

    #[test]
    fn test_dump_custom_delimiter() {
        let m = Matrix::from_rows(&[[1.0, -2.0, 3.0]]).unwrap();
        assert_eq!(m.dump(", "), "[[1, -2, 3]]");
    }

    #[test]
    fn test_dump_column_vector() {
        let m = Matrix::from_vec(vec![7.0, 8.0], 2, 1).unwrap();
        assert_eq!(m.dump(" "), "[[7]\n[8]]");
    }
}
