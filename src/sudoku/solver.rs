use crate::sat::cardinality::exactly_one;
use crate::sat::error::{Error, Result};
use crate::sat::formula::Formula;
use crate::sat::valuation::Valuation;
use itertools::Itertools;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// A square grid of numbers; `0` marks an empty cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board(Vec<Vec<usize>>);

impl Board {
    /// Wraps the rows as given; shape is checked by [`Sudoku::new`].
    #[must_use]
    pub const fn new(board: Vec<Vec<usize>>) -> Self {
        Self(board)
    }

    /// The rows, top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[Vec<usize>] {
        &self.0
    }

    /// The cell at 0-based (`row`, `col`), or `None` outside the grid.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<usize> {
        self.0.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Parses one row per line. `.` and `0` are empty cells, `|` separates
    /// blocks and lines made only of `-`, `+`, `=` are separators.
    ///
    /// A row written without whitespace (once `|` is dropped) is read one
    /// character per cell, which is the form [`Display`] prints up to 9x9.
    /// Otherwise cells are whitespace-separated numbers.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSudoku`] on an unreadable cell.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.chars().all(|c| matches!(c, '-' | '+' | '=' | '|') || c.is_whitespace()) {
                continue;
            }

            let compact = line.replace('|', "");
            let tokens: Vec<String> = if compact.contains(char::is_whitespace) {
                line.replace('|', " ")
                    .split_whitespace()
                    .map(str::to_string)
                    .collect()
            } else {
                compact.chars().map(String::from).collect()
            };

            let row = tokens
                .iter()
                .map(|token| match token.as_str() {
                    "." | "0" => Ok(0),
                    other => other.parse::<usize>().map_err(|_| {
                        Error::InvalidSudoku(format!("line {}: bad cell `{other}`", line_no + 1))
                    }),
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(row);
        }

        Ok(Self(rows))
    }

    /// True if the board is completely filled and every row, column and block
    /// holds each number exactly once.
    #[must_use]
    pub fn is_solved(&self, size: Size) -> bool {
        let n = usize::from(size);
        let block = size.block_size();
        let expected = (1..=n).collect_vec();
        let complete = |cells: Vec<Option<usize>>| {
            cells
                .into_iter()
                .collect::<Option<Vec<_>>>()
                .is_some_and(|cells| cells.into_iter().sorted().collect_vec() == expected)
        };

        self.0.len() == n
            && self.0.iter().all(|row| row.len() == n)
            && (0..n).all(|r| complete((0..n).map(|c| self.get(r, c)).collect()))
            && (0..n).all(|c| complete((0..n).map(|r| self.get(r, c)).collect()))
            && (0..n).step_by(block).cartesian_product((0..n).step_by(block)).all(|(br, bc)| {
                complete(
                    (br..br + block)
                        .cartesian_product(bc..bc + block)
                        .map(|(r, c)| self.get(r, c))
                        .collect(),
                )
            })
    }

    /// True if every filled cell of `clues` has the same value here.
    #[must_use]
    pub fn respects(&self, clues: &Self) -> bool {
        clues.0.iter().enumerate().all(|(r, row)| {
            row.iter()
                .enumerate()
                .all(|(c, &n)| n == 0 || self.get(r, c) == Some(n))
        })
    }
}

impl<const N: usize> From<&[[usize; N]; N]> for Board {
    fn from(board: &[[usize; N]; N]) -> Self {
        Self::new(board.iter().map(|r| r.to_vec()).collect())
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let n = self.0.len();
        let Ok(size) = Size::try_from(n) else {
            for row in &self.0 {
                writeln!(f, "{}", row.iter().join(" "))?;
            }
            return Ok(());
        };
        let block = size.block_size();
        let width = n.to_string().len();
        let cell = |v: usize| {
            if v == 0 {
                format!("{:>width$}", ".")
            } else {
                format!("{v:>width$}")
            }
        };
        let sep = if n > 9 { " " } else { "" };

        for (r, row) in self.0.iter().enumerate() {
            if r > 0 && r % block == 0 {
                let dash = "-".repeat(block * width + sep.len() * (block - 1));
                writeln!(f, "{}", vec![dash; block].join(&format!("{sep}+{sep}")))?;
            }
            let line = row
                .chunks(block)
                .map(|chunk| chunk.iter().map(|&v| cell(v)).join(sep))
                .join(&format!("{sep}|{sep}"));
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// A 4x4 puzzle with a unique solution.
pub const EXAMPLE_FOUR: [[usize; 4]; 4] = [[1, 0, 0, 4], [0, 4, 1, 0], [0, 1, 4, 0], [4, 0, 0, 1]];

/// The 9x9 puzzle from the Wikipedia Sudoku article.
pub const EXAMPLE_NINE: [[usize; 9]; 9] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

/// Arto Inkala's "world's hardest sudoku"; needs real case analysis.
pub const EXAMPLE_HARDEST: [[usize; 9]; 9] = [
    [8, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 3, 6, 0, 0, 0, 0, 0],
    [0, 7, 0, 0, 9, 0, 2, 0, 0],
    [0, 5, 0, 0, 0, 7, 0, 0, 0],
    [0, 0, 0, 0, 4, 5, 7, 0, 0],
    [0, 0, 0, 1, 0, 0, 0, 3, 0],
    [0, 0, 1, 0, 0, 0, 0, 6, 8],
    [0, 0, 8, 5, 0, 0, 0, 1, 0],
    [0, 9, 0, 0, 0, 0, 4, 0, 0],
];

/// Supported side lengths. Each is a perfect square so the grid splits into
/// square blocks.
#[derive(Debug, Clone, PartialEq, Eq, Copy, PartialOrd, Ord, Hash)]
pub enum Size {
    /// 4x4 with 2x2 blocks.
    Four = 4,
    /// 9x9 with 3x3 blocks.
    Nine = 9,
    /// 16x16 with 4x4 blocks.
    Sixteen = 16,
    /// 25x25 with 5x5 blocks.
    TwentyFive = 25,
}

impl TryFrom<usize> for Size {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        match value {
            4 => Ok(Self::Four),
            9 => Ok(Self::Nine),
            16 => Ok(Self::Sixteen),
            25 => Ok(Self::TwentyFive),
            _ => Err(Error::InvalidSudoku(format!("unsupported size {value}"))),
        }
    }
}

impl From<Size> for usize {
    fn from(size: Size) -> Self {
        size as Self
    }
}

impl Size {
    /// Side length of one block.
    #[must_use]
    pub const fn block_size(self) -> usize {
        match self {
            Self::Four => 2,
            Self::Nine => 3,
            Self::Sixteen => 4,
            Self::TwentyFive => 5,
        }
    }
}

/// Name of the atom "cell (`row`, `col`) holds `num`", all 1-based.
#[must_use]
pub fn variable_name(row: usize, col: usize, num: usize) -> String {
    format!("{row},{col},{num}")
}

fn variable(row: usize, col: usize, num: usize) -> Formula {
    Formula::Atom(variable_name(row, col, num))
}

/// A validated puzzle: a square board of a supported size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sudoku {
    /// The clues.
    pub board: Board,
    /// Side length of `board`.
    pub size: Size,
}

impl Sudoku {
    /// Checks the board's shape and values.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSudoku`] if the board is not square, has an unsupported
    /// size, or holds a number larger than the size.
    pub fn new(board: Board) -> Result<Self> {
        let size = Size::try_from(board.0.len())?;
        let n = usize::from(size);

        if let Some(r) = board.0.iter().position(|row| row.len() != n) {
            return Err(Error::InvalidSudoku(format!(
                "row {} has {} cells, expected {n}",
                r + 1,
                board.0[r].len()
            )));
        }
        if let Some(&v) = board.0.iter().flatten().find(|&&v| v > n) {
            return Err(Error::InvalidSudoku(format!("value {v} exceeds {n}")));
        }

        Ok(Self { board, size })
    }

    /// Every atom of [`Self::to_formula`], row by row, then column, then number.
    #[must_use]
    pub fn variables(&self) -> Vec<String> {
        let n = usize::from(self.size);
        (1..=n)
            .cartesian_product(1..=n)
            .cartesian_product(1..=n)
            .map(|((r, c), num)| variable_name(r, c, num))
            .collect()
    }

    /// The puzzle as a propositional formula.
    ///
    /// Every cell, row, column and block constraint uses `exactly_one` rather
    /// than a plain disjunction, which keeps the clause set small and lets unit
    /// propagation do most of the work.
    #[must_use]
    pub fn to_formula(&self) -> Formula {
        let n = usize::from(self.size);
        let block = self.size.block_size();
        let range = || 1..=n;

        let cells = range()
            .cartesian_product(range())
            .map(|(r, c)| exactly_one(&range().map(|num| variable(r, c, num)).collect_vec()));

        let rows = range()
            .cartesian_product(range())
            .map(|(r, num)| exactly_one(&range().map(|c| variable(r, c, num)).collect_vec()));

        let cols = range()
            .cartesian_product(range())
            .map(|(c, num)| exactly_one(&range().map(|r| variable(r, c, num)).collect_vec()));

        let blocks = (1..=n)
            .step_by(block)
            .cartesian_product((1..=n).step_by(block))
            .cartesian_product(range())
            .map(|((br, bc), num)| {
                exactly_one(
                    &(br..br + block)
                        .cartesian_product(bc..bc + block)
                        .map(|(r, c)| variable(r, c, num))
                        .collect_vec(),
                )
            });

        let clues = self.board.0.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &num)| num != 0)
                .map(move |(c, &num)| variable(r + 1, c + 1, num))
        });

        Formula::ands([
            Formula::ands(cells),
            Formula::ands(rows),
            Formula::ands(cols),
            Formula::ands(blocks),
            Formula::ands(clues),
        ])
    }

    /// Reads the grid back out of a satisfying valuation.
    #[must_use]
    pub fn decode(&self, valuation: &Valuation) -> Board {
        let n = usize::from(self.size);
        let mut board = vec![vec![0; n]; n];
        for ((r, c), num) in (1..=n).cartesian_product(1..=n).cartesian_product(1..=n) {
            if valuation.get(&variable_name(r, c, num)) == Some(true) {
                board[r - 1][c - 1] = num;
            }
        }
        Board::new(board)
    }
}

impl Display for Sudoku {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.board)
    }
}

/// Reads a puzzle file in the format accepted by [`Board::parse`].
///
/// # Errors
///
/// I/O failures, and [`Error::InvalidSudoku`] for malformed grids.
pub fn parse_sudoku_file(path: &Path) -> Result<Sudoku> {
    let text = std::fs::read_to_string(path)?;
    Sudoku::new(Board::parse(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::dpll::dpll;

    fn solve(puzzle: &Sudoku) -> Board {
        let formula = puzzle.to_formula();
        let model = dpll(&Valuation::new(), &formula.clauses(), &puzzle.variables())
            .into_valuation()
            .expect("puzzle should be solvable");
        assert!(formula.evaluate(&model).unwrap());
        puzzle.decode(&model)
    }

    #[test]
    fn test_variables_match_formula() {
        let sudoku = Sudoku::new(Board::from(&EXAMPLE_FOUR)).unwrap();
        let mut from_formula = sudoku.to_formula().vars().into_iter().collect_vec();
        from_formula.sort();
        let mut listed = sudoku.variables();
        listed.sort();
        assert_eq!(listed, from_formula);
        assert_eq!(listed.len(), 64);
    }

    #[test]
    fn test_solve_four() {
        let sudoku = Sudoku::new(Board::from(&EXAMPLE_FOUR)).unwrap();
        let solution = solve(&sudoku);
        assert!(solution.is_solved(Size::Four));
        assert!(solution.respects(&sudoku.board));
    }

    #[test]
    fn test_solve_empty_four() {
        let sudoku = Sudoku::new(Board::new(vec![vec![0; 4]; 4])).unwrap();
        assert!(solve(&sudoku).is_solved(Size::Four));
    }

    #[test]
    fn test_solve_nine() {
        let sudoku = Sudoku::new(Board::from(&EXAMPLE_NINE)).unwrap();
        let solution = solve(&sudoku);
        assert!(solution.is_solved(Size::Nine));
        assert!(solution.respects(&sudoku.board));
        assert_eq!(solution.rows()[0], vec![5, 3, 4, 6, 7, 8, 9, 1, 2]);
    }

    #[test]
    fn test_contradictory_clues_are_unsat() {
        let mut board = EXAMPLE_FOUR;
        board[0][1] = 1;
        let sudoku = Sudoku::new(Board::from(&board)).unwrap();
        let formula = sudoku.to_formula();
        let outcome = dpll(&Valuation::new(), &formula.clauses(), &sudoku.variables());
        assert!(!outcome.is_sat());
    }

    #[test]
    fn test_parse_board() {
        let text = "1..4\n.41.\n----\n.14.\n4..1\n";
        assert_eq!(Board::parse(text).unwrap(), Board::from(&EXAMPLE_FOUR));

        let spaced = "1 0 | 0 4\n0 4 | 1 0\n----+----\n0 1 | 4 0\n4 0 | 0 1";
        assert_eq!(Board::parse(spaced).unwrap(), Board::from(&EXAMPLE_FOUR));
    }

    #[test]
    fn test_display_roundtrip() {
        let board = Board::from(&EXAMPLE_NINE);
        let shown = board.to_string();
        assert!(shown.starts_with("53.|.7.|...\n"));
        assert_eq!(Board::parse(&shown).unwrap(), board);
    }

    #[test]
    fn test_parse_block_separated_rows() {
        let text = "53.|.7.|...\n\
                    6..|195|...\n\
                    .98|...|.6.\n\
                    ---+---+---\n\
                    8..|.6.|..3\n\
                    4..|8.3|..1\n\
                    7..|.2.|..6\n\
                    ---+---+---\n\
                    .6.|...|28.\n\
                    ...|419|..5\n\
                    ...|.8.|.79\n";
        assert_eq!(Board::parse(text).unwrap(), Board::from(&EXAMPLE_NINE));
        assert_eq!(Board::parse("53.|.7.|...\n").unwrap().rows()[0], EXAMPLE_NINE[0].to_vec());
    }

    #[test]
    fn test_display_roundtrip_sixteen() {
        let mut cells = vec![vec![0; 16]; 16];
        cells[0][0] = 16;
        cells[3][7] = 9;
        cells[15][15] = 1;
        let board = Board::new(cells);
        let shown = board.to_string();
        assert!(shown.starts_with("16  .  .  . |"));
        assert_eq!(Board::parse(&shown).unwrap(), board);
    }

    #[test]
    fn test_ragged_board_is_not_solved() {
        assert!(!Board::new(vec![vec![1, 2, 3, 4], vec![1]]).is_solved(Size::Four));
        let ragged = Board::new(vec![
            vec![1, 2, 3, 4],
            vec![3, 4, 1],
            vec![2, 1, 4, 3],
            vec![4, 3, 2, 1],
        ]);
        assert!(!ragged.is_solved(Size::Four));
        assert!(!Board::new(Vec::new()).is_solved(Size::Nine));

        let solved = Board::new(vec![
            vec![1, 2, 3, 4],
            vec![3, 4, 1, 2],
            vec![2, 1, 4, 3],
            vec![4, 3, 2, 1],
        ]);
        assert!(solved.is_solved(Size::Four));
    }

    #[test]
    fn test_invalid_boards() {
        assert!(matches!(Board::parse("1x.4"), Err(Error::InvalidSudoku(_))));
        assert!(matches!(
            Sudoku::new(Board::new(vec![vec![0; 3]; 3])),
            Err(Error::InvalidSudoku(_))
        ));
        assert!(matches!(
            Sudoku::new(Board::new(vec![vec![5, 0, 0, 0], vec![0; 4], vec![0; 4], vec![0; 4]])),
            Err(Error::InvalidSudoku(_))
        ));
        assert!(matches!(
            Sudoku::new(Board::new(vec![vec![0; 4], vec![0; 3], vec![0; 4], vec![0; 4]])),
            Err(Error::InvalidSudoku(_))
        ));
    }
}
