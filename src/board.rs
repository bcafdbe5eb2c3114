use std::{
    fmt::Display,
    ops::{Index, Not},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const NUM_TILES: usize = 9;

/// Rows, columns, then the two diagonals.
pub const WIN_PATTERNS: [[Move; 3]; 8] = [
    [Move(0), Move(1), Move(2)],
    [Move(3), Move(4), Move(5)],
    [Move(6), Move(7), Move(8)],
    [Move(0), Move(3), Move(6)],
    [Move(1), Move(4), Move(7)],
    [Move(2), Move(5), Move(8)],
    [Move(0), Move(4), Move(8)],
    [Move(2), Move(4), Move(6)],
];

#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Player {
    #[default]
    X,
    O,
}

impl Not for Player {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Player::O => Player::X,
            Player::X => Player::O,
        }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::O => write!(f, "O"),
            Player::X => write!(f, "X"),
        }
    }
}

impl FromStr for Player {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "x" | "X" => Ok(Player::X),
            "o" | "O" => Ok(Player::O),
            _ => Err(Error::InvalidArgument(format!("unknown player {s:?}"))),
        }
    }
}

pub type Cell = Option<Player>;

// rank:
// 1: 0 1 2
// 2: 3 4 5
// 3: 6 7 8
//    A B C : file
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Move(u8);

impl Move {
    pub const ALL: [Move; NUM_TILES] = [
        Move(0),
        Move(1),
        Move(2),
        Move(3),
        Move(4),
        Move(5),
        Move(6),
        Move(7),
        Move(8),
    ];

    pub fn new(index: usize) -> Result<Self> {
        if index >= NUM_TILES {
            return Err(Error::InvalidArgument(format!(
                "move index {index} is outside 0..{NUM_TILES}"
            )));
        }
        Ok(Self(index as u8))
    }

    pub fn xy(column: usize, row: usize) -> Result<Self> {
        if column >= 3 || row >= 3 {
            return Err(Error::InvalidArgument(format!(
                "coordinate ({column}, {row}) is off the board"
            )));
        }
        Ok(Self((row * 3 + column) as u8))
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn row(self) -> usize {
        self.index() / 3
    }

    pub const fn column(self) -> usize {
        self.index() % 3
    }
}

impl TryFrom<usize> for Move {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self> {
        Move::new(index)
    }
}

impl TryFrom<u8> for Move {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self> {
        Move::new(index as usize)
    }
}

impl From<Move> for u8 {
    fn from(mv: Move) -> Self {
        mv.0
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let file = (b'a' + self.column() as u8) as char;
        write!(f, "{}{}", file, self.row() + 1)
    }
}

/// Accepts either a raw index (`"4"`) or a coordinate (`"b2"`).
impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            return Move::new(index);
        }

        let invalid = || Error::InvalidArgument(format!("cannot parse {s:?} as a move"));
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let column = match file.to_ascii_lowercase() {
            'a' => 0,
            'b' => 1,
            'c' => 2,
            _ => return Err(invalid()),
        };
        let row = match rank {
            '1' => 0,
            '2' => 1,
            '3' => 2,
            _ => return Err(invalid()),
        };
        Move::xy(column, row)
    }
}

#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "[Cell; NUM_TILES]", into = "[Cell; NUM_TILES]")]
pub struct Board {
    tiles: [Cell; NUM_TILES],
}

impl Board {
    /// Builds a board from raw cells, rejecting any layout X-first alternation can't reach
    /// by count alone.
    pub fn from_cells(tiles: [Cell; NUM_TILES]) -> Result<Self> {
        let board = Self { tiles };
        let x = board.count(Some(Player::X));
        let o = board.count(Some(Player::O));
        if x != o && x != o + 1 {
            return Err(Error::InvalidArgument(format!(
                "board has {x} X marks and {o} O marks"
            )));
        }
        Ok(board)
    }

    pub fn cells(&self) -> &[Cell; NUM_TILES] {
        &self.tiles
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.tiles.iter().filter(|&&tile| tile == cell).count()
    }

    pub fn empty_count(&self) -> usize {
        self.count(None)
    }

    pub fn mark_count(&self) -> usize {
        self.tiles.iter().flatten().count()
    }

    /// Cells claimed by `player`, in ascending order.
    pub fn positions_of(&self, player: Player) -> impl Iterator<Item = Move> + '_ {
        Move::ALL
            .into_iter()
            .filter(move |&mv| self[mv] == Some(player))
    }

    pub(crate) fn mark(&mut self, tile: Move, player: Player) {
        self.tiles[tile.index()] = Some(player);
    }
}

impl TryFrom<[Cell; NUM_TILES]> for Board {
    type Error = Error;

    fn try_from(tiles: [Cell; NUM_TILES]) -> Result<Self> {
        Board::from_cells(tiles)
    }
}

impl From<Board> for [Cell; NUM_TILES] {
    fn from(board: Board) -> Self {
        board.tiles
    }
}

impl Index<Move> for Board {
    type Output = Cell;

    fn index(&self, tile: Move) -> &Self::Output {
        &self.tiles[tile.index()]
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, rank) in self.tiles.chunks_exact(3).enumerate() {
            write!(f, "{}│ ", i + 1)?;
            for tile in rank {
                match tile {
                    Some(player) => write!(f, "{player}")?,
                    None => write!(f, "-")?,
                };
            }

            writeln!(f)?;
        }
        write!(f, " ╰─────\n   ABC")?;
        Ok(())
    }
}
