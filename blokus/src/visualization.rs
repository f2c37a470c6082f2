use crate::{Board, Player};

/// Draws a board as text, e.g. for logs or a terminal.
pub trait Render {
    fn render(&self, board: &Board) -> String;
}

/// A frame of `+`, `-` and `|`, with `.` for free cells and the player's
/// index for occupied cells.
///
/// ```text
/// +----+
/// |1..0|
/// |....|
/// +----+
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct AsciiRender;

impl Render for AsciiRender {
    fn render(&self, board: &Board) -> String {
        let horizontal = format!("+{}+", "-".repeat(board.board_w() as usize));
        let mut result = horizontal.clone();
        for y in 0..board.board_h() {
            result += "\n|";
            for x in 0..board.board_w() {
                match board.get_state(x, y) {
                    Some(player) => result += &player.index().to_string(),
                    None => result.push('.'),
                }
            }
            result.push('|');
        }
        result += "\n";
        result += &horizontal;
        result
    }
}

/// A rounded box with coordinates along the edges, and the initial of the
/// player's color for occupied cells.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoxRender;

fn initial(player: Player) -> char {
    match player {
        Player::Blue => 'B',
        Player::Yellow => 'Y',
        Player::Red => 'R',
        Player::Green => 'G',
    }
}

impl Render for BoxRender {
    fn render(&self, board: &Board) -> String {
        let width = board.board_w() as usize;
        // Column numbers, only every fifth one to keep it readable
        let mut result = String::from("    ");
        for x in 0..board.board_w() {
            if x % 5 == 0 {
                result += &format!("{:<2}", x);
            } else {
                result += "  ";
            }
        }
        result += "\n   ╭";
        result += &"──".repeat(width);
        result += "╮";
        for y in 0..board.board_h() {
            result += &format!("\n{:>2} │", y);
            for x in 0..board.board_w() {
                match board.get_state(x, y) {
                    Some(player) => {
                        result.push(initial(player));
                        result.push(' ');
                    }
                    None => result += "· ",
                }
            }
            result += "│";
        }
        result += "\n   ╰";
        result += &"──".repeat(width);
        result += "╯";
        result
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", AsciiRender.render(self))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{Move, Orientation, PieceCatalog};

    #[test]
    fn ascii() {
        let mut board = Board::new(Arc::new(PieceCatalog::standard()));
        board
            .add_move(Player::Blue, Move::new(1, 18, 0, Orientation::IDENTITY))
            .unwrap();
        board
            .add_move(Player::Red, Move::new(0, 0, 19, Orientation::IDENTITY))
            .unwrap();
        let text = AsciiRender.render(&board);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 22);
        assert_eq!(lines[0], format!("+{}+", "-".repeat(20)));
        assert_eq!(lines[1], format!("|{}00|", ".".repeat(18)));
        assert_eq!(lines[20], format!("|2{}|", ".".repeat(19)));
        assert_eq!(board.to_string(), text);
    }

    #[test]
    fn boxed() {
        let mut board = Board::new(Arc::new(PieceCatalog::standard()));
        board
            .add_move(Player::Yellow, Move::new(0, 0, 0, Orientation::IDENTITY))
            .unwrap();
        let text = BoxRender.render(&board);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 23);
        assert!(lines[2].starts_with(" 0 │Y · "));
        assert!(lines[22].starts_with("   ╰──"));
    }
}
