use knight_tour::Board;

fn main() {
    let mut board = Board::new(10, 10);
    if board.solve() {
        println!("{:?}", board.move_stack());
    } else {
        println!("No knight's tour exists on this board");
    }
}
