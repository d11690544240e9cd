//! Property tests over random boards.
//!
//! - the location map and the layer indices always agree
//! - clearing edges twice is the same as clearing once
//! - diffusion reaches a fixed point in one pass
//! - explosions never leave the board

use proptest::prelude::*;

use fire_rescue::board::Board;
use fire_rescue::core::{BoardSize, Cell, Colour, PlayerId, Poi, PoiFace, Threat, TokenKind};
use fire_rescue::fire::{advance_fire, ignite, remove_fire_from_edges, smoke_into_fire, Ignition};

const SIZE: BoardSize = BoardSize::new(10, 8);

/// 0 = empty, 1 = smoke, 2 = fire, one entry per cell row by row.
fn threat_layout() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(0u8..3, SIZE.area())
}

fn board_from(layout: &[u8]) -> Board {
    let mut board = Board::new(SIZE);
    for (cell, code) in SIZE.cells().zip(layout.iter().copied()) {
        match code {
            1 => {
                board.set_threat(cell, Threat::Smoke);
            }
            2 => {
                board.set_threat(cell, Threat::Fire);
            }
            _ => {}
        }
    }
    board
}

fn snapshot(board: &Board) -> Vec<Option<Threat>> {
    SIZE.cells().map(|c| board.threat_at(c)).collect()
}

fn any_cell() -> impl Strategy<Value = Cell> {
    (0..SIZE.width, 0..SIZE.height).prop_map(|(x, y)| Cell::new(x, y))
}

#[derive(Clone, Debug)]
enum Op {
    Threat(Cell, bool),
    Poi(Cell, bool),
    Player(Cell),
    MovePlayer(usize, Cell),
    RemoveThreat(Cell),
    Ignite(Cell),
    Flip(Cell),
}

fn any_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any_cell(), any::<bool>()).prop_map(|(c, fire)| Op::Threat(c, fire)),
        (any_cell(), any::<bool>()).prop_map(|(c, replace)| Op::Poi(c, replace)),
        any_cell().prop_map(Op::Player),
        (0usize..4, any_cell()).prop_map(|(i, c)| Op::MovePlayer(i, c)),
        any_cell().prop_map(Op::RemoveThreat),
        any_cell().prop_map(Op::Ignite),
        any_cell().prop_map(Op::Flip),
    ]
}

proptest! {
    #[test]
    fn prop_layers_agree_under_mutation(ops in proptest::collection::vec(any_op(), 1..60)) {
        let mut board = Board::new(SIZE);
        let mut players = Vec::new();

        for op in ops {
            match op {
                Op::Threat(cell, fire) => {
                    let threat = if fire { Threat::Fire } else { Threat::Smoke };
                    let token = board.mint(TokenKind::Threat(threat));
                    board.add_threat_token(cell, token);
                }
                Op::Poi(cell, replace) => {
                    let token = board.mint(TokenKind::Poi(Poi::Hidden(PoiFace::Victim)));
                    board.add_poi_token(cell, token, replace);
                }
                Op::Player(cell) => {
                    let token = board.mint(TokenKind::Player {
                        player: PlayerId::new(players.len() as u8),
                        name: String::from("P"),
                        colour: Colour::GREEN,
                    });
                    let id = token.id;
                    if board.add_player_token(cell, token) {
                        players.push(id);
                    }
                }
                Op::MovePlayer(i, cell) => {
                    if let Some(&id) = players.get(i) {
                        board.move_player_token(cell, id);
                    }
                }
                Op::RemoveThreat(cell) => {
                    board.remove_threat_at(cell);
                }
                Op::Ignite(cell) => {
                    advance_fire(&mut board, cell);
                }
                Op::Flip(cell) => {
                    if let Some(id) = board.poi_at(cell).map(|t| t.id) {
                        board.flip_poi(id);
                    }
                }
            }
            prop_assert!(board.is_consistent());
        }

        for (cell, token) in board.tokens() {
            prop_assert!(SIZE.contains(cell));
            prop_assert_eq!(board.location(token.id), Some(cell));
        }
    }

    #[test]
    fn prop_clear_edges_idempotent(layout in threat_layout()) {
        let mut board = board_from(&layout);
        remove_fire_from_edges(&mut board);
        let once = snapshot(&board);

        prop_assert_eq!(remove_fire_from_edges(&mut board), 0);
        prop_assert_eq!(snapshot(&board), once);
    }

    #[test]
    fn prop_diffusion_fixed_point(layout in threat_layout()) {
        let mut board = board_from(&layout);
        smoke_into_fire(&mut board);
        let once = snapshot(&board);

        prop_assert!(smoke_into_fire(&mut board).is_empty());
        prop_assert_eq!(snapshot(&board), once);

        // No smoke is left touching fire.
        for cell in board.cells_with(Threat::Smoke) {
            prop_assert!(SIZE.neighbors(cell).iter().all(|&n| !board.is_fire_at(n)));
        }
    }

    #[test]
    fn prop_diffusion_converts_whole_components(layout in threat_layout()) {
        let mut board = board_from(&layout);
        let smoke_before = board.cells_with(Threat::Smoke);
        let converted = smoke_into_fire(&mut board);

        // Only smoke converts, and it converts at most once.
        for cell in &converted {
            prop_assert!(smoke_before.contains(cell));
        }
        prop_assert_eq!(
            converted.len() + board.cells_with(Threat::Smoke).len(),
            smoke_before.len()
        );
    }

    #[test]
    fn prop_explosion_bounded(layout in threat_layout(), target in any_cell()) {
        let mut board = board_from(&layout);
        board.set_threat(target, Threat::Fire);
        let fire_before = board.cells_with(Threat::Fire).len();

        let Ignition::Explosion { landed } = ignite(&mut board, target) else {
            panic!("a burning cell must explode");
        };

        prop_assert!(landed.len() <= 4);
        for cell in &landed {
            prop_assert!(SIZE.contains(*cell));
            prop_assert!(board.is_fire_at(*cell));
            // Landings sit on the target's row or column.
            prop_assert!(cell.x == target.x || cell.y == target.y);
        }
        prop_assert_eq!(board.cells_with(Threat::Fire).len(), fire_before + landed.len());
        prop_assert!(board.is_consistent());
    }

    #[test]
    fn prop_advance_fire_clears_ring(layout in threat_layout(), target in any_cell()) {
        let mut board = board_from(&layout);
        advance_fire(&mut board, target);
        prop_assert!(SIZE.edge_cells().all(|c| board.threat_at(c).is_none()));
        prop_assert!(board.is_consistent());
    }
}
