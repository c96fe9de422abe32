//! Property tests over random games
//!
//! Two participants share a space. One of them plays random moves chosen from
//! the destinations the board itself reports as legal; after every move both
//! scenes must show exactly the position's placement.

use proptest::prelude::*;

use spacechess::game::placement::decode_placement;
use spacechess::game::{Activation, BoardSquare, ChessGame};
use spacechess::scene::HeadlessScene;
use spacechess::sync::{SharedSpace, SpaceClient};

const INSTANCE: &str = "random-play";

/// A castle moves two objects; a capturing promotion creates one and
/// destroys two.
const MAX_CHURN_PER_MOVE: usize = 3;

struct Seat {
    game: ChessGame<u32>,
    scene: HeadlessScene,
    client: SpaceClient,
}

impl Seat {
    fn join(space: &SharedSpace, user: &str) -> Self {
        let mut game = ChessGame::new(INSTANCE);
        let mut scene = HeadlessScene::new();
        game.build(&mut scene, false);
        let client = space.connect_as(user);
        game.poll_initial_sync(&mut scene, &client);
        Self { game, scene, client }
    }

    fn sync(&mut self) {
        for event in self.client.drain_events() {
            self.game.handle_space_event(&mut self.scene, &self.client, &event);
        }
    }

    fn churn(&self) -> usize {
        self.scene.created_count() + self.scene.relocated_count() + self.scene.destroyed_count()
    }

    /// Every (origin, destinations) pair the side to move can play.
    fn playable(&self) -> Vec<(BoardSquare, Vec<BoardSquare>)> {
        let rules = self.game.rules();
        let side = rules.side_to_move();
        BoardSquare::all()
            .filter(|&square| rules.occupant(square).is_some_and(|piece| piece.color == side))
            .map(|square| (square, rules.legal_destinations(square)))
            .filter(|(_, targets)| !targets.is_empty())
            .collect()
    }
}

fn assert_matches_position(seat: &Seat) {
    let fen = seat.game.current_position();
    assert_eq!(seat.scene.pieces(), decode_placement(&fen).unwrap(), "scene differs from {fen}");
    assert_eq!(seat.game.pieces().len(), seat.scene.object_count());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_reported_moves_play_and_scenes_follow(choices in prop::collection::vec(any::<u32>(), 1..120)) {
        let space = SharedSpace::new();
        let mut mover = Seat::join(&space, "mover");
        let mut watcher = Seat::join(&space, "watcher");

        for choice in choices {
            let playable = mover.playable();
            if playable.is_empty() {
                break;
            }
            let (from, targets) = &playable[choice as usize % playable.len()];
            let to = targets[(choice as usize / playable.len()) % targets.len()];

            prop_assert_eq!(
                mover.game.activate_square(&mut mover.scene, &mover.client, *from),
                Activation::Selected(*from)
            );
            mover.scene.clear_ops();
            let played = mover.game.activate_square(&mut mover.scene, &mover.client, to);
            prop_assert!(matches!(played, Activation::Moved { .. }), "{} -> {} refused", from, to);
            prop_assert!(mover.churn() <= MAX_CHURN_PER_MOVE);
            assert_matches_position(&mover);

            // Echo of our own write changes nothing.
            mover.scene.clear_ops();
            mover.sync();
            prop_assert_eq!(mover.churn(), 0);

            watcher.scene.clear_ops();
            watcher.sync();
            prop_assert!(watcher.churn() <= MAX_CHURN_PER_MOVE);
            prop_assert_eq!(watcher.game.current_position(), mover.game.current_position());
            assert_matches_position(&watcher);
        }
    }
}
