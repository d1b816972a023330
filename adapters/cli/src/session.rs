//! Keystroke loop driving the local player.

use std::io::BufRead;

use anyhow::{Context, Result};
use nuggets_core::{Command, Direction, Occupant};
use nuggets_rendering::{render_for, render_spectator, Presenter};
use nuggets_world::{self as world, query, World};
use rand::Rng;

/// Key that ends the session.
const QUIT_KEY: char = 'Q';

/// Single-player session over an owned world.
#[derive(Debug)]
pub(crate) struct Session<R> {
    world: World,
    player: char,
    rng: R,
}

impl<R: Rng> Session<R> {
    pub(crate) fn new(world: World, player: char, rng: R) -> Self {
        Self { world, player, rng }
    }

    /// Applies keystrokes line by line until input ends or the quit key.
    ///
    /// The player view is presented once up front and after every line. The
    /// spectator view and a gold summary close the session.
    pub(crate) fn run<I, O>(&mut self, input: I, presenter: &mut O) -> Result<()>
    where
        I: BufRead,
        O: Presenter,
    {
        presenter.present(&render_for(&self.world, self.player))?;

        for line in input.lines() {
            let line = line.context("reading keystrokes")?;
            let quit = self.handle_line(&line)?;
            presenter.present(&render_for(&self.world, self.player))?;
            if quit {
                break;
            }
        }

        presenter.present(&render_spectator(&self.world))?;
        presenter.present(&self.summary())?;
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Result<bool> {
        for key in line.chars().filter(|key| !key.is_whitespace()) {
            if key == QUIT_KEY {
                tracing::info!(player = %self.player, "quit requested");
                return Ok(true);
            }
            let Some(direction) = Direction::from_key(key) else {
                tracing::warn!(%key, "unrecognised key");
                continue;
            };
            let mut events = Vec::new();
            world::apply(
                &mut self.world,
                Command::MoveOccupant {
                    glyph: self.player,
                    direction,
                },
                &mut self.rng,
                &mut events,
            )?;
            for event in &events {
                tracing::debug!(?event, "world event");
            }
        }
        Ok(false)
    }

    fn summary(&self) -> String {
        let purse = self.world.occupant(self.player).map_or(0, Occupant::gold);
        format!(
            "{} collected {purse} gold; {} left on the ground\n",
            self.player,
            query::gold_on_terrain(&self.world)
        )
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use nuggets_core::{Cell, CellCoord, Glyph, Player, SessionHandle};
    use nuggets_rendering::TextPresenter;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn corridor_session() -> Session<ChaCha8Rng> {
        let mut world: World = World::from_map_str("|....|").expect("valid map");
        world
            .place_occupant(Player::spawn(
                'A',
                "alice",
                SessionHandle::detached(),
                CellCoord::new(1, 0),
            ))
            .expect("empty cell");
        if let Some(cell) = world.cell_mut(CellCoord::new(3, 0)) {
            cell.set_glyph(Glyph::Gold);
            cell.add_gold(7);
        }
        Session::new(world, 'A', ChaCha8Rng::seed_from_u64(0))
    }

    fn run(session: &mut Session<ChaCha8Rng>, input: &str) -> String {
        let mut presenter = TextPresenter::new(Vec::new());
        session
            .run(Cursor::new(input.to_owned()), &mut presenter)
            .expect("session runs");
        String::from_utf8(presenter.into_inner()).expect("utf-8")
    }

    #[test]
    fn moves_collect_gold_and_report_summary() {
        let mut session = corridor_session();

        let output = run(&mut session, "l\nl\n");

        assert_eq!(
            output,
            "|@.*.|\n\n|.@*.|\n\n|..@.|\n\n|..A.|\n\nA collected 7 gold; 0 left on the ground\n\n"
        );
    }

    #[test]
    fn quit_key_stops_processing_remaining_input() {
        let mut session = corridor_session();

        let output = run(&mut session, "lQl\nl\n");

        assert!(output.ends_with("|.A*.|\n\nA collected 0 gold; 7 left on the ground\n\n"));
        assert_eq!(
            session.world.occupant('A').map(Occupant::cell),
            Some(CellCoord::new(2, 0))
        );
    }

    #[test]
    fn unknown_keys_and_blocked_moves_leave_player_in_place() {
        let mut session = corridor_session();
        let _ = run(&mut session, "x h k\n");
        let cell = session.world.occupant('A').map(Occupant::cell);
        assert_eq!(cell, Some(CellCoord::new(1, 0)));
        assert_eq!(
            session.world.cell(CellCoord::new(0, 0)).map(Cell::glyph),
            Some(Glyph::VerticalBoundary)
        );
    }
}
