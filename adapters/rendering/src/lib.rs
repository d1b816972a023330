#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Text views of a Nuggets world for spectators and players.
//!
//! Renderers are pure: they borrow the world and return a fresh string laid
//! out row-major, every row exactly as wide as the grid and terminated by a
//! newline. Presenting those strings is delegated to a [`Presenter`].

use std::io;

use anyhow::Result as AnyResult;
use nuggets_core::{Cell, CellCoord, Glyph, Occupant, SELF_GLYPH};
use nuggets_world::World;

/// Symbol drawn for cells that are hidden or missing.
const BLANK: char = ' ';

/// Renders the full map as seen by a spectator.
///
/// Occupants are drawn with their own glyph; every other cell shows its
/// terrain symbol. Visibility is ignored.
#[must_use]
pub fn render_spectator<C: Cell, P: Occupant>(world: &World<C, P>) -> String {
    render_with(world, |cell, occupant| match occupant {
        Some(occupant) => occupant.glyph(),
        None => cell.map_or(BLANK, |cell| cell.glyph().symbol()),
    })
}

/// Renders the map as seen by the occupant identified by `viewer`.
///
/// The viewer is drawn as `@`. Cells the viewer cannot see are blank, and a
/// gold pile the viewer has not yet discovered is drawn as plain floor.
#[must_use]
pub fn render_for<C: Cell, P: Occupant>(world: &World<C, P>, viewer: char) -> String {
    render_with(world, |cell, occupant| {
        let Some(cell) = cell else {
            return BLANK;
        };
        if !cell.is_visible() {
            return BLANK;
        }
        match occupant {
            Some(occupant) if occupant.glyph() == viewer => SELF_GLYPH,
            Some(occupant) => occupant.glyph(),
            None if cell.glyph() == Glyph::Gold && cell.hides_gold() => Glyph::Floor.symbol(),
            None => cell.glyph().symbol(),
        }
    })
}

/// Writes the spectator view to `out`.
pub fn write_spectator<C, P, W>(world: &World<C, P>, mut out: W) -> io::Result<()>
where
    C: Cell,
    P: Occupant,
    W: io::Write,
{
    out.write_all(render_spectator(world).as_bytes())?;
    out.flush()
}

fn render_with<C, P, F>(world: &World<C, P>, mut symbol: F) -> String
where
    C: Cell,
    P: Occupant,
    F: FnMut(Option<&C>, Option<&P>) -> char,
{
    let columns = world.columns();
    let width = usize::try_from(columns).unwrap_or(0) + 1;
    let mut view = String::with_capacity(width * usize::try_from(world.rows()).unwrap_or(0));
    for row in 0..world.rows() {
        for column in 0..columns {
            let coord = CellCoord::new(column, row);
            view.push(symbol(world.cell(coord), world.occupant_at(coord)));
        }
        view.push('\n');
    }
    view
}

/// Output backend capable of presenting rendered views.
pub trait Presenter {
    /// Presents one rendered view.
    fn present(&mut self, view: &str) -> AnyResult<()>;
}

/// Presenter that writes each view to a byte sink followed by a blank line.
#[derive(Debug)]
pub struct TextPresenter<W> {
    out: W,
}

impl<W: io::Write> TextPresenter<W> {
    /// Creates a presenter writing to `out`.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Releases the underlying sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: io::Write> Presenter for TextPresenter<W> {
    fn present(&mut self, view: &str) -> AnyResult<()> {
        self.out.write_all(view.as_bytes())?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}
