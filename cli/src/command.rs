use anyhow::{Context, bail};
use std::str::FromStr;
use sweeper_core::{Coord, Coord2, GameSession, MinePlacer};

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    NewGame,
    Quit,
}

fn parse_coords<'a>(mut parts: impl Iterator<Item = &'a str>) -> anyhow::Result<Coord2> {
    let y: Coord = parts
        .next()
        .context("missing row")?
        .parse()
        .context("row is not a number")?;
    let x: Coord = parts
        .next()
        .context("missing column")?
        .parse()
        .context("column is not a number")?;
    if parts.next().is_some() {
        bail!("too many arguments");
    }
    Ok((y, x))
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            bail!("empty command, try `r Y X`, `f Y X`, `n` or `q`");
        };

        Ok(match verb {
            "r" | "reveal" => Command::Reveal(parse_coords(parts)?),
            "f" | "flag" => Command::Flag(parse_coords(parts)?),
            "n" | "new" => Command::NewGame,
            "q" | "quit" => Command::Quit,
            other => bail!("unknown command `{other}`"),
        })
    }
}

impl Command {
    /// Runs a move against `session`, returning whether the screen needs a redraw.
    pub(crate) fn apply<P: MinePlacer>(
        self,
        session: &mut GameSession<P>,
    ) -> sweeper_core::Result<bool> {
        match self {
            Self::Reveal(coords) => {
                let outcome = session.reveal(coords)?;
                log::debug!("reveal {:?}: {:?}", coords, outcome);
                Ok(outcome.has_update())
            }
            Self::Flag(coords) => Ok(session.toggle_flag(coords)?.has_update()),
            Self::NewGame => {
                session.restart(session.config());
                Ok(true)
            }
            Self::Quit => Ok(false),
        }
    }
}
