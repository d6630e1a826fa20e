use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use janggi_core::setup::{layout, BackRank};
use janggi_core::{GameState, Janggi, Owner, Placed, Snapshot, Square, SquareSet};
use log::{debug, warn};

/// Interactive game over a line-based reader and a writer.
pub struct Session<R, W> {
    input: R,
    output: W,
    game: Janggi,
    colored: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(game: Janggi, input: R, output: W) -> Self {
        Self {
            input,
            output,
            game,
            colored: false,
        }
    }

    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Replaces the game in play, keeping the streams.
    pub fn load(&mut self, game: Janggi) {
        self.game = game;
    }

    pub fn game(&self) -> &Janggi {
        &self.game
    }

    /// Plays until the game ends or the input runs out.
    pub fn run(&mut self) -> Result<GameState> {
        while !self.game.state().is_terminal() {
            let board = self.game.render().colored(self.colored).to_string();
            write!(self.output, "{board}")?;

            let Some(label) = self.ask("Where is the piece that you would like to move?: ")? else {
                break;
            };
            let Some(placed) = self.game.piece_at(&label) else {
                writeln!(self.output, "The desired piece does not exist.")?;
                continue;
            };

            let legal = self.game.legal_destinations(&label)?;
            if legal.is_empty() {
                writeln!(self.output, "The piece cannot be moved.")?;
                continue;
            }
            writeln!(self.output, "Valid moves are: {legal}")?;
            self.preview(&legal)?;

            let Some(destination) = self.ask_destination(placed, legal)? else {
                continue;
            };
            let from = placed.square.to_string();
            if let Err(error) = self.game.play(&from, &destination) {
                if error.is_fatal() {
                    return Err(error).context("position cannot continue");
                }
                warn!("move {from} -> {destination} rejected: {error}");
            }
        }

        writeln!(self.output, "{}", self.game.state())?;
        Ok(self.game.state())
    }

    /// Prints the board with the destinations marked, drawn from a copy of the game.
    fn preview(&mut self, legal: &SquareSet) -> Result<()> {
        let mock = self.game.clone();
        let text = mock.render_with_markers(legal).colored(self.colored).to_string();
        write!(self.output, "{text}")?;
        Ok(())
    }

    /// `None` means pick another piece.
    fn ask_destination(&mut self, placed: Placed, legal: SquareSet) -> Result<Option<String>> {
        loop {
            let Some(answer) = self.ask(
                "Where would you like to move the piece?\nEnter 'q' to choose a different piece: ",
            )?
            else {
                return Ok(None);
            };
            if answer == "q" {
                return Ok(None);
            }
            match Square::parse(&answer) {
                Some(square) if square == placed.square => {
                    return Ok(Some(placed.square.to_string()))
                }
                Some(square) if legal.contains(square) => return Ok(Some(answer)),
                _ => writeln!(self.output, "Invalid destination.")?,
            }
        }
    }

    /// Prompts until the second and first back ranks both validate.
    pub fn prompt_setup(&mut self) -> Result<Snapshot> {
        writeln!(
            self.output,
            "Enter the back line setup for each side by using a string \
             representing the piece layout.\n\
             r = chariot, h = horse, e = elephant, g = guard,   = no piece\n\
             The input should look something like: rehg gehr\n\
             Capitalization does not matter."
        )?;
        loop {
            let Some(second) =
                self.ask_raw("Red's back line setup from Blue's perspective: ")?
            else {
                bail!("input ended before setup was complete");
            };
            let Some(first) =
                self.ask_raw("Blue's back line setup from Blue's perspective: ")?
            else {
                bail!("input ended before setup was complete");
            };
            let ranks = BackRank::parse(&second, Owner::Second)
                .and_then(|second| Ok((second, BackRank::parse(&first, Owner::First)?)));
            match ranks {
                Ok((second, first)) => return Ok(layout(&second, &first)),
                Err(error) => writeln!(self.output, "ERROR: {error}")?,
            }
        }
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        Ok(self.ask_raw(prompt)?.map(|line| line.trim().to_string()))
    }

    /// Reads one line without trimming spaces, which back ranks rely on.
    fn ask_raw(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("input closed");
            return Ok(None);
        }
        let line = line.trim_end_matches(['\n', '\r']).to_string();
        Ok(Some(line))
    }
}
