use std::io::{self, BufRead, Write};
use std::ops::RangeInclusive;

use thiserror::Error;

use crate::*;

/// Line based access to whoever is playing.
pub trait Console {
    /// Next line of input without its line break, `None` once the input is exhausted.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Writes `text` as is, leaving the cursor after it.
    fn write(&mut self, text: &str) -> io::Result<()>;

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.write(text)?;
        self.write("\n")
    }
}

/// [`Console`] over any buffered reader and writer, e.g. stdin and stdout.
#[derive(Debug)]
pub struct IoConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> IoConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> Console for IoConsole<R, W> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(len);
        Ok(Some(line))
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()
    }
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Console failure: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Game(#[from] GameError),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    Won,
    Lost,
    /// Input ran out before the game was decided.
    Abandoned,
}

/// Values that skip the matching setup prompt when they are in range.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionOptions {
    pub size: Option<usize>,
    pub mines: Option<usize>,
}

/// The console dialogue for one game, from the setup questions to the "play again" pause.
#[derive(Clone, Debug, Default)]
pub struct Session {
    options: SessionOptions,
}

impl Session {
    pub fn new(options: SessionOptions) -> Self {
        Self { options }
    }

    pub fn run(
        &self,
        console: &mut impl Console,
        generator: &mut impl MineGenerator,
    ) -> core::result::Result<SessionOutcome, SessionError> {
        let Some(size) = self.ask_size(console)? else {
            return Ok(SessionOutcome::Abandoned);
        };
        let Some(mines) = self.ask_mines(console, size)? else {
            return Ok(SessionOutcome::Abandoned);
        };
        let mut game = Game::setup(size, mines, generator)?;

        console.write_line("")?;
        console.write_line("Here is your minefield:")?;
        write_grid(console, game.grid())?;

        let outcome = loop {
            console.write("Select a square to reveal (e.g. A1): ")?;
            let Some(line) = console.read_line()? else {
                log::info!("Input closed with {} moves left", game.moves_remaining());
                return Ok(SessionOutcome::Abandoned);
            };

            let turn = game.play(&line.trim().to_uppercase())?;
            match turn {
                TurnOutcome::InvalidInput(_) => {
                    console.write_line("Invalid input! Please try again.")?;
                    console.write_line("")?;
                }
                TurnOutcome::AlreadyRevealed => {
                    console.write_line("This square has already been revealed!")?;
                    console.write_line("")?;
                    write_grid(console, game.grid())?;
                }
                TurnOutcome::Revealed => write_grid(console, game.grid())?,
                TurnOutcome::Detonated => {
                    console.write_line("Oh no, you detonated a mine! Game over.")?;
                }
                TurnOutcome::Won => {
                    write_grid(console, game.grid())?;
                    console.write_line("Congratulations, you have won the game!")?;
                }
            }

            if turn.is_game_over() {
                break match game.state() {
                    GameState::Won => SessionOutcome::Won,
                    _ => SessionOutcome::Lost,
                };
            }
        };

        log::info!("Session finished: {outcome:?}");
        console.write_line("Press any key to play again...")?;
        console.read_line()?;
        Ok(outcome)
    }

    fn ask_size(&self, console: &mut impl Console) -> io::Result<Option<usize>> {
        let range = usize::from(MIN_GRID_SIZE)..=usize::from(MAX_GRID_SIZE);
        if let Some(size) = preset(self.options.size, &range, "grid size") {
            return Ok(Some(size));
        }
        ask_number(
            console,
            "Enter the size of the grid up to a max of 26 (e.g. 4 for a 4x4 grid): ",
            "Invalid input! Enter a number greater than 1 and less than or equal to 26",
            range,
        )
    }

    fn ask_mines(&self, console: &mut impl Console, size: usize) -> io::Result<Option<usize>> {
        let max = usize::from(max_mines(size as Coord));
        let range = 1..=max;
        if let Some(mines) = preset(self.options.mines, &range, "mine count") {
            return Ok(Some(mines));
        }
        ask_number(
            console,
            &format!("Enter the number of mines to place on the grid (Maximum {max}): "),
            "Invalid input! Enter a number greater than 0 and less than or equal to the maximum allowed.",
            range,
        )
    }
}

fn preset(value: Option<usize>, range: &RangeInclusive<usize>, what: &str) -> Option<usize> {
    let value = value?;
    if range.contains(&value) {
        Some(value)
    } else {
        log::warn!(
            "Ignoring {what} {value}, must be between {} and {}",
            range.start(),
            range.end()
        );
        None
    }
}

/// Keeps asking until a number in `range` is entered.
fn ask_number(
    console: &mut impl Console,
    prompt: &str,
    error: &str,
    range: RangeInclusive<usize>,
) -> io::Result<Option<usize>> {
    loop {
        console.write_line("")?;
        console.write_line(prompt)?;
        let Some(line) = console.read_line()? else {
            return Ok(None);
        };
        match line.trim().parse::<usize>() {
            Ok(value) if range.contains(&value) => return Ok(Some(value)),
            _ => console.write_line(error)?,
        }
    }
}

fn write_grid(console: &mut impl Console, grid: &Grid) -> io::Result<()> {
    for line in grid.to_string().lines() {
        console.write_line(line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Puts mines exactly where the test wants them.
    struct FixedMines(Vec<Coord2>);

    impl MineGenerator for FixedMines {
        fn place_mines(&mut self, grid: &mut Grid, count: usize) -> Result<()> {
            assert_eq!(count, self.0.len());
            for &coords in &self.0 {
                grid.cell_mut(coords)?.set_mine();
            }
            Ok(())
        }
    }

    fn run(
        options: SessionOptions,
        mines: &[Coord2],
        script: &str,
    ) -> (SessionOutcome, String) {
        let mut console = IoConsole::new(script.as_bytes(), Vec::new());
        let outcome = Session::new(options)
            .run(&mut console, &mut FixedMines(mines.to_vec()))
            .unwrap();
        let (_, output) = console.into_parts();
        (outcome, String::from_utf8(output).unwrap())
    }

    #[test]
    fn detonation_transcript() {
        let (outcome, output) = run(Default::default(), &[(0, 0)], "2\n1\nA1\n\n");

        assert_eq!(outcome, SessionOutcome::Lost);
        assert_eq!(
            output,
            "\n\
             Enter the size of the grid up to a max of 26 (e.g. 4 for a 4x4 grid): \n\
             \n\
             Enter the number of mines to place on the grid (Maximum 1): \n\
             \n\
             Here is your minefield:\n  1 2 \nA _ _ \nB _ _ \n\n\
             Select a square to reveal (e.g. A1): \
             Oh no, you detonated a mine! Game over.\n\
             Press any key to play again...\n"
        );
    }

    #[test]
    fn winning_game_shows_final_grid() {
        let (outcome, output) = run(Default::default(), &[(1, 1)], "2\n1\na1\nA2\n B1 \n\n");

        assert_eq!(outcome, SessionOutcome::Won);
        assert!(output.contains("A 1 1 \nB 1 _ \n\nCongratulations, you have won the game!\n"));
        assert!(output.ends_with("Press any key to play again...\n"));
    }

    #[test]
    fn setup_prompts_repeat_until_valid() {
        let (outcome, output) = run(Default::default(), &[(0, 0)], "1\nabc\n3\n0\n4\n1\nC3\n\n");

        assert_eq!(outcome, SessionOutcome::Won);
        assert_eq!(
            output
                .matches("Enter a number greater than 1 and less than or equal to 26")
                .count(),
            2
        );
        assert_eq!(
            output
                .matches("Enter a number greater than 0 and less than or equal to the maximum")
                .count(),
            2
        );
        assert!(output.contains("(Maximum 3)"));
    }

    #[test]
    fn bad_moves_are_reported_and_retried() {
        let (outcome, output) = run(Default::default(), &[(0, 0)], "2\n1\nZ9\nB2\nB2\nA1\n");

        assert_eq!(outcome, SessionOutcome::Lost);
        assert!(output.contains("Invalid input! Please try again.\n\n"));
        assert!(output.contains("This square has already been revealed!\n\n  1 2 \nA _ _ \nB _ 1 \n"));
    }

    #[test]
    fn presets_skip_prompts() {
        let options = SessionOptions {
            size: Some(2),
            mines: Some(1),
        };
        let (outcome, output) = run(options, &[(0, 0)], "A1\n");

        assert_eq!(outcome, SessionOutcome::Lost);
        assert!(!output.contains("Enter the size"));
        assert!(!output.contains("Enter the number of mines"));
    }

    #[test]
    fn out_of_range_presets_fall_back_to_prompts() {
        let options = SessionOptions {
            size: Some(40),
            mines: Some(2),
        };
        let (_, output) = run(options, &[(0, 0)], "2\n1\nA1\n");

        assert!(output.contains("Enter the size"));
        assert!(output.contains("Enter the number of mines"));
    }

    #[test]
    fn running_out_of_input_abandons() {
        let (outcome, _) = run(Default::default(), &[], "");
        assert_eq!(outcome, SessionOutcome::Abandoned);

        let (outcome, output) = run(Default::default(), &[(0, 0)], "2\n1\nB2\n");
        assert_eq!(outcome, SessionOutcome::Abandoned);
        assert!(!output.contains("Press any key"));
    }

    #[test]
    fn write_keeps_cursor_on_the_line() {
        let mut console = IoConsole::new(io::empty(), Vec::new());
        console.write("Select: ").unwrap();
        console.write_line("A1").unwrap();

        let (_, output) = console.into_parts();
        assert_eq!(output, b"Select: A1\n");
    }

    #[test]
    fn read_line_strips_line_endings() {
        let mut console = IoConsole::new("A1\r\nB2\nC3".as_bytes(), io::sink());

        assert_eq!(console.read_line().unwrap().as_deref(), Some("A1"));
        assert_eq!(console.read_line().unwrap().as_deref(), Some("B2"));
        assert_eq!(console.read_line().unwrap().as_deref(), Some("C3"));
        assert_eq!(console.read_line().unwrap(), None);
    }
}
