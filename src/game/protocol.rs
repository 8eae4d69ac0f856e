//! Interactive Protocol State Machine
//!
//! Drives one game run: first-move determination, dice selection, two
//! independent commit-then-reveal rolls, and resolution. The session owns
//! the die set, the cached probability matrix, and the pre-rendered help
//! table, so the prompt loop has no hidden ambient state.
//!
//! Every prompt accepts `?` (print the probability table, non-consuming)
//! and `X` (abort the run). Aborting never reveals an undisclosed
//! commitment key: the open commitment is simply dropped.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::dice::{Die, DieSet, FACES};
use crate::core::fairness::FairCommitment;
use crate::core::probability::ProbabilityMatrix;
use crate::error::Result;

/// Exact acknowledgement printed on a user-requested exit.
pub const EXIT_ACK: &str = "Exiting...";

/// The two parties of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Player {
    /// The machine: commits to every draw and selects by policy.
    Host,
    /// The human at the prompt.
    Guesser,
}

/// Host die selection policy.
///
/// The original game hardwired one specific die for the host; selection is
/// a policy decision, not part of the cryptographic protocol, so it is
/// configurable here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum HostPolicy {
    /// Pick the remaining die with the highest win probability against the
    /// guesser's die, or the highest mean win probability against all
    /// remaining dice when choosing first. Ties go to the lowest index.
    #[default]
    BestAverage,
    /// Pick the lowest-indexed remaining die.
    FirstAvailable,
}

/// Protocol phase, advanced strictly in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Binary commitment deciding who selects a die first.
    FirstMove,
    /// Both parties pick distinct dice.
    DiceSelection,
    /// Commit-reveal roll resolving the host's die.
    HostRoll,
    /// Commit-reveal roll resolving the guesser's die.
    GuesserRoll,
    /// Faces compared, winner announced.
    Resolved,
    /// User exited; no further reveals.
    Aborted,
}

/// Final comparison of the two realized faces.
///
/// Equal faces are an explicit draw. The original awarded ties to the
/// host through a bare `>=`; a symmetric game must not structurally
/// favor either side, so neither party wins a tie here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    /// The guesser's face was strictly greater.
    Guesser,
    /// The host's face was strictly greater.
    Host,
    /// Equal faces.
    Draw,
}

/// Outcome of a resolved run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Realized face of the host's die.
    pub host_face: i32,
    /// Realized face of the guesser's die.
    pub guesser_face: i32,
    /// Who won the comparison.
    pub winner: Winner,
}

/// Outcome of a full session run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The run reached the final comparison.
    Resolved(Resolution),
    /// The user exited before resolution.
    Aborted,
}

/// Result of one prompt interaction.
enum Flow<T> {
    /// A legal token was entered.
    Next(T),
    /// The user exited (or the input stream ended).
    Abort,
}

/// A recognized prompt token.
enum Token {
    Number(usize),
    Exit,
    Help,
}

/// Classify one input line against the legal numeric range `[0, max)`.
fn parse_token(line: &str, max: usize) -> Option<Token> {
    let line = line.trim();
    match line {
        "X" => Some(Token::Exit),
        "?" => Some(Token::Help),
        _ => match line.parse::<usize>() {
            Ok(n) if n < max => Some(Token::Number(n)),
            _ => None,
        },
    }
}

/// One interactive game run.
///
/// Generic over the prompt input and display output streams so scripted
/// runs can drive the full protocol in tests.
pub struct GameSession<R, W> {
    dice: DieSet,
    matrix: ProbabilityMatrix,
    help_table: String,
    host_policy: HostPolicy,
    phase: Phase,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> GameSession<R, W> {
    /// Set up a session: compute and cache the probability matrix, render
    /// the help table once so repeated `?` output is byte-identical.
    pub fn new(
        dice: DieSet,
        host_policy: HostPolicy,
        render_table: impl Fn(&DieSet, &ProbabilityMatrix) -> String,
        input: R,
        output: W,
    ) -> Result<Self> {
        let matrix = ProbabilityMatrix::compute(&dice)?;
        let help_table = render_table(&dice, &matrix);
        Ok(Self {
            dice,
            matrix,
            help_table,
            host_policy,
            phase: Phase::FirstMove,
            input,
            output,
        })
    }

    /// Current protocol phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Run the protocol to completion or abort.
    pub fn run(mut self) -> Result<Outcome> {
        self.phase = Phase::FirstMove;
        let first = match self.determine_first_move()? {
            Flow::Next(p) => p,
            Flow::Abort => return Ok(Outcome::Aborted),
        };

        self.phase = Phase::DiceSelection;
        let (host_die, guesser_die) = match self.select_dice(first)? {
            Flow::Next(pair) => pair,
            Flow::Abort => return Ok(Outcome::Aborted),
        };

        self.phase = Phase::HostRoll;
        let host_face = match self.run_roll(Player::Host, &host_die)? {
            Flow::Next(f) => f,
            Flow::Abort => return Ok(Outcome::Aborted),
        };

        self.phase = Phase::GuesserRoll;
        let guesser_face = match self.run_roll(Player::Guesser, &guesser_die)? {
            Flow::Next(f) => f,
            Flow::Abort => return Ok(Outcome::Aborted),
        };

        self.phase = Phase::Resolved;
        let resolution = self.resolve(host_face, guesser_face)?;
        Ok(Outcome::Resolved(resolution))
    }

    /// Binary commitment deciding who moves first.
    ///
    /// The guesser moves first iff their guess matches the committed bit.
    fn determine_first_move(&mut self) -> Result<Flow<Player>> {
        info!("determining first move");
        let commitment = FairCommitment::commit(2)?;

        writeln!(self.output, "Let's determine who makes the first move.")?;
        writeln!(
            self.output,
            "I selected a random value in the range 0..1 (HMAC={}).",
            hex::encode(commitment.digest())
        )?;
        writeln!(self.output, "Try to guess my selection.")?;
        writeln!(self.output, "0 - 0")?;
        writeln!(self.output, "1 - 1")?;
        writeln!(self.output, "X - exit")?;
        writeln!(self.output, "? - help")?;

        let guess = match self.prompt_number(
            "Your guess: ",
            2,
            "Invalid input. Please enter 0, 1, X, or ?.",
        )? {
            Flow::Next(n) => n,
            Flow::Abort => return Ok(Flow::Abort),
        };

        let (value, key) = commitment.reveal();
        debug!(verified = commitment.self_check(), "first-move reveal");
        writeln!(
            self.output,
            "My selection: {} (KEY={}).",
            value,
            hex::encode(key)
        )?;

        let first = if guess as u32 == value {
            writeln!(self.output, "You make the first move.")?;
            Player::Guesser
        } else {
            writeln!(self.output, "I make the first move.")?;
            Player::Host
        };
        info!(?first, "first move determined");
        Ok(Flow::Next(first))
    }

    /// Both parties pick dice; whoever won the first move picks first and
    /// the other picks from what is left. The two picks are always
    /// distinct indices.
    fn select_dice(&mut self, first: Player) -> Result<Flow<(Die, Die)>> {
        let all: Vec<usize> = (0..self.dice.len()).collect();

        let (host_index, guesser_index) = match first {
            Player::Guesser => {
                let g = match self.prompt_die_choice(&all)? {
                    Flow::Next(n) => n,
                    Flow::Abort => return Ok(Flow::Abort),
                };
                let remaining: Vec<usize> = all.into_iter().filter(|&i| i != g).collect();
                let h = self.choose_host_die(&remaining, Some(g));
                self.announce_host_choice(h)?;
                (h, g)
            }
            Player::Host => {
                let h = self.choose_host_die(&all, None);
                self.announce_host_choice(h)?;
                let remaining: Vec<usize> = all.into_iter().filter(|&i| i != h).collect();
                let g = match self.prompt_die_choice(&remaining)? {
                    Flow::Next(n) => n,
                    Flow::Abort => return Ok(Flow::Abort),
                };
                (h, g)
            }
        };

        info!(host_index, guesser_index, "dice selected");
        // Indices come from disjoint candidate lists.
        let host_die = self.dice.get(host_index).cloned();
        let guesser_die = self.dice.get(guesser_index).cloned();
        match (host_die, guesser_die) {
            (Some(h), Some(g)) => Ok(Flow::Next((h, g))),
            // Candidate lists are built from 0..len, so this is unreachable.
            _ => Ok(Flow::Abort),
        }
    }

    /// Menu-driven die selection for the guesser, restricted to `available`
    /// original indices.
    fn prompt_die_choice(&mut self, available: &[usize]) -> Result<Flow<usize>> {
        writeln!(self.output, "Choose your dice:")?;
        for &i in available {
            let label = self.dice.get(i).map(Die::label).unwrap_or_default();
            writeln!(self.output, "{i} - {label}")?;
        }
        writeln!(self.output, "X - exit")?;
        writeln!(self.output, "? - help")?;

        loop {
            let n = match self.prompt_number(
                "Your selection: ",
                self.dice.len(),
                "Invalid input. Please enter a valid dice index, X, or ?.",
            )? {
                Flow::Next(n) => n,
                Flow::Abort => return Ok(Flow::Abort),
            };
            if available.contains(&n) {
                let label = self.dice.get(n).map(Die::label).unwrap_or_default();
                writeln!(self.output, "You choose the [{label}] dice.")?;
                return Ok(Flow::Next(n));
            }
            writeln!(
                self.output,
                "Invalid input. Please enter a valid dice index, X, or ?."
            )?;
        }
    }

    /// Policy-driven host die selection among `available` indices.
    ///
    /// `opponent` is the guesser's die when the guesser picked first.
    fn choose_host_die(&self, available: &[usize], opponent: Option<usize>) -> usize {
        debug_assert!(!available.is_empty());
        match self.host_policy {
            HostPolicy::FirstAvailable => available[0],
            HostPolicy::BestAverage => {
                let score = |i: usize| match opponent {
                    Some(g) => self.matrix.probability(i, g),
                    None => {
                        let others: Vec<usize> =
                            available.iter().copied().filter(|&j| j != i).collect();
                        self.matrix.mean_probability_against(i, &others)
                    }
                };
                let mut best = available[0];
                let mut best_score = score(best);
                for &i in &available[1..] {
                    let s = score(i);
                    if s > best_score {
                        best = i;
                        best_score = s;
                    }
                }
                best
            }
        }
    }

    fn announce_host_choice(&mut self, index: usize) -> Result<()> {
        let label = self.dice.get(index).map(Die::label).unwrap_or_default();
        writeln!(self.output, "I choose the [{label}] dice.")?;
        Ok(())
    }

    /// One commit-reveal roll resolving `die`.
    ///
    /// The host always commits the secret value; the guesser always types
    /// the modular contribution. The two invocations differ only in whose
    /// die the combined result indexes, which is what makes each party's
    /// roll independent of the other's commitment.
    fn run_roll(&mut self, whose: Player, die: &Die) -> Result<Flow<i32>> {
        match whose {
            Player::Host => writeln!(self.output, "It's time for my throw.")?,
            Player::Guesser => writeln!(self.output, "It's time for your throw.")?,
        }

        let commitment = FairCommitment::commit(FACES as u32)?;
        writeln!(
            self.output,
            "I selected a random value in the range 0..5 (HMAC={}).",
            hex::encode(commitment.digest())
        )?;
        writeln!(self.output, "Add your number modulo 6.")?;
        for i in 0..FACES {
            writeln!(self.output, "{i} - {i}")?;
        }
        writeln!(self.output, "X - exit")?;
        writeln!(self.output, "? - help")?;

        let contribution = match self.prompt_number(
            "Your selection: ",
            FACES,
            "Invalid input. Please enter a number between 0 and 5, X, or ?.",
        )? {
            Flow::Next(n) => n,
            Flow::Abort => return Ok(Flow::Abort),
        };

        let (value, key) = commitment.reveal();
        debug!(?whose, verified = commitment.self_check(), "roll reveal");
        writeln!(
            self.output,
            "My number is {} (KEY={}).",
            value,
            hex::encode(key)
        )?;

        let result = (value as usize + contribution) % FACES;
        writeln!(
            self.output,
            "The result is {value} + {contribution} = {result} (mod 6)."
        )?;

        let face = die.face(result);
        match whose {
            Player::Host => writeln!(self.output, "My throw is {face}.")?,
            Player::Guesser => writeln!(self.output, "Your throw is {face}.")?,
        }
        info!(?whose, result, face, "roll resolved");
        Ok(Flow::Next(face))
    }

    /// Compare realized faces. Strictly greater wins; equal is a draw.
    fn resolve(&mut self, host_face: i32, guesser_face: i32) -> Result<Resolution> {
        let winner = if guesser_face > host_face {
            writeln!(self.output, "You win ({guesser_face} > {host_face})!")?;
            Winner::Guesser
        } else if host_face > guesser_face {
            writeln!(self.output, "I win ({host_face} > {guesser_face})!")?;
            Winner::Host
        } else {
            writeln!(self.output, "It's a tie ({guesser_face} = {host_face}).")?;
            Winner::Draw
        };
        info!(host_face, guesser_face, ?winner, "resolved");
        Ok(Resolution {
            host_face,
            guesser_face,
            winner,
        })
    }

    /// Prompt until a number in `[0, max)` is entered.
    ///
    /// `?` prints the cached table and re-prompts; `X` (and end of input)
    /// aborts; anything else prints `diagnostic` and re-prompts.
    fn prompt_number(&mut self, prompt: &str, max: usize, diagnostic: &str) -> Result<Flow<usize>> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                // Input stream ended; treat as an exit request.
                writeln!(self.output, "{EXIT_ACK}")?;
                self.phase = Phase::Aborted;
                return Ok(Flow::Abort);
            }

            match parse_token(&line, max) {
                Some(Token::Exit) => {
                    writeln!(self.output, "{EXIT_ACK}")?;
                    self.phase = Phase::Aborted;
                    info!("user exited");
                    return Ok(Flow::Abort);
                }
                Some(Token::Help) => {
                    writeln!(self.output, "{}", self.help_table)?;
                }
                Some(Token::Number(n)) => return Ok(Flow::Next(n)),
                None => {
                    writeln!(self.output, "{diagnostic}")?;
                }
            }
        }
    }
}
