//! Two-player dice turn tracker.
//!
//! Each player picks a colour on their first turn, then takes turns rolling.
//! Picking a colour uses up the turn. Rolling adds the face value to the
//! roller's score. There is no target score; the tracker only keeps turns
//! and totals.

use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Colours a player can pick for the die background.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Debug,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
    strum::EnumString,
)]
pub enum Colour {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl Colour {
    /// Every colour in dropdown order.
    pub fn all() -> impl Iterator<Item = Colour> {
        Colour::iter()
    }
}

/// Supported die shapes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Sides {
    Four = 4,
    #[default]
    Six = 6,
    Eight = 8,
    Ten = 10,
    Twelve = 12,
    Twenty = 20,
}

impl Sides {
    #[inline]
    pub fn count(self) -> u8 {
        self as u8
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Die {
    pub sides: Sides,
}

impl Die {
    pub fn new(sides: Sides) -> Die {
        Die { sides }
    }

    /// Roll once, uniformly in `1..=sides`.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        rng.random_range(1..=self.sides.count())
    }
}

/// Which of the two players.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum Seat {
    #[default]
    One,
    Two,
}

impl Seat {
    pub fn other(self) -> Seat {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    /// 1 or 2, as shown to players.
    pub fn number(self) -> u8 {
        match self {
            Seat::One => 1,
            Seat::Two => 2,
        }
    }

    fn index(self) -> usize {
        self.number() as usize - 1
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct DicePlayer {
    pub score: u32,
    pub colour: Option<Colour>,
}

impl DicePlayer {
    pub fn add_to_score(&mut self, points: u32) {
        self.score += points;
    }
}

/// Why a roll was refused.
#[derive(Clone, Copy, PartialEq, Eq, Debug, derive_more::Display)]
pub enum DiceError {
    #[display("Player {}, please select a colour first", seat.number())]
    ColourNotSelected { seat: Seat },
}

impl std::error::Error for DiceError {}

/// Turn state for the dice game.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct DiceGame {
    players: [DicePlayer; 2],
    active: Seat,
    die: Die,
}

impl DiceGame {
    /// New game with a six-sided die and player one to act.
    pub fn new() -> DiceGame {
        DiceGame::default()
    }

    pub fn with_die(die: Die) -> DiceGame {
        DiceGame {
            die,
            ..DiceGame::default()
        }
    }

    pub fn active_seat(&self) -> Seat {
        self.active
    }

    pub fn player(&self, seat: Seat) -> &DicePlayer {
        &self.players[seat.index()]
    }

    pub fn die(&self) -> Die {
        self.die
    }

    /// Colour of the player whose turn it is, for the die background.
    pub fn active_colour(&self) -> Option<Colour> {
        self.player(self.active).colour
    }

    /// Give the active player `colour` and pass the turn.
    ///
    /// Ignored (returns false) once the active player already has a colour.
    /// Both players may pick the same colour.
    #[instrument(skip(self), fields(seat = ?self.active))]
    pub fn select_colour(&mut self, colour: Colour) -> bool {
        let player = &mut self.players[self.active.index()];
        if player.colour.is_some() {
            debug!("colour already chosen, ignoring");
            return false;
        }
        player.colour = Some(colour);
        self.change_turn();
        true
    }

    /// Roll for the active player, bank the result and pass the turn.
    #[instrument(skip(self, rng), fields(seat = ?self.active))]
    pub fn roll<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<u8, DiceError> {
        let seat = self.active;
        if self.player(seat).colour.is_none() {
            return Err(DiceError::ColourNotSelected { seat });
        }
        let value = self.die.roll(rng);
        let player = &mut self.players[seat.index()];
        player.add_to_score(value as u32);
        debug!(value, score = player.score, "rolled");
        self.change_turn();
        Ok(value)
    }

    fn change_turn(&mut self) {
        self.active = self.active.other();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::str::FromStr;

    #[test]
    fn test_colour_list() {
        let names: Vec<String> = Colour::all().map(|c| c.to_string()).collect();
        assert_eq!(names, ["Red", "Blue", "Green", "Yellow", "Purple", "Orange"]);
        assert_eq!(Colour::from_str("Purple"), Ok(Colour::Purple));
        assert!(Colour::from_str("Mauve").is_err());
    }

    #[test]
    fn test_die_default_six_sides() {
        assert_eq!(Die::default().sides.count(), 6);
    }

    #[test]
    fn test_die_roll_in_range() {
        let mut rng = StdRng::seed_from_u64(9);
        for sides in [Sides::Four, Sides::Six, Sides::Eight, Sides::Ten, Sides::Twelve, Sides::Twenty] {
            let die = Die::new(sides);
            let mut seen = vec![false; sides.count() as usize];
            for _ in 0..2000 {
                let v = die.roll(&mut rng);
                assert!((1..=sides.count()).contains(&v));
                seen[v as usize - 1] = true;
            }
            assert!(seen.iter().all(|&s| s), "{:?} never rolled some face", sides);
        }
    }

    #[test]
    fn test_player_one_starts() {
        let game = DiceGame::new();
        assert_eq!(game.active_seat(), Seat::One);
        assert_eq!(game.active_colour(), None);
        assert_eq!(game.player(Seat::One).score, 0);
    }

    #[test]
    fn test_select_colour_passes_turn() {
        let mut game = DiceGame::new();
        assert!(game.select_colour(Colour::Red));
        assert_eq!(game.active_seat(), Seat::Two);
        assert_eq!(game.player(Seat::One).colour, Some(Colour::Red));
        assert!(game.select_colour(Colour::Blue));
        assert_eq!(game.active_seat(), Seat::One);
        assert_eq!(game.active_colour(), Some(Colour::Red));
    }

    #[test]
    fn test_select_colour_twice_ignored() {
        let mut game = DiceGame::new();
        game.select_colour(Colour::Red);
        game.select_colour(Colour::Blue);
        let before = game;
        assert!(!game.select_colour(Colour::Green));
        assert_eq!(game, before);
    }

    #[test]
    fn test_roll_requires_colour() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut game = DiceGame::new();
        let err = game.roll(&mut rng).unwrap_err();
        assert_eq!(err, DiceError::ColourNotSelected { seat: Seat::One });
        assert_eq!(err.to_string(), "Player 1, please select a colour first");
        assert_eq!(game.active_seat(), Seat::One);

        game.select_colour(Colour::Red);
        assert_eq!(
            game.roll(&mut rng),
            Err(DiceError::ColourNotSelected { seat: Seat::Two })
        );
    }

    #[test]
    fn test_roll_scores_and_alternates() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut game = DiceGame::new();
        game.select_colour(Colour::Red);
        game.select_colour(Colour::Green);

        let mut totals = [0u32; 2];
        for turn in 0..10 {
            let seat = game.active_seat();
            assert_eq!(seat, if turn % 2 == 0 { Seat::One } else { Seat::Two });
            let value = game.roll(&mut rng).unwrap();
            assert!((1..=6).contains(&value));
            totals[seat.index()] += value as u32;
        }
        assert_eq!(game.player(Seat::One).score, totals[0]);
        assert_eq!(game.player(Seat::Two).score, totals[1]);
        assert_eq!(game.active_colour(), Some(Colour::Red));
    }
}
