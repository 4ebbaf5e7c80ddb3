use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::Rng;

use super::collectible::Morsel;
use super::error::{ArenaError, Result};
use super::grid::{Direction, Grid, Pos};
use super::rules::Rules;
use super::snake::Snek;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::One, Player::Two];

    pub fn index(&self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    pub fn opponent(&self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.index() + 1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Crash {
    OutOfBounds,
    SelfCollision,
    HitOpponent,
}

impl fmt::Display for Crash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Crash::OutOfBounds => "left the arena",
            Crash::SelfCollision => "bit itself",
            Crash::HitOpponent => "ran into the other snek",
        };
        f.write_str(text)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    GameOver { winner: Player, cause: Crash },
    /// No free cell was left for a morsel. Only `reset` leaves this phase.
    Halted,
}

/// Things the presentation layer may want to react to, in the order they
/// happened during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Ate(Player),
    PoweredUp(Player),
    PowerUpShown(Pos),
    PowerUpExpired,
    Crashed { winner: Player, cause: Crash },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub events: Vec<GameEvent>,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn crash(&self) -> Option<(Player, Crash)> {
        self.events.iter().find_map(|event| match event {
            GameEvent::Crashed { winner, cause } => Some((*winner, *cause)),
            _ => None,
        })
    }

    fn push(&mut self, event: GameEvent) {
        debug!("{:?}", event);
        self.events.push(event);
    }
}

/// Two sneks, one food morsel and an occasional power-up on a shared grid.
#[derive(Debug)]
pub struct Arena {
    rules: Rules,
    grid: Grid,
    sneks: [Snek; 2],
    food: Morsel,
    power_up: Morsel,
    power_up_visible: bool,
    power_up_shown_at: Instant,
    power_up_hidden_at: Instant,
    power_up_gap: Duration,
    scores: [u32; 2],
    phase: Phase,
    /// Set once a player has turned during the current tick.
    turned: [bool; 2],
    rng: StdRng,
}

impl Arena {
    pub fn new(rules: Rules, mut rng: StdRng, now: Instant) -> Result<Self> {
        rules.validate()?;

        let grid = rules.grid();
        let sneks = rules
            .starts
            .map(|start| Snek::new(start.head, start.direction));
        let food = Morsel::food(grid, sneks[0].body(), sneks[1].body(), &mut rng)?;
        let power_up_gap = draw_gap(&rules, &mut rng);

        info!(
            "New {}x{} arena, first power-up in {:?}",
            grid.cell_count, grid.cell_count, power_up_gap
        );

        Ok(Arena {
            rules,
            grid,
            sneks,
            food,
            power_up: Morsel::power_up(),
            power_up_visible: false,
            power_up_shown_at: now,
            power_up_hidden_at: now,
            power_up_gap,
            scores: [0; 2],
            phase: Phase::Running,
            turned: [false; 2],
            rng,
        })
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn snek(&self, player: Player) -> &Snek {
        &self.sneks[player.index()]
    }

    pub fn food(&self) -> Pos {
        self.food.position().unwrap_or(Pos::NOWHERE)
    }

    /// Where the power-up is, while it is showing.
    pub fn power_up(&self) -> Option<Pos> {
        if self.power_up_visible {
            self.power_up.position()
        } else {
            None
        }
    }

    pub fn score(&self, player: Player) -> u32 {
        self.scores[player.index()]
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn winner(&self) -> Option<Player> {
        match self.phase {
            Phase::GameOver { winner, .. } => Some(winner),
            Phase::Running | Phase::Halted => None,
        }
    }

    pub fn winner_message(&self) -> Option<String> {
        self.winner().map(|winner| format!("{winner} Wins!"))
    }

    /// Points the player's snek in a new direction. Refused while the game is
    /// over, when it would reverse the snek, or when the player already
    /// turned since the last tick; two quick turns inside one tick could
    /// otherwise fold the snek back onto its neck.
    pub fn steer(&mut self, player: Player, direction: Direction) -> bool {
        let index = player.index();
        if !self.is_running() || self.turned[index] {
            return false;
        }

        let snek = &mut self.sneks[index];
        if snek.direction() == direction {
            return true;
        }
        if snek.change_direction(direction) {
            self.turned[index] = true;
            true
        } else {
            false
        }
    }

    /// Advances the game by one step. Does nothing once the game is over.
    ///
    /// Collisions are always resolved, even when a morsel could not be
    /// placed. A placement failure on a tick that ends the game is dropped;
    /// otherwise the arena halts and the error is returned.
    pub fn tick(&mut self, now: Instant) -> Result<TickReport> {
        let mut report = TickReport::default();
        if !self.is_running() {
            return Ok(report);
        }

        self.turned = [false; 2];
        for snek in &mut self.sneks {
            snek.slither();
        }

        let placed = self.check_morsels(now, &mut report);

        if let Some((winner, cause)) = self.find_crash() {
            self.declare_winner(winner, cause);
            report.push(GameEvent::Crashed { winner, cause });
        }

        match placed.and_then(|()| self.update_power_up(now, &mut report)) {
            Ok(()) => Ok(report),
            Err(err) if self.is_running() => Err(self.halt(err)),
            Err(err) => {
                debug!("Ignoring {} on the final tick", err);
                Ok(report)
            }
        }
    }

    /// Puts everything back to the opening position and starts a new round.
    /// This is the only way out of `Phase::Halted`.
    pub fn reset(&mut self, now: Instant) -> Result<()> {
        for (snek, start) in self.sneks.iter_mut().zip(self.rules.starts) {
            snek.reset(start.head, start.direction);
        }
        let [a, b] = &self.sneks;
        if let Err(err) = self.food.relocate(self.grid, a.body(), b.body(), &mut self.rng) {
            return Err(self.halt(err));
        }
        self.hide_power_up(now);
        self.scores = [0; 2];
        self.phase = Phase::Running;
        self.turned = [false; 2];

        info!("Arena reset");
        Ok(())
    }

    fn check_morsels(&mut self, now: Instant, report: &mut TickReport) -> Result<()> {
        for player in Player::BOTH {
            self.check_food(player, report)?;
        }
        for player in Player::BOTH {
            self.check_power_up(player, now, report);
        }
        Ok(())
    }

    fn check_food(&mut self, player: Player, report: &mut TickReport) -> Result<()> {
        let index = player.index();
        if !self.food.is_at(self.sneks[index].head()) {
            return Ok(());
        }

        let [a, b] = &self.sneks;
        self.food.relocate(self.grid, a.body(), b.body(), &mut self.rng)?;
        self.sneks[index].request_growth();
        self.scores[index] += self.rules.food_reward;
        report.push(GameEvent::Ate(player));
        Ok(())
    }

    fn check_power_up(&mut self, player: Player, now: Instant, report: &mut TickReport) {
        let index = player.index();
        if !self.power_up_visible || !self.power_up.is_at(self.sneks[index].head()) {
            return;
        }

        self.hide_power_up(now);
        self.sneks[index].request_growth();
        self.scores[index] += self.rules.power_up_reward;
        report.push(GameEvent::PoweredUp(player));
    }

    /// Checked in a fixed order; the first rule that matches decides the
    /// winner even if the other snek crashed on the same tick.
    fn find_crash(&self) -> Option<(Player, Crash)> {
        let [a, b] = &self.sneks;
        let checks = [
            (!self.grid.contains(a.head()), Player::Two, Crash::OutOfBounds),
            (!self.grid.contains(b.head()), Player::One, Crash::OutOfBounds),
            (a.bites_itself(), Player::Two, Crash::SelfCollision),
            (b.bites_itself(), Player::One, Crash::SelfCollision),
            (b.occupies(a.head()), Player::Two, Crash::HitOpponent),
            (a.occupies(b.head()), Player::One, Crash::HitOpponent),
        ];

        checks
            .into_iter()
            .find(|(crashed, _, _)| *crashed)
            .map(|(_, winner, cause)| (winner, cause))
    }

    fn declare_winner(&mut self, winner: Player, cause: Crash) {
        info!(
            "{} {}, {} wins ({} to {})",
            winner.opponent(),
            cause,
            winner,
            self.score(Player::One),
            self.score(Player::Two)
        );
        self.phase = Phase::GameOver { winner, cause };
    }

    fn halt(&mut self, err: ArenaError) -> ArenaError {
        error!("Arena halted: {}", err);
        self.phase = Phase::Halted;
        err
    }

    fn update_power_up(&mut self, now: Instant, report: &mut TickReport) -> Result<()> {
        if self.power_up_visible {
            if now.saturating_duration_since(self.power_up_shown_at) >= self.rules.power_up_lifetime
            {
                self.hide_power_up(now);
                report.push(GameEvent::PowerUpExpired);
            }
        } else if now.saturating_duration_since(self.power_up_hidden_at) >= self.power_up_gap {
            let [a, b] = &self.sneks;
            let pos = self
                .power_up
                .relocate(self.grid, a.body(), b.body(), &mut self.rng)?;
            self.power_up_visible = true;
            self.power_up_shown_at = now;
            report.push(GameEvent::PowerUpShown(pos));
        }
        Ok(())
    }

    /// Takes the power-up off the board and starts waiting for the next one.
    fn hide_power_up(&mut self, now: Instant) {
        self.power_up.deactivate();
        self.power_up_visible = false;
        self.power_up_hidden_at = now;
        self.power_up_gap = draw_gap(&self.rules, &mut self.rng);
    }
}

fn draw_gap(rules: &Rules, rng: &mut impl Rng) -> Duration {
    let (min, max) = rules.power_up_gap_secs;
    Duration::from_secs(rng.gen_range(min..=max))
}
