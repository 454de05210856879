use serde::{Deserialize, Serialize};

use super::participant::Participant;
use super::rules::ContestRules;

/// One rack of shot outcomes for a single shooter.
///
/// Grows one outcome at a time, never past `ContestRules::balls_per_rack`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    pub outcomes: Vec<bool>,
}

impl Attempt {
    pub fn new() -> Self {
        Self { outcomes: Vec::new() }
    }

    pub fn is_complete(&self, rules: &ContestRules) -> bool {
        self.outcomes.len() >= rules.balls_per_rack
    }

    /// Made shots in this rack.
    pub fn makes(&self) -> usize {
        self.outcomes.iter().filter(|&&made| made).count()
    }
}

/// One shooter's full set of racks within a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Index into `Contest::participants`.
    pub participant: usize,
    pub racks: Vec<Attempt>,
}

impl TurnRecord {
    /// A fresh turn record starts with one open, empty rack.
    pub fn new(participant: usize) -> Self {
        Self { participant, racks: vec![Attempt::new()] }
    }

    /// Done iff the rack count hit the bound and the last rack is full.
    pub fn is_fully_done(&self, rules: &ContestRules) -> bool {
        self.racks.len() >= rules.racks_per_turn
            && self.racks.last().is_some_and(|rack| rack.is_complete(rules))
    }

    pub fn total_outcomes(&self) -> usize {
        self.racks.iter().map(|rack| rack.outcomes.len()).sum()
    }
}

/// One competitive phase: a fixed roster, each shooter taking one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Participant indexes competing in this round, in shooting order.
    pub roster: Vec<usize>,
    /// Set on rounds that resolve a score tie among a restricted subset.
    #[serde(default)]
    pub tiebreaker: bool,
    /// Turn records, appended strictly in roster order.
    pub turns: Vec<TurnRecord>,
}

impl Round {
    /// A new round opens with the first shooter's empty turn record already
    /// in place, so the next step is immediately a shot.
    pub fn new(roster: Vec<usize>, tiebreaker: bool) -> Self {
        let turns = roster.first().map(|&first| vec![TurnRecord::new(first)]).unwrap_or_default();
        Self { roster, tiebreaker, turns }
    }

    pub fn is_over(&self, rules: &ContestRules) -> bool {
        self.turns.len() == self.roster.len()
            && self.turns.last().is_some_and(|turn| turn.is_fully_done(rules))
    }

    pub fn total_outcomes(&self) -> usize {
        self.turns.iter().map(|turn| turn.total_outcomes()).sum()
    }
}

/// Position of the next shot, as an explicit, testable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestCursor {
    pub round: usize,
    pub turn: usize,
    pub rack: usize,
    pub ball: usize,
}

/// The contest aggregate: sole persistence root.
///
/// Rounds, turn records and racks are owned transitively and never shared.
/// Mutated one event at a time by the contest driver; immutable once
/// `winner` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contest {
    /// Season the contest belongs to, fixed at creation.
    pub season: u16,

    /// Fixed entrant roster.
    pub participants: Vec<Participant>,

    /// Format parameters.
    #[serde(default)]
    pub rules: ContestRules,

    /// Append-only round history. Always starts with exactly one round.
    pub rounds: Vec<Round>,

    /// Winning participant index, once decided.
    pub winner: Option<usize>,
}

impl Contest {
    /// Create a contest with the full roster seeded into round 1.
    pub fn new(
        season: u16,
        participants: Vec<Participant>,
        rules: ContestRules,
    ) -> std::result::Result<Self, String> {
        rules.validate()?;
        if participants.len() != rules.num_shooters {
            return Err(format!(
                "roster size {} does not match contest format ({})",
                participants.len(),
                rules.num_shooters
            ));
        }

        let opening = Round::new((0..participants.len()).collect(), false);
        Ok(Self { season, participants, rules, rounds: vec![opening], winner: None })
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.rounds.last()
    }

    pub fn current_round_mut(&mut self) -> Option<&mut Round> {
        self.rounds.last_mut()
    }

    /// Where the next shot would land, or `None` at a turn/round boundary
    /// or once the contest is decided.
    pub fn cursor(&self) -> Option<ContestCursor> {
        if self.is_over() {
            return None;
        }
        let round_idx = self.rounds.len().checked_sub(1)?;
        let round = &self.rounds[round_idx];
        let turn_idx = round.turns.len().checked_sub(1)?;
        let turn = &round.turns[turn_idx];
        if turn.is_fully_done(&self.rules) {
            return None;
        }
        let rack_idx = turn.racks.len().checked_sub(1)?;
        let ball = turn.racks[rack_idx].outcomes.len();
        Some(ContestCursor { round: round_idx, turn: turn_idx, rack: rack_idx, ball })
    }

    /// Every shot recorded across the whole contest.
    pub fn total_outcomes(&self) -> usize {
        self.rounds.iter().map(|round| round.total_outcomes()).sum()
    }

    /// Count of normal (non-tiebreaker) rounds played or in progress.
    pub fn normal_round_count(&self) -> usize {
        self.rounds.iter().filter(|round| !round.tiebreaker).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(n: usize) -> Vec<Participant> {
        (0..n).map(|i| Participant::new(i as u64 + 100, i as u64 % 4, format!("Shooter {i}"))).collect()
    }

    #[test]
    fn test_new_contest_seeds_opening_round() {
        let contest = Contest::new(2027, roster(8), ContestRules::default()).unwrap();

        assert_eq!(contest.rounds.len(), 1);
        let round = &contest.rounds[0];
        assert_eq!(round.roster, (0..8).collect::<Vec<_>>());
        assert!(!round.tiebreaker);
        // First shooter's turn is already open with an empty rack
        assert_eq!(round.turns.len(), 1);
        assert_eq!(round.turns[0].participant, 0);
        assert_eq!(round.turns[0].racks.len(), 1);
        assert!(round.turns[0].racks[0].outcomes.is_empty());
    }

    #[test]
    fn test_roster_size_mismatch_rejected() {
        assert!(Contest::new(2027, roster(6), ContestRules::default()).is_err());
    }

    #[test]
    fn test_cursor_tracks_next_shot() {
        let rules = ContestRules::default();
        let mut contest = Contest::new(2027, roster(8), rules.clone()).unwrap();

        assert_eq!(
            contest.cursor(),
            Some(ContestCursor { round: 0, turn: 0, rack: 0, ball: 0 })
        );

        // Fill the first rack
        let turn = &mut contest.rounds[0].turns[0];
        turn.racks[0].outcomes = vec![true, false, true, false];
        assert_eq!(
            contest.cursor(),
            Some(ContestCursor { round: 0, turn: 0, rack: 0, ball: 4 })
        );
    }

    #[test]
    fn test_turn_record_done_requires_full_last_rack() {
        let rules = ContestRules::default();
        let mut turn = TurnRecord::new(0);
        for _ in 0..rules.racks_per_turn {
            if let Some(last) = turn.racks.last_mut() {
                last.outcomes = vec![true; rules.balls_per_rack];
            }
            if turn.racks.len() < rules.racks_per_turn {
                turn.racks.push(Attempt::new());
            }
        }
        assert!(turn.is_fully_done(&rules));

        turn.racks.last_mut().unwrap().outcomes.pop();
        assert!(!turn.is_fully_done(&rules));
    }

    #[test]
    fn test_round_over_needs_all_turns_done() {
        let rules = ContestRules::default();
        let mut round = Round::new(vec![0, 1], false);
        assert!(!round.is_over(&rules));

        for turn in &mut round.turns {
            turn.racks = (0..rules.racks_per_turn)
                .map(|_| Attempt { outcomes: vec![false; rules.balls_per_rack] })
                .collect();
        }
        // Only one of two turns recorded
        assert!(!round.is_over(&rules));

        let mut second = TurnRecord::new(1);
        second.racks = (0..rules.racks_per_turn)
            .map(|_| Attempt { outcomes: vec![true; rules.balls_per_rack] })
            .collect();
        round.turns.push(second);
        assert!(round.is_over(&rules));
    }
}
