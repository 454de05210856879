//! Round-by-round summaries for UI hosts and the CLI.

use serde::{Deserialize, Serialize};

use crate::engine::round::score_round;
use crate::model::Contest;

/// One shooter's line in a round scoreboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreboardEntry {
    pub player_id: u64,
    pub name: String,
    pub score: u32,
    /// Moneyballs made (last ball of a rack).
    pub moneyballs: u32,
    pub shots_taken: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    /// 1-based round number.
    pub round: usize,
    pub tiebreaker: bool,
    pub scoreboard: Vec<ScoreboardEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestSummary {
    pub season: u16,
    pub winner: Option<ScoreboardRef>,
    pub rounds: Vec<RoundSummary>,
    pub total_shots: usize,
}

/// Winner reference resolved to player identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreboardRef {
    pub player_id: u64,
    pub name: String,
}

/// Build the full per-round scoreboard view of a contest.
pub fn contest_summary(contest: &Contest) -> ContestSummary {
    let rules = &contest.rules;
    let rounds = contest
        .rounds
        .iter()
        .enumerate()
        .map(|(number, round)| {
            let scores = score_round(round, rules);
            let scoreboard = scores
                .iter()
                .map(|entry| {
                    let (moneyballs, shots_taken) = round
                        .turns
                        .iter()
                        .filter(|turn| turn.participant == entry.participant)
                        .flat_map(|turn| &turn.racks)
                        .fold((0u32, 0u32), |(money, shots), rack| {
                            let rack_money = rack
                                .outcomes
                                .iter()
                                .enumerate()
                                .filter(|&(ball, &made)| made && rules.ball_value(ball) == 2)
                                .count() as u32;
                            (money + rack_money, shots + rack.outcomes.len() as u32)
                        });
                    let player = &contest.participants[entry.participant];
                    ScoreboardEntry {
                        player_id: player.player_id,
                        name: player.name.clone(),
                        score: entry.score,
                        moneyballs,
                        shots_taken,
                    }
                })
                .collect();
            RoundSummary { round: number + 1, tiebreaker: round.tiebreaker, scoreboard }
        })
        .collect();

    let winner = contest.winner.map(|index| {
        let player = &contest.participants[index];
        ScoreboardRef { player_id: player.player_id, name: player.name.clone() }
    });

    ContestSummary { season: contest.season, winner, rounds, total_shots: contest.total_outcomes() }
}
