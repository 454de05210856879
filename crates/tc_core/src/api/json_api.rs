//! JSON boundary for game-engine hosts.
//!
//! A versioned request describes the roster and seed; the response carries
//! the winner, per-round scoreboards and the step-event tally. Errors cross
//! this boundary as coded strings, never panics.

use serde::{Deserialize, Serialize};

use crate::awards::{AwardEntry, AwardLedger};
use crate::engine::{ContestDriver, StepEvent};
use crate::model::{Contest, ContestRules, Participant};
use crate::ratings::TableRatingProvider;
use crate::store::{ContestStore, MemoryContestStore};

use super::report::{contest_summary, ContestSummary};

pub const API_SCHEMA_VERSION: u8 = 1;

pub mod error_codes {
    pub const INVALID_SCHEMA_VERSION: &str = "E_SCHEMA_VERSION";
    pub const INVALID_REQUEST: &str = "E_REQUEST";
    pub const INVALID_RATING: &str = "E_RATING_RANGE";
    pub const INVALID_FORMAT: &str = "E_FORMAT";
    pub const SIMULATION_FAILED: &str = "E_SIM";
}

fn err_code(code: &str, message: impl std::fmt::Display) -> String {
    format!("{code}: {message}")
}

#[derive(Debug, Deserialize)]
pub struct ContestRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub season: u16,
    pub shooters: Vec<ShooterData>,
    /// Contest format override; defaults to 8 shooters, 5x5, top 3 advancing.
    #[serde(default)]
    pub rules: Option<ContestRules>,
}

#[derive(Debug, Deserialize)]
pub struct ShooterData {
    pub player_id: u64,
    pub team_id: u64,
    pub name: String,
    /// Three-point rating in [0, 100].
    pub rating: f32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContestResponse {
    pub schema_version: u8,
    pub summary: ContestSummary,
    pub award: AwardEntry,
    pub total_steps: usize,
    pub shot_steps: usize,
    pub rack_steps: usize,
    pub turn_steps: usize,
    pub round_steps: usize,
}

fn validate_rating(rating: f32) -> Result<f32, String> {
    if (0.0..=100.0).contains(&rating) {
        Ok(rating)
    } else {
        Err(err_code(error_codes::INVALID_RATING, format!("rating must be 0..=100, got {rating}")))
    }
}

/// Run one whole contest from a JSON request; returns the JSON response.
pub fn simulate_contest_json(request_json: &str) -> Result<String, String> {
    let request: ContestRequest = serde_json::from_str(request_json)
        .map_err(|err| err_code(error_codes::INVALID_REQUEST, err))?;

    if request.schema_version != API_SCHEMA_VERSION {
        return Err(err_code(
            error_codes::INVALID_SCHEMA_VERSION,
            format!("expected {}, got {}", API_SCHEMA_VERSION, request.schema_version),
        ));
    }

    let mut rules = request.rules.unwrap_or_default();
    rules.num_shooters = request.shooters.len();
    rules.validate().map_err(|msg| err_code(error_codes::INVALID_FORMAT, msg))?;

    let mut ratings = TableRatingProvider::new();
    let mut participants = Vec::with_capacity(request.shooters.len());
    for shooter in &request.shooters {
        ratings.insert(shooter.player_id, validate_rating(shooter.rating)?);
        participants.push(Participant::new(shooter.player_id, shooter.team_id, shooter.name.clone()));
    }

    let contest = Contest::new(request.season, participants, rules)
        .map_err(|msg| err_code(error_codes::INVALID_FORMAT, msg))?;

    let contest_id = request.seed;
    let mut driver = ContestDriver::seeded(
        MemoryContestStore::new(),
        ratings,
        AwardLedger::new(),
        request.seed,
    );
    driver
        .init_contest(contest_id, contest)
        .map_err(|err| err_code(error_codes::SIMULATION_FAILED, err))?;
    let events = driver
        .run_to_completion(contest_id)
        .map_err(|err| err_code(error_codes::SIMULATION_FAILED, err))?;

    let finished = driver
        .store()
        .load(contest_id)
        .map_err(|err| err_code(error_codes::SIMULATION_FAILED, err))?;
    let award = driver
        .awards()
        .entries()
        .first()
        .cloned()
        .ok_or_else(|| err_code(error_codes::SIMULATION_FAILED, "no award recorded"))?;

    let count = |kind: StepEvent| events.iter().filter(|&&event| event == kind).count();
    let response = ContestResponse {
        schema_version: API_SCHEMA_VERSION,
        summary: contest_summary(&finished),
        award,
        total_steps: events.len(),
        shot_steps: count(StepEvent::Shot),
        rack_steps: count(StepEvent::RackComplete),
        turn_steps: count(StepEvent::TurnComplete),
        round_steps: count(StepEvent::RoundComplete),
    };

    serde_json::to_string(&response).map_err(|err| err_code(error_codes::SIMULATION_FAILED, err))
}
