//! Many seeded matches at once.
//!
//! Each match stays single-threaded; rayon spreads whole matches across
//! cores. Results come back in seed order, so a batch is as reproducible as
//! its seeds.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

use super::json_api::{run_match, MatchRequest, MatchResponse};
use crate::engine::match_sim::Verdict;
use crate::engine::types::TeamSide;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub matches: usize,
    pub home_wins: usize,
    pub away_wins: usize,
    /// Ran out of ticks without a winner
    pub unfinished: usize,
    pub mean_goals: f64,
    pub mean_suspicion: f64,
    pub verdicts: BTreeMap<Verdict, usize>,
    pub results: Vec<MatchResponse>,
}

impl BatchSummary {
    pub fn from_results(results: Vec<MatchResponse>) -> Self {
        let matches = results.len();
        let wins = |side| results.iter().filter(|r| r.winner == Some(side)).count();
        let home_wins = wins(TeamSide::Home);
        let away_wins = wins(TeamSide::Away);

        let mut verdicts = BTreeMap::new();
        for verdict in results.iter().filter_map(|r| r.verdict) {
            *verdicts.entry(verdict).or_insert(0) += 1;
        }

        let mean = |f: fn(&MatchResponse) -> f64| {
            if matches == 0 {
                0.0
            } else {
                results.iter().map(f).sum::<f64>() / matches as f64
            }
        };
        let mean_goals = mean(|r| f64::from(r.score_home + r.score_away));
        let mean_suspicion = mean(|r| f64::from(r.suspicion));

        Self {
            matches,
            home_wins,
            away_wins,
            unfinished: matches - home_wins - away_wins,
            mean_goals,
            mean_suspicion,
            verdicts,
            results,
        }
    }
}

/// Run `request` once per seed. The request's own seed is ignored.
pub fn simulate_batch(request: &MatchRequest, seeds: &[u64]) -> Result<BatchSummary> {
    let results = seeds
        .par_iter()
        .map(|&seed| run_match(&MatchRequest { seed, ..request.clone() }))
        .collect::<Result<Vec<_>>>()?;

    let summary = BatchSummary::from_results(results);
    info!(
        matches = summary.matches,
        home_wins = summary.home_wins,
        away_wins = summary.away_wins,
        mean_goals = summary.mean_goals,
        "batch finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatchError;

    fn response(winner: Option<TeamSide>, goals: (u32, u32), suspicion: u32, verdict: Option<Verdict>) -> MatchResponse {
        MatchResponse {
            seed: 0,
            score_home: goals.0,
            score_away: goals.1,
            winner,
            ticks: 100,
            elapsed_ms: 1000.0,
            suspicion,
            verdict,
            goals: Vec::new(),
        }
    }

    #[test]
    fn test_summary_counts() {
        let summary = BatchSummary::from_results(vec![
            response(Some(TeamSide::Home), (3, 1), 10, Some(Verdict::Clean)),
            response(Some(TeamSide::Away), (0, 3), 90, Some(Verdict::Scandal)),
            response(None, (1, 1), 20, None),
            response(Some(TeamSide::Home), (3, 0), 0, Some(Verdict::Clean)),
        ]);

        assert_eq!(summary.matches, 4);
        assert_eq!(summary.home_wins, 2);
        assert_eq!(summary.away_wins, 1);
        assert_eq!(summary.unfinished, 1);
        assert!((summary.mean_goals - 3.0).abs() < 1e-9);
        assert!((summary.mean_suspicion - 30.0).abs() < 1e-9);
        assert_eq!(summary.verdicts.get(&Verdict::Clean), Some(&2));
        assert_eq!(summary.verdicts.get(&Verdict::Scandal), Some(&1));
    }

    #[test]
    fn test_empty_batch() {
        let summary = simulate_batch(&MatchRequest::new(0), &[]).unwrap();
        assert_eq!(summary.matches, 0);
        assert_eq!(summary.mean_goals, 0.0);
    }

    #[test]
    fn test_batch_matches_sequential_runs_in_seed_order() {
        let request = MatchRequest { max_ticks: 300, ..MatchRequest::new(0) };
        let seeds = [5, 1, 9];
        let summary = simulate_batch(&request, &seeds).unwrap();

        assert_eq!(summary.results.len(), 3);
        for (result, seed) in summary.results.iter().zip(seeds) {
            assert_eq!(result.seed, seed);
            assert_eq!(*result, run_match(&MatchRequest { seed, ..request.clone() }).unwrap());
        }
    }

    #[test]
    fn test_batch_propagates_request_errors() {
        let request = MatchRequest { max_ticks: 0, ..MatchRequest::new(0) };
        assert!(matches!(simulate_batch(&request, &[1, 2]), Err(MatchError::InvalidRequest(_))));
    }
}
