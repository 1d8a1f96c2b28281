use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::common::Games;
use crate::division::DivisionModel;
use crate::team::TeamRecord;

pub const TEAMS4: &str = include_str!("../data/teams4.txt");
pub const TEAMS5: &str = include_str!("../data/teams5.txt");
pub const TEAMS_FINAL: &str = include_str!("../data/teams_final.txt");

pub fn division(text: &str) -> DivisionModel {
    text.parse().unwrap()
}

// symmetric schedule with wins spread tightly enough that most teams need the network
pub fn random_division(num_teams: usize, seed: u64) -> DivisionModel {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut against = vec![vec![0 as Games; num_teams]; num_teams];
    for a in 0..num_teams {
        for b in a + 1..num_teams {
            let games = rng.gen_range(0..6);
            against[a][b] = games;
            against[b][a] = games;
        }
    }
    let teams = against
        .into_iter()
        .enumerate()
        .map(|(id, row)| {
            let wins = rng.gen_range(60..80);
            let outside = rng.gen_range(0..3);
            let remaining = row.iter().sum::<Games>() + outside;
            TeamRecord::new(id, format!("team{}", id), wins, 150 - wins, remaining, row)
        })
        .collect();
    DivisionModel::new(teams).unwrap()
}

// the same division with one game between `a` and `b` taken off the schedule
pub fn without_game(division: &DivisionModel, a: usize, b: usize) -> DivisionModel {
    let teams = division
        .teams()
        .map(|team| {
            let mut team = team.clone();
            if team.id == a || team.id == b {
                let opponent = if team.id == a { b } else { a };
                team.against[opponent] -= 1;
                team.remaining -= 1;
            }
            team
        })
        .collect();
    DivisionModel::new(teams).unwrap()
}
