use crate::common::TeamId;
use crate::division::DivisionModel;
use crate::error::Result;

/// First rival (by id) that already has more wins than `target` can reach.
pub fn trivial_eliminator(division: &DivisionModel, target: TeamId) -> Result<Option<TeamId>> {
    let best = division.team(target)?.max_wins();
    Ok(division
        .teams()
        .find(|team| team.id != target && team.wins > best)
        .map(|team| team.id))
}

pub fn is_trivially_eliminated(division: &DivisionModel, target: TeamId) -> Result<bool> {
    trivial_eliminator(division, target).map(|rival| rival.is_some())
}
