//! Movement planner: relocates each entity to its best neighbouring cell.
//!
//! Candidates are the passable neighbours whose field value strictly improves
//! on the entity's own cell under the objective. Among those, only the ones
//! tied at the best value survive; ties are broken by the injected
//! `TieBreaker`. With no improving neighbour the entity stays put.
//!
//! The plan reads only the field and grid passability. Every entity is
//! planned against the same start-of-step field, so moves are simultaneous.

use crate::{
    distance::DistanceField,
    error::{SimError, SimResult},
    grid::Grid,
    rng::TieBreaker,
    types::{Connectivity, Objective, Position},
};

/// Plan one move for every entity. The result has the same length and
/// order as `entities`.
pub fn plan_moves<T: TieBreaker + ?Sized>(
    entities:     &[Position],
    field:        &DistanceField,
    grid:         &Grid,
    connectivity: Connectivity,
    objective:    Objective,
    tie_breaker:  &mut T,
) -> SimResult<Vec<Position>> {
    let expected = (grid.height(), grid.width());
    if field.shape() != expected {
        return Err(SimError::FieldShapeMismatch {
            expected,
            actual: field.shape(),
        });
    }

    Ok(entities
        .iter()
        .map(|&pos| best_move(pos, field, grid, connectivity, objective, &mut *tie_breaker))
        .collect())
}

/// Best destination for a single entity.
pub fn best_move<T: TieBreaker + ?Sized>(
    pos:          Position,
    field:        &DistanceField,
    grid:         &Grid,
    connectivity: Connectivity,
    objective:    Objective,
    tie_breaker:  &mut T,
) -> Position {
    let here = field.get(pos);
    let mut best = here;
    let mut candidates: Vec<Position> = Vec::new();

    for neighbor in grid.neighbors(pos, connectivity) {
        if !grid.is_passable(neighbor) {
            continue;
        }
        let distance = field.get(neighbor);
        if objective.improves(distance, best) {
            best = distance;
            candidates.clear();
            candidates.push(neighbor);
        } else if distance == best && best != here {
            candidates.push(neighbor);
        }
    }

    match candidates.len() {
        0 => pos,
        1 => candidates[0],
        n => candidates[tie_breaker.pick(n)],
    }
}
