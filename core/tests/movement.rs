//! Movement planner tests.
//!
//! Tests cover: pursuit and flight choices, tie-breaking, staying put when
//! nothing improves, blocked/out-of-bounds safety, list length and order.

use pursuit_core::{
    distance::{compute_distance_field, DistanceField},
    error::SimError,
    grid::Grid,
    movement::plan_moves,
    rng::{RngBank, RngSlot, TieBreaker},
    types::{Connectivity, Objective, Position},
};
use std::collections::BTreeSet;

fn p(row: usize, col: usize) -> Position {
    Position::new(row, col)
}

/// Always returns a fixed index and records every request.
struct FixedPick {
    index:    usize,
    requests: Vec<usize>,
}

impl FixedPick {
    fn new(index: usize) -> Self {
        Self { index, requests: Vec::new() }
    }
}

impl TieBreaker for FixedPick {
    fn pick(&mut self, n: usize) -> usize {
        self.requests.push(n);
        self.index
    }
}

/// Fails the test if the planner ever asks for a random choice.
struct NeverPick;

impl TieBreaker for NeverPick {
    fn pick(&mut self, n: usize) -> usize {
        panic!("unexpected tie-break among {n} candidates");
    }
}

#[test]
fn zombie_chooses_between_the_two_orthogonal_improvements() {
    let grid = Grid::new(3, 3);
    let field = compute_distance_field(&[p(0, 0)], &grid);
    assert_eq!(field.get(p(2, 2)), 4);

    let mut rng = RngBank::new(0xABCD).for_slot(RngSlot::Pursuit);
    let mut seen = BTreeSet::new();
    for _ in 0..200 {
        let moved = plan_moves(
            &[p(2, 2)],
            &field,
            &grid,
            Connectivity::Four,
            Objective::Pursue,
            &mut rng,
        )
        .unwrap();
        seen.insert(moved[0]);
    }

    assert_eq!(
        seen,
        BTreeSet::from([p(1, 2), p(2, 1)]),
        "only (1,2) and (2,1) are valid pursuit moves"
    );
}

#[test]
fn zombie_tie_break_asks_for_two_candidates() {
    let grid = Grid::new(3, 3);
    let field = compute_distance_field(&[p(0, 0)], &grid);
    let mut picker = FixedPick::new(1);

    let moved = plan_moves(
        &[p(2, 2)],
        &field,
        &grid,
        Connectivity::Four,
        Objective::Pursue,
        &mut picker,
    )
    .unwrap();

    assert_eq!(picker.requests, vec![2]);
    // Candidates keep neighbour order: up (1,2) then left (2,1).
    assert_eq!(moved, vec![p(2, 1)]);
}

#[test]
fn single_improvement_needs_no_randomness() {
    let grid = Grid::new(1, 5);
    let field = compute_distance_field(&[p(0, 0)], &grid);
    let moved = plan_moves(
        &[p(0, 4)],
        &field,
        &grid,
        Connectivity::Four,
        Objective::Pursue,
        &mut NeverPick,
    )
    .unwrap();
    assert_eq!(moved, vec![p(0, 3)]);
}

#[test]
fn zombie_on_a_human_stays_put() {
    let grid = Grid::new(4, 4);
    let field = compute_distance_field(&[p(1, 1)], &grid);
    let moved = plan_moves(
        &[p(1, 1)],
        &field,
        &grid,
        Connectivity::Four,
        Objective::Pursue,
        &mut NeverPick,
    )
    .unwrap();
    assert_eq!(moved, vec![p(1, 1)]);
}

#[test]
fn human_flees_to_farthest_diagonal() {
    let grid = Grid::new(3, 3);
    let field = compute_distance_field(&[p(0, 0)], &grid);
    let moved = plan_moves(
        &[p(1, 1)],
        &field,
        &grid,
        Connectivity::Eight,
        Objective::Flee,
        &mut NeverPick,
    )
    .unwrap();
    assert_eq!(moved, vec![p(2, 2)]);
}

#[test]
fn human_breaks_flight_ties_with_injected_choice() {
    // Zombie at top-middle: both bottom corners are at distance 3.
    let grid = Grid::new(3, 3);
    let field = compute_distance_field(&[p(0, 1)], &grid);

    let mut first = FixedPick::new(0);
    let mut second = FixedPick::new(1);
    let a = plan_moves(&[p(1, 1)], &field, &grid, Connectivity::Eight, Objective::Flee, &mut first)
        .unwrap();
    let b = plan_moves(&[p(1, 1)], &field, &grid, Connectivity::Eight, Objective::Flee, &mut second)
        .unwrap();

    assert_eq!(first.requests, vec![2]);
    assert_eq!(a, vec![p(2, 0)]);
    assert_eq!(b, vec![p(2, 2)]);
}

#[test]
fn human_never_flees_into_an_obstacle() {
    let mut grid = Grid::new(3, 3);
    grid.set_blocked(p(2, 0));
    let field = compute_distance_field(&[p(0, 1)], &grid);
    let moved = plan_moves(
        &[p(1, 1)],
        &field,
        &grid,
        Connectivity::Eight,
        Objective::Flee,
        &mut NeverPick,
    )
    .unwrap();
    assert_eq!(moved, vec![p(2, 2)]);
}

#[test]
fn pursuit_ignores_blocked_cells_with_low_values() {
    // Hand-made field where the blocked neighbour looks best.
    let mut grid = Grid::new(1, 3);
    grid.set_blocked(p(0, 0));
    let field = DistanceField::from_values(1, 3, vec![0, 5, 4]).unwrap();
    let moved = plan_moves(
        &[p(0, 1)],
        &field,
        &grid,
        Connectivity::Four,
        Objective::Pursue,
        &mut NeverPick,
    )
    .unwrap();
    assert_eq!(moved, vec![p(0, 2)]);
}

#[test]
fn local_optimum_is_stationary() {
    // Human already in the far corner; zombie in the opposite one.
    let grid = Grid::new(4, 4);
    let field = compute_distance_field(&[p(0, 0)], &grid);
    let moved = plan_moves(
        &[p(3, 3)],
        &field,
        &grid,
        Connectivity::Eight,
        Objective::Flee,
        &mut NeverPick,
    )
    .unwrap();
    assert_eq!(moved, vec![p(3, 3)]);
}

#[test]
fn equal_neighbors_do_not_tempt_a_move() {
    // Every cell shares the same value: nothing strictly improves.
    let grid = Grid::new(3, 3);
    let field = DistanceField::from_values(3, 3, vec![2; 9]).unwrap();
    for objective in [Objective::Pursue, Objective::Flee] {
        let moved = plan_moves(
            &[p(1, 1), p(0, 0)],
            &field,
            &grid,
            Connectivity::Eight,
            objective,
            &mut NeverPick,
        )
        .unwrap();
        assert_eq!(moved, vec![p(1, 1), p(0, 0)]);
    }
}

#[test]
fn unreached_field_leaves_everyone_in_place() {
    let grid = Grid::new(4, 5);
    let field = compute_distance_field(&[], &grid);
    let entities = vec![p(0, 0), p(2, 3), p(3, 4), p(2, 3)];

    for (connectivity, objective) in [
        (Connectivity::Four, Objective::Pursue),
        (Connectivity::Eight, Objective::Flee),
    ] {
        let moved =
            plan_moves(&entities, &field, &grid, connectivity, objective, &mut NeverPick).unwrap();
        assert_eq!(moved, entities);
    }
}

#[test]
fn plan_preserves_length_and_order() {
    let grid = Grid::new(5, 5);
    let field = compute_distance_field(&[p(2, 2)], &grid);
    let zombies = vec![p(0, 2), p(4, 2), p(2, 0), p(2, 2), p(0, 2)];
    let moved = plan_moves(
        &zombies,
        &field,
        &grid,
        Connectivity::Four,
        Objective::Pursue,
        &mut NeverPick,
    )
    .unwrap();
    assert_eq!(moved, vec![p(1, 2), p(3, 2), p(2, 1), p(2, 2), p(1, 2)]);
}

#[test]
fn moves_stay_in_bounds_and_off_obstacles() {
    let mut rng = RngBank::new(0x5EED).for_slot(RngSlot::Flight);
    let mut picks = RngBank::new(0x5EED).for_slot(RngSlot::Pursuit);

    for trial in 0..200 {
        let height = 1 + rng.next_u64_below(7) as usize;
        let width = 1 + rng.next_u64_below(7) as usize;
        let mut grid = Grid::new(height, width);
        for row in 0..height {
            for col in 0..width {
                if rng.next_u64_below(4) == 0 {
                    grid.set_blocked(p(row, col));
                }
            }
        }
        let sentinel = (height * width) as u32;
        let values = (0..height * width)
            .map(|_| rng.next_u64_below(sentinel as u64 + 1) as u32)
            .collect();
        let field = DistanceField::from_values(height, width, values).unwrap();
        let entities: Vec<Position> = (0..4)
            .map(|_| {
                p(
                    rng.next_u64_below(height as u64) as usize,
                    rng.next_u64_below(width as u64) as usize,
                )
            })
            .collect();

        for (connectivity, objective) in [
            (Connectivity::Four, Objective::Pursue),
            (Connectivity::Eight, Objective::Flee),
        ] {
            let moved =
                plan_moves(&entities, &field, &grid, connectivity, objective, &mut picks).unwrap();
            assert_eq!(moved.len(), entities.len());
            for (from, to) in entities.iter().zip(&moved) {
                let legal = to == from
                    || (grid.neighbors(*from, connectivity).contains(to) && grid.is_passable(*to));
                assert!(legal, "trial {trial}: illegal move {from} -> {to} ({objective:?})");
            }
        }
    }
}

#[test]
fn field_of_wrong_shape_is_rejected() {
    let grid = Grid::new(3, 3);
    let field = compute_distance_field(&[], &Grid::new(2, 3));
    let err = plan_moves(
        &[p(0, 0)],
        &field,
        &grid,
        Connectivity::Four,
        Objective::Pursue,
        &mut NeverPick,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        SimError::FieldShapeMismatch { expected: (3, 3), actual: (2, 3) }
    ));
}
