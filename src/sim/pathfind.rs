//! Breadth-first pursuit on the maze grid
//!
//! The search re-runs from scratch every pursuer tick and only ever yields a
//! single step. The grid is a few hundred cells so a fresh visited/parent
//! table per call is cheap enough.

use std::collections::VecDeque;

use super::maze::Maze;
use super::state::Direction;
use crate::consts::{COLS, ROWS};
use crate::{Cell, offset};

/// Neighbor expansion order. Only affects tie-breaks between equally short paths.
pub const SEARCH_ORDER: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// Outcome of a single-step search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathResult {
    /// Start and target are the same cell; nothing to do
    AlreadyThere,
    /// Move here next (adjacent to the start, tunnel included)
    NextStep(Cell),
    /// Target unreachable; stay put this tick
    NoPath,
}

#[inline]
fn index(cell: Cell) -> usize {
    cell.y as usize * COLS + cell.x as usize
}

/// Passable neighbors of `cell` in search order, tunnel wrap applied
pub fn neighbors(maze: &Maze, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
    SEARCH_ORDER
        .into_iter()
        .map(move |dir| Maze::resolve_wrap(offset(cell, dir)))
        .filter(move |&next| maze.is_passable(next))
}

/// Next cell on a shortest path from `from` to `to`
pub fn next_step(maze: &Maze, from: Cell, to: Cell) -> PathResult {
    if from == to {
        return PathResult::AlreadyThere;
    }
    if !Maze::in_bounds(from) || !Maze::in_bounds(to) {
        return PathResult::NoPath;
    }

    let mut parent: [Option<Cell>; ROWS * COLS] = [None; ROWS * COLS];
    let mut visited = [false; ROWS * COLS];
    let mut queue = VecDeque::with_capacity(ROWS * COLS);

    visited[index(from)] = true;
    queue.push_back(from);

    let mut found = false;
    'search: while let Some(current) = queue.pop_front() {
        for next in neighbors(maze, current) {
            let i = index(next);
            if visited[i] {
                continue;
            }
            visited[i] = true;
            parent[i] = Some(current);
            if next == to {
                // First visit is already at shortest distance
                found = true;
                break 'search;
            }
            queue.push_back(next);
        }
    }

    if !found {
        return PathResult::NoPath;
    }

    // Walk back from the target until the predecessor is the start
    let mut cursor = to;
    while let Some(prev) = parent[index(cursor)] {
        if prev == from {
            return PathResult::NextStep(cursor);
        }
        cursor = prev;
    }
    PathResult::NoPath
}

/// BFS distance (in steps) from `from` to every cell; `None` where unreachable
pub fn distance_map(maze: &Maze, from: Cell) -> Vec<Option<u32>> {
    let mut dist = vec![None; ROWS * COLS];
    if !maze.is_passable(from) {
        return dist;
    }
    let mut queue = VecDeque::new();
    dist[index(from)] = Some(0);
    queue.push_back(from);

    while let Some(current) = queue.pop_front() {
        let base = dist[index(current)].unwrap_or(0);
        for next in neighbors(maze, current) {
            let i = index(next);
            if dist[i].is_none() {
                dist[i] = Some(base + 1);
                queue.push_back(next);
            }
        }
    }
    dist
}

/// Look up a cell in a map produced by [`distance_map`]
#[inline]
pub fn distance_at(map: &[Option<u32>], cell: Cell) -> Option<u32> {
    if !Maze::in_bounds(cell) {
        return None;
    }
    map.get(index(cell)).copied().flatten()
}

/// Direction that moves `from` onto the adjacent cell `to`, tunnel included
pub fn direction_between(from: Cell, to: Cell) -> Option<Direction> {
    SEARCH_ORDER
        .into_iter()
        .find(|&dir| Maze::resolve_wrap(offset(from, dir)) == to)
}
