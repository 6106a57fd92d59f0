//! Pure selection rules over the ready set.
//!
//! Each rule is an ordering on tasks; the selected task is the minimum of
//! the ready set under that ordering. Ties always fall back to
//! (arrival, pid).

use super::PolicyType;
use crate::task::{Task, TaskRegistry};
use crate::time::{self, SimTime};
use std::cmp::Ordering;

/// Pick the next task for a scanning policy. `None` if nothing is ready.
///
/// Round Robin does not scan; it is served by [`super::ReadyQueue`] and
/// always yields `None` here.
pub fn select(policy: PolicyType, registry: &TaskRegistry, now: SimTime) -> Option<usize> {
    match policy {
        PolicyType::Fcfs => select_fcfs(registry, now),
        PolicyType::RoundRobin => None,
        PolicyType::Sjf => select_sjf(registry, now),
        PolicyType::Srtf => select_srtf(registry, now),
    }
}

/// Earliest arrival
pub fn select_fcfs(registry: &TaskRegistry, now: SimTime) -> Option<usize> {
    pick(registry, now, arrival_order)
}

/// Shortest original burst
pub fn select_sjf(registry: &TaskRegistry, now: SimTime) -> Option<usize> {
    pick(registry, now, |a, b| {
        a.def()
            .burst
            .cmp(&b.def().burst)
            .then_with(|| arrival_order(a, b))
    })
}

/// Shortest remaining time
pub fn select_srtf(registry: &TaskRegistry, now: SimTime) -> Option<usize> {
    pick(registry, now, |a, b| {
        time::cmp_approx(a.remaining(), b.remaining()).then_with(|| arrival_order(a, b))
    })
}

fn arrival_order(a: &Task, b: &Task) -> Ordering {
    a.def()
        .arrival
        .cmp(&b.def().arrival)
        .then_with(|| a.pid().cmp(&b.pid()))
}

// A candidate replaces the current best only when strictly ahead of it.
fn pick<F>(registry: &TaskRegistry, now: SimTime, order: F) -> Option<usize>
where
    F: Fn(&Task, &Task) -> Ordering,
{
    let mut best: Option<(usize, &Task)> = None;
    for (index, task) in registry.ready(now) {
        match best {
            Some((_, current)) if order(task, current) != Ordering::Less => {}
            _ => best = Some((index, task)),
        }
    }
    best.map(|(index, _)| index)
}
