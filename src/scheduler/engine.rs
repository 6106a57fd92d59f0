use super::{selector, ReadyQueue, SchedulingPolicy};
use crate::task::TaskRegistry;
use crate::time::{self, SimTime};
use crate::timeline::{Occupant, Timeline};
use crate::SimError;
use serde::Serialize;
use tracing::{debug, error, info};

/// Counters gathered over one engine run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RunSummary {
    /// Clock value when the last task finished
    pub end_time: SimTime,
    /// Number of execution slices handed out
    pub dispatches: usize,
    /// Number of task-to-task switches charged
    pub context_switches: usize,
    /// Switches away from a task that had not finished
    pub preemptions: usize,
    /// Number of idle gaps
    pub idle_periods: usize,
}

/// Where the next task comes from
enum Dispatcher {
    /// Scan the registry's ready set with a selection rule
    Scan(SchedulingPolicy),
    /// Pop the Round Robin FIFO
    Queue(ReadyQueue),
}

impl Dispatcher {
    fn for_policy(policy: SchedulingPolicy) -> Self {
        match policy {
            SchedulingPolicy::RoundRobin { .. } => Dispatcher::Queue(ReadyQueue::new()),
            other => Dispatcher::Scan(other),
        }
    }

    /// Make tasks that arrived by `now` eligible
    fn admit(&mut self, registry: &TaskRegistry, now: SimTime) {
        if let Dispatcher::Queue(queue) = self {
            queue.admit_arrivals(registry, now);
        }
    }

    fn next(&mut self, registry: &TaskRegistry, now: SimTime) -> Option<usize> {
        match self {
            Dispatcher::Scan(policy) => selector::select(policy.policy_type(), registry, now),
            Dispatcher::Queue(queue) => queue.pop_live(registry),
        }
    }

    /// Slice for `index` ended at `now`
    fn release(&mut self, registry: &TaskRegistry, index: usize, now: SimTime) {
        if let Dispatcher::Queue(queue) = self {
            queue.admit_arrivals(registry, now);
            if !registry.task(index).is_done() {
                queue.push(index);
            }
        }
    }
}

/// Discrete-event engine shared by every policy.
///
/// Each step either idles until the next arrival or dispatches one task:
/// charge a context switch if the CPU moves from another task, run for the
/// policy's duration, then complete or requeue the task.
#[derive(Debug, Clone, Copy)]
pub struct Engine {
    policy: SchedulingPolicy,
    context_switch_overhead: SimTime,
}

impl Engine {
    /// Create a new engine
    pub fn new(policy: SchedulingPolicy, context_switch_overhead: SimTime) -> Self {
        Self {
            policy,
            context_switch_overhead,
        }
    }

    /// Get policy
    pub fn policy(&self) -> SchedulingPolicy {
        self.policy
    }

    /// Get context-switch overhead
    pub fn context_switch_overhead(&self) -> SimTime {
        self.context_switch_overhead
    }

    /// Run every task in `registry` to completion, recording into `timeline`
    pub fn run(
        &self,
        registry: &mut TaskRegistry,
        timeline: &mut Timeline,
    ) -> Result<RunSummary, SimError> {
        let mut summary = RunSummary::default();
        let mut dispatcher = Dispatcher::for_policy(self.policy);
        let mut now: SimTime = 0.0;
        // Registry index of the task that last held the CPU; `None` after idle.
        let mut previous: Option<usize> = None;

        info!(
            "[{}] Simulating {} task(s), switch overhead {}",
            self.policy,
            registry.len(),
            self.context_switch_overhead
        );

        dispatcher.admit(registry, now);

        while !registry.all_done() {
            let Some(index) = dispatcher.next(registry, now) else {
                let Some(arrival) = registry.next_arrival_after(now) else {
                    let unfinished = registry.unfinished_count();
                    error!(
                        "[{}] Stalled at t={:.2} with {} unfinished task(s)",
                        self.policy, now, unfinished
                    );
                    return Err(SimError::SimulationStall { now, unfinished });
                };

                debug!("[{}] CPU idle from {:.2} to {:.2}", self.policy, now, arrival);
                timeline.record(now, arrival, Occupant::Idle);
                summary.idle_periods += 1;
                now = arrival;
                previous = None;
                dispatcher.admit(registry, now);
                continue;
            };

            let pid = registry.task(index).pid();
            let occupant = Occupant::Task(pid);

            if let Some(from) = previous.filter(|&from| from != index) {
                let outgoing = registry.task(from);
                let end = now + self.context_switch_overhead;
                debug!(
                    "[{}] Context switch P{} -> P{} at {:.2}",
                    self.policy,
                    outgoing.pid(),
                    pid,
                    now
                );
                timeline.record(now, end, Occupant::ContextSwitch);
                summary.context_switches += 1;
                if !outgoing.is_done() {
                    summary.preemptions += 1;
                }
                now = end;
            }

            if registry.task_mut(index).start_at(now) {
                debug!("[{}] P{} first dispatched at {:.2}", self.policy, pid, now);
            }

            let duration = self.policy.run_duration(registry, index, now);
            let end = now + duration;
            timeline.record(now, end, occupant);
            summary.dispatches += 1;

            let task = registry.task_mut(index);
            task.consume(duration);
            now = end;

            if time::is_exhausted(task.remaining()) {
                task.complete(now);
                debug!("[{}] P{} finished at {:.2}", self.policy, pid, now);
            }

            dispatcher.release(registry, index, now);
            previous = Some(index);
        }

        summary.end_time = now;
        info!(
            "[{}] Simulation complete at t={:.2} ({} dispatches, {} context switches)",
            self.policy, now, summary.dispatches, summary.context_switches
        );

        Ok(summary)
    }
}
