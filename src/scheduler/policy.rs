use crate::task::TaskRegistry;
use crate::time::SimTime;
use crate::SimError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Scheduling policy kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyType {
    /// First come, first served
    Fcfs,
    /// Shortest job first
    Sjf,
    /// Shortest remaining time first
    Srtf,
    /// Round Robin
    RoundRobin,
}

impl PolicyType {
    /// All policy kinds, in report order
    pub const ALL: [PolicyType; 4] = [
        PolicyType::Fcfs,
        PolicyType::Sjf,
        PolicyType::Srtf,
        PolicyType::RoundRobin,
    ];

    /// Short name as used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            PolicyType::Fcfs => "FCFS",
            PolicyType::Sjf => "SJF",
            PolicyType::Srtf => "SRTF",
            PolicyType::RoundRobin => "RR",
        }
    }
}

impl fmt::Display for PolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyType {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FCFS" => Ok(PolicyType::Fcfs),
            "SJF" => Ok(PolicyType::Sjf),
            "SRTF" => Ok(PolicyType::Srtf),
            "RR" => Ok(PolicyType::RoundRobin),
            _ => Err(SimError::UnknownPolicy(s.to_string())),
        }
    }
}

/// A fully parameterized scheduling policy.
///
/// The engine is generic over this descriptor: each variant fixes how the
/// next task is chosen, how long it may run, and whether it can be preempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulingPolicy {
    Fcfs,
    Sjf,
    Srtf,
    RoundRobin { quantum: NonZeroU32 },
}

impl SchedulingPolicy {
    /// First come, first served
    pub fn fcfs() -> Self {
        SchedulingPolicy::Fcfs
    }

    /// Shortest job first
    pub fn sjf() -> Self {
        SchedulingPolicy::Sjf
    }

    /// Shortest remaining time first
    pub fn srtf() -> Self {
        SchedulingPolicy::Srtf
    }

    /// Round Robin with a positive quantum
    pub fn round_robin(quantum: i64) -> Result<Self, SimError> {
        u32::try_from(quantum)
            .ok()
            .and_then(NonZeroU32::new)
            .map(|quantum| SchedulingPolicy::RoundRobin { quantum })
            .ok_or(SimError::InvalidQuantum(quantum))
    }

    /// Build from a policy name; `quantum` is required for RR only
    pub fn from_name(name: &str, quantum: Option<i64>) -> Result<Self, SimError> {
        match name.parse::<PolicyType>()? {
            PolicyType::Fcfs => Ok(Self::fcfs()),
            PolicyType::Sjf => Ok(Self::sjf()),
            PolicyType::Srtf => Ok(Self::srtf()),
            PolicyType::RoundRobin => {
                Self::round_robin(quantum.ok_or(SimError::MissingQuantum)?)
            }
        }
    }

    /// Build from command-line text. Unlike [`Self::from_name`], the
    /// quantum arrives unparsed and is only read for RR.
    pub fn from_args(name: &str, quantum: Option<&str>) -> Result<Self, SimError> {
        match name.parse::<PolicyType>()? {
            PolicyType::RoundRobin => {
                let text = quantum.ok_or(SimError::MissingQuantum)?;
                Self::round_robin(parse_quantum(text)?)
            }
            _ => Self::from_name(name, None),
        }
    }

    /// Get policy type
    pub fn policy_type(&self) -> PolicyType {
        match self {
            SchedulingPolicy::Fcfs => PolicyType::Fcfs,
            SchedulingPolicy::Sjf => PolicyType::Sjf,
            SchedulingPolicy::Srtf => PolicyType::Srtf,
            SchedulingPolicy::RoundRobin { .. } => PolicyType::RoundRobin,
        }
    }

    /// Get short name
    pub fn name(&self) -> &'static str {
        self.policy_type().name()
    }

    /// Get Round Robin quantum
    pub fn quantum(&self) -> Option<NonZeroU32> {
        match self {
            SchedulingPolicy::RoundRobin { quantum } => Some(*quantum),
            _ => None,
        }
    }

    /// Check if a running task can lose the CPU before it finishes
    pub fn is_preemptive(&self) -> bool {
        matches!(
            self,
            SchedulingPolicy::Srtf | SchedulingPolicy::RoundRobin { .. }
        )
    }

    /// How long the task at `index` runs once dispatched at `now`
    pub fn run_duration(&self, registry: &TaskRegistry, index: usize, now: SimTime) -> SimTime {
        let remaining = registry.task(index).remaining();
        match self {
            SchedulingPolicy::Fcfs | SchedulingPolicy::Sjf => remaining,
            SchedulingPolicy::Srtf => match registry.next_arrival_after(now) {
                Some(arrival) => remaining.min(arrival - now),
                None => remaining,
            },
            SchedulingPolicy::RoundRobin { quantum } => remaining.min(quantum.get() as SimTime),
        }
    }
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulingPolicy::RoundRobin { quantum } => write!(f, "RR (q={})", quantum),
            other => f.write_str(other.name()),
        }
    }
}

/// Parse a quantum as typed by the user, keeping the text for errors
pub fn parse_quantum(text: &str) -> Result<i64, SimError> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| SimError::MalformedQuantum(text.to_string()))
}
