use crate::scheduler::{PolicyType, SchedulingPolicy};
use crate::simulator::{SimulationOutcome, Simulator};
use crate::task::TaskDef;
use crate::SimError;
use futures::future::join_all;
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, warn};

/// A policy asked for by the caller, which may have failed to build
#[derive(Debug)]
pub struct PolicyRequest {
    pub policy_type: PolicyType,
    pub policy: Result<SchedulingPolicy, SimError>,
}

impl PolicyRequest {
    /// Wrap an already valid policy
    pub fn new(policy: SchedulingPolicy) -> Self {
        Self {
            policy_type: policy.policy_type(),
            policy: Ok(policy),
        }
    }

    /// Build a request from command-line text
    pub fn from_args(policy_type: PolicyType, quantum: Option<&str>) -> Self {
        Self {
            policy_type,
            policy: SchedulingPolicy::from_args(policy_type.name(), quantum),
        }
    }

    /// Every policy. RR is left out when no quantum is given; a bad
    /// quantum fails the RR request only.
    pub fn all(quantum: Option<&str>) -> Vec<Self> {
        PolicyType::ALL
            .iter()
            .filter(|&&policy_type| policy_type != PolicyType::RoundRobin || quantum.is_some())
            .map(|&policy_type| Self::from_args(policy_type, quantum))
            .collect()
    }
}

impl From<SchedulingPolicy> for PolicyRequest {
    fn from(policy: SchedulingPolicy) -> Self {
        Self::new(policy)
    }
}

/// Outcome of one policy within a batch
#[derive(Debug)]
pub struct PolicyRun {
    pub policy_type: PolicyType,
    /// `None` when the policy itself could not be built
    pub policy: Option<SchedulingPolicy>,
    pub result: Result<SimulationOutcome, SimError>,
}

impl fmt::Display for PolicyRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.policy {
            Some(policy) => write!(f, "{}", policy),
            None => write!(f, "{}", self.policy_type),
        }
    }
}

/// Runs independent policy simulations concurrently on the blocking pool
pub struct Executor {
    name: String,
}

impl Executor {
    /// Create a new executor
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Get executor name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Simulate every policy over the same tasks. Results come back in
    /// `policies` order; a failed run leaves the others untouched.
    pub async fn run_all(
        &self,
        simulator: &Simulator,
        tasks: &[TaskDef],
        policies: Vec<SchedulingPolicy>,
    ) -> Vec<PolicyRun> {
        let requests = policies.into_iter().map(PolicyRequest::new).collect();
        self.run_requested(simulator, tasks, requests).await
    }

    /// Like [`Self::run_all`], but a request whose policy failed to build
    /// comes back as a failed run while the rest still execute.
    pub async fn run_requested(
        &self,
        simulator: &Simulator,
        tasks: &[TaskDef],
        requests: Vec<PolicyRequest>,
    ) -> Vec<PolicyRun> {
        let tasks: Arc<[TaskDef]> = Arc::from(tasks);
        info!("[{}] Running {} policies", self.name, requests.len());

        let mut runs = Vec::with_capacity(requests.len());
        let mut handles = Vec::with_capacity(requests.len());
        for request in requests {
            let built = request.policy.as_ref().ok().copied();
            if let Err(e) = &request.policy {
                warn!("[{}] {} not run: {}", self.name, request.policy_type, e);
            }

            let simulator = simulator.clone();
            let tasks = Arc::clone(&tasks);
            let policy = request.policy;
            handles.push(tokio::task::spawn_blocking(move || {
                policy.and_then(|policy| simulator.run(&tasks, policy))
            }));
            runs.push((request.policy_type, built));
        }

        join_all(handles)
            .await
            .into_iter()
            .zip(runs)
            .map(|(joined, (policy_type, policy))| {
                let result = joined.unwrap_or_else(|e| {
                    error!("[{}] {} run did not complete: {}", self.name, policy_type, e);
                    Err(SimError::ExecutionFailed(format!("{} run: {}", policy_type, e)))
                });
                PolicyRun {
                    policy_type,
                    policy,
                    result,
                }
            })
            .collect()
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new("default")
    }
}
