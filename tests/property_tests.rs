use cpusched::prelude::*;
use proptest::prelude::*;

const TOLERANCE: f64 = 1e-6;

fn task_set() -> impl Strategy<Value = Vec<TaskDef>> {
    prop::collection::vec((0u64..20, 1u64..10), 1..12).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (arrival, burst))| TaskDef::new(i as Pid + 1, arrival, burst))
            .collect()
    })
}

fn policy() -> impl Strategy<Value = SchedulingPolicy> {
    prop_oneof![
        Just(SchedulingPolicy::fcfs()),
        Just(SchedulingPolicy::sjf()),
        Just(SchedulingPolicy::srtf()),
        (1i64..6).prop_map(|q| SchedulingPolicy::round_robin(q).unwrap()),
    ]
}

proptest! {
    #[test]
    fn every_task_completes_no_earlier_than_its_demand(tasks in task_set(), policy in policy()) {
        let outcome = Simulator::new().run(&tasks, policy).unwrap();

        for task in outcome.tasks() {
            prop_assert!(task.is_done());
            prop_assert_eq!(task.remaining(), 0.0);
            let finish = task.finish().unwrap();
            let first_start = task.first_start().unwrap();
            prop_assert!(finish + TOLERANCE >= task.arrival() + task.burst());
            prop_assert!(first_start + TOLERANCE >= task.arrival());
            prop_assert!(finish + TOLERANCE >= first_start + task.burst());
        }
    }

    #[test]
    fn segments_partition_time(tasks in task_set(), policy in policy()) {
        let outcome = Simulator::new().run(&tasks, policy).unwrap();
        let segments = outcome.timeline().segments();

        prop_assert!(!segments.is_empty());
        prop_assert_eq!(segments[0].start, 0.0);
        for pair in segments.windows(2) {
            prop_assert!((pair[0].end - pair[1].start).abs() < TOLERANCE);
            prop_assert_ne!(pair[0].occupant, pair[1].occupant);
        }
        for segment in segments {
            prop_assert!(segment.end > segment.start);
        }
    }

    #[test]
    fn cpu_time_is_conserved(tasks in task_set(), policy in policy()) {
        let outcome = Simulator::new().run(&tasks, policy).unwrap();

        for task in outcome.tasks() {
            let ran = outcome.timeline().busy_time(Occupant::Task(task.pid()));
            prop_assert!((ran - task.burst()).abs() < TOLERANCE);
        }
    }

    #[test]
    fn utilization_is_a_percentage(tasks in task_set(), policy in policy()) {
        let outcome = Simulator::new().run(&tasks, policy).unwrap();
        let utilization = outcome.statistics().utilization();

        prop_assert!(utilization > 0.0);
        prop_assert!(utilization <= 100.0 + TOLERANCE);

        let busy_only = outcome
            .timeline()
            .segments()
            .iter()
            .all(|s| s.occupant.is_task());
        let full = (utilization - 100.0).abs() < TOLERANCE;
        prop_assert_eq!(busy_only, full);
    }

    #[test]
    fn round_robin_finish_covers_switches_charged(
        tasks in task_set(),
        quantum in 1i64..6,
    ) {
        let simulator = Simulator::new();
        let overhead = simulator.config().context_switch_overhead;
        let policy = SchedulingPolicy::round_robin(quantum).unwrap();
        let outcome = simulator.run(&tasks, policy).unwrap();
        let segments = outcome.timeline().segments();

        for task in outcome.tasks() {
            let own = Occupant::Task(task.pid());
            let switches = segments
                .windows(2)
                .filter(|pair| {
                    pair[0].occupant == Occupant::ContextSwitch && pair[1].occupant == own
                })
                .count();
            let floor = task.arrival() + task.burst() + switches as f64 * overhead;
            prop_assert!(task.finish().unwrap() + TOLERANCE >= floor);
        }
    }

    #[test]
    fn runs_are_deterministic(tasks in task_set(), policy in policy()) {
        let first = Simulator::new().run(&tasks, policy).unwrap();
        let second = Simulator::new().run(&tasks, policy).unwrap();

        prop_assert_eq!(first.timeline(), second.timeline());
        prop_assert_eq!(first.report().render(), second.report().render());
    }

    #[test]
    fn recording_contiguous_same_occupant_never_grows(
        split in 0.1f64..5.0,
        length in 5.0f64..10.0,
        pid in 1i64..5,
    ) {
        let mut timeline = Timeline::new();
        timeline.record(0.0, split, Occupant::Task(pid));
        let before = timeline.len();
        timeline.record(split, length, Occupant::Task(pid));
        prop_assert_eq!(timeline.len(), before);
    }
}
