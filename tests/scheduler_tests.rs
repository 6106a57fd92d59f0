use cpusched::prelude::*;
use cpusched::scheduler::selector;

fn registry(defs: &[(Pid, u64, u64)]) -> TaskRegistry {
    TaskRegistry::new(
        defs.iter()
            .map(|&(pid, arrival, burst)| TaskDef::new(pid, arrival, burst))
            .collect(),
    )
    .unwrap()
}

fn selected_pid(registry: &TaskRegistry, index: Option<usize>) -> Option<Pid> {
    index.map(|i| registry.tasks()[i].pid())
}

#[test]
fn policy_from_name() {
    assert_eq!(
        SchedulingPolicy::from_name("fcfs", None).unwrap(),
        SchedulingPolicy::Fcfs
    );
    assert_eq!(
        SchedulingPolicy::from_name("SRTF", Some(3)).unwrap(),
        SchedulingPolicy::Srtf
    );

    let rr = SchedulingPolicy::from_name("RR", Some(4)).unwrap();
    assert_eq!(rr.policy_type(), PolicyType::RoundRobin);
    assert_eq!(rr.quantum().map(|q| q.get()), Some(4));
    assert_eq!(rr.to_string(), "RR (q=4)");
}

#[test]
fn policy_errors() {
    assert!(matches!(
        SchedulingPolicy::from_name("RR", None),
        Err(SimError::MissingQuantum)
    ));
    assert!(matches!(
        SchedulingPolicy::round_robin(0),
        Err(SimError::InvalidQuantum(0))
    ));
    assert!(matches!(
        SchedulingPolicy::round_robin(-5),
        Err(SimError::InvalidQuantum(-5))
    ));
    assert!(matches!(
        SchedulingPolicy::from_name("lottery", None),
        Err(SimError::UnknownPolicy(_))
    ));
}

#[test]
fn policy_from_command_line_text() {
    let rr = SchedulingPolicy::from_args("rr", Some(" 3 ")).unwrap();
    assert_eq!(rr.quantum().map(|q| q.get()), Some(3));
    assert_eq!(
        SchedulingPolicy::from_args("SJF", Some("junk")).unwrap(),
        SchedulingPolicy::Sjf
    );

    match SchedulingPolicy::from_args("RR", Some("2.5")) {
        Err(SimError::MalformedQuantum(text)) => assert_eq!(text, "2.5"),
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(matches!(
        SchedulingPolicy::from_args("RR", Some("-1")),
        Err(SimError::InvalidQuantum(-1))
    ));
    assert!(matches!(
        SchedulingPolicy::from_args("RR", None),
        Err(SimError::MissingQuantum)
    ));
    assert_eq!(
        SimError::MalformedQuantum("abc".into()).to_string(),
        "Invalid time quantum: `abc` is not an integer"
    );
    assert_eq!(parse_quantum("7").unwrap(), 7);
}

#[test]
fn preemptive_flags() {
    assert!(!SchedulingPolicy::fcfs().is_preemptive());
    assert!(!SchedulingPolicy::sjf().is_preemptive());
    assert!(SchedulingPolicy::srtf().is_preemptive());
    assert!(SchedulingPolicy::round_robin(2).unwrap().is_preemptive());
    assert_eq!(PolicyType::ALL.len(), 4);
}

#[test]
fn fcfs_breaks_arrival_ties_by_pid() {
    let registry = registry(&[(5, 0, 1), (3, 0, 9), (1, 2, 1)]);
    assert_eq!(selected_pid(&registry, selector::select_fcfs(&registry, 0.0)), Some(3));
    assert_eq!(selected_pid(&registry, selector::select_fcfs(&registry, 5.0)), Some(3));
}

#[test]
fn sjf_prefers_shortest_burst_then_arrival_then_pid() {
    let registry = registry(&[(1, 0, 8), (4, 1, 3), (2, 1, 3), (3, 0, 3)]);
    assert_eq!(selected_pid(&registry, selector::select_sjf(&registry, 0.0)), Some(3));
    assert_eq!(selected_pid(&registry, selector::select_sjf(&registry, 1.0)), Some(3));

    let registry = self::registry(&[(1, 0, 8), (4, 1, 3), (2, 1, 3)]);
    assert_eq!(selected_pid(&registry, selector::select_sjf(&registry, 1.0)), Some(2));
}

#[test]
fn round_robin_is_not_a_scanning_policy() {
    let registry = registry(&[(1, 0, 4), (2, 0, 2)]);
    assert_eq!(selector::select(PolicyType::RoundRobin, &registry, 0.0), None);
    assert_eq!(selector::select(PolicyType::RoundRobin, &registry, 10.0), None);
    assert_eq!(
        selected_pid(&registry, selector::select(PolicyType::Fcfs, &registry, 0.0)),
        Some(1)
    );
}

#[test]
fn selectors_ignore_future_arrivals() {
    let registry = registry(&[(1, 3, 1)]);
    assert_eq!(selector::select_fcfs(&registry, 0.0), None);
    assert_eq!(selector::select_sjf(&registry, 2.0), None);
    assert_eq!(selector::select_srtf(&registry, 2.999), None);
    assert_eq!(
        selected_pid(&registry, selector::select_srtf(&registry, 3.0)),
        Some(1)
    );
}

#[test]
fn ready_queue_admits_in_arrival_order_once() {
    let registry = registry(&[(2, 0, 1), (1, 0, 1), (3, 4, 1)]);
    let mut queue = ReadyQueue::new();

    queue.admit_arrivals(&registry, 0.0);
    assert_eq!(queue.len(), 2);

    // Re-admitting the same window adds nothing.
    queue.admit_arrivals(&registry, 0.0);
    assert_eq!(queue.len(), 2);

    queue.admit_arrivals(&registry, 4.0);
    let order: Vec<Pid> = queue.iter().map(|&i| registry.tasks()[i].pid()).collect();
    assert_eq!(order, vec![1, 2, 3]);

    assert_eq!(selected_pid(&registry, queue.pop_live(&registry)), Some(1));
}

#[test]
fn run_duration_rules() {
    let registry = registry(&[(1, 0, 8), (2, 3, 2)]);

    assert_eq!(SchedulingPolicy::fcfs().run_duration(&registry, 0, 0.0), 8.0);
    assert_eq!(SchedulingPolicy::sjf().run_duration(&registry, 0, 0.0), 8.0);
    assert_eq!(SchedulingPolicy::srtf().run_duration(&registry, 0, 0.0), 3.0);
    assert_eq!(SchedulingPolicy::srtf().run_duration(&registry, 0, 3.0), 8.0);

    let rr = SchedulingPolicy::round_robin(5).unwrap();
    assert_eq!(rr.run_duration(&registry, 0, 0.0), 5.0);
    assert_eq!(rr.run_duration(&registry, 1, 3.0), 2.0);
}

#[test]
fn engine_drives_owned_registry_and_timeline() {
    let mut registry = registry(&[(1, 0, 2), (2, 0, 2)]);
    let mut timeline = Timeline::new();

    let summary = Engine::new(SchedulingPolicy::fcfs(), 0.5)
        .run(&mut registry, &mut timeline)
        .unwrap();

    assert!(registry.all_done());
    assert_eq!(summary.context_switches, 1);
    assert_eq!(summary.dispatches, 2);
    assert_eq!(summary.preemptions, 0);
    assert_eq!(summary.end_time, 4.5);
    assert_eq!(
        timeline.segments(),
        &[
            Segment::new(0.0, 2.0, Occupant::Task(1)),
            Segment::new(2.0, 2.5, Occupant::ContextSwitch),
            Segment::new(2.5, 4.5, Occupant::Task(2)),
        ]
    );
}

#[test]
fn engine_counts_preemptions_by_outgoing_task() {
    let mut registry = registry(&[(1, 0, 5), (2, 1, 1)]);
    let mut timeline = Timeline::new();
    let summary = Engine::new(SchedulingPolicy::srtf(), 0.5)
        .run(&mut registry, &mut timeline)
        .unwrap();

    // P1 is preempted by P2; the switch back after P2 finishes is not a preemption.
    assert_eq!(summary.context_switches, 2);
    assert_eq!(summary.preemptions, 1);
    assert_eq!(registry.get(1).and_then(Task::finish), Some(7.0));

    let mut registry = self::registry(&[(1, 0, 3), (2, 0, 3)]);
    let mut timeline = Timeline::new();
    let summary = Engine::new(SchedulingPolicy::round_robin(2).unwrap(), 0.5)
        .run(&mut registry, &mut timeline)
        .unwrap();

    assert_eq!(summary.context_switches, 3);
    assert_eq!(summary.preemptions, 2);
    assert_eq!(timeline.context_switch_count(), 3);

    // A task that keeps the CPU across quanta is never switched.
    let mut registry = self::registry(&[(1, 0, 5)]);
    let mut timeline = Timeline::new();
    let summary = Engine::new(SchedulingPolicy::round_robin(2).unwrap(), 0.5)
        .run(&mut registry, &mut timeline)
        .unwrap();
    assert_eq!(summary.context_switches, 0);
    assert_eq!(summary.preemptions, 0);
    assert_eq!(summary.dispatches, 3);
}
