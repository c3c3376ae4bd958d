//! Property-based tests over randomized process sets.

use proptest::prelude::*;

use ticksched::{
    metrics, Fcfs, Lottery, Mlfq, MlfqConfig, RoundRobin, Scheduler, Sjf, Srtf, Trace,
};
use ticksched_types::{Pid, Process};

fn build_processes(specs: &[(u64, u64, u64)]) -> Vec<Process> {
    specs
        .iter()
        .enumerate()
        .map(|(i, &(arrival, duration, tickets))| {
            Process::new(Pid::new(i as u32 + 1), arrival, duration)
                .unwrap()
                .with_tickets(tickets)
        })
        .collect()
}

/// Every process appears in the trace exactly `duration` times and no
/// execution tick is unaccounted for.
fn assert_conservation(label: &str, trace: &Trace, specs: &[(u64, u64, u64)]) {
    let mut executed = 0;
    for (i, &(_, duration, _)) in specs.iter().enumerate() {
        let pid = Pid::new(i as u32 + 1);
        assert_eq!(
            trace.ticks_for(pid) as u64,
            duration,
            "{label}: {pid} ran the wrong number of ticks"
        );
        executed += duration;
    }

    let non_idle = trace.states().iter().filter(|s| s.pid().is_some()).count();
    assert_eq!(non_idle as u64, executed, "{label}: lost or doubled ticks");
}

proptest! {
    #[test]
    fn all_policies_conserve_work(
        specs in prop::collection::vec((0..10u64, 1..8u64, 1..10u64), 1..6),
        seed in any::<u64>(),
    ) {
        let traces = [
            ("FCFS", Fcfs::new(build_processes(&specs)).unwrap().run()),
            ("SJF", Sjf::new(build_processes(&specs)).unwrap().run()),
            ("SRTF", Srtf::new(build_processes(&specs)).unwrap().run()),
            (
                "Round-Robin",
                RoundRobin::new(build_processes(&specs), 2).unwrap().run(),
            ),
            (
                "MLFQ",
                Mlfq::new(
                    build_processes(&specs),
                    MlfqConfig::new(3, vec![2, 4, 8], 5).unwrap(),
                )
                .unwrap()
                .run(),
            ),
            (
                "Lottery",
                Lottery::new(build_processes(&specs), 2, seed).unwrap().run(),
            ),
        ];

        for (label, trace) in &traces {
            assert_conservation(label, trace, &specs);
        }
    }

    #[test]
    fn metrics_formulas_stay_consistent(
        specs in prop::collection::vec((0..10u64, 1..8u64, 1..10u64), 1..6),
    ) {
        let mut srtf = Srtf::new(build_processes(&specs)).unwrap();
        let trace = srtf.run();
        let per_process = metrics::calculate(trace.states(), srtf.process_table());

        prop_assert_eq!(per_process.len(), specs.len());
        for m in per_process.values() {
            prop_assert_eq!(m.turnaround_time, m.waiting_time + m.duration);
            prop_assert!(m.response_time <= m.waiting_time);
            prop_assert!(m.finish_time > m.first_run);
            prop_assert!(m.first_run >= m.arrival_time);
        }
    }

    #[test]
    fn round_robin_fairness_bound(
        durations in prop::collection::vec(4..10u64, 2..5),
        quantum in 1..4u64,
    ) {
        // All processes arrive together: while everyone is ready, no
        // process waits more than (n-1)*q ticks between executions.
        let specs: Vec<_> = durations.iter().map(|&d| (0, d, 1)).collect();
        let n = specs.len() as u64;
        let shortest = *durations.iter().min().unwrap();

        let mut rr = RoundRobin::new(build_processes(&specs), quantum).unwrap();
        let trace = rr.run();

        for (i, _) in specs.iter().enumerate() {
            let pid = Pid::new(i as u32 + 1);
            let ticks: Vec<u64> = trace
                .states()
                .iter()
                .enumerate()
                .filter(|(_, s)| s.pid() == Some(pid))
                .map(|(idx, _)| idx as u64)
                .collect();

            // The bound only holds while no process has finished yet.
            for pair in ticks.windows(2) {
                if pair[1] < shortest * n {
                    prop_assert!(pair[1] - pair[0] - 1 <= (n - 1) * quantum);
                }
            }
        }
    }
}

#[test]
fn lottery_fairness_converges_to_ticket_share() {
    // Two processes with a 3:1 ticket ratio; count wins while both are
    // alive, across many seeds. Quantum 1 forces a fresh draw each tick.
    let duration = 30u64;
    let mut draws = 0u64;
    let mut p1_wins = 0u64;

    for seed in 0..100 {
        let processes = vec![
            Process::new(Pid::new(1), 0, duration)
                .unwrap()
                .with_tickets(3),
            Process::new(Pid::new(2), 0, duration)
                .unwrap()
                .with_tickets(1),
        ];
        let trace = Lottery::new(processes, 1, seed).unwrap().run();

        let mut p1 = 0u64;
        let mut p2 = 0u64;
        for state in trace.states() {
            let Some(pid) = state.pid() else { continue };
            draws += 1;
            if pid == Pid::new(1) {
                p1_wins += 1;
                p1 += 1;
            } else {
                p2 += 1;
            }
            if p1 == duration || p2 == duration {
                break;
            }
        }
    }

    let fraction = p1_wins as f64 / draws as f64;
    assert!(
        (fraction - 0.75).abs() < 0.04,
        "3-ticket process won {fraction} of draws, expected ~0.75"
    );
}
