use std::error::Error;

use cpmdiag::cpm::{
    critical_path, forward_lengths, node_timings, parse_rows, ActivityGraph, ActivityRow,
};
use cpmdiag::errors::CpmError;

type TestResult = Result<(), Box<dyn Error>>;

fn row(name: &str, duration: &str, dependencies: &str) -> ActivityRow {
    ActivityRow {
        name: name.to_string(),
        duration: duration.to_string(),
        dependencies: dependencies.to_string(),
    }
}

fn diamond_rows() -> Vec<ActivityRow> {
    vec![
        row("A", "1", ""),
        row("B", "2", "A"),
        row("C", "5", "A"),
        row("D", "1", "B, C"),
    ]
}

#[test]
fn diamond_project_takes_the_longer_branch() -> TestResult {
    let activities = parse_rows(&diamond_rows())?;
    let graph = ActivityGraph::from_activities(&activities);

    let cp = critical_path(&graph)?;
    assert_eq!(cp.activities, vec!["A", "C", "D"]);
    assert_eq!(cp.total_duration, 7);
    assert_eq!(cp.sequence(), "A -> C -> D");

    Ok(())
}

#[test]
fn single_activity_is_its_own_critical_path() -> TestResult {
    let activities = parse_rows(&[row("A", "3", "")])?;
    let graph = ActivityGraph::from_activities(&activities);

    let cp = critical_path(&graph)?;
    assert_eq!(cp.activities, vec!["A"]);
    assert_eq!(cp.total_duration, 3);

    Ok(())
}

#[test]
fn undefined_dependency_becomes_a_dangling_node() -> TestResult {
    let activities = parse_rows(&[row("B", "2", "Z")])?;
    let graph = ActivityGraph::from_activities(&activities);

    assert!(graph.is_defined("B"));
    assert!(!graph.is_defined("Z"));
    assert_eq!(graph.duration_of("Z"), None);
    assert_eq!(
        graph.edges().collect::<Vec<_>>(),
        vec![("Z", "B", 2)]
    );

    // The dangling node can end up on the path; it contributes zero duration.
    let cp = critical_path(&graph)?;
    assert_eq!(cp.activities, vec!["Z", "B"]);
    assert_eq!(cp.total_duration, 2);

    Ok(())
}

#[test]
fn forward_lengths_use_destination_duration_weights() -> TestResult {
    let activities = parse_rows(&diamond_rows())?;
    let graph = ActivityGraph::from_activities(&activities);

    let lengths = forward_lengths(&graph);
    assert_eq!(lengths.get("A"), Some(&0));
    assert_eq!(lengths.get("B"), Some(&2));
    assert_eq!(lengths.get("C"), Some(&5));
    // Shortest route into D goes through B (2 + 1), not C (5 + 1).
    assert_eq!(lengths.get("D"), Some(&3));

    let timings = node_timings(&graph, &lengths);

    let a = timings["A"];
    assert_eq!(a.early_finish, 0);
    assert_eq!(a.early_start, -1);
    assert_eq!(a.duration, 1);

    let d = timings["D"];
    assert_eq!(d.early_finish, 3);
    assert_eq!(d.early_start, 2);

    Ok(())
}

#[test]
fn unreachable_activity_falls_back_to_duration_only_timing() -> TestResult {
    let activities = parse_rows(&[row("A", "1", ""), row("X", "4", "")])?;
    let graph = ActivityGraph::from_activities(&activities);

    let lengths = forward_lengths(&graph);
    assert!(lengths.get("X").is_none());

    let timings = node_timings(&graph, &lengths);
    let x = timings["X"];
    assert_eq!(x.early_start, 0);
    assert_eq!(x.early_finish, 4);

    Ok(())
}

#[test]
fn invalid_duration_aborts_the_whole_parse() {
    let result = parse_rows(&[row("A", "1", ""), row("B", "two", "A")]);
    match result {
        Err(CpmError::InvalidDuration { row, value }) => {
            assert_eq!(row, 1);
            assert_eq!(value, "two");
        }
        other => panic!("expected InvalidDuration, got {other:?}"),
    }
}

#[test]
fn negative_duration_is_rejected() {
    assert!(matches!(
        parse_rows(&[row("A", "-1", "")]),
        Err(CpmError::InvalidDuration { .. })
    ));
}

#[test]
fn duplicate_name_overwrites_but_keeps_first_position() -> TestResult {
    let activities = parse_rows(&[
        row("A", "1", ""),
        row("B", "2", "A"),
        row("A", "9", "B"),
    ])?;

    assert_eq!(activities.len(), 2);
    assert_eq!(activities[0].name, "A");
    assert_eq!(activities[0].duration, 9);
    assert_eq!(activities[0].dependencies, vec!["B"]);
    assert_eq!(activities[1].name, "B");

    Ok(())
}

#[test]
fn dependency_field_is_trimmed_and_empty_tokens_dropped() -> TestResult {
    let activities = parse_rows(&[row("D", "1", " B ,, C , ")])?;
    assert_eq!(activities[0].dependencies, vec!["B", "C"]);
    Ok(())
}

#[test]
fn zero_duration_member_stays_on_the_path() -> TestResult {
    let activities = parse_rows(&[
        row("A", "1", ""),
        row("B", "0", "A"),
        row("C", "5", "B"),
    ])?;
    let graph = ActivityGraph::from_activities(&activities);

    // The edge into B weighs 0, but the path must still extend back to A.
    let cp = critical_path(&graph)?;
    assert_eq!(cp.activities, vec!["A", "B", "C"]);
    assert_eq!(cp.total_duration, 6);

    Ok(())
}

#[test]
fn all_zero_durations_pick_the_earliest_node_deterministically() -> TestResult {
    let activities = parse_rows(&[row("A", "0", ""), row("B", "0", "A")])?;
    let graph = ActivityGraph::from_activities(&activities);

    // Every path totals 0; the earliest node in topological order wins.
    let cp = critical_path(&graph)?;
    assert_eq!(cp.activities, vec!["A"]);
    assert_eq!(cp.total_duration, 0);

    Ok(())
}

#[test]
fn cycle_is_reported_as_dependency_cycle() -> TestResult {
    let activities = parse_rows(&[row("A", "1", "B"), row("B", "2", "A")])?;
    let graph = ActivityGraph::from_activities(&activities);

    assert!(matches!(
        critical_path(&graph),
        Err(CpmError::DependencyCycle(_))
    ));

    Ok(())
}

#[test]
fn empty_graph_is_an_empty_project() {
    let graph = ActivityGraph::from_activities(&[]);
    assert!(matches!(critical_path(&graph), Err(CpmError::EmptyProject)));
}

#[test]
fn analysis_is_deterministic_for_fixed_input() -> TestResult {
    let activities = parse_rows(&diamond_rows())?;

    let first = critical_path(&ActivityGraph::from_activities(&activities))?;
    let second = critical_path(&ActivityGraph::from_activities(&activities))?;

    assert_eq!(first, second);
    Ok(())
}
