use chrono::NaiveDate;
use network_plan::plan::DEFAULT_TASK_DURATION;
use network_plan::{
    Anchor, Diagnostic, Edge, NetworkPlan, NewEdge, NewNode, Node, NodeKind, NodeUpdate,
    PlanError, PlanMetadata, RelationKind,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn chain() -> (NetworkPlan, u32, u32) {
    let mut plan = NetworkPlan::new();
    let a = plan.add_task(Some("Design"), 3).unwrap();
    let b = plan.add_task(Some("Build"), 4).unwrap();
    plan.connect(a, b, RelationKind::FinishStart, 0).unwrap();
    (plan, a, b)
}

#[test]
fn every_mutation_recalculates() {
    let (mut plan, a, b) = chain();
    assert_eq!(plan.node(b).unwrap().early_start, 3);
    assert_eq!(plan.critical_path(), vec![b]);

    plan.set_duration(a, 6).unwrap();
    assert_eq!(plan.node(b).unwrap().early_start, 6);
    assert_eq!(plan.project_end(), 10);

    let edge = plan.edges()[0].id;
    plan.set_link_delay(edge, 2).unwrap();
    assert_eq!(plan.node(b).unwrap().early_start, 8);

    plan.set_link_relation(edge, RelationKind::StartStart).unwrap();
    assert_eq!(plan.node(b).unwrap().early_start, 2);
    assert_eq!(plan.edges()[0].from_type, Anchor::Start);

    plan.disconnect(edge).unwrap();
    assert_eq!(plan.node(b).unwrap().early_start, 0);
    assert!(plan.critical_path().is_empty());
}

#[test]
fn new_nodes_get_defaults() {
    let mut plan = NetworkPlan::new();
    let t = plan
        .add_node(NewNode {
            kind: NodeKind::Task,
            name: None,
            duration: None,
            fixed_date: None,
            note: Some("first".into()),
        })
        .unwrap();
    let node = plan.node(t).unwrap();
    assert_eq!(node.name, "Task 1");
    assert_eq!(node.duration, DEFAULT_TASK_DURATION);
    assert_eq!(node.note.as_deref(), Some("first"));

    let m = plan.add_milestone(Some("Go live"), Some(d(2025, 1, 21))).unwrap();
    let milestone = plan.node(m).unwrap();
    assert!(milestone.is_fixed);
    assert_eq!(milestone.early_start, 20);
}

#[test]
fn milestone_payload_with_duration_is_rejected() {
    let mut plan = NetworkPlan::new();
    let err = plan
        .add_node(NewNode {
            kind: NodeKind::Milestone,
            name: None,
            duration: Some(3),
            fixed_date: None,
            note: None,
        })
        .unwrap_err();
    assert!(matches!(err, PlanError::Invalid(_)));
    assert!(plan.nodes().is_empty());
}

#[test]
fn tasks_cannot_be_pinned() {
    let (mut plan, a, _) = chain();
    let err = plan.set_fixed_date(a, d(2025, 2, 1)).unwrap_err();
    assert!(err.to_string().contains("only milestones"));
    assert!(!plan.node(a).unwrap().is_fixed);
}

#[test]
fn negative_task_duration_is_rejected() {
    let (mut plan, a, _) = chain();
    assert!(matches!(plan.set_duration(a, -1), Err(PlanError::Invalid(_))));
    assert_eq!(plan.node(a).unwrap().duration, 3);
}

#[test]
fn fixing_and_releasing_a_milestone() {
    let (mut plan, _, b) = chain();
    let m = plan.add_milestone(None, None).unwrap();
    plan.connect(b, m, RelationKind::FinishStart, 0).unwrap();
    assert_eq!(plan.node(m).unwrap().early_start, 7);

    plan.set_fixed_date(m, d(2025, 1, 11)).unwrap();
    let pinned = plan.node(m).unwrap();
    assert_eq!(pinned.early_start, 10);
    assert_eq!(plan.node(b).unwrap().total_float, 3);

    plan.clear_fixed_date(m).unwrap();
    let released = plan.node(m).unwrap();
    assert!(!released.is_fixed);
    assert_eq!(released.fixed_date, None);
    assert_eq!(released.early_start, 7);
}

#[test]
fn update_node_applies_partial_changes() {
    let (mut plan, a, _) = chain();
    let updated = plan
        .update_node(
            a,
            NodeUpdate {
                name: Some("Concept".into()),
                note: Some("kickoff".into()),
                ..NodeUpdate::default()
            },
        )
        .unwrap();
    assert_eq!(updated.name, "Concept");
    assert_eq!(updated.duration, 3);

    plan.set_note(a, "").unwrap();
    assert_eq!(plan.node(a).unwrap().note, None);
    plan.rename_node(a, "Plan").unwrap();
    assert_eq!(plan.node(a).unwrap().name, "Plan");
}

#[test]
fn connect_rejects_bad_links() {
    let (mut plan, a, b) = chain();
    assert_eq!(
        plan.connect(a, b, RelationKind::StartStart, 0),
        Err(PlanError::DuplicateLink { from: a, to: b })
    );
    assert_eq!(
        plan.connect(a, a, RelationKind::FinishStart, 0),
        Err(PlanError::SelfLink(a))
    );
    assert_eq!(
        plan.connect(a, 99, RelationKind::FinishStart, 0),
        Err(PlanError::NodeNotFound(99))
    );
    // the reverse direction is a new pair
    assert!(plan.connect(b, a, RelationKind::FinishStart, 0).is_ok());
    assert_eq!(plan.edges().len(), 2);
}

#[test]
fn available_targets_skip_self_and_linked() {
    let (mut plan, a, b) = chain();
    let c = plan.add_task(None, 1).unwrap();
    assert_eq!(plan.available_targets(a), vec![c]);
    assert_eq!(plan.available_targets(b), vec![a, c]);
}

#[test]
fn removing_a_node_drops_its_links() {
    let (mut plan, a, b) = chain();
    let c = plan.add_task(Some("Test"), 2).unwrap();
    plan.connect(b, c, RelationKind::FinishStart, 0).unwrap();

    let removed = plan.remove_node(b).unwrap();
    assert_eq!(removed.name, "Build");
    assert!(plan.edges().is_empty());
    assert_eq!(plan.node(c).unwrap().early_start, 0);
    assert_eq!(plan.remove_node(b), Err(PlanError::NodeNotFound(b)));
    assert_eq!(plan.nodes().len(), 2);
    assert!(plan.node(a).is_some());
}

#[test]
fn ids_are_never_reused() {
    let (mut plan, _, b) = chain();
    plan.remove_node(b).unwrap();
    let next = plan.add_task(None, 1).unwrap();
    assert_eq!(next, 3);
    let edge = plan.add_edge(NewEdge {
        from: 1,
        to: next,
        from_type: Anchor::Finish,
        to_type: Anchor::Finish,
        delay: 0,
    });
    assert_eq!(edge, Ok(2));
    assert_eq!(plan.edge(2).unwrap().relation(), RelationKind::FinishFinish);
}

#[test]
fn unknown_edges_are_reported() {
    let (mut plan, _, _) = chain();
    assert_eq!(plan.disconnect(77), Err(PlanError::EdgeNotFound(77)));
    assert_eq!(plan.set_link_delay(77, 1), Err(PlanError::EdgeNotFound(77)));
}

#[test]
fn epoch_change_reanchors_fixed_milestones() {
    let mut plan = NetworkPlan::new();
    let m = plan.add_milestone(Some("Gate"), Some(d(2025, 3, 1))).unwrap();
    assert_eq!(plan.node(m).unwrap().early_start, 59);

    plan.set_planning_epoch(d(2025, 2, 1));
    assert_eq!(plan.node(m).unwrap().early_start, 28);

    let metadata = PlanMetadata {
        project_name: "Rollout".into(),
        ..PlanMetadata::default()
    };
    plan.set_metadata(metadata);
    assert_eq!(plan.metadata().project_name, "Rollout");
    assert_eq!(plan.node(m).unwrap().early_start, 59);
}

#[test]
fn cycles_surface_as_diagnostics() {
    let (mut plan, a, b) = chain();
    plan.connect(b, a, RelationKind::FinishStart, 0).unwrap();
    assert!(plan
        .diagnostics()
        .contains(&Diagnostic::Cycle { nodes: vec![a, b] }));
    let summary = plan.summary();
    assert!(summary.to_cli_summary().contains("warnings="));
}

#[test]
fn summary_reports_finish_date() {
    let (plan, _, b) = chain();
    let summary = plan.summary();
    assert_eq!(summary.node_count, 2);
    assert_eq!(summary.edge_count, 1);
    assert_eq!(summary.critical_path, vec![b]);
    assert_eq!(summary.critical_count, 1);
    assert_eq!(summary.project_duration, 7);
    assert_eq!(summary.project_finish, d(2025, 1, 8));
    assert!(summary.diagnostics.is_empty());
    assert_eq!(
        summary.to_cli_summary(),
        "nodes=2, edges=1, critical=1, duration=7d, finish=2025-01-08, crit=[2]"
    );
}

#[test]
fn from_parts_validates_and_continues_ids() {
    let nodes = vec![Node::task(4, "A", 2), Node::task(9, "B", 1)];
    let edges = vec![Edge::new(5, 4, 9)];
    let mut plan = NetworkPlan::from_parts(PlanMetadata::default(), nodes, edges).unwrap();
    assert_eq!(plan.node(9).unwrap().early_start, 2);
    assert_eq!(plan.add_task(None, 1).unwrap(), 10);
    assert_eq!(plan.connect(4, 10, RelationKind::FinishStart, 0).unwrap(), 6);

    let dup = NetworkPlan::from_parts(
        PlanMetadata::default(),
        vec![Node::task(1, "A", 1), Node::task(1, "B", 1)],
        vec![],
    );
    assert!(matches!(dup, Err(PlanError::Invalid(_))));

    let dangling = NetworkPlan::from_parts(
        PlanMetadata::default(),
        vec![Node::task(1, "A", 1)],
        vec![Edge::new(1, 1, 2)],
    );
    assert_eq!(dangling.unwrap_err(), PlanError::NodeNotFound(2));
}

#[test]
fn huge_duration_does_not_break_the_store() {
    let mut plan = NetworkPlan::new();
    let a = plan.add_task(Some("Forever"), i64::MAX).unwrap();
    let b = plan.add_task(Some("After"), 1).unwrap();
    plan.connect(a, b, RelationKind::FinishStart, 0).unwrap();
    assert_eq!(plan.node(b).unwrap().early_start, i64::MAX);
    assert_eq!(plan.project_end(), i64::MAX);
    assert_eq!(plan.summary().project_finish, NaiveDate::MAX);
}
