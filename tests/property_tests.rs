use chrono::NaiveDate;
use network_plan::{Edge, Node, RelationKind, analyze, recalculate};
use proptest::prelude::*;

// Random plans over a handful of nodes. Edges pick arbitrary endpoints, so
// cycles, self-links and parallel edges all show up.
fn plan_strategy(max_nodes: usize) -> impl Strategy<Value = (Vec<Node>, Vec<Edge>)> {
    (1..=max_nodes).prop_flat_map(|count| {
        let nodes = proptest::collection::vec((0..12i64, 0..6u8, 0..30i64), count);
        let edges = proptest::collection::vec((0..count, 0..count, 0..4usize, -3..6i64), 0..count * 2);
        (nodes, edges).prop_map(|(raw_nodes, raw_edges)| {
            let nodes = raw_nodes
                .into_iter()
                .enumerate()
                .map(|(i, (duration, kind, day))| {
                    let id = i as u32 + 1;
                    match kind {
                        0 => Node::milestone(id, format!("M{id}")),
                        1 => {
                            let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
                                + chrono::Days::new(day as u64);
                            Node::fixed_milestone(id, format!("F{id}"), date)
                        }
                        _ => Node::task(id, format!("T{id}"), duration),
                    }
                })
                .collect();
            let edges = raw_edges
                .into_iter()
                .enumerate()
                .map(|(i, (from, to, kind, delay))| {
                    Edge::with_relation(
                        i as u32 + 1,
                        from as u32 + 1,
                        to as u32 + 1,
                        RelationKind::ALL[kind],
                        delay,
                    )
                })
                .collect();
            (nodes, edges)
        })
    })
}

proptest! {
    #[test]
    fn floats_are_non_negative_and_ordered((nodes, edges) in plan_strategy(8)) {
        let out = recalculate(&nodes, &edges);
        prop_assert_eq!(out.len(), nodes.len());
        for node in &out {
            prop_assert!(node.total_float >= 0);
            prop_assert!(node.free_float >= 0);
            prop_assert!(node.free_float <= node.total_float);
        }
    }

    #[test]
    fn durations_hold_for_computed_nodes((nodes, edges) in plan_strategy(8)) {
        let out = recalculate(&nodes, &edges);
        for node in out.iter().filter(|n| n.fixed_anchor().is_none()) {
            let duration = node.scheduled_duration();
            prop_assert_eq!(node.early_finish - node.early_start, duration);
            prop_assert_eq!(node.late_finish - node.late_start, duration);
            prop_assert!(node.early_start >= 0);
        }
    }

    #[test]
    fn recalculation_is_idempotent((nodes, edges) in plan_strategy(8)) {
        let once = recalculate(&nodes, &edges);
        let twice = recalculate(&once, &edges);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn input_order_and_descriptive_fields_survive((nodes, edges) in plan_strategy(8)) {
        let out = recalculate(&nodes, &edges);
        for (before, after) in nodes.iter().zip(&out) {
            prop_assert_eq!(before.id, after.id);
            prop_assert_eq!(&before.name, &after.name);
            prop_assert_eq!(before.kind, after.kind);
            prop_assert_eq!(before.fixed_date, after.fixed_date);
        }
    }

    #[test]
    fn fixed_milestones_stay_on_their_day((nodes, edges) in plan_strategy(8)) {
        let report = analyze(&nodes, &edges);
        for node in &report.nodes {
            if let Some(date) = node.fixed_anchor() {
                let day = (date - NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()).num_days();
                prop_assert_eq!(node.early_start, day);
                prop_assert_eq!(node.early_finish, day);
                prop_assert_eq!(node.late_finish, day);
                prop_assert!(report.project_end >= day);
            }
        }
    }

    #[test]
    fn isolated_node_floats_to_project_end((mut nodes, edges) in plan_strategy(6), duration in 0..15i64) {
        let solo_id = 1000;
        nodes.push(Node::task(solo_id, "solo", duration));
        let report = analyze(&nodes, &edges);
        let solo = report.nodes.iter().find(|n| n.id == solo_id).unwrap();
        prop_assert_eq!(solo.early_start, 0);
        prop_assert_eq!(solo.early_finish, duration);
        prop_assert_eq!(solo.late_start, report.project_end - duration);
        prop_assert_eq!(solo.total_float, report.project_end - duration);
    }
}
