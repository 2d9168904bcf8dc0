use chrono::NaiveDate;
use network_plan::table::{SCHEDULE_COLUMNS, render_text_table, schedule_frame};
use network_plan::{NetworkPlan, RelationKind};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_plan() -> NetworkPlan {
    let mut plan = NetworkPlan::new();
    let a = plan.add_task(Some("Design"), 3).unwrap();
    let b = plan.add_task(Some("Build"), 4).unwrap();
    let m = plan.add_milestone(Some("Launch"), Some(d(2025, 1, 11))).unwrap();
    plan.connect(a, b, RelationKind::FinishStart, 0).unwrap();
    plan.connect(b, m, RelationKind::FinishStart, 0).unwrap();
    plan.set_note(a, "scope freeze").unwrap();
    plan
}

#[test]
fn frame_has_one_row_per_node() {
    let plan = sample_plan();
    let df = schedule_frame(plan.nodes(), &plan.calendar()).unwrap();
    assert_eq!(df.height(), 3);

    let names: Vec<String> = df.get_column_names().iter().map(|n| n.to_string()).collect();
    assert_eq!(names, SCHEDULE_COLUMNS.map(String::from).to_vec());

    let es = df.column("early_start").unwrap().i64().unwrap();
    assert_eq!(es.get(1), Some(3));
    let tf = df.column("total_float").unwrap().i64().unwrap();
    assert_eq!(tf.get(1), Some(3));
    let critical = df.column("critical").unwrap().bool().unwrap();
    assert_eq!(critical.get(1), Some(false));
    assert_eq!(critical.get(2), Some(true));
}

#[test]
fn date_columns_follow_the_calendar() {
    let plan = sample_plan();
    let df = schedule_frame(plan.nodes(), &plan.calendar()).unwrap();

    let fixed = df.column("fixed_date").unwrap().date().unwrap();
    assert_eq!(fixed.get(0), None);
    // 2025-01-11 counted from 1970-01-01
    assert_eq!(fixed.get(2), Some(20099));

    let finish = df.column("finish_date").unwrap().date().unwrap();
    assert_eq!(finish.get(1), Some(20096));
}

#[test]
fn text_table_lists_every_node() {
    let plan = sample_plan();
    let df = schedule_frame(plan.nodes(), &plan.calendar()).unwrap();
    let text = render_text_table(&df);

    assert!(text.starts_with('+'));
    assert!(text.contains("Design"));
    assert!(text.contains("scope freeze"));
    assert!(text.contains("2025-01-11"));
    // header, two separators, three rows, closing separator
    assert_eq!(text.lines().count(), 7);
    let widths: Vec<usize> = text.lines().map(|l| l.chars().count()).collect();
    assert!(widths.windows(2).all(|w| w[0] == w[1]));
}
