use crate::calendar::ProjectCalendar;
use crate::node::Node;
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;

/// Days from 0001-01-01 to 1970-01-01, the origin polars counts dates from.
const UNIX_EPOCH_FROM_CE: i32 = 719_163;

pub const SCHEDULE_COLUMNS: [&str; 15] = [
    "id",
    "name",
    "kind",
    "duration",
    "fixed_date",
    "early_start",
    "early_finish",
    "late_start",
    "late_finish",
    "total_float",
    "free_float",
    "critical",
    "start_date",
    "finish_date",
    "note",
];

fn date_to_i32(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_FROM_CE
}

fn date_series(name: &'static str, dates: Vec<Option<i32>>) -> PolarsResult<Column> {
    Ok(Series::new(PlSmallStr::from_static(name), dates)
        .cast(&DataType::Date)?
        .into_column())
}

/// One row per node, in input order, with day offsets and calendar dates.
pub fn schedule_frame(nodes: &[Node], calendar: &ProjectCalendar) -> PolarsResult<DataFrame> {
    let ids: Vec<u32> = nodes.iter().map(|n| n.id).collect();
    let names: Vec<&str> = nodes.iter().map(|n| n.name.as_str()).collect();
    let kinds: Vec<&str> = nodes.iter().map(|n| n.kind.as_str()).collect();
    let durations: Vec<i64> = nodes.iter().map(|n| n.scheduled_duration()).collect();
    let fixed: Vec<Option<i32>> = nodes
        .iter()
        .map(|n| n.fixed_anchor().map(date_to_i32))
        .collect();
    let early_start: Vec<i64> = nodes.iter().map(|n| n.early_start).collect();
    let early_finish: Vec<i64> = nodes.iter().map(|n| n.early_finish).collect();
    let late_start: Vec<i64> = nodes.iter().map(|n| n.late_start).collect();
    let late_finish: Vec<i64> = nodes.iter().map(|n| n.late_finish).collect();
    let total_float: Vec<i64> = nodes.iter().map(|n| n.total_float).collect();
    let free_float: Vec<i64> = nodes.iter().map(|n| n.free_float).collect();
    let critical: Vec<bool> = nodes.iter().map(|n| n.is_critical()).collect();
    let start_dates: Vec<Option<i32>> = nodes
        .iter()
        .map(|n| Some(date_to_i32(calendar.date_for_day(n.early_start))))
        .collect();
    let finish_dates: Vec<Option<i32>> = nodes
        .iter()
        .map(|n| Some(date_to_i32(calendar.date_for_day(n.early_finish))))
        .collect();
    let notes: Vec<Option<&str>> = nodes.iter().map(|n| n.note.as_deref()).collect();

    let columns = vec![
        Series::new(PlSmallStr::from_static("id"), ids).into_column(),
        Series::new(PlSmallStr::from_static("name"), names).into_column(),
        Series::new(PlSmallStr::from_static("kind"), kinds).into_column(),
        Series::new(PlSmallStr::from_static("duration"), durations).into_column(),
        date_series("fixed_date", fixed)?,
        Series::new(PlSmallStr::from_static("early_start"), early_start).into_column(),
        Series::new(PlSmallStr::from_static("early_finish"), early_finish).into_column(),
        Series::new(PlSmallStr::from_static("late_start"), late_start).into_column(),
        Series::new(PlSmallStr::from_static("late_finish"), late_finish).into_column(),
        Series::new(PlSmallStr::from_static("total_float"), total_float).into_column(),
        Series::new(PlSmallStr::from_static("free_float"), free_float).into_column(),
        Series::new(PlSmallStr::from_static("critical"), critical).into_column(),
        date_series("start_date", start_dates)?,
        date_series("finish_date", finish_dates)?,
        Series::new(PlSmallStr::from_static("note"), notes).into_column(),
    ];
    DataFrame::new(columns)
}

fn cell_text(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Boolean(true) => "*".to_string(),
        AnyValue::Boolean(false) => String::new(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::String(s) => s.to_string(),
        other => other.to_string(),
    }
}

/// Boxed plain-text rendering used by the REPL.
pub fn render_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let header: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();
    let rows: Vec<Vec<String>> = (0..df.height())
        .map(|row| {
            columns
                .iter()
                .map(|col| col.get(row).map(|av| cell_text(&av)).unwrap_or_default())
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(w + 2));
        sep.push('+');
    }

    let line = |cells: &[String]| {
        let mut out = String::from("|");
        for (cell, w) in cells.iter().zip(&widths) {
            let pad = w.saturating_sub(cell.chars().count());
            out.push(' ');
            out.push_str(cell);
            out.push_str(&" ".repeat(pad));
            out.push_str(" |");
        }
        out
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&line(&header));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_epoch_maps_to_zero() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(date_to_i32(epoch), 0);
        let next = NaiveDate::from_ymd_opt(1970, 1, 2).unwrap();
        assert_eq!(date_to_i32(next), 1);
    }

    #[test]
    fn empty_plan_renders_header_only() {
        let df = schedule_frame(&[], &ProjectCalendar::default()).unwrap();
        assert_eq!(df.height(), 0);
        let text = render_text_table(&df);
        assert!(text.contains("| id |"));
        assert_eq!(text.lines().count(), 4);
    }
}
