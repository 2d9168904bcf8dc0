use std::io::{self, Write};

use chrono::NaiveDate;
use network_plan::plan::DEFAULT_TASK_DURATION;
use network_plan::table::{render_text_table, schedule_frame};
use network_plan::{NetworkPlan, PlanMetadata, RelationKind, ServiceConfig, logging, relation_kinds};

fn render_plan(plan: &NetworkPlan) -> String {
    match schedule_frame(plan.nodes(), &plan.calendar()) {
        Ok(df) => render_text_table(&df),
        Err(e) => format!("Render error: {}", e),
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show current network plan\n  task [duration] [name...]          Add a task (default duration {DEFAULT_TASK_DURATION})\n  milestone [YYYY-MM-DD] [name...]   Add a milestone, pinned when a date is given\n  dur     <id> <days>                Set task duration\n  fix     <id> <YYYY-MM-DD>          Pin a milestone to a date\n  unfix   <id>                       Release a pinned milestone\n  rename  <id> <name...>             Rename a node\n  note    <id> <text...>             Set node note (rest of line)\n  link    <from> <to> [FS|SS|FF|SF] [delay]\n                                     Link two nodes (default FS, delay 0)\n  delay   <edge> <days>              Set link delay (negative for lead)\n  unlink  <edge>                     Remove a link\n  delete  <id>                       Remove a node and its links\n  edges                              List links\n  critical                           List critical node ids\n  kinds                              List relation kinds\n  summary                            Show plan summary and warnings\n  meta show|name <text...>|epoch <YYYY-MM-DD>\n                                     Show or edit plan metadata\n  quit|exit                          Exit"
    );
}

fn initial_metadata() -> PlanMetadata {
    match ServiceConfig::from_env() {
        Ok(config) => config.initial_metadata(),
        Err(e) => {
            eprintln!("Config error: {} (using defaults)", e);
            PlanMetadata::default()
        }
    }
}

fn main() {
    if let Err(e) = logging::init_logging(None) {
        eprintln!("{}", e);
    }
    let mut plan = NetworkPlan::with_metadata(initial_metadata());

    println!("Network Plan (CLI) - type 'help' for commands\n");
    println!("{}", render_plan(&plan));

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => println!("{}", render_plan(&plan)),
            "task" => {
                let rest: Vec<&str> = parts.collect();
                let (duration, name_parts) = match rest.first().map(|s| s.parse::<i64>()) {
                    Some(Ok(d)) => (d, &rest[1..]),
                    _ => (DEFAULT_TASK_DURATION, &rest[..]),
                };
                let name = name_parts.join(" ");
                let name = (!name.is_empty()).then_some(name.as_str());
                match plan.add_task(name, duration) {
                    Ok(id) => println!("Added task id={}\n{}", id, render_plan(&plan)),
                    Err(e) => println!("Error: {}", e),
                }
            }
            "milestone" => {
                let rest: Vec<&str> = parts.collect();
                let (date, name_parts) = match rest.first().and_then(|s| parse_date(s)) {
                    Some(d) => (Some(d), &rest[1..]),
                    None => (None, &rest[..]),
                };
                let name = name_parts.join(" ");
                let name = (!name.is_empty()).then_some(name.as_str());
                match plan.add_milestone(name, date) {
                    Ok(id) => println!("Added milestone id={}\n{}", id, render_plan(&plan)),
                    Err(e) => println!("Error: {}", e),
                }
            }
            "dur" | "delay" => {
                let id_s = parts.next();
                let val_s = parts.next();
                match (id_s, val_s) {
                    (Some(id_s), Some(val_s)) => {
                        let id: u32 = match id_s.parse() { Ok(v) => v, Err(_) => { println!("Invalid id"); continue; } };
                        let days: i64 = match val_s.parse() { Ok(v) => v, Err(_) => { println!("Invalid days"); continue; } };
                        let res = if cmd == "dur" {
                            plan.set_duration(id, days)
                        } else {
                            plan.set_link_delay(id, days)
                        };
                        match res {
                            Ok(_) => println!("{} set.\n{}", cmd, render_plan(&plan)),
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ if cmd == "dur" => println!("Usage: dur <id> <days>"),
                    _ => println!("Usage: delay <edge> <days>"),
                }
            }
            "fix" => {
                let id_s = parts.next();
                let date_s = parts.next();
                match (id_s, date_s) {
                    (Some(id_s), Some(date_s)) => {
                        let id: u32 = match id_s.parse() { Ok(v) => v, Err(_) => { println!("Invalid id"); continue; } };
                        let date = match parse_date(date_s) { Some(d) => d, None => { println!("Invalid date (YYYY-MM-DD)"); continue; } };
                        match plan.set_fixed_date(id, date) {
                            Ok(_) => println!("Pinned.\n{}", render_plan(&plan)),
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => println!("Usage: fix <id> <YYYY-MM-DD>"),
                }
            }
            "unfix" | "delete" | "unlink" => {
                let id: u32 = match parts.next().map(str::parse) {
                    Some(Ok(v)) => v,
                    _ => {
                        println!("Usage: {} <id>", cmd);
                        continue;
                    }
                };
                let res = match cmd {
                    "unfix" => plan.clear_fixed_date(id),
                    "delete" => plan.remove_node(id).map(|_| ()),
                    _ => plan.disconnect(id).map(|_| ()),
                };
                match res {
                    Ok(_) => println!("{} done.\n{}", cmd, render_plan(&plan)),
                    Err(e) => println!("Error: {}", e),
                }
            }
            "rename" | "note" => {
                let id_s = parts.next();
                let rest: Vec<&str> = parts.collect();
                match (id_s, !rest.is_empty()) {
                    (Some(id_s), true) => {
                        let id: u32 = match id_s.parse() { Ok(v) => v, Err(_) => { println!("Invalid id"); continue; } };
                        let text = rest.join(" ");
                        let res = if cmd == "rename" {
                            plan.rename_node(id, &text)
                        } else {
                            plan.set_note(id, &text)
                        };
                        match res {
                            Ok(_) => println!("{} set.\n{}", cmd, render_plan(&plan)),
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => println!("Usage: {} <id> <text...>", cmd),
                }
            }
            "link" => {
                let from_s = parts.next();
                let to_s = parts.next();
                match (from_s, to_s) {
                    (Some(from_s), Some(to_s)) => {
                        let from: u32 = match from_s.parse() { Ok(v) => v, Err(_) => { println!("Invalid from id"); continue; } };
                        let to: u32 = match to_s.parse() { Ok(v) => v, Err(_) => { println!("Invalid to id"); continue; } };
                        let relation = match parts.next().map(str::parse::<RelationKind>) {
                            None => RelationKind::FinishStart,
                            Some(Ok(kind)) => kind,
                            Some(Err(e)) => { println!("Error: {}", e); continue; }
                        };
                        let delay = match parts.next().map(str::parse::<i64>) {
                            None => 0,
                            Some(Ok(d)) => d,
                            Some(Err(_)) => { println!("Invalid delay"); continue; }
                        };
                        match plan.connect(from, to, relation, delay) {
                            Ok(id) => println!("Linked edge id={}\n{}", id, render_plan(&plan)),
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => println!("Usage: link <from> <to> [FS|SS|FF|SF] [delay]"),
                }
            }
            "edges" => {
                if plan.edges().is_empty() {
                    println!("No links.");
                }
                for edge in plan.edges() {
                    println!(
                        "  #{} {} -> {} {} delay {}",
                        edge.id,
                        edge.from,
                        edge.to,
                        edge.relation(),
                        edge.delay
                    );
                }
            }
            "critical" => {
                let ids = plan.critical_path();
                if ids.is_empty() {
                    println!("Critical path: (none)");
                } else {
                    let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
                    println!("Critical path: {}", ids.join(","));
                }
            }
            "kinds" => {
                for kind in relation_kinds() {
                    println!("  {:<24} {:<13} {}", kind.label, kind.din_name, kind.description);
                }
            }
            "summary" => {
                let summary = plan.summary();
                println!("{}: {}", summary.project_name, summary.to_cli_summary());
                for diagnostic in &summary.diagnostics {
                    println!("  warning: {}", diagnostic);
                }
            }
            "meta" => match parts.next() {
                Some("show") | None => {
                    let meta = plan.metadata();
                    println!(
                        "name: {}\ndescription: {}\nepoch: {}",
                        meta.project_name, meta.project_description, meta.planning_epoch
                    );
                }
                Some("name") => {
                    let rest: Vec<&str> = parts.collect();
                    if rest.is_empty() {
                        println!("Usage: meta name <text...>");
                    } else {
                        plan.set_project_name(rest.join(" "));
                        println!("Project renamed.");
                    }
                }
                Some("epoch") => match parts.next().and_then(parse_date) {
                    Some(date) => {
                        plan.set_planning_epoch(date);
                        println!("Epoch set.\n{}", render_plan(&plan));
                    }
                    None => println!("Usage: meta epoch <YYYY-MM-DD>"),
                },
                Some(_) => println!("Usage: meta show|name <text...>|epoch <YYYY-MM-DD>"),
            },
            _ => {
                println!("Unknown command. Type 'help'.");
            }
        }
    }
}
