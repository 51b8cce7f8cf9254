use std::fmt::Write;

use chrono::Local;
use upload_core::{
    AppViewModel, ConnectivityStatus, DisplayStatus, Notice, NoticeKind, TaskRowView,
    ToggleControl,
};

use super::format::{progress_bar, size_label, timestamp_label};

pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", status_line(view));
    let _ = writeln!(out, "{}", actions_line(view));

    if view.rows.is_empty() {
        let _ = writeln!(out, "  (no uploads on this page)");
    }
    for row in &view.rows {
        let _ = writeln!(out, "{}", format_row(row));
    }
    out
}

pub fn render_notice(notice: &Notice) -> String {
    match notice.kind {
        NoticeKind::Operational => format!("! server: {}", notice.message),
        NoticeKind::Transport => format!("! connection: {}", notice.message),
    }
}

fn status_line(view: &AppViewModel) -> String {
    let connectivity = match view.connectivity {
        ConnectivityStatus::Connected => "connected",
        ConnectivityStatus::Connecting => "connecting",
        ConnectivityStatus::Disconnected => "disconnected",
    };
    let mut line = format!(
        "Status: {} | page {}/{} | {} uploads | sort {:?} {:?}",
        connectivity,
        view.query.page,
        view.page_count.max(1),
        view.total,
        view.query.sort_by,
        view.query.sort_order,
    );
    if !view.selection.is_empty() {
        let ids: Vec<String> = view.selection.iter().map(ToString::to_string).collect();
        let _ = write!(line, " | selected {}", ids.join(","));
    }
    line
}

fn actions_line(view: &AppViewModel) -> String {
    let mut actions = Vec::new();
    if view.can_connect {
        actions.push("connect");
    }
    if view.can_disconnect {
        actions.push("disconnect");
    }
    actions.push("refresh");
    if view.can_delete_selected {
        actions.push("delete (selection)");
    }
    format!("Actions: {}", actions.join(" | "))
}

fn format_row(row: &TaskRowView) -> String {
    let check = if row.selected { "[x]" } else { "[ ]" };
    let status = match row.display_status {
        DisplayStatus::Success => "done",
        DisplayStatus::Active => "active",
        DisplayStatus::Neutral => "paused",
        DisplayStatus::Exception => "stalled",
    };
    let toggle = match row.toggle {
        Some(ToggleControl::Pause) => " (toggle: pause)",
        Some(ToggleControl::Resume) => " (toggle: resume)",
        None => "",
    };
    format!(
        "{check} #{id} {name} | {size} | {bar} {percent:>3}% {status} | updated {updated} | created {created}{toggle}",
        id = row.task.id,
        name = row.task.name,
        size = size_label(row.task.size),
        bar = progress_bar(row.percent),
        percent = row.percent,
        updated = timestamp_label(row.task.updated_at, &Local),
        created = timestamp_label(row.task.created_at, &Local),
    )
}
