//! Text rendering for tool results

use super::dashboard::Dashboard;
use super::models::{Epic, Task};
use super::session::SessionLogEntry;

const UNSET: &str = "N/A";
const UNDECIDED: &str = "미정";

pub fn epic_not_found(epic_name: &str) -> String {
    format!("❌ Epic '{}'을(를) 찾을 수 없습니다.", epic_name)
}

pub fn task_not_found(task_name: &str) -> String {
    format!("❌ Task '{}'을(를) 찾을 수 없습니다.", task_name)
}

fn or_unset(value: &str) -> &str {
    if value.is_empty() {
        UNSET
    } else {
        value
    }
}

fn period(start: &str, target: &str) -> String {
    let start = if start.is_empty() { UNDECIDED } else { start };
    let target = if target.is_empty() { UNDECIDED } else { target };
    format!("{} → {}", start, target)
}

/// `"50%"`, or `"N/A"` when the rollup is absent.
pub fn progress(epic: &Epic) -> String {
    epic.progress_percent()
        .map(|pct| format!("{}%", pct))
        .unwrap_or_else(|| UNSET.to_string())
}

/// Rollup numbers are floats on the wire; whole values print without a
/// fractional part.
fn count(value: Option<f64>) -> String {
    let value = value.unwrap_or(0.0);
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

pub fn epic_list(epics: &[Epic], status_filter: &str) -> String {
    if epics.is_empty() {
        return "조회된 Epic이 없습니다.".to_string();
    }

    let entries: Vec<String> = epics
        .iter()
        .map(|epic| {
            format!(
                "• {}\n  Status: {} | Tasks: {} | Progress: {}\n  기간: {}",
                epic.name,
                or_unset(&epic.status),
                count(epic.task_count),
                progress(epic),
                period(&epic.start_date, &epic.target_date),
            )
        })
        .collect();

    let mut header = format!("📋 AX Epics ({}개)", epics.len());
    if !status_filter.is_empty() {
        header.push_str(&format!(" [필터: {}]", status_filter));
    }
    format!("{}\n\n{}", header, entries.join("\n\n"))
}

pub fn task_list(epic_name: &str, tasks: &[Task], status_filter: &str) -> String {
    if tasks.is_empty() {
        let scope = if epic_name.is_empty() {
            "전체".to_string()
        } else {
            format!("Epic '{}'", epic_name)
        };
        return format!("조회된 Task가 없습니다 ({}).", scope);
    }

    let lines: Vec<String> = tasks
        .iter()
        .map(|task| {
            let check = if task.completed { "✅" } else { "⬜" };
            let badge = if task.priority.is_empty() {
                String::new()
            } else {
                format!("[{}]", task.priority)
            };
            let status = task.status.as_ref().map(|s| s.label()).unwrap_or_default();
            format!(
                "  {} {} {}\n     상태: {} | Source: {} | Type: {}",
                check,
                badge,
                task.name,
                or_unset(status),
                or_unset(&task.source),
                or_unset(&task.task_type),
            )
        })
        .collect();

    let done = tasks.iter().filter(|t| t.is_done()).count();
    let scope = if epic_name.is_empty() { "전체" } else { epic_name };
    let mut header = format!("📝 Tasks for '{}' ({}/{} 완료)", scope, done, tasks.len());
    if !status_filter.is_empty() {
        header.push_str(&format!(" [필터: {}]", status_filter));
    }
    format!("{}\n\n{}", header, lines.join("\n"))
}

pub fn task_created(
    task_name: &str,
    epic_name: &str,
    task_type: &str,
    priority: &str,
    url: &str,
) -> String {
    format!(
        "✅ Task 생성 완료!\n  이름: {}\n  Epic: {}\n  상태: 🆕 신규 | 유형: {} | 우선순위: {}\n  URL: {}",
        task_name,
        epic_name,
        or_unset(task_type),
        or_unset(priority),
        url
    )
}

pub fn task_completed(task_name: &str) -> String {
    format!("✅ Task 완료 처리됨: {}\n  상태: Done | Completed: ✓", task_name)
}

/// `not_found` lists the requested Task names that did not resolve.
pub fn session_logged(epic_name: &str, entry: &SessionLogEntry, not_found: &[String]) -> String {
    let mut msg = format!(
        "📝 세션 로그 기록 완료!\n  Epic: {}\n  시간: {}\n  요약: {}",
        epic_name, entry.timestamp, entry.summary
    );
    if !entry.completed.is_empty() {
        msg.push_str(&format!("\n  완료 Task: {}", entry.completed.join(", ")));
    }
    if !not_found.is_empty() {
        msg.push_str(&format!("\n  찾을 수 없는 Task: {}", not_found.join(", ")));
    }
    msg
}

pub fn dashboard(epic_name: &str, dashboard: &Dashboard) -> String {
    let epic = &dashboard.epic;
    let summary = &dashboard.summary;

    let mut lines = vec![
        format!("📊 Dashboard: {}", epic_name),
        "=".repeat(40),
        format!("상태: {}", or_unset(&epic.status)),
        format!("기간: {}", period(&epic.start_date, &epic.target_date)),
        String::new(),
        format!("📈 진행률: {}", progress(epic)),
        format!("  전체 Task: {}", summary.total),
        format!("  완료: {}", summary.done),
        format!("  진행 중: {}", summary.in_progress),
        format!("  차단됨: {}", summary.blocked),
        format!("  기타: {}", summary.other),
    ];
    if dashboard.truncated {
        lines.push(format!(
            "  ⚠️ 첫 {}개 Task만 집계되었습니다.",
            summary.total
        ));
    }
    lines.push(String::new());
    lines.push("📋 상태별 분포:".to_string());
    for (label, n) in dashboard.buckets.iter() {
        lines.push(format!("  {}: {} ({})", label, "█".repeat(n), n));
    }

    lines.join("\n")
}
