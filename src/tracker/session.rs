//! Session log entries appended to an Epic page

use crate::notion::{Block, RichText};
use chrono::{DateTime, FixedOffset, Utc};

/// Session timestamps are written in KST.
const KST_OFFSET_SECS: i32 = 9 * 3600;

pub fn kst() -> FixedOffset {
    FixedOffset::east_opt(KST_OFFSET_SECS).expect("UTC+9 is a valid offset")
}

pub fn now_kst() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&kst())
}

/// `YYYY-MM-DD HH:MM`
pub fn format_timestamp(at: &DateTime<FixedOffset>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

/// Split a comma-separated list of Task names, trimming each and dropping
/// empty entries.
pub fn parse_task_list(tasks_done: &str) -> Vec<String> {
    tasks_done
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// One session log entry. Written once, never read back.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionLogEntry {
    pub timestamp: String,
    pub summary: String,
    /// Tasks actually marked done during the session
    pub completed: Vec<String>,
}

impl SessionLogEntry {
    pub fn new(at: &DateTime<FixedOffset>, summary: &str, completed: Vec<String>) -> Self {
        Self {
            timestamp: format_timestamp(at),
            summary: summary.to_string(),
            completed,
        }
    }

    /// Divider, heading, summary paragraph, and a bold completion line when
    /// any Task was completed.
    pub fn to_blocks(&self) -> Vec<Block> {
        let mut blocks = vec![
            Block::Divider,
            Block::Heading3(vec![RichText::plain(format!(
                "📝 Session Log — {}",
                self.timestamp
            ))]),
            Block::Paragraph(vec![RichText::plain(self.summary.clone())]),
        ];
        if !self.completed.is_empty() {
            blocks.push(Block::Paragraph(vec![RichText::bold(format!(
                "✅ 완료: {}",
                self.completed.join(", ")
            ))]));
        }
        blocks
    }
}
