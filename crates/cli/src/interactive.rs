//! Line-driven navigation between adjacent groups.
//!
//! Reads one command per line: `p`/`h`/`left` moves to the previous group,
//! `n`/`l`/`right` to the next one, `q` quits. Moving past either end is
//! ignored.

use std::io::Write;

use chrono::TimeZone;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use groupboard_core::group::GroupView;
use groupboard_core::Competition;

use crate::render::{render_group, Layout, RenderOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Previous,
    Next,
    Quit,
}

pub fn parse_key(line: &str) -> Option<NavKey> {
    match line.trim().to_ascii_lowercase().as_str() {
        "p" | "h" | "left" | "prev" | "previous" => Some(NavKey::Previous),
        "n" | "l" | "right" | "next" => Some(NavKey::Next),
        "q" | "quit" | "exit" => Some(NavKey::Quit),
        _ => None,
    }
}

/// The activity code `key` leads to from `view`, if any.
pub fn target(view: &GroupView<'_>, key: NavKey) -> Option<String> {
    match key {
        NavKey::Previous => view.previous.clone(),
        NavKey::Next => view.next.clone(),
        NavKey::Quit => None,
    }
}

const PROMPT: &str = "[p]revious  [n]ext  [q]uit > ";

/// Render `activity_code`, then keep re-rendering as commands arrive on
/// `input` until it is exhausted or the user quits. Returns the code shown
/// last.
pub async fn run<R, W, Tz>(
    wcif: &Competition,
    activity_code: String,
    layout: Layout,
    tz: &Tz,
    options: RenderOptions,
    input: R,
    out: &mut W,
) -> std::io::Result<String>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut current = activity_code;
    let mut lines = input.lines();

    loop {
        let view = GroupView::build(Some(wcif), &current);
        write!(out, "{}", render_group(&view, layout, tz, options))?;
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let next_code = loop {
            let Some(line) = lines.next_line().await? else {
                return Ok(current);
            };
            match parse_key(&line) {
                Some(NavKey::Quit) => return Ok(current),
                Some(key) => match target(&view, key) {
                    Some(code) => break code,
                    None => write!(out, "No group in that direction.\n{PROMPT}")?,
                },
                None => write!(out, "{PROMPT}")?,
            }
            out.flush()?;
        };

        tracing::debug!(from = %current, to = %next_code, "Navigating to adjacent group");
        current = next_code;
        writeln!(out)?;
    }
}
