//! Plain-text rendering of group pages and competition lists.

use std::fmt::Write as _;

use chrono::TimeZone;

use groupboard_core::competition::ListedCompetition;
use groupboard_core::group::GroupView;
use groupboard_core::navigation::group_path;
use groupboard_core::time::format_date_time_range;
use groupboard_core::types::Timestamp;
use groupboard_core::ActivityCode;

const MIN_COLUMN_WIDTH: usize = 8;

/// Group page layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Layout {
    /// One list per assignment, sorted by room then name.
    List,
    /// One column per room, sorted by name.
    Grid,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Paint room names with their display color (ANSI truecolor).
    pub color: bool,
}

pub const OFFLINE_NOTICE: &str =
    "This app is operating in offline mode. Some competitions may not be available.";

/// Render a full group page: header, navigation hints and roster.
pub fn render_group<Tz>(
    view: &GroupView<'_>,
    layout: Layout,
    tz: &Tz,
    options: RenderOptions,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    render_header(&mut out, view, tz, options);
    render_navigation(&mut out, view);
    out.push('\n');

    if view.persons.is_empty() {
        out.push_str("No one is assigned to this group yet.\n");
        return out;
    }

    match layout {
        Layout::List => render_list(&mut out, view, options),
        Layout::Grid => render_grid(&mut out, view, options),
    }
    out
}

fn render_header<Tz>(out: &mut String, view: &GroupView<'_>, tz: &Tz, options: RenderOptions)
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let _ = writeln!(out, "{}", view.header.title);
    for slot in &view.header.slots {
        let range = format_date_time_range(slot.start, slot.end, tz);
        if view.multiroom {
            let room = paint(&slot.room.name, slot.room.color.as_deref(), options);
            let _ = writeln!(out, "{room}: {range}");
        } else {
            let _ = writeln!(out, "{range}");
        }
    }
    for rule in &view.header.rules {
        let _ = writeln!(out, "{rule}");
    }
}

fn render_navigation(out: &mut String, view: &GroupView<'_>) {
    let describe = |code: Option<&String>| -> String {
        let Some(code) = code else {
            return "none".to_string();
        };
        let name = ActivityCode::parse(code)
            .map(|parsed| parsed.name())
            .unwrap_or_else(|_| code.clone());
        match view.competition_id().and_then(|id| group_path(id, code)) {
            Some(path) => format!("{name} ({path})"),
            None => name,
        }
    };

    let _ = writeln!(out, "\n< Previous Group: {}", describe(view.previous.as_ref()));
    let _ = writeln!(out, "> Next Group: {}", describe(view.next.as_ref()));
}

fn render_list(out: &mut String, view: &GroupView<'_>, options: RenderOptions) {
    let groups = view.list();
    let name_width = groups
        .iter()
        .flat_map(|group| group.entries.iter())
        .map(|entry| entry.person.name.chars().count())
        .max()
        .unwrap_or(0);

    for group in groups {
        let _ = writeln!(out, "{} ({})", group.code.label(), group.count());
        for entry in &group.entries {
            if view.multiroom {
                let room = entry
                    .room
                    .map(|room| paint(&room.name, room.color.as_deref(), options))
                    .unwrap_or_default();
                let _ = writeln!(out, "  {:<name_width$}  {room}", entry.person.name);
            } else {
                let _ = writeln!(out, "  {}", entry.person.name);
            }
        }
        out.push('\n');
    }
}

fn render_grid(out: &mut String, view: &GroupView<'_>, options: RenderOptions) {
    let groups = view.grid();

    let widths: Vec<usize> = view
        .rooms
        .iter()
        .enumerate()
        .map(|(idx, room)| {
            groups
                .iter()
                .filter_map(|group| group.columns.get(idx))
                .flat_map(|column| column.entries.iter())
                .map(|entry| entry.person.name.chars().count())
                .chain([room.name.chars().count(), MIN_COLUMN_WIDTH])
                .max()
                .unwrap_or(MIN_COLUMN_WIDTH)
        })
        .collect();

    // Pad before painting so escape codes do not count toward the width.
    let header: Vec<String> = view
        .rooms
        .iter()
        .zip(&widths)
        .map(|(room, width)| {
            let padded = format!("{:<width$}", room.name, width = *width);
            paint(&padded, room.color.as_deref(), options)
        })
        .collect();
    let _ = writeln!(out, "  {}", header.join(" | ").trim_end());
    out.push('\n');

    for group in groups {
        let _ = writeln!(out, "{} ({})", group.code.label(), group.count);
        let rows = group
            .columns
            .iter()
            .map(|column| column.entries.len())
            .max()
            .unwrap_or(0);

        for row in 0..rows {
            let cells: Vec<String> = group
                .columns
                .iter()
                .zip(&widths)
                .map(|(column, width)| {
                    let name = column
                        .entries
                        .get(row)
                        .map(|entry| entry.person.name.as_str())
                        .unwrap_or("");
                    format!("{name:<width$}", width = *width)
                })
                .collect();
            let _ = writeln!(out, "  {}", cells.join(" | ").trim_end());
        }
        out.push('\n');
    }
}

/// Render a titled list of competitions. Live competitions are marked.
pub fn render_competition_list(
    title: &str,
    competitions: &[ListedCompetition],
    loading: bool,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");

    if competitions.is_empty() {
        out.push_str(if loading { "  Loading...\n" } else { "  No competitions found.\n" });
        return out;
    }

    for listed in competitions {
        let summary = &listed.summary;
        let live = if listed.live { "  [LIVE]" } else { "" };
        let _ = writeln!(out, "  {}{live}", summary.name);
        let location = summary.location_label();
        if location.is_empty() {
            let _ = writeln!(out, "    {}  ({})", summary.date_label(), summary.id);
        } else {
            let _ = writeln!(
                out,
                "    {} | {}  ({})",
                summary.date_label(),
                location,
                summary.id
            );
        }
    }
    out
}

/// `Last fetched: 2024-01-06 10:00` in `tz`.
pub fn render_last_fetched<Tz>(fetched_at: Timestamp, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "Last fetched: {}",
        fetched_at.with_timezone(tz).format("%Y-%m-%d %H:%M")
    )
}

/// Wrap `text` in an ANSI truecolor background matching a `#rrggbb` color.
/// Returns `text` unchanged when coloring is off or the color is malformed.
fn paint(text: &str, color: Option<&str>, options: RenderOptions) -> String {
    match color.and_then(parse_hex_color).filter(|_| options.color) {
        Some((r, g, b)) => format!("\x1b[48;2;{r};{g};{b}m{text}\x1b[0m"),
        None => text.to_string(),
    }
}

fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
