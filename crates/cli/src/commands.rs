//! Command-line interface definition and dispatch.

use std::io::{IsTerminal, Write};
use std::sync::Arc;

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};

use groupboard_core::competition::mark_live;
use groupboard_core::group::GroupView;
use groupboard_core::ActivityCode;
use groupboard_wca::{
    ClientConfig, CompetitionSource, LoadStatus, UpcomingCompetitions, WcaApi, WcifStore,
};

use crate::interactive;
use crate::pins::PinStore;
use crate::render::{
    render_competition_list, render_group, render_last_fetched, Layout, RenderOptions,
    OFFLINE_NOTICE,
};

#[derive(Debug, Parser)]
#[command(name = "groupboard", version, about = "Competition groups and rosters from the WCA API")]
pub struct Cli {
    /// Do not touch the network; serve cached data only.
    #[arg(long, global = true, env = "GROUPBOARD_OFFLINE")]
    pub offline: bool,

    /// Disable colored room names.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List upcoming competitions.
    Upcoming {
        /// Number of pages to load.
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// List bookmarked competitions.
    Pinned,
    /// Bookmark a competition.
    Pin { competition_id: String },
    /// Remove a bookmark.
    Unpin { competition_id: String },
    /// Show who is assigned to a group.
    Group {
        competition_id: String,
        /// Round id, e.g. `333-r1`.
        round_id: String,
        /// Group number, e.g. `2`, or `1-a1` for attempt groups.
        group_number: String,
        #[arg(long, value_enum, default_value_t = Layout::List)]
        layout: Layout,
        /// Read p/n/q commands from stdin to move between groups.
        #[arg(long)]
        interactive: bool,
    },
}

/// Handles shared by every command of one invocation.
struct Session {
    config: ClientConfig,
    source: Arc<dyn CompetitionSource>,
    online: bool,
    render: RenderOptions,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ClientConfig::from_env().context("failed to load configuration")?;
    tracing::debug!(
        api_url = %config.api_url,
        offline = cli.offline,
        "Loaded client configuration"
    );

    let api = WcaApi::new(&config).context("failed to build HTTP client")?;
    let color = !cli.no_color
        && std::env::var_os("NO_COLOR").is_none()
        && std::io::stdout().is_terminal();

    let ctx = Session {
        config,
        source: Arc::new(api),
        online: !cli.offline,
        render: RenderOptions { color },
    };

    match cli.command {
        Command::Upcoming { pages } => upcoming(&ctx, pages).await,
        Command::Pinned => pinned(&ctx).await,
        Command::Pin { competition_id } => pin(&ctx, &competition_id).await,
        Command::Unpin { competition_id } => unpin(&ctx, &competition_id),
        Command::Group {
            competition_id,
            round_id,
            group_number,
            layout,
            interactive,
        } => group(&ctx, &competition_id, &round_id, &group_number, layout, interactive).await,
    }
}

async fn upcoming(ctx: &Session, pages: u32) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    let mut list = UpcomingCompetitions::starting_today(Arc::clone(&ctx.source))
        .with_cache_dir(ctx.config.cache_dir.clone());

    if ctx.online {
        for _ in 0..pages.max(1) {
            if !list.has_next_page() {
                break;
            }
            list.fetch_next_page().await;
            if matches!(list.status(), LoadStatus::Error(_)) {
                break;
            }
        }
    } else {
        writeln!(out, "{OFFLINE_NOTICE}")?;
        if let Err(e) = list.restore_cached().await {
            tracing::warn!(error = %e, "Failed to read cached upcoming competitions");
        }
    }

    if let LoadStatus::Error(message) = list.status() {
        writeln!(out, "Error: {message}")?;
    }

    let live_ids = live_ids(ctx).await;
    let listed = mark_live(list.competitions(), &live_ids);
    write!(
        out,
        "{}",
        render_competition_list(
            "Upcoming Competitions",
            &listed,
            ctx.online && *list.status() == LoadStatus::Pending
        )
    )?;

    if ctx.online && list.has_next_page() && *list.status() == LoadStatus::Success {
        writeln!(
            out,
            "\nMore available: rerun with --pages {}",
            list.pages_loaded() + 1
        )?;
    }
    if let Some(updated_at) = list.updated_at() {
        writeln!(out, "{}", render_last_fetched(updated_at, &Local))?;
    }
    Ok(())
}

async fn pinned(ctx: &Session) -> anyhow::Result<()> {
    let pins = PinStore::new(&ctx.config.data_dir).list()?;
    if pins.is_empty() {
        return Ok(());
    }

    let live_ids = live_ids(ctx).await;
    let listed = mark_live(pins, &live_ids);
    print!("{}", render_competition_list("Bookmarked Competitions", &listed, false));
    Ok(())
}

async fn pin(ctx: &Session, competition_id: &str) -> anyhow::Result<()> {
    let store = PinStore::new(&ctx.config.data_dir);
    if store.is_pinned(competition_id)? {
        println!("{competition_id} is already pinned");
        return Ok(());
    }

    anyhow::ensure!(ctx.online, "pinning needs the network to look up {competition_id}");

    let summary = ctx
        .source
        .competition_summary(competition_id)
        .await
        .with_context(|| format!("failed to look up competition {competition_id}"))?;
    let name = summary.name.clone();
    store.pin(summary)?;
    println!("Pinned {name}");
    Ok(())
}

fn unpin(ctx: &Session, competition_id: &str) -> anyhow::Result<()> {
    if PinStore::new(&ctx.config.data_dir).unpin(competition_id)? {
        println!("Unpinned {competition_id}");
    } else {
        println!("{competition_id} was not pinned");
    }
    Ok(())
}

async fn group(
    ctx: &Session,
    competition_id: &str,
    round_id: &str,
    group_number: &str,
    layout: Layout,
    interactive: bool,
) -> anyhow::Result<()> {
    let activity_code = ActivityCode::for_group(round_id, group_number)
        .with_context(|| format!("invalid group {round_id} {group_number}"))?
        .to_string();

    let store = WcifStore::new(Arc::clone(&ctx.source), ctx.config.cache_dir.clone());
    let cached = store
        .refresh(competition_id, ctx.online)
        .await
        .with_context(|| format!("could not load competition {competition_id}"))?;

    let mut out = std::io::stdout().lock();
    if !ctx.online {
        writeln!(out, "{OFFLINE_NOTICE}")?;
    }

    if interactive {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        interactive::run(
            &cached.wcif,
            activity_code,
            layout,
            &Local,
            ctx.render,
            stdin,
            &mut out,
        )
        .await?;
    } else {
        let view = GroupView::build(Some(cached.wcif.as_ref()), &activity_code);
        write!(out, "{}", render_group(&view, layout, &Local, ctx.render))?;
    }

    writeln!(out, "{}", render_last_fetched(cached.fetched_at, &Local))?;
    Ok(())
}

/// Live competition ids, or none when offline or the lookup fails.
async fn live_ids(ctx: &Session) -> Vec<String> {
    if !ctx.online {
        return Vec::new();
    }
    match ctx.source.live_competition_ids().await {
        Ok(ids) => ids,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load live competitions");
            Vec::new()
        }
    }
}
