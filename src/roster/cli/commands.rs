//! # CLI Dispatch
//!
//! - `run()`: parses arguments, installs logging, dispatches (called by `main.rs`)
//! - `init_context()`: builds the controller from config plus command-line overrides
//! - `handle_*()`: per-command handlers that call the API and print results

use super::browse;
use super::prompt::confirmer;
use super::render::{print_messages, render_text_list, render_user_list};
use super::setup::{Cli, Commands};
use clap::Parser;
use roster::api::UserListController;
use roster::commands::config::{self as config_cmd, ConfigAction};
use roster::commands::ResetTarget;
use roster::confirm::AutoConfirm;
use roster::directory::http::HttpDirectory;
use roster::error::Result;
use roster::init::{config_dir, initialize, Overrides};
use roster::model::{AdminContext, RowAction, Scope, UserRow};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Log filter directives, e.g. `ROSTER_LOG=roster=trace`.
const LOG_ENV: &str = "ROSTER_LOG";

struct AppContext {
    api: UserListController<HttpDirectory>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let overrides = Overrides {
        base_url: cli.base_url.clone(),
        agency_id: cli.agency.clone(),
        page_size: cli.limit,
    };

    match cli.command {
        // Handled before init: no client needed.
        Some(Commands::Config { key, value, unset }) => handle_config(key, value, unset),
        command => {
            let mut ctx = init_context(overrides)?;
            dispatch(&mut ctx, command)
        }
    }
}

fn dispatch(ctx: &mut AppContext, command: Option<Commands>) -> Result<()> {
    match command {
        Some(Commands::List { filter, page }) => handle_list(ctx, filter, page),
        Some(Commands::Browse { filter }) => browse::run(&mut ctx.api, filter),
        Some(Commands::Enable { id }) => handle_toggle(ctx, id, RowAction::Enable, true, None, true),
        Some(Commands::Disable { id }) => {
            handle_toggle(ctx, id, RowAction::Enable, false, None, true)
        }
        Some(Commands::Admin {
            id,
            remove,
            scope,
            name,
            yes,
        }) => {
            let action = admin_action(ctx.api.context(), scope);
            handle_toggle(ctx, id, action, !remove, name, yes)
        }
        Some(Commands::ResetPassword { email, name, yes }) => {
            handle_reset_password(ctx, email, name, yes)
        }
        Some(Commands::Config { key, value, unset }) => handle_config(key, value, unset),
        None => handle_list(ctx, None, 1),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "roster=debug,warn" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn init_context(overrides: Overrides) -> Result<AppContext> {
    let ctx = initialize(overrides)?;
    Ok(AppContext { api: ctx.api })
}

fn handle_list(ctx: &mut AppContext, filter: Option<String>, page: u32) -> Result<()> {
    let view = ctx.api.load_page(filter.as_deref().unwrap_or(""), page)?;
    print!("{}", render_user_list(&view));
    Ok(())
}

/// Without `--scope` the role follows the list's scope, as in `browse`.
fn admin_action(context: &AdminContext, scope: Option<Scope>) -> RowAction {
    RowAction::AssignAdmin(scope.unwrap_or(context.scope))
}

/// Toggles a user named only by id. The row is seeded with the opposite of
/// the requested value so a declined prompt reports what was there before.
fn handle_toggle(
    ctx: &mut AppContext,
    id: i64,
    action: RowAction,
    checked: bool,
    name: Option<String>,
    yes: bool,
) -> Result<()> {
    let name = name.unwrap_or_else(|| format!("user {}", id));
    let mut row = UserRow::new(id, &name, "");
    action.apply(&mut row, !checked);

    let result = if action.needs_confirmation() {
        ctx.api.toggle_user(row, action, checked, &mut confirmer(yes))?
    } else {
        ctx.api.toggle_user(row, action, checked, &mut AutoConfirm)?
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_reset_password(
    ctx: &mut AppContext,
    email: String,
    name: Option<String>,
    yes: bool,
) -> Result<()> {
    let target = ResetTarget::new(name.unwrap_or_else(|| email.clone()), email);
    let result = ctx.api.reset_password(&target, &mut confirmer(yes))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(key: Option<String>, value: Option<String>, unset: bool) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), _) if unset => ConfigAction::Unset(k),
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = config_cmd::run(&config_dir()?, action)?;
    if show_all {
        if let Some(config) = &result.config {
            let lines: Vec<String> = config
                .list_all()
                .into_iter()
                .map(|(k, v)| format!("{} = {}", k, v))
                .collect();
            print!("{}", render_text_list(&lines, "No configuration values."));
        }
    }
    print_messages(&result.messages);
    Ok(())
}
