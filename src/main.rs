use std::process::ExitCode;

use clap::Parser;

use orphan_tags::boundary::BoundaryWarning;
use orphan_tags::cli::{run_cleanup_workflow, CleanupOptions, Failure};
use orphan_tags::config;
use orphan_tags::context::{self, ExecutionContext};
use orphan_tags::hosting::GitHubClient;
use orphan_tags::ui;

#[derive(clap::Parser)]
#[command(
    name = "orphan-tags",
    version,
    about = "Delete version tags whose feature branch no longer exists"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Repository as owner/repo (defaults to $GITHUB_REPOSITORY)")]
    repository: Option<String>,

    #[arg(short, long, help = "API token (defaults to $INPUT_TOKEN, then $GITHUB_TOKEN)")]
    token: Option<String>,

    #[arg(long, help = "API base URL (defaults to $GITHUB_API_URL)")]
    api_url: Option<String>,

    #[arg(long, help = "Git remote used to infer the repository")]
    remote: Option<String>,

    #[arg(long, help = "Report orphaned tags without deleting them")]
    dry_run: bool,

    #[arg(short, long, help = "Log per-tag details")]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => return fail(Failure::from(e)),
    };

    let remote = args.remote.as_deref().unwrap_or(&config.behavior.remote);
    let resolved =
        ExecutionContext::resolve(args.repository.as_deref(), args.token.as_deref(), remote);
    let ctx = match resolved {
        Ok(ctx) => ctx,
        Err(e) => return fail(Failure::from(e)),
    };
    log::debug!("Execution context: {:?}", ctx);

    if ctx.token.is_none() {
        ui::report_warning(&BoundaryWarning::MissingToken);
    }

    let api_url = context::resolve_api_url(args.api_url.as_deref())
        .unwrap_or_else(|| config.github.api_url.clone());
    let client = match GitHubClient::new(api_url, ctx.token.clone()) {
        Ok(client) => client.with_per_page(config.github.per_page),
        Err(e) => return fail(Failure::from(e)),
    };

    let options = CleanupOptions {
        dry_run: args.dry_run || config.behavior.dry_run,
    };

    match run_cleanup_workflow(&client, &ctx.repo, &options) {
        Ok(summary) => {
            for warning in &summary.warnings {
                ui::report_warning(warning);
            }
            ui::display_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(failure) => fail(failure),
    }
}

fn fail(failure: Failure) -> ExitCode {
    ui::report_failure(&failure);
    ExitCode::FAILURE
}
