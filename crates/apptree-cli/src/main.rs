//! apptree - app config project manager
//!
//! Usage:
//!   apptree init   # Create a project (scaffold or from an existing app)
//!   apptree pull   # Export a remote app into the local project
//!   apptree push   # Import the local project into the remote app

mod interactive;

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use apptree_core::commands::{InitReport, PullReport, PushReport};
use apptree_core::context::AppContext;
use apptree_core::inputs::InputFlags;
use apptree_core::source::FromType;
use apptree_core::types::{ConfigVersion, DeploymentModel, Location};

#[derive(Parser)]
#[command(name = "apptree", version)]
#[command(about = "Create, pull and push app config projects", long_about = None)]
struct Cli {
    /// Admin API base URL (overrides the settings file)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Output format
    #[arg(long, global = true, default_value = "table")]
    format: OutputFormat,

    /// Settings file (defaults to ~/.config/apptree/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Never prompt; missing values are errors
    #[arg(long, global = true)]
    no_interactive: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new app project
    ///
    /// Without --from, writes a fresh config.json, asking for the app name if
    /// it was not given. With --from, copies an existing app's configuration.
    Init(InitArgs),

    /// Export the latest version of an app into the local project
    #[command(alias = "export")]
    Pull(PullArgs),

    /// Import the local project into its remote app
    #[command(alias = "import")]
    Push(PushArgs),
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable summary
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
    /// No output on success
    Quiet,
}

#[derive(Args)]
struct InitArgs {
    /// Cloud project (group) id
    #[arg(long)]
    project: Option<String>,
    /// Existing app to copy, by client app id or name
    #[arg(short = 's', long)]
    from: Option<String>,
    /// How to interpret --from (app or template)
    #[arg(long, value_parser = FromType::from_str)]
    from_type: Option<FromType>,
    /// App name
    #[arg(short, long)]
    name: Option<String>,
    /// Deployment model (GLOBAL or LOCAL)
    #[arg(short, long, value_parser = DeploymentModel::from_str)]
    deployment_model: Option<DeploymentModel>,
    /// App location (US-VA, US-OR, DE-FF, IE, AU, IN-MB, SG)
    #[arg(short, long, value_parser = Location::from_str)]
    location: Option<Location>,
    /// Directory to create the project in
    #[arg(short, long)]
    target: Option<String>,
}

#[derive(Args)]
struct PullArgs {
    /// Cloud project (group) id
    #[arg(long)]
    project: Option<String>,
    /// App to export, by client app id or name
    #[arg(short = 'a', long)]
    from: Option<String>,
    /// Config version to export
    #[arg(long, value_parser = ConfigVersion::from_str)]
    app_version: Option<ConfigVersion>,
    /// Directory to export into
    #[arg(short, long)]
    target: Option<String>,
    /// Include dependencies in the export
    #[arg(short = 'd', long)]
    include_dependencies: bool,
    /// Include hosting files in the export
    #[arg(short = 's', long)]
    include_hosting: bool,
    /// Show what would be written without writing
    #[arg(short = 'x', long)]
    dry_run: bool,
}

#[derive(Args)]
struct PushArgs {
    /// Cloud project (group) id
    #[arg(long)]
    project: Option<String>,
    /// App to import into, by client app id or name
    #[arg(long)]
    to: Option<String>,
    /// Config version of the local project
    #[arg(long, value_parser = ConfigVersion::from_str)]
    app_version: Option<ConfigVersion>,
    /// Project directory to import from
    #[arg(short, long)]
    target: Option<String>,
    /// Include dependencies in the import
    #[arg(long)]
    include_dependencies: bool,
    /// Include hosting files in the import
    #[arg(long)]
    include_hosting: bool,
    /// Build the archive without importing it
    #[arg(short = 'x', long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "apptree=debug,apptree_core=debug,info"
    } else {
        "apptree=info,apptree_core=info,warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let working_dir = std::env::current_dir().context("Failed to determine working directory")?;
    let ctx = AppContext::load(working_dir, cli.config.clone())?;
    let opts = cli_opts(&cli);

    match cli.command {
        Commands::Init(args) => run_init(&opts, &ctx, args),
        Commands::Pull(args) => run_pull(&opts, &ctx, args),
        Commands::Push(args) => run_push(&opts, &ctx, args),
    }
}

/// Global options shared by every subcommand.
struct GlobalOpts {
    base_url: Option<String>,
    format: OutputFormat,
    no_interactive: bool,
}

fn cli_opts(cli: &Cli) -> GlobalOpts {
    GlobalOpts {
        base_url: cli.base_url.clone(),
        format: cli.format,
        no_interactive: cli.no_interactive,
    }
}

fn init_flags(ctx: &AppContext, args: InitArgs) -> InputFlags {
    InputFlags {
        project: ctx.project(args.project),
        from: args.from,
        from_type: args.from_type,
        name: args.name,
        location: args.location.unwrap_or_default(),
        deployment_model: args.deployment_model.unwrap_or_default(),
        target: args.target,
        ..Default::default()
    }
}

fn pull_flags(ctx: &AppContext, args: PullArgs) -> InputFlags {
    InputFlags {
        project: ctx.project(args.project),
        from: args.from,
        target: args.target,
        app_version: args.app_version.unwrap_or_default(),
        include_dependencies: args.include_dependencies,
        include_hosting: args.include_hosting,
        dry_run: args.dry_run,
        ..Default::default()
    }
}

fn push_flags(ctx: &AppContext, args: PushArgs) -> InputFlags {
    InputFlags {
        project: ctx.project(args.project),
        from: args.to,
        target: args.target,
        app_version: args.app_version.unwrap_or_default(),
        include_dependencies: args.include_dependencies,
        include_hosting: args.include_hosting,
        dry_run: args.dry_run,
        ..Default::default()
    }
}

fn run_init(opts: &GlobalOpts, ctx: &AppContext, args: InitArgs) -> Result<()> {
    let client = ctx.http_client(opts.base_url.as_deref())?;
    let mut prompter = interactive::prompter(opts.no_interactive);

    let report = ctx
        .init_command(&client)
        .execute(init_flags(ctx, args), prompter.as_mut())?;

    print_init_result(opts.format, &report)
}

fn run_pull(opts: &GlobalOpts, ctx: &AppContext, args: PullArgs) -> Result<()> {
    let client = ctx.http_client(opts.base_url.as_deref())?;
    let mut prompter = interactive::prompter(opts.no_interactive);

    let report = ctx
        .pull_command(&client)
        .execute(pull_flags(ctx, args), prompter.as_mut())?;

    print_pull_result(opts.format, &report)
}

fn run_push(opts: &GlobalOpts, ctx: &AppContext, args: PushArgs) -> Result<()> {
    let client = ctx.http_client(opts.base_url.as_deref())?;
    let mut prompter = interactive::prompter(opts.no_interactive);

    let report = ctx
        .push_command(&client)
        .execute(push_flags(ctx, args), prompter.as_mut())?;

    print_push_result(opts.format, &report)
}

fn print_init_result(format: OutputFormat, report: &InitReport) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("Successfully initialized app");
            println!("  Directory: {}", report.target.display());
            if !report.name.is_empty() {
                println!("  Name:      {}", report.name);
            }
            println!("  Source:    {}", report.source);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Quiet => {}
    }
    Ok(())
}

fn print_pull_result(format: OutputFormat, report: &PullReport) -> Result<()> {
    match format {
        OutputFormat::Table => {
            if report.dry_run {
                println!(
                    "No changes were written to your file system (dry run), would write {} files to {}",
                    report.files.len(),
                    report.target.display()
                );
            } else {
                println!(
                    "Successfully pulled app '{}' ({}) to {}",
                    report.app_name,
                    report.client_app_id,
                    report.target.display()
                );
            }
            for file in &report.files {
                println!("  {}", file.display());
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Quiet => {}
    }
    Ok(())
}

fn print_push_result(format: OutputFormat, report: &PushReport) -> Result<()> {
    match format {
        OutputFormat::Table => {
            if report.dry_run {
                println!(
                    "Dry run: would import {} files ({} bytes) into '{}' ({})",
                    report.files.len(),
                    report.bytes,
                    report.app_name,
                    report.client_app_id
                );
            } else {
                println!(
                    "Successfully pushed app '{}' ({}) from {}",
                    report.app_name,
                    report.client_app_id,
                    report.target.display()
                );
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Quiet => {}
    }
    Ok(())
}
