//! msfeedback CLI - device diagnostics and feedback composition.
//!
//! Provides both human-friendly and agent-friendly (robot mode) interfaces.
#![forbid(unsafe_code)]

use std::io;
use std::path::Path;

use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};

use msfeedback::cli::{self, Cli, Commands, MediaCommands};
use msfeedback::config::{self, FeedbackConfig};
use msfeedback::content::{ImageReference, MediaStore};
use msfeedback::error::{FeedbackError, Result, ResultExt};
use msfeedback::feedback::{
    Diagnostics, FeedbackDraft, Transport, ZipOutbox, compose, prepare_image_attachments,
};
use msfeedback::image_ops::{self, Quality, compute_sample_factor};
use msfeedback::logging;
use msfeedback::output::{
    MediaAdded, Output, OutputMode, ResolveResult, SampleFactorResult, SubmitResult,
    ThumbnailResult,
};
use msfeedback::platform::{HostPlatform, Platform};
use msfeedback::report::DeviceInfoCollector;
use msfeedback::resolver::PathResolver;

/// Build information embedded at compile time.
mod build_info {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    pub fn git_sha() -> Option<&'static str> {
        option_env!("VERGEN_GIT_SHA")
    }

    pub fn build_timestamp() -> Option<&'static str> {
        option_env!("VERGEN_BUILD_TIMESTAMP")
    }
}

/// Everything a command needs besides its own arguments.
struct Context {
    config: FeedbackConfig,
    config_source: Option<std::path::PathBuf>,
    output: Box<dyn Output>,
    quiet: bool,
}

impl Context {
    fn host(&self) -> HostPlatform {
        HostPlatform::new(self.config.host_settings())
    }

    /// Host platform with the media store open, for content queries.
    fn host_with_media(&self) -> Result<HostPlatform> {
        HostPlatform::open(self.config.host_settings())
    }

    fn media_store(&self) -> Result<MediaStore> {
        let path = match self.config.host_settings().media_store {
            Some(path) => path,
            None => MediaStore::default_path()?,
        };
        MediaStore::open(path)
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.use_json(), cli.verbose, cli.quiet);

    let mode = OutputMode::from_cli(&cli);
    if let Err(e) = run(&cli, mode) {
        mode.into_output().error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, mode: OutputMode) -> Result<()> {
    let Some(command) = &cli.command else {
        return print_quick_start(cli);
    };

    let config = config::load_or_default(cli.config.as_deref())?;
    let config_source = cli
        .config
        .clone()
        .or_else(|| config::default_config_path().filter(|path| path.exists()));
    let ctx = Context {
        config,
        config_source,
        output: mode.into_output(),
        quiet: cli.quiet,
    };
    debug!(command = ?command, "Dispatching command");

    match command {
        Commands::Report(args) => cmd_report(&ctx, args),
        Commands::Log(args) => cmd_log(&ctx, args),
        Commands::Logs => cmd_logs(&ctx),
        Commands::Resolve(args) => cmd_resolve(&ctx, args),
        Commands::SampleFactor(args) => cmd_sample_factor(&ctx, args),
        Commands::Thumbnail(args) => cmd_thumbnail(&ctx, args),
        Commands::Media(MediaCommands::Add(args)) => cmd_media_add(&ctx, args),
        Commands::Media(MediaCommands::List(args)) => cmd_media_list(&ctx, args),
        Commands::Submit(args) => cmd_submit(&ctx, args),
        Commands::Config => cmd_config(&ctx),
        Commands::Version => cmd_version(&ctx),
        Commands::Completions(args) => cmd_completions(args),
    }
}

// === Quick Start ===

#[derive(Serialize)]
struct RobotQuickStart {
    tool: &'static str,
    version: &'static str,
    description: &'static str,
    commands: Vec<(&'static str, &'static str)>,
    output_modes: OutputModes,
}

#[derive(Serialize)]
struct OutputModes {
    human: &'static str,
    robot: &'static str,
    compact: &'static str,
}

const QUICK_START: &[(&str, &str)] = &[
    ("msfeedback report", "Device and runtime report"),
    ("msfeedback resolve <URI>", "Resolve an image reference to a path"),
    ("msfeedback thumbnail <URI> -o out.jpg", "Write a bounded JPEG thumbnail"),
    ("msfeedback media add image <PATH>", "Register a file in the media store"),
    ("msfeedback log <MESSAGE>", "Append to the application log"),
    (
        "msfeedback submit -t <TITLE> -d <TEXT> --with-info",
        "Compose feedback into the outbox",
    ),
];

#[allow(clippy::unnecessary_wraps)]
fn print_quick_start(cli: &Cli) -> Result<()> {
    if cli.use_json() {
        let help = RobotQuickStart {
            tool: "msfeedback",
            version: build_info::VERSION,
            description: "Device diagnostics and feedback composition",
            commands: QUICK_START.to_vec(),
            output_modes: OutputModes {
                human: "--format=text (default)",
                robot: "--robot or --format=json",
                compact: "--format=json-compact",
            },
        };
        match serde_json::to_string_pretty(&help) {
            Ok(json) => println!("{json}"),
            Err(e) => return Err(FeedbackError::Other(e.to_string())),
        }
    } else {
        let bold = console::Style::new().bold();
        let green = console::Style::new().green();
        println!("{} {}\n", bold.apply_to("msfeedback"), build_info::VERSION);
        println!("{}\n", bold.apply_to("QUICK START"));
        for (command, about) in QUICK_START {
            println!("  {:<52} {about}", green.apply_to(command));
        }
        println!("\nRun `msfeedback --help` for full help");
    }
    Ok(())
}

// === Command Implementations ===

fn cmd_report(ctx: &Context, args: &cli::ReportArgs) -> Result<()> {
    let host = ctx.host();
    let report = DeviceInfoCollector::new(&host).collect();
    ctx.output.device_report(&report, !args.no_header);
    Ok(())
}

fn cmd_log(ctx: &Context, args: &cli::LogArgs) -> Result<()> {
    let log = ctx.config.app_log();
    log.append(&args.message);
    if !ctx.quiet {
        ctx.output.log_appended(log.path(), &args.message);
    }
    Ok(())
}

fn cmd_logs(ctx: &Context) -> Result<()> {
    let log = ctx.config.app_log();
    ctx.output.logs(log.path(), &log.read_all());
    Ok(())
}

fn cmd_resolve(ctx: &Context, args: &cli::ResolveArgs) -> Result<()> {
    let host = ctx.host_with_media()?;
    let reference = ImageReference::parse(&args.reference);
    let path = PathResolver::new(&host).resolve(&reference);
    ctx.output.resolved(&ResolveResult {
        reference: args.reference.clone(),
        kind: reference.kind(),
        path,
    });
    Ok(())
}

#[allow(clippy::unnecessary_wraps)]
fn cmd_sample_factor(ctx: &Context, args: &cli::SampleFactorArgs) -> Result<()> {
    let sample_factor = compute_sample_factor(
        args.source_width,
        args.source_height,
        args.target_width,
        args.target_height,
    );
    ctx.output.sample_factor(&SampleFactorResult {
        source_width: args.source_width,
        source_height: args.source_height,
        target_width: args.target_width,
        target_height: args.target_height,
        sample_factor,
    });
    Ok(())
}

fn cmd_thumbnail(ctx: &Context, args: &cli::ThumbnailArgs) -> Result<()> {
    let host = ctx.host_with_media()?;
    let reference = ImageReference::parse(&args.reference);
    let source = PathResolver::new(&host)
        .resolve(&reference)
        .ok_or_else(|| FeedbackError::PathUnresolved {
            reference: args.reference.clone(),
        })?;

    let thumbnail = &ctx.config.thumbnail;
    let (width, height) = args.bounds(Some((thumbnail.width, thumbnail.height)));
    let image = image_ops::decode(&host, Path::new(&source), width, height)?;
    let quality = Quality::new(args.quality);
    let bytes = image_ops::compress(&image, quality)?;

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&args.output, &bytes)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!(output = %args.output.display(), bytes = bytes.len(), "Wrote thumbnail");

    ctx.output.thumbnail_written(&ThumbnailResult {
        reference: args.reference.clone(),
        source,
        output: args.output.display().to_string(),
        width: image.width(),
        height: image.height(),
        quality: quality.value(),
        bytes: bytes.len(),
    });
    Ok(())
}

fn cmd_media_add(ctx: &Context, args: &cli::MediaAddArgs) -> Result<()> {
    if !args.path.is_file() {
        return Err(FeedbackError::ImageNotFound {
            path: args.path.display().to_string(),
        });
    }
    let path = std::path::absolute(&args.path)?;
    let collection = args.kind.collection_uri();
    let id = ctx.media_store()?.insert(&collection, &path)?;
    ctx.output.media_added(&MediaAdded {
        id,
        uri: collection.with_appended_id(id).to_string(),
        path: path.display().to_string(),
    });
    Ok(())
}

fn cmd_media_list(ctx: &Context, args: &cli::MediaListArgs) -> Result<()> {
    let collection = args.kind.map(|kind| kind.collection_uri());
    let entries = ctx.media_store()?.list(collection.as_ref())?;
    ctx.output.media_list(&entries);
    Ok(())
}

fn cmd_submit(ctx: &Context, args: &cli::SubmitArgs) -> Result<()> {
    let request = ctx.config.request(args.email.as_deref(), args.with_info);
    let mut draft = FeedbackDraft::new(args.kind, args.title.as_str(), args.description.as_str());
    for raw in &args.images {
        draft.attach_image(ImageReference::parse(raw))?;
    }
    draft.validate()?;
    if request.recipient.is_none() {
        return Err(FeedbackError::EmailNotSet);
    }

    let log = ctx.config.app_log();
    log.record_session_start();

    let host = if draft.images().is_empty() {
        ctx.host()
    } else {
        ctx.host_with_media()?
    };
    let platform: &dyn Platform = &host;

    let diagnostics = request
        .with_system_info
        .then(|| Diagnostics::gather(platform, &log));
    let images = prepare_image_attachments(
        platform,
        &draft,
        ctx.config.attachment.bounds(),
        ctx.config.attachment.quality(),
    );
    let skipped_images = draft.images().len() - images.len();

    let message = compose(&request, &draft, diagnostics.as_ref(), images)?;
    let outbox = args
        .outbox
        .as_ref()
        .map_or_else(|| ctx.config.outbox(), ZipOutbox::new);
    let delivery = outbox.send(&message)?;
    log.append(&format!("Feedback {} written to outbox", message.id));

    ctx.output.submitted(&SubmitResult {
        recipient: message.recipient.clone(),
        subject: message.subject.clone(),
        attachments: message
            .attachments
            .iter()
            .map(|a| a.file_name.clone())
            .collect(),
        skipped_images,
        delivery,
    });
    Ok(())
}

#[allow(clippy::unnecessary_wraps)]
fn cmd_config(ctx: &Context) -> Result<()> {
    ctx.output.config(&ctx.config, ctx.config_source.as_deref());
    Ok(())
}

#[allow(clippy::unnecessary_wraps)]
fn cmd_version(ctx: &Context) -> Result<()> {
    ctx.output.version_info(
        build_info::VERSION,
        build_info::git_sha(),
        build_info::build_timestamp(),
    );
    Ok(())
}

#[allow(clippy::unnecessary_wraps)]
fn cmd_completions(args: &cli::CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    clap_complete::generate(args.shell, &mut Cli::command(), "msfeedback", &mut io::stdout());
    Ok(())
}
