use clap::Parser;
use miette::Result;
use stackcmp::cli::commands;
use stackcmp::cli::{Cli, Commands, GlobalOpts, RenderContext};
use stackcmp::core::Config;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_logging(&global);

    let config = Config::load();
    if global.no_color || !config.color() {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
    let ctx = RenderContext::new(&global, &config);
    tracing::debug!(format = ?ctx.format, theme = %ctx.theme, "render context ready");

    match cli.command {
        Commands::Dashboard => commands::dashboard::run(&ctx),
        Commands::Factors(args) => commands::factors::run(args, &ctx),
        Commands::Timeline => commands::timeline::run(&ctx),
        Commands::Costs => commands::costs::run(&ctx),
        Commands::Features => commands::features::run(&ctx),
        Commands::Roi(args) => commands::roi::run(args, &ctx),
        Commands::Summary => commands::summary::run(&ctx),
        Commands::Export(args) => commands::export::run(args, &ctx),
        Commands::Verify(args) => commands::verify::run(args, &ctx),
        Commands::Report(args) => commands::report::run(args),
        Commands::Config(cmd) => commands::config::run(cmd),
        Commands::Completions(args) => commands::completions::run(args),
    }
}

/// Log to stderr so stdout stays pipeable. `STACKCMP_LOG` takes a
/// tracing-subscriber filter; otherwise warnings only, or debug with `-v`.
fn init_logging(global: &GlobalOpts) {
    let default = if global.verbose {
        "stackcmp=debug"
    } else {
        "stackcmp=warn"
    };
    let filter = EnvFilter::try_from_env("STACKCMP_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
