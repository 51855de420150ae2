use bizdesk::cli::logging::init_logging;
use bizdesk::cli::{Cli, Commands};
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    // Reset SIGPIPE so piping export output to `head` exits quietly
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
    init_logging(global.verbose, global.quiet);

    match cli.command {
        Commands::Import(args) => bizdesk::cli::commands::import::run(args, &global),
        Commands::Export(args) => bizdesk::cli::commands::export::run(args, &global),
        Commands::List(args) => bizdesk::cli::commands::list::run(args, &global),
        Commands::Schema(cmd) => bizdesk::cli::commands::schema::run(cmd),
        Commands::Completions(args) => bizdesk::cli::commands::completions::run(args),
    }
}
