use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "paraboard-cli", version, about = "Paraboard class schedule CLI")]
struct Cli {
    /// Only log errors
    #[arg(long, short, global = true)]
    quiet: bool,
    /// Log debug output
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Today's lessons and the next-lesson card
    Now(commands::board::NowArgs),
    /// Only the next-lesson card
    Next(commands::board::NowArgs),
    /// Full schedule for one day of one week
    Full(commands::board::FullArgs),
    /// Render the board as a standalone HTML page
    Html(commands::board::HtmlArgs),
    /// Live board in the terminal
    Watch(commands::watch::WatchArgs),
    /// Run the background animation in the terminal
    Animate(commands::animate::AnimateArgs),
    /// Timetable inspection
    Timetable {
        #[command(subcommand)]
        action: commands::timetable::TimetableAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    common::init_tracing(cli.quiet, cli.verbose);

    let result = match cli.command {
        Commands::Now(args) => commands::board::run_now(args),
        Commands::Next(args) => commands::board::run_next(args),
        Commands::Full(args) => commands::board::run_full(args),
        Commands::Html(args) => commands::board::run_html(args),
        Commands::Watch(args) => commands::watch::run(args),
        Commands::Animate(args) => commands::animate::run(args),
        Commands::Timetable { action } => commands::timetable::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "paraboard-cli",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
