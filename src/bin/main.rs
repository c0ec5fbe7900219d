use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use is_terminal::IsTerminal;
use rewind::{History, Mutation, StateHolder};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::time::Duration;

/// Walk a state value through randomized changes, checkpointing before each
/// one, then roll the last two changes back.
#[derive(Parser)]
#[command(author, about, version)]
struct Opts {
    /// Initial state of the holder
    #[arg(long, default_value = "Super-duper-super-puper-super.")]
    initial: String,

    /// Number of backup-then-mutate rounds
    #[arg(long, default_value_t = 3)]
    rounds: usize,

    /// Length of each randomly generated state
    #[arg(long, default_value_t = 30)]
    length: usize,

    /// Pause this many milliseconds per generated character, simulating a
    /// slow state transition
    #[arg(long)]
    char_delay_ms: Option<u64>,

    /// Dump the remaining history as JSON instead of labels
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    init_logger(&opts)?;

    let mut mutation = Mutation::new(opts.length);
    if let Some(millis) = opts.char_delay_ms {
        mutation = mutation.with_char_pause(Duration::from_millis(millis));
    }
    let holder = StateHolder::with_mutation(&opts.initial, mutation);
    println!("Initial state: {}", holder.state());

    let mut history = History::new(holder);
    for _ in 0..opts.rounds {
        history.backup();
        history.subject_mut().mutate();
        println!("State changed to: {}", history.subject().state());
    }

    println!();
    if opts.json {
        let entries = history.iter().collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!("Saved checkpoints:");
        println!("{history}");
    }

    for _ in 0..2 {
        println!();
        if history.undo() {
            println!("Rolled back to: {}", history.subject().state());
        } else {
            println!("Nothing to undo");
        }
    }

    Ok(())
}

fn init_logger(opts: &Opts) -> Result<()> {
    let color = if std::io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    TermLogger::init(
        opts.verbosity.log_level_filter(),
        Config::default(),
        TerminalMode::Stderr,
        color,
    )?;
    Ok(())
}
