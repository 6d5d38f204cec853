use std::io::{self, BufRead, Write};
use std::num::NonZero;
use std::thread;
use std::time::Duration;

use clap::Parser;
use log::debug;

use data_connector::{Location, Session, Settings, TestOutcome, TraversalStep};

#[derive(Parser)]
#[command(name = "data-connector")]
#[command(about = "Rotate the pieces until current runs from IN to OUT", long_about = None)]
struct Cli {
    /// Side length of the board
    #[arg(long, default_value_t = data_connector::config::DEFAULT_SIZE)]
    size: NonZero<usize>,

    /// Seed for reproducible boards
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between packet steps
    #[arg(long, default_value_t = 300)]
    tick_ms: u64,
}

enum Command {
    Rotate(Location),
    Test,
    New(Option<u64>),
    Quit,
}

fn parse(line: &str) -> Option<Command> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["r" | "rotate", row, col] => Some(Command::Rotate(Location(row.parse().ok()?, col.parse().ok()?))),
        ["t" | "test"] => Some(Command::Test),
        ["n" | "new"] => Some(Command::New(None)),
        ["n" | "new", seed] => Some(Command::New(Some(seed.parse().ok()?))),
        ["q" | "quit"] => Some(Command::Quit),
        _ => None,
    }
}

fn render(session: &Session, packet: Option<Location>) -> String {
    let board = session.board();
    let energized = board.energized();
    let mut out = String::new();

    for (location, cell) in board.cells() {
        if location.col() == 0 {
            out.push_str(if location == board.entry() { " IN " } else { "    " });
        }

        let glyph = cell.connections().glyph();
        if Some(location) == packet {
            out.push('●');
        } else if energized.contains(&location) {
            // powered pieces are doubled up so they stand out
            out.push(match glyph {
                '─' => '═',
                '│' => '║',
                other => other,
            });
        } else {
            out.push(glyph);
        }

        if location.col() == board.size().get() - 1 {
            out.push_str(if location == board.exit() { " OUT\n" } else { "\n" });
        }
    }

    out
}

fn replay(session: &mut Session, tick: Duration) {
    loop {
        match session.advance_traversal() {
            TraversalStep::Frame { location, .. } => {
                println!("{}", render(session, Some(location)));
                thread::sleep(tick);
            }
            step @ TraversalStep::Delivered { location } => {
                println!("{}", render(session, Some(location)));
                println!("{}", step);
                return;
            }
            TraversalStep::Idle => return,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let settings = Settings {
        size: cli.size,
        tick: Duration::from_millis(cli.tick_ms),
        seed: cli.seed,
    };
    debug!("starting with {:?}", settings);

    let mut session = Session::new(settings);
    println!("{}", render(&session, None));
    println!("commands: rotate ROW COL | test | new [SEED] | quit");

    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            return Ok(());
        }

        match parse(&input) {
            Some(Command::Rotate(location)) => match session.rotate_cell(location) {
                Ok(_) => println!("{}Rotated piece at {}", render(&session, None), location),
                Err(err) => println!("{}", err),
            },
            Some(Command::Test) => {
                let outcome = session.test_circuit();
                println!("{}", outcome);
                if let TestOutcome::PathFound(_) = outcome {
                    let tick = session.settings().tick;
                    replay(&mut session, tick);
                }
            }
            Some(Command::New(seed)) => {
                session.generate(seed);
                println!("{}", render(&session, None));
            }
            Some(Command::Quit) => return Ok(()),
            None => println!("commands: rotate ROW COL | test | new [SEED] | quit"),
        }
    }
}
