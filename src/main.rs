use std::io::{self, stdout, Stdout};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossbeam_channel::{Receiver, TryRecvError};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use kanban::app::{LogicThread, FRAME_DURATION};
use kanban::board::BoardState;
use kanban::config::Config;
use kanban::render::RenderState;
use kanban::tea::Model;
use kanban::{klog, klog_error, ui, Error, Result};

/// Kanban - a drag-and-drop board in the terminal
#[derive(Parser, Debug)]
#[command(name = "kanban")]
#[command(version, about, long_about = None)]
#[command(
    after_help = "ENVIRONMENT:\n    KANBAN_DEBUG=1  Enable debug logging (alternative to --debug)"
)]
pub struct Cli {
    /// Enable debug logging (writes to ~/.kanban/kanban.log)
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Config file to use instead of ~/.kanban/kanban.toml
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Start with a sample board instead of an empty one
    #[arg(long)]
    pub demo: bool,

    /// Print the board as JSON on exit
    #[arg(long)]
    pub dump: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    kanban::log::init(cli.debug, None);
    if cli.debug {
        klog!("Kanban starting (debug mode enabled)");
    } else {
        klog!("Kanban starting");
    }

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let board = if cli.demo {
        demo_board()
    } else {
        BoardState::new()
    };

    let board = run_tui(board, config)?;

    if cli.dump {
        println!("{}", serde_json::to_string_pretty(&board)?);
    }
    klog!(
        "Kanban exiting: {} columns, {} tasks",
        board.columns().len(),
        board.tasks().len()
    );
    Ok(())
}

/// Run the board until the user quits; returns the final board.
fn run_tui(board: BoardState, config: Config) -> Result<BoardState> {
    let mouse = config.mouse;
    let mut terminal = setup_terminal(mouse)?;
    let (width, height) = crossterm::terminal::size()?;
    let model = Model::new(board, config, Rect::new(0, 0, width, height));

    let shutdown = Arc::new(AtomicBool::new(false));
    let (state_tx, state_rx) = crossbeam_channel::bounded::<RenderState>(1);

    let shutdown_clone = shutdown.clone();
    let logic_handle =
        thread::spawn(move || LogicThread::run(model, state_tx, shutdown_clone));

    let result = render_loop(&mut terminal, state_rx, &shutdown);

    shutdown.store(true, Ordering::SeqCst);
    let board = logic_handle.join();
    restore_terminal(&mut terminal, mouse)?;
    result?;

    match board {
        Ok(board) => board,
        Err(_) => {
            klog_error!("Logic thread panicked");
            Err(Error::ThreadPanicked("logic"))
        }
    }
}

/// A small board to try dragging on.
fn demo_board() -> BoardState {
    let mut board = BoardState::new();
    let columns: [(&str, &[&str]); 3] = [
        (
            "Todo",
            &[
                "Write the release notes",
                "Review open pull requests",
                "Plan the next sprint",
            ],
        ),
        ("In progress", &["Fix flaky login test", "Migrate settings page"]),
        ("Done", &["Set up CI"]),
    ];
    for (title, tasks) in columns {
        let column = board.create_column();
        board.update_column(column.id, title);
        for content in tasks {
            let task = board.create_task(column.id);
            board.update_task(task.id, *content);
        }
    }
    board
}

fn render_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state_rx: Receiver<RenderState>,
    shutdown: &AtomicBool,
) -> Result<()> {
    let mut state = RenderState::default();
    let mut last_version: u64 = 0;
    let mut last_frame = Instant::now();
    let mut dirty = true;

    loop {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        match state_rx.try_recv() {
            Ok(s) => {
                dirty = dirty || s.version != last_version;
                state = s;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => break,
        }

        if last_frame.elapsed() < FRAME_DURATION {
            thread::sleep(Duration::from_micros(500));
            continue;
        }
        last_frame = Instant::now();

        if dirty {
            terminal.draw(|f| ui::draw(f, &state))?;
            last_version = state.version;
            dirty = false;
        }
    }
    Ok(())
}

fn setup_terminal(mouse: bool) -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    if mouse {
        execute!(io::stdout(), EnableMouseCapture)?;
    }
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>, mouse: bool) -> Result<()> {
    terminal.show_cursor()?;
    if mouse {
        execute!(io::stdout(), DisableMouseCapture)?;
    }
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(disable_raw_mode()?)
}
