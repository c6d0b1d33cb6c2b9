use std::{
    fmt,
    io::{stdout, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::MoveTo,
    event::{read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{Color, Print, Stylize},
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
    Command, ExecutableCommand,
};
use twenty_48::{
    BestScoreUpdate, Cell, Direction, GameState, GameStatus, Grid, RandomIndex, RuleConfig,
    Rules, Tile,
};

/// Play 2048 in the terminal.
#[derive(Parser, Debug)]
#[command(name = "twenty48", version)]
struct Args {
    /// Number of rows on the board
    #[arg(long, default_value_t = 4)]
    rows: usize,

    /// Number of columns on the board
    #[arg(long, default_value_t = 4)]
    cols: usize,

    /// Tile value that wins the game
    #[arg(long, default_value_t = 2048)]
    target: u64,

    /// Seed for tile placement; entropy when absent
    #[arg(short, long)]
    seed: Option<u64>,

    /// Update the best score from the score before each move instead of after
    #[arg(long)]
    best_before_move: bool,

    /// Resume from and save to this JSON file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn rule_config(&self) -> RuleConfig {
        RuleConfig {
            rows: self.rows,
            cols: self.cols,
            winning_value: self.target,
            best_score_update: if self.best_before_move {
                BestScoreUpdate::BeforeMove
            } else {
                BestScoreUpdate::AfterMove
            },
        }
    }
}

enum Input {
    Move(Direction),
    NewGame,
    Quit,
}

fn decode_key(k: KeyEvent) -> Option<Input> {
    if k.kind != KeyEventKind::Press {
        return None;
    }
    match (k.code, k.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Input::Quit),
        (KeyCode::Left | KeyCode::Char('a' | 'A'), _) => Some(Input::Move(Direction::Left)),
        (KeyCode::Right | KeyCode::Char('d' | 'D'), _) => Some(Input::Move(Direction::Right)),
        (KeyCode::Up | KeyCode::Char('w' | 'W'), _) => Some(Input::Move(Direction::Up)),
        (KeyCode::Down | KeyCode::Char('s' | 'S'), _) => Some(Input::Move(Direction::Down)),
        (KeyCode::Char('n' | 'N'), _) => Some(Input::NewGame),
        (KeyCode::Char('q' | 'Q') | KeyCode::Esc, _) => Some(Input::Quit),
        _ => None,
    }
}

struct GsCommand<'a>(&'a GameState);

impl<'a> Command for GsCommand<'a> {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        let gs = self.0;
        write!(f, "score {}   best {}\r\n\r\n", gs.score, gs.best_score)?;
        for row in gs.grid.rows().iter() {
            print_row(f, row)?;
            write!(f, "|\r\n")?;
        }
        match gs.status {
            GameStatus::Playing => write!(f, "\r\narrows/wasd move, n new game, q quit\r\n"),
            GameStatus::Won => write!(f, "\r\n{}  n new game, q quit\r\n", "You win!".green()),
            GameStatus::Lost => write!(f, "\r\n{}  n new game, q quit\r\n", "Game over!".red()),
        }
    }
}

fn styled(t: &Tile) -> impl fmt::Display {
    format!("{: ^5}", t.as_u64()).with(match t.as_u64() {
        2 => Color::White,
        4 => Color::Rgb {
            r: 255,
            g: 215,
            b: 0,
        }, // orange
        8 => Color::DarkYellow,
        16 => Color::Magenta,
        32 => Color::Green,
        64 => Color::Blue,
        128 | 256 => Color::Cyan,
        512 | 1024 => Color::Red,
        _ => Color::White,
    })
}

fn print_row(f: &mut impl fmt::Write, row: &[Cell]) -> fmt::Result {
    for tile in row.iter() {
        match tile {
            Some(tile) => write!(f, "|{}", styled(tile))?,
            None => write!(f, "|{: ^5}", " ")?,
        }
    }
    Ok(())
}

fn load(path: &Path, rules: &Rules) -> Result<Option<GameState>> {
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let state: GameState = serde_json::from_str(&text)
        .with_context(|| format!("parsing saved game {}", path.display()))?;

    let config = rules.config();
    if !fits(&state.grid, config) {
        log::warn!(
            "saved board in {} is not {}x{}, starting over",
            path.display(),
            config.rows,
            config.cols
        );
        return Ok(None);
    }
    Ok(Some(state))
}

fn fits(grid: &Grid, config: &RuleConfig) -> bool {
    grid.is_rectangular() && grid.row_count() == config.rows && grid.col_count() == config.cols
}

fn save(path: &Path, state: &GameState) -> Result<()> {
    let text = serde_json::to_string(state)?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

fn play_interactive(rules: &Rules, source: &mut RandomIndex, game: &mut GameState) -> Result<()> {
    let mut stdout = stdout();

    loop {
        stdout.execute(Clear(ClearType::All))?;
        stdout.execute(MoveTo(0, 0))?;
        stdout.execute(&GsCommand(game))?;
        stdout.flush()?;

        let input = match read()? {
            Event::Key(k) => decode_key(k),
            ev => {
                log::trace!("ignoring {ev:?}");
                None
            }
        };

        match input {
            Some(Input::Quit) => return Ok(()),
            Some(Input::NewGame) => *game = rules.new_game(game.best_score, source),
            Some(Input::Move(dir)) if !game.status.is_terminal() => {
                *game = rules.make_move(game, dir, source)?;
            }
            Some(Input::Move(_)) | None => {}
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .parse_filters(&args.log_level)
        .parse_default_env()
        .init();

    let config = args.rule_config();
    config.validate()?;
    let rules = Rules::new(config);

    let mut source = match args.seed {
        Some(seed) => RandomIndex::from_seed(seed),
        None => RandomIndex::from_os_rng(),
    };

    let resumed = match &args.save {
        Some(path) => load(path, &rules)?,
        None => None,
    };
    let mut game = resumed.unwrap_or_else(|| rules.reset_game(&mut source));
    log::info!("starting {}x{} game to {}", config.rows, config.cols, config.winning_value);

    enable_raw_mode()?;
    let result = play_interactive(&rules, &mut source, &mut game);
    // restore the terminal even when the game loop failed
    disable_raw_mode()?;
    stdout().execute(Print("\r\n"))?;
    result?;

    if let Some(path) = &args.save {
        save(path, &game)?;
    }
    Ok(())
}
