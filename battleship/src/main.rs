// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use std::{
    collections::HashMap,
    env,
    io::{self, BufRead, Write},
};

use clap::{App, Arg, ArgMatches};
use log::{debug, LevelFilter};
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

use armada::{
    random::random_placements, BatchPolicy, BoardView, Coordinate, Engine, EngineConfig,
    EngineError, MemoryStore, Orientation, Placement, PlayerId, SessionId, Ship, ShotKind,
    Status, GRID_SIZE,
};

type HotSeatEngine = Engine<MemoryStore, HashMap<PlayerId, String>>;

fn main() -> io::Result<()> {
    let matches = App::new("Battleship")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Two-player hot-seat battleship game.")
        .arg(
            Arg::with_name("player1")
                .long("player1")
                .value_name("NAME")
                .help("display name of the first player")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("player2")
                .long("player2")
                .value_name("NAME")
                .help("display name of the second player")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("random_fleets")
                .short("r")
                .long("random-fleets")
                .help("lay out both fleets randomly instead of asking"),
        )
        .arg(
            Arg::with_name("atomic_placements")
                .long("atomic-placements")
                .help("discard a whole placement batch if any placement in it is invalid"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("increase log verbosity, may be repeated"),
        )
        .get_matches();
    init_logging(matches.occurrences_of("verbose"));

    let players = [PlayerId::from("player1"), PlayerId::from("player2")];
    let names = display_names(&matches, &players);
    let config = EngineConfig {
        batch_policy: if matches.is_present("atomic_placements") {
            BatchPolicy::Atomic
        } else {
            BatchPolicy::KeepValid
        },
    };
    let engine = Engine::with_config(MemoryStore::new(), names.clone(), config);
    debug!("engine config: {:?}", engine.config());

    let stdin = io::stdin();
    let mut input = InputReader::new(stdin.lock());
    let mut rng = rand::thread_rng();

    let id = engine.create_session(players[0].clone()).map_err(engine_failure)?;
    engine.join_session(id, players[1].clone()).map_err(engine_failure)?;

    for player in &players {
        let name = &names[player];
        if matches.is_present("random_fleets") {
            randomize(&mut rng, &engine, id, player).map_err(engine_failure)?;
        } else {
            hand_over(&mut input, name)?;
            choose_placements(&mut rng, &engine, id, player, name, &mut input)?;
        }
    }

    play(&engine, id, &players, &names, &mut input)
}

/// Install the logger. `RUST_LOG` takes precedence over the `-v` count.
fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(level);
    if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn display_names(matches: &ArgMatches, players: &[PlayerId; 2]) -> HashMap<PlayerId, String> {
    let mut names = HashMap::new();
    for (i, player) in players.iter().enumerate() {
        let default = format!("Player {}", i + 1);
        let name = matches.value_of(player.as_str()).unwrap_or(&default);
        names.insert(player.clone(), name.to_owned());
    }
    names
}

fn engine_failure(err: EngineError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err)
}

/// Print an engine error, with each rejected placement on its own line.
fn report_error(err: &EngineError) {
    println!("{}", err);
    for placement_err in err.placement_errors() {
        println!("  {}", placement_err);
    }
}

/// Ask the players to swap seats so the next one does not see the other's board.
fn hand_over(input: &mut InputReader<impl BufRead>, name: &str) -> io::Result<()> {
    println!();
    input.read_input(&format!("Pass the keyboard to {} and press enter.", name), |_| Some(()))
}

/// Lay out all of `player`'s remaining ships randomly.
fn randomize(
    rng: &mut impl Rng,
    engine: &HotSeatEngine,
    id: SessionId,
    player: &PlayerId,
) -> Result<(), EngineError> {
    let view = engine.view(id, player)?;
    let placements = random_placements(rng, &view.your_board, view.your_fleet.pending());
    let summary = engine.place_ships(id, player, &placements)?;
    println!("{}", summary.status);
    Ok(())
}

/// Choose placements for all ships using input from the player.
fn choose_placements(
    rng: &mut impl Rng,
    engine: &HotSeatEngine,
    id: SessionId,
    player: &PlayerId,
    name: &str,
    input: &mut InputReader<impl BufRead>,
) -> io::Result<()> {
    enum Command {
        Done,
        Place(Placement),
        Randomize,
        Board,
        Help,
    }
    static PLACE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"^(?x)(?:place|put)\s+
        (?P<ship>\w+)\s+
        (?:(?:at|on|to)\s+)?
        (?P<x>[0-9]+)(?:\s*,\s*|\s+)(?P<y>[0-9]+)\s+
        (?P<dir>\w+)$",
        )
        .unwrap()
    });

    println!();
    println!("{}, place your ships. Type help or ? for commands.", name);
    loop {
        let view = engine.view(id, player).map_err(engine_failure)?;
        println!();
        let mut pending = view.your_fleet.pending().peekable();
        if pending.peek().is_none() {
            println!("All ships placed, type done to continue");
        } else {
            let pending: Vec<_> = pending.map(Ship::name).collect();
            println!("Remaining ships to place: {}", pending.join(", "));
        }
        println!("Your current board setup:");
        show_board(&view.your_board);
        println!();

        let cmd = input.read_input_lower(">", |input| match input {
            "?" | "help" | "h" => Some(Command::Help),
            "randomize" | "rand" | "random" => Some(Command::Randomize),
            "board" | "show" => Some(Command::Board),
            "done" | "start" => Some(Command::Done),
            other => match PLACE.captures(other) {
                Some(captures) => {
                    let ship = match parse_ship(&captures["ship"]) {
                        Some(ship) => ship,
                        None => {
                            println!(
                                "invalid ship: {}, choose \"carrier\", \"battleship\", \"cruiser\", \"submarine\", or \"destroyer\"",
                                &captures["ship"]
                            );
                            return None;
                        }
                    };
                    let x = parse_axis("x", &captures["x"])?;
                    let y = parse_axis("y", &captures["y"])?;
                    let orientation = match captures["dir"].parse::<Orientation>() {
                        Ok(orientation) => orientation,
                        Err(err) => {
                            println!("{}", err);
                            return None;
                        }
                    };
                    Some(Command::Place(Placement::new(ship.name(), x, y, orientation)))
                }
                None => {
                    println!("Invalid ship-placement command \"{}\". Use '?' for help", other);
                    None
                }
            },
        })?;

        match cmd {
            Command::Done if view.your_fleet.all_placed() => break,
            Command::Done => println!("You must place all your ships first!"),
            Command::Place(placement) => {
                if let Err(err) = engine.place_ships(id, player, &[placement]) {
                    report_error(&err);
                }
            }
            Command::Randomize => {
                if let Err(err) = randomize(rng, engine, id, player) {
                    report_error(&err);
                }
            }
            Command::Board => {}
            Command::Help => {
                println!(
                    "Available Commands:
    done                        once all ships are placed, hand over to the next player.
    place <ship> <x>,<y> <dir>  place the ship with its first cell at the given coordinate.
        Possible directions are \"horizontal\" (\"h\") and \"vertical\" (\"v\").
    randomize                   randomize the placements of the remaining ships.
    board                       show the board again.

Available Ships:
    \"carrier\" (\"cv\")
    \"battleship\" (\"bb\")
    \"cruiser\" (\"cl\")
    \"submarine\" (\"ss\")
    \"destroyer\" (\"dd\")",
                );
            }
        }
    }
    Ok(())
}

/// Take turns until one player has sunk the other's fleet or someone quits.
fn play(
    engine: &HotSeatEngine,
    id: SessionId,
    players: &[PlayerId; 2],
    names: &HashMap<PlayerId, String>,
    input: &mut InputReader<impl BufRead>,
) -> io::Result<()> {
    let mut last = None;
    loop {
        let view = engine.view(id, &players[0]).map_err(engine_failure)?;
        let current = match view.status {
            Status::Active { current } => current,
            Status::Finished { .. } | Status::Pending => return Ok(()),
        };
        if last.as_ref() != Some(&current) {
            hand_over(input, &names[&current])?;
            last = Some(current.clone());
        }
        if !take_shot(engine, id, &current, &names[&current], input)? {
            return Ok(());
        }
    }
}

/// Let `player` fire one shot. Returns false if the game should end.
fn take_shot(
    engine: &HotSeatEngine,
    id: SessionId,
    player: &PlayerId,
    name: &str,
    input: &mut InputReader<impl BufRead>,
) -> io::Result<bool> {
    enum Command {
        Fire(Coordinate),
        Status { json: bool },
        Board,
        Help,
        Quit,
    }
    static FIRE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"^(?x)(?:fire|shoot|f)\s+
        (?:(?:at|on)\s+)?
        (?P<x>[0-9]+)(?:\s*,\s*|\s+)(?P<y>[0-9]+)$",
        )
        .unwrap()
    });

    let view = engine.view(id, player).map_err(engine_failure)?;
    println!();
    println!("Your board:");
    show_board(&view.your_board);
    println!("Your shots:");
    show_board(&view.opponent_board);
    println!();

    loop {
        let cmd = input.read_input_lower(&format!("{}>", name), |input| match input {
            "?" | "help" | "h" => Some(Command::Help),
            "board" | "show" => Some(Command::Board),
            "status" => Some(Command::Status { json: false }),
            "status --json" | "json" => Some(Command::Status { json: true }),
            "quit" | "exit" | "q" => Some(Command::Quit),
            other => match FIRE.captures(other) {
                Some(captures) => {
                    let x = parse_axis("x", &captures["x"])?;
                    let y = parse_axis("y", &captures["y"])?;
                    Some(Command::Fire(Coordinate::new(x, y)))
                }
                None => {
                    println!("Invalid command \"{}\". Use '?' for help", other);
                    None
                }
            },
        })?;

        match cmd {
            Command::Fire(target) => match engine.resolve_move(id, player, target.x, target.y) {
                Ok(report) => {
                    println!("{}", report.message());
                    show_board(&report.opponent_board);
                    if let Some(verdict) = &report.verdict {
                        if let Some(message) = verdict.message_for(&verdict.loser) {
                            println!("{}", message);
                        }
                        return Ok(false);
                    }
                    if report.kind == ShotKind::Miss {
                        return Ok(true);
                    }
                }
                Err(err) => report_error(&err),
            },
            Command::Status { json } => {
                let view = engine.view(id, player).map_err(engine_failure)?;
                if json {
                    match serde_json::to_string_pretty(&view) {
                        Ok(json) => println!("{}", json),
                        Err(err) => println!("could not encode session: {}", err),
                    }
                } else {
                    println!("Session {} is {}.", view.id, view.status);
                    if let Some(player2) = &view.player2 {
                        println!("{} vs {}", view.player1.name, player2.name);
                    }
                }
            }
            Command::Board => {
                let view = engine.view(id, player).map_err(engine_failure)?;
                println!("Your board:");
                show_board(&view.your_board);
                println!("Your shots:");
                show_board(&view.opponent_board);
            }
            Command::Help => {
                println!(
                    "Available Commands:
    fire <x>,<y>     fire at the given coordinate of the opponent's board.
    board            show both boards again.
    status [--json]  show the session status, optionally as JSON.
    quit             end the game."
                );
            }
            Command::Quit => return Ok(false),
        }
    }
}

/// Map a ship name or its abbreviation to the ship.
fn parse_ship(name: &str) -> Option<Ship> {
    Some(match name {
        "cv" | "carrier" => Ship::Carrier,
        "bb" | "battleship" => Ship::Battleship,
        "ca" | "cl" | "cruiser" => Ship::Cruiser,
        "ss" | "sub" | "submarine" => Ship::Submarine,
        "dd" | "destroyer" => Ship::Destroyer,
        _ => return None,
    })
}

/// Parse one coordinate axis, printing a message if it is not on the board.
fn parse_axis(axis: &str, value: &str) -> Option<usize> {
    match value.parse() {
        Ok(v) if v < GRID_SIZE => Some(v),
        _ => {
            println!("{} must be in range [0,{}], got {}", axis, GRID_SIZE - 1, value);
            None
        }
    }
}

/// Show the board by printing the grid with row and column headers.
fn show_board(board: &BoardView) {
    print!("   ");
    for i in 0..GRID_SIZE {
        print!("{:^3}", i);
    }
    println!();
    for (i, row) in board.rows().enumerate() {
        print!("{:>2} ", i);
        for cell in row {
            print!("{:^3}", cell.symbol());
        }
        println!();
    }
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns `Some`. Converts
    /// to ascii lower before running the checker.
    fn read_input_lower<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            self.buf.make_ascii_lowercase();
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Repeatedly tries to read input until the input checker returns `Some`.
    fn read_input<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Helper to print the prompt, clear the string buffer and read a line.
    fn read_input_inner(&mut self, prompt: &str) -> io::Result<()> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            std::process::exit(0);
        }
        Ok(())
    }
}
