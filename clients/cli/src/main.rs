use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use deal_master::config::{clear_config, set_config, set_skip_rule_change_tip, skip_rule_change_tip};
use deal_master::msg::{GameMsg, OpenOutcome, Response, SetupMsg, TableResponse};
use deal_master::session::describe_changes;
use deal_master::{FileStorage, Table};
use dealing::{Card, DealConfig, DealConfigPatch, DealMode};
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

type BoxErr = Box<dyn std::error::Error + Send + Sync>;
type CliTable = Table<FileStorage, ChaCha8Rng>;

#[derive(Parser)]
#[command(name = "deal-master", about = "Shuffle a deck and deal it around the table")]
struct Cli {
    /// Directory holding the saved ruleset and game
    #[arg(long, env = "DEAL_MASTER_DATA_DIR", default_value = ".deal-master")]
    data_dir: PathBuf,

    /// Seed the shuffle for a reproducible run
    #[arg(long, env = "DEAL_MASTER_SEED")]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect or edit the saved ruleset
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Press one of the setup screen buttons
    Setup {
        #[arg(value_enum)]
        step: SetupStep,
    },

    /// Open the game, resuming the saved one if its rules still apply
    Start {
        /// Discard a game saved under different rules without asking
        #[arg(long)]
        yes: bool,
    },

    /// Deal one batch per repetition
    Deal {
        #[arg(long, default_value_t = 1)]
        times: u32,
    },

    /// Start over with a fresh deck under the current rules
    Reset,

    /// Print the table
    Show {
        #[arg(long)]
        json: bool,
    },

    /// Print every card dealt to one player, most recent first
    Pile {
        /// Seat index, starting at 0
        idx: usize,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    Show,

    /// Change some fields; out-of-range values are clamped
    Set {
        #[arg(long)]
        deck_count: Option<i64>,

        #[arg(long, action = clap::ArgAction::Set)]
        jokers: Option<bool>,

        #[arg(long)]
        players: Option<i64>,

        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        #[arg(long)]
        per_time: Option<i64>,

        #[arg(long, action = clap::ArgAction::Set)]
        reshuffle: Option<bool>,
    },

    /// Forget the saved ruleset
    Clear,

    /// Skip the warning when rules changed since the last game
    SkipConfirm {
        #[arg(action = clap::ArgAction::Set)]
        skip: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Round,
    Simultaneous,
}

impl From<ModeArg> for DealMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Round => DealMode::Round,
            ModeArg::Simultaneous => DealMode::Simultaneous,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SetupStep {
    OneDeck,
    TwoDecks,
    ToggleJokers,
    IncPlayers,
    DecPlayers,
    Round,
    Simultaneous,
    IncPerTime,
    DecPerTime,
    ReshuffleOn,
    ReshuffleOff,
}

impl From<SetupStep> for SetupMsg {
    fn from(step: SetupStep) -> Self {
        match step {
            SetupStep::OneDeck => SetupMsg::SetDeckCount { deck_count: 1 },
            SetupStep::TwoDecks => SetupMsg::SetDeckCount { deck_count: 2 },
            SetupStep::ToggleJokers => SetupMsg::ToggleJokers {},
            SetupStep::IncPlayers => SetupMsg::IncPlayers {},
            SetupStep::DecPlayers => SetupMsg::DecPlayers {},
            SetupStep::Round => SetupMsg::SetDealMode {
                mode: DealMode::Round,
            },
            SetupStep::Simultaneous => SetupMsg::SetDealMode {
                mode: DealMode::Simultaneous,
            },
            SetupStep::IncPerTime => SetupMsg::IncPerTime {},
            SetupStep::DecPerTime => SetupMsg::DecPerTime {},
            SetupStep::ReshuffleOn => SetupMsg::SetReshuffle { reshuffle: true },
            SetupStep::ReshuffleOff => SetupMsg::SetReshuffle { reshuffle: false },
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    log::debug!("Using data directory {}", cli.data_dir.display());
    let mut table = Table::new(FileStorage::new(cli.data_dir.clone()), rng);

    if let Err(e) = run(&mut table, cli.command) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(table: &mut CliTable, command: Command) -> Result<(), BoxErr> {
    match command {
        Command::Config { action } => cmd_config(table, action),
        Command::Setup { step } => {
            let cfg = table.setup(step.into());
            print_config(&cfg);
            Ok(())
        }
        Command::Start { yes } => {
            let outcome = open(table, yes)?;
            match outcome {
                OpenOutcome::Resumed => println!("Resumed saved game"),
                _ => println!("Started a new game"),
            }
            print_table(&table.query_table()?);
            Ok(())
        }
        Command::Deal { times } => {
            open(table, false)?;
            for _ in 0..times {
                let response = table.execute(GameMsg::Deal {})?;
                print_response(&response);
                if response.attribute("dealt") == Some("0") {
                    break;
                }
            }
            print_table(&table.query_table()?);
            Ok(())
        }
        Command::Reset => {
            let response = table.execute(GameMsg::Reset {})?;
            print_response(&response);
            print_table(&table.query_table()?);
            Ok(())
        }
        Command::Show { json } => {
            open(table, false)?;
            let view = table.query_table()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_table(&view);
            }
            Ok(())
        }
        Command::Pile { idx } => {
            open(table, false)?;
            let pile = table.query_pile(idx)?;
            println!("{} ({} cards): {}", pile.name, pile.pile.len(), cards(&pile.pile));
            Ok(())
        }
    }
}

fn cmd_config(table: &mut CliTable, action: ConfigAction) -> Result<(), BoxErr> {
    match action {
        ConfigAction::Show => {
            print_config(&table.config());
            let skip = skip_rule_change_tip(table.storage());
            println!("skip rule change warning: {skip}");
        }
        ConfigAction::Set {
            deck_count,
            jokers,
            players,
            mode,
            per_time,
            reshuffle,
        } => {
            let patch = DealConfigPatch {
                deck_count,
                include_jokers: jokers,
                player_count: players,
                deal_mode: mode.map(DealMode::from),
                per_time,
                reshuffle,
            };
            let cfg = set_config(table.storage_mut(), &patch);
            print_config(&cfg);
        }
        ConfigAction::Clear => {
            clear_config(table.storage_mut());
            println!("Ruleset cleared");
            print_config(&table.config());
        }
        ConfigAction::SkipConfirm { skip } => {
            set_skip_rule_change_tip(table.storage_mut(), skip);
            println!("skip rule change warning: {skip}");
        }
    }
    Ok(())
}

/// Open the game screen. A game saved under other rules is only thrown away
/// when `confirmed`.
fn open(table: &mut CliTable, confirmed: bool) -> Result<OpenOutcome, BoxErr> {
    let outcome = table.open();
    if let OpenOutcome::ConfirmRequired { changes } = &outcome {
        if !confirmed {
            return Err(format!(
                "Rules changed since the saved game ({}). Run `deal-master start --yes` to start over.",
                describe_changes(changes)
            )
            .into());
        }
        table.open_confirmed();
        return Ok(OpenOutcome::Started);
    }
    Ok(outcome)
}

fn print_config(cfg: &DealConfig) {
    println!(
        "decks: {}, jokers: {}, players: {}, mode: {}, per deal: {}, reshuffle: {}",
        cfg.deck_count,
        if cfg.include_jokers { "yes" } else { "no" },
        cfg.player_count,
        cfg.deal_mode.label(),
        cfg.per_time,
        if cfg.reshuffle { "yes" } else { "no" },
    );
}

fn print_response(response: &Response) {
    if let Some(notice) = &response.notice {
        println!("{notice}");
    }
}

fn print_table(view: &TableResponse) {
    println!("{} cards remaining", view.remain);
    if view.players.is_empty() {
        println!("No seats for {} players", view.cfg.player_count);
        return;
    }
    for (i, player) in view.players.iter().enumerate() {
        let turn = view.cfg.deal_mode == DealMode::Round && i == view.current_index;
        println!(
            "{} {} ({},{}) [{}]: {}",
            if turn { ">" } else { " " },
            player.name,
            player.x,
            player.y,
            player.pile_size,
            cards(&player.top_cards),
        );
    }
}

fn cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_display)
        .collect::<Vec<_>>()
        .join(" ")
}
