use clap::{ArgAction, Parser};
use log::{debug, LevelFilter};
use simplelog::{Config, WriteLogger};
use std::{
    fs::File,
    io::{stdout, Write},
    process::exit,
};

use futures::{future::FutureExt, select, StreamExt};

use crossterm::{
    cursor::MoveTo,
    event::{Event, EventStream},
    execute,
    style::Stylize,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
};

use lib::{
    card::{CardData, Catalog},
    display::{card_lines, detail_lines},
    filter::{apply_search_key, compute_visibility, visible, SearchUpdate},
};

const DEFAULT_CATALOG_FILE: &str = "data/fertilizer.csv";

// Display
const CARD_WIDTH: usize = 58;

/// All command line arguments
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(short, long)]
    catalog_file: Option<String>,

    #[arg(short, long)]
    search: Option<String>,

    #[arg(long, action = ArgAction::SetTrue)]
    debug: bool,
}

fn draw(text: &str, cards: &[CardData], flags: &[bool], pinned: Option<&CardData>) {
    let mut out = stdout();
    let _ = execute!(out, Clear(ClearType::All), MoveTo(0, 0));

    let shown = visible(cards, flags);

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("> {}", text));
    let count = format!("{} of {} fertilizers shown", shown.len(), cards.len());
    lines.push(count.as_str().grey().to_string());
    lines.push(String::new());
    for card in shown {
        lines.extend(card_lines(card, CARD_WIDTH));
        lines.push(String::new());
    }
    if let Some(card) = pinned {
        lines.extend(detail_lines(card, CARD_WIDTH));
    }

    // Raw mode needs explicit carriage returns
    let _ = write!(out, "{}\r\n", lines.join("\r\n"));
    // Park the cursor at the end of the search prompt
    let _ = execute!(out, MoveTo((text.len() + 2) as u16, 0));
    let _ = out.flush();
}

pub async fn run_filter(cards: &[CardData]) {
    let mut reader = EventStream::new();
    let mut text = String::new();
    // Empty term shows every card
    let mut flags = vec![true; cards.len()];
    let mut pinned: Option<&CardData> = None;

    draw(&text, cards, &flags, pinned);

    loop {
        let mut event = reader.next().fuse();

        select! {
            maybe_event = event => {
                match maybe_event {
                    Some(Ok(event)) => {
                        if let Event::Key(key) = event {
                            match apply_search_key(cards, &text, key) {
                                SearchUpdate::Cancelled => break,
                                SearchUpdate::Selected(card) => {
                                    debug!("Pinned card: {}", card.name);
                                    pinned = Some(card);
                                }
                                SearchUpdate::Continue { text: new_text, visible: new_flags } => {
                                    text = new_text;
                                    flags = new_flags;
                                    pinned = None;
                                }
                            }
                            draw(&text, cards, &flags, pinned);
                        }
                    }
                    Some(Err(e)) => println!("Error: {:?}\r", e),
                    None => break,
                }
            }
        };
    }
}

#[tokio::main]
pub async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        WriteLogger::init(
            LevelFilter::Debug,
            Config::default(),
            File::create(format!(
                "guide_{}.log",
                chrono::Local::now().format("%Y%m%d_%H%M%S")
            ))
            .unwrap(),
        )
        .unwrap();
    }

    let catalog_file = cli
        .catalog_file
        .unwrap_or(DEFAULT_CATALOG_FILE.to_string());
    let catalog = match Catalog::init(&catalog_file) {
        Ok(catalog) => catalog,
        Err(e) => {
            println!("{}", e);
            exit(1);
        }
    };
    debug!("Catalog loaded with {} cards", catalog.cards.len());

    // One-shot mode for scripts: filter once and print the visible cards
    if let Some(term) = cli.search {
        let flags = compute_visibility(&catalog.cards, &term);
        for card in visible(&catalog.cards, &flags) {
            for line in card_lines(card, CARD_WIDTH) {
                println!("{}", line);
            }
            println!();
        }
        return Ok(());
    }

    enable_raw_mode()?;

    run_filter(&catalog.cards).await;

    execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
    disable_raw_mode()
}
