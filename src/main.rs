use std::path::Path;

use colored::Colorize;
use query_session::store::SessionWatcher;
use query_session::view::{
    StarFill, answer_bubble, error_line, rating_label, reference_cards, star_fills,
};
use query_session::{ActiveTab, QuerySession, SessionSnapshot, telemetry};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

const HELP: &str = "type a question, or :rate <1-5>, :helpful, :needs-work, :tab qa|history, :quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_env_file(Path::new(".env"))?;
    telemetry::init(telemetry::DEFAULT_DIRECTIVES)?;

    let session = QuerySession::from_env()?;
    let renderer = spawn_renderer(session.subscribe());

    println!("{}", HELP.dimmed());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim_end();
        match line.split_once(' ').unwrap_or((line, "")) {
            (":quit", _) => break,
            (":helpful", _) => {
                session.mark_helpful();
            }
            (":needs-work", _) => {
                session.mark_needs_work();
            }
            (":rate", arg) => match arg.trim().parse::<u8>() {
                Ok(stars) => {
                    if let Err(e) = session.adjust_rating(stars) {
                        eprintln!("{e}");
                    }
                }
                Err(_) => eprintln!("usage: :rate <1-5>"),
            },
            (":tab", arg) => match arg.parse::<ActiveTab>() {
                Ok(tab) => session.set_active_tab(tab),
                Err(e) => eprintln!("{e}"),
            },
            (cmd, _) if cmd.starts_with(':') => println!("{}", HELP.dimmed()),
            _ => {
                if let Err(e) = session.submit(line) {
                    eprintln!("{}", e.to_string().yellow());
                }
            }
        }
    }

    shutdown(session, renderer).await;
    Ok(())
}

/// Loads `path` into the environment. A missing file is fine: `SEARCH_API_BASE_URL`
/// falls back to localhost. An unreadable or malformed file is reported.
fn load_env_file(path: &Path) -> Result<(), dotenvy::Error> {
    match dotenvy::from_path(path) {
        Err(e) if e.not_found() => Ok(()),
        other => other,
    }
}

/// Redraws the panel on every snapshot change.
fn spawn_renderer(mut watcher: SessionWatcher) -> JoinHandle<()> {
    tokio::spawn(async move {
        render(&watcher.borrow_and_update().clone());
        while watcher.changed().await.is_ok() {
            let snapshot = watcher.borrow_and_update().clone();
            render(&snapshot);
        }
    })
}

/// Stops drawing without waiting for an in-flight search: its task keeps the
/// store alive, so the watch channel would not close until the request ends.
async fn shutdown(session: QuerySession, renderer: JoinHandle<()>) {
    renderer.abort();
    let _ = renderer.await;
    drop(session);
}

fn render(s: &SessionSnapshot) {
    println!("{}", "─".repeat(60).dimmed());
    let tabs = match s.active_tab {
        ActiveTab::Qa => format!("[{}] {}", "Q&A".bold(), "History".dimmed()),
        ActiveTab::History => format!("{} [{}]", "Q&A".dimmed(), "History".bold()),
    };
    println!("{tabs}");

    if s.active_tab == ActiveTab::History {
        println!("{}", "No conversation history yet. Ask a question.".dimmed());
        return;
    }

    if let Some(err) = error_line(s) {
        println!("{} {}", "⚠".red(), err.red());
    }
    if let Some(query) = &s.query {
        println!("{} {}", "Q".on_blue().white().bold(), query);
    }
    if let Some(bubble) = answer_bubble(s) {
        println!("{} {}", "A".on_red().white().bold(), bubble);
    }

    let stars: String = star_fills(s.rating)
        .iter()
        .map(|f| match f {
            StarFill::Full => '★',
            StarFill::Half => '⯪',
            StarFill::Empty => '☆',
        })
        .collect();
    let feedback = format!(
        "{}  {}",
        counter("helpful", s.helpful_count),
        counter("needs work", s.needs_work_count)
    );
    println!(
        "trust {} {}   {}",
        stars.yellow(),
        rating_label(s.rating),
        feedback.dimmed()
    );

    let cards = reference_cards(s);
    println!("{}", "References".bold());
    if cards.is_empty() && !s.status.is_pending() {
        println!("  {}", "No results.".dimmed());
    }
    for card in cards {
        println!("  {} {}", card.label.cyan(), card.title);
    }
}

/// Button label with its click count, shown once clicked.
fn counter(label: &str, count: u32) -> String {
    if count > 0 {
        format!("{label} ({count})")
    } else {
        label.to_string()
    }
}
