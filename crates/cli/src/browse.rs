//! Interactive browsing session.
//!
//! Input lines become user actions on the [`ClientView`]. Each request runs
//! in its own task and reports back over a channel, so a slow request never
//! blocks the prompt; completions are applied in the order they arrive.

use anyhow::{Context, Result};
use catalog::MovieId;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;

use crate::api::CatalogClient;
use crate::render::render;
use crate::view::{ClientView, Completion};

/// A parsed line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Search(String),
    Recommend(MovieId),
    Help,
    Quit,
    Invalid(String),
}

/// Parse one line of input.
///
/// Bare text is a search; commands start with `/`.
pub fn parse_input(line: &str) -> Input {
    let line = line.trim();
    let Some(command) = line.strip_prefix('/') else {
        return Input::Search(line.to_string());
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match name {
        "search" | "s" => Input::Search(arg.to_string()),
        "rec" | "r" => match arg.parse::<MovieId>() {
            Ok(id) => Input::Recommend(id),
            Err(_) => Input::Invalid(format!("Not a movie id: {:?}", arg)),
        },
        "help" | "h" => Input::Help,
        "quit" | "q" => Input::Quit,
        other => Input::Invalid(format!("Unknown command: /{}", other)),
    }
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  <text>          search titles and genres");
    println!("  /search <text>  same as above");
    println!("  /rec <id>       recommendations for a movie");
    println!("  /help           show this help");
    println!("  /quit           leave");
}

/// Run the interactive session until `/quit` or end of input
pub async fn run(client: CatalogClient) -> Result<()> {
    let mut view = ClientView::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_help();
    println!("{}", render(&view));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };

                match parse_input(&line) {
                    Input::Search(query) => {
                        view.set_search_query(query);
                        match view.begin_search() {
                            Some(query) => {
                                let client = client.clone();
                                let tx = tx.clone();
                                tokio::spawn(async move {
                                    let result = client.search(&query).await;
                                    let _ = tx.send(Completion::Movies(result));
                                });
                            }
                            None => println!("{}", "Search is busy, try again shortly".yellow()),
                        }
                    }
                    Input::Recommend(movie_id) => {
                        let movie_id = view.begin_recommendations(movie_id);
                        let client = client.clone();
                        let tx = tx.clone();
                        tokio::spawn(async move {
                            let result = client.recommendations(movie_id).await;
                            let _ = tx.send(Completion::Recommendations(movie_id, result));
                        });
                    }
                    Input::Help => {
                        print_help();
                        continue;
                    }
                    Input::Quit => break,
                    Input::Invalid(message) => {
                        println!("{}", message.red());
                        continue;
                    }
                }

                println!("{}", render(&view));
            }
            Some(completion) = rx.recv() => {
                view.apply(completion);
                println!("{}", render(&view));
            }
        }
    }

    info!("Browse session ended");
    Ok(())
}
