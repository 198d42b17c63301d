//! Line-driven front end for [`SearchSession`].
//!
//! Every plain line replaces the query text, as if typed into a search box.
//! Lines starting with `:` are keys and commands. Geocoding runs on a spawned
//! task and reports back with its ticket's sequence number, so the session
//! can drop replies that a newer search has superseded.

use anyhow::Context;
use outfit_core::{
    City, Config, Gender, GeocodingService, Key, OpenMeteoClient, RecommendError, Recommendation,
    RecommendationPipeline, SearchSession, SearchTicket, ServiceError,
    provider::client_from_config,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
    time::{Instant, sleep_until},
};

use crate::render;

type SearchReply = (u64, Result<Vec<City>, ServiceError>);

const HELP: &str = "\
Type a city name to search. Commands:
  :down / :up    move the cursor      :enter   pick the highlighted city
  :pick N        pick entry N         :esc     close the list
  :focus         search again now     :seoul   Seoul shortcut
  :gender        switch female/male   :quit    leave";

#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Text(&'a str),
    Key(Key),
    Focus,
    Pick(usize),
    Seoul,
    ToggleGender,
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix(':') else {
        return Input::Text(line);
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("down"), None) => Input::Key(Key::Down),
        (Some("up"), None) => Input::Key(Key::Up),
        (Some("enter"), None) => Input::Key(Key::Enter),
        (Some("esc"), None) => Input::Key(Key::Escape),
        (Some("focus"), None) => Input::Focus,
        (Some("pick"), Some(n)) => match n.parse::<usize>() {
            Ok(n) if n >= 1 => Input::Pick(n - 1),
            _ => Input::Unknown(trimmed),
        },
        (Some("seoul"), None) => Input::Seoul,
        (Some("gender"), None) => Input::ToggleGender,
        (Some("help"), None) => Input::Help,
        (Some("quit" | "q"), None) => Input::Quit,
        _ => Input::Unknown(trimmed),
    }
}

pub async fn run(config: &Config, mut gender: Gender) -> anyhow::Result<()> {
    let client = client_from_config(config)?;
    let mut session = SearchSession::new(&config.search);
    let mut pipeline = RecommendationPipeline::new(client.clone());
    let (tx, mut rx) = mpsc::unbounded_channel::<SearchReply>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{HELP}");
    render::print_status(pipeline.status());

    loop {
        let deadline = session.next_deadline();

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };

                match parse_input(&line) {
                    Input::Text(text) => session.input(text, Instant::now()),
                    Input::Key(key) => match session.key(key) {
                        Some(city) => commit(&mut pipeline, city, gender).await,
                        None => render::print_entries(&session),
                    },
                    Input::Focus => {
                        if let Some(ticket) = session.focus() {
                            spawn_search(&client, ticket, &tx);
                        }
                    }
                    Input::Pick(index) => match session.activate(index) {
                        Some(city) => commit(&mut pipeline, city, gender).await,
                        None => println!("No entry #{} in the list.", index + 1),
                    },
                    Input::Seoul => commit(&mut pipeline, City::seoul(), gender).await,
                    Input::ToggleGender => {
                        gender = gender.toggled();
                        println!("Outfit list: {gender}");
                        if let Some(outcome) = pipeline.regender(gender) {
                            show_outcome(outcome);
                        }
                    }
                    Input::Help => println!("{HELP}"),
                    Input::Quit => break,
                    Input::Unknown(command) => println!("Unknown command '{command}'. Type :help."),
                }
            }

            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                match session.poll_due(Instant::now()) {
                    Some(ticket) => spawn_search(&client, ticket, &tx),
                    None => render::print_entries(&session),
                }
            }

            Some((seq, result)) = rx.recv() => {
                if session.complete(seq, result) {
                    render::print_entries(&session);
                }
            }
        }
    }

    Ok(())
}

fn spawn_search(client: &OpenMeteoClient, ticket: SearchTicket, tx: &mpsc::UnboundedSender<SearchReply>) {
    let geocoder = client.clone();
    let tx = tx.clone();

    tokio::spawn(async move {
        let result = geocoder.search(&ticket.query).await;
        if tx.send((ticket.seq, result)).is_err() {
            tracing::debug!(seq = ticket.seq, "session closed before search reply");
        }
    });
}

async fn commit(pipeline: &mut RecommendationPipeline<OpenMeteoClient>, city: City, gender: Gender) {
    println!("{}…", city.display_label());
    let outcome = pipeline.recommend(city, gender).await;
    show_outcome(outcome);
}

fn show_outcome(outcome: Result<&Recommendation, RecommendError>) {
    match outcome {
        Ok(rec) => render::print_recommendation(rec),
        Err(err) => render::print_status(err.user_message()),
    }
}
