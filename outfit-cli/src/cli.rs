use anyhow::{Context, anyhow, bail};
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use outfit_core::{
    City, Config, Gender, OpenMeteoClient, RecommendationPipeline, SearchSession, SearchState,
    provider::client_from_config, search::SEARCH_FAILED,
};

use crate::{interactive, render, telemetry};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "outfit", version, about = "Tomorrow's outfit, from tomorrow's weather")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Edit the saved defaults (gender preference, search language and country).
    Configure,

    /// Search for a city and show tomorrow's recommendation.
    Show {
        /// City name, at least two characters.
        query: String,

        /// "female" or "male"; defaults to the configured preference.
        #[arg(long, value_parser = parse_gender)]
        gender: Option<Gender>,

        /// Print the recommendation as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Shortcut: tomorrow's recommendation for Seoul, no search.
    Seoul {
        #[arg(long, value_parser = parse_gender)]
        gender: Option<Gender>,

        #[arg(long)]
        json: bool,
    },

    /// Line-driven session: type queries, navigate with :down/:up, commit with :enter.
    Interactive {
        #[arg(long, value_parser = parse_gender)]
        gender: Option<Gender>,
    },
}

fn parse_gender(value: &str) -> Result<Gender, String> {
    Gender::try_from(value).map_err(|err| err.to_string())
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;
        telemetry::init(&config.log_level)?;

        match self.command {
            Command::Configure => configure(config),
            Command::Show { query, gender, json } => {
                let gender = gender.unwrap_or(config.default_gender);
                show(&config, &query, gender, json).await
            }
            Command::Seoul { gender, json } => {
                let client = client_from_config(&config)?;
                let gender = gender.unwrap_or(config.default_gender);
                recommend_and_print(client, City::seoul(), gender, json).await
            }
            Command::Interactive { gender } => {
                interactive::run(&config, gender.unwrap_or(config.default_gender)).await
            }
        }
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let genders = Gender::all().to_vec();
    let start = genders
        .iter()
        .position(|g| *g == config.default_gender)
        .unwrap_or_default();

    config.default_gender = Select::new("Default outfit list:", genders)
        .with_starting_cursor(start)
        .prompt()
        .context("Gender selection was cancelled")?;

    config.search.language = Text::new("Search result language:")
        .with_default(&config.search.language)
        .prompt()
        .context("Language input was cancelled")?;

    config.search.country_code = Text::new("Restrict search to country code:")
        .with_default(&config.search.country_code)
        .prompt()
        .context("Country input was cancelled")?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(config: &Config, query: &str, gender: Gender, json: bool) -> anyhow::Result<()> {
    let client = client_from_config(config)?;
    let mut session = SearchSession::new(&config.search);

    let Some(ticket) = session.submit(query) else {
        bail!(
            "Query '{}' is too short; type at least {} characters.",
            query.trim(),
            config.search.min_query_chars
        );
    };
    session.run(&client, ticket).await;

    if !has_candidates(&session)? {
        render::print_entries(&session);
        return Ok(());
    }

    let city = pick_candidate(&mut session)?;
    recommend_and_print(client, city, gender, json).await
}

/// `Ok(false)` for an empty result list; a failed search is an error.
fn has_candidates(session: &SearchSession) -> anyhow::Result<bool> {
    match session.state() {
        SearchState::Results => Ok(true),
        SearchState::Failed => bail!(SEARCH_FAILED),
        _ => Ok(false),
    }
}

fn pick_candidate(session: &mut SearchSession) -> anyhow::Result<City> {
    let labels: Vec<String> = session.candidates().iter().map(City::to_string).collect();

    let index = if labels.len() == 1 {
        0
    } else {
        Select::new("도시를 선택하세요:", labels)
            .raw_prompt()
            .context("City selection was cancelled")?
            .index
    };

    session
        .activate(index)
        .ok_or_else(|| anyhow!("Candidate #{index} is no longer listed"))
}

async fn recommend_and_print(
    client: OpenMeteoClient,
    city: City,
    gender: Gender,
    json: bool,
) -> anyhow::Result<()> {
    let mut pipeline = RecommendationPipeline::new(client);

    match pipeline.recommend(city, gender).await {
        Ok(rec) if json => {
            let out = serde_json::to_string_pretty(rec)
                .context("Failed to serialize recommendation to JSON")?;
            println!("{out}");
            Ok(())
        }
        Ok(rec) => {
            render::print_recommendation(rec);
            Ok(())
        }
        Err(err) => {
            let message = err.user_message();
            Err(anyhow::Error::new(err).context(message))
        }
    }
}
