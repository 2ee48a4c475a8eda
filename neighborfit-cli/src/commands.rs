//! Argument parsing, configuration merging and execution per subcommand.

use std::io::Write;
use std::num::NonZeroUsize;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::info;
use neighborfit_core::{
    AnonymousQuery, AreaId, AreaKind, Limit, SearchQuery, SortDirection, SortKey, UserId,
    Walkability,
};
use neighborfit_core::criteria::ANONYMOUS_MIN_SAFETY_SCORE;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::dataset::{DatasetService, load_dataset};
use crate::{ARG_AREA_ID, ARG_DATASET, ARG_USER, CliError, write_json};

pub(crate) const ENV_MATCH_DATASET: &str = "NEIGHBORFIT_CMDS_MATCH_DATASET";
pub(crate) const ENV_MATCH_USER: &str = "NEIGHBORFIT_CMDS_MATCH_USER";
const ENV_ANONYMOUS_DATASET: &str = "NEIGHBORFIT_CMDS_ANONYMOUS_DATASET";
const ENV_SEARCH_DATASET: &str = "NEIGHBORFIT_CMDS_SEARCH_DATASET";
const ENV_COMPARE_DATASET: &str = "NEIGHBORFIT_CMDS_COMPARE_DATASET";
pub(crate) const ENV_RECOMMEND_DATASET: &str = "NEIGHBORFIT_CMDS_RECOMMEND_DATASET";
const ENV_RECOMMEND_USER: &str = "NEIGHBORFIT_CMDS_RECOMMEND_USER";
const ENV_STATS_DATASET: &str = "NEIGHBORFIT_CMDS_STATS_DATASET";
const ENV_CITIES_DATASET: &str = "NEIGHBORFIT_CMDS_CITIES_DATASET";
const ENV_SHOW_DATASET: &str = "NEIGHBORFIT_CMDS_SHOW_DATASET";
const ENV_SHOW_ID: &str = "NEIGHBORFIT_CMDS_SHOW_ID";

pub(crate) const DEFAULT_MATCH_LIMIT: Limit =
    Limit::from_non_zero(NonZeroUsize::MIN.saturating_add(9));
pub(crate) const DEFAULT_RECOMMEND_LIMIT: Limit =
    Limit::from_non_zero(NonZeroUsize::MIN.saturating_add(4));

fn require<T>(value: Option<T>, field: &'static str, env: &'static str) -> Result<T, CliError> {
    value.ok_or(CliError::MissingArgument { field, env })
}

fn open_service(dataset: &Utf8Path) -> Result<DatasetService, CliError> {
    info!("loading dataset from {dataset}");
    load_dataset(dataset)?.into_service()
}

/// CLI arguments for the `match` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Score every area passing the user's stored structural \
                 preferences with the weighted match formula and print the \
                 best results, highest score first.",
    about = "Rank areas against a user's stored preferences"
)]
#[ortho_config(prefix = "NEIGHBORFIT")]
pub(crate) struct MatchArgs {
    /// Path to the JSON dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Identity of the user whose preferences drive the match.
    #[arg(long = ARG_USER, value_name = "id")]
    #[serde(default)]
    pub(crate) user: Option<UserId>,
    /// Restrict candidates to cities containing this text.
    #[arg(long, value_name = "name")]
    #[serde(default)]
    pub(crate) city: Option<String>,
    /// Maximum number of results (default 10).
    #[arg(long, value_name = "n")]
    #[serde(default)]
    pub(crate) limit: Option<Limit>,
}

/// Resolved `match` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MatchConfig {
    pub(crate) dataset: Utf8PathBuf,
    pub(crate) user: UserId,
    pub(crate) city: Option<String>,
    pub(crate) limit: Limit,
}

impl MatchArgs {
    fn into_config(self) -> Result<MatchConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        MatchConfig::try_from(merged)
    }
}

impl TryFrom<MatchArgs> for MatchConfig {
    type Error = CliError;

    fn try_from(args: MatchArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            dataset: require(args.dataset, ARG_DATASET, ENV_MATCH_DATASET)?,
            user: require(args.user, ARG_USER, ENV_MATCH_USER)?,
            city: args.city,
            limit: args.limit.unwrap_or(DEFAULT_MATCH_LIMIT),
        })
    }
}

pub(crate) fn run_match(args: MatchArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let service = open_service(&config.dataset)?;
    let ranked = service.matches(config.user, config.city.as_deref(), config.limit)?;
    write_json(writer, &ranked)
}

/// CLI arguments for the `anonymous` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "List areas passing ad-hoc criteria without consulting a \
                 stored profile. Results are ordered by safety score, then \
                 lifestyle score, both descending.",
    about = "List safe areas matching ad-hoc criteria"
)]
#[ortho_config(prefix = "NEIGHBORFIT")]
pub(crate) struct AnonymousArgs {
    /// Path to the JSON dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Restrict to cities containing this text.
    #[arg(long, value_name = "name")]
    #[serde(default)]
    pub(crate) city: Option<String>,
    /// Required area type (urban, suburban, rural).
    #[arg(long = "type", value_name = "type")]
    #[serde(default)]
    pub(crate) area_type: Option<AreaKind>,
    /// Required walkability (low, medium, high).
    #[arg(long, value_name = "level")]
    #[serde(default)]
    pub(crate) walkability: Option<Walkability>,
    /// Required pet-friendliness.
    #[arg(long, value_name = "bool")]
    #[serde(default)]
    pub(crate) pet_friendly: Option<bool>,
    /// Required public transport access.
    #[arg(long, value_name = "bool")]
    #[serde(default)]
    pub(crate) public_transport: Option<bool>,
    /// Minimum safety score (default 50; 0 disables the floor).
    #[arg(long, value_name = "score")]
    #[serde(default)]
    pub(crate) min_safety_score: Option<u8>,
    /// Maximum number of results (default 10).
    #[arg(long, value_name = "n")]
    #[serde(default)]
    pub(crate) limit: Option<Limit>,
}

pub(crate) fn run_anonymous(args: AnonymousArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let dataset = require(merged.dataset, ARG_DATASET, ENV_ANONYMOUS_DATASET)?;
    let query = AnonymousQuery {
        city: merged.city,
        kind: merged.area_type,
        walkability: merged.walkability,
        pet_friendly: merged.pet_friendly,
        public_transport: merged.public_transport,
        min_safety_score: merged
            .min_safety_score
            .unwrap_or(ANONYMOUS_MIN_SAFETY_SCORE),
    };
    let limit = merged.limit.unwrap_or(DEFAULT_MATCH_LIMIT);
    let areas = open_service(&dataset)?.anonymous_matches(&query, limit)?;
    write_json(writer, &areas)
}

/// CLI arguments for the `search` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Filter the whole population by attribute and print every \
                 matching area in the requested order.",
    about = "Search areas by attribute"
)]
#[ortho_config(prefix = "NEIGHBORFIT")]
pub(crate) struct SearchArgs {
    /// Path to the JSON dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Restrict to cities containing this text.
    #[arg(long, value_name = "name")]
    #[serde(default)]
    pub(crate) city: Option<String>,
    /// Required area type (urban, suburban, rural).
    #[arg(long = "type", value_name = "type")]
    #[serde(default)]
    pub(crate) area_type: Option<AreaKind>,
    /// Required walkability (low, medium, high).
    #[arg(long, value_name = "level")]
    #[serde(default)]
    pub(crate) walkability: Option<Walkability>,
    /// Required pet-friendliness.
    #[arg(long, value_name = "bool")]
    #[serde(default)]
    pub(crate) pet_friendly: Option<bool>,
    /// Required public transport access.
    #[arg(long, value_name = "bool")]
    #[serde(default)]
    pub(crate) public_transport: Option<bool>,
    /// Minimum number of parks.
    #[arg(long, value_name = "n")]
    #[serde(default)]
    pub(crate) min_parks: Option<u32>,
    /// Require at least one school.
    #[arg(long, value_name = "bool")]
    #[serde(default)]
    pub(crate) schools_nearby: Option<bool>,
    /// Minimum safety score.
    #[arg(long, value_name = "score")]
    #[serde(default)]
    pub(crate) min_safety_score: Option<u8>,
    /// Maximum violent crime rate.
    #[arg(long, value_name = "rate")]
    #[serde(default)]
    pub(crate) max_crime_rate: Option<f64>,
    /// Sort key (city, name, population, safetyScore, lifestyleScore, crimeRate).
    #[arg(long, value_name = "key")]
    #[serde(default)]
    pub(crate) sort_by: Option<SortKey>,
    /// Sort direction (asc, desc).
    #[arg(long, value_name = "direction")]
    #[serde(default)]
    pub(crate) order: Option<SortDirection>,
}

impl SearchArgs {
    fn into_query(self) -> Result<(Utf8PathBuf, SearchQuery), CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        let dataset = require(merged.dataset, ARG_DATASET, ENV_SEARCH_DATASET)?;
        let query = SearchQuery {
            city: merged.city,
            kind: merged.area_type,
            walkability: merged.walkability,
            pet_friendly: merged.pet_friendly,
            public_transport: merged.public_transport,
            min_parks: merged.min_parks,
            schools_nearby: merged.schools_nearby.unwrap_or(false),
            min_safety_score: merged.min_safety_score,
            max_crime_rate: merged.max_crime_rate,
            sort_by: merged.sort_by.unwrap_or_default(),
            order: merged.order.unwrap_or_default(),
        };
        Ok((dataset, query))
    }
}

pub(crate) fn run_search(args: SearchArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let (dataset, query) = args.into_query()?;
    let areas = open_service(&dataset)?.search(&query)?;
    write_json(writer, &areas)
}

/// CLI arguments for the `compare` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Print per-area metrics for two or more areas together with \
                 the safest area, the area with the best lifestyle score, and \
                 the walkable and pet-friendly areas among them.",
    about = "Compare areas side by side"
)]
#[ortho_config(prefix = "NEIGHBORFIT")]
pub(crate) struct CompareArgs {
    /// Path to the JSON dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Identities of the areas to compare.
    #[arg(value_name = "id")]
    #[serde(default)]
    pub(crate) ids: Vec<AreaId>,
}

pub(crate) fn run_compare(args: CompareArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let dataset = require(merged.dataset, ARG_DATASET, ENV_COMPARE_DATASET)?;
    let comparison = open_service(&dataset)?.compare(&merged.ids)?;
    write_json(writer, &comparison)
}

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Recommend areas whose safety and lifestyle scores both lie \
                 within ten points of the mean of the user's favourites.",
    about = "Recommend areas similar to a user's favourites"
)]
#[ortho_config(prefix = "NEIGHBORFIT")]
pub(crate) struct RecommendArgs {
    /// Path to the JSON dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Identity of the user whose favourites seed the recommendation.
    #[arg(long = ARG_USER, value_name = "id")]
    #[serde(default)]
    pub(crate) user: Option<UserId>,
    /// Maximum number of results (default 5).
    #[arg(long, value_name = "n")]
    #[serde(default)]
    pub(crate) limit: Option<Limit>,
}

pub(crate) fn run_recommend(args: RecommendArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let dataset = require(merged.dataset, ARG_DATASET, ENV_RECOMMEND_DATASET)?;
    let user = require(merged.user, ARG_USER, ENV_RECOMMEND_USER)?;
    let limit = merged.limit.unwrap_or(DEFAULT_RECOMMEND_LIMIT);
    let recommendation = open_service(&dataset)?.recommendations(user, limit)?;
    write_json(writer, &recommendation)
}

/// CLI arguments for the `stats` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Report population-wide statistics")]
#[ortho_config(prefix = "NEIGHBORFIT")]
pub(crate) struct StatsArgs {
    /// Path to the JSON dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
}

pub(crate) fn run_stats(args: StatsArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let dataset = require(merged.dataset, ARG_DATASET, ENV_STATS_DATASET)?;
    let stats = open_service(&dataset)?.statistics()?;
    write_json(writer, &stats)
}

/// CLI arguments for the `cities` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "List the distinct cities in the dataset")]
#[ortho_config(prefix = "NEIGHBORFIT")]
pub(crate) struct CitiesArgs {
    /// Path to the JSON dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
}

pub(crate) fn run_cities(args: CitiesArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let dataset = require(merged.dataset, ARG_DATASET, ENV_CITIES_DATASET)?;
    let cities = open_service(&dataset)?.cities()?;
    write_json(writer, &cities)
}

/// CLI arguments for the `show` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Show a single area with its derived scores")]
#[ortho_config(prefix = "NEIGHBORFIT")]
pub(crate) struct ShowArgs {
    /// Path to the JSON dataset.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Identity of the area.
    #[arg(value_name = "id")]
    #[serde(default)]
    pub(crate) id: Option<AreaId>,
}

pub(crate) fn run_show(args: ShowArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let dataset = require(merged.dataset, ARG_DATASET, ENV_SHOW_DATASET)?;
    let id = require(merged.id, ARG_AREA_ID, ENV_SHOW_ID)?;
    let area = open_service(&dataset)?.area(id)?;
    write_json(writer, &area)
}

#[cfg(test)]
pub(crate) fn match_config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<MatchConfig, CliError> {
    let merged = MatchArgs::merge_from_layers(layers).map_err(CliError::from)?;
    MatchConfig::try_from(merged)
}
