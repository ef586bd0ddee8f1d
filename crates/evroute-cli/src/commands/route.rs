//! Route command handler for computing battery-feasible paths.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tracing::{debug, info};

use evroute_lib::{
    plan_route, ChargerSet, DistanceMetric, Error as RouteError, NodeId, RoadNetwork,
    RouteAlgorithm, RouteRequest, RouteSummary, SearchConfig,
};

use evroute_cli::output::OutputFormat;

/// Arguments for the route command.
#[derive(Debug, Clone, Args)]
pub struct RouteCommandArgs {
    /// Road network JSON document.
    #[arg(long)]
    pub network: PathBuf,
    /// Charger list JSON document.
    #[arg(long)]
    pub chargers: Option<PathBuf>,
    /// Keep only the first N chargers of the list.
    #[arg(long)]
    pub max_chargers: Option<usize>,
    /// Origin node id.
    #[arg(long = "from")]
    pub from: NodeId,
    /// Destination node id.
    #[arg(long = "to")]
    pub to: NodeId,
    /// Algorithm to use when planning the route.
    #[arg(long, value_enum, default_value_t = AlgorithmArg::AStar)]
    pub algorithm: AlgorithmArg,
    /// Distance metric driving the heuristic.
    #[arg(long, value_enum, default_value_t = MetricArg::Euclidean)]
    pub metric: MetricArg,
    /// Battery capacity (kWh).
    #[arg(long, default_value_t = 5.0)]
    pub capacity: f64,
    /// Charge at departure (kWh); defaults to a full battery.
    #[arg(long)]
    pub initial_charge: Option<f64>,
    /// Consumption for edges without an explicit cost (kWh/km).
    #[arg(long, default_value_t = 1.2)]
    pub rate: f64,
    /// Lower bound on consumption used by the heuristic (kWh/km); defaults to
    /// --gamma when set, else --rate.
    #[arg(long)]
    pub min_rate: Option<f64>,
    /// Energy added by one recharge (kWh).
    #[arg(long, default_value_t = 4.5)]
    pub recharge: f64,
    /// Battery discretization step (kWh).
    #[arg(long, default_value_t = 0.1)]
    pub step: f64,
    /// Frontier pops allowed before a greedy search gives up.
    #[arg(long, default_value_t = evroute_lib::search::DEFAULT_ITERATION_CAP)]
    pub iteration_cap: usize,
    /// Replace every edge cost with `gamma × length_km`.
    #[arg(long)]
    pub gamma: Option<f64>,
    /// Include battery levels and recharge markers for each step.
    #[arg(long)]
    pub trace: bool,
}

/// `--algorithm` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    AStar,
    Dijkstra,
    Greedy,
}

impl From<AlgorithmArg> for RouteAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::AStar => RouteAlgorithm::AStar,
            AlgorithmArg::Dijkstra => RouteAlgorithm::Dijkstra,
            AlgorithmArg::Greedy => RouteAlgorithm::Greedy,
        }
    }
}

/// `--metric` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricArg {
    Euclidean,
    Manhattan,
    Octile,
}

impl From<MetricArg> for DistanceMetric {
    fn from(value: MetricArg) -> Self {
        match value {
            MetricArg::Euclidean => DistanceMetric::Euclidean,
            MetricArg::Manhattan => DistanceMetric::Manhattan,
            MetricArg::Octile => DistanceMetric::Octile,
        }
    }
}

impl RouteCommandArgs {
    /// Search parameters described by the flags.
    pub fn to_config(&self) -> SearchConfig {
        SearchConfig {
            max_capacity: self.capacity,
            initial_charge: self.initial_charge.unwrap_or(self.capacity),
            consumption_rate: self.rate,
            min_consumption_rate: self.min_rate.unwrap_or_else(|| self.default_min_rate()),
            recharge_amount: self.recharge,
            step: self.step,
            metric: self.metric.into(),
            iteration_cap: self.iteration_cap,
        }
    }

    /// `--gamma` rewrites every edge cost to `gamma × km`, so it is the exact
    /// per-km lower bound and `--rate` no longer applies.
    fn default_min_rate(&self) -> f64 {
        self.gamma.unwrap_or(self.rate)
    }

    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest::new(self.from, self.to, self.algorithm.into())
            .with_config(self.to_config())
            .with_trace(self.trace)
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(args: &RouteCommandArgs, format: OutputFormat) -> Result<()> {
    let mut network = RoadNetwork::from_json_path(&args.network)
        .with_context(|| format!("failed to load road network from {}", args.network.display()))?;
    if let Some(gamma) = args.gamma {
        network = network
            .with_energy_costs(gamma)
            .context("failed to apply --gamma")?;
    }

    let chargers = load_chargers(args, &network)?;
    info!(
        nodes = network.node_count(),
        edges = network.edge_count(),
        chargers = chargers.len(),
        "network ready"
    );

    let request = args.to_request();
    let plan = match plan_route(&network, &chargers, &request) {
        Ok(plan) => plan,
        Err(err) => return Err(handle_route_failure(&request, &chargers, err)),
    };
    debug!(
        energy = plan.total_energy,
        expanded = plan.nodes_expanded,
        recharges = plan.recharges,
        "route planned"
    );

    let summary = RouteSummary::from_plan(&plan)
        .context("failed to build route summary for display")?;
    format.render_route_result(&summary, args.capacity)
}

fn load_chargers(args: &RouteCommandArgs, network: &RoadNetwork) -> Result<ChargerSet> {
    let Some(path) = args.chargers.as_deref() else {
        return Ok(ChargerSet::new());
    };
    let mut chargers = ChargerSet::from_json_path(path)
        .with_context(|| format!("failed to load chargers from {}", path.display()))?;
    chargers.retain_known(network);
    if let Some(max) = args.max_chargers {
        chargers.truncate(max);
    }
    Ok(chargers)
}

fn handle_route_failure(
    request: &RouteRequest,
    chargers: &ChargerSet,
    err: RouteError,
) -> anyhow::Error {
    match err {
        RouteError::UnknownNode { id } => {
            anyhow::anyhow!("Unknown node '{id}'. Check --from and --to against the network.")
        }
        RouteError::RouteNotFound {
            origin,
            destination,
        } => anyhow::anyhow!(format_route_not_found_message(
            origin,
            destination,
            &request.config,
            chargers.len()
        )),
        RouteError::SearchAbandoned { iterations, .. } => anyhow::anyhow!(
            "Greedy search gave up after {iterations} iterations. \
             Retry with --algorithm a-star or a larger --iteration-cap."
        ),
        RouteError::InvalidParameter { name, message } => {
            anyhow::anyhow!("Invalid value for {}: {message}", flag_for(name))
        }
        other => anyhow::Error::new(other),
    }
}

fn format_route_not_found_message(
    origin: NodeId,
    destination: NodeId,
    config: &SearchConfig,
    charger_count: usize,
) -> String {
    let mut message = format!(
        "No feasible route from {origin} to {destination} with a {:.1} kWh battery",
        config.max_capacity
    );
    if charger_count == 0 {
        message.push_str(" and no chargers.");
        message.push_str(" Try passing --chargers or raising --capacity.");
    } else {
        message.push_str(&format!(
            " and {charger_count} charger(s). Try raising --capacity or --recharge."
        ));
    }
    message
}

/// CLI flag that sets the named search parameter.
fn flag_for(name: &str) -> &str {
    match name {
        "max_capacity" => "--capacity",
        "initial_charge" => "--initial-charge",
        "consumption_rate" => "--rate",
        "min_consumption_rate" => "--min-rate",
        "recharge_amount" => "--recharge",
        "step" => "--step",
        "iteration_cap" => "--iteration-cap",
        "gamma" => "--gamma",
        other => other,
    }
}
