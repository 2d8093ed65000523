//! grid-walk — round-trip and point-to-point walk suggestions on a
//! synthetic downtown grid.
//!
//! Usage: `grid-walk [search-config.json]`.  Set `RUST_LOG=debug` to see
//! each search stage.

mod network;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use wr_core::{GeoPoint, SearchConfig};
use wr_network::{build_network_with_stats, CostModel, RawNetwork, WalkNetwork};
use wr_search::{Planner, WalkPlan, WalkRequest};

// ── Constants ─────────────────────────────────────────────────────────────────

const LOOP_DISTANCE_M: f64 = 2_000.0;
const A_TO_B_DISTANCE_M: f64 = 1_500.0;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_config(path: Option<&str>) -> Result<SearchConfig> {
    let Some(path) = path else {
        return Ok(SearchConfig::default());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let config: SearchConfig = serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    config.validate()?;
    Ok(config)
}

fn build(raw: &RawNetwork, cost: &CostModel) -> Result<WalkNetwork> {
    let (network, stats) = build_network_with_stats(raw, cost)?;
    info!(
        model = %cost.name,
        nodes = network.node_count(),
        edges = network.edge_count(),
        skipped = stats.missing_node,
        "walk network built"
    );
    Ok(network)
}

/// Plan `request` on the preferred network; if nothing comes back, retry on
/// a network built with the relaxed cost model.
fn plan_with_fallback(
    raw:     &RawNetwork,
    config:  &SearchConfig,
    request: &WalkRequest,
) -> Result<(WalkNetwork, WalkPlan)> {
    let preferred = build(raw, &CostModel::preferred())?;
    let plan = Planner::new(&preferred, config.clone())?.plan(request)?;
    if !plan.routes.is_empty() {
        return Ok((preferred, plan));
    }

    warn!("no routes on the preferred network, relaxing the cost model");
    let relaxed = build(raw, &CostModel::relaxed())?;
    let plan = Planner::new(&relaxed, config.clone())?.plan(request)?;
    Ok((relaxed, plan))
}

fn print_plan(title: &str, network: &WalkNetwork, plan: &WalkPlan) {
    println!("{title}");
    println!(
        "  start snapped {:.1} m to {}  |  {} candidates, {} unmatched legs, outward {:?}",
        plan.start_snap_m, plan.start_node, plan.candidates, plan.unmatched_legs, plan.outward_status,
    );
    println!("  {:<4} {:>9} {:>9} {:>6}  {}", "#", "length m", "cost", "edges", "streets");
    println!("  {}", "-".repeat(72));
    for (i, route) in plan.routes.iter().enumerate() {
        println!(
            "  {:<4} {:>9.0} {:>9.0} {:>6}  {}",
            i + 1,
            route.length_m,
            route.cost,
            route.edges.len(),
            route.way_names(network).join(" → "),
        );
    }
    if plan.routes.is_empty() {
        println!("  (no routes)");
    }
    println!();
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let arg = std::env::args().nth(1);
    let config = load_config(arg.as_deref())?;

    println!("=== grid-walk — walking route suggestions ===");
    println!(
        "Grid: {} × {} intersections  |  tolerance ±{:.0}%  |  up to {} routes",
        network::ROWS,
        network::COLS,
        config.tolerance * 100.0,
        config.max_routes,
    );
    println!();

    let raw = network::build_raw();

    // 1. Round trip from near Bienville Square.
    let (lat, lon) = network::position(2, 2);
    let start = GeoPoint::new(lat + 0.00003, lon - 0.00002);
    let request = WalkRequest::round_trip(start, LOOP_DISTANCE_M);

    let t0 = Instant::now();
    let (net, plan) = plan_with_fallback(&raw, &config, &request)?;
    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "round trip planned");
    print_plan(&format!("Round trip, {LOOP_DISTANCE_M:.0} m"), &net, &plan);

    // 2. Point-to-point toward the river, with and without a bearing hint.
    let (flat, flon) = network::position(4, 5);
    let finish = GeoPoint::new(flat, flon);
    let planner = Planner::new(&net, config.clone())?;
    let requests = [
        WalkRequest::point_to_point(start, finish, A_TO_B_DISTANCE_M),
        WalkRequest::round_trip(start, LOOP_DISTANCE_M).with_bearing(90.0),
    ];
    let results = planner.plan_many(&requests)?;
    let titles = [
        format!("To Royal Street, {A_TO_B_DISTANCE_M:.0} m"),
        format!("Round trip heading east, {LOOP_DISTANCE_M:.0} m"),
    ];
    for (title, result) in titles.iter().zip(results) {
        match result {
            Ok(plan) => print_plan(title, &net, &plan),
            Err(e) => warn!(%e, "{title}: planning failed"),
        }
    }

    // 3. Export the round-trip geometry for a map viewer.
    let out_dir = Path::new("output/grid-walk");
    std::fs::create_dir_all(out_dir)?;
    let features: Vec<_> = plan
        .routes
        .iter()
        .map(|r| {
            serde_json::json!({
                "length_m": r.length_m,
                "cost": r.cost,
                "streets": r.way_names(&net),
                "coordinates": r.geometry(&net),
            })
        })
        .collect();
    let path = out_dir.join("round_trip.json");
    std::fs::write(&path, serde_json::to_string_pretty(&features)?)?;
    println!("Wrote {} routes to {}", features.len(), path.display());

    Ok(())
}
