//! synthetic — hot-route extraction over a seeded street grid.
//!
//! Commuters drive three corridors of a 9 × 9 grid over downtown Mobile,
//! Alabama while background traffic wanders at random.  FlowScan recovers
//! the corridors as hot routes; each route is exported as a track with
//! traffic-signal markers.
//!
//! `RUST_LOG=debug cargo run -p synthetic` shows per-route scan output.

mod network;

use std::io::Write;
use std::time::Instant;

use anyhow::{Result, bail};
use log::info;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use hr_core::{ConnectionId, NodeId, TrajectoryId};
use hr_export::{SignalIndex, TrackBuilder, TrackObserver};
use hr_scan::{FlowScan, ScanConfig};

use network::{GridNetwork, build_grid};

// ── Constants ─────────────────────────────────────────────────────────────────

const SIDE:           usize = 9;
const SEED:           u64   = 42;
const COMMUTERS:      usize = 12;  // per corridor
const MIN_SPAN:       usize = 4;   // blocks driven by one commuter, at least
const WANDERERS:      usize = 60;
const WALK_LEN:       usize = 6;
const EPS:            u32   = 4;
const MIN_TRAFFIC:    u32   = 4;

// ── Trajectory generation ─────────────────────────────────────────────────────

/// A contiguous stretch of `corridor`, at least `MIN_SPAN` blocks long.
fn commute(corridor: &[ConnectionId], rng: &mut SmallRng) -> Vec<ConnectionId> {
    let span = rng.gen_range(MIN_SPAN..=corridor.len());
    let start = rng.gen_range(0..=corridor.len() - span);
    corridor[start..start + span].to_vec()
}

/// A random walk of up to `WALK_LEN` connections from a random node.
fn wander(net: &GridNetwork, rng: &mut SmallRng) -> Vec<ConnectionId> {
    let mut at = NodeId(rng.gen_range(0..net.out.len() as u32));
    let mut path = Vec::with_capacity(WALK_LEN);
    for _ in 0..WALK_LEN {
        let out = &net.out[at.index()];
        if out.is_empty() {
            break;
        }
        let conn = out[rng.gen_range(0..out.len())];
        path.push(conn);
        at = net.head[conn.index()];
    }
    path
}

/// Record commuters on three corridors (avenues 2 and 6 eastbound, column 4
/// southbound) plus background wanderers.  Returns the trajectory count.
fn populate(net: &mut GridNetwork, rng: &mut SmallRng) -> Result<u64> {
    let corridors = [net.rows[2].clone(), net.rows[6].clone(), net.cols[4].clone()];
    let mut next = 0u64;
    for corridor in &corridors {
        for _ in 0..COMMUTERS {
            let path = commute(corridor, rng);
            net.builder.record_trajectory(TrajectoryId(next), &path)?;
            next += 1;
        }
    }
    for _ in 0..WANDERERS {
        let path = wander(net, rng);
        net.builder.record_trajectory(TrajectoryId(next), &path)?;
        next += 1;
    }
    Ok(next)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    println!("=== synthetic — hot route extraction ===");
    println!("Grid: {SIDE}×{SIDE}  |  Commuters: {COMMUTERS}/corridor  |  Wanderers: {WANDERERS}  |  Seed: {SEED}");
    println!();

    // 1. Street grid.
    let mut net = build_grid(SIDE)?;
    let mut rng = SmallRng::seed_from_u64(SEED);

    // 2. Trajectories.
    let recorded = populate(&mut net, &mut rng)?;
    info!("recorded {recorded} trajectories");

    // 3. Observed speeds run below the posted limit.
    for (i, &posted) in net.speed.iter().enumerate() {
        net.builder.set_avg_speed(ConnectionId(i as u32), posted * rng.gen_range(0.6..1.0))?;
    }

    let signals = SignalIndex::new(net.signals.iter().copied());
    let graph = net.builder.build();
    println!(
        "Road graph: {} nodes, {} connections, {} signals",
        graph.node_count(),
        graph.connection_count(),
        signals.len()
    );
    if let Some(corner) = graph.node_by_source_id(1_000_000) {
        println!("Source node 1000000 → {corner} at {}", graph.node(corner)?.pos);
    }
    println!();

    // 4. Scan.
    let scan = FlowScan::new(ScanConfig::new(EPS, MIN_TRAFFIC));
    let mut obs = TrackObserver::new(TrackBuilder::with_signals(signals));
    let t0 = Instant::now();
    let clustering = scan.scan(&graph, &mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("export error: {e}");
    }

    // 5. Summary.
    println!("Scan ({}) complete in {:.3} ms", scan.config(), elapsed.as_secs_f64() * 1e3);
    println!("  {}", clustering.summary());
    println!();
    if clustering.routes().is_empty() {
        bail!("no hot routes found with {}", scan.config());
    }

    println!(
        "{:<10} {:>6} {:>6} {:>10} {:>8} {:>8} {:>8}",
        "Route", "Conns", "Core", "Length km", "Trajs", "Points", "Signals"
    );
    println!("{}", "-".repeat(62));
    let tracks = obs.into_tracks();
    for route in clustering.routes() {
        let (points, signals) = tracks
            .iter()
            .find(|t| t.route == route.id())
            .map_or((0, 0), |t| (t.point_count(), t.signal_count()));
        println!(
            "{:<10} {:>6} {:>6} {:>10.2} {:>8} {:>8} {:>8}",
            route.id().to_string(),
            route.len(),
            route.core_count(),
            route.length_m(&graph) / 1_000.0,
            route.trajectories(&graph).len(),
            points,
            signals,
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corridors_become_hot_routes() {
        let mut net = build_grid(SIDE).unwrap();
        let mut rng = SmallRng::seed_from_u64(SEED);
        populate(&mut net, &mut rng).unwrap();
        let corridors: Vec<ConnectionId> = [&net.rows[2], &net.rows[6], &net.cols[4]]
            .into_iter()
            .flatten()
            .copied()
            .collect();

        let graph = net.builder.build();
        let routes = FlowScan::run(&graph, EPS, MIN_TRAFFIC).unwrap();
        assert_eq!(routes.len(), 3);
        for route in &routes {
            assert!(route.core_count() > 0);
            assert!(corridors.contains(&route.members()[0]), "{} seeded off-corridor", route.id());
        }
    }
}
