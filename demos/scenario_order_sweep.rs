/// Scenario: Order Sweep
///
/// Pushes a seeded stream of orders through the pack service and reports
/// how much each pack-size set over-ships.
///
/// Run with: cargo run --release --example scenario_order_sweep [-- --csv]
/// Log with: RUST_LOG=packsize=debug
use packsize::config::ServiceConfig;
use packsize::service::PackService;
use packsize::workload::{OrderDistribution, OrderStream};
use serde::Serialize;
use std::error::Error;
use std::io;
use tracing_subscriber::EnvFilter;

const NUM_ORDERS: usize = 2_000;
const SEED: u64 = 42;

// ============================================================================
// Scenario: Order Sweep
// ============================================================================
//
// WHAT IT DOES:
// - Configures the service from JSON, once per pack-size set
// - Draws log-normal order quantities (many small orders, a long tail)
// - Allocates every order and aggregates excess and pack counts
//
// WHAT TO LOOK FOR:
// - Sets whose sizes are multiples of each other over-ship in steps of the
//   smallest size
// - Coprime sets ({23, 31, 53}) reach most totals exactly once orders are
//   large enough
// ============================================================================

const SCENARIOS: [(&str, &str); 3] = [
    (
        "standard",
        r#"{ "pack_sizes": [250, 500, 1000, 2000, 5000], "max_order_quantity": 200000 }"#,
    ),
    (
        "non_multiple",
        r#"{ "pack_sizes": [5, 12], "max_order_quantity": 200000 }"#,
    ),
    (
        "coprime",
        r#"{ "pack_sizes": [23, 31, 53], "max_order_quantity": 200000 }"#,
    ),
];

#[derive(Serialize)]
struct Row<'a> {
    scenario: &'a str,
    order: u32,
    total: u64,
    excess: u64,
    packs: u64,
}

#[derive(Default)]
struct Totals {
    orders: u64,
    exact: u64,
    ordered: u64,
    excess: u64,
    packs: u64,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let emit_csv = std::env::args().any(|arg| arg == "--csv");
    let mut csv = emit_csv.then(|| csv::Writer::from_writer(io::stdout()));

    if !emit_csv {
        println!("=== Scenario: Order Sweep ({} orders) ===\n", NUM_ORDERS);
        println!(
            "{:<14} | {:>8} | {:>10} | {:>10} | {:>10}",
            "Sizes", "Exact %", "Avg excess", "Excess %", "Avg packs"
        );
        println!("{:-<64}", "");
    }

    for (name, json) in SCENARIOS {
        let service = PackService::with_config(ServiceConfig::from_json_str(json)?)?;
        let dist = OrderDistribution::LogNormal {
            mu: 7.0,
            sigma: 1.2,
            max: service.max_order_quantity(),
        };

        let mut totals = Totals::default();
        for order in OrderStream::new(dist, SEED)?.take(NUM_ORDERS) {
            let allocation = service.calculate_allocation(i64::from(order))?;

            totals.orders += 1;
            totals.ordered += u64::from(order);
            totals.excess += allocation.excess();
            totals.packs += allocation.pack_count();
            if allocation.excess() == 0 {
                totals.exact += 1;
            }

            if let Some(writer) = csv.as_mut() {
                writer.serialize(Row {
                    scenario: name,
                    order,
                    total: allocation.total_items(),
                    excess: allocation.excess(),
                    packs: allocation.pack_count(),
                })?;
            }
        }

        if !emit_csv {
            print_totals(name, &totals);
        }
    }

    if let Some(mut writer) = csv {
        writer.flush()?;
    }
    Ok(())
}

fn print_totals(name: &str, totals: &Totals) {
    let orders = totals.orders.max(1) as f64;
    println!(
        "{:<14} | {:>7.1}% | {:>10.1} | {:>9.2}% | {:>10.2}",
        name,
        100.0 * totals.exact as f64 / orders,
        totals.excess as f64 / orders,
        100.0 * totals.excess as f64 / totals.ordered.max(1) as f64,
        totals.packs as f64 / orders,
    );
}
