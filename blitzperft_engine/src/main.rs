extern crate blitzperft;
extern crate blitzperft_engine;

use std::env;
use std::process;
use std::sync::Arc;
use std::time::Instant;

use blitzperft::tools::stats;
use blitzperft::TranspositionTable;
use blitzperft_engine::{parse_args, print_usage, PerftPool};

fn main() {
    let params = match parse_args(env::args().skip(1)) {
        Ok(params) => params,
        Err(msg) => {
            eprintln!("{}", msg);
            print_usage();
            process::exit(1);
        }
    };

    let tt = if params.table_size_exp >= 0 {
        Some(Arc::new(TranspositionTable::new(
            params.table_size_exp.max(2) as u32,
        )))
    } else {
        None
    };

    if params.collect_stats {
        stats::enable();
    }
    stats::reset();

    let pool = PerftPool::new(params.workers, tt.clone());

    let start = Instant::now();
    let count = pool.perft(&params.position, params.depth);
    let elapsed = start.elapsed().as_secs_f64();
    let mnps = count as f64 / elapsed / 1.0e6;

    if params.collect_stats {
        print_stats(count, elapsed, mnps, tt.as_deref());
    } else {
        println!(
            "Node count = {} Time {:.3} s Speed: {:.3} Mnps",
            count, elapsed, mnps
        );
    }
}

fn print_stats(count: u64, elapsed: f64, mnps: f64, tt: Option<&TranspositionTable>) {
    println!(
        "Node count = {} Captures = {} EPs = {} Castles = {} Checkmates = {}",
        count,
        stats::captures(),
        stats::en_passants(),
        stats::castles(),
        stats::checkmates()
    );
    if let Some(table) = tt {
        let probes = stats::hash_probes();
        let hits = stats::hash_hits();
        let tries = stats::hash_write_tries();
        let writes = stats::hash_writes();
        println!(
            "Hash probes = {} Hash hits = {} Hash write tries = {} Hash writes = {}",
            probes, hits, tries, writes
        );
        let hit_rate = if probes > 0 {
            hits as f64 / probes as f64 * 100.0
        } else {
            0.0
        };
        let collision_rate = if tries > 0 {
            (tries - writes) as f64 / tries as f64 * 100.0
        } else {
            0.0
        };
        println!(
            "Hash table size {}k entries, read hit rate {:.3} %, write collision rate {:.3} %",
            table.num_entries() / 1024,
            hit_rate,
            collision_rate
        );
    }
    println!("Time {:.3} s Speed: {:.3} Mnps", elapsed, mnps);
}
