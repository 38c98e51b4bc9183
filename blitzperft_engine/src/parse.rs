//! Command-line parsing for the perft driver.

use blitzperft::Position;

use crate::consts::{DEFAULT_TABLE_SIZE_EXP, DEFAULT_WORKER_THREADS};

/// Everything a run needs: depth, table size, worker count, statistics
/// switch and the starting position.
pub struct PerftParams {
    /// Search depth; non-negative, defaults to 1.
    pub depth: u16,
    /// log2 of the transposition-table entry count; negative disables the
    /// table.
    pub table_size_exp: i32,
    /// Worker-thread count; 0 selects one worker per logical CPU.
    pub workers: usize,
    /// Print the extra statistics report.
    pub collect_stats: bool,
    /// Starting position, from `-f` or the standard initial position.
    pub position: Position,
}

impl Default for PerftParams {
    fn default() -> PerftParams {
        PerftParams {
            depth: 1,
            table_size_exp: DEFAULT_TABLE_SIZE_EXP,
            workers: DEFAULT_WORKER_THREADS,
            collect_stats: false,
            position: Position::start_pos(),
        }
    }
}

/// Parses the command-line arguments (without the program name).
pub fn parse_args<I>(mut args: I) -> Result<PerftParams, String>
where
    I: Iterator<Item = String>,
{
    let mut params = PerftParams::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-d" => {
                let v = args.next().ok_or("-d requires a depth")?;
                params.depth = v
                    .parse()
                    .map_err(|_| format!("bad depth '{}'", v))?;
            }
            "-h" => {
                let v = args.next().ok_or("-h requires a size exponent")?;
                params.table_size_exp = v
                    .parse()
                    .map_err(|_| format!("bad hash table size '{}'", v))?;
            }
            "-w" => {
                let v = args.next().ok_or("-w requires a worker count")?;
                let workers: usize = v
                    .parse()
                    .map_err(|_| format!("bad worker count '{}'", v))?;
                params.workers = if workers == 0 {
                    num_cpus::get()
                } else {
                    workers
                };
            }
            "-s" => params.collect_stats = true,
            "-f" => {
                let v = args.next().ok_or("-f requires a FEN string")?;
                params.position = Position::from_fen(&v)
                    .map_err(|e| format!("bad FEN '{}': {}", v, e))?;
            }
            other => return Err(format!("unknown option '{}'", other)),
        }
    }

    Ok(params)
}

/// Prints the usage text.
pub fn print_usage() {
    println!("Usage:");
    println!("\tblitzperft <options>");
    println!("Supported options:");
    println!("\t-d <depth>      Depth at which to count leaf nodes. Default is 1.");
    println!("\t-h <size>       Hash table size as an exponent of 2.");
    println!("\t                E.g. -h 20 gives 2^20 = 1048576 hash table entries.");
    println!(
        "\t                Default is {}. A negative value disables the table.",
        DEFAULT_TABLE_SIZE_EXP
    );
    println!(
        "\t-w <workers>    Number of worker threads. Default is {}; 0 uses all CPUs.",
        DEFAULT_WORKER_THREADS
    );
    println!("\t-s              Print extra stats about moves and the hash table.");
    println!("\t-f \"<FEN>\"      Position in FEN notation. Remember the quotes.");
}
