//! Extends a seed alignment between two short DNA sequences and prints the
//! result. Run with `RUST_LOG=debug` to see the phase-by-phase tracing.

use tracing_subscriber::EnvFilter;
use xdrop_align::{seed_and_extend, Seed, ScoringScheme};

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let h = b"GGGGACGTACGTACGTACGTACGTACGTACGTACGTTTTT";
    let v = b"CCCCACGTACGTACGTACGTACGTACGTACGTACGTAAAA";

    let scoring = ScoringScheme::new(1, -1, -1);
    let seed = Seed::new(4, 36, 4, 36);
    let drop_off = 8;

    match seed_and_extend(h, v, &scoring, drop_off, &seed) {
        Ok(result) => {
            println!("best_score = {}", result.best_score);
            println!("exit_score = {}", result.exit_score);
            println!("H[{}, {})", result.beg_h, result.end_h);
            println!("V[{}, {})", result.beg_v, result.end_v);
        }
        Err(e) => eprintln!("alignment rejected: {e}"),
    }
}
