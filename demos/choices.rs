use mtcrack::gf2::Form;
use mtcrack::recover::{Config, Recovery};
use std::collections::HashMap;
use std::env;
use std::fs;
use tracing_subscriber::EnvFilter;

/// Each character of the input was picked as `alphabet[getrandbits(5)]`,
/// followed by one discarded draw. Prints the alphabet in index order.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = env::args().nth(1).unwrap_or_else(|| "output.txt".to_string());
    let file = fs::read_to_string(&path).expect("file missing");
    let chars = file.split_whitespace().next().expect("empty input");

    let mut recovery = Recovery::new(Config::default());
    let mut draws: HashMap<char, Vec<Form>> = HashMap::new();
    for c in chars.chars() {
        let draw = recovery.draw_bits(5);
        recovery.skip(1);
        match draws.get(&c) {
            Some(first) => recovery
                .constrain_equal(first, &draw)
                .expect("draws contradict"),
            None => {
                draws.insert(c, draw);
            }
        }
    }
    println!("rank: {}", recovery.rank());
    let solution = recovery.solution().expect("not enough characters");

    let mut alphabet = [' '; 32];
    for (c, draw) in draws.iter() {
        let idx: usize = solution
            .evaluate_bits(draw)
            .try_into()
            .expect("5-bit index");
        alphabet[idx] = *c;
    }
    println!("{}", alphabet.iter().collect::<String>());
}
