use mtcrack::mersenne::N32;
use mtcrack::recover::{verify, Config, Recovery};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .expect("could not read stdin");
    let observed: Vec<u32> = input
        .split_whitespace()
        .map(|s| s.parse().expect("not a 32-bit word"))
        .collect();

    let mut recovery = Recovery::new(Config::default());
    for &value in observed.iter().take(N32) {
        recovery.observe_word(value).expect("observations contradict");
    }
    let solution = recovery.solution().expect("not enough observations");
    let report = verify(solution, &observed);
    for i in report.mismatches.iter() {
        println!("!{}", i);
    }
    println!("OK {} items", report.checked);
}
