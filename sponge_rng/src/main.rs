// CLI entry point for eyeballing generator output.
//
// Seeds one generator and prints its initial state followed by a handful of
// draws from each sampling call, so a change to seeding or to a generator's
// step function shows up as a diff in this output.
//
// Usage:
//   rng_dump [OPTIONS]
//     --kind <KIND>        chacha | well1024a | lfib4 (default: chacha)
//     --rounds <N>         ChaCha rounds (default: 12)
//     --seed <A,B,...>     Comma-separated seed integers (default: 12345)
//     --config <PATH>      Read a JSON GeneratorConfig instead of the flags
//     --all                Dump every generator kind with the same seed

use sponge_rng::seq::sample;
use sponge_rng::{AnyGenerator, ConfigError, Generator, GeneratorConfig, GeneratorKind, Sampling};

const DRAWS: usize = 10;
const URN: [i32; 8] = [1, 2, 4, 5, 6, 7, 8, 9];

fn main() {
    for config in parse_args() {
        if let Err(e) = dump(&config) {
            eprintln!("Failed to dump {:?}: {e}", config.kind);
            std::process::exit(1);
        }
    }
}

fn dump(config: &GeneratorConfig) -> Result<(), ConfigError> {
    let mut rng: AnyGenerator = config.build()?;
    let name = rng.name();

    println!("{name} initial state:");
    let state: Vec<String> = rng.state_words().iter().map(u32::to_string).collect();
    println!("{}", state.join(" "));

    println!("{name} doubles:");
    for _ in 0..DRAWS {
        println!("{}", rng.random_double());
    }
    println!("{name} dice rolls:");
    for _ in 0..DRAWS {
        println!("{}", rng.random_in_range(1, 6)?);
    }
    println!("{name} indices:");
    for _ in 0..DRAWS {
        println!("{}", rng.random_index(4)?);
    }
    println!("{name} urn:");
    for _ in 0..DRAWS {
        let picked: Vec<String> = sample(&URN, 5, &mut rng)?
            .iter()
            .map(i32::to_string)
            .collect();
        println!("{}", picked.join(", "));
    }
    println!();
    Ok(())
}

/// Parse command-line arguments. Uses simple `std::env::args()` matching,
/// with no argument-parsing dependency. Returns the configs to dump.
fn parse_args() -> Vec<GeneratorConfig> {
    let mut config = GeneratorConfig::new(GeneratorKind::ChaCha, vec![12345]);
    let mut all = false;
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--kind" => {
                i += 1;
                config.kind = args
                    .get(i)
                    .and_then(|s| GeneratorKind::from_name(s))
                    .unwrap_or_else(|| {
                        eprintln!("--kind requires one of: chacha, well1024a, lfib4");
                        std::process::exit(1);
                    });
            }
            "--rounds" => {
                i += 1;
                config.chacha_rounds =
                    args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                        eprintln!("--rounds requires a valid number");
                        std::process::exit(1);
                    });
            }
            "--seed" => {
                i += 1;
                config.seed = args.get(i).and_then(|s| parse_seed(s)).unwrap_or_else(|| {
                    eprintln!("--seed requires comma-separated integers");
                    std::process::exit(1);
                });
            }
            "--config" => {
                i += 1;
                let Some(path) = args.get(i) else {
                    eprintln!("--config requires a path");
                    std::process::exit(1);
                };
                return vec![load_config(path)];
            }
            "--all" => all = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if all {
        return GeneratorKind::ALL
            .iter()
            .map(|&kind| GeneratorConfig {
                kind,
                ..config.clone()
            })
            .collect();
    }
    vec![config]
}

fn parse_seed(s: &str) -> Option<Vec<i32>> {
    s.split(',').map(|part| part.trim().parse().ok()).collect()
}

fn load_config(path: &str) -> GeneratorConfig {
    let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Failed to read {path}: {e}");
        std::process::exit(1);
    });
    GeneratorConfig::from_json(&text).unwrap_or_else(|e| {
        eprintln!("Failed to parse {path}: {e}");
        std::process::exit(1);
    })
}

fn print_usage() {
    println!("Usage: rng_dump [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --kind <KIND>        chacha | well1024a | lfib4 (default: chacha)");
    println!("  --rounds <N>         ChaCha rounds (default: 12)");
    println!("  --seed <A,B,...>     Comma-separated seed integers (default: 12345)");
    println!("  --config <PATH>      Read a JSON generator config");
    println!("  --all                Dump every generator kind with the same seed");
    println!("  --help, -h           Show this help");
}
