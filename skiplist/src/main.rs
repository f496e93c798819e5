use std::collections::BTreeSet;

use anyhow::{ensure, Result};
use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};
use skiplist::{Config, SkipList};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "skiplist", about = "Exercise a skip list with random integers")]
struct Opt {
    /// Number of random draws; duplicates are dropped
    #[structopt(short = "n", long, default_value = "10")]
    count: usize,
    /// Values are drawn from 0..upper-bound
    #[structopt(short, long, default_value = "100")]
    upper_bound: i32,
    #[structopt(short = "l", long, default_value = "10")]
    max_layers: usize,
    /// Seed for both the data and the skip list
    #[structopt(short, long)]
    seed: Option<u64>,
}

fn random_ints(rng: &mut StdRng, n: usize, upper_bound: i32) -> BTreeSet<i32> {
    (0..n).map(|_| rng.gen_range(0..upper_bound)).collect()
}

fn print_values(values: &BTreeSet<i32>) {
    for v in values {
        print!("{}\t", v);
    }
    println!();
}

fn main() -> Result<()> {
    env_logger::init();
    let opt = Opt::from_args();
    ensure!(opt.upper_bound > 0, "upper bound must be positive");

    let mut config = Config::new().max_layers(opt.max_layers);
    let mut rng = match opt.seed {
        Some(seed) => {
            config = config.seed(seed);
            StdRng::seed_from_u64(seed.wrapping_add(1))
        }
        None => StdRng::from_entropy(),
    };
    let mut list = SkipList::with_config(config)?;

    let a = random_ints(&mut rng, opt.count, opt.upper_bound);
    info!("inserting {} distinct values", a.len());
    list.extend(a.iter().copied());
    print_values(&a);

    println!("\n# of layers:\n    {}", list.layer_histogram());
    println!("\nVisualize the skip list:\n{}", list);

    let b = random_ints(&mut rng, opt.count, opt.upper_bound);
    print_values(&b);
    println!("\nSearching:");
    for v in &b {
        match list.search(v) {
            Some(node) => print!("{}\t", node.item()),
            None => {
                print!("N/A\t");
                ensure!(!a.contains(v), "{} was inserted but not found", v);
            }
        }
    }
    println!();

    for v in &a {
        ensure!(list.contains(v), "{} missing before removal", v);
        list.remove(v);
        ensure!(!list.contains(v), "{} still present after removal", v);
    }
    list.validate()?;
    info!("all values removed, {} left", list.len());
    // an empty list draws nothing
    print!("{}", list);
    Ok(())
}
