use clap::Parser;

use profitlayer_cli::{Args, run};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    profitlayer_observability::init_with(args.log_format);

    match run(&args)? {
        Some(snippet) => println!("{snippet}"),
        None => tracing::debug!(order_id = %args.order_id, "no profit event for order"),
    }
    Ok(())
}
