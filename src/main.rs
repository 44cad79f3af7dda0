use std::io::{self, Read};

use anyhow::{Context, bail};
use clap::Parser;
use snel_stream::command::StreamFactory;
use snel_stream::command::parser::parse_expression;
use snel_stream::engine::errors::StreamError;
use snel_stream::logging;
use snel_stream::shared::config::CONFIG;
use tracing::info;

#[derive(Parser)]
#[command(name = "snel_stream")]
#[command(about = "Build, explain and run stream expressions", long_about = None)]
struct Args {
    /// Expression to run, e.g. hashRollup(list(tuple(a=1,b=2)), over=a, sum(b))
    #[arg(short, long)]
    expr: Option<String>,

    /// Read the expression from stdin instead of the command line
    #[arg(long)]
    stdin: bool,

    /// Print the explanation tree as JSON instead of running the stream
    #[arg(long)]
    explain: bool,

    /// Print the canonical form of the expression instead of running it
    #[arg(long)]
    canonical: bool,
}

fn read_expression(args: &Args) -> anyhow::Result<String> {
    if args.stdin {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read expression from stdin")?;
        return Ok(text);
    }
    match &args.expr {
        Some(expr) => Ok(expr.clone()),
        None => bail!("no expression given; use --expr or --stdin"),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init()?;

    let text = read_expression(&args)?;
    let factory = StreamFactory::new()
        .with_builtins()
        .with_rollup_group_limit(CONFIG.rollup.group_limit);

    let expression = parse_expression(&text)
        .map_err(StreamError::from)
        .inspect_err(|e| e.log_error())?;
    let mut stream = factory
        .construct_stream(&expression)
        .inspect_err(|e| e.log_error())?;

    if args.canonical {
        println!("{}", stream.to_expression(&factory)?);
        return Ok(());
    }

    if args.explain {
        let explanation = stream.to_explanation(&factory)?;
        println!("{}", serde_json::to_string_pretty(&explanation)?);
        return Ok(());
    }

    info!("Running {}", expression);
    stream.open()?;
    loop {
        let tuple = stream.read()?;
        println!("{}", serde_json::to_string(&tuple)?);
        if tuple.is_eof() {
            break;
        }
    }
    stream.close()?;

    Ok(())
}
