use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use log::info;

use robdd_equiv::dot::DotConfig;
use robdd_equiv::expr::Expr;
use robdd_equiv::ordering::VariableOrdering;
use robdd_equiv::session::Session;

#[derive(Debug, Parser)]
#[command(author, version, about = "Check two boolean formulas for equivalence")]
struct Cli {
    /// Variable ordering, e.g. "A B C". Asked for on stdin if absent.
    #[arg(long, value_name = "NAMES")]
    order: Option<String>,

    /// First formula in postfix notation, e.g. "A B AND".
    #[arg(value_name = "LHS")]
    lhs: Option<String>,

    /// Second formula in postfix notation, e.g. "A B OR".
    #[arg(value_name = "RHS")]
    rhs: Option<String>,

    /// Directory to write `robdd1.dot` and `robdd2.dot` into.
    #[arg(long, value_name = "DIR")]
    dot_dir: Option<PathBuf>,

    /// Node table size (in bits, so the initial capacity is `2^size` nodes).
    #[arg(long, value_name = "INT", default_value = "16", value_parser = clap::value_parser!(u8).range(0..=31))]
    size: u8,

    /// Log every node and apply step.
    #[arg(short, long)]
    verbose: bool,
}

/// Return `arg`, or read one line from stdin after printing `prompt`.
fn arg_or_prompt(arg: Option<String>, prompt: &str) -> io::Result<String> {
    if let Some(arg) = arg {
        return Ok(arg);
    }
    println!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let order = arg_or_prompt(args.order, "Enter the variable ordering (e.g., A B C):")?;
    let ordering: VariableOrdering = order.parse()?;
    let lhs = arg_or_prompt(args.lhs, "Enter the first Boolean function in RPN (e.g., A B AND):")?;
    let lhs: Expr = lhs.parse()?;
    let rhs = arg_or_prompt(args.rhs, "Enter the second Boolean function in RPN (e.g., A B OR):")?;
    let rhs: Expr = rhs.parse()?;

    info!("ordering = {}", ordering);
    info!("lhs = {}", lhs);
    info!("rhs = {}", rhs);

    let session = Session::with_capacity(ordering, args.size as usize);
    let f = session.build(&lhs)?;
    let g = session.build(&rhs)?;
    info!("f = {} of size {}", f, session.size(f));
    info!("g = {} of size {}", g, session.size(g));
    info!("session = {:?}", session);

    if f == g {
        println!("The two Boolean functions are equivalent.");
    } else {
        println!("The two Boolean functions are NOT equivalent.");
        if let Some(model) = session.one_sat(session.apply_xor(f, g)?) {
            let witness: Vec<String> = model
                .into_iter()
                .map(|(v, value)| format!("{}={}", session.ordering().name(v).unwrap_or("?"), value as u8))
                .collect();
            println!("They differ at: {}", witness.join(" "));
        }
    }

    if let Some(dir) = args.dot_dir {
        std::fs::create_dir_all(&dir)?;
        for (name, root) in [("robdd1", f), ("robdd2", g)] {
            let config = DotConfig {
                root_labels: vec![name.to_string()],
                ..DotConfig::default()
            };
            let path = dir.join(format!("{}.dot", name));
            std::fs::write(&path, session.to_dot_with_config(&[root], &config)?)?;
            info!("Wrote {}", path.display());
        }
    }

    let time_total = time_total.elapsed();
    info!("All done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
