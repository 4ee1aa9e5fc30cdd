#[cfg(not(target_env = "msvc"))]
#[cfg(feature = "jemalloc")]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = Jemalloc;

use std::io::BufReader;

use clap::Parser;

use otter_debug::{
    config::DebugConfig,
    context::Context,
    debug::{
        history::load_history,
        session::{DebugSession, Outcome},
    },
    interface::{cli::Cli, wire::Wire, UserInterface},
    names::Names,
};

mod args;

use args::{Args, InterfaceKind};

fn main() {
    #[cfg(feature = "log")]
    init_logging();

    let args = Args::parse();

    if args.help_markdown {
        clap_markdown::print_help_markdown::<Args>();
        std::process::exit(0);
    }

    let Some(path) = args.program.as_ref() else {
        println!("c No program given");
        std::process::exit(1);
    };

    let config = match args.config() {
        Ok(config) => config,
        Err(e) => {
            println!("c {e}");
            std::process::exit(1);
        }
    };

    let debug_config = match args.debug_config() {
        Ok(config) => config,
        Err(e) => {
            println!("c {e}");
            std::process::exit(1);
        }
    };

    let mut the_context = Context::from_config(config);

    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(e) => {
            println!("c Unable to open {}: {e}", path.display());
            std::process::exit(1);
        }
    };

    let names = match the_context.read_debug_dimacs(BufReader::new(file)) {
        Ok(names) => names,
        Err(e) => {
            println!("c Error loading {}: {e}", path.display());
            std::process::exit(1);
        }
    };

    let preloaded = match args.history.as_ref() {
        None => None,
        Some(history_path) => match load_history(history_path, &names) {
            Ok(assertions) => Some(assertions),
            Err(e) => {
                println!("c Unable to load history {}: {e}", history_path.display());
                std::process::exit(1);
            }
        },
    };

    let outcome = match args.interface {
        InterfaceKind::Cli => {
            let mut interface = Cli::new(&names, std::io::stdin().lock(), std::io::stdout())
                .styled(!args.no_style);
            run(&mut the_context, &names, debug_config, preloaded, &mut interface)
        }
        InterfaceKind::Wire => {
            let mut interface = Wire::new(&names, std::io::stdin().lock(), std::io::stdout());
            run(&mut the_context, &names, debug_config, preloaded, &mut interface)
        }
    };

    match outcome {
        Outcome::Coherent(_) => std::process::exit(10),
        Outcome::IncoherentWithoutAssumptions => std::process::exit(20),
        Outcome::Exited => std::process::exit(0),
    }
}

fn run(
    context: &mut Context,
    names: &Names,
    config: DebugConfig,
    preloaded: Option<Vec<otter_debug::structures::literal::CLiteral>>,
    interface: &mut impl UserInterface,
) -> Outcome {
    let mut session = DebugSession::new(context, names, config);
    if let Some(assertions) = preloaded {
        session.preload_assertions(assertions);
    }

    match session.debug(interface) {
        Ok(outcome) => outcome,
        Err(e) => {
            println!("c Session error: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "log")]
fn init_logging() {
    use log4rs::{
        append::console::{ConsoleAppender, Target},
        config::{Appender, Config, Root},
        encode::pattern::PatternEncoder,
    };

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{l} {t} - {m}{n}")))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(log::LevelFilter::Info));

    match config {
        Ok(config) => {
            if log4rs::init_config(config).is_err() {
                eprintln!("c Unable to initialise logging");
            }
        }
        Err(e) => eprintln!("c Unable to configure logging: {e}"),
    }
}
