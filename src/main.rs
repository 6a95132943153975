use std::io;

use clap::{Command, CommandFactory, Parser};
use clap_complete::{generate, Generator};
use envkey_source::application::services::ShellOutput;
use envkey_source::cli::commands::execute_command;
use envkey_source::cli::{output, Cli};
use envkey_source::exitcode;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

fn main() {
    let cli = Cli::parse();

    if let Some(generator) = cli.generator {
        let mut cmd = Cli::command();
        output::note(&format!("Generating completion file for {generator:?}..."));
        print_completions(generator, &mut cmd);
        std::process::exit(exitcode::OK);
    }

    setup_logging(cli.debug);

    match execute_command(&cli) {
        Ok(shell_output) => {
            tracing::debug!(failed = shell_output.failed, "writing shell output");
            output::script(&shell_output.text);
        }
        Err(e) => {
            // Still emit something `eval` can run so the calling shell sees a failure.
            output::script(&ShellOutput::failure(&e.to_string()).text);
            std::process::exit(e.exit_code());
        }
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            output::warning("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    // stdout is evaluated by the calling shell, so logs must go to stderr
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}
