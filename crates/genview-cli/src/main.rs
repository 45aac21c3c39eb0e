//! genview CLI - Main entry point

use clap::Parser;
use colored::Colorize;
use genview_cli::commands::{self, lengths::LengthsArgs, render::RenderArgs};
use genview_cli::{Cli, Commands};
use genview_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

fn main() {
    let cli = Cli::parse();

    if cli.markdown_help {
        println!("{}", clap_markdown::help_markdown::<Cli>());
        return;
    }

    let Some(command) = cli.command.as_ref() else {
        eprintln!("Error: A subcommand is required");
        eprintln!();
        eprintln!("For more information, try '--help'.");
        process::exit(2);
    };

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    };
    let log_config = LogConfig::builder()
        .level(level)
        .output(LogOutput::Console)
        .log_file_prefix("genview-cli")
        .build();

    // Environment variables take precedence over the flags
    let log_config = match log_config.clone().merge_env() {
        Ok(merged) => merged,
        Err(e) => {
            eprintln!(
                "{} ignoring invalid logging environment: {}",
                "Warning:".yellow(),
                e
            );
            log_config
        },
    };

    // The CLI works without logging, so a failed init is not fatal
    let _guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{} logging disabled: {}", "Warning:".yellow(), e);
            None
        },
    };

    if let Err(e) = execute_command(&cli, command) {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn execute_command(cli: &Cli, command: &Commands) -> genview_cli::Result<()> {
    let data_dir = cli.data_dir.as_path();
    let manifest = cli.manifest.as_deref();

    match command {
        Commands::Init { title, force } => {
            commands::init::run(data_dir, manifest, title.clone(), *force)
        },

        Commands::Lengths {
            file,
            max_length,
            no_filter,
            skip_malformed,
            format,
            summary,
        } => {
            let project = commands::open_project(data_dir, manifest)?;
            commands::lengths::run(
                &project,
                LengthsArgs {
                    file: file.clone(),
                    max_length: *max_length,
                    no_filter: *no_filter,
                    skip_malformed: *skip_malformed,
                    format: *format,
                    summary: *summary,
                },
            )
        },

        Commands::Blast {
            file,
            format,
            limit,
        } => {
            let project = commands::open_project(data_dir, manifest)?;
            commands::blast::run(&project, file.clone(), *format, *limit)
        },

        Commands::Assemblies { format } => {
            let project = commands::open_project(data_dir, manifest)?;
            commands::assemblies::run(&project, *format)
        },

        Commands::Reports { stage } => {
            let project = commands::open_project(data_dir, manifest)?;
            commands::reports::run(&project, *stage)
        },

        Commands::Status => {
            let project = commands::open_project(data_dir, manifest)?;
            commands::status::run(&project)
        },

        Commands::Render {
            output,
            strict,
            before_report,
            after_report,
        } => {
            let project = commands::open_project(data_dir, manifest)?;
            commands::render::run(
                &project,
                RenderArgs {
                    output: output.clone(),
                    strict: *strict,
                    before_report: before_report.clone(),
                    after_report: after_report.clone(),
                },
            )
            .map(|_| ())
        },
    }
}
