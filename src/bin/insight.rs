//! DataInsight CLI
//!
//! Command-line front end for the natural-language-to-SQL query console.

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use datainsight_console::console::command::{self, ClearTarget, ConsoleCommand};
use datainsight_console::{
    telemetry, ConsoleConfig, HttpBackend, QueryConsole, SqlBackend, StatusLevel, StatusLine,
};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use std::process::ExitCode;

/// DataInsight CLI - ask questions, get SQL, browse results
#[derive(Parser)]
#[command(name = "insight")]
#[command(about = "Natural-language-to-SQL query console", long_about = None)]
#[command(version)]
struct Cli {
    /// Backend base URL (overrides DATAINSIGHT_API_BASE and the config file)
    #[arg(long, global = true, env = "DATAINSIGHT_API_BASE")]
    base_url: Option<String>,

    /// Rows per page
    #[arg(long, global = true, env = "DATAINSIGHT_PAGE_SIZE")]
    page_size: Option<usize>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate SQL from a question
    Generate {
        /// Question in natural language
        question: String,
    },

    /// Execute SQL and show the results
    Query {
        /// SQL query string
        sql: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate SQL from a question, then execute it
    Ask {
        /// Question in natural language
        question: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List tables and columns known to the backend
    Schema,

    /// Check that the backend is up
    Health,

    /// Show the effective configuration
    Config {
        /// Write it to ~/.datainsight/config.json
        #[arg(long)]
        save: bool,
    },

    /// Interactive session
    Console,
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Page to display (1-based)
    #[arg(long, default_value = "1")]
    page: usize,

    /// Write the console page as HTML to this file
    #[arg(long)]
    html: Option<PathBuf>,

    /// Print all rows as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.verbose);

    let mut config = ConsoleConfig::load().context("Failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        config.timeout_secs = timeout_secs;
    }
    config.validate()?;

    let page_size = config.page_size;
    let backend = HttpBackend::new(config)?;
    let mut console = QueryConsole::new(backend, page_size);

    let ok = match cli.command {
        Commands::Config { save } => {
            let config = console.backend().config();
            println!("{}", serde_json::to_string_pretty(config)?);
            if save {
                config.save()?;
                println!("{} Saved to {}", "✓".green(), ConsoleConfig::config_file()?.display());
            }
            true
        }
        Commands::Generate { question } => {
            let ok = console.ask(question).await.is_ok();
            print_status(console.status());
            if ok {
                println!("{}", console.sql());
            }
            ok
        }
        Commands::Query { sql, output } => {
            console.set_sql(sql);
            let ok = console.execute_sql().await.is_ok();
            show_results(&mut console, &output)?;
            ok
        }
        Commands::Ask { question, output } => {
            let mut ok = console.ask(question).await.is_ok();
            if ok {
                println!("{} {}", "SQL:".cyan(), console.sql());
                ok = console.execute_sql().await.is_ok();
            }
            show_results(&mut console, &output)?;
            ok
        }
        Commands::Schema => {
            let ok = console.load_schema().await.is_ok();
            print_status(console.status());
            print_schema(&console);
            ok
        }
        Commands::Health => {
            let ok = console.health().await.is_ok();
            print_status(console.status());
            ok
        }
        Commands::Console => {
            run_console(&mut console).await?;
            true
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn print_status(status: &StatusLine) {
    let line = match status.level {
        StatusLevel::Info => format!("{} {}", "→".cyan(), status.message.dimmed()),
        StatusLevel::Success => format!("{} {}", "✓".green(), status.message.green()),
        StatusLevel::Error => format!("{} {}", "✗".red(), status.message.red()),
    };
    eprintln!("{}", line);
}

fn show_results<B: SqlBackend>(
    console: &mut QueryConsole<B>,
    output: &OutputArgs,
) -> anyhow::Result<()> {
    if output.page > 1 && !console.go_to_page(output.page) {
        eprintln!(
            "{} Page {} is out of range (1-{}), showing page {}",
            "!".yellow(),
            output.page,
            console.page_count().max(1),
            console.pagination().page()
        );
    }

    print_status(console.status());

    if output.json {
        println!("{}", serde_json::to_string_pretty(console.results())?);
    } else {
        print!("{}", console.render_text());
    }

    if let Some(path) = &output.html {
        write_html(console, path)?;
    }
    Ok(())
}

fn write_html<B: SqlBackend>(console: &QueryConsole<B>, path: &std::path::Path) -> anyhow::Result<()> {
    let path = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).to_string());
    std::fs::write(&path, console.render_page())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    eprintln!("{} HTML written to {}", "✓".green(), path.display());
    Ok(())
}

fn print_schema<B: SqlBackend>(console: &QueryConsole<B>) {
    let Some(catalog) = console.schema() else {
        return;
    };
    for table in &catalog.tables {
        println!("  {} {}", "•".green(), table.name.bright_white());
        for column in &table.columns {
            let pk = if column.pk { " PK" } else { "" };
            let nn = if column.notnull { " NOT NULL" } else { "" };
            println!(
                "      {} {}",
                column.name,
                format!("{}{}{}", column.data_type, pk, nn).dimmed()
            );
        }
    }
}

/// Interactive readline loop: one command per line, Ctrl-C or Ctrl-D to leave.
async fn run_console<B: SqlBackend>(console: &mut QueryConsole<B>) -> anyhow::Result<()> {
    println!("{}", "DataInsight console - type 'help' for commands".cyan().bold());
    print_status(console.status());

    let mut rl = DefaultEditor::new().context("Failed to start line editor")?;

    loop {
        let line = match rl.readline("insight> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".cyan());
                break;
            }
            Err(err) => {
                eprintln!("{} {}", "✗".red(), err);
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line);

        let command = match command::parse(line) {
            Ok(command) => command,
            Err(e) => {
                println!("{} {}", "✗".red(), e);
                continue;
            }
        };

        match command {
            ConsoleCommand::Quit => break,
            command => execute_command(console, command).await,
        }
    }

    Ok(())
}

async fn execute_command<B: SqlBackend>(console: &mut QueryConsole<B>, command: ConsoleCommand) {
    match command {
        ConsoleCommand::Ask(question) => {
            if console.ask(question).await.is_ok() {
                println!("{}", console.sql());
            }
        }
        ConsoleCommand::Example(question) => console.fill_example(question),
        ConsoleCommand::Sql(sql) => {
            console.set_sql(sql);
            println!("{}", "SQL editor updated".dimmed());
            return;
        }
        ConsoleCommand::Run => {
            let _ = console.execute_sql().await;
            print!("{}", console.render_text());
        }
        ConsoleCommand::Step(delta) => {
            if console.change_page(delta) {
                print!("{}", console.render_text());
            } else {
                println!("{}", "No page in that direction".yellow());
            }
            return;
        }
        ConsoleCommand::Page(page) => {
            if console.go_to_page(page) {
                print!("{}", console.render_text());
            } else {
                println!(
                    "{} Page {} is out of range (1-{})",
                    "!".yellow(),
                    page,
                    console.page_count().max(1)
                );
            }
            return;
        }
        ConsoleCommand::Show => {
            print!("{}", console.render_text());
            return;
        }
        ConsoleCommand::Copy => {
            let _ = console.copy_sql(&mut std::io::stdout());
        }
        ConsoleCommand::Clear(ClearTarget::Input) => console.clear_input(),
        ConsoleCommand::Clear(ClearTarget::Sql) => console.clear_sql(),
        ConsoleCommand::Clear(ClearTarget::Results) => console.clear_results(),
        ConsoleCommand::Schema => {
            if console.load_schema().await.is_ok() {
                print_schema(console);
            }
        }
        ConsoleCommand::Health => {
            let _ = console.health().await;
        }
        ConsoleCommand::Html(path) => {
            if let Err(e) = write_html(console, std::path::Path::new(&path)) {
                println!("{} {:#}", "✗".red(), e);
            }
            return;
        }
        ConsoleCommand::Help => {
            println!("{}", command::HELP);
            return;
        }
        ConsoleCommand::Quit => return,
        ConsoleCommand::Unknown(word) => {
            println!("{} Unknown command '{}', try 'help'", "✗".red(), word);
            return;
        }
    }

    print_status(console.status());
}
