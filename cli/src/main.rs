use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use todolist_cli::{repl, view, CliError, Controller, HttpTransport, Transport};
use todolist_core::{Action, BannerKind, ClientState, Confirmation, ListStatus, SessionConfig, TodoId, TodoSession};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "todolist", about = "Terminal client for the todo list store")]
struct Cli {
    #[arg(long, env = "TODOLIST_BASE_URL", default_value = "http://localhost:5000")]
    base_url: String,

    /// Per-request timeout.
    #[arg(long, env = "TODOLIST_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    /// Without a subcommand, start the interactive view.
    #[command(subcommand)]
    command: Option<OneShot>,
}

#[derive(Subcommand, Debug)]
enum OneShot {
    /// Print the list once.
    List,
    /// Add a todo.
    Add { text: String },
    /// Replace the text of a todo.
    Update { id: String, text: String },
    /// Delete a todo.
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let transport = HttpTransport::new(Duration::from_secs(cli.timeout_secs))?;
    let session = TodoSession::new(SessionConfig::new(cli.base_url.clone()));
    let mut controller = Controller::new(session, transport);
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut output = tokio::io::stdout();

    tracing::debug!(base_url = %cli.base_url, "starting");

    let Some(command) = cli.command else {
        repl::run(&mut controller, &mut input, &mut output).await?;
        return Ok(ExitCode::SUCCESS);
    };

    controller.dispatch(Action::Mount);
    controller.settle().await;

    match command {
        OneShot::List => {}
        OneShot::Add { text } => {
            controller.dispatch(Action::SetDraft(text));
            controller.dispatch(Action::Create);
        }
        OneShot::Update { id, text } => {
            controller.dispatch(Action::BeginEdit {
                id: TodoId::new(id),
                text,
            });
            controller.dispatch(Action::Update);
        }
        OneShot::Delete { id, yes } => {
            let confirmation = if yes {
                Confirmation::Confirmed
            } else {
                repl::confirm(&mut input, &mut output).await?
            };
            controller.dispatch(Action::Delete {
                id: TodoId::new(id),
                confirmation,
            });
        }
    }

    Ok(finish(&mut controller).await)
}

/// Wait for the command and its resync, print the view, and report failure
/// through the exit status.
async fn finish<T: Transport>(controller: &mut Controller<T>) -> ExitCode {
    controller.settle().await;
    let state = controller.state();
    println!("{}", view::render(state));
    controller.shutdown().await;
    exit_code(controller.state())
}

fn exit_code(state: &ClientState) -> ExitCode {
    let failed = state.list_status() == ListStatus::Failed
        || state.banner().is_some_and(|b| b.kind == BannerKind::Error);
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
