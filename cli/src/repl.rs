//! Interactive terminal loop.
//!
//! Input lines and request/timer completions are handled by one task, so
//! the view stays responsive while requests are outstanding. The view is
//! redrawn after every input line and every completion.

use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt, Lines};
use todolist_core::{Action, Confirmation, EditState};

use crate::command::{self, Command, ParseError, HELP};
use crate::controller::Controller;
use crate::error::CliError;
use crate::transport::Transport;
use crate::view;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this todo? [y/N] ";

pub async fn run<T, R, W>(controller: &mut Controller<T>, input: &mut Lines<R>, output: &mut W) -> Result<(), CliError>
where
    T: Transport,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    controller.dispatch(Action::Mount);
    let mut notice: Option<String> = None;

    loop {
        draw(controller, notice.take(), output).await?;
        tokio::select! {
            line = input.next_line() => {
                let Some(line) = line? else { break };
                match command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(cmd) => notice = apply(controller, cmd, input, output).await?,
                    Err(ParseError::Empty) => {}
                    Err(err) => notice = Some(err.to_string()),
                }
            }
            () = controller.next_completion() => {}
        }
    }

    controller.shutdown().await;
    Ok(())
}

async fn draw<T, W>(controller: &Controller<T>, notice: Option<String>, output: &mut W) -> Result<(), CliError>
where
    T: Transport,
    W: AsyncWrite + Unpin,
{
    let mut screen = view::render(controller.state());
    if let Some(notice) = notice {
        screen.push_str("\n\n");
        screen.push_str(&notice);
    }
    screen.push_str("\n\n> ");
    output.write_all(screen.as_bytes()).await?;
    output.flush().await?;
    Ok(())
}

/// Apply one command. Returns a notice to show under the view, if any.
pub async fn apply<T, R, W>(
    controller: &mut Controller<T>,
    cmd: Command,
    input: &mut Lines<R>,
    output: &mut W,
) -> Result<Option<String>, CliError>
where
    T: Transport,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    match cmd {
        Command::Add(text) => {
            controller.dispatch(Action::SetDraft(text));
            controller.dispatch(Action::Create);
        }
        Command::Edit { index, text } => {
            let Some(item) = command::item_at(controller.state(), index) else {
                return Ok(Some(format!("no item #{index}")));
            };
            let action = Action::BeginEdit {
                id: item.id.clone(),
                text: item.text.clone(),
            };
            controller.dispatch(action);
            if let Some(text) = text {
                controller.dispatch(Action::SetEditText(text));
            }
        }
        Command::Text(text) => {
            if *controller.state().editing() == EditState::Viewing {
                return Ok(Some("nothing is being edited; use `edit <n>` first".to_string()));
            }
            controller.dispatch(Action::SetEditText(text));
        }
        Command::Save => {
            if *controller.state().editing() == EditState::Viewing {
                return Ok(Some("nothing is being edited; use `edit <n>` first".to_string()));
            }
            controller.dispatch(Action::Update);
        }
        Command::Cancel => controller.dispatch(Action::CancelEdit),
        Command::Delete(index) => {
            let Some(id) = command::item_at(controller.state(), index).map(|item| item.id.clone()) else {
                return Ok(Some(format!("no item #{index}")));
            };
            let confirmation = confirm(input, output).await?;
            controller.dispatch(Action::Delete { id, confirmation });
        }
        Command::Retry => controller.dispatch(Action::Refresh),
        Command::Help => return Ok(Some(HELP.to_string())),
        Command::Quit => {}
    }
    Ok(None)
}

/// Blocking yes/no prompt. Anything but `y`/`yes` (including end of input)
/// declines.
pub async fn confirm<R, W>(input: &mut Lines<R>, output: &mut W) -> Result<Confirmation, CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output.write_all(DELETE_PROMPT.as_bytes()).await?;
    output.flush().await?;
    let answer = input.next_line().await?.unwrap_or_default();
    Ok(match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Confirmation::Confirmed,
        _ => Confirmation::Declined,
    })
}
