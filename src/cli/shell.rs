use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

use crate::controller::{PageController, UiEvent};
use crate::renderer::Renderer;

/// Feeds one event per input line into the controller until EOF or `quit`.
///
/// Each event runs to completion before the next line is read.
pub async fn run_shell<R, I>(controller: &mut PageController<R>, input: I) -> std::io::Result<()>
where
    R: Renderer,
    I: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    controller.start().await;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                println!("{}", UiEvent::HELP);
                continue;
            }
            _ => {}
        }

        match line.parse::<UiEvent>() {
            Ok(event) => {
                debug!(?event, "Dispatching event");
                controller.handle(event).await;
            }
            Err(e) => {
                warn!(error = %e, "Ignoring input");
                eprintln!("{}", e);
            }
        }
    }

    info!("Shell finished");
    Ok(())
}
