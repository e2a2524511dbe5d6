use crate::pipeline::Pipeline;
use crate::prelude::{eprintln, *};
use std::rc::Rc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::LocalSet;

pub async fn run_stdio(global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Starting webgen MCP server with stdio transport...");
        eprintln!();
    }

    let mut stdout = tokio::io::stdout();
    LocalSet::new()
        .run_until(serve(tokio::io::stdin(), &mut stdout, global))
        .await
}

/// Answer newline-delimited JSON-RPC requests from `input` until EOF.
///
/// Every request runs as its own local task and all of them share one
/// [`Pipeline`], so a `webgen_generate` call still waiting on the model is
/// superseded by a newer one. Responses are written as they complete, one per
/// line. Must run inside a [`LocalSet`].
async fn serve<R, W>(input: R, output: &mut W, global: crate::Global) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let verbose = global.verbose;
    let pipeline = Rc::new(Pipeline::new());
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let read = async move {
        let mut reader = BufReader::new(input);
        let mut line = String::new();
        let mut handlers = Vec::new();

        loop {
            line.clear();
            if reader.read_line(&mut line).await? == 0 {
                log::debug!("stdin closed, waiting for {} requests", handlers.len());
                break;
            }

            let request = line.trim().to_string();
            if request.is_empty() {
                continue;
            }

            if verbose {
                eprintln!("Received: {request}");
            }

            let tx = tx.clone();
            let global = global.clone();
            let pipeline = Rc::clone(&pipeline);
            handlers.push(tokio::task::spawn_local(async move {
                let response = super::handle_request(&request, &global, &pipeline).await;
                match serde_json::to_string(&response) {
                    Ok(json) => {
                        let _ = tx.send(json);
                    }
                    Err(e) => log::error!("Failed to serialize response: {e}"),
                }
            }));
        }

        drop(tx);
        for handler in handlers {
            handler.await?;
        }
        Ok::<(), color_eyre::eyre::Report>(())
    };

    let write = async move {
        while let Some(json) = rx.recv().await {
            if verbose {
                eprintln!("Sending: {json}");
            }
            output.write_all(json.as_bytes()).await?;
            output.write_all(b"\n").await?;
            output.flush().await?;
        }
        Ok::<(), color_eyre::eyre::Report>(())
    };

    let (read, write) = tokio::join!(read, write);
    read?;
    write
}
