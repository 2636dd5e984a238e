mod calendar;
mod config;
mod server;

use std::sync::Arc;

use anyhow::Context;
use calendar::sanjo_tsubame::sanjo_tsubame_table;
use config::ServerConfig;
use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use log::{error, info};
use server::server::Server;
use tokio::net::TcpListener;

pub const ISO_FORMAT_DATE: &str = "%Y-%m-%d";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env().context("Could not load server config")?;
    let table = sanjo_tsubame_table().context("Could not build the holiday table")?;
    let server = Server::setup(Arc::new(table), config.prefixes.clone())
        .context("Could not set up the server")?;

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Could not bind to {}", addr))?;
    info!("Listening on {} under {:?}", addr, config.prefixes);

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(err) => {
                error!("Could not accept connection.\n{}", err);
                continue;
            }
        };
        let io = TokioIo::new(stream);
        let server_clone = server.clone();
        tokio::spawn(async move {
            if let Err(err) = http1::Builder::new()
                .serve_connection(io, server_clone)
                .await
            {
                error!("Connection from {} failed.\n{}", peer, err);
            }
        });
    }
}
